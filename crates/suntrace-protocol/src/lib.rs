//! Decoder for the ASCII report frames of Suntech ST300 and ST600 trackers.
//!
//! The crate is layered bottom-up:
//!
//! - [`lexer`]: byte-level tokenizer with shape classification
//! - [`frame`]: raw-byte accounting for the frame being decoded
//! - [`field`] and [`cell`]: per-field decoders
//! - [`reports`]: one decoding pipeline per report kind
//! - [`parser`]: stream-level iterator producing [`Message`]s

pub mod cell;
pub mod field;
pub mod frame;
pub mod layout;
pub mod lexer;
pub mod message;
pub mod options;
pub mod parser;
pub mod reports;

pub use cell::{Cell, Cell3g};
pub use message::{Message, Report, ReportKind};
pub use options::ParserOptions;
pub use parser::{Parser, parse_bytes};
pub use reports::{
    AlertReport, AliveReport, CommonReport, EmergencyReport, EventReport, ExtendedDataReport,
    StatusReport,
};
