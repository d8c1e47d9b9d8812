//! Core types shared by the Suntech tracker decoders.
//!
//! Holds the wire constants, the device and report identifiers, and the
//! two error levels: [`DecodeError`] for failures local to one message and
//! [`Error`] for failures that end the stream.

pub mod constants;
pub mod error;
pub mod types;

pub use error::{DecodeError, DecodeResult, Error, Field, Result};
pub use types::*;

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
