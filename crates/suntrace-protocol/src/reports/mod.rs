//! Report decoders.
//!
//! Every report is decoded by a strict pipeline of field decoders writing
//! straight into the report record. The first failing field stops the
//! pipeline; the fields before it keep their decoded values and the ones
//! after it keep their defaults.

mod alert;
mod alive;
mod common;
mod emergency;
mod event;
mod ext_data;
mod status;

pub use alert::AlertReport;
pub use alive::AliveReport;
pub use common::CommonReport;
pub use emergency::EmergencyReport;
pub use event::EventReport;
pub use ext_data::ExtendedDataReport;
pub use status::StatusReport;

use crate::field::{self, Terminator};
use crate::frame::FrameReader;
use crate::layout::{FrameLayout, Trailer};
use crate::message::{Report, ReportKind};
use std::io::Read;
use suntrace_core::{DecodeResult, Family, Model};

/// Per-frame decoding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeContext {
    pub family: Family,
    /// Header literal without the start character, e.g. `T600EVT;`.
    pub header: &'static str,
    pub max_unknown_tail_len: usize,
}

/// A report record that can be filled from a frame body.
pub trait ReportDecoder: Default + Into<Report> {
    const KIND: ReportKind;

    /// Decode the fields following the header into `self`.
    fn decode<R: Read>(
        &mut self,
        reader: &mut FrameReader<R>,
        ctx: &DecodeContext,
    ) -> DecodeResult<()>;

    /// Model reported by the device, `Unknown` if not (yet) decoded.
    fn model(&self) -> Model;
}

/// Real-time flag and whatever the layout puts after it.
fn decode_trailer<R: Read>(
    reader: &mut FrameReader<R>,
    ctx: &DecodeContext,
    layout: FrameLayout,
    real_time: &mut bool,
    adc: &mut Option<f32>,
) -> DecodeResult<()> {
    *real_time = field::real_time(reader, layout.real_time_terminator())?;
    match layout.trailer {
        Trailer::End => {}
        Trailer::Adc => *adc = Some(field::adc(reader, Terminator::EndOfFrame)?),
        Trailer::UnknownTail => field::unknown_tail(reader, ctx.max_unknown_tail_len)?,
    }
    Ok(())
}
