use super::{CommonReport, DecodeContext, ReportDecoder, decode_trailer};
use crate::field;
use crate::frame::FrameReader;
use crate::message::{Report, ReportKind};
use serde::{Deserialize, Serialize};
use std::io::Read;
use suntrace_core::{DecodeResult, Mode, Model};

/// Periodic position report (`STT`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusReport {
    #[serde(flatten)]
    pub common: CommonReport,
    pub mode: Mode,
    pub message_number: u16,
    /// Minutes
    pub driving_hour_meter: u32,
    pub backup_volt: f32,
    pub real_time: bool,
    /// Present on ST600 reports only.
    pub adc: Option<f32>,
}

impl ReportDecoder for StatusReport {
    const KIND: ReportKind = ReportKind::Status;

    fn decode<R: Read>(
        &mut self,
        reader: &mut FrameReader<R>,
        ctx: &DecodeContext,
    ) -> DecodeResult<()> {
        let layout = self.common.decode(reader, ctx, Self::KIND)?;
        self.mode = field::mode(reader)?;
        self.message_number = field::message_number(reader)?;
        self.driving_hour_meter = field::hour_meter(reader)?;
        self.backup_volt = field::backup_volt(reader)?;
        decode_trailer(reader, ctx, layout, &mut self.real_time, &mut self.adc)
    }

    fn model(&self) -> Model {
        self.common.model
    }
}

impl From<StatusReport> for Report {
    fn from(report: StatusReport) -> Self {
        Report::Status(report)
    }
}
