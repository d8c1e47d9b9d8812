use super::{CommonReport, DecodeContext, ReportDecoder, decode_trailer};
use crate::field;
use crate::frame::FrameReader;
use crate::message::{Report, ReportKind};
use serde::{Deserialize, Serialize};
use std::io::Read;
use suntrace_core::{DecodeResult, EmergencyKind, Model};

/// Emergency report (`EMG`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyReport {
    #[serde(flatten)]
    pub common: CommonReport,
    pub emergency: EmergencyKind,
    pub driving_hour_meter: u32,
    pub backup_volt: f32,
    pub real_time: bool,
    pub adc: Option<f32>,
}

impl ReportDecoder for EmergencyReport {
    const KIND: ReportKind = ReportKind::Emergency;

    fn decode<R: Read>(
        &mut self,
        reader: &mut FrameReader<R>,
        ctx: &DecodeContext,
    ) -> DecodeResult<()> {
        let layout = self.common.decode(reader, ctx, Self::KIND)?;
        self.emergency = field::emergency_id(reader)?;
        self.driving_hour_meter = field::hour_meter(reader)?;
        self.backup_volt = field::backup_volt(reader)?;
        decode_trailer(reader, ctx, layout, &mut self.real_time, &mut self.adc)
    }

    fn model(&self) -> Model {
        self.common.model
    }
}

impl From<EmergencyReport> for Report {
    fn from(report: EmergencyReport) -> Self {
        Report::Emergency(report)
    }
}
