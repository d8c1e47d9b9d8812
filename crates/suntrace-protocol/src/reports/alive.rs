use super::{DecodeContext, ReportDecoder};
use crate::field::{self, Terminator};
use crate::frame::FrameReader;
use crate::message::{Report, ReportKind};
use serde::{Deserialize, Serialize};
use std::io::Read;
use suntrace_core::{DecodeResult, DeviceId, Model};

/// Keep-alive (`ALV`): only the device id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliveReport {
    pub device_id: DeviceId,
}

impl ReportDecoder for AliveReport {
    const KIND: ReportKind = ReportKind::Alive;

    fn decode<R: Read>(
        &mut self,
        reader: &mut FrameReader<R>,
        _ctx: &DecodeContext,
    ) -> DecodeResult<()> {
        self.device_id = field::device_id(reader, Terminator::EndOfFrame)?;
        Ok(())
    }

    fn model(&self) -> Model {
        Model::Unknown
    }
}

impl From<AliveReport> for Report {
    fn from(report: AliveReport) -> Self {
        Report::Alive(report)
    }
}
