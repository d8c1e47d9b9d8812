use super::{CommonReport, DecodeContext, ReportDecoder, decode_trailer};
use crate::field::{self, Sender};
use crate::frame::FrameReader;
use crate::message::{Report, ReportKind};
use serde::{Deserialize, Serialize};
use std::io::Read;
use suntrace_core::{DecodeError, DecodeResult, EventKind, Model};

/// Input event report (`EVT`).
///
/// Command responses share the `EVT` header and carry `Res` in place of
/// the device id; they are rejected as [`DecodeError::CommandResponse`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventReport {
    #[serde(flatten)]
    pub common: CommonReport,
    pub event: EventKind,
    pub driving_hour_meter: u32,
    pub backup_volt: f32,
    pub real_time: bool,
    pub adc: Option<f32>,
}

impl ReportDecoder for EventReport {
    const KIND: ReportKind = ReportKind::Event;

    fn decode<R: Read>(
        &mut self,
        reader: &mut FrameReader<R>,
        ctx: &DecodeContext,
    ) -> DecodeResult<()> {
        self.common.device_id = match field::sender(reader)? {
            Sender::Device(id) => id,
            Sender::CommandResponse => {
                return Err(DecodeError::CommandResponse {
                    header: ctx.header.to_string(),
                });
            }
        };
        let layout = self.common.decode_after_id(reader, ctx, Self::KIND)?;
        self.event = field::event_id(reader)?;
        self.driving_hour_meter = field::hour_meter(reader)?;
        self.backup_volt = field::backup_volt(reader)?;
        decode_trailer(reader, ctx, layout, &mut self.real_time, &mut self.adc)
    }

    fn model(&self) -> Model {
        self.common.model
    }
}

impl From<EventReport> for Report {
    fn from(report: EventReport) -> Self {
        Report::Event(report)
    }
}
