use super::{CommonReport, DecodeContext, ReportDecoder};
use crate::field;
use crate::frame::FrameReader;
use crate::message::{Report, ReportKind};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::io::Read;
use suntrace_core::{DecodeResult, Model};

/// Extended data report (`UEX`, ST600 only).
///
/// Carries an opaque payload from an attached peripheral, protected by an
/// 8-bit additive checksum. A checksum mismatch does not fail decoding;
/// check [`ExtendedDataReport::is_valid`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtendedDataReport {
    #[serde(flatten)]
    pub common: CommonReport,
    pub length: u16,
    pub payload: Bytes,
    pub checksum: u8,
    pub driving_hour_meter: u32,
    pub backup_volt: f32,
    pub real_time: bool,
}

impl ExtendedDataReport {
    /// Sum of the payload bytes, modulo 256.
    #[must_use]
    pub fn payload_sum(&self) -> u8 {
        self.payload.iter().fold(0u8, |sum, &b| sum.wrapping_add(b))
    }

    /// Whether the payload matches the declared checksum.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.payload_sum() == self.checksum
    }
}

impl ReportDecoder for ExtendedDataReport {
    const KIND: ReportKind = ReportKind::ExtendedData;

    fn decode<R: Read>(
        &mut self,
        reader: &mut FrameReader<R>,
        ctx: &DecodeContext,
    ) -> DecodeResult<()> {
        let layout = self.common.decode(reader, ctx, Self::KIND)?;
        self.length = field::payload_length(reader)?;
        self.payload = field::payload(reader, self.length)?;
        self.checksum = field::checksum(reader)?;
        self.driving_hour_meter = field::hour_meter(reader)?;
        self.backup_volt = field::backup_volt(reader)?;
        self.real_time = field::real_time(reader, layout.real_time_terminator())?;
        Ok(())
    }

    fn model(&self) -> Model {
        self.common.model
    }
}

impl From<ExtendedDataReport> for Report {
    fn from(report: ExtendedDataReport) -> Self {
        Report::ExtendedData(report)
    }
}
