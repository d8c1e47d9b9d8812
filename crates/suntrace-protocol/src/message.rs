use crate::reports::{
    AlertReport, AliveReport, EmergencyReport, EventReport, ExtendedDataReport, StatusReport,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use suntrace_core::{DecodeError, Family, Model};

/// Report kind, as selected by the frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReportKind {
    Status,
    Emergency,
    Event,
    Alert,
    Alive,
    ExtendedData,
    Unknown,
}

impl ReportKind {
    /// Three-letter tag used in headers (`STT`, `EMG`, ...).
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            ReportKind::Status => "STT",
            ReportKind::Emergency => "EMG",
            ReportKind::Event => "EVT",
            ReportKind::Alert => "ALT",
            ReportKind::Alive => "ALV",
            ReportKind::ExtendedData => "UEX",
            ReportKind::Unknown => "???",
        }
    }
}

/// Decoded report body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Report {
    Status(StatusReport),
    Emergency(EmergencyReport),
    Event(EventReport),
    Alert(AlertReport),
    Alive(AliveReport),
    ExtendedData(ExtendedDataReport),
    /// Header or first field not recognized.
    Unknown,
}

impl Report {
    #[must_use]
    pub fn kind(&self) -> ReportKind {
        match self {
            Report::Status(_) => ReportKind::Status,
            Report::Emergency(_) => ReportKind::Emergency,
            Report::Event(_) => ReportKind::Event,
            Report::Alert(_) => ReportKind::Alert,
            Report::Alive(_) => ReportKind::Alive,
            Report::ExtendedData(_) => ReportKind::ExtendedData,
            Report::Unknown => ReportKind::Unknown,
        }
    }
}

/// One frame pulled from the stream.
///
/// The raw `frame` holds every byte consumed for this message, whether
/// decoding succeeded or not. When `outcome` is an error, the report holds
/// the fields decoded before the failure and defaults after it.
#[derive(Debug, Clone)]
pub struct Message {
    pub family: Option<Family>,
    pub model: Model,
    pub report: Report,
    pub frame: Bytes,
    pub outcome: Result<(), DecodeError>,
}

impl Message {
    #[must_use]
    pub fn kind(&self) -> ReportKind {
        self.report.kind()
    }

    #[must_use]
    pub fn report(&self) -> &Report {
        &self.report
    }

    /// Raw bytes of the frame.
    #[must_use]
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    #[must_use]
    pub fn error(&self) -> Option<&DecodeError> {
        self.outcome.as_ref().err()
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}
