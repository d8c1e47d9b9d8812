use crate::types::Family;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Every field a frame decoder can fail on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Header,
    DeviceId,
    Model,
    FirmwareVersion,
    Date,
    Time,
    Timestamp,
    Cell,
    Mcc,
    Mnc,
    Lac,
    SignalLevel,
    Latitude,
    Longitude,
    Speed,
    Course,
    Satellites,
    GpsFix,
    Distance,
    PowerVolt,
    Io,
    Mode,
    MessageNumber,
    DrivingHourMeter,
    BackupVolt,
    RealTime,
    Adc,
    EmergencyId,
    EventId,
    AlertId,
    PayloadLength,
    Payload,
    Checksum,
    UnknownTail,
    UnknownFrame,
}

impl Field {
    /// Name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Field::Header => "header",
            Field::DeviceId => "device id",
            Field::Model => "model",
            Field::FirmwareVersion => "firmware version",
            Field::Date => "date",
            Field::Time => "time",
            Field::Timestamp => "timestamp",
            Field::Cell => "cell",
            Field::Mcc => "MCC",
            Field::Mnc => "MNC",
            Field::Lac => "LAC",
            Field::SignalLevel => "signal level",
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
            Field::Speed => "speed",
            Field::Course => "course",
            Field::Satellites => "satellites",
            Field::GpsFix => "GPS fix",
            Field::Distance => "distance",
            Field::PowerVolt => "power voltage",
            Field::Io => "IO",
            Field::Mode => "mode",
            Field::MessageNumber => "message number",
            Field::DrivingHourMeter => "driving hour meter",
            Field::BackupVolt => "backup voltage",
            Field::RealTime => "real-time flag",
            Field::Adc => "ADC",
            Field::EmergencyId => "emergency id",
            Field::EventId => "event id",
            Field::AlertId => "alert id",
            Field::PayloadLength => "payload length",
            Field::Payload => "payload",
            Field::Checksum => "checksum",
            Field::UnknownTail => "unknown tail",
            Field::UnknownFrame => "unknown frame",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Message-local decode failure.
///
/// A `DecodeError` is recorded on the message it occurred in; the parser
/// keeps going with the next frame. Each variant names the field and the
/// exact constraint that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    // Character class
    #[error("Invalid {field}: unexpected characters")]
    Syntax { field: Field },

    // Delimiters
    #[error("Invalid {field}: a ';' separator was expected")]
    ExpectedSeparator { field: Field },

    #[error("Invalid {field}: a CR end of frame was expected")]
    ExpectedEndOfFrame { field: Field },

    // Numeric range
    #[error("Invalid {field}: value {literal:?} out of range")]
    OutOfRange { field: Field, literal: String },

    // Length
    #[error("Invalid {field}: no delimiter within {max} bytes")]
    TooLong { field: Field, max: usize },

    #[error("Stream ended while reading {field}")]
    Truncated { field: Field },

    // Semantic
    #[error("Unsupported {family} model code {code}")]
    UnsupportedModel { family: Family, code: u8 },

    #[error("Unknown {field} code {code:?}")]
    UnknownCode { field: Field, code: String },

    #[error("Unknown header {header:?}")]
    UnknownHeader { header: String },

    #[error("Command response {header:?} is not a report")]
    CommandResponse { header: String },

    // Transport failure inside a frame; the parser also records it as fatal
    #[error("IO error while reading {field}: {kind}")]
    Io {
        field: Field,
        kind: std::io::ErrorKind,
    },
}

impl DecodeError {
    /// The field the error occurred in, if it is tied to one.
    pub fn field(&self) -> Option<Field> {
        match self {
            DecodeError::Syntax { field }
            | DecodeError::ExpectedSeparator { field }
            | DecodeError::ExpectedEndOfFrame { field }
            | DecodeError::OutOfRange { field, .. }
            | DecodeError::TooLong { field, .. }
            | DecodeError::Truncated { field }
            | DecodeError::UnknownCode { field, .. }
            | DecodeError::Io { field, .. } => Some(*field),
            DecodeError::UnsupportedModel { .. } => Some(Field::Model),
            DecodeError::UnknownHeader { .. } | DecodeError::CommandResponse { .. } => {
                Some(Field::Header)
            }
        }
    }

    /// Frame the parser does not know how to decode (candidate for skipping).
    pub fn is_unrecognized_frame(&self) -> bool {
        matches!(
            self,
            DecodeError::UnknownHeader { .. } | DecodeError::CommandResponse { .. }
        )
    }

    /// Whether the stream ended before the frame was complete.
    pub fn is_truncation(&self) -> bool {
        matches!(self, DecodeError::Truncated { .. })
    }
}

/// Stream-fatal error. Once returned, the parser yields no more messages.
#[derive(Error, Debug)]
pub enum Error {
    #[error("ZIP (binary) frames are not supported")]
    ZipUnsupported,

    #[error("Unexpected byte 0x{0:02x} at frame boundary")]
    UnexpectedByte(u8),

    #[error("Unknown frame {header:?} left the stream mid-frame")]
    UnknownFrame { header: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
