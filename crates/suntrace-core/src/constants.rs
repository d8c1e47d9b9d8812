//! Wire constants for the Suntech ASCII protocol.
//!
//! Every ASCII frame emitted by ST300 and ST600 devices has the shape:
//!
//! ```text
//! S T600 STT ; 100850000 ; 20 ; 010 ; ... ; 12.35 CR
//! ^ ^^^^ ^^^ ^                                     ^^
//! | |    |   field separator                       frame terminator
//! | |    report tag
//! | family prefix
//! start character
//! ```
//!
//! Fixed-width fields are read as one block whose last byte must be the
//! expected delimiter. Variable-width fields are read byte by byte up to a
//! cap that includes the delimiter. The caps below are the ones observed in
//! vendor documentation and real device traffic.
//!
//! # Usage
//!
//! ```
//! use suntrace_core::constants::*;
//!
//! assert_eq!(SEPARATOR, b';');
//! assert_eq!(END_OF_FRAME, b'\r');
//! assert_eq!(HEADER_LEN, 8);
//! ```

use std::num::NonZeroUsize;

// ============================================================================
// Framing
// ============================================================================

/// Field separator inside an ASCII frame.
pub const SEPARATOR: u8 = b';';

/// Frame terminator (carriage return).
pub const END_OF_FRAME: u8 = b'\r';

/// First byte of every ASCII frame.
pub const ASCII_START: u8 = b'S';

/// Start marker of the binary ("ZIP") frame variant.
///
/// ZIP frames are detected and rejected, never decoded.
pub const STX: u8 = 0x02;

/// End marker of the binary ("ZIP") frame variant.
pub const ETX: u8 = 0x03;

/// Length of the header token following the start character.
///
/// Family prefix (4) + report tag (3) + separator (1), e.g. `T600STT;`.
pub const HEADER_LEN: usize = 8;

/// Literal sent in place of a device id by command responses (`ST300EVT;Res;...`).
pub const RESPONSE_LITERAL: &[u8] = b"Res";

// ============================================================================
// Fixed-width fields (length includes the delimiter)
// ============================================================================

/// Device id: 9 digits + delimiter.
pub const DEVICE_ID_LEN: usize = 10;

/// Model code: 2 digits + separator.
pub const MODEL_LEN: usize = 3;

/// Firmware version: 3 digits + separator.
pub const FIRMWARE_LEN: usize = 4;

/// Date (`YYYYMMDD`) + separator.
pub const DATE_LEN: usize = 9;

/// Time (`HH:MM:SS`) + separator.
pub const TIME_LEN: usize = 9;

/// Mode: 1 digit + separator.
pub const MODE_LEN: usize = 2;

/// Message number: 4 digits + separator.
pub const MESSAGE_NUMBER_LEN: usize = 5;

/// Single-digit flag (real-time, generic bits) + delimiter.
pub const FLAG_LEN: usize = 2;

/// Emergency and event ids: 1 digit + separator.
pub const SHORT_CODE_LEN: usize = 2;

/// Timestamp layout applied to the concatenated date and time literals.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d;%H:%M:%S;";

// ============================================================================
// Variable-width field caps (include the delimiter)
// ============================================================================

pub const MAX_CELL_2G_LEN: usize = 7;
pub const MAX_CELL_LEN: usize = 9;
pub const MAX_MCC_LEN: usize = 4;
pub const MAX_MNC_LEN: usize = 4;
pub const MAX_LAC_LEN: usize = 5;
pub const MAX_SIGNAL_LEVEL_LEN: usize = 4;
pub const MAX_LATITUDE_LEN: usize = 11;
pub const MAX_LONGITUDE_LEN: usize = 12;
pub const MAX_SPEED_LEN: usize = 8;
pub const MAX_COURSE_LEN: usize = 7;
pub const MAX_SATELLITES_LEN: usize = 3;
pub const MAX_FIX_LEN: usize = 3;
pub const MAX_DISTANCE_LEN: usize = 11;
pub const MAX_VOLTAGE_LEN: usize = 11;
pub const MAX_IO_LEN: usize = 10;
pub const MAX_HOUR_METER_LEN: usize = 8;
pub const MAX_ALERT_ID_LEN: usize = 3;
pub const MAX_ADC_LEN: usize = 6;
pub const MAX_PAYLOAD_LENGTH_LEN: usize = 6;
pub const MAX_CHECKSUM_LEN: usize = 6;

/// Token length (8 hex characters + separator) that marks a 3G cell id.
///
/// Anything shorter is an opaque 2G cell id.
pub const CELL_3G_TOKEN_LEN: usize = 9;

// ============================================================================
// Parser defaults
// ============================================================================

/// Default cap when consuming the remainder of an unrecognized frame.
pub const DEFAULT_MAX_UNKNOWN_FRAME_LEN: NonZeroUsize = non_zero(1024);

/// Default cap for the undocumented trailing fields of some ST300 models.
pub const DEFAULT_MAX_UNKNOWN_TAIL_LEN: NonZeroUsize = non_zero(64);

const fn non_zero(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("cap must be positive"),
    }
}
