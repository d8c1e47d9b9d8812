//! Field decoders.
//!
//! Each decoder reads its token(s) through a [`FrameReader`], so the bytes
//! are recorded in the raw frame before any validation happens. Validation
//! runs in a fixed order: character class of the literal, then the
//! delimiter, then the numeric range. The error names the field and the
//! first constraint that failed.
//!
//! Widths and caps come from [`suntrace_core::constants`] and include the
//! delimiter byte.

use crate::frame::FrameReader;
use crate::lexer::{Token, TokenKind};
use atoi::{FromRadix10Checked, FromRadix16Checked};
use bytes::Bytes;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::io::Read;
use suntrace_core::{
    AlertKind, DecodeError, DecodeResult, DeviceId, EmergencyKind, EventKind, Family, Field,
    Mode, Model, constants::*,
};

/// Byte expected after a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    Separator,
    EndOfFrame,
}

impl Terminator {
    #[must_use]
    pub fn byte(self) -> u8 {
        match self {
            Terminator::Separator => SEPARATOR,
            Terminator::EndOfFrame => END_OF_FRAME,
        }
    }

    fn missing(self, field: Field) -> DecodeError {
        match self {
            Terminator::Separator => DecodeError::ExpectedSeparator { field },
            Terminator::EndOfFrame => DecodeError::ExpectedEndOfFrame { field },
        }
    }
}

/// Who sent a frame whose first field may be a device id or `Res`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sender {
    Device(DeviceId),
    CommandResponse,
}

// ============================================================================
// Validation helpers
// ============================================================================

fn check_shape(valid: bool, field: Field) -> DecodeResult<()> {
    if valid {
        Ok(())
    } else {
        Err(DecodeError::Syntax { field })
    }
}

fn check_terminator(token: &Token, term: Terminator, field: Field) -> DecodeResult<()> {
    if token.ends_with(term.byte()) {
        Ok(())
    } else {
        Err(term.missing(field))
    }
}

fn out_of_range(token: &Token, field: Field) -> DecodeError {
    DecodeError::OutOfRange {
        field,
        literal: String::from_utf8_lossy(token.payload()).into_owned(),
    }
}

fn text(token: &Token, field: Field) -> DecodeResult<&str> {
    std::str::from_utf8(token.payload()).map_err(|_| DecodeError::Syntax { field })
}

fn decimal<I: FromRadix10Checked>(token: &Token, field: Field) -> DecodeResult<I> {
    let payload = token.payload();
    match I::from_radix_10_checked(payload) {
        (Some(n), used) if used == payload.len() && used > 0 => Ok(n),
        _ => Err(out_of_range(token, field)),
    }
}

fn float(token: &Token, field: Field) -> DecodeResult<f32> {
    text(token, field)?
        .parse::<f32>()
        .map_err(|_| out_of_range(token, field))
}

/// Delimited float-shaped field terminated by `;`.
fn separated_float<R: Read>(
    reader: &mut FrameReader<R>,
    max_len: usize,
    field: Field,
) -> DecodeResult<f32> {
    let token = reader.delimited(max_len, SEPARATOR, field)?;
    check_shape(token.is_float(), field)?;
    float(&token, field)
}

/// Delimited digit-only field terminated by `;`.
fn separated_decimal<R: Read, I: FromRadix10Checked>(
    reader: &mut FrameReader<R>,
    max_len: usize,
    field: Field,
) -> DecodeResult<I> {
    let token = reader.delimited(max_len, SEPARATOR, field)?;
    check_shape(token.is_digits(), field)?;
    decimal(&token, field)
}

/// Float with a mandatory leading sign (coordinates).
fn signed_float<R: Read>(
    reader: &mut FrameReader<R>,
    max_len: usize,
    field: Field,
) -> DecodeResult<f32> {
    let token = reader.delimited(max_len, SEPARATOR, field)?;
    let signed = matches!(token.payload().first(), Some(b'+' | b'-'));
    check_shape(token.is_float() && signed, field)?;
    float(&token, field)
}

/// Fixed-width single ASCII digit followed by `;`.
fn short_code<R: Read>(reader: &mut FrameReader<R>, field: Field) -> DecodeResult<(Token, u8)> {
    let token = reader.fixed(SHORT_CODE_LEN, field)?;
    check_shape(token.is_digits(), field)?;
    check_terminator(&token, Terminator::Separator, field)?;
    let digit = token.payload()[0];
    Ok((token, digit))
}

fn unknown_code(token: &Token, field: Field) -> DecodeError {
    DecodeError::UnknownCode {
        field,
        code: String::from_utf8_lossy(token.payload()).into_owned(),
    }
}

// ============================================================================
// Identity
// ============================================================================

/// Fixed 9-digit device id followed by `term`.
pub fn device_id<R: Read>(reader: &mut FrameReader<R>, term: Terminator) -> DecodeResult<DeviceId> {
    let token = reader.fixed(DEVICE_ID_LEN, Field::DeviceId)?;
    check_shape(token.is_digits(), Field::DeviceId)?;
    check_terminator(&token, term, Field::DeviceId)?;
    DeviceId::new(text(&token, Field::DeviceId)?)
}

/// Device id, or the `Res` literal of a command response.
pub fn sender<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<Sender> {
    let token = reader.delimited(DEVICE_ID_LEN, SEPARATOR, Field::DeviceId)?;
    if token.payload() == RESPONSE_LITERAL {
        return Ok(Sender::CommandResponse);
    }
    check_shape(
        token.is_digits() && token.payload().len() == DeviceId::DIGITS,
        Field::DeviceId,
    )?;
    DeviceId::new(text(&token, Field::DeviceId)?).map(Sender::Device)
}

/// Two-digit model code; rejected unless `family` documents it.
pub fn model<R: Read>(reader: &mut FrameReader<R>, family: Family) -> DecodeResult<Model> {
    let token = reader.fixed(MODEL_LEN, Field::Model)?;
    check_shape(token.is_digits(), Field::Model)?;
    check_terminator(&token, Terminator::Separator, Field::Model)?;
    let code: u8 = decimal(&token, Field::Model)?;

    let model = Model::from_code(code);
    if !family.accepts(model) {
        return Err(DecodeError::UnsupportedModel { family, code });
    }
    Ok(model)
}

pub fn firmware_version<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<u16> {
    let token = reader.fixed(FIRMWARE_LEN, Field::FirmwareVersion)?;
    check_shape(token.is_digits(), Field::FirmwareVersion)?;
    check_terminator(&token, Terminator::Separator, Field::FirmwareVersion)?;
    decimal(&token, Field::FirmwareVersion)
}

/// `YYYYMMDD;HH:MM:SS;` as a UTC instant.
pub fn timestamp<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<DateTime<Utc>> {
    let date = reader.fixed(DATE_LEN, Field::Date)?;
    check_shape(date.is_digits(), Field::Date)?;
    check_terminator(&date, Terminator::Separator, Field::Date)?;

    let time = reader.fixed(TIME_LEN, Field::Time)?;
    check_shape(time.kind() == TokenKind::Data, Field::Time)?;
    check_terminator(&time, Terminator::Separator, Field::Time)?;

    let mut literal = Vec::with_capacity(DATE_LEN + TIME_LEN);
    literal.extend_from_slice(date.literal());
    literal.extend_from_slice(time.literal());
    let literal = String::from_utf8_lossy(&literal).into_owned();

    NaiveDateTime::parse_from_str(&literal, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| DecodeError::OutOfRange {
            field: Field::Timestamp,
            literal,
        })
}

// ============================================================================
// Position and telemetry
// ============================================================================

pub fn latitude<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<f32> {
    signed_float(reader, MAX_LATITUDE_LEN, Field::Latitude)
}

pub fn longitude<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<f32> {
    signed_float(reader, MAX_LONGITUDE_LEN, Field::Longitude)
}

/// Speed in km/h.
pub fn speed<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<f32> {
    separated_float(reader, MAX_SPEED_LEN, Field::Speed)
}

/// Course over ground in degrees.
pub fn course<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<f32> {
    separated_float(reader, MAX_COURSE_LEN, Field::Course)
}

pub fn satellites<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<u8> {
    separated_decimal(reader, MAX_SATELLITES_LEN, Field::Satellites)
}

/// Single binary digit: `1` when the GPS position is fixed.
pub fn gps_fix<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<bool> {
    let token = reader.delimited(MAX_FIX_LEN, SEPARATOR, Field::GpsFix)?;
    check_shape(
        token.kind() == TokenKind::Bits && token.payload().len() == 1,
        Field::GpsFix,
    )?;
    Ok(token.payload()[0] == b'1')
}

/// Travelled distance in meters.
pub fn distance<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<u32> {
    separated_decimal(reader, MAX_DISTANCE_LEN, Field::Distance)
}

pub fn power_volt<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<f32> {
    separated_float(reader, MAX_VOLTAGE_LEN, Field::PowerVolt)
}

/// Digital IO line states, kept as the literal bit string.
pub fn io<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<String> {
    let token = reader.delimited(MAX_IO_LEN, SEPARATOR, Field::Io)?;
    check_shape(token.kind() == TokenKind::Bits, Field::Io)?;
    Ok(text(&token, Field::Io)?.to_string())
}

// ============================================================================
// Report-specific fields
// ============================================================================

pub fn mode<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<Mode> {
    let token = reader.fixed(MODE_LEN, Field::Mode)?;
    check_shape(token.is_digits(), Field::Mode)?;
    check_terminator(&token, Terminator::Separator, Field::Mode)?;
    Mode::from_digit(token.payload()[0]).ok_or_else(|| unknown_code(&token, Field::Mode))
}

/// Four hex-typed characters read as a decimal number.
///
/// Devices declare the field as hexadecimal but count in decimal; a literal
/// containing hex letters is out of range.
pub fn message_number<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<u16> {
    let token = reader.fixed(MESSAGE_NUMBER_LEN, Field::MessageNumber)?;
    check_shape(token.is_hex(), Field::MessageNumber)?;
    check_terminator(&token, Terminator::Separator, Field::MessageNumber)?;
    decimal(&token, Field::MessageNumber)
}

/// Accumulated driving time in minutes.
pub fn hour_meter<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<u32> {
    separated_decimal(reader, MAX_HOUR_METER_LEN, Field::DrivingHourMeter)
}

pub fn backup_volt<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<f32> {
    separated_float(reader, MAX_VOLTAGE_LEN, Field::BackupVolt)
}

/// Fixed-width single binary digit followed by `term`.
pub fn flag<R: Read>(
    reader: &mut FrameReader<R>,
    term: Terminator,
    field: Field,
) -> DecodeResult<bool> {
    let token = reader.fixed(FLAG_LEN, field)?;
    check_shape(token.kind() == TokenKind::Bits, field)?;
    check_terminator(&token, term, field)?;
    Ok(token.payload()[0] == b'1')
}

/// `1` when the report is live, `0` when it was buffered.
pub fn real_time<R: Read>(reader: &mut FrameReader<R>, term: Terminator) -> DecodeResult<bool> {
    flag(reader, term, Field::RealTime)
}

/// Analog input voltage, read up to `term`.
pub fn adc<R: Read>(reader: &mut FrameReader<R>, term: Terminator) -> DecodeResult<f32> {
    let token = reader.delimited(MAX_ADC_LEN, term.byte(), Field::Adc)?;
    check_shape(token.is_float(), Field::Adc)?;
    float(&token, Field::Adc)
}

pub fn emergency_id<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<EmergencyKind> {
    let (token, digit) = short_code(reader, Field::EmergencyId)?;
    EmergencyKind::from_digit(digit).ok_or_else(|| unknown_code(&token, Field::EmergencyId))
}

pub fn event_id<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<EventKind> {
    let (token, digit) = short_code(reader, Field::EventId)?;
    EventKind::from_digit(digit).ok_or_else(|| unknown_code(&token, Field::EventId))
}

/// Alert code; undocumented codes are rejected with the raw digits.
pub fn alert_id<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<AlertKind> {
    let token = reader.delimited(MAX_ALERT_ID_LEN, SEPARATOR, Field::AlertId)?;
    check_shape(token.is_digits(), Field::AlertId)?;
    let code: u8 = decimal(&token, Field::AlertId)?;
    AlertKind::from_code(code).ok_or_else(|| unknown_code(&token, Field::AlertId))
}

// ============================================================================
// Extended data
// ============================================================================

/// Declared size of the embedded payload.
pub fn payload_length<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<u16> {
    separated_decimal(reader, MAX_PAYLOAD_LENGTH_LEN, Field::PayloadLength)
}

/// `len` opaque bytes followed by `;`.
pub fn payload<R: Read>(reader: &mut FrameReader<R>, len: u16) -> DecodeResult<Bytes> {
    let token = reader.fixed(usize::from(len) + 1, Field::Payload)?;
    check_terminator(&token, Terminator::Separator, Field::Payload)?;
    Ok(Bytes::copy_from_slice(token.payload()))
}

/// Hex checksum; only the low 8 bits are significant.
pub fn checksum<R: Read>(reader: &mut FrameReader<R>) -> DecodeResult<u8> {
    let token = reader.delimited(MAX_CHECKSUM_LEN, SEPARATOR, Field::Checksum)?;
    check_shape(token.is_hex(), Field::Checksum)?;
    let payload = token.payload();
    match u32::from_radix_16_checked(payload) {
        (Some(sum), used) if used == payload.len() => Ok(sum as u8),
        _ => Err(out_of_range(&token, Field::Checksum)),
    }
}

/// Consume undocumented trailing fields up to the end of the frame.
pub fn unknown_tail<R: Read>(reader: &mut FrameReader<R>, max_len: usize) -> DecodeResult<()> {
    reader.delimited(max_len, END_OF_FRAME, Field::UnknownTail)?;
    Ok(())
}
