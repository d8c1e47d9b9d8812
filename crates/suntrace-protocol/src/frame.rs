use crate::lexer::{LexError, LexErrorKind, Lexer, Token};
use bytes::{BufMut, Bytes, BytesMut};
use std::io::{self, Read};
use suntrace_core::{DecodeError, DecodeResult, Field};

/// Initial capacity of the raw frame buffer; fits any status report.
const INITIAL_FRAME_CAPACITY: usize = 256;

/// Lexer wrapper that records every consumed byte of the current frame.
///
/// Each token read through a `FrameReader` is appended to the frame buffer
/// before the caller sees it, whether the read succeeded or not. The raw
/// frame handed out by [`FrameReader::take_frame`] is therefore exactly the
/// byte sequence consumed since the previous call.
///
/// Lexer failures are translated into [`DecodeError`]s tagged with the
/// field being read. A transport failure is also kept aside so the parser
/// can surface the original [`io::Error`] as its fatal error.
///
/// # Example
///
/// ```
/// use suntrace_core::Field;
/// use suntrace_protocol::frame::FrameReader;
///
/// let mut reader = FrameReader::new(&b"20;0"[..]);
/// let model = reader.fixed(3, Field::Model).unwrap();
/// assert_eq!(model.payload(), b"20");
///
/// assert!(reader.fixed(4, Field::FirmwareVersion).is_err());
/// assert_eq!(reader.take_frame().as_ref(), b"20;0");
/// ```
#[derive(Debug)]
pub struct FrameReader<R> {
    lexer: Lexer<R>,
    frame: BytesMut,
    io_error: Option<io::Error>,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        FrameReader {
            lexer: Lexer::new(reader),
            frame: BytesMut::with_capacity(INITIAL_FRAME_CAPACITY),
            io_error: None,
        }
    }

    /// Read one byte without recording it.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        self.lexer.read_byte()
    }

    /// Record a byte consumed outside the lexer (the start character).
    pub fn push_byte(&mut self, byte: u8) {
        self.frame.put_u8(byte);
    }

    /// Read a fixed-width token for `field`.
    pub fn fixed(&mut self, len: usize, field: Field) -> DecodeResult<Token> {
        let result = self.lexer.read_fixed(len);
        self.record(result, field)
    }

    /// Read a delimited token for `field`.
    pub fn delimited(&mut self, max_len: usize, delim: u8, field: Field) -> DecodeResult<Token> {
        let result = self.lexer.read_delimited(max_len, delim);
        self.record(result, field)
    }

    fn record(&mut self, result: Result<Token, LexError>, field: Field) -> DecodeResult<Token> {
        match result {
            Ok(token) => {
                self.frame.extend_from_slice(token.literal());
                Ok(token)
            }
            Err(LexError { kind, token }) => {
                self.frame.extend_from_slice(token.literal());
                Err(match kind {
                    LexErrorKind::TooLong(max) => DecodeError::TooLong { field, max },
                    LexErrorKind::Eof => DecodeError::Truncated { field },
                    LexErrorKind::Io(e) => {
                        let kind = e.kind();
                        self.io_error = Some(e);
                        DecodeError::Io { field, kind }
                    }
                })
            }
        }
    }

    /// Bytes recorded for the frame in progress.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Hand out the recorded frame and start a new one.
    pub fn take_frame(&mut self) -> Bytes {
        self.frame.split().freeze()
    }

    /// The transport error behind the last `DecodeError::Io`, if not taken yet.
    pub fn take_io_error(&mut self) -> Option<io::Error> {
        self.io_error.take()
    }

    pub fn get_ref(&self) -> &R {
        self.lexer.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.lexer.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
        }
    }

    #[test]
    fn test_records_successful_tokens() {
        let mut reader = FrameReader::new(&b"100850000;20;"[..]);
        reader.push_byte(b'S');
        reader.fixed(10, Field::DeviceId).unwrap();
        reader.delimited(3, b';', Field::Model).unwrap();
        assert_eq!(reader.frame(), b"S100850000;20;");
    }

    #[test]
    fn test_too_long_records_consumed_bytes() {
        let mut reader = FrameReader::new(&b"123456789"[..]);
        let err = reader.delimited(3, b';', Field::Satellites).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TooLong {
                field: Field::Satellites,
                max: 3
            }
        );
        assert_eq!(reader.frame(), b"123");
    }

    #[test]
    fn test_truncation_maps_to_field() {
        let mut reader = FrameReader::new(&b"2008"[..]);
        let err = reader.fixed(9, Field::Date).unwrap_err();
        assert_eq!(err, DecodeError::Truncated { field: Field::Date });
        assert_eq!(reader.frame(), b"2008");
    }

    #[test]
    fn test_io_error_is_kept_for_the_parser() {
        let mut reader = FrameReader::new(FailingReader);
        let err = reader.fixed(3, Field::Model).unwrap_err();
        assert_eq!(
            err,
            DecodeError::Io {
                field: Field::Model,
                kind: io::ErrorKind::ConnectionReset
            }
        );
        let io = reader.take_io_error().unwrap();
        assert_eq!(io.kind(), io::ErrorKind::ConnectionReset);
        assert!(reader.take_io_error().is_none());
    }

    #[test]
    fn test_take_frame_starts_fresh() {
        let mut reader = FrameReader::new(&b"1;2;"[..]);
        reader.delimited(2, b';', Field::Mode).unwrap();
        assert_eq!(reader.take_frame().as_ref(), b"1;");
        reader.delimited(2, b';', Field::Mode).unwrap();
        assert_eq!(reader.take_frame().as_ref(), b"2;");
        assert!(reader.frame().is_empty());
    }
}
