//! Stream parser for Suntech ASCII frames.
//!
//! [`Parser`] pulls frames from any [`std::io::Read`] source and yields one
//! [`Message`] per frame. Frames start with `S`, followed by an 8-byte
//! header selecting the family and report kind:
//!
//! ```text
//! S T600STT; 100850000;20;010;...;12.35 CR
//! ^ ^^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//! | header   report body (decoded by the report's field pipeline)
//! start character
//! ```
//!
//! # Error handling
//!
//! Errors come in two levels:
//!
//! - A field that fails validation is recorded on its message
//!   ([`Message::error`]) and iteration continues with the next frame.
//! - A condition that leaves the stream unusable ends iteration and is
//!   available from [`Parser::error`]: a binary (ZIP) frame, a byte that
//!   cannot start a frame, an unrecognized frame when skipping is disabled,
//!   or an I/O failure.
//!
//! A stream ending in the middle of a frame yields that frame with a
//! truncation error, then ends without a fatal error.
//!
//! # Usage
//!
//! ```
//! use suntrace_protocol::{Parser, ParserOptions, Report, ReportKind};
//!
//! let input = b"ST600ALV;600850777\r";
//! let mut parser = Parser::new(&input[..], ParserOptions::default());
//!
//! let msg = parser.next().unwrap();
//! assert_eq!(msg.kind(), ReportKind::Alive);
//! assert_eq!(msg.frame(), &input[..]);
//! if let Report::Alive(alive) = msg.report() {
//!     assert_eq!(alive.device_id.as_str(), "600850777");
//! }
//!
//! assert!(parser.next().is_none());
//! assert!(parser.error().is_none());
//! ```

use crate::frame::FrameReader;
use crate::message::{Message, Report, ReportKind};
use crate::options::ParserOptions;
use crate::reports::{
    AlertReport, AliveReport, DecodeContext, EmergencyReport, EventReport, ExtendedDataReport,
    ReportDecoder, StatusReport,
};
use std::io::{self, Read};
use std::iter::FusedIterator;
use suntrace_core::{
    DecodeError, DecodeResult, Error, Family, Field, Model, Result,
    constants::{ASCII_START, END_OF_FRAME, ETX, HEADER_LEN, STX},
};
use tracing::{debug, error, warn};

/// Header literal (without the start character) to family and report kind.
const HEADERS: &[(&str, Family, ReportKind)] = &[
    ("T300STT;", Family::St300, ReportKind::Status),
    ("T300EMG;", Family::St300, ReportKind::Emergency),
    ("T300EVT;", Family::St300, ReportKind::Event),
    ("T300ALT;", Family::St300, ReportKind::Alert),
    ("T300ALV;", Family::St300, ReportKind::Alive),
    ("T600STT;", Family::St600, ReportKind::Status),
    ("T600EMG;", Family::St600, ReportKind::Emergency),
    ("T600EVT;", Family::St600, ReportKind::Event),
    ("T600ALT;", Family::St600, ReportKind::Alert),
    ("T600ALV;", Family::St600, ReportKind::Alive),
    ("T600UEX;", Family::St600, ReportKind::ExtendedData),
];

fn lookup_header(literal: &[u8]) -> Option<(&'static str, Family, ReportKind)> {
    HEADERS
        .iter()
        .find(|(header, _, _)| header.as_bytes() == literal)
        .copied()
}

/// Decode one report of type `D` into a fresh record.
fn decode_report<D: ReportDecoder, R: Read>(
    reader: &mut FrameReader<R>,
    ctx: &DecodeContext,
) -> (Model, Report, DecodeResult<()>) {
    let mut report = D::default();
    let outcome = report.decode(reader, ctx);
    (report.model(), report.into(), outcome)
}

/// Pull parser over a byte stream.
///
/// Implements [`Iterator`]; once `next` returns `None` it keeps returning
/// `None`. Check [`Parser::error`] to tell a clean end of stream from a
/// fatal condition.
#[derive(Debug)]
pub struct Parser<R> {
    reader: FrameReader<R>,
    options: ParserOptions,
    error: Option<Error>,
    done: bool,
}

impl<R: Read> Parser<R> {
    pub fn new(reader: R, options: ParserOptions) -> Self {
        Parser {
            reader: FrameReader::new(reader),
            options,
            error: None,
            done: false,
        }
    }

    /// The fatal error that ended iteration, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Recover the byte source; the cursor is wherever parsing stopped.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    fn fail(&mut self, err: Error) {
        error!("Stream parsing stopped: {}", err);
        self.error = Some(err);
        self.done = true;
    }

    fn read_frame(&mut self) -> Message {
        self.reader.push_byte(ASCII_START);

        let (family, model, report, outcome) = match self.reader.fixed(HEADER_LEN, Field::Header) {
            Err(e) => (None, Model::Unknown, Report::Unknown, Err(e)),
            Ok(token) => match lookup_header(token.literal()) {
                None => {
                    let header = String::from_utf8_lossy(token.literal()).into_owned();
                    (
                        None,
                        Model::Unknown,
                        Report::Unknown,
                        Err(DecodeError::UnknownHeader { header }),
                    )
                }
                Some((header, family, kind)) => {
                    let ctx = DecodeContext {
                        family,
                        header,
                        max_unknown_tail_len: self.options.max_unknown_tail_len.get(),
                    };
                    let (model, report, outcome) = self.decode_body(kind, &ctx);
                    (Some(family), model, report, outcome)
                }
            },
        };

        let (model, report) = match &outcome {
            Err(e) if e.is_unrecognized_frame() => (Model::Unknown, Report::Unknown),
            _ => (model, report),
        };
        let outcome = self.settle(outcome);

        let message = Message {
            family,
            model,
            report,
            frame: self.reader.take_frame(),
            outcome,
        };
        match &message.outcome {
            Ok(()) => debug!(
                "Decoded {:?} report from {} ({} bytes)",
                message.kind(),
                model,
                message.frame.len()
            ),
            Err(e) => warn!(
                "Failed to decode frame ({} bytes): {}",
                message.frame.len(),
                e
            ),
        }
        message
    }

    fn decode_body(
        &mut self,
        kind: ReportKind,
        ctx: &DecodeContext,
    ) -> (Model, Report, DecodeResult<()>) {
        let reader = &mut self.reader;
        match kind {
            ReportKind::Status => decode_report::<StatusReport, _>(reader, ctx),
            ReportKind::Emergency => decode_report::<EmergencyReport, _>(reader, ctx),
            ReportKind::Event => decode_report::<EventReport, _>(reader, ctx),
            ReportKind::Alert => decode_report::<AlertReport, _>(reader, ctx),
            ReportKind::Alive => decode_report::<AliveReport, _>(reader, ctx),
            ReportKind::ExtendedData => decode_report::<ExtendedDataReport, _>(reader, ctx),
            ReportKind::Unknown => (Model::Unknown, Report::Unknown, Ok(())),
        }
    }

    /// Apply the stream-level consequences of a frame's outcome.
    fn settle(&mut self, outcome: DecodeResult<()>) -> DecodeResult<()> {
        let outcome = match outcome {
            Err(e) if e.is_unrecognized_frame() => self.handle_unrecognized(e),
            other => other,
        };

        match &outcome {
            Err(DecodeError::Truncated { field }) => {
                debug!("Stream ended inside {}", field);
                self.done = true;
            }
            Err(DecodeError::Io { kind, .. }) => {
                let err = self
                    .reader
                    .take_io_error()
                    .unwrap_or_else(|| io::Error::from(*kind));
                self.fail(Error::Io(err));
            }
            _ => {}
        }
        outcome
    }

    fn handle_unrecognized(&mut self, err: DecodeError) -> DecodeResult<()> {
        if !self.options.skip_unknown_frames {
            let header = match &err {
                DecodeError::UnknownHeader { header } | DecodeError::CommandResponse { header } => {
                    header.clone()
                }
                _ => String::new(),
            };
            self.fail(Error::UnknownFrame { header });
            return Err(err);
        }

        warn!("Skipping unrecognized frame: {}", err);
        self.reader.delimited(
            self.options.max_unknown_frame_len.get(),
            END_OF_FRAME,
            Field::UnknownFrame,
        )?;
        Err(err)
    }
}

impl<R: Read> Iterator for Parser<R> {
    type Item = Message;

    fn next(&mut self) -> Option<Message> {
        if self.done {
            return None;
        }

        match self.reader.read_byte() {
            Ok(None) => {
                self.done = true;
                None
            }
            Ok(Some(ASCII_START)) => Some(self.read_frame()),
            Ok(Some(STX)) => {
                self.fail(Error::ZipUnsupported);
                None
            }
            Ok(Some(ETX)) => {
                debug!("ZIP end marker without a start marker");
                self.fail(Error::UnexpectedByte(ETX));
                None
            }
            Ok(Some(byte)) => {
                self.fail(Error::UnexpectedByte(byte));
                None
            }
            Err(e) => {
                self.fail(Error::Io(e));
                None
            }
        }
    }
}

impl<R: Read> FusedIterator for Parser<R> {}

/// Parse a complete buffer.
///
/// # Errors
/// Returns the fatal error if the stream could not be parsed to its end.
/// Messages decoded before it are dropped; use [`Parser`] directly to keep
/// them.
pub fn parse_bytes(input: &[u8], options: ParserOptions) -> Result<Vec<Message>> {
    let mut parser = Parser::new(input, options);
    let messages: Vec<Message> = parser.by_ref().collect();
    match parser.error.take() {
        Some(err) => Err(err),
        None => Ok(messages),
    }
}
