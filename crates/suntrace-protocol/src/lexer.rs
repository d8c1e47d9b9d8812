//! Byte-level tokenizer for Suntech ASCII frames.
//!
//! The lexer pulls bytes from any [`std::io::Read`] source and classifies
//! each consumed run with a small deterministic finite automaton. Field
//! decoders look at the resulting shape ([`TokenKind`]) before converting
//! the literal, so a malformed value is rejected by character class
//! instead of by a failed numeric conversion.
//!
//! # Automaton
//!
//! ```text
//!            0/1      2-9      a-f/A-F   +/-      .        other
//! Empty   -> Bits     Digits   Hex       Sign     Data     Data
//! Bits    -> Bits     Digits   Hex       Data     Dot      Data
//! Digits  -> Digits   Digits   Hex       Data     Dot      Data
//! Hex     -> Hex      Hex      Hex       Data     Data     Data
//! Sign    -> Int      Int      Data      Data     Data     Data
//! Int     -> Int      Int      Data      Data     Dot      Data
//! Dot     -> Float    Float    Data      Data     Data     Data
//! Float   -> Float    Float    Data      Data     Data     Data
//! Data    -> Data     Data     Data      Data     Data     Data
//! ```
//!
//! `Data` is absorbing. The delimiter byte of a token is never fed to the
//! automaton but is kept at the end of the literal.
//!
//! # Read modes
//!
//! - [`Lexer::read_delimited`] reads one byte at a time until the delimiter,
//!   giving up after `max_len` bytes.
//! - [`Lexer::read_fixed`] reads exactly `len` bytes; the last one is the
//!   delimiter position.
//!
//! Both return the partial token inside [`LexError`] on failure, so the
//! caller can account for every consumed byte.
//!
//! # Usage
//!
//! ```
//! use suntrace_protocol::lexer::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new(&b"+37.478519;0072;"[..]);
//!
//! let lat = lexer.read_delimited(11, b';').unwrap();
//! assert_eq!(lat.kind(), TokenKind::Float);
//! assert_eq!(lat.literal(), b"+37.478519;");
//!
//! let num = lexer.read_fixed(5).unwrap();
//! assert_eq!(num.kind(), TokenKind::Digits);
//! assert_eq!(num.payload(), b"0072");
//! ```

use std::io::{self, Read};
use thiserror::Error;
use tracing::trace;

/// Automaton state after feeding a token's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    Empty,
    Bits,
    Digits,
    Hex,
    Sign,
    Int,
    Dot,
    Float,
    Data,
}

/// Input classes driving the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteClass {
    Bit,
    Digit,
    HexLetter,
    Sign,
    Dot,
    Other,
}

impl ByteClass {
    fn of(byte: u8) -> ByteClass {
        match byte {
            b'0' | b'1' => ByteClass::Bit,
            b'2'..=b'9' => ByteClass::Digit,
            b'a'..=b'f' | b'A'..=b'F' => ByteClass::HexLetter,
            b'+' | b'-' => ByteClass::Sign,
            b'.' => ByteClass::Dot,
            _ => ByteClass::Other,
        }
    }
}

impl State {
    /// Every state, in declaration order.
    pub const ALL: [State; 9] = [
        State::Empty,
        State::Bits,
        State::Digits,
        State::Hex,
        State::Sign,
        State::Int,
        State::Dot,
        State::Float,
        State::Data,
    ];

    /// Successor state for one input byte.
    #[must_use]
    pub fn next(self, byte: u8) -> State {
        use ByteClass as C;

        match (self, ByteClass::of(byte)) {
            (State::Empty, C::Bit) => State::Bits,
            (State::Empty, C::Digit) => State::Digits,
            (State::Empty, C::HexLetter) => State::Hex,
            (State::Empty, C::Sign) => State::Sign,

            (State::Bits, C::Bit) => State::Bits,
            (State::Bits | State::Digits, C::Bit | C::Digit) => State::Digits,
            (State::Bits | State::Digits, C::HexLetter) => State::Hex,
            (State::Bits | State::Digits | State::Int, C::Dot) => State::Dot,

            (State::Hex, C::Bit | C::Digit | C::HexLetter) => State::Hex,

            (State::Sign | State::Int, C::Bit | C::Digit) => State::Int,
            (State::Dot | State::Float, C::Bit | C::Digit) => State::Float,

            _ => State::Data,
        }
    }

    /// Run the automaton over `bytes` starting from `Empty`.
    #[must_use]
    pub fn scan(bytes: &[u8]) -> State {
        bytes.iter().fold(State::Empty, |state, &b| state.next(b))
    }

    #[must_use]
    pub fn kind(self) -> TokenKind {
        match self {
            State::Empty => TokenKind::Empty,
            State::Bits => TokenKind::Bits,
            State::Digits => TokenKind::Digits,
            State::Hex => TokenKind::Hex,
            State::Float => TokenKind::Float,
            State::Sign | State::Int | State::Dot | State::Data => TokenKind::Data,
        }
    }
}

/// Shape category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// No byte was fed (the literal is at most the delimiter).
    Empty,
    /// Only `0` and `1`.
    Bits,
    /// Decimal digits.
    Digits,
    /// Hex digits with at least one letter.
    Hex,
    /// Digits, a dot and a fractional part, optionally signed.
    Float,
    /// Anything else.
    Data,
}

/// A consumed byte run with its automaton state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    state: State,
    literal: Vec<u8>,
}

impl Token {
    /// Build a token from a complete literal whose last byte is the delimiter.
    #[must_use]
    pub fn with_delimiter(literal: &[u8]) -> Token {
        let fed = literal.split_last().map_or(&[][..], |(_, rest)| rest);
        Token {
            state: State::scan(fed),
            literal: literal.to_vec(),
        }
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.state
    }

    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.state.kind()
    }

    /// All consumed bytes, delimiter included when it was read.
    #[must_use]
    pub fn literal(&self) -> &[u8] {
        &self.literal
    }

    /// The literal without its trailing delimiter byte.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        self.literal
            .split_last()
            .map_or(&[][..], |(_, rest)| rest)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literal.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literal.is_empty()
    }

    #[must_use]
    pub fn ends_with(&self, delim: u8) -> bool {
        self.literal.last() == Some(&delim)
    }

    /// Decimal digits only (a run of bits counts).
    #[must_use]
    pub fn is_digits(&self) -> bool {
        matches!(self.state, State::Bits | State::Digits)
    }

    /// Parses as hexadecimal.
    #[must_use]
    pub fn is_hex(&self) -> bool {
        matches!(self.state, State::Bits | State::Digits | State::Hex)
    }

    #[must_use]
    pub fn is_float(&self) -> bool {
        self.state == State::Float
    }

    /// Float-shaped or an optionally signed integer.
    #[must_use]
    pub fn is_decimal(&self) -> bool {
        matches!(
            self.state,
            State::Float | State::Bits | State::Digits | State::Int
        )
    }
}

/// Why a read stopped before producing a complete token.
#[derive(Error, Debug)]
pub enum LexErrorKind {
    #[error("delimiter not found within {0} bytes")]
    TooLong(usize),

    #[error("end of stream")]
    Eof,

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A failed read together with every byte it consumed.
#[derive(Error, Debug)]
#[error("{kind} ({} bytes consumed)", .token.len())]
pub struct LexError {
    pub kind: LexErrorKind,
    pub token: Token,
}

impl LexError {
    fn new(kind: LexErrorKind, state: State, literal: Vec<u8>) -> Self {
        LexError {
            kind,
            token: Token { state, literal },
        }
    }
}

/// Tokenizer over a sequential byte source.
#[derive(Debug)]
pub struct Lexer<R> {
    reader: R,
}

impl<R: Read> Lexer<R> {
    pub fn new(reader: R) -> Self {
        Lexer { reader }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read a single byte; `Ok(None)` at end of stream.
    pub fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.reader.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    /// Read byte by byte until `delim`, consuming at most `max_len` bytes.
    ///
    /// # Errors
    /// - `TooLong` if `max_len` bytes were read without seeing `delim`
    /// - `Eof` if the stream ended first
    /// - `Io` on a read failure, or if `max_len` is zero
    pub fn read_delimited(&mut self, max_len: usize, delim: u8) -> Result<Token, LexError> {
        if max_len == 0 {
            return Err(LexError::new(
                invalid_length(),
                State::Empty,
                Vec::new(),
            ));
        }

        let mut state = State::Empty;
        let mut literal = Vec::with_capacity(max_len);

        while literal.len() < max_len {
            let byte = match self.read_byte() {
                Ok(Some(b)) => b,
                Ok(None) => return Err(LexError::new(LexErrorKind::Eof, state, literal)),
                Err(e) => return Err(LexError::new(LexErrorKind::Io(e), state, literal)),
            };
            literal.push(byte);

            if byte == delim {
                trace!("Read {:?} token of {} bytes", state.kind(), literal.len());
                return Ok(Token { state, literal });
            }
            state = state.next(byte);
        }

        Err(LexError::new(LexErrorKind::TooLong(max_len), state, literal))
    }

    /// Read exactly `len` bytes; the last one is not fed to the automaton.
    ///
    /// The delimiter value is not checked here. On end of stream the error
    /// token holds exactly the bytes that were read, all of them fed.
    ///
    /// # Errors
    /// - `Eof` if the stream ended before `len` bytes
    /// - `Io` on a read failure, or if `len` is zero
    pub fn read_fixed(&mut self, len: usize) -> Result<Token, LexError> {
        if len == 0 {
            return Err(LexError::new(
                invalid_length(),
                State::Empty,
                Vec::new(),
            ));
        }

        let mut literal = vec![0u8; len];
        let mut filled = 0;

        while filled < len {
            match self.reader.read(&mut literal[filled..]) {
                Ok(0) => {
                    literal.truncate(filled);
                    let state = State::scan(&literal);
                    return Err(LexError::new(LexErrorKind::Eof, state, literal));
                }
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    literal.truncate(filled);
                    let state = State::scan(&literal);
                    return Err(LexError::new(LexErrorKind::Io(e), state, literal));
                }
            }
        }

        let token = Token::with_delimiter(&literal);
        trace!("Read {:?} token of {} bytes", token.kind(), len);
        Ok(token)
    }
}

fn invalid_length() -> LexErrorKind {
    LexErrorKind::Io(io::Error::new(
        io::ErrorKind::InvalidInput,
        "token length must be positive",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Reader that yields one byte per call and injects `Interrupted` between them.
    struct Stuttering<'a> {
        data: &'a [u8],
        interrupt: bool,
    }

    impl Read for Stuttering<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            match self.data.split_first() {
                Some((&b, rest)) if !buf.is_empty() => {
                    buf[0] = b;
                    self.data = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    #[rstest]
    #[case(b"", State::Empty)]
    #[case(b"0110", State::Bits)]
    #[case(b"0072", State::Digits)]
    #[case(b"001cbf72", State::Hex)]
    #[case(b"4e39", State::Hex)]
    #[case(b"-", State::Sign)]
    #[case(b"+37", State::Int)]
    #[case(b"12.", State::Dot)]
    #[case(b"+37.478519", State::Float)]
    #[case(b"000.012", State::Float)]
    #[case(b"07:41:56", State::Data)]
    #[case(b"Res", State::Data)]
    #[case(b"1.2.3", State::Data)]
    #[case(b".5", State::Data)]
    #[case(b"ab.1", State::Data)]
    fn test_scan(#[case] input: &[u8], #[case] expected: State) {
        assert_eq!(State::scan(input), expected);
    }

    #[test]
    fn test_every_state_has_a_successor_for_every_byte() {
        for state in State::ALL {
            for byte in 0..=u8::MAX {
                let next = state.next(byte);
                assert!(State::ALL.contains(&next));
            }
        }
    }

    #[test]
    fn test_data_is_absorbing() {
        for byte in 0..=u8::MAX {
            assert_eq!(State::Data.next(byte), State::Data);
        }
    }

    #[test]
    fn test_read_delimited_stops_at_delimiter() {
        let mut lexer = Lexer::new(&b"0072;rest"[..]);
        let token = lexer.read_delimited(8, b';').unwrap();
        assert_eq!(token.literal(), b"0072;");
        assert_eq!(token.payload(), b"0072");
        assert_eq!(token.kind(), TokenKind::Digits);
        assert!(token.ends_with(b';'));
    }

    #[test]
    fn test_read_delimited_empty_field() {
        let mut lexer = Lexer::new(&b";"[..]);
        let token = lexer.read_delimited(3, b';').unwrap();
        assert_eq!(token.kind(), TokenKind::Empty);
        assert_eq!(token.literal(), b";");
    }

    #[test]
    fn test_read_delimited_too_long_keeps_bytes() {
        let mut lexer = Lexer::new(&b"123456;"[..]);
        let err = lexer.read_delimited(3, b';').unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::TooLong(3)));
        assert_eq!(err.token.literal(), b"123");
    }

    #[test]
    fn test_read_delimited_delimiter_at_cap() {
        let mut lexer = Lexer::new(&b"12;"[..]);
        let token = lexer.read_delimited(3, b';').unwrap();
        assert_eq!(token.literal(), b"12;");
    }

    #[test]
    fn test_read_delimited_eof_keeps_bytes() {
        let mut lexer = Lexer::new(&b"12"[..]);
        let err = lexer.read_delimited(5, b';').unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::Eof));
        assert_eq!(err.token.literal(), b"12");
    }

    #[test]
    fn test_read_fixed_excludes_last_byte_from_shape() {
        let mut lexer = Lexer::new(&b"20;010;"[..]);
        let token = lexer.read_fixed(3).unwrap();
        assert_eq!(token.literal(), b"20;");
        assert_eq!(token.kind(), TokenKind::Digits);

        // A wrong delimiter is returned as read, not judged here
        let mut lexer = Lexer::new(&b"20x"[..]);
        let token = lexer.read_fixed(3).unwrap();
        assert_eq!(token.kind(), TokenKind::Digits);
        assert!(!token.ends_with(b';'));
    }

    #[test]
    fn test_read_fixed_truncated_returns_partial() {
        let mut lexer = Lexer::new(&b"1008"[..]);
        let err = lexer.read_fixed(10).unwrap_err();
        assert!(matches!(err.kind, LexErrorKind::Eof));
        assert_eq!(err.token.literal(), b"1008");
    }

    #[test]
    fn test_zero_length_is_invalid_input() {
        let mut lexer = Lexer::new(&b"abc"[..]);
        let err = lexer.read_fixed(0).unwrap_err();
        assert!(
            matches!(&err.kind, LexErrorKind::Io(e) if e.kind() == io::ErrorKind::InvalidInput)
        );
        let err = lexer.read_delimited(0, b';').unwrap_err();
        assert!(err.token.is_empty());
    }

    #[test]
    fn test_interrupted_reads_are_retried() {
        let mut lexer = Lexer::new(Stuttering {
            data: b"4e39;47;",
            interrupt: false,
        });
        assert_eq!(lexer.read_fixed(5).unwrap().literal(), b"4e39;");
        assert_eq!(lexer.read_delimited(4, b';').unwrap().payload(), b"47");
        assert_eq!(lexer.read_byte().unwrap(), None);
    }

    #[test]
    fn test_shape_helpers() {
        let hex = Token::with_delimiter(b"001cbf72;");
        assert!(hex.is_hex());
        assert!(!hex.is_digits());

        let signal = Token::with_delimiter(b"47;");
        assert!(signal.is_decimal());
        assert!(!signal.is_float());

        let signed = Token::with_delimiter(b"-12;");
        assert!(signed.is_decimal());

        let sign_only = Token::with_delimiter(b"-;");
        assert!(!sign_only.is_decimal());
    }
}
