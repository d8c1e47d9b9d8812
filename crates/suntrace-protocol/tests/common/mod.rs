//! Common test utilities for integration tests.
//!
//! Frames below were captured from ST300 and ST600 devices in the field.
//! Helpers parse them and check the properties every test relies on: one
//! message per frame and a raw frame identical to the input.

#![allow(dead_code)]

use suntrace_protocol::{Message, Parser, ParserOptions};

// ============================================================================
// ST600 frames
// ============================================================================

/// ST600R status report with a 2G cell.
pub const ST600_STT: &[u8] = b"ST600STT;100850000;20;010;20081017;07:41:56;00100;+37.478519;+126.886819;000.012;000.00;9;1;0;15.30;001100;1;0072;0;4.5;1;12.35\r";

/// ST600R status report with a 3G cell.
pub const ST600_STT_3G: &[u8] = b"ST600STT;205951725;20;325;20151224;10:10:44;001cbf72;730;2;4e39;47;-33.363627;-070.670525;000.056;000.00;6;1;190269159;12.79;000000;1;0053;183231;0.0;0;0.00\r";

/// ST600V status report.
pub const ST600V_STT: &[u8] = b"ST600STT;205150043;21;529;20150716;19:33:30;6d6113;-32.644923;-071.424437;000.039;000.00;10;1;724692;12.89;00110000;1;5069;001257;4.2;0;12.35\r";

pub const ST600_ALV: &[u8] = b"ST600ALV;600850777\r";

/// Extended data report carrying three FMS sentences.
pub const ST600_UEX: &[u8] = b"ST600UEX;205951719;20;325;20160202;18:32:54;001cbf75;730;2;4e39;42;-33.364026;-070.670234;000.056;184.17;7;1;4;9.14;100000;144;$FMS1,0,3,1.15,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0\r\n$FMS4,0,0,4265,3.3,4311,3.3,0,0,0,23,64,0,0,0\r\n$FMS8,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,@\r\n;81;000450;0.0;1\r";

/// Extended data report carrying a single FMS sentence.
pub const ST600_UEX_SHORT: &[u8] = b"ST600UEX;205951719;20;325;20160202;19:02:45;001cbf72;730;2;4e39;42;-33.364049;-070.670220;000.063;000.00;7;1;21;9.14;100000;47;$FMS8,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,@\r\n;99;000479;0.0;0\r";

/// ST600 event report for input change `id`.
pub fn st600_evt(id: u8) -> Vec<u8> {
    format!(
        "ST600EVT;205951725;20;325;20151223;13:32:30;001cbf75;730;2;4e39;33;-33.363867;-070.670218;000.122;000.00;5;1;190269102;12.89;000000;{id};183230;4.5;0;0.00\r"
    )
    .into_bytes()
}

/// ST600 alert report with alert code `id`.
pub fn st600_alt(id: u8) -> Vec<u8> {
    format!(
        "ST600ALT;205951725;20;325;20151223;13:32:30;001cbf75;730;2;4e39;33;-33.363867;-070.670218;000.122;000.00;5;1;190269102;12.89;000000;{id};183230;4.5;0;0.00\r"
    )
    .into_bytes()
}

/// ST600 emergency report with emergency code `id`.
pub fn st600_emg(id: u8) -> Vec<u8> {
    format!(
        "ST600EMG;205951725;20;325;20151223;13:32:30;001cbf75;730;2;4e39;33;-33.363867;-070.670218;000.122;000.00;5;1;190269102;12.89;000000;{id};183230;4.5;0;0.00\r"
    )
    .into_bytes()
}

// ============================================================================
// ST300 frames
// ============================================================================

/// ST340LC status report; ends right after the real-time flag.
pub const ST340LC_STT: &[u8] = b"ST300STT;100850000;03;010;20081017;07:41:56;00100;+37.478519;+126.886819;000.012;000.00;9;1;0;15.30;001100;1;0072;0;4.5;1\r";

pub const ST340_STT: &[u8] = b"ST300STT;205150043;02;529;20150716;19:33:30;6d6113;-32.644923;-071.424437;000.039;000.00;10;1;724692;12.89;000000;1;5069;001257;4.2;0\r";

/// ST300K status report with undocumented trailing fields.
pub const ST300K_STT: &[u8] = b"ST300STT;600850802;12;999;20141212;09:47:21;04600;+37.479370;+126.888552;000.120;000.00;3;1;10660;12.25;000000;2;0036;002068;0.0;1;3.10;302799;0.00;215.86;01488BF1160000;1\r";

pub const ST300_ALV: &[u8] = b"ST300ALV;100850000\r";

/// Configuration command response; not a report.
pub const ST300_CGF_RESPONSE: &[u8] =
    b"ST300CGF;Res;100850000;010;1;1;+37.000000;+127.000000;50;1;1\r";

/// ST300 report of kind `tag` (`EMG`, `EVT` or `ALT`) with code `id`.
pub fn st300_report(tag: &str, id: u8) -> Vec<u8> {
    format!(
        "ST300{tag};100850000;01;010;20081017;07:41:56;00100;+37.478519;+126.886819;000.012;000.00;9;1;0;15.30;001100;{id};0;4.5;1\r"
    )
    .into_bytes()
}

// ============================================================================
// Helpers
// ============================================================================

pub fn skipping() -> ParserOptions {
    ParserOptions {
        skip_unknown_frames: true,
        ..Default::default()
    }
}

/// Parse `input` with `options`, returning the messages and the fatal error text.
pub fn parse_all(input: &[u8], options: ParserOptions) -> (Vec<Message>, Option<String>) {
    let mut parser = Parser::new(input, options);
    let messages: Vec<Message> = parser.by_ref().collect();
    let error = parser.error().map(ToString::to_string);
    (messages, error)
}

/// Parse a single well-formed frame.
///
/// # Panics
///
/// Panics unless `input` yields exactly one message, without fatal error,
/// whose raw frame equals `input`.
pub fn parse_one(input: &[u8]) -> Message {
    let (mut messages, error) = parse_all(input, ParserOptions::default());
    assert_eq!(error, None, "unexpected fatal error");
    assert_eq!(messages.len(), 1, "expected exactly one message");
    let message = messages.remove(0);
    assert_eq!(
        message.frame(),
        input,
        "raw frame differs from input: {:?}",
        String::from_utf8_lossy(message.frame())
    );
    message
}

/// Assert two floats are equal to decoding precision.
pub fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}
