//! Decoding of ST600 (extended family) reports.

mod common;

use common::*;
use rstest::rstest;
use suntrace_core::{
    AlertKind, DecodeError, EmergencyKind, EventKind, Family, Field, Mode, Model,
};
use suntrace_protocol::{Cell, Cell3g, Report, ReportKind};

#[test]
fn test_status_report_2g() {
    let msg = parse_one(ST600_STT);

    assert!(msg.is_ok());
    assert_eq!(msg.kind(), ReportKind::Status);
    assert_eq!(msg.family, Some(Family::St600));
    assert_eq!(msg.model, Model::St600R);

    let Report::Status(stt) = msg.report() else {
        panic!("expected a status report, got {:?}", msg.report());
    };
    assert_eq!(stt.common.device_id.as_str(), "100850000");
    assert_eq!(stt.common.model, Model::St600R);
    assert_eq!(stt.common.firmware_version, 10);
    assert_eq!(stt.common.timestamp.to_rfc3339(), "2008-10-17T07:41:56+00:00");
    assert_eq!(stt.common.cell, Cell::Gsm("00100".to_string()));
    assert_close(stt.common.latitude, 37.478519);
    assert_close(stt.common.longitude, 126.886819);
    assert_close(stt.common.speed, 0.012);
    assert_close(stt.common.course, 0.0);
    assert_eq!(stt.common.satellites, 9);
    assert!(stt.common.gps_fixed);
    assert_eq!(stt.common.distance, 0);
    assert_close(stt.common.power_volt, 15.30);
    assert_eq!(stt.common.io, "001100");
    assert_eq!(stt.mode, Mode::Idle);
    assert_eq!(stt.message_number, 72);
    assert_eq!(stt.driving_hour_meter, 0);
    assert_close(stt.backup_volt, 4.5);
    assert!(stt.real_time);
    assert_close(stt.adc.unwrap(), 12.35);
}

#[test]
fn test_status_report_3g() {
    let msg = parse_one(ST600_STT_3G);

    let Report::Status(stt) = msg.report() else {
        panic!("expected a status report, got {:?}", msg.report());
    };
    assert_eq!(
        stt.common.cell,
        Cell::Umts(Cell3g {
            cell_id: "001cbf72".to_string(),
            mcc: "730".to_string(),
            mnc: "2".to_string(),
            lac: "4e39".to_string(),
            signal_level: 47.0,
        })
    );
    assert_close(stt.common.latitude, -33.363627);
    assert_close(stt.common.longitude, -70.670525);
    assert_eq!(stt.common.satellites, 6);
    assert_eq!(stt.common.distance, 190_269_159);
    assert_eq!(stt.common.io, "000000");
    assert_eq!(stt.message_number, 53);
    assert_eq!(stt.driving_hour_meter, 183_231);
    assert!(!stt.real_time);
    assert_close(stt.adc.unwrap(), 0.0);
}

#[test]
fn test_status_report_st600v() {
    let msg = parse_one(ST600V_STT);
    assert_eq!(msg.model, Model::St600V);

    let Report::Status(stt) = msg.report() else {
        panic!("expected a status report, got {:?}", msg.report());
    };
    assert_eq!(stt.common.firmware_version, 529);
    assert_eq!(stt.common.satellites, 10);
    assert_eq!(stt.common.io, "00110000");
    assert_eq!(stt.message_number, 5069);
    assert_eq!(stt.driving_hour_meter, 1257);
    assert_close(stt.backup_volt, 4.2);
    assert!(!stt.real_time);
}

#[rstest]
#[case(1, EventKind::Input1Ground)]
#[case(2, EventKind::Input1Open)]
#[case(3, EventKind::Input2Ground)]
#[case(4, EventKind::Input2Open)]
#[case(5, EventKind::Input3Ground)]
#[case(6, EventKind::Input3Open)]
fn test_event_report(#[case] id: u8, #[case] expected: EventKind) {
    let input = st600_evt(id);
    let msg = parse_one(&input);

    let Report::Event(evt) = msg.report() else {
        panic!("expected an event report, got {:?}", msg.report());
    };
    assert_eq!(evt.event, expected);
    assert_eq!(evt.common.device_id.as_str(), "205951725");
    assert!(evt.common.cell.is_3g());
    assert_eq!(evt.driving_hour_meter, 183_230);
    assert_close(evt.backup_volt, 4.5);
    assert!(!evt.real_time);
    assert_close(evt.adc.unwrap(), 0.0);
}

#[rstest]
#[case(1, EmergencyKind::PanicButton)]
#[case(3, EmergencyKind::RemovingMainPower)]
#[case(8, EmergencyKind::AntiTheftShock)]
fn test_emergency_report(#[case] id: u8, #[case] expected: EmergencyKind) {
    let input = st600_emg(id);
    let msg = parse_one(&input);

    assert_eq!(msg.kind(), ReportKind::Emergency);
    let Report::Emergency(emg) = msg.report() else {
        panic!("expected an emergency report, got {:?}", msg.report());
    };
    assert_eq!(emg.emergency, expected);
}

#[rstest]
#[case(1, AlertKind::StartOverSpeed)]
#[case(33, AlertKind::IgnitionOn)]
#[case(41, AlertKind::DisconnectedFromMainPower)]
#[case(73, AlertKind::RapidFuelReduction)]
fn test_alert_report(#[case] id: u8, #[case] expected: AlertKind) {
    let input = st600_alt(id);
    let msg = parse_one(&input);

    let Report::Alert(alt) = msg.report() else {
        panic!("expected an alert report, got {:?}", msg.report());
    };
    assert_eq!(alt.alert, expected);
    assert_eq!(alt.driving_hour_meter, 183_230);
}

#[test]
fn test_alive_report() {
    let msg = parse_one(ST600_ALV);

    assert!(msg.is_ok());
    assert_eq!(msg.kind(), ReportKind::Alive);
    assert_eq!(msg.model, Model::Unknown);
    let Report::Alive(alv) = msg.report() else {
        panic!("expected a keep-alive, got {:?}", msg.report());
    };
    assert_eq!(alv.device_id.as_str(), "600850777");
}

#[test]
fn test_extended_data_report() {
    let msg = parse_one(ST600_UEX);

    assert!(msg.is_ok());
    assert_eq!(msg.kind(), ReportKind::ExtendedData);
    let Report::ExtendedData(uex) = msg.report() else {
        panic!("expected extended data, got {:?}", msg.report());
    };
    assert_eq!(uex.common.distance, 4);
    assert_close(uex.common.course, 184.17);
    assert_eq!(uex.common.io, "100000");
    assert_eq!(uex.length, 144);
    assert_eq!(uex.payload.len(), 144);
    assert!(uex.payload.starts_with(b"$FMS1,"));
    assert!(uex.payload.ends_with(b"@\r\n"));
    assert_eq!(uex.checksum, 0x81);
    assert!(uex.is_valid());
    assert_eq!(uex.driving_hour_meter, 450);
    assert_close(uex.backup_volt, 0.0);
    assert!(uex.real_time);
}

#[test]
fn test_extended_data_single_sentence() {
    let msg = parse_one(ST600_UEX_SHORT);

    let Report::ExtendedData(uex) = msg.report() else {
        panic!("expected extended data, got {:?}", msg.report());
    };
    assert_eq!(uex.length, 47);
    assert_eq!(uex.checksum, 0x99);
    assert!(uex.is_valid());
    assert_eq!(uex.driving_hour_meter, 479);
    assert!(!uex.real_time);
}

#[test]
fn test_extended_data_checksum_mismatch() {
    let input = String::from_utf8_lossy(ST600_UEX).replace(";81;", ";80;");
    let msg = parse_one(input.as_bytes());

    // A bad checksum is reported by the record, not as a decode failure
    assert!(msg.is_ok());
    let Report::ExtendedData(uex) = msg.report() else {
        panic!("expected extended data, got {:?}", msg.report());
    };
    assert_eq!(uex.checksum, 0x80);
    assert_eq!(uex.payload_sum(), 0x81);
    assert!(!uex.is_valid());
}

#[test]
fn test_extended_data_missing_payload_separator() {
    let input = String::from_utf8_lossy(ST600_UEX_SHORT).replace(";47;", ";46;");
    let (messages, _) = parse_all(input.as_bytes(), Default::default());

    assert_eq!(
        messages[0].error(),
        Some(&DecodeError::ExpectedSeparator {
            field: Field::Payload
        })
    );
}

#[test]
fn test_unsupported_model() {
    let input = String::from_utf8_lossy(ST600_STT).replace(";20;010;", ";03;010;");
    let (messages, _) = parse_all(input.as_bytes(), Default::default());

    let msg = &messages[0];
    assert_eq!(
        msg.error(),
        Some(&DecodeError::UnsupportedModel {
            family: Family::St600,
            code: 3
        })
    );
    assert_eq!(msg.model, Model::Unknown);
    assert_eq!(msg.frame(), b"ST600STT;100850000;03;");
}

#[test]
fn test_unknown_alert_code_keeps_partial_report() {
    let input = st600_alt(7);
    let (messages, _) = parse_all(&input, Default::default());

    let msg = &messages[0];
    assert_eq!(
        msg.error(),
        Some(&DecodeError::UnknownCode {
            field: Field::AlertId,
            code: "7".to_string()
        })
    );
    let Report::Alert(alt) = msg.report() else {
        panic!("expected an alert report, got {:?}", msg.report());
    };
    assert_eq!(alt.common.device_id.as_str(), "205951725");
    assert_eq!(alt.common.io, "000000");
    assert_eq!(alt.alert, AlertKind::Unknown);
    assert_eq!(alt.driving_hour_meter, 0);
    assert!(alt.adc.is_none());
}

#[test]
fn test_event_command_response() {
    let input = b"ST600EVT;Res;205951725;20;1\r";

    let (messages, error) = parse_all(input, skipping());
    assert_eq!(error, None);
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].kind(), ReportKind::Unknown);
    assert_eq!(messages[0].frame(), &input[..]);
    assert_eq!(
        messages[0].error(),
        Some(&DecodeError::CommandResponse {
            header: "T600EVT;".to_string()
        })
    );

    let (messages, error) = parse_all(input, Default::default());
    assert_eq!(messages[0].frame(), b"ST600EVT;Res;");
    assert!(error.is_some());
}

#[test]
fn test_reports_serialize() {
    let msg = parse_one(ST600_STT_3G);
    let json = serde_json::to_value(msg.report()).unwrap();

    let status = &json["Status"];
    assert_eq!(status["device_id"], "205951725");
    assert_eq!(status["model"], "St600R");
    assert_eq!(status["cell"]["Umts"]["mcc"], "730");
    assert_eq!(status["message_number"], 53);
}
