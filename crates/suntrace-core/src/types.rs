use crate::error::{DecodeError, Field};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tracker serial number (9 ASCII digits).
///
/// The default value is empty; it appears on reports whose decoding
/// stopped before the device id was read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(String);

impl DeviceId {
    /// Number of digits in a device id.
    pub const DIGITS: usize = 9;

    /// Create a device id from its ASCII digits.
    ///
    /// # Errors
    /// Returns `DecodeError::Syntax` if `digits` is not exactly nine ASCII digits.
    pub fn new(digits: &str) -> Result<Self, DecodeError> {
        if digits.len() != Self::DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::Syntax {
                field: Field::DeviceId,
            });
        }
        Ok(DeviceId(digits.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for DeviceId {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, DecodeError> {
        DeviceId::new(s)
    }
}

/// Protocol family, selected by the 4-character prefix after `S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    St300,
    St600,
}

impl Family {
    /// Header prefix following the start character.
    #[must_use]
    pub fn prefix(&self) -> &'static [u8; 4] {
        match self {
            Family::St300 => b"T300",
            Family::St600 => b"T600",
        }
    }

    /// Models whose reports are decoded under this family.
    #[must_use]
    pub fn models(&self) -> &'static [Model] {
        match self {
            Family::St300 => &[
                Model::St300,
                Model::St340,
                Model::St340Lc,
                Model::St300H,
                Model::St350,
                Model::St480,
                Model::St300A,
                Model::St300R,
                Model::St300B,
                Model::St300V,
                Model::St300C,
                Model::St300K,
                Model::St300P,
                Model::St300F,
            ],
            Family::St600 => &[Model::St600R, Model::St600V],
        }
    }

    #[must_use]
    pub fn accepts(&self, model: Model) -> bool {
        self.models().contains(&model)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Family::St300 => write!(f, "ST300"),
            Family::St600 => write!(f, "ST600"),
        }
    }
}

/// Device hardware model, carried as a 2-digit code in every report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Model {
    #[default]
    Unknown,
    St300,
    St340,
    St340Lc,
    St300H,
    St350,
    St480,
    St300A,
    St300R,
    St300B,
    St300V,
    St300C,
    St300K,
    St300P,
    St300F,
    St600R,
    St600V,
}

const MODEL_CODES: &[(u8, Model)] = &[
    (1, Model::St300),
    (2, Model::St340),
    (3, Model::St340Lc),
    (4, Model::St300H),
    (5, Model::St350),
    (6, Model::St480),
    (7, Model::St300A),
    (8, Model::St300R),
    (9, Model::St300B),
    (10, Model::St300V),
    (11, Model::St300C),
    (12, Model::St300K),
    (13, Model::St300P),
    (14, Model::St300F),
    (20, Model::St600R),
    (21, Model::St600V),
];

impl Model {
    /// Map a wire code to a model. Codes outside the table map to `Unknown`.
    #[must_use]
    pub fn from_code(code: u8) -> Model {
        MODEL_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map_or(Model::Unknown, |(_, m)| *m)
    }

    #[must_use]
    pub fn code(&self) -> Option<u8> {
        MODEL_CODES
            .iter()
            .find(|(_, m)| m == self)
            .map(|(c, _)| *c)
    }

    /// Models whose ST300 reports end right after the real-time flag.
    ///
    /// Newer ST300 firmware appends undocumented fields after it.
    #[must_use]
    pub fn has_plain_st300_trailer(&self) -> bool {
        matches!(self, Model::St300 | Model::St340 | Model::St340Lc)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Model::Unknown => "unknown",
            Model::St300 => "ST300",
            Model::St340 => "ST340",
            Model::St340Lc => "ST340LC",
            Model::St300H => "ST300H",
            Model::St350 => "ST350",
            Model::St480 => "ST480",
            Model::St300A => "ST300A",
            Model::St300R => "ST300R",
            Model::St300B => "ST300B",
            Model::St300V => "ST300V",
            Model::St300C => "ST300C",
            Model::St300K => "ST300K",
            Model::St300P => "ST300P",
            Model::St300F => "ST300F",
            Model::St600R => "ST600R",
            Model::St600V => "ST600V",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Operating mode reported in status messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    #[default]
    Unknown,
    Idle,
    Active,
    Distance,
    Angle,
}

impl Mode {
    /// Map the single ASCII digit of the wire format.
    #[must_use]
    pub fn from_digit(digit: u8) -> Option<Mode> {
        match digit {
            b'1' => Some(Mode::Idle),
            b'2' => Some(Mode::Active),
            b'4' => Some(Mode::Distance),
            b'5' => Some(Mode::Angle),
            _ => None,
        }
    }
}

/// Cause of an emergency report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmergencyKind {
    #[default]
    Unknown,
    PanicButton,
    ParkingLock,
    RemovingMainPower,
    AntiTheft,
    AntiTheftDoor,
    Motion,
    AntiTheftShock,
}

impl EmergencyKind {
    #[must_use]
    pub fn from_digit(digit: u8) -> Option<EmergencyKind> {
        match digit {
            b'1' => Some(EmergencyKind::PanicButton),
            b'2' => Some(EmergencyKind::ParkingLock),
            b'3' => Some(EmergencyKind::RemovingMainPower),
            b'5' => Some(EmergencyKind::AntiTheft),
            b'6' => Some(EmergencyKind::AntiTheftDoor),
            b'7' => Some(EmergencyKind::Motion),
            b'8' => Some(EmergencyKind::AntiTheftShock),
            _ => None,
        }
    }
}

/// Input change that triggered an event report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[default]
    Unknown,
    Input1Ground,
    Input1Open,
    Input2Ground,
    Input2Open,
    Input3Ground,
    Input3Open,
}

impl EventKind {
    #[must_use]
    pub fn from_digit(digit: u8) -> Option<EventKind> {
        match digit {
            b'1' => Some(EventKind::Input1Ground),
            b'2' => Some(EventKind::Input1Open),
            b'3' => Some(EventKind::Input2Ground),
            b'4' => Some(EventKind::Input2Open),
            b'5' => Some(EventKind::Input3Ground),
            b'6' => Some(EventKind::Input3Open),
            _ => None,
        }
    }
}

/// Condition reported by an alert message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    #[default]
    Unknown,
    StartOverSpeed,
    StopOverSpeed,
    DisconnectedGpsAntenna,
    ReconnectedGpsAntenna,
    ExitedGeoFence,
    EnteredGeoFence,
    ShortedGpsAntenna,
    EnterDeepSleep,
    ExitDeepSleep,
    BackupBatteryError,
    BatteryLowLevel,
    Shocked,
    Collision,
    DeviatedFromRoute,
    EnteredIntoRoute,
    EngineExceedSpeed,
    EngineVehicleSpeed,
    EngineCoolantTemp,
    EngineOilPressure,
    EngineRpm,
    EngineHardBrake,
    EngineErrCode,
    IgnitionOn,
    IgnitionOff,
    ConnectedToMainPower,
    DisconnectedFromMainPower,
    ConnectedToBackupBattery,
    DisconnectedFromBackupBattery,
    FastAccelerationFromDpa,
    FastBrakingFromDpa,
    SharpTurnFromDpa,
    OverSpeedFromDpa,
    JammingDetected,
    InsertedIButton,
    RemovedIButton,
    DriveLessThanPredefinedTime,
    StoppedMoreThanPredefinedTime,
    DeadCenter,
    OverRpm,
    CompletedAutoRpmCalibration,
    CompletedAutoOdometerCalibration,
    CompletedAutoOdometerCalibrationDualGear,
    StopLimitAtIgnitionOn,
    MovingAfterStopLimitAtIgnitionOn,
    RapidFuelReduction,
}

const ALERT_CODES: &[(u8, AlertKind)] = &[
    (1, AlertKind::StartOverSpeed),
    (2, AlertKind::StopOverSpeed),
    (3, AlertKind::DisconnectedGpsAntenna),
    (4, AlertKind::ReconnectedGpsAntenna),
    (5, AlertKind::ExitedGeoFence),
    (6, AlertKind::EnteredGeoFence),
    (8, AlertKind::ShortedGpsAntenna),
    (9, AlertKind::EnterDeepSleep),
    (10, AlertKind::ExitDeepSleep),
    (13, AlertKind::BackupBatteryError),
    (14, AlertKind::BatteryLowLevel),
    (15, AlertKind::Shocked),
    (16, AlertKind::Collision),
    (18, AlertKind::DeviatedFromRoute),
    (19, AlertKind::EnteredIntoRoute),
    (22, AlertKind::EngineExceedSpeed),
    (23, AlertKind::EngineVehicleSpeed),
    (24, AlertKind::EngineCoolantTemp),
    (25, AlertKind::EngineOilPressure),
    (26, AlertKind::EngineRpm),
    (27, AlertKind::EngineHardBrake),
    (28, AlertKind::EngineErrCode),
    (33, AlertKind::IgnitionOn),
    (34, AlertKind::IgnitionOff),
    (40, AlertKind::ConnectedToMainPower),
    (41, AlertKind::DisconnectedFromMainPower),
    (44, AlertKind::ConnectedToBackupBattery),
    (45, AlertKind::DisconnectedFromBackupBattery),
    (46, AlertKind::FastAccelerationFromDpa),
    (47, AlertKind::FastBrakingFromDpa),
    (48, AlertKind::SharpTurnFromDpa),
    (49, AlertKind::OverSpeedFromDpa),
    (50, AlertKind::JammingDetected),
    (59, AlertKind::InsertedIButton),
    (60, AlertKind::RemovedIButton),
    (61, AlertKind::DriveLessThanPredefinedTime),
    (62, AlertKind::StoppedMoreThanPredefinedTime),
    (63, AlertKind::DeadCenter),
    (64, AlertKind::OverRpm),
    (65, AlertKind::CompletedAutoRpmCalibration),
    (66, AlertKind::CompletedAutoOdometerCalibration),
    (67, AlertKind::CompletedAutoOdometerCalibrationDualGear),
    (68, AlertKind::StopLimitAtIgnitionOn),
    (69, AlertKind::MovingAfterStopLimitAtIgnitionOn),
    (73, AlertKind::RapidFuelReduction),
];

impl AlertKind {
    /// Look up an alert by its numeric wire code.
    #[must_use]
    pub fn from_code(code: u8) -> Option<AlertKind> {
        ALERT_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, kind)| *kind)
    }

    #[must_use]
    pub fn code(&self) -> Option<u8> {
        ALERT_CODES
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(c, _)| *c)
    }
}
