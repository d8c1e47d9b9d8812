use super::DecodeContext;
use crate::cell::{self, Cell};
use crate::field::{self, Terminator};
use crate::frame::FrameReader;
use crate::layout::FrameLayout;
use crate::message::ReportKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Read;
use suntrace_core::{DecodeResult, DeviceId, Model};

/// Fields shared by every positioned report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommonReport {
    pub device_id: DeviceId,
    pub model: Model,
    pub firmware_version: u16,
    pub timestamp: DateTime<Utc>,
    pub cell: Cell,
    pub latitude: f32,
    pub longitude: f32,
    /// km/h
    pub speed: f32,
    /// Degrees
    pub course: f32,
    pub satellites: u8,
    pub gps_fixed: bool,
    /// Meters
    pub distance: u32,
    pub power_volt: f32,
    pub io: String,
}

impl CommonReport {
    /// Decode from the device id through the IO bitmask.
    ///
    /// Returns the layout selected by the decoded model.
    pub(crate) fn decode<R: Read>(
        &mut self,
        reader: &mut FrameReader<R>,
        ctx: &DecodeContext,
        kind: ReportKind,
    ) -> DecodeResult<FrameLayout> {
        self.device_id = field::device_id(reader, Terminator::Separator)?;
        self.decode_after_id(reader, ctx, kind)
    }

    /// Same as [`CommonReport::decode`] for a device id already read.
    pub(crate) fn decode_after_id<R: Read>(
        &mut self,
        reader: &mut FrameReader<R>,
        ctx: &DecodeContext,
        kind: ReportKind,
    ) -> DecodeResult<FrameLayout> {
        self.model = field::model(reader, ctx.family)?;
        let layout = FrameLayout::lookup(ctx.family, kind, self.model);

        self.firmware_version = field::firmware_version(reader)?;
        self.timestamp = field::timestamp(reader)?;
        cell::decode(reader, layout.cell, &mut self.cell)?;
        self.latitude = field::latitude(reader)?;
        self.longitude = field::longitude(reader)?;
        self.speed = field::speed(reader)?;
        self.course = field::course(reader)?;
        self.satellites = field::satellites(reader)?;
        self.gps_fixed = field::gps_fix(reader)?;
        self.distance = field::distance(reader)?;
        self.power_volt = field::power_volt(reader)?;
        self.io = field::io(reader)?;
        Ok(layout)
    }
}
