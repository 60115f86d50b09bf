//! Register map definitions for the ADXL375 accelerometer.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::accel::params::{Axis, Coupling, InterruptKind, LowPower, OutputDataRate};
use crate::registers::{byte_register, Register, RegisterAccess};

/// Primary I2C address (ALT ADDRESS pin low).
pub const ADDR_PRIMARY: u8 = 0x53;
/// Alternate I2C address (ALT ADDRESS pin high).
pub const ADDR_ALTERNATE: u8 = 0x1D;
/// Value of `DEVID` on every ADXL375.
pub const EXPECTED_DEVID: u8 = 0xE5;

/// Register address of `DEVID`.
pub const REG_DEVID: u8 = 0x00;
/// Register address of `THRESH_SHOCK`.
pub const REG_THRESH_SHOCK: u8 = 0x1D;
/// Register address of `OFSX`.
pub const REG_OFSX: u8 = 0x1E;
/// Register address of `OFSY`.
pub const REG_OFSY: u8 = 0x1F;
/// Register address of `OFSZ`.
pub const REG_OFSZ: u8 = 0x20;
/// Register address of `DUR`.
pub const REG_DUR: u8 = 0x21;
/// Register address of `LATENT`.
pub const REG_LATENT: u8 = 0x22;
/// Register address of `WINDOW`.
pub const REG_WINDOW: u8 = 0x23;
/// Register address of `THRESH_ACT`.
pub const REG_THRESH_ACT: u8 = 0x24;
/// Register address of `THRESH_INACT`.
pub const REG_THRESH_INACT: u8 = 0x25;
/// Register address of `TIME_INACT`.
pub const REG_TIME_INACT: u8 = 0x26;
/// Register address of `ACT_INACT_CTL`.
pub const REG_ACT_INACT_CTL: u8 = 0x27;
/// Register address of `THRESH_FF`.
pub const REG_THRESH_FF: u8 = 0x28;
/// Register address of `TIME_FF`.
pub const REG_TIME_FF: u8 = 0x29;
/// Register address of `SHOCK_AXES`.
pub const REG_SHOCK_AXES: u8 = 0x2A;
/// Register address of `BW_RATE`.
pub const REG_BW_RATE: u8 = 0x2C;
/// Register address of `POWER_CTL`.
pub const REG_POWER_CTL: u8 = 0x2D;
/// Register address of `INT_ENABLE`.
pub const REG_INT_ENABLE: u8 = 0x2E;
/// Register address of `INT_SOURCE`.
pub const REG_INT_SOURCE: u8 = 0x30;
/// Register address of `DATA_FORMAT`.
pub const REG_DATA_FORMAT: u8 = 0x31;
/// Register address of `DATAX0`.
pub const REG_DATAX0: u8 = 0x32;
/// Register address of `DATAY0`.
pub const REG_DATAY0: u8 = 0x34;
/// Register address of `DATAZ0`.
pub const REG_DATAZ0: u8 = 0x36;

/// `DATA_FORMAT.RANGE` must read `0b11` on the ADXL375 (±200 g).
pub const RANGE_200G: u8 = 0b11;

/// Shock duration written during tap setup (625 µs/count, 10 ms).
pub const TAP_DURATION: u8 = 0x10;
/// Double shock latency written during tap setup (1.25 ms/count, 100 ms).
pub const TAP_LATENCY: u8 = 0x50;
/// Double shock window written during tap setup (1.25 ms/count, ~319 ms).
pub const TAP_WINDOW: u8 = 0xFF;

/// Returns the `DATAx0` register of an axis.
pub const fn data_register(axis: Axis) -> u8 {
    match axis {
        Axis::X => REG_DATAX0,
        Axis::Y => REG_DATAY0,
        Axis::Z => REG_DATAZ0,
    }
}

/// Returns the `OFSx` register of an axis.
pub const fn offset_register(axis: Axis) -> u8 {
    match axis {
        Axis::X => REG_OFSX,
        Axis::Y => REG_OFSY,
        Axis::Z => REG_OFSZ,
    }
}

/// Bitfield representation of the `DATA_FORMAT` register (address `0x31`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFormat {
    // Range selection, fixed at 0b11 (bits 1:0).
    pub range: B2,
    // Left-justified output (bit 2).
    pub justify: bool,
    // Full resolution output (bit 3).
    pub full_res: bool,
    #[skip]
    __: B1,
    // Active-low interrupt pins (bit 5).
    pub int_invert: bool,
    // Three-wire SPI mode (bit 6).
    pub spi: bool,
    // Self-test force (bit 7).
    pub self_test: bool,
}

byte_register!(DataFormat);

/// Bitfield representation of the `BW_RATE` register (address `0x2C`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BwRate {
    // Output data rate (bits 3:0).
    pub rate: OutputDataRate,
    // Reduced power operation (bit 4).
    pub low_power: LowPower,
    #[skip]
    __: B3,
}

byte_register!(BwRate);

/// Bitfield representation of the `POWER_CTL` register (address `0x2D`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerControl {
    // Sleep-mode reading frequency (bits 1:0).
    pub wakeup: B2,
    // Sleep mode (bit 2).
    pub sleep: bool,
    // Measurement mode (bit 3).
    pub measure: bool,
    // Automatic sleep on inactivity (bit 4).
    pub auto_sleep: bool,
    // Serial activity/inactivity link (bit 5).
    pub link: bool,
    #[skip]
    __: B2,
}

byte_register!(PowerControl);

/// Bitfield representation of the `ACT_INACT_CTL` register (address `0x27`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActInactControl {
    // Inactivity axis enables (bits 0..=2 are Z, Y, X).
    pub inact_z: bool,
    pub inact_y: bool,
    pub inact_x: bool,
    // Inactivity coupling (bit 3).
    pub inact_coupling: Coupling,
    // Activity axis enables (bits 4..=6 are Z, Y, X).
    pub act_z: bool,
    pub act_y: bool,
    pub act_x: bool,
    // Activity coupling (bit 7).
    pub act_coupling: Coupling,
}

byte_register!(ActInactControl);

impl ActInactControl {
    /// All axes participating in activity and inactivity detection.
    pub fn all_axes(coupling: Coupling) -> Self {
        Self::new()
            .with_inact_z(true)
            .with_inact_y(true)
            .with_inact_x(true)
            .with_inact_coupling(coupling)
            .with_act_z(true)
            .with_act_y(true)
            .with_act_x(true)
            .with_act_coupling(coupling)
    }
}

/// Bitfield representation of the `SHOCK_AXES` register (address `0x2A`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShockAxes {
    // Axis enables (bits 0..=2 are Z, Y, X).
    pub z: bool,
    pub y: bool,
    pub x: bool,
    // Suppress double shock when acceleration stays high (bit 3).
    pub suppress: bool,
    #[skip]
    __: B4,
}

byte_register!(ShockAxes);

/// Bitfield representation of the `INT_ENABLE` register (address `0x2E`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptEnable {
    pub overrun: bool,
    pub watermark: bool,
    pub free_fall: bool,
    pub inactivity: bool,
    pub activity: bool,
    pub double_tap: bool,
    pub single_tap: bool,
    pub data_ready: bool,
}

byte_register!(InterruptEnable);

impl InterruptEnable {
    /// Sets the enable bit of `kind`, leaving every other bit untouched.
    pub fn enable(&mut self, kind: InterruptKind) {
        self.enable_all(&[kind]);
    }

    /// Sets the enable bits of every kind in `kinds` at once.
    pub fn enable_all(&mut self, kinds: &[InterruptKind]) {
        let mask = kinds.iter().fold(0u8, |mask, kind| mask | kind.mask());
        *self = Self::from(u8::from(*self) | mask);
    }
}

/// Bitfield representation of the `INT_SOURCE` register (address `0x30`).
///
/// Reading this register clears the latched event bits on the device.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptSource {
    pub overrun: bool,
    pub watermark: bool,
    pub free_fall: bool,
    pub inactivity: bool,
    pub activity: bool,
    pub double_tap: bool,
    pub single_tap: bool,
    pub data_ready: bool,
}

byte_register!(InterruptSource);

impl InterruptSource {
    /// Returns whether the event of `kind` is latched in this snapshot.
    pub fn is_set(&self, kind: InterruptKind) -> bool {
        u8::from(*self) & kind.mask() != 0
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InterruptSource {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "InterruptSource {{ DATA_READY: {}, SINGLE_SHOCK: {}, DOUBLE_SHOCK: {}, ACTIVITY: {}, INACTIVITY: {}, FREE_FALL: {}, WATERMARK: {}, OVERRUN: {} }}",
            self.data_ready(),
            self.single_tap(),
            self.double_tap(),
            self.activity(),
            self.inactivity(),
            self.free_fall(),
            self.watermark(),
            self.overrun()
        );
    }
}

impl Register for DataFormat {
    const ADDRESS: u8 = REG_DATA_FORMAT;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<u8> = Some(0x00);
}

impl Register for BwRate {
    const ADDRESS: u8 = REG_BW_RATE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<u8> = Some(0x0A);
}

impl Register for PowerControl {
    const ADDRESS: u8 = REG_POWER_CTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<u8> = Some(0x00);
}

impl Register for ActInactControl {
    const ADDRESS: u8 = REG_ACT_INACT_CTL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<u8> = Some(0x00);
}

impl Register for ShockAxes {
    const ADDRESS: u8 = REG_SHOCK_AXES;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<u8> = Some(0x00);
}

impl Register for InterruptEnable {
    const ADDRESS: u8 = REG_INT_ENABLE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<u8> = Some(0x00);
}

impl Register for InterruptSource {
    const ADDRESS: u8 = REG_INT_SOURCE;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<u8> = Some(0x02);
}
