//! Register map definitions for the BMP280 pressure and temperature sensor.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::baro::params::{Filter, Oversampling, PowerMode, StandbyTime};
use crate::registers::{byte_register, Register, RegisterAccess};

/// Primary I2C address (SDO tied to GND).
pub const ADDR_PRIMARY: u8 = 0x76;
/// Alternate I2C address (SDO tied to VDDIO).
pub const ADDR_ALTERNATE: u8 = 0x77;
/// Value of `ID` on every BMP280.
pub const EXPECTED_CHIP_ID: u8 = 0x58;

/// Register address of the first calibration byte (`dig_T1` LSB).
pub const REG_CALIB_START: u8 = 0x88;
/// Register address of `ID`.
pub const REG_CHIP_ID: u8 = 0xD0;
/// Register address of `RESET`.
pub const REG_RESET: u8 = 0xE0;
/// Register address of `STATUS`.
pub const REG_STATUS: u8 = 0xF3;
/// Register address of `CTRL_MEAS`.
pub const REG_CTRL_MEAS: u8 = 0xF4;
/// Register address of `CONFIG`.
pub const REG_CONFIG: u8 = 0xF5;
/// Register address of `PRESS_MSB`.
pub const REG_PRESS_MSB: u8 = 0xF7;
/// Register address of `TEMP_MSB`.
pub const REG_TEMP_MSB: u8 = 0xFA;

/// Length of the calibration block starting at [`REG_CALIB_START`].
pub const CALIB_LEN: usize = 24;
/// Length of the pressure plus temperature burst starting at [`REG_PRESS_MSB`].
pub const SAMPLE_LEN: usize = 6;

/// Soft reset command value written to the `RESET` register.
pub const RESET_COMMAND: u8 = 0xB6;

/// Assembles a 20-bit conversion result from its MSB, LSB and XLSB registers.
pub const fn unpack_adc(msb: u8, lsb: u8, xlsb: u8) -> u32 {
    ((msb as u32) << 12) | ((lsb as u32) << 4) | ((xlsb as u32) >> 4)
}

/// Bitfield representation of the `CTRL_MEAS` register (address `0xF4`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CtrlMeas {
    // Power mode (bits 1:0).
    pub mode: PowerMode,
    // Pressure oversampling (bits 4:2).
    pub osrs_p: Oversampling,
    // Temperature oversampling (bits 7:5).
    pub osrs_t: Oversampling,
}

byte_register!(CtrlMeas);

/// Bitfield representation of the `CONFIG` register (address `0xF5`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRegister {
    // Three-wire SPI enable (bit 0).
    pub spi3w_en: bool,
    #[skip]
    __: B1,
    // IIR filter coefficient (bits 4:2).
    pub filter: Filter,
    // Normal-mode standby time (bits 7:5).
    pub t_sb: StandbyTime,
}

byte_register!(ConfigRegister);

/// Bitfield representation of the `STATUS` register (address `0xF3`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    // NVM data being copied to image registers (bit 0).
    pub im_update: bool,
    #[skip]
    __: B2,
    // Conversion running (bit 3).
    pub measuring: bool,
    #[skip]
    __: B4,
}

byte_register!(Status);

#[cfg(feature = "defmt")]
impl defmt::Format for Status {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Status {{ MEASURING: {}, IM_UPDATE: {} }}",
            self.measuring(),
            self.im_update()
        );
    }
}

impl Register for CtrlMeas {
    const ADDRESS: u8 = REG_CTRL_MEAS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<u8> = Some(0x00);
}

impl Register for ConfigRegister {
    const ADDRESS: u8 = REG_CONFIG;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<u8> = Some(0x00);
}

impl Register for Status {
    const ADDRESS: u8 = REG_STATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<u8> = Some(0x00);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_control_bytes() {
        let ctrl = CtrlMeas::new()
            .with_mode(PowerMode::Normal)
            .with_osrs_p(Oversampling::X16)
            .with_osrs_t(Oversampling::X2);
        assert_eq!(u8::from(ctrl), 0x57);

        let config = ConfigRegister::new()
            .with_t_sb(StandbyTime::Ms1000)
            .with_filter(Filter::Off);
        assert_eq!(u8::from(config), 0xA0);
    }

    #[test]
    fn status_layout_matches_datasheet() {
        let status = Status::from(0b0000_1001);
        assert!(status.measuring());
        assert!(status.im_update());
        assert!(!Status::from(0xF6).measuring());
    }

    #[test]
    fn adc_words_are_twenty_bits() {
        assert_eq!(unpack_adc(0x7E, 0xED, 0x00), 519_888);
        assert_eq!(unpack_adc(0xFF, 0xFF, 0xFF), 0xF_FFFF);
        assert_eq!(unpack_adc(0x80, 0x00, 0x0F), 0x8_0000);
    }
}
