//! Strongly typed parameter enumerations for the BMP280 driver.

use modular_bitfield::prelude::Specifier;

/// Oversampling selections encoded in `CTRL_MEAS.OSRS_T`/`OSRS_P`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum Oversampling {
    /// Measurement skipped; the output register keeps `0x80000`.
    Skipped = 0b000,
    /// ×1 (16-bit resolution).
    X1 = 0b001,
    /// ×2 (17-bit resolution).
    X2 = 0b010,
    /// ×4 (18-bit resolution).
    X4 = 0b011,
    /// ×8 (19-bit resolution).
    X8 = 0b100,
    /// ×16 (20-bit resolution).
    X16 = 0b101,
}

impl Oversampling {
    /// Number of conversions averaged per sample.
    pub const fn factor(self) -> u32 {
        match self {
            Self::Skipped => 0,
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X4 => 4,
            Self::X8 => 8,
            Self::X16 => 16,
        }
    }
}

/// Power modes encoded in `CTRL_MEAS.MODE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 2]
pub enum PowerMode {
    /// No conversions.
    Sleep = 0b00,
    /// A single conversion, then back to sleep.
    Forced = 0b01,
    /// Continuous conversions separated by the standby time.
    Normal = 0b11,
}

/// Normal-mode standby durations encoded in `CONFIG.T_SB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum StandbyTime {
    /// 0.5 ms.
    Us500 = 0b000,
    /// 62.5 ms.
    Us62500 = 0b001,
    /// 125 ms.
    Ms125 = 0b010,
    /// 250 ms.
    Ms250 = 0b011,
    /// 500 ms.
    Ms500 = 0b100,
    /// 1000 ms.
    Ms1000 = 0b101,
    /// 2000 ms.
    Ms2000 = 0b110,
    /// 4000 ms.
    Ms4000 = 0b111,
}

impl StandbyTime {
    /// Returns the standby duration in microseconds.
    pub const fn micros(self) -> u32 {
        match self {
            Self::Us500 => 500,
            Self::Us62500 => 62_500,
            Self::Ms125 => 125_000,
            Self::Ms250 => 250_000,
            Self::Ms500 => 500_000,
            Self::Ms1000 => 1_000_000,
            Self::Ms2000 => 2_000_000,
            Self::Ms4000 => 4_000_000,
        }
    }
}

/// IIR filter coefficients encoded in `CONFIG.FILTER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 3]
pub enum Filter {
    /// Filter off.
    Off = 0b000,
    /// Coefficient 2.
    X2 = 0b001,
    /// Coefficient 4.
    X4 = 0b010,
    /// Coefficient 8.
    X8 = 0b011,
    /// Coefficient 16.
    X16 = 0b100,
}

/// Maximum forced-mode conversion time in milliseconds for the given settings.
///
/// Datasheet §3.8.1: `1.25 + 2.3·osrs_t + (2.3·osrs_p + 0.575)` ms.
pub const fn max_conversion_ms(temperature: Oversampling, pressure: Oversampling) -> u32 {
    let mut micros = 1_250 + 2_300 * temperature.factor();
    if pressure.factor() > 0 {
        micros += 2_300 * pressure.factor() + 575;
    }
    micros.div_ceil(1_000)
}
