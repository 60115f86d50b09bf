//! Strongly typed parameter enumerations for the ADXL375 driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::accel::Config) and the high-level driver APIs.
//!
//! # Examples
//!
//! ```rust
//! use adxl375_bmp280::accel::params::{Axis, LowPower, OutputDataRate};
//!
//! let odr = OutputDataRate::Hz100;
//! let power = LowPower::Disabled;
//! let _ = (odr, power, Axis::Z);
//! ```

use modular_bitfield::prelude::Specifier;

/// Output data rate selections encoded in `BW_RATE.RATE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 4]
pub enum OutputDataRate {
    /// 6.25 Hz output data rate.
    Hz6_25 = 0b0110,
    /// 12.5 Hz output data rate.
    Hz12_5 = 0b0111,
    /// 25 Hz output data rate.
    Hz25 = 0b1000,
    /// 50 Hz output data rate.
    Hz50 = 0b1001,
    /// 100 Hz output data rate.
    Hz100 = 0b1010,
    /// 200 Hz output data rate.
    Hz200 = 0b1011,
    /// 400 Hz output data rate.
    Hz400 = 0b1100,
    /// 800 Hz output data rate.
    Hz800 = 0b1101,
    /// 1600 Hz output data rate.
    Hz1600 = 0b1110,
    /// 3200 Hz output data rate.
    Hz3200 = 0b1111,
}

impl OutputDataRate {
    /// Returns the ODR in millihertz.
    pub const fn millihertz(self) -> u32 {
        match self {
            Self::Hz6_25 => 6_250,
            Self::Hz12_5 => 12_500,
            Self::Hz25 => 25_000,
            Self::Hz50 => 50_000,
            Self::Hz100 => 100_000,
            Self::Hz200 => 200_000,
            Self::Hz400 => 400_000,
            Self::Hz800 => 800_000,
            Self::Hz1600 => 1_600_000,
            Self::Hz3200 => 3_200_000,
        }
    }

    /// Returns `true` when reduced-power operation is available at this rate.
    pub const fn supports_low_power(self) -> bool {
        matches!(
            self,
            Self::Hz12_5 | Self::Hz25 | Self::Hz50 | Self::Hz100 | Self::Hz200 | Self::Hz400
        )
    }
}

/// Reduced power operation bit (`BW_RATE.LOW_POWER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum LowPower {
    /// Normal operation.
    Disabled = 0,
    /// Reduced power operation with somewhat higher noise.
    Enabled = 1,
}

/// Activity/inactivity coupling bits (`ACT_INACT_CTL.ACT_AC`/`INACT_AC`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
#[bits = 1]
pub enum Coupling {
    /// Thresholds compare against the absolute acceleration.
    Dc = 0,
    /// Thresholds compare against the change from a reference sample.
    Ac = 1,
}

/// Accelerometer axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

/// Interrupt events reported in `INT_SOURCE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptKind {
    /// Acceleration above the activity threshold.
    Activity,
    /// Acceleration below the inactivity threshold for the inactivity time.
    Inactivity,
    /// All axes below the free-fall threshold for the free-fall time.
    FreeFall,
    /// A single shock event.
    SingleTap,
    /// Two shock events inside the window.
    DoubleTap,
    /// New data is available.
    DataReady,
}

impl InterruptKind {
    /// Bit mask of this event in `INT_ENABLE`, `INT_MAP` and `INT_SOURCE`.
    pub const fn mask(self) -> u8 {
        match self {
            Self::DataReady => 0x80,
            Self::SingleTap => 0x40,
            Self::DoubleTap => 0x20,
            Self::Activity => 0x10,
            Self::Inactivity => 0x08,
            Self::FreeFall => 0x04,
        }
    }
}
