//! BMP280 calibration coefficients and compensation formulas.
//!
//! The 24 factory-trimmed bytes at `0x88..=0x9F` are twelve little-endian
//! words (Bosch BST-BMP280-DS001, §3.11.2). Temperature is compensated with
//! the fixed-point formula of §3.11.3 and pressure with the double precision
//! formula of §8.1. The temperature step yields the fine temperature that the
//! pressure step requires, so both are exposed as separate explicit steps.

use crate::baro::registers::CALIB_LEN;

/// Factory-trimmed calibration coefficients.
///
/// The default table is all zeros, which makes every compensation return 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationTable {
    /// `dig_T1`, unsigned, registers `0x88`/`0x89`.
    pub dig_t1: u16,
    /// `dig_T2`, signed, registers `0x8A`/`0x8B`.
    pub dig_t2: i16,
    /// `dig_T3`, signed, registers `0x8C`/`0x8D`.
    pub dig_t3: i16,
    /// `dig_P1`, unsigned, registers `0x8E`/`0x8F`.
    pub dig_p1: u16,
    /// `dig_P2`, signed, registers `0x90`/`0x91`.
    pub dig_p2: i16,
    /// `dig_P3`, signed, registers `0x92`/`0x93`.
    pub dig_p3: i16,
    /// `dig_P4`, signed, registers `0x94`/`0x95`.
    pub dig_p4: i16,
    /// `dig_P5`, signed, registers `0x96`/`0x97`.
    pub dig_p5: i16,
    /// `dig_P6`, signed, registers `0x98`/`0x99`.
    pub dig_p6: i16,
    /// `dig_P7`, signed, registers `0x9A`/`0x9B`.
    pub dig_p7: i16,
    /// `dig_P8`, signed, registers `0x9C`/`0x9D`.
    pub dig_p8: i16,
    /// `dig_P9`, signed, registers `0x9E`/`0x9F`.
    pub dig_p9: i16,
}

/// Fine-resolution temperature carried from temperature into pressure compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FineTemperature(pub i32);

/// Result of temperature compensation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CompensatedTemperature {
    /// Temperature in hundredths of a degree Celsius (2508 = 25.08 °C).
    pub centi_celsius: i32,
    /// Input for [`CalibrationTable::compensate_pressure`].
    pub fine: FineTemperature,
}

impl CompensatedTemperature {
    /// Temperature in degrees Celsius.
    pub fn celsius(&self) -> f64 {
        f64::from(self.centi_celsius) / 100.0
    }
}

impl CalibrationTable {
    /// Interprets the raw calibration block.
    pub fn from_bytes(raw: &[u8; CALIB_LEN]) -> Self {
        let unsigned = |index: usize| u16::from_le_bytes([raw[index], raw[index + 1]]);
        let signed = |index: usize| i16::from_le_bytes([raw[index], raw[index + 1]]);

        Self {
            dig_t1: unsigned(0),
            dig_t2: signed(2),
            dig_t3: signed(4),
            dig_p1: unsigned(6),
            dig_p2: signed(8),
            dig_p3: signed(10),
            dig_p4: signed(12),
            dig_p5: signed(14),
            dig_p6: signed(16),
            dig_p7: signed(18),
            dig_p8: signed(20),
            dig_p9: signed(22),
        }
    }

    /// Returns `true` when no coefficients have been loaded.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Compensates a raw 20-bit temperature code.
    pub fn compensate_temperature(&self, adc_t: u32) -> CompensatedTemperature {
        let adc_t = i64::from(adc_t);
        let t1 = i64::from(self.dig_t1);
        let t2 = i64::from(self.dig_t2);
        let t3 = i64::from(self.dig_t3);

        let var1 = (((adc_t >> 3) - (t1 << 1)) * t2) >> 11;
        let delta = (adc_t >> 4) - t1;
        let var2 = (((delta * delta) >> 12) * t3) >> 14;

        let t_fine = var1 + var2;
        let centi_celsius = (t_fine * 5 + 128) >> 8;

        CompensatedTemperature {
            centi_celsius: centi_celsius as i32,
            fine: FineTemperature(t_fine as i32),
        }
    }

    /// Compensates a raw 20-bit pressure code into pascals.
    ///
    /// `fine` must come from the temperature code of the same sample. Returns
    /// `0.0` when the coefficients make the divisor vanish.
    pub fn compensate_pressure(&self, adc_p: u32, fine: FineTemperature) -> f64 {
        let p1 = f64::from(self.dig_p1);
        let p2 = f64::from(self.dig_p2);
        let p3 = f64::from(self.dig_p3);
        let p4 = f64::from(self.dig_p4);
        let p5 = f64::from(self.dig_p5);
        let p6 = f64::from(self.dig_p6);
        let p7 = f64::from(self.dig_p7);
        let p8 = f64::from(self.dig_p8);
        let p9 = f64::from(self.dig_p9);

        let mut var1 = f64::from(fine.0) / 2.0 - 64_000.0;
        let mut var2 = var1 * var1 * p6 / 32_768.0;
        var2 += var1 * p5 * 2.0;
        var2 = var2 / 4.0 + p4 * 65_536.0;
        var1 = (p3 * var1 * var1 / 524_288.0 + p2 * var1) / 524_288.0;
        var1 = (1.0 + var1 / 32_768.0) * p1;

        if var1 == 0.0 {
            return 0.0;
        }

        let mut p = 1_048_576.0 - f64::from(adc_p);
        p = (p - var2 / 4_096.0) * 6_250.0 / var1;
        var1 = p9 * p * p / 2_147_483_648.0;
        var2 = p * p8 / 32_768.0;
        p + (var1 + var2 + p7) / 16.0
    }
}
