//! Physical units, scale factors and rounding shared by both drivers.

/// ADXL375 output scale in milli-g per count.
pub const MG_PER_COUNT: f64 = 49.0;
/// Standard gravity in m/s² per g.
pub const STANDARD_GRAVITY: f64 = 9.80665;
/// Free-fall time register resolution in milliseconds per count.
pub const FREE_FALL_MS_PER_COUNT: f64 = 5.0;
/// Typical sea-level pressure in pascals.
pub const SEA_LEVEL_PA: f64 = 101_325.0;

const ALTITUDE_SCALE_M: f64 = 44_330.0;
const BAROMETRIC_EXPONENT: f64 = 1.0 / 5.255;

/// Output unit for acceleration readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AccelUnit {
    /// Standard gravities.
    #[default]
    G,
    /// Metres per second squared.
    MetersPerSecondSquared,
}

impl AccelUnit {
    /// Converts raw ADXL375 counts into this unit without rounding.
    pub fn from_counts(self, counts: f64) -> f64 {
        let g = g_from_counts(counts);
        match self {
            Self::G => g,
            Self::MetersPerSecondSquared => g * STANDARD_GRAVITY,
        }
    }
}

/// Output unit for temperature readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureUnit {
    /// Converts a Celsius value into this unit without rounding.
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

/// Output unit for pressure readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressureUnit {
    /// Pascals, reported unrounded.
    #[default]
    Pascal,
    /// Hectopascals, reported to 0.1 hPa.
    Hectopascal,
}

/// Converts raw ADXL375 counts into g.
pub fn g_from_counts(counts: f64) -> f64 {
    counts * MG_PER_COUNT / 1000.0
}

/// Converts a threshold in g into 49 mg register counts, truncating.
///
/// Returns `None` when the value is negative, not finite or exceeds one byte.
pub fn counts_from_g(threshold_g: f64) -> Option<u8> {
    to_register(threshold_g * 1000.0 / MG_PER_COUNT)
}

/// Converts a free-fall time in milliseconds into 5 ms register counts.
pub fn free_fall_counts_from_ms(time_ms: f64) -> Option<u8> {
    to_register(time_ms / FREE_FALL_MS_PER_COUNT)
}

fn to_register(scaled: f64) -> Option<u8> {
    if !scaled.is_finite() || scaled < 0.0 {
        return None;
    }

    let counts = libm::floor(scaled);
    if counts > f64::from(u8::MAX) {
        return None;
    }

    Some(counts as u8)
}

/// Rounds to `decimals` places, with halves rounded away from zero.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = libm::pow(10.0, f64::from(decimals));
    libm::round(value * scale) / scale
}

/// Rounds to 0.01, the resolution of acceleration readings.
pub fn round_hundredths(value: f64) -> f64 {
    round_to(value, 2)
}

/// Rounds to 0.1, the resolution of temperature, hPa and altitude readings.
pub fn round_tenths(value: f64) -> f64 {
    round_to(value, 1)
}

/// Barometric altitude in metres for `pressure_pa` against `sea_level_pa`.
pub fn altitude_m(pressure_pa: f64, sea_level_pa: f64) -> f64 {
    ALTITUDE_SCALE_M * (1.0 - libm::pow(pressure_pa / sea_level_pa, BAROMETRIC_EXPONENT))
}
