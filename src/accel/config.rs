//! Configuration primitives for the ADXL375 driver.

use crate::accel::params::{Coupling, LowPower, OutputDataRate};

/// User-facing configuration for the ADXL375 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Output data rate selection.
    pub odr: OutputDataRate,
    /// Reduced power operation.
    pub low_power: LowPower,
    /// Coupling used by activity and inactivity detection.
    pub activity_coupling: Coupling,
    /// Wait after enabling measurement before the first read, in milliseconds.
    pub settle_ms: u32,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.low_power == LowPower::Enabled && !self.odr.supports_low_power() {
            return Err(ConfigError::LowPowerRateUnsupported);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the output data rate.
    pub fn odr(mut self, odr: OutputDataRate) -> Self {
        self.config.odr = odr;
        self
    }

    /// Selects reduced power operation.
    pub fn low_power(mut self, low_power: LowPower) -> Self {
        self.config.low_power = low_power;
        self
    }

    /// Selects AC or DC coupled activity detection.
    pub fn activity_coupling(mut self, coupling: Coupling) -> Self {
        self.config.activity_coupling = coupling;
        self
    }

    /// Overrides the post-configuration settle delay.
    pub fn settle_ms(mut self, settle_ms: u32) -> Self {
        self.config.settle_ms = settle_ms;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            odr: OutputDataRate::Hz100,
            low_power: LowPower::Disabled,
            activity_coupling: Coupling::Dc,
            settle_ms: 10,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Reduced power operation is only specified between 12.5 Hz and 400 Hz.
    LowPowerRateUnsupported,
}
