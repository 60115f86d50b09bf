//! Configuration primitives for the BMP280 driver.

use crate::baro::params::{Filter, Oversampling, PowerMode, StandbyTime};
use crate::baro::registers::{ConfigRegister, CtrlMeas};

/// User-facing configuration for the BMP280 sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Temperature oversampling.
    pub temperature_oversampling: Oversampling,
    /// Pressure oversampling.
    pub pressure_oversampling: Oversampling,
    /// Normal (continuous) or forced (on demand) conversions.
    pub mode: PowerMode,
    /// Normal-mode standby time between conversions.
    pub standby: StandbyTime,
    /// IIR filter coefficient.
    pub filter: Filter,
    /// Wait after configuration before the first read, in milliseconds.
    pub settle_ms: u32,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration can produce measurements.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.temperature_oversampling == Oversampling::Skipped {
            return Err(ConfigError::TemperatureSkipped);
        }

        if self.pressure_oversampling == Oversampling::Skipped {
            return Err(ConfigError::PressureSkipped);
        }

        if self.mode == PowerMode::Sleep {
            return Err(ConfigError::SleepMode);
        }

        Ok(())
    }

    /// Encodes the `CTRL_MEAS` register for this configuration.
    pub fn ctrl_meas(&self) -> CtrlMeas {
        CtrlMeas::new()
            .with_mode(self.mode)
            .with_osrs_p(self.pressure_oversampling)
            .with_osrs_t(self.temperature_oversampling)
    }

    /// Encodes the `CONFIG` register for this configuration.
    pub fn config_register(&self) -> ConfigRegister {
        ConfigRegister::new()
            .with_t_sb(self.standby)
            .with_filter(self.filter)
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

    /// Overrides the temperature oversampling.
    pub fn temperature_oversampling(mut self, oversampling: Oversampling) -> Self {
        self.config.temperature_oversampling = oversampling;
        self
    }

    /// Overrides the pressure oversampling.
    pub fn pressure_oversampling(mut self, oversampling: Oversampling) -> Self {
        self.config.pressure_oversampling = oversampling;
        self
    }

    /// Overrides the power mode.
    pub fn mode(mut self, mode: PowerMode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Overrides the normal-mode standby time.
    pub fn standby(mut self, standby: StandbyTime) -> Self {
        self.config.standby = standby;
        self
    }

    /// Overrides the IIR filter coefficient.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.config.filter = filter;
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
            temperature_oversampling: Oversampling::X2,
            pressure_oversampling: Oversampling::X16,
            mode: PowerMode::Normal,
            standby: StandbyTime::Ms1000,
            filter: Filter::Off,
            settle_ms: 10,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Temperature is required for every compensation.
    TemperatureSkipped,
    /// Pressure conversions are disabled.
    PressureSkipped,
    /// Sleep mode never converts.
    SleepMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_encodes_reference_registers() {
        let config = Config::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(u8::from(config.ctrl_meas()), 0x57);
        assert_eq!(u8::from(config.config_register()), 0xA0);
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::new()
            .mode(PowerMode::Forced)
            .filter(Filter::X4)
            .standby(StandbyTime::Ms125)
            .temperature_oversampling(Oversampling::X1)
            .pressure_oversampling(Oversampling::X4)
            .settle_ms(0)
            .build();

        assert_eq!(u8::from(config.ctrl_meas()), 0b001_011_01);
        assert_eq!(u8::from(config.config_register()), 0b010_010_00);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn rejects_configurations_without_samples() {
        let skipped_t = Config::new().temperature_oversampling(Oversampling::Skipped).build();
        assert_eq!(skipped_t.validate(), Err(ConfigError::TemperatureSkipped));

        let skipped_p = Config::new().pressure_oversampling(Oversampling::Skipped).build();
        assert_eq!(skipped_p.validate(), Err(ConfigError::PressureSkipped));

        let sleeping = Config::new().mode(PowerMode::Sleep).build();
        assert_eq!(sleeping.validate(), Err(ConfigError::SleepMode));
    }
}
