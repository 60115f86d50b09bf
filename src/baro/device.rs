//! High-level BMP280 device driver implementation.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::baro::calibration::CalibrationTable;
use crate::baro::config::Config;
use crate::baro::params::{max_conversion_ms, PowerMode};
use crate::baro::registers::{
    unpack_adc,
    Status,
    ADDR_ALTERNATE,
    ADDR_PRIMARY,
    CALIB_LEN,
    EXPECTED_CHIP_ID,
    REG_CALIB_START,
    REG_CHIP_ID,
    REG_PRESS_MSB,
    REG_RESET,
    REG_TEMP_MSB,
    RESET_COMMAND,
    SAMPLE_LEN,
};
use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::BusInterface;
use crate::log;
use crate::probe::{probe, Detection, DeviceHandle};
use crate::registers::{Register, RegisterAccess};
use crate::units::{self, PressureUnit, TemperatureUnit};

// Extra STATUS polls granted beyond the datasheet conversion time.
const CONVERSION_MARGIN_MS: u32 = 3;
// Power-on time after a soft reset (datasheet t_startup).
const STARTUP_MS: u32 = 2;

/// Raw 20-bit conversion codes taken from one burst read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// Uncompensated temperature code.
    pub temperature: u32,
    /// Uncompensated pressure code.
    pub pressure: u32,
}

/// Compensated temperature and pressure from the same sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Temperature in degrees Celsius, 0.01 °C resolution.
    pub temperature_c: f64,
    /// Pressure in pascals, unrounded.
    pub pressure_pa: f64,
}

/// High-level synchronous driver for the BMP280 barometer.
///
/// Detection, calibration load and configuration happen lazily on the first
/// call that needs the device. While no device answers, measurement calls
/// return `0.0`.
pub struct Bmp280<IFACE, D> {
    interface: IFACE,
    delay: D,
    config: Config,
    handle: Option<DeviceHandle>,
    calibration: CalibrationTable,
}

impl<IFACE, D> Bmp280<IFACE, D> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, delay: D, config: Config) -> Self {
        Self {
            interface,
            delay,
            config,
            handle: None,
            calibration: CalibrationTable::default(),
        }
    }

    /// Consumes the driver and returns the owned interface and delay.
    pub fn release(self) -> (IFACE, D) {
        (self.interface, self.delay)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the resolved device location once initialized.
    pub fn handle(&self) -> Option<DeviceHandle> {
        self.handle
    }

    /// Returns the loaded calibration table, all zeros before initialization.
    pub fn calibration(&self) -> &CalibrationTable {
        &self.calibration
    }

    /// Returns `true` once the device has been detected and configured.
    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }
}

impl<I2C, D> Bmp280<I2cInterface<I2C>, D>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, delay: D, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c), delay, config)
    }

    /// Releases the driver, returning the I2C bus and delay provider.
    pub fn release_i2c(self) -> (I2C, D) {
        let (iface, delay) = self.release();
        (iface.release(), delay)
    }
}

impl<IFACE, D, CommE> Bmp280<IFACE, D>
where
    IFACE: BusInterface<Error = CommE>,
    D: DelayNs,
{
    // ==================================================================
    // == Detection & Initialization ====================================
    // ==================================================================
    /// Probes the primary then the alternate address for the BMP280 identity.
    pub fn detect(&mut self) -> Detection<CommE> {
        probe(
            &mut self.interface,
            &[ADDR_PRIMARY, ADDR_ALTERNATE],
            REG_CHIP_ID,
            EXPECTED_CHIP_ID,
        )
    }

    /// Detects, calibrates and configures the device unless that already happened.
    ///
    /// Returns `Ok(false)` when no BMP280 answers on either address.
    pub fn init(&mut self) -> Result<bool, CommE> {
        Ok(self.address()?.is_some())
    }

    /// Issues a soft reset and forgets the initialization state.
    ///
    /// The next measurement call detects, calibrates and configures the
    /// device again.
    pub fn reset(&mut self) -> Result<(), CommE> {
        let address = match self.handle {
            Some(handle) => handle.address(),
            None => match self.detect() {
                Detection::Found(address) => address,
                Detection::NotFound => return Ok(()),
                Detection::BusError(err) => return Err(Error::Interface(err)),
            },
        };

        self.interface
            .write_register(address, REG_RESET, RESET_COMMAND)?;
        self.handle = None;
        self.calibration = CalibrationTable::default();
        self.delay.delay_ms(STARTUP_MS);

        log::debug!("BMP280 at {=u8:#x} reset", address);
        Ok(())
    }

    /// Lazily initializes and returns the device address, if present.
    fn address(&mut self) -> Result<Option<u8>, CommE> {
        if let Some(handle) = self.handle {
            return Ok(Some(handle.address()));
        }

        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        match self.detect() {
            Detection::Found(address) => {
                self.calibration = self.read_calibration(address)?;
                self.configure_device(address)?;
                self.handle = Some(DeviceHandle::new(address));
                log::info!("BMP280 ready at {=u8:#x}", address);
                Ok(Some(address))
            }
            Detection::NotFound => {
                log::debug!("BMP280 not found");
                Ok(None)
            }
            Detection::BusError(err) => Err(Error::Interface(err)),
        }
    }

    fn read_calibration(&mut self, address: u8) -> Result<CalibrationTable, CommE> {
        let mut raw = [0u8; CALIB_LEN];
        self.interface
            .read_many(address, REG_CALIB_START, &mut raw)?;

        let calibration = CalibrationTable::from_bytes(&raw);
        log::trace!("BMP280 calibration loaded, dig_T1 = {=u16}", calibration.dig_t1);
        Ok(calibration)
    }

    /// Programs oversampling, mode, standby and filter, then waits for settling.
    fn configure_device(&mut self, address: u8) -> Result<(), CommE> {
        self.write_reg(address, self.config.ctrl_meas())?;
        self.write_reg(address, self.config.config_register())?;

        self.delay.delay_ms(self.config.settle_ms);
        Ok(())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads the raw temperature code.
    ///
    /// Returns `0` when no device is present.
    pub fn read_raw_temperature(&mut self) -> Result<u32, CommE> {
        let Some(address) = self.address()? else {
            return Ok(0);
        };
        self.start_conversion(address)?;

        let mut raw = [0u8; 3];
        self.interface.read_many(address, REG_TEMP_MSB, &mut raw)?;
        Ok(unpack_adc(raw[0], raw[1], raw[2]))
    }

    /// Reads pressure and temperature codes of one sample in a single burst.
    ///
    /// Returns a zeroed sample when no device is present.
    pub fn read_raw_sample(&mut self) -> Result<RawSample, CommE> {
        let Some(address) = self.address()? else {
            return Ok(RawSample::default());
        };
        self.start_conversion(address)?;

        let mut raw = [0u8; SAMPLE_LEN];
        self.interface.read_many(address, REG_PRESS_MSB, &mut raw)?;

        Ok(RawSample {
            pressure: unpack_adc(raw[0], raw[1], raw[2]),
            temperature: unpack_adc(raw[3], raw[4], raw[5]),
        })
    }

    /// Reads and compensates temperature and pressure of one sample.
    pub fn measure(&mut self) -> Result<Measurement, CommE> {
        if self.address()?.is_none() {
            return Ok(Measurement::default());
        }

        let sample = self.read_raw_sample()?;
        let temperature = self.calibration.compensate_temperature(sample.temperature);
        let pressure_pa = self
            .calibration
            .compensate_pressure(sample.pressure, temperature.fine);

        Ok(Measurement {
            temperature_c: temperature.celsius(),
            pressure_pa,
        })
    }

    /// Reads the temperature in `unit`, rounded to 0.1.
    pub fn temperature(&mut self, unit: TemperatureUnit) -> Result<f64, CommE> {
        if self.address()?.is_none() {
            return Ok(0.0);
        }

        let raw = self.read_raw_temperature()?;
        let celsius = self.calibration.compensate_temperature(raw).celsius();
        Ok(units::round_tenths(unit.from_celsius(celsius)))
    }

    /// Reads the pressure in `unit`.
    ///
    /// Pascals are reported unrounded, hectopascals to 0.1 hPa.
    pub fn pressure(&mut self, unit: PressureUnit) -> Result<f64, CommE> {
        let pressure_pa = self.measure()?.pressure_pa;
        Ok(match unit {
            PressureUnit::Pascal => pressure_pa,
            PressureUnit::Hectopascal => units::round_tenths(pressure_pa / 100.0),
        })
    }

    /// Barometric altitude in metres against `sea_level_pa`, rounded to 0.1.
    ///
    /// Use [`units::SEA_LEVEL_PA`] when no local reference is known.
    pub fn altitude(&mut self, sea_level_pa: f64) -> Result<f64, CommE> {
        if !sea_level_pa.is_finite() || sea_level_pa <= 0.0 {
            log::warn!("sea-level reference must be a positive pressure");
            return Err(Error::InvalidArgument);
        }

        if self.address()?.is_none() {
            return Ok(0.0);
        }

        let pressure_pa = self.pressure(PressureUnit::Pascal)?;
        Ok(units::round_tenths(units::altitude_m(pressure_pa, sea_level_pa)))
    }

    /// Reads `STATUS`, idle when no device is present.
    pub fn status(&mut self) -> Result<Status, CommE> {
        let Some(address) = self.address()? else {
            return Ok(Status::new());
        };

        self.read_reg::<Status>(address)
    }

    // ==================================================================
    // == Internal Register Helpers =====================================
    // ==================================================================
    /// Triggers a forced conversion and waits for it; no-op in normal mode.
    fn start_conversion(&mut self, address: u8) -> Result<(), CommE> {
        if self.config.mode != PowerMode::Forced {
            return Ok(());
        }

        self.write_reg(address, self.config.ctrl_meas())?;

        let budget = max_conversion_ms(
            self.config.temperature_oversampling,
            self.config.pressure_oversampling,
        ) + CONVERSION_MARGIN_MS;

        for _ in 0..budget {
            if !self.read_reg::<Status>(address)?.measuring() {
                return Ok(());
            }
            self.delay.delay_ms(1);
        }

        log::warn!("BMP280 conversion still running after {=u32} polls", budget);
        Err(Error::Timeout)
    }

    fn read_reg<R: Register>(&mut self, address: u8) -> Result<R, CommE> {
        debug_assert!(R::ACCESS != RegisterAccess::WriteOnly);
        let raw = self.interface.read_register(address, R::ADDRESS)?;
        Ok(R::from(raw))
    }

    fn write_reg<R: Register>(&mut self, address: u8, value: R) -> Result<(), CommE> {
        debug_assert!(R::ACCESS != RegisterAccess::ReadOnly);
        self.interface
            .write_register(address, R::ADDRESS, value.into())
            .map_err(Error::from)
    }
}
