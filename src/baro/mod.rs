//! BMP280 barometric pressure and temperature sensor.

pub mod calibration;
pub mod config;
pub mod device;
pub mod params;
pub mod registers;

pub use calibration::{CalibrationTable, CompensatedTemperature, FineTemperature};
pub use config::{Config, ConfigBuilder, ConfigError};
pub use device::{Bmp280, Measurement, RawSample};
pub use params::{Filter, Oversampling, PowerMode, StandbyTime};
pub use registers::Status;
