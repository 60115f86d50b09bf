//! ADXL375 ±200 g three-axis accelerometer.

pub mod config;
pub mod device;
pub mod params;
pub mod registers;

pub use config::{Config, ConfigBuilder, ConfigError};
pub use device::Adxl375;
pub use params::{Axis, InterruptKind};
pub use registers::InterruptSource;
