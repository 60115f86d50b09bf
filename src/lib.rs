#![cfg_attr(not(test), no_std)]

mod error;
mod log;

pub mod accel;
pub mod baro;
pub mod interface;
pub mod probe;
pub mod registers;
pub mod units;

pub use crate::accel::Adxl375;
pub use crate::baro::Bmp280;
pub use crate::error::{Error, Result};
pub use crate::probe::{Detection, DeviceHandle};
pub use crate::units::{AccelUnit, PressureUnit, TemperatureUnit};
