//! Bus interface abstraction shared by the ADXL375 and BMP280 drivers.

pub mod i2c;

/// Abstraction over the low-level register access required by the drivers.
///
/// Every operation is addressed by a 7-bit device address so a single
/// transport can serve several peripherals.
pub trait BusInterface {
    /// Error type produced by the concrete bus implementation.
    type Error: embedded_hal::i2c::Error;

    /// Writes a single register.
    fn write_register(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, address: u8, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads multiple consecutive registers into the provided buffer.
    fn read_many(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> core::result::Result<(), Self::Error>;

    /// Reads a little-endian two's complement word starting at `register`.
    fn read_word_le(
        &mut self,
        address: u8,
        register: u8,
    ) -> core::result::Result<i16, Self::Error> {
        let mut raw = [0u8; 2];
        self.read_many(address, register, &mut raw)?;
        Ok(i16::from_le_bytes(raw))
    }

    /// Reads a little-endian unsigned word starting at `register`.
    fn read_uword_le(
        &mut self,
        address: u8,
        register: u8,
    ) -> core::result::Result<u16, Self::Error> {
        let mut raw = [0u8; 2];
        self.read_many(address, register, &mut raw)?;
        Ok(u16::from_le_bytes(raw))
    }
}
