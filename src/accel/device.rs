//! High-level ADXL375 device driver implementation.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::accel::config::Config;
use crate::accel::params::{Axis, InterruptKind};
use crate::accel::registers::{
    self,
    ActInactControl,
    BwRate,
    DataFormat,
    InterruptEnable,
    InterruptSource,
    PowerControl,
    ShockAxes,
    ADDR_ALTERNATE,
    ADDR_PRIMARY,
    EXPECTED_DEVID,
    RANGE_200G,
    REG_DATAX0,
    REG_DEVID,
    REG_DUR,
    REG_LATENT,
    REG_THRESH_ACT,
    REG_THRESH_FF,
    REG_THRESH_INACT,
    REG_THRESH_SHOCK,
    REG_TIME_FF,
    REG_TIME_INACT,
    REG_WINDOW,
    TAP_DURATION,
    TAP_LATENCY,
    TAP_WINDOW,
};
use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::BusInterface;
use crate::log;
use crate::probe::{probe, Detection, DeviceHandle};
use crate::registers::{Register, RegisterAccess};
use crate::units::{self, AccelUnit};

// Number of consecutive bytes spanning X, Y, Z axis samples.
const RAW_AXIS_BYTES: usize = 6;

/// High-level synchronous driver for the ADXL375 accelerometer.
///
/// The device is detected and configured lazily by the first call that needs
/// it. While no device answers, measurement calls return neutral values.
pub struct Adxl375<IFACE, D> {
    interface: IFACE,
    delay: D,
    config: Config,
    handle: Option<DeviceHandle>,
}

impl<IFACE, D> Adxl375<IFACE, D> {
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

    /// Returns `true` once the device has been detected and configured.
    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }
}

impl<I2C, D> Adxl375<I2cInterface<I2C>, D>
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

impl<IFACE, D, CommE> Adxl375<IFACE, D>
where
    IFACE: BusInterface<Error = CommE>,
    D: DelayNs,
{
    // ==================================================================
    // == Detection & Initialization ====================================
    // ==================================================================
    /// Probes the primary then the alternate address for the ADXL375 identity.
    pub fn detect(&mut self) -> Detection<CommE> {
        probe(
            &mut self.interface,
            &[ADDR_PRIMARY, ADDR_ALTERNATE],
            REG_DEVID,
            EXPECTED_DEVID,
        )
    }

    /// Detects and configures the device unless that already happened.
    ///
    /// Returns `Ok(false)` when no ADXL375 answers on either address.
    pub fn init(&mut self) -> Result<bool, CommE> {
        Ok(self.address()?.is_some())
    }

    /// Lazily initializes and returns the device address, if present.
    fn address(&mut self) -> Result<Option<u8>, CommE> {
        if let Some(handle) = self.handle {
            return Ok(Some(handle.address()));
        }

        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        match self.detect() {
            Detection::Found(address) => {
                self.configure_device(address)?;
                self.handle = Some(DeviceHandle::new(address));
                log::info!("ADXL375 ready at {=u8:#x}", address);
                Ok(Some(address))
            }
            Detection::NotFound => {
                log::debug!("ADXL375 not found");
                Ok(None)
            }
            Detection::BusError(err) => Err(Error::Interface(err)),
        }
    }

    /// Programs data format, rate and power mode, then waits for settling.
    fn configure_device(&mut self, address: u8) -> Result<(), CommE> {
        let format = DataFormat::new().with_range(RANGE_200G).with_full_res(true);
        self.write_reg(address, format)?;

        let rate = BwRate::new()
            .with_rate(self.config.odr)
            .with_low_power(self.config.low_power);
        self.write_reg(address, rate)?;

        self.write_reg(address, PowerControl::new().with_measure(true))?;

        self.delay.delay_ms(self.config.settle_ms);
        Ok(())
    }

    // ==================================================================
    // == Data Acquisition ==============================================
    // ==================================================================
    /// Reads a raw acceleration triplet in 49 mg counts.
    ///
    /// Returns `[0, 0, 0]` when no device is present.
    pub fn read_xyz_raw(&mut self) -> Result<[i16; 3], CommE> {
        let Some(address) = self.address()? else {
            return Ok([0; 3]);
        };

        let mut raw = [0u8; RAW_AXIS_BYTES];
        self.interface.read_many(address, REG_DATAX0, &mut raw)?;

        let x = i16::from_le_bytes([raw[0], raw[1]]);
        let y = i16::from_le_bytes([raw[2], raw[3]]);
        let z = i16::from_le_bytes([raw[4], raw[5]]);

        Ok([x, y, z])
    }

    /// Reads a single raw axis in 49 mg counts.
    pub fn read_axis_raw(&mut self, axis: Axis) -> Result<i16, CommE> {
        let Some(address) = self.address()? else {
            return Ok(0);
        };

        let raw = self
            .interface
            .read_word_le(address, registers::data_register(axis))?;
        Ok(raw)
    }

    /// Reads one axis in `unit`, rounded to 0.01.
    pub fn acceleration(&mut self, axis: Axis, unit: AccelUnit) -> Result<f64, CommE> {
        let raw = self.read_axis_raw(axis)?;
        Ok(units::round_hundredths(unit.from_counts(f64::from(raw))))
    }

    /// Reads the X axis in `unit`, rounded to 0.01.
    pub fn x(&mut self, unit: AccelUnit) -> Result<f64, CommE> {
        self.acceleration(Axis::X, unit)
    }

    /// Reads the Y axis in `unit`, rounded to 0.01.
    pub fn y(&mut self, unit: AccelUnit) -> Result<f64, CommE> {
        self.acceleration(Axis::Y, unit)
    }

    /// Reads the Z axis in `unit`, rounded to 0.01.
    pub fn z(&mut self, unit: AccelUnit) -> Result<f64, CommE> {
        self.acceleration(Axis::Z, unit)
    }

    /// Reads the magnitude of the acceleration vector in `unit`, rounded to 0.01.
    pub fn total(&mut self, unit: AccelUnit) -> Result<f64, CommE> {
        let [x, y, z] = self.read_xyz_raw()?.map(f64::from);
        let magnitude = libm::sqrt(x * x + y * y + z * z);
        Ok(units::round_hundredths(unit.from_counts(magnitude)))
    }

    // ==================================================================
    // == Debug Registers ===============================================
    // ==================================================================
    /// Raw Z axis count.
    pub fn raw_z(&mut self) -> Result<i16, CommE> {
        self.read_axis_raw(Axis::Z)
    }

    /// Raw `DATA_FORMAT` byte, `0` when no device is present.
    pub fn data_format_register(&mut self) -> Result<u8, CommE> {
        let Some(address) = self.address()? else {
            return Ok(0);
        };
        Ok(self.read_reg::<DataFormat>(address)?.into())
    }

    /// Raw `POWER_CTL` byte, `0` when no device is present.
    pub fn power_ctl_register(&mut self) -> Result<u8, CommE> {
        let Some(address) = self.address()? else {
            return Ok(0);
        };
        Ok(self.read_reg::<PowerControl>(address)?.into())
    }

    /// Signed offset trim of `axis` in counts, `0` when no device is present.
    pub fn offset_register(&mut self, axis: Axis) -> Result<i8, CommE> {
        let Some(address) = self.address()? else {
            return Ok(0);
        };

        let raw = self
            .interface
            .read_register(address, registers::offset_register(axis))?;
        Ok(raw as i8)
    }

    // ==================================================================
    // == Motion Events =================================================
    // ==================================================================
    /// Enables activity detection above `threshold_g` on all axes.
    pub fn enable_activity_detection(&mut self, threshold_g: f64) -> Result<(), CommE> {
        let threshold = Self::threshold_counts(threshold_g)?;
        let Some(address) = self.address()? else {
            return Ok(());
        };

        self.interface
            .write_register(address, REG_THRESH_ACT, threshold)?;
        self.write_reg(address, ActInactControl::all_axes(self.config.activity_coupling))?;
        self.enable_interrupt(address, InterruptKind::Activity)
    }

    /// Enables inactivity detection below `threshold_g` lasting `time_s` seconds.
    pub fn enable_inactivity_detection(
        &mut self,
        threshold_g: f64,
        time_s: u8,
    ) -> Result<(), CommE> {
        let threshold = Self::threshold_counts(threshold_g)?;
        let Some(address) = self.address()? else {
            return Ok(());
        };

        self.interface
            .write_register(address, REG_THRESH_INACT, threshold)?;
        self.interface
            .write_register(address, REG_TIME_INACT, time_s)?;
        self.write_reg(address, ActInactControl::all_axes(self.config.activity_coupling))?;
        self.enable_interrupt(address, InterruptKind::Inactivity)
    }

    /// Enables free-fall detection below `threshold_g` lasting `time_ms`.
    ///
    /// The time is truncated to the 5 ms register resolution.
    pub fn enable_free_fall_detection(
        &mut self,
        threshold_g: f64,
        time_ms: u16,
    ) -> Result<(), CommE> {
        let threshold = Self::threshold_counts(threshold_g)?;
        let Some(time) = units::free_fall_counts_from_ms(f64::from(time_ms)) else {
            log::warn!("free-fall time out of range");
            return Err(Error::InvalidArgument);
        };
        let Some(address) = self.address()? else {
            return Ok(());
        };

        self.interface
            .write_register(address, REG_THRESH_FF, threshold)?;
        self.interface.write_register(address, REG_TIME_FF, time)?;
        self.enable_interrupt(address, InterruptKind::FreeFall)
    }

    /// Enables single and double shock detection above `threshold_g`.
    pub fn enable_tap_detection(&mut self, threshold_g: f64) -> Result<(), CommE> {
        let threshold = Self::threshold_counts(threshold_g)?;
        let Some(address) = self.address()? else {
            return Ok(());
        };

        self.interface
            .write_register(address, REG_THRESH_SHOCK, threshold)?;
        self.interface.write_register(address, REG_DUR, TAP_DURATION)?;
        self.interface.write_register(address, REG_LATENT, TAP_LATENCY)?;
        self.interface.write_register(address, REG_WINDOW, TAP_WINDOW)?;
        self.write_reg(address, ShockAxes::new().with_x(true).with_y(true).with_z(true))?;

        self.enable_interrupts(address, &[InterruptKind::SingleTap, InterruptKind::DoubleTap])
    }

    /// Reads every latched event in one `INT_SOURCE` access.
    ///
    /// The read clears the latched bits on the device, so callers interested
    /// in several events should inspect the returned snapshot.
    pub fn interrupt_source(&mut self) -> Result<InterruptSource, CommE> {
        let Some(address) = self.address()? else {
            return Ok(InterruptSource::new());
        };

        self.read_reg::<InterruptSource>(address)
    }

    /// Returns whether the event of `kind` is latched.
    ///
    /// This consumes every currently latched event, not only `kind`.
    pub fn interrupt_active(&mut self, kind: InterruptKind) -> Result<bool, CommE> {
        Ok(self.interrupt_source()?.is_set(kind))
    }

    // ==================================================================
    // == Internal Register Helpers =====================================
    // ==================================================================
    fn threshold_counts(threshold_g: f64) -> Result<u8, CommE> {
        units::counts_from_g(threshold_g).ok_or_else(|| {
            log::warn!("threshold out of range");
            Error::InvalidArgument
        })
    }

    fn enable_interrupt(&mut self, address: u8, kind: InterruptKind) -> Result<(), CommE> {
        self.enable_interrupts(address, &[kind])
    }

    fn enable_interrupts(&mut self, address: u8, kinds: &[InterruptKind]) -> Result<(), CommE> {
        self.update_reg::<InterruptEnable, _>(address, |enable| enable.enable_all(kinds))?;
        Ok(())
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

    fn update_reg<R, F>(&mut self, address: u8, mutate: F) -> Result<R, CommE>
    where
        R: Register,
        F: FnOnce(&mut R),
    {
        let current = self.interface.read_register(address, R::ADDRESS)?;

        let mut value = R::from(current);
        mutate(&mut value);

        let updated: u8 = value.into();
        if updated != current {
            self.interface.write_register(address, R::ADDRESS, updated)?;
        }

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accel::params::{Coupling, LowPower, OutputDataRate};
    use crate::accel::registers::{REG_INT_ENABLE, REG_INT_SOURCE, REG_SHOCK_AXES};
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const NACK: ErrorKind = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

    /// In-memory register file answering on a single address.
    struct RegisterFile {
        address: u8,
        registers: [u8; 64],
    }

    impl RegisterFile {
        fn adxl375() -> Self {
            let mut registers = [0u8; 64];
            registers[REG_DEVID as usize] = EXPECTED_DEVID;
            Self {
                address: ADDR_PRIMARY,
                registers,
            }
        }

        fn check(&self, address: u8) -> core::result::Result<(), ErrorKind> {
            if address == self.address {
                Ok(())
            } else {
                Err(NACK)
            }
        }
    }

    impl BusInterface for RegisterFile {
        type Error = ErrorKind;

        fn write_register(
            &mut self,
            address: u8,
            register: u8,
            value: u8,
        ) -> core::result::Result<(), ErrorKind> {
            self.check(address)?;
            self.registers[register as usize] = value;
            Ok(())
        }

        fn read_register(
            &mut self,
            address: u8,
            register: u8,
        ) -> core::result::Result<u8, ErrorKind> {
            self.check(address)?;
            Ok(self.registers[register as usize])
        }

        fn read_many(
            &mut self,
            address: u8,
            register: u8,
            buf: &mut [u8],
        ) -> core::result::Result<(), ErrorKind> {
            self.check(address)?;
            let start = register as usize;
            buf.copy_from_slice(&self.registers[start..start + buf.len()]);
            Ok(())
        }
    }

    fn setup(address: u8) -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write(address, vec![0x31, 0x0B]),
            I2cTransaction::write(address, vec![0x2C, 0x0A]),
            I2cTransaction::write(address, vec![0x2D, 0x08]),
        ]
    }

    fn found_at_primary() -> Vec<I2cTransaction> {
        let mut transactions = vec![I2cTransaction::write_read(
            ADDR_PRIMARY,
            vec![0x00],
            vec![0xE5],
        )];
        transactions.extend(setup(ADDR_PRIMARY));
        transactions
    }

    fn absent() -> Vec<I2cTransaction> {
        vec![
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x00], vec![0x00]).with_error(NACK),
            I2cTransaction::write_read(ADDR_ALTERNATE, vec![0x00], vec![0x42]),
        ]
    }

    type MockAdxl375 = Adxl375<I2cInterface<I2cMock>, NoopDelay>;

    fn driver(expectations: &[I2cTransaction]) -> (MockAdxl375, I2cMock) {
        let mock = I2cMock::new(expectations);
        let device = Adxl375::new_i2c(mock.clone(), NoopDelay::new(), Config::default());
        (device, mock)
    }

    #[test]
    fn init_configures_exactly_once() {
        let (mut device, mut mock) = driver(&found_at_primary());

        assert_eq!(device.init(), Ok(true));
        assert_eq!(device.init(), Ok(true));
        assert_eq!(device.handle().map(|h| h.address()), Some(ADDR_PRIMARY));
        mock.done();
    }

    #[test]
    fn init_falls_back_to_alternate_address() {
        let mut expectations = vec![
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x00], vec![0x00]).with_error(NACK),
            I2cTransaction::write_read(ADDR_ALTERNATE, vec![0x00], vec![0xE5]),
        ];
        expectations.extend(setup(ADDR_ALTERNATE));
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.init(), Ok(true));
        assert_eq!(device.handle().map(|h| h.address()), Some(ADDR_ALTERNATE));
        mock.done();
    }

    #[test]
    fn configuration_follows_config() {
        let mut expectations = vec![I2cTransaction::write_read(
            ADDR_PRIMARY,
            vec![0x00],
            vec![0xE5],
        )];
        expectations.extend([
            I2cTransaction::write(ADDR_PRIMARY, vec![0x31, 0x0B]),
            I2cTransaction::write(ADDR_PRIMARY, vec![0x2C, 0x1C]),
            I2cTransaction::write(ADDR_PRIMARY, vec![0x2D, 0x08]),
        ]);
        let mock = I2cMock::new(&expectations);
        let config = Config::new()
            .odr(OutputDataRate::Hz400)
            .low_power(LowPower::Enabled)
            .build();
        let mut device = Adxl375::new_i2c(mock.clone(), NoopDelay::new(), config);

        assert_eq!(device.init(), Ok(true));
        let (mut mock, _) = device.release_i2c();
        mock.done();
    }

    #[test]
    fn invalid_config_is_rejected_before_bus_traffic() {
        let mock = I2cMock::new(&[]);
        let config = Config::new()
            .odr(OutputDataRate::Hz1600)
            .low_power(LowPower::Enabled)
            .build();
        let mut device = Adxl375::new_i2c(mock.clone(), NoopDelay::new(), config);

        assert_eq!(device.init(), Err(Error::InvalidConfig));
        let (mut mock, _) = device.release_i2c();
        mock.done();
    }

    #[test]
    fn absent_device_reads_neutral_values() {
        let expectations: Vec<_> = core::iter::repeat_with(absent).take(9).flatten().collect();
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.init(), Ok(false));
        assert_eq!(device.x(AccelUnit::G), Ok(0.0));
        assert_eq!(device.total(AccelUnit::MetersPerSecondSquared), Ok(0.0));
        assert_eq!(device.read_xyz_raw(), Ok([0, 0, 0]));
        assert_eq!(device.raw_z(), Ok(0));
        assert_eq!(device.data_format_register(), Ok(0));
        assert_eq!(device.offset_register(Axis::Y), Ok(0));
        assert_eq!(device.enable_activity_detection(10.0), Ok(()));
        assert_eq!(device.interrupt_active(InterruptKind::Activity), Ok(false));
        assert!(!device.is_initialized());
        mock.done();
    }

    #[test]
    fn detection_bus_error_is_surfaced() {
        let expectations = [
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x00], vec![0x00])
                .with_error(ErrorKind::ArbitrationLoss),
            I2cTransaction::write_read(ADDR_ALTERNATE, vec![0x00], vec![0x00]).with_error(NACK),
        ];
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.z(AccelUnit::G), Err(Error::Interface(ErrorKind::ArbitrationLoss)));
        mock.done();
    }

    #[test]
    fn axis_reads_convert_and_round() {
        let mut expectations = found_at_primary();
        expectations.extend([
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x32], vec![0x0A, 0x00]),
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x32], vec![0x0A, 0x00]),
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x34], vec![0xFB, 0xFF]),
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x36], vec![0x14, 0x00]),
        ]);
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.x(AccelUnit::G), Ok(0.49));
        assert_eq!(device.x(AccelUnit::MetersPerSecondSquared), Ok(4.81));
        assert_eq!(device.y(AccelUnit::G), Ok(-0.25));
        assert_eq!(device.raw_z(), Ok(20));
        mock.done();
    }

    #[test]
    fn total_uses_raw_vector_norm() {
        let mut expectations = found_at_primary();
        expectations.push(I2cTransaction::write_read(
            ADDR_PRIMARY,
            vec![0x32],
            vec![0x03, 0x00, 0x04, 0x00, 0x00, 0x00],
        ));
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.total(AccelUnit::G), Ok(0.25));
        mock.done();
    }

    #[test]
    fn bus_error_after_init_is_not_substituted() {
        let mut expectations = found_at_primary();
        expectations.push(
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x32], vec![0x00; 6]).with_error(NACK),
        );
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.total(AccelUnit::G), Err(Error::Interface(NACK)));
        assert!(device.is_initialized());
        mock.done();
    }

    #[test]
    fn debug_registers_read_raw_bytes() {
        let mut expectations = found_at_primary();
        expectations.extend([
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x31], vec![0x0B]),
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x2D], vec![0x08]),
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x1E], vec![0xFE]),
            I2cTransaction::write_read(ADDR_PRIMARY, vec![0x20], vec![0x05]),
        ]);
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.data_format_register(), Ok(0x0B));
        assert_eq!(device.power_ctl_register(), Ok(0x08));
        assert_eq!(device.offset_register(Axis::X), Ok(-2));
        assert_eq!(device.offset_register(Axis::Z), Ok(5));
        mock.done();
    }

    #[test]
    fn activity_setup_writes_threshold_and_enable() {
        let mut expectations = found_at_primary();
        expectations.extend([
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_THRESH_ACT, 204]),
            I2cTransaction::write(ADDR_PRIMARY, vec![0x27, 0x77]),
            I2cTransaction::write_read(ADDR_PRIMARY, vec![REG_INT_ENABLE], vec![0x80]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_INT_ENABLE, 0x90]),
        ]);
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.enable_activity_detection(10.0), Ok(()));
        mock.done();
    }

    #[test]
    fn tap_setup_writes_timing_constants() {
        let mut expectations = found_at_primary();
        expectations.extend([
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_THRESH_SHOCK, 255]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_DUR, 0x10]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_LATENT, 0x50]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_WINDOW, 0xFF]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_SHOCK_AXES, 0x07]),
            I2cTransaction::write_read(ADDR_PRIMARY, vec![REG_INT_ENABLE], vec![0x00]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_INT_ENABLE, 0x60]),
        ]);
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.enable_tap_detection(12.495), Ok(()));
        mock.done();
    }

    #[test]
    fn tap_enables_share_one_interrupt_write() {
        let mut expectations = found_at_primary();
        expectations.extend([
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_THRESH_SHOCK, 102]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_DUR, 0x10]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_LATENT, 0x50]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_WINDOW, 0xFF]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_SHOCK_AXES, 0x07]),
            I2cTransaction::write_read(ADDR_PRIMARY, vec![REG_INT_ENABLE], vec![0x10]),
            I2cTransaction::write(ADDR_PRIMARY, vec![REG_INT_ENABLE, 0x70])
                .with_error(ErrorKind::Bus),
        ]);
        let (mut device, mut mock) = driver(&expectations);

        assert_eq!(device.enable_tap_detection(5.0), Err(Error::Interface(ErrorKind::Bus)));
        mock.done();
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let (mut device, mut mock) = driver(&[]);

        assert_eq!(device.enable_activity_detection(200.0), Err(Error::InvalidArgument));
        assert_eq!(device.enable_tap_detection(-1.0), Err(Error::InvalidArgument));
        assert_eq!(device.enable_free_fall_detection(2.0, 1_300), Err(Error::InvalidArgument));
        mock.done();
    }

    #[test]
    fn interrupt_enables_accumulate_in_any_order() {
        let mut first = Adxl375::new(RegisterFile::adxl375(), NoopDelay::new(), Config::default());
        first.enable_activity_detection(10.0).unwrap();
        first.enable_free_fall_detection(2.0, 100).unwrap();

        let mut second = Adxl375::new(RegisterFile::adxl375(), NoopDelay::new(), Config::default());
        second.enable_free_fall_detection(2.0, 100).unwrap();
        second.enable_activity_detection(10.0).unwrap();

        for device in [&mut first, &mut second] {
            let registers = &device.interface_mut().registers;
            assert_eq!(registers[REG_INT_ENABLE as usize], 0x14);
            assert_eq!(registers[REG_THRESH_FF as usize], 40);
            assert_eq!(registers[REG_TIME_FF as usize], 20);
            assert_eq!(registers[REG_THRESH_ACT as usize], 204);
        }
    }

    #[test]
    fn inactivity_setup_keeps_other_enables() {
        let config = Config::new().activity_coupling(Coupling::Ac).build();
        let mut device = Adxl375::new(RegisterFile::adxl375(), NoopDelay::new(), config);
        device.enable_tap_detection(5.0).unwrap();
        device.enable_inactivity_detection(5.0, 5).unwrap();

        let registers = &device.interface_mut().registers;
        assert_eq!(registers[REG_INT_ENABLE as usize], 0x68);
        assert_eq!(registers[REG_THRESH_INACT as usize], 102);
        assert_eq!(registers[REG_TIME_INACT as usize], 5);
        assert_eq!(registers[0x27], 0xFF);
    }

    #[test]
    fn interrupt_status_decodes_each_kind() {
        let mut device = Adxl375::new(RegisterFile::adxl375(), NoopDelay::new(), Config::default());
        device.init().unwrap();

        let cases = [
            (0x10, InterruptKind::Activity),
            (0x08, InterruptKind::Inactivity),
            (0x04, InterruptKind::FreeFall),
            (0x40, InterruptKind::SingleTap),
            (0x20, InterruptKind::DoubleTap),
            (0x80, InterruptKind::DataReady),
        ];
        for (mask, kind) in cases {
            device.interface_mut().registers[REG_INT_SOURCE as usize] = mask;
            assert_eq!(device.interrupt_active(kind), Ok(true));

            device.interface_mut().registers[REG_INT_SOURCE as usize] = !mask;
            assert_eq!(device.interrupt_active(kind), Ok(false));
        }
    }

    #[test]
    fn interrupt_source_snapshot() {
        let mut device = Adxl375::new(RegisterFile::adxl375(), NoopDelay::new(), Config::default());
        device.interface_mut().registers[REG_INT_SOURCE as usize] = 0x90;

        let source = device.interrupt_source().unwrap();
        assert!(source.activity());
        assert!(source.data_ready());
        assert!(!source.single_tap());
    }
}
