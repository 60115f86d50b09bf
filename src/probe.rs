//! Identity probing across the candidate bus addresses of a device.

use embedded_hal::i2c::ErrorKind;

use crate::interface::BusInterface;
use crate::log;

/// Resolved bus location of an initialized device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceHandle {
    address: u8,
}

impl DeviceHandle {
    pub(crate) const fn new(address: u8) -> Self {
        Self { address }
    }

    /// Returns the 7-bit bus address the device answered on.
    pub const fn address(&self) -> u8 {
        self.address
    }
}

/// Outcome of probing a device's candidate addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Detection<E> {
    /// The identity register matched at the contained address.
    Found(u8),
    /// No candidate address answered with the expected identity.
    NotFound,
    /// The bus failed for a reason other than a missing acknowledge.
    BusError(E),
}

impl<E> Detection<E> {
    /// Returns the matched address, if any.
    pub fn address(&self) -> Option<u8> {
        match self {
            Self::Found(address) => Some(*address),
            _ => None,
        }
    }
}

/// Probes `candidates` in order and returns the first address whose
/// `id_register` reads back `expected_id`.
///
/// A NACK or a non-matching identity means "absent at this address". Any other
/// bus failure is remembered and reported if no address matches.
pub fn probe<IFACE>(
    interface: &mut IFACE,
    candidates: &[u8],
    id_register: u8,
    expected_id: u8,
) -> Detection<IFACE::Error>
where
    IFACE: BusInterface,
{
    let mut bus_error = None;

    for &address in candidates {
        match interface.read_register(address, id_register) {
            Ok(id) if id == expected_id => {
                log::debug!("identity {=u8:#x} matched at {=u8:#x}", id, address);
                return Detection::Found(address);
            }
            Ok(id) => {
                log::debug!("unexpected identity {=u8:#x} at {=u8:#x}", id, address);
            }
            Err(err) if is_absent(&err) => {
                log::trace!("no acknowledge at {=u8:#x}", address);
            }
            Err(err) => {
                log::warn!("bus error while probing {=u8:#x}", address);
                bus_error = Some(err);
            }
        }
    }

    match bus_error {
        Some(err) => Detection::BusError(err),
        None => Detection::NotFound,
    }
}

fn is_absent<E: embedded_hal::i2c::Error>(err: &E) -> bool {
    matches!(err.kind(), ErrorKind::NoAcknowledge(_))
}

#[cfg(test)]
mod tests {
    use super::{probe, Detection};
    use crate::interface::i2c::I2cInterface;
    use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const NACK: ErrorKind = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

    #[test]
    fn first_matching_address_wins() {
        let expectations = [I2cTransaction::write_read(0x53, vec![0x00], vec![0xE5])];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        assert_eq!(probe(&mut interface, &[0x53, 0x1D], 0x00, 0xE5), Detection::Found(0x53));
        mock.done();
    }

    #[test]
    fn falls_back_to_alternate_after_nack() {
        let expectations = [
            I2cTransaction::write_read(0x53, vec![0x00], vec![0x00]).with_error(NACK),
            I2cTransaction::write_read(0x1D, vec![0x00], vec![0xE5]),
        ];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        let detection = probe(&mut interface, &[0x53, 0x1D], 0x00, 0xE5);
        assert_eq!(detection.address(), Some(0x1D));
        mock.done();
    }

    #[test]
    fn mismatching_identities_are_not_found() {
        let expectations = [
            I2cTransaction::write_read(0x76, vec![0xD0], vec![0x60]),
            I2cTransaction::write_read(0x77, vec![0xD0], vec![0x00]).with_error(NACK),
        ];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        assert_eq!(probe(&mut interface, &[0x76, 0x77], 0xD0, 0x58), Detection::NotFound);
        mock.done();
    }

    #[test]
    fn non_nack_failures_are_bus_errors() {
        let expectations = [
            I2cTransaction::write_read(0x76, vec![0xD0], vec![0x00]).with_error(ErrorKind::Bus),
            I2cTransaction::write_read(0x77, vec![0xD0], vec![0x00]).with_error(NACK),
        ];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        assert_eq!(
            probe(&mut interface, &[0x76, 0x77], 0xD0, 0x58),
            Detection::BusError(ErrorKind::Bus)
        );
        mock.done();
    }
}
