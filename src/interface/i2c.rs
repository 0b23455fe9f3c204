//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::I2c;

use super::DualEncoderInterface;

/// Largest payload sent in a single write transaction.
///
/// Longer blocks are split; the firmware auto-increments its register
/// pointer so each chunk is addressed at its own offset.
pub const MAX_WRITE_PAYLOAD: usize = 16;

/// I2C-based interface implementation for the dual encoder reader driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface from the provided I2C bus abstraction.
    pub const fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> DualEncoderInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn is_device_connected(&mut self, address: u8) -> bool {
        // Address-only write; any acknowledge means something is listening.
        self.i2c.write(address, &[]).is_ok()
    }

    fn read_byte(&mut self, address: u8, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_block(address, register, &mut value)?;
        Ok(value[0])
    }

    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        self.i2c.write_read(address, &[register], buf)
    }

    fn write_byte(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> core::result::Result<(), Self::Error> {
        self.write_block(address, register, core::slice::from_ref(&value))
    }

    fn write_block(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> core::result::Result<(), Self::Error> {
        let mut frame = [0u8; MAX_WRITE_PAYLOAD + 1];
        let mut offset = register;

        for chunk in data.chunks(MAX_WRITE_PAYLOAD) {
            frame[0] = offset;
            frame[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(address, &frame[..=chunk.len()])?;
            offset = offset.wrapping_add(chunk.len() as u8);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{I2cInterface, MAX_WRITE_PAYLOAD};
    use crate::interface::DualEncoderInterface;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
    use std::vec;
    use std::vec::Vec;

    const ADDR: u8 = 0x3F;

    #[test]
    fn probe_reports_acknowledge() {
        let expectations = [Transaction::write(ADDR, vec![])];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        assert!(interface.is_device_connected(ADDR));
        mock.done();
    }

    #[test]
    fn probe_reports_missing_device() {
        let expectations = [Transaction::write(0x21, vec![]).with_error(ErrorKind::Other)];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        assert!(!interface.is_device_connected(0x21));
        mock.done();
    }

    #[test]
    fn read_block_addresses_register_then_fills_buffer() {
        let expectations = [Transaction::write_read(ADDR, vec![0x05], vec![0xAA, 0x55])];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        let mut buffer = [0u8; 2];
        interface.read_block(ADDR, 0x05, &mut buffer).unwrap();
        assert_eq!(buffer, [0xAA, 0x55]);
        mock.done();
    }

    #[test]
    fn read_byte_reuses_read_block() {
        let expectations = [Transaction::write_read(ADDR, vec![0x00], vec![0x5C])];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        assert_eq!(interface.read_byte(ADDR, 0x00).unwrap(), 0x5C);
        mock.done();
    }

    #[test]
    fn write_byte_prefixes_register() {
        let expectations = [Transaction::write(ADDR, vec![0x14, 0x05])];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        interface.write_byte(ADDR, 0x14, 0x05).unwrap();
        mock.done();
    }

    #[test]
    fn write_block_sends_single_frame() {
        let expectations = [Transaction::write(ADDR, vec![0x12, 0xE8, 0x03])];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        interface.write_block(ADDR, 0x12, &[0xE8, 0x03]).unwrap();
        mock.done();
    }

    #[test]
    fn long_write_block_is_chunked_with_advancing_register() {
        let data: Vec<u8> = (0..(MAX_WRITE_PAYLOAD as u8 + 2)).collect();

        let mut first = vec![0x20];
        first.extend_from_slice(&data[..MAX_WRITE_PAYLOAD]);
        let mut second = vec![0x20 + MAX_WRITE_PAYLOAD as u8];
        second.extend_from_slice(&data[MAX_WRITE_PAYLOAD..]);

        let expectations = [Transaction::write(ADDR, first), Transaction::write(ADDR, second)];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        interface.write_block(ADDR, 0x20, &data).unwrap();
        mock.done();
    }

    #[test]
    fn empty_transfers_touch_nothing() {
        let expectations: [Transaction; 0] = [];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        interface.read_block(ADDR, 0x05, &mut []).unwrap();
        interface.write_block(ADDR, 0x05, &[]).unwrap();
        mock.done();
    }

    #[test]
    fn bus_errors_propagate_untranslated() {
        let expectations =
            [Transaction::write_read(ADDR, vec![0x09], vec![0, 0]).with_error(ErrorKind::Bus)];
        let mut mock = I2cMock::new(&expectations);
        let mut interface = I2cInterface::new(mock.clone());

        let mut buffer = [0u8; 2];
        assert_eq!(interface.read_block(ADDR, 0x09, &mut buffer), Err(ErrorKind::Bus));
        mock.done();
    }
}
