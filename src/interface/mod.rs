//! Bus interface abstraction for the dual encoder reader driver.

pub mod i2c;

/// Abstraction over the register-level bus access required by the driver.
///
/// Every call names the target device address, so one transport can serve
/// several readers on the same bus.
pub trait DualEncoderInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Probes whether a device acknowledges `address`.
    fn is_device_connected(&mut self, address: u8) -> bool;

    /// Reads a single register.
    fn read_byte(&mut self, address: u8, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads consecutive registers into the provided buffer.
    fn read_block(
        &mut self,
        address: u8,
        register: u8,
        buf: &mut [u8],
    ) -> core::result::Result<(), Self::Error>;

    /// Writes a single register.
    fn write_byte(
        &mut self,
        address: u8,
        register: u8,
        value: u8,
    ) -> core::result::Result<(), Self::Error>;

    /// Writes consecutive registers from the provided buffer.
    fn write_block(
        &mut self,
        address: u8,
        register: u8,
        data: &[u8],
    ) -> core::result::Result<(), Self::Error>;
}
