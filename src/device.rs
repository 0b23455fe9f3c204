//! High-level dual encoder reader driver implementation.

use crate::config::{validate_address, Config};
use crate::error::{Error, Result};
use crate::interface::i2c::I2cInterface;
use crate::interface::DualEncoderInterface;
use crate::log::{debug, trace, warning};
use crate::params::Channel;
use crate::registers::{
    decode_count,
    decode_word,
    encode_count,
    encode_word,
    FirmwareVersion,
    InterruptConfig,
    Register,
    Status,
    EXPECTED_ID,
    REG_CHANGE_ADDRESS,
    REG_ID,
    REG_LAST_ENCODER_EVENT,
    REG_LIMIT,
    REG_THRESHOLD,
    REG_TIME_CONSTANT,
};
use embedded_hal::i2c::I2c;

// Width of every multi-byte register in the firmware's register file.
const WORD_BYTES: usize = 2;

/// High-level synchronous driver for the dual encoder reader.
///
/// Nothing is cached: each accessor issues exactly the bus transactions it
/// needs and reports the device state at that moment.
pub struct DualEncoderReader<IFACE> {
    interface: IFACE,
    config: Config,
}

impl<IFACE> DualEncoderReader<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self { interface, config }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Returns the bus address this handle talks to.
    pub fn address(&self) -> u8 {
        self.config.address
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl<I2C> DualEncoderReader<I2cInterface<I2C>>
where
    I2C: I2c,
{
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c), config)
    }

    /// Releases the driver, returning the I2C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> DualEncoderReader<IFACE>
where
    IFACE: DualEncoderInterface<Error = CommE>,
{
    // ==================================================================
    // == Presence & Identification =====================================
    // ==================================================================
    /// Returns `true` when a device acknowledges the configured address.
    pub fn is_connected(&mut self) -> bool {
        let connected = self.interface.is_device_connected(self.config.address);
        trace!("probe {=u8:#x}: {}", self.config.address, connected);
        connected
    }

    /// Validates the board.
    ///
    /// Returns `Ok(false)` when nothing answers on the configured address or
    /// when the `ID` register holds something other than [`EXPECTED_ID`].
    pub fn begin(&mut self) -> Result<bool, CommE> {
        self.config.validate().map_err(|_| Error::InvalidConfig)?;

        if !self.is_connected() {
            debug!("no device at {=u8:#x}", self.config.address);
            return Ok(false);
        }

        let id = self.device_id()?;
        if id != EXPECTED_ID {
            warning!("unexpected device id {=u8:#x}", id);
            return Ok(false);
        }

        Ok(true)
    }

    /// Reads the raw `ID` register.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        self.read_byte(REG_ID)
    }

    /// Reads the firmware version; displays as `major.minor`.
    pub fn firmware_version(&mut self) -> Result<FirmwareVersion, CommE> {
        self.read_register::<FirmwareVersion>()
    }

    /// Moves the device to a new bus address and retargets this handle.
    ///
    /// The firmware persists the new address, so later sessions must be
    /// configured with it.
    pub fn change_address(&mut self, address: u8) -> Result<(), CommE> {
        validate_address(address).map_err(|_| Error::InvalidConfig)?;

        self.write_byte(REG_CHANGE_ADDRESS, address)?;
        debug!("address {=u8:#x} -> {=u8:#x}", self.config.address, address);
        self.config.address = address;
        Ok(())
    }

    // ==================================================================
    // == Encoder Counts ================================================
    // ==================================================================
    /// Ticks counted on encoder 1.
    pub fn count1(&mut self) -> Result<i16, CommE> {
        self.count(Channel::One)
    }

    /// Ticks counted on encoder 2.
    pub fn count2(&mut self) -> Result<i16, CommE> {
        self.count(Channel::Two)
    }

    /// Ticks counted on the given channel.
    pub fn count(&mut self, channel: Channel) -> Result<i16, CommE> {
        self.read_word_raw(channel.count_register()).map(decode_count)
    }

    /// Overwrites the tick count of encoder 1.
    pub fn set_count1(&mut self, value: i16) -> Result<(), CommE> {
        self.set_count(Channel::One, value)
    }

    /// Overwrites the tick count of encoder 2.
    pub fn set_count2(&mut self, value: i16) -> Result<(), CommE> {
        self.set_count(Channel::Two, value)
    }

    /// Overwrites the tick count of the given channel.
    pub fn set_count(&mut self, channel: Channel, value: i16) -> Result<(), CommE> {
        self.write_block(channel.count_register(), &encode_count(value))
    }

    /// Ticks since the difference register was last cleared.
    ///
    /// With `clear` set, the register is zeroed after reading.
    pub fn difference(&mut self, channel: Channel, clear: bool) -> Result<i16, CommE> {
        let register = channel.difference_register();
        let difference = decode_count(self.read_word_raw(register)?);

        if clear {
            self.write_block(register, &encode_count(0))?;
        }

        Ok(difference)
    }

    // ==================================================================
    // == Status & Interrupts ===========================================
    // ==================================================================
    /// Reads the `STATUS` register.
    pub fn status(&mut self) -> Result<Status, CommE> {
        self.read_register::<Status>()
    }

    /// Returns whether an encoder moved, clearing the moved flag.
    pub fn has_moved(&mut self) -> Result<bool, CommE> {
        let status = self.status()?;
        let moved = status.encoder_moved();

        self.write_register(status.with_encoder_moved(false))?;
        Ok(moved)
    }

    /// Clears every status flag, releasing the interrupt line.
    pub fn clear_interrupts(&mut self) -> Result<(), CommE> {
        self.write_register(Status::new())
    }

    /// Reads the `ENABLE_INTS` register.
    pub fn interrupt_config(&mut self) -> Result<InterruptConfig, CommE> {
        self.read_register::<InterruptConfig>()
    }

    /// Writes the `ENABLE_INTS` register.
    pub fn set_interrupt_config(&mut self, config: InterruptConfig) -> Result<(), CommE> {
        self.write_register(config)
    }

    /// Returns whether encoder movement raises the interrupt line.
    pub fn interrupt_enabled(&mut self) -> Result<bool, CommE> {
        self.interrupt_config().map(|config| config.encoder())
    }

    /// Enables or disables the encoder interrupt.
    pub fn set_interrupt_enabled(&mut self, enabled: bool) -> Result<(), CommE> {
        self.set_interrupt_config(InterruptConfig::new().with_encoder(enabled))
    }

    // ==================================================================
    // == Tuning ========================================================
    // ==================================================================
    /// Change-detection threshold.
    pub fn threshold(&mut self) -> Result<u8, CommE> {
        self.read_byte(REG_THRESHOLD)
    }

    /// Sets the change-detection threshold. Range checks are left to the firmware.
    pub fn set_threshold(&mut self, threshold: u8) -> Result<(), CommE> {
        self.write_byte(REG_THRESHOLD, threshold)
    }

    /// Counts allowed before wrapping; 0 means no limit.
    pub fn limit(&mut self) -> Result<u16, CommE> {
        self.read_word(REG_LIMIT)
    }

    /// Sets the wrap limit.
    pub fn set_limit(&mut self, limit: u16) -> Result<(), CommE> {
        self.write_word(REG_LIMIT, limit)
    }

    /// Milliseconds between the end of turning and the interrupt firing.
    pub fn time_constant(&mut self) -> Result<u16, CommE> {
        self.read_word(REG_TIME_CONSTANT)
    }

    /// Sets the interrupt time constant in milliseconds.
    pub fn set_time_constant(&mut self, millis: u16) -> Result<(), CommE> {
        self.write_word(REG_TIME_CONSTANT, millis)
    }

    /// Milliseconds since either encoder last moved.
    ///
    /// With `clear` set, the counter is zeroed after reading.
    pub fn since_last_movement(&mut self, clear: bool) -> Result<u16, CommE> {
        let elapsed = self.read_word(REG_LAST_ENCODER_EVENT)?;

        if clear {
            self.write_word(REG_LAST_ENCODER_EVENT, 0)?;
        }

        Ok(elapsed)
    }

    // ==================================================================
    // == Register Access Helpers =======================================
    // ==================================================================
    fn read_byte(&mut self, register: u8) -> Result<u8, CommE> {
        self.interface
            .read_byte(self.config.address, register)
            .map_err(Error::from)
    }

    fn write_byte(&mut self, register: u8, value: u8) -> Result<(), CommE> {
        self.interface
            .write_byte(self.config.address, register, value)
            .map_err(Error::from)
    }

    fn read_register<R: Register>(&mut self) -> Result<R, CommE> {
        self.read_byte(R::ADDRESS).map(R::from)
    }

    fn write_register<R: Register>(&mut self, value: R) -> Result<(), CommE> {
        self.write_byte(R::ADDRESS, value.into())
    }

    fn read_word_raw(&mut self, register: u8) -> Result<[u8; WORD_BYTES], CommE> {
        let mut raw = [0u8; WORD_BYTES];
        self.interface
            .read_block(self.config.address, register, &mut raw)
            .map_err(Error::from)?;
        Ok(raw)
    }

    fn read_word(&mut self, register: u8) -> Result<u16, CommE> {
        self.read_word_raw(register).map(decode_word)
    }

    fn write_word(&mut self, register: u8, value: u16) -> Result<(), CommE> {
        self.write_block(register, &encode_word(value))
    }

    fn write_block(&mut self, register: u8, data: &[u8]) -> Result<(), CommE> {
        self.interface
            .write_block(self.config.address, register, data)
            .map_err(Error::from)
    }
}
