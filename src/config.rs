//! Configuration primitives for the dual encoder reader driver.

use crate::registers::{DEFAULT_ADDRESS, MAX_ADDRESS};

/// User-facing configuration for the encoder reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// 7-bit I2C address the device answers on.
    pub address: u8,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration can be used on the bus.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        validate_address(self.address)
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the bus address.
    pub fn address(mut self, address: u8) -> Self {
        self.config.address = address;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Address does not fit in seven bits.
    AddressOutOfRange,
}

pub(crate) fn validate_address(address: u8) -> core::result::Result<(), ConfigError> {
    if address > MAX_ADDRESS {
        return Err(ConfigError::AddressOutOfRange);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_factory_address() {
        assert_eq!(Config::default().address, 0x3F);
        assert_eq!(Config::new().build(), Config::default());
    }

    #[test]
    fn builder_overrides_address() {
        let config = Config::new().address(0x20).build();
        assert_eq!(config.address, 0x20);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn eight_bit_address_is_rejected() {
        let config = Config::new().address(0x80).build();
        assert_eq!(config.validate(), Err(ConfigError::AddressOutOfRange));
        assert_eq!(Config::new().address(0x7F).build().validate(), Ok(()));
    }
}
