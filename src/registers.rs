//! Register map definitions for the dual encoder reader firmware.
#![allow(unused_parens)]

use core::fmt;

use modular_bitfield::prelude::*;

/// Default 7-bit I2C address of the encoder reader.
pub const DEFAULT_ADDRESS: u8 = 0x3F;

/// Value reported by the `ID` register.
pub const EXPECTED_ID: u8 = 0x5C;

/// Register address of `ID`.
pub const REG_ID: u8 = 0x00;
/// Register address of `STATUS`.
pub const REG_STATUS: u8 = 0x01;
/// Register address of `VERSION`.
pub const REG_VERSION: u8 = 0x02;
/// Register address of `ENABLE_INTS`.
pub const REG_INT_CONFIG: u8 = 0x04;
/// Register address of `COUNT1` (two bytes).
pub const REG_COUNT1: u8 = 0x05;
/// Register address of `DIFFERENCE1` (two bytes).
pub const REG_DIFFERENCE1: u8 = 0x07;
/// Register address of `COUNT2` (two bytes).
pub const REG_COUNT2: u8 = 0x09;
/// Register address of `DIFFERENCE2` (two bytes).
pub const REG_DIFFERENCE2: u8 = 0x0B;
/// Register address of `LAST_ENCODER_EVENT` (two bytes, milliseconds).
pub const REG_LAST_ENCODER_EVENT: u8 = 0x0D;
/// Register address of `TURN_INT_TIMEOUT` (two bytes, milliseconds).
pub const REG_TIME_CONSTANT: u8 = 0x0F;
/// Register address of `CHANGE_ADDRESS`.
pub const REG_CHANGE_ADDRESS: u8 = 0x11;
/// Register address of `LIMIT` (two bytes).
pub const REG_LIMIT: u8 = 0x12;
/// Register address of `THRESHOLD`.
pub const REG_THRESHOLD: u8 = 0x14;

/// Highest valid 7-bit bus address.
pub const MAX_ADDRESS: u8 = 0x7F;

/// Single-byte register with a fixed address and a typed view.
pub trait Register: Copy + From<u8> + Into<u8> {
    /// Register address in the firmware's register file.
    const ADDRESS: u8;
}

/// Bitfield representation of the `STATUS` register (address `0x01`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    // Encoder moved since the flag was last cleared (bit 0).
    pub encoder_moved: bool,
    #[skip]
    __: B7,
}

impl From<u8> for Status {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Status> for u8 {
    fn from(value: Status) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `ENABLE_INTS` register (address `0x04`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterruptConfig {
    // Raise the interrupt line on encoder movement (bit 0).
    pub encoder: bool,
    #[skip]
    __: B7,
}

impl From<u8> for InterruptConfig {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<InterruptConfig> for u8 {
    fn from(value: InterruptConfig) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `VERSION` register (address `0x02`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FirmwareVersion {
    // Minor version (bits 3:0).
    pub minor: B4,
    // Major version (bits 7:4).
    pub major: B4,
}

impl From<u8> for FirmwareVersion {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<FirmwareVersion> for u8 {
    fn from(value: FirmwareVersion) -> Self {
        value.into_bytes()[0]
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FirmwareVersion {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}.{}", self.major(), self.minor());
    }
}

impl Register for Status {
    const ADDRESS: u8 = REG_STATUS;
}

impl Register for InterruptConfig {
    const ADDRESS: u8 = REG_INT_CONFIG;
}

impl Register for FirmwareVersion {
    const ADDRESS: u8 = REG_VERSION;
}

/// Decodes a little-endian two's complement counter word.
#[inline]
pub fn decode_count(raw: [u8; 2]) -> i16 {
    i16::from_le_bytes(raw)
}

/// Encodes a counter value into its little-endian register layout.
#[inline]
pub fn encode_count(value: i16) -> [u8; 2] {
    value.to_le_bytes()
}

/// Decodes an unsigned little-endian register word.
#[inline]
pub fn decode_word(raw: [u8; 2]) -> u16 {
    u16::from_le_bytes(raw)
}

/// Encodes an unsigned value into its little-endian register layout.
#[inline]
pub fn encode_word(value: u16) -> [u8; 2] {
    value.to_le_bytes()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    /// Every signed 16-bit value survives the register byte layout.
    #[test]
    fn count_decoding_matches_twos_complement() {
        for value in i16::MIN..=i16::MAX {
            assert_eq!(decode_count(value.to_le_bytes()), value);
        }
        assert_eq!(decode_count([0xFF, 0xFF]), -1);
        assert_eq!(decode_count([0x00, 0x80]), i16::MIN);
        assert_eq!(decode_count([0x34, 0x12]), 0x1234);
        assert_eq!(encode_count(-2), [0xFE, 0xFF]);
    }

    #[test]
    fn word_is_little_endian() {
        assert_eq!(decode_word([0xE8, 0x03]), 1000);
        assert_eq!(encode_word(0xBEEF), [0xEF, 0xBE]);
    }

    /// Major lives in the high nibble.
    #[test]
    fn firmware_version_layout() {
        let version = FirmwareVersion::from(0x23);
        assert_eq!(version.major(), 2);
        assert_eq!(version.minor(), 3);
        assert_eq!(version.to_string(), "2.3");
        assert_eq!(FirmwareVersion::from(0x1A).to_string(), "1.10");
        assert_eq!(u8::from(version), 0x23);
    }

    #[test]
    fn register_metadata_points_at_map() {
        assert_eq!(<Status as Register>::ADDRESS, REG_STATUS);
        assert_eq!(<InterruptConfig as Register>::ADDRESS, REG_INT_CONFIG);
        assert_eq!(<FirmwareVersion as Register>::ADDRESS, REG_VERSION);
    }

    #[test]
    fn status_and_interrupt_bits() {
        assert!(Status::from(0b0000_0001).encoder_moved());
        assert!(!Status::from(0b0000_0110).encoder_moved());

        let config = InterruptConfig::new().with_encoder(true);
        assert_eq!(u8::from(config), 0x01);
        assert!(!InterruptConfig::from(0x02).encoder());
        // Reserved bits are carried through unchanged.
        assert_eq!(u8::from(InterruptConfig::from(0x03).with_encoder(false)), 0x02);
    }
}
