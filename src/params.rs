//! Strongly typed parameters for the dual encoder reader driver.
//!
//! # Examples
//!
//! ```rust
//! use dual_encoder_reader::params::Channel;
//! use dual_encoder_reader::registers::REG_COUNT2;
//!
//! assert_eq!(Channel::Two.count_register(), REG_COUNT2);
//! ```

use crate::registers::{REG_COUNT1, REG_COUNT2, REG_DIFFERENCE1, REG_DIFFERENCE2};

/// Encoder input channel on the reader board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Encoder 1.
    One,
    /// Encoder 2.
    Two,
}

impl Channel {
    /// Returns the register holding the absolute tick count.
    pub const fn count_register(self) -> u8 {
        match self {
            Self::One => REG_COUNT1,
            Self::Two => REG_COUNT2,
        }
    }

    /// Returns the register holding ticks since the last check.
    pub const fn difference_register(self) -> u8 {
        match self {
            Self::One => REG_DIFFERENCE1,
            Self::Two => REG_DIFFERENCE2,
        }
    }
}
