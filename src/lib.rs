//! `#![no_std]` driver for the ATTINY84-based dual quadrature encoder reader
//! found on the SparkFun Auto pHAT.
//!
//! The microcontroller does all of the decoding; this crate only talks to its
//! register file over I2C. Every accessor is a single blocking bus transaction
//! and nothing is cached.
//!
//! # Example
//!
//! Polling both counters:
//!
//! ```ignore
//! use dual_encoder_reader::{Config, DualEncoderReader};
//!
//! let mut encoders = DualEncoderReader::new_i2c(i2c, Config::default());
//! if !encoders.begin()? {
//!     panic!("dual encoder reader not found");
//! }
//!
//! loop {
//!     let left = encoders.count1()?;
//!     let right = encoders.count2()?;
//!     println!("count1: {left}, count2: {right}");
//!     delay.delay_ms(300);
//! }
//! ```
//!
//! # Features
//!
//! - **`defmt`**: internal logging and [`defmt::Format`] implementations.

#![no_std]

mod error;

pub mod config;
pub mod device;
pub mod interface;
mod log;
pub mod params;
pub mod registers;

pub use crate::config::Config;
pub use crate::device::DualEncoderReader;
pub use crate::error::{Error, Result};
pub use crate::registers::{DEFAULT_ADDRESS, EXPECTED_ID};
