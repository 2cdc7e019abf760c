//! Transport implementations for the MLX90614
//!
//! This crate provides concrete implementations of the
//! [`mlx_core::SmbusTransport`] trait:
//!
//! - Hardware I2C peripheral ([`HardwareSmbus`])
//! - Bit-banged GPIO ([`BitBangSmbus`])
//!
//! Pair either one with [`mlx_core::Mlx90614`] for Read Word, Write Word
//! and Send Command.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules
mod fmt;

pub mod smbus;

pub use smbus::{BitBangMlx90614, BitBangSmbus, HardwareMlx90614, HardwareSmbus};
