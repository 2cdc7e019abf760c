//! Transport-agnostic SMBus protocol logic for the MLX90614
//!
//! This crate contains everything about talking to the sensor that does not
//! depend on how bits reach the wire:
//!
//! - Packet Error Code (CRC-8) engine
//! - Bus addressing and the accepted command set
//! - Error taxonomy
//! - The [`SmbusTransport`] trait implemented by the backends
//! - Read Word / Write Word / Send Command built on that trait
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules
mod fmt;

pub mod address;
pub mod config;
pub mod error;
pub mod pec;
pub mod protocol;
pub mod traits;

pub use address::{BusAddress, DEFAULT_ADDRESS};
pub use error::{Error, Result};
pub use protocol::Mlx90614;
pub use traits::SmbusTransport;
