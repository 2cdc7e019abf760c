//! MLX90614 SMBus Hardware Abstraction Layer
//!
//! This crate defines the capabilities the SMBus protocol layer consumes
//! from the surrounding board support code. Nothing here touches registers;
//! chip-specific crates (or the [`eh`] adapters) implement the traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (owns pins / peripherals)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  mlx-core (PEC, framing, operations)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ HardwareSmbus │       │ BitBangSmbus  │
//! │   (I2cBus)    │       │ (pins, spin)  │
//! └───────────────┘       └───────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  mlx-hal (this crate - traits)          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::FlexPin`] - Digital lines
//! - [`i2c::I2cBus`] - I2C peripheral transfers
//! - [`delay::Delay`] - Blocking waits in time units and spin iterations

#![no_std]
#![deny(unsafe_code)]

pub mod delay;
pub mod gpio;
pub mod i2c;

#[cfg(feature = "embedded-hal")]
pub mod eh;

// Re-export key traits at crate root for convenience
pub use delay::{Delay, SpinDelay};
pub use gpio::{FlexPin, InputPin, OutputPin};
pub use i2c::I2cBus;
