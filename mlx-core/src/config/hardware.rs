//! Transport configuration types
//!
//! One struct per backend. The frequency value each backend accepts means
//! something different:
//!
//! - hardware: SCL rate in kHz, handed to the peripheral
//! - bit-bang: a scale that is inverted into a spin-loop count per wait
//!
//! The two are not numerically comparable.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hardware I2C peripheral transport settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HardwareConfig {
    /// SCL frequency in kHz
    pub frequency_khz: u32,
    /// Bus-free time after the leading STOP of each frame (µs)
    pub bus_free_us: u32,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            frequency_khz: 100,
            bus_free_us: 5,
        }
    }
}

impl HardwareConfig {
    /// SCL frequency in Hz
    pub const fn frequency_hz(&self) -> u32 {
        self.frequency_khz.saturating_mul(1000)
    }
}

/// Bit-banged GPIO transport settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BitBangConfig {
    /// Spin iterations per wait unit
    ///
    /// Every line transition is separated by one or more wait units. Lower
    /// values give a faster clock.
    pub bit_delay: u32,
    /// Calibration constant for [`BitBangConfig::bit_delay_for`]
    pub spin_scale: u32,
    /// Polls of the released data line before a frame starts
    ///
    /// `None` never samples the idle bus. `Some(n)` fails the operation
    /// with a timeout if the line is still low after `n` wait units.
    pub idle_timeout: Option<u32>,
    /// Answer the last byte of a read with NACK instead of ACK
    pub nack_last_byte: bool,
}

impl Default for BitBangConfig {
    fn default() -> Self {
        Self {
            bit_delay: 100,
            spin_scale: 20_000,
            idle_timeout: None,
            nack_last_byte: false,
        }
    }
}

impl BitBangConfig {
    /// Wait unit for a frequency value
    ///
    /// Higher values give shorter waits. Zero is treated as one.
    pub const fn bit_delay_for(&self, value: u32) -> u32 {
        let value = if value == 0 { 1 } else { value };
        (self.spin_scale / value) >> 1
    }

    /// Apply a frequency value to the wait unit
    pub fn set_frequency(&mut self, value: u32) {
        self.bit_delay = self.bit_delay_for(value);
    }
}
