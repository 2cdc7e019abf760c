//! Protocol configuration
//!
//! Settings that apply to the shared operations regardless of which
//! transport carries the frames.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// EEPROM programming time required by the MLX90614 datasheet (ms)
pub const EEPROM_WRITE_MS: u32 = 10;

/// Protocol-level settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProtocolConfig {
    /// Wait between a word write and its read-back (ms)
    pub eeprom_settle_ms: u32,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            eeprom_settle_ms: EEPROM_WRITE_MS,
        }
    }
}
