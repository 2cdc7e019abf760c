//! Configuration types
//!
//! Board-agnostic configuration structures. With the `serde` feature they
//! can be stored as postcard binary data, which is how a tuned bit-bang
//! calibration survives a reboot.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;

/// Largest postcard encoding of any config struct in this module
#[cfg(feature = "serde")]
pub const MAX_ENCODED_LEN: usize = 32;

/// Errors from encoding or decoding a stored config
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Output buffer too small
    BufferFull,
    /// Stored bytes are not a valid encoding
    InvalidData,
}

/// Serialize a config into `buf`, returning the used prefix
#[cfg(feature = "serde")]
pub fn to_bytes<'a, T: serde::Serialize>(
    config: &T,
    buf: &'a mut [u8],
) -> Result<&'a mut [u8], ConfigError> {
    postcard::to_slice(config, buf).map_err(|_| ConfigError::BufferFull)
}

/// Deserialize a config previously written by [`to_bytes`]
#[cfg(feature = "serde")]
pub fn from_bytes<'a, T: serde::Deserialize<'a>>(bytes: &'a [u8]) -> Result<T, ConfigError> {
    postcard::from_bytes(bytes).map_err(|_| ConfigError::InvalidData)
}
