//! Protocol errors
//!
//! Every operation either completes with a verified frame or reports
//! exactly one of these. Nothing is retried at this layer.

use core::fmt;

/// Errors returned by SMBus operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A byte was not acknowledged, or the peripheral reported a failed
    /// transfer
    Transfer,
    /// Received PEC does not match the PEC computed over the frame
    Integrity {
        /// PEC computed locally
        computed: u8,
        /// PEC byte received from the device
        received: u8,
    },
    /// Word read back after a write differs from the written word
    Verify {
        /// Value that was written
        written: u16,
        /// Value the device returned
        read_back: u16,
    },
    /// `send_command` called with a command outside the supported set
    UnsupportedCommand(u8),
    /// The data line stayed low past the configured idle deadline
    Timeout,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Transfer => f.write_str("transfer not acknowledged"),
            Error::Integrity { computed, received } => write!(
                f,
                "PEC mismatch: computed {:#04x}, received {:#04x}",
                computed, received
            ),
            Error::Verify { written, read_back } => write!(
                f,
                "write verify failed: wrote {:#06x}, read back {:#06x}",
                written, read_back
            ),
            Error::UnsupportedCommand(cmd) => write!(f, "unsupported command {:#04x}", cmd),
            Error::Timeout => f.write_str("bus held low past deadline"),
        }
    }
}

/// Result alias for SMBus operations
pub type Result<T> = core::result::Result<T, Error>;
