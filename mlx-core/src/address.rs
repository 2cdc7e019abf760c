//! Device addressing and the command set
//!
//! The MLX90614 answers on a 7-bit slave address. On the wire the address
//! is shifted left and the R/W bit is appended:
//!
//! ```text
//! write: addr << 1        read: (addr << 1) | 1
//! ```

/// Factory default slave address
pub const DEFAULT_ADDRESS: u8 = 0x5A;

/// SMBus general address; every MLX90614 on the bus responds to it
pub const GENERAL_ADDRESS: u8 = 0x00;

/// 7-bit device address with its two on-wire forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusAddress(u8);

impl BusAddress {
    /// Wrap a 7-bit address
    ///
    /// The top bit is shifted out when the wire form is built, matching what
    /// the bus itself would do with an 8-bit value.
    pub const fn new(address: u8) -> Self {
        Self(address)
    }

    /// The 7-bit address
    pub const fn device(self) -> u8 {
        self.0
    }

    /// Address byte for a write (R/W bit clear)
    pub const fn write(self) -> u8 {
        self.0 << 1
    }

    /// Address byte for a read (R/W bit set)
    pub const fn read(self) -> u8 {
        (self.0 << 1) | 0x01
    }
}

impl From<u8> for BusAddress {
    fn from(address: u8) -> Self {
        Self::new(address)
    }
}

/// Commands accepted by `send_command`
pub mod command {
    /// First supported raw command
    pub const CMD_0X60: u8 = 0x60;
    /// Second supported raw command
    pub const CMD_0X61: u8 = 0x61;

    /// Commands the protocol layer will put on the bus
    pub const SUPPORTED: [u8; 2] = [CMD_0X60, CMD_0X61];

    /// Whether `command` may be sent with `send_command`
    pub const fn is_supported(command: u8) -> bool {
        matches!(command, CMD_0X60 | CMD_0X61)
    }
}
