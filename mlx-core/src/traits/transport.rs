//! SMBus transport trait
//!
//! A transport knows how to put one framed transaction on the bus. It does
//! not know about PEC, word layout or the command set; those live in
//! [`crate::protocol`] once for every backend.

use crate::address::BusAddress;
use crate::error::Result;

/// Bytes returned by a word read: low, high, PEC
pub const READ_FRAME_LEN: usize = 3;

/// Framed byte transfer on an SMBus
///
/// Both frame methods begin by forcing the bus idle (STOP plus a bus-free
/// wait) and end with a STOP on success. On failure they return at the
/// point of failure without further bus activity; the next frame's leading
/// STOP recovers the bus.
pub trait SmbusTransport {
    /// Put the bus into its idle state
    ///
    /// Must be idempotent.
    fn init(&mut self);

    /// Change the bus speed
    ///
    /// The unit is backend-specific; see the backend's documentation.
    fn set_frequency(&mut self, value: u32);

    /// Write frame: `START addr|W payload... STOP`
    ///
    /// Returns [`crate::Error::Transfer`] if the address or any payload byte
    /// is not acknowledged.
    fn write_frame(&mut self, address: BusAddress, payload: &[u8]) -> Result<()>;

    /// Read frame: `START addr|W command Sr addr|R b0 b1 b2 STOP`
    ///
    /// Returns [`crate::Error::Transfer`] if the write phase or the read
    /// addressing is not acknowledged.
    fn read_frame(
        &mut self,
        address: BusAddress,
        command: u8,
        buf: &mut [u8; READ_FRAME_LEN],
    ) -> Result<()>;

    /// Block while the device programs its EEPROM
    fn settle(&mut self, ms: u32);
}

impl<T: SmbusTransport + ?Sized> SmbusTransport for &mut T {
    fn init(&mut self) {
        (**self).init()
    }

    fn set_frequency(&mut self, value: u32) {
        (**self).set_frequency(value)
    }

    fn write_frame(&mut self, address: BusAddress, payload: &[u8]) -> Result<()> {
        (**self).write_frame(address, payload)
    }

    fn read_frame(
        &mut self,
        address: BusAddress,
        command: u8,
        buf: &mut [u8; READ_FRAME_LEN],
    ) -> Result<()> {
        (**self).read_frame(address, command, buf)
    }

    fn settle(&mut self, ms: u32) {
        (**self).settle(ms)
    }
}
