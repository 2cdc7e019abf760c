//! MLX90614 SMBus operations
//!
//! The three operations the sensor understands, built once on top of any
//! [`SmbusTransport`]:
//!
//! ```text
//! Read Word:    S addr|W cmd Sr addr|R lo hi PEC P
//! Write Word:   S addr|W cmd lo hi PEC P          (then read back)
//! Send Command: S addr|W cmd PEC P
//! ```
//!
//! The PEC covers every preceding byte of the frame, address bytes
//! included. A write is only reported successful once the word has been
//! read back from the device and compared.

use crate::address::{command, BusAddress};
use crate::config::ProtocolConfig;
use crate::error::{Error, Result};
use crate::pec::Pec;
use crate::traits::{SmbusTransport, READ_FRAME_LEN};

/// MLX90614 protocol driver over a transport
///
/// One instance drives one bus. Slave addresses are passed per call so
/// several sensors on the same bus share the driver.
pub struct Mlx90614<T> {
    transport: T,
    config: ProtocolConfig,
}

impl<T: SmbusTransport> Mlx90614<T> {
    /// Create a driver with the default protocol settings
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ProtocolConfig::default())
    }

    /// Create a driver with explicit protocol settings
    pub fn with_config(transport: T, config: ProtocolConfig) -> Self {
        Self { transport, config }
    }

    /// Put the bus into its idle state
    ///
    /// Safe to call any number of times.
    pub fn init(&mut self) {
        trace!("smbus init");
        self.transport.init();
    }

    /// Change the bus speed (backend-specific unit)
    pub fn set_frequency(&mut self, value: u32) {
        debug!("smbus frequency {=u32}", value);
        self.transport.set_frequency(value);
    }

    /// Read a 16-bit word from RAM or EEPROM
    ///
    /// # Errors
    /// - [`Error::Transfer`] if the device does not acknowledge
    /// - [`Error::Integrity`] if the returned PEC does not match
    pub fn read_word(&mut self, slave_addr: u8, register_addr: u8) -> Result<u16> {
        let address = BusAddress::new(slave_addr);
        let mut frame = [0u8; READ_FRAME_LEN];

        if let Err(e) = self
            .transport
            .read_frame(address, register_addr, &mut frame)
        {
            warn!("read {=u8:#x}@{=u8:#x} failed", register_addr, slave_addr);
            return Err(e);
        }

        let [lo, hi, received] = frame;
        let computed = Pec::new()
            .update(address.write())
            .update(register_addr)
            .update(address.read())
            .update(lo)
            .update(hi)
            .value();

        if computed != received {
            warn!(
                "PEC mismatch reading {=u8:#x}@{=u8:#x}: {=u8:#x} != {=u8:#x}",
                register_addr,
                slave_addr,
                computed,
                received
            );
            return Err(Error::Integrity { computed, received });
        }

        let value = u16::from_le_bytes([lo, hi]);
        trace!("read {=u8:#x}@{=u8:#x} = {=u16:#x}", register_addr, slave_addr, value);
        Ok(value)
    }

    /// Write a 16-bit word and verify it by reading it back
    ///
    /// EEPROM cells must be erased (written with 0) before a new value is
    /// written; that sequencing is left to the caller.
    ///
    /// # Errors
    /// - [`Error::Transfer`] if the device does not acknowledge
    /// - [`Error::Verify`] if the read-back value differs
    /// - any error of the read-back [`Mlx90614::read_word`]
    pub fn write_word(&mut self, slave_addr: u8, register_addr: u8, value: u16) -> Result<()> {
        let address = BusAddress::new(slave_addr);
        let [lo, hi] = value.to_le_bytes();
        let pec = Pec::new()
            .update(address.write())
            .update(register_addr)
            .update(lo)
            .update(hi)
            .value();

        if let Err(e) = self
            .transport
            .write_frame(address, &[register_addr, lo, hi, pec])
        {
            warn!("write {=u8:#x}@{=u8:#x} failed", register_addr, slave_addr);
            return Err(e);
        }

        self.transport.settle(self.config.eeprom_settle_ms);

        let read_back = self.read_word(slave_addr, register_addr)?;
        if read_back != value {
            warn!(
                "verify {=u8:#x}@{=u8:#x}: wrote {=u16:#x}, read {=u16:#x}",
                register_addr,
                slave_addr,
                value,
                read_back
            );
            return Err(Error::Verify {
                written: value,
                read_back,
            });
        }

        trace!("wrote {=u8:#x}@{=u8:#x} = {=u16:#x}", register_addr, slave_addr, value);
        Ok(())
    }

    /// Send a raw command byte
    ///
    /// Only the commands in [`command::SUPPORTED`] are accepted; anything
    /// else is rejected before the bus is touched.
    ///
    /// # Errors
    /// - [`Error::UnsupportedCommand`] for any other command
    /// - [`Error::Transfer`] if the device does not acknowledge
    pub fn send_command(&mut self, slave_addr: u8, cmd: u8) -> Result<()> {
        if !command::is_supported(cmd) {
            warn!("unsupported command {=u8:#x}", cmd);
            return Err(Error::UnsupportedCommand(cmd));
        }

        let address = BusAddress::new(slave_addr);
        let pec = Pec::new().update(address.write()).update(cmd).value();

        if let Err(e) = self.transport.write_frame(address, &[cmd, pec]) {
            warn!("command {=u8:#x}@{=u8:#x} failed", cmd, slave_addr);
            return Err(e);
        }

        trace!("sent command {=u8:#x}@{=u8:#x}", cmd, slave_addr);
        Ok(())
    }

    /// Protocol settings in use
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Borrow the transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutably borrow the transport
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Give the transport back
    pub fn release(self) -> T {
        self.transport
    }
}
