//! SMBus bit-banged on two GPIO lines
//!
//! For boards where the I2C peripheral is unavailable or cannot produce
//! SMBus timing. Every ACK is checked byte by byte, so a frame is abandoned
//! at the first byte the slave does not acknowledge.
//!
//! # Timing
//!
//! The only timing knob is the wait unit ([`BitBangConfig::bit_delay`]),
//! a spin-loop count. The right value depends on the host's instruction
//! timing and should be checked on an oscilloscope; it can be changed at
//! runtime with [`BitBangSmbus::set_bit_delay`] or derived from a frequency
//! value with [`SmbusTransport::set_frequency`].

pub mod lines;

#[cfg(test)]
pub(crate) mod sim;

use mlx_core::config::BitBangConfig;
use mlx_core::traits::{SmbusTransport, READ_FRAME_LEN};
use mlx_core::{BusAddress, Mlx90614, Result};
use mlx_hal::{Delay, FlexPin, OutputPin};

pub use lines::Lines;

/// Protocol driver over bit-banged GPIO
pub type BitBangMlx90614<SCL, SDA, D> = Mlx90614<BitBangSmbus<SCL, SDA, D>>;

/// SMBus transport driving SCL and SDA directly
pub struct BitBangSmbus<SCL, SDA, D> {
    lines: Lines<SCL, SDA, D>,
    config: BitBangConfig,
}

impl<SCL, SDA, D> BitBangSmbus<SCL, SDA, D>
where
    SCL: OutputPin,
    SDA: FlexPin,
    D: Delay,
{
    /// Create a transport
    ///
    /// The lines are not touched until [`SmbusTransport::init`] or the
    /// first frame.
    pub fn new(scl: SCL, sda: SDA, delay: D, config: BitBangConfig) -> Self {
        Self {
            lines: Lines::new(scl, sda, delay, config.bit_delay),
            config,
        }
    }

    /// Current settings
    pub fn config(&self) -> &BitBangConfig {
        &self.config
    }

    /// Set the wait unit directly, in spin iterations
    pub fn set_bit_delay(&mut self, bit_delay: u32) {
        self.config.bit_delay = bit_delay;
        self.lines.set_bit_delay(bit_delay);
    }

    /// Give the lines and delay back
    pub fn free(self) -> (SCL, SDA, D) {
        self.lines.free()
    }

    /// STOP, wait, optional idle check, START
    fn begin(&mut self) -> Result<()> {
        self.lines.stop();
        self.lines.wait();
        if let Some(polls) = self.config.idle_timeout {
            if let Err(e) = self.lines.wait_idle(polls) {
                warn!("SDA held low, bus not idle");
                return Err(e);
            }
        }
        self.lines.start();
        Ok(())
    }

    fn send(&mut self, byte: u8) -> Result<()> {
        self.lines.send_byte(byte).map_err(|e| {
            warn!("byte {=u8:#x} not acknowledged", byte);
            e
        })
    }
}

impl<SCL, SDA, D> SmbusTransport for BitBangSmbus<SCL, SDA, D>
where
    SCL: OutputPin,
    SDA: FlexPin,
    D: Delay,
{
    fn init(&mut self) {
        self.lines.stop();
    }

    /// Higher values give a shorter wait unit; see
    /// [`BitBangConfig::bit_delay_for`]
    fn set_frequency(&mut self, value: u32) {
        self.config.set_frequency(value);
        debug!("bit delay {=u32}", self.config.bit_delay);
        self.lines.set_bit_delay(self.config.bit_delay);
    }

    fn write_frame(&mut self, address: BusAddress, payload: &[u8]) -> Result<()> {
        self.begin()?;
        self.send(address.write())?;
        for &byte in payload {
            self.send(byte)?;
        }
        self.lines.stop();
        Ok(())
    }

    fn read_frame(
        &mut self,
        address: BusAddress,
        command: u8,
        buf: &mut [u8; READ_FRAME_LEN],
    ) -> Result<()> {
        self.begin()?;
        self.lines.wait();
        self.send(address.write())?;
        self.send(command)?;
        self.lines.repeated_start();
        self.send(address.read())?;
        self.lines.receive_bytes(buf, self.config.nack_last_byte);
        self.lines.stop();
        Ok(())
    }

    fn settle(&mut self, ms: u32) {
        self.lines.delay_mut().delay_ms(ms);
    }
}
