//! SMBus over a hardware I2C peripheral
//!
//! The peripheral does the bit-level work: START/STOP generation, the
//! repeated start between the command and the read, ACK checking. What it
//! cannot express on its own is SMBus sequencing, so every frame is
//! preceded by a forced STOP and a short bus-free wait, and followed by an
//! explicit STOP.
//!
//! ACKs are only visible per transfer: a failed transfer means some byte
//! of it was not acknowledged, without saying which.

use mlx_core::config::HardwareConfig;
use mlx_core::traits::{SmbusTransport, READ_FRAME_LEN};
use mlx_core::{BusAddress, Error, Mlx90614, Result};
use mlx_hal::{Delay, I2cBus};

/// Protocol driver over a hardware I2C peripheral
pub type HardwareMlx90614<B, D> = Mlx90614<HardwareSmbus<B, D>>;

/// SMBus transport over an [`I2cBus`]
pub struct HardwareSmbus<B, D> {
    bus: B,
    delay: D,
    config: HardwareConfig,
}

impl<B: I2cBus, D: Delay> HardwareSmbus<B, D> {
    /// Create a transport
    ///
    /// The bus is not touched until [`SmbusTransport::init`] or the first
    /// frame.
    pub fn new(bus: B, delay: D, config: HardwareConfig) -> Self {
        Self { bus, delay, config }
    }

    /// Current settings
    pub fn config(&self) -> &HardwareConfig {
        &self.config
    }

    /// Borrow the underlying bus
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Release the bus and delay
    pub fn free(self) -> (B, D) {
        (self.bus, self.delay)
    }

    /// Force the bus idle before a frame
    fn begin(&mut self) {
        self.bus.stop();
        self.delay.delay_us(self.config.bus_free_us);
    }
}

impl<B: I2cBus, D: Delay> SmbusTransport for HardwareSmbus<B, D> {
    fn init(&mut self) {
        self.bus.set_frequency(self.config.frequency_hz());
        self.bus.stop();
    }

    /// `value` is the SCL rate in kHz
    fn set_frequency(&mut self, value: u32) {
        self.config.frequency_khz = value;
        debug!("i2c clock {=u32} kHz", value);
        self.bus.set_frequency(self.config.frequency_hz());
    }

    fn write_frame(&mut self, address: BusAddress, payload: &[u8]) -> Result<()> {
        self.begin();
        if self.bus.write(address.device(), payload).is_err() {
            warn!("i2c write to {=u8:#x} not acknowledged", address.device());
            return Err(Error::Transfer);
        }
        self.bus.stop();
        Ok(())
    }

    fn read_frame(
        &mut self,
        address: BusAddress,
        command: u8,
        buf: &mut [u8; READ_FRAME_LEN],
    ) -> Result<()> {
        self.begin();
        if self
            .bus
            .write_read(address.device(), &[command], buf)
            .is_err()
        {
            warn!("i2c read from {=u8:#x} not acknowledged", address.device());
            return Err(Error::Transfer);
        }
        self.bus.stop();
        Ok(())
    }

    fn settle(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
