//! SMBus signaling on two GPIO lines
//!
//! Bus conditions and byte transfers synthesized from line transitions.
//! SCL is driven push-pull. SDA is open-drain emulated: released (input,
//! pulled high by the bus) for a 1, driven low for a 0.
//!
//! Every transition is separated by one or more wait units of `bit_delay`
//! spin iterations. There is no clock stretching support: SCL is never read
//! back, so the timing of a frame is fully determined by the wait unit.

use mlx_core::{Error, Result};
use mlx_hal::{Delay, FlexPin, OutputPin};

/// The two bus lines, a delay source and the wait unit
pub struct Lines<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
    bit_delay: u32,
}

impl<SCL, SDA, D> Lines<SCL, SDA, D>
where
    SCL: OutputPin,
    SDA: FlexPin,
    D: Delay,
{
    /// Take ownership of the lines
    ///
    /// The line levels are left untouched; call [`Lines::stop`] to idle the
    /// bus.
    pub fn new(scl: SCL, sda: SDA, delay: D, bit_delay: u32) -> Self {
        Self {
            scl,
            sda,
            delay,
            bit_delay,
        }
    }

    /// Spin iterations per wait unit
    pub fn bit_delay(&self) -> u32 {
        self.bit_delay
    }

    /// Change the wait unit
    pub fn set_bit_delay(&mut self, bit_delay: u32) {
        self.bit_delay = bit_delay;
    }

    /// Borrow the delay source
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Give the lines and delay back
    pub fn free(self) -> (SCL, SDA, D) {
        (self.scl, self.sda, self.delay)
    }

    /// One wait unit
    pub fn wait(&mut self) {
        self.delay.spin(self.bit_delay);
    }

    /// START: SDA falls while SCL is high
    pub fn start(&mut self) {
        self.sda.release();
        self.scl.set_high();
        self.wait();
        self.wait();
        self.sda.drive_low();
        self.wait();
        self.scl.set_low();
        self.wait();
    }

    /// STOP: SDA rises while SCL is high, leaving both lines high
    pub fn stop(&mut self) {
        self.scl.set_low();
        self.sda.drive_low();
        self.wait();
        self.scl.set_high();
        self.wait();
        self.sda.release();
        self.wait();
    }

    /// Repeated START without releasing the bus
    pub fn repeated_start(&mut self) {
        self.scl.set_low();
        self.wait();
        self.sda.release();
        self.wait();
        self.scl.set_high();
        self.wait();
        self.sda.drive_low();
        self.wait();
        self.scl.set_low();
    }

    /// Clock out a byte MSB first and check the slave's acknowledge
    ///
    /// Returns [`Error::Transfer`] on NACK.
    pub fn send_byte(&mut self, byte: u8) -> Result<()> {
        let mut bits = byte;
        for _ in 0..8 {
            self.wait();
            if bits & 0x80 != 0 {
                self.sda.release();
            } else {
                self.sda.drive_low();
            }
            self.wait();
            self.scl.set_high();
            self.wait();
            self.wait();
            self.scl.set_low();
            bits <<= 1;
        }

        self.wait();
        if self.receive_ack() {
            Ok(())
        } else {
            Err(Error::Transfer)
        }
    }

    /// Clock in `buf.len()` bytes MSB first
    ///
    /// Each byte is acknowledged by the master. With `nack_last` the final
    /// byte gets a NACK instead, telling the slave the read is over.
    pub fn receive_bytes(&mut self, buf: &mut [u8], nack_last: bool) {
        let count = buf.len();
        for (i, slot) in buf.iter_mut().enumerate() {
            self.wait();
            self.sda.release();

            let mut data = 0u8;
            for _ in 0..8 {
                self.wait();
                self.scl.set_high();
                self.wait();
                data <<= 1;
                if self.sda.is_high() {
                    data |= 1;
                }
                self.wait();
                self.scl.set_low();
                self.wait();
            }

            if nack_last && i + 1 == count {
                self.send_nack();
            } else {
                self.send_ack();
            }
            *slot = data;
        }
    }

    /// Master acknowledge: SDA low during one clock pulse
    pub fn send_ack(&mut self) {
        self.sda.drive_low();
        self.wait();
        self.scl.set_high();
        self.wait();
        self.wait();
        self.scl.set_low();
        self.wait();
        self.sda.release();
    }

    /// Master not-acknowledge: SDA released during one clock pulse
    pub fn send_nack(&mut self) {
        self.sda.release();
        self.wait();
        self.scl.set_high();
        self.wait();
        self.wait();
        self.scl.set_low();
        self.wait();
        self.sda.release();
    }

    /// Sample the slave's acknowledge; `true` if SDA was pulled low
    ///
    /// SDA is left driven low afterwards.
    pub fn receive_ack(&mut self) -> bool {
        self.sda.release();
        self.wait();
        self.scl.set_high();
        self.wait();
        let ack = self.sda.is_low();
        self.wait();
        self.scl.set_low();
        self.sda.drive_low();
        ack
    }

    /// Wait for a released SDA to read high
    ///
    /// Polls once, then once per wait unit up to `polls` more times.
    /// Returns [`Error::Timeout`] if the line is still held low.
    pub fn wait_idle(&mut self, polls: u32) -> Result<()> {
        self.sda.release();
        let mut remaining = polls;
        loop {
            if self.sda.is_high() {
                return Ok(());
            }
            if remaining == 0 {
                return Err(Error::Timeout);
            }
            remaining -= 1;
            self.wait();
        }
    }
}
