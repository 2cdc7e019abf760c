//! Blocking delay abstractions
//!
//! Two kinds of waits are needed: wall-clock waits (bus-free time, EEPROM
//! programming) and raw spin iterations. The bit-banged transport times every
//! line transition with spin iterations because the right count depends on
//! the instruction timing of the host, which is calibrated at runtime.

/// Blocking delay provider
pub trait Delay {
    /// Block for at least `us` microseconds
    fn delay_us(&mut self, us: u32);

    /// Block for at least `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }

    /// Busy-wait for `iterations` loop iterations
    ///
    /// No wall-clock meaning is attached to an iteration.
    fn spin(&mut self, iterations: u32) {
        for _ in 0..iterations {
            core::hint::spin_loop();
        }
    }
}

impl<D: Delay + ?Sized> Delay for &mut D {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }

    fn spin(&mut self, iterations: u32) {
        (**self).spin(iterations)
    }
}

/// Pure busy-loop delay
///
/// Converts wall-clock waits to spin iterations using a calibration factor.
/// Useful on targets without a timer driver; accuracy is whatever the
/// calibration gives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpinDelay {
    /// Spin iterations that take one microsecond on this host
    pub iterations_per_us: u32,
}

impl SpinDelay {
    /// Create a spin delay with the given calibration
    pub const fn new(iterations_per_us: u32) -> Self {
        Self { iterations_per_us }
    }

    /// Spin iterations covering `us` microseconds, saturating
    pub const fn iterations_for(&self, us: u32) -> u32 {
        us.saturating_mul(self.iterations_per_us)
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        // 24 iterations per µs, i.e. 24000 per ms
        Self::new(24)
    }
}

impl Delay for SpinDelay {
    fn delay_us(&mut self, us: u32) {
        self.spin(self.iterations_for(us));
    }
}
