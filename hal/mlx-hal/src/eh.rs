//! Adapters from `embedded-hal` 1.0 onto the capability traits
//!
//! Lets any HAL that implements the standard blocking traits drive the
//! SMBus transports without writing glue code. Pin adapters require
//! infallible pins, which is what on-chip GPIO drivers provide.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital;
use embedded_hal::i2c;

use crate::delay::Delay;
use crate::gpio::{FlexPin, InputPin, OutputPin};
use crate::i2c::I2cBus;

/// [`I2cBus`] over an `embedded_hal::i2c::I2c` implementation
///
/// embedded-hal transfers always end with a STOP, so [`I2cBus::stop`] is a
/// no-op. The trait has no way to change the clock rate; requested rates
/// are recorded in [`EhI2c::requested_frequency`] for the owner to apply.
pub struct EhI2c<T> {
    bus: T,
    requested_frequency: Option<u32>,
}

impl<T> EhI2c<T> {
    /// Wrap an embedded-hal I2C bus
    pub fn new(bus: T) -> Self {
        Self {
            bus,
            requested_frequency: None,
        }
    }

    /// Last clock rate asked for through [`I2cBus::set_frequency`], in Hz
    pub fn requested_frequency(&self) -> Option<u32> {
        self.requested_frequency
    }

    /// Release the wrapped bus
    pub fn free(self) -> T {
        self.bus
    }
}

impl<T: i2c::I2c> I2cBus for EhI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.bus.write_read(address, write_data, read_buf)
    }

    fn stop(&mut self) {}

    fn set_frequency(&mut self, frequency: u32) {
        self.requested_frequency = Some(frequency);
    }
}

/// [`Delay`] over an `embedded_hal::delay::DelayNs` implementation
pub struct EhDelay<D>(pub D);

impl<D: DelayNs> Delay for EhDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.0.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.delay_ms(ms);
    }
}

fn infallible(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

/// [`OutputPin`] over a push-pull embedded-hal output
///
/// The driven level is tracked locally so reading it back needs no access
/// to the pin.
pub struct EhOutput<P> {
    pin: P,
    high: bool,
}

impl<P> EhOutput<P> {
    /// Wrap an output pin, assuming it currently drives `initial_high`
    pub fn new(pin: P, initial_high: bool) -> Self {
        Self {
            pin,
            high: initial_high,
        }
    }

    /// Release the wrapped pin
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOutput<P>
where
    P: digital::OutputPin + digital::ErrorType<Error = Infallible>,
{
    fn set_high(&mut self) {
        infallible(self.pin.set_high());
        self.high = true;
    }

    fn set_low(&mut self) {
        infallible(self.pin.set_low());
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// [`FlexPin`] over an open-drain embedded-hal pin
///
/// The pin must be configured as open-drain with input sampling enabled.
/// "Input" is emulated by writing the pin high, which releases the line.
pub struct EhOpenDrain<P> {
    pin: P,
    latch_high: bool,
    output: bool,
}

impl<P> EhOpenDrain<P> {
    /// Wrap an open-drain pin; it starts released
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            latch_high: true,
            output: false,
        }
    }

    /// Release the wrapped pin
    pub fn free(self) -> P {
        self.pin
    }
}

impl<P> OutputPin for EhOpenDrain<P>
where
    P: digital::OutputPin + digital::InputPin + digital::ErrorType<Error = Infallible>,
{
    fn set_high(&mut self) {
        self.latch_high = true;
        if self.output {
            infallible(self.pin.set_high());
        }
    }

    fn set_low(&mut self) {
        self.latch_high = false;
        if self.output {
            infallible(self.pin.set_low());
        }
    }

    fn is_set_high(&self) -> bool {
        self.latch_high
    }
}

impl<P> InputPin for EhOpenDrain<P>
where
    P: digital::OutputPin + digital::InputPin + digital::ErrorType<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(level) => level,
            Err(never) => match never {},
        }
    }
}

impl<P> FlexPin for EhOpenDrain<P>
where
    P: digital::OutputPin + digital::InputPin + digital::ErrorType<Error = Infallible>,
{
    fn set_as_input(&mut self) {
        self.output = false;
        infallible(self.pin.set_high());
    }

    fn set_as_output(&mut self) {
        self.output = true;
        infallible(self.pin.set_state(self.latch_high.into()));
    }

    fn is_output(&self) -> bool {
        self.output
    }
}
