//! GPIO line abstractions
//!
//! The bit-banged SMBus transport needs a push-pull clock line and a data
//! line that can be switched between driving low and floating as an input.
//! Switching direction is how open-drain signaling is emulated on pins that
//! have no open-drain mode: a released line is pulled high by the bus
//! resistors, a driven line is held low.

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    ///
    /// Takes `&mut self` because sampling may touch peripheral state.
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Pin whose direction can change at runtime
///
/// Used for the SMBus data line. The level read through [`InputPin`] is the
/// actual line level, so it reflects a slave pulling the bus low while the
/// pin is an input.
pub trait FlexPin: OutputPin + InputPin {
    /// Stop driving the line and sample it as an input
    fn set_as_input(&mut self);

    /// Drive the line with the last set output level
    fn set_as_output(&mut self);

    /// Whether the pin is currently driving the line
    fn is_output(&self) -> bool;

    /// Release the line (open-drain "high")
    fn release(&mut self) {
        self.set_as_input();
    }

    /// Pull the line low (open-drain "low")
    ///
    /// The output latch is cleared before the driver is enabled so the pin
    /// never glitches high while switching direction.
    fn drive_low(&mut self) {
        self.set_low();
        self.set_as_output();
    }
}
