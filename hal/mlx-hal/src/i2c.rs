//! I2C bus abstractions
//!
//! Provides the I2C master capability the hardware SMBus transport is built
//! on. Addresses are 7-bit; the peripheral appends the R/W bit.

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices. Each call is one atomic peripheral transfer: the
/// implementation reports failure for the transfer as a whole and does not
/// say which byte was not acknowledged.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;

    /// Force a STOP condition on the bus
    ///
    /// SMBus devices expect the bus to be released between transactions.
    /// Peripherals that always finish with a STOP may implement this as a
    /// no-op.
    fn stop(&mut self);

    /// Change the SCL clock rate
    ///
    /// # Arguments
    /// * `frequency` - SCL frequency in Hz
    fn set_frequency(&mut self, frequency: u32);
}
