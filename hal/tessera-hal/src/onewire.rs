//! Dallas one-wire bus abstractions
//!
//! Provides a trait for one-wire master transactions (reset pulse plus
//! byte-level read/write). Bit timing belongs to the implementation.

/// One-wire bus master
pub trait OneWireBus {
    /// Error type for one-wire operations
    type Error;

    /// Issue a reset pulse and sample for device presence
    ///
    /// Returns `true` if at least one device answered the presence slot.
    fn reset(&mut self) -> Result<bool, Self::Error>;

    /// Write a single byte, LSB first
    fn write_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Read a single byte, LSB first
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Write a sequence of bytes
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        for &byte in data {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Read a sequence of bytes
    fn read_bytes(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        for byte in buf.iter_mut() {
            *byte = self.read_byte()?;
        }
        Ok(())
    }
}
