//! Byte-addressable storage abstractions
//!
//! Provides a trait for memory modules (EEPROM, FRAM) that expose a flat
//! byte address space. Wear characteristics and write granularity are the
//! implementation's concern; callers see plain reads and writes.

/// Byte-addressable read/write storage
pub trait ByteStorage {
    /// Error type for storage operations
    type Error;

    /// Total capacity in bytes
    fn capacity(&self) -> usize;

    /// Read `buf.len()` bytes starting at `address`
    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write all of `data` starting at `address`
    ///
    /// Blocks until the device has committed the data.
    fn write(&mut self, address: u32, data: &[u8]) -> Result<(), Self::Error>;
}
