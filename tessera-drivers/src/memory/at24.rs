//! AT24C series EEPROM (I2C)
//!
//! Two-byte-addressed EEPROMs (AT24C32 and up). Reads are arbitrary-length
//! sequential reads; writes must respect the device page size, so the
//! driver splits a write at page boundaries and ack-polls between pages
//! until the internal write cycle finishes.

use tessera_hal::{ByteStorage, I2cBus};

/// Default I2C address (A0-A2 low)
pub const ADDR_DEFAULT: u8 = 0x50;

/// Largest page size in the supported family (AT24C256/512)
const MAX_PAGE_SIZE: usize = 64;

/// Number of ack-poll probes before declaring the write cycle stuck
///
/// A write cycle is at most 5 ms; polling is bus-speed bound, so this is
/// well past that on any reasonable clock.
const MAX_ACK_POLLS: u32 = 10_000;

/// AT24C communication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum At24Error<E> {
    /// I2C transaction failed
    Bus(E),
    /// Access past the end of the array
    OutOfBounds,
    /// Device kept nacking after a page write
    WriteTimeout,
}

/// AT24C EEPROM driver
pub struct At24c<I2C> {
    i2c: I2C,
    address: u8,
    capacity: usize,
    page_size: usize,
}

impl<I2C: I2cBus> At24c<I2C> {
    /// Create a driver for an arbitrary family member
    ///
    /// `page_size` is clamped to the 64-byte family maximum.
    pub fn new(i2c: I2C, address: u8, capacity: usize, page_size: usize) -> Self {
        Self {
            i2c,
            address,
            capacity,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// AT24C32: 4 KiB, 32-byte pages
    pub fn c32(i2c: I2C, address: u8) -> Self {
        Self::new(i2c, address, 4096, 32)
    }

    /// AT24C64: 8 KiB, 32-byte pages
    pub fn c64(i2c: I2C, address: u8) -> Self {
        Self::new(i2c, address, 8192, 32)
    }

    /// AT24C256: 32 KiB, 64-byte pages
    pub fn c256(i2c: I2C, address: u8) -> Self {
        Self::new(i2c, address, 32768, 64)
    }

    /// Release the bus
    pub fn free(self) -> I2C {
        self.i2c
    }

    fn check_bounds(&self, address: u32, len: usize) -> Result<(), At24Error<I2C::Error>> {
        let end = (address as usize).checked_add(len);
        match end {
            Some(end) if end <= self.capacity => Ok(()),
            _ => Err(At24Error::OutOfBounds),
        }
    }

    /// Wait out the device's internal write cycle by ack polling
    fn wait_write_cycle(&mut self) -> Result<(), At24Error<I2C::Error>> {
        for _ in 0..MAX_ACK_POLLS {
            if self.i2c.write(self.address, &[]).is_ok() {
                return Ok(());
            }
        }
        Err(At24Error::WriteTimeout)
    }
}

impl<I2C: I2cBus> ByteStorage for At24c<I2C> {
    type Error = At24Error<I2C::Error>;

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn read(&mut self, address: u32, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.check_bounds(address, buf.len())?;
        let pointer = [(address >> 8) as u8, address as u8];
        self.i2c
            .write_read(self.address, &pointer, buf)
            .map_err(At24Error::Bus)
    }

    fn write(&mut self, address: u32, data: &[u8]) -> Result<(), Self::Error> {
        self.check_bounds(address, data.len())?;

        let mut offset = address as usize;
        let mut remaining = data;
        while !remaining.is_empty() {
            let page_room = self.page_size - (offset % self.page_size);
            let chunk_len = remaining.len().min(page_room);
            let (chunk, rest) = remaining.split_at(chunk_len);

            let mut frame = [0u8; 2 + MAX_PAGE_SIZE];
            frame[0] = (offset >> 8) as u8;
            frame[1] = offset as u8;
            frame[2..2 + chunk_len].copy_from_slice(chunk);

            self.i2c
                .write(self.address, &frame[..2 + chunk_len])
                .map_err(At24Error::Bus)?;
            self.wait_write_cycle()?;

            offset += chunk_len;
            remaining = rest;
        }
        Ok(())
    }
}
