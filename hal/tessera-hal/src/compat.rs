//! Ecosystem compatibility adapters
//!
//! Blanket implementations of the Tessera capability traits for types that
//! already implement the corresponding `embedded-hal` 1.0 or `embedded-io`
//! traits, so drivers work unchanged on top of any mainstream platform HAL.
//!
//! GPIO is not adapted: `embedded-hal` pins are fallible, while Tessera
//! pins are infallible; swallowing pin errors in an adapter would hide
//! faults. Platforms with fallible pins provide a thin wrapper instead.

use crate::i2c::I2cBus;
use crate::spi::SpiBus;
use crate::uart::{UartRx, UartTx};

impl<T> I2cBus for T
where
    T: embedded_hal::i2c::I2c,
{
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::write(self, address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::read(self, address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        embedded_hal::i2c::I2c::write_read(self, address, write_data, read_buf)
    }
}

impl<T> SpiBus for T
where
    T: embedded_hal::spi::SpiBus,
{
    type Error = T::Error;

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::transfer(self, read, write)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::write(self, data)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::read(self, buf)
    }

    fn transfer_in_place(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        embedded_hal::spi::SpiBus::transfer_in_place(self, data)
    }
}

impl<T> UartTx for T
where
    T: embedded_io::Write,
{
    type Error = T::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        embedded_io::Write::write_all(self, data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        embedded_io::Write::flush(self)
    }
}

/// `embedded_io::Read` waits until at least one byte is available, so a
/// port adapted this way never returns `Ok(0)`. Platforms that need a
/// true non-waiting poll implement [`UartRx`] directly (checking
/// `embedded_io::ReadReady` first, where available).
impl<T> UartRx for T
where
    T: embedded_io::Read,
{
    type Error = T::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        embedded_io::Read::read(self, buf)
    }
}
