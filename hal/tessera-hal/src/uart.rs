//! UART serial communication abstractions
//!
//! Provides traits for serial communication that can be implemented by
//! platform HALs. Baud rate, framing, and flow control are configured by
//! the platform before a port is handed to a driver.

/// UART transmitter
///
/// Trait for sending data over a UART interface.
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
///
/// Trait for receiving data from a UART interface. Reads are
/// chunk-oriented: a call returns whatever is currently available, which
/// may be any number of bytes including zero. Consumers that need message
/// boundaries must reassemble them (see `tessera-nmea`).
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read available data from the UART
    ///
    /// Returns the number of bytes placed in `buf`, which may be zero if
    /// nothing is pending. Never waits for `buf` to fill.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}
