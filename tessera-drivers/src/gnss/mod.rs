//! GNSS receiver module (UART, NMEA 0183)
//!
//! The receiver streams NMEA sentences over a UART at its own pace. This
//! driver owns the frame assembler from `tessera-nmea` and splits the work
//! across the two contexts the hardware imposes:
//!
//! - [`GnssModule::handle_rx`] runs on the byte-arrival path (interrupt or
//!   DMA callback). It only feeds the assembler; it cannot block or fail.
//! - [`GnssModule::poll`] is the pull-mode alternative for platforms that
//!   expose a non-blocking UART read instead of a callback.
//! - [`GnssModule::next_sentence`] runs in the consumer context: it takes
//!   one completed frame, decodes it, and folds the result into the
//!   accumulated [`NavState`].
//!
//! Outbound configuration commands (e.g. PMTK rate setup) are signed with
//! the same checksum and written through [`GnssModule::send_command`].

mod nav;

pub use nav::NavState;

use tessera_hal::{UartRx, UartTx};
use tessera_nmea::{
    decode, encode_command, AssemblerStats, CommandError, DecodeError, FrameAssembler, Sentence,
};

/// Scratch buffer size for pull-mode UART reads
const RX_BUF_SIZE: usize = 64;

/// Errors from GNSS command transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GnssError<E> {
    /// Command body could not be encoded
    Command(CommandError),
    /// UART write failed
    Uart(E),
}

/// GNSS receiver module driver
pub struct GnssModule<U> {
    uart: U,
    assembler: FrameAssembler,
    nav: NavState,
    decode_errors: u32,
}

impl<U> GnssModule<U> {
    /// Create a driver around an opened UART
    ///
    /// Port configuration (baud rate, module power) happens before the
    /// port is handed over.
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            assembler: FrameAssembler::new(),
            nav: NavState::default(),
            decode_errors: 0,
        }
    }

    /// Feed received bytes from the byte-arrival path
    ///
    /// Safe to call with any chunk size, including empty. Never blocks.
    pub fn handle_rx(&mut self, chunk: &[u8]) {
        self.assembler.feed(chunk);
    }

    /// Decode the oldest completed frame, if any
    ///
    /// Returns `None` when no frame is waiting. Decode failures are
    /// reported per frame and counted; the stream keeps going.
    pub fn next_sentence(&mut self) -> Option<Result<Sentence, DecodeError>> {
        let frame = self.assembler.take_ready()?;
        match decode(&frame) {
            Ok(sentence) => {
                self.nav.apply(&sentence);
                Some(Ok(sentence))
            }
            Err(err) => {
                self.decode_errors = self.decode_errors.wrapping_add(1);
                Some(Err(err))
            }
        }
    }

    /// The navigation state accumulated from decoded sentences
    pub fn navigation(&self) -> &NavState {
        &self.nav
    }

    /// Frame assembler diagnostics counters
    pub fn assembler_stats(&self) -> AssemblerStats {
        self.assembler.stats()
    }

    /// Number of frames that failed to decode
    pub fn decode_errors(&self) -> u32 {
        self.decode_errors
    }

    /// Release the UART
    pub fn free(self) -> U {
        self.uart
    }
}

impl<U: UartRx> GnssModule<U> {
    /// Pull pending bytes from the UART and feed the assembler
    ///
    /// Returns the number of bytes consumed; zero means nothing was
    /// pending. Call [`GnssModule::next_sentence`] afterwards to drain any
    /// frames this completed.
    pub fn poll(&mut self) -> Result<usize, U::Error> {
        let mut buf = [0u8; RX_BUF_SIZE];
        let count = self.uart.read(&mut buf)?;
        self.assembler.feed(&buf[..count]);
        Ok(count)
    }
}

impl<U: UartTx> GnssModule<U> {
    /// Sign a command body and transmit it
    ///
    /// The body is wrapped as `$<body>*HH\r\n` on the wire.
    pub fn send_command(&mut self, body: &str) -> Result<(), GnssError<U::Error>> {
        let cmd = encode_command(body).map_err(GnssError::Command)?;
        self.uart
            .write_blocking(cmd.as_bytes())
            .map_err(GnssError::Uart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;
    use tessera_nmea::{FixQuality, FixStatus};

    /// Mock UART that serves scripted RX bytes and records TX bytes
    struct MockUart {
        rx: Vec<u8, 256>,
        rx_pos: usize,
        /// Largest chunk a single read may return
        chunk: usize,
        tx: Vec<u8, 256>,
    }

    impl MockUart {
        fn new(rx: &[u8], chunk: usize) -> Self {
            let mut buf = Vec::new();
            buf.extend_from_slice(rx).unwrap();
            Self {
                rx: buf,
                rx_pos: 0,
                chunk,
                tx: Vec::new(),
            }
        }
    }

    impl UartRx for MockUart {
        type Error = ();

        fn read(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            let remaining = &self.rx[self.rx_pos..];
            let count = remaining.len().min(buf.len()).min(self.chunk);
            buf[..count].copy_from_slice(&remaining[..count]);
            self.rx_pos += count;
            Ok(count)
        }
    }

    impl UartTx for MockUart {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            self.tx.extend_from_slice(data).map_err(|_| ())
        }

        fn flush(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    const RMC: &[u8] =
        b"$GPRMC,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\r\n";
    const GGA: &[u8] = b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47\r\n";

    #[test]
    fn test_poll_and_decode() {
        let mut stream: Vec<u8, 256> = Vec::new();
        stream.extend_from_slice(RMC).unwrap();
        stream.extend_from_slice(GGA).unwrap();

        // Serve the stream in awkward 7-byte reads.
        let mut gnss = GnssModule::new(MockUart::new(&stream, 7));
        while gnss.poll().unwrap() > 0 {}

        assert!(matches!(gnss.next_sentence(), Some(Ok(Sentence::Rmc(_)))));
        assert!(matches!(gnss.next_sentence(), Some(Ok(Sentence::Gga(_)))));
        assert!(gnss.next_sentence().is_none());

        // The fix is assembled across both sentences.
        let nav = gnss.navigation();
        assert!(nav.has_fix());
        assert_eq!(nav.fix_status, Some(FixStatus::Active));
        assert_eq!(nav.quality, Some(FixQuality::Gps));
        assert_eq!(nav.satellites_in_use, Some(8));
        assert!((nav.latitude.unwrap().to_degrees() - 48.1173).abs() < 1e-3);
        assert!((nav.altitude_m.unwrap() - 545.4).abs() < 1e-3);
        assert_eq!(nav.date.map(|d| d.full_year()), Some(1994));
    }

    #[test]
    fn test_handle_rx_callback_path() {
        let mut gnss: GnssModule<()> = GnssModule::new(());
        // Deliver across two arbitrary chunks, with leading garbage.
        gnss.handle_rx(b"garbage$GPRM");
        gnss.handle_rx(b"C,123519,A,4807.038,N,01131.000,E,022.4,084.4,230394,003.1,W*6A\n");

        assert!(matches!(gnss.next_sentence(), Some(Ok(Sentence::Rmc(_)))));
        assert!(gnss.next_sentence().is_none());
    }

    #[test]
    fn test_corrupt_frame_is_counted_not_fatal() {
        let mut gnss: GnssModule<()> = GnssModule::new(());
        gnss.handle_rx(b"$GPGLL,bad*00\n");
        gnss.handle_rx(RMC);

        assert_eq!(
            gnss.next_sentence(),
            Some(Err(DecodeError::ChecksumMismatch))
        );
        assert!(matches!(gnss.next_sentence(), Some(Ok(_))));
        assert_eq!(gnss.decode_errors(), 1);
        // The corrupt frame never touched the accumulated state.
        assert!(gnss.navigation().has_fix());
    }

    #[test]
    fn test_send_command() {
        let mut gnss = GnssModule::new(MockUart::new(b"", 0));
        gnss.send_command("PMTK251,38400").unwrap();

        let uart = gnss.free();
        assert_eq!(uart.tx.as_slice(), b"$PMTK251,38400*27\r\n");
    }

    #[test]
    fn test_send_command_rejects_bad_body() {
        let mut gnss = GnssModule::new(MockUart::new(b"", 0));
        assert_eq!(
            gnss.send_command("PMTK*oops"),
            Err(GnssError::Command(CommandError::InvalidBody))
        );
    }
}
