//! DS18B20 temperature sensor (one-wire)
//!
//! Single-drop configuration: commands are addressed with SKIP ROM, so
//! exactly one sensor may sit on the bus. A measurement is two phases
//! separated by the conversion time (up to 750 ms at 12-bit resolution,
//! timed by the caller):
//!
//! 1. [`Ds18b20::start_conversion`]
//! 2. [`Ds18b20::read_temperature`]

use tessera_hal::OneWireBus;

/// ROM commands
pub mod cmd {
    /// Address the single device on the bus without its ROM code
    pub const SKIP_ROM: u8 = 0xCC;
    /// Start a temperature conversion
    pub const CONVERT_T: u8 = 0x44;
    /// Read the 9-byte scratchpad
    pub const READ_SCRATCHPAD: u8 = 0xBE;
}

/// Dallas CRC-8 (polynomial 0x8C, bit-reflected, init 0)
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x01 != 0 {
                crc = (crc >> 1) ^ 0x8C;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// DS18B20 communication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ds18b20Error<E> {
    /// One-wire transaction failed
    Bus(E),
    /// No presence pulse after reset
    NoDevice,
    /// Scratchpad CRC mismatch
    CrcMismatch,
}

/// DS18B20 driver
pub struct Ds18b20<W> {
    wire: W,
}

impl<W: OneWireBus> Ds18b20<W> {
    /// Create a driver around a one-wire bus with a single DS18B20 on it
    pub fn new(wire: W) -> Self {
        Self { wire }
    }

    /// Start a temperature conversion
    pub fn start_conversion(&mut self) -> Result<(), Ds18b20Error<W::Error>> {
        self.address()?;
        self.wire
            .write_byte(cmd::CONVERT_T)
            .map_err(Ds18b20Error::Bus)
    }

    /// Read the last converted temperature in 0.1 °C units
    ///
    /// Must follow a completed conversion; reading earlier returns the
    /// power-on value of 85.0 °C.
    pub fn read_temperature(&mut self) -> Result<i16, Ds18b20Error<W::Error>> {
        self.address()?;
        self.wire
            .write_byte(cmd::READ_SCRATCHPAD)
            .map_err(Ds18b20Error::Bus)?;

        let mut scratchpad = [0u8; 9];
        self.wire
            .read_bytes(&mut scratchpad)
            .map_err(Ds18b20Error::Bus)?;

        if crc8(&scratchpad[..8]) != scratchpad[8] {
            return Err(Ds18b20Error::CrcMismatch);
        }

        // 1/16 °C resolution at the default 12 bits
        let raw = i16::from_le_bytes([scratchpad[0], scratchpad[1]]);
        Ok((raw as i32 * 10 / 16) as i16)
    }

    /// Release the bus
    pub fn free(self) -> W {
        self.wire
    }

    fn address(&mut self) -> Result<(), Ds18b20Error<W::Error>> {
        let present = self.wire.reset().map_err(Ds18b20Error::Bus)?;
        if !present {
            return Err(Ds18b20Error::NoDevice);
        }
        self.wire
            .write_byte(cmd::SKIP_ROM)
            .map_err(Ds18b20Error::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Mock one-wire bus serving a scripted scratchpad
    struct MockWire {
        present: bool,
        scratchpad: [u8; 9],
        read_pos: usize,
        written: Vec<u8, 8>,
    }

    impl MockWire {
        fn new(present: bool, scratchpad: [u8; 9]) -> Self {
            Self {
                present,
                scratchpad,
                read_pos: 0,
                written: Vec::new(),
            }
        }
    }

    impl OneWireBus for MockWire {
        type Error = ();

        fn reset(&mut self) -> Result<bool, ()> {
            Ok(self.present)
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), ()> {
            self.written.push(byte).map_err(|_| ())
        }

        fn read_byte(&mut self) -> Result<u8, ()> {
            let byte = self.scratchpad[self.read_pos];
            self.read_pos += 1;
            Ok(byte)
        }
    }

    /// Scratchpad for +25.0625 C (raw 0x0191) with a valid CRC
    const SCRATCHPAD_25C: [u8; 9] = [0x91, 0x01, 0x4B, 0x46, 0x7F, 0xFF, 0x0C, 0x10, 0x70];

    #[test]
    fn test_crc8_matches_scratchpad() {
        assert_eq!(crc8(&SCRATCHPAD_25C[..8]), 0x70);
    }

    #[test]
    fn test_read_temperature() {
        let mut sensor = Ds18b20::new(MockWire::new(true, SCRATCHPAD_25C));
        assert_eq!(sensor.read_temperature(), Ok(250));

        let wire = sensor.free();
        assert_eq!(wire.written.as_slice(), &[cmd::SKIP_ROM, cmd::READ_SCRATCHPAD]);
    }

    #[test]
    fn test_negative_temperature() {
        // raw 0xFE6F = -25.0625 C
        let scratchpad = [0x6F, 0xFE, 0x4B, 0x46, 0x7F, 0xFF, 0x0C, 0x10, 0xE8];
        let mut sensor = Ds18b20::new(MockWire::new(true, scratchpad));
        assert_eq!(sensor.read_temperature(), Ok(-250));
    }

    #[test]
    fn test_missing_device() {
        let mut sensor = Ds18b20::new(MockWire::new(false, SCRATCHPAD_25C));
        assert_eq!(sensor.start_conversion(), Err(Ds18b20Error::NoDevice));
    }

    #[test]
    fn test_corrupted_scratchpad() {
        let mut scratchpad = SCRATCHPAD_25C;
        scratchpad[0] ^= 0x01;
        let mut sensor = Ds18b20::new(MockWire::new(true, scratchpad));
        assert_eq!(sensor.read_temperature(), Err(Ds18b20Error::CrcMismatch));
    }

    #[test]
    fn test_start_conversion_command_sequence() {
        let mut sensor = Ds18b20::new(MockWire::new(true, SCRATCHPAD_25C));
        sensor.start_conversion().unwrap();

        let wire = sensor.free();
        assert_eq!(wire.written.as_slice(), &[cmd::SKIP_ROM, cmd::CONVERT_T]);
    }
}
