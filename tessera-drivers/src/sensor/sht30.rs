//! SHT30 temperature/humidity sensor (I2C)
//!
//! Sensirion SHT3x family, single-shot mode with clock stretching. Each
//! measurement returns two 16-bit words (temperature, humidity), each
//! followed by a CRC-8 byte.
//!
//! Conversions per datasheet:
//! - T[°C] = -45 + 175 * raw / 65535
//! - RH[%] = 100 * raw / 65535
//!
//! Values are reported in 0.1-unit integers (e.g. 250 = 25.0 °C).

use tessera_hal::I2cBus;

/// Default I2C address (ADDR pin low)
pub const ADDR_DEFAULT: u8 = 0x44;
/// Alternate I2C address (ADDR pin high)
pub const ADDR_ALT: u8 = 0x45;

/// Command words
pub mod cmd {
    /// Single-shot, high repeatability, clock stretching enabled
    pub const MEASURE_HIGH_STRETCH: [u8; 2] = [0x2C, 0x06];
    /// Soft reset
    pub const SOFT_RESET: [u8; 2] = [0x30, 0xA2];
    /// Internal heater on
    pub const HEATER_ON: [u8; 2] = [0x30, 0x6D];
    /// Internal heater off
    pub const HEATER_OFF: [u8; 2] = [0x30, 0x66];
    /// Read status register
    pub const READ_STATUS: [u8; 2] = [0xF3, 0x2D];
    /// Clear status register
    pub const CLEAR_STATUS: [u8; 2] = [0x30, 0x41];
}

/// CRC-8 over a measurement word
///
/// Polynomial 0x31 (x^8 + x^5 + x^4 + 1), init 0xFF, as specified by
/// Sensirion. The datasheet test vector is crc8(0xBE, 0xEF) = 0x92.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0xFFu8;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            if crc & 0x80 != 0 {
                crc = (crc << 1) ^ 0x31;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// SHT30 communication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sht30Error<E> {
    /// I2C transaction failed
    Bus(E),
    /// CRC mismatch on a measurement word
    CrcMismatch,
}

/// One measurement result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Temperature in 0.1 °C units
    pub temperature_x10: i16,
    /// Relative humidity in 0.1 % units
    pub humidity_x10: u16,
}

/// SHT30 driver
pub struct Sht30<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2cBus> Sht30<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, ADDR_DEFAULT)
    }

    /// Create a driver at a specific address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Perform one single-shot measurement
    ///
    /// Uses clock stretching, so the read completes once the sensor is
    /// done converting (up to ~15 ms at high repeatability).
    pub fn measure(&mut self) -> Result<Measurement, Sht30Error<I2C::Error>> {
        let mut buf = [0u8; 6];
        self.i2c
            .write_read(self.address, &cmd::MEASURE_HIGH_STRETCH, &mut buf)
            .map_err(Sht30Error::Bus)?;

        let raw_temp = word(&buf[0..3])?;
        let raw_rh = word(&buf[3..6])?;

        Ok(Measurement {
            temperature_x10: convert_temperature(raw_temp),
            humidity_x10: convert_humidity(raw_rh),
        })
    }

    /// Issue a soft reset
    pub fn soft_reset(&mut self) -> Result<(), Sht30Error<I2C::Error>> {
        self.i2c
            .write(self.address, &cmd::SOFT_RESET)
            .map_err(Sht30Error::Bus)
    }

    /// Switch the built-in heater (plausibility checks, condensation)
    pub fn set_heater(&mut self, on: bool) -> Result<(), Sht30Error<I2C::Error>> {
        let command = if on { cmd::HEATER_ON } else { cmd::HEATER_OFF };
        self.i2c
            .write(self.address, &command)
            .map_err(Sht30Error::Bus)
    }

    /// Release the bus
    pub fn free(self) -> I2C {
        self.i2c
    }
}

/// Extract and CRC-check one [msb, lsb, crc] word
fn word<E>(bytes: &[u8]) -> Result<u16, Sht30Error<E>> {
    if crc8(&bytes[0..2]) != bytes[2] {
        return Err(Sht30Error::CrcMismatch);
    }
    Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
}

/// Raw temperature word to 0.1 °C units
fn convert_temperature(raw: u16) -> i16 {
    (-450 + (1750 * raw as i32) / 65535) as i16
}

/// Raw humidity word to 0.1 % units
fn convert_humidity(raw: u16) -> u16 {
    ((1000 * raw as u32) / 65535) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock I2C bus that returns a canned measurement frame
    struct MockI2c {
        response: [u8; 6],
        last_command: [u8; 2],
    }

    impl I2cBus for MockI2c {
        type Error = ();

        fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), ()> {
            self.last_command.copy_from_slice(data);
            Ok(())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), ()> {
            Err(())
        }

        fn write_read(&mut self, _address: u8, data: &[u8], buf: &mut [u8]) -> Result<(), ()> {
            self.last_command.copy_from_slice(data);
            buf.copy_from_slice(&self.response);
            Ok(())
        }
    }

    #[test]
    fn test_crc8_datasheet_vector() {
        assert_eq!(crc8(&[0xBE, 0xEF]), 0x92);
    }

    #[test]
    fn test_measure_converts_raw_words() {
        // raw_temp 0x6666 -> 25.0 C, raw_rh 0x9999 -> 60.0 %
        let i2c = MockI2c {
            response: [0x66, 0x66, crc8(&[0x66, 0x66]), 0x99, 0x99, crc8(&[0x99, 0x99])],
            last_command: [0; 2],
        };
        let mut sensor = Sht30::new(i2c);

        let m = sensor.measure().unwrap();
        assert_eq!(m.temperature_x10, 250);
        assert_eq!(m.humidity_x10, 600);

        let i2c = sensor.free();
        assert_eq!(i2c.last_command, cmd::MEASURE_HIGH_STRETCH);
    }

    #[test]
    fn test_corrupted_word_is_rejected() {
        let mut response = [0x66, 0x66, crc8(&[0x66, 0x66]), 0x99, 0x99, 0x00];
        response[5] = response[5].wrapping_add(1); // ensure a bad humidity CRC
        let i2c = MockI2c {
            response,
            last_command: [0; 2],
        };
        let mut sensor = Sht30::new(i2c);

        assert_eq!(sensor.measure(), Err(Sht30Error::CrcMismatch));
    }

    #[test]
    fn test_negative_temperature() {
        // raw 0 -> -45.0 C
        assert_eq!(convert_temperature(0), -450);
        // raw max -> 130.0 C
        assert_eq!(convert_temperature(0xFFFF), 1300);
    }
}
