//! Quad relay module (I2C)
//!
//! Four relays behind a single control register, each with a paired
//! indicator LED. Register map:
//!
//! - `0x10` MODE: bit 0 = sync (LED follows its relay automatically)
//! - `0x11` STATE: bits 0-3 relay channels, bits 4-7 indicator LEDs
//!
//! The driver caches the state register and does read-free
//! modify-then-write updates.

use tessera_hal::I2cBus;

/// Default I2C address
pub const ADDR_DEFAULT: u8 = 0x26;

/// Mode register (sync bit)
pub const REG_MODE: u8 = 0x10;
/// Relay/LED state register
pub const REG_STATE: u8 = 0x11;

/// Number of relay channels
pub const CHANNELS: u8 = 4;

/// Quad relay errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Relay4Error<E> {
    /// I2C transaction failed
    Bus(E),
    /// Channel index out of range (0-3)
    InvalidChannel,
}

/// Quad relay module driver
pub struct Relay4<I2C> {
    i2c: I2C,
    address: u8,
    state: u8,
}

impl<I2C: I2cBus> Relay4<I2C> {
    /// Create a driver at the default address
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, ADDR_DEFAULT)
    }

    /// Create a driver at a specific address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            state: 0,
        }
    }

    /// Initialize the module: sync LED mode, everything off
    pub fn init(&mut self) -> Result<(), Relay4Error<I2C::Error>> {
        self.set_sync_mode(true)?;
        self.set_all(false)
    }

    /// Put the module in sync (LED follows relay) or independent LED mode
    pub fn set_sync_mode(&mut self, sync: bool) -> Result<(), Relay4Error<I2C::Error>> {
        self.write_reg(REG_MODE, sync as u8)
    }

    /// Switch one relay channel (0-3)
    pub fn set_relay(&mut self, channel: u8, on: bool) -> Result<(), Relay4Error<I2C::Error>> {
        if channel >= CHANNELS {
            return Err(Relay4Error::InvalidChannel);
        }
        let bit = 1u8 << channel;
        let state = if on {
            self.state | bit
        } else {
            self.state & !bit
        };
        self.write_state(state)
    }

    /// Switch one indicator LED (0-3), for modules in independent LED mode
    pub fn set_led(&mut self, channel: u8, on: bool) -> Result<(), Relay4Error<I2C::Error>> {
        if channel >= CHANNELS {
            return Err(Relay4Error::InvalidChannel);
        }
        let bit = 1u8 << (channel + 4);
        let state = if on {
            self.state | bit
        } else {
            self.state & !bit
        };
        self.write_state(state)
    }

    /// Switch all relays at once
    pub fn set_all(&mut self, on: bool) -> Result<(), Relay4Error<I2C::Error>> {
        let state = if on {
            self.state | 0x0F
        } else {
            self.state & !0x0F
        };
        self.write_state(state)
    }

    /// Cached state of one relay channel
    pub fn is_on(&self, channel: u8) -> bool {
        channel < CHANNELS && self.state & (1 << channel) != 0
    }

    /// Release the bus
    pub fn free(self) -> I2C {
        self.i2c
    }

    fn write_state(&mut self, state: u8) -> Result<(), Relay4Error<I2C::Error>> {
        self.write_reg(REG_STATE, state)?;
        self.state = state;
        Ok(())
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Relay4Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[reg, value])
            .map_err(Relay4Error::Bus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapless::Vec;

    /// Mock I2C bus recording register writes
    struct MockI2c {
        writes: Vec<(u8, u8), 16>,
        fail: bool,
    }

    impl MockI2c {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail: false,
            }
        }
    }

    impl I2cBus for MockI2c {
        type Error = ();

        fn write(&mut self, _address: u8, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push((data[0], data[1])).map_err(|_| ())
        }

        fn read(&mut self, _address: u8, _buf: &mut [u8]) -> Result<(), ()> {
            Err(())
        }

        fn write_read(&mut self, _address: u8, _data: &[u8], _buf: &mut [u8]) -> Result<(), ()> {
            Err(())
        }
    }

    #[test]
    fn test_init_sequence() {
        let mut relays = Relay4::new(MockI2c::new());
        relays.init().unwrap();

        let i2c = relays.free();
        assert_eq!(i2c.writes.as_slice(), &[(REG_MODE, 1), (REG_STATE, 0)]);
    }

    #[test]
    fn test_individual_channels_accumulate() {
        let mut relays = Relay4::new(MockI2c::new());
        relays.set_relay(0, true).unwrap();
        relays.set_relay(2, true).unwrap();
        relays.set_relay(0, false).unwrap();

        assert!(!relays.is_on(0));
        assert!(relays.is_on(2));

        let i2c = relays.free();
        assert_eq!(
            i2c.writes.as_slice(),
            &[(REG_STATE, 0b0001), (REG_STATE, 0b0101), (REG_STATE, 0b0100)]
        );
    }

    #[test]
    fn test_leds_use_high_nibble() {
        let mut relays = Relay4::new(MockI2c::new());
        relays.set_led(1, true).unwrap();

        let i2c = relays.free();
        assert_eq!(i2c.writes.as_slice(), &[(REG_STATE, 0b0010_0000)]);
    }

    #[test]
    fn test_invalid_channel() {
        let mut relays = Relay4::new(MockI2c::new());
        assert_eq!(relays.set_relay(4, true), Err(Relay4Error::InvalidChannel));
        assert!(!relays.is_on(7));
    }

    #[test]
    fn test_failed_write_keeps_cached_state() {
        let mut relays = Relay4::new(MockI2c::new());
        relays.set_relay(0, true).unwrap();

        relays.i2c.fail = true;
        assert_eq!(relays.set_relay(1, true), Err(Relay4Error::Bus(())));
        // The cache still reflects what the hardware last acked.
        assert!(relays.is_on(0));
        assert!(!relays.is_on(1));
    }
}
