//! Module driver implementations
//!
//! This crate provides drivers for Tessera plug-in peripheral modules,
//! written against the bus capability traits in `tessera-hal`:
//!
//! - GNSS receiver (UART, NMEA 0183 via `tessera-nmea`)
//! - Temperature/humidity sensors (SHT30 on I2C, DS18B20 on one-wire)
//! - EEPROM memory (AT24C series on I2C)
//! - Quad relay module (I2C)
//!
//! Apart from the GNSS receive path, these are thin translations of the
//! datasheet register maps.

#![no_std]
#![deny(unsafe_code)]

pub mod gnss;
pub mod memory;
pub mod relay;
pub mod sensor;
