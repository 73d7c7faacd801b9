//! Tessera Hardware Abstraction Layer
//!
//! This crate defines the bus capability traits that Tessera module drivers
//! are written against. Each trait models one transaction surface (I2C, SPI,
//! UART, one-wire, byte-addressable storage) with no knowledge of any
//! specific chip or module, so the same driver code runs against any
//! platform HAL that can provide the capability.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Module drivers (tessera-drivers)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tessera-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Platform HAL (embedded-hal impls, or   │
//! │  a direct trait implementation)         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Bus clocking, pin muxing, and device power/reset sequencing are the
//! platform's concern and deliberately absent from these traits.
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication
//! - [`i2c::I2cBus`] - I2C bus transactions
//! - [`spi::SpiBus`] - SPI bus transactions
//! - [`onewire::OneWireBus`] - Dallas one-wire transactions
//! - [`storage::ByteStorage`] - Byte-addressable read/write storage
//!
//! The trait set covers every bus the module connector exposes;
//! [`spi::SpiBus`] and the [`gpio`] pins are capability surface for
//! modules that have no driver in the catalog yet.
//!
//! The [`compat`] module provides blanket implementations for types that
//! already implement the corresponding `embedded-hal` / `embedded-io`
//! traits.

#![no_std]
#![deny(unsafe_code)]

pub mod compat;
pub mod gpio;
pub mod i2c;
pub mod onewire;
pub mod spi;
pub mod storage;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use gpio::{InputPin, OutputPin};
pub use i2c::I2cBus;
pub use onewire::OneWireBus;
pub use spi::SpiBus;
pub use storage::ByteStorage;
pub use uart::{UartRx, UartTx};
