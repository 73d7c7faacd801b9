//! Environmental sensor module drivers

pub mod ds18b20;
pub mod sht30;

pub use ds18b20::{Ds18b20, Ds18b20Error};
pub use sht30::{Sht30, Sht30Error};
