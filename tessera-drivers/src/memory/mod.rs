//! Memory module drivers

pub mod at24;

pub use at24::{At24c, At24Error};
