//! Endstop inputs and the driver enable output

pub mod enable;
pub mod endstops;

pub use enable::EnableLine;
pub use endstops::PinEndstops;
