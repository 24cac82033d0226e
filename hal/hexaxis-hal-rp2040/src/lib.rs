//! RP2040-specific HAL for the six-axis rig firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `hexaxis-hal` traits:
//!
//! - GPIO output/input wrappers over embassy-rp pins
//!
//! Step pulse timing uses `embassy_time::Delay`, which already implements
//! `embedded_hal::delay::DelayNs`.

#![no_std]

pub mod gpio;

pub use gpio::{RpInput, RpOutput};

// Re-export shared traits from hexaxis-hal for convenience
pub use hexaxis_hal::{InputPin, Level, OutputPin};
