//! Board-agnostic core logic for the six-axis rig firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (trajectory engine, endstops, enable line)
//! - Axis motion controller with the direction-aware endstop interlock
//! - Homing sequencer (polled, one step per control-loop tick)
//! - Command watchdog
//! - Telemetry reporter
//! - Command dispatcher tying the above to the host protocol
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod axis;
pub mod config;
pub mod dispatch;
pub mod homing;
pub mod safety;
pub mod telemetry;
pub mod time;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatch::{Dispatcher, Outcome};
