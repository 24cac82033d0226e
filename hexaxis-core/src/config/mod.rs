//! Configuration types
//!
//! Machine limits and defaults. Values come from [`MachineConfig::default`]
//! unless the firmware overrides them at startup.

pub mod machine;

pub use machine::*;
