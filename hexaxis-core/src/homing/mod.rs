//! Homing
//!
//! Drives an axis toward its minimum endstop at reduced speed and zeroes
//! it there.

pub mod sequencer;

pub use sequencer::{HomingOutcome, HomingSequencer, HomingStart, HomingState};
