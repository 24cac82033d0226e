//! Stepper driver implementations

pub mod accel;

pub use accel::{AccelStepper, DEFAULT_PULSE_WIDTH_US};
