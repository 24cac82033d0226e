//! Axis motion control
//!
//! Per-axis state and the controller that owns all six axes.

pub mod controller;
pub mod state;

pub use controller::{MotionController, MotionError};
pub use state::AxisState;
