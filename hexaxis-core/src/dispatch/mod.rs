//! Command dispatch
//!
//! Routes host lines to the controller, the homing sequencer and the
//! telemetry reporter, and drives the periodic tick.

pub mod dispatcher;

pub use dispatcher::{Dispatcher, Outcome};
