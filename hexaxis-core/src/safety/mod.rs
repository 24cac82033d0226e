//! Safety supervision
//!
//! The endstop interlock and the command watchdog.

pub mod interlock;
pub mod watchdog;

pub use interlock::{evaluate, permits_move, InterlockDecision};
pub use watchdog::CommandWatchdog;
