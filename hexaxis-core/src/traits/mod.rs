//! Hardware abstraction traits
//!
//! These traits define the interface between the motion/safety logic
//! and hardware-specific implementations.

pub mod io;
pub mod sink;
pub mod trajectory;

pub use io::{DriverEnable, EndstopBank};
pub use sink::ResponseSink;
pub use trajectory::TrajectoryEngine;
