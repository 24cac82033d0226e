//! Telemetry reporter
//!
//! Builds the status snapshot sent on the telemetry channel. Reading
//! telemetry never changes axis state.

use hexaxis_protocol::StatusReport;

use crate::axis::MotionController;
use crate::traits::{DriverEnable, EndstopBank, TrajectoryEngine};

/// Snapshot positions and endstop states of every axis
pub fn build_status<E, S, D>(controller: &MotionController<E, S, D>) -> StatusReport
where
    E: TrajectoryEngine,
    S: EndstopBank,
    D: DriverEnable,
{
    let report = StatusReport::new(controller.positions(), controller.min_endstops());
    match controller.max_endstops() {
        Some(max) => report.with_max_endstops(max),
        None => report,
    }
}
