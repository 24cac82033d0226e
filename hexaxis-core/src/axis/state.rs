//! Axis state snapshot

use hexaxis_protocol::AxisId;

/// Observable state of one axis
///
/// A read-only snapshot assembled from the engine, the shared enable
/// line, and the endstop inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisState {
    /// Axis index
    pub id: AxisId,
    /// Position in steps
    pub current_position: i32,
    /// Target position in steps
    pub target_position: i32,
    /// Velocity limit in steps/s
    pub max_velocity: u32,
    /// Acceleration in steps/s²
    pub acceleration: u32,
    /// Shared driver enable line asserted
    pub enabled: bool,
    /// Minimum endstop triggered
    pub min_endstop_triggered: bool,
    /// Axis was moving at the end of the last tick
    pub was_moving: bool,
}

