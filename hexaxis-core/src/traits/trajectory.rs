//! Trajectory engine trait
//!
//! A trajectory engine turns a target position plus a velocity/acceleration
//! profile into timed step pulses for one axis. Positions are absolute step
//! counts; the engine tracks its own position as it steps.

/// Trait for per-axis step generators
///
/// Implementations must be advanced by calling [`TrajectoryEngine::run`]
/// as often as possible; each call emits at most one step.
pub trait TrajectoryEngine {
    /// Set the maximum speed in steps/s
    fn set_max_speed(&mut self, steps_per_sec: u32);

    /// Get the maximum speed in steps/s
    fn max_speed(&self) -> u32;

    /// Set the acceleration in steps/s²
    fn set_acceleration(&mut self, steps_per_sec2: u32);

    /// Get the acceleration in steps/s²
    fn acceleration(&self) -> u32;

    /// Redefine the current position
    ///
    /// The target is set to the same value and the motor is considered
    /// stopped, so any motion in progress halts immediately.
    fn set_current_position(&mut self, position: i32);

    /// Current position in steps
    fn current_position(&self) -> i32;

    /// Most recently requested target position in steps
    fn target_position(&self) -> i32;

    /// Set an absolute target position
    fn move_to(&mut self, target: i32);

    /// Set a target relative to the current position
    fn move_by(&mut self, delta: i32) {
        let target = self.current_position().saturating_add(delta);
        self.move_to(target);
    }

    /// Signed steps remaining until the target is reached
    fn distance_to_go(&self) -> i32 {
        self.target_position().saturating_sub(self.current_position())
    }

    /// Advance the trajectory at time `now_us`
    ///
    /// Emits at most one step. Returns true while the motor is still
    /// running toward its target.
    fn run(&mut self, now_us: u32) -> bool;

    /// Decelerate to a stop as quickly as the acceleration allows
    ///
    /// Moves the target to the nearest reachable stopping point.
    fn stop(&mut self);

    /// Stop immediately at the current position
    fn halt(&mut self) {
        let position = self.current_position();
        self.set_current_position(position);
    }

    /// Check if any distance remains
    fn is_running(&self) -> bool {
        self.distance_to_go() != 0
    }
}
