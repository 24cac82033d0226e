//! Axis motion controller
//!
//! Owns the six trajectory engines, the endstop bank and the shared enable
//! line. Every motion request goes through here, guarded by the endstop
//! interlock and the travel limits.

use hexaxis_protocol::{AxisId, ErrorCode, ProfileParam, Response, AXIS_COUNT};

use crate::config::{MachineConfig, MotionProfile, TravelLimits};
use crate::safety::interlock::{self, InterlockDecision};
use crate::traits::{DriverEnable, EndstopBank, ResponseSink, TrajectoryEngine};

use super::AxisState;

/// Reasons a motion request is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionError {
    /// Target lies outside the travel range
    OutOfRange,
    /// Move toward an active minimum endstop
    EndstopActive,
}

impl From<MotionError> for ErrorCode {
    fn from(err: MotionError) -> Self {
        match err {
            MotionError::OutOfRange => ErrorCode::OutOfRange,
            MotionError::EndstopActive => ErrorCode::EndstopActive,
        }
    }
}

/// One axis slot
#[derive(Debug)]
struct Axis<E> {
    engine: E,
    /// Engine had distance to go at the end of the last tick
    was_moving: bool,
    /// Skip the completion notice of a kill's deceleration tail
    mute_done: bool,
}

impl<E> Axis<E> {
    fn new(engine: E) -> Self {
        Self {
            engine,
            was_moving: false,
            mute_done: false,
        }
    }
}

/// Motion controller for all axes
pub struct MotionController<E, S, D> {
    axes: [Axis<E>; AXIS_COUNT],
    endstops: S,
    enable: D,
    travel: TravelLimits,
    profile: MotionProfile,
}

impl<E, S, D> MotionController<E, S, D>
where
    E: TrajectoryEngine,
    S: EndstopBank,
    D: DriverEnable,
{
    /// Create a controller with every axis at position zero
    ///
    /// The enable line is released until the first command arrives.
    pub fn new(engines: [E; AXIS_COUNT], endstops: S, mut enable: D, config: &MachineConfig) -> Self {
        let axes = engines.map(|mut engine| {
            engine.set_current_position(0);
            engine.set_max_speed(config.profile.velocity);
            engine.set_acceleration(config.profile.acceleration);
            Axis::new(engine)
        });
        enable.set_enabled(false);

        Self {
            axes,
            endstops,
            enable,
            travel: config.travel,
            profile: config.profile,
        }
    }

    /// Request a move of `delta` steps from the current position
    pub fn move_relative(&mut self, axis: AxisId, delta: i32) -> Result<(), MotionError> {
        if !interlock::permits_move(self.endstops.min_triggered(axis), delta) {
            return Err(MotionError::EndstopActive);
        }
        let slot = &mut self.axes[axis.index()];
        let target = slot.engine.current_position() as i64 + delta as i64;
        if !self.travel.contains(target) {
            return Err(MotionError::OutOfRange);
        }
        slot.mute_done = false;
        slot.engine.move_by(delta);
        Ok(())
    }

    /// Request a move to an absolute position
    pub fn move_absolute(&mut self, axis: AxisId, position: i32) -> Result<(), MotionError> {
        if !self.travel.contains(position as i64) {
            return Err(MotionError::OutOfRange);
        }
        let slot = &mut self.axes[axis.index()];
        slot.mute_done = false;
        slot.engine.move_to(position);
        Ok(())
    }

    /// Apply a profile parameter to every axis
    pub fn set_profile(&mut self, param: ProfileParam, value: u32) {
        match param {
            ProfileParam::Velocity => {
                self.profile.velocity = value;
                for slot in self.axes.iter_mut() {
                    slot.engine.set_max_speed(value);
                }
            }
            ProfileParam::Acceleration => {
                self.profile.acceleration = value;
                for slot in self.axes.iter_mut() {
                    slot.engine.set_acceleration(value);
                }
            }
        }
    }

    /// Decelerate one axis to a stop and report it done
    pub fn kill_axis<R: ResponseSink>(&mut self, axis: AxisId, sink: &mut R) {
        let slot = &mut self.axes[axis.index()];
        slot.engine.stop();
        slot.mute_done = slot.engine.is_running();
        sink.emit(Response::Done(axis));
    }

    /// Release the shared enable line
    ///
    /// Positions and targets are kept; the next command resumes motion.
    pub fn emergency_stop(&mut self) {
        self.enable.set_enabled(false);
    }

    /// Assert the shared enable line
    pub fn assert_enable(&mut self) {
        self.enable.set_enabled(true);
    }

    /// Check if the shared enable line is asserted
    pub fn is_enabled(&self) -> bool {
        self.enable.is_enabled()
    }

    /// Per-tick update of one axis
    ///
    /// Applies the endstop interlock, advances the engine, and reports
    /// completion or an endstop trip. Does nothing while the enable line
    /// is released.
    pub fn tick_axis<R: ResponseSink>(&mut self, axis: AxisId, now_us: u32, sink: &mut R) {
        if !self.enable.is_enabled() {
            return;
        }
        let triggered = self.endstops.min_triggered(axis);
        let slot = &mut self.axes[axis.index()];

        match interlock::evaluate(triggered, slot.engine.distance_to_go()) {
            InterlockDecision::Proceed => {}
            InterlockDecision::Trip => {
                slot.engine.stop();
                slot.engine.halt();
                slot.was_moving = false;
                slot.mute_done = false;
                sink.emit(Response::Endstop(axis));
                return;
            }
            InterlockDecision::Hold => {
                slot.was_moving = false;
                slot.mute_done = false;
                return;
            }
        }

        slot.was_moving = slot.engine.is_running();
        slot.engine.run(now_us);
        if slot.was_moving && !slot.engine.is_running() {
            slot.was_moving = false;
            if !core::mem::take(&mut slot.mute_done) {
                sink.emit(Response::Done(axis));
            }
        }
    }

    /// Advance an axis's engine without interlock or completion tracking
    ///
    /// Used by the homing sequencer, which watches the endstop itself.
    pub fn advance(&mut self, axis: AxisId, now_us: u32) {
        if self.enable.is_enabled() {
            self.axes[axis.index()].engine.run(now_us);
        }
    }

    /// Start a seek: reduced velocity, target beyond travel
    pub fn begin_seek(&mut self, axis: AxisId, velocity: u32, target: i32) {
        let slot = &mut self.axes[axis.index()];
        slot.mute_done = false;
        slot.was_moving = false;
        slot.engine.set_max_speed(velocity);
        slot.engine.move_to(target);
    }

    /// Redefine the axis's current position as zero, stopping it
    pub fn zero_position(&mut self, axis: AxisId) {
        let slot = &mut self.axes[axis.index()];
        slot.engine.set_current_position(0);
        slot.was_moving = false;
    }

    /// Stop an axis immediately where it is
    pub fn halt(&mut self, axis: AxisId) {
        let slot = &mut self.axes[axis.index()];
        slot.engine.halt();
        slot.was_moving = false;
    }

    /// Set one axis's velocity limit without changing the shared profile
    pub fn set_axis_velocity(&mut self, axis: AxisId, velocity: u32) {
        self.axes[axis.index()].engine.set_max_speed(velocity);
    }

    /// Put an axis's velocity limit back to the shared profile value
    pub fn restore_velocity(&mut self, axis: AxisId) {
        let velocity = self.profile.velocity;
        self.set_axis_velocity(axis, velocity);
    }

    /// Check if the axis's minimum endstop is triggered
    pub fn min_endstop_triggered(&self, axis: AxisId) -> bool {
        self.endstops.min_triggered(axis)
    }

    /// Current positions in axis order
    pub fn positions(&self) -> [i32; AXIS_COUNT] {
        core::array::from_fn(|i| self.axes[i].engine.current_position())
    }

    /// Minimum endstop states in axis order
    pub fn min_endstops(&self) -> [bool; AXIS_COUNT] {
        let mut states = [false; AXIS_COUNT];
        for axis in AxisId::all() {
            states[axis.index()] = self.endstops.min_triggered(axis);
        }
        states
    }

    /// Maximum endstop states in axis order, if a full bank is fitted
    pub fn max_endstops(&self) -> Option<[bool; AXIS_COUNT]> {
        let mut states = [false; AXIS_COUNT];
        for axis in AxisId::all() {
            states[axis.index()] = self.endstops.max_triggered(axis)?;
        }
        Some(states)
    }

    /// Snapshot of one axis
    pub fn state(&self, axis: AxisId) -> AxisState {
        let slot = &self.axes[axis.index()];
        AxisState {
            id: axis,
            current_position: slot.engine.current_position(),
            target_position: slot.engine.target_position(),
            max_velocity: slot.engine.max_speed(),
            acceleration: slot.engine.acceleration(),
            enabled: self.enable.is_enabled(),
            min_endstop_triggered: self.endstops.min_triggered(axis),
            was_moving: slot.was_moving,
        }
    }

    /// Shared motion profile
    pub fn profile(&self) -> MotionProfile {
        self.profile
    }

    /// Borrow an axis's engine
    pub fn engine(&self, axis: AxisId) -> &E {
        &self.axes[axis.index()].engine
    }
}
