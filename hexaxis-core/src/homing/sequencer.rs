//! Polled homing state machine
//!
//! ```text
//!            endstop already active
//!   Idle ──────────────────────────────► Found
//!    │                                     ▲
//!    │ start                     endstop   │
//!    └──────────► Seeking ─────────────────┘
//!                    │
//!                    │ timeout
//!                    ▼
//!                 TimedOut
//! ```
//!
//! Terminal states return to `Idle` on the next command. A seek is advanced
//! one engine step per control tick, so other axes keep running.

use hexaxis_protocol::{AxisId, AXIS_COUNT};

use crate::axis::MotionController;
use crate::config::MachineConfig;
use crate::time::{has_expired, ms_to_us};
use crate::traits::{DriverEnable, EndstopBank, TrajectoryEngine};

/// Homing state of one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingState {
    /// Not homing
    #[default]
    Idle,
    /// Moving toward the minimum endstop
    Seeking {
        /// Timestamp the seek started (µs)
        started_us: u32,
    },
    /// Endstop reached, position zeroed
    Found,
    /// Endstop not reached before the timeout
    TimedOut,
}

/// Result of starting a homing sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingStart {
    /// Endstop was already active; axis zeroed without motion
    AlreadyHome,
    /// Seek in progress
    Seeking,
}

/// How a seek finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HomingOutcome {
    /// Endstop reached
    Found,
    /// Timed out
    TimedOut,
}

/// Homing sequencer for all axes
#[derive(Debug, Clone)]
pub struct HomingSequencer {
    states: [HomingState; AXIS_COUNT],
    timeout_us: u32,
    config: MachineConfig,
}

impl HomingSequencer {
    /// Create a sequencer with every axis idle
    pub fn new(config: &MachineConfig) -> Self {
        Self {
            states: [HomingState::Idle; AXIS_COUNT],
            timeout_us: ms_to_us(config.homing_timeout_ms),
            config: *config,
        }
    }

    /// Current state of an axis
    pub fn state(&self, axis: AxisId) -> HomingState {
        self.states[axis.index()]
    }

    /// Check if an axis is seeking
    pub fn is_seeking(&self, axis: AxisId) -> bool {
        matches!(self.states[axis.index()], HomingState::Seeking { .. })
    }

    /// Begin homing an axis
    pub fn start<E, S, D>(
        &mut self,
        axis: AxisId,
        controller: &mut MotionController<E, S, D>,
        now_us: u32,
    ) -> HomingStart
    where
        E: TrajectoryEngine,
        S: EndstopBank,
        D: DriverEnable,
    {
        if controller.min_endstop_triggered(axis) {
            controller.zero_position(axis);
            self.states[axis.index()] = HomingState::Found;
            return HomingStart::AlreadyHome;
        }

        let velocity = self.config.homing_velocity(controller.profile().velocity);
        controller.begin_seek(axis, velocity, self.config.travel.homing_target());
        self.states[axis.index()] = HomingState::Seeking { started_us: now_us };
        HomingStart::Seeking
    }

    /// Advance a seeking axis by one tick
    ///
    /// Returns the outcome on the tick the seek finishes. On timeout the
    /// axis stops where it is and keeps the reduced velocity limit.
    pub fn poll<E, S, D>(
        &mut self,
        axis: AxisId,
        controller: &mut MotionController<E, S, D>,
        now_us: u32,
    ) -> Option<HomingOutcome>
    where
        E: TrajectoryEngine,
        S: EndstopBank,
        D: DriverEnable,
    {
        let HomingState::Seeking { started_us } = self.states[axis.index()] else {
            return None;
        };

        if controller.min_endstop_triggered(axis) {
            controller.halt(axis);
            controller.zero_position(axis);
            controller.restore_velocity(axis);
            self.states[axis.index()] = HomingState::Found;
            return Some(HomingOutcome::Found);
        }

        if has_expired(now_us, started_us, self.timeout_us) {
            controller.halt(axis);
            self.states[axis.index()] = HomingState::TimedOut;
            return Some(HomingOutcome::TimedOut);
        }

        controller.advance(axis, now_us);
        None
    }

    /// Check if any axis is seeking
    pub fn any_seeking(&self) -> bool {
        AxisId::all().any(|axis| self.is_seeking(axis))
    }

    /// Abandon a seek in favour of a new command for the same axis
    pub fn cancel<E, S, D>(&mut self, axis: AxisId, controller: &mut MotionController<E, S, D>)
    where
        E: TrajectoryEngine,
        S: EndstopBank,
        D: DriverEnable,
    {
        if self.is_seeking(axis) {
            controller.halt(axis);
            controller.restore_velocity(axis);
        }
        self.states[axis.index()] = HomingState::Idle;
    }

    /// Return finished axes to `Idle`
    pub fn acknowledge(&mut self) {
        for state in self.states.iter_mut() {
            if matches!(state, HomingState::Found | HomingState::TimedOut) {
                *state = HomingState::Idle;
            }
        }
    }

    /// Re-derive the seek velocity after a profile change
    pub fn refresh_velocity<E, S, D>(&self, controller: &mut MotionController<E, S, D>)
    where
        E: TrajectoryEngine,
        S: EndstopBank,
        D: DriverEnable,
    {
        let velocity = self.config.homing_velocity(controller.profile().velocity);
        for axis in AxisId::all().filter(|&a| self.is_seeking(a)) {
            controller.set_axis_velocity(axis, velocity);
        }
    }
}
