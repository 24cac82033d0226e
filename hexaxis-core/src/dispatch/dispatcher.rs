//! Command dispatcher
//!
//! Every received line goes through a fixed pre-step before it is even
//! parsed:
//! 1. the command watchdog is reset
//! 2. the shared enable line is asserted
//! 3. finished homing sequences return to idle
//!
//! The parsed command is then executed and answered with exactly one
//! terminal reply (`OK`, `ERR<n>` or the status line). A seek started by
//! `H` is answered later, from the tick that finishes it.

use hexaxis_protocol::{
    parse_line, AxisId, Command, CommandKind, ErrorCode, LineError, ProfileParam, Response,
    StatusReport, AXIS_COUNT,
};

use crate::axis::MotionController;
use crate::config::{ConfigError, MachineConfig};
use crate::homing::{HomingOutcome, HomingSequencer, HomingStart};
use crate::safety::CommandWatchdog;
use crate::telemetry;
use crate::traits::{DriverEnable, EndstopBank, ResponseSink, TrajectoryEngine};

/// What happened to one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Empty line, nothing done
    Ignored,
    /// Command executed
    Accepted(CommandKind),
    /// Command rejected with this error
    Rejected(ErrorCode),
}

/// Top-level command dispatcher
///
/// Owns all machine state. Driven by [`Dispatcher::handle_line`] for each
/// received line and [`Dispatcher::tick`] once per control-loop iteration.
pub struct Dispatcher<E, S, D> {
    controller: MotionController<E, S, D>,
    homing: HomingSequencer,
    watchdog: CommandWatchdog,
}

impl<E, S, D> Dispatcher<E, S, D>
where
    E: TrajectoryEngine,
    S: EndstopBank,
    D: DriverEnable,
{
    /// Create a dispatcher; the watchdog window starts at `now_us`
    pub fn new(
        engines: [E; AXIS_COUNT],
        endstops: S,
        enable: D,
        config: &MachineConfig,
        now_us: u32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            controller: MotionController::new(engines, endstops, enable, config),
            homing: HomingSequencer::new(config),
            watchdog: CommandWatchdog::new(config.move_timeout_ms, now_us),
        })
    }

    /// Handle one received line (terminator already stripped)
    pub fn handle_line<R: ResponseSink>(&mut self, line: &str, now_us: u32, sink: &mut R) -> Outcome {
        if line.is_empty() {
            return Outcome::Ignored;
        }
        self.pre_step(now_us);

        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Ignored,
            Err(err) => return reject(err.into(), sink),
        };

        match self.execute(command, now_us, sink) {
            Ok(()) => Outcome::Accepted(command.kind()),
            Err(code) => reject(code, sink),
        }
    }

    /// Handle a line the assembler had to discard
    ///
    /// It still counts as host activity.
    pub fn handle_line_error<R: ResponseSink>(&mut self, _err: LineError, now_us: u32, sink: &mut R) -> Outcome {
        self.pre_step(now_us);
        reject(ErrorCode::BadCommand, sink)
    }

    /// Control-loop tick: axes, homing, then the watchdog
    ///
    /// The watchdog window restarts on every tick an axis is still seeking.
    /// Returns true if the watchdog fired on this tick.
    pub fn tick<R: ResponseSink>(&mut self, now_us: u32, sink: &mut R) -> bool {
        for axis in AxisId::all() {
            if !self.homing.is_seeking(axis) {
                self.controller.tick_axis(axis, now_us, sink);
                continue;
            }
            match self.homing.poll(axis, &mut self.controller, now_us) {
                Some(HomingOutcome::Found) => sink.emit(Response::Ok),
                Some(HomingOutcome::TimedOut) => sink.emit(Response::Error(ErrorCode::Timeout)),
                None => {}
            }
        }

        // A seek is bounded by the homing timeout alone
        if self.homing.any_seeking() {
            self.watchdog.reset(now_us);
        }

        if self.watchdog.check(now_us) {
            self.controller.emergency_stop();
            sink.emit(Response::Error(ErrorCode::Timeout));
            return true;
        }
        false
    }

    /// Current status snapshot
    pub fn status(&self) -> StatusReport {
        telemetry::build_status(&self.controller)
    }

    /// Borrow the motion controller
    pub fn controller(&self) -> &MotionController<E, S, D> {
        &self.controller
    }

    /// Borrow the homing sequencer
    pub fn homing(&self) -> &HomingSequencer {
        &self.homing
    }

    /// Borrow the command watchdog
    pub fn watchdog(&self) -> &CommandWatchdog {
        &self.watchdog
    }

    fn pre_step(&mut self, now_us: u32) {
        self.watchdog.reset(now_us);
        self.controller.assert_enable();
        self.homing.acknowledge();
    }

    fn execute<R: ResponseSink>(&mut self, command: Command, now_us: u32, sink: &mut R) -> Result<(), ErrorCode> {
        // A motion command for a seeking axis replaces the seek
        if let Some(axis) = command.axis() {
            self.homing.cancel(axis, &mut self.controller);
        }

        match command {
            Command::MoveRelative { axis, delta } => {
                self.controller.move_relative(axis, delta)?;
                sink.emit(Response::Ok);
            }
            Command::MoveAbsolute { axis, position } => {
                self.controller.move_absolute(axis, position)?;
                sink.emit(Response::Ok);
            }
            Command::Home { axis } => {
                if self.homing.start(axis, &mut self.controller, now_us) == HomingStart::AlreadyHome {
                    sink.emit(Response::Ok);
                }
            }
            Command::Status => sink.emit(Response::Status(self.status())),
            Command::EmergencyStop => {
                self.controller.emergency_stop();
                sink.emit(Response::Ok);
            }
            Command::KillAxis { axis } => {
                self.controller.kill_axis(axis, sink);
                sink.emit(Response::Ok);
            }
            Command::SetProfile { param, value } => {
                self.controller.set_profile(param, value);
                if param == ProfileParam::Velocity {
                    self.homing.refresh_velocity(&mut self.controller);
                }
                sink.emit(Response::Ok);
            }
        }
        Ok(())
    }
}

fn reject<R: ResponseSink>(code: ErrorCode, sink: &mut R) -> Outcome {
    sink.emit(Response::Error(code));
    Outcome::Rejected(code)
}
