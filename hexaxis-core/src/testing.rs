//! Test doubles for the hardware traits

use std::cell::Cell;
use std::rc::Rc;

use hexaxis_protocol::{AxisId, Response, AXIS_COUNT};

use crate::traits::{DriverEnable, EndstopBank, ResponseSink, TrajectoryEngine};

/// Steps remaining after `stop()` on a moving engine
pub const STOP_TAIL_STEPS: i32 = 3;

/// Trajectory engine that moves one step per `run` call
#[derive(Debug, Clone, Default)]
pub struct SimEngine {
    pub position: i32,
    pub target: i32,
    pub max_speed: u32,
    pub acceleration: u32,
    /// Number of `move_to` requests received
    pub move_requests: u32,
}

impl TrajectoryEngine for SimEngine {
    fn set_max_speed(&mut self, steps_per_sec: u32) {
        self.max_speed = steps_per_sec;
    }

    fn max_speed(&self) -> u32 {
        self.max_speed
    }

    fn set_acceleration(&mut self, steps_per_sec2: u32) {
        self.acceleration = steps_per_sec2;
    }

    fn acceleration(&self) -> u32 {
        self.acceleration
    }

    fn set_current_position(&mut self, position: i32) {
        self.position = position;
        self.target = position;
    }

    fn current_position(&self) -> i32 {
        self.position
    }

    fn target_position(&self) -> i32 {
        self.target
    }

    fn move_to(&mut self, target: i32) {
        self.move_requests += 1;
        self.target = target;
    }

    fn run(&mut self, _now_us: u32) -> bool {
        self.position += (self.target - self.position).signum();
        self.position != self.target
    }

    fn stop(&mut self) {
        let remaining = self.target - self.position;
        self.target = self.position + remaining.signum() * remaining.abs().min(STOP_TAIL_STEPS);
    }
}

/// Six fresh engines
pub fn engines() -> [SimEngine; AXIS_COUNT] {
    core::array::from_fn(|_| SimEngine::default())
}

/// Endstop bank backed by shared cells, so tests can flip inputs
/// while the controller owns the bank
#[derive(Debug, Clone, Default)]
pub struct FakeEndstops {
    pub min: Rc<Cell<[bool; AXIS_COUNT]>>,
    pub max: Option<Rc<Cell<[bool; AXIS_COUNT]>>>,
}

impl FakeEndstops {
    pub fn with_max() -> Self {
        Self {
            min: Rc::default(),
            max: Some(Rc::default()),
        }
    }

    pub fn set_min(&self, axis: AxisId, triggered: bool) {
        let mut states = self.min.get();
        states[axis.index()] = triggered;
        self.min.set(states);
    }
}

impl EndstopBank for FakeEndstops {
    fn min_triggered(&self, axis: AxisId) -> bool {
        self.min.get()[axis.index()]
    }

    fn max_triggered(&self, axis: AxisId) -> Option<bool> {
        self.max.as_ref().map(|max| max.get()[axis.index()])
    }
}

/// Enable line backed by a shared cell
#[derive(Debug, Clone, Default)]
pub struct FakeEnable {
    pub asserted: Rc<Cell<bool>>,
}

impl DriverEnable for FakeEnable {
    fn set_enabled(&mut self, enabled: bool) {
        self.asserted.set(enabled);
    }

    fn is_enabled(&self) -> bool {
        self.asserted.get()
    }
}

pub fn axis(number: u8) -> AxisId {
    AxisId::new(number as usize - 1).unwrap()
}

/// Sink that records every response
#[derive(Debug, Default)]
pub struct Recorder {
    pub responses: Vec<Response>,
}

impl Recorder {
    /// Take everything recorded so far
    pub fn drain(&mut self) -> Vec<Response> {
        core::mem::take(&mut self.responses)
    }

    /// Encoded lines recorded so far, terminators stripped
    pub fn drain_lines(&mut self) -> Vec<String> {
        self.drain()
            .iter()
            .map(|r| r.encode().unwrap().trim_end().to_owned())
            .collect()
    }
}

impl ResponseSink for Recorder {
    fn emit(&mut self, response: Response) {
        self.responses.push(response);
    }
}
