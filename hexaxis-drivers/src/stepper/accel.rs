//! Constant-acceleration step/dir stepper
//!
//! Generates a trapezoidal velocity profile one step at a time using
//! David Austin's recurrence ("Generate stepper-motor speed profiles in
//! real time", 2005). Each step's interval is derived from the previous
//! one, so no square roots are needed after the initial interval:
//!
//! ```text
//!   c0 = 0.676 * sqrt(2 / a) * 1e6        first interval (µs)
//!   cn = cn-1 - 2 * cn-1 / (4 * n + 1)    accelerating (n > 0)
//!                                         decelerating (n < 0)
//! ```
//!
//! The engine must be polled with [`TrajectoryEngine::run`] faster than
//! the highest step rate. Each poll emits at most one pulse.

use embedded_hal::delay::DelayNs;
use hexaxis_core::traits::TrajectoryEngine;
use hexaxis_hal::OutputPin;

/// Default step pulse width
pub const DEFAULT_PULSE_WIDTH_US: u32 = 2;

/// Step/dir stepper with acceleration
pub struct AccelStepper<STEP, DIR, D> {
    step_pin: STEP,
    dir_pin: DIR,
    delay: D,
    pulse_width_us: u32,

    current_pos: i32,
    target_pos: i32,
    /// Signed speed in steps/s (positive = forward)
    speed: f32,
    max_speed: u32,
    acceleration: u32,
    forward: bool,

    step_interval_us: u32,
    last_step_us: u32,

    /// Step index along the ramp; negative while decelerating
    n: i32,
    /// Initial step interval (µs)
    c0: f32,
    /// Last step interval (µs)
    cn: f32,
    /// Interval at max speed (µs)
    cmin: f32,
}

impl<STEP, DIR, D> AccelStepper<STEP, DIR, D>
where
    STEP: OutputPin,
    DIR: OutputPin,
    D: DelayNs,
{
    /// Create a stepper at position zero, 1 step/s and 1 step/s²
    pub fn new(mut step_pin: STEP, dir_pin: DIR, delay: D) -> Self {
        step_pin.set_low();
        let mut stepper = Self {
            step_pin,
            dir_pin,
            delay,
            pulse_width_us: DEFAULT_PULSE_WIDTH_US,
            current_pos: 0,
            target_pos: 0,
            speed: 0.0,
            max_speed: 0,
            acceleration: 0,
            forward: true,
            step_interval_us: 0,
            last_step_us: 0,
            n: 0,
            c0: 0.0,
            cn: 0.0,
            cmin: 1.0,
        };
        stepper.set_max_speed(1);
        stepper.set_acceleration(1);
        stepper
    }

    /// Set the step pulse width
    pub fn with_pulse_width(mut self, pulse_width_us: u32) -> Self {
        self.pulse_width_us = pulse_width_us;
        self
    }

    /// Current signed speed in steps/s
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Emit a step if the current interval has elapsed
    fn run_speed(&mut self, now_us: u32) -> bool {
        if self.step_interval_us == 0 {
            return false;
        }
        if now_us.wrapping_sub(self.last_step_us) < self.step_interval_us {
            return false;
        }

        if self.forward {
            self.current_pos = self.current_pos.wrapping_add(1);
        } else {
            self.current_pos = self.current_pos.wrapping_sub(1);
        }
        self.pulse();
        self.last_step_us = now_us;
        true
    }

    fn pulse(&mut self) {
        self.dir_pin.set_state(self.forward);
        self.step_pin.set_high();
        self.delay.delay_us(self.pulse_width_us);
        self.step_pin.set_low();
    }

    /// Steps needed to decelerate from the current speed to zero
    fn steps_to_stop(&self) -> i32 {
        (self.speed * self.speed / (2.0 * self.acceleration as f32)) as i32
    }

    /// Work out the interval for the next step
    fn compute_new_speed(&mut self) {
        let distance_to = self.distance_to_go();
        let steps_to_stop = self.steps_to_stop();

        if distance_to == 0 && steps_to_stop <= 1 {
            self.step_interval_us = 0;
            self.speed = 0.0;
            self.n = 0;
            return;
        }

        if distance_to > 0 {
            if self.n > 0 {
                // Too close to stop in time, or heading the wrong way
                if steps_to_stop >= distance_to || !self.forward {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0 && steps_to_stop < distance_to && self.forward {
                self.n = -self.n;
            }
        } else if distance_to < 0 {
            if self.n > 0 {
                if steps_to_stop >= -distance_to || self.forward {
                    self.n = -steps_to_stop;
                }
            } else if self.n < 0 && steps_to_stop < -distance_to && !self.forward {
                self.n = -self.n;
            }
        }

        if self.n == 0 {
            self.cn = self.c0;
            self.forward = distance_to > 0;
        } else {
            self.cn -= (2.0 * self.cn) / (4.0 * self.n as f32 + 1.0);
            if self.cn < self.cmin {
                self.cn = self.cmin;
            }
        }
        self.n = self.n.saturating_add(1);
        self.step_interval_us = self.cn as u32;
        self.speed = 1_000_000.0 / self.cn;
        if !self.forward {
            self.speed = -self.speed;
        }
    }
}

impl<STEP, DIR, D> TrajectoryEngine for AccelStepper<STEP, DIR, D>
where
    STEP: OutputPin,
    DIR: OutputPin,
    D: DelayNs,
{
    fn set_max_speed(&mut self, steps_per_sec: u32) {
        let steps_per_sec = steps_per_sec.max(1);
        if self.max_speed == steps_per_sec {
            return;
        }
        self.max_speed = steps_per_sec;
        self.cmin = 1_000_000.0 / steps_per_sec as f32;
        // Already accelerating: recompute where on the ramp we are
        if self.n > 0 {
            self.n = self.steps_to_stop();
            self.compute_new_speed();
        }
    }

    fn max_speed(&self) -> u32 {
        self.max_speed
    }

    fn set_acceleration(&mut self, steps_per_sec2: u32) {
        if steps_per_sec2 == 0 || self.acceleration == steps_per_sec2 {
            return;
        }
        self.n = (self.n as f32 * (self.acceleration as f32 / steps_per_sec2 as f32)) as i32;
        self.c0 = 0.676 * isqrt(2_000_000_000_000 / steps_per_sec2 as u64) as f32;
        self.acceleration = steps_per_sec2;
        self.compute_new_speed();
    }

    fn acceleration(&self) -> u32 {
        self.acceleration
    }

    fn set_current_position(&mut self, position: i32) {
        self.current_pos = position;
        self.target_pos = position;
        self.n = 0;
        self.step_interval_us = 0;
        self.speed = 0.0;
    }

    fn current_position(&self) -> i32 {
        self.current_pos
    }

    fn target_position(&self) -> i32 {
        self.target_pos
    }

    fn move_to(&mut self, target: i32) {
        if self.target_pos != target {
            self.target_pos = target;
            self.compute_new_speed();
        }
    }

    fn run(&mut self, now_us: u32) -> bool {
        if self.run_speed(now_us) {
            self.compute_new_speed();
        }
        self.speed != 0.0 || self.distance_to_go() != 0
    }

    fn stop(&mut self) {
        if self.speed == 0.0 {
            return;
        }
        let steps = self.steps_to_stop().saturating_add(1);
        if self.speed > 0.0 {
            self.move_by(steps);
        } else {
            self.move_by(-steps);
        }
    }
}

/// Integer square root (floor)
fn isqrt(value: u64) -> u64 {
    if value < 2 {
        return value;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeOutput, NoDelay};
    use proptest::prelude::*;

    type Stepper = AccelStepper<FakeOutput, FakeOutput, NoDelay>;

    const POLL_US: u32 = 10;

    fn stepper() -> (Stepper, FakeOutput, FakeOutput) {
        let step = FakeOutput::default();
        let dir = FakeOutput::default();
        let mut stepper = AccelStepper::new(step.clone(), dir.clone(), NoDelay);
        stepper.set_max_speed(10_000);
        stepper.set_acceleration(100_000);
        (stepper, step, dir)
    }

    /// Poll until the motor stops; returns the final timestamp
    fn run_to_rest(stepper: &mut Stepper, mut now: u32) -> u32 {
        for _ in 0..2_000_000 {
            now = now.wrapping_add(POLL_US);
            if !stepper.run(now) {
                return now;
            }
        }
        panic!("stepper never came to rest");
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(4_000_000_000), 63_245);
    }

    #[test]
    fn test_idle_at_rest() {
        let (mut stepper, step, _) = stepper();
        assert!(!stepper.run(1_000));
        assert_eq!(step.rising_edges.get(), 0);
        assert_eq!(stepper.distance_to_go(), 0);
    }

    #[test]
    fn test_forward_move() {
        let (mut stepper, step, dir) = stepper();
        stepper.move_to(200);
        assert!(stepper.is_running());
        run_to_rest(&mut stepper, 0);

        assert_eq!(stepper.current_position(), 200);
        assert_eq!(step.rising_edges.get(), 200);
        assert!(dir.high.get());
        assert!(!step.high.get());
        assert_eq!(stepper.speed(), 0.0);
    }

    #[test]
    fn test_reverse_relative_move() {
        let (mut stepper, _, dir) = stepper();
        stepper.set_current_position(100);
        stepper.move_by(-150);
        assert_eq!(stepper.target_position(), -50);
        run_to_rest(&mut stepper, 0);

        assert_eq!(stepper.current_position(), -50);
        assert!(!dir.high.get());
    }

    #[test]
    fn test_first_interval_from_acceleration() {
        let step = FakeOutput::default();
        let mut stepper = AccelStepper::new(step.clone(), FakeOutput::default(), NoDelay);
        stepper.set_max_speed(1200);
        stepper.set_acceleration(500);
        stepper.move_to(10);

        // c0 = 0.676 * sqrt(2e12 / 500) = 42 753 µs
        assert!(!stepper.run_speed(42_000));
        assert!(stepper.run_speed(42_800));
        assert_eq!(stepper.current_position(), 1);
    }

    #[test]
    fn test_speed_capped_at_max() {
        let (mut stepper, _, _) = stepper();
        stepper.set_max_speed(2_000);
        stepper.move_to(5_000);
        let mut now = 0u32;
        let mut peak = 0.0f32;
        while stepper.run(now) {
            now += POLL_US;
            peak = peak.max(stepper.speed());
        }
        assert_eq!(stepper.current_position(), 5_000);
        assert!(peak <= 2_000.5, "peak speed {}", peak);
        assert!(peak > 1_900.0, "peak speed {}", peak);
    }

    #[test]
    fn test_stop_decelerates_short_of_target() {
        let (mut stepper, _, _) = stepper();
        stepper.move_to(10_000);
        let mut now = 0u32;
        while stepper.current_position() < 2_000 {
            now += POLL_US;
            stepper.run(now);
        }

        let at_stop = stepper.current_position();
        stepper.stop();
        let target = stepper.target_position();
        assert!(target > at_stop && target < 10_000);

        run_to_rest(&mut stepper, now);
        assert_eq!(stepper.current_position(), target);
    }

    #[test]
    fn test_stop_at_rest_is_noop() {
        let (mut stepper, _, _) = stepper();
        stepper.stop();
        assert_eq!(stepper.target_position(), 0);
        assert!(!stepper.is_running());
    }

    #[test]
    fn test_halt_stops_immediately() {
        let (mut stepper, step, _) = stepper();
        stepper.move_to(1_000);
        let mut now = 0u32;
        while stepper.current_position() < 100 {
            now += POLL_US;
            stepper.run(now);
        }

        stepper.halt();
        let edges = step.rising_edges.get();
        assert!(!stepper.run(now + 1_000_000));
        assert_eq!(step.rising_edges.get(), edges);
        assert_eq!(stepper.speed(), 0.0);
        assert_eq!(stepper.distance_to_go(), 0);
    }

    #[test]
    fn test_zero_acceleration_ignored() {
        let (mut stepper, _, _) = stepper();
        stepper.set_acceleration(0);
        assert_eq!(stepper.acceleration(), 100_000);
    }

    #[test]
    fn test_step_timing_across_clock_wrap() {
        let (mut stepper, _, _) = stepper();
        stepper.last_step_us = u32::MAX - 100;
        stepper.move_to(5);
        run_to_rest(&mut stepper, u32::MAX - 100);
        assert_eq!(stepper.current_position(), 5);
    }

    proptest! {
        #[test]
        fn prop_reaches_any_target(start in -500i32..500, target in -3_000i32..3_000) {
            let (mut stepper, _, _) = stepper();
            stepper.set_current_position(start);
            stepper.move_to(target);
            run_to_rest(&mut stepper, 0);
            prop_assert_eq!(stepper.current_position(), target);
        }
    }
}
