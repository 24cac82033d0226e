//! Board wiring
//!
//! Pin map of the six-axis RP2040 carrier board:
//!
//! | Signal          | Axis 1 | Axis 2 | Axis 3 | Axis 4 | Axis 5 | Axis 6 |
//! |-----------------|--------|--------|--------|--------|--------|--------|
//! | STEP            | GP2    | GP6    | GP8    | GP10   | GP12   | GP14   |
//! | DIR             | GP3    | GP7    | GP9    | GP11   | GP13   | GP15   |
//! | Min endstop     | GP16   | GP17   | GP18   | GP19   | GP20   | GP21   |
//!
//! Shared driver enable (active low) on GP22. Host commands on UART0
//! (GP0 TX, GP1 RX), telemetry on UART1 (GP4 TX, GP5 RX).

use embassy_rp::gpio::AnyPin;
use embassy_rp::Peri;
use embassy_time::Delay;

use hexaxis_core::Dispatcher;
use hexaxis_drivers::io::{EnableLine, PinEndstops};
use hexaxis_drivers::stepper::AccelStepper;
use hexaxis_hal_rp2040::{RpInput, RpOutput};

/// Baud rate of both serial channels
pub const BAUD_RATE: u32 = 115_200;

/// STEP pulse width for the carrier's drivers (microseconds)
pub const STEP_PULSE_WIDTH_US: u32 = 3;

/// Trajectory engine for one axis
pub type Engine = AccelStepper<RpOutput<'static>, RpOutput<'static>, Delay>;

/// Minimum endstop bank
pub type Endstops = PinEndstops<RpInput<'static>>;

/// Shared driver enable line
pub type Enable = EnableLine<RpOutput<'static>>;

/// Complete machine state owned by the control task
pub type Machine = Dispatcher<Engine, Endstops, Enable>;

/// Build an axis engine from its STEP and DIR pins
pub fn engine(step: Peri<'static, AnyPin>, dir: Peri<'static, AnyPin>) -> Engine {
    AccelStepper::new(RpOutput::new(step, false), RpOutput::new(dir, false), Delay)
        .with_pulse_width(STEP_PULSE_WIDTH_US)
}

/// Build the endstop bank from the six minimum endstop inputs
pub fn endstops(pins: [Peri<'static, AnyPin>; 6]) -> Endstops {
    PinEndstops::new(pins.map(RpInput::pull_up))
}

/// Build the enable line, released until the first command
pub fn enable(pin: Peri<'static, AnyPin>) -> Enable {
    EnableLine::new(RpOutput::new(pin, true))
}
