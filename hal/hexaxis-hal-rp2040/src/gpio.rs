//! GPIO wrappers
//!
//! Thin adapters that let embassy-rp pins satisfy the `hexaxis-hal` pin
//! traits used by the drivers.

use embassy_rp::gpio::{AnyPin, Input, Level as PinLevel, Output, Pull};
use embassy_rp::Peri;

/// Push-pull output pin
pub struct RpOutput<'d> {
    pin: Output<'d>,
}

impl<'d> RpOutput<'d> {
    /// Configure a pin as an output at the given initial level
    pub fn new(pin: Peri<'d, AnyPin>, initial_high: bool) -> Self {
        let level = if initial_high {
            PinLevel::High
        } else {
            PinLevel::Low
        };
        Self {
            pin: Output::new(pin, level),
        }
    }
}

impl hexaxis_hal::OutputPin for RpOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Input pin with pull resistor
pub struct RpInput<'d> {
    pin: Input<'d>,
}

impl<'d> RpInput<'d> {
    /// Configure a pin as an input with the internal pull-up
    ///
    /// Suits switches wired to ground.
    pub fn pull_up(pin: Peri<'d, AnyPin>) -> Self {
        Self {
            pin: Input::new(pin, Pull::Up),
        }
    }
}

impl hexaxis_hal::InputPin for RpInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
