//! Shared stepper driver enable line
//!
//! One output gates every driver on the board. Step drivers such as the
//! A4988 and DRV8825 enable on a low `EN` pin.

use hexaxis_core::traits::DriverEnable;
use hexaxis_hal::{Level, OutputPin};

/// Enable line on a GPIO output
pub struct EnableLine<O> {
    pin: O,
    level: Level,
}

impl<O: OutputPin> EnableLine<O> {
    /// Active-low enable line, initially released
    pub fn new(pin: O) -> Self {
        Self::with_level(pin, Level::ActiveLow)
    }

    /// Enable line with explicit polarity, initially released
    pub fn with_level(mut pin: O, level: Level) -> Self {
        pin.set_state(level.pin_level(false));
        Self { pin, level }
    }
}

impl<O: OutputPin> DriverEnable for EnableLine<O> {
    fn set_enabled(&mut self, enabled: bool) {
        self.pin.set_state(self.level.pin_level(enabled));
    }

    fn is_enabled(&self) -> bool {
        self.level.is_active(self.pin.is_set_high())
    }
}
