//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs, plus the polarity helper shared by the active-low
//! endstop inputs and the active-low driver enable line.

/// Electrical level that represents the "active" state of a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Signal is active when the pin reads/drives high
    ActiveHigh,
    /// Signal is active when the pin reads/drives low
    ActiveLow,
}

impl Level {
    /// Translate a raw pin level into the logical active state
    pub fn is_active(self, pin_high: bool) -> bool {
        match self {
            Level::ActiveHigh => pin_high,
            Level::ActiveLow => !pin_high,
        }
    }

    /// Pin level (true = high) that drives the signal to `active`
    pub fn pin_level(self, active: bool) -> bool {
        match self {
            Level::ActiveHigh => active,
            Level::ActiveLow => !active,
        }
    }
}

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}
