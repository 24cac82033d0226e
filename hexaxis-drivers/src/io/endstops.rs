//! GPIO endstop bank
//!
//! Six minimum endstops, optionally six maximum endstops. Switches are
//! normally wired active-low with pull-ups, so a closed switch reads low.

use hexaxis_core::traits::EndstopBank;
use hexaxis_hal::{InputPin, Level};
use hexaxis_protocol::{AxisId, AXIS_COUNT};

/// Endstop bank read directly from input pins
pub struct PinEndstops<P> {
    min: [P; AXIS_COUNT],
    max: Option<[P; AXIS_COUNT]>,
    level: Level,
}

impl<P: InputPin> PinEndstops<P> {
    /// Active-low minimum endstops only
    pub fn new(min: [P; AXIS_COUNT]) -> Self {
        Self {
            min,
            max: None,
            level: Level::ActiveLow,
        }
    }

    /// Add a bank of maximum endstops
    pub fn with_max(mut self, max: [P; AXIS_COUNT]) -> Self {
        self.max = Some(max);
        self
    }

    /// Override the switch polarity
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }
}

impl<P: InputPin> EndstopBank for PinEndstops<P> {
    fn min_triggered(&self, axis: AxisId) -> bool {
        self.level.is_active(self.min[axis.index()].is_high())
    }

    fn max_triggered(&self, axis: AxisId) -> Option<bool> {
        self.max
            .as_ref()
            .map(|max| self.level.is_active(max[axis.index()].is_high()))
    }
}
