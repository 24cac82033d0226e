//! Endstop and driver-enable traits
//!
//! Both report and accept logical states. Pin polarity is the
//! implementation's concern.

use hexaxis_protocol::AxisId;

/// Bank of per-axis endstop inputs
pub trait EndstopBank {
    /// Check if the axis's minimum endstop is triggered
    fn min_triggered(&self, axis: AxisId) -> bool;

    /// Check if the axis's maximum endstop is triggered
    ///
    /// Returns `None` when no maximum endstops are fitted.
    fn max_triggered(&self, axis: AxisId) -> Option<bool> {
        let _ = axis;
        None
    }
}

/// The shared stepper driver enable line
pub trait DriverEnable {
    /// Assert or release the enable line
    fn set_enabled(&mut self, enabled: bool);

    /// Check if the enable line is asserted
    fn is_enabled(&self) -> bool;
}
