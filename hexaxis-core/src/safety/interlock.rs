//! Direction-aware minimum endstop interlock
//!
//! An active minimum endstop blocks motion toward it and never blocks
//! motion away from it.

/// What the axis may do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterlockDecision {
    /// Advance the trajectory normally
    Proceed,
    /// Endstop hit while travelling toward it: stop now
    Trip,
    /// Endstop active with nothing left to do
    Hold,
}

/// Evaluate the interlock for one tick
///
/// # Arguments
/// - `min_triggered`: Minimum endstop state read this tick
/// - `distance_to_go`: Signed steps remaining on the engine
pub fn evaluate(min_triggered: bool, distance_to_go: i32) -> InterlockDecision {
    if !min_triggered {
        return InterlockDecision::Proceed;
    }
    match distance_to_go {
        d if d > 0 => InterlockDecision::Proceed,
        d if d < 0 => InterlockDecision::Trip,
        _ => InterlockDecision::Hold,
    }
}

/// Check whether a new relative move may be issued
pub fn permits_move(min_triggered: bool, delta: i32) -> bool {
    !(min_triggered && delta < 0)
}
