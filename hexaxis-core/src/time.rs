//! Wrapping microsecond clock helpers
//!
//! The control loop hands every operation a `u32` microsecond timestamp.
//! It wraps after ~71 minutes, so all comparisons go through
//! [`elapsed_us`].

/// Microseconds elapsed from `since` to `now`, across a wrap
#[inline]
pub fn elapsed_us(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

/// Convert a millisecond timeout to microseconds (saturating)
#[inline]
pub fn ms_to_us(ms: u32) -> u32 {
    ms.saturating_mul(1000)
}

/// Check if `timeout_us` has passed since `since`
#[inline]
pub fn has_expired(now: u32, since: u32, timeout_us: u32) -> bool {
    elapsed_us(now, since) >= timeout_us
}
