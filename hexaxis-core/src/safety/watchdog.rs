//! Command watchdog
//!
//! Trips when no command line has arrived for the move timeout. After a
//! trip the window restarts, so a silent host sees one timeout per window.

use crate::time::{has_expired, ms_to_us};

/// Watchdog over the command channel
#[derive(Debug, Clone)]
pub struct CommandWatchdog {
    /// Timestamp of the last reset (µs)
    last_command_us: u32,
    /// Timeout window (µs)
    timeout_us: u32,
}

impl CommandWatchdog {
    /// Create a watchdog whose first window starts at `now_us`
    pub fn new(timeout_ms: u32, now_us: u32) -> Self {
        Self {
            last_command_us: now_us,
            timeout_us: ms_to_us(timeout_ms),
        }
    }

    /// Record a received command
    pub fn reset(&mut self, now_us: u32) {
        self.last_command_us = now_us;
    }

    /// Check for starvation
    ///
    /// Returns true once per elapsed window; the window restarts at `now_us`.
    pub fn check(&mut self, now_us: u32) -> bool {
        if has_expired(now_us, self.last_command_us, self.timeout_us) {
            self.last_command_us = now_us;
            true
        } else {
            false
        }
    }

    /// Timestamp of the last reset
    pub fn last_command_us(&self) -> u32 {
        self.last_command_us
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT_MS: u32 = 10_000;
    const TIMEOUT_US: u32 = TIMEOUT_MS * 1000;

    #[test]
    fn test_quiet_before_timeout() {
        let mut watchdog = CommandWatchdog::new(TIMEOUT_MS, 0);
        assert!(!watchdog.check(TIMEOUT_US - 1));
    }

    #[test]
    fn test_fires_once_per_window() {
        let mut watchdog = CommandWatchdog::new(TIMEOUT_MS, 0);
        assert!(watchdog.check(TIMEOUT_US));
        assert!(!watchdog.check(TIMEOUT_US + 1));
        assert!(!watchdog.check(2 * TIMEOUT_US - 1));
        assert!(watchdog.check(2 * TIMEOUT_US));
    }

    #[test]
    fn test_reset_restarts_window() {
        let mut watchdog = CommandWatchdog::new(TIMEOUT_MS, 0);
        watchdog.reset(TIMEOUT_US - 100);
        assert!(!watchdog.check(TIMEOUT_US));
        assert!(watchdog.check(2 * TIMEOUT_US - 100));
    }

    #[test]
    fn test_clock_wraparound() {
        let start = u32::MAX - 1_000;
        let mut watchdog = CommandWatchdog::new(TIMEOUT_MS, start);
        assert!(!watchdog.check(start.wrapping_add(TIMEOUT_US - 1)));
        assert!(watchdog.check(start.wrapping_add(TIMEOUT_US)));
    }
}
