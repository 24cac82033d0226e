//! Machine configuration
//!
//! Travel range, the shared motion profile, and the safety timeouts.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use hexaxis_protocol::AXIS_COUNT;

/// Lowest committed step position
pub const MIN_POSITION_STEPS: i32 = 0;

/// Highest committed step position
pub const MAX_POSITION_STEPS: i32 = 100_000;

/// Default profile velocity (steps/s)
pub const DEFAULT_SPEED_STEPS_PER_SEC: u32 = 1200;

/// Default profile acceleration (steps/s²)
pub const DEFAULT_ACCEL_STEPS_PER_SEC2: u32 = 500;

/// Command watchdog timeout
pub const MOVE_TIMEOUT_MS: u32 = 10_000;

/// Homing seek timeout
pub const HOMING_TIMEOUT_MS: u32 = 20_000;

/// Homing runs at profile velocity divided by this
pub const HOMING_SPEED_DIVISOR: u32 = 4;

/// Longest timeout that still compares correctly on a wrapping µs clock
pub const MAX_TIMEOUT_MS: u32 = (u32::MAX / 2) / 1000;

/// Configuration errors detected by [`MachineConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Travel range is empty or inverted
    InvalidTravel,
    /// Profile velocity or acceleration is zero
    InvalidProfile,
    /// Homing speed divisor is zero
    InvalidHomingDivisor,
    /// A timeout is zero or too long for the wrapping clock
    InvalidTimeout,
}

/// Inclusive travel range in steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TravelLimits {
    /// Lowest allowed position
    pub min_steps: i32,
    /// Highest allowed position
    pub max_steps: i32,
}

impl Default for TravelLimits {
    fn default() -> Self {
        Self {
            min_steps: MIN_POSITION_STEPS,
            max_steps: MAX_POSITION_STEPS,
        }
    }
}

impl TravelLimits {
    /// Check if a position is within the travel range
    pub fn contains(&self, position: i64) -> bool {
        position >= self.min_steps as i64 && position <= self.max_steps as i64
    }

    /// Seek target for homing: one full travel length below the minimum
    pub fn homing_target(&self) -> i32 {
        let span = self.max_steps as i64 - self.min_steps as i64;
        (self.min_steps as i64 - span).max(i32::MIN as i64) as i32
    }
}

/// Shared velocity/acceleration limits applied to all axes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotionProfile {
    /// Maximum velocity in steps/s
    pub velocity: u32,
    /// Acceleration in steps/s²
    pub acceleration: u32,
}

impl Default for MotionProfile {
    fn default() -> Self {
        Self {
            velocity: DEFAULT_SPEED_STEPS_PER_SEC,
            acceleration: DEFAULT_ACCEL_STEPS_PER_SEC2,
        }
    }
}

/// Complete machine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    /// Travel range shared by all axes
    pub travel: TravelLimits,
    /// Profile in effect at power-on
    pub profile: MotionProfile,
    /// Command watchdog timeout in milliseconds
    pub move_timeout_ms: u32,
    /// Homing seek timeout in milliseconds
    pub homing_timeout_ms: u32,
    /// Homing velocity divisor
    pub homing_speed_divisor: u32,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            travel: TravelLimits::default(),
            profile: MotionProfile::default(),
            move_timeout_ms: MOVE_TIMEOUT_MS,
            homing_timeout_ms: HOMING_TIMEOUT_MS,
            homing_speed_divisor: HOMING_SPEED_DIVISOR,
        }
    }
}

impl MachineConfig {
    /// Check the configuration for values the controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.travel.min_steps >= self.travel.max_steps {
            return Err(ConfigError::InvalidTravel);
        }
        if self.profile.velocity == 0 || self.profile.acceleration == 0 {
            return Err(ConfigError::InvalidProfile);
        }
        if self.homing_speed_divisor == 0 {
            return Err(ConfigError::InvalidHomingDivisor);
        }
        for timeout in [self.move_timeout_ms, self.homing_timeout_ms] {
            if timeout == 0 || timeout > MAX_TIMEOUT_MS {
                return Err(ConfigError::InvalidTimeout);
            }
        }
        Ok(())
    }

    /// Homing velocity for a given profile velocity (never zero)
    pub fn homing_velocity(&self, profile_velocity: u32) -> u32 {
        (profile_velocity / self.homing_speed_divisor.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = MachineConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.profile.velocity, 1200);
        assert_eq!(config.profile.acceleration, 500);
    }

    #[test]
    fn test_travel_bounds() {
        let travel = TravelLimits::default();
        assert!(travel.contains(0));
        assert!(travel.contains(100_000));
        assert!(!travel.contains(-1));
        assert!(!travel.contains(100_001));
        assert!(!travel.contains(i64::from(i32::MAX) + 1));
    }

    #[test]
    fn test_homing_target_beyond_travel() {
        assert_eq!(TravelLimits::default().homing_target(), -100_000);
        let wide = TravelLimits {
            min_steps: i32::MIN + 10,
            max_steps: i32::MAX,
        };
        assert_eq!(wide.homing_target(), i32::MIN);
    }

    #[test]
    fn test_homing_velocity_is_quarter() {
        let config = MachineConfig::default();
        assert_eq!(config.homing_velocity(1200), 300);
        assert_eq!(config.homing_velocity(2), 1);
    }

    #[test]
    fn test_invalid_configs() {
        let mut config = MachineConfig::default();
        config.travel.max_steps = config.travel.min_steps;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTravel));

        let mut config = MachineConfig::default();
        config.profile.velocity = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidProfile));

        let mut config = MachineConfig::default();
        config.homing_speed_divisor = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidHomingDivisor));

        let mut config = MachineConfig::default();
        config.homing_timeout_ms = MAX_TIMEOUT_MS + 1;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTimeout));
    }
}
