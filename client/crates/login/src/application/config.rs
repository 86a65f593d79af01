//! Application Configuration
//!
//! Lockout policy and input rules for the login controller.

use std::time::Duration;

pub use crate::domain::state::BlankPolicy;

/// Failures before the form locks
pub const DEFAULT_LOCKOUT_THRESHOLD: u32 = 3;

/// How long the form stays locked (5 minutes)
pub const DEFAULT_LOCKOUT_DURATION: Duration = Duration::from_millis(300_000);

/// Login controller configuration
///
/// Fixed for the lifetime of a controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginConfig {
    /// Consecutive failures that trigger a lockout
    pub lockout_threshold: u32,
    /// Lockout length
    pub lockout_duration: Duration,
    /// Blank-field rule for submission gating
    pub blank_policy: BlankPolicy,
}

impl Default for LoginConfig {
    fn default() -> Self {
        Self {
            lockout_threshold: DEFAULT_LOCKOUT_THRESHOLD,
            lockout_duration: DEFAULT_LOCKOUT_DURATION,
            blank_policy: BlankPolicy::default(),
        }
    }
}

impl LoginConfig {
    pub fn new(lockout_threshold: u32, lockout_duration: Duration) -> Self {
        Self {
            lockout_threshold,
            lockout_duration,
            ..Default::default()
        }
    }

    /// Replace the blank-field rule
    pub fn with_blank_policy(self, blank_policy: BlankPolicy) -> Self {
        Self {
            blank_policy,
            ..self
        }
    }

    /// Get lockout duration in milliseconds
    pub fn lockout_duration_ms(&self) -> u64 {
        u64::try_from(self.lockout_duration.as_millis()).unwrap_or(u64::MAX)
    }

    /// Get lockout duration in whole seconds (as shown to the user)
    pub fn lockout_duration_secs(&self) -> u64 {
        self.lockout_duration.as_secs()
    }
}
