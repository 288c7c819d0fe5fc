//! Lockout policy configuration

use chrono::Duration;

/// Longest accepted validity window, in days
pub const MAX_ATTEMPT_TTL_DAYS: i64 = 365;

/// Number of processed attempts after which a session is blocked
pub const DEFAULT_BLOCK_THRESHOLD: u32 = 2;

/// Validity window of the attempt counter, in hours
pub const DEFAULT_ATTEMPT_TTL_HOURS: i64 = 24;

/// Controls when a session becomes blocked and how long the counter lives
///
/// The defaults reproduce the fixed business rule: the first attempt gets a
/// retry message, the second blocks the session for 24 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    /// Attempt count at which `is_blocked` turns true
    pub block_threshold: u32,

    /// Time-to-live of the counter, refreshed on every increment
    pub attempt_ttl: Duration,
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self {
            block_threshold: DEFAULT_BLOCK_THRESHOLD,
            attempt_ttl: Duration::hours(DEFAULT_ATTEMPT_TTL_HOURS),
        }
    }
}

impl LockoutPolicy {
    /// Create a policy, replacing invalid values with the defaults
    ///
    /// A zero threshold would block sessions that never submitted anything and
    /// a non-positive TTL would expire the counter as soon as it is written.
    /// A TTL longer than [`MAX_ATTEMPT_TTL_DAYS`] is rejected as well.
    pub fn new(block_threshold: u32, attempt_ttl: Duration) -> Self {
        let default = Self::default();

        let block_threshold = if block_threshold == 0 {
            tracing::warn!(
                block_threshold,
                fallback = default.block_threshold,
                "Invalid block threshold, using default"
            );
            default.block_threshold
        } else {
            block_threshold
        };

        let attempt_ttl = if attempt_ttl <= Duration::zero() {
            tracing::warn!(
                ttl_seconds = attempt_ttl.num_seconds(),
                fallback_hours = DEFAULT_ATTEMPT_TTL_HOURS,
                "Invalid attempt TTL, using default"
            );
            default.attempt_ttl
        } else if attempt_ttl > Duration::days(MAX_ATTEMPT_TTL_DAYS) {
            tracing::warn!(
                ttl_seconds = attempt_ttl.num_seconds(),
                max_days = MAX_ATTEMPT_TTL_DAYS,
                fallback_hours = DEFAULT_ATTEMPT_TTL_HOURS,
                "Attempt TTL too long, using default"
            );
            default.attempt_ttl
        } else {
            attempt_ttl
        };

        Self {
            block_threshold,
            attempt_ttl,
        }
    }
}
