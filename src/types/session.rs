//! Session-related types for the transfer lockout engine
//!
//! This module defines the opaque session identifier and the lockout state
//! derived from a session's attempt count.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::policy::LockoutPolicy;

/// Opaque session identifier
///
/// Identifies one client's interaction lifetime. The engine never interprets
/// the contents; it is only used as a storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        SessionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(id: &str) -> Self {
        SessionId::new(id)
    }
}

impl From<String> for SessionId {
    fn from(id: String) -> Self {
        SessionId(id)
    }
}

/// Position of a session in the transfer-attempt state machine
///
/// Derived purely from the attempt count and the policy threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockoutState {
    /// No attempt processed in the current window
    Open,

    /// At least one attempt processed, still below the block threshold
    WarnedOnce,

    /// Threshold reached; terminal until the window expires or a reset
    Blocked,
}

impl LockoutState {
    pub fn from_count(attempt_count: u32, policy: &LockoutPolicy) -> Self {
        if attempt_count == 0 {
            LockoutState::Open
        } else if attempt_count < policy.block_threshold {
            LockoutState::WarnedOnce
        } else {
            LockoutState::Blocked
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    #[rstest]
    #[case::fresh(0, LockoutState::Open)]
    #[case::first_attempt(1, LockoutState::WarnedOnce)]
    #[case::threshold(2, LockoutState::Blocked)]
    #[case::past_threshold(7, LockoutState::Blocked)]
    fn test_state_from_count(#[case] count: u32, #[case] expected: LockoutState) {
        assert_eq!(
            LockoutState::from_count(count, &LockoutPolicy::default()),
            expected
        );
    }

    #[test]
    fn test_state_from_count_with_higher_threshold() {
        let policy = LockoutPolicy::new(3, Duration::hours(24));
        assert_eq!(LockoutState::from_count(2, &policy), LockoutState::WarnedOnce);
        assert_eq!(LockoutState::from_count(3, &policy), LockoutState::Blocked);
    }

    #[test]
    fn test_session_id_display() {
        let session = SessionId::from("abc-123");
        assert_eq!(session.to_string(), "abc-123");
        assert_eq!(session.as_str(), "abc-123");
    }
}
