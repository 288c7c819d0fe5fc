//! Core traits for session storage and time
//!
//! This module defines the trait abstractions that allow both the
//! single-process and the concurrent session stores to be used
//! interchangeably by the attempt tracker.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::types::{LockoutError, SessionId};

/// Trait for the session storage boundary
///
/// Stores string values per `(session, key)` with a time-to-live, like a
/// cookie jar or a key-value session cache. Every operation may fail with
/// `LockoutError::StorageUnavailable`.
///
/// All methods take `&self`; implementations synchronize internally so a
/// store can be shared across threads behind an `Arc`.
pub trait SessionStore: Send + Sync {
    /// Read a value; `None` if absent or expired at `now`
    fn get(
        &self,
        session: &SessionId,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, LockoutError>;

    /// Write a value that expires `ttl` after `now`
    fn set(
        &self,
        session: &SessionId,
        key: &str,
        value: String,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<(), LockoutError>;

    /// Remove a value; removing an absent value is not an error
    fn delete(&self, session: &SessionId, key: &str) -> Result<(), LockoutError>;

    /// Atomically increment a counter and refresh its expiry
    ///
    /// An absent or expired counter counts as zero. Returns the new value.
    fn increment(
        &self,
        session: &SessionId,
        key: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<u32, LockoutError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(
        &self,
        session: &SessionId,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, LockoutError> {
        (**self).get(session, key, now)
    }

    fn set(
        &self,
        session: &SessionId,
        key: &str,
        value: String,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<(), LockoutError> {
        (**self).set(session, key, value, ttl, now)
    }

    fn delete(&self, session: &SessionId, key: &str) -> Result<(), LockoutError> {
        (**self).delete(session, key)
    }

    fn increment(
        &self,
        session: &SessionId,
        key: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<u32, LockoutError> {
        (**self).increment(session, key, ttl, now)
    }
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}
