//! Thread-safe session storage for concurrent replay
//!
//! This module provides the `ConcurrentSessionStore`, which keeps session values
//! in a `DashMap` so that many sessions can be served in parallel.
//!
//! # Design
//!
//! `DashMap` shards its keys internally. Operations on different sessions
//! touch different shards most of the time and proceed without contention,
//! while operations on the same `(session, key)` are serialized by the shard
//! lock.
//!
//! # Atomic Increment
//!
//! `increment` runs its read-modify-write while holding the entry lock, so two
//! concurrent transfer attempts from one session always produce two distinct
//! counts.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

use crate::core::session_store::{next_count, StorageKey, StoredValue};
use crate::core::traits::SessionStore;
use crate::types::{LockoutError, SessionId};

/// Thread-safe session store backed by `DashMap`
///
/// # Thread Safety
///
/// All methods are safe to call from multiple threads concurrently:
/// - Concurrent reads of different sessions don't block each other
/// - Concurrent writes to different sessions don't block each other
/// - Operations on the same session value are properly synchronized
#[derive(Debug, Default)]
pub struct ConcurrentSessionStore {
    /// Concurrent HashMap storing values by `(session, key)`
    values: DashMap<StorageKey, StoredValue>,
}

impl ConcurrentSessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            values: DashMap::new(),
        }
    }

    /// Drop every value whose window has elapsed at `now`
    ///
    /// # Returns
    ///
    /// The number of values removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.values.len();
        self.values.retain(|_, stored| stored.is_live(now));
        before.saturating_sub(self.values.len())
    }

    /// Number of values currently held, including not yet purged expired ones
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl SessionStore for ConcurrentSessionStore {
    fn get(
        &self,
        session: &SessionId,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, LockoutError> {
        let storage_key = (session.clone(), key.to_string());

        match self.values.get(&storage_key) {
            Some(stored) if stored.is_live(now) => return Ok(Some(stored.value.clone())),
            Some(_) => {}
            None => return Ok(None),
        }

        // Expired: drop it, unless a concurrent writer refreshed it meanwhile
        self.values
            .remove_if(&storage_key, |_, stored| !stored.is_live(now));
        Ok(None)
    }

    fn set(
        &self,
        session: &SessionId,
        key: &str,
        value: String,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<(), LockoutError> {
        let stored = StoredValue::new(value, ttl, now)?;
        self.values.insert((session.clone(), key.to_string()), stored);
        Ok(())
    }

    fn delete(&self, session: &SessionId, key: &str) -> Result<(), LockoutError> {
        self.values.remove(&(session.clone(), key.to_string()));
        Ok(())
    }

    fn increment(
        &self,
        session: &SessionId,
        key: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<u32, LockoutError> {
        let fresh = StoredValue::new("0".to_string(), ttl, now)?;
        let expires_at = fresh.expires_at;
        let mut entry = self
            .values
            .entry((session.clone(), key.to_string()))
            .or_insert(fresh);

        let count = next_count(session, key, Some(entry.value()), now)?;
        *entry.value_mut() = StoredValue {
            value: count.to_string(),
            expires_at,
        };
        Ok(count)
    }
}
