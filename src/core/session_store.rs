//! Single-process session storage
//!
//! This module provides the `MemorySessionStore`, an in-memory implementation
//! of the [`SessionStore`] boundary. Values are kept per `(session, key)`
//! together with their expiry instant, mirroring the layout of a cookie jar:
//! one key for the attempt counter, one for the authentication marker.
//!
//! # Expiry
//!
//! Expired values are never returned. They are dropped lazily the next time
//! they are touched, or eagerly by [`MemorySessionStore::purge_expired`].
//!
//! # Failure
//!
//! The map is guarded by a `Mutex`. A poisoned lock means a writer panicked
//! half-way through an update; the store then reports
//! `StorageUnavailable` instead of guessing at the state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};

use crate::core::traits::SessionStore;
use crate::types::{LockoutError, SessionId};

/// Storage key of a value: owning session plus key name
pub type StorageKey = (SessionId, String);

/// A stored value with its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredValue {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredValue {
    /// Build a value expiring `ttl` after `now`
    ///
    /// An expiry past the representable range is a storage failure.
    pub fn new(value: String, ttl: Duration, now: DateTime<Utc>) -> Result<Self, LockoutError> {
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            LockoutError::storage_unavailable(format!(
                "expiry overflow: {} seconds after {}",
                ttl.num_seconds(),
                now
            ))
        })?;
        Ok(Self { value, expires_at })
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Parse a stored counter value
///
/// A value that is not a count means the medium holds something we did not
/// write; reporting it as zero would silently unblock the session.
pub(crate) fn parse_count(session: &SessionId, key: &str, raw: &str) -> Result<u32, LockoutError> {
    raw.trim().parse::<u32>().map_err(|_| {
        LockoutError::storage_unavailable(format!(
            "corrupt counter '{}' under key '{}' for session {}",
            raw, key, session
        ))
    })
}

/// Compute the next counter value from the current (possibly expired) entry
pub(crate) fn next_count(
    session: &SessionId,
    key: &str,
    current: Option<&StoredValue>,
    now: DateTime<Utc>,
) -> Result<u32, LockoutError> {
    let count = match current {
        Some(stored) if stored.is_live(now) => parse_count(session, key, &stored.value)?,
        _ => 0,
    };

    count.checked_add(1).ok_or_else(|| {
        LockoutError::storage_unavailable(format!(
            "counter overflow under key '{}' for session {}",
            key, session
        ))
    })
}

/// In-memory session store for single-process use
///
/// Maintains a HashMap of `(session, key)` to stored value behind a `Mutex`.
/// The counter increment happens entirely under the lock, so concurrent
/// attempts from one session cannot both observe the same count.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    /// Map of storage key to stored value
    values: Mutex<HashMap<StorageKey, StoredValue>>,
}

impl MemorySessionStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<StorageKey, StoredValue>>, LockoutError> {
        self.values
            .lock()
            .map_err(|_| LockoutError::storage_unavailable("session store lock poisoned"))
    }

    /// Drop every value whose window has elapsed at `now`
    ///
    /// # Returns
    ///
    /// The number of values removed
    pub fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, LockoutError> {
        let mut values = self.lock()?;
        let before = values.len();
        values.retain(|_, stored| stored.is_live(now));
        Ok(before - values.len())
    }

    /// Number of values currently held, including not yet purged expired ones
    pub fn len(&self) -> Result<usize, LockoutError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, LockoutError> {
        Ok(self.len()? == 0)
    }
}

impl SessionStore for MemorySessionStore {
    fn get(
        &self,
        session: &SessionId,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<String>, LockoutError> {
        let mut values = self.lock()?;
        let storage_key = (session.clone(), key.to_string());

        match values.get(&storage_key) {
            Some(stored) if stored.is_live(now) => Ok(Some(stored.value.clone())),
            Some(_) => {
                values.remove(&storage_key);
                Ok(None)
            }
            None => Ok(None),
        }
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
        let mut values = self.lock()?;
        values.insert((session.clone(), key.to_string()), stored);
        Ok(())
    }

    fn delete(&self, session: &SessionId, key: &str) -> Result<(), LockoutError> {
        let mut values = self.lock()?;
        values.remove(&(session.clone(), key.to_string()));
        Ok(())
    }

    fn increment(
        &self,
        session: &SessionId,
        key: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<u32, LockoutError> {
        let mut values = self.lock()?;
        let storage_key = (session.clone(), key.to_string());

        let count = next_count(session, key, values.get(&storage_key), now)?;
        let stored = StoredValue::new(count.to_string(), ttl, now)?;
        values.insert(storage_key, stored);
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_get_absent_value() {
        let store = MemorySessionStore::new();
        let value = store.get(&SessionId::from("s1"), "k", t0()).unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn test_set_and_get_value() {
        let store = MemorySessionStore::new();
        let session = SessionId::from("s1");

        store
            .set(&session, "k", "v".to_string(), Duration::hours(1), t0())
            .unwrap();

        assert_eq!(store.get(&session, "k", t0()).unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_expired_value_is_absent_and_dropped() {
        let store = MemorySessionStore::new();
        let session = SessionId::from("s1");

        store
            .set(&session, "k", "v".to_string(), Duration::hours(1), t0())
            .unwrap();

        let later = t0() + Duration::hours(1);
        assert_eq!(store.get(&session, "k", later).unwrap(), None);
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_values_are_scoped_per_session() {
        let store = MemorySessionStore::new();
        let s1 = SessionId::from("s1");
        let s2 = SessionId::from("s2");

        store
            .set(&s1, "k", "one".to_string(), Duration::hours(1), t0())
            .unwrap();

        assert_eq!(store.get(&s2, "k", t0()).unwrap(), None);
    }

    #[test]
    fn test_delete_removes_value() {
        let store = MemorySessionStore::new();
        let session = SessionId::from("s1");

        store
            .set(&session, "k", "v".to_string(), Duration::hours(1), t0())
            .unwrap();
        store.delete(&session, "k").unwrap();

        assert_eq!(store.get(&session, "k", t0()).unwrap(), None);
        // Deleting again is fine
        assert!(store.delete(&session, "k").is_ok());
    }

    #[test]
    fn test_increment_starts_at_one_and_refreshes_expiry() {
        let store = MemorySessionStore::new();
        let session = SessionId::from("s1");
        let ttl = Duration::hours(24);

        assert_eq!(store.increment(&session, "n", ttl, t0()).unwrap(), 1);

        // 23h later the counter is still live; the increment pushes expiry out again
        let later = t0() + Duration::hours(23);
        assert_eq!(store.increment(&session, "n", ttl, later).unwrap(), 2);

        // 24h after the first write but only 1h after the second: still live
        let check = t0() + Duration::hours(24);
        assert_eq!(store.get(&session, "n", check).unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_increment_after_expiry_restarts_from_zero() {
        let store = MemorySessionStore::new();
        let session = SessionId::from("s1");
        let ttl = Duration::hours(24);

        store.increment(&session, "n", ttl, t0()).unwrap();
        store.increment(&session, "n", ttl, t0()).unwrap();

        let later = t0() + Duration::hours(25);
        assert_eq!(store.increment(&session, "n", ttl, later).unwrap(), 1);
    }

    #[test]
    fn test_increment_rejects_corrupt_counter() {
        let store = MemorySessionStore::new();
        let session = SessionId::from("s1");

        store
            .set(&session, "n", "NaN".to_string(), Duration::hours(1), t0())
            .unwrap();

        let result = store.increment(&session, "n", Duration::hours(1), t0());
        assert!(matches!(result, Err(LockoutError::StorageUnavailable { .. })));
    }

    #[test]
    fn test_expiry_overflow_is_a_storage_failure_and_keeps_store_usable() {
        let store = MemorySessionStore::new();
        let session = SessionId::from("s1");

        let err = store
            .increment(&session, "n", Duration::MAX, t0())
            .unwrap_err();
        assert!(err.is_storage_failure());
        assert!(store
            .set(&session, "k", "v".to_string(), Duration::MAX, t0())
            .unwrap_err()
            .is_storage_failure());

        // The failed writes left nothing behind and did not poison the lock
        assert_eq!(store.get(&session, "n", t0()).unwrap(), None);
        assert_eq!(
            store.increment(&session, "n", Duration::hours(1), t0()).unwrap(),
            1
        );
    }

    #[test]
    fn test_purge_expired() {
        let store = MemorySessionStore::new();
        let ttl = Duration::hours(1);

        store
            .set(&SessionId::from("old"), "k", "v".to_string(), ttl, t0())
            .unwrap();
        store
            .set(
                &SessionId::from("new"),
                "k",
                "v".to_string(),
                ttl,
                t0() + Duration::minutes(30),
            )
            .unwrap();

        let removed = store.purge_expired(t0() + Duration::minutes(61)).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_concurrent_increments_are_not_lost() {
        let store = Arc::new(MemorySessionStore::new());
        let session = SessionId::from("s1");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let session = session.clone();
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        store
                            .increment(&session, "n", Duration::hours(24), t0())
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(&session, "n", t0()).unwrap(), Some("200".to_string()));
    }
}
