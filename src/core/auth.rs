//! Demo authentication marker
//!
//! The dashboard has a single demo user. Logging in performs no credential
//! verification: any non-empty email and password pair stores an opaque
//! marker in the session, and the marker's presence is what "signed in" means.

use chrono::Duration;

use crate::core::clock::SystemClock;
use crate::core::traits::{Clock, SessionStore};
use crate::types::{LockoutError, SessionId, User};

/// Storage key of the authentication marker
pub const AUTH_KEY: &str = "auth-token";

/// Opaque value stored under [`AUTH_KEY`]
pub const AUTH_MARKER: &str = "demo-token";

/// Lifetime of a demo login, in days
pub const AUTH_TTL_DAYS: i64 = 7;

/// The only user of the dashboard
pub fn demo_user() -> User {
    User {
        id: "1".to_string(),
        name: "James and Ashley".to_string(),
        email: "james.ashley@citibank.com".to_string(),
    }
}

/// Session login state backed by the session store
#[derive(Debug, Clone)]
pub struct AuthService<S, C = SystemClock> {
    store: S,
    clock: C,
    user: User,
}

impl<S: SessionStore, C: Clock> AuthService<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            user: demo_user(),
        }
    }

    /// Sign the session in
    ///
    /// # Errors
    ///
    /// * `InvalidCredentials` - email or password is blank
    /// * `StorageUnavailable` - the marker could not be written
    pub fn login(&self, session: &SessionId, email: &str, password: &str) -> Result<(), LockoutError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            tracing::info!(session = %session, "Login rejected");
            return Err(LockoutError::InvalidCredentials);
        }

        self.store.set(
            session,
            AUTH_KEY,
            AUTH_MARKER.to_string(),
            Duration::days(AUTH_TTL_DAYS),
            self.clock.now(),
        )?;
        tracing::info!(session = %session, "Session signed in");
        Ok(())
    }

    /// Sign the session out
    pub fn logout(&self, session: &SessionId) -> Result<(), LockoutError> {
        self.store.delete(session, AUTH_KEY)?;
        tracing::info!(session = %session, "Session signed out");
        Ok(())
    }

    /// The signed-in user, if the marker is present and unexpired
    pub fn current_user(&self, session: &SessionId) -> Result<Option<User>, LockoutError> {
        let marker = self.store.get(session, AUTH_KEY, self.clock.now())?;
        Ok(marker.map(|_| self.user.clone()))
    }
}
