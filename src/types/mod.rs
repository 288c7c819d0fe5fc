//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `session`: Session identifiers, attempt state and lockout state
//! - `policy`: Lockout policy configuration
//! - `transfer`: Transfer requests, outcomes and wire results
//! - `account`: Dashboard account and user fixtures
//! - `error`: Error types for the lockout engine

pub mod account;
pub mod error;
pub mod policy;
pub mod session;
pub mod transfer;

pub use account::{Account, AccountKind, User};
pub use error::LockoutError;
pub use policy::LockoutPolicy;
pub use session::{LockoutState, SessionId};
pub use transfer::{AccountStatus, TransferOutcome, TransferRecord, TransferRequest, TransferResult};
