//! Concurrent implementations of core components
//!
//! This module provides thread-safe components used by the async replay
//! strategy, built on DashMap and tokio tasks.
//!
//! - **ConcurrentSessionStore**: Thread-safe session storage using DashMap
//! - **BatchProcessor**: Partitions batches by session and runs sessions in parallel
//!
//! # Thread Safety
//!
//! - Submissions of different sessions proceed in parallel
//! - Submissions of the same session are processed in input order
//! - No global locks - fine-grained locking per stored value

pub mod batch_processor;
pub mod session_store;

pub use batch_processor::{BatchProcessor, ProcessingResult};
pub use session_store::ConcurrentSessionStore;
