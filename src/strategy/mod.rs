//! Processing strategy module for submission replay
//!
//! This module defines the Strategy pattern for complete replay pipelines,
//! encompassing both CSV parsing and transfer processing. This allows different
//! implementations (synchronous, asynchronous batch) to be selected at runtime.

use crate::cli::StrategyType;
use crate::core::AccountRepository;
use crate::types::LockoutPolicy;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete replay pipelines
///
/// Each strategy reads recorded submissions from a CSV file, runs them through
/// a transaction processor with a fresh session store, and writes one outcome
/// row per processed submission.
pub trait ProcessingStrategy: Send + Sync {
    /// Replay submissions from input file and write outcomes to output
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all processing completed (possibly with skipped rows)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    ///
    /// Invalid rows and per-submission storage failures are logged and
    /// skipped; they do not cause this method to return an error.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
/// * `policy` - Lockout policy applied to every session
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
    policy: LockoutPolicy,
) -> Box<dyn ProcessingStrategy> {
    let accounts = AccountRepository::demo();
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(policy, accounts)),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config, policy, accounts))
        }
    }
}
