use crate::strategy::BatchConfig;
use crate::types::policy::{DEFAULT_ATTEMPT_TTL_HOURS, DEFAULT_BLOCK_THRESHOLD};
use crate::types::LockoutPolicy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Replay recorded transfer submissions through the attempt lockout
#[derive(Parser, Debug)]
#[command(name = "transfer-lockout")]
#[command(about = "Replay transfer submissions through the attempt lockout", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing transfer submissions
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for the replay
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of submissions per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of submissions per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of runtime worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads processing sessions concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,

    /// Attempt count at which a session is blocked
    #[arg(
        long = "block-threshold",
        value_name = "COUNT",
        default_value_t = DEFAULT_BLOCK_THRESHOLD,
        help = "Attempt count at which a session is blocked"
    )]
    pub block_threshold: u32,

    /// Lifetime of the attempt counter in hours
    #[arg(
        long = "ttl-hours",
        value_name = "HOURS",
        default_value_t = DEFAULT_ATTEMPT_TTL_HOURS,
        help = "Lifetime of the attempt counter in hours, refreshed on every attempt"
    )]
    pub ttl_hours: i64,
}

/// Available processing strategies for the replay
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults. Zero values are rejected by
    /// `BatchConfig::new`, which logs a warning and uses the default instead.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }

    /// Create the lockout policy from CLI arguments
    ///
    /// Hour counts too large for a duration are treated as too long and fall
    /// back to the default like any other out-of-range TTL.
    pub fn to_policy(&self) -> LockoutPolicy {
        let ttl = chrono::Duration::try_hours(self.ttl_hours).unwrap_or(chrono::Duration::MAX);
        LockoutPolicy::new(self.block_threshold, ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::default_strategy(&["program", "input.csv"], StrategyType::Async)]
    #[case::explicit_sync(&["program", "--strategy", "sync", "input.csv"], StrategyType::Sync)]
    #[case::explicit_async(&["program", "--strategy", "async", "input.csv"], StrategyType::Async)]
    fn test_strategy_parsing(#[case] args: &[&str], #[case] expected: StrategyType) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        match (&parsed.strategy, &expected) {
            (StrategyType::Sync, StrategyType::Sync) => (),
            (StrategyType::Async, StrategyType::Async) => (),
            _ => panic!("Expected {:?}, got {:?}", expected, parsed.strategy),
        }
    }

    #[rstest]
    #[case::all_defaults(&["program", "input.csv"], 1000, num_cpus::get())]
    #[case::custom_batch_size(&["program", "--batch-size", "2000", "input.csv"], 2000, num_cpus::get())]
    #[case::custom_max_concurrent(&["program", "--max-concurrent", "8", "input.csv"], 1000, 8)]
    #[case::zero_batch_size(&["program", "--batch-size", "0", "input.csv"], 1000, num_cpus::get())]
    #[case::zero_max_concurrent(&["program", "--max-concurrent", "0", "input.csv"], 1000, num_cpus::get())]
    fn test_batch_config_conversion(
        #[case] args: &[&str],
        #[case] expected_batch_size: usize,
        #[case] expected_max_concurrent: usize,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let config = parsed.to_batch_config();

        assert_eq!(config.batch_size, expected_batch_size);
        assert_eq!(config.max_concurrent_batches, expected_max_concurrent);
    }

    #[rstest]
    #[case::defaults(&["program", "input.csv"], 2, 24)]
    #[case::custom_threshold(&["program", "--block-threshold", "5", "input.csv"], 5, 24)]
    #[case::custom_ttl(&["program", "--ttl-hours", "1", "input.csv"], 2, 1)]
    #[case::zero_threshold_falls_back(&["program", "--block-threshold", "0", "input.csv"], 2, 24)]
    #[case::zero_ttl_falls_back(&["program", "--ttl-hours", "0", "input.csv"], 2, 24)]
    #[case::too_long_ttl_falls_back(&["program", "--ttl-hours", "100000000000", "input.csv"], 2, 24)]
    #[case::unrepresentable_ttl_falls_back(&["program", "--ttl-hours", "9000000000000", "input.csv"], 2, 24)]
    fn test_policy_conversion(
        #[case] args: &[&str],
        #[case] expected_threshold: u32,
        #[case] expected_ttl_hours: i64,
    ) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        let policy = parsed.to_policy();

        assert_eq!(policy.block_threshold, expected_threshold);
        assert_eq!(policy.attempt_ttl, chrono::Duration::hours(expected_ttl_hours));
    }

    #[rstest]
    #[case::missing_input(&["program"])]
    #[case::invalid_strategy(&["program", "--strategy", "invalid", "input.csv"])]
    #[case::negative_threshold(&["program", "--block-threshold", "-1", "input.csv"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        let result = CliArgs::try_parse_from(args);
        assert!(result.is_err());
    }
}
