//! Processing strategy module
//!
//! This module defines the Strategy pattern for the complete reconciliation
//! pipeline: discovering log files, parsing them, rebuilding per-user
//! timelines and writing one ledger per user. Implementations differ only in
//! how they schedule I/O, and produce identical ledgers for the same input.

use crate::cli::StrategyType;
use crate::core::Clock;
use crate::types::LedgerError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

pub mod r#async;
pub mod sync;

pub use self::r#async::AsyncProcessingStrategy;
pub use sync::SyncProcessingStrategy;

/// Default name of the ledger directory created under the root
pub const DEFAULT_OUTPUT_DIR: &str = "transactions_by_users";

/// Default extension of input log files
pub const DEFAULT_EXTENSION: &str = "log";

/// Settings shared by all strategies
#[derive(Clone, Debug, PartialEq)]
pub struct RunConfig {
    /// Extension (without the dot) of files read as logs
    pub extension: String,
    /// Name of the ledger directory under the root
    pub output_dir_name: String,
    /// Write ledgers for users that only ever receive transfers
    pub include_recipients: bool,
    /// Maximum concurrent file operations (async strategy only)
    pub max_concurrent: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            output_dir_name: DEFAULT_OUTPUT_DIR.to_string(),
            include_recipients: false,
            max_concurrent: num_cpus::get(),
        }
    }
}

impl RunConfig {
    /// Set the concurrency limit, falling back to the default for zero
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        if max_concurrent == 0 {
            let default = Self::default().max_concurrent;
            warn!(
                "Invalid max_concurrent ({}), using default ({})",
                max_concurrent, default
            );
            self.max_concurrent = default;
        } else {
            self.max_concurrent = max_concurrent;
        }
        self
    }

    /// Ledger directory for a given root
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir_name)
    }
}

/// Outcome of a successful run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    /// Log files read
    pub files_read: usize,
    /// Lines seen across all files
    pub lines_read: usize,
    /// Lines turned into transactions
    pub transactions: usize,
    /// Lines that matched no recognized shape
    pub skipped_lines: usize,
    /// Directory the ledgers were written to
    pub output_dir: PathBuf,
    /// Written ledger files, sorted
    pub ledgers: Vec<PathBuf>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processing completed successfully: {} log files, {} transactions, {} lines skipped; {} ledgers written to {}",
            self.files_read,
            self.transactions,
            self.skipped_lines,
            self.ledgers.len(),
            self.output_dir.display()
        )
    }
}

/// Processing strategy trait for the complete reconciliation pipeline
pub trait ProcessingStrategy: Send + Sync {
    /// Reconcile every log under `root` into per-user ledgers
    ///
    /// # Arguments
    ///
    /// * `root` - Directory searched recursively for log files; ledgers are
    ///   written to its output subdirectory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `root` does not exist
    /// - A file cannot be read or a ledger cannot be written
    /// - A recognized line carries an invalid timestamp or amount
    ///
    /// Unrecognized lines are skipped and counted, never an error.
    fn process(&self, root: &Path) -> Result<RunSummary, LedgerError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - Sync or Async
/// * `config` - Run settings
/// * `clock` - Time source for the final balance lines
pub fn create_strategy(
    strategy_type: StrategyType,
    config: RunConfig,
    clock: Arc<dyn Clock>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(config, clock)),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(config, clock)),
    }
}
