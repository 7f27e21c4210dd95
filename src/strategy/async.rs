//! Asynchronous processing strategy
//!
//! Multi-threaded implementation of the ProcessingStrategy trait built on a
//! tokio runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── discovery          (sync directory walk)
//!     ├── concurrent reads   (ordered: results keep discovery order)
//!     ├── Reconstructor      (pure, runs once all files are parsed)
//!     ├── balances           (all computed before any output exists)
//!     └── per-user tasks     (atomic write, unordered)
//! ```
//!
//! Reconstruction needs every transaction, so it completes before any ledger
//! task starts. Each ledger task owns one user's report exclusively, so no
//! state is shared between tasks.

use crate::core::{compute_and_format, Clock, Reconstructor};
use crate::io::discovery::discover_log_files;
use crate::io::ledger_writer::write_ledger_async;
use crate::io::log_format::format_amount;
use crate::io::log_reader::{parse_log_text, ParsedLog};
use crate::strategy::{ProcessingStrategy, RunConfig, RunSummary};
use crate::types::LedgerError;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Asynchronous processing strategy
///
/// At most `RunConfig::max_concurrent` file reads or ledger writes are in
/// flight at once, and the runtime uses as many worker threads.
#[derive(Clone)]
pub struct AsyncProcessingStrategy {
    config: RunConfig,
    clock: Arc<dyn Clock>,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy
    pub fn new(config: RunConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    async fn run(&self, root: &Path) -> Result<RunSummary, LedgerError> {
        let output_dir = self.config.output_dir(root);
        let limit = self.config.max_concurrent.max(1);

        let files = discover_log_files(root, &self.config.extension, Some(&output_dir))?;
        info!(root = %root.display(), files = files.len(), "Discovered log files");

        // `buffered` keeps results in discovery order so ties sort the same
        // way as in the sync strategy
        let per_file: Vec<ParsedLog> = stream::iter(files.iter().cloned())
            .map(|path| async move {
                let text = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|e| LedgerError::io(&path, e))?;
                parse_log_text(&path, &text)
            })
            .buffered(limit)
            .try_collect()
            .await?;

        let mut parsed = ParsedLog::default();
        for file in per_file {
            parsed.merge(file);
        }

        let timelines =
            Reconstructor::new(self.config.include_recipients).reconstruct(&parsed.transactions);
        info!(users = timelines.len(), "Reconstructed user timelines");

        // Every balance is computed before the output directory is touched
        let now = self.clock.now();
        let reports = timelines
            .iter()
            .map(|(user, timeline)| compute_and_format(user, timeline, now))
            .collect::<Result<Vec<_>, _>>()?;

        tokio::fs::create_dir_all(&output_dir)
            .await
            .map_err(|e| LedgerError::io(&output_dir, e))?;

        let mut ledgers: Vec<PathBuf> = stream::iter(reports)
            .map(|report| {
                let output_dir = output_dir.clone();
                tokio::spawn(async move {
                    let path = write_ledger_async(&output_dir, &report).await?;
                    debug!(
                        user = %report.user,
                        entries = report.entries(),
                        final_balance = %format_amount(report.final_balance),
                        "Wrote ledger"
                    );
                    Ok::<PathBuf, LedgerError>(path)
                })
            })
            .buffer_unordered(limit)
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => Err(LedgerError::runtime(format!("Ledger task failed: {}", e))),
            })
            .try_collect()
            .await?;
        ledgers.sort();

        Ok(RunSummary {
            files_read: files.len(),
            lines_read: parsed.lines,
            transactions: parsed.transactions.len(),
            skipped_lines: parsed.skipped,
            output_dir,
            ledgers,
        })
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Run the pipeline on a dedicated multi-threaded runtime
    fn process(&self, root: &Path) -> Result<RunSummary, LedgerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent.max(1))
            .build()
            .map_err(|e| LedgerError::runtime(format!("Failed to create tokio runtime: {}", e)))?;

        runtime.block_on(self.run(root))
    }
}
