//! Synchronous processing strategy
//!
//! Single-threaded implementation of the ProcessingStrategy trait. It
//! orchestrates the pipeline, delegating:
//! - file search to `discovery::discover_log_files`
//! - line parsing to `log_reader` (and through it `log_format`)
//! - timeline building to `Reconstructor`
//! - balance and rendering to `core::balance`
//! - output to `ledger_writer`

use crate::core::{compute_and_format, Clock, Reconstructor};
use crate::io::discovery::discover_log_files;
use crate::io::ledger_writer::{prepare_output_dir, write_ledger};
use crate::io::log_format::format_amount;
use crate::io::log_reader::read_log_files;
use crate::strategy::{ProcessingStrategy, RunConfig, RunSummary};
use crate::types::LedgerError;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use rust_ledger_reconciler::core::SystemClock;
/// use rust_ledger_reconciler::strategy::{ProcessingStrategy, RunConfig, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::sync::Arc;
///
/// let strategy = SyncProcessingStrategy::new(RunConfig::default(), Arc::new(SystemClock));
/// let summary = strategy.process(Path::new("logs")).expect("Processing failed");
/// println!("{}", summary);
/// ```
#[derive(Clone)]
pub struct SyncProcessingStrategy {
    config: RunConfig,
    clock: Arc<dyn Clock>,
}

impl SyncProcessingStrategy {
    /// Create a new SyncProcessingStrategy
    pub fn new(config: RunConfig, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Run the pipeline one step after the other
    ///
    /// 1. Finds log files under `root`, skipping the output directory
    /// 2. Parses all of them, in sorted path order
    /// 3. Rebuilds every user's timeline
    /// 4. Computes and writes each ledger
    fn process(&self, root: &Path) -> Result<RunSummary, LedgerError> {
        let output_dir = self.config.output_dir(root);

        let files = discover_log_files(root, &self.config.extension, Some(&output_dir))?;
        info!(root = %root.display(), files = files.len(), "Discovered log files");

        let parsed = read_log_files(&files)?;

        let timelines =
            Reconstructor::new(self.config.include_recipients).reconstruct(&parsed.transactions);
        info!(users = timelines.len(), "Reconstructed user timelines");

        // Every balance is computed before the output directory is touched
        let now = self.clock.now();
        let reports = timelines
            .iter()
            .map(|(user, timeline)| compute_and_format(user, timeline, now))
            .collect::<Result<Vec<_>, _>>()?;

        prepare_output_dir(&output_dir)?;

        let mut ledgers = Vec::with_capacity(reports.len());
        for report in &reports {
            let path = write_ledger(&output_dir, report)?;
            debug!(
                user = %report.user,
                entries = report.entries(),
                final_balance = %format_amount(report.final_balance),
                "Wrote ledger"
            );
            ledgers.push(path);
        }

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
