//! Transaction log reader
//!
//! Turns the text of one log file into transactions, line by line, delegating
//! line format concerns to the `log_format` module.
//!
//! # Error Handling
//!
//! - Lines with no recognized shape are counted and skipped
//! - A recognized line with a bad timestamp or amount aborts the whole file,
//!   and the error carries the file path and 1-based line number
//! - Unreadable files (missing, permission denied, not UTF-8) are `Io` errors

use crate::io::log_format::parse_line;
use crate::types::{LedgerError, Transaction};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Transactions parsed from one log file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedLog {
    /// Recognized transactions in line order
    pub transactions: Vec<Transaction>,

    /// Total number of lines seen
    pub lines: usize,

    /// Lines that matched no recognized shape
    pub skipped: usize,
}

impl ParsedLog {
    /// Append another file's results after this one's
    pub fn merge(&mut self, other: ParsedLog) {
        self.transactions.extend(other.transactions);
        self.lines += other.lines;
        self.skipped += other.skipped;
    }
}

/// Parse the full text of a log file
///
/// `path` is only used to locate errors.
pub fn parse_log_text(path: &Path, text: &str) -> Result<ParsedLog, LedgerError> {
    let mut parsed = ParsedLog::default();

    for (index, line) in text.lines().enumerate() {
        parsed.lines += 1;
        match parse_line(line).map_err(|e| LedgerError::at_line(path, index + 1, e))? {
            Some(transaction) => parsed.transactions.push(transaction),
            None => {
                trace!(path = %path.display(), line = index + 1, "Skipping unrecognized line");
                parsed.skipped += 1;
            }
        }
    }

    debug!(
        path = %path.display(),
        parsed = parsed.transactions.len(),
        skipped = parsed.skipped,
        "Read log file"
    );

    Ok(parsed)
}

/// Read and parse one log file from disk
pub fn read_log_file(path: &Path) -> Result<ParsedLog, LedgerError> {
    let text = fs::read_to_string(path).map_err(|e| LedgerError::io(path, e))?;
    parse_log_text(path, &text)
}

/// Read and parse several log files, concatenating results in the given order
pub fn read_log_files(paths: &[PathBuf]) -> Result<ParsedLog, LedgerError> {
    let mut all = ParsedLog::default();
    for path in paths {
        all.merge(read_log_file(path)?);
    }
    Ok(all)
}
