//! Error types for the ledger reconciler
//!
//! Every error in this module is fatal for the run: the reconciler is a
//! one-shot batch tool and never downgrades a failure to a partial result.
//! Lines that simply do not look like a transaction are not errors at all and
//! never reach this type.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: missing root, unreadable input, unwritable output
//! - **Line Errors**: a recognized line with a bad timestamp or amount
//! - **Balance Errors**: a running balance outside the decimal range
//! - **Runtime Errors**: async runtime construction or task failures

use std::path::Path;
use thiserror::Error;

/// Main error type for the ledger reconciler
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// The configured root directory does not exist or is not a directory
    #[error("Log directory not found: {path}")]
    RootNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error while walking, reading or writing files
    #[error("I/O error{}: {message}", if path.is_empty() { String::new() } else { format!(" on '{}'", path) })]
    Io {
        /// Path involved in the failed operation (empty if unknown)
        path: String,
        /// Description of the I/O error
        message: String,
    },

    /// Timestamp of a recognized line is not `yyyy-MM-dd HH:mm:ss`
    #[error("Invalid timestamp '{value}': {message}")]
    InvalidTimestamp {
        /// The bracketed timestamp text
        value: String,
        /// Why parsing failed
        message: String,
    },

    /// Amount of a recognized line cannot be represented as a decimal
    #[error("Invalid amount '{value}'")]
    InvalidAmount {
        /// The amount text
        value: String,
    },

    /// A line error with its location in the input tree
    #[error("Parse error in '{path}' at line {line}: {message}")]
    ParseError {
        /// File containing the line
        path: String,
        /// 1-based line number
        line: usize,
        /// Description of the underlying line error
        message: String,
    },

    /// A user's running balance does not fit in a decimal
    #[error("Balance overflow in ledger of '{user}'")]
    BalanceOverflow {
        /// The ledger owner
        user: String,
    },

    /// The async runtime could not be built or a worker task failed
    #[error("Runtime error: {message}")]
    Runtime {
        /// Description of the failure
        message: String,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::Io {
            path: String::new(),
            message: error.to_string(),
        }
    }
}

impl LedgerError {
    /// Create an Io error for a specific path
    pub fn io(path: &Path, error: std::io::Error) -> Self {
        LedgerError::Io {
            path: path.display().to_string(),
            message: error.to_string(),
        }
    }

    /// Create a RootNotFound error
    pub fn root_not_found(path: &Path) -> Self {
        LedgerError::RootNotFound {
            path: path.display().to_string(),
        }
    }

    /// Attach a file location to a line error
    pub fn at_line(path: &Path, line: usize, error: LedgerError) -> Self {
        LedgerError::ParseError {
            path: path.display().to_string(),
            line,
            message: error.to_string(),
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(user: &str) -> Self {
        LedgerError::BalanceOverflow {
            user: user.to_string(),
        }
    }

    /// Create a Runtime error
    pub fn runtime(message: impl Into<String>) -> Self {
        LedgerError::Runtime {
            message: message.into(),
        }
    }
}
