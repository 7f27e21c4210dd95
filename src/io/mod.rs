//! I/O module
//!
//! Handles the log text format, reading input trees and writing ledgers.
//!
//! # Components
//!
//! - `log_format` - Line parsing and formatting (pure, no I/O)
//! - `discovery` - Recursive search for log files under the root directory
//! - `log_reader` - Reads log files into transactions
//! - `ledger_writer` - Atomic per-user ledger output

pub mod discovery;
pub mod ledger_writer;
pub mod log_format;
pub mod log_reader;

pub use discovery::discover_log_files;
pub use ledger_writer::{ledger_path, prepare_output_dir, write_ledger, write_ledger_async};
pub use log_format::{format_amount, format_transaction, parse_line, TIMESTAMP_FORMAT};
pub use log_reader::{parse_log_text, read_log_file, read_log_files, ParsedLog};
