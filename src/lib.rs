//! Rust Ledger Reconciler Library
//! # Overview
//!
//! This library rebuilds per-user ledgers from line-oriented banking
//! transaction logs. Transfers are logged only by the sender; the library
//! gives each recipient the matching receive entry, orders every user's
//! history by time and closes it with a computed final balance.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Transaction, TransactionKind, LedgerError)
//! - [`cli`] - CLI arguments parsing and root directory prompt
//! - [`core`] - Business logic components:
//!   - [`core::reconstructor`] - Grouping, receive synthesis and ordering
//!   - [`core::balance`] - Balance recurrence and ledger rendering
//! - [`io`] - Log line format, file discovery, reading and ledger output
//! - [`strategy`] - Sync and async end-to-end pipelines
//!
//! # Log Lines
//!
//! ```text
//! [2024-01-01 10:00:00] alice balance inquiry 100
//! [2024-01-01 10:05:00] alice transferred 50.00 to bob
//! [2024-01-01 10:10:00] alice withdrew 20
//! ```
//!
//! Any other line is skipped. A generated ledger additionally contains
//! `received ... from ...` entries and a `final balance` trailer.
//!
//! # Balance Rules
//!
//! - **Transferred** and **Withdrew** subtract the amount
//! - **Received** adds the amount
//! - **Balance** inquiry adds the amount if it is the user's first entry and
//!   resets the balance to the amount otherwise

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{compute_and_format, LedgerReport, Reconstructor};
pub use io::parse_line;
pub use types::{LedgerError, Transaction, TransactionKind, Username};
