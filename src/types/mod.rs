//! Types module
//!
//! Contains core data structures used throughout the application.
//! - `transaction`: Transaction records and operation kinds
//! - `error`: Error types for the reconciler

pub mod error;
pub mod transaction;

pub use error::LedgerError;
pub use transaction::{Transaction, TransactionKind, Username};
