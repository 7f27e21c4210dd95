//! Core business logic module
//!
//! This module contains the reconciliation components:
//! - `traits` - Clock abstraction for the final balance timestamp
//! - `reconstructor` - Per-user grouping, receive synthesis and ordering
//! - `balance` - Balance recurrence and ledger rendering

pub mod balance;
pub mod reconstructor;
pub mod traits;

pub use balance::{compute_and_format, compute_balance, LedgerReport};
pub use reconstructor::{Reconstructor, Timelines};
pub use traits::{Clock, FixedClock, SystemClock};
