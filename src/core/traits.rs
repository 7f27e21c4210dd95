//! Core traits
//!
//! The final balance line of every ledger is stamped with the current time.
//! Reading that time through a trait lets runs be reproduced in tests.

use chrono::{Local, NaiveDateTime};

/// Source of the current local date-time
pub trait Clock: Send + Sync {
    /// The current time, second precision is all that is rendered
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
