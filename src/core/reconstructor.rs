//! Per-user timeline reconstruction
//!
//! Source logs record a transfer only under the sender. The reconstructor
//! groups transactions by actor, gives every recipient the matching receive
//! event, and sorts each user's history by time.
//!
//! # Ordering
//!
//! Buckets are built as: the user's own transactions in input order, then the
//! synthesized receives in the order their transfers were encountered. The
//! bucket is then stable-sorted by timestamp, so entries with equal timestamps
//! keep that construction order.

use crate::types::{Transaction, Username};
use std::collections::{BTreeMap, HashMap};

/// Ordered transaction history of every user that gets a ledger
pub type Timelines = BTreeMap<Username, Vec<Transaction>>;

/// Builds per-user timelines from a flat list of transactions
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconstructor {
    /// Also produce timelines for users that only ever receive transfers
    include_recipients: bool,
}

impl Reconstructor {
    /// Create a reconstructor
    ///
    /// With `include_recipients` unset, a user who never authored a log line
    /// gets no timeline even if others transferred money to them.
    pub fn new(include_recipients: bool) -> Self {
        Reconstructor { include_recipients }
    }

    /// Group, synthesize and sort
    pub fn reconstruct(&self, transactions: &[Transaction]) -> Timelines {
        let mut timelines: Timelines = BTreeMap::new();
        for tx in transactions {
            timelines
                .entry(tx.actor.clone())
                .or_default()
                .push(tx.clone());
        }

        // Receive events keyed by recipient, in transfer encounter order
        let mut received: HashMap<Username, Vec<Transaction>> = HashMap::new();
        for receive in transactions.iter().filter_map(Transaction::to_received) {
            if self.include_recipients {
                timelines.entry(receive.actor.clone()).or_default();
            }
            received
                .entry(receive.actor.clone())
                .or_default()
                .push(receive);
        }

        for (user, timeline) in timelines.iter_mut() {
            if let Some(incoming) = received.remove(user) {
                timeline.extend(incoming);
            }
            timeline.sort_by_key(|tx| tx.timestamp);
        }

        timelines
    }
}
