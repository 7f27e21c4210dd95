//! Transaction-related types for the ledger reconciler
//!
//! This module defines the structured form of one log entry and the closed set
//! of operation kinds a log line can describe.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Username as written in the logs
///
/// Case-sensitive and used verbatim as the grouping key.
pub type Username = String;

/// Operation kinds recognized in the transaction logs
///
/// The counterparty is carried by the variants that have one, so a
/// `Transferred` without a recipient or a `Withdrew` with one cannot be built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionKind {
    /// Balance inquiry reporting the account balance at that moment
    ///
    /// Additive when it opens a timeline, absolute afterwards.
    Balance,

    /// Outgoing transfer recorded under the sender
    Transferred {
        /// The recipient
        to: Username,
    },

    /// Cash withdrawal
    Withdrew,

    /// Incoming transfer, synthesized from the sender's `Transferred` entry
    ///
    /// Never parsed from raw text.
    Received {
        /// The original sender
        from: Username,
    },
}

/// One structured log entry
///
/// Built once by the parser or by receive synthesis and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// When the operation happened (second precision)
    pub timestamp: NaiveDateTime,

    /// The username the entry is recorded under
    pub actor: Username,

    /// What happened
    pub kind: TransactionKind,

    /// Non-negative amount as written in the log
    pub amount: Decimal,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        timestamp: NaiveDateTime,
        actor: impl Into<Username>,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Self {
        Transaction {
            timestamp,
            actor: actor.into(),
            kind,
            amount,
        }
    }

    /// The other party of a transfer, if any
    ///
    /// Recipient for `Transferred`, sender for `Received`, `None` otherwise.
    pub fn counterparty(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Transferred { to } => Some(to),
            TransactionKind::Received { from } => Some(from),
            TransactionKind::Balance | TransactionKind::Withdrew => None,
        }
    }

    /// Build the receive event implied by this transfer for its recipient
    ///
    /// Returns `None` for anything other than `Transferred`, which keeps
    /// synthesis one-directional: a synthesized `Received` never yields
    /// another event.
    pub fn to_received(&self) -> Option<Transaction> {
        match &self.kind {
            TransactionKind::Transferred { to } => Some(Transaction {
                timestamp: self.timestamp,
                actor: to.clone(),
                kind: TransactionKind::Received {
                    from: self.actor.clone(),
                },
                amount: self.amount,
            }),
            _ => None,
        }
    }
}
