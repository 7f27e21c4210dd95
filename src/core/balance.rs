//! Balance calculation and ledger rendering
//!
//! Given one user's ordered timeline, computes the running balance and
//! renders every entry plus the closing `final balance` line.
//!
//! # Balance Rules
//!
//! Starting from zero, in timeline order:
//!
//! - `Transferred` and `Withdrew` subtract the amount
//! - `Received` adds the amount
//! - `Balance` adds the amount when it is the first entry of the timeline and
//!   otherwise replaces the running balance with the reported amount

use crate::io::log_format::{format_final_balance, format_transaction};
use crate::types::{LedgerError, Transaction, TransactionKind, Username};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Rendered ledger of one user
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerReport {
    /// The ledger owner
    pub user: Username,

    /// One line per timeline entry followed by the final balance line
    pub lines: Vec<String>,

    /// Balance after the last entry
    pub final_balance: Decimal,
}

impl LedgerReport {
    /// Number of transaction entries, not counting the trailer
    pub fn entries(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    /// File contents, every line newline-terminated
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}

/// Compute the final balance of `user`'s ordered timeline
///
/// Fails with `BalanceOverflow` if the running balance leaves the range of
/// `Decimal`.
pub fn compute_balance(user: &str, timeline: &[Transaction]) -> Result<Decimal, LedgerError> {
    timeline
        .iter()
        .enumerate()
        .try_fold(Decimal::ZERO, |balance, (index, tx)| {
            let next = match tx.kind {
                TransactionKind::Transferred { .. } | TransactionKind::Withdrew => {
                    balance.checked_sub(tx.amount)
                }
                TransactionKind::Received { .. } => balance.checked_add(tx.amount),
                TransactionKind::Balance if index == 0 => balance.checked_add(tx.amount),
                TransactionKind::Balance => Some(tx.amount),
            };
            next.ok_or_else(|| LedgerError::balance_overflow(user))
        })
}

/// Compute the balance and render the ledger of `user`
///
/// `now` stamps the trailer line.
pub fn compute_and_format(
    user: &str,
    timeline: &[Transaction],
    now: NaiveDateTime,
) -> Result<LedgerReport, LedgerError> {
    let final_balance = compute_balance(user, timeline)?;

    let mut lines: Vec<String> = timeline.iter().map(format_transaction).collect();
    lines.push(format_final_balance(user, final_balance, now));

    Ok(LedgerReport {
        user: user.to_string(),
        lines,
        final_balance,
    })
}
