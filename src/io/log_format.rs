//! Log line format handling
//!
//! This module centralizes the text format of transaction logs, providing:
//! - `parse_line` for turning one raw line into a `Transaction`
//! - Formatting of transactions, amounts and the final balance trailer
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Grammar
//!
//! ```text
//! "[" TIMESTAMP "] " USER " balance inquiry " AMOUNT
//! "[" TIMESTAMP "] " USER " transferred " AMOUNT " to " USER
//! "[" TIMESTAMP "] " USER " withdrew " AMOUNT
//! ```
//!
//! TIMESTAMP is `yyyy-MM-dd HH:mm:ss`, AMOUNT is `\d+(\.\d+)?` and USER is a
//! run of ASCII letters, digits and underscores.

use crate::types::{LedgerError, Transaction, TransactionKind};
use chrono::{NaiveDateTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// chrono pattern equivalent to `yyyy-MM-dd HH:mm:ss`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TIMESTAMP_LEN: usize = "yyyy-MM-dd HH:mm:ss".len();

/// Parse one raw log line
///
/// # Returns
///
/// * `Ok(Some(Transaction))` - the line has one of the three recognized shapes
/// * `Ok(None)` - the line has none of them and should be skipped
/// * `Err(LedgerError)` - the shape matched but the timestamp or amount is
///   unusable, which is fatal for the run
///
/// The whole line must have one shape: text before the opening bracket or
/// after the amount (or recipient) makes it unrecognized, so
/// `[..] alice withdrew 10 cash` is skipped. Trailing whitespace is ignored.
///
/// `received` lines are never recognized: receive events only come from
/// synthesis, so feeding a generated ledger back in cannot double count.
pub fn parse_line(line: &str) -> Result<Option<Transaction>, LedgerError> {
    let Some((stamp, body)) = split_header(line.trim_end()) else {
        return Ok(None);
    };
    let Some((actor, operation)) = body.split_once(' ') else {
        return Ok(None);
    };
    if !is_word(actor) {
        return Ok(None);
    }
    let Some((kind, amount)) = match_operation(operation) else {
        return Ok(None);
    };

    let timestamp = parse_timestamp(stamp)?;
    let amount = parse_amount(amount)?;

    Ok(Some(Transaction::new(timestamp, actor, kind, amount)))
}

fn split_header(line: &str) -> Option<(&str, &str)> {
    line.strip_prefix('[')?.split_once("] ")
}

fn match_operation(operation: &str) -> Option<(TransactionKind, &str)> {
    if let Some(amount) = operation.strip_prefix("balance inquiry ") {
        return is_amount(amount).then_some((TransactionKind::Balance, amount));
    }
    if let Some(amount) = operation.strip_prefix("withdrew ") {
        return is_amount(amount).then_some((TransactionKind::Withdrew, amount));
    }

    let (amount, to) = operation.strip_prefix("transferred ")?.split_once(" to ")?;
    if is_amount(amount) && is_word(to) {
        Some((TransactionKind::Transferred { to: to.to_string() }, amount))
    } else {
        None
    }
}

fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

fn is_amount(token: &str) -> bool {
    match token.split_once('.') {
        Some((whole, fraction)) => is_digits(whole) && is_digits(fraction),
        None => is_digits(token),
    }
}

/// Parse a `yyyy-MM-dd HH:mm:ss` timestamp
///
/// Leap seconds are rejected.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, LedgerError> {
    if value.len() != TIMESTAMP_LEN {
        return Err(LedgerError::InvalidTimestamp {
            value: value.to_string(),
            message: "expected yyyy-MM-dd HH:mm:ss".to_string(),
        });
    }

    let timestamp = NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|e| {
        LedgerError::InvalidTimestamp {
            value: value.to_string(),
            message: e.to_string(),
        }
    })?;

    // chrono reads second 60 as a leap second
    if timestamp.nanosecond() >= 1_000_000_000 {
        return Err(LedgerError::InvalidTimestamp {
            value: value.to_string(),
            message: "seconds must be between 00 and 59".to_string(),
        });
    }

    Ok(timestamp)
}

fn parse_amount(value: &str) -> Result<Decimal, LedgerError> {
    Decimal::from_str(value).map_err(|_| LedgerError::InvalidAmount {
        value: value.to_string(),
    })
}

/// Format a timestamp with the log pattern
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Format an amount with exactly two fractional digits
///
/// Rounds half away from zero. A value that rounds to zero is printed without
/// a sign.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() {
        Decimal::ZERO
    } else {
        rounded
    };
    format!("{:.2}", rounded)
}

/// Render a transaction back to its canonical log line
///
/// `Received` is rendered as `<user> received <amount> from <sender>`. That
/// shape is output only; `parse_line` does not accept it.
pub fn format_transaction(tx: &Transaction) -> String {
    let stamp = format_timestamp(tx.timestamp);
    let amount = format_amount(tx.amount);

    match &tx.kind {
        TransactionKind::Balance => {
            format!("[{}] {} balance inquiry {}", stamp, tx.actor, amount)
        }
        TransactionKind::Transferred { to } => {
            format!("[{}] {} transferred {} to {}", stamp, tx.actor, amount, to)
        }
        TransactionKind::Withdrew => format!("[{}] {} withdrew {}", stamp, tx.actor, amount),
        TransactionKind::Received { from } => {
            format!("[{}] {} received {} from {}", stamp, tx.actor, amount, from)
        }
    }
}

/// Render the trailer line closing a user's ledger
pub fn format_final_balance(user: &str, balance: Decimal, now: NaiveDateTime) -> String {
    format!(
        "[{}] {} final balance {}",
        format_timestamp(now),
        user,
        format_amount(balance)
    )
}
