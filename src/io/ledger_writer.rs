//! Per-user ledger output
//!
//! Each ledger is written as a whole to a hidden temporary file next to its
//! destination and then renamed over `<user>.log`, so a concurrent reader sees
//! either the previous file or the complete new one.

use crate::core::LedgerReport;
use crate::types::LedgerError;
use std::fs;
use std::path::{Path, PathBuf};

/// File name extension of generated ledgers
pub const LEDGER_EXTENSION: &str = "log";

/// Destination of `user`'s ledger inside `output_dir`
pub fn ledger_path(output_dir: &Path, user: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", user, LEDGER_EXTENSION))
}

/// Temporary sibling used while `user`'s ledger is being written
pub fn staging_path(output_dir: &Path, user: &str) -> PathBuf {
    output_dir.join(format!(".{}.{}.tmp", user, LEDGER_EXTENSION))
}

/// Create the output directory and any missing parents
pub fn prepare_output_dir(output_dir: &Path) -> Result<(), LedgerError> {
    fs::create_dir_all(output_dir).map_err(|e| LedgerError::io(output_dir, e))
}

/// Write one ledger atomically
///
/// # Returns
///
/// The path of the written ledger
pub fn write_ledger(output_dir: &Path, report: &LedgerReport) -> Result<PathBuf, LedgerError> {
    let staging = staging_path(output_dir, &report.user);
    let target = ledger_path(output_dir, &report.user);

    fs::write(&staging, report.to_text()).map_err(|e| LedgerError::io(&staging, e))?;
    fs::rename(&staging, &target).map_err(|e| LedgerError::io(&target, e))?;

    Ok(target)
}

/// Async counterpart of [`write_ledger`] on tokio's file system API
pub async fn write_ledger_async(
    output_dir: &Path,
    report: &LedgerReport,
) -> Result<PathBuf, LedgerError> {
    let staging = staging_path(output_dir, &report.user);
    let target = ledger_path(output_dir, &report.user);

    tokio::fs::write(&staging, report.to_text())
        .await
        .map_err(|e| LedgerError::io(&staging, e))?;
    tokio::fs::rename(&staging, &target)
        .await
        .map_err(|e| LedgerError::io(&target, e))?;

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tempfile::TempDir;

    fn report(user: &str, lines: &[&str]) -> LedgerReport {
        LedgerReport {
            user: user.to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            final_balance: dec!(0),
        }
    }

    #[test]
    fn test_prepare_creates_nested_dirs() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("a/b/transactions_by_users");

        prepare_output_dir(&output).unwrap();

        assert!(output.is_dir());
    }

    #[test]
    fn test_prepare_fails_when_path_is_a_file() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("taken");
        fs::write(&output, "").unwrap();

        let result = prepare_output_dir(&output);

        assert!(matches!(result, Err(LedgerError::Io { .. })));
    }

    #[test]
    fn test_write_ledger_writes_text_and_leaves_no_staging_file() {
        let dir = TempDir::new().unwrap();
        let ledger = report("bob", &["line one", "line two"]);

        let path = write_ledger(dir.path(), &ledger).unwrap();

        assert_eq!(path, dir.path().join("bob.log"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "line one\nline two\n");
        assert!(!staging_path(dir.path(), "bob").exists());
    }

    #[test]
    fn test_write_ledger_replaces_previous_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("bob.log"), "stale\n").unwrap();

        write_ledger(dir.path(), &report("bob", &["fresh"])).unwrap();

        assert_eq!(
            fs::read_to_string(dir.path().join("bob.log")).unwrap(),
            "fresh\n"
        );
    }

    #[tokio::test]
    async fn test_write_ledger_async_matches_sync_output() {
        let sync_dir = TempDir::new().unwrap();
        let async_dir = TempDir::new().unwrap();
        let ledger = report("alice", &["a", "b", "c"]);

        write_ledger(sync_dir.path(), &ledger).unwrap();
        let path = write_ledger_async(async_dir.path(), &ledger).await.unwrap();

        assert_eq!(path, async_dir.path().join("alice.log"));
        assert_eq!(
            fs::read_to_string(path).unwrap(),
            fs::read_to_string(sync_dir.path().join("alice.log")).unwrap()
        );
        assert!(!staging_path(async_dir.path(), "alice").exists());
    }

    #[test]
    fn test_write_ledger_into_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let result = write_ledger(&missing, &report("bob", &["x"]));

        assert!(matches!(result, Err(LedgerError::Io { .. })));
    }
}
