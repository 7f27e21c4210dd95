//! End-to-end integration tests
//!
//! These tests validate the complete reconciliation pipeline using predefined
//! fixture trees. Each test:
//! 1. Copies tests/fixtures/{name}/logs into a temporary root
//! 2. Runs a processing strategy over that root with a frozen clock
//! 3. Compares every generated ledger with tests/fixtures/{name}/expected
//!
//! Each fixture is run with both the sync and the async strategy.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_ledger_reconciler::cli::StrategyType;
    use rust_ledger_reconciler::core::{Clock, FixedClock};
    use rust_ledger_reconciler::strategy::{create_strategy, RunConfig, RunSummary};
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn frozen_clock() -> Arc<dyn Clock> {
        let now = NaiveDate::from_ymd_opt(2030, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Arc::new(FixedClock(now))
    }

    fn copy_tree(from: &Path, to: &Path) {
        fs::create_dir_all(to).unwrap();
        for entry in fs::read_dir(from).unwrap() {
            let entry = entry.unwrap();
            let target = to.join(entry.file_name());
            if entry.file_type().unwrap().is_dir() {
                copy_tree(&entry.path(), &target);
            } else {
                fs::copy(entry.path(), &target).unwrap();
            }
        }
    }

    /// File name to contents for every file directly inside `dir`
    fn read_dir_contents(dir: &Path) -> BTreeMap<String, String> {
        fs::read_dir(dir)
            .unwrap_or_else(|e| panic!("Failed to list {}: {}", dir.display(), e))
            .map(|entry| {
                let entry = entry.unwrap();
                let name = entry.file_name().to_string_lossy().into_owned();
                (name, fs::read_to_string(entry.path()).unwrap())
            })
            .collect()
    }

    fn run_fixture(
        fixture_name: &str,
        strategy_type: StrategyType,
        config: RunConfig,
    ) -> (TempDir, RunSummary) {
        let fixture_dir = Path::new("tests/fixtures").join(fixture_name);
        let root = TempDir::new().expect("Failed to create temp dir");
        copy_tree(&fixture_dir.join("logs"), root.path());

        let strategy = create_strategy(strategy_type, config, frozen_clock());
        let summary = strategy
            .process(root.path())
            .unwrap_or_else(|e| panic!("Failed to process {}: {}", fixture_name, e));

        (root, summary)
    }

    /// Run a fixture and compare the ledger directory with the expected one
    fn check_fixture(fixture_name: &str, strategy_type: StrategyType) {
        let expected_dir = Path::new("tests/fixtures")
            .join(fixture_name)
            .join("expected");
        assert!(
            expected_dir.is_dir(),
            "Expected dir not found: {}",
            expected_dir.display()
        );

        let (root, summary) = run_fixture(fixture_name, strategy_type.clone(), RunConfig::default());

        let actual = read_dir_contents(&summary.output_dir);
        let expected = read_dir_contents(&expected_dir);

        assert_eq!(
            actual, expected,
            "\n\nLedger mismatch for fixture: {} (strategy: {:?})\n",
            fixture_name, strategy_type
        );
        assert_eq!(summary.output_dir, root.path().join("transactions_by_users"));
    }

    #[rstest]
    #[case("transfer_symmetry")]
    #[case("balance_rules")]
    #[case("malformed_lines")]
    #[case("recipient_only")]
    #[case("equal_timestamps")]
    fn test_fixtures(
        #[case] fixture: &str,
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        check_fixture(fixture, strategy);
    }

    #[rstest]
    fn test_recipient_ledgers_on_request(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let config = RunConfig {
            include_recipients: true,
            ..RunConfig::default()
        };

        let (_root, summary) = run_fixture("recipient_only", strategy, config);

        let ledgers = read_dir_contents(&summary.output_dir);
        assert_eq!(
            ledgers.keys().collect::<Vec<_>>(),
            vec!["grace.log", "heidi.log"]
        );
        assert_eq!(
            ledgers["heidi.log"],
            "[2024-01-04 11:00:00] heidi received 4.00 from grace\n\
             [2030-01-01 00:00:00] heidi final balance 4.00\n"
        );
    }

    #[rstest]
    fn test_summary_counts_skipped_lines(
        #[values(StrategyType::Sync, StrategyType::Async)] strategy: StrategyType,
    ) {
        let (_root, summary) = run_fixture("malformed_lines", strategy, RunConfig::default());

        assert_eq!(summary.files_read, 1);
        assert_eq!(summary.lines_read, 6);
        assert_eq!(summary.transactions, 2);
        assert_eq!(summary.skipped_lines, 4);
    }

    #[rstest]
    #[case("transfer_symmetry")]
    #[case("balance_rules")]
    #[case("equal_timestamps")]
    fn test_every_amount_has_two_decimals(#[case] fixture: &str) {
        let (_root, summary) = run_fixture(fixture, StrategyType::Sync, RunConfig::default());

        for (name, text) in read_dir_contents(&summary.output_dir) {
            for line in text.lines() {
                let amount = line
                    .split(' ')
                    .map(|token| token.trim_start_matches('-'))
                    .find(|token| token.contains('.') && token.chars().next().is_some_and(|c| c.is_ascii_digit()))
                    .unwrap_or_else(|| panic!("No amount in {}: {}", name, line));
                let (whole, fraction) = amount.split_once('.').unwrap();
                assert!(whole.chars().all(|c| c.is_ascii_digit()), "{}", line);
                assert_eq!(fraction.len(), 2, "{}", line);
                assert!(fraction.chars().all(|c| c.is_ascii_digit()), "{}", line);
            }
        }
    }

    #[test]
    fn test_invalid_timestamp_aborts_run() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join("bad.log"),
            "[2024-01-01 10:00:00] alice withdrew 1\n[2024-01-32 10:00:00] alice withdrew 2\n",
        )
        .unwrap();

        let strategy = create_strategy(StrategyType::Sync, RunConfig::default(), frozen_clock());
        let error = strategy.process(root.path()).unwrap_err();

        assert!(error.to_string().contains("at line 2"));
        assert!(!root.path().join("transactions_by_users").exists());
    }
}
