//! Benchmark suite for comparing processing strategies
//!
//! This benchmark compares the sync and async strategies using the divan
//! benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```
//!
//! # Corpora
//!
//! Corpora are generated into temporary directories on first use:
//! - small: 4 files x 100 lines
//! - medium: 16 files x 1,000 lines
//! - large: 64 files x 10,000 lines
//!
//! Each line is a balance inquiry, withdrawal or transfer among 50 users.

use rust_ledger_reconciler::cli::StrategyType;
use rust_ledger_reconciler::core::SystemClock;
use rust_ledger_reconciler::strategy::{create_strategy, RunConfig};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tempfile::TempDir;

const USERS: usize = 50;

fn main() {
    divan::main();
}

fn generate_corpus(files: usize, lines_per_file: usize) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    for file in 0..files {
        let mut text = String::new();
        for line in 0..lines_per_file {
            let n = file * lines_per_file + line;
            let user = n % USERS;
            let (minute, second) = ((n / 60) % 60, n % 60);
            let stamp = format!("2024-01-{:02} {:02}:{:02}:{:02}", 1 + file % 28, line % 24, minute, second);
            match n % 3 {
                0 => writeln!(text, "[{}] user_{} balance inquiry {}.{:02}", stamp, user, n % 1000, n % 100),
                1 => writeln!(text, "[{}] user_{} withdrew {}.5", stamp, user, n % 50),
                _ => writeln!(text, "[{}] user_{} transferred {} to user_{}", stamp, user, n % 70, (user + 7) % USERS),
            }
            .expect("Failed to format line");
        }
        fs::write(dir.path().join(format!("part_{:03}.log", file)), text)
            .expect("Failed to write corpus file");
    }

    dir
}

fn small() -> &'static Path {
    static CORPUS: OnceLock<TempDir> = OnceLock::new();
    CORPUS.get_or_init(|| generate_corpus(4, 100)).path()
}

fn medium() -> &'static Path {
    static CORPUS: OnceLock<TempDir> = OnceLock::new();
    CORPUS.get_or_init(|| generate_corpus(16, 1_000)).path()
}

fn large() -> &'static Path {
    static CORPUS: OnceLock<TempDir> = OnceLock::new();
    CORPUS.get_or_init(|| generate_corpus(64, 10_000)).path()
}

fn run(strategy_type: StrategyType, root: &Path) {
    let strategy = create_strategy(strategy_type, RunConfig::default(), Arc::new(SystemClock));
    strategy.process(root).expect("Processing failed");
}

#[divan::bench]
fn sync_strategy_small() {
    run(StrategyType::Sync, small());
}

#[divan::bench]
fn async_strategy_small() {
    run(StrategyType::Async, small());
}

#[divan::bench]
fn sync_strategy_medium() {
    run(StrategyType::Sync, medium());
}

#[divan::bench]
fn async_strategy_medium() {
    run(StrategyType::Async, medium());
}

#[divan::bench]
fn sync_strategy_large() {
    run(StrategyType::Sync, large());
}

#[divan::bench]
fn async_strategy_large() {
    run(StrategyType::Async, large());
}
