//! Ledger reconciler CLI
//!
//! Reads every transaction log under a root directory and writes one
//! reconciled ledger per user to `<root>/transactions_by_users/`.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- logs
//! cargo run -- --interactive
//! cargo run -- --strategy async --max-concurrent 8 logs
//! cargo run -- --include-recipients --log-level debug logs
//! ```
//!
//! Diagnostics go to stderr; the completion summary goes to stdout.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing root, unreadable log, invalid timestamp, unwritable ledger, etc.)

use rust_ledger_reconciler::cli;
use rust_ledger_reconciler::core::SystemClock;
use rust_ledger_reconciler::strategy;
use std::io::{self, stderr};
use std::process;
use std::sync::Arc;
use tracing::error;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

fn main() {
    let args = cli::parse_args();

    setup_logging(args.log_level.into());

    let root = match args.resolve_root(&mut io::stdin().lock(), &mut io::stdout()) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("Error: failed to read log directory: {}", e);
            process::exit(1);
        }
    };

    let strategy =
        strategy::create_strategy(args.strategy.clone(), args.to_run_config(), Arc::new(SystemClock));

    match strategy.process(&root) {
        Ok(summary) => println!("{}", summary),
        Err(e) => {
            error!(root = %root.display(), "Reconciliation failed");
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn setup_logging(level: LevelFilter) {
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}
