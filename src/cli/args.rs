use crate::strategy::{RunConfig, DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

/// Root directory used when none is given
pub const DEFAULT_ROOT: &str = "logs";

/// Rebuild per-user ledgers from banking transaction logs
#[derive(Parser, Debug)]
#[command(name = "ledger-reconciler")]
#[command(about = "Rebuild per-user ledgers from banking transaction logs", long_about = None)]
pub struct CliArgs {
    /// Root directory searched recursively for log files
    #[arg(value_name = "ROOT", help = "Directory containing the transaction logs")]
    pub root: Option<PathBuf>,

    /// Ask for the root directory on stdin
    #[arg(
        short = 'i',
        long = "interactive",
        conflicts_with = "root",
        help = "Prompt for the root directory (empty answer uses the default)"
    )]
    pub interactive: bool,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        help = "Processing strategy: 'sync' for sequential or 'async' for concurrent I/O"
    )]
    pub strategy: StrategyType,

    /// Maximum concurrent file operations (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum file reads or ledger writes in flight (default: CPU cores)"
    )]
    pub max_concurrent: Option<usize>,

    /// Extension of input log files
    #[arg(
        long = "extension",
        value_name = "EXT",
        default_value = DEFAULT_EXTENSION,
        help = "Extension of files read as logs, without the dot"
    )]
    pub extension: String,

    /// Name of the ledger directory created under the root
    #[arg(
        long = "output-dir",
        value_name = "NAME",
        default_value = DEFAULT_OUTPUT_DIR,
        help = "Directory under ROOT receiving one ledger per user"
    )]
    pub output_dir: String,

    /// Also write ledgers for users that never authored a log line
    #[arg(
        long = "include-recipients",
        help = "Write ledgers for users that only appear as transfer recipients"
    )]
    pub include_recipients: bool,

    /// Diagnostic log level, written to stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "warn",
        help = "Log level: error, warn, info, debug or trace"
    )]
    pub log_level: LogLevel,
}

/// Available processing strategies
#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

/// Log levels accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl CliArgs {
    /// Build the run settings from the parsed arguments
    pub fn to_run_config(&self) -> RunConfig {
        let config = RunConfig {
            extension: self.extension.clone(),
            output_dir_name: self.output_dir.clone(),
            include_recipients: self.include_recipients,
            ..RunConfig::default()
        };

        match self.max_concurrent {
            Some(max_concurrent) => config.with_max_concurrent(max_concurrent),
            None => config,
        }
    }

    /// Resolve the root directory
    ///
    /// The positional argument wins; otherwise the user is prompted when
    /// `--interactive` was given; otherwise [`DEFAULT_ROOT`] is used.
    pub fn resolve_root<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None if self.interactive => prompt_root(input, output, Path::new(DEFAULT_ROOT)),
            None => Ok(PathBuf::from(DEFAULT_ROOT)),
        }
    }
}

/// Ask for the root directory
///
/// An empty answer or end of input selects `default`.
pub fn prompt_root<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    default: &Path,
) -> io::Result<PathBuf> {
    write!(output, "Log directory [{}]: ", default.display())?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_path_buf())
    } else {
        Ok(PathBuf::from(answer))
    }
}
