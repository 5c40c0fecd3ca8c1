//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "txseq",
    version,
    about = "Prepare transaction logs for sequence models",
    long_about = "Prepare bank transaction logs for sequence models.\n\n\
                  Derives calendar, delta, amount and categorical features,\n\
                  and computes the tensor field layouts of each encoding scenario."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive features from a transaction CSV and write the enriched table.
    Prepare(PrepareArgs),

    /// Print the field layout of a preset and scenario.
    Layout(LayoutArgs),

    /// List the encoding scenarios.
    Scenarios,
}

#[derive(Parser)]
pub struct PrepareArgs {
    /// Transaction CSV with account_id, date, amount, type, operation, k_symbol and age.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory (default: <INPUT directory>/prepared).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Sort rows by account and date before computing day deltas.
    #[arg(long = "sort-by-account-date")]
    pub sort_by_account_date: bool,

    /// Transaction type whose amounts stay positive.
    #[arg(long = "credit-label", value_name = "LABEL")]
    pub credit_label: Option<String>,

    /// Pipeline configuration file (JSON).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Preprocess and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct LayoutArgs {
    /// Layout preset (tcode, catfield, type2, full).
    #[arg(long = "preset", value_name = "NAME")]
    pub preset: Option<String>,

    /// Encoding scenario used by the full preset.
    #[arg(long = "scenario", value_name = "ID")]
    pub scenario: Option<String>,

    /// Number of transaction-code classes (oh_tcode width).
    #[arg(long = "tcode-classes", value_name = "N", conflicts_with = "vocabularies")]
    pub tcode_classes: Option<usize>,

    /// Take the number of transaction-code classes from a vocabularies.json.
    #[arg(long = "vocabularies", value_name = "FILE")]
    pub vocabularies: Option<PathBuf>,

    /// Print the exported layout configuration as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Pipeline configuration file (JSON).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
