//! CLI argument definitions for tabclean.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabclean",
    version,
    about = "Classify table columns by name and normalize their values",
    long_about = "Classify table columns as numeric, date or text from their names and\n\
                  normalize every value to that type.\n\n\
                  Sentinel values and unparseable cells become missing markers;\n\
                  they never stop the run."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
    /// Normalize a CSV/TSV file and write the cleaned table.
    Clean(CleanArgs),

    /// Show the category inferred for column names.
    Classify(ClassifyArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// Input CSV or TSV file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file (default: <INPUT stem>_clean.<ext> next to the input).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// JSON file with normalization options (ruleset, bad values, date formats).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Field separator of the input and output files.
    #[arg(long = "delimiter", value_enum, default_value = "auto")]
    pub delimiter: DelimiterArg,

    /// Keep time of day in date columns instead of truncating to the date.
    #[arg(long = "keep-time")]
    pub keep_time: bool,

    /// Read ambiguous dates such as 02/03/2025 month first.
    #[arg(long = "month-first")]
    pub month_first: bool,

    /// Disable the permissive date parser; only fallback formats are tried.
    #[arg(long = "no-permissive")]
    pub no_permissive: bool,

    /// Convert cell by cell instead of the batch strategy.
    #[arg(long = "row-wise")]
    pub row_wise: bool,

    /// Remove thousands separators (1,234 → 1234) while reading.
    #[arg(long = "strip-thousands")]
    pub strip_thousands: bool,

    /// Write the data-quality report as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// JSON file with normalization options (only the ruleset is used).
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Column names to classify.
    #[arg(value_name = "NAME", required = true)]
    pub names: Vec<String>,
}

/// CLI delimiter choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum DelimiterArg {
    Auto,
    Comma,
    Tab,
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
