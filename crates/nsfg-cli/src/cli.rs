//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "nsfg",
    version,
    about = "Check NSFG respondent pregnancy counts against the pregnancy file",
    long_about = "Load the 2002 NSFG female respondent file and cross-check each \
                  respondent's reported pregnancy count (pregnum) against the \
                  pregnancy file.\n\n\
                  With no subcommand, runs the fixed self-test."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Directory containing 2002FemResp.{dct,dat.gz} and 2002FemPreg.{dct,dat.gz}.
    #[arg(long = "data-dir", value_name = "DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Read at most this many respondent rows.
    #[arg(long = "nrows", value_name = "N", global = true)]
    pub nrows: Option<usize>,

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

#[derive(Subcommand, Clone)]
pub enum Command {
    /// Run the self-test: row count, single-pregnancy count, and pregnum check.
    Check,

    /// Check pregnum against the pregnancy file.
    Validate(ValidateArgs),

    /// Show respondents per reported pregnum.
    Summary,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Report every mismatching case instead of stopping at the first.
    #[arg(long = "all")]
    pub all: bool,

    /// Print the result as JSON.
    #[arg(long = "json")]
    pub json: bool,
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
