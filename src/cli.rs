//! Command-line argument definitions for `clef`.
//!
//! Uses [`clap`] derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use clap_complete::Shell;

/// Decode newline-delimited compact JSON log events and print them.
///
/// Reads the given files in order, or stdin when none are given. Every
/// non-blank line must be one JSON object with at least an `@t` timestamp.
#[derive(Debug, Parser)]
#[command(name = "clef", version, about, long_about = None)]
pub struct Cli {
    /// Files to read. Reads stdin when omitted or when a file is `-`.
    pub files: Vec<PathBuf>,

    /// Control color output.
    ///
    /// `auto` enables colors only when stdout is a TTY and `NO_COLOR` is unset.
    #[arg(short = 'c', long, value_enum)]
    pub color: Option<ColorMode>,

    /// What to do with a line that cannot be decoded.
    ///
    /// `skip` logs a warning and continues; `abort` stops with exit code 1.
    #[arg(short = 'e', long, value_enum)]
    pub on_error: Option<ErrorPolicy>,

    /// Only show these properties (comma-separated).
    ///
    /// Cannot be used with `--exclude-fields`.
    #[arg(
        short = 'i',
        long,
        value_delimiter = ',',
        conflicts_with = "exclude_fields"
    )]
    pub include_fields: Option<Vec<String>>,

    /// Hide these properties (comma-separated).
    ///
    /// Cannot be used with `--include-fields`.
    #[arg(
        short = 'x',
        long,
        value_delimiter = ',',
        conflicts_with = "include_fields"
    )]
    pub exclude_fields: Option<Vec<String>>,

    /// Maximum character length for property values.
    ///
    /// Values exceeding this length are truncated with `…`.
    /// Set to `0` to disable truncation.
    #[arg(short = 'M', long)]
    pub max_field_length: Option<usize>,

    /// Timestamp display format (strftime-compatible, shown in UTC).
    #[arg(short = 't', long)]
    pub timestamp_format: Option<String>,

    /// Path to configuration file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log decoder diagnostics to stderr (same as `RUST_LOG=debug`).
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print a shell completion script and exit.
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Enable colors only when stdout is a TTY.
    Auto,
    /// Always enable colors.
    Always,
    /// Never enable colors.
    Never,
}

/// Handling of lines that fail to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ErrorPolicy {
    /// Log a warning for the line and keep reading.
    Skip,
    /// Stop at the first undecodable line.
    Abort,
}
