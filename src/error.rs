//! Error types for decoding compact log events.
//!
//! Uses [`thiserror`] for ergonomic error derivation.

use thiserror::Error;

/// Errors that can occur while decoding events or running `clef`.
///
/// The first three variants describe a single rejected line; a caller may
/// skip that line and keep reading (see [`is_recoverable`](Self::is_recoverable)).
#[derive(Debug, Error)]
pub enum ClefError {
    /// The line is not valid JSON, or its top-level value is not an object.
    #[error("line {line}: {reason}")]
    StreamFormat { line: u64, reason: String },

    /// A required reserved field (the timestamp) is absent or `null`.
    #[error("line {line}: required field `{field}` is missing")]
    RequiredFieldMissing { field: &'static str, line: u64 },

    /// A reserved field holds the wrong JSON kind, or a value no parser accepts.
    #[error("line {line}: unsupported value for field `{field}`: {detail}")]
    UnsupportedFieldFormat {
        field: &'static str,
        line: u64,
        detail: String,
    },

    /// Misuse of an entry point (non-object input, reading a closed reader).
    #[error("invalid argument: {0}")]
    Argument(String),

    /// I/O error while reading a line source or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error (unreadable config file, bad option value).
    #[error("configuration error: {0}")]
    Config(String),

    /// TOML deserialization error.
    #[error("config file error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ClefError {
    /// The 1-based line number the error refers to, if it concerns one line.
    pub const fn line(&self) -> Option<u64> {
        match self {
            Self::StreamFormat { line, .. }
            | Self::RequiredFieldMissing { line, .. }
            | Self::UnsupportedFieldFormat { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Whether reading can continue past the line that produced this error.
    pub const fn is_recoverable(&self) -> bool {
        self.line().is_some()
    }

    pub(crate) fn unsupported(field: &'static str, line: u64, detail: impl Into<String>) -> Self {
        Self::UnsupportedFieldFormat {
            field,
            line,
            detail: detail.into(),
        }
    }
}
