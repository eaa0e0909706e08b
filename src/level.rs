//! Event severity with case-insensitive parsing, display, and colorization.
//!
//! The set of names is closed: anything outside it is rejected rather than
//! mapped to a nearby level.

use std::fmt;

use owo_colors::Style;

/// Severity of a log event, ordered from least to most severe.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Verbose,
    Debug,
    #[default]
    Information,
    Warning,
    Error,
    Fatal,
}

impl Level {
    pub const ALL: [Self; 6] = [
        Self::Verbose,
        Self::Debug,
        Self::Information,
        Self::Warning,
        Self::Error,
        Self::Fatal,
    ];

    /// Canonical name, as written in the `@l` field.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Verbose => "Verbose",
            Self::Debug => "Debug",
            Self::Information => "Information",
            Self::Warning => "Warning",
            Self::Error => "Error",
            Self::Fatal => "Fatal",
        }
    }

    /// 5-character display badge for the level, right-justified (e.g., `" INFO"`, `"ERROR"`).
    #[allow(clippy::trivially_copy_pass_by_ref)] // &self required since OwoColorize has conflicting trait methods
    pub const fn badge(&self) -> &'static str {
        match self {
            Self::Verbose => " VERB",
            Self::Debug => "DEBUG",
            Self::Information => " INFO",
            Self::Warning => " WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }

    /// Returns the [`Style`] for this level's badge when colors are enabled.
    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub const fn style(&self) -> Style {
        match self {
            Self::Verbose => Style::new().cyan().bold(),
            Self::Debug => Style::new().blue().bold(),
            Self::Information => Style::new().green().bold(),
            Self::Warning => Style::new().yellow().bold(),
            Self::Error => Style::new().red().bold(),
            Self::Fatal => Style::new().magenta().bold(),
        }
    }

    /// Parse a level name, case-insensitive.
    ///
    /// Returns `None` for anything that is not exactly one of the six names.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
