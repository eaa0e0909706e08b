//! Configuration management with TOML file support.
//!
//! Merges settings from three sources (highest precedence first):
//! 1. CLI flags
//! 2. Config file (`~/.config/clef/config.toml` or `$XDG_CONFIG_HOME/clef/config.toml`)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::{Cli, ColorMode, ErrorPolicy};
use crate::error::ClefError;

/// Runtime configuration merged from defaults, config file, and CLI arguments.
///
/// Use [`Config::from_cli`] to build from parsed CLI arguments, or
/// [`Config::default`] for built-in defaults (useful in tests and benchmarks).
#[derive(Debug, Clone)]
pub struct Config {
    /// Color output mode (auto/always/never).
    pub color_mode: ColorMode,
    /// What to do with a line that fails to decode.
    pub on_error: ErrorPolicy,
    /// Whitelist of properties to display (mutually exclusive with `exclude_fields`).
    pub include_fields: Option<Vec<String>>,
    /// Blacklist of properties to hide (mutually exclusive with `include_fields`).
    pub exclude_fields: Option<Vec<String>>,
    /// Maximum character length for property values before truncation. 0 = no limit.
    pub max_field_length: usize,
    /// Timestamp display format string (strftime-compatible).
    pub timestamp_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            on_error: ErrorPolicy::Skip,
            include_fields: None,
            exclude_fields: None,
            max_field_length: 120,
            timestamp_format: "%H:%M:%S%.3f".to_string(),
        }
    }
}

impl Config {
    /// Build a [`Config`] from CLI arguments, loading the config file if present.
    ///
    /// Merge precedence: CLI flags > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, ClefError> {
        let mut config = Self::default();

        let config_path = cli.config.clone().unwrap_or_else(Self::default_config_path);

        if config_path.exists() {
            let file_config = FileConfig::load(&config_path)?;
            config.apply_file_config(file_config)?;
        } else if cli.config.is_some() {
            return Err(ClefError::Config(format!(
                "config file {} does not exist",
                config_path.display()
            )));
        }

        // CLI overrides
        if let Some(color) = cli.color {
            config.color_mode = color;
        }
        if let Some(on_error) = cli.on_error {
            config.on_error = on_error;
        }
        if cli.include_fields.is_some() {
            config.include_fields.clone_from(&cli.include_fields);
        }
        if cli.exclude_fields.is_some() {
            config.exclude_fields.clone_from(&cli.exclude_fields);
        }
        if let Some(max_len) = cli.max_field_length {
            config.max_field_length = max_len;
        }
        if let Some(ref format) = cli.timestamp_format {
            config.timestamp_format.clone_from(format);
        }

        Ok(config)
    }

    /// Whether a property should be displayed under the include/exclude lists.
    pub fn shows_field(&self, key: &str) -> bool {
        if let Some(ref include) = self.include_fields
            && !include.iter().any(|f| f == key)
        {
            return false;
        }
        if let Some(ref exclude) = self.exclude_fields
            && exclude.iter().any(|f| f == key)
        {
            return false;
        }
        true
    }

    /// Default config file path: `$XDG_CONFIG_HOME/clef/config.toml` or `~/.config/clef/config.toml`.
    fn default_config_path() -> PathBuf {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(xdg).join("clef").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("clef")
                .join("config.toml")
        } else {
            PathBuf::from(".config/clef/config.toml")
        }
    }

    /// Apply settings from a parsed config file.
    fn apply_file_config(&mut self, file: FileConfig) -> Result<(), ClefError> {
        if let Some(color) = file.color {
            self.color_mode = match color.as_str() {
                "always" => ColorMode::Always,
                "never" => ColorMode::Never,
                "auto" => ColorMode::Auto,
                other => {
                    return Err(ClefError::Config(format!(
                        "invalid color mode '{other}': expected auto, always or never"
                    )));
                }
            };
        }

        if let Some(on_error) = file.on_error {
            self.on_error = match on_error.as_str() {
                "skip" => ErrorPolicy::Skip,
                "abort" => ErrorPolicy::Abort,
                other => {
                    return Err(ClefError::Config(format!(
                        "invalid on_error policy '{other}': expected skip or abort"
                    )));
                }
            };
        }

        if let Some(format) = file.timestamp_format {
            self.timestamp_format = format;
        }

        if let Some(max_len) = file.max_field_length {
            self.max_field_length = max_len;
        }

        if let Some(fields) = file.fields {
            if fields.include.is_some() && fields.exclude.is_some() {
                return Err(ClefError::Config(
                    "[fields] include and exclude cannot both be set".to_string(),
                ));
            }
            self.include_fields = fields.include;
            self.exclude_fields = fields.exclude;
        }

        Ok(())
    }
}

/// Config file structure (TOML deserialization).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    color: Option<String>,
    on_error: Option<String>,
    timestamp_format: Option<String>,
    max_field_length: Option<usize>,
    fields: Option<FieldsConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldsConfig {
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
}

impl FileConfig {
    fn load(path: &Path) -> Result<Self, ClefError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClefError::Config(format!("cannot read config file {}: {e}", path.display()))
        })?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}
