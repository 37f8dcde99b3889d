//! Configuration types for design-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Typography categories treated as relevant when syncing text styles.
pub const DEFAULT_TYPOGRAPHY_CATEGORIES: &[&str] = &[
    "display", "heading", "body", "label", "caption", "title", "subtitle", "overline",
];

/// Top-level configuration for design-lint.
///
/// The requirement schema (`[[collections]]`, `[waiver]`) lives in the same
/// file but is loaded separately through [`crate::schema`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Audit tuning.
    #[serde(default)]
    pub audit: AuditSettings,

    /// Per-validator configuration, keyed by validator name.
    #[serde(default)]
    pub validators: HashMap<String, ValidatorConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a validator is enabled.
    #[must_use]
    pub fn is_validator_enabled(&self, name: &str) -> bool {
        self.validators
            .get(name)
            .map_or(true, |c| c.enabled.unwrap_or(true))
    }
}

/// Audit-level tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AuditSettings {
    /// Text-style categories considered typography (substring match).
    #[serde(default = "default_typography_categories")]
    pub typography_categories: Vec<String>,

    /// Nodes visited between cooperative yields during component discovery.
    #[serde(default = "default_yield_every_nodes")]
    pub yield_every_nodes: usize,

    /// Components validated between progress messages.
    #[serde(default = "default_progress_every_components")]
    pub progress_every_components: usize,

    /// Report variables whose collection id resolves nowhere as a warning.
    #[serde(default = "default_true")]
    pub report_orphaned_variables: bool,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            typography_categories: default_typography_categories(),
            yield_every_nodes: default_yield_every_nodes(),
            progress_every_components: default_progress_every_components(),
            report_orphaned_variables: true,
        }
    }
}

fn default_typography_categories() -> Vec<String> {
    DEFAULT_TYPOGRAPHY_CATEGORIES
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

fn default_yield_every_nodes() -> usize {
    50
}

fn default_progress_every_components() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Per-validator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Whether this validator runs.
    #[serde(default)]
    pub enabled: Option<bool>,
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    #[diagnostic(code(design_lint::config::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(
        code(design_lint::config::parse),
        help("run `design-lint init` to generate a starter design-lint.toml")
    )]
    Parse {
        /// Parse error message.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audit.yield_every_nodes, 50);
        assert_eq!(config.audit.progress_every_components, 10);
        assert_eq!(config.audit.typography_categories.len(), 8);
        assert!(config.validators.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[audit]
typography-categories = ["heading", "body"]
yield-every-nodes = 100

[validators.component-bindings]
enabled = false

[[collections]]
name = "Theme"
pattern = "(?i)theme"
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.audit.typography_categories, vec!["heading", "body"]);
        assert_eq!(config.audit.yield_every_nodes, 100);
        assert_eq!(config.audit.progress_every_components, 10);
        assert!(!config.is_validator_enabled("component-bindings"));
        assert!(config.is_validator_enabled("collection-structure"));
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[audit\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
