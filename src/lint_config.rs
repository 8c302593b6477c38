//! `.minapi-lint.toml` configuration file support.
//!
//! Provides deserialization, discovery (walk up to the repository root), and
//! merging with CLI flags. CLI flags always take precedence over file config.
//!
//! # Example config
//!
//! ```toml
//! [rules]
//! select = ["ASP0004"]
//! ignore = []
//!
//! [files]
//! exclude = ["**/obj/**", "**/bin/**"]
//!
//! [output]
//! format = "concise"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name searched for during config discovery.
pub const CONFIG_FILE_NAME: &str = ".minapi-lint.toml";

/// Errors from loading or parsing a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level `.minapi-lint.toml` configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LintFileConfig {
    /// Rule selection.
    #[serde(default)]
    pub rules: RulesConfig,

    /// File exclusion patterns.
    #[serde(default)]
    pub files: FilesConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Rule selection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Rules to enable exclusively. Empty means all default-enabled rules.
    #[serde(default)]
    pub select: Vec<String>,

    /// Rules to disable.
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// File selection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FilesConfig {
    /// Glob patterns for files to skip, e.g. `"**/obj/**"`.
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format name ("text", "concise", "json", "github").
    #[serde(default)]
    pub format: Option<String>,
}

impl LintFileConfig {
    /// Parse a `.minapi-lint.toml` file from a string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load a `.minapi-lint.toml` file from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// The `[rules] select` list joined into a CLI-style code string.
    pub fn select_arg(&self) -> Option<String> {
        if self.rules.select.is_empty() {
            None
        } else {
            Some(self.rules.select.join(","))
        }
    }

    /// The `[rules] ignore` list joined into a CLI-style code string.
    pub fn ignore_arg(&self) -> Option<String> {
        if self.rules.ignore.is_empty() {
            None
        } else {
            Some(self.rules.ignore.join(","))
        }
    }

    /// Generate a default `.minapi-lint.toml` config as a string.
    pub fn default_toml() -> &'static str {
        r#"# minapi-lint configuration.
# CLI flags take precedence over values in this file.

[rules]
# Rules to enable exclusively. Empty means all default-enabled rules.
select = []
# Rules to disable.
ignore = []

[files]
# Glob patterns for files to skip.
exclude = ["**/obj/**", "**/bin/**"]

[output]
# Default output format: "text", "concise", "json", or "github".
# format = "text"
"#
    }
}

/// Walk up from `start` looking for [`CONFIG_FILE_NAME`].
///
/// Stops at the first directory containing the config file, or at the
/// repository root (a directory containing `.git`), or at the filesystem
/// root. Returns the config file path if found.
pub fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if current.join(".git").exists() {
            return None;
        }
        dir = current.parent();
    }
    None
}

/// Discover and load the nearest config file, if any.
pub fn discover_and_load_config(start: &Path) -> Result<Option<LintFileConfig>, ConfigError> {
    match discover_config(start) {
        Some(path) => Ok(Some(LintFileConfig::load(&path)?)),
        None => Ok(None),
    }
}
