//! depworld configuration loading from `.depworld.toml`.
//!
//! Configuration is optional - depworld uses sensible defaults if no config
//! file exists. Command-line flags always take precedence.
//!
//! # Example Configuration
//!
//! ```toml
//! [output]
//! format = "table"
//! color = true
//!
//! [tree]
//! max_depth = 4
//! show_unresolved = false
//! ascii = true
//! ```

use serde::Deserialize;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = ".depworld.toml";

/// Root configuration structure loaded from `.depworld.toml`.
///
/// All sections are optional and will use defaults if not specified.
#[derive(Debug, Deserialize, Default)]
pub struct DepworldConfig {
    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Tree rendering preferences.
    #[serde(default)]
    pub tree: TreeSettings,
}

/// Output formatting preferences.
///
/// Note: This is distinct from the runtime `OutputConfig` in the output module,
/// which handles actual rendering. These settings provide user preferences.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format for CLI commands.
    ///
    /// Valid values: `table`, `json`, `csv`, `tree`
    /// Default: `table`
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output.
    ///
    /// Defaults to `true` when stdout is a TTY.
    #[serde(default)]
    pub color: Option<bool>,
}

/// Tree rendering preferences for `depworld tree`.
#[derive(Debug, Deserialize)]
pub struct TreeSettings {
    /// Maximum depth below each target. Default: unlimited.
    #[serde(default)]
    pub max_depth: Option<usize>,

    /// Whether dependency ids without a world entry are shown.
    ///
    /// Default: `true`
    #[serde(default = "default_show_unresolved")]
    pub show_unresolved: bool,

    /// Draw branches with ASCII instead of box-drawing characters.
    #[serde(default)]
    pub ascii: bool,
}

fn default_show_unresolved() -> bool {
    true
}

impl Default for TreeSettings {
    fn default() -> Self {
        Self {
            max_depth: None,
            show_unresolved: true,
            ascii: false,
        }
    }
}

impl DepworldConfig {
    /// Load configuration from `.depworld.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Configured color preference, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }
}
