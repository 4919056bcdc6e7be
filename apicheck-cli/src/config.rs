//! Configuration loading from `.apicheckrc.toml`.
//!
//! The file is optional and read from the current directory. Command-line
//! flags override every setting.
//!
//! # Example Configuration
//!
//! ```toml
//! [check]
//! before = "origin/main"
//! after = "."
//! vcs = "git"
//! all = false
//!
//! [build]
//! goos = "linux"
//! goarch = "amd64"
//! tags = ["integration"]
//!
//! [output]
//! format = "table"
//! color = true
//! compact = false
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::output::OutputFormat;

pub const CONFIG_FILE: &str = ".apicheckrc.toml";

/// Root configuration structure loaded from `.apicheckrc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct ApicheckConfig {
    #[serde(default)]
    pub check: CheckSettings,

    /// Platform used for build-constraint file selection.
    #[serde(default)]
    pub build: BuildSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// Defaults for `apicheck check`.
#[derive(Debug, Deserialize, Default)]
pub struct CheckSettings {
    /// Revision compared from.
    #[serde(default)]
    pub before: Option<String>,

    /// Revision compared to.
    #[serde(default)]
    pub after: Option<String>,

    /// Revision backend: `git` or `fs`.
    #[serde(default)]
    pub vcs: Option<String>,

    /// Report non-breaking changes too.
    #[serde(default)]
    pub all: bool,
}

/// Build target overrides. Unset values use the host platform.
#[derive(Debug, Deserialize, Default)]
pub struct BuildSettings {
    #[serde(default)]
    pub goos: Option<String>,

    #[serde(default)]
    pub goarch: Option<String>,

    /// Extra satisfied build tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Output formatting preferences.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Valid values: `text`, `table`, `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Force colored output on or off.
    #[serde(default)]
    pub color: Option<bool>,

    /// Minified JSON and borderless tables.
    #[serde(default)]
    pub compact: bool,
}

impl ApicheckConfig {
    /// Load configuration from `.apicheckrc.toml` in the given directory.
    ///
    /// Read and parse errors are logged as warnings and defaults are used.
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

    /// Configured output format, falling back to text.
    pub fn output_format(&self) -> OutputFormat {
        match self.output.format.as_deref().map(str::parse::<OutputFormat>) {
            Some(Ok(format)) => format,
            Some(Err(e)) => {
                tracing::warn!("{}", e);
                OutputFormat::default()
            }
            None => OutputFormat::default(),
        }
    }
}
