//! TOML configuration for syncstamp.
//!
//! Lookup order: an explicit path (from `--config`), the `SYNCSTAMP_CONFIG`
//! environment variable, `/etc/syncstamp/syncstamp.toml`, then compiled-in
//! defaults. An explicitly named file that cannot be loaded is an error; the
//! system location is only used when it exists.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "SYNCSTAMP_CONFIG";
pub const SYSTEM_CONFIG_PATH: &str = "/etc/syncstamp/syncstamp.toml";

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncstampConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SyncstampConfig {
    /// Load configuration from a TOML file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Resolve and load the configuration.
    ///
    /// `explicit` wins over the environment variable, which wins over the
    /// system file.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        Self::resolve_from(explicit, env_path.as_deref(), Path::new(SYSTEM_CONFIG_PATH))
    }

    fn resolve_from(explicit: Option<&Path>, env_path: Option<&Path>, system: &Path) -> Result<Self> {
        if let Some(path) = explicit.or(env_path) {
            return Self::load(path);
        }
        if system.exists() {
            return Self::load(system);
        }
        Ok(Self::default())
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable single-line events.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"warn"` or `"syncstamp=debug"`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Indentation used when writing the status list.
    pub indent: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indent: "\t".to_string(),
        }
    }
}
