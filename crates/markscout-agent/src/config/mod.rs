//! Configuration loading for markscout.
//! Reads markscout.toml from the current directory or the path in MARKSCOUT_CONFIG.

use std::path::{Path, PathBuf};

use markscout_common::research_config::{DefaultsConfig, ExecutionConfig, SearchConfig};
use markscout_common::ResearchConfig;
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

pub const CONFIG_ENV: &str = "MARKSCOUT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "markscout.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub execution: ExecutionConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String { "markscout=info,warn".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter() }
    }
}

impl Config {
    /// `MARKSCOUT_CONFIG` if set, else `markscout.toml`.
    pub fn path() -> PathBuf {
        std::env::var(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.research().validate()?;
        Ok(config)
    }

    /// The library-facing part of the configuration.
    pub fn research(&self) -> ResearchConfig {
        ResearchConfig {
            search: self.search.clone(),
            execution: self.execution.clone(),
            defaults: self.defaults.clone(),
        }
    }
}
