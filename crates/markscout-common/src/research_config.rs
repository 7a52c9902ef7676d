//! Research configuration.
//!
//! Controls which search provider is used and how the retrieval engine
//! paces its batches. Every field has a serde default so a partial (or
//! empty) TOML document is valid.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{MarkscoutError, Result};

/// Complete research run configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Search provider selection
    #[serde(default)]
    pub search: SearchConfig,

    /// Batch pacing and timeouts
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Fallbacks applied to empty request fields
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

// ── Search provider ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchProviderKind {
    DuckDuckGo,
    Searxng,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_provider")]
    pub provider: SearchProviderKind,

    /// Base URL of a SearxNG instance (required when provider = "searxng")
    pub searxng_url: Option<String>,

    /// Hits requested per query
    #[serde(default = "default_max_results")]
    pub max_results: usize,
}

fn default_provider() -> SearchProviderKind { SearchProviderKind::DuckDuckGo }
fn default_max_results() -> usize { 10 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            searxng_url: None,
            max_results: default_max_results(),
        }
    }
}

// ── Execution ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Queries issued concurrently per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between consecutive batches, in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Upper bound on a single search call, in seconds
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u64,
}

fn default_batch_size() -> usize { 5 }
fn default_batch_delay_ms() -> u64 { 1_000 }
fn default_query_timeout_secs() -> u64 { 30 }

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

impl ExecutionConfig {
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

// ── Defaults ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Primary country used when a request names none
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String { "India".to_string() }

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self { country: default_country() }
    }
}

// ── Helper Methods ───────────────────────────────────────────────────────────

impl ResearchConfig {
    /// Parse from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the retrieval engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.execution.batch_size == 0 {
            return Err(MarkscoutError::Config(
                "execution.batch_size must be at least 1".to_string(),
            ));
        }
        if self.search.provider == SearchProviderKind::Searxng && self.search.searxng_url.is_none() {
            return Err(MarkscoutError::Config(
                "search.searxng_url is required when search.provider = \"searxng\"".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
