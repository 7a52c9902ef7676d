//! Web search provider clients.

pub mod duckduckgo;
pub mod searxng;
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use markscout_common::{ResearchConfig, SearchProviderKind};

use crate::models::RawHit;

pub use duckduckgo::DuckDuckGoClient;
pub use mock::MockSearchProvider;
pub use searxng::SearxngClient;

/// Common interface for all web search providers.
///
/// Providers are assumed unreliable: callers treat any error as
/// "no results" for that query.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Short provider name recorded on every hit.
    fn name(&self) -> &str;

    /// Run one query, returning at most `max_results` hits in rank order.
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<RawHit>>;
}

/// Build the provider selected in configuration.
pub fn build_provider(config: &ResearchConfig) -> anyhow::Result<Arc<dyn SearchProvider>> {
    let timeout = config.execution.query_timeout();
    let provider: Arc<dyn SearchProvider> = match config.search.provider {
        SearchProviderKind::DuckDuckGo => Arc::new(DuckDuckGoClient::with_timeout(timeout)?),
        SearchProviderKind::Searxng => {
            let base = config
                .search
                .searxng_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("search.searxng_url is not set"))?;
            Arc::new(SearxngClient::new(base, timeout)?)
        }
    };
    Ok(provider)
}
