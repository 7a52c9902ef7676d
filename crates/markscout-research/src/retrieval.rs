//! Concurrent, failure-tolerant retrieval.
//!
//! Queries run in batches of `batch_size` concurrent calls; batches run one
//! after another with `batch_delay` between them to stay under provider
//! rate limits. Each call yields a tagged [`QueryOutcome`]: a failure,
//! timeout or panic in one call becomes zero hits for that query and never
//! affects its siblings or later batches. There are no retries.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use markscout_common::ResearchConfig;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::models::{RawHit, SearchHit};
use crate::queries::SearchQuery;
use crate::sources::SearchProvider;

#[derive(Debug, Clone)]
pub struct RetrievalConfig {
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub query_timeout: Duration,
    pub max_results: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            batch_delay: Duration::from_secs(1),
            query_timeout: Duration::from_secs(30),
            max_results: 10,
        }
    }
}

impl From<&ResearchConfig> for RetrievalConfig {
    fn from(config: &ResearchConfig) -> Self {
        Self {
            batch_size: config.execution.batch_size.max(1),
            batch_delay: config.execution.batch_delay(),
            query_timeout: config.execution.query_timeout(),
            max_results: config.search.max_results,
        }
    }
}

/// Result of a single provider call.
#[derive(Debug)]
pub enum QueryOutcome {
    Hits(Vec<RawHit>),
    Failed(String),
}

/// Everything retrieval produced for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RetrievalOutcome {
    /// Flat, tagged hit list. Batch order is deterministic.
    pub hits: Vec<SearchHit>,
    pub queries_executed: usize,
    pub failed_queries: usize,
}

pub struct RetrievalEngine {
    provider: Arc<dyn SearchProvider>,
    config: RetrievalConfig,
}

impl RetrievalEngine {
    pub fn new(provider: Arc<dyn SearchProvider>, config: RetrievalConfig) -> Self {
        Self { provider, config }
    }

    /// Execute every query and collect the tagged hits. Never fails.
    #[instrument(skip(self, queries), fields(provider = self.provider.name(), n_queries = queries.len()))]
    pub async fn execute(&self, queries: &[SearchQuery]) -> RetrievalOutcome {
        let batch_size = self.config.batch_size.max(1);
        let n_batches = queries.len().div_ceil(batch_size);
        let mut outcome = RetrievalOutcome {
            queries_executed: queries.len(),
            ..Default::default()
        };

        for (batch_no, batch) in queries.chunks(batch_size).enumerate() {
            let offset = batch_no * batch_size;

            let handles = batch.iter().map(|q| {
                let provider = Arc::clone(&self.provider);
                let query = q.query.clone();
                let timeout = self.config.query_timeout;
                let max_results = self.config.max_results;
                tokio::spawn(async move { run_query(provider, query, timeout, max_results).await })
            });
            let joined = join_all(handles).await;

            // join_all preserves input order, so tagging is positional
            for (j, joined) in joined.into_iter().enumerate() {
                let query = &batch[j];
                match joined {
                    Ok(QueryOutcome::Hits(raw)) => {
                        debug!(query = %query.query, n = raw.len(), "query returned hits");
                        outcome.hits.extend(
                            raw.into_iter()
                                .map(|r| SearchHit::from_raw(r, &query.purpose, offset + j)),
                        );
                    }
                    Ok(QueryOutcome::Failed(reason)) => {
                        warn!(query = %query.query, %reason, "Web search failed");
                        outcome.failed_queries += 1;
                    }
                    Err(join_err) => {
                        error!(query = %query.query, error = %join_err, batch = batch_no, "Batch search task failed");
                        outcome.failed_queries += 1;
                    }
                }
            }

            if batch_no + 1 < n_batches && !self.config.batch_delay.is_zero() {
                tokio::time::sleep(self.config.batch_delay).await;
            }
        }

        info!(
            hits = outcome.hits.len(),
            failed = outcome.failed_queries,
            "Collected search results"
        );
        outcome
    }
}

async fn run_query(
    provider: Arc<dyn SearchProvider>,
    query: String,
    timeout: Duration,
    max_results: usize,
) -> QueryOutcome {
    match tokio::time::timeout(timeout, provider.search(&query, max_results)).await {
        Ok(Ok(hits)) => QueryOutcome::Hits(hits),
        Ok(Err(e)) => QueryOutcome::Failed(e.to_string()),
        Err(_) => QueryOutcome::Failed(format!("timed out after {timeout:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::MockSearchProvider;
    use async_trait::async_trait;

    fn queries(n: usize) -> Vec<SearchQuery> {
        (0..n)
            .map(|i| SearchQuery {
                query: format!("q{i:02} zeno"),
                purpose: format!("purpose {i}"),
            })
            .collect()
    }

    fn fast_config() -> RetrievalConfig {
        RetrievalConfig {
            batch_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_always_failing_provider_completes() {
        let provider = Arc::new(MockSearchProvider::failing());
        let engine = RetrievalEngine::new(provider.clone(), fast_config());

        let outcome = engine.execute(&queries(12)).await;
        assert!(outcome.hits.is_empty());
        assert_eq!(outcome.failed_queries, 12);
        assert_eq!(outcome.queries_executed, 12);
        assert_eq!(provider.calls(), 12);
    }

    #[tokio::test]
    async fn test_sibling_failure_keeps_other_hits() {
        let provider = Arc::new(
            MockSearchProvider::new()
                .with_hits("zeno", vec![MockSearchProvider::hit("Zeno", "https://zeno.example.com", "")])
                .fail_on("q01"),
        );
        let engine = RetrievalEngine::new(provider, fast_config());

        let outcome = engine.execute(&queries(3)).await;
        assert_eq!(outcome.failed_queries, 1);
        assert_eq!(outcome.hits.len(), 2);
        assert_eq!(outcome.hits[0].query_purpose, "purpose 0");
        assert_eq!(outcome.hits[0].query_index, 0);
        assert_eq!(outcome.hits[1].query_purpose, "purpose 2");
        assert_eq!(outcome.hits[1].query_index, 2);
    }

    #[tokio::test]
    async fn test_concurrency_bounded_by_batch_size() {
        let provider = Arc::new(MockSearchProvider::new().with_latency(Duration::from_millis(25)));
        let engine = RetrievalEngine::new(provider.clone(), fast_config());

        engine.execute(&queries(13)).await;
        assert_eq!(provider.calls(), 13);
        assert!(provider.peak_in_flight() <= 5);
        assert!(provider.peak_in_flight() >= 2);
    }

    #[tokio::test]
    async fn test_timeout_becomes_failure() {
        let provider = Arc::new(MockSearchProvider::new().with_latency(Duration::from_millis(200)));
        let config = RetrievalConfig {
            query_timeout: Duration::from_millis(10),
            ..fast_config()
        };
        let engine = RetrievalEngine::new(provider, config);

        let outcome = engine.execute(&queries(2)).await;
        assert_eq!(outcome.failed_queries, 2);
        assert!(outcome.hits.is_empty());
    }

    #[tokio::test]
    async fn test_delay_only_between_batches() {
        let provider = Arc::new(MockSearchProvider::new());
        let config = RetrievalConfig {
            batch_size: 2,
            batch_delay: Duration::from_millis(30),
            ..Default::default()
        };
        let engine = RetrievalEngine::new(provider, config);

        let start = std::time::Instant::now();
        engine.execute(&queries(4)).await; // two batches → one pause
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(30));
        assert!(elapsed < Duration::from_millis(1_000));
    }

    struct PanickingProvider;

    #[async_trait]
    impl SearchProvider for PanickingProvider {
        fn name(&self) -> &str { "Panicking" }

        async fn search(&self, query: &str, _max: usize) -> anyhow::Result<Vec<RawHit>> {
            if query.starts_with("q00") {
                panic!("provider bug");
            }
            Ok(vec![MockSearchProvider::hit(query, "https://ok.example.com", "")])
        }
    }

    #[tokio::test]
    async fn test_panicking_task_is_contained() {
        let engine = RetrievalEngine::new(Arc::new(PanickingProvider), fast_config());
        let outcome = engine.execute(&queries(3)).await;
        assert_eq!(outcome.failed_queries, 1);
        assert_eq!(outcome.hits.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_query_list() {
        let engine = RetrievalEngine::new(Arc::new(MockSearchProvider::new()), fast_config());
        let outcome = engine.execute(&[]).await;
        assert_eq!(outcome.queries_executed, 0);
        assert!(outcome.hits.is_empty());
    }
}
