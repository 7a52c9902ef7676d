//! In-memory search provider for tests and offline runs.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::models::RawHit;
use super::SearchProvider;

/// Mock provider with canned hits keyed by query substring.
///
/// Every rule whose pattern occurs in the query contributes its hits, in
/// rule order. Queries matching a failure pattern (or every query, when
/// `always_fail` is set) return an error instead.
pub struct MockSearchProvider {
    rules: Vec<(String, Vec<RawHit>)>,
    failing: Vec<String>,
    always_fail: bool,
    latency: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MockSearchProvider {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            failing: Vec::new(),
            always_fail: false,
            latency: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// A provider whose every call errors.
    pub fn failing() -> Self {
        Self { always_fail: true, ..Self::new() }
    }

    /// Return `hits` for any query containing `pattern`.
    pub fn with_hits(mut self, pattern: &str, hits: Vec<RawHit>) -> Self {
        self.rules.push((pattern.to_string(), hits));
        self
    }

    /// Fail any query containing `pattern`.
    pub fn fail_on(mut self, pattern: &str) -> Self {
        self.failing.push(pattern.to_string());
        self
    }

    /// Sleep this long inside every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Number of `search` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of calls observed running at the same time.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Convenience constructor for a hit.
    pub fn hit(title: &str, url: &str, snippet: &str) -> RawHit {
        RawHit {
            title: title.to_string(),
            url: url.to_string(),
            snippet: snippet.to_string(),
            source: "Mock".to_string(),
        }
    }
}

impl Default for MockSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl SearchProvider for MockSearchProvider {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<RawHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if self.always_fail || self.failing.iter().any(|p| query.contains(p.as_str())) {
            anyhow::bail!("mock provider failure for query: {query}");
        }

        Ok(self
            .rules
            .iter()
            .filter(|(pattern, _)| query.contains(pattern.as_str()))
            .flat_map(|(_, hits)| hits.iter().cloned())
            .take(max_results)
            .collect())
    }
}
