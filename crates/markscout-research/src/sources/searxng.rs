//! SearxNG JSON API client.
//!
//! Endpoint: {base_url}/search?q={query}&format=json
//! The instance must have the `json` output format enabled.

use std::time::Duration;

use async_trait::async_trait;
use markscout_common::sandbox::SandboxClient as Client;
use tracing::{debug, instrument};

use crate::models::RawHit;
use super::SearchProvider;

const PROVIDER_NAME: &str = "SearxNG";

pub struct SearxngClient {
    client: Client,
    base_url: String,
}

impl SearxngClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut client = Client::with_timeout(timeout)?;
        client.allow_url_host(base_url)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SearchProvider for SearxngClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<RawHit>> {
        let url = format!("{}/search", self.base_url);
        let resp = self.client
            .get(&url)?
            .query(&[("q", query), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let hits = results_to_hits(&resp, max_results);
        debug!(n = hits.len(), "SearxNG search results");
        Ok(hits)
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────

fn results_to_hits(body: &serde_json::Value, max_results: usize) -> Vec<RawHit> {
    body["results"]
        .as_array()
        .map(|results| {
            results
                .iter()
                .filter_map(|r| {
                    let url = r["url"].as_str()?.to_string();
                    Some(RawHit {
                        title: r["title"].as_str().unwrap_or("").to_string(),
                        url,
                        snippet: r["content"].as_str().unwrap_or("").to_string(),
                        source: PROVIDER_NAME.to_string(),
                    })
                })
                .take(max_results)
                .collect()
        })
        .unwrap_or_default()
}
