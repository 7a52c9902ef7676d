//! DuckDuckGo HTML search client.
//!
//! Endpoint: https://html.duckduckgo.com/html/?q={query}
//! The HTML endpoint needs no API key. Result links are wrapped in a
//! `/l/?uddg=` redirect which is unwrapped here.

use std::time::Duration;

use async_trait::async_trait;
use markscout_common::sandbox::SandboxClient as Client;
use scraper::{Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

use crate::models::RawHit;
use super::SearchProvider;

const DDG_HTML_URL: &str = "https://html.duckduckgo.com/html/";
const PROVIDER_NAME: &str = "DuckDuckGo";

pub struct DuckDuckGoClient {
    client: Client,
}

impl DuckDuckGoClient {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self { client: Client::new()? })
    }

    pub fn with_timeout(timeout: Duration) -> anyhow::Result<Self> {
        Ok(Self { client: Client::with_timeout(timeout)? })
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: usize) -> anyhow::Result<Vec<RawHit>> {
        let resp = self.client
            .get(DDG_HTML_URL)?
            .query(&[("q", query)])
            .send()
            .await?;

        if !resp.status().is_success() {
            warn!(status = %resp.status(), "DuckDuckGo returned non-success status");
            anyhow::bail!("DuckDuckGo returned HTTP {}", resp.status());
        }

        let body = resp.text().await?;
        let hits = parse_results(&body, max_results);
        debug!(n = hits.len(), "DuckDuckGo search results");
        Ok(hits)
    }
}

// ── Parsing ────────────────────────────────────────────────────────────────

/// Extract organic results from a DuckDuckGo HTML results page.
/// Ads (`.result--ad`) and results without a link are skipped.
pub fn parse_results(html: &str, max_results: usize) -> Vec<RawHit> {
    let document = Html::parse_document(html);
    let (Ok(result_sel), Ok(link_sel), Ok(snippet_sel)) = (
        Selector::parse("div.result"),
        Selector::parse("a.result__a"),
        Selector::parse(".result__snippet"),
    ) else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    for result in document.select(&result_sel) {
        if hits.len() >= max_results {
            break;
        }
        if result.value().classes().any(|c| c == "result--ad") {
            continue;
        }
        let Some(link) = result.select(&link_sel).next() else { continue };
        let Some(href) = link.value().attr("href") else { continue };

        let title = collapse_whitespace(&link.text().collect::<String>());
        let snippet = result
            .select(&snippet_sel)
            .next()
            .map(|s| collapse_whitespace(&s.text().collect::<String>()))
            .unwrap_or_default();

        hits.push(RawHit {
            title,
            url: unwrap_redirect(href),
            snippet,
            source: PROVIDER_NAME.to_string(),
        });
    }
    hits
}

/// `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=…` → `https://example.com`
fn unwrap_redirect(href: &str) -> String {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };

    Url::parse(&absolute)
        .ok()
        .and_then(|u| {
            u.query_pairs()
                .find(|(k, _)| k == "uddg")
                .map(|(_, v)| v.into_owned())
        })
        .unwrap_or(absolute)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r##"
<html><body>
  <div class="result results_links result--ad">
    <a class="result__a" href="https://ads.example.com/">Sponsored Zeno</a>
    <a class="result__snippet">Buy now</a>
  </div>
  <div class="result results_links results_links_deep web-result">
    <h2 class="result__title">
      <a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.zaubacorp.com%2Fcompany%2FZENO-TECH&amp;rut=abc">
        Zeno Tech Private Limited
      </a>
    </h2>
    <a class="result__snippet" href="#">Zeno Tech Private Limited is an <b>active</b> company incorporated in Karnataka.</a>
  </div>
  <div class="result results_links web-result">
    <a class="result__a" href="https://www.instagram.com/zeno.store/">Zeno Store (@zeno.store)</a>
  </div>
  <div class="result web-result"><span>no link here</span></div>
</body></html>
"##;

    #[test]
    fn test_parse_results_skips_ads_and_unwraps_links() {
        let hits = parse_results(FIXTURE, 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Zeno Tech Private Limited");
        assert_eq!(hits[0].url, "https://www.zaubacorp.com/company/ZENO-TECH");
        assert!(hits[0].snippet.contains("active company incorporated in Karnataka"));
        assert_eq!(hits[0].source, "DuckDuckGo");
        assert_eq!(hits[1].url, "https://www.instagram.com/zeno.store/");
        assert_eq!(hits[1].snippet, "");
    }

    #[test]
    fn test_parse_results_respects_max() {
        assert_eq!(parse_results(FIXTURE, 1).len(), 1);
        assert!(parse_results(FIXTURE, 0).is_empty());
    }

    #[test]
    fn test_parse_garbage_is_empty() {
        assert!(parse_results("<<<not html", 10).is_empty());
    }

    #[tokio::test]
    #[ignore = "Hits external DuckDuckGo endpoint"]
    async fn test_live_search() {
        let client = DuckDuckGoClient::new().unwrap();
        let hits = client.search("\"Tata\" trademark registered India", 5).await.unwrap();
        assert!(!hits.is_empty());
    }
}
