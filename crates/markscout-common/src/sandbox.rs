use reqwest::{Client, ClientBuilder};
use std::collections::HashSet;
use std::time::Duration;
use tracing::warn;
use url::Url;
use crate::error::MarkscoutError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) markscout/0.1";

/// An HTTP client that only allows requests to approved domains.
/// Search providers are the only outbound traffic the research core makes.
#[derive(Debug, Clone)]
pub struct SandboxClient {
    client: Client,
    allowlist: HashSet<String>,
}

impl SandboxClient {
    /// Creates a client with the default search-provider allowlist and a 30s timeout.
    pub fn new() -> Result<Self, MarkscoutError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, MarkscoutError> {
        let mut allowlist = HashSet::new();
        let domains = vec![
            "html.duckduckgo.com", // DuckDuckGo HTML endpoint
            "duckduckgo.com",      // DuckDuckGo redirects
            "localhost",           // self-hosted SearxNG
            "127.0.0.1",           // Localhost alt
        ];

        for d in domains {
            allowlist.insert(d.to_string());
        }

        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, allowlist })
    }

    /// Appends an exact hostname to the allowlist.
    pub fn allow_domain(&mut self, domain: &str) {
        self.allowlist.insert(domain.to_string());
    }

    /// Allows the host of a full base URL, e.g. a configured SearxNG instance.
    pub fn allow_url_host(&mut self, base_url: &str) -> Result<(), MarkscoutError> {
        let parsed = Url::parse(base_url)
            .map_err(|e| MarkscoutError::Config(format!("invalid URL {base_url}: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| MarkscoutError::Config(format!("URL has no host: {base_url}")))?;
        self.allow_domain(host);
        Ok(())
    }

    /// Validates if a URL is permitted under the current sandbox policy.
    pub fn is_allowed(&self, url: &str) -> bool {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                // Exact match or subdomain of an allowed domain
                for allowed in &self.allowlist {
                    if host == allowed || host.ends_with(&format!(".{}", allowed)) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// GET request builder, refused for hosts outside the allowlist.
    pub fn get(&self, url: &str) -> Result<reqwest::RequestBuilder, MarkscoutError> {
        if !self.is_allowed(url) {
            warn!(url, "Blocked request outside sandbox allowlist");
            return Err(MarkscoutError::Security(format!(
                "domain not in allowlist for URL {}",
                url
            )));
        }

        Ok(self.client.get(url))
    }
}
