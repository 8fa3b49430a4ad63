//! Document fetch - one opaque call to retrieve the target page.
//!
//! The agent fetches at most once per run and caches the body, so this layer
//! has no retry of its own; any failure here is fatal to the run.

use std::time::Duration;

use async_trait::async_trait;
use log::info;
use url::Url;

use crate::error::{Result, ScraprError};

/// Default User-Agent; some storefronts refuse requests without one.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 Chrome/91.0";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Retrieves a document as text given a target URL.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP fetcher over reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default user agent and timeout.
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    /// Create a fetcher with an explicit user agent and timeout.
    pub fn with_options(user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| ScraprError::Fetch(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let url = Url::parse(url).map_err(|e| ScraprError::Fetch(format!("invalid URL '{}': {}", url, e)))?;
        info!("fetching {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ScraprError::Fetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraprError::Fetch(format!("{} returned {}", url, status)));
        }

        response
            .text()
            .await
            .map_err(|e| ScraprError::Fetch(e.to_string()))
    }
}
