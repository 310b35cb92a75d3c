use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("HTTP request failed with status {0}")]
    Status(reqwest::StatusCode),
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Capability to fetch the HTML of a page.
///
/// The resolver only needs a document back; how it gets there (directly,
/// through a readability proxy, from a cache) is up to the implementation.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the HTML for `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document could not be retrieved.
    async fn fetch_document(&self, url: &str) -> Result<String, FetchError>;
}

/// Fetches pages through a readability proxy that takes the target URL
/// appended to its base, e.g. `https://r.jina.ai/https://example.com/a`.
#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    client: Client,
    proxy_url: String,
}

impl ProxyFetcher {
    /// Create a fetcher from explicit parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        proxy_url: impl Into<String>,
        user_agent: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            client,
            proxy_url: proxy_url.into(),
        })
    }

    /// Create a fetcher from application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(
            config.proxy_url.clone(),
            &config.user_agent,
            config.fetch_timeout,
        )
    }

    /// The proxied request URL for a target page.
    #[must_use]
    pub fn proxied_url(&self, url: &str) -> String {
        format!("{}{url}", self.proxy_url)
    }
}

#[async_trait]
impl DocumentFetcher for ProxyFetcher {
    async fn fetch_document(&self, url: &str) -> Result<String, FetchError> {
        let request_url = self.proxied_url(url);
        debug!(url = %url, proxy = %request_url, "Fetching document for preview");

        let response = self
            .client
            .get(&request_url)
            // Ask readability proxies for the original markup, not their text rendition
            .header("X-Return-Format", "html")
            .send()
            .await
            .map_err(FetchError::Request)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        response.text().await.map_err(FetchError::Body)
    }
}
