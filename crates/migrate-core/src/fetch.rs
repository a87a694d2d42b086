//! Remote text retrieval.
//!
//! Declaration files, client sources and documentation pages are all plain
//! text fetched over HTTP. Fetches are awaited one at a time and are never
//! retried; a failure surfaces as [`Error::FetchFailed`] to whoever asked.

use crate::{Error, MigrationConfig, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Source of remote text.
#[async_trait]
pub trait TextFetcher: Send + Sync + std::fmt::Debug {
    /// Fetches the body of `url` as text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchFailed`] on transport errors or non-success
    /// status codes.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Fetches every URL in order and returns the bodies in the same order.
///
/// # Errors
///
/// Stops at and returns the first fetch failure.
pub async fn fetch_all(fetcher: &dyn TextFetcher, urls: &[String]) -> Result<Vec<String>> {
    let mut bodies = Vec::with_capacity(urls.len());
    for url in urls {
        bodies.push(fetcher.fetch_text(url).await?);
    }
    Ok(bodies)
}

/// HTTP fetcher backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Builds a fetcher using the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(config: &MigrationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::ConfigError {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TextFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "fetching");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::FetchFailed {
                url: url.to_string(),
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchFailed {
                url: url.to_string(),
                status: Some(status.as_u16()),
                message: format!("HTTP {status}"),
            });
        }

        let body = response.text().await.map_err(|e| Error::FetchFailed {
            url: url.to_string(),
            status: Some(status.as_u16()),
            message: format!("Failed to read body: {e}"),
        })?;

        tracing::debug!(url, bytes = body.len(), "fetched");
        Ok(body)
    }
}

/// Fetcher that serves pre-loaded bodies.
///
/// This is the test double for the [`TextFetcher`] seam. It is public so the
/// server and CLI crates can drive their tool handlers without a network.
/// Unknown URLs fail with a 404-style [`Error::FetchFailed`].
///
/// # Examples
///
/// ```
/// use glide_migrate_core::{StaticFetcher, TextFetcher};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let fetcher = StaticFetcher::new().with("mem://base", "public async get(key: string)");
/// assert!(fetcher.fetch_text("mem://base").await.is_ok());
/// assert!(fetcher.fetch_text("mem://other").await.unwrap_err().is_fetch_error());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
}

impl StaticFetcher {
    /// Creates an empty fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a body for `url`.
    #[must_use]
    pub fn with(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.bodies.insert(url.into(), body.into());
        self
    }
}

#[async_trait]
impl TextFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.bodies
            .get(url)
            .cloned()
            .ok_or_else(|| Error::FetchFailed {
                url: url.to_string(),
                status: Some(404),
                message: "HTTP 404 Not Found".to_string(),
            })
    }
}
