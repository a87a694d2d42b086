//! Shared state for command execution.

use crate::formatters::{Summary, format_output};
use anyhow::Result;
use glide_migrate_core::cli::OutputFormat;
use glide_migrate_core::{Error, HttpFetcher, MigrationConfig, TextFetcher};
use serde::Serialize;
use std::sync::Arc;

/// Configuration, fetcher and output format for one CLI invocation.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: MigrationConfig,

    /// Fetcher for URL inputs and configured sources
    pub fetcher: Arc<dyn TextFetcher>,

    /// Output format for results
    pub format: OutputFormat,
}

impl Context {
    /// Creates a context that fetches over HTTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: MigrationConfig, format: OutputFormat) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new(&config)?);
        Ok(Self::with_fetcher(config, fetcher, format))
    }

    /// Creates a context with an explicit fetcher.
    #[must_use]
    pub const fn with_fetcher(
        config: MigrationConfig,
        fetcher: Arc<dyn TextFetcher>,
        format: OutputFormat,
    ) -> Self {
        Self {
            config,
            fetcher,
            format,
        }
    }

    /// Reads an input given as an `http(s)://` URL or a file path.
    pub async fn read_input(&self, input: &str) -> Result<String> {
        if is_url(input) {
            return Ok(self.fetcher.fetch_text(input).await?);
        }
        let text = tokio::fs::read_to_string(input)
            .await
            .map_err(|e| Error::io(input, e))?;
        tracing::debug!(path = input, bytes = text.len(), "read input file");
        Ok(text)
    }

    /// Reads every input in order. Stops at the first failure.
    pub async fn read_inputs(&self, inputs: &[String]) -> Result<Vec<String>> {
        let mut texts = Vec::with_capacity(inputs.len());
        for input in inputs {
            texts.push(self.read_input(input).await?);
        }
        Ok(texts)
    }

    /// Reads `inputs`, or the configured GLIDE sources when none are given.
    pub async fn read_glide_sources(&self, inputs: &[String]) -> Result<Vec<String>> {
        if inputs.is_empty() {
            self.read_inputs(&self.config.glide_source_urls).await
        } else {
            self.read_inputs(inputs).await
        }
    }

    /// Prints a result to stdout in the configured format.
    pub fn emit<T: Serialize + Summary>(&self, data: &T) -> Result<()> {
        println!("{}", format_output(data, self.format)?);
        Ok(())
    }
}

/// Returns `true` for `http://` and `https://` inputs.
#[must_use]
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}
