//! Paginated ingestion runs.
//!
//! One run extracts the sorted command list from documentation text, maps a
//! slice of it to GLIDE methods, merges the result into the stored catalog
//! and saves both catalog files. The slice is checked before anything is
//! loaded or written.

use crate::catalog::Catalog;
use crate::commands::{CommandEntry, SourceMethod, build_entry, extract_command_tokens, extract_public_methods};
use crate::store::CatalogStore;
use glide_migrate_core::{Error, Result, TextFetcher, fetch_all};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Largest accepted batch.
pub const MAX_BATCH_SIZE: usize = 50;

/// Batch size when the caller does not give one.
pub const DEFAULT_BATCH_SIZE: usize = 25;

/// Which slice of the command list to ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    /// Index of the first command in the sorted list.
    pub start: usize,
    /// Commands to process, `1..=MAX_BATCH_SIZE`.
    pub count: usize,
    /// Discard the stored catalog instead of merging into it.
    pub refresh: bool,
}

impl Default for IngestRequest {
    fn default() -> Self {
        Self {
            start: 0,
            count: DEFAULT_BATCH_SIZE,
            refresh: false,
        }
    }
}

impl IngestRequest {
    /// Checks `count` against [`MAX_BATCH_SIZE`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if `count` is zero or too large.
    pub fn check_count(&self) -> Result<()> {
        if self.count == 0 || self.count > MAX_BATCH_SIZE {
            return Err(Error::ValidationError {
                field: "count".to_string(),
                reason: format!("must be between 1 and {MAX_BATCH_SIZE}, got {}", self.count),
            });
        }
        Ok(())
    }

    /// Returns the index range to process in a list of `total` commands.
    ///
    /// An empty list yields an empty range for `start == 0`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if `count` is out of bounds or
    /// `start` is past the end of the list.
    pub fn range(&self, total: usize) -> Result<Range<usize>> {
        self.check_count()?;
        if self.start >= total && !(total == 0 && self.start == 0) {
            return Err(Error::ValidationError {
                field: "start".to_string(),
                reason: format!("must be below the command count {total}, got {}", self.start),
            });
        }
        Ok(self.start..total.min(self.start + self.count))
    }
}

/// Result of one ingestion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestOutcome {
    /// Commands found in the documentation.
    pub total_commands: usize,
    /// First processed index.
    pub start: usize,
    /// Entries built in this run.
    pub processed: usize,
    /// Entries in this run that matched a method.
    pub validated: usize,
    /// Start of the next slice, absent once the list is exhausted.
    pub next_start: Option<usize>,
    /// Catalog size after the merge.
    pub catalog_size: usize,
    /// The entries built in this run.
    pub entries: Vec<CommandEntry>,
}

/// Runs one ingestion over already retrieved texts.
///
/// # Errors
///
/// Returns a validation error for a bad slice, or a store error if the
/// prior catalog cannot be read or the new one cannot be saved.
pub fn ingest<S: AsRef<str>>(
    doc_text: &str,
    source_texts: &[S],
    request: &IngestRequest,
    store: &dyn CatalogStore,
) -> Result<IngestOutcome> {
    let commands: Vec<String> = extract_command_tokens(doc_text).into_iter().collect();
    let range = request.range(commands.len())?;

    let methods: Vec<SourceMethod> = source_texts
        .iter()
        .flat_map(|text| extract_public_methods(text.as_ref()))
        .collect();
    tracing::debug!(methods = methods.len(), "extracted GLIDE methods");

    let entries: Vec<CommandEntry> = commands[range.clone()]
        .iter()
        .map(|command| build_entry(command, &methods))
        .collect();

    let existing = if request.refresh {
        tracing::info!("refresh requested, discarding stored catalog");
        Catalog::new()
    } else {
        store.load()?
    };
    let catalog = existing.merge(entries.iter().cloned());
    store.save(&catalog)?;

    let outcome = IngestOutcome {
        total_commands: commands.len(),
        start: range.start,
        processed: entries.len(),
        validated: entries.iter().filter(|e| e.validated).count(),
        next_start: (range.end < commands.len()).then_some(range.end),
        catalog_size: catalog.len(),
        entries,
    };

    tracing::info!(
        start = outcome.start,
        processed = outcome.processed,
        validated = outcome.validated,
        catalog = outcome.catalog_size,
        "ingested command batch"
    );
    Ok(outcome)
}

/// Fetches the documentation page and every GLIDE source, then runs
/// [`ingest`].
///
/// # Errors
///
/// Returns a validation error before fetching if `count` is out of bounds,
/// the first fetch failure, or any error from [`ingest`].
pub async fn ingest_remote(
    fetcher: &dyn TextFetcher,
    doc_url: &str,
    source_urls: &[String],
    request: &IngestRequest,
    store: &dyn CatalogStore,
) -> Result<IngestOutcome> {
    request.check_count()?;
    let doc_text = fetcher.fetch_text(doc_url).await?;
    let sources = fetch_all(fetcher, source_urls).await?;
    ingest(&doc_text, &sources, request, store)
}
