//! Ingest command implementation.
//!
//! Maps one slice of the documented command list to GLIDE methods and
//! merges it into the catalog files in the output directory.

use crate::context::Context;
use crate::formatters::Summary;
use anyhow::Result;
use glide_migrate_core::cli::ExitCode;
use glide_migrate_ingest::{FileCatalogStore, IngestOutcome, IngestRequest, ingest};
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of one ingestion run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRun {
    /// Directory holding the catalog files
    pub catalog_dir: PathBuf,
    /// Run outcome
    #[serde(flatten)]
    pub outcome: IngestOutcome,
}

impl Summary for IngestRun {
    fn headline(&self) -> String {
        let o = &self.outcome;
        format!(
            "ingested {} of {} commands from {} ({} validated), catalog has {}",
            o.processed, o.total_commands, o.start, o.validated, o.catalog_size
        )
    }

    fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .outcome
            .entries
            .iter()
            .map(|e| {
                let method = e.method.as_deref().unwrap_or("(no method)");
                format!("{} -> {method} [{}]", e.command, e.family)
            })
            .collect();
        lines.push(self.outcome.next_start.map_or_else(
            || "command list complete".to_string(),
            |next| format!("next: --start {next}"),
        ));
        lines
    }
}

/// Options for one ingestion run.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Slice and refresh flag
    pub request: IngestRequest,
    /// Documentation file or URL, defaults to the configured commands page
    pub doc: Option<String>,
    /// GLIDE source files or URLs, defaults to the configured sources
    pub sources: Vec<String>,
    /// Catalog directory, defaults to the configured output directory
    pub output_dir: Option<PathBuf>,
}

/// Runs one ingestion against the file store.
///
/// # Errors
///
/// Returns a validation error for a bad slice before any input is read, or
/// an error if an input cannot be read or the catalog cannot be saved.
pub async fn run_ingest(ctx: &Context, options: IngestOptions) -> Result<IngestRun> {
    let request = options.request;
    request.check_count()?;

    let doc_text = ctx
        .read_input(options.doc.as_deref().unwrap_or(ctx.config.commands_doc_url.as_str()))
        .await?;
    let sources = ctx.read_glide_sources(&options.sources).await?;

    let catalog_dir = options
        .output_dir
        .unwrap_or_else(|| ctx.config.output_dir.clone());
    let store = FileCatalogStore::new(catalog_dir.clone());
    let outcome =
        tokio::task::spawn_blocking(move || ingest(&doc_text, &sources, &request, &store)).await??;

    Ok(IngestRun {
        catalog_dir,
        outcome,
    })
}

/// Runs the ingest command.
pub async fn run(ctx: &Context, options: IngestOptions) -> Result<ExitCode> {
    let result = run_ingest(ctx, options).await?;
    ctx.emit(&result)?;
    Ok(ExitCode::SUCCESS)
}
