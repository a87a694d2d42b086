//! Catalog command implementation.
//!
//! Reads the stored command catalog and filters it by family.

use crate::context::Context;
use crate::formatters::Summary;
use anyhow::Result;
use glide_migrate_core::cli::ExitCode;
use glide_migrate_ingest::{CatalogStore, CommandEntry, FileCatalogStore, resolve_family_filter};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Filtered view of the stored catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    /// Entries in the whole catalog
    pub total_entries: usize,
    /// Validated entries in the whole catalog
    pub validated_count: usize,
    /// Entry count per family
    pub families: BTreeMap<String, usize>,
    /// Entries passing the filters, sorted by command
    pub entries: Vec<CommandEntry>,
}

impl Summary for CatalogView {
    fn headline(&self) -> String {
        format!(
            "{} of {} commands ({} validated)",
            self.entries.len(),
            self.total_entries,
            self.validated_count
        )
    }

    fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| {
                let method = e.method.as_deref().unwrap_or("-");
                let params = e.params_signature.as_deref().unwrap_or_default();
                e.return_type.as_ref().map_or_else(
                    || format!("{:<24} {method}", e.command),
                    |ret| format!("{:<24} {method}({params}) -> {ret}", e.command),
                )
            })
            .collect()
    }
}

/// Loads the catalog from `dir`, or the configured output directory.
///
/// # Errors
///
/// Returns [`glide_migrate_core::Error::InvalidArgument`] for an unknown
/// family, or an error if the stored catalog cannot be parsed.
pub async fn view(
    ctx: &Context,
    dir: Option<PathBuf>,
    family: Option<&str>,
    validated_only: bool,
) -> Result<CatalogView> {
    let family = family.map(resolve_family_filter).transpose()?;

    let store = FileCatalogStore::new(dir.unwrap_or_else(|| ctx.config.output_dir.clone()));
    let catalog = tokio::task::spawn_blocking(move || store.load()).await??;

    let families = catalog
        .by_family()
        .into_iter()
        .map(|(family, entries)| (family, entries.len()))
        .collect();
    let entries = catalog
        .entries()
        .filter(|e| family.is_none_or(|f| e.family == f))
        .filter(|e| !validated_only || e.validated)
        .cloned()
        .collect();

    Ok(CatalogView {
        total_entries: catalog.len(),
        validated_count: catalog.validated_count(),
        families,
        entries,
    })
}

/// Runs the catalog command.
pub async fn run(
    ctx: &Context,
    dir: Option<PathBuf>,
    family: Option<&str>,
    validated_only: bool,
) -> Result<ExitCode> {
    let result = view(ctx, dir, family, validated_only).await?;
    ctx.emit(&result)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_migrate_core::cli::OutputFormat;
    use glide_migrate_core::{MigrationConfig, StaticFetcher};
    use glide_migrate_ingest::Catalog;
    use std::sync::Arc;

    fn entry(command: &str, family: &str, method: Option<&str>) -> CommandEntry {
        CommandEntry {
            command: command.to_string(),
            family: family.to_string(),
            method: method.map(ToString::to_string),
            params_signature: method.map(|_| "key: GlideString".to_string()),
            return_type: method.map(|_| "number".to_string()),
            validated: method.is_some(),
        }
    }

    fn seeded() -> (tempfile::TempDir, Context) {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::new().merge([
            entry("XLEN", "streams", Some("xlen")),
            entry("XGROUP CREATE", "streams", None),
            entry("INCR", "strings", Some("incr")),
        ]);
        FileCatalogStore::new(dir.path()).save(&catalog).unwrap();

        let config = MigrationConfig {
            output_dir: dir.path().to_path_buf(),
            ..Default::default()
        };
        let ctx = Context::with_fetcher(config, Arc::new(StaticFetcher::new()), OutputFormat::Text);
        (dir, ctx)
    }

    #[tokio::test]
    async fn test_view_filters_family_and_validation() {
        let (_dir, ctx) = seeded();

        let streams = view(&ctx, None, Some("streams"), false).await.unwrap();
        assert_eq!(streams.total_entries, 3);
        assert_eq!(streams.entries.len(), 2);
        assert_eq!(streams.families["streams"], 2);

        let validated = view(&ctx, None, Some("streams"), true).await.unwrap();
        assert_eq!(validated.entries.len(), 1);
        assert_eq!(validated.headline(), "1 of 3 commands (2 validated)");
        assert!(validated.lines()[0].ends_with("xlen(key: GlideString) -> number"));
    }

    #[tokio::test]
    async fn test_view_family_filter_ignores_case_and_padding() {
        let (_dir, ctx) = seeded();
        for family in ["Streams", " streams", "STREAMS "] {
            let view = view(&ctx, None, Some(family), false).await.unwrap();
            assert_eq!(view.entries.len(), 2, "family filter {family:?}");
            assert!(view.entries.iter().all(|e| e.family == "streams"));
        }
    }

    #[tokio::test]
    async fn test_view_missing_catalog_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::with_fetcher(
            MigrationConfig::default(),
            Arc::new(StaticFetcher::new()),
            OutputFormat::Json,
        );
        let view = view(&ctx, Some(dir.path().to_path_buf()), Some("other"), false).await.unwrap();
        assert_eq!(view.total_entries, 0);
        assert!(view.families.is_empty());
    }

    #[tokio::test]
    async fn test_view_rejects_unknown_family() {
        let (_dir, ctx) = seeded();
        let err = view(&ctx, None, Some("widgets"), false).await.unwrap_err();
        assert_eq!(crate::commands::exit_code_for(&err), ExitCode::INVALID_INPUT);
    }
}
