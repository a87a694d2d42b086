//! Validate command implementation.
//!
//! Checks every built-in mapping entry against the methods extracted from
//! the GLIDE sources and optionally writes the validation artifacts.

use crate::context::Context;
use crate::formatters::Summary;
use anyhow::Result;
use glide_migrate_core::cli::ExitCode;
use glide_migrate_mapping::{
    MappingCatalog, ValidationArtifacts, ValidationReport, surface_from_sources,
    validate_mappings, write_validation_artifacts,
};
use serde::Serialize;
use std::path::PathBuf;

/// Validation report plus the artifacts written for it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Validation {
    /// Full report
    pub report: ValidationReport,
    /// Written artifact paths, `None` when writing was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<ValidationArtifacts>,
}

impl Summary for Validation {
    fn headline(&self) -> String {
        format!(
            "{}/{} mappings validated against {} methods",
            self.report.validated_count, self.report.total_entries, self.report.extracted_method_count
        )
    }

    fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .report
            .unvalidated()
            .map(|r| {
                if r.glide_methods.is_empty() {
                    format!("{} {}: no GLIDE method referenced", r.client, r.symbol)
                } else {
                    format!("{} {}: missing {}", r.client, r.symbol, r.missing.join(", "))
                }
            })
            .collect();
        if let Some(artifacts) = &self.artifacts {
            lines.push(format!("report: {}", artifacts.report.display()));
            lines.push(format!("summary: {}", artifacts.summary.display()));
            lines.push(format!("methods: {}", artifacts.methods.display()));
        }
        lines
    }
}

/// Validates the built-in mappings against `sources`.
///
/// Empty `sources` means the configured GLIDE source URLs. Artifacts go to
/// `output_dir`, or the configured output directory, unless `write` is
/// `false`.
///
/// # Errors
///
/// Returns an error if a source cannot be read or an artifact cannot be
/// written.
pub async fn validate(
    ctx: &Context,
    sources: &[String],
    output_dir: Option<PathBuf>,
    write: bool,
) -> Result<Validation> {
    let texts = ctx.read_glide_sources(sources).await?;
    let surface = surface_from_sources(&texts);
    let catalog = MappingCatalog::load_builtin()?;
    let report = validate_mappings(catalog.datasets(), &surface);

    if !write {
        return Ok(Validation {
            report,
            artifacts: None,
        });
    }

    let dir = output_dir.unwrap_or_else(|| ctx.config.output_dir.clone());
    let (report, artifacts) = tokio::task::spawn_blocking(move || {
        write_validation_artifacts(&dir, &report, &surface).map(|a| (report, a))
    })
    .await??;

    Ok(Validation {
        report,
        artifacts: Some(artifacts),
    })
}

/// Runs the validate command.
///
/// Exits with [`ExitCode::DRIFT_DETECTED`] when any entry fails validation.
pub async fn run(
    ctx: &Context,
    sources: &[String],
    output_dir: Option<PathBuf>,
    write: bool,
) -> Result<ExitCode> {
    let result = validate(ctx, sources, output_dir, write).await?;
    ctx.emit(&result)?;
    Ok(if result.report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::DRIFT_DETECTED
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_migrate_core::cli::OutputFormat;
    use glide_migrate_core::{MigrationConfig, StaticFetcher};
    use std::sync::Arc;

    fn context(output_dir: PathBuf) -> Context {
        let config = MigrationConfig {
            output_dir,
            glide_source_urls: vec!["https://example.com/BaseClient.ts".to_string()],
            ..Default::default()
        };
        let fetcher = StaticFetcher::new().with(
            "https://example.com/BaseClient.ts",
            "class BaseClient { public async get(key) {} public async set(key, value) {} }",
        );
        Context::with_fetcher(config, Arc::new(fetcher), OutputFormat::Text)
    }

    #[tokio::test]
    async fn test_validate_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path().to_path_buf());

        let result = validate(&ctx, &[], None, false).await.unwrap();
        assert!(result.artifacts.is_none());
        assert!(!result.report.is_clean());
        assert!(result.lines().iter().any(|l| l.starts_with("ioredis xadd: missing")));
        assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_validate_writes_artifacts_to_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path().to_path_buf());

        let result = validate(&ctx, &[], None, true).await.unwrap();
        let artifacts = result.artifacts.unwrap();
        assert!(artifacts.report.starts_with(dir.path()));
        assert!(artifacts.summary.exists());

        let methods: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&artifacts.methods).unwrap()).unwrap();
        assert_eq!(methods["methods"], serde_json::json!(["get", "set"]));
    }
}
