//! Diff command implementation.
//!
//! Compares one source-client symbol against the GLIDE methods its mapping
//! references.

use super::parse::format_arity;
use crate::context::Context;
use crate::formatters::Summary;
use anyhow::{Result, bail};
use glide_migrate_core::cli::ExitCode;
use glide_migrate_core::{ClientKind, Error};
use glide_migrate_mapping::{DiffReport, MappingCatalog, SignatureIndex, diff_symbol};
use glide_migrate_surface::parse_declarations;
use serde::Serialize;

/// Diff result for one symbol.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct SymbolDiff(pub DiffReport);

impl Summary for SymbolDiff {
    fn headline(&self) -> String {
        let report = &self.0;
        if !report.known {
            return format!("no known mapping for '{}' in {}", report.symbol, report.client);
        }
        let status = if report.has_mismatch() {
            "arity mismatch"
        } else {
            "compatible"
        };
        format!("{} ({}): {status}", report.symbol, report.client)
    }

    fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for candidate in &self.0.candidates {
            lines.push(format!("-> {}", candidate.glide_text));
            for comparison in &candidate.comparisons {
                if !comparison.found {
                    lines.push(format!("  {}: not found in GLIDE declarations", comparison.method));
                    continue;
                }
                let arity: Vec<String> = comparison
                    .target_arity
                    .iter()
                    .map(|a| format_arity(*a))
                    .collect();
                let marker = if comparison.arity_mismatch { " !" } else { "" };
                lines.push(format!("  {}{}{marker}", comparison.method, arity.join(" | ")));
                for delta in &comparison.type_deltas {
                    lines.push(format!(
                        "    #{} {} -> {}",
                        delta.position, delta.source_type, delta.target_type
                    ));
                }
            }
        }
        lines
    }
}

/// Diffs `symbol` of `client` against GLIDE.
///
/// `source` and `glide` are file paths or URLs; each defaults to the
/// configured declaration URL of its client.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for the GLIDE client, or an error if an
/// input cannot be read.
pub async fn diff(
    ctx: &Context,
    client: ClientKind,
    symbol: &str,
    source: Option<&str>,
    glide: Option<&str>,
) -> Result<SymbolDiff> {
    if !client.is_source() {
        bail!(Error::InvalidArgument(format!(
            "diff compares a source client against GLIDE, got '{client}'"
        )));
    }

    let source_text = ctx
        .read_input(source.unwrap_or_else(|| ctx.config.declaration_url(client)))
        .await?;
    let glide_text = ctx
        .read_input(glide.unwrap_or_else(|| ctx.config.declaration_url(ClientKind::Glide)))
        .await?;

    let catalog = MappingCatalog::load_builtin()?;
    let source = SignatureIndex::new(parse_declarations(&source_text, client.as_str()));
    let target = SignatureIndex::new(parse_declarations(&glide_text, ClientKind::Glide.as_str()));
    Ok(SymbolDiff(diff_symbol(&catalog, client, symbol, &source, &target)))
}

/// Runs the diff command.
///
/// Exits with [`ExitCode::DRIFT_DETECTED`] when an arity mismatch is found.
pub async fn run(
    ctx: &Context,
    client: ClientKind,
    symbol: &str,
    source: Option<&str>,
    glide: Option<&str>,
) -> Result<ExitCode> {
    let result = diff(ctx, client, symbol, source, glide).await?;
    ctx.emit(&result)?;
    Ok(if result.0.has_mismatch() {
        ExitCode::DRIFT_DETECTED
    } else {
        ExitCode::SUCCESS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_migrate_core::cli::OutputFormat;
    use glide_migrate_core::{MigrationConfig, StaticFetcher};
    use std::sync::Arc;

    const IOREDIS_URL: &str = "https://example.com/RedisCommander.d.ts";
    const GLIDE_URL: &str = "https://example.com/BaseClient.d.ts";

    fn context(glide: &str) -> Context {
        let config = MigrationConfig {
            ioredis_declaration_url: IOREDIS_URL.to_string(),
            glide_declaration_url: GLIDE_URL.to_string(),
            ..Default::default()
        };
        let fetcher = StaticFetcher::new()
            .with(
                IOREDIS_URL,
                "interface RedisCommander { del(...keys: RedisKey[]): Result<number>; }",
            )
            .with(GLIDE_URL, glide);
        Context::with_fetcher(config, Arc::new(fetcher), OutputFormat::Text)
    }

    #[tokio::test]
    async fn test_diff_compatible() {
        let ctx = context("class BaseClient { public async del(keys: string[]): Promise<number> {} }");
        let result = diff(&ctx, ClientKind::Ioredis, "del", None, None).await.unwrap();
        assert!(result.0.known);
        assert!(!result.0.has_mismatch());
        assert_eq!(result.headline(), "del (ioredis): compatible");
        assert!(result.lines().iter().any(|l| l == "  del(1)"));
    }

    #[tokio::test]
    async fn test_diff_missing_target_method() {
        let ctx = context("class BaseClient { public async get(key: string): Promise<string> {} }");
        let result = diff(&ctx, ClientKind::Ioredis, "del", None, None).await.unwrap();
        assert!(!result.0.has_mismatch());
        assert!(result.lines().iter().any(|l| l.contains("not found")));
    }

    #[tokio::test]
    async fn test_diff_rejects_glide_client() {
        let ctx = context("");
        let err = diff(&ctx, ClientKind::Glide, "get", None, None).await.unwrap_err();
        assert_eq!(crate::commands::exit_code_for(&err), ExitCode::INVALID_INPUT);
    }

    #[tokio::test]
    async fn test_diff_unknown_symbol() {
        let ctx = context("");
        let result = diff(&ctx, ClientKind::Ioredis, "notACommand", None, None).await.unwrap();
        assert!(!result.0.known);
        assert!(result.lines().is_empty());
    }
}
