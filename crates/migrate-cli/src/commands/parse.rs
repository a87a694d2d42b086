//! Parse command implementation.
//!
//! Parses declaration text into categorized method signatures.

use crate::context::Context;
use crate::formatters::Summary;
use anyhow::{Result, bail};
use glide_migrate_core::cli::ExitCode;
use glide_migrate_core::{ArityRange, ClientKind, MethodSignature};
use glide_migrate_surface::{categorize_all, parse_declarations};
use serde::Serialize;

/// Parsed declarations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDeclarations {
    /// Declaring file recorded on the methods
    pub declaring_file: String,
    /// Number of parsed methods
    pub method_count: usize,
    /// Signatures in declaration order
    pub methods: Vec<MethodSignature>,
}

impl Summary for ParsedDeclarations {
    fn headline(&self) -> String {
        format!("{} methods parsed from {}", self.method_count, self.declaring_file)
    }

    fn lines(&self) -> Vec<String> {
        self.methods
            .iter()
            .map(|m| {
                let category = m.category.map_or("-", |c| c.as_str());
                format!(
                    "{}{} -> {} [{category}]",
                    m.name,
                    format_arity(m.arity()),
                    m.return_type_text.as_deref().unwrap_or("-")
                )
            })
            .collect()
    }
}

/// Renders an arity range as `(min..max)` or `(min..)`.
pub(crate) fn format_arity(arity: ArityRange) -> String {
    match arity.max {
        Some(max) if max == arity.min => format!("({max})"),
        Some(max) => format!("({}..{max})", arity.min),
        None => format!("({}..)", arity.min),
    }
}

/// Reads `input`, or the configured declarations of `client`, and parses it.
///
/// # Errors
///
/// Returns an error if neither input nor client is given or the input
/// cannot be read.
pub async fn parse(
    ctx: &Context,
    input: Option<&str>,
    client: Option<ClientKind>,
    declaring_file: Option<String>,
) -> Result<ParsedDeclarations> {
    let source = match (input, client) {
        (Some(input), _) => input.to_string(),
        (None, Some(client)) => ctx.config.declaration_url(client).to_string(),
        (None, None) => bail!(glide_migrate_core::Error::InvalidArgument(
            "provide an input file or URL, or --client".to_string()
        )),
    };
    let text = ctx.read_input(&source).await?;

    let declaring_file = declaring_file
        .or_else(|| client.map(|c| c.as_str().to_string()))
        .unwrap_or(source);
    let mut methods = parse_declarations(&text, &declaring_file);
    categorize_all(&mut methods);

    Ok(ParsedDeclarations {
        declaring_file,
        method_count: methods.len(),
        methods,
    })
}

/// Runs the parse command.
pub async fn run(
    ctx: &Context,
    input: Option<&str>,
    client: Option<ClientKind>,
    declaring_file: Option<String>,
) -> Result<ExitCode> {
    let parsed = parse(ctx, input, client, declaring_file).await?;
    ctx.emit(&parsed)?;
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_migrate_core::cli::OutputFormat;
    use glide_migrate_core::{MigrationConfig, StaticFetcher};
    use std::sync::Arc;

    fn context() -> Context {
        let config = MigrationConfig {
            ioredis_declaration_url: "https://example.com/RedisCommander.d.ts".to_string(),
            ..Default::default()
        };
        let fetcher = StaticFetcher::new().with(
            "https://example.com/RedisCommander.d.ts",
            "interface RedisCommander { lpush(key: RedisKey, ...elements: string[]): Result<number>; }",
        );
        Context::with_fetcher(config, Arc::new(fetcher), OutputFormat::Text)
    }

    #[test]
    fn test_format_arity() {
        assert_eq!(format_arity(ArityRange { min: 2, max: Some(2) }), "(2)");
        assert_eq!(format_arity(ArityRange { min: 1, max: Some(3) }), "(1..3)");
        assert_eq!(format_arity(ArityRange { min: 1, max: None }), "(1..)");
    }

    #[tokio::test]
    async fn test_parse_configured_client() {
        let parsed = parse(&context(), None, Some(ClientKind::Ioredis), None).await.unwrap();
        assert_eq!(parsed.declaring_file, "ioredis");
        assert_eq!(parsed.method_count, 1);
        assert_eq!(parsed.lines(), vec!["lpush(1..) -> Result<number> [lists]"]);
    }

    #[tokio::test]
    async fn test_parse_file_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("BaseClient.ts");
        std::fs::write(
            &path,
            "public async xadd(key: string, entries: string[][]): Promise<string>",
        )
        .unwrap();
        let input = path.to_str().unwrap();

        let parsed = parse(&context(), Some(input), None, None).await.unwrap();
        assert_eq!(parsed.declaring_file, input);
        let xadd = &parsed.methods[0];
        assert_eq!((xadd.min_arity, xadd.max_arity), (2, Some(2)));
        assert!(xadd.is_async);
        assert_eq!(xadd.return_type_text.as_deref(), Some("string"));
    }

    #[tokio::test]
    async fn test_parse_requires_input() {
        let err = parse(&context(), None, None, None).await.unwrap_err();
        assert_eq!(crate::commands::exit_code_for(&err), ExitCode::INVALID_INPUT);
    }
}
