//! Equivalent lookup command implementation.

use crate::context::Context;
use crate::formatters::Summary;
use anyhow::Result;
use glide_migrate_core::ClientKind;
use glide_migrate_core::cli::ExitCode;
use glide_migrate_mapping::{ApiMappingEntry, MappingCatalog};
use serde::Serialize;

/// Mapping entries found for one symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalents {
    /// Dataset searched
    pub client: ClientKind,
    /// Looked-up symbol
    pub symbol: String,
    /// Whether any entry matched
    pub found: bool,
    /// Matching entries in dataset order
    pub entries: Vec<ApiMappingEntry>,
}

impl Summary for Equivalents {
    fn headline(&self) -> String {
        if self.found {
            format!("{} -> GLIDE ({})", self.symbol, self.client)
        } else {
            format!("no known mapping for '{}' in {}", self.symbol, self.client)
        }
    }

    fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .flat_map(|entry| {
                let mut lines = vec![format!("[{}] {}", entry.category, entry.glide)];
                if let Some(notes) = &entry.notes {
                    lines.push(format!("  note: {notes}"));
                }
                lines
            })
            .collect()
    }
}

/// Looks up `symbol` in the built-in `client` dataset.
///
/// # Errors
///
/// Returns an error if the built-in datasets fail to load.
pub fn find(client: ClientKind, symbol: &str) -> Result<Equivalents> {
    let catalog = MappingCatalog::load_builtin()?;
    let entries: Vec<ApiMappingEntry> = catalog
        .find_equivalent(client, symbol)
        .into_iter()
        .cloned()
        .collect();

    Ok(Equivalents {
        client,
        symbol: symbol.to_string(),
        found: !entries.is_empty(),
        entries,
    })
}

/// Runs the equivalent command.
///
/// A symbol without a mapping is printed as a normal result and exits with
/// [`ExitCode::ERROR`] so scripts can branch on it.
pub fn run(ctx: &Context, client: ClientKind, symbol: &str) -> Result<ExitCode> {
    let result = find(client, symbol)?;
    ctx.emit(&result)?;
    Ok(if result.found {
        ExitCode::SUCCESS
    } else {
        ExitCode::ERROR
    })
}
