//! Categorize command implementation.

use crate::context::Context;
use crate::formatters::Summary;
use anyhow::Result;
use glide_migrate_core::CommandFamily;
use glide_migrate_core::cli::ExitCode;
use glide_migrate_surface::categorize;
use serde::Serialize;
use std::collections::BTreeMap;

/// Family assignment for a list of method names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Categorization {
    /// Each name with its family, in input order
    pub categories: Vec<(String, CommandFamily)>,
    /// Names grouped by family
    pub by_family: BTreeMap<CommandFamily, Vec<String>>,
}

impl Summary for Categorization {
    fn headline(&self) -> String {
        format!(
            "{} names in {} families",
            self.categories.len(),
            self.by_family.len()
        )
    }

    fn lines(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|(name, family)| format!("{name}: {family}"))
            .collect()
    }
}

/// Categorizes every name.
#[must_use]
pub fn categorize_names(names: &[String]) -> Categorization {
    let categories: Vec<(String, CommandFamily)> = names
        .iter()
        .map(|name| (name.clone(), categorize(name)))
        .collect();

    let mut by_family: BTreeMap<CommandFamily, Vec<String>> = BTreeMap::new();
    for (name, family) in &categories {
        by_family.entry(*family).or_default().push(name.clone());
    }

    Categorization {
        categories,
        by_family,
    }
}

/// Runs the categorize command.
pub fn run(ctx: &Context, names: &[String]) -> Result<ExitCode> {
    ctx.emit(&categorize_names(names))?;
    Ok(ExitCode::SUCCESS)
}
