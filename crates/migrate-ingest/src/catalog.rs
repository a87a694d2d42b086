//! Command catalog keyed by command name.

use crate::commands::CommandEntry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The catalog: at most one entry per command, iterated in command order.
///
/// # Examples
///
/// ```
/// use glide_migrate_ingest::{Catalog, build_entry};
///
/// let catalog = Catalog::new()
///     .merge([build_entry("GET", &[])])
///     .merge([build_entry("GET", &[]), build_entry("SET", &[])]);
/// assert_eq!(catalog.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: BTreeMap<String, CommandEntry>,
}

/// Serialized catalog, `{ "entries": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Entries sorted by command.
    pub entries: Vec<CommandEntry>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a catalog holding every existing entry plus `entries`; a new
    /// entry replaces an existing one with the same command.
    #[must_use]
    pub fn merge(mut self, entries: impl IntoIterator<Item = CommandEntry>) -> Self {
        for entry in entries {
            self.entries.insert(entry.command.clone(), entry);
        }
        self
    }

    /// Returns the entry for `command`.
    #[must_use]
    pub fn get(&self, command: &str) -> Option<&CommandEntry> {
        self.entries.get(command)
    }

    /// Iterates entries in command order.
    pub fn entries(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.values()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with a matched method.
    #[must_use]
    pub fn validated_count(&self) -> usize {
        self.entries().filter(|e| e.validated).count()
    }

    /// Groups entries by family. Families and the entries inside each one
    /// are sorted.
    #[must_use]
    pub fn by_family(&self) -> BTreeMap<String, Vec<CommandEntry>> {
        let mut grouped: BTreeMap<String, Vec<CommandEntry>> = BTreeMap::new();
        for entry in self.entries() {
            grouped.entry(entry.family.clone()).or_default().push(entry.clone());
        }
        grouped
    }

    /// Returns the entries of one family, in command order.
    #[must_use]
    pub fn family(&self, family: &str) -> Vec<&CommandEntry> {
        self.entries().filter(|e| e.family == family).collect()
    }

    /// Converts to the serialized form.
    #[must_use]
    pub fn to_file(&self) -> CatalogFile {
        CatalogFile {
            entries: self.entries().cloned().collect(),
        }
    }
}

impl From<CatalogFile> for Catalog {
    fn from(file: CatalogFile) -> Self {
        Self::new().merge(file.entries)
    }
}

impl FromIterator<CommandEntry> for Catalog {
    fn from_iter<I: IntoIterator<Item = CommandEntry>>(iter: I) -> Self {
        Self::new().merge(iter)
    }
}
