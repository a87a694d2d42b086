//! Surface validator.
//!
//! Re-derives which GLIDE methods each mapping entry claims exist and checks
//! them against a freshly extracted GLIDE surface. Missing methods are
//! reported as data so drift shows up as `validated: false` entries rather
//! than as failures.

use crate::dataset::MappingDataset;
use glide_migrate_core::{ClientKind, Result, TextFetcher, fetch_all};
use glide_migrate_surface::{extract_method_candidates, extract_referenced_method_names};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Validation outcome for one mapping entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryValidation {
    /// Dataset the entry belongs to.
    pub client: ClientKind,
    /// Entry symbol.
    pub symbol: String,
    /// GLIDE methods referenced by the entry's call text.
    pub glide_methods: Vec<String>,
    /// `true` iff at least one method is referenced and none is missing.
    pub validated: bool,
    /// Referenced methods absent from the surface.
    pub missing: Vec<String>,
}

/// Aggregate validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// Size of the surface validated against.
    pub extracted_method_count: usize,
    /// Entries with `validated == true`.
    pub validated_count: usize,
    /// Entries checked.
    pub total_entries: usize,
    /// Per-entry results in dataset order.
    pub results: Vec<EntryValidation>,
}

impl ValidationReport {
    /// Iterates over entries that failed validation.
    pub fn unvalidated(&self) -> impl Iterator<Item = &EntryValidation> {
        self.results.iter().filter(|r| !r.validated)
    }

    /// Returns `true` if every entry validated.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.validated_count == self.total_entries
    }
}

/// Validates every entry of every dataset against `surface`.
///
/// Names are compared case-sensitively.
///
/// # Examples
///
/// ```
/// use glide_migrate_core::{ClientKind, CommandFamily};
/// use glide_migrate_mapping::{ApiMappingEntry, MappingDataset, validate_mappings};
/// use glide_migrate_surface::extract_method_candidates;
///
/// let dataset = MappingDataset {
///     client: ClientKind::Ioredis,
///     entries: vec![ApiMappingEntry {
///         symbol: "setex".to_string(),
///         category: CommandFamily::Strings,
///         source: None,
///         glide: "client.set(k, v, { expiry })".to_string(),
///         notes: None,
///     }],
/// };
/// let surface = extract_method_candidates("public async set(key, value) {}");
///
/// let report = validate_mappings(&[dataset], &surface);
/// assert_eq!(report.validated_count, 1);
/// assert!(report.is_clean());
/// ```
#[must_use]
pub fn validate_mappings(datasets: &[MappingDataset], surface: &BTreeSet<String>) -> ValidationReport {
    let results: Vec<EntryValidation> = datasets
        .iter()
        .flat_map(|dataset| {
            dataset.entries.iter().map(move |entry| {
                let glide_methods = extract_referenced_method_names(&entry.glide);
                let missing: Vec<String> = glide_methods
                    .iter()
                    .filter(|m| !surface.contains(m.as_str()))
                    .cloned()
                    .collect();
                EntryValidation {
                    client: dataset.client,
                    symbol: entry.symbol.clone(),
                    validated: !glide_methods.is_empty() && missing.is_empty(),
                    glide_methods,
                    missing,
                }
            })
        })
        .collect();

    let validated_count = results.iter().filter(|r| r.validated).count();
    let report = ValidationReport {
        extracted_method_count: surface.len(),
        validated_count,
        total_entries: results.len(),
        results,
    };

    tracing::info!(
        validated = report.validated_count,
        total = report.total_entries,
        surface = report.extracted_method_count,
        "validated mappings"
    );
    report
}

/// Extracts one surface from several source texts.
#[must_use]
pub fn surface_from_sources<S: AsRef<str>>(sources: &[S]) -> BTreeSet<String> {
    sources
        .iter()
        .flat_map(|text| extract_method_candidates(text.as_ref()))
        .collect()
}

/// Fetches every GLIDE source in order and extracts their combined surface.
///
/// # Errors
///
/// Returns the first fetch failure; no partial surface is produced.
pub async fn fetch_surface(fetcher: &dyn TextFetcher, urls: &[String]) -> Result<BTreeSet<String>> {
    let sources = fetch_all(fetcher, urls).await?;
    Ok(surface_from_sources(&sources))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ApiMappingEntry;
    use glide_migrate_core::{CommandFamily, StaticFetcher};

    fn dataset(client: ClientKind, entries: &[(&str, &str)]) -> MappingDataset {
        MappingDataset {
            client,
            entries: entries
                .iter()
                .map(|(symbol, glide)| ApiMappingEntry {
                    symbol: (*symbol).to_string(),
                    category: CommandFamily::General,
                    source: None,
                    glide: (*glide).to_string(),
                    notes: None,
                })
                .collect(),
        }
    }

    const SURFACE_TEXT: &str = r"
        export class BaseClient {
            public async get(key: string) { return this.send(key); }
            public async set(key: string, value: string) {}
            public async del(keys: string[]) {}
        }
    ";

    fn three_entry_datasets() -> Vec<MappingDataset> {
        vec![
            dataset(
                ClientKind::Ioredis,
                &[("get", "await client.get(k)"), ("set", "await client.set(k, v)")],
            ),
            dataset(ClientKind::NodeRedis, &[("del", "await client.del([k])")]),
        ]
    }

    #[test]
    fn test_full_coverage() {
        let surface = extract_method_candidates(SURFACE_TEXT);
        let report = validate_mappings(&three_entry_datasets(), &surface);

        assert_eq!(report.total_entries, 3);
        assert_eq!(report.validated_count, report.total_entries);
        assert!(report.results.iter().all(|r| r.missing.is_empty()));
        assert!(report.is_clean());
    }

    #[test]
    fn test_removed_method_flips_entry() {
        let without_del = SURFACE_TEXT.replace("public async del(keys: string[]) {}", "");
        let surface = extract_method_candidates(&without_del);
        let report = validate_mappings(&three_entry_datasets(), &surface);

        let del = report.results.iter().find(|r| r.symbol == "del").unwrap();
        assert!(!del.validated);
        assert_eq!(del.missing, vec!["del"]);
        assert_eq!(del.client, ClientKind::NodeRedis);
        assert_eq!(report.validated_count, 2);
        assert_eq!(report.unvalidated().count(), 1);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_entry_without_references_is_unvalidated() {
        let datasets = [dataset(ClientKind::Glide, &[("lua", "Use Script objects instead.")])];
        let report = validate_mappings(&datasets, &BTreeSet::new());
        assert!(!report.results[0].validated);
        assert!(report.results[0].missing.is_empty());
        assert!(report.results[0].glide_methods.is_empty());
    }

    #[test]
    fn test_case_sensitive_match() {
        let surface = extract_method_candidates("export function sAdd(){}");
        let datasets = [dataset(ClientKind::Ioredis, &[("sadd", "await client.sadd(k, [m])")])];
        let report = validate_mappings(&datasets, &surface);
        assert!(!report.results[0].validated);
        assert_eq!(report.results[0].missing, vec!["sadd"]);
    }

    #[test]
    fn test_partial_missing_lists_only_absent() {
        let surface = extract_method_candidates("exec(batch) set(k)");
        let datasets = [dataset(
            ClientKind::Ioredis,
            &[("multi", "client.exec(new Batch(true).set(k, v).get(k))")],
        )];
        let report = validate_mappings(&datasets, &surface);
        assert_eq!(report.results[0].glide_methods, vec!["exec", "set", "get"]);
        assert_eq!(report.results[0].missing, vec!["get"]);
    }

    #[test]
    fn test_report_serialization_shape() {
        let surface = extract_method_candidates(SURFACE_TEXT);
        let report = validate_mappings(&three_entry_datasets(), &surface);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["validatedCount"], 3);
        assert_eq!(value["totalEntries"], 3);
        assert_eq!(value["extractedMethodCount"], surface.len());
        assert_eq!(value["results"][0]["glideMethods"][0], "get");
    }

    #[tokio::test]
    async fn test_fetch_surface_combines_sources() {
        let fetcher = StaticFetcher::new()
            .with("mem://base", "public async get(key) {}")
            .with("mem://cluster", "public async scan(cursor) {}");
        let urls = vec!["mem://base".to_string(), "mem://cluster".to_string()];

        let surface = fetch_surface(&fetcher, &urls).await.unwrap();
        assert!(surface.contains("get"));
        assert!(surface.contains("scan"));
    }

    #[tokio::test]
    async fn test_fetch_surface_aborts_on_missing_source() {
        let fetcher = StaticFetcher::new().with("mem://base", "get(k)");
        let urls = vec!["mem://base".to_string(), "mem://gone".to_string()];
        let err = fetch_surface(&fetcher, &urls).await.unwrap_err();
        assert!(err.is_fetch_error());
    }
}
