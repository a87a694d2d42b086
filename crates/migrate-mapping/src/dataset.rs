//! Curated mapping datasets.
//!
//! One dataset per client: the two source clients map their symbols to
//! GLIDE call text, and the GLIDE dataset records reference usage of the
//! target surface itself. The built-in datasets are embedded YAML files.
//!
//! # Examples
//!
//! ```
//! use glide_migrate_core::ClientKind;
//! use glide_migrate_mapping::MappingCatalog;
//!
//! let catalog = MappingCatalog::load_builtin()?;
//!
//! let hits = catalog.find_equivalent(ClientKind::Ioredis, "hmset");
//! assert_eq!(hits.len(), 1);
//! assert!(hits[0].glide.contains("hset("));
//!
//! // Lookup is case-sensitive and a miss is not an error.
//! assert!(catalog.find_equivalent(ClientKind::Ioredis, "HMSET").is_empty());
//! # Ok::<(), glide_migrate_core::Error>(())
//! ```

use glide_migrate_core::{ClientKind, CommandFamily, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const IOREDIS_YAML: &str = include_str!("../data/ioredis.yaml");
const NODE_REDIS_YAML: &str = include_str!("../data/node_redis.yaml");
const GLIDE_YAML: &str = include_str!("../data/glide.yaml");

/// One curated mapping row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMappingEntry {
    /// Lookup key, unique within its dataset.
    pub symbol: String,
    /// Taxonomy label.
    pub category: CommandFamily,
    /// Usage in the source client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Equivalent GLIDE call text.
    pub glide: String,
    /// Behavioural differences worth knowing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// All mapping entries for one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDataset {
    /// Client whose symbols this dataset is keyed by.
    pub client: ClientKind,
    /// Entries in curation order.
    pub entries: Vec<ApiMappingEntry>,
}

impl MappingDataset {
    /// Parses and validates a dataset from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] for malformed YAML and
    /// [`Error::ValidationError`] if [`validate`](Self::validate) fails.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let dataset: Self = serde_yaml::from_str(text).map_err(|e| Error::SerializationError {
            message: format!("Failed to parse mapping dataset: {e}"),
            source: None,
        })?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Checks that every symbol is non-empty and unique, and that every
    /// entry carries GLIDE call text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] naming the offending symbol.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.symbol.trim().is_empty() {
                return Err(Error::ValidationError {
                    field: "symbol".to_string(),
                    reason: format!("empty symbol in {} dataset", self.client),
                });
            }
            if entry.glide.trim().is_empty() {
                return Err(Error::ValidationError {
                    field: "glide".to_string(),
                    reason: format!("{} has no GLIDE call text", entry.symbol),
                });
            }
            if !seen.insert(entry.symbol.as_str()) {
                return Err(Error::ValidationError {
                    field: "symbol".to_string(),
                    reason: format!(
                        "duplicate symbol '{}' in {} dataset",
                        entry.symbol, self.client
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns entries whose symbol equals `symbol` exactly.
    pub fn lookup<'a, 's>(
        &'a self,
        symbol: &'s str,
    ) -> impl Iterator<Item = &'a ApiMappingEntry> + use<'a, 's> {
        self.entries.iter().filter(move |e| e.symbol == symbol)
    }
}

/// Immutable set of datasets, at most one per client.
#[derive(Debug, Clone)]
pub struct MappingCatalog {
    datasets: Vec<MappingDataset>,
}

impl MappingCatalog {
    /// Loads the embedded ioredis, node-redis and GLIDE datasets.
    ///
    /// # Errors
    ///
    /// Returns an error if an embedded dataset fails to parse or validate.
    pub fn load_builtin() -> Result<Self> {
        let catalog = Self::from_datasets(vec![
            MappingDataset::from_yaml_str(IOREDIS_YAML)?,
            MappingDataset::from_yaml_str(NODE_REDIS_YAML)?,
            MappingDataset::from_yaml_str(GLIDE_YAML)?,
        ])?;
        tracing::debug!(entries = catalog.total_entries(), "loaded built-in mappings");
        Ok(catalog)
    }

    /// Builds a catalog from explicit datasets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if two datasets share a client or
    /// a dataset is invalid.
    pub fn from_datasets(datasets: Vec<MappingDataset>) -> Result<Self> {
        let mut clients = HashSet::new();
        for dataset in &datasets {
            dataset.validate()?;
            if !clients.insert(dataset.client) {
                return Err(Error::ValidationError {
                    field: "client".to_string(),
                    reason: format!("more than one dataset for {}", dataset.client),
                });
            }
        }
        Ok(Self { datasets })
    }

    /// Returns all datasets in load order.
    #[must_use]
    pub fn datasets(&self) -> &[MappingDataset] {
        &self.datasets
    }

    /// Returns the dataset for `client`, if loaded.
    #[must_use]
    pub fn dataset(&self, client: ClientKind) -> Option<&MappingDataset> {
        self.datasets.iter().find(|d| d.client == client)
    }

    /// Returns the entries for `symbol` in the `client` dataset.
    ///
    /// Matching is exact and case-sensitive. An empty result means no known
    /// mapping.
    #[must_use]
    pub fn find_equivalent(&self, client: ClientKind, symbol: &str) -> Vec<&ApiMappingEntry> {
        self.dataset(client)
            .map(|d| d.lookup(symbol).collect())
            .unwrap_or_default()
    }

    /// Total number of entries across all datasets.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.datasets.iter().map(|d| d.entries.len()).sum()
    }
}
