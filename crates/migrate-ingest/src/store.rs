//! Catalog persistence.
//!
//! [`FileCatalogStore`] keeps two files in its directory:
//!
//! - [`CATALOG_FILE`]: `{ "entries": [...] }` sorted by command
//! - [`FAMILY_FILE`]: `{ "<family>": [...] }` regenerated from the catalog
//!
//! A missing catalog file loads as an empty catalog. A present but
//! unreadable one is an error, so a corrupt file is never silently replaced
//! by a partial catalog.

use crate::catalog::{Catalog, CatalogFile};
use glide_migrate_core::fs::{read_optional, write_atomic_all};
use glide_migrate_core::{Error, Result};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Catalog file name.
pub const CATALOG_FILE: &str = "commands.json";

/// Family grouping file name.
pub const FAMILY_FILE: &str = "commands-by-family.json";

/// Loads and saves the command catalog.
pub trait CatalogStore: Send + Sync + Debug {
    /// Loads the persisted catalog, empty if none exists.
    ///
    /// # Errors
    ///
    /// Returns an error if a persisted catalog exists but cannot be read.
    fn load(&self) -> Result<Catalog>;

    /// Replaces the persisted catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be written.
    fn save(&self, catalog: &Catalog) -> Result<()>;
}

/// Filesystem-backed catalog store.
#[derive(Debug, Clone)]
pub struct FileCatalogStore {
    dir: PathBuf,
}

impl FileCatalogStore {
    /// Creates a store rooted at `dir`. Nothing is touched until the first
    /// save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of [`CATALOG_FILE`].
    #[must_use]
    pub fn catalog_path(&self) -> PathBuf {
        self.dir.join(CATALOG_FILE)
    }

    /// Path of [`FAMILY_FILE`].
    #[must_use]
    pub fn family_path(&self) -> PathBuf {
        self.dir.join(FAMILY_FILE)
    }
}

impl CatalogStore for FileCatalogStore {
    fn load(&self) -> Result<Catalog> {
        let path = self.catalog_path();
        let Some(text) = read_optional(&path)? else {
            tracing::debug!(path = %path.display(), "no persisted catalog");
            return Ok(Catalog::new());
        };

        let file: CatalogFile = serde_json::from_str(&text).map_err(|e| Error::SerializationError {
            message: format!("Corrupt catalog at {}: {e}", path.display()),
            source: Some(e),
        })?;
        Ok(file.into())
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        let catalog_json = serde_json::to_string_pretty(&catalog.to_file())? + "\n";
        let family_json = serde_json::to_string_pretty(&catalog.by_family())? + "\n";

        let catalog_path = self.catalog_path();
        let family_path = self.family_path();
        write_atomic_all(&[
            (catalog_path.as_path(), catalog_json.as_str()),
            (family_path.as_path(), family_json.as_str()),
        ])?;

        tracing::info!(
            dir = %self.dir.display(),
            entries = catalog.len(),
            "saved command catalog"
        );
        Ok(())
    }
}

/// In-memory catalog store.
///
/// This is the test double for the [`CatalogStore`] seam, public so the
/// server crate can run ingestion tests without touching disk. Nothing is
/// persisted across instances.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    catalog: Mutex<Catalog>,
}

impl MemoryCatalogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn load(&self) -> Result<Catalog> {
        let guard = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, catalog: &Catalog) -> Result<()> {
        let mut guard = self.catalog.lock().unwrap_or_else(PoisonError::into_inner);
        guard.clone_from(catalog);
        Ok(())
    }
}
