//! Command catalog ingestion for GLIDE migration.
//!
//! Builds a catalog of Valkey commands from documentation text, records
//! which GLIDE method implements each one, and persists it incrementally in
//! small slices.
//!
//! # Architecture
//!
//! - `commands` - Token and method extraction, command to method mapping, family table
//! - `catalog` - Pure merge keyed by command
//! - `store` - Load/save seam with file and in-memory stores
//! - `pipeline` - Paginated ingestion runs
//!
//! # Examples
//!
//! ```
//! use glide_migrate_ingest::{IngestRequest, MemoryCatalogStore, ingest};
//!
//! let store = MemoryCatalogStore::new();
//! let outcome = ingest(
//!     "<code>GET</code> <code>XGROUP CREATE</code>",
//!     &["public async get(key: GlideString): Promise<GlideString | null> {"],
//!     &IngestRequest::default(),
//!     &store,
//! )?;
//! assert_eq!(outcome.processed, 2);
//! assert_eq!(outcome.validated, 1);
//! assert_eq!(outcome.next_start, None);
//! # Ok::<(), glide_migrate_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod catalog;
mod commands;
mod pipeline;
mod store;

pub use catalog::{Catalog, CatalogFile};
pub use commands::{
    CommandEntry, FALLBACK_FAMILY, FAMILY_PREFIXES, MAX_COMMAND_TOKEN_LEN, METHOD_EXCEPTIONS,
    SourceMethod, build_entry, command_family, extract_command_tokens, extract_public_methods,
    method_key, normalize_command, resolve_family_filter,
};
pub use pipeline::{
    DEFAULT_BATCH_SIZE, IngestOutcome, IngestRequest, MAX_BATCH_SIZE, ingest, ingest_remote,
};
pub use store::{CATALOG_FILE, CatalogStore, FAMILY_FILE, FileCatalogStore, MemoryCatalogStore};
