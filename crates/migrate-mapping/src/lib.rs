//! Mapping datasets, diffing and surface validation for GLIDE migration.
//!
//! # Architecture
//!
//! - `dataset` - Embedded per-client mapping tables and exact symbol lookup
//! - `diff` - Arity and type comparison of a source symbol against its GLIDE equivalents
//! - `validate` - Drift detection of mapping entries against a fetched GLIDE surface
//! - `artifacts` - JSON and Markdown validation artifacts
//!
//! # Examples
//!
//! ```
//! use glide_migrate_mapping::{MappingCatalog, validate_mappings};
//! use glide_migrate_surface::extract_method_candidates;
//!
//! let catalog = MappingCatalog::load_builtin()?;
//! let surface = extract_method_candidates("get(key) set(key, value)");
//!
//! let report = validate_mappings(catalog.datasets(), &surface);
//! assert_eq!(report.total_entries, catalog.total_entries());
//! assert!(report.unvalidated().any(|r| r.symbol == "xadd"));
//! # Ok::<(), glide_migrate_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod dataset;
mod diff;
mod validate;

pub mod artifacts;

pub use artifacts::{ValidationArtifacts, render_summary, write_validation_artifacts};
pub use dataset::{ApiMappingEntry, MappingCatalog, MappingDataset};
pub use diff::{
    DiffReport, EquivalentCandidate, MethodComparison, SignatureIndex, TypeDelta,
    compare_signatures, diff_symbol,
};
pub use validate::{
    EntryValidation, ValidationReport, fetch_surface, surface_from_sources, validate_mappings,
};
