//! MCP server library for GLIDE migration analysis.
//!
//! Exposes the declaration parser, categorizer, mapping lookups, diffing,
//! surface validation and command ingestion as MCP tools over stdio.
//!
//! # Architecture
//!
//! The server implements seven tools:
//!
//! 1. **`parse_declarations`** - Parse declaration text into method signatures
//! 2. **`categorize_methods`** - Assign command families to method names
//! 3. **`find_equivalent`** - Look up the curated GLIDE equivalent of a symbol
//! 4. **`diff_symbol`** - Compare a symbol's arity and types against GLIDE
//! 5. **`validate_mappings`** - Detect mapping drift against the GLIDE surface
//! 6. **`ingest_commands`** - Merge one slice of the command list into the catalog
//! 7. **`get_command_catalog`** - Read the stored command catalog
//!
//! # Errors
//!
//! Bad arguments produce a result flagged as an error with an
//! `{ "error": ... }` payload. Fetch and I/O failures are protocol errors.
//!
//! # Examples
//!
//! ```no_run
//! use glide_migrate_core::MigrationConfig;
//! use glide_migrate_server::MigrationService;
//! use rmcp::ServiceExt;
//! use rmcp::transport::stdio;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = MigrationConfig::load(None)?;
//! let service = MigrationService::new(config)?.serve(stdio()).await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod service;
pub mod types;

pub use error::{ToolError, respond};
pub use service::MigrationService;
pub use types::{
    CategorizeMethodsParams, CategorizeMethodsResult, CommandCatalogView, DiffSymbolParams,
    FindEquivalentParams, FindEquivalentResult, GetCommandCatalogParams, IngestCommandsParams,
    MethodCategory, ParseDeclarationsParams, ParseDeclarationsResult, ValidateMappingsParams,
    ValidateMappingsResult,
};
