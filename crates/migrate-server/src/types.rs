//! Parameter and result types for the migration tools.
//!
//! Parameters derive [`JsonSchema`] so the tool router can publish an input
//! schema for each tool. Results are returned as structured content.

use glide_migrate_core::{ClientKind, CommandFamily, MethodSignature};
use glide_migrate_ingest::CommandEntry;
use glide_migrate_mapping::{ApiMappingEntry, ValidationArtifacts, ValidationReport};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ============================================================================
// parse_declarations
// ============================================================================

/// Parameters for parsing declarations.
///
/// # Examples
///
/// ```
/// use glide_migrate_server::types::ParseDeclarationsParams;
///
/// let params: ParseDeclarationsParams = serde_json::from_value(serde_json::json!({
///     "text": "interface C { get(key: string): Promise<string>; }"
/// }))
/// .unwrap();
/// assert!(params.url.is_none());
/// ```
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ParseDeclarationsParams {
    /// Declaration text to parse. Takes precedence over `url` and `client`.
    pub text: Option<String>,

    /// URL of declaration text to fetch when no text is given
    pub url: Option<String>,

    /// Client whose configured declaration URL is fetched ("ioredis", "node-redis" or "glide")
    pub client: Option<String>,

    /// Name recorded as the declaring file of every method (default: "input")
    pub declaring_file: Option<String>,
}

/// Parsed declarations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDeclarationsResult {
    /// Declaring file recorded on the methods
    pub declaring_file: String,

    /// Number of parsed methods
    pub method_count: usize,

    /// Categorized signatures in declaration order
    pub methods: Vec<MethodSignature>,
}

// ============================================================================
// categorize_methods
// ============================================================================

/// Parameters for categorizing method names.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CategorizeMethodsParams {
    /// Method names to categorize
    pub names: Vec<String>,
}

/// Category of one method name.
#[derive(Debug, Clone, Serialize)]
pub struct MethodCategory {
    /// Method name as given
    pub name: String,

    /// Assigned family
    pub category: CommandFamily,
}

/// Categorization result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizeMethodsResult {
    /// One category per input name, in input order
    pub categories: Vec<MethodCategory>,

    /// Input names grouped by family, in taxonomy order
    pub by_family: BTreeMap<CommandFamily, Vec<String>>,
}

// ============================================================================
// find_equivalent
// ============================================================================

/// Parameters for looking up a GLIDE equivalent.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FindEquivalentParams {
    /// Client the symbol belongs to ("ioredis", "node-redis" or "glide")
    pub client: String,

    /// Exact symbol to look up
    pub symbol: String,
}

/// Equivalents of one symbol.
#[derive(Debug, Clone, Serialize)]
pub struct FindEquivalentResult {
    /// Client searched
    pub client: ClientKind,

    /// Symbol searched
    pub symbol: String,

    /// Whether any entry matched
    pub found: bool,

    /// Matching mapping entries in dataset order
    pub entries: Vec<ApiMappingEntry>,
}

// ============================================================================
// diff_symbol
// ============================================================================

/// Parameters for diffing a source symbol against GLIDE.
///
/// Inline texts take precedence over URLs, and URLs over the configured
/// declaration sources.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DiffSymbolParams {
    /// Source client ("ioredis" or "node-redis")
    pub client: String,

    /// Symbol to diff
    pub symbol: String,

    /// Source client declaration text
    pub source_text: Option<String>,

    /// Source client declaration URL
    pub source_url: Option<String>,

    /// GLIDE declaration text
    pub glide_text: Option<String>,

    /// GLIDE declaration URL
    pub glide_url: Option<String>,
}

// ============================================================================
// validate_mappings
// ============================================================================

/// Parameters for validating the built-in mappings against the GLIDE surface.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ValidateMappingsParams {
    /// GLIDE source texts. When absent, the configured GLIDE sources are fetched.
    pub source_texts: Option<Vec<String>>,

    /// Write JSON and Markdown artifacts (default: true)
    pub write_artifacts: Option<bool>,

    /// Artifact directory (default: configured output directory)
    pub output_dir: Option<PathBuf>,
}

/// Validation result.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateMappingsResult {
    /// Per-entry validation report
    pub report: ValidationReport,

    /// Paths of the written artifacts, absent when writing was disabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<ValidationArtifacts>,
}

// ============================================================================
// ingest_commands
// ============================================================================

/// Parameters for ingesting one slice of the command list.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct IngestCommandsParams {
    /// Index of the first command in the sorted list (default: 0)
    pub start: Option<usize>,

    /// Commands to process, at most 50 (default: 25)
    pub count: Option<usize>,

    /// Discard the stored catalog before merging
    #[serde(default)]
    pub refresh: bool,

    /// Documentation text. When absent, the configured command page is fetched.
    pub doc_text: Option<String>,

    /// GLIDE source texts. When absent, the configured GLIDE sources are fetched.
    pub source_texts: Option<Vec<String>>,
}

// ============================================================================
// get_command_catalog
// ============================================================================

/// Parameters for reading the stored command catalog.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetCommandCatalogParams {
    /// Only return entries of this family
    pub family: Option<String>,

    /// Only return entries with a matched GLIDE method
    #[serde(default)]
    pub validated_only: bool,
}

/// View over the stored command catalog.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandCatalogView {
    /// Entries in the whole catalog
    pub total_entries: usize,

    /// Entries in the whole catalog with a matched method
    pub validated_count: usize,

    /// Entry count per family in the whole catalog
    pub families: BTreeMap<String, usize>,

    /// Entries passing the filters, in command order
    pub entries: Vec<CommandEntry>,
}
