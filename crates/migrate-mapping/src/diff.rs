//! Diff/equivalence engine.
//!
//! For a source-client symbol, every mapped GLIDE call text is scanned for
//! the GLIDE methods it references, and each referenced method's declared
//! arity is compared with the source symbol's declared arity. A reported
//! mismatch means the parameter counts cannot line up. The absence of a
//! mismatch says nothing about semantic equivalence.

use crate::dataset::MappingCatalog;
use glide_migrate_core::{ArityRange, ClientKind, MethodSignature};
use glide_migrate_surface::extract_referenced_method_names;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parsed signatures grouped by method name, overloads in document order.
#[derive(Debug, Clone, Default)]
pub struct SignatureIndex {
    by_name: BTreeMap<String, Vec<MethodSignature>>,
}

impl SignatureIndex {
    /// Indexes `methods` by name.
    #[must_use]
    pub fn new(methods: impl IntoIterator<Item = MethodSignature>) -> Self {
        let mut by_name: BTreeMap<String, Vec<MethodSignature>> = BTreeMap::new();
        for method in methods {
            by_name.entry(method.name.clone()).or_default().push(method);
        }
        Self { by_name }
    }

    /// Returns every overload of `name`; empty if unknown.
    #[must_use]
    pub fn get(&self, name: &str) -> &[MethodSignature] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns `true` if `name` has at least one signature.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of distinct method names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns `true` if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Position whose declared parameter types differ.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDelta {
    /// Zero-based parameter position.
    pub position: usize,
    /// Source parameter type text.
    pub source_type: String,
    /// GLIDE parameter type text.
    pub target_type: String,
}

/// Comparison of one referenced GLIDE method against the source symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodComparison {
    /// Referenced GLIDE method name.
    pub method: String,
    /// Whether GLIDE declarations contain this method.
    pub found: bool,
    /// Arity of each GLIDE overload.
    pub target_arity: Vec<ArityRange>,
    /// `true` if no source overload's arity range overlaps any GLIDE
    /// overload's range. Only reported when both sides have signatures.
    pub arity_mismatch: bool,
    /// GLIDE minimum arity minus source minimum arity, first overloads.
    pub min_arity_delta: Option<i64>,
    /// Parameter positions whose type text differs, first overloads.
    pub type_deltas: Vec<TypeDelta>,
}

/// One mapped GLIDE equivalent of the source symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquivalentCandidate {
    /// Call text from the mapping entry.
    pub glide_text: String,
    /// GLIDE methods the call text references, first-seen order.
    pub referenced_methods: Vec<String>,
    /// Per-method comparisons.
    pub comparisons: Vec<MethodComparison>,
}

impl EquivalentCandidate {
    /// Returns `true` if any referenced method has an arity mismatch.
    #[must_use]
    pub fn has_mismatch(&self) -> bool {
        self.comparisons.iter().any(|c| c.arity_mismatch)
    }
}

/// Result of diffing one source symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffReport {
    /// Source client.
    pub client: ClientKind,
    /// Looked-up symbol.
    pub symbol: String,
    /// Whether the dataset has a mapping for the symbol.
    pub known: bool,
    /// First declared overload of the symbol in the source declarations.
    pub source_signature: Option<MethodSignature>,
    /// Arity of every source overload.
    pub source_arity: Vec<ArityRange>,
    /// One entry per mapped equivalent.
    pub candidates: Vec<EquivalentCandidate>,
}

impl DiffReport {
    /// Returns `true` if any candidate reports an arity mismatch.
    #[must_use]
    pub fn has_mismatch(&self) -> bool {
        self.candidates.iter().any(EquivalentCandidate::has_mismatch)
    }
}

/// Diffs `symbol` of `client` against the GLIDE declarations in `target`.
///
/// `source` holds the source client's parsed declarations. A symbol missing
/// from `source` still gets its equivalents and referenced methods, just
/// without arity comparisons.
///
/// # Examples
///
/// ```
/// use glide_migrate_core::ClientKind;
/// use glide_migrate_mapping::{MappingCatalog, SignatureIndex, diff_symbol};
/// use glide_migrate_surface::parse_declarations;
///
/// let catalog = MappingCatalog::load_builtin()?;
/// let source = SignatureIndex::new(parse_declarations(
///     "interface RedisCommander { del(...keys: string[]): Result<number>; }",
///     "RedisCommander",
/// ));
/// let target = SignatureIndex::new(parse_declarations(
///     "class BaseClient { public async del(keys: string[]): Promise<number> {} }",
///     "BaseClient",
/// ));
///
/// let report = diff_symbol(&catalog, ClientKind::Ioredis, "del", &source, &target);
/// assert!(report.known);
/// assert_eq!(report.candidates[0].referenced_methods, vec!["del"]);
/// assert!(!report.has_mismatch());
/// # Ok::<(), glide_migrate_core::Error>(())
/// ```
#[must_use]
pub fn diff_symbol(
    catalog: &MappingCatalog,
    client: ClientKind,
    symbol: &str,
    source: &SignatureIndex,
    target: &SignatureIndex,
) -> DiffReport {
    let entries = catalog.find_equivalent(client, symbol);
    let source_overloads = source.get(symbol);

    let candidates = entries
        .iter()
        .map(|entry| {
            let referenced_methods = extract_referenced_method_names(&entry.glide);
            let comparisons = referenced_methods
                .iter()
                .map(|method| compare_signatures(method, source_overloads, target.get(method)))
                .collect();
            EquivalentCandidate {
                glide_text: entry.glide.clone(),
                referenced_methods,
                comparisons,
            }
        })
        .collect();

    let report = DiffReport {
        client,
        symbol: symbol.to_string(),
        known: !entries.is_empty(),
        source_signature: source_overloads.first().cloned(),
        source_arity: source_overloads.iter().map(MethodSignature::arity).collect(),
        candidates,
    };

    tracing::debug!(
        %client,
        symbol,
        known = report.known,
        mismatch = report.has_mismatch(),
        "diffed symbol"
    );
    report
}

/// Compares source overloads against the overloads of one GLIDE method.
#[must_use]
pub fn compare_signatures(
    method: &str,
    source: &[MethodSignature],
    target: &[MethodSignature],
) -> MethodComparison {
    let target_arity: Vec<ArityRange> = target.iter().map(MethodSignature::arity).collect();

    let arity_mismatch = !source.is_empty()
        && !target.is_empty()
        && !source
            .iter()
            .any(|s| target_arity.iter().any(|t| s.arity().overlaps(t)));

    let (min_arity_delta, type_deltas) = match (source.first(), target.first()) {
        (Some(s), Some(t)) => (Some(signed(t.min_arity) - signed(s.min_arity)), type_deltas(s, t)),
        _ => (None, Vec::new()),
    };

    MethodComparison {
        method: method.to_string(),
        found: !target.is_empty(),
        target_arity,
        arity_mismatch,
        min_arity_delta,
        type_deltas,
    }
}

fn type_deltas(source: &MethodSignature, target: &MethodSignature) -> Vec<TypeDelta> {
    source
        .parameters
        .iter()
        .zip(&target.parameters)
        .enumerate()
        .filter(|(_, (s, t))| s.type_text != t.type_text)
        .map(|(position, (s, t))| TypeDelta {
            position,
            source_type: s.type_text.clone(),
            target_type: t.type_text.clone(),
        })
        .collect()
}

fn signed(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
