//! Call-shape surface extraction.
//!
//! Finds lower-camel-case identifiers immediately followed by `(` in raw
//! text. This is a regex heuristic over arbitrary source snapshots: it
//! never parses and never fails, and control-flow or declaration keywords
//! that share the call shape are discarded via [`EXCLUDED_KEYWORDS`].
//!
//! Matching is case-sensitive throughout. A surface declaring `sAdd` does
//! not satisfy a reference to `sadd`.

use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

static CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-z][A-Za-z0-9]*)\(").expect("valid regex"));

/// Keywords that look like calls (`if(`, `function(`) and are never methods.
pub const EXCLUDED_KEYWORDS: &[&str] = &[
    "if",
    "for",
    "while",
    "switch",
    "catch",
    "function",
    "return",
    "typeof",
    "instanceof",
    "new",
    "await",
    "async",
    "super",
    "constructor",
    "class",
    "interface",
    "import",
    "export",
    "const",
    "let",
    "var",
    "do",
    "else",
    "try",
    "throw",
    "yield",
    "delete",
    "void",
    "of",
    "in",
    "with",
];

fn call_names(text: &str) -> impl Iterator<Item = &str> {
    CALL_REGEX
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str())
        .filter(|name| !EXCLUDED_KEYWORDS.contains(name))
}

/// Extracts the set of method names observable in `text`.
///
/// # Examples
///
/// ```
/// use glide_migrate_surface::extract_method_candidates;
///
/// let surface = extract_method_candidates("export function sAdd(){} if (x) { get(k); }");
/// assert!(surface.contains("sAdd"));
/// assert!(surface.contains("get"));
/// assert!(!surface.contains("sadd"));
/// assert!(!surface.contains("function"));
/// ```
#[must_use]
pub fn extract_method_candidates(text: &str) -> BTreeSet<String> {
    let surface: BTreeSet<String> = call_names(text).map(str::to_string).collect();
    tracing::debug!(candidates = surface.len(), "extracted method candidates");
    surface
}

/// Extracts the method names a call-text snippet references, in first-seen
/// order without duplicates.
///
/// # Examples
///
/// ```
/// use glide_migrate_surface::extract_referenced_method_names;
///
/// let names = extract_referenced_method_names(
///     "await client.set(key, value); await client.expire(key, 10); client.set(a, b)",
/// );
/// assert_eq!(names, vec!["set", "expire"]);
/// ```
#[must_use]
pub fn extract_referenced_method_names(call_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    call_names(call_text)
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}
