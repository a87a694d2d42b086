//! Declaration parser for TypeScript `.d.ts` and `.ts` client surfaces.
//!
//! Extracts every method declared directly inside a `class` or `interface`
//! body, in document order and without deduplication, so overloads appear
//! once per declaration. A document with no container is read as a bare
//! member list, which lets callers pass a single declaration line.
//!
//! The parser is best-effort and never fails: members it cannot read are
//! skipped and an unbalanced container ends that container's scan.
//!
//! # Known blind spots
//!
//! - Regex literals inside method bodies are not recognized; a quote inside
//!   one may hide the rest of its line.
//! - Function-typed properties (`foo: (a: string) => void`) are properties,
//!   not methods, and are not reported.
//! - A `class` or `interface` keyword used as an identifier in code outside
//!   a container may start a spurious container scan.

use crate::scanner::{
    find_close, find_top_level, mask_trivia, scan_type_end, skip_member, skip_whitespace,
    split_top_level, trim_range,
};
use glide_migrate_core::{MethodSignature, Parameter};
use regex::Regex;
use std::sync::LazyLock;

static CONTAINER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:class|interface)\s+([A-Za-z_$][\w$]*)").expect("valid regex")
});

static IDENTIFIER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*$").expect("valid regex"));

/// Modifiers that may precede a constructor parameter name.
const PARAMETER_MODIFIERS: &[&str] = &["public", "private", "protected", "readonly", "override"];

/// Member names that are never methods.
const RESERVED_MEMBER_NAMES: &[&str] = &["constructor", "new"];

/// Fallback type for parameters without an annotation.
pub const UNTYPED_PARAMETER: &str = "any";

/// Parses all class and interface methods in `text`.
///
/// `declaring_file` is stored on every signature as a grouping label.
/// Signatures are returned uncategorized.
///
/// # Examples
///
/// ```
/// use glide_migrate_surface::parse_declarations;
///
/// let text = r#"
/// export class BaseClient {
///     public async xadd(key: string, entries: string[][]): Promise<string> {
///         return this.createWritePromise(key, entries);
///     }
///     public async get(key: string): Promise<string | null>;
///     private counter = 0;
/// }
/// "#;
///
/// let methods = parse_declarations(text, "BaseClient");
/// assert_eq!(methods.len(), 2);
/// assert_eq!(methods[0].name, "xadd");
/// assert_eq!(methods[0].min_arity, 2);
/// assert_eq!(methods[1].return_type_text.as_deref(), Some("string | null"));
/// ```
#[must_use]
pub fn parse_declarations(text: &str, declaring_file: &str) -> Vec<MethodSignature> {
    let masked = mask_trivia(text);
    let mut methods = Vec::new();
    let mut resume_at = 0;
    let mut containers = 0usize;

    for captures in CONTAINER_REGEX.captures_iter(&masked) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        if whole.start() < resume_at {
            continue;
        }
        let container = captures.get(1).map_or("", |m| m.as_str());

        let Some(open) = find_body_open(&masked, whole.end()) else {
            tracing::debug!(container, "no body after container header");
            continue;
        };
        let close = find_close(&masked, open, false).unwrap_or_else(|| {
            tracing::warn!(
                file = declaring_file,
                container,
                "unterminated container body; scanning to end of text"
            );
            masked.len()
        });

        containers += 1;
        let before = methods.len();
        parse_members(text, &masked, open + 1, close, declaring_file, &mut methods);
        tracing::debug!(container, methods = methods.len() - before, "parsed container");
        resume_at = close;
    }

    if containers == 0 {
        parse_members(text, &masked, 0, masked.len(), declaring_file, &mut methods);
    }

    methods
}

/// Finds the `{` that opens a container body, skipping generic parameters
/// and heritage clauses. Gives up at a top-level `;` or closing bracket.
fn find_body_open(masked: &str, from: usize) -> Option<usize> {
    let bytes = masked.as_bytes();
    let mut depth = 0usize;

    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match b {
            b'{' if depth == 0 => return Some(i),
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b'>' if bytes[i - 1] != b'=' => depth = depth.saturating_sub(1),
            b')' | b']' | b'}' => {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
            b';' if depth == 0 => return None,
            _ => {}
        }
    }
    None
}

fn parse_members(
    text: &str,
    masked: &str,
    start: usize,
    end: usize,
    declaring_file: &str,
    out: &mut Vec<MethodSignature>,
) {
    let bytes = masked.as_bytes();
    let mut pos = start;

    loop {
        pos = skip_whitespace(masked, pos, end);
        if pos >= end {
            break;
        }

        match bytes[pos] {
            b'@' => {
                pos = skip_decorator(masked, pos, end);
                continue;
            }
            b';' | b',' => {
                pos += 1;
                continue;
            }
            _ => {}
        }

        let Some(stop) = find_top_level(masked, pos, end, b"(:;={}") else {
            break;
        };

        match bytes[stop] {
            b'(' => {
                let Some(close) = find_close(masked, stop, true).filter(|&c| c < end) else {
                    tracing::warn!(
                        file = declaring_file,
                        "unbalanced parameter list; skipping rest of container"
                    );
                    break;
                };

                let (after_return, return_range) = read_return_type(masked, close + 1, end);
                let next = skip_body(masked, after_return, end);

                match member_name(&masked[pos..stop]) {
                    Some(name) => {
                        let parameters = parse_parameters(text, masked, stop + 1, close);
                        let return_type = return_range.map(|(s, e)| &text[s..e]);
                        out.push(MethodSignature::new(
                            name,
                            declaring_file,
                            parameters,
                            return_type,
                        ));
                    }
                    None => {
                        tracing::debug!(
                            header = masked[pos..stop].trim(),
                            "skipping member without a method name"
                        );
                    }
                }
                pos = next;
            }
            b'{' => {
                pos = find_close(masked, stop, false).map_or(end, |c| c + 1);
            }
            b':' | b'=' => {
                pos = skip_member(masked, stop + 1, end);
            }
            _ => {
                pos = stop + 1;
            }
        }
    }
}

/// Skips `@name`, `@a.b.c` and `@name(...)` decorators.
fn skip_decorator(masked: &str, pos: usize, end: usize) -> usize {
    let bytes = masked.as_bytes();
    let mut i = pos + 1;
    while i < end && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'_' | b'$' | b'.')) {
        i += 1;
    }
    if i < end
        && bytes[i] == b'('
        && let Some(close) = find_close(masked, i, false)
    {
        return (close + 1).min(end);
    }
    i
}

/// Reads an optional `: Type` annotation after a parameter list.
///
/// Returns the position after the annotation and its trimmed byte range.
fn read_return_type(masked: &str, from: usize, end: usize) -> (usize, Option<(usize, usize)>) {
    let pos = skip_whitespace(masked, from, end);
    if pos >= end || masked.as_bytes()[pos] != b':' {
        return (pos, None);
    }
    let type_end = scan_type_end(masked, pos + 1, end);
    let (s, e) = trim_range(masked, pos + 1, type_end);
    (type_end, (s < e).then_some((s, e)))
}

/// Skips a method body or declaration terminator.
fn skip_body(masked: &str, from: usize, end: usize) -> usize {
    let pos = skip_whitespace(masked, from, end);
    if pos >= end {
        return end;
    }
    match masked.as_bytes()[pos] {
        b'{' => find_close(masked, pos, false).map_or(end, |c| (c + 1).min(end)),
        b';' | b',' => pos + 1,
        _ => pos,
    }
}

/// Extracts the method name from a member header such as
/// `public static async foo<T>?`.
fn member_name(header: &str) -> Option<&str> {
    let mut header = header.trim();
    if let Some(lt) = header.find('<') {
        header = header[..lt].trim_end();
    }
    let header = header.trim_end_matches(['?', '!']).trim_end();
    let name = header.split_whitespace().last()?.trim_start_matches('*');

    if !IDENTIFIER_REGEX.is_match(name) || RESERVED_MEMBER_NAMES.contains(&name) {
        return None;
    }
    Some(name)
}

fn parse_parameters(text: &str, masked: &str, start: usize, end: usize) -> Vec<Parameter> {
    split_top_level(masked, start, end, b',')
        .into_iter()
        .filter_map(|(s, e)| parse_parameter(text, masked, s, e))
        .collect()
}

fn parse_parameter(text: &str, masked: &str, start: usize, end: usize) -> Option<Parameter> {
    let (mut s, e) = trim_range(masked, start, end);
    if s >= e {
        return None;
    }

    while let Some(modifier) = PARAMETER_MODIFIERS.iter().find(|m| {
        masked[s..e]
            .strip_prefix(**m)
            .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_whitespace()))
    }) {
        s = skip_whitespace(masked, s + modifier.len(), e);
    }

    let rest = masked[s..e].starts_with("...");
    if rest {
        s = skip_whitespace(masked, s + 3, e);
    }

    let default_at = find_top_level(masked, s, e, b"=");
    let declaration_end = default_at.unwrap_or(e);
    let colon = find_top_level(masked, s, declaration_end, b":");

    let (name_start, name_end) = trim_range(masked, s, colon.unwrap_or(declaration_end));
    let mut name = &text[name_start..name_end];
    let mut optional = default_at.is_some();
    if let Some(stripped) = name.strip_suffix('?') {
        name = stripped.trim_end();
        optional = true;
    }

    // `this` annotates the receiver and takes no argument position.
    if name.is_empty() || name == "this" {
        return None;
    }

    let type_text = colon
        .map(|c| {
            let (ts, te) = trim_range(masked, c + 1, declaration_end);
            text[ts..te].to_string()
        })
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTYPED_PARAMETER.to_string());

    Some(Parameter {
        name: name.to_string(),
        optional,
        rest,
        type_text,
    })
}
