//! Parsed method signatures.
//!
//! A [`MethodSignature`] is built fresh by every parse and is never
//! persisted by the core. Arity is derived from the parameter list when the
//! signature is constructed, so `min_arity <= parameters.len()` always holds
//! and `max_arity` is `None` exactly when the last parameter is a rest
//! parameter.

use crate::CommandFamily;
use serde::{Deserialize, Serialize};

/// One positional parameter of a parsed method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// Parameter name as written (destructuring patterns are kept verbatim)
    pub name: String,
    /// Marked with `?` or given a default value
    pub optional: bool,
    /// Variadic `...name` parameter
    pub rest: bool,
    /// Verbatim type annotation, `"any"` when none was written
    pub type_text: String,
}

impl Parameter {
    /// Creates a required parameter with the given type.
    #[must_use]
    pub fn required(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            optional: false,
            rest: false,
            type_text: type_text.into(),
        }
    }

    /// Returns `true` if a caller must supply this parameter.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        !self.optional && !self.rest
    }
}

/// Inclusive positional-argument range. `max == None` means unbounded.
///
/// # Examples
///
/// ```
/// use glide_migrate_core::ArityRange;
///
/// let exact = ArityRange { min: 2, max: Some(2) };
/// let variadic = ArityRange { min: 1, max: None };
/// assert!(exact.overlaps(&variadic));
/// assert!(!exact.overlaps(&ArityRange { min: 3, max: Some(4) }));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArityRange {
    /// Minimum number of arguments
    pub min: usize,
    /// Maximum number of arguments, `None` for unbounded
    pub max: Option<usize>,
}

impl ArityRange {
    /// Returns `true` if some argument count satisfies both ranges.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let low = self.min.max(other.min);
        match (self.max, other.max) {
            (None, None) => true,
            (Some(a), None) | (None, Some(a)) => low <= a,
            (Some(a), Some(b)) => low <= a.min(b),
        }
    }
}

/// One method parsed from declaration text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    /// Method identifier
    pub name: String,
    /// Logical grouping the method came from (declaration file or class label)
    pub declaring_file: String,
    /// Ordered parameters
    pub parameters: Vec<Parameter>,
    /// Count of parameters that are neither optional nor rest
    pub min_arity: usize,
    /// Parameter count, `None` when a rest parameter makes it unbounded
    pub max_arity: Option<usize>,
    /// Return type text with one outer `Promise<...>` removed
    pub return_type_text: Option<String>,
    /// The declared return type is promise-wrapped
    pub is_async: bool,
    /// Family assigned by the categorizer, `None` until categorized
    pub category: Option<CommandFamily>,
}

impl MethodSignature {
    /// Builds a signature and derives its arity from `parameters`.
    ///
    /// A rest marker on any parameter other than the last is demoted to
    /// `optional`, which keeps the trailing-rest invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use glide_migrate_core::{MethodSignature, Parameter};
    ///
    /// let sig = MethodSignature::new(
    ///     "xadd",
    ///     "BaseClient",
    ///     vec![
    ///         Parameter::required("key", "string"),
    ///         Parameter::required("entries", "string[][]"),
    ///     ],
    ///     Some("Promise<string>"),
    /// );
    /// assert_eq!(sig.min_arity, 2);
    /// assert_eq!(sig.max_arity, Some(2));
    /// assert!(sig.is_async);
    /// assert_eq!(sig.return_type_text.as_deref(), Some("string"));
    /// ```
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        declaring_file: impl Into<String>,
        mut parameters: Vec<Parameter>,
        raw_return_type: Option<&str>,
    ) -> Self {
        let last = parameters.len().saturating_sub(1);
        for (index, param) in parameters.iter_mut().enumerate() {
            if param.rest && index != last {
                param.rest = false;
                param.optional = true;
            }
        }

        let min_arity = parameters.iter().filter(|p| p.is_required()).count();
        let max_arity = if parameters.last().is_some_and(|p| p.rest) {
            None
        } else {
            Some(parameters.len())
        };

        let raw_return_type = raw_return_type.map(str::trim).filter(|t| !t.is_empty());
        let is_async = raw_return_type.is_some_and(|t| t.contains(PROMISE_MARKER));
        let return_type_text = raw_return_type.map(|t| unwrap_promise(t).to_string());

        Self {
            name: name.into(),
            declaring_file: declaring_file.into(),
            parameters,
            min_arity,
            max_arity,
            return_type_text,
            is_async,
            category: None,
        }
    }

    /// Returns the arity as a range.
    #[must_use]
    pub const fn arity(&self) -> ArityRange {
        ArityRange {
            min: self.min_arity,
            max: self.max_arity,
        }
    }

    /// Returns `true` if the last parameter is variadic.
    #[must_use]
    pub fn has_rest(&self) -> bool {
        self.max_arity.is_none()
    }
}

/// Deferred-value type marker.
pub const PROMISE_MARKER: &str = "Promise<";

/// Strips one outer `Promise<...>` wrapper, if the whole text is wrapped.
///
/// # Examples
///
/// ```
/// use glide_migrate_core::signature::unwrap_promise;
///
/// assert_eq!(unwrap_promise("Promise<string>"), "string");
/// assert_eq!(unwrap_promise("Promise<Record<string, number>>"), "Record<string, number>");
/// assert_eq!(unwrap_promise("Promise<A> | B"), "Promise<A> | B");
/// assert_eq!(unwrap_promise("number"), "number");
/// ```
#[must_use]
pub fn unwrap_promise(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed
        .strip_prefix(PROMISE_MARKER)
        .and_then(|rest| rest.strip_suffix('>'))
    else {
        return trimmed;
    };

    // `Promise<A> | Promise<B>` also starts and ends right; only unwrap when
    // the opening bracket closes at the very end.
    let mut depth = 0usize;
    for ch in inner.chars() {
        match ch {
            '<' => depth += 1,
            '>' => {
                if depth == 0 {
                    return trimmed;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    inner.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn optional(name: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            optional: true,
            rest: false,
            type_text: "any".to_string(),
        }
    }

    fn rest(name: &str) -> Parameter {
        Parameter {
            name: name.to_string(),
            optional: false,
            rest: true,
            type_text: "string[]".to_string(),
        }
    }

    #[test]
    fn test_arity_with_optional_and_rest() {
        let sig = MethodSignature::new(
            "del",
            "Commander",
            vec![Parameter::required("key", "string"), optional("opts"), rest("keys")],
            Some("Promise<number>"),
        );
        assert_eq!(sig.min_arity, 1);
        assert_eq!(sig.max_arity, None);
        assert!(sig.has_rest());
    }

    #[test]
    fn test_non_trailing_rest_is_demoted() {
        let sig = MethodSignature::new(
            "odd",
            "Commander",
            vec![rest("first"), Parameter::required("last", "number")],
            None,
        );
        assert!(!sig.parameters[0].rest);
        assert!(sig.parameters[0].optional);
        assert_eq!(sig.max_arity, Some(2));
        assert_eq!(sig.min_arity, 1);
    }

    #[test]
    fn test_non_promise_return_is_sync() {
        let sig = MethodSignature::new("close", "BaseClient", vec![], Some("void"));
        assert!(!sig.is_async);
        assert_eq!(sig.return_type_text.as_deref(), Some("void"));
        assert_eq!(sig.max_arity, Some(0));
    }

    #[test]
    fn test_missing_return_type() {
        let sig = MethodSignature::new("ping", "BaseClient", vec![], Some("   "));
        assert!(sig.return_type_text.is_none());
        assert!(!sig.is_async);
    }

    #[test]
    fn test_union_of_promises_stays_wrapped() {
        assert_eq!(
            unwrap_promise("Promise<string> | Promise<number>"),
            "Promise<string> | Promise<number>"
        );
    }

    #[test]
    fn test_overlaps_unbounded() {
        let a = ArityRange { min: 5, max: None };
        let b = ArityRange { min: 0, max: Some(4) };
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&ArityRange { min: 0, max: Some(5) }));
        assert!(a.overlaps(&ArityRange { min: 9, max: None }));
    }

    #[test]
    fn test_serialized_field_names() {
        let sig = MethodSignature::new("get", "BaseClient", vec![], Some("Promise<string>"));
        let value = serde_json::to_value(&sig).unwrap();
        assert!(value.get("minArity").is_some());
        assert!(value.get("returnTypeText").is_some());
        assert!(value.get("isAsync").is_some());
        assert!(value.get("declaringFile").is_some());
    }
}
