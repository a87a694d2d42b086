//! Validation artifacts.
//!
//! Three files are written into the output directory:
//!
//! - [`VALIDATION_REPORT_FILE`]: the full [`ValidationReport`] as JSON
//! - [`VALIDATION_SUMMARY_FILE`]: a Markdown summary listing at most
//!   [`SUMMARY_ENTRY_LIMIT`] unvalidated entries
//! - [`METHODS_FILE`]: `{ "methods": [...] }`, the extracted surface
//!
//! All contents are rendered before anything is written, and each file is
//! replaced through a temp file, so a failed run never leaves partial JSON.

use crate::validate::{EntryValidation, ValidationReport};
use glide_migrate_core::fs::write_atomic_all;
use glide_migrate_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// JSON validation report file name.
pub const VALIDATION_REPORT_FILE: &str = "glide-validation.json";

/// Markdown summary file name.
pub const VALIDATION_SUMMARY_FILE: &str = "glide-validation.md";

/// Extracted method list file name.
pub const METHODS_FILE: &str = "glide-methods.json";

/// Maximum unvalidated entries listed in the summary.
pub const SUMMARY_ENTRY_LIMIT: usize = 50;

const SUMMARY_TEMPLATE_NAME: &str = "validation-summary";
const SUMMARY_TEMPLATE: &str = include_str!("../templates/validation-summary.md.hbs");

/// Paths of the written artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationArtifacts {
    /// Full JSON report.
    pub report: PathBuf,
    /// Markdown summary.
    pub summary: PathBuf,
    /// Extracted method list.
    pub methods: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryContext<'a> {
    extracted_method_count: usize,
    validated_count: usize,
    total_entries: usize,
    unvalidated_count: usize,
    unvalidated: Vec<&'a EntryValidation>,
    omitted: usize,
}

#[derive(Serialize)]
struct MethodList<'a> {
    methods: Vec<&'a str>,
}

/// Renders the Markdown summary for `report`.
///
/// # Errors
///
/// Returns [`Error::Template`] if rendering fails.
pub fn render_summary(report: &ValidationReport) -> Result<String> {
    let unvalidated: Vec<&EntryValidation> = report.unvalidated().collect();
    let unvalidated_count = unvalidated.len();
    let shown: Vec<&EntryValidation> = unvalidated.into_iter().take(SUMMARY_ENTRY_LIMIT).collect();

    let context = SummaryContext {
        extracted_method_count: report.extracted_method_count,
        validated_count: report.validated_count,
        total_entries: report.total_entries,
        unvalidated_count,
        omitted: unvalidated_count - shown.len(),
        unvalidated: shown,
    };

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string(SUMMARY_TEMPLATE_NAME, SUMMARY_TEMPLATE)
        .map_err(|e| Error::Template {
            message: format!("Failed to register summary template: {e}"),
        })?;

    handlebars
        .render(SUMMARY_TEMPLATE_NAME, &context)
        .map_err(|e| Error::Template {
            message: format!("Summary rendering failed: {e}"),
        })
}

/// Renders and writes all validation artifacts into `dir`.
///
/// Re-running with the same inputs rewrites identical bytes to the same
/// paths.
///
/// # Errors
///
/// Returns an error if rendering or serialization fails (nothing is written
/// in that case) or if a file cannot be written.
pub fn write_validation_artifacts(
    dir: &Path,
    report: &ValidationReport,
    surface: &BTreeSet<String>,
) -> Result<ValidationArtifacts> {
    let report_json = serde_json::to_string_pretty(report)? + "\n";
    let summary = render_summary(report)?;
    let methods_json = serde_json::to_string_pretty(&MethodList {
        methods: surface.iter().map(String::as_str).collect(),
    })? + "\n";

    let artifacts = ValidationArtifacts {
        report: dir.join(VALIDATION_REPORT_FILE),
        summary: dir.join(VALIDATION_SUMMARY_FILE),
        methods: dir.join(METHODS_FILE),
    };

    write_atomic_all(&[
        (artifacts.report.as_path(), report_json.as_str()),
        (artifacts.summary.as_path(), summary.as_str()),
        (artifacts.methods.as_path(), methods_json.as_str()),
    ])?;

    tracing::info!(dir = %dir.display(), "wrote validation artifacts");
    Ok(artifacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_migrate_core::ClientKind;

    fn result(symbol: &str, validated: bool) -> EntryValidation {
        EntryValidation {
            client: ClientKind::Ioredis,
            symbol: symbol.to_string(),
            glide_methods: vec![symbol.to_string()],
            validated,
            missing: if validated { vec![] } else { vec![symbol.to_string()] },
        }
    }

    fn report(results: Vec<EntryValidation>) -> ValidationReport {
        ValidationReport {
            extracted_method_count: 3,
            validated_count: results.iter().filter(|r| r.validated).count(),
            total_entries: results.len(),
            results,
        }
    }

    #[test]
    fn test_summary_clean() {
        let summary = render_summary(&report(vec![result("get", true)])).unwrap();
        assert!(summary.starts_with("# GLIDE Mapping Validation"));
        assert!(summary.contains("Validated entries: 1 / 1"));
        assert!(summary.contains("Every mapping entry references methods"));
        assert!(!summary.contains("| Client |"));
    }

    #[test]
    fn test_summary_lists_unvalidated() {
        let summary =
            render_summary(&report(vec![result("get", true), result("zrangebyscore", false)]))
                .unwrap();
        assert!(summary.contains("Unvalidated entries: 1"));
        assert!(summary.contains("| ioredis | `zrangebyscore` | `zrangebyscore` | `zrangebyscore` |"));
        assert!(!summary.contains("`get`"));
        assert!(!summary.contains("not shown"));
    }

    #[test]
    fn test_summary_entry_without_methods() {
        let mut entry = result("lua", false);
        entry.glide_methods.clear();
        entry.missing.clear();
        let summary = render_summary(&report(vec![entry])).unwrap();
        assert!(summary.contains("| ioredis | `lua` | _none_ |"));
    }

    #[test]
    fn test_summary_is_capped() {
        let results = (0..SUMMARY_ENTRY_LIMIT + 7)
            .map(|i| result(&format!("cmd{i}"), false))
            .collect();
        let summary = render_summary(&report(results)).unwrap();

        let rows = summary.lines().filter(|l| l.starts_with("| ioredis |")).count();
        assert_eq!(rows, SUMMARY_ENTRY_LIMIT);
        assert!(summary.contains("_7 more unvalidated entries not shown._"));
    }

    #[test]
    fn test_write_artifacts_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let report = report(vec![result("get", true), result("hmset", false)]);
        let surface: BTreeSet<String> = ["get", "set"].iter().map(ToString::to_string).collect();

        let first = write_validation_artifacts(dir.path(), &report, &surface).unwrap();
        let snapshot: Vec<String> = [&first.report, &first.summary, &first.methods]
            .iter()
            .map(|p| std::fs::read_to_string(p).unwrap())
            .collect();

        let second = write_validation_artifacts(dir.path(), &report, &surface).unwrap();
        assert_eq!(first, second);
        for (path, before) in [&second.report, &second.summary, &second.methods]
            .iter()
            .zip(&snapshot)
        {
            assert_eq!(&std::fs::read_to_string(path).unwrap(), before);
        }

        let methods: serde_json::Value = serde_json::from_str(&snapshot[2]).unwrap();
        assert_eq!(methods, serde_json::json!({ "methods": ["get", "set"] }));

        let parsed: ValidationReport = serde_json::from_str(&snapshot[0]).unwrap();
        assert_eq!(parsed, report);
    }

    #[test]
    fn test_failed_write_keeps_previous_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let surface: BTreeSet<String> = ["get"].iter().map(ToString::to_string).collect();
        let clean = report(vec![result("get", true)]);
        let first = write_validation_artifacts(dir.path(), &clean, &surface).unwrap();
        let before = std::fs::read_to_string(&first.report).unwrap();

        std::fs::create_dir(dir.path().join(format!(".{METHODS_FILE}.tmp"))).unwrap();
        let flagged = report(vec![result("get", true), result("hmset", false)]);
        assert!(write_validation_artifacts(dir.path(), &flagged, &surface).is_err());

        assert_eq!(std::fs::read_to_string(&first.report).unwrap(), before);
        assert!(!dir.path().join(format!(".{VALIDATION_REPORT_FILE}.tmp")).exists());
        assert!(!dir.path().join(format!(".{VALIDATION_SUMMARY_FILE}.tmp")).exists());
    }
}
