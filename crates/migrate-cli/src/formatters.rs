//! Output formatters for CLI commands.
//!
//! Every command result is serializable and has a plain-text [`Summary`].
//! `json` prints the full payload, `text` prints the summary lines, and
//! `pretty` prints a colored headline followed by the colorized payload.

use anyhow::Result;
use colored::Colorize;
use glide_migrate_core::cli::OutputFormat;
use serde::Serialize;

/// Plain-text rendering of a command result.
pub trait Summary {
    /// One-line description of the result.
    fn headline(&self) -> String;

    /// Detail lines, one item per line.
    fn lines(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Formats `data` according to `format`.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use glide_migrate_cli::formatters::{Summary, format_output};
/// use glide_migrate_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Count {
///     methods: usize,
/// }
///
/// impl Summary for Count {
///     fn headline(&self) -> String {
///         format!("{} methods", self.methods)
///     }
/// }
///
/// let output = format_output(&Count { methods: 3 }, OutputFormat::Text)?;
/// assert_eq!(output, "3 methods");
///
/// let output = format_output(&Count { methods: 3 }, OutputFormat::Json)?;
/// assert!(output.contains("\"methods\": 3"));
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize + Summary>(data: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::Text => Ok(text(data)),
        OutputFormat::Pretty => pretty(data),
    }
}

fn text<T: Summary>(data: &T) -> String {
    std::iter::once(data.headline())
        .chain(data.lines())
        .collect::<Vec<_>>()
        .join("\n")
}

fn pretty<T: Serialize + Summary>(data: &T) -> Result<String> {
    let value = serde_json::to_value(data)?;
    Ok(format!("{}\n{}", data.headline().bold(), format_value(&value, 0)))
}

/// Recursively formats a JSON value with colors and indentation.
fn format_value(value: &serde_json::Value, indent: usize) -> String {
    use serde_json::Value;

    let indent_str = "  ".repeat(indent);
    let next_indent_str = "  ".repeat(indent + 1);

    match value {
        Value::Null => "null".dimmed().to_string(),
        Value::Bool(true) => "true".green().to_string(),
        Value::Bool(false) => "false".red().to_string(),
        Value::Number(n) => n.to_string().cyan().to_string(),
        Value::String(s) => format!("\"{}\"", s.green()),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Object(fields) if fields.is_empty() => "{}".to_string(),
        Value::Array(items) => {
            let body: Vec<String> = items
                .iter()
                .map(|item| format!("{next_indent_str}{}", format_value(item, indent + 1)))
                .collect();
            format!("[\n{}\n{indent_str}]", body.join(",\n"))
        }
        Value::Object(fields) => {
            let body: Vec<String> = fields
                .iter()
                .map(|(key, val)| {
                    format!(
                        "{next_indent_str}\"{}\": {}",
                        key.blue().bold(),
                        format_value(val, indent + 1)
                    )
                })
                .collect();
            format!("{{\n{}\n{indent_str}}}", body.join(",\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Drift {
        validated: usize,
        missing: Vec<&'static str>,
    }

    impl Summary for Drift {
        fn headline(&self) -> String {
            format!("{} validated", self.validated)
        }

        fn lines(&self) -> Vec<String> {
            self.missing.iter().map(|m| format!("missing {m}")).collect()
        }
    }

    fn drift() -> Drift {
        Drift {
            validated: 2,
            missing: vec!["hset", "xgroupCreate"],
        }
    }

    #[test]
    fn test_json_format() {
        let output = format_output(&drift(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["validated"], 2);
        assert_eq!(value["missing"][1], "xgroupCreate");
    }

    #[test]
    fn test_text_format_lists_lines() {
        let output = format_output(&drift(), OutputFormat::Text).unwrap();
        assert_eq!(output, "2 validated\nmissing hset\nmissing xgroupCreate");
    }

    #[test]
    fn test_pretty_format() {
        colored::control::set_override(false);
        let output = format_output(&drift(), OutputFormat::Pretty).unwrap();
        assert!(output.starts_with("2 validated\n{"));
        assert!(output.contains("\"missing\": [\n    \"hset\",\n    \"xgroupCreate\"\n  ]"));
    }

    #[test]
    fn test_pretty_empty_collections() {
        colored::control::set_override(false);
        assert_eq!(format_value(&serde_json::json!([]), 0), "[]");
        assert_eq!(format_value(&serde_json::json!({}), 3), "{}");
        assert_eq!(format_value(&serde_json::json!(null), 0), "null");
    }
}
