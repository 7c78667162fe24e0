//! Output formatting for diff results.
//!
//! Text formats list one line per reported leaf, addressed by its full path,
//! followed by a summary. The JSON format is the canonical three-bucket
//! object.
//!
//! # Examples
//!
//! ```
//! use keydiff::{compute_diff, format_diff, Node, OutputFormat, OutputOptions};
//! use serde_json::json;
//!
//! let expected = Node::from(json!({"age": 42}));
//! let actual = Node::from(json!({"age": 43}));
//! let diff = compute_diff(&expected, &actual);
//!
//! let output = format_diff(&diff, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("• age: 42 → 43"));
//! ```

use crate::diff::{Diff, DiffStats, Entry, Record};
use crate::error::OutputError;
use crate::tree::{Key, Node};
use colored::*;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// The `{added, removed, changed}` object, pretty-printed
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options for the text formats.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Render values as compact JSON instead of short previews
    pub show_values: bool,
    /// Maximum length for displayed values (truncate if longer)
    pub max_value_length: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            show_values: false,
            max_value_length: 80,
        }
    }
}

/// Formats a diff according to the specified format and options.
///
/// # Errors
///
/// Returns `OutputError::JsonSerializationError` if the JSON format fails to
/// serialize.
pub fn format_diff(
    diff: &Diff,
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_text(diff, options, true)),
        OutputFormat::Json => format_json(diff),
        OutputFormat::Plain => Ok(format_text(diff, options, false)),
    }
}

/// Color scheme: added green, removed red, changed yellow.
fn format_text(diff: &Diff, options: &OutputOptions, color: bool) -> String {
    if diff.is_empty() {
        let message = "No changes detected.";
        return if color {
            message.dimmed().to_string()
        } else {
            message.to_string()
        };
    }

    let mut output = String::new();
    for record in diff.records() {
        let line = if color {
            format_record_terminal(&record, options)
        } else {
            format_record_plain(&record, options)
        };
        output.push_str(&line);
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format_summary(&diff.stats()));

    output
}

fn format_record_terminal(record: &Record<'_>, options: &OutputOptions) -> String {
    let path = format_path(&record.path);

    match record.entry {
        Entry::Added(value) => format!(
            "{} {}: {}",
            "+".bright_green(),
            path.green(),
            format_value(value, options).green()
        ),
        Entry::Removed(value) => format!(
            "{} {}: {}",
            "-".bright_red(),
            path.red(),
            format_value(value, options).red()
        ),
        Entry::Changed(change) => format!(
            "{} {}: {} {} {}",
            "•".bright_yellow(),
            path.yellow(),
            format_value(&change.old, options).yellow(),
            "→".bright_yellow(),
            format_value(&change.new, options).yellow()
        ),
    }
}

fn format_record_plain(record: &Record<'_>, options: &OutputOptions) -> String {
    let path = format_path(&record.path);

    match record.entry {
        Entry::Added(value) => format!("+ {}: {}", path, format_value(value, options)),
        Entry::Removed(value) => format!("- {}: {}", path, format_value(value, options)),
        Entry::Changed(change) => format!(
            "• {}: {} → {}",
            path,
            format_value(&change.old, options),
            format_value(&change.new, options)
        ),
    }
}

/// Formats a diff as the canonical three-bucket JSON object.
fn format_json(diff: &Diff) -> Result<String, OutputError> {
    serde_json::to_string_pretty(diff)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

/// Converts a key path to a readable string.
///
/// - `[user, name]` → `"user.name"`
/// - `[items, 0, id]` → `"items[0].id"`
/// - `[0]` → `"[0]"`
fn format_path(path: &[Key]) -> String {
    if path.is_empty() {
        return "(root)".to_string();
    }

    let mut result = String::new();
    for (i, key) in path.iter().enumerate() {
        match key {
            Key::Index(index) => result.push_str(&format!("[{}]", index)),
            Key::Name(name) => {
                if i > 0 {
                    result.push('.');
                }
                result.push_str(name);
            }
        }
    }
    result
}

fn format_value(node: &Node, options: &OutputOptions) -> String {
    if options.show_values {
        node.render(options.max_value_length)
    } else {
        node.preview(options.max_value_length)
    }
}

fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }
    if stats.changed > 0 {
        parts.push(format!("{} changed", stats.changed));
    }

    format!("Summary: {}", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::compute_diff;
    use serde_json::json;

    fn diff_of(expected: serde_json::Value, actual: serde_json::Value) -> Diff {
        compute_diff(&Node::from(expected), &Node::from(actual))
    }

    #[test]
    fn test_format_path_names() {
        assert_eq!(format_path(&[Key::from("name")]), "name");
        assert_eq!(
            format_path(&[Key::from("user"), Key::from("name")]),
            "user.name"
        );
    }

    #[test]
    fn test_format_path_indices() {
        assert_eq!(format_path(&[Key::Index(0)]), "[0]");
        assert_eq!(
            format_path(&[Key::from("items"), Key::Index(0), Key::from("id")]),
            "items[0].id"
        );
        assert_eq!(format_path(&[Key::Index(1), Key::Index(2)]), "[1][2]");
    }

    #[test]
    fn test_format_path_empty() {
        assert_eq!(format_path(&[]), "(root)");
    }

    #[test]
    fn test_format_value_preview_and_full() {
        let node = Node::from(json!(["item3", "item4"]));
        assert_eq!(format_value(&node, &OutputOptions::default()), "[ 2 items ]");

        let options = OutputOptions {
            show_values: true,
            ..Default::default()
        };
        assert_eq!(format_value(&node, &options), r#"["item3","item4"]"#);
    }

    #[test]
    fn test_format_summary() {
        assert_eq!(format_summary(&DiffStats::default()), "Summary: No changes");

        let stats = DiffStats {
            added: 2,
            removed: 0,
            changed: 3,
        };
        assert_eq!(format_summary(&stats), "Summary: 2 added, 3 changed");
    }

    #[test]
    fn test_format_plain_no_changes() {
        let output = format_text(&Diff::new(), &OutputOptions::default(), false);
        assert_eq!(output, "No changes detected.");
    }

    #[test]
    fn test_format_plain_lines() {
        let diff = diff_of(
            json!({"a": 1, "b": {"c": "x"}}),
            json!({"b": {"c": "y"}, "d": true}),
        );
        let output = format_text(&diff, &OutputOptions::default(), false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "+ d: true",
                "- a: 1",
                "• b.c: \"x\" → \"y\"",
                "",
                "Summary: 1 added, 1 removed, 1 changed",
            ]
        );
    }

    #[test]
    fn test_format_plain_follows_document_order() {
        let diff = diff_of(json!({}), json!({"z": 1, "a": 2}));
        let output = format_text(&diff, &OutputOptions::default(), false);
        assert!(output.starts_with("+ z: 1\n+ a: 2\n"));
    }

    #[test]
    fn test_format_json_is_canonical() {
        let diff = diff_of(json!(["apples", "oranges"]), json!(["apples", "pears"]));
        let output = format_json(&diff).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            value,
            json!({"changed": {"1": {"old": "oranges", "new": "pears"}}})
        );
    }

    #[test]
    fn test_format_json_empty() {
        assert_eq!(format_json(&Diff::new()).unwrap(), "{}");
    }
}
