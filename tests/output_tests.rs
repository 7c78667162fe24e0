use keydiff::{compute_diff, format_diff, Diff, Node, OutputFormat, OutputOptions};
use serde_json::json;

fn sample_diff() -> Diff {
    compute_diff(
        &Node::from(json!({
            "object": {
                "to_be_removed": ["item1", "item2"],
                "to_be_changed": ["item3", "item4"],
                "collection": [{"name": "Item 1"}]
            }
        })),
        &Node::from(json!({
            "object": {
                "to_be_added": ["item3", "item4"],
                "to_be_changed": ["item5", "item6"],
                "collection": [{"name": "Item 1"}, {"name": "Item 2"}]
            }
        })),
    )
}

#[test]
fn test_plain_output_lists_every_leaf() {
    let output =
        format_diff(&sample_diff(), &OutputFormat::Plain, &OutputOptions::default()).unwrap();

    assert!(output.contains("+ object.collection[1]: { 1 key }"));
    assert!(output.contains("+ object.to_be_added: [ 2 items ]"));
    assert!(output.contains("- object.to_be_removed: [ 2 items ]"));
    assert!(output.contains("• object.to_be_changed: [ 2 items ] → [ 2 items ]"));
    assert!(output.ends_with("Summary: 2 added, 1 removed, 1 changed"));
}

#[test]
fn test_plain_output_with_full_values() {
    let options = OutputOptions {
        show_values: true,
        ..Default::default()
    };
    let output = format_diff(&sample_diff(), &OutputFormat::Plain, &options).unwrap();

    assert!(output.contains("+ object.collection[1]: {\"name\":\"Item 2\"}"));
    assert!(output.contains(r#"• object.to_be_changed: ["item3","item4"] → ["item5","item6"]"#));
}

#[test]
fn test_plain_output_truncates_values() {
    let diff = compute_diff(
        &Node::from(json!({"note": "short"})),
        &Node::from(json!({"note": "x".repeat(50)})),
    );
    let options = OutputOptions {
        show_values: true,
        max_value_length: 10,
    };
    let output = format_diff(&diff, &OutputFormat::Plain, &options).unwrap();
    assert!(output.contains("• note: \"short\" → \"xxxxxx..."));
}

#[test]
fn test_plain_output_no_changes() {
    let output =
        format_diff(&Diff::new(), &OutputFormat::Plain, &OutputOptions::default()).unwrap();
    assert_eq!(output, "No changes detected.");
}

#[test]
fn test_terminal_output_contains_paths() {
    let output = format_diff(
        &sample_diff(),
        &OutputFormat::Terminal,
        &OutputOptions::default(),
    )
    .unwrap();
    assert!(output.contains("to_be_added"));
    assert!(output.contains("to_be_removed"));
    assert!(output.contains("to_be_changed"));
    assert!(output.contains("Summary"));
}

#[test]
fn test_json_output_is_three_bucket_object() {
    let output =
        format_diff(&sample_diff(), &OutputFormat::Json, &OutputOptions::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(
        value,
        json!({
            "added": {
                "object": {
                    "to_be_added": ["item3", "item4"],
                    "collection": {"1": {"name": "Item 2"}}
                }
            },
            "removed": {"object": {"to_be_removed": ["item1", "item2"]}},
            "changed": {
                "object": {
                    "to_be_changed": {
                        "old": ["item3", "item4"],
                        "new": ["item5", "item6"]
                    }
                }
            }
        })
    );
}

#[test]
fn test_json_output_empty_diff() {
    let output =
        format_diff(&Diff::new(), &OutputFormat::Json, &OutputOptions::default()).unwrap();
    assert_eq!(output, "{}");
}
