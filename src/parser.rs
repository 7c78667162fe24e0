//! Loading JSON, YAML and TOML documents into the tree representation.
//!
//! Files are dispatched on their extension. Content without a known format
//! (unknown extension, stdin) is tried as JSON, then YAML, then TOML, and the
//! first one that yields an array or object wins.
//!
//! # Examples
//!
//! ```no_run
//! use keydiff::parser::parse_file;
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let node = parse_file(Path::new("expected.json"))?;
//! let node = parse_file(Path::new("config.yaml"))?;
//! # Ok(())
//! # }
//! ```

use crate::error::ParseError;
use crate::tree::Node;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Format to parse content as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
    /// Try JSON, then YAML, then TOML; only a container counts as a match
    #[default]
    Auto,
}

impl FormatHint {
    /// Picks a format from a file extension, falling back to `Auto`.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("json") => FormatHint::Json,
            Some("yaml") | Some("yml") => FormatHint::Yaml,
            Some("toml") => FormatHint::Toml,
            _ => FormatHint::Auto,
        }
    }
}

/// Parses a file into a Node.
///
/// # Errors
///
/// - `ParseError::FileNotFound` if the path does not exist
/// - `ParseError::ReadError` if the file cannot be read
/// - `ParseError::JsonError` / `YamlError` / `TomlError` for invalid content
///   in a file with a known extension
/// - `ParseError::UnknownFormat` if no format accepts the content
pub fn parse_file(path: &Path) -> Result<Node, ParseError> {
    let label = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(ParseError::file_not_found(label));
    }

    let content = fs::read_to_string(path).map_err(|e| ParseError::read_error(&label, e))?;
    let hint = FormatHint::from_path(path);

    tracing::debug!(path = %label, ?hint, bytes = content.len(), "parsing file");

    parse_content(&content, hint, &label)
}

/// Reads all of stdin and parses it.
pub fn parse_stdin(hint: FormatHint) -> Result<Node, ParseError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| ParseError::read_error("<stdin>", e))?;

    tracing::debug!(?hint, bytes = content.len(), "parsing stdin");

    parse_content(&content, hint, "<stdin>")
}

/// Parses in-memory content. `label` names the source in errors.
///
/// With `FormatHint::Auto` a decoder whose result is a scalar does not count
/// as a match. YAML reads almost any text as a plain string, so stopping
/// there would shadow TOML documents.
pub fn parse_content(content: &str, hint: FormatHint, label: &str) -> Result<Node, ParseError> {
    match hint {
        FormatHint::Json => parse_json(content).map_err(|e| ParseError::json_error(label, e)),
        FormatHint::Yaml => parse_yaml(content).map_err(|e| ParseError::yaml_error(label, e)),
        FormatHint::Toml => parse_toml(content).map_err(|e| ParseError::toml_error(label, e)),
        FormatHint::Auto => parse_json(content)
            .ok()
            .filter(Node::is_container)
            .or_else(|| parse_yaml(content).ok().filter(Node::is_container))
            .or_else(|| parse_toml(content).ok())
            .ok_or_else(|| ParseError::unknown_format(label)),
    }
}

/// Parses a JSON string into a Node.
///
/// # Examples
///
/// ```
/// use keydiff::parser::parse_json;
///
/// let node = parse_json(r#"{"name": "Alice", "age": 30}"#).unwrap();
/// assert!(node.is_container());
/// ```
pub fn parse_json(content: &str) -> Result<Node, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(Node::from(value))
}

/// Parses a YAML string into a Node.
pub fn parse_yaml(content: &str) -> Result<Node, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_node(value))
}

/// Parses a TOML document into a Node. The root is always a table.
pub fn parse_toml(content: &str) -> Result<Node, toml::de::Error> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(toml_to_node(toml::Value::Table(table)))
}

fn float_node(f: f64) -> Node {
    serde_json::Number::from_f64(f)
        .map(Node::Number)
        .unwrap_or(Node::Null)
}

/// Converts a serde_yaml::Value to a Node.
///
/// Anchors and merges are already resolved by serde_yaml. Tags are dropped
/// and non-string mapping keys are stringified.
fn yaml_to_node(value: serde_yaml::Value) -> Node {
    match value {
        serde_yaml::Value::Null => Node::Null,
        serde_yaml::Value::Bool(b) => Node::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Node::Number(u.into())
            } else {
                n.as_f64().map(float_node).unwrap_or(Node::Null)
            }
        }
        serde_yaml::Value::String(s) => Node::String(s),
        serde_yaml::Value::Sequence(seq) => {
            Node::Array(seq.into_iter().map(yaml_to_node).collect())
        }
        serde_yaml::Value::Mapping(map) => Node::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => format!("{:?}", other),
                    };
                    (key, yaml_to_node(v))
                })
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_node(tagged.value),
    }
}

fn toml_to_node(value: toml::Value) -> Node {
    match value {
        toml::Value::String(s) => Node::String(s),
        toml::Value::Integer(i) => Node::Number(i.into()),
        toml::Value::Float(f) => float_node(f),
        toml::Value::Boolean(b) => Node::Bool(b),
        toml::Value::Datetime(dt) => Node::String(dt.to_string()),
        toml::Value::Array(arr) => Node::Array(arr.into_iter().map(toml_to_node).collect()),
        toml::Value::Table(table) => Node::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_node(v)))
                .collect(),
        ),
    }
}
