//! Tree representation for JSON-shaped data.

use indexmap::{map, IndexMap};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;
use std::iter::Enumerate;
use std::slice;

/// A node representing a value in structured data (JSON, YAML, TOML).
///
/// Numbers keep serde_json's integer/float distinction, so equality between
/// nodes is strict in both type and value: `1`, `1.0` and `"1"` all differ.
/// Objects keep their keys in document order; equality ignores that order.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Array(Vec<Node>),
    Object(IndexMap<String, Node>),
}

/// Addresses one entry of a container: a list position or a map key.
///
/// `Index(0)` and `Name("0")` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Index(i) => serializer.serialize_u64(*i as u64),
            Key::Name(name) => serializer.serialize_str(name),
        }
    }
}

impl Node {
    pub fn type_name(&self) -> &str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Number(_) => "number",
            Node::String(_) => "string",
            Node::Object(_) => "object",
            Node::Array(_) => "array",
        }
    }

    /// Returns true for arrays and objects.
    pub fn is_container(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }

    /// Decides whether the differ walks into this value or compares it whole.
    ///
    /// Objects are always walked. Arrays are walked element by element only
    /// when they are non-empty and their first element is itself a container;
    /// an empty array, or an array of scalars, is a leaf compared as a whole.
    pub fn is_nested(&self) -> bool {
        match self {
            Node::Object(_) => true,
            Node::Array(items) => items.first().is_some_and(Node::is_container),
            _ => false,
        }
    }

    /// Returns true if both nodes are objects, or both are arrays.
    pub fn same_kind(&self, other: &Node) -> bool {
        matches!(
            (self, other),
            (Node::Object(_), Node::Object(_)) | (Node::Array(_), Node::Array(_))
        )
    }

    /// Looks up a direct child. Index keys only address arrays and name keys
    /// only address objects.
    pub fn get(&self, key: &Key) -> Option<&Node> {
        match (self, key) {
            (Node::Array(items), Key::Index(i)) => items.get(*i),
            (Node::Object(map), Key::Name(name)) => map.get(name),
            _ => None,
        }
    }

    /// Iterates the direct children with their keys. Scalars have none.
    pub fn entries(&self) -> Entries<'_> {
        match self {
            Node::Array(items) => Entries::Array(items.iter().enumerate()),
            Node::Object(map) => Entries::Object(map.iter()),
            _ => Entries::Empty,
        }
    }

    /// Returns a short preview of the node's value, truncated to max_len.
    pub fn preview(&self, max_len: usize) -> String {
        let preview = match self {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Number(n) => n.to_string(),
            Node::String(s) => format!("\"{}\"", s),
            Node::Object(map) => match map.len() {
                0 => "{}".to_string(),
                1 => "{ 1 key }".to_string(),
                count => format!("{{ {} keys }}", count),
            },
            Node::Array(arr) => match arr.len() {
                0 => "[]".to_string(),
                1 => "[ 1 item ]".to_string(),
                count => format!("[ {} items ]", count),
            },
        };

        truncate(preview, max_len)
    }

    /// Renders the full value as compact JSON, truncated to max_len.
    pub fn render(&self, max_len: usize) -> String {
        let rendered = serde_json::to_string(self).unwrap_or_else(|_| self.preview(max_len));
        truncate(rendered, max_len)
    }
}

fn truncate(text: String, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        text
    }
}

/// Iterator over the keyed children of a node. See [`Node::entries`].
pub enum Entries<'a> {
    Array(Enumerate<slice::Iter<'a, Node>>),
    Object(map::Iter<'a, String, Node>),
    Empty,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (Key, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::Array(iter) => iter.next().map(|(i, node)| (Key::Index(i), node)),
            Entries::Object(iter) => iter
                .next()
                .map(|(name, node)| (Key::Name(name.clone()), node)),
            Entries::Empty => None,
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Number(n) => n.serialize(serializer),
            Node::String(s) => serializer.serialize_str(s),
            Node::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Object(map) => {
                let mut ser = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    ser.serialize_entry(key, value)?;
                }
                ser.end()
            }
        }
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => Node::Number(n),
            serde_json::Value::String(s) => Node::String(s),
            serde_json::Value::Array(arr) => Node::Array(arr.into_iter().map(Node::from).collect()),
            serde_json::Value::Object(obj) => {
                Node::Object(obj.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<&Node> for serde_json::Value {
    fn from(node: &Node) -> Self {
        match node {
            Node::Null => serde_json::Value::Null,
            Node::Bool(b) => serde_json::Value::Bool(*b),
            Node::Number(n) => serde_json::Value::Number(n.clone()),
            Node::String(s) => serde_json::Value::String(s.clone()),
            Node::Array(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Node::Object(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_is_nested_classification() {
        assert!(!Node::from(json!("text")).is_nested());
        assert!(!Node::from(json!(null)).is_nested());
        assert!(Node::from(json!({})).is_nested());
        assert!(Node::from(json!({"a": 1})).is_nested());
        assert!(!Node::from(json!([])).is_nested());
        assert!(!Node::from(json!(["a", "b"])).is_nested());
        assert!(Node::from(json!([{"a": 1}])).is_nested());
        assert!(Node::from(json!([[1], [2]])).is_nested());
        // Only the first element decides.
        assert!(!Node::from(json!(["a", {"b": 1}])).is_nested());
        assert!(Node::from(json!([{"b": 1}, "a"])).is_nested());
    }

    #[test]
    fn test_get_respects_key_kind() {
        let arr = Node::from(json!(["a", "b"]));
        assert_eq!(arr.get(&Key::Index(1)), Some(&Node::String("b".to_string())));
        assert_eq!(arr.get(&Key::from("1")), None);

        let obj = Node::from(json!({"0": "zero"}));
        assert_eq!(obj.get(&Key::from("0")), Some(&Node::String("zero".to_string())));
        assert_eq!(obj.get(&Key::Index(0)), None);
    }

    #[test]
    fn test_entries_follow_document_order() {
        let obj = Node::from(json!({"z": 1, "a": 2, "m": 3}));
        let keys: Vec<Key> = obj.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![Key::from("z"), Key::from("a"), Key::from("m")]);
    }

    #[test]
    fn test_entries() {
        let arr = Node::from(json!(["x", "y"]));
        let keys: Vec<Key> = arr.entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec![Key::Index(0), Key::Index(1)]);

        assert_eq!(Node::from(json!(42)).entries().count(), 0);
    }

    #[test]
    fn test_preview_truncation_is_char_safe() {
        let node = Node::String("ééééééééééé".to_string());
        let preview = node.preview(6);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 6);
    }

    #[test]
    fn test_render_compact_json() {
        let node = Node::from(json!({"a": [1, 2]}));
        assert_eq!(node.render(100), r#"{"a":[1,2]}"#);
    }
}
