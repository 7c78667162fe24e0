//! Accepting diff arguments as trees or as JSON text.
//!
//! [`diff`] is the checked entry point: each argument may be an already
//! built [`Node`], a `serde_json::Value`, or a JSON string. Text is decoded
//! before the differ runs, and both sides must turn out to be containers.

use crate::diff::{compute_diff, Diff};
use crate::error::InputError;
use crate::tree::Node;
use std::fmt;

/// Identifies which argument of a diff an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Expected => f.write_str("expected"),
            Side::Actual => f.write_str("actual"),
        }
    }
}

/// One side of a diff, before decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Tree(Node),
    Text(String),
}

impl From<Node> for Input {
    fn from(node: Node) -> Self {
        Input::Tree(node)
    }
}

impl From<serde_json::Value> for Input {
    fn from(value: serde_json::Value) -> Self {
        Input::Tree(Node::from(value))
    }
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Text(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Text(text)
    }
}

impl Input {
    /// Decodes text if needed and checks that the result is a container.
    pub fn resolve(self, side: Side) -> Result<Node, InputError> {
        let node = match self {
            Input::Tree(node) => node,
            Input::Text(text) => {
                let value: serde_json::Value = serde_json::from_str(&text)
                    .map_err(|e| InputError::malformed(side, e))?;
                Node::from(value)
            }
        };

        if !node.is_container() {
            return Err(InputError::not_a_container(side, node.type_name()));
        }

        Ok(node)
    }
}

/// Diffs two inputs, decoding JSON text first.
///
/// The expected side is resolved before the actual side, so when both are
/// malformed the error names the expected side.
///
/// # Errors
///
/// - `InputError::Malformed` if a text input is not valid JSON
/// - `InputError::NotAContainer` if an input is a scalar at the top level
///
/// # Examples
///
/// ```
/// use keydiff::diff;
/// use serde_json::json;
///
/// let result = diff(r#"["apples","oranges"]"#, r#"["apples"]"#).unwrap();
/// assert_eq!(result.to_json(), json!({"removed": {"1": "oranges"}}));
///
/// assert!(diff("Invalid", json!({"test": true})).is_err());
/// ```
pub fn diff(expected: impl Into<Input>, actual: impl Into<Input>) -> Result<Diff, InputError> {
    let expected = expected.into().resolve(Side::Expected)?;
    let actual = actual.into().resolve(Side::Actual)?;
    Ok(compute_diff(&expected, &actual))
}
