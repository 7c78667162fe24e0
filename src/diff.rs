//! Core three-bucket diff algorithm.
//!
//! Two containers are compared by three cooperating walks. `added_of` visits
//! the actual side looking for keys the expected side lacks, `removed_of`
//! does the reverse, and `changed_of` compares the leaves both sides share.
//! All three use the same rule (see [`descends`]) to decide whether a value
//! present on both sides is walked into or treated as an opaque leaf, so a
//! key is reported in at most one bucket as a leaf.
//!
//! # Examples
//!
//! ```
//! use keydiff::{compute_diff, Node};
//! use serde_json::json;
//!
//! let expected = Node::from(json!({"name": "Jeff", "age": 30}));
//! let actual = Node::from(json!({"name": "Jeff", "age": 31}));
//!
//! let diff = compute_diff(&expected, &actual);
//!
//! assert_eq!(diff.stats().changed, 1);
//! assert_eq!(
//!     diff.to_json(),
//!     json!({"changed": {"age": {"old": 30, "new": 31}}})
//! );
//! ```

use crate::tree::{Key, Node};
use indexmap::IndexMap;
use serde::Serialize;

/// Entries of one bucket at one level of the tree, in the order the walk
/// visited them.
pub type Bucket<T> = IndexMap<Key, Delta<T>>;

/// A bucket entry: either a reported value, or a branch leading to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Delta<T> {
    Leaf(T),
    Nested(Bucket<T>),
}

/// A leaf that exists on both sides with different content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    /// Value on the expected side
    pub old: Node,
    /// Value on the actual side
    pub new: Node,
}

/// The complete diff result.
///
/// Each bucket mirrors the shape of the subtree it reports on. A branch only
/// exists when something below it differs, and an empty bucket means there
/// is no difference of that kind anywhere in the tree. Serializes to an
/// object holding only the non-empty buckets.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Diff {
    /// Keys present only in the actual value
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub added: Bucket<Node>,
    /// Keys present only in the expected value
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub removed: Bucket<Node>,
    /// Leaves present on both sides with different values
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub changed: Bucket<Change>,
}

/// Which bucket a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Changed,
}

/// The reported leaf of a record, carrying the values its bucket holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// Value only on the actual side
    Added(&'a Node),
    /// Value only on the expected side
    Removed(&'a Node),
    Changed(&'a Change),
}

/// One leaf entry of a diff, addressed by its full path.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    pub path: Vec<Key>,
    pub entry: Entry<'a>,
}

impl Record<'_> {
    pub fn kind(&self) -> ChangeKind {
        match self.entry {
            Entry::Added(_) => ChangeKind::Added,
            Entry::Removed(_) => ChangeKind::Removed,
            Entry::Changed(_) => ChangeKind::Changed,
        }
    }
}

/// Number of reported leaves per bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

impl DiffStats {
    /// Returns the total number of reported leaves.
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.changed
    }

    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0
    }
}

impl Diff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are no differences of any kind.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats {
            added: count_leaves(&self.added),
            removed: count_leaves(&self.removed),
            changed: count_leaves(&self.changed),
        }
    }

    /// Flattens the buckets into path-addressed records, added first, then
    /// removed, then changed.
    pub fn records(&self) -> Vec<Record<'_>> {
        let mut records = Vec::new();
        collect_records(&self.added, &mut Vec::new(), &mut records, &Entry::Added);
        collect_records(&self.removed, &mut Vec::new(), &mut records, &Entry::Removed);
        collect_records(&self.changed, &mut Vec::new(), &mut records, &Entry::Changed);
        records
    }

    /// Returns the canonical `{added, removed, changed}` JSON form.
    pub fn to_json(&self) -> serde_json::Value {
        // Every key and leaf here serializes infallibly into a Value.
        serde_json::to_value(self).unwrap_or_default()
    }
}

fn count_leaves<T>(bucket: &Bucket<T>) -> usize {
    bucket
        .values()
        .map(|delta| match delta {
            Delta::Leaf(_) => 1,
            Delta::Nested(inner) => count_leaves(inner),
        })
        .sum()
}

fn collect_records<'a, T>(
    bucket: &'a Bucket<T>,
    path: &mut Vec<Key>,
    records: &mut Vec<Record<'a>>,
    entry: &dyn Fn(&'a T) -> Entry<'a>,
) {
    for (key, delta) in bucket {
        path.push(key.clone());
        match delta {
            Delta::Leaf(value) => records.push(Record {
                path: path.clone(),
                entry: entry(value),
            }),
            Delta::Nested(inner) => collect_records(inner, path, records, entry),
        }
        path.pop();
    }
}

/// Computes the three-bucket diff between two containers.
///
/// Both arguments are expected to be arrays or objects. A scalar has no
/// entries, so passing one contributes nothing to the result; use
/// [`crate::diff`] to have scalars rejected with an error instead.
///
/// # Examples
///
/// ```
/// use keydiff::{compute_diff, Node};
/// use serde_json::json;
///
/// let expected = Node::from(json!(["apples", "oranges"]));
/// let actual = Node::from(json!(["apples", "oranges", "plums"]));
///
/// let diff = compute_diff(&expected, &actual);
/// assert_eq!(diff.to_json(), json!({"added": {"2": "plums"}}));
/// ```
pub fn compute_diff(expected: &Node, actual: &Node) -> Diff {
    let diff = Diff {
        added: added_of(expected, actual),
        removed: removed_of(expected, actual),
        changed: changed_of(expected, actual),
    };

    tracing::debug!(
        expected = expected.type_name(),
        actual = actual.type_name(),
        stats = ?diff.stats(),
        "computed diff"
    );

    diff
}

/// Decides whether a key present on both sides is walked into.
///
/// The walk continues only when both values are the same kind of container
/// and at least one of them is nested. Any other pair (scalar against
/// container, object against array, two leaf lists) is compared whole by
/// `changed_of` and never shows up in `added` or `removed`.
fn descends(expected: &Node, actual: &Node) -> bool {
    expected.same_kind(actual) && (expected.is_nested() || actual.is_nested())
}

fn added_of(expected: &Node, actual: &Node) -> Bucket<Node> {
    let mut bucket = Bucket::new();

    for (key, actual_value) in actual.entries() {
        match expected.get(&key) {
            None => {
                bucket.insert(key, Delta::Leaf(actual_value.clone()));
            }
            Some(expected_value) if descends(expected_value, actual_value) => {
                let nested = added_of(expected_value, actual_value);
                if !nested.is_empty() {
                    bucket.insert(key, Delta::Nested(nested));
                }
            }
            Some(_) => {}
        }
    }

    bucket
}

fn removed_of(expected: &Node, actual: &Node) -> Bucket<Node> {
    let mut bucket = Bucket::new();

    for (key, expected_value) in expected.entries() {
        match actual.get(&key) {
            None => {
                bucket.insert(key, Delta::Leaf(expected_value.clone()));
            }
            Some(actual_value) if descends(expected_value, actual_value) => {
                let nested = removed_of(expected_value, actual_value);
                if !nested.is_empty() {
                    bucket.insert(key, Delta::Nested(nested));
                }
            }
            Some(_) => {}
        }
    }

    bucket
}

fn changed_of(expected: &Node, actual: &Node) -> Bucket<Change> {
    let mut bucket = Bucket::new();

    for (key, expected_value) in expected.entries() {
        let Some(actual_value) = actual.get(&key) else {
            continue;
        };

        if descends(expected_value, actual_value) {
            let nested = changed_of(expected_value, actual_value);
            if !nested.is_empty() {
                bucket.insert(key, Delta::Nested(nested));
            }
        } else if expected_value != actual_value {
            bucket.insert(
                key,
                Delta::Leaf(Change {
                    old: expected_value.clone(),
                    new: actual_value.clone(),
                }),
            );
        }
    }

    bucket
}
