//! keydiff - structural diff for JSON-shaped data.
//!
//! Compares an *expected* value with an *actual* value and sorts every
//! difference into three buckets: keys only in the actual value (`added`),
//! keys only in the expected value (`removed`), and leaves present in both
//! with different content (`changed`). Lists of objects are compared
//! position by position; lists of scalars are compared whole.
//!
//! # Example
//!
//! ```
//! use keydiff::diff;
//! use serde_json::json;
//!
//! let expected = json!({"zip": "BA1124", "city": "Cardiff", "user": {"name": "Jeff"}});
//! let actual = r#"{"zip": "BA1124", "user": {"name": "Jeff", "surname": "Smith"},
//!                  "city": "Cardiff", "county": "Cardiff"}"#;
//!
//! let result = diff(expected, actual)?;
//! assert_eq!(
//!     result.to_json(),
//!     json!({"added": {"county": "Cardiff", "user": {"surname": "Smith"}}})
//! );
//! # Ok::<(), keydiff::InputError>(())
//! ```

pub mod diff;
pub mod error;
pub mod input;
pub mod output;
pub mod parser;
pub mod tree;

// Re-export commonly used types for convenience
pub use diff::{
    compute_diff, Bucket, Change, ChangeKind, Delta, Diff, DiffStats, Entry, Record,
};
pub use error::{InputError, KeydiffError, OutputError, ParseError};
pub use input::{diff, Input, Side};
pub use output::{format_diff, OutputFormat, OutputOptions};
pub use parser::{
    parse_content, parse_file, parse_json, parse_stdin, parse_toml, parse_yaml, FormatHint,
};
pub use tree::{Key, Node};
