//! Query operations over a flat [`Store`].
//!
//! Four read-only operations:
//!
//! - [`get`] - hierarchical attribute lookup via bare keys or `parent:key`
//!   colon syntax
//! - [`list`] / [`list_regex`] - substring, children, or regex filtering
//! - [`describe`] - bounded-depth human-readable dump
//! - [`validate`] - required-key and declared-type checks
//!
//! "Nothing matched" is a normal empty result for `get` and `list`, never
//! an error. `validate` always returns a complete report instead of failing
//! on the first finding.

use crate::path;
use crate::row::RowType;
use crate::store::Store;
use std::collections::BTreeMap;

/// Values longer than this are elided in `describe` output.
const VALUE_DISPLAY_WIDTH: usize = 40;

/// Errors for caller-supplied bad query arguments.
#[derive(Debug)]
pub enum QueryError {
    /// The pattern for a regex listing failed to compile
    InvalidPattern(String),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidPattern(msg) => write!(f, "invalid pattern: {}", msg),
        }
    }
}

impl std::error::Error for QueryError {}

/// Look up the attributes of a hierarchical path.
///
/// The path is either a bare key or `parent:key` colon syntax; both resolve
/// to a flat search prefix. Every leaf row whose `parent` equals the prefix
/// is returned as attribute-name → value, the attribute name being the key
/// with the prefix stem removed. When parent linkage yields nothing, a
/// prefix scan picks up immediate children by key alone. A path resolving
/// to a single leaf row returns that row's value under `"value"`.
///
/// An empty map means "not found" and is not an error.
///
/// # Examples
///
/// ```
/// use caraway::{parse, query};
///
/// let store = parse("indicators:\n  CME_MRY0T4:\n    label: Under-five mortality rate\n").unwrap();
/// let attrs = query::get(&store, "indicators:CME_MRY0T4");
/// assert_eq!(attrs["label"], "Under-five mortality rate");
/// ```
pub fn get(store: &Store, path: &str) -> BTreeMap<String, String> {
    let prefix = path::search_prefix(path);
    let mut out = BTreeMap::new();

    for row in store.find_children(&prefix) {
        if row.kind == RowType::Parent {
            continue;
        }
        let attr = path::strip_stem(&row.key, &prefix).unwrap_or(&row.key);
        out.insert(attr.to_string(), row.value.clone());
    }

    if out.is_empty() {
        // parent linkage unavailable: fall back to immediate-child keys
        for row in store.rows() {
            if row.kind != RowType::Parent && path::is_immediate_child(&row.key, &prefix) {
                let attr = path::strip_stem(&row.key, &prefix).unwrap_or(&row.key);
                out.insert(attr.to_string(), row.value.clone());
            }
        }
    }

    if out.is_empty() {
        if let Some(row) = store.find_by_key(&prefix) {
            if row.kind.is_leaf() {
                out.insert("value".to_string(), row.value.clone());
            }
        }
    }

    out
}

/// List keys and values, optionally filtered.
///
/// Without a pattern, every row is returned. With a pattern and
/// `children_only = false`, any key containing the pattern as a substring
/// matches. With `children_only = true`, rows whose `parent` equals the
/// pattern match (falling back to immediate-child keys), and matched keys
/// are renamed by stripping the pattern stem.
pub fn list(store: &Store, pattern: Option<&str>, children_only: bool) -> Vec<(String, String)> {
    let Some(pattern) = pattern else {
        return store
            .rows()
            .iter()
            .map(|r| (r.key.clone(), r.value.clone()))
            .collect();
    };

    if children_only {
        let prefix = path::sanitize(pattern);
        let mut out: Vec<(String, String)> = store
            .find_children(&prefix)
            .into_iter()
            .map(|r| {
                let name = path::strip_stem(&r.key, &prefix).unwrap_or(&r.key);
                (name.to_string(), r.value.clone())
            })
            .collect();
        if out.is_empty() {
            out = store
                .rows()
                .iter()
                .filter(|r| path::is_immediate_child(&r.key, &prefix))
                .map(|r| {
                    let name = path::strip_stem(&r.key, &prefix).unwrap_or(&r.key);
                    (name.to_string(), r.value.clone())
                })
                .collect();
        }
        out
    } else {
        store
            .rows()
            .iter()
            .filter(|r| r.key.contains(pattern))
            .map(|r| (r.key.clone(), r.value.clone()))
            .collect()
    }
}

/// List rows whose key matches a regular expression.
pub fn list_regex(store: &Store, pattern: &str) -> Result<Vec<(String, String)>, QueryError> {
    let re = regex::Regex::new(pattern)
        .map_err(|e| QueryError::InvalidPattern(e.to_string()))?;
    Ok(store
        .rows()
        .iter()
        .filter(|r| re.is_match(&r.key))
        .map(|r| (r.key.clone(), r.value.clone()))
        .collect())
}

/// Render an indented outline of every row up to `max_level`.
///
/// Parent rows print as `key:`, all others as `key: value` with long
/// values elided.
pub fn describe(store: &Store, max_level: u32) -> String {
    let mut out = String::new();
    for row in store.rows() {
        if row.level > max_level {
            continue;
        }
        let pad = " ".repeat(row.level as usize - 1);
        if row.kind == RowType::Parent {
            out.push_str(&format!("{}{}:\n", pad, row.key));
        } else {
            out.push_str(&format!("{}{}: {}\n", pad, row.key, elide(&row.value)));
        }
    }
    out
}

fn elide(value: &str) -> String {
    if value.chars().count() <= VALUE_DISPLAY_WIDTH {
        return value.to_string();
    }
    let cut: String = value.chars().take(VALUE_DISPLAY_WIDTH - 3).collect();
    format!("{}...", cut)
}

/// One declared-type failure found by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch {
    pub key: String,
    pub expected: RowType,
    pub actual: RowType,
}

/// Aggregate result of [`validate`]. Never aborts: every check's outcome
/// is enumerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub valid: bool,
    pub missing_keys: Vec<String>,
    pub type_errors: Vec<TypeMismatch>,
}

/// Check required keys and declared types against a store.
///
/// A required key passes when an exact row exists or when any row's key
/// begins with `required + "_"`, so a key present only as a container still
/// counts. A declared type passes on an exact match, or when a boolean row
/// satisfies an expected `numeric` (booleans are stored as `0`/`1`). A
/// typed key with no row at all is reported as missing rather than as a
/// type error.
pub fn validate(
    store: &Store,
    required: &[String],
    typed: &[(String, RowType)],
) -> ValidationReport {
    let mut missing_keys: Vec<String> = Vec::new();
    let mut type_errors: Vec<TypeMismatch> = Vec::new();

    for key in required {
        let k = path::sanitize(key);
        let stem = format!("{}_", k);
        let present =
            store.find_by_key(&k).is_some() || !store.find_by_key_prefix(&stem).is_empty();
        if !present && !missing_keys.contains(key) {
            missing_keys.push(key.clone());
        }
    }

    for (key, expected) in typed {
        let k = path::sanitize(key);
        match store.find_by_key(&k) {
            None => {
                if !missing_keys.contains(key) {
                    missing_keys.push(key.clone());
                }
            }
            Some(row) => {
                let compatible = row.kind == *expected
                    || (*expected == RowType::Numeric && row.kind == RowType::Boolean);
                if !compatible {
                    type_errors.push(TypeMismatch {
                        key: key.clone(),
                        expected: *expected,
                        actual: row.kind,
                    });
                }
            }
        }
    }

    ValidationReport {
        valid: missing_keys.is_empty() && type_errors.is_empty(),
        missing_keys,
        type_errors,
    }
}
