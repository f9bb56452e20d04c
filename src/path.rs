//! Key sanitization and hierarchical path handling.
//!
//! Flattened keys join their path segments with `_`, so every segment is
//! sanitized (spaces, `-`, `.` become `_`) before joining. The `parent:key`
//! colon syntax used by `get` resolves to a flat search prefix here.

/// Sanitize one path segment for use inside a flattened key.
///
/// # Examples
/// ```
/// use caraway::path::sanitize;
///
/// assert_eq!(sanitize("max obs"), "max_obs");
/// assert_eq!(sanitize("CME-MRY0T4"), "CME_MRY0T4");
/// assert_eq!(sanitize("v1.2"), "v1_2");
/// ```
pub fn sanitize(segment: &str) -> String {
    segment
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' | '.' => '_',
            c => c,
        })
        .collect()
}

/// Join a parent key and a local label into a full key.
pub fn join(parent: &str, label: &str) -> String {
    if parent.is_empty() {
        sanitize(label)
    } else {
        format!("{}_{}", parent, sanitize(label))
    }
}

/// Resolve `get`-style path notation into a flat search prefix.
///
/// `parent:key` computes `parent + "_" + key`; a bare key passes through.
/// Both sides are sanitized the same way the parser sanitizes labels.
pub fn search_prefix(path: &str) -> String {
    match path.split_once(':') {
        Some((parent, key)) => format!("{}_{}", sanitize(parent), sanitize(key)),
        None => sanitize(path),
    }
}

/// Strip `prefix + "_"` from a key, yielding the attribute name.
pub fn strip_stem<'a>(key: &'a str, prefix: &str) -> Option<&'a str> {
    key.strip_prefix(prefix).and_then(|rest| rest.strip_prefix('_'))
}

/// True when `key` addresses an immediate child of `prefix`: exactly one
/// underscore-delimited segment remains after the stem.
///
/// Only a fallback heuristic. A child label that itself contained `_` (or a
/// sanitized space) is indistinguishable from a grandchild once flattened,
/// which is why parent linkage is preferred wherever it is available.
pub fn is_immediate_child(key: &str, prefix: &str) -> bool {
    match strip_stem(key, prefix) {
        Some(rest) => !rest.is_empty() && !rest.contains('_'),
        None => false,
    }
}

#[test]
fn test_search_prefix_colon_syntax() {
    assert_eq!(search_prefix("indicators:CME_MRY0T4"), "indicators_CME_MRY0T4");
    assert_eq!(search_prefix("settings"), "settings");
    assert_eq!(search_prefix("a b:c-d"), "a_b_c_d");
}

#[test]
fn test_immediate_child() {
    assert!(is_immediate_child("countries_1", "countries"));
    assert!(!is_immediate_child("countries_a_b", "countries"));
    assert!(!is_immediate_child("countries", "countries"));
    assert!(!is_immediate_child("other_1", "countries"));
}
