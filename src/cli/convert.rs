//! JSON <-> Store conversion utilities
//!
//! Lists are scalars-only in both directions, mirroring the parser.

use crate::path;
use crate::row::{Row, RowType};
use crate::scalar;
use crate::store::Store;

/// Rebuild the nested structure of a store as a JSON value.
///
/// Parent rows become objects, runs of list items become arrays, and leaf
/// rows become typed scalars (`"1"`-coded booleans back to `true`/`false`,
/// numerics to JSON numbers).
pub fn store_to_json(store: &Store) -> serde_json::Value {
    build_level(store, "")
}

fn build_level(store: &Store, parent_key: &str) -> serde_json::Value {
    let children = store.find_children(parent_key);

    if !children.is_empty() && children.iter().all(|r| r.kind == RowType::ListItem) {
        return serde_json::Value::Array(children.iter().map(|r| item_to_json(&r.value)).collect());
    }

    let mut map = serde_json::Map::new();
    for row in children {
        match row.kind {
            RowType::Parent => {
                map.insert(row.label.clone(), build_level(store, &row.key));
            }
            RowType::ListItem => {
                // list items mixed with keyed siblings have no JSON shape
                tracing::debug!(key = %row.key, "dropping list item with keyed siblings");
            }
            _ => {
                map.insert(row.label.clone(), leaf_to_json(row));
            }
        }
    }
    serde_json::Value::Object(map)
}

fn leaf_to_json(row: &Row) -> serde_json::Value {
    match row.kind {
        RowType::Numeric => number_from_str(&row.value),
        RowType::Boolean => serde_json::Value::Bool(row.value == "1"),
        RowType::Null => serde_json::Value::Null,
        _ => serde_json::Value::String(row.value.clone()),
    }
}

/// List item values are stored verbatim, so type them the same way the
/// parser would have typed an unquoted scalar.
fn item_to_json(value: &str) -> serde_json::Value {
    let (kind, stored) = scalar::infer(value, false);
    match kind {
        RowType::Numeric => number_from_str(&stored),
        RowType::Boolean => serde_json::Value::Bool(stored == "1"),
        RowType::Null => serde_json::Value::Null,
        _ => serde_json::Value::String(value.to_string()),
    }
}

fn number_from_str(raw: &str) -> serde_json::Value {
    if let Ok(i) = raw.parse::<i64>() {
        return serde_json::Value::Number(i.into());
    }
    raw.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|| serde_json::Value::String(raw.to_string()))
}

/// Flatten a JSON document into a named store.
///
/// Objects become parent rows, arrays become list-item runs, scalars become
/// typed leaves. Non-scalar array elements have no row shape and are stored
/// as empty strings.
pub fn json_to_store(value: &serde_json::Value, name: &str) -> Store {
    let mut store = Store::new(name);
    if let serde_json::Value::Object(map) = value {
        for (label, child) in map {
            flatten(&mut store, "", 1, label, child);
        }
    }
    store
}

fn flatten(store: &mut Store, parent: &str, level: u32, label: &str, value: &serde_json::Value) {
    let key = path::join(parent, label);
    match value {
        serde_json::Value::Object(map) => {
            store.insert(container_row(&key, label, level, parent));
            for (child_label, child) in map {
                flatten(store, &key, level + 1, child_label, child);
            }
        }
        serde_json::Value::Array(items) => {
            store.insert(container_row(&key, label, level, parent));
            for (i, item) in items.iter().enumerate() {
                let index = i + 1;
                store.insert(Row {
                    key: format!("{}_{}", key, index),
                    label: index.to_string(),
                    value: item_text(item),
                    level: level + 1,
                    parent: key.clone(),
                    kind: RowType::ListItem,
                });
            }
        }
        serde_json::Value::Bool(b) => {
            store.insert(leaf_row(&key, label, level, parent, RowType::Boolean, if *b { "1" } else { "0" }));
        }
        serde_json::Value::Number(n) => {
            store.insert(leaf_row(&key, label, level, parent, RowType::Numeric, &n.to_string()));
        }
        serde_json::Value::Null => {
            store.insert(leaf_row(&key, label, level, parent, RowType::Null, ""));
        }
        serde_json::Value::String(s) => {
            store.insert(leaf_row(&key, label, level, parent, RowType::String, s));
        }
    }
}

fn container_row(key: &str, label: &str, level: u32, parent: &str) -> Row {
    Row {
        key: key.to_string(),
        label: label.to_string(),
        value: String::new(),
        level,
        parent: parent.to_string(),
        kind: RowType::Parent,
    }
}

fn leaf_row(key: &str, label: &str, level: u32, parent: &str, kind: RowType, value: &str) -> Row {
    Row {
        key: key.to_string(),
        label: label.to_string(),
        value: value.to_string(),
        level,
        parent: parent.to_string(),
        kind,
    }
}

fn item_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Null => "~".to_string(),
        _ => {
            tracing::debug!("dropping nested value inside list");
            String::new()
        }
    }
}
