//! Execute query operations against a loaded store

use super::CliError;
use crate::query;
use crate::store::Store;

/// Options for the get command
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    /// Bare key or `parent:key` path
    pub path: String,
    /// Emit a JSON object instead of `name: value` lines
    pub json: bool,
}

/// Render the attributes of a path. An empty string means nothing matched.
pub fn execute_get(store: &Store, options: &GetOptions) -> Result<String, CliError> {
    let attrs = query::get(store, &options.path);

    if options.json {
        let map: serde_json::Map<String, serde_json::Value> = attrs
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect();
        return Ok(serde_json::to_string_pretty(&serde_json::Value::Object(map))?);
    }

    let mut out = String::new();
    for (name, value) in &attrs {
        out.push_str(&format!("{}: {}\n", name, value));
    }
    Ok(out)
}

/// Options for the list command
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub pattern: Option<String>,
    /// Match rows under the pattern instead of keys containing it
    pub children: bool,
    /// Treat the pattern as a regular expression
    pub regex: bool,
    /// Emit a JSON array instead of `key = value` lines
    pub json: bool,
}

pub fn execute_list(store: &Store, options: &ListOptions) -> Result<String, CliError> {
    let entries = match (&options.pattern, options.regex) {
        (Some(pattern), true) => query::list_regex(store, pattern)?,
        (pattern, _) => query::list(store, pattern.as_deref(), options.children),
    };

    if options.json {
        let items: Vec<serde_json::Value> = entries
            .into_iter()
            .map(|(k, v)| {
                serde_json::json!({
                    "key": k,
                    "value": v,
                })
            })
            .collect();
        return Ok(serde_json::to_string_pretty(&serde_json::Value::Array(items))?);
    }

    let mut out = String::new();
    for (key, value) in &entries {
        if value.is_empty() {
            out.push_str(&format!("{}\n", key));
        } else {
            out.push_str(&format!("{} = {}\n", key, value));
        }
    }
    Ok(out)
}

/// Render the bounded-depth outline of a store.
pub fn execute_describe(store: &Store, max_level: u32) -> String {
    query::describe(store, max_level)
}
