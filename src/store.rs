//! The flat, ordered configuration table and the named-store registry.

use crate::row::Row;
use std::collections::HashMap;

/// A named, mutable, ordered collection of [`Row`]s.
///
/// This is the parser's only write target and everything downstream
/// (queries, validation, serialization) reads the same five-column table.
/// Stores are independent: any number of them can coexist with no shared
/// state, which is how the "default store" and every named frame are
/// modelled uniformly.
///
/// # Examples
///
/// ```
/// use caraway::parse;
///
/// let store = parse("name: My Project\n").unwrap();
/// assert_eq!(store.find_by_key("name").unwrap().value, "My Project");
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    name: String,
    source: Option<String>,
    rows: Vec<Row>,
}

impl Store {
    pub fn new(name: &str) -> Self {
        Store {
            name: name.to_string(),
            source: None,
            rows: Vec::new(),
        }
    }

    /// A store that remembers the file it was read from.
    pub fn with_source(name: &str, source: &str) -> Self {
        Store {
            name: name.to_string(),
            source: Some(source.to_string()),
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Provenance path, when the store was read from a file.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Rows in document order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Insert a row, keeping keys unique: a later row with an existing key
    /// replaces the earlier one in place (last write wins, original
    /// position kept).
    pub fn insert(&mut self, row: Row) {
        if let Some(existing) = self.rows.iter_mut().find(|r| r.key == row.key) {
            tracing::debug!(key = %row.key, "key collision, replacing earlier row");
            *existing = row;
        } else {
            self.rows.push(row);
        }
    }

    pub fn find_by_key(&self, key: &str) -> Option<&Row> {
        self.rows.iter().find(|r| r.key == key)
    }

    /// Rows whose `parent` column is exactly `parent_key`.
    pub fn find_children(&self, parent_key: &str) -> Vec<&Row> {
        self.rows.iter().filter(|r| r.parent == parent_key).collect()
    }

    /// Fallback scan on the key column, for callers that cannot rely on
    /// parent linkage.
    pub fn find_by_key_prefix(&self, prefix: &str) -> Vec<&Row> {
        self.rows.iter().filter(|r| r.key.starts_with(prefix)).collect()
    }

    /// Destroy all rows. The name and provenance survive.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

/// Errors for operations addressing stores by name.
#[derive(Debug)]
pub enum StoreError {
    /// Caller referenced a store name that does not exist
    NotFound(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(name) => write!(f, "unknown store: '{}'", name),
        }
    }
}

impl std::error::Error for StoreError {}

/// A registry of independently-named stores.
///
/// Addressing an unknown name is a hard error, unlike an empty query
/// result, which is not.
#[derive(Debug, Default)]
pub struct StoreSet {
    stores: HashMap<String, Store>,
}

impl StoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a store under its own name, replacing any previous store
    /// with that name.
    pub fn insert(&mut self, store: Store) {
        self.stores.insert(store.name().to_string(), store);
    }

    pub fn get(&self, name: &str) -> Result<&Store, StoreError> {
        self.stores
            .get(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Store, StoreError> {
        self.stores
            .get_mut(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    pub fn remove(&mut self, name: &str) -> Result<Store, StoreError> {
        self.stores
            .remove(name)
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }

    /// Registered names, sorted for deterministic listings.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.stores.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
