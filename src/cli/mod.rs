//! CLI support for caraway
//!
//! Provides programmatic access to the caraway CLI functionality for
//! embedding in other tools.

mod convert;
mod query;
mod validate;

pub use convert::{json_to_store, store_to_json};
pub use query::{execute_describe, execute_get, execute_list, GetOptions, ListOptions};
pub use validate::{execute_validate, render_report, ValidateOptions};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Parser error
    Parse(crate::ParseError),
    /// Query argument error
    Query(crate::QueryError),
    /// Named store error
    Store(crate::StoreError),
    /// JSON parsing error
    Json(serde_json::Error),
    /// Failed to read a source file
    Read { path: String, error: io::Error },
    /// IO error
    Io(io::Error),
    /// No input provided
    NoInput,
    /// Unknown type name in a validation rule
    UnknownType(String),
    /// Malformed `key:type` validation rule
    BadTypeRule(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Query(e) => write!(f, "Query error: {}", e),
            CliError::Store(e) => write!(f, "Store error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON: {}", e),
            CliError::Read { path, error } => write!(f, "Cannot read '{}': {}", path, error),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoInput => {
                write!(f, "No input provided. Use --file or pipe settings text to stdin.")
            }
            CliError::UnknownType(t) => write!(
                f,
                "Unknown type: '{}'. Expected one of string, numeric, boolean, null, parent, list_item.",
                t
            ),
            CliError::BadTypeRule(rule) => {
                write!(f, "Malformed type rule: '{}'. Expected KEY:TYPE.", rule)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Query(e) => Some(e),
            CliError::Store(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Read { error, .. } => Some(error),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::QueryError> for CliError {
    fn from(e: crate::QueryError) -> Self {
        CliError::Query(e)
    }
}

impl From<crate::StoreError> for CliError {
    fn from(e: crate::StoreError) -> Self {
        CliError::Store(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
