//! Run required-key and declared-type checks from CLI rules

use super::CliError;
use crate::query::{self, ValidationReport};
use crate::row::RowType;
use crate::store::Store;

/// Options for the validate command
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Keys that must exist as a leaf or as a container
    pub required: Vec<String>,
    /// `key:type` rules
    pub types: Vec<String>,
}

pub fn execute_validate(store: &Store, options: &ValidateOptions) -> Result<ValidationReport, CliError> {
    let mut typed: Vec<(String, RowType)> = Vec::new();
    for rule in &options.types {
        let Some((key, type_name)) = rule.rsplit_once(':') else {
            return Err(CliError::BadTypeRule(rule.clone()));
        };
        let expected = RowType::from_name(type_name)
            .ok_or_else(|| CliError::UnknownType(type_name.to_string()))?;
        typed.push((key.to_string(), expected));
    }

    Ok(query::validate(store, &options.required, &typed))
}

/// Render a report the way the binary prints it: one line per finding,
/// or a single ok line.
pub fn render_report(report: &ValidationReport) -> String {
    if report.valid {
        return "ok: all checks passed\n".to_string();
    }

    let mut out = String::new();
    for key in &report.missing_keys {
        out.push_str(&format!("missing key: {}\n", key));
    }
    for e in &report.type_errors {
        out.push_str(&format!(
            "type error: '{}' expected {}, found {}\n",
            e.key, e.expected, e.actual
        ));
    }
    out
}
