//! Text serialization for flat stores.
//!
//! Walks a [`Store`] in row order and regenerates indented settings text,
//! the inverse of the parser for the supported subset.
//!
//! # Features
//!
//! - **Configurable indentation** via [`YamlPrinter::new`] - default 2 spaces
//! - **Header comments** via [`YamlPrinter::with_header`]
//! - **Round-trip safe scalars** - booleans re-emit as `true`/`false` and
//!   string values that would re-parse as another type are quoted
//!
//! # Lossy cases
//!
//! Rows with an empty value that are not parents (`null` and empty-string
//! scalars) produce no output line. A serialize/parse round trip drops them;
//! every non-empty leaf survives with its key, value, and type intact.
//!
//! # Examples
//!
//! ```
//! use caraway::{parse, to_yaml};
//!
//! let store = parse("settings:\n  debug: true\n").unwrap();
//! assert_eq!(to_yaml(&store), "settings:\n  debug: true\n");
//! ```

use crate::row::RowType;
use crate::scalar;
use crate::store::Store;

pub struct YamlPrinter {
    indent_width: usize,
    header: Option<String>,
}

impl YamlPrinter {
    pub fn new(indent_width: usize) -> Self {
        YamlPrinter {
            indent_width,
            header: None,
        }
    }

    /// Emit the given lines as `#`-prefixed comments before the first row.
    pub fn with_header(mut self, header: &str) -> Self {
        self.header = Some(header.to_string());
        self
    }

    pub fn print(&self, store: &Store) -> String {
        let mut out = String::new();

        if let Some(header) = &self.header {
            for line in header.lines() {
                out.push_str("# ");
                out.push_str(line);
                out.push('\n');
            }
        }

        for row in store.rows() {
            let spaces = " ".repeat((row.level as usize - 1) * self.indent_width);
            match row.kind {
                RowType::Parent => {
                    out.push_str(&spaces);
                    out.push_str(&row.label);
                    out.push_str(":\n");
                }
                RowType::ListItem => {
                    if row.value.is_empty() {
                        continue;
                    }
                    out.push_str(&spaces);
                    out.push_str("- ");
                    out.push_str(&row.value);
                    out.push('\n');
                }
                RowType::Boolean => {
                    let literal = if row.value == "1" { "true" } else { "false" };
                    out.push_str(&format!("{}{}: {}\n", spaces, row.label, literal));
                }
                RowType::Numeric => {
                    out.push_str(&format!("{}{}: {}\n", spaces, row.label, row.value));
                }
                RowType::Null => {
                    // no output line; lossy on round trip
                }
                RowType::String => {
                    if row.value.is_empty() {
                        // same lossy case as null
                        continue;
                    }
                    if scalar::needs_quoting(&row.value) {
                        out.push_str(&format!("{}{}: \"{}\"\n", spaces, row.label, row.value));
                    } else {
                        out.push_str(&format!("{}{}: {}\n", spaces, row.label, row.value));
                    }
                }
            }
        }

        out
    }
}

// Convenience functions

/// Serialize a store with the default 2-space indentation and no header.
pub fn to_yaml(store: &Store) -> String {
    YamlPrinter::new(2).print(store)
}

/// Serialize a store with explicit indentation width and an optional
/// header comment block.
pub fn to_yaml_with(store: &Store, indent_width: usize, header: Option<&str>) -> String {
    let printer = YamlPrinter::new(indent_width);
    match header {
        Some(h) => printer.with_header(h).print(store),
        None => printer.print(store),
    }
}
