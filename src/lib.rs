pub mod line;
pub mod output;
pub mod parser;
pub mod path;
pub mod query;
pub mod row;
pub mod scalar;
pub mod store;

#[cfg(feature = "cli")]
pub mod cli;

pub use line::{ClassifiedLine, LineKind};
pub use output::{to_yaml, to_yaml_with, YamlPrinter};
pub use parser::{parse, parse_named, ParseError};
pub use query::{describe, get, list, list_regex, validate, QueryError, TypeMismatch, ValidationReport};
pub use row::{Row, RowType};
pub use store::{Store, StoreError, StoreSet};
