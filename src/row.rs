/// A single entry in the flat configuration table.
///
/// Every parsed line becomes one `Row`. Hierarchy is preserved through the
/// `key`/`parent`/`level` columns rather than through nesting, so the whole
/// document can be scanned, filtered, and rewritten as an ordered table.
///
/// # Examples
///
/// ```
/// use caraway::{Row, RowType};
///
/// let row = Row {
///     key: "settings_debug".to_string(),
///     label: "debug".to_string(),
///     value: "1".to_string(),
///     level: 2,
///     parent: "settings".to_string(),
///     kind: RowType::Boolean,
/// };
/// assert!(row.kind.is_leaf());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Full hierarchical identifier, path segments joined by `_`
    pub key: String,

    /// The original local label as written in the source, before
    /// sanitization and flattening
    pub label: String,

    /// Stored value; empty for parent rows and nulls
    pub value: String,

    /// Nesting depth, 1 = root
    pub level: u32,

    /// Full key of the enclosing mapping key, empty at root
    pub parent: String,

    /// Inferred scalar or structural type
    pub kind: RowType,
}

impl Row {
    /// True for rows with no ancestor indentation.
    pub fn is_root(&self) -> bool {
        self.parent.is_empty()
    }
}

/// The closed set of row types.
///
/// Structural rows (`Parent`, `ListItem`) come from the hierarchy resolver;
/// the scalar types come from [`crate::scalar::infer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowType {
    /// Plain or quoted text
    String,

    /// Integer or decimal number
    Numeric,

    /// `true`/`yes` or `false`/`no`, stored as `"1"` / `"0"`
    Boolean,

    /// `null`, `~`, stored as the empty string
    Null,

    /// A key whose value was empty at declaration time; container for
    /// deeper lines
    Parent,

    /// One `- value` entry, indexed sequentially under its enclosing key
    ListItem,
}

impl RowType {
    /// Anything that carries its own value rather than enclosing children.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, RowType::Parent)
    }

    pub fn name(&self) -> &'static str {
        match self {
            RowType::String => "string",
            RowType::Numeric => "numeric",
            RowType::Boolean => "boolean",
            RowType::Null => "null",
            RowType::Parent => "parent",
            RowType::ListItem => "list_item",
        }
    }

    /// Parse a type name as used in validation rules.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(RowType::String),
            "numeric" => Some(RowType::Numeric),
            "boolean" => Some(RowType::Boolean),
            "null" => Some(RowType::Null),
            "parent" => Some(RowType::Parent),
            "list_item" => Some(RowType::ListItem),
            _ => None,
        }
    }
}

impl std::fmt::Display for RowType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
