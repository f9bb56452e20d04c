use crate::parser::ParseError;

/// One classified physical line.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedLine {
    /// Count of leading space characters
    pub indent: usize,
    pub kind: LineKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LineKind {
    /// `key: value` pair; the value may be empty, one layer of quoting
    /// already stripped
    Pair {
        key: String,
        value: String,
        quoted: bool,
    },

    /// `- value` list entry
    Item { value: String },
}

/// Classify one physical line, without its trailing newline.
///
/// Returns `Ok(None)` for lines that produce no row: blank lines, full-line
/// comments, and lines that are neither a `key: value` pair nor a list item
/// (the latter are skipped, matching the permissive contract of the format).
/// Tab characters in the indentation are the one hard error.
pub fn classify(raw: &str, line_no: usize) -> Result<Option<ClassifiedLine>, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let leading = &raw[..raw.len() - raw.trim_start().len()];
    if leading.contains('\t') {
        return Err(ParseError::TabIndentation { line: line_no });
    }
    let indent = leading.chars().count();

    if let Some(rest) = trimmed.strip_prefix("- ") {
        return Ok(Some(ClassifiedLine {
            indent,
            kind: LineKind::Item {
                value: rest.trim().to_string(),
            },
        }));
    }

    let Some((key, value)) = trimmed.split_once(':') else {
        tracing::debug!(line = line_no, "skipping line without key separator");
        return Ok(None);
    };

    let key = key.trim();
    if key.is_empty() {
        tracing::debug!(line = line_no, "skipping line with empty key");
        return Ok(None);
    }

    let (value, quoted) = strip_quotes(value.trim());
    Ok(Some(ClassifiedLine {
        indent,
        kind: LineKind::Pair {
            key: key.to_string(),
            value,
            quoted,
        },
    }))
}

/// Strip exactly one layer of matching `"` or `'` quoting. No escape
/// processing; an unterminated quote is kept verbatim.
fn strip_quotes(value: &str) -> (String, bool) {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        (value[1..value.len() - 1].to_string(), true)
    } else {
        (value.to_string(), false)
    }
}

#[test]
fn test_classify_pair_and_item() {
    let line = classify("  max obs: 1000", 1).unwrap().unwrap();
    assert_eq!(line.indent, 2);
    assert_eq!(
        line.kind,
        LineKind::Pair {
            key: "max obs".to_string(),
            value: "1000".to_string(),
            quoted: false,
        }
    );

    let line = classify("  - BRA", 2).unwrap().unwrap();
    assert_eq!(
        line.kind,
        LineKind::Item {
            value: "BRA".to_string()
        }
    );
}

#[test]
fn test_classify_skips_comments_and_blanks() {
    assert_eq!(classify("# a comment", 1).unwrap(), None);
    assert_eq!(classify("   ", 2).unwrap(), None);
    assert_eq!(classify("no separator here", 3).unwrap(), None);
}

#[test]
fn test_quoted_value_keeps_one_layer() {
    let line = classify(r#"id: "42""#, 1).unwrap().unwrap();
    assert_eq!(
        line.kind,
        LineKind::Pair {
            key: "id".to_string(),
            value: "42".to_string(),
            quoted: true,
        }
    );

    // unterminated quote stays verbatim
    let line = classify(r#"id: "42"#, 1).unwrap().unwrap();
    assert_eq!(
        line.kind,
        LineKind::Pair {
            key: "id".to_string(),
            value: "\"42".to_string(),
            quoted: false,
        }
    );
}
