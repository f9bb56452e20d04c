//! Indentation-driven parsing of settings text into a flat [`Store`].
//!
//! The parser walks the document line by line. Nesting is tracked with an
//! explicit stack of open parent frames; a parent row only becomes a frame
//! once a deeper-indented line actually arrives, so childless parents never
//! distort the stack. List items attach to the most recently stored
//! non-list key and are numbered from 1, restarting under every new key.

use crate::line::{classify, LineKind};
use crate::path;
use crate::row::{Row, RowType};
use crate::scalar;
use crate::store::Store;

/// Hard failures while reading source text.
///
/// Within the supported subset, malformed lines never fail the parse; they
/// are skipped by the classifier. Tabs in indentation are rejected because
/// there is no defined tab width to resolve them against.
#[derive(Debug)]
pub enum ParseError {
    /// Tab character in leading indentation
    TabIndentation { line: usize },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::TabIndentation { line } => {
                write!(f, "line {}: tab indentation is not supported, use spaces", line)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// One open parent in the indentation stack.
#[derive(Debug, Clone)]
struct Frame {
    indent: usize,
    key: String,
}

/// Mutable parsing context, threaded through the line loop.
#[derive(Debug, Default)]
struct ParseContext {
    /// Currently open parent chain, outermost first
    frames: Vec<Frame>,

    /// Parent row stored on a previous line, promoted to a frame once a
    /// deeper line arrives
    pending: Option<Frame>,

    /// Indent of the previously processed key line
    current_indent: usize,

    /// Full key of the most recently stored non-list row; implicit parent
    /// for upcoming list items
    last_key: String,

    /// Level of that row
    last_level: u32,

    /// Running index of consecutive list items, reset on every key line
    list_index: usize,
}

/// Parse settings text into an anonymous store named `default`.
pub fn parse(text: &str) -> Result<Store, ParseError> {
    parse_named(text, "default", None)
}

/// Parse settings text into a named store, optionally recording the source
/// path for provenance.
pub fn parse_named(text: &str, name: &str, source: Option<&str>) -> Result<Store, ParseError> {
    let mut store = match source {
        Some(p) => Store::with_source(name, p),
        None => Store::new(name),
    };
    let mut ctx = ParseContext::default();

    for (idx, raw) in text.lines().enumerate() {
        let Some(line) = classify(raw, idx + 1)? else {
            continue;
        };
        match line.kind {
            LineKind::Pair { key, value, quoted } => {
                store_pair(&mut store, &mut ctx, line.indent, &key, &value, quoted);
            }
            LineKind::Item { value } => {
                store_item(&mut store, &mut ctx, &value);
            }
        }
    }

    Ok(store)
}

fn store_pair(
    store: &mut Store,
    ctx: &mut ParseContext,
    indent: usize,
    key: &str,
    value: &str,
    quoted: bool,
) {
    if indent > ctx.current_indent {
        // Deeper: the previous parent row (if any) opens a new frame. A
        // deeper line under a leaf has no frame to open and stays at the
        // enclosing level.
        if let Some(frame) = ctx.pending.take() {
            ctx.frames.push(frame);
        }
    } else if indent < ctx.current_indent {
        // Shallower: close every frame at or beyond the new indent. An
        // indent that matches no recorded frame lands under the deepest
        // frame whose indent is strictly smaller.
        ctx.pending = None;
        while ctx.frames.last().is_some_and(|f| f.indent >= indent) {
            ctx.frames.pop();
        }
    } else {
        ctx.pending = None;
    }

    let parent = ctx.frames.last().map(|f| f.key.clone()).unwrap_or_default();
    let level = ctx.frames.len() as u32 + 1;
    let full_key = path::join(&parent, key);
    let (kind, stored) = scalar::infer(value, quoted);
    tracing::trace!(key = %full_key, level, kind = %kind, "store row");

    if kind == RowType::Parent {
        ctx.pending = Some(Frame {
            indent,
            key: full_key.clone(),
        });
    }

    store.insert(Row {
        key: full_key.clone(),
        label: key.to_string(),
        value: stored,
        level,
        parent,
        kind,
    });

    ctx.last_key = full_key;
    ctx.last_level = level;
    ctx.current_indent = indent;
    ctx.list_index = 0;
}

fn store_item(store: &mut Store, ctx: &mut ParseContext, value: &str) {
    if ctx.last_key.is_empty() {
        tracing::debug!("skipping list item with no enclosing key");
        return;
    }

    ctx.list_index += 1;
    store.insert(Row {
        key: format!("{}_{}", ctx.last_key, ctx.list_index),
        label: ctx.list_index.to_string(),
        value: value.to_string(),
        level: ctx.last_level + 1,
        parent: ctx.last_key.clone(),
        kind: RowType::ListItem,
    });
}
