// tests/parser_tests.rs

use caraway::{parse, ParseError, RowType, Store};
use pretty_assertions::assert_eq;

fn parse_text(text: &str) -> Store {
    parse(text).unwrap()
}

fn keys(store: &Store) -> Vec<&str> {
    store.rows().iter().map(|r| r.key.as_str()).collect()
}

fn levels(store: &Store) -> Vec<u32> {
    store.rows().iter().map(|r| r.level).collect()
}

// ============================================================================
// The reference document
// ============================================================================

#[test]
fn test_reference_document() {
    let store = parse_text(
        "name: My Project\n\
         settings:\n\
         \x20 debug: true\n\
         \x20 max_obs: 1000\n\
         countries:\n\
         \x20 - BRA\n\
         \x20 - ARG\n",
    );

    assert_eq!(store.len(), 7);
    assert_eq!(
        keys(&store),
        vec![
            "name",
            "settings",
            "settings_debug",
            "settings_max_obs",
            "countries",
            "countries_1",
            "countries_2",
        ]
    );

    let name = store.find_by_key("name").unwrap();
    assert_eq!(name.kind, RowType::String);
    assert_eq!(name.value, "My Project");
    assert_eq!(name.level, 1);
    assert_eq!(name.parent, "");

    let settings = store.find_by_key("settings").unwrap();
    assert_eq!(settings.kind, RowType::Parent);
    assert_eq!(settings.value, "");

    let debug = store.find_by_key("settings_debug").unwrap();
    assert_eq!(debug.kind, RowType::Boolean);
    assert_eq!(debug.value, "1");
    assert_eq!(debug.parent, "settings");
    assert_eq!(debug.level, 2);

    let max_obs = store.find_by_key("settings_max_obs").unwrap();
    assert_eq!(max_obs.kind, RowType::Numeric);
    assert_eq!(max_obs.value, "1000");

    let first = store.find_by_key("countries_1").unwrap();
    assert_eq!(first.kind, RowType::ListItem);
    assert_eq!(first.value, "BRA");
    assert_eq!(first.parent, "countries");
    assert_eq!(first.level, 2);

    let second = store.find_by_key("countries_2").unwrap();
    assert_eq!(second.value, "ARG");
}

// ============================================================================
// Hierarchy resolution
// ============================================================================

#[test]
fn test_indentation_monotonicity() {
    let store = parse_text(
        "a:\n\
         \x20 b:\n\
         \x20   c: 1\n\
         \x20 d: 2\n\
         e: 3\n",
    );
    assert_eq!(levels(&store), vec![1, 2, 3, 2, 1]);
    assert_eq!(keys(&store), vec!["a", "a_b", "a_b_c", "a_d", "e"]);
}

#[test]
fn test_dedent_to_unrecorded_indent_joins_deepest_shallower_frame() {
    // c sits at indent 4; e dedents to 3, which matches no open frame.
    // Every frame at indent >= 3 closes and e lands under a_b, as a
    // sibling of c.
    let store = parse_text("a:\n  b:\n    c: 1\n   e: 5\n");

    let e = store.find_by_key("a_b_e").unwrap();
    assert_eq!(e.parent, "a_b");
    assert_eq!(e.level, 3);
}

#[test]
fn test_sibling_parents_do_not_nest() {
    let store = parse_text("a:\n  x: 1\nb:\n  y: 2\n");
    assert_eq!(keys(&store), vec!["a", "a_x", "b", "b_y"]);
    assert_eq!(store.find_by_key("b").unwrap().level, 1);
    assert_eq!(store.find_by_key("b_y").unwrap().parent, "b");
}

#[test]
fn test_childless_parent_stays_open_only_until_sibling() {
    let store = parse_text("a:\nb:\n  y: 2\n");
    let y = store.find_by_key("b_y").unwrap();
    assert_eq!(y.parent, "b");
    assert_eq!(store.find_by_key("a").unwrap().kind, RowType::Parent);
}

#[test]
fn test_deeper_line_under_leaf_stays_at_enclosing_level() {
    // "b" is indented under a leaf, which opens no frame
    let store = parse_text("a: 1\n  b: 2\n");
    let b = store.find_by_key("b").unwrap();
    assert_eq!(b.level, 1);
    assert_eq!(b.parent, "");
}

// ============================================================================
// Keys and labels
// ============================================================================

#[test]
fn test_key_sanitization() {
    let store = parse_text("data source: SDMX\nretry-count: 3\nv1.2: ok\n");
    assert_eq!(keys(&store), vec!["data_source", "retry_count", "v1_2"]);
    // the original spelling survives on the label
    assert_eq!(store.find_by_key("data_source").unwrap().label, "data source");
}

#[test]
fn test_key_collision_last_wins_in_place() {
    let store = parse_text("a: 1\nb: 2\na: 3\n");
    assert_eq!(store.len(), 2);
    assert_eq!(keys(&store), vec!["a", "b"]);
    assert_eq!(store.find_by_key("a").unwrap().value, "3");
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_list_index_resets_per_parent() {
    let store = parse_text(
        "north:\n\
         \x20 - CAN\n\
         \x20 - USA\n\
         south:\n\
         \x20 - BRA\n",
    );
    assert_eq!(
        keys(&store),
        vec!["north", "north_1", "north_2", "south", "south_1"]
    );
    assert_eq!(store.find_by_key("south_1").unwrap().value, "BRA");
}

#[test]
fn test_orphan_list_item_is_skipped() {
    let store = parse_text("- stray\nname: x\n");
    assert_eq!(keys(&store), vec!["name"]);
}

// ============================================================================
// Skips and errors
// ============================================================================

#[test]
fn test_comments_blanks_and_bare_lines_are_skipped() {
    let store = parse_text(
        "# header comment\n\
         \n\
         name: x\n\
         just some words\n\
         count: 2\n",
    );
    assert_eq!(keys(&store), vec!["name", "count"]);
}

#[test]
fn test_trailing_inline_comment_is_not_stripped() {
    let store = parse_text("name: value # not a comment\n");
    assert_eq!(store.find_by_key("name").unwrap().value, "value # not a comment");
}

#[test]
fn test_tab_indentation_is_rejected() {
    let err = parse("a:\n\tb: 1\n").unwrap_err();
    assert!(matches!(err, ParseError::TabIndentation { line: 2 }));
    assert!(err.to_string().contains("line 2"));
}

// ============================================================================
// Type inference through the parser
// ============================================================================

#[test]
fn test_scalar_types_from_source() {
    let store = parse_text(
        "a: true\n\
         b: No\n\
         c: ~\n\
         d: null\n\
         e: 3.14\n\
         f: \"42\"\n\
         g: plain\n\
         h: ''\n",
    );

    let kind = |k: &str| store.find_by_key(k).unwrap().kind;
    let value = |k: &str| store.find_by_key(k).unwrap().value.clone();

    assert_eq!((kind("a"), value("a")), (RowType::Boolean, "1".to_string()));
    assert_eq!((kind("b"), value("b")), (RowType::Boolean, "0".to_string()));
    assert_eq!((kind("c"), value("c")), (RowType::Null, String::new()));
    assert_eq!((kind("d"), value("d")), (RowType::Null, String::new()));
    assert_eq!((kind("e"), value("e")), (RowType::Numeric, "3.14".to_string()));
    assert_eq!((kind("f"), value("f")), (RowType::String, "42".to_string()));
    assert_eq!((kind("g"), value("g")), (RowType::String, "plain".to_string()));
    // quoted empty string is a string, not a parent
    assert_eq!((kind("h"), value("h")), (RowType::String, String::new()));
}

#[test]
fn test_value_with_colon_splits_at_first() {
    let store = parse_text("url: http://example.org/data\n");
    assert_eq!(store.find_by_key("url").unwrap().value, "http://example.org/data");
}
