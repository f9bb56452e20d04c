// tests/integration_tests.rs

use caraway::cli::{
    execute_get, execute_list, execute_validate, json_to_store, render_report, store_to_json,
    GetOptions, ListOptions, ValidateOptions,
};
use caraway::{parse_named, to_yaml, Store, StoreError, StoreSet};

fn project_store(name: &str) -> Store {
    parse_named(
        "name: My Project\n\
         settings:\n\
         \x20 debug: true\n\
         \x20 max_obs: 1000\n\
         countries:\n\
         \x20 - BRA\n\
         \x20 - ARG\n",
        name,
        Some("conf/project.yaml"),
    )
    .unwrap()
}

// ============================================================================
// Named stores
// ============================================================================

#[test]
fn test_store_set_addresses_stores_by_name() {
    let mut stores = StoreSet::new();
    stores.insert(project_store("project"));
    stores.insert(project_store("fallback"));

    assert_eq!(stores.names(), vec!["fallback", "project"]);
    assert_eq!(stores.get("project").unwrap().len(), 7);
    assert_eq!(
        stores.get("project").unwrap().source(),
        Some("conf/project.yaml")
    );

    let err = stores.get("missing").unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    assert_eq!(err.to_string(), "unknown store: 'missing'");
}

#[test]
fn test_stores_are_independent() {
    let mut stores = StoreSet::new();
    stores.insert(project_store("a"));
    stores.insert(project_store("b"));

    stores.get_mut("a").unwrap().clear();
    assert!(stores.get("a").unwrap().is_empty());
    assert_eq!(stores.get("b").unwrap().len(), 7);
}

// ============================================================================
// CLI command layer
// ============================================================================

#[test]
fn test_execute_get_renders_lines_and_json() {
    let store = project_store("default");

    let text = execute_get(
        &store,
        &GetOptions {
            path: "settings".to_string(),
            json: false,
        },
    )
    .unwrap();
    assert_eq!(text, "debug: 1\nmax_obs: 1000\n");

    let json = execute_get(
        &store,
        &GetOptions {
            path: "settings".to_string(),
            json: true,
        },
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["max_obs"], "1000");
}

#[test]
fn test_execute_list_children() {
    let store = project_store("default");
    let text = execute_list(
        &store,
        &ListOptions {
            pattern: Some("countries".to_string()),
            children: true,
            regex: false,
            json: false,
        },
    )
    .unwrap();
    assert_eq!(text, "1 = BRA\n2 = ARG\n");
}

#[test]
fn test_execute_validate_and_render() {
    let store = project_store("default");

    let report = execute_validate(
        &store,
        &ValidateOptions {
            required: vec!["settings".to_string(), "missing_block".to_string()],
            types: vec!["settings_debug:numeric".to_string(), "name:boolean".to_string()],
        },
    )
    .unwrap();

    assert!(!report.valid);
    let rendered = render_report(&report);
    assert!(rendered.contains("missing key: missing_block"));
    assert!(rendered.contains("type error: 'name' expected boolean, found string"));

    let ok = execute_validate(
        &store,
        &ValidateOptions {
            required: vec!["name".to_string()],
            types: vec![],
        },
    )
    .unwrap();
    assert_eq!(render_report(&ok), "ok: all checks passed\n");
}

#[test]
fn test_validate_rejects_malformed_rules() {
    let store = project_store("default");
    let err = execute_validate(
        &store,
        &ValidateOptions {
            required: vec![],
            types: vec!["settings_debug:floating".to_string()],
        },
    )
    .unwrap_err();
    assert!(err.to_string().contains("Unknown type"));
}

// ============================================================================
// JSON conversion
// ============================================================================

#[test]
fn test_store_to_json_rebuilds_nesting() {
    let store = project_store("default");
    let value = store_to_json(&store);

    assert_eq!(
        value,
        serde_json::json!({
            "name": "My Project",
            "settings": { "debug": true, "max_obs": 1000 },
            "countries": ["BRA", "ARG"],
        })
    );
}

#[test]
fn test_json_to_store_flattens() {
    let value = serde_json::json!({
        "name": "My Project",
        "settings": { "debug": true, "max_obs": 1000 },
        "countries": ["BRA", "ARG"],
    });
    let store = json_to_store(&value, "imported");

    assert_eq!(store.find_by_key("settings_debug").unwrap().value, "1");
    assert_eq!(store.find_by_key("settings_max_obs").unwrap().value, "1000");
    assert_eq!(store.find_by_key("countries_2").unwrap().value, "ARG");
    assert_eq!(store.find_by_key("countries_2").unwrap().parent, "countries");
}

#[test]
fn test_json_to_store_serializes_back_to_text() {
    let value = serde_json::json!({
        "settings": { "debug": true },
    });
    let store = json_to_store(&value, "imported");
    assert_eq!(to_yaml(&store), "settings:\n  debug: true\n");
}

#[test]
fn test_text_json_text_round_trip() {
    let store = project_store("default");
    let via_json = json_to_store(&store_to_json(&store), "back");

    // same keys and values either way; row order may differ because JSON
    // objects sort their keys
    let mut original: Vec<(String, String)> = store
        .rows()
        .iter()
        .map(|r| (r.key.clone(), r.value.clone()))
        .collect();
    let mut converted: Vec<(String, String)> = via_json
        .rows()
        .iter()
        .map(|r| (r.key.clone(), r.value.clone()))
        .collect();
    original.sort();
    converted.sort();
    assert_eq!(original, converted);
}
