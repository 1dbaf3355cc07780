use audit_core::formats::{catalog_to_json, load_catalog, parse_catalog};
use audit_core::{Catalog, StyleTag};
use camino::Utf8PathBuf;

#[test]
fn parses_catalog_json() {
    let json = r#"{
        "steps": [
            { "message": "BOOT", "style": "info", "delay_ms": 10 },
            { "message": "FAIL", "style": "error", "delay_ms": 20 }
        ]
    }"#;
    let catalog = parse_catalog(json).unwrap();
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.steps()[1].style, StyleTag::Error);
}

#[test]
fn invalid_catalog_json_fails_at_load() {
    let json = r#"{ "steps": [
        { "message": "A", "style": "info", "delay_ms": 20 },
        { "message": "B", "style": "info", "delay_ms": 10 }
    ] }"#;
    let err = parse_catalog(json).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("not after the previous step"), "{chain}");
}

#[test]
fn empty_steps_fail_at_load() {
    assert!(parse_catalog(r#"{ "steps": [] }"#).is_err());
}

#[test]
fn builtin_catalog_survives_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("catalog.json")).unwrap();

    let json = catalog_to_json(&Catalog::shadow_audit()).unwrap();
    std::fs::write(&path, json).unwrap();

    let loaded = load_catalog(&path).unwrap();
    assert_eq!(loaded, Catalog::shadow_audit());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = Utf8PathBuf::from_path_buf(dir.path().join("nope.json")).unwrap();
    let err = load_catalog(&path).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}
