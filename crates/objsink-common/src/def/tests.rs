//! Tests for schema definition, raw loading and parsing.

use super::*;
use crate::validators::{NonEmptyPassword, NonEmptyString, UrlValidator};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Write JSON5 contents to a path, creating parent directories if needed.
fn write_json5(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("dir");
    }
    fs::write(path, contents).expect("write");
}

fn sample_def() -> ConfigDef {
    let mut def = ConfigDef::new();
    def.define(
        ConfigKey::new("bucket", ConfigType::String, Importance::High, "Bucket name")
            .with_validator(NonEmptyString),
    )
    .expect("bucket");
    def.define(
        ConfigKey::new("secret", ConfigType::Password, Importance::High, "Secret")
            .with_validator(NonEmptyPassword),
    )
    .expect("secret");
    def.define(
        ConfigKey::new("endpoint", ConfigType::String, Importance::Low, "Endpoint")
            .with_validator(UrlValidator),
    )
    .expect("endpoint");
    def.define(
        ConfigKey::new("fields", ConfigType::List, Importance::Medium, "Fields")
            .with_default("value"),
    )
    .expect("fields");
    def
}

#[test]
fn parse_applies_types_and_defaults() {
    let raw = RawConfig::new()
        .with("bucket", "  my-bucket ")
        .with("secret", "s3cr3t")
        .with("unrelated.key", "ignored");
    let parsed = sample_def().parse(&raw).expect("parse");

    assert_eq!(parsed.get_string("bucket"), Some("my-bucket"));
    assert_eq!(parsed.get_password("secret").map(Password::value), Some("s3cr3t"));
    assert_eq!(parsed.get("endpoint"), None);
    assert!(parsed.is_declared("endpoint"));
    assert!(!parsed.is_declared("unrelated.key"));
    assert_eq!(parsed.get_list("fields"), Some(&["value".to_string()][..]));
}

#[test]
fn list_values_are_split_and_trimmed() {
    let raw = RawConfig::new().with("fields", "key , value,,offset ");
    let parsed = sample_def().parse(&raw).expect("parse");
    assert_eq!(
        parsed.get_list("fields"),
        Some(&["key".to_string(), "value".to_string(), "offset".to_string()][..])
    );
}

#[test]
fn parse_fails_on_first_invalid_option() {
    let raw = RawConfig::new().with("bucket", "").with("endpoint", "::");
    let err = sample_def().parse(&raw).unwrap_err();
    assert_eq!(err.option_name(), Some("bucket"));
}

#[test]
fn validate_all_collects_every_failure() {
    let raw = RawConfig::new()
        .with("bucket", "")
        .with("secret", " ")
        .with("endpoint", "::");
    let errors = sample_def().validate_all(&raw);
    let names: Vec<_> = errors.iter().filter_map(ConfigError::option_name).collect();
    assert_eq!(names, vec!["bucket", "secret", "endpoint"]);
}

#[test]
fn rejects_duplicate_definitions() {
    let mut def = sample_def();
    let err = def
        .define(ConfigKey::new(
            "bucket",
            ConfigType::String,
            Importance::Low,
            "again",
        ))
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateOption(name) if name == "bucket"));
}

#[test]
fn describe_lists_options_by_importance() {
    let table = sample_def().describe();
    let lines: Vec<&str> = table.lines().collect();
    assert_eq!(lines[0], "| Name | Type | Default | Importance | Description |");
    assert_eq!(lines[2], "| bucket | STRING | null | HIGH | Bucket name |");
    assert_eq!(lines[3], "| secret | PASSWORD | null | HIGH | Secret |");
    assert_eq!(lines[4], "| fields | LIST | `value` | MEDIUM | Fields |");
    assert_eq!(lines[5], "| endpoint | STRING | null | LOW | Endpoint |");
}

#[test]
fn describe_hides_password_defaults() {
    let mut def = ConfigDef::new();
    def.define(
        ConfigKey::new("token", ConfigType::Password, Importance::High, "Token")
            .with_default("s3cr3t"),
    )
    .expect("token");
    let table = def.describe();
    assert!(table.contains(&format!("| token | PASSWORD | {HIDDEN} | HIGH | Token |")));
    assert!(!table.contains("s3cr3t"));
}

#[test]
fn described_values_hide_secrets() {
    let raw = RawConfig::new().with("bucket", "b").with("secret", "s3cr3t");
    let parsed = sample_def().parse(&raw).expect("parse");
    let described = parsed.describe_values();
    assert!(described.contains("secret = [hidden]"));
    assert!(described.contains("endpoint = null"));
    assert!(!described.contains("s3cr3t"));
    assert_eq!(format!("{:?}", parsed.get_password("secret")), "Some([hidden])");
}

#[test]
fn raw_config_from_json5() {
    let raw = RawConfig::load_from_str(
        r#"{
            // comments are allowed
            bucket: "my-bucket",
            fields: ["key", "value"],
            "file.max.records": 100,
            endpoint: null,
        }"#,
    )
    .expect("raw");
    assert_eq!(raw.get("bucket"), Some("my-bucket"));
    assert_eq!(raw.get("fields"), Some("key,value"));
    assert_eq!(raw.get("file.max.records"), Some("100"));
    assert!(!raw.contains("endpoint"));
}

#[test]
fn raw_config_rejects_nested_objects() {
    let err = RawConfig::load_from_str("{ bucket: { name: \"x\" } }").unwrap_err();
    assert!(matches!(err, ConfigError::DecodeFailed(_)));
    let err = RawConfig::load_from_str("[1, 2]").unwrap_err();
    assert!(matches!(err, ConfigError::DecodeFailed(_)));
}

#[test]
fn raw_config_from_file() {
    let temp = TempDir::new().expect("tmp");
    let path = temp.path().join("conf").join("sink.json5");
    write_json5(&path, "{ bucket: \"from-file\" }");

    let raw = RawConfig::load_from_path(&path).expect("raw");
    let parsed = sample_def().parse(&raw).expect("parse");
    assert_eq!(parsed.get_string("bucket"), Some("from-file"));
}

#[test]
fn missing_file_is_read_error() {
    let temp = TempDir::new().expect("tmp");
    let err = RawConfig::load_from_path(temp.path().join("absent.json5")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFailed(_)));
}
