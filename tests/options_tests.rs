//! Writing intermediate versions to disk during a migration.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::*;
use schemalift::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;

fn read_json(path: &Path) -> serde_json::Value {
    let text = fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

#[test]
fn test_every_visited_version_is_written() {
    init_logging();
    let temp_dir = TempDir::new().unwrap();
    let registry = data_schema_registry();
    let options = LoadOptions::builder()
        .write_versions(true)
        .write_versions_dir(temp_dir.path())
        .write_version_prefix("TMP")
        .build();

    let (_, report) = registry
        .load_report(LABEL, json!({"x": 1}), &options)
        .unwrap();

    let expected: Vec<PathBuf> = ["TMP_DataSchemaV1", "TMP_DataSchemaV2", "TMP_DataSchema"]
        .iter()
        .map(|stem| temp_dir.path().join(format!("{stem}.json")))
        .collect();
    assert_eq!(report.artifacts, expected);
    assert_eq!(report.artifacts.len(), report.steps_applied + 1);

    assert_eq!(read_json(&expected[0]), json!({"x": 1}));
    assert_eq!(read_json(&expected[1]), json!({"x": 1, "y": 0, "z": 0}));
    assert_eq!(read_json(&expected[2]), json!({"x": 1, "name": "default"}));
}

#[test]
fn test_intermediate_start_writes_only_remaining_versions() {
    let temp_dir = TempDir::new().unwrap();
    let registry = data_schema_registry();
    let options = LoadOptions::persist_to(temp_dir.path());

    let (_, report) = registry
        .load_report(LABEL, json!({"x": 4, "y": 5}), &options)
        .unwrap();

    assert_eq!(report.artifacts.len(), 2);
    assert!(temp_dir.path().join("DataSchemaV2.json").exists());
    assert!(temp_dir.path().join("DataSchema.json").exists());
    assert!(!temp_dir.path().join("DataSchemaV1.json").exists());
}

#[test]
fn test_current_payload_writes_one_artifact() {
    let temp_dir = TempDir::new().unwrap();
    let registry = data_schema_registry();
    let options = LoadOptions::persist_to(temp_dir.path());

    let (_, report) = registry
        .load_report(LABEL, json!({"x": 4, "name": "n"}), &options)
        .unwrap();
    assert_eq!(report.artifacts, [temp_dir.path().join("DataSchema.json")]);
}

#[test]
fn test_nothing_is_written_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let registry = data_schema_registry();
    let options = LoadOptions::builder()
        .write_versions_dir(temp_dir.path())
        .build();

    let (_, report) = registry
        .load_report(LABEL, json!({"x": 1}), &options)
        .unwrap();
    assert!(report.artifacts.is_empty());
    assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_directory_is_created() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("runs").join("first");
    let registry = data_schema_registry();

    let _: DataSchema = registry
        .load_with(LABEL, json!({"x": 1}), &LoadOptions::persist_to(&nested))
        .unwrap();
    assert_eq!(fs::read_dir(&nested).unwrap().count(), 3);
}

#[test]
fn test_text_encodings_use_their_extension() {
    #[derive(Debug, PartialEq, Serialize, Deserialize, Version)]
    #[version(id = "ConfigV1", encodings(yaml))]
    struct ConfigV1 {
        port: u16,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize, Version)]
    #[version(id = "Config", encodings(toml))]
    struct Config {
        port: u16,
        host: String,
    }

    let mut registry = MigrationRegistry::new();
    registry
        .register_step("Config", |old: ConfigV1| Config {
            port: old.port,
            host: "localhost".to_string(),
        })
        .unwrap();

    let temp_dir = TempDir::new().unwrap();
    let options = LoadOptions::persist_to(temp_dir.path());
    let config: Config = registry
        .load_with("Config", "port: 8080\n", &options)
        .unwrap();
    assert_eq!(config.host, "localhost");

    let yaml = fs::read_to_string(temp_dir.path().join("ConfigV1.yaml")).unwrap();
    assert_eq!(yaml, "port: 8080\n");
    let toml = fs::read_to_string(temp_dir.path().join("Config.toml")).unwrap();
    assert_eq!(toml, "port = 8080\nhost = \"localhost\"\n");
}

#[test]
fn test_unwritable_directory_is_a_persist_error() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not_a_dir");
    fs::write(&blocker, "occupied").unwrap();

    let registry = data_schema_registry();
    let err = registry
        .load_with::<DataSchema>(LABEL, json!({"x": 1}), &LoadOptions::persist_to(&blocker))
        .unwrap_err();

    assert!(err.is_recoverable());
    assert!(matches!(err, SchemaliftError::Persist { ref path, .. } if path == &blocker));
}

#[test]
fn test_options_from_toml_document() {
    let temp_dir = TempDir::new().unwrap();
    let document = format!(
        "write_versions = true\nwrite_versions_dir = {:?}\nwrite_version_prefix = \"cfg\"\n",
        temp_dir.path().display().to_string()
    );
    let options = LoadOptions::from_toml(&document).unwrap();

    let registry = data_schema_registry();
    let (_, report) = registry
        .load_report(LABEL, json!({"x": 1, "y": 1}), &options)
        .unwrap();
    assert_eq!(report.artifacts[0], temp_dir.path().join("cfg_DataSchemaV2.json"));
}
