//! Loading payloads of every version of a chain.
//!
//! Covers version detection (newest first), forward migration, idempotence on
//! current data, and the failure modes of `load`.

mod common;

use std::sync::atomic::Ordering;

use common::*;
use schemalift::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[test]
fn test_oldest_payload_migrates_to_latest() {
    init_logging();
    let registry = data_schema_registry();

    let obj: DataSchema = registry.load(LABEL, json!({"x": 1})).unwrap();
    assert_eq!(
        obj,
        DataSchema {
            x: 1,
            name: "default".to_string()
        }
    );
}

#[test]
fn test_load_matches_manual_composition() {
    let registry = data_schema_registry();
    let v1 = DataSchemaV1 { x: 42 };

    let manual = update_2_to_latest(update_1_to_2(v1.clone()));
    let loaded: DataSchema = registry
        .load(LABEL, schemalift::codec::serialize(&v1).unwrap())
        .unwrap();
    assert_eq!(loaded, manual);
}

#[test]
fn test_intermediate_payload_skips_earlier_steps() {
    let (registry, calls) = counting_registry();

    let (value, report) = registry
        .load_report(LABEL, json!({"x": 1, "y": 0}), &LoadOptions::default())
        .unwrap();

    assert_eq!(report.detected_version(), "DataSchemaV2");
    assert_eq!(report.path, ["DataSchemaV2", "DataSchema"]);
    assert_eq!(report.steps_applied, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        value.downcast::<DataSchema>().ok(),
        Some(DataSchema {
            x: 1,
            name: "default".to_string()
        })
    );
}

#[test]
fn test_current_payload_is_returned_unchanged() {
    let (registry, calls) = counting_registry();
    let current = DataSchema {
        x: 9,
        name: "kept".to_string(),
    };

    let (value, report) = registry
        .load_report(LABEL, json!({"x": 9, "name": "kept"}), &LoadOptions::default())
        .unwrap();

    assert!(!report.was_migrated());
    assert_eq!(report.detected_version(), "DataSchema");
    assert_eq!(report.final_version(), "DataSchema");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(value.downcast::<DataSchema>().ok(), Some(current));
}

#[test]
fn test_reloading_migrated_output_is_idempotent() {
    let registry = data_schema_registry();

    let first: DataSchema = registry.load(LABEL, json!({"x": 3})).unwrap();
    let encoded = schemalift::codec::serialize(&first).unwrap();
    let second: DataSchema = registry.load(LABEL, encoded).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_unknown_label_fails_before_decoding() {
    let registry = data_schema_registry();

    let err = registry
        .load::<DataSchema>("NotRegistered", json!({"x": 1}))
        .unwrap_err();
    assert!(matches!(err, SchemaliftError::UnknownLabel { ref label } if label == "NotRegistered"));

    let err = MigrationRegistry::new()
        .detect(LABEL, &Payload::from(json!({"x": 1})))
        .unwrap_err();
    assert!(matches!(err, SchemaliftError::UnknownLabel { .. }));
}

#[test]
fn test_unresolvable_payload_reports_every_candidate() {
    let registry = data_schema_registry();

    let err = registry
        .load::<DataSchema>(LABEL, json!({"unrelated": true}))
        .unwrap_err();
    assert!(err.is_recoverable());
    match err {
        SchemaliftError::UnresolvableVersion { label, attempts } => {
            assert_eq!(label, LABEL);
            let tried: Vec<&str> = attempts.iter().map(|(id, _)| id.as_str()).collect();
            assert_eq!(tried, ["DataSchema", "DataSchemaV2", "DataSchemaV1"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_wrong_payload_kind_is_unresolvable() {
    let registry = data_schema_registry();
    let err = registry
        .load::<DataSchema>(LABEL, r#"{"x": 1}"#)
        .unwrap_err();
    assert!(matches!(err, SchemaliftError::UnresolvableVersion { .. }));
}

#[test]
fn test_requesting_an_older_type_is_a_target_mismatch() {
    let registry = data_schema_registry();
    let err = registry
        .load::<DataSchemaV2>(LABEL, json!({"x": 1}))
        .unwrap_err();
    assert!(matches!(
        err,
        SchemaliftError::TargetMismatch { ref expected, ref found, .. }
            if expected == "DataSchemaV2" && found == "DataSchema"
    ));
}

#[test]
fn test_loader_binds_label() {
    let registry = data_schema_registry();
    let load_data_schema = registry.loader(LABEL);
    assert_eq!(load_data_schema.label(), LABEL);

    let obj: DataSchema = load_data_schema.load(json!({"x": 5})).unwrap();
    assert_eq!(obj.x, 5);

    let obj: DataSchema = load_data_schema
        .load_with(json!({"x": 6, "y": 2}), &LoadOptions::default())
        .unwrap();
    assert_eq!(obj.x, 6);
}

#[test]
fn test_misbehaving_dyn_transform_is_a_transform_type_error() {
    let mut registry = MigrationRegistry::new();
    registry
        .register_dyn_step(
            LABEL,
            VersionDescriptor::of::<DataSchemaV1>().unwrap(),
            VersionDescriptor::of::<DataSchemaV2>().unwrap(),
            |_, _, value| {
                // Skips straight to the latest version instead of V2
                let old = value.downcast::<DataSchemaV1>().unwrap();
                AnyVersion::new(update_2_to_latest(update_1_to_2(old))).unwrap()
            },
        )
        .unwrap()
        .register_step(LABEL, update_2_to_latest)
        .unwrap();

    let err = registry
        .load::<DataSchema>(LABEL, json!({"x": 1}))
        .unwrap_err();
    assert!(matches!(
        err,
        SchemaliftError::TransformType { ref expected, ref found, .. }
            if expected == "DataSchemaV2" && found == "DataSchema"
    ));
    assert!(!err.is_recoverable());
}

#[test]
fn test_dyn_transform_returning_same_id_with_other_type_is_rejected() {
    #[derive(Debug, Serialize, Deserialize, Version)]
    #[version(id = "DataSchemaV2")]
    struct LookalikeV2 {
        x: i64,
    }

    let mut registry = MigrationRegistry::new();
    registry
        .register_dyn_step(
            LABEL,
            VersionDescriptor::of::<DataSchemaV1>().unwrap(),
            VersionDescriptor::of::<DataSchemaV2>().unwrap(),
            |_, _, value| {
                let old = value.downcast::<DataSchemaV1>().unwrap();
                AnyVersion::new(LookalikeV2 { x: old.x }).unwrap()
            },
        )
        .unwrap();

    let err = registry
        .load_any(LABEL, json!({"x": 1}), &LoadOptions::default())
        .unwrap_err();
    match err {
        SchemaliftError::TransformType {
            expected,
            expected_type,
            found,
            found_type,
            ..
        } => {
            assert_eq!(expected, "DataSchemaV2");
            assert_eq!(found, "DataSchemaV2");
            assert!(expected_type.ends_with("DataSchemaV2"));
            assert!(found_type.ends_with("LookalikeV2"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_default_fields_widen_detection() {
    #[derive(Debug, PartialEq, Serialize, Deserialize, Version)]
    struct CounterV1 {
        count: u32,
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize, Version)]
    struct Counter {
        count: u32,
        #[serde(default = "default_step")]
        step: u32,
    }

    fn default_step() -> u32 {
        3
    }

    let (registry, calls) = {
        let calls = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = std::sync::Arc::clone(&calls);
        let mut registry = MigrationRegistry::new();
        registry
            .register_step("Counter", move |old: CounterV1| {
                counter.fetch_add(1, Ordering::SeqCst);
                Counter {
                    count: old.count,
                    step: 1,
                }
            })
            .unwrap();
        (registry, calls)
    };

    // The newest version accepts the old payload thanks to its default, so
    // no transform runs.
    let counter: Counter = registry.load("Counter", json!({"count": 2})).unwrap();
    assert_eq!(counter, Counter { count: 2, step: 3 });
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
