// Common test utilities and schema families

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use schemalift::prelude::*;
use serde::{Deserialize, Serialize};

pub const LABEL: &str = "DataSchema";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Version)]
pub struct DataSchemaV1 {
    pub x: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Version)]
pub struct DataSchemaV2 {
    pub x: i64,
    pub y: i64,
    #[serde(default)]
    pub z: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Version)]
pub struct DataSchema {
    pub x: i64,
    pub name: String,
}

pub fn update_1_to_2(old: DataSchemaV1) -> DataSchemaV2 {
    DataSchemaV2 { x: old.x, y: 0, z: 0 }
}

pub fn update_2_to_latest(old: DataSchemaV2) -> DataSchema {
    DataSchema {
        x: old.x,
        name: "default".to_string(),
    }
}

/// Registry with the V1 -> V2 -> latest chain under [`LABEL`].
pub fn data_schema_registry() -> MigrationRegistry {
    let mut registry = MigrationRegistry::new();
    registry
        .register_step(LABEL, update_1_to_2)
        .unwrap()
        .register_step(LABEL, update_2_to_latest)
        .unwrap();
    registry
}

/// Same chain as [`data_schema_registry`], with a shared counter bumped by
/// every transform invocation.
pub fn counting_registry() -> (MigrationRegistry, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut registry = MigrationRegistry::new();

    let counter = Arc::clone(&calls);
    registry
        .register_step(LABEL, move |old: DataSchemaV1| {
            counter.fetch_add(1, Ordering::SeqCst);
            update_1_to_2(old)
        })
        .unwrap();

    let counter = Arc::clone(&calls);
    registry
        .register_step(LABEL, move |old: DataSchemaV2| {
            counter.fetch_add(1, Ordering::SeqCst);
            update_2_to_latest(old)
        })
        .unwrap();

    (registry, calls)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
