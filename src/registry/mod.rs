//! The migration registry: one linear chain of versions per label.
//!
//! A [`MigrationRegistry`] is an ordinary value. Build it once at startup,
//! registering every step in order, then hand out shared references for
//! loading. Registration needs `&mut self`, so no step can be added while a
//! load is borrowing the registry; wrap it in an `RwLock` if registration
//! must happen after the registry is shared between threads.
//!
//! # Example
//!
//! ```
//! use schemalift::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize, Version)]
//! struct DataSchemaV1 {
//!     x: i64,
//! }
//!
//! #[derive(Debug, Serialize, Deserialize, Version)]
//! struct DataSchemaV2 {
//!     x: i64,
//!     y: i64,
//! }
//!
//! #[derive(Debug, Serialize, Deserialize, Version)]
//! struct DataSchema {
//!     x: i64,
//!     name: String,
//! }
//!
//! let mut registry = MigrationRegistry::new();
//! registry
//!     .register_step("DataSchema", |old: DataSchemaV1| DataSchemaV2 { x: old.x, y: 0 })?
//!     .register_step("DataSchema", |old: DataSchemaV2| DataSchema {
//!         x: old.x,
//!         name: "default".to_string(),
//!     })?;
//!
//! let ids: Vec<&str> = registry
//!     .known_versions("DataSchema")?
//!     .iter()
//!     .map(|v| v.id())
//!     .collect();
//! assert_eq!(ids, ["DataSchemaV1", "DataSchemaV2", "DataSchema"]);
//!
//! // Registering out of order is rejected
//! let err = registry
//!     .register_step("DataSchema", |old: DataSchemaV1| DataSchemaV2 { x: old.x, y: 1 })
//!     .unwrap_err();
//! assert!(matches!(err, SchemaliftError::ChainMismatch { .. }));
//! # Ok::<(), SchemaliftError>(())
//! ```

mod chain;
mod report;

use std::collections::HashMap;

pub use chain::{MigrationChain, MigrationStep, Transform};
pub use report::MigrationReport;

use crate::config::LoadOptions;
use crate::errors::{SchemaliftError, SchemaliftResult};
use crate::traits::migration::{AnyVersion, MigrateFrom, Version, VersionDescriptor};

/// Migration chains keyed by label.
#[derive(Debug, Default)]
pub struct MigrationRegistry {
    chains: HashMap<String, MigrationChain>,
}

impl MigrationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a step from `S` to `E` for `label`.
    ///
    /// The first step creates the chain. Later steps must start at the
    /// chain's current version and end at a version not yet in the chain.
    pub fn register_step<S, E, F>(&mut self, label: impl Into<String>, transform: F) -> SchemaliftResult<&mut Self>
    where
        S: Version,
        E: Version,
        F: Fn(S) -> E + Send + Sync + 'static,
    {
        let label = label.into();
        let start = VersionDescriptor::of::<S>()?;
        let end = VersionDescriptor::of::<E>()?;

        let step_label = label.clone();
        let transform: Transform = Box::new(
            move |start: &VersionDescriptor, end: &VersionDescriptor, value: AnyVersion| -> SchemaliftResult<AnyVersion> {
                let old = value.downcast::<S>().map_err(|value| SchemaliftError::TransformType {
                    label: step_label.clone(),
                    expected: start.id().to_string(),
                    expected_type: start.type_name(),
                    found: value.version_id().to_string(),
                    found_type: value.descriptor().type_name(),
                })?;
                AnyVersion::with_descriptor(end.clone(), transform(old)).map_err(|_| {
                    SchemaliftError::TransformType {
                        label: step_label.clone(),
                        expected: end.id().to_string(),
                        expected_type: end.type_name(),
                        found: E::VERSION_ID.to_string(),
                        found_type: std::any::type_name::<E>(),
                    }
                })
            },
        );

        self.insert_step(MigrationStep::new(label, start, end, transform))
    }

    /// Register the step from `S` to `E` defined by `E: MigrateFrom<S>`.
    pub fn register_migration<S, E>(&mut self, label: impl Into<String>) -> SchemaliftResult<&mut Self>
    where
        S: Version,
        E: Version + MigrateFrom<S>,
    {
        self.register_step(label, E::migrate_from)
    }

    /// Register a type-erased step between two descriptors.
    ///
    /// The transform receives the start and end descriptors along with the
    /// value. Returning anything other than a value of `end` makes the
    /// migration fail with [`SchemaliftError::TransformType`].
    pub fn register_dyn_step<F>(
        &mut self,
        label: impl Into<String>,
        start: VersionDescriptor,
        end: VersionDescriptor,
        transform: F,
    ) -> SchemaliftResult<&mut Self>
    where
        F: Fn(&VersionDescriptor, &VersionDescriptor, AnyVersion) -> AnyVersion + Send + Sync + 'static,
    {
        let transform: Transform = Box::new(
            move |start: &VersionDescriptor, end: &VersionDescriptor, value: AnyVersion| -> SchemaliftResult<AnyVersion> {
                Ok(transform(start, end, value))
            },
        );
        self.insert_step(MigrationStep::new(label, start, end, transform))
    }

    fn insert_step(&mut self, step: MigrationStep) -> SchemaliftResult<&mut Self> {
        match self.chains.get_mut(step.label()) {
            Some(chain) => chain.push(step)?,
            None => {
                let label = step.label().to_string();
                let mut chain = MigrationChain::new(label.clone());
                chain.push(step)?;
                self.chains.insert(label, chain);
            }
        }
        Ok(self)
    }

    pub fn contains_label(&self, label: &str) -> bool {
        self.chains.contains_key(label)
    }

    /// Registered labels, sorted.
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.chains.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// The chain for `label`.
    pub fn chain(&self, label: &str) -> SchemaliftResult<&MigrationChain> {
        self.chains.get(label).ok_or_else(|| SchemaliftError::UnknownLabel {
            label: label.to_string(),
        })
    }

    /// The chain for `label`, which must have at least one step.
    pub(crate) fn non_empty_chain(&self, label: &str) -> SchemaliftResult<&MigrationChain> {
        let chain = self.chain(label)?;
        if chain.is_empty() {
            return Err(SchemaliftError::EmptyChain {
                label: label.to_string(),
            });
        }
        Ok(chain)
    }

    /// The newest version of `label`.
    pub fn current_version(&self, label: &str) -> SchemaliftResult<&VersionDescriptor> {
        self.non_empty_chain(label)?
            .current_version()
            .ok_or_else(|| SchemaliftError::EmptyChain {
                label: label.to_string(),
            })
    }

    /// Every version of `label`, oldest first.
    pub fn known_versions(&self, label: &str) -> SchemaliftResult<Vec<&VersionDescriptor>> {
        Ok(self.chain(label)?.known_versions())
    }

    pub fn step_count(&self, label: &str) -> SchemaliftResult<usize> {
        Ok(self.chain(label)?.len())
    }

    /// Migrate `value` forward to the current version of `label`.
    pub fn apply(&self, label: &str, value: AnyVersion, options: &LoadOptions) -> SchemaliftResult<AnyVersion> {
        self.apply_report(label, value, options).map(|(value, _)| value)
    }

    /// [`apply`](Self::apply), also returning what the run did.
    pub fn apply_report(
        &self,
        label: &str,
        value: AnyVersion,
        options: &LoadOptions,
    ) -> SchemaliftResult<(AnyVersion, MigrationReport)> {
        self.non_empty_chain(label)?.apply(value, options)
    }
}
