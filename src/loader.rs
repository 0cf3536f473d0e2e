//! Loading payloads of any historical version.
//!
//! Payloads carry no version tag. The loader detects the version by trying
//! to decode the payload as each version of the chain, newest first, and
//! keeps the first that succeeds. A current payload is therefore resolved in
//! one attempt, and an older one costs one failed decode per newer version.
//! Detection relies on newer versions rejecting older payloads, typically
//! because a required field is missing; fields with serde defaults make a
//! version accept more payloads, and `#[serde(deny_unknown_fields)]` makes
//! it accept fewer.
//!
//! # Example
//!
//! ```
//! use schemalift::prelude::*;
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize, Version)]
//! struct DataSchemaV1 {
//!     x: i64,
//! }
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize, Version)]
//! struct DataSchemaV2 {
//!     x: i64,
//!     y: i64,
//! }
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize, Version)]
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
//! let load_data_schema = registry.loader("DataSchema");
//! let latest: DataSchema = load_data_schema.load(json!({"x": 1}))?;
//! assert_eq!(latest, DataSchema { x: 1, name: "default".to_string() });
//! # Ok::<(), SchemaliftError>(())
//! ```

use log::{debug, trace};

use crate::codec::Payload;
use crate::config::LoadOptions;
use crate::errors::{SchemaliftError, SchemaliftResult};
use crate::registry::{MigrationRegistry, MigrationReport};
use crate::traits::migration::{AnyVersion, Version};

impl MigrationRegistry {
    /// Load `payload` and migrate it to the current version of `label`.
    pub fn load<V: Version>(&self, label: &str, payload: impl Into<Payload>) -> SchemaliftResult<V> {
        self.load_with(label, payload, &LoadOptions::default())
    }

    /// [`load`](Self::load) with explicit options.
    pub fn load_with<V: Version>(
        &self,
        label: &str,
        payload: impl Into<Payload>,
        options: &LoadOptions,
    ) -> SchemaliftResult<V> {
        let value = self.load_any(label, payload, options)?;
        value.downcast::<V>().map_err(|value| SchemaliftError::TargetMismatch {
            label: label.to_string(),
            expected: V::VERSION_ID.to_string(),
            found: value.version_id().to_string(),
        })
    }

    /// Load without naming the target type.
    pub fn load_any(&self, label: &str, payload: impl Into<Payload>, options: &LoadOptions) -> SchemaliftResult<AnyVersion> {
        self.load_report(label, payload, options).map(|(value, _)| value)
    }

    /// Load, also reporting the detected version and every step taken.
    pub fn load_report(
        &self,
        label: &str,
        payload: impl Into<Payload>,
        options: &LoadOptions,
    ) -> SchemaliftResult<(AnyVersion, MigrationReport)> {
        let value = self.detect(label, &payload.into())?;
        self.apply_report(label, value, options)
    }

    /// Decode `payload` as the newest version of `label` that accepts it.
    ///
    /// Fails with [`SchemaliftError::UnknownLabel`] or
    /// [`SchemaliftError::EmptyChain`] before any decode is attempted, and
    /// with [`SchemaliftError::UnresolvableVersion`] when no version fits.
    pub fn detect(&self, label: &str, payload: &Payload) -> SchemaliftResult<AnyVersion> {
        let chain = self.non_empty_chain(label)?;

        let mut attempts = Vec::new();
        for descriptor in chain.known_versions().into_iter().rev() {
            match descriptor.decode(payload) {
                Ok(value) => {
                    debug!("Detected {} payload as version {}", label, descriptor.id());
                    return Ok(value);
                }
                Err(err) => {
                    trace!("Payload is not {} version {}: {}", label, descriptor.id(), err);
                    attempts.push((descriptor.id().to_string(), err));
                }
            }
        }

        Err(SchemaliftError::UnresolvableVersion {
            label: label.to_string(),
            attempts,
        })
    }

    /// A loader bound to `label`.
    pub fn loader(&self, label: impl Into<String>) -> Loader<'_> {
        Loader {
            registry: self,
            label: label.into(),
        }
    }
}

/// [`MigrationRegistry::load`] with the label filled in.
///
/// Expose one of these per schema family so callers never spell the label.
#[derive(Debug, Clone)]
pub struct Loader<'r> {
    registry: &'r MigrationRegistry,
    label: String,
}

impl<'r> Loader<'r> {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn load<V: Version>(&self, payload: impl Into<Payload>) -> SchemaliftResult<V> {
        self.registry.load(&self.label, payload)
    }

    pub fn load_with<V: Version>(&self, payload: impl Into<Payload>, options: &LoadOptions) -> SchemaliftResult<V> {
        self.registry.load_with(&self.label, payload, options)
    }

    pub fn load_report(
        &self,
        payload: impl Into<Payload>,
        options: &LoadOptions,
    ) -> SchemaliftResult<(AnyVersion, MigrationReport)> {
        self.registry.load_report(&self.label, payload, options)
    }
}
