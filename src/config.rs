//! Options controlling a single load/migration run.
//!
//! [`LoadOptions`] can be built in code with the builder generated by
//! `typed-builder`, or read from a configuration document: every field has a
//! default, so a partial document only needs the fields it changes.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::errors::{SchemaliftError, SchemaliftResult};

/// Options for loading and migrating a payload.
///
/// # Examples
///
/// ```
/// use schemalift::config::LoadOptions;
///
/// // Nothing is written by default
/// let options = LoadOptions::default();
/// assert!(!options.write_versions);
///
/// // Persist every version seen during the migration
/// let options = LoadOptions::builder()
///     .write_versions(true)
///     .write_versions_dir("versions")
///     .write_version_prefix("TMP")
///     .build();
/// assert_eq!(options.artifact_stem("DataSchemaV2"), "TMP_DataSchemaV2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder, Serialize, Deserialize)]
#[builder(doc)]
#[serde(default)]
pub struct LoadOptions {
    /// Write the initial decoded value and every migrated value to disk
    #[builder(default = false)]
    pub write_versions: bool,

    /// Directory the version artifacts are written to
    #[builder(default = PathBuf::from("."), setter(into))]
    pub write_versions_dir: PathBuf,

    /// Prefix for artifact file names, joined to the version id with `_`
    #[builder(default, setter(into))]
    pub write_version_prefix: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            write_versions: false,
            write_versions_dir: PathBuf::from("."),
            write_version_prefix: String::new(),
        }
    }
}

impl LoadOptions {
    /// Options that persist every version into `dir`.
    pub fn persist_to<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            write_versions: true,
            write_versions_dir: dir.into(),
            ..Default::default()
        }
    }

    /// Parse options from a JSON document.
    pub fn from_json(source: &str) -> SchemaliftResult<Self> {
        serde_json::from_str(source).map_err(|e| SchemaliftError::Config(e.to_string()))
    }

    /// Parse options from a TOML document.
    pub fn from_toml(source: &str) -> SchemaliftResult<Self> {
        toml::from_str(source).map_err(|e| SchemaliftError::Config(e.to_string()))
    }

    /// File name (without extension) for the artifact of `version_id`.
    pub fn artifact_stem(&self, version_id: &str) -> String {
        if self.write_version_prefix.is_empty() {
            version_id.to_string()
        } else {
            format!("{}_{}", self.write_version_prefix, version_id)
        }
    }

    /// Directory artifacts are written to.
    pub fn artifact_dir(&self) -> &Path {
        &self.write_versions_dir
    }
}
