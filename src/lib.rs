//! # Schemalift
//!
//! Load versioned records of any historical shape and migrate them forward
//! to the current one.
//!
//! ## Features
//!
//! - **Linear migration chains**: each schema family ("label") registers an
//!   ordered path of version types connected by transforms; branching,
//!   out-of-order registration and cycles are rejected up front
//! - **Tag-free version detection**: payloads are probed against every known
//!   version, newest first, so no version field has to be stored
//! - **Several formats**: JSON, YAML and TOML text, or a structured mapping
//! - **Version artifacts**: optionally write every intermediate version to disk
//!
//! ## Quick Start
//!
//! ```rust
//! use schemalift::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize, Version)]
//! #[version(encodings(json))]
//! struct SettingsV1 {
//!     theme: String,
//! }
//!
//! #[derive(Debug, Serialize, Deserialize, Version)]
//! #[version(encodings(json))]
//! struct Settings {
//!     theme: String,
//!     font_size: u32,
//! }
//!
//! let mut registry = MigrationRegistry::new();
//! registry.register_step("Settings", |old: SettingsV1| Settings {
//!     theme: old.theme,
//!     font_size: 12,
//! })?;
//!
//! let settings: Settings = registry.load("Settings", r#"{"theme":"dark"}"#)?;
//! assert_eq!(settings.font_size, 12);
//! # Ok::<(), SchemaliftError>(())
//! ```

// Lets `#[derive(Version)]` output, which names `::schemalift`, compile
// inside this crate as well.
extern crate self as schemalift;

pub mod codec;
pub mod config;
pub mod errors;
pub mod loader;
pub mod prelude;
pub mod registry;
pub mod traits;

pub use traits::migration::{AnyVersion, MigrateFrom, Version, VersionDescriptor};

#[cfg(feature = "derive")]
pub use schemalift_macros::Version;
