//! Prelude module for convenient imports.
//!
//! ```rust
//! use schemalift::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - [`Version`] (trait and derive macro) and [`MigrateFrom`]: implemented by
//!   record types
//! - [`MigrationRegistry`]: registers chains and loads payloads
//! - [`Loader`]: a registry bound to one label
//! - [`LoadOptions`]: artifact writing options
//! - [`Payload`] and [`Encoding`]: serialized data and its format
//! - [`AnyVersion`] and [`VersionDescriptor`]: type-erased values and versions
//! - [`MigrationReport`]: what a load did
//! - [`SchemaliftError`] and [`SchemaliftResult`]

pub use crate::codec::{Encoding, Payload};
pub use crate::config::LoadOptions;
pub use crate::errors::{DecodeError, SchemaliftError, SchemaliftResult};
pub use crate::loader::Loader;
pub use crate::registry::{MigrationRegistry, MigrationReport};
pub use crate::traits::migration::{AnyVersion, MigrateFrom, Version, VersionDescriptor};

#[cfg(feature = "derive")]
pub use schemalift_macros::Version;
