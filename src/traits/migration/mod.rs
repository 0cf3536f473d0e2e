//! Migration traits for versioned record evolution.
//!
//! A record family evolves through a series of version types. Each version
//! implements [`Version`], which gives it a stable id and declares the
//! formats it can be encoded in. Versions are connected by transforms,
//! either closures or [`MigrateFrom`] implementations, and registered in
//! order with a [`MigrationRegistry`](crate::registry::MigrationRegistry).
//!
//! At runtime a version is described by a [`VersionDescriptor`] and its
//! values travel through a chain as [`AnyVersion`].
//!
//! # Example
//!
//! ```rust
//! use schemalift::prelude::*;
//! use serde::{Serialize, Deserialize};
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Version)]
//! #[version(id = "UserV1", encodings(json))]
//! pub struct UserV1 {
//!     pub id: String,
//!     pub name: String,
//! }
//!
//! #[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Version)]
//! #[version(id = "UserV2", encodings(json))]
//! pub struct UserV2 {
//!     pub id: String,
//!     pub first_name: String,
//!     pub last_name: String,
//! }
//!
//! impl MigrateFrom<UserV1> for UserV2 {
//!     fn migrate_from(old: UserV1) -> Self {
//!         let parts: Vec<&str> = old.name.split_whitespace().collect();
//!         UserV2 {
//!             id: old.id,
//!             first_name: parts.first().map(|s| s.to_string()).unwrap_or_default(),
//!             last_name: parts.get(1).map(|s| s.to_string()).unwrap_or_default(),
//!         }
//!     }
//! }
//!
//! let mut registry = MigrationRegistry::new();
//! registry.register_migration::<UserV1, UserV2>("User").unwrap();
//!
//! let user: UserV2 = registry
//!     .load("User", r#"{"id":"u1","name":"Ada Lovelace"}"#)
//!     .unwrap();
//! assert_eq!(user.first_name, "Ada");
//! assert_eq!(user.last_name, "Lovelace");
//! ```

mod descriptor;
mod traits;
mod value;

pub use descriptor::*;
pub use traits::*;
pub use value::*;
