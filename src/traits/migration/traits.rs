//! Core traits implemented by versioned record types.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::Encoding;

/// A concrete record shape usable as a node in a migration chain.
///
/// `VERSION_ID` is the stable identity of the version: it names the chain
/// node, shows up in errors and is the base name of persisted artifacts.
/// `ENCODINGS` lists the formats the type can be encoded to and decoded
/// from; when several are listed the adapter picks one deterministically
/// (see [`crate::codec::classify`]).
///
/// The usual way to implement it is `#[derive(Version)]`, which defaults the
/// id to the type name and the encodings to `mapping`.
///
/// # Example
///
/// ```
/// use schemalift::Version;
/// use schemalift::codec::Encoding;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize, PartialEq)]
/// struct ConfigV1 {
///     name: String,
/// }
///
/// impl Version for ConfigV1 {
///     const VERSION_ID: &'static str = "ConfigV1";
///     const ENCODINGS: &'static [Encoding] = &[Encoding::Toml];
/// }
///
/// assert_eq!(schemalift::codec::classify::<ConfigV1>().unwrap(), Encoding::Toml);
/// ```
pub trait Version: Serialize + DeserializeOwned + Send + 'static {
    /// Stable identity of this version.
    const VERSION_ID: &'static str;

    /// Formats this version supports, in any order.
    const ENCODINGS: &'static [Encoding];
}

/// Trait for upgrading from an older version to a newer version.
///
/// Implement this to define how data migrates forward from an older schema,
/// then register the step with
/// [`MigrationRegistry::register_migration`](crate::registry::MigrationRegistry::register_migration).
/// Plain closures work too, through
/// [`MigrationRegistry::register_step`](crate::registry::MigrationRegistry::register_step).
///
/// # Example
///
/// ```
/// use schemalift::prelude::*;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Serialize, Deserialize, Version)]
/// struct UserV1 {
///     id: u64,
///     name: String,
/// }
///
/// #[derive(Debug, Serialize, Deserialize, Version)]
/// struct UserV2 {
///     id: u64,
///     name: String,
///     email: String,
/// }
///
/// impl MigrateFrom<UserV1> for UserV2 {
///     fn migrate_from(old: UserV1) -> Self {
///         UserV2 {
///             id: old.id,
///             name: old.name,
///             email: String::from("unknown@example.com"),
///         }
///     }
/// }
///
/// let v2 = UserV2::migrate_from(UserV1 { id: 1, name: "Alice".to_string() });
/// assert_eq!(v2.email, "unknown@example.com");
///
/// let mut registry = MigrationRegistry::new();
/// registry.register_migration::<UserV1, UserV2>("User").unwrap();
/// assert_eq!(registry.current_version("User").unwrap().id(), "UserV2");
/// ```
pub trait MigrateFrom<OldVersion>: Sized {
    /// Convert from an older version to this version.
    fn migrate_from(old: OldVersion) -> Self;
}
