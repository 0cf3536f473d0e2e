pub mod migration;

// Re-export commonly used types
pub use migration::{AnyVersion, MigrateFrom, Version, VersionDescriptor};
