use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

use crate::attributes::VersionAttributes;

mod attributes;
mod errors;
mod generate;

/// Derives `schemalift::Version` for a struct or enum.
///
/// # Attributes
///
/// - `#[version(id = "...")]` - **Optional**. Stable version id; defaults to the type name
/// - `#[version(encodings(...))]` - **Optional**. Any of `json`, `yaml`, `toml`,
///   `mapping`; defaults to `mapping`. An empty list is accepted and rejected
///   by schemalift when the type is registered.
///
/// # Required Derives
///
/// The type must also derive `serde::Serialize` and `serde::Deserialize`.
///
/// # Examples
///
/// ```ignore
/// use schemalift::Version;
///
/// #[derive(Version, serde::Serialize, serde::Deserialize)]
/// #[version(id = "UserV2", encodings(json, yaml))]
/// pub struct UserV2 {
///     pub id: u64,
///     pub email: String,
/// }
/// // Generates: impl Version for UserV2 { VERSION_ID = "UserV2", ENCODINGS = [Json, Yaml] }
/// ```
#[proc_macro_derive(Version, attributes(version))]
pub fn version_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match VersionAttributes::from_derive_input(&input) {
        Ok(attrs) => generate::version_impl(&input, &attrs).into(),
        Err(err) => err.to_compile_error().into(),
    }
}
