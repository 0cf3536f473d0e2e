//! Parsing of the `#[version(...)]` attribute.

use syn::punctuated::Punctuated;
use syn::{DeriveInput, Ident, LitStr, Token};

use crate::errors::VersionDeriveError;

/// Formats accepted inside `encodings(...)`.
pub const ENCODINGS: &[(&str, &str)] = &[
    ("json", "Json"),
    ("yaml", "Yaml"),
    ("toml", "Toml"),
    ("mapping", "Mapping"),
];

/// Parsed `#[version(...)]` attribute of a version type
#[derive(Debug)]
pub struct VersionAttributes {
    /// Type the derive is applied to
    pub ident: Ident,

    /// Version id, defaulting to the type name
    pub id: String,

    /// `Encoding` variant names, in declaration order
    pub encodings: Vec<Ident>,
}

impl VersionAttributes {
    /// Parse from a DeriveInput
    ///
    /// Expected format:
    /// `#[version(id = "UserV2", encodings(json, yaml))]`, every part optional.
    pub fn from_derive_input(input: &DeriveInput) -> syn::Result<Self> {
        let mut id: Option<LitStr> = None;
        let mut encodings: Option<Vec<Ident>> = None;

        for attr in &input.attrs {
            if !attr.path().is_ident("version") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    if id.is_some() {
                        return Err(VersionDeriveError::Repeated("id").spanned(&meta.path));
                    }
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(VersionDeriveError::EmptyId.spanned(&lit));
                    }
                    id = Some(lit);
                    Ok(())
                } else if meta.path.is_ident("encodings") {
                    if encodings.is_some() {
                        return Err(VersionDeriveError::Repeated("encodings").spanned(&meta.path));
                    }
                    let content;
                    syn::parenthesized!(content in meta.input);
                    let names = Punctuated::<Ident, Token![,]>::parse_terminated(&content)?;

                    let mut parsed: Vec<Ident> = Vec::new();
                    for name in names {
                        let key = name.to_string();
                        let variant = match ENCODINGS.iter().find(|(format, _)| *format == key) {
                            Some((_, variant)) => Ident::new(variant, name.span()),
                            None => return Err(VersionDeriveError::UnknownEncoding(key).spanned(&name)),
                        };
                        if parsed.contains(&variant) {
                            return Err(VersionDeriveError::DuplicateEncoding(key).spanned(&name));
                        }
                        parsed.push(variant);
                    }
                    encodings = Some(parsed);
                    Ok(())
                } else {
                    Err(VersionDeriveError::UnknownOption.spanned(&meta.path))
                }
            })?;
        }

        Ok(Self {
            ident: input.ident.clone(),
            id: id.map(|lit| lit.value()).unwrap_or_else(|| input.ident.to_string()),
            encodings: encodings
                .unwrap_or_else(|| vec![Ident::new("Mapping", proc_macro2::Span::call_site())]),
        })
    }
}
