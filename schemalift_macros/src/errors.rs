use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersionDeriveError {
    #[error("Unknown encoding `{0}`, expected one of: json, yaml, toml, mapping")]
    UnknownEncoding(String),
    #[error("Encoding `{0}` is listed more than once")]
    DuplicateEncoding(String),
    #[error("Unknown `version` option, expected `id = \"...\"` or `encodings(...)`")]
    UnknownOption,
    #[error("The version id must not be empty")]
    EmptyId,
    #[error("`{0}` is specified more than once")]
    Repeated(&'static str),
}

impl VersionDeriveError {
    pub fn spanned<T: quote::ToTokens>(self, tokens: T) -> syn::Error {
        syn::Error::new_spanned(tokens, self.to_string())
    }
}
