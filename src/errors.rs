//! Error types for registration, version probing, migration and persistence.
//!
//! Every fallible operation in this crate returns [`SchemaliftResult`]. The
//! variants fall into three groups:
//!
//! - **Registration errors** ([`ChainMismatch`](SchemaliftError::ChainMismatch),
//!   [`Cycle`](SchemaliftError::Cycle), [`DuplicateStart`](SchemaliftError::DuplicateStart),
//!   [`NoCapability`](SchemaliftError::NoCapability)) are raised while a chain is
//!   being built, so a malformed chain never reaches load time.
//! - **Load errors** ([`UnknownLabel`](SchemaliftError::UnknownLabel),
//!   [`EmptyChain`](SchemaliftError::EmptyChain),
//!   [`UnknownVersion`](SchemaliftError::UnknownVersion),
//!   [`UnresolvableVersion`](SchemaliftError::UnresolvableVersion),
//!   [`TransformType`](SchemaliftError::TransformType),
//!   [`TargetMismatch`](SchemaliftError::TargetMismatch)).
//! - **Codec and I/O errors** ([`Decode`](SchemaliftError::Decode),
//!   [`Encode`](SchemaliftError::Encode), [`Persist`](SchemaliftError::Persist),
//!   [`Config`](SchemaliftError::Config)).

use std::path::PathBuf;

use thiserror::Error;

pub type SchemaliftResult<T> = Result<T, SchemaliftError>;

#[derive(Error, Debug)]
pub enum SchemaliftError {
    #[error("No migration chain registered for label '{label}'")]
    UnknownLabel { label: String },

    #[error("Migration chain for label '{label}' has no steps")]
    EmptyChain { label: String },

    #[error(
        "Chain mismatch for label '{label}': start version '{start}' ({start_type}) does not match the current tail '{tail}' ({tail_type})"
    )]
    ChainMismatch {
        label: String,
        start: String,
        start_type: &'static str,
        tail: String,
        tail_type: &'static str,
    },

    #[error("Cycle detected for label '{label}': version '{version}' is already part of the chain {chain:?}")]
    Cycle {
        label: String,
        version: String,
        chain: Vec<String>,
    },

    #[error("A step starting at version '{version}' is already registered for label '{label}'")]
    DuplicateStart { label: String, version: String },

    #[error("Version '{version}' is not part of the migration chain for label '{label}'")]
    UnknownVersion { label: String, version: String },

    #[error("Version '{version}' declares no supported encoding")]
    NoCapability { version: String },

    #[error("No version of label '{label}' could decode the payload (tried {})", format_attempts(.attempts))]
    UnresolvableVersion {
        label: String,
        attempts: Vec<(String, DecodeError)>,
    },

    #[error("Failed to decode payload as version '{version}': {source}")]
    Decode {
        version: String,
        #[source]
        source: DecodeError,
    },

    #[error("Failed to encode version '{version}': {reason}")]
    Encode { version: String, reason: String },

    #[error(
        "Transform for label '{label}' returned version '{found}' ({found_type}) where '{expected}' ({expected_type}) was declared"
    )]
    TransformType {
        label: String,
        expected: String,
        expected_type: &'static str,
        found: String,
        found_type: &'static str,
    },

    #[error("Migration for label '{label}' ended at version '{found}', not the requested '{expected}'")]
    TargetMismatch {
        label: String,
        expected: String,
        found: String,
    },

    #[error("Failed to write version artifact '{}': {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid load options: {0}")]
    Config(String),
}

impl SchemaliftError {
    /// Whether the error was raised while registering a migration step.
    pub fn is_registration_error(&self) -> bool {
        matches!(
            self,
            SchemaliftError::ChainMismatch { .. }
                | SchemaliftError::Cycle { .. }
                | SchemaliftError::DuplicateStart { .. }
                | SchemaliftError::NoCapability { .. }
        )
    }

    /// Whether a caller can reasonably skip the offending payload and carry on.
    ///
    /// Misconfigured chains and buggy transforms are not recoverable; a payload
    /// that matches no known version or an artifact that failed to write is.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SchemaliftError::UnresolvableVersion { .. }
                | SchemaliftError::Decode { .. }
                | SchemaliftError::Persist { .. }
        )
    }
}

fn format_attempts(attempts: &[(String, DecodeError)]) -> String {
    attempts
        .iter()
        .map(|(version, err)| format!("{version}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure to decode a payload into one specific version.
///
/// During version probing these are expected and collected per candidate;
/// they only reach the caller inside [`SchemaliftError::UnresolvableVersion`]
/// or when decoding directly through [`crate::codec::deserialize`].
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("expected a {expected} payload, got a {found} payload")]
    PayloadKind {
        expected: &'static str,
        found: &'static str,
    },
}
