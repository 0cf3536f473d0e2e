//! Encoding adapter: picks the format a version supports and encodes,
//! decodes and persists values with it.
//!
//! Four formats are supported:
//!
//! | [`Encoding`] | payload                       | artifact extension |
//! |--------------|-------------------------------|--------------------|
//! | `Json`       | [`Payload::Text`] (JSON)      | `json`             |
//! | `Yaml`       | [`Payload::Text`] (YAML)      | `yaml`             |
//! | `Toml`       | [`Payload::Text`] (TOML)      | `toml`             |
//! | `Mapping`    | [`Payload::Mapping`]          | `json`             |
//!
//! A version declaring several formats is always handled with the first one
//! in that table's order.

use std::fs;
use std::path::{Path, PathBuf};

use derive_more::{From, TryInto};
use serde::Serialize;
use serde::de::DeserializeOwned;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::errors::{DecodeError, SchemaliftError, SchemaliftResult};
use crate::traits::migration::{AnyVersion, Version};

/// Encode/decode capability of a version type.
///
/// Variants are declared in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Encoding {
    Json,
    Yaml,
    Toml,
    Mapping,
}

impl Encoding {
    /// File extension used when persisting values of this encoding.
    pub fn extension(self) -> &'static str {
        match self {
            Encoding::Json | Encoding::Mapping => "json",
            Encoding::Yaml => "yaml",
            Encoding::Toml => "toml",
        }
    }

    /// Whether payloads of this encoding are text rather than a mapping.
    pub fn is_text(self) -> bool {
        !matches!(self, Encoding::Mapping)
    }
}

/// Serialized data in its format-native shape.
///
/// ```
/// use schemalift::codec::Payload;
/// use serde_json::json;
///
/// let mapping = Payload::from(json!({"x": 1}));
/// assert!(mapping.as_text().is_none());
///
/// let text = Payload::from("x = 1\n");
/// assert_eq!(text.as_text(), Some("x = 1\n"));
/// ```
#[derive(Debug, Clone, PartialEq, From, TryInto)]
pub enum Payload {
    /// Structured key/value data.
    Mapping(serde_json::Value),
    /// JSON, YAML or TOML text.
    Text(String),
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl Payload {
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Mapping(_) => "mapping",
            Payload::Text(_) => "text",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Mapping(_) => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&serde_json::Value> {
        match self {
            Payload::Mapping(value) => Some(value),
            Payload::Text(_) => None,
        }
    }

    /// Text written to disk for this payload; mappings are rendered as JSON.
    pub fn render(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Mapping(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

/// First encoding of `declared` in priority order, if any.
pub fn classify_encodings(declared: &[Encoding]) -> Option<Encoding> {
    Encoding::iter().find(|encoding| declared.contains(encoding))
}

/// Encoding used for values of `V`.
pub fn classify<V: Version>() -> SchemaliftResult<Encoding> {
    classify_encodings(V::ENCODINGS).ok_or_else(|| SchemaliftError::NoCapability {
        version: V::VERSION_ID.to_string(),
    })
}

/// Encode `value` with its version's encoding.
///
/// ```
/// use schemalift::prelude::*;
/// use schemalift::codec::{self, Payload};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize, Version)]
/// #[version(encodings(toml))]
/// struct Settings {
///     x: i64,
/// }
///
/// let payload = codec::serialize(&Settings { x: 1 }).unwrap();
/// assert_eq!(payload, Payload::from("x = 1\n"));
/// assert_eq!(codec::deserialize::<Settings>(&payload).unwrap(), Settings { x: 1 });
/// ```
pub fn serialize<V: Version>(value: &V) -> SchemaliftResult<Payload> {
    encode_as(value, classify::<V>()?, V::VERSION_ID)
}

/// Decode `payload` as `V` with its version's encoding.
pub fn deserialize<V: Version>(payload: &Payload) -> SchemaliftResult<V> {
    let encoding = classify::<V>()?;
    decode_as(payload, encoding).map_err(|source| SchemaliftError::Decode {
        version: V::VERSION_ID.to_string(),
        source,
    })
}

pub(crate) fn encode_as<V: Serialize>(
    value: &V,
    encoding: Encoding,
    version: &str,
) -> SchemaliftResult<Payload> {
    let encode_error = |reason: String| SchemaliftError::Encode {
        version: version.to_string(),
        reason,
    };
    match encoding {
        Encoding::Mapping => serde_json::to_value(value)
            .map(Payload::Mapping)
            .map_err(|e| encode_error(e.to_string())),
        Encoding::Json => serde_json::to_string(value)
            .map(Payload::Text)
            .map_err(|e| encode_error(e.to_string())),
        Encoding::Yaml => serde_yaml::to_string(value)
            .map(Payload::Text)
            .map_err(|e| encode_error(e.to_string())),
        Encoding::Toml => toml::to_string(value)
            .map(Payload::Text)
            .map_err(|e| encode_error(e.to_string())),
    }
}

pub(crate) fn decode_as<V: DeserializeOwned>(
    payload: &Payload,
    encoding: Encoding,
) -> Result<V, DecodeError> {
    match (encoding, payload) {
        (Encoding::Mapping, Payload::Mapping(value)) => Ok(V::deserialize(value)?),
        (Encoding::Json, Payload::Text(text)) => Ok(serde_json::from_str(text)?),
        (Encoding::Yaml, Payload::Text(text)) => Ok(serde_yaml::from_str(text)?),
        (Encoding::Toml, Payload::Text(text)) => Ok(toml::from_str(text)?),
        (encoding, payload) => Err(DecodeError::PayloadKind {
            expected: if encoding.is_text() { "text" } else { "mapping" },
            found: payload.kind(),
        }),
    }
}

/// Write `value` to `directory/base_name.<ext>`, creating the directory.
///
/// Returns the path written.
pub fn persist<V: Version>(value: &V, directory: &Path, base_name: &str) -> SchemaliftResult<PathBuf> {
    let encoding = classify::<V>()?;
    let payload = encode_as(value, encoding, V::VERSION_ID)?;
    write_artifact(&payload, encoding, directory, base_name)
}

/// Type-erased [`persist`].
pub fn persist_any(value: &AnyVersion, directory: &Path, base_name: &str) -> SchemaliftResult<PathBuf> {
    let payload = value.encode()?;
    write_artifact(&payload, value.descriptor().encoding(), directory, base_name)
}

fn write_artifact(
    payload: &Payload,
    encoding: Encoding,
    directory: &Path,
    base_name: &str,
) -> SchemaliftResult<PathBuf> {
    fs::create_dir_all(directory).map_err(|source| SchemaliftError::Persist {
        path: directory.to_path_buf(),
        source,
    })?;

    let path = directory.join(format!("{}.{}", base_name, encoding.extension()));
    fs::write(&path, payload.render()).map_err(|source| SchemaliftError::Persist {
        path: path.clone(),
        source,
    })?;

    log::debug!("Wrote version artifact {}", path.display());
    Ok(path)
}
