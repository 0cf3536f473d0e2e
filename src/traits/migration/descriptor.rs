//! Runtime description of a version type.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::codec::{self, Encoding, Payload};
use crate::errors::{DecodeError, SchemaliftError, SchemaliftResult};
use crate::traits::migration::{AnyVersion, Version};

type DecodeFn = fn(&Payload, Encoding) -> Result<Box<dyn Any + Send>, DecodeError>;
type EncodeFn = fn(&(dyn Any + Send), Encoding, &str) -> SchemaliftResult<Payload>;

/// Identity and codec of one version type.
///
/// A descriptor is built once, when a step is registered, and carries the
/// encoding resolved for the type so later encodes and decodes do not
/// classify it again. Two descriptors are equal when their ids and Rust
/// types match.
#[derive(Clone)]
pub struct VersionDescriptor {
    id: Arc<str>,
    type_id: TypeId,
    type_name: &'static str,
    encoding: Encoding,
    decode: DecodeFn,
    encode: EncodeFn,
}

impl VersionDescriptor {
    /// Descriptor for `V`, identified by `V::VERSION_ID`.
    pub fn of<V: Version>() -> SchemaliftResult<Self> {
        Self::named::<V>(V::VERSION_ID)
    }

    /// Descriptor for `V` under an explicit id.
    ///
    /// Lets one Rust type stand for several versions, e.g. a dynamic record
    /// whose shape is only checked by the transforms.
    pub fn named<V: Version>(id: impl Into<Arc<str>>) -> SchemaliftResult<Self> {
        let id = id.into();
        let encoding = codec::classify_encodings(V::ENCODINGS).ok_or_else(|| {
            SchemaliftError::NoCapability {
                version: id.to_string(),
            }
        })?;
        Ok(Self {
            id,
            type_id: TypeId::of::<V>(),
            type_name: std::any::type_name::<V>(),
            encoding,
            decode: decode_erased::<V>,
            encode: encode_erased::<V>,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Fully qualified Rust type name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Whether values of `V` belong to this descriptor.
    pub fn describes<V: Version>(&self) -> bool {
        self.type_id == TypeId::of::<V>()
    }

    pub(crate) fn matches_value(&self, value: &(dyn Any + Send)) -> bool {
        value.type_id() == self.type_id
    }

    /// Try to decode `payload` as this version.
    pub fn decode(&self, payload: &Payload) -> Result<AnyVersion, DecodeError> {
        let value = (self.decode)(payload, self.encoding)?;
        Ok(AnyVersion::from_parts(self.clone(), value))
    }

    pub(crate) fn encode(&self, value: &(dyn Any + Send)) -> SchemaliftResult<Payload> {
        (self.encode)(value, self.encoding, &self.id)
    }
}

impl PartialEq for VersionDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.type_id == other.type_id
    }
}

impl Eq for VersionDescriptor {}

impl fmt::Debug for VersionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VersionDescriptor")
            .field("id", &self.id)
            .field("type_name", &self.type_name)
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl fmt::Display for VersionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

fn decode_erased<V: Version>(
    payload: &Payload,
    encoding: Encoding,
) -> Result<Box<dyn Any + Send>, DecodeError> {
    let value: V = codec::decode_as(payload, encoding)?;
    Ok(Box::new(value))
}

fn encode_erased<V: Version>(
    value: &(dyn Any + Send),
    encoding: Encoding,
    id: &str,
) -> SchemaliftResult<Payload> {
    let value = value
        .downcast_ref::<V>()
        .ok_or_else(|| SchemaliftError::Encode {
            version: id.to_string(),
            reason: format!("value is not a {}", std::any::type_name::<V>()),
        })?;
    codec::encode_as(value, encoding, id)
}
