//! Type-erased versioned values.

use std::any::Any;
use std::fmt;

use crate::codec::Payload;
use crate::errors::SchemaliftResult;
use crate::traits::migration::{Version, VersionDescriptor};

/// A value of some version type, tagged with the descriptor it belongs to.
///
/// Migration chains move values of different Rust types through the same
/// loop, so each step receives and returns an `AnyVersion`. Use
/// [`downcast`](Self::downcast) to recover the concrete type.
///
/// # Example
///
/// ```
/// use schemalift::prelude::*;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize, Version)]
/// struct Point {
///     x: i32,
/// }
///
/// let value = AnyVersion::new(Point { x: 1 }).unwrap();
/// assert_eq!(value.version_id(), "Point");
/// assert!(value.is::<Point>());
/// assert_eq!(value.downcast::<Point>().ok(), Some(Point { x: 1 }));
/// ```
pub struct AnyVersion {
    descriptor: VersionDescriptor,
    value: Box<dyn Any + Send>,
}

impl AnyVersion {
    /// Wrap `value` under its own descriptor.
    pub fn new<V: Version>(value: V) -> SchemaliftResult<Self> {
        Ok(Self::from_parts(VersionDescriptor::of::<V>()?, Box::new(value)))
    }

    /// Wrap `value` under an existing descriptor.
    ///
    /// Hands the value back if the descriptor describes a different type.
    pub fn with_descriptor<V: Version>(descriptor: VersionDescriptor, value: V) -> Result<Self, V> {
        if descriptor.describes::<V>() {
            Ok(Self::from_parts(descriptor, Box::new(value)))
        } else {
            Err(value)
        }
    }

    pub(crate) fn from_parts(descriptor: VersionDescriptor, value: Box<dyn Any + Send>) -> Self {
        Self { descriptor, value }
    }

    pub fn version_id(&self) -> &str {
        self.descriptor.id()
    }

    pub fn descriptor(&self) -> &VersionDescriptor {
        &self.descriptor
    }

    pub fn is<V: Version>(&self) -> bool {
        self.value.is::<V>()
    }

    pub fn downcast_ref<V: Version>(&self) -> Option<&V> {
        self.value.downcast_ref::<V>()
    }

    /// Recover the concrete value, or get `self` back if it is not a `V`.
    pub fn downcast<V: Version>(self) -> Result<V, Self> {
        let Self { descriptor, value } = self;
        value
            .downcast::<V>()
            .map(|value| *value)
            .map_err(|value| Self { descriptor, value })
    }

    /// Encode with the descriptor's encoding.
    pub fn encode(&self) -> SchemaliftResult<Payload> {
        self.descriptor.encode(self.value.as_ref())
    }

    /// Whether the boxed value is of the descriptor's declared type.
    pub(crate) fn is_consistent(&self) -> bool {
        self.descriptor.matches_value(self.value.as_ref())
    }
}

impl fmt::Debug for AnyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyVersion")
            .field("version", &self.descriptor.id())
            .field("type_name", &self.descriptor.type_name())
            .finish_non_exhaustive()
    }
}
