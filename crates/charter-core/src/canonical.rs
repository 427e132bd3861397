//! # Canonical Bytes — Deterministic Serialization for Audit Digests
//!
//! `CanonicalBytes` is the only input accepted by [`crate::sha256_digest`].
//! Its inner buffer is private and its sole constructor runs every value
//! through the same pipeline:
//!
//! 1. Serialize to a `serde_json::Value`.
//! 2. Reject any non-integer number. Vote counts are integers and
//!    monetary figures are [`crate::Decimal`] strings, so a float can only
//!    appear through a bug.
//! 3. Emit RFC 8785 (JCS) bytes via `serde_jcs`: sorted keys, compact
//!    separators.
//!
//! Two procedural histories that are equal therefore always hash to the
//! same digest, independent of field declaration order.

use serde::Serialize;
use serde_json::Value;

use crate::error::CanonicalizationError;

/// Bytes produced by JCS canonicalization with float rejection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalBytes(Vec<u8>);

impl CanonicalBytes {
    /// Canonicalize any serializable value.
    ///
    /// # Errors
    ///
    /// `FloatRejected` if the value contains a non-integer number,
    /// `SerializationFailed` if serialization itself fails.
    pub fn new(obj: &impl Serialize) -> Result<Self, CanonicalizationError> {
        let value = serde_json::to_value(obj)?;
        reject_floats(&value)?;
        let s = serde_jcs::to_string(&value)?;
        Ok(Self(s.into_bytes()))
    }

    /// The canonical byte sequence.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the canonical byte sequence.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if the canonical byte sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

fn reject_floats(value: &Value) -> Result<(), CanonicalizationError> {
    match value {
        Value::Null | Value::Bool(_) | Value::String(_) => Ok(()),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => Err(CanonicalizationError::FloatRejected(f)),
            _ => Ok(()),
        },
        Value::Array(items) => items.iter().try_for_each(reject_floats),
        Value::Object(map) => map.values().try_for_each(reject_floats),
    }
}
