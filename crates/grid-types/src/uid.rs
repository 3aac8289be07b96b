use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Wire width of a serialized [`Uid`], in bytes.
pub const UID_BYTE_LEN: usize = 16;

/// Globally-unique identifier for an object owned by a grid node.
///
/// A `Uid` is a 128-bit value generated uniformly at random. It is never
/// derived from object content: two saves of identical data receive distinct
/// identifiers. A `Uid` is either freshly generated with [`Uid::generate`] or
/// reconstructed bit-for-bit from a prior serialized form; it is immutable
/// after construction.
///
/// Equality, hashing, and ordering all derive from the same 128-bit value,
/// so equal identifiers always hash identically and `Uid` is usable as a
/// store key. Residual hash collisions between *distinct* logical objects
/// are the store's concern, not this type's.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Uid(uuid::Uuid);

impl Uid {
    /// Generate a fresh random identifier. Non-blocking.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Reconstruct from an existing UUID (deserialization path).
    pub fn from_uuid(value: uuid::Uuid) -> Self {
        Self(value)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }

    /// Integer form of the 128-bit value.
    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    /// The wire form: exactly 16 bytes in the UUID's big-endian byte order.
    pub fn to_bytes(&self) -> [u8; UID_BYTE_LEN] {
        self.0.into_bytes()
    }

    /// Reconstruct from the 16-byte wire form.
    ///
    /// Any slice whose length is not exactly 16 fails with
    /// [`TypeError::InvalidIdentifierBytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        let arr: [u8; UID_BYTE_LEN] =
            bytes
                .try_into()
                .map_err(|_| TypeError::InvalidIdentifierBytes {
                    expected: UID_BYTE_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self(uuid::Uuid::from_bytes(arr)))
    }

    /// Full hex-encoded string (32 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Short identifier (first 8 hex characters) for logs.
    pub fn short_id(&self) -> String {
        format!("uid:{}", hex::encode(&self.to_bytes()[..4]))
    }

    /// Parse from a hex string (32 hex characters, optional `uid:` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        let s = s.strip_prefix("uid:").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }
}

impl fmt::Debug for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uid({})", self.short_id())
    }
}

impl fmt::Display for Uid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

/// Result of decoding identifier bytes from the wire.
///
/// Identifier bytes flagged `as_wrapper` in their envelope carry a foreign
/// library's native identifier rather than a domain object's id. Decoding
/// returns the raw value in that case instead of wrapping it in a [`Uid`].
/// The two outcomes are kept explicitly distinguishable; callers must match
/// rather than assume a domain id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodedId {
    /// A domain identifier addressing an object in a node's store.
    Domain(Uid),
    /// The raw wrapped foreign identifier value.
    Raw(uuid::Uuid),
}

impl DecodedId {
    /// Returns `true` for the domain arm.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    /// The domain id, if this is the domain arm.
    pub fn uid(&self) -> Option<Uid> {
        match self {
            Self::Domain(uid) => Some(*uid),
            Self::Raw(_) => None,
        }
    }
}
