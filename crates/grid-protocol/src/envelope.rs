use serde::{Deserialize, Serialize};

use grid_types::{DecodedId, TypeError, Uid, WrapperRegistry, uid::UID_BYTE_LEN};

use crate::error::{ProtocolError, ProtocolResult};

/// Wire envelope for one identifier.
///
/// The identifier wire format is exactly 16 bytes. Whether those bytes are
/// a domain [`Uid`] or some foreign library's wrapped id is carried
/// out-of-band by `as_wrapper`, never inside the 16 bytes themselves.
/// Wrapped identifiers additionally name their foreign type so the decoder
/// can pick the right adapter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdEnvelope {
    /// The 128-bit identifier value, big-endian.
    pub bytes: [u8; UID_BYTE_LEN],
    /// `true` when the bytes carry a foreign identifier, not a domain uid.
    pub as_wrapper: bool,
    /// Foreign type name; required when `as_wrapper` is set.
    pub wrapper_type: Option<String>,
}

impl IdEnvelope {
    /// Envelope for a domain uid.
    pub fn domain(uid: Uid) -> Self {
        Self {
            bytes: uid.to_bytes(),
            as_wrapper: false,
            wrapper_type: None,
        }
    }

    /// Envelope for a wrapped foreign identifier.
    pub fn wrapper(bytes: [u8; UID_BYTE_LEN], wrapper_type: impl Into<String>) -> Self {
        Self {
            bytes,
            as_wrapper: true,
            wrapper_type: Some(wrapper_type.into()),
        }
    }

    /// Build from raw wire bytes, validating the identifier width.
    pub fn from_wire(
        bytes: &[u8],
        as_wrapper: bool,
        wrapper_type: Option<String>,
    ) -> Result<Self, TypeError> {
        let bytes: [u8; UID_BYTE_LEN] =
            bytes
                .try_into()
                .map_err(|_| TypeError::InvalidIdentifierBytes {
                    expected: UID_BYTE_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self {
            bytes,
            as_wrapper,
            wrapper_type,
        })
    }

    /// Decode against the process-wide wrapper registry.
    pub fn decode(&self) -> ProtocolResult<DecodedId> {
        self.decode_with(WrapperRegistry::global())
    }

    /// Decode against an explicit registry.
    ///
    /// Plain envelopes yield [`DecodedId::Domain`]. Wrapper envelopes are
    /// handed to the adapter registered for their foreign type and yield
    /// the raw value; a wrapper envelope with no type name, or a type name
    /// with no adapter, is a typed error.
    pub fn decode_with(&self, registry: &WrapperRegistry) -> ProtocolResult<DecodedId> {
        if !self.as_wrapper {
            let uid = Uid::from_bytes(&self.bytes)?;
            return Ok(DecodedId::Domain(uid));
        }
        let type_name = self.wrapper_type.as_deref().ok_or_else(|| {
            ProtocolError::Envelope("wrapper flag set without a wrapper type".into())
        })?;
        Ok(registry.decode(type_name, self.bytes)?)
    }
}
