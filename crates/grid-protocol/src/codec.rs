use crate::error::{ProtocolError, ProtocolResult};
use crate::message::{NodeMessage, MAX_MESSAGE_SIZE};
use crate::reply::NodeReply;

/// Codec for the framed node wire format.
///
/// Frames are `[4 bytes BE length][1 byte tag][bincode payload]`; the
/// length covers the tag and payload. The tag duplicates the payload's
/// variant so routing layers can peek at the kind without a full decode;
/// the two must agree.
pub struct NodeCodec;

impl NodeCodec {
    /// Encode a request message with framing.
    pub fn encode(msg: &NodeMessage) -> ProtocolResult<Vec<u8>> {
        let payload =
            bincode::serialize(msg).map_err(|e| ProtocolError::Serialization(e.to_string()))?;
        Self::frame(msg.type_tag(), payload)
    }

    /// Decode a framed request message. Returns (message, bytes consumed).
    pub fn decode(data: &[u8]) -> ProtocolResult<(NodeMessage, usize)> {
        let (tag, payload, total) = Self::unframe(data)?;
        let msg: NodeMessage = bincode::deserialize(payload)
            .map_err(|e| ProtocolError::Deserialization(e.to_string()))?;
        if tag != msg.type_tag() {
            return Err(ProtocolError::InvalidMessageType(tag));
        }
        Ok((msg, total))
    }

    /// Encode a reply with framing.
    pub fn encode_reply(reply: &NodeReply) -> ProtocolResult<Vec<u8>> {
        let payload =
            bincode::serialize(reply).map_err(|e| ProtocolError::Serialization(e.to_string()))?;
        Self::frame(reply.type_tag(), payload)
    }

    /// Decode a framed reply. Returns (reply, bytes consumed).
    pub fn decode_reply(data: &[u8]) -> ProtocolResult<(NodeReply, usize)> {
        let (tag, payload, total) = Self::unframe(data)?;
        let reply: NodeReply = bincode::deserialize(payload)
            .map_err(|e| ProtocolError::Deserialization(e.to_string()))?;
        if tag != reply.type_tag() {
            return Err(ProtocolError::InvalidMessageType(tag));
        }
        Ok((reply, total))
    }

    fn frame(tag: u8, payload: Vec<u8>) -> ProtocolResult<Vec<u8>> {
        if payload.len() > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: payload.len(),
                max: MAX_MESSAGE_SIZE,
            });
        }
        let len = (payload.len() + 1) as u32;
        let mut buf = Vec::with_capacity(4 + 1 + payload.len());
        buf.extend_from_slice(&len.to_be_bytes());
        buf.push(tag);
        buf.extend_from_slice(&payload);
        tracing::trace!(tag, frame_len = buf.len(), "encoded frame");
        Ok(buf)
    }

    fn unframe(data: &[u8]) -> ProtocolResult<(u8, &[u8], usize)> {
        if data.len() < 5 {
            return Err(ProtocolError::FramingError("too short".into()));
        }
        let len = u32::from_be_bytes(data[0..4].try_into().expect("4-byte slice")) as usize;
        if len < 1 {
            return Err(ProtocolError::FramingError("zero-length frame".into()));
        }
        if len - 1 > MAX_MESSAGE_SIZE {
            return Err(ProtocolError::MessageTooLarge {
                size: len - 1,
                max: MAX_MESSAGE_SIZE,
            });
        }
        let total = 4 + len;
        if data.len() < total {
            return Err(ProtocolError::FramingError(format!(
                "incomplete: have {}, need {}",
                data.len(),
                total
            )));
        }
        Ok((data[4], &data[5..total], total))
    }
}

#[cfg(test)]
mod tests {
    use grid_store::{ObjectValue, StoredObject};
    use grid_types::{NodeId, Pointer, Uid};

    use super::*;
    use crate::reply::error_codes;

    macro_rules! roundtrip_test {
        ($name:ident, $msg:expr) => {
            #[test]
            fn $name() {
                let msg = $msg;
                let encoded = NodeCodec::encode(&msg).unwrap();
                let (decoded, consumed) = NodeCodec::decode(&encoded).unwrap();
                assert_eq!(consumed, encoded.len());
                assert_eq!(decoded, msg);
            }
        };
    }

    roundtrip_test!(save_object_roundtrip, NodeMessage::SaveObject {
        uid: Uid::generate(),
        object: StoredObject::value(42i64),
    });

    roundtrip_test!(get_object_roundtrip, NodeMessage::GetObject {
        uid: Uid::generate(),
    });

    roundtrip_test!(delete_object_roundtrip, NodeMessage::DeleteObject {
        uid: Uid::generate(),
    });

    roundtrip_test!(run_class_method_roundtrip, NodeMessage::RunClassMethod {
        uid: Uid::generate(),
        method_name: "add".into(),
        args: vec![ObjectValue::Int(1), ObjectValue::Float(2.5)],
    });

    roundtrip_test!(run_function_roundtrip, NodeMessage::RunFunctionOrConstructor {
        path: "tensorlib.zeros".into(),
        args: vec![ObjectValue::List(vec![ObjectValue::Int(3)])],
    });

    macro_rules! reply_roundtrip_test {
        ($name:ident, $reply:expr) => {
            #[test]
            fn $name() {
                let reply = $reply;
                let encoded = NodeCodec::encode_reply(&reply).unwrap();
                let (decoded, consumed) = NodeCodec::decode_reply(&encoded).unwrap();
                assert_eq!(consumed, encoded.len());
                assert_eq!(decoded, reply);
            }
        };
    }

    reply_roundtrip_test!(ack_roundtrip, NodeReply::Ack);

    reply_roundtrip_test!(object_reply_roundtrip, NodeReply::Object(
        StoredObject::typed("payload", "lib.Text")
    ));

    reply_roundtrip_test!(pointer_reply_roundtrip, NodeReply::Pointer(
        Pointer::new(Uid::generate(), NodeId::new("node-a")).with_type("lib.T")
    ));

    reply_roundtrip_test!(not_found_roundtrip, NodeReply::NotFound(Uid::generate()));

    reply_roundtrip_test!(error_reply_roundtrip, NodeReply::Error {
        code: error_codes::UNKNOWN_PATH,
        message: "no such path".into(),
    });

    #[test]
    fn decode_truncated() {
        let err = NodeCodec::decode(&[0, 0, 0]).unwrap_err();
        assert!(matches!(err, ProtocolError::FramingError(_)));
    }

    #[test]
    fn decode_zero_length() {
        let data = [0u8, 0, 0, 0, 0]; // length = 0
        let err = NodeCodec::decode(&data).unwrap_err();
        assert!(matches!(err, ProtocolError::FramingError(_)));
    }

    #[test]
    fn decode_incomplete_frame() {
        let msg = NodeMessage::GetObject {
            uid: Uid::generate(),
        };
        let encoded = NodeCodec::encode(&msg).unwrap();
        let err = NodeCodec::decode(&encoded[..encoded.len() - 1]).unwrap_err();
        assert!(matches!(err, ProtocolError::FramingError(_)));
    }

    #[test]
    fn decode_rejects_mismatched_tag() {
        let msg = NodeMessage::GetObject {
            uid: Uid::generate(),
        };
        let mut encoded = NodeCodec::encode(&msg).unwrap();
        encoded[4] = 9; // corrupt the tag byte
        let err = NodeCodec::decode(&encoded).unwrap_err();
        assert!(matches!(err, ProtocolError::InvalidMessageType(9)));
    }

    #[test]
    fn decode_rejects_oversized_length_prefix() {
        let mut data = Vec::new();
        data.extend_from_slice(&(u32::MAX).to_be_bytes());
        data.push(1);
        data.extend_from_slice(&[0u8; 16]);
        let err = NodeCodec::decode(&data).unwrap_err();
        assert!(matches!(err, ProtocolError::MessageTooLarge { .. }));
    }

    #[test]
    fn consumed_supports_back_to_back_frames() {
        let first = NodeMessage::GetObject {
            uid: Uid::generate(),
        };
        let second = NodeMessage::DeleteObject {
            uid: Uid::generate(),
        };
        let mut stream = NodeCodec::encode(&first).unwrap();
        stream.extend(NodeCodec::encode(&second).unwrap());

        let (decoded_first, consumed) = NodeCodec::decode(&stream).unwrap();
        let (decoded_second, _) = NodeCodec::decode(&stream[consumed..]).unwrap();
        assert_eq!(decoded_first, first);
        assert_eq!(decoded_second, second);
    }
}
