use ipath_types::{codes, NodeValue, Value};

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult};

/// Opaque-bytes codec (`raw`, 0x55). Decodes to [`Value::Bytes`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RawCodec;

impl Codec for RawCodec {
    fn code(&self) -> u64 {
        codes::RAW
    }

    fn name(&self) -> &'static str {
        "raw"
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<NodeValue> {
        Ok(NodeValue::Generic(Value::Bytes(bytes.to_vec())))
    }

    fn encode(&self, value: &NodeValue) -> CodecResult<Vec<u8>> {
        match value {
            NodeValue::Generic(Value::Bytes(bytes)) => Ok(bytes.clone()),
            NodeValue::Generic(other) => Err(CodecError::Unencodable {
                codec: "raw",
                kind: other.kind(),
                reason: "raw blocks hold bytes only".into(),
            }),
            NodeValue::Linked(_) => Err(CodecError::Unencodable {
                codec: "raw",
                kind: "linked-file node",
                reason: "raw blocks hold bytes only".into(),
            }),
        }
    }
}
