//! JSON codecs for generic nodes.
//!
//! [`DagJsonCodec`] reserves the `"/"` key: a map whose only key is `"/"`
//! holding a string is a link, and `{"/": {"bytes": "<base64>"}}` is a byte
//! string (standard alphabet, no padding). [`JsonCodec`] is plain JSON: there
//! are no typed links, although string values may still parse as identifiers
//! during traversal.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use ipath_types::{codes, parse_cid, NodeValue, Value};
use serde_json::{Map, Number, Value as Json};

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult};

const RESERVED_KEY: &str = "/";

/// Generic-node codec with JSON links (`dag-json`, 0x0129).
#[derive(Clone, Copy, Debug, Default)]
pub struct DagJsonCodec;

/// Plain JSON generic-node codec (`json`, 0x0200).
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl Codec for DagJsonCodec {
    fn code(&self) -> u64 {
        codes::DAG_JSON
    }

    fn name(&self) -> &'static str {
        "dag-json"
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<NodeValue> {
        decode_json(self.name(), bytes, true)
    }

    fn encode(&self, value: &NodeValue) -> CodecResult<Vec<u8>> {
        encode_json(self.name(), value, true)
    }
}

impl Codec for JsonCodec {
    fn code(&self) -> u64 {
        codes::JSON
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<NodeValue> {
        decode_json(self.name(), bytes, false)
    }

    fn encode(&self, value: &NodeValue) -> CodecResult<Vec<u8>> {
        encode_json(self.name(), value, false)
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn decode_json(codec: &'static str, bytes: &[u8], links: bool) -> CodecResult<NodeValue> {
    let json: Json = serde_json::from_slice(bytes).map_err(|e| CodecError::Malformed {
        codec,
        reason: e.to_string(),
    })?;
    from_json(codec, json, links).map(NodeValue::Generic)
}

fn from_json(codec: &'static str, json: Json, links: bool) -> CodecResult<Value> {
    let malformed = |reason: String| CodecError::Malformed { codec, reason };
    Ok(match json {
        Json::Null => Value::Null,
        Json::Bool(b) => Value::Bool(b),
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Integer(i128::from(i))
            } else if let Some(u) = n.as_u64() {
                Value::Integer(i128::from(u))
            } else {
                n.as_f64()
                    .map(Value::Float)
                    .ok_or_else(|| malformed(format!("unrepresentable number {n}")))?
            }
        }
        Json::String(s) => Value::String(s),
        Json::Array(items) => Value::List(
            items
                .into_iter()
                .map(|item| from_json(codec, item, links))
                .collect::<CodecResult<_>>()?,
        ),
        Json::Object(map) if links && map.contains_key(RESERVED_KEY) => {
            if map.len() != 1 {
                return Err(malformed("reserved key \"/\" mixed with other keys".into()));
            }
            match map.into_iter().next() {
                Some((_, Json::String(text))) => Value::Link(parse_cid(&text)?),
                Some((_, Json::Object(inner))) => decode_bytes(inner).map_err(malformed)?,
                _ => return Err(malformed("reserved key \"/\" has an invalid value".into())),
            }
        }
        Json::Object(map) => Value::Map(
            map.into_iter()
                .map(|(k, v)| -> CodecResult<(String, Value)> {
                    Ok((k, from_json(codec, v, links)?))
                })
                .collect::<CodecResult<BTreeMap<_, _>>>()?,
        ),
    })
}

fn decode_bytes(inner: Map<String, Json>) -> Result<Value, String> {
    match (inner.len(), inner.get("bytes")) {
        (1, Some(Json::String(b64))) => STANDARD_NO_PAD
            .decode(b64)
            .map(Value::Bytes)
            .map_err(|e| format!("invalid base64 bytes: {e}")),
        _ => Err("reserved key \"/\" holds an object other than {\"bytes\": ...}".into()),
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

fn encode_json(codec: &'static str, value: &NodeValue, links: bool) -> CodecResult<Vec<u8>> {
    let value = match value {
        NodeValue::Generic(v) => v,
        NodeValue::Linked(_) => {
            return Err(CodecError::Unencodable {
                codec,
                kind: "linked-file node",
                reason: "only generic values are supported".into(),
            })
        }
    };
    let json = to_json(codec, value, links)?;
    serde_json::to_vec(&json).map_err(|e| CodecError::Unencodable {
        codec,
        kind: value.kind(),
        reason: e.to_string(),
    })
}

fn to_json(codec: &'static str, value: &Value, links: bool) -> CodecResult<Json> {
    let unencodable = |reason: &str| CodecError::Unencodable {
        codec,
        kind: value.kind(),
        reason: reason.to_string(),
    };
    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(b) => Json::Bool(*b),
        Value::Integer(i) => {
            if let Ok(i) = i64::try_from(*i) {
                Json::Number(i.into())
            } else if let Ok(u) = u64::try_from(*i) {
                Json::Number(u.into())
            } else {
                return Err(unencodable("integer outside the 64-bit range"));
            }
        }
        Value::Float(x) => Number::from_f64(*x)
            .map(Json::Number)
            .ok_or_else(|| unencodable("non-finite float"))?,
        Value::String(s) => Json::String(s.clone()),
        Value::Bytes(b) if links => {
            let mut inner = Map::new();
            inner.insert("bytes".into(), Json::String(STANDARD_NO_PAD.encode(b)));
            reserved(Json::Object(inner))
        }
        Value::Bytes(_) => return Err(unencodable("plain JSON has no byte strings")),
        Value::Link(cid) if links => reserved(Json::String(cid.to_string())),
        Value::Link(cid) => Json::String(cid.to_string()),
        Value::List(items) => Json::Array(
            items
                .iter()
                .map(|item| to_json(codec, item, links))
                .collect::<CodecResult<_>>()?,
        ),
        Value::Map(entries) => {
            if links && entries.contains_key(RESERVED_KEY) {
                return Err(unencodable("map key \"/\" is reserved"));
            }
            let mut map = Map::new();
            for (k, v) in entries {
                map.insert(k.clone(), to_json(codec, v, links)?);
            }
            Json::Object(map)
        }
    })
}

fn reserved(inner: Json) -> Json {
    let mut map = Map::new();
    map.insert(RESERVED_KEY.into(), inner);
    Json::Object(map)
}
