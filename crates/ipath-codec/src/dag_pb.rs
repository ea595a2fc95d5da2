//! Linked-file codec: the protobuf `PBNode` / `PBLink` wire format.
//!
//! ```text
//! PBNode { 2: repeated PBLink Links; 1: optional bytes Data }
//! PBLink { 1: bytes Hash (binary CID); 2: optional string Name; 3: optional uint64 Tsize }
//! ```
//!
//! Links are written before data. Unknown fields and non length-delimited
//! wire types where bytes are expected are rejected.

use cid::Cid;
use ipath_types::{codes, Link, LinkedNode, NodeValue};

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult};

const NAME: &str = "dag-pb";

const WIRE_VARINT: u8 = 0;
const WIRE_LEN: u8 = 2;

/// Linked-file codec (`dag-pb`, 0x70).
#[derive(Clone, Copy, Debug, Default)]
pub struct DagPbCodec;

impl Codec for DagPbCodec {
    fn code(&self) -> u64 {
        codes::DAG_PB
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn decode(&self, bytes: &[u8]) -> CodecResult<NodeValue> {
        decode_node(bytes).map(NodeValue::Linked)
    }

    fn encode(&self, value: &NodeValue) -> CodecResult<Vec<u8>> {
        match value {
            NodeValue::Linked(node) => Ok(encode_node(node)),
            NodeValue::Generic(v) => Err(CodecError::Unencodable {
                codec: NAME,
                kind: v.kind(),
                reason: "only linked-file nodes are supported".into(),
            }),
        }
    }
}

fn malformed(reason: impl Into<String>) -> CodecError {
    CodecError::Malformed {
        codec: NAME,
        reason: reason.into(),
    }
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos >= self.buf.len()
    }

    fn varint(&mut self) -> CodecResult<u64> {
        let mut value: u64 = 0;
        for i in 0..10 {
            let byte = *self
                .buf
                .get(self.pos)
                .ok_or_else(|| malformed("truncated varint"))?;
            self.pos += 1;
            if i == 9 && byte > 0x01 {
                return Err(malformed("varint overflows u64"));
            }
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(malformed("varint too long"))
    }

    fn key(&mut self) -> CodecResult<(u64, u8)> {
        let key = self.varint()?;
        Ok((key >> 3, (key & 0x07) as u8))
    }

    fn bytes(&mut self) -> CodecResult<&'a [u8]> {
        let len = usize::try_from(self.varint()?).map_err(|_| malformed("length overflow"))?;
        let end = self
            .pos
            .checked_add(len)
            .filter(|end| *end <= self.buf.len())
            .ok_or_else(|| {
                malformed(format!(
                    "incomplete field: have {}, need {len}",
                    self.buf.len() - self.pos
                ))
            })?;
        let out = &self.buf[self.pos..end];
        self.pos = end;
        Ok(out)
    }
}

fn decode_node(bytes: &[u8]) -> CodecResult<LinkedNode> {
    let mut reader = Reader::new(bytes);
    let mut links = Vec::new();
    let mut data = None;

    while !reader.is_empty() {
        match reader.key()? {
            (1, WIRE_LEN) => {
                if data.is_some() {
                    return Err(malformed("duplicate Data field"));
                }
                data = Some(reader.bytes()?.to_vec());
            }
            (2, WIRE_LEN) => links.push(decode_link(reader.bytes()?)?),
            (field, wire) => {
                return Err(malformed(format!(
                    "unexpected PBNode field {field} (wire type {wire})"
                )))
            }
        }
    }

    Ok(LinkedNode::new(links, data))
}

fn decode_link(bytes: &[u8]) -> CodecResult<Link> {
    let mut reader = Reader::new(bytes);
    let mut target = None;
    let mut name = None;
    let mut size = None;

    while !reader.is_empty() {
        match reader.key()? {
            (1, WIRE_LEN) => {
                let raw = reader.bytes()?;
                let cid = Cid::try_from(raw)
                    .map_err(|e| malformed(format!("invalid link hash: {e}")))?;
                target = Some(cid);
            }
            (2, WIRE_LEN) => {
                let raw = reader.bytes()?;
                let text = std::str::from_utf8(raw)
                    .map_err(|e| malformed(format!("link name is not UTF-8: {e}")))?;
                name = Some(text.to_string());
            }
            (3, WIRE_VARINT) => size = Some(reader.varint()?),
            (field, wire) => {
                return Err(malformed(format!(
                    "unexpected PBLink field {field} (wire type {wire})"
                )))
            }
        }
    }

    let target = target.ok_or_else(|| malformed("link without Hash"))?;
    Ok(Link { name, target, size })
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

fn put_varint(buf: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        buf.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    buf.push(value as u8);
}

fn put_key(buf: &mut Vec<u8>, field: u64, wire: u8) {
    put_varint(buf, (field << 3) | u64::from(wire));
}

fn put_bytes(buf: &mut Vec<u8>, field: u64, bytes: &[u8]) {
    put_key(buf, field, WIRE_LEN);
    put_varint(buf, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

fn encode_link(link: &Link) -> Vec<u8> {
    let mut buf = Vec::new();
    put_bytes(&mut buf, 1, &link.target.to_bytes());
    if let Some(name) = &link.name {
        put_bytes(&mut buf, 2, name.as_bytes());
    }
    if let Some(size) = link.size {
        put_key(&mut buf, 3, WIRE_VARINT);
        put_varint(&mut buf, size);
    }
    buf
}

fn encode_node(node: &LinkedNode) -> Vec<u8> {
    let mut buf = Vec::new();
    for link in &node.links {
        put_bytes(&mut buf, 2, &encode_link(link));
    }
    if let Some(data) = &node.data {
        put_bytes(&mut buf, 1, data);
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipath_types::{cid_from_digest, Value};

    fn cid(n: u8) -> Cid {
        cid_from_digest(codes::RAW, codes::SHA2_256, &[n; 32]).unwrap()
    }

    fn decode(bytes: &[u8]) -> CodecResult<LinkedNode> {
        match DagPbCodec.decode(bytes)? {
            NodeValue::Linked(node) => Ok(node),
            NodeValue::Generic(_) => unreachable!("dag-pb always decodes linked nodes"),
        }
    }

    #[test]
    fn empty_node_is_empty_bytes() {
        let bytes = DagPbCodec.encode(&LinkedNode::default().into()).unwrap();
        assert!(bytes.is_empty());
        assert_eq!(decode(&bytes).unwrap(), LinkedNode::default());
    }

    #[test]
    fn unixfs_empty_directory_bytes() {
        // Data = 0x08 0x01 (UnixFS Directory), no links.
        let node = decode(&[0x0a, 0x02, 0x08, 0x01]).unwrap();
        assert!(node.is_empty());
        assert_eq!(node.data, Some(vec![0x08, 0x01]));
    }

    #[test]
    fn links_keep_order_and_fields() {
        let node = LinkedNode::new(
            vec![
                Link::named("b.txt", cid(2), Some(300)),
                Link::named("a.txt", cid(1), None),
                Link::unnamed(cid(3), Some(1)),
            ],
            Some(b"payload".to_vec()),
        );
        let bytes = DagPbCodec.encode(&node.clone().into()).unwrap();
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, node);
        assert_eq!(decoded.links[0].name.as_deref(), Some("b.txt"));
    }

    #[test]
    fn large_sizes_use_multibyte_varints() {
        let node = LinkedNode::new(vec![Link::named("big", cid(9), Some(u64::MAX))], None);
        let bytes = DagPbCodec.encode(&node.clone().into()).unwrap();
        assert_eq!(decode(&bytes).unwrap(), node);
    }

    #[test]
    fn truncated_input_is_malformed() {
        let node = LinkedNode::new(vec![Link::named("x", cid(1), None)], None);
        let bytes = DagPbCodec.encode(&node.into()).unwrap();
        let err = decode(&bytes[..bytes.len() - 3]).unwrap_err();
        assert!(matches!(err, CodecError::Malformed { codec: "dag-pb", .. }));
    }

    #[test]
    fn unknown_field_is_rejected() {
        // field 3, varint
        let err = decode(&[0x18, 0x01]).unwrap_err();
        assert!(err.to_string().contains("unexpected PBNode field 3"));
    }

    #[test]
    fn link_without_hash_is_rejected() {
        let mut link = Vec::new();
        put_bytes(&mut link, 2, b"orphan");
        let mut node = Vec::new();
        put_bytes(&mut node, 2, &link);
        let err = decode(&node).unwrap_err();
        assert!(err.to_string().contains("link without Hash"));
    }

    #[test]
    fn generic_values_are_unencodable() {
        let err = DagPbCodec.encode(&Value::Null.into()).unwrap_err();
        assert!(matches!(err, CodecError::Unencodable { kind: "null", .. }));
    }
}
