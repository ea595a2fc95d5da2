//! Block codecs and hash functions for ipath.
//!
//! A block is decoded by looking up its codec code and multihash code in a
//! [`CodecRegistry`]. The registry is an open dispatch table: the built-in
//! codecs and hashers are registered by [`CodecRegistry::with_defaults`] and
//! callers may add their own with [`CodecRegistry::register_codec`] and
//! [`CodecRegistry::register_hasher`].
//!
//! # Built-in Codecs
//!
//! - [`DagPbCodec`]: linked-file nodes (protobuf `PBNode`)
//! - [`DagJsonCodec`]: generic nodes with `{"/": ...}` links and bytes
//! - [`JsonCodec`]: plain JSON generic nodes
//! - [`RawCodec`]: opaque bytes
//!
//! # Built-in Hashers
//!
//! - [`Sha256Hasher`]: `sha2-256`
//! - [`Blake3Hasher`]: `blake3`

pub mod codec;
pub mod dag_json;
pub mod dag_pb;
pub mod error;
pub mod hasher;
pub mod raw;
pub mod registry;

pub use codec::Codec;
pub use dag_json::{DagJsonCodec, JsonCodec};
pub use dag_pb::DagPbCodec;
pub use error::{CodecError, CodecResult};
pub use hasher::{Blake3Hasher, Hasher, Sha256Hasher};
pub use raw::RawCodec;
pub use registry::CodecRegistry;
