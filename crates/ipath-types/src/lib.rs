//! Foundation types for ipath.
//!
//! This crate provides the identifier, value, and path types shared by every
//! other ipath crate. Content identifiers are multiformats CIDs from the
//! [`cid`] crate and are re-exported here so downstream crates agree on a
//! single version.
//!
//! # Key Types
//!
//! - [`Cid`]: Content identifier (codec code, multihash)
//! - [`Value`]: Tagged value tree of a generic (structured) node
//! - [`LinkedNode`] / [`Link`]: Linked-file node with named child links
//! - [`NodeValue`]: Either kind of decoded node payload
//! - [`DecodedNode`]: Decoded block plus its re-derived identifier
//! - [`split_path`]: Path segmentation rules

pub mod codes;
pub mod error;
pub mod ident;
pub mod node;
pub mod path;
pub mod value;

pub use cid::Cid;
pub use error::TypeError;
pub use ident::{cid_from_digest, parse_cid, short_cid, with_version_of};
pub use node::{DecodedNode, Link, LinkedNode, NodeKind, NodeValue};
pub use path::{join_segments, split_path};
pub use value::Value;
