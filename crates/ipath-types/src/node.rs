//! Decoded node payloads: linked-file nodes and generic value trees.

use std::fmt;

use cid::Cid;

use crate::value::Value;

/// A named link from a linked-file node to a child block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    /// Entry name (file or directory name). Chunk links are unnamed.
    pub name: Option<String>,
    /// Identifier of the child block.
    pub target: Cid,
    /// Cumulative size of the child subtree, when recorded.
    pub size: Option<u64>,
}

impl Link {
    /// Create a named link.
    pub fn named(name: impl Into<String>, target: Cid, size: Option<u64>) -> Self {
        Self {
            name: Some(name.into()),
            target,
            size,
        }
    }

    /// Create an unnamed link (file chunk).
    pub fn unnamed(target: Cid, size: Option<u64>) -> Self {
        Self {
            name: None,
            target,
            size,
        }
    }
}

/// A linked-file node: ordered links plus optional opaque data.
///
/// Link order is preserved exactly as decoded. Duplicate names are allowed;
/// lookup returns the first match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkedNode {
    pub links: Vec<Link>,
    pub data: Option<Vec<u8>>,
}

impl LinkedNode {
    pub fn new(links: Vec<Link>, data: Option<Vec<u8>>) -> Self {
        Self { links, data }
    }

    /// First link whose name equals `name` exactly.
    pub fn find(&self, name: &str) -> Option<&Link> {
        self.links
            .iter()
            .find(|link| link.name.as_deref() == Some(name))
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Which traversal strategy a node needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Named links to child blocks.
    LinkedFile,
    /// Maps, lists, and scalars.
    Generic,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkedFile => write!(f, "linked-file"),
            Self::Generic => write!(f, "generic"),
        }
    }
}

/// The payload of a decoded block, or a value selected from one.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeValue {
    Linked(LinkedNode),
    Generic(Value),
}

impl NodeValue {
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Linked(_) => NodeKind::LinkedFile,
            Self::Generic(_) => NodeKind::Generic,
        }
    }

    pub fn as_generic(&self) -> Option<&Value> {
        match self {
            Self::Generic(v) => Some(v),
            Self::Linked(_) => None,
        }
    }

    pub fn as_linked(&self) -> Option<&LinkedNode> {
        match self {
            Self::Linked(n) => Some(n),
            Self::Generic(_) => None,
        }
    }
}

impl From<Value> for NodeValue {
    fn from(value: Value) -> Self {
        Self::Generic(value)
    }
}

impl From<LinkedNode> for NodeValue {
    fn from(node: LinkedNode) -> Self {
        Self::Linked(node)
    }
}

/// A decoded block: the identifier re-derived from its bytes and its payload.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedNode {
    pub cid: Cid,
    pub value: NodeValue,
}

impl DecodedNode {
    pub fn new(cid: Cid, value: NodeValue) -> Self {
        Self { cid, value }
    }

    /// Codec code of the block.
    pub fn codec(&self) -> u64 {
        self.cid.codec()
    }

    pub fn kind(&self) -> NodeKind {
        self.value.kind()
    }
}
