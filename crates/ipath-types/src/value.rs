//! The value tree of a generic (structured) node.

use std::collections::BTreeMap;
use std::fmt;

use cid::Cid;

/// A decoded value inside a generic node.
///
/// Maps, lists, and scalars are explicit variants so traversal dispatches by
/// pattern match on shape. Embedded identifiers are either typed ([`Value::Link`])
/// or plain strings that happen to parse as a CID; [`Value::as_embedded_cid`]
/// covers both.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    Link(Cid),
}

impl Value {
    /// Short name of the variant, for messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Link(_) => "link",
        }
    }

    /// Select a child by path segment.
    ///
    /// A list interprets the segment as a non-negative index; every other
    /// value is treated as a map and the segment as a key. Returns `None` for
    /// a missing key, an out-of-range or non-numeric index, or a scalar.
    pub fn child(&self, segment: &str) -> Option<&Value> {
        match self {
            Self::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            Self::Map(entries) => entries.get(segment),
            _ => None,
        }
    }

    /// The identifier embedded in this value, if any.
    ///
    /// A typed link always qualifies; a string qualifies when it parses as a
    /// CID.
    pub fn as_embedded_cid(&self) -> Option<Cid> {
        match self {
            Self::Link(cid) => Some(*cid),
            Self::String(s) => Cid::try_from(s.as_str()).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Build a map from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Self::List(items) => write!(f, "[{} items]", items.len()),
            Self::Map(entries) => write!(f, "{{{} entries}}", entries.len()),
            Self::Link(cid) => write!(f, "link({cid})"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i128::from(i))
    }
}

impl From<Cid> for Value {
    fn from(cid: Cid) -> Self {
        Self::Link(cid)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
