//! Document tree node model

use core::fmt;

/// Short type tag of a node
///
/// Scalars carry one of the five core scalar tags; containers carry
/// `Seq`/`Map` unless an explicit tag says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Tag {
    Str,
    Int,
    Float,
    Bool,
    Null,
    Seq,
    Map,
    /// Any explicit tag outside the core schema, e.g. `!vault`
    Custom(String),
}

impl Tag {
    /// Human-readable type name used in messages
    #[must_use]
    pub fn friendly_name(&self) -> &str {
        match *self {
            Self::Str => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Null => "null",
            Self::Seq => "list",
            Self::Map => "map",
            Self::Custom(ref tag) => tag.as_str(),
        }
    }

    #[must_use]
    #[inline]
    pub const fn is_numeric(&self) -> bool {
        matches!(*self, Self::Int | Self::Float)
    }
}

impl fmt::Display for Tag {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.friendly_name())
    }
}

/// Kind-specific payload of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Scalar with its literal source text
    Scalar(String),
    /// Mapping entries in document order; keys are unique
    Mapping(Vec<Entry>),
    Sequence(Vec<Node>),
}

/// One `key: value` pair of a mapping
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: String,
    /// 1-based line of the key
    pub line: usize,
    pub value: Node,
}

/// A node of a parsed document
///
/// Aliases are resolved by the loader, so every node seen here is a
/// scalar, a mapping or a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub tag: Tag,
    /// 1-based line where the node starts; 0 for synthesized nodes
    pub line: usize,
}

impl Node {
    #[must_use]
    pub fn scalar<S: Into<String>>(value: S, tag: Tag, line: usize) -> Self {
        Self {
            kind: NodeKind::Scalar(value.into()),
            tag,
            line,
        }
    }

    #[must_use]
    pub const fn mapping(entries: Vec<Entry>, line: usize) -> Self {
        Self {
            kind: NodeKind::Mapping(entries),
            tag: Tag::Map,
            line,
        }
    }

    #[must_use]
    pub const fn sequence(items: Vec<Self>, line: usize) -> Self {
        Self {
            kind: NodeKind::Sequence(items),
            tag: Tag::Seq,
            line,
        }
    }

    /// An empty mapping with no source position
    #[must_use]
    pub const fn empty_mapping() -> Self {
        Self::mapping(Vec::new(), 0)
    }

    #[must_use]
    #[inline]
    pub const fn is_mapping(&self) -> bool {
        matches!(self.kind, NodeKind::Mapping(_))
    }

    #[must_use]
    #[inline]
    pub const fn is_sequence(&self) -> bool {
        matches!(self.kind, NodeKind::Sequence(_))
    }

    #[must_use]
    #[inline]
    pub const fn is_scalar(&self) -> bool {
        matches!(self.kind, NodeKind::Scalar(_))
    }

    #[must_use]
    #[inline]
    pub fn is_null(&self) -> bool {
        self.tag == Tag::Null
    }

    /// Mapping entries, or an empty slice for other kinds
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        match self.kind {
            NodeKind::Mapping(ref entries) => entries,
            NodeKind::Scalar(_) | NodeKind::Sequence(_) => &[],
        }
    }

    /// Sequence items, or an empty slice for other kinds
    #[must_use]
    pub fn items(&self) -> &[Self] {
        match self.kind {
            NodeKind::Sequence(ref items) => items,
            NodeKind::Scalar(_) | NodeKind::Mapping(_) => &[],
        }
    }

    /// Literal text of a scalar
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self.kind {
            NodeKind::Scalar(ref value) => Some(value.as_str()),
            NodeKind::Mapping(_) | NodeKind::Sequence(_) => None,
        }
    }

    /// Entry for `key` when this node is a mapping
    #[must_use]
    pub fn entry(&self, key: &str) -> Option<&Entry> {
        self.entries().iter().find(|entry| entry.key == key)
    }

    /// Value for `key` when this node is a mapping
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.entry(key).map(|entry| &entry.value)
    }

    /// Container kind name used in kind-mismatch messages
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            NodeKind::Scalar(_) => "scalar",
            NodeKind::Mapping(_) => "mapping",
            NodeKind::Sequence(_) => "sequence",
        }
    }
}
