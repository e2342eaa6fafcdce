//! YAML text to document tree
//!
//! Built on the `yaml-rust2` event parser so that every node keeps its
//! source line. Anchors are resolved eagerly: an alias becomes a copy of the
//! completed node it refers to, which also makes self-referential aliases a
//! parse error instead of an infinite walk.

use crate::document::node::{Entry, Node, NodeKind, Tag};
use crate::error::CheckError;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";
const MERGE_KEY: &str = "<<";

/// Nodes every document may produce through aliases regardless of its size
const MIN_ALIAS_BUDGET: usize = 10_000;
/// Alias-expanded nodes allowed per node written in the source
const ALIAS_EXPANSION_RATIO: usize = 10;

static INT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[-+]?[0-9]+|0o[0-7]+|0x[0-9a-fA-F]+)$").expect("scalar pattern is valid")
});

static FLOAT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[-+]?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?)(?:[eE][-+]?[0-9]+)?|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
    )
    .expect("scalar pattern is valid")
});

/// Parse the first YAML document of `source`
///
/// Returns `None` for an empty document.
///
/// # Errors
///
/// Returns an error if:
/// - The text is not valid YAML
/// - A mapping has duplicate or non-scalar keys
/// - An alias refers to an unknown or unfinished anchor
/// - A merge key's value is not a mapping or a sequence of mappings
pub fn parse_str(source: &str) -> Result<Option<Node>, CheckError> {
    let mut builder = TreeBuilder::default();
    let mut parser = Parser::new_from_str(source);
    parser
        .load(&mut builder, false)
        .map_err(|e| CheckError::document(format!("invalid YAML: {e}")))?;

    if let Some(err) = builder.error {
        return Err(err);
    }
    Ok(builder.root)
}

/// Parse a document that is expected to hold a mapping at its root
///
/// An empty document becomes an empty mapping.
///
/// # Errors
///
/// Returns an error if the text cannot be parsed or its root is not a mapping.
pub fn parse_mapping(source: &str, what: &str) -> Result<Node, CheckError> {
    match parse_str(source)? {
        None => Ok(Node::empty_mapping()),
        Some(node) if node.is_mapping() => Ok(node),
        Some(node) => Err(CheckError::document(format!(
            "{what}: expected a YAML mapping at top level, found a {}",
            node.kind_name()
        ))),
    }
}

struct PendingKey {
    name: String,
    line: usize,
    merge: bool,
}

enum Frame {
    Mapping {
        line: usize,
        tag: Option<Tag>,
        anchor: usize,
        entries: Vec<Entry>,
        pending: Option<PendingKey>,
        merges: Vec<Node>,
    },
    Sequence {
        line: usize,
        tag: Option<Tag>,
        anchor: usize,
        items: Vec<Node>,
    },
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    /// Anchored nodes with their node counts
    anchors: HashMap<usize, (Node, usize)>,
    /// Nodes read from parser events
    parsed: usize,
    /// Nodes copied in through aliases
    expanded: usize,
    root: Option<Node>,
    error: Option<CheckError>,
    done: bool,
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event, mark: Marker) {
        if self.error.is_some() || self.done {
            return;
        }
        let line = mark.line();
        let result = match event {
            Event::Scalar(value, style, anchor, tag) => {
                self.parsed += 1;
                let plain = matches!(style, TScalarStyle::Plain);
                let explicit = tag.map(|t| explicit_tag(&t.handle, &t.suffix));
                let resolved = resolve_scalar_tag(&value, plain, explicit);
                let is_merge_key = plain && value == MERGE_KEY;
                self.complete(Node::scalar(value, resolved, line), anchor, is_merge_key)
            }
            Event::MappingStart(anchor, tag) => {
                self.parsed += 1;
                self.stack.push(Frame::Mapping {
                    line,
                    tag: tag.map(|t| explicit_tag(&t.handle, &t.suffix)),
                    anchor,
                    entries: Vec::new(),
                    pending: None,
                    merges: Vec::new(),
                });
                Ok(())
            }
            Event::SequenceStart(anchor, tag) => {
                self.parsed += 1;
                self.stack.push(Frame::Sequence {
                    line,
                    tag: tag.map(|t| explicit_tag(&t.handle, &t.suffix)),
                    anchor,
                    items: Vec::new(),
                });
                Ok(())
            }
            Event::MappingEnd | Event::SequenceEnd => self.close_container(),
            Event::Alias(id) => self.expand_alias(id, line),
            Event::DocumentEnd => {
                self.done = true;
                Ok(())
            }
            _ => Ok(()),
        };
        if let Err(err) = result {
            self.error = Some(err);
        }
    }
}

impl TreeBuilder {
    /// Copy an anchored node in place of an alias
    ///
    /// The total number of copied nodes is bounded by the size of the source
    /// text, so nested anchors cannot grow the tree exponentially.
    fn expand_alias(&mut self, id: usize, line: usize) -> Result<(), CheckError> {
        let Some(&(ref anchored, size)) = self.anchors.get(&id) else {
            return Err(CheckError::document(format!(
                "line {line}: alias refers to an unknown or unfinished anchor"
            )));
        };
        self.expanded = self.expanded.saturating_add(size);
        let budget = self
            .parsed
            .saturating_mul(ALIAS_EXPANSION_RATIO)
            .max(MIN_ALIAS_BUDGET);
        if self.expanded > budget {
            return Err(CheckError::document(format!("line {line}: excessive aliasing")));
        }
        let node = anchored.clone();
        self.complete(node, 0, false)
    }

    fn close_container(&mut self) -> Result<(), CheckError> {
        let Some(frame) = self.stack.pop() else {
            return Err(CheckError::document("unbalanced container end"));
        };
        match frame {
            Frame::Mapping {
                line,
                tag,
                anchor,
                mut entries,
                pending,
                merges,
            } => {
                if let Some(key) = pending {
                    return Err(CheckError::document(format!(
                        "line {}: key {:?} has no value",
                        key.line, key.name
                    )));
                }
                apply_merges(&mut entries, &merges)?;
                let node = Node {
                    kind: NodeKind::Mapping(entries),
                    tag: tag.unwrap_or(Tag::Map),
                    line,
                };
                self.complete(node, anchor, false)
            }
            Frame::Sequence {
                line,
                tag,
                anchor,
                items,
            } => {
                let node = Node {
                    kind: NodeKind::Sequence(items),
                    tag: tag.unwrap_or(Tag::Seq),
                    line,
                };
                self.complete(node, anchor, false)
            }
        }
    }

    /// Attach a finished node to its parent, or make it the document root.
    fn complete(&mut self, node: Node, anchor: usize, is_merge_key: bool) -> Result<(), CheckError> {
        if anchor != 0 {
            self.anchors.insert(anchor, (node.clone(), node_count(&node)));
        }

        match self.stack.last_mut() {
            None => {
                self.root = Some(node);
                Ok(())
            }
            Some(&mut Frame::Sequence { ref mut items, .. }) => {
                items.push(node);
                Ok(())
            }
            Some(&mut Frame::Mapping {
                ref mut entries,
                ref mut pending,
                ref mut merges,
                ..
            }) => match pending.take() {
                None => {
                    let NodeKind::Scalar(name) = node.kind else {
                        return Err(CheckError::document(format!(
                            "line {}: mapping keys must be scalars",
                            node.line
                        )));
                    };
                    *pending = Some(PendingKey {
                        name,
                        line: node.line,
                        merge: is_merge_key,
                    });
                    Ok(())
                }
                Some(key) if key.merge => {
                    merges.push(node);
                    Ok(())
                }
                Some(key) => {
                    if entries.iter().any(|entry| entry.key == key.name) {
                        return Err(CheckError::document(format!(
                            "line {}: mapping key {:?} already defined",
                            key.line, key.name
                        )));
                    }
                    entries.push(Entry {
                        key: key.name,
                        line: key.line,
                        value: node,
                    });
                    Ok(())
                }
            },
        }
    }
}

/// Append entries from `<<` merge sources that the mapping does not define.
///
/// Earlier sources win over later ones, explicit entries over all of them.
fn apply_merges(entries: &mut Vec<Entry>, merges: &[Node]) -> Result<(), CheckError> {
    for source in merges {
        match source.kind {
            NodeKind::Mapping(ref merged) => merge_entries(entries, merged),
            NodeKind::Sequence(ref items) => {
                for item in items {
                    if !item.is_mapping() {
                        return Err(CheckError::document(format!(
                            "line {}: merge sequence items must be mappings",
                            item.line
                        )));
                    }
                    merge_entries(entries, item.entries());
                }
            }
            NodeKind::Scalar(_) => {
                return Err(CheckError::document(format!(
                    "line {}: merge key value must be a mapping or a sequence of mappings",
                    source.line
                )));
            }
        }
    }
    Ok(())
}

fn merge_entries(entries: &mut Vec<Entry>, merged: &[Entry]) {
    for entry in merged {
        if !entries.iter().any(|existing| existing.key == entry.key) {
            entries.push(entry.clone());
        }
    }
}

fn node_count(node: &Node) -> usize {
    match node.kind {
        NodeKind::Scalar(_) => 1,
        NodeKind::Sequence(ref items) => 1 + items.iter().map(node_count).sum::<usize>(),
        NodeKind::Mapping(ref entries) => {
            1 + entries.iter().map(|entry| 1 + node_count(&entry.value)).sum::<usize>()
        }
    }
}

fn explicit_tag(handle: &str, suffix: &str) -> Tag {
    let full = format!("{handle}{suffix}");
    let core = if handle == "!!" {
        Some(suffix)
    } else {
        full.strip_prefix(CORE_TAG_PREFIX)
    };
    match core {
        Some("str") => Tag::Str,
        Some("int") => Tag::Int,
        Some("float") => Tag::Float,
        Some("bool") => Tag::Bool,
        Some("null") => Tag::Null,
        Some("seq") => Tag::Seq,
        Some("map") => Tag::Map,
        Some(other) => Tag::Custom(format!("!!{other}")),
        None => Tag::Custom(full),
    }
}

/// Resolve a scalar's tag with the YAML 1.2 core schema.
fn resolve_scalar_tag(value: &str, plain: bool, explicit: Option<Tag>) -> Tag {
    if let Some(tag) = explicit {
        return tag;
    }
    if !plain {
        return Tag::Str;
    }
    match value {
        "" | "~" | "null" | "Null" | "NULL" => Tag::Null,
        "true" | "True" | "TRUE" | "false" | "False" | "FALSE" => Tag::Bool,
        _ if INT_RE.is_match(value) => Tag::Int,
        _ if FLOAT_RE.is_match(value) => Tag::Float,
        _ => Tag::Str,
    }
}
