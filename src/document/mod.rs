//! Document tree module
//!
//! Position-aware YAML trees: the node model, the loader that builds it from
//! text, and the bridge to `serde_json` values used by schema evaluation

pub mod convert;
pub mod loader;
pub mod node;

pub use loader::{parse_mapping, parse_str};
pub use node::{Entry, Node, NodeKind, Tag};
