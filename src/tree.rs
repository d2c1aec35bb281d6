//! # Site Tree Module
//!
//! This module turns the flat list of URLs produced by a crawl into a nested
//! folder/file tree that groups pages by their shared path structure. It is a
//! pure, synchronous transformation: every call builds its own trie and no
//! state is shared between calls.
//!
//! ## Key Components
//!
//! - `parse_url`: Splits a raw URL into an origin segment plus path segments
//! - `PrefixTrie`: Segment-keyed trie that remembers which nodes are real pages
//! - `build_tree`: Folds the longest common prefix into a single root folder
//! - `set_checked` / `checked_ids`: Immutable selection state over a built tree
//!
//! ## Usage
//!
//! ```rust
//! use sitemark::tree::{build_tree, NodeKind};
//!
//! let tree = build_tree(&["https://a.com/x/1", "https://a.com/x/2"]);
//! assert_eq!(tree.len(), 1);
//! assert_eq!(tree[0].id, "https://a.com/x");
//! assert_eq!(tree[0].kind, NodeKind::Folder);
//! ```

mod builder;
mod parser;
mod selection;
mod trie;

pub use builder::build_tree;
pub use parser::{ParsedUrl, parse_url};
pub use selection::{checked_ids, set_checked};
pub use trie::{PrefixTrie, TrieNode};

use serde::{Deserialize, Serialize};

/// Whether a tree node is a leaf page or groups other nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A node without children
    File,

    /// A node with at least one child, even if it is also a page
    Folder,
}

/// A node of the rendered site tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Full URL of the page, or a synthesized path for intermediate folders
    pub id: String,

    /// Display name (the path segment this node stands for)
    pub name: String,

    /// File or folder
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Child nodes in first-insertion order, absent for files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,

    /// Selection state, see [`set_checked`]
    #[serde(default, skip_serializing_if = "is_false")]
    pub checked: bool,
}

impl TreeNode {
    /// Child nodes as a slice, empty for files
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Whether this node is a folder
    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Rejoin segments into a single identifier.
///
/// The first segment is the origin; the rest are joined onto it with `/`.
pub(crate) fn rejoin_segments(segments: &[String]) -> String {
    match segments.split_first() {
        None => String::new(),
        Some((origin, [])) => origin.clone(),
        Some((origin, rest)) => format!("{}/{}", origin, rest.join("/")),
    }
}
