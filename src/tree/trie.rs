//! Segment-keyed prefix trie

use std::collections::HashMap;

/// A node of the prefix trie
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    /// The segment this node is keyed by in its parent
    pub segment: String,

    /// True when some inserted URL ends exactly at this node
    pub is_terminal: bool,

    /// The URL that ended here, set together with `is_terminal`
    pub source_url: Option<String>,

    children: Vec<TrieNode>,
    index: HashMap<String, usize>,
}

impl TrieNode {
    fn new(segment: &str) -> Self {
        Self {
            segment: segment.to_string(),
            ..Default::default()
        }
    }

    /// Children in first-insertion order
    pub fn children(&self) -> &[TrieNode] {
        &self.children
    }

    /// Look up a child by its exact segment text
    pub fn child(&self, segment: &str) -> Option<&TrieNode> {
        self.index.get(segment).map(|&i| &self.children[i])
    }

    /// Whether this node has at least one child
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    fn child_or_insert(&mut self, segment: &str) -> &mut TrieNode {
        let i = match self.index.get(segment) {
            Some(&i) => i,
            None => {
                self.children.push(TrieNode::new(segment));
                let i = self.children.len() - 1;
                self.index.insert(segment.to_string(), i);
                i
            }
        };
        &mut self.children[i]
    }
}

/// Trie of segment sequences, one child per distinct segment
#[derive(Debug, Clone, Default)]
pub struct PrefixTrie {
    root: TrieNode,
}

impl PrefixTrie {
    /// Create an empty trie
    pub fn new() -> Self {
        Self::default()
    }

    /// The unkeyed root node
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Insert a segment path, marking only its final node as terminal.
    ///
    /// Inserting the same path twice is a no-op. An empty path marks the root.
    pub fn insert<S: AsRef<str>>(&mut self, segments: &[S], source_url: &str) {
        let mut current = &mut self.root;
        for segment in segments {
            current = current.child_or_insert(segment.as_ref());
        }
        current.is_terminal = true;
        current.source_url = Some(source_url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_creates_path() {
        let mut trie = PrefixTrie::new();
        trie.insert(&["a", "b", "c"], "https://x.com/a/b/c");

        let a = trie.root().child("a").unwrap();
        let b = a.child("b").unwrap();
        let c = b.child("c").unwrap();

        assert!(!a.is_terminal);
        assert!(!b.is_terminal);
        assert!(c.is_terminal);
        assert_eq!(c.source_url.as_deref(), Some("https://x.com/a/b/c"));
        assert!(a.source_url.is_none());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut trie = PrefixTrie::new();
        trie.insert(&["a", "b"], "https://x.com/a/b");
        let before = trie.root().clone();
        trie.insert(&["a", "b"], "https://x.com/a/b");
        assert_eq!(trie.root(), &before);
        assert_eq!(trie.root().children().len(), 1);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut trie = PrefixTrie::new();
        for seg in ["zeta", "alpha", "mid", "alpha"] {
            trie.insert(&[seg], seg);
        }
        let order: Vec<&str> = trie
            .root()
            .children()
            .iter()
            .map(|n| n.segment.as_str())
            .collect();
        assert_eq!(order, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_node_can_be_terminal_and_have_children() {
        let mut trie = PrefixTrie::new();
        trie.insert(&["docs", "intro"], "https://x.com/docs/intro");
        trie.insert(&["docs"], "https://x.com/docs");

        let docs = trie.root().child("docs").unwrap();
        assert!(docs.is_terminal);
        assert!(docs.has_children());
        assert_eq!(docs.source_url.as_deref(), Some("https://x.com/docs"));
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let mut trie = PrefixTrie::new();
        trie.insert(&["Docs"], "https://x.com/Docs");
        trie.insert(&["docs"], "https://x.com/docs");
        assert_eq!(trie.root().children().len(), 2);
    }
}
