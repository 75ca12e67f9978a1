//! A longest-match trie keyed by Unicode scalar sequences.
//!
//! Nodes live in a flat arena (`Vec<Node>`) addressed by index rather than
//! through owning child/parent pointers, so deletion and prefix search can
//! walk the tree without fighting the borrow checker or leaning on `Rc`.

use std::collections::HashMap;

/// Index of a node within a [`Trie`]'s arena. The root is always `0`.
type NodeId = usize;

/// A single trie node.
///
/// `value` is `None` when the node is not terminal, i.e. no key ends here
/// even though longer keys sharing this prefix may exist as descendants.
struct Node {
    /// Index of the parent node, or `None` for the root.
    parent: Option<NodeId>,
    /// The code point labeling the edge from `parent` to this node.
    edge: Option<char>,
    /// The replacement text, if a key terminates at this node.
    value: Option<String>,
    /// Children keyed by the next code point.
    children: HashMap<char, NodeId>,
}

impl Node {
    fn root() -> Self {
        Self {
            parent: None,
            edge: None,
            value: None,
            children: HashMap::new(),
        }
    }
}

/// A handle to a node found by [`Trie::search`] or [`Trie::longest_prefix`].
///
/// Borrows the trie so callers can read the matched value and reconstruct
/// the full key without the trie handing out raw indices.
pub struct Match<'a> {
    trie: &'a Trie,
    id: NodeId,
}

impl<'a> Match<'a> {
    /// The replacement text stored at this node.
    pub fn value(&self) -> &'a str {
        // SAFETY-free: `Match` is only constructed for terminal nodes.
        self.trie.nodes[self.id].value.as_deref().unwrap_or("")
    }

    /// The full key from the root to this node, rebuilt by walking parent
    /// links (there are no cached `full_key` strings in the arena).
    pub fn full_key(&self) -> String {
        let mut chars = Vec::new();
        let mut current = self.id;
        while let Some(edge) = self.trie.nodes[current].edge {
            chars.push(edge);
            current = self.trie.nodes[current]
                .parent
                .expect("non-root node must have a parent");
        }
        chars.reverse();
        chars.into_iter().collect()
    }

    /// The number of code points in [`Match::full_key`], without allocating.
    pub fn key_len(&self) -> usize {
        let mut len = 0;
        let mut current = self.id;
        while self.trie.nodes[current].edge.is_some() {
            len += 1;
            current = self.trie.nodes[current]
                .parent
                .expect("non-root node must have a parent");
        }
        len
    }
}

/// An ordered-tree rule table keyed by Unicode scalar sequences.
///
/// Keys are sequences of `char`, so a non-BMP code point (an emoji, say)
/// consumes exactly one edge, matching the "one scalar, one edge"
/// rule even though it would be two UTF-16 code units upstream.
pub struct Trie {
    nodes: Vec<Node>,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    /// Creates an empty trie containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::root()],
        }
    }

    const ROOT: NodeId = 0;

    /// Inserts `value` at `key`, creating intermediate nodes as needed.
    ///
    /// Overwrites any previous value at `key`. An empty `key` sets the
    /// root's value; this is legal but not meaningful for matching, since
    /// [`Trie::longest_prefix`] never returns the root itself.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let mut node = Self::ROOT;
        for ch in key.chars() {
            node = match self.nodes[node].children.get(&ch) {
                Some(&child) => child,
                None => {
                    let child = self.nodes.len();
                    self.nodes.push(Node {
                        parent: Some(node),
                        edge: Some(ch),
                        value: None,
                        children: HashMap::new(),
                    });
                    self.nodes[node].children.insert(ch, child);
                    child
                }
            };
        }
        self.nodes[node].value = Some(value.into());
    }

    /// Walks `key` from the root and returns the node reached, if every
    /// code point in `key` had a matching edge. Does not require the node
    /// to be terminal.
    pub fn search(&self, key: &str) -> Option<Match<'_>> {
        let mut node = Self::ROOT;
        for ch in key.chars() {
            node = *self.nodes[node].children.get(&ch)?;
        }
        Some(Match { trie: self, id: node })
    }

    /// Removes the value at `key`, if present, and prunes any chain of
    /// now-childless ancestors back toward the root.
    ///
    /// A no-op if `key` was never inserted, or if the node at `key` holds
    /// no value (e.g. it exists only because a longer key passes through
    /// it) — in the second case the trie is left untouched rather than
    /// pruned, since the node is still load-bearing for that longer key.
    pub fn delete(&mut self, key: &str) {
        let Some(mut node) = self.search(key).map(|m| m.id) else {
            return;
        };
        if self.nodes[node].value.take().is_none() {
            return;
        }
        while node != Self::ROOT && self.nodes[node].children.is_empty() {
            let parent = self.nodes[node].parent.expect("non-root node has a parent");
            let edge = self.nodes[node].edge.expect("non-root node has an edge");
            self.nodes[parent].children.remove(&edge);
            node = parent;
        }
    }

    /// Returns the deepest terminal node reached while consuming a prefix
    /// of `key`, or `None` if no key in the trie prefixes `key`.
    ///
    /// Intermediate nodes without a value never count as a match, even if
    /// the path to them is a prefix of `key`: only a value-bearing node
    /// can be returned.
    pub fn longest_prefix(&self, key: &str) -> Option<Match<'_>> {
        let mut node = Self::ROOT;
        let mut best = None;
        for ch in key.chars() {
            let Some(&child) = self.nodes[node].children.get(&ch) else {
                break;
            };
            node = child;
            if self.nodes[node].value.is_some() {
                best = Some(node);
            }
        }
        best.map(|id| Match { trie: self, id })
    }

    /// Builds a trie from a flat `key -> value` map in one pass.
    pub fn from_dict<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut trie = Self::new();
        for (key, value) in entries {
            trie.insert(key.as_ref(), value);
        }
        trie
    }
}
