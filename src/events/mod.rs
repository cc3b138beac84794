//! Event Trie
//!
//! Path-indexed dispatch structure consulted by the scanner. Nodes live in an
//! arena and refer to each other by [`NodeId`], so a node can name itself as
//! its own unknown-element fallback without creating an ownership cycle.
//!
//! ```text
//! EventTrie
//! └── nodes: Vec<DispatchNode>
//!     [0] root ── children["company"] ──> [1]
//!                                          └── children["employee"] ──> [2]
//! ```
//!
//! The trie is built before scanning and only read during a scan. It carries
//! no per-document state, so one trie can serve any number of scans.

pub mod builder;
pub mod node;

pub use builder::parse_element_path;
pub use node::{DispatchNode, NodeId};

use std::ops::{Index, IndexMut};

/// Arena of dispatch nodes with a root at [`EventTrie::root`]
pub struct EventTrie<C> {
    nodes: Vec<DispatchNode<C>>,
    /// Stand-in for elements with no registration and no fallback
    empty: DispatchNode<C>,
}

impl<C> EventTrie<C> {
    /// Create a trie holding only an empty root node
    pub fn new() -> Self {
        EventTrie {
            nodes: vec![DispatchNode::new()],
            empty: DispatchNode::new(),
        }
    }

    /// The document-level node
    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &DispatchNode<C> {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut DispatchNode<C> {
        &mut self.nodes[id.index()]
    }

    /// Shortcut for `node_mut(root())`
    pub fn root_mut(&mut self) -> &mut DispatchNode<C> {
        &mut self.nodes[0]
    }

    /// Add a detached node and return its id
    pub fn add_node(&mut self) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(DispatchNode::new());
        id
    }

    /// Node that becomes active when element `name` opens under `parent`
    #[inline]
    pub(crate) fn resolve_child(&self, parent: &DispatchNode<C>, name: &str) -> &DispatchNode<C> {
        match parent.children.get(name).copied().or(parent.unknown_element) {
            Some(id) => &self.nodes[id.index()],
            None => &self.empty,
        }
    }
}

impl<C> Default for EventTrie<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Index<NodeId> for EventTrie<C> {
    type Output = DispatchNode<C>;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.node(id)
    }
}

impl<C> IndexMut<NodeId> for EventTrie<C> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.node_mut(id)
    }
}

impl<C> std::fmt::Debug for EventTrie<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTrie").field("nodes", &self.nodes).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trie_has_root() {
        let trie: EventTrie<()> = EventTrie::new();
        assert_eq!(trie.node_count(), 1);
        assert_eq!(trie.root(), NodeId(0));
    }

    #[test]
    fn test_resolve_prefers_child_then_fallback() {
        let mut trie: EventTrie<()> = EventTrie::new();
        let child = trie.add_element(trie.root(), "a");
        let fallback = trie.add_node();
        trie.root_mut().set_unknown_element(fallback);
        trie[child].on_text(|_, _| Ok(()));

        let root = trie.node(trie.root());
        assert!(trie.resolve_child(root, "a").text.is_some());
        assert!(std::ptr::eq(trie.resolve_child(root, "b"), trie.node(fallback)));
    }

    #[test]
    fn test_resolve_without_fallback_is_empty() {
        let trie: EventTrie<()> = EventTrie::new();
        let root = trie.node(trie.root());
        let resolved = trie.resolve_child(root, "x");
        assert!(resolved.tag_open.is_none());
        assert!(!std::ptr::eq(resolved, root));
    }

    #[test]
    fn test_self_referential_fallback() {
        let mut trie: EventTrie<()> = EventTrie::new();
        let root = trie.root();
        trie.root_mut().set_unknown_element(root);
        let node = trie.node(root);
        assert!(std::ptr::eq(trie.resolve_child(node, "deep"), node));
    }
}
