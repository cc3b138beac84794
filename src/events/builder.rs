//! Trie construction by slash-separated element path
//!
//! Paths are relative to the node they are applied to: `"a/b"` from the root
//! addresses element `b` inside root element `a`. Empty segments are ignored,
//! so `"/a//b/"` is the same path.

use super::{EventTrie, NodeId};
use crate::error::HandlerResult;

/// Split an element path into its non-empty segments
pub fn parse_element_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

impl<C> EventTrie<C> {
    /// Return the node at `path` below `from`, creating missing nodes.
    pub fn add_element(&mut self, from: NodeId, path: &str) -> NodeId {
        let mut current = from;
        for name in parse_element_path(path) {
            current = match self.node(current).child(name) {
                Some(next) => next,
                None => {
                    let next = self.add_node();
                    tracing::trace!(parent = current.0, node = next.0, name, "trie node added");
                    self.node_mut(current).children.insert(name.to_owned(), next);
                    next
                }
            };
        }
        current
    }

    /// Register a handler for attribute `name` on the element at `path`.
    ///
    /// An empty path attaches to `from` itself. Returns the node the handler
    /// was attached to.
    pub fn add_attribute_event<F>(&mut self, from: NodeId, path: &str, name: &str, f: F) -> NodeId
    where
        F: Fn(&mut C, &str) -> HandlerResult + Send + Sync + 'static,
    {
        let node = self.add_element(from, path);
        self.node_mut(node).on_attribute(name, f);
        node
    }
}
