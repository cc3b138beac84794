//! Dispatch nodes
//!
//! A [`DispatchNode`] holds the handlers that are active while the scanner is
//! inside an element matching one path of the trie. Every slot is optional;
//! an unset slot is skipped without cost.

use crate::error::HandlerResult;
use std::collections::HashMap;
use std::fmt;

/// Called with the element name on open and on close
pub type TagHandler<C> = Box<dyn Fn(&mut C, &str) -> HandlerResult + Send + Sync>;
/// Called with text (entity-decoded), CDATA (verbatim) or comment content
pub type TextHandler<C> = Box<dyn Fn(&mut C, &str) -> HandlerResult + Send + Sync>;
/// Called with an entity-decoded attribute value
pub type AttributeHandler<C> = Box<dyn Fn(&mut C, &str) -> HandlerResult + Send + Sync>;
/// Called with `(name, raw value)` for every attribute
pub type AllAttributesHandler<C> = Box<dyn Fn(&mut C, &str, &str) -> HandlerResult + Send + Sync>;
/// Called with `(target, data)` of a processing instruction
pub type ProcessingInstructionHandler<C> =
    Box<dyn Fn(&mut C, &str, &str) -> HandlerResult + Send + Sync>;
/// Called with `(version, encoding, standalone)` of the XML declaration
pub type XmlDeclarationHandler<C> =
    Box<dyn Fn(&mut C, &str, &str, &str) -> HandlerResult + Send + Sync>;

/// Index of a node inside its [`EventTrie`](super::EventTrie)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handlers and child lookup for one path of the trie
pub struct DispatchNode<C> {
    pub(crate) tag_open: Option<TagHandler<C>>,
    pub(crate) tag_close: Option<TagHandler<C>>,
    pub(crate) text: Option<TextHandler<C>>,
    pub(crate) cdata: Option<TextHandler<C>>,
    pub(crate) processing_instruction: Option<ProcessingInstructionHandler<C>>,
    pub(crate) comment: Option<TextHandler<C>>,
    /// Only consulted on the root node, for the very first token
    pub(crate) xml_declaration: Option<XmlDeclarationHandler<C>>,
    pub(crate) attributes: HashMap<String, AttributeHandler<C>>,
    pub(crate) all_attributes: Option<AllAttributesHandler<C>>,
    pub(crate) children: HashMap<String, NodeId>,
    pub(crate) unknown_element: Option<NodeId>,
}

impl<C> Default for DispatchNode<C> {
    fn default() -> Self {
        DispatchNode {
            tag_open: None,
            tag_close: None,
            text: None,
            cdata: None,
            processing_instruction: None,
            comment: None,
            xml_declaration: None,
            attributes: HashMap::new(),
            all_attributes: None,
            children: HashMap::new(),
            unknown_element: None,
        }
    }
}

impl<C> DispatchNode<C> {
    /// Create a node with no handlers
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_tag_open<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut C, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.tag_open = Some(Box::new(f));
        self
    }

    pub fn on_tag_close<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut C, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.tag_close = Some(Box::new(f));
        self
    }

    /// Text between markup, entity-decoded. Fires for whitespace-only text too.
    pub fn on_text<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut C, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.text = Some(Box::new(f));
        self
    }

    /// CDATA section content, verbatim
    pub fn on_cdata<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut C, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.cdata = Some(Box::new(f));
        self
    }

    pub fn on_processing_instruction<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut C, &str, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.processing_instruction = Some(Box::new(f));
        self
    }

    /// Comment content, trimmed
    pub fn on_comment<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut C, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.comment = Some(Box::new(f));
        self
    }

    pub fn on_xml_declaration<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut C, &str, &str, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.xml_declaration = Some(Box::new(f));
        self
    }

    /// Wildcard receiving every attribute's name and raw value. Runs before
    /// the named handler, if one matches.
    pub fn on_all_attributes<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut C, &str, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.all_attributes = Some(Box::new(f));
        self
    }

    /// Handler for one attribute, receiving the entity-decoded value
    pub fn on_attribute<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&mut C, &str) -> HandlerResult + Send + Sync + 'static,
    {
        self.attributes.insert(name.into(), Box::new(f));
        self
    }

    /// Node to use for child elements without their own entry.
    ///
    /// Passing the node's own id handles arbitrarily deep unmodelled subtrees.
    pub fn set_unknown_element(&mut self, node: NodeId) -> &mut Self {
        self.unknown_element = Some(node);
        self
    }

    /// Child registered for `name`, if any
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.children.get(name).copied()
    }

    pub fn unknown_element(&self) -> Option<NodeId> {
        self.unknown_element
    }

    /// Check whether an attribute needs to be read at all
    #[inline]
    pub(crate) fn wants_attribute(&self, name: &str) -> bool {
        self.all_attributes.is_some() || self.attributes.contains_key(name)
    }
}

impl<C> fmt::Debug for DispatchNode<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut attributes: Vec<_> = self.attributes.keys().collect();
        attributes.sort();
        f.debug_struct("DispatchNode")
            .field("tag_open", &self.tag_open.is_some())
            .field("tag_close", &self.tag_close.is_some())
            .field("text", &self.text.is_some())
            .field("cdata", &self.cdata.is_some())
            .field("processing_instruction", &self.processing_instruction.is_some())
            .field("comment", &self.comment.is_some())
            .field("xml_declaration", &self.xml_declaration.is_some())
            .field("attributes", &attributes)
            .field("all_attributes", &self.all_attributes.is_some())
            .field("children", &self.children)
            .field("unknown_element", &self.unknown_element)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_node() {
        let node: DispatchNode<()> = DispatchNode::new();
        assert!(node.tag_open.is_none());
        assert!(!node.wants_attribute("id"));
        assert_eq!(node.child("a"), None);
        assert_eq!(node.unknown_element(), None);
    }

    #[test]
    fn test_setters_chain() {
        let mut node: DispatchNode<Vec<String>> = DispatchNode::new();
        node.on_tag_open(|_, _| Ok(()))
            .on_text(|_, _| Ok(()))
            .on_attribute("id", |_, _| Ok(()))
            .set_unknown_element(NodeId(0));

        assert!(node.tag_open.is_some());
        assert!(node.text.is_some());
        assert!(node.wants_attribute("id"));
        assert!(!node.wants_attribute("name"));
        assert_eq!(node.unknown_element(), Some(NodeId(0)));
    }

    #[test]
    fn test_wildcard_wants_every_attribute() {
        let mut node: DispatchNode<()> = DispatchNode::new();
        node.on_all_attributes(|_, _, _| Ok(()));
        assert!(node.wants_attribute("anything"));
    }
}
