// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The markup element tree consumed by the extractor.
//!
//! Parents own their children, so a tree can be built with plain
//! constructors, cloned and compared. Nodes are addressed from a root with
//! a [DomHandle].

use strum_macros::{AsRefStr, Display, EnumString, FromRepr};

use crate::dom::DomHandle;
use crate::RichTextError;

/// The node-type discriminator of a [DomNode]. The numeric values are the
/// ones a browser DOM reports through `Node.nodeType`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, AsRefStr, Display, EnumString, FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
}

impl NodeType {
    /// Map a browser `nodeType` constant onto a [NodeType]. Attribute, CDATA
    /// and the other kinds have no place in an element tree.
    pub fn from_dom_constant(value: u16) -> Result<Self, RichTextError> {
        Self::from_repr(value).ok_or_else(|| {
            RichTextError::MalformedInput(format!(
                "Unrecognised node type `{value}`"
            ))
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomNode {
    Document(DocumentNode),
    Element(ElementNode),
    Text(TextNode),
    Comment(TextNode),
}

impl DomNode {
    pub fn new_document(children: Vec<DomNode>) -> Self {
        Self::Document(DocumentNode { children })
    }

    pub fn new_text(data: &str) -> Self {
        Self::Text(TextNode::new(data))
    }

    pub fn new_comment(data: &str) -> Self {
        Self::Comment(TextNode::new(data))
    }

    pub fn new_line_break() -> Self {
        Self::Element(ElementNode::new("br"))
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Document(_) => NodeType::Document,
            Self::Element(_) => NodeType::Element,
            Self::Text(_) => NodeType::Text,
            Self::Comment(_) => NodeType::Comment,
        }
    }

    pub fn children(&self) -> &[DomNode] {
        match self {
            Self::Document(d) => &d.children,
            Self::Element(e) => &e.children,
            Self::Text(_) | Self::Comment(_) => &[],
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextNode> {
        match self {
            Self::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element(_))
    }

    /// The first element child of this node, skipping text and comments.
    pub fn first_element(&self) -> Option<&DomNode> {
        self.children().iter().find(|c| c.is_element())
    }

    /// Find the node that `handle` points at, treating `self` as the root.
    pub fn lookup_node(&self, handle: &DomHandle) -> Option<&DomNode> {
        let mut node = self;
        for &index in handle.raw() {
            node = node.children().get(index)?;
        }
        Some(node)
    }

    /// The concatenated text of every text node below this one.
    pub fn text_content(&self) -> String {
        match self {
            Self::Text(t) => t.data.clone(),
            Self::Comment(_) => String::new(),
            _ => self.children().iter().map(|c| c.text_content()).collect(),
        }
    }
}

impl From<ElementNode> for DomNode {
    fn from(element: ElementNode) -> Self {
        Self::Element(element)
    }
}

impl From<TextNode> for DomNode {
    fn from(text: TextNode) -> Self {
        Self::Text(text)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentNode {
    pub(crate) children: Vec<DomNode>,
}

impl DocumentNode {
    pub fn children(&self) -> &[DomNode] {
        &self.children
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ElementNode {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<DomNode>,
}

impl ElementNode {
    /// Create an empty element. Tag names are case-normalised to lower case.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_children(
        mut self,
        children: impl IntoIterator<Item = DomNode>,
    ) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.with_children([DomNode::new_text(text)])
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in declaration order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _v)| n == name)
            .map(|(_n, v)| v.as_str())
    }

    /// Set an attribute, replacing any previous value but keeping its
    /// position.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_owned(),
            None => self.attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    pub fn children(&self) -> &[DomNode] {
        &self.children
    }

    pub fn is_line_break(&self) -> bool {
        self.tag == "br"
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextNode {
    data: String,
}

impl TextNode {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.to_owned(),
        }
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    fn sample() -> DomNode {
        DomNode::new_document(vec![ElementNode::new("P")
            .with_text("one ")
            .with_children([ElementNode::new("em").with_text("two").into()])
            .into()])
    }

    #[test]
    fn tag_names_are_lower_cased() {
        assert_eq!(ElementNode::new("STRONG").tag(), "strong");
    }

    #[test]
    fn lookup_follows_child_indices() {
        let doc = sample();
        let em = doc.lookup_node(&DomHandle::from_raw(vec![0, 1])).unwrap();
        assert_eq!(em.as_element().unwrap().tag(), "em");
        let text = doc.lookup_node(&DomHandle::from_raw(vec![0, 1, 0]));
        assert_eq!(text.unwrap().as_text().unwrap().data(), "two");
        assert!(doc.lookup_node(&DomHandle::from_raw(vec![0, 5])).is_none());
    }

    #[test]
    fn text_content_concatenates_descendants() {
        assert_eq!(sample().text_content(), "one two");
    }

    #[test]
    fn set_attribute_replaces_in_place() {
        let mut el = ElementNode::new("a")
            .with_attribute("href", "#")
            .with_attribute("title", "t");
        el.set_attribute("href", "/x");
        assert_eq!(
            el.attributes(),
            &[
                ("href".to_owned(), "/x".to_owned()),
                ("title".to_owned(), "t".to_owned())
            ]
        );
    }

    #[test]
    fn node_types_come_from_dom_constants() {
        assert_eq!(NodeType::from_dom_constant(1), Ok(NodeType::Element));
        assert_eq!(NodeType::from_dom_constant(3), Ok(NodeType::Text));
        assert!(matches!(
            NodeType::from_dom_constant(2),
            Err(RichTextError::MalformedInput(_))
        ));
        assert_eq!(NodeType::from_str("comment"), Ok(NodeType::Comment));
        assert_eq!(NodeType::Document.to_string(), "document");
    }

    #[test]
    fn every_node_reports_its_type() {
        let doc = sample();
        assert_eq!(doc.node_type(), NodeType::Document);
        assert_eq!(doc.children()[0].node_type(), NodeType::Element);
        let text = doc.lookup_node(&DomHandle::from_raw(vec![0, 0]));
        assert_eq!(text.map(DomNode::node_type), Some(NodeType::Text));
        assert_eq!(DomNode::new_comment("c").node_type(), NodeType::Comment);
        assert_eq!(DomNode::new_comment("c").text_content(), "");
    }
}
