// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::tree_builder::ElementFlags;
use html5ever::{Attribute, LocalName, Namespace, QualName};

use super::{PaNodeContainer, PaNodeText};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

pub(crate) fn paqual_name(local: &str) -> QualName {
    QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from(local),
    )
}

/// Index of a node inside a [PaDom].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PaDomHandle(pub(crate) usize);

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum PaDomNode {
    Container(PaNodeContainer),
    Document(PaNodeContainer),
    Text(PaNodeText),
    Comment(PaNodeText),
}

impl PaDomNode {
    pub(crate) fn name(&self) -> &QualName {
        match self {
            Self::Container(c) | Self::Document(c) => &c.name,
            Self::Text(_) | Self::Comment(_) => {
                panic!("Asked for the name of a text or comment node")
            }
        }
    }

    pub(crate) fn children(&self) -> Option<&Vec<PaDomHandle>> {
        match self {
            Self::Container(c) | Self::Document(c) => Some(&c.children),
            Self::Text(_) | Self::Comment(_) => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<PaDomHandle>> {
        match self {
            Self::Container(c) | Self::Document(c) => Some(&mut c.children),
            Self::Text(_) | Self::Comment(_) => None,
        }
    }
}

/// Arena of nodes built while html5ever parses. Nodes that get detached
/// during parsing stay in the arena but are unreachable from the document.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaDom {
    pub(crate) nodes: Vec<PaDomNode>,
    pub(crate) document_handle: PaDomHandle,
}

impl PaDom {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![PaDomNode::Document(PaNodeContainer {
                name: paqual_name(""),
                attrs: Vec::new(),
                children: Vec::new(),
            })],
            document_handle: PaDomHandle(0),
        }
    }

    pub(crate) fn document_handle(&self) -> &PaDomHandle {
        &self.document_handle
    }

    pub(crate) fn get_document(&self) -> &PaDomNode {
        self.get_node(&self.document_handle)
    }

    pub(crate) fn get_node(&self, handle: &PaDomHandle) -> &PaDomNode {
        &self.nodes[handle.0]
    }

    pub(crate) fn get_mut_node(
        &mut self,
        handle: &PaDomHandle,
    ) -> &mut PaDomNode {
        &mut self.nodes[handle.0]
    }

    pub(crate) fn add_node(&mut self, node: PaDomNode) -> PaDomHandle {
        self.nodes.push(node);
        PaDomHandle(self.nodes.len() - 1)
    }

    pub(crate) fn create_element(
        &mut self,
        name: QualName,
        attrs: Vec<Attribute>,
        _flags: ElementFlags,
    ) -> PaDomHandle {
        self.add_node(PaDomNode::Container(PaNodeContainer {
            name,
            attrs: attrs
                .iter()
                .map(|attr| {
                    (
                        attr.name.local.as_ref().to_owned(),
                        attr.value.as_ref().to_owned(),
                    )
                })
                .collect(),
            children: Vec::new(),
        }))
    }

    /// The node that currently lists `child` among its children.
    pub(crate) fn parent_of(
        &self,
        child: &PaDomHandle,
    ) -> Option<PaDomHandle> {
        self.nodes
            .iter()
            .position(|node| {
                node.children()
                    .map(|children| children.contains(child))
                    .unwrap_or(false)
            })
            .map(PaDomHandle)
    }

    /// Detach `child` from its parent, returning the parent and the index it
    /// occupied.
    pub(crate) fn detach(
        &mut self,
        child: &PaDomHandle,
    ) -> Option<(PaDomHandle, usize)> {
        let parent = self.parent_of(child)?;
        let children = self.get_mut_node(&parent).children_mut()?;
        let index = children.iter().position(|h| h == child)?;
        children.remove(index);
        Some((parent, index))
    }
}

#[derive(Clone, Debug)]
pub(crate) struct PaDomCreationError {
    pub(crate) dom: PaDom,
    pub(crate) parse_errors: Vec<String>,
}

impl PaDomCreationError {
    pub(crate) fn new() -> Self {
        Self {
            dom: PaDom::new(),
            parse_errors: Vec::new(),
        }
    }
}
