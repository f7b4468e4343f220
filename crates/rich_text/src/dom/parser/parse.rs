// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::dom_creation_error::HtmlParseError;
use crate::dom::nodes::DomNode;

/// Parse an HTML fragment into a [DomNode::Document] whose children are the
/// top-level nodes of the fragment.
pub fn parse(html: &str) -> Result<DomNode, HtmlParseError> {
    cfg_if::cfg_if! {
        if #[cfg(feature = "sys")] {
            sys::HtmlParser::default().parse(html)
        } else {
            let _ = html;
            Err(HtmlParseError::new(vec![String::from(
                "No HTML parser available: enable the `sys` feature",
            )]))
        }
    }
}

#[cfg(feature = "sys")]
mod sys {
    use std::fmt;

    use tracing::debug;

    use super::super::{PaDom, PaDomCreationError, PaDomCreator};
    use super::super::{PaDomHandle, PaDomNode};
    use super::super::{PaNodeContainer, PaNodeText};
    use super::*;
    use crate::dom::nodes::{ElementNode, TextNode};

    #[derive(Default)]
    pub(super) struct HtmlParser;

    impl HtmlParser {
        pub(super) fn parse(
            &mut self,
            html: &str,
        ) -> Result<DomNode, HtmlParseError> {
            let pa_dom = PaDomCreator::parse(html).map_err(|err| {
                self.padom_creation_error_to_html_parse_error(err)
            })?;

            self.padom_to_dom(pa_dom).map_err(|err| {
                debug!(error = %err, "Converting the parsed HTML failed");
                HtmlParseError::new(vec![err.to_string()])
            })
        }

        /// Convert a [PaDom] into an owned [DomNode] tree.
        ///
        /// Nodes that html5ever detached while parsing stay in the arena but
        /// are not reachable from the document, so they are skipped here.
        /// The `html` element html5ever wraps around a fragment is dropped and
        /// its children become the children of the returned document.
        fn padom_to_dom(&mut self, padom: PaDom) -> Result<DomNode, Error> {
            let PaDomNode::Document(padoc) = padom.get_document() else {
                return Err(Error::NoDocument);
            };
            let mut children = Vec::new();
            for child_handle in &padoc.children {
                match padom.get_node(child_handle) {
                    PaDomNode::Container(c) if c.tag() == "html" => {
                        self.convert(&padom, c, &mut children)?;
                    }
                    _ => {
                        self.convert_one(&padom, child_handle, &mut children)?
                    }
                }
            }
            Ok(DomNode::new_document(children))
        }

        /// Convert every child of `panode`, appending the results to `out`.
        fn convert(
            &mut self,
            padom: &PaDom,
            panode: &PaNodeContainer,
            out: &mut Vec<DomNode>,
        ) -> Result<(), Error> {
            for child_handle in &panode.children {
                self.convert_one(padom, child_handle, out)?;
            }
            Ok(())
        }

        fn convert_one(
            &mut self,
            padom: &PaDom,
            handle: &PaDomHandle,
            out: &mut Vec<DomNode>,
        ) -> Result<(), Error> {
            match padom.get_node(handle) {
                PaDomNode::Container(child) => {
                    out.push(self.convert_container(padom, child)?);
                }
                PaDomNode::Document(_) => return Err(Error::NestedDocument),
                PaDomNode::Text(PaNodeText { content }) => {
                    out.push(DomNode::Text(TextNode::new(content)));
                }
                PaDomNode::Comment(PaNodeText { content }) => {
                    out.push(DomNode::new_comment(content));
                }
            }
            Ok(())
        }

        fn convert_container(
            &mut self,
            padom: &PaDom,
            child: &PaNodeContainer,
        ) -> Result<DomNode, Error> {
            let mut element = ElementNode::new(child.tag());
            for (name, value) in &child.attrs {
                element.set_attribute(name, value);
            }
            let mut children = Vec::new();
            self.convert(padom, child, &mut children)?;
            Ok(DomNode::Element(element.with_children(children)))
        }

        fn padom_creation_error_to_html_parse_error(
            &mut self,
            e: PaDomCreationError,
        ) -> HtmlParseError {
            debug!(
                errors = e.parse_errors.len(),
                "html5ever reported errors while parsing"
            );
            HtmlParseError::new(e.parse_errors)
        }
    }

    enum Error {
        NoDocument,
        NestedDocument,
    }

    impl fmt::Display for Error {
        fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                Self::NoDocument => {
                    write!(formatter, "The parsed tree has no document node")
                }
                Self::NestedDocument => {
                    write!(formatter, "Found a document inside a document")
                }
            }
        }
    }

}
