// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::DomNode;

/// A box-drawing rendering of a tree, one node per line. Handy for
/// eyeballing what the parser produced.
pub trait ToTree {
    fn to_tree(&self) -> String;
}

impl ToTree for DomNode {
    fn to_tree(&self) -> String {
        let mut out = tree_line(self);
        out.push('\n');
        fmt_children(self, "", &mut out);
        out
    }
}

fn tree_line(node: &DomNode) -> String {
    match node {
        DomNode::Document(_) => String::new(),
        DomNode::Element(element) => {
            let mut line = element.tag().to_owned();
            for (name, value) in element.attributes() {
                line.push_str(&format!(" {name}=\"{value}\""));
            }
            line
        }
        DomNode::Text(text) => format!("\"{}\"", text.data()),
        DomNode::Comment(comment) => format!("<!--{}-->", comment.data()),
    }
}

fn fmt_children(node: &DomNode, prefix: &str, out: &mut String) {
    let children = node.children();
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();
        out.push_str(prefix);
        out.push_str(if is_last { "└>" } else { "├>" });
        out.push_str(&tree_line(child));
        out.push('\n');
        let child_prefix =
            format!("{prefix}{}", if is_last { "  " } else { "│ " });
        fmt_children(child, &child_prefix, out);
    }
}
