// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::nodes::{DomNode, ElementNode};

/// HTML elements that never have content and are written without a closing
/// tag.
const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link",
    "meta", "source", "track", "wbr",
];

pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

pub trait ToHtml {
    fn fmt_html(&self, buf: &mut String);

    fn to_html(&self) -> String {
        let mut buf = String::new();
        self.fmt_html(&mut buf);
        buf
    }
}

impl ToHtml for DomNode {
    fn fmt_html(&self, buf: &mut String) {
        match self {
            DomNode::Document(doc) => {
                for child in doc.children() {
                    child.fmt_html(buf);
                }
            }
            DomNode::Element(element) => element.fmt_html(buf),
            DomNode::Text(text) => write_text(buf, text.data()),
            DomNode::Comment(comment) => {
                buf.push_str("<!--");
                buf.push_str(comment.data());
                buf.push_str("-->");
            }
        }
    }
}

impl ToHtml for ElementNode {
    fn fmt_html(&self, buf: &mut String) {
        write_start_tag(
            buf,
            self.tag(),
            self.attributes()
                .iter()
                .map(|(n, v)| (n.as_str(), v.as_str())),
        );
        if is_void_element(self.tag()) {
            return;
        }
        for child in self.children() {
            child.fmt_html(buf);
        }
        write_end_tag(buf, self.tag());
    }
}

pub(crate) fn write_start_tag<'a>(
    buf: &mut String,
    tag: &str,
    attributes: impl IntoIterator<Item = (&'a str, &'a str)>,
) {
    buf.push('<');
    buf.push_str(tag);
    for (name, value) in attributes {
        buf.push(' ');
        buf.push_str(name);
        buf.push_str("=\"");
        buf.push_str(&html_escape::encode_double_quoted_attribute(value));
        buf.push('"');
    }
    buf.push('>');
}

pub(crate) fn write_end_tag(buf: &mut String, tag: &str) {
    buf.push_str("</");
    buf.push_str(tag);
    buf.push('>');
}

pub(crate) fn write_text(buf: &mut String, text: &str) {
    buf.push_str(&html_escape::encode_text(text));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn void_elements_have_no_closing_tag() {
        let img = ElementNode::new("img").with_attribute("src", "");
        assert_eq!(img.to_html(), r#"<img src="">"#);
        assert_eq!(DomNode::new_line_break().to_html(), "<br>");
    }

    #[test]
    fn empty_non_void_elements_are_closed() {
        assert_eq!(ElementNode::new("span").to_html(), "<span></span>");
    }

    #[test]
    fn text_and_attributes_are_escaped() {
        let a = ElementNode::new("a")
            .with_attribute("title", r#"say "hi""#)
            .with_text("1 < 2 & 3");
        assert_eq!(
            a.to_html(),
            r#"<a title="say &quot;hi&quot;">1 &lt; 2 &amp; 3</a>"#
        );
    }

    #[test]
    fn adjacent_text_nodes_render_as_one_run() {
        let p = ElementNode::new("p").with_children([
            DomNode::new_text("one "),
            DomNode::new_text("two"),
        ]);
        assert_eq!(p.to_html(), "<p>one two</p>");
    }
}
