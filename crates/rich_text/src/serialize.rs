// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Turning a [RichTextValue] back into markup.
//!
//! The tree is built from the last position to the first. At each position
//! the required chain of formats is compared against the leftmost open
//! chain below the root: every element that matches is reused and the rest
//! are created as new leftmost children. Consecutive positions that share a
//! prefix of formats therefore share the elements for it.

use std::collections::VecDeque;

use tracing::trace;

use crate::dom::{DomNode, ElementNode, TextNode, ToHtml};
use crate::extract::Extracted;
use crate::format::Format;
use crate::rich_text_value::{MultilineValue, RichTextValue};

/// Markup for one value.
pub fn serialize(value: &RichTextValue) -> String {
    to_dom(value).to_html()
}

/// Markup for every line, each wrapped in a `multiline_tag` element.
pub fn serialize_multiline(
    value: &MultilineValue,
    multiline_tag: &str,
) -> String {
    let mut buf = String::new();
    for line in value.lines() {
        ElementNode::new(multiline_tag)
            .with_children(to_dom(line).children().iter().cloned())
            .fmt_html(&mut buf);
    }
    buf
}

/// The element tree a value stands for, as the children of a document.
pub fn to_dom(value: &RichTextValue) -> DomNode {
    let mut builder = TreeBuilder::new();
    let chars = value.chars();

    for index in (0..=chars.len()).rev() {
        let formats: &[Format] =
            value.formats_at(index).map(Vec::as_slice).unwrap_or_default();
        if let Some(&c) = chars.get(index) {
            let containers: Vec<Format> =
                formats.iter().filter(|f| !f.is_object()).cloned().collect();
            let parent = builder.open_chain(&containers);
            builder.prepend_char(parent, c);
        }
        builder.prepend_objects(formats);
    }

    trace!(
        reused = builder.reused,
        created = builder.created,
        "Serialized rich text value"
    );
    builder.into_dom()
}

impl ToHtml for RichTextValue {
    fn fmt_html(&self, buf: &mut String) {
        to_dom(self).fmt_html(buf);
    }
}

impl Extracted {
    /// Markup for the extracted content. `multiline_tag` wraps each line of
    /// a multiline value and is ignored for a single one.
    pub fn to_html(&self, multiline_tag: &str) -> String {
        match self {
            Self::Single(value) => serialize(value),
            Self::Multiline(value) => serialize_multiline(value, multiline_tag),
        }
    }
}

const ROOT: usize = 0;

#[derive(Debug)]
enum NodeKind {
    Root,
    Element(Format),
    Void(Format),
    /// Characters are pushed as they arrive, so they are stored reversed.
    Text(Vec<char>),
    LineBreak,
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    children: VecDeque<usize>,
}

/// Arena of output nodes. Children are only ever added at the front.
struct TreeBuilder {
    nodes: Vec<Node>,
    reused: usize,
    created: usize,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            nodes: vec![Node {
                kind: NodeKind::Root,
                children: VecDeque::new(),
            }],
            reused: 0,
            created: 0,
        }
    }

    fn prepend(&mut self, parent: usize, kind: NodeKind) -> usize {
        self.nodes.push(Node {
            kind,
            children: VecDeque::new(),
        });
        let handle = self.nodes.len() - 1;
        self.nodes[parent].children.push_front(handle);
        handle
    }

    /// Walk down the leftmost children of the root while they match
    /// `chain`, then create whatever is missing. Returns the innermost
    /// element.
    fn open_chain(&mut self, chain: &[Format]) -> usize {
        let mut parent = ROOT;
        let mut formats = chain.iter();

        for format in formats.by_ref() {
            let reusable = self.nodes[parent].children.front().copied().filter(
                |&first| {
                    matches!(
                        &self.nodes[first].kind,
                        NodeKind::Element(open) if open.same_tag(format)
                    )
                },
            );
            match reusable {
                Some(first) => {
                    self.reused += 1;
                    parent = first;
                }
                None => {
                    parent = self.create(parent, format);
                    break;
                }
            }
        }
        for format in formats {
            parent = self.create(parent, format);
        }
        parent
    }

    fn create(&mut self, parent: usize, format: &Format) -> usize {
        self.created += 1;
        self.prepend(parent, NodeKind::Element(format.clone()))
    }

    fn prepend_char(&mut self, parent: usize, c: char) {
        if c == '\n' {
            self.prepend(parent, NodeKind::LineBreak);
            return;
        }
        if let Some(&first) = self.nodes[parent].children.front() {
            if let NodeKind::Text(reversed) = &mut self.nodes[first].kind {
                reversed.push(c);
                return;
            }
        }
        self.prepend(parent, NodeKind::Text(vec![c]));
    }

    /// Place the void formats of one position. Adjacent void formats are
    /// stored most recent first, so placing each run in list order leaves
    /// them in document order. The non-void formats before a void one are
    /// the elements that contain it.
    fn prepend_objects(&mut self, formats: &[Format]) {
        let mut runs: Vec<Vec<usize>> = Vec::new();
        let mut in_run = false;
        for (i, format) in formats.iter().enumerate() {
            match (format.is_object(), in_run) {
                (true, true) => {
                    if let Some(run) = runs.last_mut() {
                        run.push(i);
                    }
                }
                (true, false) => runs.push(vec![i]),
                (false, _) => {}
            }
            in_run = format.is_object();
        }

        for run in runs.iter().rev() {
            for &i in run {
                let containers: Vec<Format> = formats[..i]
                    .iter()
                    .filter(|f| !f.is_object())
                    .cloned()
                    .collect();
                let parent = self.open_chain(&containers);
                self.prepend(parent, NodeKind::Void(formats[i].clone()));
            }
        }
    }

    fn into_dom(self) -> DomNode {
        let children = self.convert_children(ROOT);
        DomNode::new_document(children)
    }

    fn convert_children(&self, handle: usize) -> Vec<DomNode> {
        self.nodes[handle]
            .children
            .iter()
            .map(|&child| self.convert(child))
            .collect()
    }

    fn convert(&self, handle: usize) -> DomNode {
        match &self.nodes[handle].kind {
            NodeKind::Root => {
                DomNode::new_document(self.convert_children(handle))
            }
            NodeKind::Element(format) | NodeKind::Void(format) => {
                element_for(format)
                    .with_children(self.convert_children(handle))
                    .into()
            }
            NodeKind::Text(reversed) => {
                let text: String = reversed.iter().rev().collect();
                DomNode::Text(TextNode::new(&text))
            }
            NodeKind::LineBreak => DomNode::new_line_break(),
        }
    }
}

fn element_for(format: &Format) -> ElementNode {
    let mut element = ElementNode::new(format.format_type());
    for (name, value) in format.attributes().into_iter().flatten() {
        element.set_attribute(name, value);
    }
    element
}

#[cfg(test)]
mod test {
    use indoc::indoc;

    use super::*;
    use crate::dom::ToTree;
    use crate::format::FormatList;

    fn fl(formats: &[Format]) -> Option<FormatList> {
        Some(formats.to_vec())
    }

    fn value(text: &str, formats: Vec<Option<FormatList>>) -> RichTextValue {
        RichTextValue::from_parts(text, formats).unwrap()
    }

    fn img(src: &str) -> Format {
        Format::object("img").with_attribute("src", src)
    }

    #[test]
    fn serialize_plain_text() {
        assert_eq!(serialize(&RichTextValue::from_text("abc")), "abc");
        assert_eq!(serialize(&RichTextValue::new()), "");
    }

    #[test]
    fn serialize_single_format_run() {
        let em = fl(&[Format::new("em")]);
        let mut formats = vec![None; 13];
        formats[4..7].fill(em);
        assert_eq!(
            serialize(&value("one two three", formats)),
            "one <em>two</em> three"
        );
    }

    #[test]
    fn serialize_reuses_shared_prefix() {
        let v = value(
            "ab",
            vec![
                fl(&[Format::new("strong"), Format::new("em")]),
                fl(&[Format::new("strong")]),
            ],
        );
        assert_eq!(serialize(&v), "<strong><em>a</em>b</strong>");
    }

    #[test]
    fn serialize_does_not_merge_different_attributes() {
        let a = |href: &str| Format::new("a").with_attribute("href", href);
        let v = value("xy", vec![fl(&[a("1")]), fl(&[a("2")])]);
        assert_eq!(serialize(&v), r#"<a href="1">x</a><a href="2">y</a>"#);
    }

    #[test]
    fn serialize_newline_as_line_break() {
        let strong = fl(&[Format::new("strong")]);
        let v = value("a\nb", vec![strong.clone(), strong.clone(), strong]);
        assert_eq!(serialize(&v), "<strong>a<br>b</strong>");
        assert_eq!(serialize(&RichTextValue::from_text("\n")), "<br>");
    }

    #[test]
    fn serialize_lone_image() {
        let v = RichTextValue::new().with_end_formats(fl(&[img("")]));
        assert_eq!(serialize(&v), r#"<img src="">"#);
    }

    #[test]
    fn serialize_adjacent_images_in_document_order() {
        let v = RichTextValue::from_text("a")
            .with_end_formats(fl(&[img("2"), img("1")]));
        assert_eq!(serialize(&v), r#"a<img src="1"><img src="2">"#);
    }

    #[test]
    fn serialize_image_before_character() {
        let v = value("x", vec![fl(&[img("1")])]);
        assert_eq!(serialize(&v), r#"<img src="1">x"#);
    }

    #[test]
    fn serialize_image_inside_container() {
        let a = Format::new("a").with_attribute("href", "#");
        let v = value("x", vec![fl(&[a.clone()])])
            .with_end_formats(fl(&[a, img("1")]));
        assert_eq!(serialize(&v), r##"<a href="#">x<img src="1"></a>"##);
    }

    #[test]
    fn serialize_images_split_by_a_container() {
        let a = Format::new("a");
        let v = value("x", vec![fl(&[img("1"), a, img("2")])]);
        assert_eq!(serialize(&v), r#"<img src="1"><a><img src="2">x</a>"#);
    }

    #[test]
    fn serialize_unknown_objects_with_closing_tag() {
        let v = value("ab", vec![None, fl(&[Format::object("span")])]);
        assert_eq!(serialize(&v), "a<span></span>b");
    }

    #[test]
    fn serialize_escapes_text_and_attributes() {
        let title = Format::new("abbr").with_attribute("title", r#"a "b""#);
        let v = value("<&>", vec![fl(&[title]), None, None]);
        assert_eq!(
            serialize(&v),
            r#"<abbr title="a &quot;b&quot;">&lt;</abbr>&amp;&gt;"#
        );
    }

    #[test]
    fn serialize_multiline_wraps_each_line() {
        let lines = MultilineValue::new(vec![
            value("one", vec![None, fl(&[Format::new("b")]), None]),
            RichTextValue::new(),
        ]);
        assert_eq!(
            serialize_multiline(&lines, "li"),
            "<li>o<b>n</b>e</li><li></li>"
        );
        assert_eq!(
            Extracted::Multiline(lines).to_html("li"),
            "<li>o<b>n</b>e</li><li></li>"
        );
    }

    #[test]
    fn rich_text_value_renders_through_to_html() {
        let v = value("ab", vec![fl(&[Format::new("em")]), None]);
        assert_eq!(v.to_html(), "<em>a</em>b");
        assert_eq!(Extracted::Single(v).to_html("p"), "<em>a</em>b");
    }

    #[test]
    fn to_dom_builds_minimal_nesting() {
        let strong = Format::new("strong");
        let em = Format::new("em");
        let v = value(
            "abcd",
            vec![
                fl(&[strong.clone()]),
                fl(&[strong.clone(), em.clone()]),
                fl(&[strong, em]),
                None,
            ],
        );
        assert_eq!(
            to_dom(&v).to_tree(),
            indoc! {r#"

            ├>strong
            │ ├>"a"
            │ └>em
            │   └>"bc"
            └>"d"
            "#}
        );
    }
}
