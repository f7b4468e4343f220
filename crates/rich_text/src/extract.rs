// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Flattening an element tree into a [RichTextValue].
//!
//! The tree is walked depth first. Every call returns the value its subtree
//! produced, and the parent appends it to its own, shifting offsets and
//! putting its own [Format] in front of every position the child covered.
//! Selection anchors are resolved during the same walk so the captured
//! offsets always agree with the emitted text.

use tracing::{debug, trace};

use crate::dom::{DomHandle, DomNode, ElementNode, TextNode};
use crate::extraction_settings::ExtractionSettings;
use crate::format::{join_at_seam, Format, FormatList};
use crate::rich_text_value::{MultilineValue, RichTextValue};
use crate::selection::{
    Anchor, LinePosition, MultilineSelection, MultilineWithSelection,
    Selection, SelectionRange, ValueWithSelection,
};
use crate::RichTextError;

/// The result of [extract]: one value, or one value per boundary element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Extracted {
    Single(RichTextValue),
    Multiline(MultilineValue),
}

impl Extracted {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(value) => value.is_empty(),
            Self::Multiline(value) => value.is_empty(),
        }
    }
}

/// The result of [extract_with_selection].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractedWithSelection {
    Single(ValueWithSelection),
    Multiline(MultilineWithSelection),
}

/// Extract the children of `root`. With a `multiline_tag`, only direct
/// children of `root` with that tag are extracted, each into its own line.
pub fn extract(
    root: &DomNode,
    multiline_tag: Option<&str>,
    settings: &ExtractionSettings,
) -> Result<Extracted, RichTextError> {
    match multiline_tag {
        Some(tag) => {
            extract_multiline(root, tag, settings).map(Extracted::Multiline)
        }
        None => extract_value(root, settings).map(Extracted::Single),
    }
}

pub fn extract_value(
    root: &DomNode,
    settings: &ExtractionSettings,
) -> Result<RichTextValue, RichTextError> {
    let extractor = Extractor::new(settings, None);
    Ok(extractor.extract_root(root)?.into_value().0)
}

pub fn extract_multiline(
    root: &DomNode,
    multiline_tag: &str,
    settings: &ExtractionSettings,
) -> Result<MultilineValue, RichTextError> {
    let extractor = Extractor::new(settings, None);
    Ok(extractor.extract_lines(root, multiline_tag)?.0)
}

/// Like [extract], also turning `range` into offsets in the result.
pub fn extract_with_selection(
    root: &DomNode,
    range: &SelectionRange,
    multiline_tag: Option<&str>,
    settings: &ExtractionSettings,
) -> Result<ExtractedWithSelection, RichTextError> {
    match multiline_tag {
        Some(tag) => {
            extract_multiline_with_selection(root, range, tag, settings)
                .map(ExtractedWithSelection::Multiline)
        }
        None => extract_value_with_selection(root, range, settings)
            .map(ExtractedWithSelection::Single),
    }
}

pub fn extract_value_with_selection(
    root: &DomNode,
    range: &SelectionRange,
    settings: &ExtractionSettings,
) -> Result<ValueWithSelection, RichTextError> {
    let extractor = Extractor::new(settings, Some(range));
    extractor.validate_anchors(root)?;
    let (value, selection) = extractor.extract_root(root)?.into_value();
    Ok(ValueWithSelection::new(value, selection))
}

pub fn extract_multiline_with_selection(
    root: &DomNode,
    range: &SelectionRange,
    multiline_tag: &str,
    settings: &ExtractionSettings,
) -> Result<MultilineWithSelection, RichTextError> {
    let extractor = Extractor::new(settings, Some(range));
    extractor.validate_anchors(root)?;
    let (value, selection) = extractor.extract_lines(root, multiline_tag)?;
    Ok(MultilineWithSelection { value, selection })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Endpoint {
    Start,
    End,
}

/// Text and formats collected from one subtree. `formats` has one more
/// entry than `text`: the last one holds void formats waiting at the cursor
/// for the next character.
#[derive(Debug)]
struct Accumulator {
    text: Vec<char>,
    formats: Vec<Option<FormatList>>,
    start: Option<usize>,
    end: Option<usize>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            text: Vec::new(),
            formats: vec![None],
            start: None,
            end: None,
        }
    }

    fn len(&self) -> usize {
        self.text.len()
    }

    fn set(&mut self, endpoint: Endpoint, position: usize) {
        match endpoint {
            Endpoint::Start => self.start = Some(position),
            Endpoint::End => self.end = Some(position),
        }
    }

    fn push_chars(&mut self, chars: impl IntoIterator<Item = char>) {
        for c in chars {
            self.text.push(c);
            self.formats.push(None);
        }
    }

    /// Append what a child element produced, wrapping it in `format`.
    fn append(&mut self, child: Accumulator, format: Option<Format>) {
        let offset = self.len();
        let Accumulator {
            text,
            mut formats,
            start,
            end,
        } = child;
        if let Some(start) = start {
            self.start = Some(offset + start);
        }
        if let Some(end) = end {
            self.end = Some(offset + end);
        }

        match format {
            Some(format) if text.is_empty() => {
                // An element with no text is a void element sitting at the
                // cursor. Anything it contained is dropped.
                let pending = self.pending_mut().get_or_insert_with(Vec::new);
                pending.insert(0, format.into_object());
            }
            format => {
                if let Some(format) = format {
                    let last = formats.len() - 1;
                    for (i, slot) in formats.iter_mut().enumerate() {
                        if i < last || slot.is_some() {
                            slot.get_or_insert_with(Vec::new)
                                .insert(0, format.clone());
                        }
                    }
                }
                if let Some(pending) = self.formats.pop().flatten() {
                    let first = formats[0].take().unwrap_or_default();
                    formats[0] = Some(join_at_seam(pending, first));
                }
                self.formats.extend(formats);
                self.text.extend(text);
            }
        }
    }

    fn pending_mut(&mut self) -> &mut Option<FormatList> {
        let last = self.formats.len() - 1;
        &mut self.formats[last]
    }

    fn into_value(self) -> (RichTextValue, Selection) {
        let mut formats = self.formats;
        let end_formats = formats.pop().flatten();
        (
            RichTextValue::from_raw(self.text, formats, end_formats),
            Selection {
                start: self.start,
                end: self.end,
            },
        )
    }
}

struct Extractor<'a> {
    settings: &'a ExtractionSettings,
    range: Option<&'a SelectionRange>,
}

impl<'a> Extractor<'a> {
    fn new(
        settings: &'a ExtractionSettings,
        range: Option<&'a SelectionRange>,
    ) -> Self {
        Self { settings, range }
    }

    fn anchors(&self) -> impl Iterator<Item = (Endpoint, &'a Anchor)> {
        self.range.into_iter().flat_map(|range| {
            [(Endpoint::Start, &range.start), (Endpoint::End, &range.end)]
        })
    }

    /// Fail if an anchor points at a node that does not exist, or past the
    /// end of the node it points at.
    fn validate_anchors(&self, root: &DomNode) -> Result<(), RichTextError> {
        for (endpoint, anchor) in self.anchors() {
            let node = root.lookup_node(&anchor.handle).ok_or_else(|| {
                RichTextError::InvalidSelection(format!(
                    "{endpoint:?} anchor {:?} does not exist",
                    anchor.handle.raw()
                ))
            })?;
            let limit = match node {
                DomNode::Text(t) | DomNode::Comment(t) => {
                    t.data().chars().count()
                }
                _ => node.children().len(),
            };
            if anchor.offset > limit {
                return Err(RichTextError::InvalidSelection(format!(
                    "{endpoint:?} anchor offset {} is past the end of {:?} \
                     ({limit})",
                    anchor.offset,
                    anchor.handle.raw()
                )));
            }
        }
        Ok(())
    }

    fn extract_root(
        &self,
        root: &DomNode,
    ) -> Result<Accumulator, RichTextError> {
        let handle = DomHandle::root();
        match root {
            DomNode::Document(_) | DomNode::Element(_) => {
                self.extract_children(root.children(), &handle)
            }
            DomNode::Text(text) => {
                let mut acc = Accumulator::new();
                self.extract_text(&mut acc, text, &handle);
                Ok(acc)
            }
            DomNode::Comment(_) => Ok(Accumulator::new()),
        }
    }

    fn extract_lines(
        &self,
        root: &DomNode,
        multiline_tag: &str,
    ) -> Result<(MultilineValue, MultilineSelection), RichTextError> {
        let tag = multiline_tag.to_ascii_lowercase();
        let root_handle = DomHandle::root();
        let mut lines = Vec::new();
        let mut child_indices = Vec::new();
        let mut selection = MultilineSelection::default();

        for (i, child) in root.children().iter().enumerate() {
            let Some(element) = child.as_element() else {
                continue;
            };
            if element.tag() != tag {
                continue;
            }
            let handle = root_handle.child_handle(i);
            let acc = self.extract_children(element.children(), &handle)?;
            let (value, local) = acc.into_value();
            let line = lines.len();
            if let Some(offset) = local.start {
                selection.start = Some(LinePosition::new(line, offset));
            }
            if let Some(offset) = local.end {
                selection.end = Some(LinePosition::new(line, offset));
            }
            child_indices.push(i);
            lines.push(value);
        }

        for (endpoint, anchor) in self.anchors() {
            if !anchor.handle.is_root() {
                continue;
            }
            // Between boundary elements: the start of the next line, or the
            // end of the last one.
            let position = match child_indices
                .iter()
                .position(|&i| i >= anchor.offset)
            {
                Some(line) => Some(LinePosition::new(line, 0)),
                None => lines.last().map(|last: &RichTextValue| {
                    LinePosition::new(lines.len() - 1, last.len())
                }),
            };
            match endpoint {
                Endpoint::Start => selection.start = position,
                Endpoint::End => selection.end = position,
            }
        }

        if self.range.is_some() {
            if selection.start.is_none() {
                debug!("Selection start is outside every line");
            }
            if selection.end.is_none() {
                debug!("Selection end is outside every line");
            }
        }
        trace!(lines = lines.len(), tag = %tag, "Extracted lines");
        Ok((MultilineValue::new(lines), selection))
    }

    fn capture_child_index(
        &self,
        acc: &mut Accumulator,
        handle: &DomHandle,
        index: usize,
    ) {
        let position = acc.len();
        for (endpoint, anchor) in self.anchors() {
            if anchor.handle == *handle && anchor.offset == index {
                acc.set(endpoint, position);
            }
        }
    }

    fn extract_children(
        &self,
        children: &[DomNode],
        handle: &DomHandle,
    ) -> Result<Accumulator, RichTextError> {
        let mut acc = Accumulator::new();
        for (i, child) in children.iter().enumerate() {
            self.capture_child_index(&mut acc, handle, i);
            let child_handle = handle.child_handle(i);
            match child {
                DomNode::Text(text) => {
                    self.extract_text(&mut acc, text, &child_handle)
                }
                DomNode::Element(element) => {
                    self.extract_element(&mut acc, element, &child_handle)?
                }
                DomNode::Comment(_) => {}
                DomNode::Document(_) => {
                    return Err(RichTextError::MalformedInput(format!(
                        "Found a document node at {:?}",
                        child_handle.raw()
                    )));
                }
            }
        }
        self.capture_child_index(&mut acc, handle, children.len());
        Ok(acc)
    }

    fn extract_text(
        &self,
        acc: &mut Accumulator,
        text: &TextNode,
        handle: &DomHandle,
    ) {
        let offset = acc.len();
        for (endpoint, anchor) in self.anchors() {
            if anchor.handle == *handle {
                let before: String =
                    text.data().chars().take(anchor.offset).collect();
                let mapped = (self.settings.filter_string)(&before);
                acc.set(endpoint, offset + mapped.chars().count());
            }
        }
        acc.push_chars((self.settings.filter_string)(text.data()).chars());
    }

    fn extract_element(
        &self,
        acc: &mut Accumulator,
        element: &ElementNode,
        handle: &DomHandle,
    ) -> Result<(), RichTextError> {
        if (self.settings.remove_node_match)(element) {
            trace!(tag = element.tag(), "Removing node");
            self.log_dropped_anchors(handle);
            return Ok(());
        }

        let child = self.extract_children(element.children(), handle)?;

        if (self.settings.unwrap_node_match)(element) {
            trace!(tag = element.tag(), "Unwrapping node");
            acc.append(child, None);
        } else if element.is_line_break() {
            acc.append(child, None);
            acc.push_chars(['\n']);
        } else {
            let format = Format::from_element(element, |name| {
                !(self.settings.remove_attribute_match)(name)
            });
            acc.append(child, Some(format));
        }
        Ok(())
    }

    fn log_dropped_anchors(&self, removed: &DomHandle) {
        for (endpoint, anchor) in self.anchors() {
            let handle = &anchor.handle;
            if handle == removed || removed.is_ancestor_of(handle) {
                debug!(?endpoint, "Selection anchor is inside a removed node");
            }
        }
    }
}
