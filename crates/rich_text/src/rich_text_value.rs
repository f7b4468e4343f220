// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! The flat styled-text model.
//!
//! A [RichTextValue] is a run of characters with one optional [FormatList]
//! per character. A `\n` character stands for a line-break element. Void
//! elements that trail the last character (or are the only content) sit in
//! an extra end slot, so `formats_at(len)` is always a valid lookup.

use crate::format::FormatList;
use crate::RichTextError;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RichTextValue {
    text: Vec<char>,
    formats: Vec<Option<FormatList>>,
    end_formats: Option<FormatList>,
}

impl RichTextValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unstyled text.
    pub fn from_text(text: &str) -> Self {
        let text: Vec<char> = text.chars().collect();
        let formats = vec![None; text.len()];
        Self::from_raw(text, formats, None)
    }

    /// Build a value from text and one format entry per character.
    pub fn from_parts(
        text: &str,
        formats: Vec<Option<FormatList>>,
    ) -> Result<Self, RichTextError> {
        let text: Vec<char> = text.chars().collect();
        if text.len() != formats.len() {
            return Err(RichTextError::MalformedInput(format!(
                "{} formats supplied for {} characters",
                formats.len(),
                text.len()
            )));
        }
        Ok(Self::from_raw(text, formats, None))
    }

    /// Replace the formats that sit after the last character.
    pub fn with_end_formats(mut self, end_formats: Option<FormatList>) -> Self {
        self.end_formats = normalise(end_formats);
        self
    }

    /// Callers guarantee `text.len() == formats.len()`.
    pub(crate) fn from_raw(
        text: Vec<char>,
        formats: Vec<Option<FormatList>>,
        end_formats: Option<FormatList>,
    ) -> Self {
        let ret = Self {
            text,
            formats: formats.into_iter().map(normalise).collect(),
            end_formats: normalise(end_formats),
        };
        ret.assert_invariants();
        ret
    }

    pub(crate) fn into_raw(
        self,
    ) -> (Vec<char>, Vec<Option<FormatList>>, Option<FormatList>) {
        (self.text, self.formats, self.end_formats)
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.text
    }

    /// Length in characters (Unicode scalar values).
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// One entry per character; `None` for unstyled positions.
    pub fn formats(&self) -> &[Option<FormatList>] {
        &self.formats
    }

    pub fn end_formats(&self) -> Option<&FormatList> {
        self.end_formats.as_ref()
    }

    /// The formats at `index`, where `index == len()` reads the end slot.
    pub fn formats_at(&self, index: usize) -> Option<&FormatList> {
        if index == self.text.len() {
            self.end_formats.as_ref()
        } else {
            self.formats.get(index)?.as_ref()
        }
    }

    /// True when there is no text and no void element anywhere.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
            && self.formats.iter().all(Option::is_none)
            && self.end_formats.is_none()
    }

    /// Check the invariants when running tests or when the
    /// `assert-invariants` feature is enabled.
    pub fn assert_invariants(&self) {
        #[cfg(any(test, feature = "assert-invariants"))]
        self.explicitly_assert_invariants();
    }

    /// Panic if the value is inconsistent.
    pub fn explicitly_assert_invariants(&self) {
        if self.text.len() != self.formats.len() {
            panic!(
                "Value has {} characters but {} format entries",
                self.text.len(),
                self.formats.len()
            );
        }
        let has_empty_list = self
            .formats
            .iter()
            .chain(std::iter::once(&self.end_formats))
            .any(|f| matches!(f, Some(list) if list.is_empty()));
        if has_empty_list {
            panic!("Empty format lists must be stored as None");
        }
        let ends_in_container = self
            .end_formats
            .as_ref()
            .and_then(|list| list.last())
            .is_some_and(|f| !f.is_object());
        if ends_in_container {
            panic!("Formats after the last character must end in a void one");
        }
    }
}

fn normalise(formats: Option<FormatList>) -> Option<FormatList> {
    formats.filter(|list| !list.is_empty())
}

/// One independent value per boundary element, in document order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultilineValue {
    lines: Vec<RichTextValue>,
}

impl MultilineValue {
    pub fn new(lines: Vec<RichTextValue>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[RichTextValue] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<RichTextValue> {
        self.lines
    }

    pub fn line(&self, index: usize) -> Option<&RichTextValue> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True for no lines at all, or for a single empty line.
    pub fn is_empty(&self) -> bool {
        match self.lines.as_slice() {
            [] => true,
            [only] => only.is_empty(),
            _ => false,
        }
    }

    /// Concatenate the lines of every value. Offsets stay local to each
    /// line, so nothing is reindexed.
    pub fn merge<'a>(values: impl IntoIterator<Item = &'a Self>) -> Self {
        Self {
            lines: values
                .into_iter()
                .flat_map(|v| v.lines.iter().cloned())
                .collect(),
        }
    }
}

impl From<Vec<RichTextValue>> for MultilineValue {
    fn from(lines: Vec<RichTextValue>) -> Self {
        Self::new(lines)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::format::Format;

    fn em() -> Option<FormatList> {
        Some(vec![Format::new("em")])
    }

    #[test]
    fn from_text_is_unstyled() {
        let v = RichTextValue::from_text("héllo");
        assert_eq!(v.len(), 5);
        assert_eq!(v.text(), "héllo");
        assert!(v.formats().iter().all(Option::is_none));
    }

    #[test]
    fn from_parts_rejects_mismatched_lengths() {
        let res = RichTextValue::from_parts("ab", vec![None]);
        assert!(matches!(res, Err(RichTextError::MalformedInput(_))));
    }

    #[test]
    fn empty_lists_are_normalised_to_none() {
        let v = RichTextValue::from_parts("ab", vec![Some(Vec::new()), em()])
            .unwrap();
        assert_eq!(v.formats(), &[None, em()]);
    }

    #[test]
    fn formats_at_reads_the_end_slot() {
        let img = vec![Format::object("img")];
        let v = RichTextValue::from_text("a")
            .with_end_formats(Some(img.clone()));
        assert_eq!(v.formats_at(0), None);
        assert_eq!(v.formats_at(1), Some(&img));
        assert_eq!(v.formats_at(2), None);
    }

    #[test]
    fn is_empty_needs_no_text_and_no_formats() {
        assert!(RichTextValue::new().is_empty());
        assert!(!RichTextValue::from_text("a").is_empty());
        let only_image = RichTextValue::new()
            .with_end_formats(Some(vec![Format::object("img")]));
        assert!(!only_image.is_empty());
    }

    #[test]
    fn multiline_emptiness() {
        assert!(MultilineValue::default().is_empty());
        assert!(MultilineValue::new(vec![RichTextValue::new()]).is_empty());
        assert!(!MultilineValue::new(vec![
            RichTextValue::new(),
            RichTextValue::new()
        ])
        .is_empty());
        assert!(
            !MultilineValue::new(vec![RichTextValue::from_text("x")])
                .is_empty()
        );
    }

    #[test]
    fn multiline_merge_concatenates_lines() {
        let a = MultilineValue::new(vec![RichTextValue::from_text("one")]);
        let b = MultilineValue::new(vec![
            RichTextValue::from_text("two"),
            RichTextValue::from_text("three"),
        ]);
        let merged = MultilineValue::merge([&a, &b]);
        let texts: Vec<String> =
            merged.lines().iter().map(RichTextValue::text).collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[test]
    #[should_panic(expected = "must end in a void one")]
    fn enclosing_formats_cannot_trail_the_text() {
        RichTextValue::new().with_end_formats(em()).assert_invariants();
    }
}
