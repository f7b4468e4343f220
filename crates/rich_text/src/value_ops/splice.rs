// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::ops::Range;

use crate::error::check_range;
use crate::format::FormatList;
use crate::rich_text_value::RichTextValue;
use crate::selection::{Selection, ValueWithSelection};
use crate::RichTextError;

impl RichTextValue {
    /// Replace the characters in `start..=end` with `text`. `formats` gives
    /// one entry per inserted character; without it the inserted text is
    /// unstyled. Use [RichTextValue::insert] to add text without removing
    /// any.
    pub fn splice(
        &self,
        start: usize,
        end: usize,
        text: &str,
        formats: Option<Vec<Option<FormatList>>>,
    ) -> Result<Self, RichTextError> {
        let len = self.len();
        check_range(start, end, len)?;
        if end == len {
            return Err(RichTextError::invalid_range(start, end, len));
        }
        self.replace(start..end + 1, text, formats)
    }

    /// Insert `text` before the character at `index`, or at the end when
    /// `index == len()`.
    pub fn insert(
        &self,
        index: usize,
        text: &str,
        formats: Option<Vec<Option<FormatList>>>,
    ) -> Result<Self, RichTextError> {
        check_range(index, index, self.len())?;
        self.replace(index..index, text, formats)
    }

    fn replace(
        &self,
        range: Range<usize>,
        text: &str,
        formats: Option<Vec<Option<FormatList>>>,
    ) -> Result<Self, RichTextError> {
        let inserted: Vec<char> = text.chars().collect();
        let inserted_formats =
            formats.unwrap_or_else(|| vec![None; inserted.len()]);
        if inserted_formats.len() != inserted.len() {
            return Err(RichTextError::MalformedInput(format!(
                "{} formats supplied for {} inserted characters",
                inserted_formats.len(),
                inserted.len()
            )));
        }

        let (mut chars, mut all_formats, end_formats) = self.clone().into_raw();
        chars.splice(range.clone(), inserted);
        all_formats.splice(range, inserted_formats);
        Ok(Self::from_raw(chars, all_formats, end_formats))
    }
}

impl ValueWithSelection {
    /// Replace the selection with `text`, leaving a caret right after it.
    /// A collapsed selection inserts without removing anything.
    pub fn splice(
        &self,
        text: &str,
        formats: Option<Vec<Option<FormatList>>>,
    ) -> Result<Self, RichTextError> {
        let (start, end) = self.selection.bounds(self.value.len())?;
        let value = self.value.replace(start..end, text, formats)?;
        Ok(Self::new(
            value,
            Selection::caret(start + text.chars().count()),
        ))
    }

    /// Remove the selected characters.
    pub fn delete_selection(&self) -> Result<Self, RichTextError> {
        self.splice("", None)
    }
}

#[cfg(test)]
mod test {
    use crate::format::Format;
    use crate::rich_text_value::RichTextValue;
    use crate::selection::{Selection, ValueWithSelection};
    use crate::RichTextError;

    fn sample() -> RichTextValue {
        let em = Some(vec![Format::new("em")]);
        RichTextValue::from_parts("abcd", vec![None, em.clone(), em, None])
            .unwrap()
    }

    #[test]
    fn splice_replaces_an_inclusive_range() {
        let v = sample().splice(1, 2, "XYZ", None).unwrap();
        assert_eq!(v.text(), "aXYZd");
        assert_eq!(v.formats(), &[None, None, None, None, None]);
    }

    #[test]
    fn splice_of_one_position_replaces_one_character() {
        let v = sample().splice(3, 3, "!", None).unwrap();
        assert_eq!(v.text(), "abc!");
        assert_eq!(v.formats()[2], Some(vec![Format::new("em")]));
    }

    #[test]
    fn insert_keeps_every_character() {
        let v = sample().insert(4, "!", None).unwrap();
        assert_eq!(v.text(), "abcd!");
        assert_eq!(v.formats()[1], Some(vec![Format::new("em")]));
        assert_eq!(sample().insert(0, "x", None).unwrap().text(), "xabcd");
        assert!(sample().insert(5, "x", None).is_err());
    }

    #[test]
    fn splice_uses_given_formats() {
        let b = Some(vec![Format::new("b")]);
        let v = sample()
            .splice(0, 0, "xy", Some(vec![b.clone(), None]))
            .unwrap();
        assert_eq!(v.text(), "xybcd");
        assert_eq!(v.formats()[0], b);
        assert_eq!(v.formats()[1], None);
    }

    #[test]
    fn splice_checks_format_count() {
        assert!(matches!(
            sample().insert(0, "xy", Some(vec![None])),
            Err(RichTextError::MalformedInput(_))
        ));
    }

    #[test]
    fn splice_rejects_bad_ranges() {
        assert!(matches!(
            sample().splice(3, 1, "", None),
            Err(RichTextError::InvalidRange { .. })
        ));
        assert!(sample().splice(0, 5, "", None).is_err());
        assert!(sample().splice(4, 4, "", None).is_err());
        assert!(RichTextValue::new().splice(0, 0, "x", None).is_err());
    }

    #[test]
    fn splice_at_selection_collapses_after_insert() {
        let v = ValueWithSelection::new(sample(), Selection::new(1, 3));
        let spliced = v.splice("héllo", None).unwrap();
        assert_eq!(spliced.value.text(), "ahéllod");
        assert_eq!(spliced.selection, Selection::caret(6));
    }

    #[test]
    fn delete_selection_removes_the_selected_text() {
        let v = ValueWithSelection::new(sample(), Selection::new(0, 2));
        let deleted = v.delete_selection().unwrap();
        assert_eq!(deleted.value.text(), "cd");
        assert_eq!(deleted.selection, Selection::caret(0));
    }

    #[test]
    fn splice_at_collapsed_selection_inserts() {
        let v = ValueWithSelection::new(sample(), Selection::caret(4));
        let spliced = v.splice("!", None).unwrap();
        assert_eq!(spliced.value.text(), "abcd!");
        assert_eq!(spliced.selection, Selection::caret(5));
    }
}
