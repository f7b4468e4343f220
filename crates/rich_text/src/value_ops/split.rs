// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::error::check_range;
use crate::rich_text_value::RichTextValue;
use crate::selection::{Selection, ValueWithSelection};
use crate::RichTextError;

impl RichTextValue {
    /// Split around the characters `start..=end`, which are dropped. The
    /// first value holds everything before `start`, the second everything
    /// after `end`.
    pub fn split(
        &self,
        start: usize,
        end: usize,
    ) -> Result<(Self, Self), RichTextError> {
        let len = self.len();
        check_range(start, end, len)?;
        let before = self.slice(0..start, None);
        let after = if end < len {
            self.slice(end + 1..len, self.end_formats().cloned())
        } else {
            RichTextValue::new()
        };
        Ok((before, after))
    }
}

impl ValueWithSelection {
    /// Split at the selection, dropping the selected characters. The caret
    /// moves to the start of the second value.
    pub fn split(&self) -> Result<(Self, Self), RichTextError> {
        let len = self.value.len();
        let (start, end) = self.selection.bounds(len)?;
        let before = self.value.slice(0..start, None);
        let after = self
            .value
            .slice(end..len, self.value.end_formats().cloned());
        Ok((
            Self::new(before, Selection::none()),
            Self::new(after, Selection::caret(0)),
        ))
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
        RichTextValue::from_parts(
            "one\ntwo",
            vec![None, None, None, None, em.clone(), em, None],
        )
        .unwrap()
    }

    #[test]
    fn split_drops_the_inclusive_range() {
        let v = sample();
        let (before, after) = v.split(3, 3).unwrap();
        assert_eq!(before.text(), "one");
        assert_eq!(after.text(), "two");
        assert_eq!(after.formats()[0], v.formats()[4]);
        assert_eq!(after.formats()[1], v.formats()[5]);
    }

    #[test]
    fn split_with_a_wider_range() {
        let (before, after) = sample().split(1, 4).unwrap();
        assert_eq!(before.text(), "o");
        assert_eq!(after.text(), "wo");
        assert_eq!(after.formats()[0], Some(vec![Format::new("em")]));
    }

    #[test]
    fn split_at_the_end_leaves_nothing_after() {
        let img = Some(vec![Format::object("img")]);
        let v = RichTextValue::from_text("ab").with_end_formats(img);
        let (before, after) = v.split(2, 2).unwrap();
        assert_eq!(before, RichTextValue::from_text("ab"));
        assert!(after.is_empty());
    }

    #[test]
    fn split_keeps_trailing_images_after() {
        let img = Some(vec![Format::object("img")]);
        let v = RichTextValue::from_text("ab").with_end_formats(img.clone());
        let (_, after) = v.split(0, 0).unwrap();
        assert_eq!(after.text(), "b");
        assert_eq!(after.end_formats(), img.as_ref());
    }

    #[test]
    fn split_rejects_bad_ranges() {
        assert!(matches!(
            sample().split(4, 2),
            Err(RichTextError::InvalidRange { .. })
        ));
        assert!(sample().split(2, 8).is_err());
    }

    #[test]
    fn split_at_selection_moves_the_caret_after() {
        let v = ValueWithSelection::new(sample(), Selection::new(3, 4));
        let (before, after) = v.split().unwrap();
        assert_eq!(before.value.text(), "one");
        assert_eq!(before.selection, Selection::none());
        assert_eq!(after.value.text(), "two");
        assert_eq!(after.selection, Selection::caret(0));
    }

    #[test]
    fn split_at_caret_keeps_every_character() {
        let v = ValueWithSelection::new(sample(), Selection::caret(2));
        let (before, after) = v.split().unwrap();
        assert_eq!(before.value.text(), "on");
        assert_eq!(after.value.text(), "e\ntwo");
    }

    #[test]
    fn split_needs_a_whole_selection() {
        let v = ValueWithSelection::new(
            sample(),
            Selection {
                start: Some(1),
                end: None,
            },
        );
        assert!(matches!(
            v.split(),
            Err(RichTextError::InvalidSelection(_))
        ));
    }
}
