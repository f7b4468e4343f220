// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::format::join_at_seam;
use crate::rich_text_value::RichTextValue;

impl RichTextValue {
    /// Join `values` end to end.
    pub fn merge<'a>(
        values: impl IntoIterator<Item = &'a RichTextValue>,
    ) -> Self {
        values
            .into_iter()
            .fold(RichTextValue::new(), |acc, value| acc.concat(value))
    }

    /// `self` followed by `other`. Void elements trailing `self` end up at
    /// the first position of `other`, or trailing the result if `other` has
    /// no text.
    pub fn concat(&self, other: &RichTextValue) -> Self {
        let (mut text, mut formats, end_formats) = self.clone().into_raw();
        let (other_text, mut other_formats, mut other_end) =
            other.clone().into_raw();

        if let Some(trailing) = end_formats {
            let first = match other_formats.first_mut() {
                Some(first) => first,
                None => &mut other_end,
            };
            let later = first.take().unwrap_or_default();
            *first = Some(join_at_seam(trailing, later));
        }

        text.extend(other_text);
        formats.append(&mut other_formats);
        Self::from_raw(text, formats, other_end)
    }
}
