// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::rich_text_value::RichTextValue;
use crate::RichTextError;

impl RichTextValue {
    /// Remove the character at `index` together with its formats.
    pub fn delete_character(
        &self,
        index: usize,
    ) -> Result<Self, RichTextError> {
        self.delete_characters(&[index])
    }

    /// Remove the character at every index in `indices`. Indices refer to
    /// `self`, so their order and any repeats do not matter.
    pub fn delete_characters(
        &self,
        indices: &[usize],
    ) -> Result<Self, RichTextError> {
        let len = self.len();
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(RichTextError::invalid_range(bad, bad, len));
        }

        let mut indices = indices.to_vec();
        indices.sort_unstable_by(|a, b| b.cmp(a));
        indices.dedup();

        let (mut text, mut formats, end_formats) = self.clone().into_raw();
        for index in indices {
            text.remove(index);
            formats.remove(index);
        }
        Ok(Self::from_raw(text, formats, end_formats))
    }
}
