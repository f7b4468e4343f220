// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::error::check_range;
use crate::format::{Format, FormatList};
use crate::rich_text_value::RichTextValue;
use crate::selection::ValueWithSelection;
use crate::RichTextError;

impl RichTextValue {
    /// Add `format` as the innermost format of every character in
    /// `start..=end`. Formats already present are not checked, so applying
    /// the same format twice stacks it twice.
    ///
    /// `end` may equal `len()`; there is no character there to format.
    pub fn apply_format(
        &self,
        format: &Format,
        start: usize,
        end: usize,
    ) -> Result<Self, RichTextError> {
        self.map_formats(start, end, |list| {
            let mut list = list.unwrap_or_default();
            list.push(format.clone());
            Some(list)
        })
    }

    /// Drop every format of type `format_type` from the characters in
    /// `start..=end`.
    pub fn remove_format(
        &self,
        format_type: &str,
        start: usize,
        end: usize,
    ) -> Result<Self, RichTextError> {
        let format_type = format_type.to_ascii_lowercase();
        self.map_formats(start, end, |list| {
            list.map(|list| {
                list.into_iter()
                    .filter(|f| f.format_type() != format_type)
                    .collect()
            })
        })
    }

    fn map_formats(
        &self,
        start: usize,
        end: usize,
        f: impl Fn(Option<FormatList>) -> Option<FormatList>,
    ) -> Result<Self, RichTextError> {
        let len = self.len();
        check_range(start, end, len)?;
        let (text, mut formats, end_formats) = self.clone().into_raw();
        for slot in formats.iter_mut().take(end + 1).skip(start) {
            *slot = f(slot.take());
        }
        Ok(Self::from_raw(text, formats, end_formats))
    }
}

impl ValueWithSelection {
    /// Apply `format` to the selected characters. A collapsed selection
    /// leaves the value as it is.
    pub fn apply_format(&self, format: &Format) -> Result<Self, RichTextError> {
        let (start, end) = self.selection.bounds(self.value.len())?;
        if start == end {
            return Ok(self.clone());
        }
        Ok(Self::new(
            self.value.apply_format(format, start, end - 1)?,
            self.selection,
        ))
    }

    /// Remove formats of type `format_type` from the selected characters.
    pub fn remove_format(
        &self,
        format_type: &str,
    ) -> Result<Self, RichTextError> {
        let (start, end) = self.selection.bounds(self.value.len())?;
        if start == end {
            return Ok(self.clone());
        }
        Ok(Self::new(
            self.value.remove_format(format_type, start, end - 1)?,
            self.selection,
        ))
    }
}
