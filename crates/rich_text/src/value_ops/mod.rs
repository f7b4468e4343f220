// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! Edit operations over [RichTextValue] and [ValueWithSelection].
//!
//! Every operation takes `&self` and returns a new value. Offsets outside
//! the value are reported as errors rather than clamped.
//!
//! [ValueWithSelection]: crate::ValueWithSelection

mod delete;
mod formatting;
mod merge;
mod splice;
mod split;

use std::ops::Range;

use crate::format::FormatList;
use crate::rich_text_value::RichTextValue;

impl RichTextValue {
    /// The characters in `range` with their formats, followed by
    /// `end_formats`.
    pub(crate) fn slice(
        &self,
        range: Range<usize>,
        end_formats: Option<FormatList>,
    ) -> Self {
        Self::from_raw(
            self.chars()[range.clone()].to_vec(),
            self.formats()[range].to_vec(),
            end_formats,
        )
    }
}
