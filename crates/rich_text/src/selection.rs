// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use crate::dom::DomHandle;
use crate::rich_text_value::{MultilineValue, RichTextValue};
use crate::RichTextError;

/// Caret offsets into one [RichTextValue]. A missing endpoint means there is
/// no selection on that side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_collapsed(&self) -> bool {
        self.start.is_some() && self.start == self.end
    }

    /// Both endpoints, failing if either is missing, reversed or past `len`.
    pub fn bounds(&self, len: usize) -> Result<(usize, usize), RichTextError> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            return Err(RichTextError::InvalidSelection(format!(
                "Selection {self:?} is missing an endpoint"
            )));
        };
        if start > end || end > len {
            return Err(RichTextError::InvalidSelection(format!(
                "Selection {start}..{end} does not fit a value of length {len}"
            )));
        }
        Ok((start, end))
    }
}

/// A caret position inside a [MultilineValue].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LinePosition {
    pub line: usize,
    pub offset: usize,
}

impl LinePosition {
    pub fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }

    /// Fail unless the position exists in `value`.
    pub fn validate(
        &self,
        value: &MultilineValue,
    ) -> Result<(), RichTextError> {
        let Some(line) = value.line(self.line) else {
            return Err(RichTextError::InvalidSelection(format!(
                "Line {} does not exist, there are {} lines",
                self.line,
                value.len()
            )));
        };
        if self.offset > line.len() {
            return Err(RichTextError::InvalidSelection(format!(
                "Offset {} is past the end of line {} (length {})",
                self.offset,
                self.line,
                line.len()
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MultilineSelection {
    pub start: Option<LinePosition>,
    pub end: Option<LinePosition>,
}

impl MultilineSelection {
    pub fn new(start: LinePosition, end: LinePosition) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Check every present endpoint against `value`.
    pub fn validate(
        &self,
        value: &MultilineValue,
    ) -> Result<(), RichTextError> {
        for position in self.start.iter().chain(self.end.iter()) {
            position.validate(value)?;
        }
        Ok(())
    }
}

/// One end of a selection in an element tree: a node and an offset into it.
/// For a text node the offset counts characters; for an element or document
/// it counts children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Anchor {
    pub handle: DomHandle,
    pub offset: usize,
}

impl Anchor {
    pub fn new(handle: DomHandle, offset: usize) -> Self {
        Self { handle, offset }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: Anchor,
    pub end: Anchor,
}

impl SelectionRange {
    pub fn new(start: Anchor, end: Anchor) -> Self {
        Self { start, end }
    }

    pub fn caret(anchor: Anchor) -> Self {
        Self {
            start: anchor.clone(),
            end: anchor,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueWithSelection {
    pub value: RichTextValue,
    pub selection: Selection,
}

impl ValueWithSelection {
    pub fn new(value: RichTextValue, selection: Selection) -> Self {
        Self { value, selection }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MultilineWithSelection {
    pub value: MultilineValue,
    pub selection: MultilineSelection,
}
