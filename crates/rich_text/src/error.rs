// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use thiserror::Error;

/// Caller-contract violations reported by extraction and the edit
/// operations. Nothing is clamped or corrected: an out-of-range offset is
/// always an error.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RichTextError {
    #[error("Invalid range {start} to {end} for a value of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

impl RichTextError {
    pub(crate) fn invalid_range(start: usize, end: usize, len: usize) -> Self {
        Self::InvalidRange { start, end, len }
    }
}

/// Fail with [RichTextError::InvalidRange] unless `start <= end <= len`.
pub(crate) fn check_range(
    start: usize,
    end: usize,
    len: usize,
) -> Result<(), RichTextError> {
    if start > end || end > len {
        Err(RichTextError::invalid_range(start, end, len))
    } else {
        Ok(())
    }
}
