// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

pub mod dom;
mod error;
mod extract;
mod extraction_settings;
mod format;
mod rich_text_value;
mod selection;
mod serialize;
mod value_ops;

pub use crate::dom::parser::parse;
pub use crate::dom::DocumentNode;
pub use crate::dom::DomHandle;
pub use crate::dom::DomNode;
pub use crate::dom::ElementNode;
pub use crate::dom::HtmlParseError;
pub use crate::dom::NodeType;
pub use crate::dom::TextNode;
pub use crate::dom::ToHtml;
pub use crate::dom::ToTree;
pub use crate::error::RichTextError;
pub use crate::extract::extract;
pub use crate::extract::extract_multiline;
pub use crate::extract::extract_multiline_with_selection;
pub use crate::extract::extract_value;
pub use crate::extract::extract_value_with_selection;
pub use crate::extract::extract_with_selection;
pub use crate::extract::Extracted;
pub use crate::extract::ExtractedWithSelection;
pub use crate::extraction_settings::ExtractionSettings;
pub use crate::format::Format;
pub use crate::format::FormatList;
pub use crate::rich_text_value::MultilineValue;
pub use crate::rich_text_value::RichTextValue;
pub use crate::selection::Anchor;
pub use crate::selection::LinePosition;
pub use crate::selection::MultilineSelection;
pub use crate::selection::MultilineWithSelection;
pub use crate::selection::Selection;
pub use crate::selection::SelectionRange;
pub use crate::selection::ValueWithSelection;
pub use crate::serialize::serialize;
pub use crate::serialize::serialize_multiline;
pub use crate::serialize::to_dom;
