// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::ElementNode;

type NodePredicate = Box<dyn Fn(&ElementNode) -> bool + Send + Sync>;
type NamePredicate = Box<dyn Fn(&str) -> bool + Send + Sync>;
type StringFilter = Box<dyn Fn(&str) -> String + Send + Sync>;

static EDITOR_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^data-mce-").unwrap());
static ZERO_WIDTH_NO_BREAK_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new("\u{FEFF}+").unwrap());

const BOGUS_ATTRIBUTE: &str = "data-mce-bogus";

/// Hooks that let a caller drop or flatten parts of the tree while it is
/// being extracted. Every hook defaults to keeping everything unchanged.
pub struct ExtractionSettings {
    /// Skip the element and everything below it.
    pub remove_node_match: NodePredicate,
    /// Keep the element's content but not its format.
    pub unwrap_node_match: NodePredicate,
    /// Leave this attribute out of captured formats.
    pub remove_attribute_match: NamePredicate,
    /// Rewrite every text run before it is added.
    pub filter_string: StringFilter,
}

impl ExtractionSettings {
    pub fn with_remove_node_match(
        mut self,
        f: impl Fn(&ElementNode) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.remove_node_match = Box::new(f);
        self
    }

    pub fn with_unwrap_node_match(
        mut self,
        f: impl Fn(&ElementNode) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.unwrap_node_match = Box::new(f);
        self
    }

    pub fn with_remove_attribute_match(
        mut self,
        f: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.remove_attribute_match = Box::new(f);
        self
    }

    pub fn with_filter_string(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.filter_string = Box::new(f);
        self
    }

    /// Settings that strip the private markers an editing surface leaves
    /// in its markup: `data-mce-bogus="all"` subtrees are removed, other
    /// `data-mce-bogus` elements are unwrapped, `data-mce-*` attributes are
    /// dropped and U+FEFF caret placeholders are filtered out of text.
    pub fn strip_editor_markers() -> Self {
        Self::default()
            .with_remove_node_match(|node| {
                node.get_attr(BOGUS_ATTRIBUTE) == Some("all")
            })
            .with_unwrap_node_match(|node| {
                node.get_attr(BOGUS_ATTRIBUTE)
                    .is_some_and(|value| !value.is_empty())
            })
            .with_remove_attribute_match(|name| {
                EDITOR_ATTRIBUTE.is_match(name)
            })
            .with_filter_string(|text| {
                ZERO_WIDTH_NO_BREAK_SPACE.replace_all(text, "").into_owned()
            })
    }
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            remove_node_match: Box::new(|_: &ElementNode| false),
            unwrap_node_match: Box::new(|_: &ElementNode| false),
            remove_attribute_match: Box::new(|_: &str| false),
            filter_string: Box::new(str::to_owned),
        }
    }
}

impl fmt::Debug for ExtractionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionSettings").finish_non_exhaustive()
    }
}
