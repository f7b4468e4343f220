// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use std::collections::BTreeMap;

use crate::dom::ElementNode;

/// One markup-tag annotation attached to a text position.
///
/// `object` formats mark a void element (an image, a horizontal rule) that
/// sits at a position rather than enclosing any characters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Format {
    format_type: String,
    attributes: Option<BTreeMap<String, String>>,
    object: bool,
}

/// Formats active at one position, outermost enclosing tag first.
pub type FormatList = Vec<Format>;

impl Format {
    pub fn new(format_type: &str) -> Self {
        Self {
            format_type: format_type.to_ascii_lowercase(),
            attributes: None,
            object: false,
        }
    }

    /// A void format, e.g. `Format::object("img")`.
    pub fn object(format_type: &str) -> Self {
        Self {
            object: true,
            ..Self::new(format_type)
        }
    }

    /// Add one attribute. Attributes are kept sorted by name so two formats
    /// compare equal whatever order the markup declared them in.
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(name.to_owned(), value.to_owned());
        self
    }

    pub fn with_attributes(
        mut self,
        attributes: impl IntoIterator<Item = (String, String)>,
    ) -> Self {
        let mut map: BTreeMap<String, String> =
            self.attributes.take().unwrap_or_default();
        map.extend(attributes);
        self.attributes = if map.is_empty() { None } else { Some(map) };
        self
    }

    pub(crate) fn into_object(mut self) -> Self {
        self.object = true;
        self
    }

    /// The format an element contributes: its lower-cased tag plus every
    /// attribute `keep_attribute` accepts.
    pub(crate) fn from_element(
        element: &ElementNode,
        keep_attribute: impl Fn(&str) -> bool,
    ) -> Self {
        Self::new(element.tag()).with_attributes(
            element
                .attributes()
                .iter()
                .filter(|(name, _)| keep_attribute(name.as_str()))
                .cloned(),
        )
    }

    pub fn format_type(&self) -> &str {
        &self.format_type
    }

    pub fn attributes(&self) -> Option<&BTreeMap<String, String>> {
        self.attributes.as_ref()
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes.as_ref()?.get(name).map(String::as_str)
    }

    pub fn is_object(&self) -> bool {
        self.object
    }

    /// True if both formats would render as the same opening tag.
    pub(crate) fn same_tag(&self, other: &Format) -> bool {
        self.format_type == other.format_type
            && self.attributes == other.attributes
    }
}

/// Combine the formats two adjacent pieces of content put at the same
/// position, `earlier` coming first in the document.
///
/// Adjacent void formats are kept most recent first, so when both sides
/// meet with void formats the later run goes in front of the earlier one.
pub(crate) fn join_at_seam(
    mut earlier: FormatList,
    later: FormatList,
) -> FormatList {
    let trailing = earlier.iter().rev().take_while(|f| f.is_object()).count();
    let leading = later.iter().take_while(|f| f.is_object()).count();
    if trailing == 0 || leading == 0 {
        earlier.extend(later);
        return earlier;
    }
    let earlier_run = earlier.split_off(earlier.len() - trailing);
    let mut later = later.into_iter();
    earlier.extend(later.by_ref().take(leading));
    earlier.extend(earlier_run);
    earlier.extend(later);
    earlier
}
