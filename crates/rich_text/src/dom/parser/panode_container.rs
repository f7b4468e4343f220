// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

use html5ever::QualName;

use super::PaDomHandle;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaNodeContainer {
    pub(crate) name: QualName,
    pub(crate) attrs: Vec<(String, String)>,
    pub(crate) children: Vec<PaDomHandle>,
}

impl PaNodeContainer {
    pub(crate) fn tag(&self) -> &str {
        self.name.local.as_ref()
    }

    /// Add the attributes from `attrs` whose names are not already present.
    pub(crate) fn add_attrs_if_missing(
        &mut self,
        attrs: impl IntoIterator<Item = (String, String)>,
    ) {
        for (name, value) in attrs {
            if !self.attrs.iter().any(|(n, _)| *n == name) {
                self.attrs.push((name, value));
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PaNodeText {
    pub(crate) content: String,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::dom::parser::paqual_name;

    #[test]
    fn missing_attributes_are_added_existing_ones_kept() {
        let mut node = PaNodeContainer {
            name: paqual_name("a"),
            attrs: vec![("href".into(), "#".into())],
            children: Vec::new(),
        };
        node.add_attrs_if_missing([
            ("href".to_owned(), "/other".to_owned()),
            ("title".to_owned(), "t".to_owned()),
        ]);
        assert_eq!(node.tag(), "a");
        assert_eq!(
            node.attrs,
            vec![
                ("href".to_owned(), "#".to_owned()),
                ("title".to_owned(), "t".to_owned())
            ]
        );
    }
}
