// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

/// A path of child indices leading from a root node to one of its
/// descendants. The root itself is the empty path.
///
/// Handles are how callers point at a node when describing a selection
/// anchor: `[1, 0]` is the first child of the root's second child.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomHandle {
    path: Vec<usize>,
}

impl DomHandle {
    pub fn root() -> Self {
        Self { path: Vec::new() }
    }

    pub fn from_raw(path: Vec<usize>) -> Self {
        Self { path }
    }

    pub fn raw(&self) -> &Vec<usize> {
        &self.path
    }

    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of steps from the root.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn has_parent(&self) -> bool {
        !self.is_root()
    }

    /// The handle of this node's parent, or `None` for the root.
    pub fn parent_handle(&self) -> Option<DomHandle> {
        if self.is_root() {
            None
        } else {
            Some(Self {
                path: self.path[..self.path.len() - 1].to_vec(),
            })
        }
    }

    /// Position of this node among its siblings, or `None` for the root.
    pub fn index_in_parent(&self) -> Option<usize> {
        self.path.last().copied()
    }

    pub fn child_handle(&self, index: usize) -> DomHandle {
        let mut path = self.path.clone();
        path.push(index);
        Self { path }
    }

    /// True if `other` lives strictly below this node.
    pub fn is_ancestor_of(&self, other: &DomHandle) -> bool {
        other.path.len() > self.path.len()
            && other.path[..self.path.len()] == self.path[..]
    }
}

impl From<Vec<usize>> for DomHandle {
    fn from(path: Vec<usize>) -> Self {
        Self::from_raw(path)
    }
}

#[cfg(test)]
mod test {
    use super::DomHandle;

    #[test]
    fn root_has_no_parent() {
        let root = DomHandle::root();
        assert!(root.is_root());
        assert_eq!(root.parent_handle(), None);
        assert_eq!(root.index_in_parent(), None);
    }

    #[test]
    fn child_handles_extend_the_path() {
        let handle = DomHandle::root().child_handle(1).child_handle(0);
        assert_eq!(handle.raw(), &vec![1, 0]);
        assert_eq!(handle.depth(), 2);
        assert_eq!(handle.index_in_parent(), Some(0));
        assert_eq!(handle.parent_handle(), Some(DomHandle::from_raw(vec![1])));
    }

    #[test]
    fn ancestry_is_strict() {
        let parent = DomHandle::from_raw(vec![2]);
        let child = DomHandle::from_raw(vec![2, 3]);
        let other = DomHandle::from_raw(vec![1, 3]);
        assert!(parent.is_ancestor_of(&child));
        assert!(DomHandle::root().is_ancestor_of(&child));
        assert!(!parent.is_ancestor_of(&parent));
        assert!(!parent.is_ancestor_of(&other));
    }
}
