// Copyright 2024 New Vector Ltd.
// Copyright 2022 The Matrix.org Foundation C.I.C.
//
// SPDX-License-Identifier: AGPL-3.0-only OR LicenseRef-Element-Commercial
// Please see LICENSE in the repository root for full details.

//! HTML fragment parsing into a [crate::DomNode] tree.
//!
//! html5ever drives a [TreeSink] that builds a [PaDom]: a flat arena of
//! nodes referring to each other by index. Once parsing is finished the
//! arena is converted into an owned tree.

#[cfg(feature = "sys")]
mod padom;
#[cfg(feature = "sys")]
mod padom_creator;
#[cfg(feature = "sys")]
mod panode_container;
mod parse;

#[cfg(feature = "sys")]
use padom::{paqual_name, PaDom, PaDomCreationError, PaDomHandle, PaDomNode};
#[cfg(feature = "sys")]
use padom_creator::PaDomCreator;
#[cfg(feature = "sys")]
use panode_container::{PaNodeContainer, PaNodeText};

pub use parse::parse;
