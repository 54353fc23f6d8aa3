// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stable identifiers for document elements and views.
//!
//! Ids are plain integers allocated monotonically by the [`Document`] and are
//! never reused after a deletion, so a stored id either resolves to the same
//! element or to nothing.
//!
//! [`Document`]: crate::Document

use serde::{Deserialize, Serialize};

/// Identifier of an element (wall, door, grid, tag, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

/// Identifier of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub u64);

impl ElementId {
    /// Returns the raw integer value.
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl ViewId {
    /// Returns the raw integer value.
    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl std::fmt::Display for ViewId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

impl From<u64> for ElementId {
    fn from(v: u64) -> Self {
        ElementId(v)
    }
}

impl From<u64> for ViewId {
    fn from(v: u64) -> Self {
        ViewId(v)
    }
}
