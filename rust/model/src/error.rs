// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for document operations.

use crate::element::Category;
use crate::ids::{ElementId, ViewId};
use crate::parameters::BuiltInParameter;

/// Result type alias for document operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying or editing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced element does not exist (or was deleted).
    #[error("element not found: {0}")]
    ElementNotFound(ElementId),

    /// A referenced view does not exist.
    #[error("view not found: {0}")]
    ViewNotFound(ViewId),

    /// The document has no active view.
    #[error("the document has no active view")]
    NoActiveView,

    /// Another element of the same category already uses the name.
    #[error("name {name:?} is already in use by another element of category {category}")]
    DuplicateName { category: Category, name: String },

    /// Another view already uses the name.
    #[error("view name {0:?} is already in use")]
    DuplicateViewName(String),

    /// Names must not be empty.
    #[error("name must not be empty")]
    EmptyName,

    /// The element kind does not support the requested operation.
    #[error("element {id} does not support {operation}")]
    Unsupported { id: ElementId, operation: &'static str },

    /// A required parameter is missing on an element.
    #[error("element {id} has no {parameter} parameter")]
    MissingParameter { id: ElementId, parameter: BuiltInParameter },

    /// A snapshot refers to an id that does not resolve.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
