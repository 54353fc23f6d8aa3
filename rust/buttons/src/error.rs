// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for pushbuttons.

/// Result type alias for pushbutton operations.
pub type Result<T> = std::result::Result<T, ButtonError>;

/// Errors raised while running a pushbutton.
#[derive(Debug, thiserror::Error)]
pub enum ButtonError {
    /// The document rejected an edit or query.
    #[error(transparent)]
    Model(#[from] archforge_model::Error),

    /// The button needs an active view and the document has none.
    #[error("this command needs an active view")]
    NoActiveView,

    /// An answer supplied through the prompt cannot be used.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}
