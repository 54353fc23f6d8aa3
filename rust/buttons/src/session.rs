// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The context a pushbutton runs against.

use archforge_model::{Document, ElementId, ViewId};

use crate::error::{ButtonError, Result};
use crate::prompt::{Answer, Confirmation, Notice, Prompt};
use crate::settings::Settings;

/// Document, prompt and settings for one pushbutton run.
///
/// `selection` plays the role of the host's current selection: buttons that
/// "select" elements replace it.
pub struct Session<'a> {
    pub doc: &'a mut Document,
    pub prompt: &'a mut dyn Prompt,
    pub settings: &'a Settings,
    pub selection: Vec<ElementId>,
}

impl<'a> Session<'a> {
    pub fn new(doc: &'a mut Document, prompt: &'a mut dyn Prompt, settings: &'a Settings) -> Self {
        Self { doc, prompt, settings, selection: Vec::new() }
    }

    /// Id of the active view.
    pub fn active_view(&self) -> Result<ViewId> {
        self.doc.active_view_id().ok_or(ButtonError::NoActiveView)
    }

    pub fn select(&mut self, ids: Vec<ElementId>) {
        tracing::debug!(count = ids.len(), "Updated selection");
        self.selection = ids;
    }

    pub fn confirm(&mut self, question: Confirmation) -> Answer {
        self.prompt.confirm(&question)
    }

    pub fn notify(&mut self, notice: Notice) {
        self.prompt.notify(&notice);
    }
}

impl std::fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("document", &self.doc.title())
            .field("settings", &self.settings)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}
