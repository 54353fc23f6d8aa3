// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The pushbutton commands.
//!
//! Each button is a unit struct implementing [`Pushbutton`]. Buttons ask
//! their questions through the session's prompt, make all document edits
//! inside a single transaction, and report what they did as an [`Outcome`].

mod audit;
mod clash;
mod grids;
mod links;
mod names;
mod purge;
mod rooms;
mod views;

pub use audit::{LoadableFamilies, MirroredElements, SheetCount, WallBaseOffset};
pub use clash::{AnnotationClash, CeilingHeights, DoorSillCheck, MissingDoorTags, TagClash};
pub use grids::{RenameGrids, ToggleGridBubbles};
pub use links::{PinCadLinks, PinLinks, PinViewports, ToggleCadImports, ToggleLinkLevelsGrids, TogglePointClouds};
pub use names::{FamilyAffixes, FamilyNameCase, SheetAffixes, SheetNameCase, ViewAffixes, ViewNameCase};
pub use purge::{DeleteUnusedFillPatterns, OverkillAnnotations, OverkillDimensions};
pub use rooms::{DeleteRedundantRooms, DoorNumberSuffix, RoomNameCase, RoomNumberSequence, WindowMarkSuffix};
pub use views::CreatePlanViews;

use crate::error::Result;
use crate::prompt::Notice;
use crate::session::Session;

/// What a button run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub title: String,
    pub message: String,
    /// Elements edited, deleted or selected by the run.
    pub affected: usize,
}

impl Summary {
    pub fn new(title: impl Into<String>, message: impl Into<String>, affected: usize) -> Self {
        Self { title: title.into(), message: message.into(), affected }
    }
}

/// Result of running a pushbutton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed(Summary),
    /// The user dismissed a dialog; nothing was changed.
    Cancelled,
    /// There was nothing for the button to work on.
    NothingToDo(String),
    /// The run failed and its transaction was rolled back.
    Failed(String),
}

impl Outcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn summary(&self) -> Option<&Summary> {
        match self {
            Outcome::Completed(summary) => Some(summary),
            _ => None,
        }
    }
}

/// A user-triggered command.
pub trait Pushbutton {
    /// Stable identifier used on the command line.
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome>;
}

/// Runs a button and reports the outcome through the session's prompt.
///
/// Errors become [`Outcome::Failed`] after an error notice; completed runs
/// show their summary and cancelled runs an informational notice.
pub fn launch(button: &dyn Pushbutton, session: &mut Session<'_>) -> Outcome {
    tracing::info!(button = button.id(), "Running pushbutton");
    let outcome = match button.run(session) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(button = button.id(), error = %err, "Pushbutton failed");
            Outcome::Failed(err.to_string())
        }
    };
    match &outcome {
        Outcome::Completed(summary) => {
            tracing::info!(button = button.id(), affected = summary.affected, "{}", summary.message);
            session.notify(Notice::info(summary.title.clone(), summary.message.clone()));
        }
        Outcome::Cancelled => session.notify(Notice::info(button.title(), "Operation cancelled.")),
        Outcome::NothingToDo(message) => session.notify(Notice::info(button.title(), message.clone())),
        Outcome::Failed(message) => session.notify(Notice::error(button.title(), message.clone())),
    }
    outcome
}

/// Every available button, in menu order.
pub fn registry() -> Vec<Box<dyn Pushbutton>> {
    vec![
        Box::new(RenameGrids),
        Box::new(ToggleGridBubbles),
        Box::new(DeleteRedundantRooms),
        Box::new(RoomNameCase),
        Box::new(RoomNumberSequence),
        Box::new(DoorNumberSuffix),
        Box::new(WindowMarkSuffix),
        Box::new(TagClash),
        Box::new(AnnotationClash),
        Box::new(MissingDoorTags),
        Box::new(DoorSillCheck),
        Box::new(CeilingHeights),
        Box::new(OverkillAnnotations),
        Box::new(OverkillDimensions),
        Box::new(DeleteUnusedFillPatterns),
        Box::new(SheetNameCase),
        Box::new(ViewNameCase),
        Box::new(FamilyNameCase),
        Box::new(SheetAffixes),
        Box::new(ViewAffixes),
        Box::new(FamilyAffixes),
        Box::new(PinLinks),
        Box::new(PinCadLinks),
        Box::new(PinViewports),
        Box::new(TogglePointClouds),
        Box::new(ToggleCadImports),
        Box::new(ToggleLinkLevelsGrids),
        Box::new(SheetCount),
        Box::new(WallBaseOffset),
        Box::new(MirroredElements),
        Box::new(LoadableFamilies),
        Box::new(CreatePlanViews),
    ]
}

/// Looks up a button by id.
pub fn find(id: &str) -> Option<Box<dyn Pushbutton>> {
    registry().into_iter().find(|b| b.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    use crate::error::ButtonError;
    use crate::prompt::{NoticeLevel, ScriptedPrompt};
    use crate::settings::Settings;
    use archforge_model::Document;

    #[test]
    fn ids_are_unique_and_findable() {
        let buttons = registry();
        let ids: FxHashSet<_> = buttons.iter().map(|b| b.id()).collect();
        assert_eq!(ids.len(), buttons.len());
        for button in &buttons {
            assert_eq!(find(button.id()).map(|b| b.title()), Some(button.title()));
        }
        assert!(find("no-such-button").is_none());
    }

    struct Broken;

    impl Pushbutton for Broken {
        fn id(&self) -> &'static str {
            "broken"
        }

        fn title(&self) -> &'static str {
            "Broken"
        }

        fn run(&self, _session: &mut Session<'_>) -> Result<Outcome> {
            Err(ButtonError::InvalidInput("boom".into()))
        }
    }

    #[test]
    fn launch_turns_errors_into_failed_with_notice() {
        let mut doc = Document::new("t");
        let mut prompt = ScriptedPrompt::new();
        let settings = Settings::default();
        let outcome = {
            let mut session = Session::new(&mut doc, &mut prompt, &settings);
            launch(&Broken, &mut session)
        };
        assert_eq!(outcome, Outcome::Failed("invalid input: boom".into()));
        let notice = prompt.last_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "invalid input: boom");
    }
}
