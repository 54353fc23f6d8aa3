// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # ArchForge Buttons
//!
//! One-click automation commands ("pushbuttons") over an
//! [`archforge_model::Document`]: clash highlighting, batch renaming,
//! duplicate cleanup, numbering and visibility toggles.
//!
//! A button runs against a [`Session`] bundling the document, a [`Prompt`]
//! that answers its questions, and [`Settings`]. Every button makes its
//! edits inside one document transaction, so a failing run leaves the
//! document untouched.
//!
//! ```
//! use archforge_buttons::{find, launch, Answer, ScriptedPrompt, Session, Settings};
//! use archforge_model::{Document, ElementKind, ViewType};
//!
//! let mut doc = Document::new("Project");
//! let view = doc.add_view("Level 1", ViewType::FloorPlan).unwrap();
//! doc.set_active_view(view).unwrap();
//! doc.add_element("RVT Link", ElementKind::RevitLink).unwrap();
//!
//! let mut prompt = ScriptedPrompt::new().answer(Answer::Yes);
//! let settings = Settings::default();
//! let button = find("pin-links").unwrap();
//! let outcome = launch(button.as_ref(), &mut Session::new(&mut doc, &mut prompt, &settings));
//! assert!(outcome.is_completed());
//! assert!(doc.elements().all(|e| e.pinned));
//! ```

pub mod buttons;
pub mod case;
pub mod clash;
pub mod duplicates;
pub mod error;
pub mod highlight;
pub mod prompt;
pub mod rename;
pub mod session;
pub mod settings;

pub use buttons::{find, launch, registry, Outcome, Pushbutton, Summary};
pub use case::CaseTransform;
pub use clash::{find_clashes, find_stacked};
pub use duplicates::{find_redundant, redundant_rooms, Redundant};
pub use error::{ButtonError, Result};
pub use highlight::{apply_override, highlight_partition, revert_overrides, OverrideStyle};
pub use prompt::{
    Affixes, Answer, BubbleRequest, Confirmation, GridOrder, GridSide, LevelChoice, Notice, NoticeLevel, Prompt,
    PurgeTarget, ScriptedPrompt,
};
pub use rename::{unique_name, NameStore, NamingScheme, RenamePlan, Sequence, UniqueRenamer};
pub use session::Session;
pub use settings::{CeilingBands, Settings};
