// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use archforge_model::{Category, ElementId};

use super::{Outcome, Pushbutton, Summary};
use crate::error::Result;
use crate::prompt::{Answer, Confirmation};
use crate::session::Session;

/// Pins (Yes) or unpins (No) every element of `category`.
fn pin_all(session: &mut Session<'_>, category: Category, what: &str) -> Result<Outcome> {
    let ids: Vec<ElementId> = session.doc.elements_of(category).map(|e| e.id()).collect();
    if ids.is_empty() {
        return Ok(Outcome::NothingToDo(format!("No {what} found in the document.")));
    }

    let question = Confirmation::new(
        format!("Pin {what}"),
        format!("Pin all {what}? Choose No to unpin them instead."),
    )
    .cancellable();
    let pinned = match session.confirm(question) {
        Answer::Yes => true,
        Answer::No => false,
        Answer::Cancel => return Ok(Outcome::Cancelled),
    };

    let transaction = if pinned { format!("Pin {what}") } else { format!("Unpin {what}") };
    session.doc.with_transaction(&transaction, |doc| {
        ids.iter().try_for_each(|id| doc.set_pinned(*id, pinned))
    })?;

    let state = if pinned { "pinned" } else { "unpinned" };
    Ok(Outcome::Completed(Summary::new(
        "Success",
        format!("{} {what} have been {state}.", ids.len()),
        ids.len(),
    )))
}

/// Pins or unpins all linked models.
pub struct PinLinks;

impl Pushbutton for PinLinks {
    fn id(&self) -> &'static str {
        "pin-links"
    }

    fn title(&self) -> &'static str {
        "Pin RVT Links"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        pin_all(session, Category::RevitLinks, "RVT links")
    }
}

/// Pins or unpins all CAD imports.
pub struct PinCadLinks;

impl Pushbutton for PinCadLinks {
    fn id(&self) -> &'static str {
        "pin-cad-links"
    }

    fn title(&self) -> &'static str {
        "Pin CAD Links"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        pin_all(session, Category::CadImports, "CAD links")
    }
}

/// Pins or unpins all viewports on sheets.
pub struct PinViewports;

impl Pushbutton for PinViewports {
    fn id(&self) -> &'static str {
        "pin-viewports"
    }

    fn title(&self) -> &'static str {
        "Pin Viewports"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        pin_all(session, Category::Viewports, "viewports")
    }
}

/// Flips the hidden state of `categories` in the active view, once each.
fn toggle(session: &mut Session<'_>, categories: &[Category], what: &str) -> Result<Outcome> {
    let view = session.active_view()?;
    let question = Confirmation::new(
        "Warning",
        format!("This will toggle the visibility of {what} in the active view. Do you want to proceed?"),
    );
    if session.confirm(question) != Answer::Yes {
        return Ok(Outcome::Cancelled);
    }

    let hidden = session.doc.with_transaction(&format!("Toggle {what}"), |doc| -> Result<bool> {
        let view = doc.view_mut(view)?;
        let mut hidden = false;
        for category in categories {
            hidden = view.toggle_category(*category);
            tracing::debug!(category = category.as_str(), hidden, "Toggled category");
        }
        Ok(hidden)
    })?;

    let state = if hidden { "hidden" } else { "shown" };
    Ok(Outcome::Completed(Summary::new(
        "Toggle Visibility",
        format!("The {what} in the active view are now {state}."),
        categories.len(),
    )))
}

/// Shows or hides point clouds in the active view.
pub struct TogglePointClouds;

impl Pushbutton for TogglePointClouds {
    fn id(&self) -> &'static str {
        "toggle-point-clouds"
    }

    fn title(&self) -> &'static str {
        "Toggle Point Clouds"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        toggle(session, &[Category::PointClouds], "point clouds")
    }
}

/// Shows or hides CAD imports in the active view.
pub struct ToggleCadImports;

impl Pushbutton for ToggleCadImports {
    fn id(&self) -> &'static str {
        "toggle-cad-imports"
    }

    fn title(&self) -> &'static str {
        "Toggle CAD Links"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        toggle(session, &[Category::CadImports], "CAD links")
    }
}

/// Shows or hides levels and grids in the active view.
///
/// Linked models draw their levels and grids with the host categories, so
/// toggling the two categories covers links as well.
pub struct ToggleLinkLevelsGrids;

impl Pushbutton for ToggleLinkLevelsGrids {
    fn id(&self) -> &'static str {
        "toggle-link-levels-grids"
    }

    fn title(&self) -> &'static str {
        "Toggle Link Levels & Grids"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        toggle(session, &[Category::Levels, Category::Grids], "levels and grids")
    }
}
