// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rustc_hash::FxHashSet;

use archforge_model::{BuiltInParameter, Category, ElementId, ElementKind, ViewId};

use super::{Outcome, Pushbutton, Summary};
use crate::clash::find_clashes;
use crate::error::Result;
use crate::highlight::{apply_override, highlight_partition, revert_overrides, OverrideStyle};
use crate::prompt::{Answer, Confirmation};
use crate::session::Session;
use crate::settings::FEET_TO_METERS;

fn ids_in_view(session: &Session<'_>, view: ViewId, categories: &[Category]) -> Vec<ElementId> {
    session
        .doc
        .elements_in_view(view)
        .filter(|e| categories.contains(&e.category()))
        .map(|e| e.id())
        .collect()
}

fn ids_of(session: &Session<'_>, categories: &[Category]) -> Vec<ElementId> {
    session
        .doc
        .elements()
        .filter(|e| categories.contains(&e.category()))
        .map(|e| e.id())
        .collect()
}

/// Colors `flagged` with the highlight color and the rest of `checked` with
/// the default color, then offers to revert the flagged elements.
fn highlight_with_revert(
    session: &mut Session<'_>,
    view: ViewId,
    checked: &[ElementId],
    flagged: &[ElementId],
    report: (&str, String),
    what: &str,
) -> Result<Outcome> {
    let (highlight, default) = (session.settings.highlight_color, session.settings.default_color);
    session.doc.with_transaction("Highlight elements", |doc| -> Result<()> {
        highlight_partition(doc.view_mut(view)?, checked, flagged, highlight, default);
        Ok(())
    })?;

    let (title, mut message) = report;
    let question = Confirmation::new(
        "Revert Colors",
        format!("{message}\nDo you want to revert the colors of the highlighted {what} to black?"),
    )
    .default_answer(Answer::No);
    if !flagged.is_empty() && session.confirm(question) == Answer::Yes {
        session.doc.with_transaction("Revert colors", |doc| -> Result<()> {
            revert_overrides(doc.view_mut(view)?, flagged);
            Ok(())
        })?;
        message.push_str(&format!(" The colors of the highlighted {what} have been reverted to black."));
    }

    Ok(Outcome::Completed(Summary::new(title, message, flagged.len())))
}

/// Highlights tags in the active view that clash with walls or columns.
pub struct TagClash;

impl Pushbutton for TagClash {
    fn id(&self) -> &'static str {
        "tag-clash"
    }

    fn title(&self) -> &'static str {
        "Tag Clash"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let question = Confirmation::new(
            "Warning",
            "This will highlight all tags clashing with 3D elements. Do you want to proceed?",
        );
        if session.confirm(question) != Answer::Yes {
            return Ok(Outcome::Cancelled);
        }

        let tags = ids_in_view(session, view, Category::TAGS);
        let obstacles = ids_of(session, &[Category::Walls, Category::Columns]);
        let clashing = find_clashes(session.doc, view, &tags, &obstacles);
        tracing::info!(tags = tags.len(), clashing = clashing.len(), "Checked tag clashes");

        let report = (
            "Overlap Detection with 3D Elements",
            format!("{} tags overlap with 3D elements.", clashing.len()),
        );
        highlight_with_revert(session, view, &tags, &clashing, report, "tags")
    }
}

/// Highlights dimensions and text notes in the active view that clash with walls.
pub struct AnnotationClash;

impl Pushbutton for AnnotationClash {
    fn id(&self) -> &'static str {
        "annotation-clash"
    }

    fn title(&self) -> &'static str {
        "Annotation Clash"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let question = Confirmation::new(
            "Warning",
            "This will highlight all dimensions and text annotations clashing with walls. Do you want to proceed?",
        );
        if session.confirm(question) != Answer::Yes {
            return Ok(Outcome::Cancelled);
        }

        let annotations = ids_in_view(session, view, &[Category::Dimensions, Category::TextNotes]);
        let walls = ids_of(session, &[Category::Walls]);
        let clashing = find_clashes(session.doc, view, &annotations, &walls);
        tracing::info!(annotations = annotations.len(), clashing = clashing.len(), "Checked annotation clashes");

        let report = (
            "Overlap Detection with Walls",
            format!("{} annotations overlap with walls.", clashing.len()),
        );
        highlight_with_revert(session, view, &annotations, &clashing, report, "annotations")
    }
}

/// Highlights and selects doors of the active view that no door tag refers to.
pub struct MissingDoorTags;

impl Pushbutton for MissingDoorTags {
    fn id(&self) -> &'static str {
        "missing-door-tags"
    }

    fn title(&self) -> &'static str {
        "Missing Door Tags"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let doors = ids_in_view(session, view, &[Category::Doors]);
        let tagged: FxHashSet<ElementId> = session
            .doc
            .elements_of_in_view(view, Category::DoorTags)
            .filter_map(|tag| match &tag.kind {
                ElementKind::Tag { tagged, .. } => Some(tagged.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect();
        let untagged: Vec<ElementId> = doors.iter().copied().filter(|d| !tagged.contains(d)).collect();

        let (highlight, default) = (session.settings.highlight_color, session.settings.default_color);
        session.doc.with_transaction("Highlight untagged doors", |doc| -> Result<()> {
            highlight_partition(doc.view_mut(view)?, &doors, &untagged, highlight, default);
            Ok(())
        })?;
        session.select(untagged.clone());

        let summary = if untagged.is_empty() {
            Summary::new("No Doors Found", "No doors with missing tags found in the active view.", 0)
        } else {
            Summary::new(
                "Doors with Missing Tags",
                format!("There are {} doors with missing tags found. Please fix them.", untagged.len()),
                untagged.len(),
            )
        };
        Ok(Outcome::Completed(summary))
    }
}

/// Highlights doors whose sill height is not zero.
pub struct DoorSillCheck;

impl Pushbutton for DoorSillCheck {
    fn id(&self) -> &'static str {
        "door-sill-check"
    }

    fn title(&self) -> &'static str {
        "Door Sill Check"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let mut checked = Vec::new();
        let mut raised = Vec::new();
        for door in session.doc.elements_of(Category::Doors) {
            let Some(sill) = door.parameters.double(BuiltInParameter::SillHeight) else {
                tracing::debug!(door = %door.id(), "Door has no sill height");
                continue;
            };
            checked.push(door.id());
            if sill != 0.0 {
                raised.push(door.id());
            }
        }
        if checked.is_empty() {
            return Ok(Outcome::NothingToDo("No doors with a sill height found.".into()));
        }

        let (highlight, default) = (session.settings.highlight_color, session.settings.default_color);
        session.doc.with_transaction("Highlight doors with non-zero sill height", |doc| -> Result<()> {
            highlight_partition(doc.view_mut(view)?, &checked, &raised, highlight, default);
            Ok(())
        })?;

        Ok(Outcome::Completed(Summary::new(
            "Door Sill Check",
            format!("{} of {} doors have a non-zero sill height.", raised.len(), checked.len()),
            raised.len(),
        )))
    }
}

/// Colors the ceilings of the active view by their height above the level.
pub struct CeilingHeights;

impl Pushbutton for CeilingHeights {
    fn id(&self) -> &'static str {
        "ceiling-heights"
    }

    fn title(&self) -> &'static str {
        "Highlight Ceilings"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let question = Confirmation::new(
            "Warning",
            "This will highlight all ceiling elements in the active view by their height. Do you want to proceed?",
        );
        if session.confirm(question) != Answer::Yes {
            return Ok(Outcome::Cancelled);
        }

        let bands = &session.settings.ceiling_bands;
        let colored: Vec<_> = session
            .doc
            .elements_of_in_view(view, Category::Ceilings)
            .filter_map(|ceiling| {
                let Some(feet) = ceiling.parameters.double(BuiltInParameter::HeightOffsetFromLevel) else {
                    tracing::debug!(ceiling = %ceiling.id(), "Ceiling has no height offset");
                    return None;
                };
                Some((ceiling.id(), bands.color_for(feet * FEET_TO_METERS)))
            })
            .collect();
        if colored.is_empty() {
            return Ok(Outcome::NothingToDo("No ceilings with a height offset in the active view.".into()));
        }

        session.doc.with_transaction("Override ceilings by height", |doc| -> Result<()> {
            let view = doc.view_mut(view)?;
            for (id, color) in &colored {
                apply_override(view, &[*id], OverrideStyle::Filled(*color));
            }
            Ok(())
        })?;

        let ids: Vec<ElementId> = colored.iter().map(|(id, _)| *id).collect();
        let mut message = format!("{} ceilings in the active view have been highlighted by height.", ids.len());
        let revert = Confirmation::new("Revert Ceiling Colors", "Do you want to revert the ceiling colors back to the original?")
            .default_answer(Answer::No);
        if session.confirm(revert) == Answer::Yes {
            session.doc.with_transaction("Revert ceiling colors", |doc| -> Result<()> {
                revert_overrides(doc.view_mut(view)?, &ids);
                Ok(())
            })?;
            message.push_str(" Ceiling colors have been reverted.");
        }

        Ok(Outcome::Completed(Summary::new("Ceiling Highlight", message, ids.len())))
    }
}
