// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rustc_hash::FxHashSet;

use archforge_model::{BuiltInParameter, Category, Document, ElementId, ElementKind};

use super::{Outcome, Pushbutton, Summary};
use crate::error::Result;
use crate::session::Session;

/// Sheet totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SheetTally {
    pub total: usize,
    pub with_views: usize,
    pub placeholders: usize,
}

pub fn tally_sheets(doc: &Document) -> SheetTally {
    doc.elements_of(Category::Sheets).fold(SheetTally::default(), |mut tally, sheet| {
        tally.total += 1;
        match &sheet.kind {
            ElementKind::Sheet { placed_views, .. } if !placed_views.is_empty() => tally.with_views += 1,
            _ => tally.placeholders += 1,
        }
        tally
    })
}

/// Counts sheets, split into sheets with placed views and placeholders.
pub struct SheetCount;

impl Pushbutton for SheetCount {
    fn id(&self) -> &'static str {
        "sheet-count"
    }

    fn title(&self) -> &'static str {
        "Sheet Count"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let tally = tally_sheets(session.doc);
        Ok(Outcome::Completed(Summary::new(
            "Success",
            format!(
                "Total sheets: {}\nActive sheets with views: {}\nPlaceholder sheets: {}",
                tally.total, tally.with_views, tally.placeholders
            ),
            tally.total,
        )))
    }
}

/// Selects walls whose base is offset from their level.
pub struct WallBaseOffset;

impl Pushbutton for WallBaseOffset {
    fn id(&self) -> &'static str {
        "wall-base-offset"
    }

    fn title(&self) -> &'static str {
        "Wall Base Checker"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let offset: Vec<ElementId> = session
            .doc
            .elements_of(Category::Walls)
            .filter(|wall| {
                wall.parameters
                    .double(BuiltInParameter::WallBaseOffset)
                    .is_some_and(|offset| offset != 0.0)
            })
            .map(|wall| wall.id())
            .collect();
        let count = offset.len();
        session.select(offset);
        Ok(Outcome::Completed(Summary::new(
            "Wall Base Checker",
            format!("{count} walls have a non-zero base offset and have been selected."),
            count,
        )))
    }
}

/// Selects mirrored model elements in the active view.
pub struct MirroredElements;

impl Pushbutton for MirroredElements {
    fn id(&self) -> &'static str {
        "mirrored-elements"
    }

    fn title(&self) -> &'static str {
        "Mirrored Elements"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let mirrored: Vec<ElementId> = session
            .doc
            .elements_in_view(view)
            .filter(|e| e.category().is_model() && e.kind.mirrored() == Some(true))
            .map(|e| e.id())
            .collect();
        let count = mirrored.len();
        session.select(mirrored);
        if count == 0 {
            return Ok(Outcome::NothingToDo("No mirrored elements found in the active view.".into()));
        }
        Ok(Outcome::Completed(Summary::new(
            "Mirrored Elements",
            format!("{count} mirrored elements have been selected."),
            count,
        )))
    }
}

/// Names of the families placed in the document, in first-use order.
pub fn used_family_names(doc: &Document) -> Vec<String> {
    let mut seen = FxHashSet::default();
    doc.elements()
        .filter_map(|instance| {
            let family = instance.family?;
            match doc.element(family) {
                Some(f) => Some(f.name().to_string()),
                None => {
                    tracing::debug!(instance = %instance.id(), %family, "Instance refers to a missing family");
                    None
                }
            }
        })
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Lists the loadable families used by placed instances.
pub struct LoadableFamilies;

impl Pushbutton for LoadableFamilies {
    fn id(&self) -> &'static str {
        "loadable-families"
    }

    fn title(&self) -> &'static str {
        "Loadable Families"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let names = used_family_names(session.doc);
        let mut message = String::from("Loaded families:\n");
        for name in &names {
            message.push_str(name);
            message.push('\n');
        }
        message.push_str(&format!("\nTotal number of loaded families: {}", names.len()));
        Ok(Outcome::Completed(Summary::new("Success", message, names.len())))
    }
}
