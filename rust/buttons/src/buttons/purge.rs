// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use archforge_model::{Category, Document, ElementId, ElementKind, FillPattern};
use rustc_hash::FxHashSet;

use super::{Outcome, Pushbutton, Summary};
use crate::clash::find_stacked;
use crate::error::Result;
use crate::prompt::PurgeTarget;
use crate::session::Session;

/// Deletes `stacked` in one transaction and selects the retained elements.
fn purge(session: &mut Session<'_>, name: &str, all: &[ElementId], stacked: &[ElementId]) -> Result<Vec<ElementId>> {
    session.doc.with_transaction(name, |doc| {
        stacked.iter().try_for_each(|id| doc.delete(*id).map(|_| ()))
    })?;
    let retained: Vec<ElementId> = all.iter().copied().filter(|id| !stacked.contains(id)).collect();
    tracing::info!(deleted = stacked.len(), retained = retained.len(), "{}", name);
    session.select(retained.clone());
    Ok(retained)
}

/// Deletes text notes and tags lying on top of an earlier one of the same kind.
pub struct OverkillAnnotations;

impl Pushbutton for OverkillAnnotations {
    fn id(&self) -> &'static str {
        "overkill-annotations"
    }

    fn title(&self) -> &'static str {
        "Overkill Annotations"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let Some(targets) = session.prompt.choose_purge_targets(PurgeTarget::ALL) else {
            return Ok(Outcome::Cancelled);
        };

        let mut seen = FxHashSet::default();
        let targets: Vec<PurgeTarget> = targets.into_iter().filter(|t| seen.insert(*t)).collect();

        let mut all = Vec::new();
        let mut stacked = Vec::new();
        for target in &targets {
            let ids: Vec<ElementId> = session
                .doc
                .elements_of_in_view(view, target.category())
                .map(|e| e.id())
                .collect();
            stacked.extend(find_stacked(session.doc, view, &ids, |_, _| true));
            all.extend(ids);
        }
        let mut seen = FxHashSet::default();
        stacked.retain(|id| seen.insert(*id));
        if stacked.is_empty() {
            return Ok(Outcome::NothingToDo(
                "No overlapping elements found for the selected types in the active view.".into(),
            ));
        }

        let retained = purge(session, "Delete overlapping annotations", &all, &stacked)?;
        Ok(Outcome::Completed(Summary::new(
            "Success",
            format!("Retained {} element(s), deleted {}.", retained.len(), stacked.len()),
            stacked.len(),
        )))
    }
}

/// True for dimensions running closer to the Y axis than to the X axis.
fn is_vertical_dimension(doc: &Document, id: ElementId) -> bool {
    doc.element(id)
        .and_then(|e| e.kind.curve())
        .and_then(|c| c.direction())
        .is_some_and(|d| d.x.abs() < d.y.abs())
}

/// Deletes dimensions lying on top of an earlier dimension with the same
/// orientation.
pub struct OverkillDimensions;

impl Pushbutton for OverkillDimensions {
    fn id(&self) -> &'static str {
        "overkill-dimensions"
    }

    fn title(&self) -> &'static str {
        "Overkill Dimensions"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let dimensions: Vec<ElementId> = session
            .doc
            .elements_of_in_view(view, Category::Dimensions)
            .map(|e| e.id())
            .collect();
        if dimensions.is_empty() {
            return Ok(Outcome::NothingToDo("No dimensions found in the active view.".into()));
        }

        let doc = &*session.doc;
        let stacked = find_stacked(doc, view, &dimensions, |a, b| {
            is_vertical_dimension(doc, a) == is_vertical_dimension(doc, b)
        });
        if stacked.is_empty() {
            return Ok(Outcome::NothingToDo("No overlapping dimensions found in the active view.".into()));
        }

        let retained = purge(session, "Delete overlapping dimensions", &dimensions, &stacked)?;
        Ok(Outcome::Completed(Summary::new(
            "Success",
            format!("Retained {} dimension(s), deleted {}.", retained.len(), stacked.len()),
            stacked.len(),
        )))
    }
}

/// Fill patterns no material and no view override uses.
pub(crate) fn unused_fill_patterns(doc: &Document) -> Vec<ElementId> {
    let mut used: FxHashSet<ElementId> = FxHashSet::default();
    for material in doc.elements_of(Category::Materials) {
        if let ElementKind::Material { surface_pattern, cut_pattern } = &material.kind {
            used.extend(surface_pattern.iter().chain(cut_pattern));
        }
    }
    let overridden: FxHashSet<&str> = doc
        .views()
        .flat_map(|v| v.overridden_elements())
        .filter_map(|(_, o)| match &o.surface_pattern {
            Some(FillPattern::Named(name)) => Some(name.as_str()),
            _ => None,
        })
        .collect();

    let mut unused: Vec<ElementId> = doc
        .elements_of(Category::FillPatterns)
        .filter(|p| !used.contains(&p.id()) && !overridden.contains(p.name()))
        .map(|p| p.id())
        .collect();
    unused.sort();
    unused
}

/// Deletes fill patterns nothing refers to.
pub struct DeleteUnusedFillPatterns;

impl Pushbutton for DeleteUnusedFillPatterns {
    fn id(&self) -> &'static str {
        "delete-unused-fill-patterns"
    }

    fn title(&self) -> &'static str {
        "Delete Unused Fill Patterns"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let unused = unused_fill_patterns(session.doc);
        if unused.is_empty() {
            return Ok(Outcome::NothingToDo("No unused fill patterns found.".into()));
        }

        session.doc.with_transaction("Delete unused fill patterns", |doc| {
            unused.iter().try_for_each(|id| doc.delete(*id).map(|_| ()))
        })?;
        tracing::info!(deleted = unused.len(), "Deleted unused fill patterns");

        Ok(Outcome::Completed(Summary::new(
            "Fill Patterns",
            format!("{} unused fill patterns were deleted.", unused.len()),
            unused.len(),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archforge_model::{OverrideGraphicSettings, ViewType};

    #[test]
    fn patterns_used_by_materials_or_overrides_are_kept() {
        let mut doc = Document::new("t");
        let brick = doc.add_element("Brick", ElementKind::FillPattern).unwrap();
        let hatch = doc.add_element("Hatch", ElementKind::FillPattern).unwrap();
        let dots = doc.add_element("Dots", ElementKind::FillPattern).unwrap();
        let spare = doc.add_element("Spare", ElementKind::FillPattern).unwrap();
        doc.add_element("Masonry", ElementKind::Material { surface_pattern: Some(brick), cut_pattern: None })
            .unwrap();
        doc.add_element("Concrete", ElementKind::Material { surface_pattern: None, cut_pattern: Some(hatch) })
            .unwrap();
        let wall = doc.add_element("W", ElementKind::Wall).unwrap();
        let view = doc.add_view("Plan", ViewType::FloorPlan).unwrap();
        doc.view_mut(view).unwrap().set_element_overrides(
            wall,
            OverrideGraphicSettings::new().with_surface_pattern(FillPattern::Named("Dots".into())),
        );

        assert_eq!(unused_fill_patterns(&doc), vec![spare]);

        doc.view_mut(view).unwrap().clear_element_overrides(wall);
        assert_eq!(unused_fill_patterns(&doc), vec![dots, spare]);
    }
}
