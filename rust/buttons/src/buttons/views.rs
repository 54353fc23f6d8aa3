// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use rustc_hash::FxHashSet;

use archforge_model::{Category, Document, ElementId, ElementKind, ViewId, ViewType};

use super::{Outcome, Pushbutton, Summary};
use crate::error::Result;
use crate::rename::unique_name;
use crate::session::Session;

fn has_floor_plan(doc: &Document, level: ElementId) -> bool {
    doc.views()
        .any(|v| v.view_type == ViewType::FloorPlan && v.level == Some(level))
}

/// Creates a floor plan named after each chosen level.
pub struct CreatePlanViews;

impl Pushbutton for CreatePlanViews {
    fn id(&self) -> &'static str {
        "create-plan-views"
    }

    fn title(&self) -> &'static str {
        "Create Plans"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let levels: Vec<(ElementId, String)> = session
            .doc
            .elements_of(Category::Levels)
            .map(|l| (l.id(), l.name().to_string()))
            .collect();
        if levels.is_empty() {
            return Ok(Outcome::NothingToDo("No levels found in the document.".into()));
        }
        let Some(chosen) = session.prompt.choose_levels(&levels) else {
            return Ok(Outcome::Cancelled);
        };
        if chosen.is_empty() {
            return Ok(Outcome::NothingToDo("Please select one or more levels to proceed.".into()));
        }

        let created = session.doc.with_transaction("Create floor plans", |doc| -> Result<Vec<ViewId>> {
            let mut names: FxHashSet<String> = doc.views().map(|v| v.name().to_string()).collect();
            let mut created = Vec::new();
            for level in &chosen {
                let level_name = match doc.element(*level) {
                    Some(l) if matches!(l.kind, ElementKind::Level { .. }) => l.name().to_string(),
                    _ => {
                        tracing::debug!(%level, "Skipping unknown level");
                        continue;
                    }
                };
                if has_floor_plan(doc, *level) {
                    tracing::debug!(level = %level_name, "Floor plan already exists");
                    continue;
                }
                let name = unique_name(&level_name, &names);
                let view = doc.add_view(name.as_str(), ViewType::FloorPlan)?;
                doc.view_mut(view)?.level = Some(*level);
                tracing::debug!(level = %level_name, view = %name, "Created floor plan");
                names.insert(name);
                created.push(view);
            }
            Ok(created)
        })?;

        if created.is_empty() {
            return Ok(Outcome::NothingToDo("Every selected level already has a floor plan.".into()));
        }
        Ok(Outcome::Completed(Summary::new(
            "Success",
            format!("{} floor plans created successfully!", created.len()),
            created.len(),
        )))
    }
}
