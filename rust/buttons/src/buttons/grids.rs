// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;

use archforge_model::{Category, DatumEnd, Document, ElementId, Line, ViewId};

use super::{Outcome, Pushbutton, Summary};
use crate::error::Result;
use crate::prompt::{GridOrder, GridSide};
use crate::rename::{NamingScheme, Sequence, UniqueRenamer};
use crate::session::Session;

/// Orientation of a grid line in plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    Vertical,
    Horizontal,
    Skewed,
}

pub(crate) fn orientation(curve: &Line, tolerance: f64) -> Orientation {
    let Some(dir) = curve.direction() else {
        return Orientation::Skewed;
    };
    let (dx, dy) = (dir.x.abs(), dir.y.abs());
    if dx < tolerance && dy > 1.0 - tolerance {
        Orientation::Vertical
    } else if dx > 1.0 - tolerance && dy < tolerance {
        Orientation::Horizontal
    } else {
        Orientation::Skewed
    }
}

/// Vertical and horizontal grids of `view`, each sorted in `order`.
fn sorted_grids(doc: &Document, view: ViewId, tolerance: f64, order: GridOrder) -> (Vec<ElementId>, Vec<ElementId>) {
    let mut vertical = Vec::new();
    let mut horizontal = Vec::new();
    for grid in doc.elements_of_in_view(view, Category::Grids) {
        let Some(curve) = grid.kind.curve() else { continue };
        match orientation(curve, tolerance) {
            Orientation::Vertical => vertical.push((curve.start.x, grid.id())),
            Orientation::Horizontal => horizontal.push((curve.start.y, grid.id())),
            Orientation::Skewed => {
                tracing::debug!(grid = %grid.id(), name = grid.name(), "Skipping skewed grid");
            }
        }
    }
    let ascending = |a: &(f64, ElementId), b: &(f64, ElementId)| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal);
    vertical.sort_by(ascending);
    if !order.left_to_right {
        vertical.reverse();
    }
    horizontal.sort_by(ascending);
    if order.top_to_bottom {
        horizontal.reverse();
    }
    (
        vertical.into_iter().map(|(_, id)| id).collect(),
        horizontal.into_iter().map(|(_, id)| id).collect(),
    )
}

/// Renumbers the grids of the active view: vertical grids `1, 2, 3, …`,
/// horizontal grids `A, B, C, …`, with an optional prefix and suffix, in the
/// chosen direction.
pub struct RenameGrids;

impl Pushbutton for RenameGrids {
    fn id(&self) -> &'static str {
        "rename-grids"
    }

    fn title(&self) -> &'static str {
        "Rename Grids"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let Some(affixes) = session.prompt.ask_affixes("Grid prefix and suffix") else {
            return Ok(Outcome::Cancelled);
        };
        let Some(order) = session.prompt.choose_grid_order() else {
            return Ok(Outcome::Cancelled);
        };

        let (vertical, horizontal) = sorted_grids(session.doc, view, session.settings.orientation_tolerance, order);
        if vertical.is_empty() && horizontal.is_empty() {
            return Ok(Outcome::NothingToDo("No grids found in the active view.".into()));
        }

        let renamer = UniqueRenamer::new(session.settings.temp_marker.clone());
        let scheme = NamingScheme::new(affixes.prefix, affixes.suffix);
        let plan = renamer.plan_groups(
            &*session.doc,
            &[(vertical.as_slice(), Sequence::numeric()), (horizontal.as_slice(), Sequence::alphabetic())],
            &scheme,
        )?;

        let count = session
            .doc
            .with_transaction("Rename grids", |doc| renamer.apply(doc, &plan))?;
        tracing::info!(grids = plan.len(), changed = count, %order, "Renumbered grids");

        Ok(Outcome::Completed(Summary::new(
            "Grid Numbering Update",
            format!("{} grids have been renumbered.", plan.len()),
            plan.len(),
        )))
    }
}

/// End of `curve` carrying the bubble on `side` of the view.
///
/// Grids running closer to the X axis have left and right bubbles, the others
/// top and bottom ones. Zero-length grids have neither.
pub(crate) fn bubble_end(curve: &Line, side: GridSide) -> Option<DatumEnd> {
    let dir = curve.direction()?;
    let horizontal = dir.x.abs() > dir.y.abs();
    // Whether the start point is the one on `side`.
    let at_start = match (side, horizontal) {
        (GridSide::Left, true) => dir.x > 0.0,
        (GridSide::Right, true) => dir.x < 0.0,
        (GridSide::Top, false) => dir.y < 0.0,
        (GridSide::Bottom, false) => dir.y > 0.0,
        _ => return None,
    };
    Some(if at_start { DatumEnd::Start } else { DatumEnd::End })
}

/// Shows or hides grid bubbles on chosen sides of the active view.
pub struct ToggleGridBubbles;

impl Pushbutton for ToggleGridBubbles {
    fn id(&self) -> &'static str {
        "toggle-grid-bubbles"
    }

    fn title(&self) -> &'static str {
        "Grid Bubbles Visibility"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let view = session.active_view()?;
        let Some(request) = session.prompt.choose_grid_bubbles() else {
            return Ok(Outcome::Cancelled);
        };
        if request.sides.is_empty() {
            return Ok(Outcome::NothingToDo("Please select at least one side.".into()));
        }

        let grids: Vec<(ElementId, Line)> = session
            .doc
            .elements_of_in_view(view, Category::Grids)
            .filter_map(|g| g.kind.curve().map(|c| (g.id(), *c)))
            .collect();
        if grids.is_empty() {
            return Ok(Outcome::NothingToDo("No grids found in the active view.".into()));
        }

        let changed = session.doc.with_transaction("Toggle grid bubbles", |doc| {
            let mut changed = 0;
            for (id, curve) in &grids {
                let mut touched = false;
                for end in request.sides.iter().filter_map(|side| bubble_end(curve, *side)) {
                    touched |= doc.set_grid_bubble(*id, view, end, request.show)?;
                }
                changed += usize::from(touched);
            }
            Ok::<_, archforge_model::Error>(changed)
        })?;
        let sides: Vec<&str> = request.sides.iter().map(GridSide::as_str).collect();
        tracing::info!(grids = grids.len(), changed, sides = ?sides, show = request.show, "Toggled grid bubbles");

        let verb = if request.show { "shown" } else { "hidden" };
        Ok(Outcome::Completed(Summary::new(
            "Grid Bubbles",
            format!("Bubbles {verb} on the {} side of {changed} grid(s).", sides.join(", ")),
            changed,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_orientation() {
        let tol = 0.01;
        assert_eq!(orientation(&Line::planar(0.0, 0.0, 0.0, 10.0), tol), Orientation::Vertical);
        assert_eq!(orientation(&Line::planar(0.0, 5.0, -8.0, 5.0), tol), Orientation::Horizontal);
        assert_eq!(orientation(&Line::planar(0.0, 0.0, 5.0, 5.0), tol), Orientation::Skewed);
        assert_eq!(orientation(&Line::planar(1.0, 1.0, 1.0, 1.0), tol), Orientation::Skewed);
        // Slightly off-axis still counts.
        assert_eq!(orientation(&Line::planar(0.0, 0.0, 0.05, 10.0), tol), Orientation::Vertical);
    }

    #[test]
    fn bubble_ends_follow_geometry() {
        let up = Line::planar(0.0, 0.0, 0.0, 10.0);
        assert_eq!(bubble_end(&up, GridSide::Top), Some(DatumEnd::End));
        assert_eq!(bubble_end(&up, GridSide::Bottom), Some(DatumEnd::Start));
        assert_eq!(bubble_end(&up, GridSide::Left), None);

        let leftward = Line::planar(10.0, 5.0, 0.0, 5.0);
        assert_eq!(bubble_end(&leftward, GridSide::Left), Some(DatumEnd::End));
        assert_eq!(bubble_end(&leftward, GridSide::Right), Some(DatumEnd::Start));
        assert_eq!(bubble_end(&leftward, GridSide::Top), None);

        assert_eq!(bubble_end(&Line::planar(1.0, 1.0, 1.0, 1.0), GridSide::Top), None);
    }
}
