// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounding-box clash detection.

use archforge_model::{boxes_overlap, BoundingBox, Document, ElementId, ViewId};

/// Subjects whose box in `view` overlaps the box of at least one obstacle.
///
/// Subjects are reported once each, in input order. Elements without a box
/// in the view never clash; ids missing from the document are ignored.
pub fn find_clashes(doc: &Document, view: ViewId, subjects: &[ElementId], obstacles: &[ElementId]) -> Vec<ElementId> {
    let obstacle_boxes: Vec<(ElementId, &BoundingBox)> = obstacles
        .iter()
        .filter_map(|id| {
            let bbox = doc.element(*id)?.bounding_box_in(view)?;
            Some((*id, bbox))
        })
        .collect();

    subjects
        .iter()
        .copied()
        .filter(|id| {
            let subject = doc.element(*id).and_then(|e| e.bounding_box_in(view));
            let hit = obstacle_boxes
                .iter()
                .find(|(other, bbox)| other != id && boxes_overlap(subject, Some(*bbox)));
            if let Some((other, _)) = hit {
                tracing::debug!(element = %id, obstacle = %other, "Clash");
            }
            hit.is_some()
        })
        .collect()
}

/// Elements stacked on an earlier element of `ids` in plan.
///
/// For every pair `i < j` whose boxes in `view` overlap in X and Y (open
/// intervals) and that `compatible` accepts, `j` is reported. Each id is
/// reported once, in input order.
pub fn find_stacked<F>(doc: &Document, view: ViewId, ids: &[ElementId], compatible: F) -> Vec<ElementId>
where
    F: Fn(ElementId, ElementId) -> bool,
{
    let boxes: Vec<Option<&BoundingBox>> = ids
        .iter()
        .map(|id| doc.element(*id).and_then(|e| e.bounding_box_in(view)))
        .collect();

    let mut stacked = vec![false; ids.len()];
    for i in 0..ids.len() {
        let Some(a) = boxes[i] else { continue };
        for j in (i + 1)..ids.len() {
            if stacked[j] {
                continue;
            }
            let Some(b) = boxes[j] else { continue };
            if a.overlaps_plan(b) && compatible(ids[i], ids[j]) {
                tracing::debug!(kept = %ids[i], stacked = %ids[j], "Overlapping annotation");
                stacked[j] = true;
            }
        }
    }
    ids.iter()
        .zip(stacked)
        .filter_map(|(id, s)| s.then_some(*id))
        .collect()
}
