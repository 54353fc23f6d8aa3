// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Applying and reverting per-view graphic overrides.

use archforge_model::{Color, ElementId, FillPattern, OverrideGraphicSettings, View};

/// How flagged elements are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverrideStyle {
    /// Projection lines only.
    Lines(Color),
    /// Projection lines and a solid surface fill in the same color.
    Filled(Color),
}

impl OverrideStyle {
    pub fn settings(&self) -> OverrideGraphicSettings {
        match *self {
            OverrideStyle::Lines(color) => OverrideGraphicSettings::new().with_projection_line_color(color),
            OverrideStyle::Filled(color) => OverrideGraphicSettings::new()
                .with_projection_line_color(color)
                .with_surface_pattern(FillPattern::Solid)
                .with_surface_color(color),
        }
    }
}

/// Sets the override of every element in `ids`, replacing what was there.
///
/// Applying the same style twice leaves the view unchanged.
pub fn apply_override(view: &mut View, ids: &[ElementId], style: OverrideStyle) {
    let settings = style.settings();
    for id in ids {
        view.set_element_overrides(*id, settings.clone());
    }
    tracing::debug!(view = %view.id(), count = ids.len(), ?style, "Applied overrides");
}

/// Resets elements to black projection lines with no surface override.
pub fn revert_overrides(view: &mut View, ids: &[ElementId]) {
    apply_override(view, ids, OverrideStyle::Lines(Color::BLACK));
}

/// Draws `flagged` in `highlight` and every other element of `all` in
/// `default`, the way the checker buttons report results.
pub fn highlight_partition(view: &mut View, all: &[ElementId], flagged: &[ElementId], highlight: Color, default: Color) {
    let (hits, rest): (Vec<ElementId>, Vec<ElementId>) = all.iter().copied().partition(|id| flagged.contains(id));
    apply_override(view, &hits, OverrideStyle::Lines(highlight));
    apply_override(view, &rest, OverrideStyle::Lines(default));
}

#[cfg(test)]
mod tests {
    use super::*;
    use archforge_model::{Document, ViewType};

    fn view() -> (Document, archforge_model::ViewId) {
        let mut doc = Document::new("t");
        let v = doc.add_view("L1", ViewType::FloorPlan).unwrap();
        (doc, v)
    }

    #[test]
    fn apply_is_idempotent() {
        let (mut doc, v) = view();
        let ids = [ElementId(1), ElementId(2)];
        let view = doc.view_mut(v).unwrap();
        apply_override(view, &ids, OverrideStyle::Filled(Color::RED));
        let once = view.clone();
        apply_override(view, &ids, OverrideStyle::Filled(Color::RED));
        assert_eq!(*view, once);
        assert_eq!(view.element_overrides(ElementId(1)).surface_pattern, Some(FillPattern::Solid));
    }

    #[test]
    fn revert_clears_surface_and_sets_black_lines() {
        let (mut doc, v) = view();
        let ids = [ElementId(7)];
        let view = doc.view_mut(v).unwrap();
        apply_override(view, &ids, OverrideStyle::Filled(Color::new(0, 0, 255)));
        revert_overrides(view, &ids);
        let current = view.element_overrides(ElementId(7));
        assert_eq!(current.projection_line_color, Some(Color::BLACK));
        assert_eq!(current.surface_pattern, None);
        assert_eq!(current.surface_color, None);
    }

    #[test]
    fn partition_colors_hits_and_rest() {
        let (mut doc, v) = view();
        let view = doc.view_mut(v).unwrap();
        let all = [ElementId(1), ElementId(2), ElementId(3)];
        highlight_partition(view, &all, &[ElementId(2)], Color::RED, Color::BLACK);
        assert_eq!(view.element_overrides(ElementId(2)).projection_line_color, Some(Color::RED));
        assert_eq!(view.element_overrides(ElementId(1)).projection_line_color, Some(Color::BLACK));
        assert_eq!(view.element_overrides(ElementId(3)).projection_line_color, Some(Color::BLACK));
    }
}
