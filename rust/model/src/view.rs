// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Views and per-view graphic overrides.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::element::Category;
use crate::ids::{ElementId, ViewId};

/// The kind of projection a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    FloorPlan,
    CeilingPlan,
    AreaPlan,
    StructuralPlan,
    Elevation,
    Section,
    Detail,
    ThreeD,
    Legend,
    Schedule,
    DraftingView,
    SheetView,
    ProjectBrowser,
}

impl ViewType {
    /// View types whose titles appear in the project browser view tree.
    pub fn is_browser_listed(&self) -> bool {
        matches!(
            self,
            ViewType::FloorPlan
                | ViewType::Elevation
                | ViewType::Section
                | ViewType::Detail
                | ViewType::ThreeD
                | ViewType::Legend
                | ViewType::Schedule
                | ViewType::CeilingPlan
        )
    }
}

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Surface fill pattern used by an override.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPattern {
    Solid,
    Named(String),
}

/// Graphic overrides of one element in one view.
///
/// `None` fields leave the element's normal appearance in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideGraphicSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projection_line_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_pattern: Option<FillPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surface_color: Option<Color>,
}

impl OverrideGraphicSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projection_line_color(mut self, color: Color) -> Self {
        self.projection_line_color = Some(color);
        self
    }

    pub fn with_surface_pattern(mut self, pattern: FillPattern) -> Self {
        self.surface_pattern = Some(pattern);
        self
    }

    pub fn with_surface_color(mut self, color: Color) -> Self {
        self.surface_color = Some(color);
        self
    }

    /// True when nothing is overridden.
    pub fn is_empty(&self) -> bool {
        self.projection_line_color.is_none()
            && self.surface_pattern.is_none()
            && self.surface_color.is_none()
    }
}

/// A view of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub(crate) id: ViewId,
    pub(crate) name: String,
    pub view_type: ViewType,
    /// Level associated with plan views.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<ElementId>,
    #[serde(default, skip_serializing_if = "FxHashMap::is_empty")]
    overrides: FxHashMap<ElementId, OverrideGraphicSettings>,
    #[serde(default, skip_serializing_if = "FxHashSet::is_empty")]
    hidden_categories: FxHashSet<Category>,
}

impl View {
    pub(crate) fn new(id: ViewId, name: String, view_type: ViewType) -> Self {
        Self {
            id,
            name,
            view_type,
            level: None,
            overrides: FxHashMap::default(),
            hidden_categories: FxHashSet::default(),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current overrides of an element; default settings if none were set.
    pub fn element_overrides(&self, element: ElementId) -> OverrideGraphicSettings {
        self.overrides.get(&element).cloned().unwrap_or_default()
    }

    /// Replaces the overrides of an element.
    ///
    /// Settings are never merged with the previous ones, so setting the same
    /// value twice leaves the same state.
    pub fn set_element_overrides(&mut self, element: ElementId, settings: OverrideGraphicSettings) {
        if settings.is_empty() {
            self.overrides.remove(&element);
        } else {
            self.overrides.insert(element, settings);
        }
    }

    pub fn clear_element_overrides(&mut self, element: ElementId) {
        self.overrides.remove(&element);
    }

    /// Elements that currently carry overrides in this view.
    pub fn overridden_elements(&self) -> impl Iterator<Item = (ElementId, &OverrideGraphicSettings)> {
        self.overrides.iter().map(|(id, s)| (*id, s))
    }

    pub fn is_category_hidden(&self, category: Category) -> bool {
        self.hidden_categories.contains(&category)
    }

    pub fn set_category_hidden(&mut self, category: Category, hidden: bool) {
        if hidden {
            self.hidden_categories.insert(category);
        } else {
            self.hidden_categories.remove(&category);
        }
    }

    /// Flips the hidden state of a category, returning the new state.
    pub fn toggle_category(&mut self, category: Category) -> bool {
        let hidden = !self.is_category_hidden(category);
        self.set_category_hidden(category, hidden);
        hidden
    }
}
