// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The document: owner of all elements and views.
//!
//! [`Document`] plays the role of the host application's model. Elements and
//! views are stored in ordered maps keyed by their ids, so every query
//! iterates in creation order and results are deterministic. Mutations are
//! plain `&mut self` methods; grouping them atomically is the job of
//! [`Document::transaction`].

use std::collections::BTreeMap;

use crate::element::{Capabilities, Category, DatumEnd, Element, ElementKind};
use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::ids::{ElementId, ViewId};
use crate::parameters::{BuiltInParameter, ParamValue, Parameters};
use crate::view::{View, ViewType};

/// An open BIM document.
///
/// # Example
///
/// ```
/// use archforge_model::{Document, ElementBuilder, ElementKind, Line, ViewType};
///
/// let mut doc = Document::new("Project");
/// let plan = doc.add_view("Level 1", ViewType::FloorPlan).unwrap();
/// doc.set_active_view(plan).unwrap();
///
/// let grid = doc
///     .add(ElementBuilder::new("1", ElementKind::grid(Line::planar(0.0, 0.0, 0.0, 10.0))))
///     .unwrap();
///
/// assert_eq!(doc.element(grid).unwrap().name(), "1");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    pub(crate) title: String,
    pub(crate) elements: BTreeMap<ElementId, Element>,
    pub(crate) views: BTreeMap<ViewId, View>,
    pub(crate) active_view: Option<ViewId>,
    pub(crate) next_element: u64,
    pub(crate) next_view: u64,
    pub(crate) history: Vec<String>,
}

impl Document {
    /// Creates a new, empty document.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: BTreeMap::new(),
            views: BTreeMap::new(),
            active_view: None,
            next_element: 1,
            next_view: 1,
            history: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Names of committed transactions, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    // --- Views ---

    /// Adds a view. View names are unique across the document.
    pub fn add_view(&mut self, name: impl Into<String>, view_type: ViewType) -> Result<ViewId> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if self.is_view_name_taken(&name, None) {
            return Err(Error::DuplicateViewName(name));
        }
        let id = ViewId(self.next_view);
        self.next_view += 1;
        self.views.insert(id, View::new(id, name, view_type));
        Ok(id)
    }

    pub fn view(&self, id: ViewId) -> Option<&View> {
        self.views.get(&id)
    }

    pub fn view_mut(&mut self, id: ViewId) -> Result<&mut View> {
        self.views.get_mut(&id).ok_or(Error::ViewNotFound(id))
    }

    pub fn views(&self) -> impl Iterator<Item = &View> {
        self.views.values()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn set_active_view(&mut self, id: ViewId) -> Result<()> {
        if !self.views.contains_key(&id) {
            return Err(Error::ViewNotFound(id));
        }
        self.active_view = Some(id);
        Ok(())
    }

    pub fn active_view_id(&self) -> Option<ViewId> {
        self.active_view
    }

    pub fn active_view(&self) -> Option<&View> {
        self.active_view.and_then(|id| self.views.get(&id))
    }

    /// Renames a view, rejecting names used by another view.
    pub fn rename_view(&mut self, id: ViewId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        if !self.views.contains_key(&id) {
            return Err(Error::ViewNotFound(id));
        }
        if self.is_view_name_taken(&name, Some(id)) {
            return Err(Error::DuplicateViewName(name));
        }
        if let Some(view) = self.views.get_mut(&id) {
            view.name = name;
        }
        Ok(())
    }

    pub fn is_view_name_taken(&self, name: &str, except: Option<ViewId>) -> bool {
        self.views
            .values()
            .any(|v| v.name == name && Some(v.id) != except)
    }

    // --- Elements ---

    /// Adds an element described by a builder.
    pub fn add(&mut self, builder: ElementBuilder) -> Result<ElementId> {
        let ElementBuilder {
            name,
            kind,
            pinned,
            owner_view,
            family,
            bounding_box,
            view_boxes,
            parameters,
        } = builder;

        if kind.capabilities().contains(Capabilities::UNIQUE_NAME)
            && self.is_name_taken(kind.category(), &name, None)
        {
            return Err(Error::DuplicateName {
                category: kind.category(),
                name,
            });
        }
        if let Some(view) = owner_view {
            if !self.views.contains_key(&view) {
                return Err(Error::ViewNotFound(view));
            }
        }

        let id = ElementId(self.next_element);
        self.next_element += 1;

        let mut element = Element::new(id, name, kind);
        element.pinned = pinned;
        element.owner_view = owner_view;
        element.family = family;
        element.bounding_box = bounding_box;
        element.view_boxes.extend(view_boxes);
        element.parameters = parameters;

        self.elements.insert(id, element);
        Ok(id)
    }

    /// Adds an element with only a name and kind.
    pub fn add_element(&mut self, name: impl Into<String>, kind: ElementKind) -> Result<ElementId> {
        self.add(ElementBuilder::new(name, kind))
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Like [`Document::element`], but a missing element is an error.
    pub fn get(&self, id: ElementId) -> Result<&Element> {
        self.elements.get(&id).ok_or(Error::ElementNotFound(id))
    }

    pub fn element_mut(&mut self, id: ElementId) -> Result<&mut Element> {
        self.elements.get_mut(&id).ok_or(Error::ElementNotFound(id))
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// All elements, in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// All elements of a category, in creation order.
    pub fn elements_of(&self, category: Category) -> impl Iterator<Item = &Element> {
        self.elements
            .values()
            .filter(move |e| e.category() == category)
    }

    /// Elements visible in a view: model elements plus the view's own
    /// annotations, minus categories hidden in that view.
    pub fn elements_in_view(&self, view: ViewId) -> impl Iterator<Item = &Element> {
        let hidden = self.views.get(&view);
        self.elements.values().filter(move |e| {
            e.is_visible_in(view) && hidden.map_or(true, |v| !v.is_category_hidden(e.category()))
        })
    }

    /// Elements of one category visible in a view.
    pub fn elements_of_in_view(&self, view: ViewId, category: Category) -> impl Iterator<Item = &Element> {
        self.elements_in_view(view)
            .filter(move |e| e.category() == category)
    }

    /// True if an element of `category` other than `except` is named `name`.
    pub fn is_name_taken(&self, category: Category, name: &str, except: Option<ElementId>) -> bool {
        self.elements
            .values()
            .any(|e| e.category() == category && e.name == name && Some(e.id) != except)
    }

    /// Renames an element.
    ///
    /// Kinds with [`Capabilities::UNIQUE_NAME`] reject a name already used by
    /// another element of the same category.
    pub fn set_name(&mut self, id: ElementId, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName);
        }
        let element = self.get(id)?;
        let category = element.category();
        if element.has(Capabilities::UNIQUE_NAME) && self.is_name_taken(category, &name, Some(id)) {
            return Err(Error::DuplicateName { category, name });
        }
        self.element_mut(id)?.name = name;
        Ok(())
    }

    /// Sets a parameter value, returning the previous one.
    pub fn set_parameter(
        &mut self,
        id: ElementId,
        param: BuiltInParameter,
        value: impl Into<ParamValue>,
    ) -> Result<Option<ParamValue>> {
        Ok(self.element_mut(id)?.parameters.set(param, value))
    }

    pub fn set_pinned(&mut self, id: ElementId, pinned: bool) -> Result<()> {
        let element = self.element_mut(id)?;
        if !element.has(Capabilities::PINNABLE) {
            return Err(Error::Unsupported { id, operation: "pinning" });
        }
        element.pinned = pinned;
        Ok(())
    }

    /// Shows or hides the bubble at one end of a grid in `view`.
    ///
    /// Returns `false` when the bubble already had the requested visibility.
    pub fn set_grid_bubble(&mut self, id: ElementId, view: ViewId, end: DatumEnd, visible: bool) -> Result<bool> {
        if !self.views.contains_key(&view) {
            return Err(Error::ViewNotFound(view));
        }
        let ElementKind::Grid { bubbles, .. } = &mut self.element_mut(id)?.kind else {
            return Err(Error::Unsupported { id, operation: "grid bubbles" });
        };
        let mut state = bubbles.get(&view).copied().unwrap_or_default();
        if state.is_visible(end) == visible {
            return Ok(false);
        }
        state.set(end, visible);
        if state == Default::default() {
            bubbles.remove(&view);
        } else {
            bubbles.insert(view, state);
        }
        Ok(true)
    }

    /// Deletes an element.
    ///
    /// Overrides on the element are dropped from every view. Tags and
    /// materials stop referring to it.
    pub fn delete(&mut self, id: ElementId) -> Result<Element> {
        let removed = self.elements.remove(&id).ok_or(Error::ElementNotFound(id))?;
        for view in self.views.values_mut() {
            view.clear_element_overrides(id);
        }
        for element in self.elements.values_mut() {
            match &mut element.kind {
                ElementKind::Tag { tagged, .. } => tagged.retain(|t| *t != id),
                ElementKind::Material { surface_pattern, cut_pattern } => {
                    for pattern in [surface_pattern, cut_pattern] {
                        if *pattern == Some(id) {
                            *pattern = None;
                        }
                    }
                }
                _ => {}
            }
        }
        tracing::debug!(element = %id, category = %removed.category(), "Deleted element");
        Ok(removed)
    }
}

/// Fluent description of an element to add to a [`Document`].
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    name: String,
    kind: ElementKind,
    pinned: bool,
    owner_view: Option<ViewId>,
    family: Option<ElementId>,
    bounding_box: Option<BoundingBox>,
    view_boxes: Vec<(ViewId, BoundingBox)>,
    parameters: Parameters,
}

impl ElementBuilder {
    pub fn new(name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            name: name.into(),
            kind,
            pinned: false,
            owner_view: None,
            family: None,
            bounding_box: None,
            view_boxes: Vec::new(),
            parameters: Parameters::default(),
        }
    }

    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    /// Makes the element view-specific.
    pub fn in_view(mut self, view: ViewId) -> Self {
        self.owner_view = Some(view);
        self
    }

    pub fn family(mut self, family: ElementId) -> Self {
        self.family = Some(family);
        self
    }

    pub fn bounding_box(mut self, bbox: BoundingBox) -> Self {
        self.bounding_box = Some(bbox);
        self
    }

    /// Shorthand for a box built from two coordinate triples.
    pub fn bbox(self, min: [f64; 3], max: [f64; 3]) -> Self {
        self.bounding_box(BoundingBox::from_coords(min, max))
    }

    pub fn view_box(mut self, view: ViewId, bbox: BoundingBox) -> Self {
        self.view_boxes.push((view, bbox));
        self
    }

    pub fn param(mut self, param: BuiltInParameter, value: impl Into<ParamValue>) -> Self {
        self.parameters.set(param, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Line;

    fn grid(name: &str, x: f64) -> ElementBuilder {
        ElementBuilder::new(name, ElementKind::grid(Line::planar(x, 0.0, x, 10.0)))
    }

    #[test]
    fn ids_are_allocated_in_order() {
        let mut doc = Document::new("t");
        let a = doc.add_element("A", ElementKind::Wall).unwrap();
        let b = doc.add_element("B", ElementKind::Wall).unwrap();
        assert!(a < b);
        let names: Vec<_> = doc.elements().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut doc = Document::new("t");
        let a = doc.add_element("A", ElementKind::Wall).unwrap();
        doc.delete(a).unwrap();
        let b = doc.add_element("B", ElementKind::Wall).unwrap();
        assert_ne!(a, b);
        assert!(doc.element(a).is_none());
    }

    #[test]
    fn unique_name_categories_reject_duplicates() {
        let mut doc = Document::new("t");
        let g1 = doc.add(grid("1", 0.0)).unwrap();
        let g2 = doc.add(grid("2", 5.0)).unwrap();
        assert!(matches!(doc.add(grid("1", 9.0)), Err(Error::DuplicateName { .. })));
        assert!(matches!(doc.set_name(g2, "1"), Err(Error::DuplicateName { .. })));
        // Renaming to its own name is fine.
        doc.set_name(g1, "1").unwrap();
        // Walls do not require unique names.
        doc.add_element("Basic Wall", ElementKind::Wall).unwrap();
        doc.add_element("Basic Wall", ElementKind::Wall).unwrap();
    }

    #[test]
    fn empty_names_are_rejected() {
        let mut doc = Document::new("t");
        let w = doc.add_element("W", ElementKind::Wall).unwrap();
        assert!(matches!(doc.set_name(w, ""), Err(Error::EmptyName)));
    }

    #[test]
    fn view_queries_respect_owner_and_hidden_categories() {
        let mut doc = Document::new("t");
        let v1 = doc.add_view("L1", ViewType::FloorPlan).unwrap();
        let v2 = doc.add_view("L2", ViewType::FloorPlan).unwrap();
        doc.add_element("Wall", ElementKind::Wall).unwrap();
        doc.add(ElementBuilder::new("Note", ElementKind::TextNote).in_view(v1)).unwrap();

        assert_eq!(doc.elements_in_view(v1).count(), 2);
        assert_eq!(doc.elements_in_view(v2).count(), 1);

        doc.view_mut(v1).unwrap().set_category_hidden(Category::Walls, true);
        assert_eq!(doc.elements_of_in_view(v1, Category::Walls).count(), 0);
        assert_eq!(doc.elements_of(Category::Walls).count(), 1);
    }

    #[test]
    fn view_names_are_unique() {
        let mut doc = Document::new("t");
        let v1 = doc.add_view("A", ViewType::Section).unwrap();
        doc.add_view("B", ViewType::Section).unwrap();
        assert!(matches!(doc.add_view("A", ViewType::Detail), Err(Error::DuplicateViewName(_))));
        assert!(matches!(doc.rename_view(v1, "B"), Err(Error::DuplicateViewName(_))));
        doc.rename_view(v1, "C").unwrap();
        assert_eq!(doc.view(v1).unwrap().name(), "C");
    }

    #[test]
    fn delete_cleans_overrides_and_tag_references() {
        use crate::view::{Color, OverrideGraphicSettings};

        let mut doc = Document::new("t");
        let v = doc.add_view("L1", ViewType::FloorPlan).unwrap();
        let door = doc.add_element("D", ElementKind::Door { mirrored: false }).unwrap();
        let tag = doc
            .add(
                ElementBuilder::new("Tag", ElementKind::Tag { category: Category::DoorTags, tagged: vec![door] })
                    .in_view(v),
            )
            .unwrap();
        doc.view_mut(v)
            .unwrap()
            .set_element_overrides(door, OverrideGraphicSettings::new().with_projection_line_color(Color::RED));

        doc.delete(door).unwrap();

        assert!(doc.view(v).unwrap().element_overrides(door).is_empty());
        match &doc.element(tag).unwrap().kind {
            ElementKind::Tag { tagged, .. } => assert!(tagged.is_empty()),
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn pinning_requires_capability() {
        let mut doc = Document::new("t");
        let link = doc.add_element("Structure.rvt", ElementKind::RevitLink).unwrap();
        let room = doc
            .add_element("Office", ElementKind::Room { location: None, area: 0.0, level: None })
            .unwrap();
        doc.set_pinned(link, true).unwrap();
        assert!(doc.element(link).unwrap().pinned);
        assert!(matches!(doc.set_pinned(room, true), Err(Error::Unsupported { .. })));
    }

    #[test]
    fn grid_bubbles_are_set_per_view() {
        let mut doc = Document::new("t");
        let v1 = doc.add_view("L1", ViewType::FloorPlan).unwrap();
        let v2 = doc.add_view("L2", ViewType::FloorPlan).unwrap();
        let g = doc.add(grid("1", 0.0)).unwrap();
        let wall = doc.add_element("W", ElementKind::Wall).unwrap();

        assert!(doc.set_grid_bubble(g, v1, DatumEnd::Start, false).unwrap());
        assert!(!doc.set_grid_bubble(g, v1, DatumEnd::Start, false).unwrap());
        let kind = &doc.element(g).unwrap().kind;
        assert!(!kind.grid_bubbles(v1).unwrap().is_visible(DatumEnd::Start));
        assert!(kind.grid_bubbles(v2).unwrap().is_visible(DatumEnd::Start));

        // Showing it again drops the per-view entry.
        assert!(doc.set_grid_bubble(g, v1, DatumEnd::Start, true).unwrap());
        match &doc.element(g).unwrap().kind {
            ElementKind::Grid { bubbles, .. } => assert!(bubbles.is_empty()),
            other => panic!("unexpected kind {other:?}"),
        }

        assert!(matches!(doc.set_grid_bubble(wall, v1, DatumEnd::End, false), Err(Error::Unsupported { .. })));
        assert!(matches!(doc.set_grid_bubble(g, ViewId(99), DatumEnd::End, false), Err(Error::ViewNotFound(_))));
    }

    #[test]
    fn deleting_a_pattern_clears_material_references() {
        let mut doc = Document::new("t");
        let hatch = doc.add_element("Diagonal Up", ElementKind::FillPattern).unwrap();
        let brick = doc
            .add_element("Brick", ElementKind::Material { surface_pattern: Some(hatch), cut_pattern: Some(hatch) })
            .unwrap();

        doc.delete(hatch).unwrap();

        assert_eq!(
            doc.element(brick).unwrap().kind,
            ElementKind::Material { surface_pattern: None, cut_pattern: None }
        );
    }
}
