// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshots of documents.
//!
//! A snapshot lists views and elements with their integer ids. Loading a
//! snapshot checks that every id reference resolves, so the rest of the crate
//! can rely on references being valid.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::element::{Capabilities, Element, ElementKind};
use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::ids::{ElementId, ViewId};
use crate::view::View;

/// Serializable representation of a full document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_view: Option<ViewId>,
    #[serde(default)]
    pub views: Vec<View>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Document {
    pub fn to_snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            title: self.title.clone(),
            active_view: self.active_view,
            views: self.views.values().cloned().collect(),
            elements: self.elements.values().cloned().collect(),
        }
    }

    /// Builds a document from a snapshot, validating ids and references.
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Result<Document> {
        let mut views = BTreeMap::new();
        let mut view_names = FxHashSet::default();
        for view in snapshot.views {
            if !view_names.insert(view.name.clone()) {
                return Err(Error::DuplicateViewName(view.name));
            }
            let id = view.id;
            if views.insert(id, view).is_some() {
                return Err(Error::Serialization(format!("duplicate view id {}", id)));
            }
        }

        let mut elements = BTreeMap::new();
        for mut element in snapshot.elements {
            normalize_boxes(&mut element);
            let id = element.id;
            if elements.insert(id, element).is_some() {
                return Err(Error::Serialization(format!("duplicate element id {}", id)));
            }
        }

        if let Some(active) = snapshot.active_view {
            if !views.contains_key(&active) {
                return Err(Error::InvalidReference(format!("active view {} does not exist", active)));
            }
        }

        for view in views.values() {
            if let Some(level) = view.level {
                if !elements.contains_key(&level) {
                    return Err(Error::InvalidReference(format!(
                        "level of view {} refers to missing element {}",
                        view.id, level
                    )));
                }
            }
        }
        for element in elements.values() {
            validate_references(element, &elements, &views)?;
        }
        validate_unique_names(&elements)?;

        let next_element = next_id(elements.keys().next_back().map(|id| id.0), "element")?;
        let next_view = next_id(views.keys().next_back().map(|id| id.0), "view")?;

        Ok(Document {
            title: snapshot.title,
            elements,
            views,
            active_view: snapshot.active_view,
            next_element,
            next_view,
            history: Vec::new(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_snapshot())?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_snapshot())?)
    }

    pub fn from_json(json: &str) -> Result<Document> {
        let snapshot: DocumentSnapshot = serde_json::from_str(json)?;
        Self::from_snapshot(snapshot)
    }
}

/// First id after the largest loaded one.
fn next_id(max: Option<u64>, what: &str) -> Result<u64> {
    match max {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| Error::Serialization(format!("{what} id {max} leaves no room for new ids"))),
    }
}

fn normalize_boxes(element: &mut Element) {
    if let Some(b) = element.bounding_box {
        element.bounding_box = Some(BoundingBox::new(b.min, b.max));
    }
    for b in element.view_boxes.values_mut() {
        *b = BoundingBox::new(b.min, b.max);
    }
}

fn validate_references(
    element: &Element,
    elements: &BTreeMap<ElementId, Element>,
    views: &BTreeMap<ViewId, View>,
) -> Result<()> {
    let element_ref = |target: ElementId, what: &str| -> Result<()> {
        if elements.contains_key(&target) {
            Ok(())
        } else {
            Err(Error::InvalidReference(format!(
                "{} of element {} refers to missing element {}",
                what, element.id, target
            )))
        }
    };
    let view_ref = |target: ViewId, what: &str| -> Result<()> {
        if views.contains_key(&target) {
            Ok(())
        } else {
            Err(Error::InvalidReference(format!(
                "{} of element {} refers to missing view {}",
                what, element.id, target
            )))
        }
    };

    if let Some(owner) = element.owner_view {
        view_ref(owner, "owner view")?;
    }
    if let Some(family) = element.family {
        element_ref(family, "family")?;
    }
    for view in element.view_boxes.keys() {
        view_ref(*view, "view box")?;
    }

    match &element.kind {
        ElementKind::Tag { tagged, .. } => {
            for target in tagged {
                element_ref(*target, "tag")?;
            }
        }
        ElementKind::Room { level: Some(level), .. } => element_ref(*level, "room level")?,
        ElementKind::Grid { bubbles, .. } => {
            for view in bubbles.keys() {
                view_ref(*view, "grid bubbles")?;
            }
        }
        ElementKind::Material { surface_pattern, cut_pattern } => {
            for pattern in surface_pattern.iter().chain(cut_pattern) {
                element_ref(*pattern, "material pattern")?;
            }
        }
        ElementKind::Sheet { placed_views, .. } => {
            for view in placed_views {
                view_ref(*view, "sheet")?;
            }
        }
        ElementKind::Viewport { sheet, view } => {
            element_ref(*sheet, "viewport sheet")?;
            view_ref(*view, "viewport")?;
        }
        _ => {}
    }
    Ok(())
}

fn validate_unique_names(elements: &BTreeMap<ElementId, Element>) -> Result<()> {
    let mut seen = FxHashSet::default();
    for element in elements.values() {
        if element.has(Capabilities::UNIQUE_NAME) && !seen.insert((element.category(), element.name.as_str())) {
            return Err(Error::DuplicateName {
                category: element.category(),
                name: element.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementBuilder;
    use crate::element::Category;
    use crate::geometry::{Line, Point3};
    use crate::parameters::BuiltInParameter;
    use crate::view::{Color, OverrideGraphicSettings, ViewType};

    fn sample() -> Document {
        let mut doc = Document::new("Sample");
        let plan = doc.add_view("Level 1", ViewType::FloorPlan).unwrap();
        doc.set_active_view(plan).unwrap();
        let level = doc.add_element("Level 1", ElementKind::Level { elevation: 0.0 }).unwrap();
        doc.add(
            ElementBuilder::new(
                "Office",
                ElementKind::Room { location: Some(Point3::new(1.0, 2.0, 0.0)), area: 12.5, level: Some(level) },
            )
            .param(BuiltInParameter::RoomNumber, "101")
            .bbox([0.0, 0.0, 0.0], [4.0, 4.0, 3.0]),
        )
        .unwrap();
        let door = doc.add_element("Door", ElementKind::Door { mirrored: true }).unwrap();
        doc.add(
            ElementBuilder::new("Door Tag", ElementKind::Tag { category: Category::DoorTags, tagged: vec![door] })
                .in_view(plan),
        )
        .unwrap();
        doc.add_element("A", ElementKind::grid(Line::planar(0.0, 0.0, 10.0, 0.0)))
            .unwrap();
        doc.view_mut(plan)
            .unwrap()
            .set_element_overrides(door, OverrideGraphicSettings::new().with_projection_line_color(Color::RED));
        doc
    }

    #[test]
    fn json_round_trip_preserves_document() {
        let doc = sample();
        let json = doc.to_json().unwrap();
        let back = Document::from_json(&json).unwrap();

        assert_eq!(back.title(), "Sample");
        assert_eq!(back.element_count(), doc.element_count());
        assert_eq!(back.active_view_id(), doc.active_view_id());
        for (a, b) in doc.elements().zip(back.elements()) {
            assert_eq!(a, b);
        }
        for (a, b) in doc.views().zip(back.views()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn ids_continue_after_loaded_maximum() {
        let doc = sample();
        let max = doc.elements().map(|e| e.id()).max().unwrap();
        let mut back = Document::from_json(&doc.to_json().unwrap()).unwrap();
        let id = back.add_element("New", ElementKind::Wall).unwrap();
        assert!(id > max);
    }

    #[test]
    fn dangling_tag_reference_is_rejected() {
        let json = r#"{
            "title": "Broken",
            "elements": [
                { "id": 1, "name": "Tag", "kind": { "type": "tag", "category": "door_tags", "tagged": [42] } }
            ]
        }"#;
        assert!(matches!(Document::from_json(json), Err(Error::InvalidReference(_))));
    }

    #[test]
    fn missing_active_view_is_rejected() {
        let json = r#"{ "title": "Broken", "active_view": 3 }"#;
        assert!(matches!(Document::from_json(json), Err(Error::InvalidReference(_))));
    }

    #[test]
    fn duplicate_grid_names_are_rejected() {
        let json = r#"{
            "title": "Grids",
            "elements": [
                { "id": 1, "name": "1", "kind": { "type": "grid", "curve": { "start": [0,0,0], "end": [0,10,0] } } },
                { "id": 2, "name": "1", "kind": { "type": "grid", "curve": { "start": [5,0,0], "end": [5,10,0] } } }
            ]
        }"#;
        assert!(matches!(Document::from_json(json), Err(Error::DuplicateName { .. })));
    }

    #[test]
    fn view_level_must_exist() {
        let json = r#"{
            "title": "Broken",
            "views": [ { "id": 1, "name": "Level 1", "view_type": "floor_plan", "level": 8 } ]
        }"#;
        assert!(matches!(Document::from_json(json), Err(Error::InvalidReference(_))));
    }

    #[test]
    fn material_patterns_must_exist() {
        let json = r#"{
            "title": "Broken",
            "elements": [
                { "id": 1, "name": "Brick", "kind": { "type": "material", "surface_pattern": 2 } }
            ]
        }"#;
        assert!(matches!(Document::from_json(json), Err(Error::InvalidReference(_))));
    }

    #[test]
    fn largest_possible_id_is_rejected() {
        let json = format!(
            r#"{{ "title": "Full", "elements": [ {{ "id": {}, "name": "W", "kind": {{ "type": "wall" }} }} ] }}"#,
            u64::MAX
        );
        assert!(matches!(Document::from_json(&json), Err(Error::Serialization(_))));

        let json = format!(
            r#"{{ "title": "Full", "views": [ {{ "id": {}, "name": "V", "view_type": "section" }} ] }}"#,
            u64::MAX
        );
        assert!(matches!(Document::from_json(&json), Err(Error::Serialization(_))));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(Document::from_json("{"), Err(Error::Serialization(_))));
    }

    #[test]
    fn loaded_boxes_are_normalized() {
        let json = r#"{
            "title": "Boxes",
            "elements": [
                { "id": 7, "name": "W", "kind": { "type": "wall" },
                  "bounding_box": { "min": [5,5,5], "max": [0,0,0] } }
            ]
        }"#;
        let doc = Document::from_json(json).unwrap();
        let bb = doc.element(ElementId(7)).unwrap().bounding_box.unwrap();
        assert_eq!(bb.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(bb.max, Point3::new(5.0, 5.0, 5.0));
    }
}
