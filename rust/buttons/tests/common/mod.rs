// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared fixtures for the pushbutton integration tests.

#![allow(dead_code)]

use archforge_buttons::{find, launch, Outcome, ScriptedPrompt, Session, Settings};
use archforge_model::{Document, ElementBuilder, ElementId, ElementKind, Line, ViewId, ViewType};

/// A document with an active floor plan.
pub fn plan_document() -> (Document, ViewId) {
    let mut doc = Document::new("Fixture");
    let view = doc.add_view("Level 1", ViewType::FloorPlan).unwrap();
    doc.set_active_view(view).unwrap();
    (doc, view)
}

/// Runs the button with `id` through `launch`, returning the outcome and the
/// selection it left behind.
pub fn run(doc: &mut Document, prompt: &mut ScriptedPrompt, id: &str) -> (Outcome, Vec<ElementId>) {
    let settings = Settings::default();
    let button = find(id).unwrap_or_else(|| panic!("unknown button {id}"));
    let mut session = Session::new(doc, prompt, &settings);
    let outcome = launch(button.as_ref(), &mut session);
    (outcome, session.selection)
}

pub fn grid(doc: &mut Document, name: &str, curve: Line) -> ElementId {
    doc.add_element(name, ElementKind::grid(curve)).unwrap()
}

pub fn wall(doc: &mut Document, min: [f64; 3], max: [f64; 3]) -> ElementId {
    doc.add(ElementBuilder::new("Wall", ElementKind::Wall).bbox(min, max)).unwrap()
}

pub fn name(doc: &Document, id: ElementId) -> &str {
    doc.element(id).unwrap().name()
}
