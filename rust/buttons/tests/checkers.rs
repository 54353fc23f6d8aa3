// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Clash checks, highlighting and duplicate cleanup run end to end.

mod common;

use archforge_buttons::{
    apply_override, revert_overrides, Answer, OverrideStyle, Outcome, PurgeTarget, ScriptedPrompt,
};
use archforge_model::{
    BoundingBox, BuiltInParameter, Category, Color, Document, ElementBuilder, ElementId, ElementKind, Line,
    Point3, ViewId,
};

use common::{plan_document, run, wall};

fn tag(doc: &mut Document, view: ViewId, category: Category, min: [f64; 3], max: [f64; 3]) -> ElementId {
    doc.add(
        ElementBuilder::new("Tag", ElementKind::Tag { category, tagged: vec![] })
            .in_view(view)
            .view_box(view, BoundingBox::from_coords(min, max)),
    )
    .unwrap()
}

fn line_color(doc: &Document, view: ViewId, id: ElementId) -> Option<Color> {
    doc.view(view).unwrap().element_overrides(id).projection_line_color
}

#[test]
fn clashing_tags_are_red_and_others_black() {
    let (mut doc, view) = plan_document();
    wall(&mut doc, [0.0, 0.0, 0.0], [10.0, 0.2, 3.0]);
    let on_wall = tag(&mut doc, view, Category::DoorTags, [1.0, 0.0, 0.0], [2.0, 1.0, 0.0]);
    let free = tag(&mut doc, view, Category::RoomTags, [4.0, 4.0, 0.0], [5.0, 5.0, 0.0]);

    let mut prompt = ScriptedPrompt::new().answer(Answer::Yes).answer(Answer::No);
    let (outcome, _) = run(&mut doc, &mut prompt, "tag-clash");

    assert_eq!(outcome.summary().map(|s| s.affected), Some(1));
    assert_eq!(line_color(&doc, view, on_wall), Some(Color::RED));
    assert_eq!(line_color(&doc, view, free), Some(Color::BLACK));
    // Proceed question plus the revert offer.
    assert_eq!(prompt.questions().len(), 2);
}

#[test]
fn declining_the_clash_check_changes_nothing() {
    let (mut doc, view) = plan_document();
    wall(&mut doc, [0.0; 3], [10.0, 0.2, 3.0]);
    let on_wall = tag(&mut doc, view, Category::DoorTags, [1.0, 0.0, 0.0], [2.0, 1.0, 0.0]);

    let mut prompt = ScriptedPrompt::new().answer(Answer::No);
    let (outcome, _) = run(&mut doc, &mut prompt, "tag-clash");

    assert_eq!(outcome, Outcome::Cancelled);
    assert_eq!(line_color(&doc, view, on_wall), None);
}

#[test]
fn annotation_clash_can_revert_to_black() {
    let (mut doc, view) = plan_document();
    wall(&mut doc, [0.0; 3], [10.0, 0.2, 3.0]);
    let note = doc
        .add(
            ElementBuilder::new("Note", ElementKind::TextNote)
                .in_view(view)
                .view_box(view, BoundingBox::from_coords([1.0, 0.0, 0.0], [3.0, 0.5, 0.0])),
        )
        .unwrap();

    let mut prompt = ScriptedPrompt::new().answer(Answer::Yes).answer(Answer::Yes);
    let (outcome, _) = run(&mut doc, &mut prompt, "annotation-clash");

    assert!(outcome.summary().unwrap().message.contains("reverted"));
    assert_eq!(line_color(&doc, view, note), Some(Color::BLACK));
}

#[test]
fn override_then_revert_twice_is_stable() {
    let (mut doc, view) = plan_document();
    let ids = [wall(&mut doc, [0.0; 3], [1.0; 3]), wall(&mut doc, [2.0; 3], [3.0; 3])];
    let v = doc.view_mut(view).unwrap();

    apply_override(v, &ids, OverrideStyle::Filled(Color::RED));
    revert_overrides(v, &ids);
    let once = v.clone();
    revert_overrides(v, &ids);

    assert_eq!(*v, once);
    let settings = v.element_overrides(ids[0]);
    assert_eq!(settings.projection_line_color, Some(Color::BLACK));
    assert_eq!(settings.surface_color, None);
}

#[test]
fn untagged_doors_are_selected() {
    let (mut doc, view) = plan_document();
    let tagged = doc.add_element("D1", ElementKind::Door { mirrored: false }).unwrap();
    let untagged = doc.add_element("D2", ElementKind::Door { mirrored: false }).unwrap();
    doc.add(
        ElementBuilder::new("Door Tag", ElementKind::Tag { category: Category::DoorTags, tagged: vec![tagged] })
            .in_view(view),
    )
    .unwrap();

    let mut prompt = ScriptedPrompt::new();
    let (outcome, selection) = run(&mut doc, &mut prompt, "missing-door-tags");

    assert_eq!(outcome.summary().map(|s| s.affected), Some(1));
    assert_eq!(selection, vec![untagged]);
    assert_eq!(line_color(&doc, view, untagged), Some(Color::RED));
    assert_eq!(line_color(&doc, view, tagged), Some(Color::BLACK));
}

#[test]
fn raised_door_sills_are_flagged() {
    let (mut doc, view) = plan_document();
    let flush = doc
        .add(ElementBuilder::new("D1", ElementKind::Door { mirrored: false }).param(BuiltInParameter::SillHeight, 0.0))
        .unwrap();
    let raised = doc
        .add(ElementBuilder::new("D2", ElementKind::Door { mirrored: false }).param(BuiltInParameter::SillHeight, 0.5))
        .unwrap();
    let unknown = doc.add_element("D3", ElementKind::Door { mirrored: false }).unwrap();

    let mut prompt = ScriptedPrompt::new();
    let (outcome, _) = run(&mut doc, &mut prompt, "door-sill-check");

    assert_eq!(outcome.summary().map(|s| s.affected), Some(1));
    assert_eq!(line_color(&doc, view, raised), Some(Color::RED));
    assert_eq!(line_color(&doc, view, flush), Some(Color::BLACK));
    assert_eq!(line_color(&doc, view, unknown), None);
}

#[test]
fn ceilings_are_filled_by_height_band() {
    let (mut doc, view) = plan_document();
    let ceiling = |doc: &mut Document, feet: f64| {
        doc.add(ElementBuilder::new("Ceiling", ElementKind::Ceiling).param(BuiltInParameter::HeightOffsetFromLevel, feet))
            .unwrap()
    };
    let low = ceiling(&mut doc, 3.0);
    let high = ceiling(&mut doc, 20.0);
    let mid = ceiling(&mut doc, 9.0);

    let mut prompt = ScriptedPrompt::new().answer(Answer::Yes).answer(Answer::No);
    run(&mut doc, &mut prompt, "ceiling-heights");

    let surface = |id| doc.view(view).unwrap().element_overrides(id).surface_color;
    assert_eq!(surface(low), Some(Color::WHITE));
    assert_eq!(surface(high), Some(Color::BLACK));
    let settings = archforge_buttons::Settings::default();
    assert_eq!(surface(mid), Some(settings.ceiling_bands.color_for(9.0 * 0.3048)));
}

fn room(doc: &mut Document, name: &str, x: f64, y: f64, area: f64) -> ElementId {
    doc.add_element(
        name,
        ElementKind::Room { location: Some(Point3::new(x, y, 0.0)), area, level: None },
    )
    .unwrap()
}

#[test]
fn stacked_rooms_are_deleted() {
    let mut doc = Document::new("t");
    let first = room(&mut doc, "Office", 0.0, 0.0, 10.0);
    let copy = room(&mut doc, "Office", 0.0, 0.0, 10.0);
    let other = room(&mut doc, "Lobby", 1.0, 1.0, 10.0);
    let unplaced = doc
        .add_element("Storage", ElementKind::Room { location: None, area: 0.0, level: None })
        .unwrap();

    let mut prompt = ScriptedPrompt::new().answer(Answer::Yes);
    let (outcome, _) = run(&mut doc, &mut prompt, "delete-redundant-rooms");

    assert_eq!(outcome.summary().map(|s| s.affected), Some(1));
    assert!(!doc.contains(copy));
    assert!(doc.contains(first) && doc.contains(other) && doc.contains(unplaced));
    assert!(prompt.questions()[0].message.contains("Office"));
}

#[test]
fn zero_area_rooms_are_deleted_too() {
    let mut doc = Document::new("t");
    let empty = room(&mut doc, "Void", 5.0, 5.0, 0.0);
    let kept = room(&mut doc, "Hall", 0.0, 0.0, 12.0);

    let mut prompt = ScriptedPrompt::new().answer(Answer::Yes);
    run(&mut doc, &mut prompt, "delete-redundant-rooms");

    assert!(!doc.contains(empty));
    assert!(doc.contains(kept));
}

#[test]
fn overlapping_text_notes_keep_the_first() {
    let (mut doc, view) = plan_document();
    let note = |doc: &mut Document, min: [f64; 3], max: [f64; 3]| {
        doc.add(
            ElementBuilder::new("Note", ElementKind::TextNote)
                .in_view(view)
                .view_box(view, BoundingBox::from_coords(min, max)),
        )
        .unwrap()
    };
    let first = note(&mut doc, [0.0; 3], [2.0, 1.0, 0.0]);
    let second = note(&mut doc, [0.5, 0.5, 0.0], [2.5, 1.5, 0.0]);
    let apart = note(&mut doc, [5.0, 5.0, 0.0], [6.0, 6.0, 0.0]);

    let mut prompt = ScriptedPrompt::new().targets(vec![PurgeTarget::TextNotes]);
    let (outcome, selection) = run(&mut doc, &mut prompt, "overkill-annotations");

    assert_eq!(outcome.summary().map(|s| s.affected), Some(1));
    assert!(!doc.contains(second));
    assert_eq!(selection, vec![first, apart]);
}

fn text_note(doc: &mut Document, view: ViewId, min: [f64; 3], max: [f64; 3]) -> ElementId {
    doc.add(
        ElementBuilder::new("Note", ElementKind::TextNote)
            .in_view(view)
            .view_box(view, BoundingBox::from_coords(min, max)),
    )
    .unwrap()
}

#[test]
fn repeated_purge_target_is_processed_once() {
    let (mut doc, view) = plan_document();
    let first = text_note(&mut doc, view, [0.0; 3], [2.0, 1.0, 0.0]);
    let stacked = text_note(&mut doc, view, [0.5, 0.5, 0.0], [2.5, 1.5, 0.0]);

    let mut prompt = ScriptedPrompt::new().targets(vec![PurgeTarget::TextNotes, PurgeTarget::TextNotes]);
    let (outcome, selection) = run(&mut doc, &mut prompt, "overkill-annotations");

    assert!(outcome.is_completed(), "{outcome:?}");
    assert_eq!(outcome.summary().map(|s| s.affected), Some(1));
    assert!(!doc.contains(stacked));
    assert_eq!(selection, vec![first]);
}

#[test]
fn several_purge_targets_keep_their_own_first_elements() {
    let (mut doc, view) = plan_document();
    let note = text_note(&mut doc, view, [0.0; 3], [2.0, 1.0, 0.0]);
    let note_copy = text_note(&mut doc, view, [0.2, 0.2, 0.0], [2.2, 1.2, 0.0]);
    // Lies on the notes but is a different kind, so it stays.
    let door_tag = tag(&mut doc, view, Category::DoorTags, [0.5, 0.0, 0.0], [1.5, 1.0, 0.0]);
    let door_tag_copy = tag(&mut doc, view, Category::DoorTags, [0.6, 0.1, 0.0], [1.6, 1.1, 0.0]);
    let lone_tag = tag(&mut doc, view, Category::DoorTags, [8.0, 8.0, 0.0], [9.0, 9.0, 0.0]);
    let room_tag = tag(&mut doc, view, Category::RoomTags, [0.0; 3], [2.0, 1.0, 0.0]);
    let room_tag_copy = tag(&mut doc, view, Category::RoomTags, [0.0; 3], [2.0, 1.0, 0.0]);

    let mut prompt = ScriptedPrompt::new().targets(vec![
        PurgeTarget::TextNotes,
        PurgeTarget::DoorTags,
        PurgeTarget::TextNotes,
    ]);
    let (outcome, selection) = run(&mut doc, &mut prompt, "overkill-annotations");

    assert_eq!(outcome.summary().map(|s| s.affected), Some(2));
    assert!(!doc.contains(note_copy));
    assert!(!doc.contains(door_tag_copy));
    assert_eq!(selection, vec![note, door_tag, lone_tag]);
    // Room tags were not asked for.
    assert!(doc.contains(room_tag) && doc.contains(room_tag_copy));
}

#[test]
fn purge_without_overlaps_changes_nothing() {
    let (mut doc, view) = plan_document();
    text_note(&mut doc, view, [0.0; 3], [1.0, 1.0, 0.0]);
    text_note(&mut doc, view, [5.0, 5.0, 0.0], [6.0, 6.0, 0.0]);
    let committed = doc.history().len();

    let mut prompt = ScriptedPrompt::new().targets(vec![PurgeTarget::TextNotes]);
    let (outcome, selection) = run(&mut doc, &mut prompt, "overkill-annotations");

    assert!(matches!(outcome, Outcome::NothingToDo(_)), "{outcome:?}");
    assert!(selection.is_empty());
    assert_eq!(doc.history().len(), committed);
    assert_eq!(doc.elements_of(Category::TextNotes).count(), 2);
}

#[test]
fn crossing_dimensions_are_both_kept() {
    let (mut doc, view) = plan_document();
    let dimension = |doc: &mut Document, curve: Line, min: [f64; 3], max: [f64; 3]| {
        doc.add(
            ElementBuilder::new("Dim", ElementKind::Dimension { curve })
                .in_view(view)
                .view_box(view, BoundingBox::from_coords(min, max)),
        )
        .unwrap()
    };
    let horizontal = dimension(&mut doc, Line::planar(0.0, 1.0, 4.0, 1.0), [0.0, 0.5, 0.0], [4.0, 1.5, 0.0]);
    let vertical = dimension(&mut doc, Line::planar(2.0, 0.0, 2.0, 4.0), [1.5, 0.0, 0.0], [2.5, 4.0, 0.0]);
    let duplicate = dimension(&mut doc, Line::planar(0.0, 1.0, 4.0, 1.0), [0.0, 0.5, 0.0], [4.0, 1.5, 0.0]);

    let mut prompt = ScriptedPrompt::new();
    run(&mut doc, &mut prompt, "overkill-dimensions");

    assert!(doc.contains(horizontal));
    assert!(doc.contains(vertical));
    assert!(!doc.contains(duplicate));
}

#[test]
fn dimensions_without_overlaps_are_nothing_to_do() {
    let (mut doc, view) = plan_document();
    doc.add(
        ElementBuilder::new("Dim", ElementKind::Dimension { curve: Line::planar(0.0, 1.0, 4.0, 1.0) })
            .in_view(view)
            .view_box(view, BoundingBox::from_coords([0.0, 0.5, 0.0], [4.0, 1.5, 0.0])),
    )
    .unwrap();

    let mut prompt = ScriptedPrompt::new();
    let (outcome, _) = run(&mut doc, &mut prompt, "overkill-dimensions");
    assert_eq!(
        outcome,
        Outcome::NothingToDo("No overlapping dimensions found in the active view.".into())
    );
}
