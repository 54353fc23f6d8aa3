// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;

use archforge_model::{BoundingBox, BuiltInParameter, Category, Document, ElementId, ElementKind};

use super::{Outcome, Pushbutton, Summary};
use crate::case::CaseTransform;
use crate::duplicates::redundant_rooms;
use crate::error::Result;
use crate::prompt::{Answer, Confirmation, Notice};
use crate::rename::letter_suffix;
use crate::session::Session;

/// Deletes rooms placed on top of an identical room, and rooms with zero area.
pub struct DeleteRedundantRooms;

impl Pushbutton for DeleteRedundantRooms {
    fn id(&self) -> &'static str {
        "delete-redundant-rooms"
    }

    fn title(&self) -> &'static str {
        "Delete Redundant Rooms"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let flagged = redundant_rooms(session.doc);
        if flagged.is_empty() {
            return Ok(Outcome::NothingToDo("There are no unclosed or redundant rooms to delete.".into()));
        }

        let listing = flagged
            .iter()
            .filter_map(|r| {
                let room = session.doc.element(r.id)?;
                let area = match room.kind {
                    ElementKind::Room { area, .. } => area,
                    _ => 0.0,
                };
                Some(format!("{} - {} (Area: {})", r.id, room.name(), area))
            })
            .collect::<Vec<_>>()
            .join("\n");
        let question = Confirmation::new("Rooms to be Deleted", format!("The following rooms will be deleted:\n{listing}"));
        if session.confirm(question) != Answer::Yes {
            return Ok(Outcome::Cancelled);
        }

        let ids: Vec<ElementId> = flagged.iter().map(|r| r.id).collect();
        session.doc.with_transaction("Delete unclosed and redundant rooms", |doc| {
            ids.iter().try_for_each(|id| doc.delete(*id).map(|_| ()))
        })?;

        Ok(Outcome::Completed(Summary::new(
            "Success",
            format!("{} unclosed and redundant rooms have been deleted.", ids.len()),
            ids.len(),
        )))
    }
}

/// Current name of a room: the room name parameter, else the element name.
fn room_name(doc: &Document, id: ElementId) -> Option<String> {
    let room = doc.element(id)?;
    Some(
        room.parameters
            .text(BuiltInParameter::RoomName)
            .unwrap_or(room.name())
            .to_string(),
    )
}

/// Changes the letter case of every room name.
pub struct RoomNameCase;

impl Pushbutton for RoomNameCase {
    fn id(&self) -> &'static str {
        "room-name-case"
    }

    fn title(&self) -> &'static str {
        "Room Name Case"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let options = [CaseTransform::Lower, CaseTransform::Upper, CaseTransform::Sentence];
        let Some(case) = session.prompt.choose_case("Room text case", &options) else {
            return Ok(Outcome::Cancelled);
        };

        let rooms: Vec<ElementId> = session.doc.elements_of(Category::Rooms).map(|e| e.id()).collect();
        let changed = session.doc.with_transaction("Change room text", |doc| -> Result<usize> {
            let mut changed = 0;
            for id in &rooms {
                let Some(current) = room_name(doc, *id) else { continue };
                let updated = case.apply(&current);
                if updated == current {
                    continue;
                }
                if doc.get(*id)?.parameters.contains(BuiltInParameter::RoomName) {
                    doc.set_parameter(*id, BuiltInParameter::RoomName, updated)?;
                } else {
                    doc.set_name(*id, updated)?;
                }
                changed += 1;
            }
            Ok(changed)
        })?;

        Ok(Outcome::Completed(Summary::new(
            "Success",
            format!("All room names have been changed to {case} case ({changed} updated)."),
            changed,
        )))
    }
}

/// Level number of a level name: its first run of digits, 0 if none.
pub(crate) fn level_number(name: &str) -> u64 {
    name.split(|c: char| !c.is_ascii_digit())
        .find(|run| !run.is_empty())
        .and_then(|run| run.parse().ok())
        .unwrap_or(0)
}

/// Elements of `category` whose model box intersects `bbox`, in document order.
fn hosted_in(doc: &Document, category: Category, bbox: &BoundingBox) -> Vec<ElementId> {
    doc.elements_of(category)
        .filter(|e| e.bounding_box.as_ref().is_some_and(|b| b.intersects(bbox)))
        .map(|e| e.id())
        .collect()
}

/// Writes `base + A, B, …` into `param` of every element of `category`
/// inside `bbox`. Returns the number of elements written.
fn number_hosted(
    doc: &mut Document,
    category: Category,
    param: BuiltInParameter,
    base: &str,
    bbox: &BoundingBox,
) -> Result<usize> {
    let hosted = hosted_in(doc, category, bbox);
    for (n, id) in hosted.iter().enumerate() {
        doc.set_parameter(*id, param, format!("{}{}", base, letter_suffix(n)))?;
    }
    Ok(hosted.len())
}

/// Numbers rooms per level from left to right and their doors after them.
///
/// Rooms on level `n` are numbered from `n * 100 + 1`; rooms on level 0 (or
/// on levels without a number) from `001`.
pub struct RoomNumberSequence;

impl Pushbutton for RoomNumberSequence {
    fn id(&self) -> &'static str {
        "room-number-sequence"
    }

    fn title(&self) -> &'static str {
        "Room Number Sequence"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let doc = &*session.doc;
        let mut rooms: Vec<(f64, ElementId, u64, Option<BoundingBox>)> = doc
            .elements_of(Category::Rooms)
            .filter_map(|room| match &room.kind {
                ElementKind::Room { location: Some(location), level, .. } => {
                    let number = level
                        .and_then(|l| doc.element(l))
                        .map_or(0, |l| level_number(l.name()));
                    Some((location.x, room.id(), number, room.bounding_box))
                }
                _ => {
                    tracing::debug!(room = %room.id(), "Skipping unplaced room");
                    None
                }
            })
            .collect();
        if rooms.is_empty() {
            return Ok(Outcome::NothingToDo("No placed rooms found.".into()));
        }
        rooms.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));

        let mut skipped = Vec::new();
        let (numbered, doors) = session.doc.with_transaction("Set room numbers", |doc| -> Result<(usize, usize)> {
            // `None` once a level runs past the largest number.
            let mut counters: FxHashMap<u64, Option<u64>> = FxHashMap::default();
            let (mut numbered, mut doors) = (0, 0);
            for (_, id, level, bbox) in &rooms {
                let counter = counters.entry(*level).or_insert_with(|| {
                    if *level == 0 {
                        Some(1)
                    } else {
                        level.checked_mul(100).and_then(|n| n.checked_add(1))
                    }
                });
                let Some(value) = *counter else {
                    skipped.push(*id);
                    continue;
                };
                *counter = value.checked_add(1);
                numbered += 1;

                let number = if *level == 0 { format!("{value:03}") } else { value.to_string() };
                doc.set_parameter(*id, BuiltInParameter::RoomNumber, number)?;

                if let Some(bbox) = bbox {
                    doors += number_hosted(doc, Category::Doors, BuiltInParameter::DoorNumber, &value.to_string(), bbox)?;
                }
            }
            Ok((numbered, doors))
        })?;
        if !skipped.is_empty() {
            tracing::warn!(rooms = ?skipped, "Level number too large to number rooms");
            session.notify(Notice::warning(
                "Room Numbers",
                format!("{} room(s) were skipped: their level number is too large.", skipped.len()),
            ));
        }
        if numbered == 0 {
            return Ok(Outcome::NothingToDo("No rooms could be numbered.".into()));
        }

        Ok(Outcome::Completed(Summary::new(
            "Room Numbers",
            format!("{numbered} rooms and {doors} doors have been numbered."),
            numbered + doors,
        )))
    }
}

/// Rooms with a number and a box, in document order.
fn numbered_rooms(doc: &Document) -> Vec<(String, BoundingBox)> {
    doc.elements_of(Category::Rooms)
        .filter_map(|room| {
            let number = room.parameters.text(BuiltInParameter::RoomNumber).filter(|n| !n.is_empty())?;
            let Some(bbox) = room.bounding_box else {
                tracing::debug!(room = %room.id(), "Skipping room without bounding box");
                return None;
            };
            Some((number.to_string(), bbox))
        })
        .collect()
}

fn suffix_hosted(
    session: &mut Session<'_>,
    category: Category,
    param: BuiltInParameter,
    transaction: &str,
) -> Result<usize> {
    let rooms = numbered_rooms(session.doc);
    let count = session.doc.with_transaction(transaction, |doc| -> Result<usize> {
        let mut count = 0;
        for (number, bbox) in &rooms {
            count += number_hosted(doc, category, param, number, bbox)?;
        }
        Ok(count)
    })?;
    Ok(count)
}

/// Numbers doors after the room they sit in: `101A`, `101B`, … .
pub struct DoorNumberSuffix;

impl Pushbutton for DoorNumberSuffix {
    fn id(&self) -> &'static str {
        "door-number-suffix"
    }

    fn title(&self) -> &'static str {
        "Door Number Suffix"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let count = suffix_hosted(session, Category::Doors, BuiltInParameter::DoorNumber, "Set door numbers")?;
        if count == 0 {
            return Ok(Outcome::NothingToDo("No doors found inside numbered rooms.".into()));
        }
        Ok(Outcome::Completed(Summary::new(
            "Door Numbers",
            format!("{count} door numbers have been set."),
            count,
        )))
    }
}

/// Marks windows after the room they sit in: `101A`, `101B`, … .
pub struct WindowMarkSuffix;

impl Pushbutton for WindowMarkSuffix {
    fn id(&self) -> &'static str {
        "window-mark-suffix"
    }

    fn title(&self) -> &'static str {
        "Window Mark Suffix"
    }

    fn run(&self, session: &mut Session<'_>) -> Result<Outcome> {
        let count = suffix_hosted(session, Category::Windows, BuiltInParameter::Mark, "Set window tags")?;
        if count == 0 {
            return Ok(Outcome::NothingToDo("No windows found inside numbered rooms.".into()));
        }
        Ok(Outcome::Completed(Summary::new(
            "Window Marks",
            format!("{count} window marks have been set."),
            count,
        )))
    }
}
