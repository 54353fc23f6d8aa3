// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Detection of redundant entities.
//!
//! Two entities are duplicates when their location and measure are exactly
//! equal. Keys use the raw bit patterns of the coordinates, so values that
//! differ in the last bit are distinct.

use rustc_hash::FxHashMap;

use archforge_model::{Category, Document, ElementId, ElementKind, Point3};

/// Exact composite key of a location and a measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Key([u64; 4]);

impl Key {
    fn new(point: &Point3, measure: f64) -> Self {
        Key([bits(point.x), bits(point.y), bits(point.z), bits(measure)])
    }
}

fn bits(value: f64) -> u64 {
    // -0.0 and 0.0 compare equal and must share a key.
    if value == 0.0 {
        0.0f64.to_bits()
    } else {
        value.to_bits()
    }
}

/// A flagged entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Redundant<K> {
    pub id: K,
    /// First-seen entity with the same key, when this one is a duplicate.
    pub duplicate_of: Option<K>,
    /// The measure is exactly zero.
    pub zero_measure: bool,
}

/// Flags duplicates and zero-measure entities in a single scan.
///
/// The first entity seen for a key is kept; later ones are flagged as
/// duplicates of it. Entities with a zero measure are always flagged, and
/// still become the holder of their key. Results follow input order.
///
/// # Example
///
/// ```
/// use archforge_buttons::duplicates::find_redundant;
/// use archforge_model::Point3;
///
/// let rooms = vec![
///     ("a", Point3::new(0.0, 0.0, 0.0), 10.0),
///     ("b", Point3::new(0.0, 0.0, 0.0), 10.0),
///     ("c", Point3::new(1.0, 1.0, 0.0), 10.0),
/// ];
/// let flagged = find_redundant(rooms);
/// assert_eq!(flagged.len(), 1);
/// assert_eq!(flagged[0].id, "b");
/// assert_eq!(flagged[0].duplicate_of, Some("a"));
/// ```
pub fn find_redundant<K, I>(items: I) -> Vec<Redundant<K>>
where
    K: Copy,
    I: IntoIterator<Item = (K, Point3, f64)>,
{
    let mut seen: FxHashMap<Key, K> = FxHashMap::default();
    let mut flagged = Vec::new();

    for (id, point, measure) in items {
        let key = Key::new(&point, measure);
        let duplicate_of = match seen.get(&key) {
            Some(first) => Some(*first),
            None => {
                seen.insert(key, id);
                None
            }
        };
        let zero_measure = measure == 0.0;
        if duplicate_of.is_some() || zero_measure {
            flagged.push(Redundant { id, duplicate_of, zero_measure });
        }
    }
    flagged
}

/// Redundant rooms of a document.
///
/// Unplaced rooms have no location and are skipped.
pub fn redundant_rooms(doc: &Document) -> Vec<Redundant<ElementId>> {
    let rooms = doc.elements_of(Category::Rooms).filter_map(|e| match &e.kind {
        ElementKind::Room { location: Some(location), area, .. } => Some((e.id(), *location, *area)),
        _ => {
            tracing::debug!(room = %e.id(), "Skipping unplaced room");
            None
        }
    });
    find_redundant(rooms)
}
