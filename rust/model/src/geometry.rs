// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Points, lines and axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

/// A point in model space (feet, like the host application).
pub type Point3 = nalgebra::Point3<f64>;

/// A direction or offset in model space.
pub type Vector3 = nalgebra::Vector3<f64>;

/// A straight segment, used for grid and dimension curves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point3,
    pub end: Point3,
}

impl Line {
    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Line in the XY plane at elevation zero.
    pub fn planar(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point3::new(x0, y0, 0.0), Point3::new(x1, y1, 0.0))
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end, or `None` for a degenerate line.
    pub fn direction(&self) -> Option<Vector3> {
        let d = self.end - self.start;
        let len = d.norm();
        if len <= f64::EPSILON || !len.is_finite() {
            None
        } else {
            Some(d / len)
        }
    }
}

/// Axis-aligned bounding box.
///
/// Built through [`BoundingBox::new`], `min` is component-wise less than or
/// equal to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// Creates a box spanning the two corners, in any order.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Creates a box from raw coordinate triples.
    pub fn from_coords(min: [f64; 3], max: [f64; 3]) -> Self {
        Self::new(Point3::from(min), Point3::from(max))
    }

    /// Closed-interval intersection on all three axes.
    ///
    /// Boxes that only touch along a face, edge or corner intersect.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        (0..3).all(|axis| self.min[axis] <= other.max[axis] && self.max[axis] >= other.min[axis])
    }

    /// Open-interval intersection on X and Y only.
    ///
    /// Touching boxes do not overlap in plan. Z is ignored because annotation
    /// extents in a plan view have no meaningful height.
    pub fn overlaps_plan(&self, other: &BoundingBox) -> bool {
        (0..2).all(|axis| self.min[axis] < other.max[axis] && self.max[axis] > other.min[axis])
    }

    pub fn contains_point(&self, p: &Point3) -> bool {
        (0..3).all(|axis| self.min[axis] <= p[axis] && p[axis] <= self.max[axis])
    }

    pub fn center(&self) -> Point3 {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }
}

/// Overlap test tolerant of missing boxes.
///
/// Returns `false` when either box is absent; otherwise the closed-interval
/// test of [`BoundingBox::intersects`].
pub fn boxes_overlap(a: Option<&BoundingBox>, b: Option<&BoundingBox>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.intersects(b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bb(min: [f64; 3], max: [f64; 3]) -> BoundingBox {
        BoundingBox::from_coords(min, max)
    }

    #[test]
    fn overlapping_boxes_intersect() {
        let a = bb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = bb([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]);
        assert!(boxes_overlap(Some(&a), Some(&b)));
    }

    #[test]
    fn disjoint_boxes_do_not_intersect() {
        let a = bb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = bb([3.0, 3.0, 3.0], [5.0, 5.0, 5.0]);
        assert!(!boxes_overlap(Some(&a), Some(&b)));
    }

    #[test]
    fn touching_faces_count_as_overlap() {
        let a = bb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = bb([2.0, 0.0, 0.0], [4.0, 2.0, 2.0]);
        assert!(boxes_overlap(Some(&a), Some(&b)));
        assert!(!a.overlaps_plan(&b));
    }

    #[test]
    fn separated_on_single_axis() {
        let a = bb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        let b = bb([0.0, 0.0, 2.5], [2.0, 2.0, 4.0]);
        assert!(!a.intersects(&b));
        // Plan test ignores Z.
        assert!(a.overlaps_plan(&b));
    }

    #[test]
    fn missing_box_never_overlaps() {
        let a = bb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]);
        assert!(!boxes_overlap(Some(&a), None));
        assert!(!boxes_overlap(None, Some(&a)));
        assert!(!boxes_overlap(None, None));
    }

    #[test]
    fn overlap_is_commutative() {
        let boxes = [
            bb([0.0, 0.0, 0.0], [2.0, 2.0, 2.0]),
            bb([1.0, 1.0, 1.0], [3.0, 3.0, 3.0]),
            bb([3.0, 3.0, 3.0], [5.0, 5.0, 5.0]),
            bb([2.0, 0.0, 0.0], [4.0, 2.0, 2.0]),
            bb([-1.0, -1.0, -1.0], [-0.5, 10.0, 10.0]),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a));
                assert_eq!(a.overlaps_plan(b), b.overlaps_plan(a));
            }
        }
    }

    #[test]
    fn new_normalizes_corners() {
        let b = bb([2.0, 0.0, 5.0], [0.0, 3.0, 1.0]);
        assert_eq!(b.min, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(b.max, Point3::new(2.0, 3.0, 5.0));
        assert_relative_eq!(b.center().x, 1.0);
    }

    #[test]
    fn line_direction() {
        let l = Line::planar(0.0, 0.0, 0.0, 10.0);
        let d = l.direction().unwrap();
        assert_relative_eq!(d.y, 1.0);
        assert_relative_eq!(l.length(), 10.0);
        assert!(Line::planar(1.0, 1.0, 1.0, 1.0).direction().is_none());
    }
}
