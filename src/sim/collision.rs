//! Axis-aligned bounding boxes and the overlap test
//!
//! Overlap uses strict inequalities on every axis, so boxes that only share an
//! edge or a corner do not collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::Dimensions;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box anchored at `pos` (top-left) with the given footprint
    #[inline]
    pub fn from_rect(pos: Vec2, dims: Dimensions) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::new(dims.width, dims.height),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// True if the interiors of `a` and `b` intersect
#[inline]
pub fn overlaps(a: &Aabb, b: &Aabb) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::from_rect(Vec2::new(x, y), Dimensions::new(w, h))
    }

    #[test]
    fn test_overlap_partial() {
        let a = rect(0.0, 0.0, 20.0, 20.0);
        let b = rect(10.0, 10.0, 20.0, 20.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_corner_touch_is_not_overlap() {
        let a = rect(0.0, 0.0, 20.0, 20.0);
        let b = rect(20.0, 20.0, 20.0, 20.0);
        assert!(!overlaps(&a, &b));
    }

    #[test]
    fn test_edge_touch_is_not_overlap() {
        let a = rect(0.0, 0.0, 20.0, 20.0);
        let right = rect(20.0, 5.0, 20.0, 20.0);
        let below = rect(5.0, 20.0, 20.0, 20.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&a, &below));
    }

    #[test]
    fn test_containment_is_overlap() {
        let outer = rect(-50.0, -50.0, 100.0, 100.0);
        let inner = rect(-1.0, -1.0, 2.0, 2.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = rect(0.0, 0.0, 20.0, 20.0);
        let b = rect(5.0, 40.0, 20.0, 20.0);
        assert!(!overlaps(&a, &b));
    }

    fn arb_aabb() -> impl Strategy<Value = Aabb> {
        (-500.0f32..500.0, -500.0f32..500.0, 0.5f32..100.0, 0.5f32..100.0)
            .prop_map(|(x, y, w, h)| rect(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_overlap_is_symmetric(a in arb_aabb(), b in arb_aabb()) {
            prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }

        #[test]
        fn prop_box_overlaps_itself(a in arb_aabb()) {
            prop_assert!(overlaps(&a, &a));
        }
    }
}
