//! Flat geometry for obstacles and sensor rays
//!
//! Screen space: x grows to the right, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Intersection of segments `p0..p1` and `p2..p3`, endpoints included.
///
/// Parallel and degenerate segments never intersect.
pub fn segment_intersection(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Option<Vec2> {
    let s1 = p1 - p0;
    let s2 = p3 - p2;

    let denom = -s2.x * s1.y + s1.x * s2.y;
    if denom.abs() < f32::EPSILON {
        return None;
    }

    let s = (-s1.y * (p0.x - p2.x) + s1.x * (p0.y - p2.y)) / denom;
    let t = (s2.x * (p0.y - p2.y) - s2.y * (p0.x - p2.x)) / denom;

    if (0.0..=1.0).contains(&s) && (0.0..=1.0).contains(&t) {
        Some(p0 + t * s1)
    } else {
        None
    }
}

/// Euclidean distance
#[inline]
pub fn distance(p: Vec2, q: Vec2) -> f32 {
    let d = q - p;
    (d.x * d.x + d.y * d.y).sqrt()
}

/// A line segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Horizontal segment at height `y` from `x0` to `x1`
    pub fn horizontal(y: f32, x0: f32, x1: f32) -> Self {
        Self::new(Vec2::new(x0, y), Vec2::new(x1, y))
    }

    pub fn intersect(&self, other: &Segment) -> Option<Vec2> {
        segment_intersection(self.start, self.end, other.start, other.end)
    }
}

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn left_edge(&self) -> Segment {
        Segment::new(
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.left(), self.bottom()),
        )
    }

    pub fn top_edge(&self) -> Segment {
        Segment::new(
            Vec2::new(self.left(), self.top()),
            Vec2::new(self.right(), self.top()),
        )
    }

    pub fn bottom_edge(&self) -> Segment {
        Segment::new(
            Vec2::new(self.left(), self.bottom()),
            Vec2::new(self.right(), self.bottom()),
        )
    }

    /// Edges a forward-looking ray can meet first (the trailing edge is never visible)
    pub fn facing_edges(&self) -> [Segment; 3] {
        [self.left_edge(), self.bottom_edge(), self.top_edge()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_unit_square_diagonals_cross_at_center() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
        )
        .expect("diagonals intersect");
        assert!((hit - Vec2::new(0.5, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_parallel_segments_miss() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(0.0, 5.0),
            Vec2::new(10.0, 5.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_collinear_and_degenerate_do_not_panic() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(4.0, 0.0);
        assert!(segment_intersection(a, b, Vec2::new(2.0, 0.0), Vec2::new(6.0, 0.0)).is_none());
        assert!(segment_intersection(a, a, a, a).is_none());
    }

    #[test]
    fn test_touching_endpoints_count() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 1.0),
        );
        assert_eq!(hit, Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn test_short_of_target_misses() {
        let hit = segment_intersection(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.9, 0.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 1.0),
        );
        assert!(hit.is_none());
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
        assert_eq!(distance(Vec2::new(1.0, 1.0), Vec2::new(1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 0.0, 40.0, 110.0);
        assert_eq!(r.right(), 50.0);
        assert_eq!(r.bottom(), 110.0);
        let [left, bottom, top] = r.facing_edges();
        assert_eq!(left.start, Vec2::new(10.0, 0.0));
        assert_eq!(left.end, Vec2::new(10.0, 110.0));
        assert_eq!(bottom.end, Vec2::new(50.0, 110.0));
        assert_eq!(top.end, Vec2::new(50.0, 0.0));
    }

    proptest! {
        #[test]
        fn intersection_is_symmetric(
            ax in -100.0f32..100.0, ay in -100.0f32..100.0,
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            cx in -100.0f32..100.0, cy in -100.0f32..100.0,
            dx in -100.0f32..100.0, dy in -100.0f32..100.0,
        ) {
            let (a, b, c, d) = (Vec2::new(ax, ay), Vec2::new(bx, by), Vec2::new(cx, cy), Vec2::new(dx, dy));
            prop_assume!((b - a).perp_dot(d - c).abs() > 1.0);
            if let (Some(p), Some(q)) = (segment_intersection(a, b, c, d), segment_intersection(c, d, a, b)) {
                prop_assert!((p - q).length() < 1e-2);
            }
        }
    }
}
