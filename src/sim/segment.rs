//! Landing line geometry
//!
//! A landing line is a straight segment in world space between two endpoints.
//! Proximity is measured from a point to the closest point on the segment.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A line segment in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Midpoint (snap target and spawn point of a landing strip)
    #[inline]
    pub fn midpoint(&self) -> Vec2 {
        (self.a + self.b) * 0.5
    }

    /// Closest point on the segment to `point`
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let ab = self.b - self.a;
        let len_sq = ab.length_squared();
        if len_sq == 0.0 {
            return self.a;
        }
        let t = ((point - self.a).dot(ab) / len_sq).clamp(0.0, 1.0);
        self.a + ab * t
    }

    /// Distance from `point` to the segment
    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        point.distance(self.closest_point(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_above_middle() {
        let seg = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        assert_eq!(seg.distance_to(Vec2::new(50.0, 2.0)), 2.0);
        assert_eq!(seg.distance_to(Vec2::new(50.0, -4.0)), 4.0);
    }

    #[test]
    fn test_distance_past_endpoint_uses_endpoint() {
        let seg = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0));
        assert_eq!(seg.distance_to(Vec2::new(103.0, 4.0)), 5.0);
        assert_eq!(seg.closest_point(Vec2::new(-10.0, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn test_degenerate_segment_is_point_distance() {
        let p = Vec2::new(7.0, 7.0);
        let seg = Segment::new(p, p);
        assert_eq!(seg.closest_point(Vec2::new(10.0, 11.0)), p);
        let d = seg.distance_to(Vec2::new(10.0, 11.0));
        assert!(d.is_finite());
        assert_eq!(d, 5.0);
        assert_eq!(seg.distance_to(p), 0.0);
    }

    #[test]
    fn test_midpoint() {
        let seg = Segment::new(Vec2::new(380.0, 400.0), Vec2::new(420.0, 400.0));
        assert_eq!(seg.midpoint(), Vec2::new(400.0, 400.0));
    }

    #[test]
    fn test_vertical_segment() {
        let seg = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 10.0));
        assert_eq!(seg.distance_to(Vec2::new(3.0, 5.0)), 3.0);
    }
}
