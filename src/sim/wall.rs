//! Static line-segment walls
//!
//! Walls block ships (which slide along them) and destroy projectiles.
//! They never move and never test against each other.

use glam::Vec2;

use crate::sim::geom::{GeomError, Segment};

/// A static wall along a line segment.
///
/// The stored normal is derived once at construction and never
/// renormalized; its sign is flipped per slide query to face the querying
/// body, and the flip persists for the next query.
#[derive(Debug)]
pub struct Wall {
    seg: Segment,
    normal: Vec2,
}

impl Wall {
    /// Nominal collision radius standing in for line thickness.
    pub const RADIUS: f32 = 0.1;

    pub fn new(a: Vec2, b: Vec2) -> Result<Self, GeomError> {
        let seg = Segment::new(a, b)?;
        let d = b - a;
        let normal = Vec2::new(d.y, d.x).normalize();
        Ok(Self { seg, normal })
    }

    #[inline]
    pub fn segment(&self) -> &Segment {
        &self.seg
    }

    /// Whether a circular body overlaps the wall segment.
    pub fn collides_with_circle(&self, center: Vec2, radius: f32) -> bool {
        let foot = self.seg.project(center, true);
        let radii = Self::RADIUS + radius;
        foot.distance_squared(center) <= radii * radii
    }

    /// Resolve a body's move so it rests against the wall surface instead of
    /// penetrating, preserving lateral motion.
    ///
    /// The clearance is at least the combined radii even if the body was
    /// already inside that distance, and the unclamped projections keep a
    /// body near a wall end from snapping sideways.
    pub fn slide_against(&mut self, prev: Vec2, new: Vec2, body_radius: f32) -> Vec2 {
        let prev_foot = self.seg.project(prev, false);
        let clearance = prev.distance(prev_foot).max(body_radius + Self::RADIUS);

        let new_foot = self.seg.project(new, false);

        // Face the side the body came from; the flip sticks for later calls.
        if self.normal.dot(prev - self.seg.start()) < 0.0 {
            self.normal = -self.normal;
        }

        new_foot + self.normal * clearance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical_wall() -> Wall {
        Wall::new(Vec2::new(5.0, 0.0), Vec2::new(5.0, 10.0)).unwrap()
    }

    #[test]
    fn test_coincident_endpoints_rejected() {
        let p = Vec2::new(1.0, 1.0);
        assert_eq!(Wall::new(p, p).unwrap_err(), GeomError::DegenerateSegment);
    }

    #[test]
    fn test_circle_collision_against_span() {
        let wall = vertical_wall();
        assert!(wall.collides_with_circle(Vec2::new(5.4, 5.0), 0.5));
        assert!(!wall.collides_with_circle(Vec2::new(6.5, 5.0), 0.5));
    }

    #[test]
    fn test_circle_collision_clamps_to_endpoints() {
        let wall = vertical_wall();
        // Just beyond the top endpoint: distance measured to the endpoint,
        // not to the infinite line
        assert!(wall.collides_with_circle(Vec2::new(5.0, 10.4), 0.5));
        assert!(!wall.collides_with_circle(Vec2::new(5.0, 11.0), 0.5));
    }

    #[test]
    fn test_slide_keeps_clearance_and_lateral_position() {
        let mut wall = vertical_wall();
        let resolved = wall.slide_against(Vec2::new(4.9, 5.0), Vec2::new(5.3, 5.0), 0.5);
        // Pushed back to combined radii on the approach side
        assert!((resolved.x - 4.4).abs() < 1e-4, "x = {}", resolved.x);
        assert!((resolved.y - 5.0).abs() < 1e-4, "y = {}", resolved.y);
    }

    #[test]
    fn test_slide_preserves_motion_along_wall() {
        let mut wall = vertical_wall();
        // Moving diagonally into the wall: the y component survives
        let resolved = wall.slide_against(Vec2::new(4.7, 3.0), Vec2::new(5.2, 3.8), 0.5);
        assert!((resolved.x - 4.4).abs() < 1e-4);
        assert!((resolved.y - 3.8).abs() < 1e-4);
    }

    #[test]
    fn test_slide_does_not_pull_distant_body_closer() {
        let mut wall = vertical_wall();
        // Body starts 1.2 units away; clearance keeps that distance
        let resolved = wall.slide_against(Vec2::new(3.8, 5.0), Vec2::new(4.9, 5.0), 0.5);
        assert!((resolved.x - 3.8).abs() < 1e-4);
    }

    #[test]
    fn test_slide_past_wall_end_uses_unclamped_projection() {
        let mut wall = vertical_wall();
        // Beyond the top endpoint the foot extends along the infinite line,
        // so the resolved point keeps its lateral coordinate
        let resolved = wall.slide_against(Vec2::new(4.9, 10.5), Vec2::new(5.3, 10.8), 0.5);
        assert!((resolved.x - 4.4).abs() < 1e-4);
        assert!((resolved.y - 10.8).abs() < 1e-4);
    }

    #[test]
    fn test_normal_flip_persists_across_sides() {
        let mut wall = vertical_wall();

        // Approach from the left: resolved on the left side
        let left = wall.slide_against(Vec2::new(4.9, 5.0), Vec2::new(5.2, 5.0), 0.5);
        assert!(left.x < 5.0);

        // Approach from the right: the normal flips back
        let right = wall.slide_against(Vec2::new(5.1, 5.0), Vec2::new(4.8, 5.0), 0.5);
        assert!((right.x - 5.6).abs() < 1e-4);
    }
}
