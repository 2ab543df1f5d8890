//! Segment geometry for wall collision and sliding
//!
//! A [`Segment`] is validated at construction so projection never divides
//! by a near-zero length.

use glam::Vec2;
use thiserror::Error;

/// Shortest representable segment length; anything below is degenerate.
pub const MIN_SEGMENT_LENGTH: f32 = 1e-5;

/// Degenerate geometry rejected at a construction boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeomError {
    #[error("segment endpoints are coincident")]
    DegenerateSegment,
}

/// A validated line segment with non-zero length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    a: Vec2,
    b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Result<Self, GeomError> {
        if a.distance_squared(b) < MIN_SEGMENT_LENGTH * MIN_SEGMENT_LENGTH {
            return Err(GeomError::DegenerateSegment);
        }
        Ok(Self { a, b })
    }

    #[inline]
    pub fn start(&self) -> Vec2 {
        self.a
    }

    #[inline]
    pub fn end(&self) -> Vec2 {
        self.b
    }

    /// Orthogonal projection of `point` onto the segment.
    ///
    /// With `clamp` the result lies between the endpoints (distance and
    /// collision tests); without it the result is the foot on the infinite
    /// line (sliding, so a body near a segment end doesn't snap sideways).
    pub fn project(&self, point: Vec2, clamp: bool) -> Vec2 {
        let ab = self.b - self.a;
        let mut t = (point - self.a).dot(ab) / ab.length_squared();
        if clamp {
            t = t.clamp(0.0, 1.0);
        }
        self.a + ab * t
    }
}
