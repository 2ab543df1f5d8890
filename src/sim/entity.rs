//! Simulated bodies
//!
//! [`Body`] carries the state every entity shares (position, rotation,
//! radius, model); [`EntityKind`] is the closed set of behaviors. Collision
//! responses are named by [`CollisionPolicy`] and applied by the world after
//! a query, so entities never hold callbacks into the world.

use std::sync::Arc;

use glam::Vec2;
use thiserror::Error;

use crate::consts::WRAP_UPPER_THRESHOLD;
use crate::render::Model;
use crate::sim::actor::Actor;
use crate::sim::geom::GeomError;
use crate::sim::projectile::Projectile;
use crate::sim::wall::Wall;
use crate::{forward_vector, wrap_rotation};

/// Identifier of a live or pending entity; allocated monotonically.
pub type EntityId = u32;

/// Construction-time rejection of an invalid entity
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpawnError {
    #[error("entity radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error("player slot {0} already has a live ship")]
    SlotOccupied(u8),
    #[error("player slot {0} is out of range")]
    SlotOutOfRange(u8),
    #[error(transparent)]
    Geom(#[from] GeomError),
}

/// What the world does to a mover that hit something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Ships rest against walls, keeping lateral motion
    SlideAlongWall,
    /// Projectiles kill the ship they hit and destroy themselves
    KillOnPlayerHit,
}

/// Behavior-specific state of a body
#[derive(Debug)]
pub enum EntityKind {
    Actor(Actor),
    Projectile(Projectile),
    Wall(Wall),
}

/// One simulated body in the arena
#[derive(Debug)]
pub struct Body {
    pub id: EntityId,
    /// Board position (x right, y down)
    pub pos: Vec2,
    /// Degrees about the z axis, wrapped into (-360, 360)
    pub rotation: f32,
    pub radius: f32,
    pub model: Arc<Model>,
    pub kind: EntityKind,
}

impl Body {
    pub fn new(
        id: EntityId,
        pos: Vec2,
        rotation: f32,
        radius: f32,
        model: Arc<Model>,
        kind: EntityKind,
    ) -> Result<Self, SpawnError> {
        if radius <= 0.0 {
            return Err(SpawnError::InvalidRadius(radius));
        }
        Ok(Self {
            id,
            pos,
            rotation,
            radius,
            model,
            kind,
        })
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        matches!(self.kind, EntityKind::Wall(_))
    }

    #[inline]
    pub fn is_actor(&self) -> bool {
        matches!(self.kind, EntityKind::Actor(_))
    }

    pub fn as_actor(&self) -> Option<&Actor> {
        match &self.kind {
            EntityKind::Actor(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_actor_mut(&mut self) -> Option<&mut Actor> {
        match &mut self.kind {
            EntityKind::Actor(a) => Some(a),
            _ => None,
        }
    }

    /// Collision response applied when this body is the mover.
    pub fn policy(&self) -> Option<CollisionPolicy> {
        match self.kind {
            EntityKind::Actor(_) => Some(CollisionPolicy::SlideAlongWall),
            EntityKind::Projectile(_) => Some(CollisionPolicy::KillOnPlayerHit),
            EntityKind::Wall(_) => None,
        }
    }

    /// Step along the forward vector and wrap onto the board torus.
    ///
    /// Returns the position before the step so the caller can resolve any
    /// resulting collision against it.
    pub fn advance(&mut self, amount: f32, board: Vec2) -> Vec2 {
        let prev = self.pos;
        self.pos += forward_vector(self.rotation) * amount;
        self.pos.x = wrap_axis(self.pos.x, board.x);
        self.pos.y = wrap_axis(self.pos.y, board.y);
        prev
    }

    /// Add a rotation delta, wrapping by floating remainder.
    pub fn rotate(&mut self, delta_degrees: f32) {
        self.rotation = wrap_rotation(self.rotation + delta_degrees);
    }

    /// Rotate to an absolute heading (applied as a delta, then wrapped).
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotate(degrees - self.rotation);
    }
}

/// Toroidal wrap of one coordinate.
///
/// Below 0 the board dimension is added once; above the threshold the value
/// is reduced modulo the board dimension. The upper threshold is the fixed
/// [`WRAP_UPPER_THRESHOLD`], not the board edge.
#[inline]
pub fn wrap_axis(value: f32, board_dim: f32) -> f32 {
    let mut v = value;
    if v < 0.0 {
        v += board_dim;
    }
    if v > WRAP_UPPER_THRESHOLD {
        v %= board_dim;
    }
    v
}
