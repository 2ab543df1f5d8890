//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic for a given seed and input sequence:
//! - Fixed timestep only; simulation time is the tick counter
//! - Seeded RNG only
//! - No rendering or platform dependencies beyond abstract commands

pub mod actor;
pub mod entity;
pub mod geom;
pub mod level;
pub mod projectile;
pub mod wall;
pub mod world;

pub use actor::{Actor, ActorPhase, Controls, resolve_controls};
pub use entity::{Body, CollisionPolicy, EntityId, EntityKind, SpawnError};
pub use geom::{GeomError, Segment};
pub use level::{Level, wall_segments};
pub use projectile::Projectile;
pub use wall::Wall;
pub use world::{World, WorldHandle};
