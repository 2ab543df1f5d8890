//! Torus Arena - simulation core for a toroidal multiplayer arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, world tick)
//! - `input`: Shared control-input snapshot between input and sim threads
//! - `render`: Abstract render commands consumed by an external drawing pass
//! - `tuning`: Data-driven game balance
//!
//! The crate owns no windowing, graphics API, or device binding; a platform
//! layer calls [`sim::World::tick`] once per frame and draws the commands in
//! [`sim::World::frame`].

pub mod input;
pub mod render;
pub mod sim;
pub mod tuning;

pub use input::InputHub;
pub use sim::{Level, World};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Number of player slots
    pub const MAX_PLAYERS: usize = 4;

    /// Upper-bound wraparound threshold, in board units. Fixed at 10
    /// regardless of board size; the lower bound is 0 on both axes.
    pub const WRAP_UPPER_THRESHOLD: f32 = 10.0;
}

/// Unit vector an entity at `rotation_degrees` travels along.
///
/// Board convention is x right, y down, with 0 degrees facing a fixed
/// visual "up": `(sin(-rot), cos(-rot))`, not the math convention.
#[inline]
pub fn forward_vector(rotation_degrees: f32) -> Vec2 {
    let r = (-rotation_degrees).to_radians();
    Vec2::new(r.sin(), r.cos())
}

/// Wrap a rotation into (-360, 360) degrees by floating remainder.
///
/// Negative inputs keep a negative representation; callers that need
/// [0, 360) must normalize downstream.
#[inline]
pub fn wrap_rotation(degrees: f32) -> f32 {
    degrees % 360.0
}

/// Heading in degrees whose [`forward_vector`] equals the normalized stick
/// axis: `atan2(-x, y)`.
#[inline]
pub fn stick_heading(axis: Vec2) -> f32 {
    (-axis.x).atan2(axis.y).to_degrees()
}
