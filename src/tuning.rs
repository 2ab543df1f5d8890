//! Data-driven game balance
//!
//! All gameplay constants that a platform layer may want to override live
//! here; structural constants (timestep, wrap threshold, slot count) stay
//! in [`crate::consts`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Gameplay balance values, JSON-overridable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    /// Board extent along x (units)
    pub board_width: f32,
    /// Board extent along y (units)
    pub board_height: f32,

    // === Players ===
    /// Ship collision radius
    pub player_radius: f32,
    /// Forward travel per tick at full stick deflection
    pub forward_speed: f32,
    /// Minimum seconds between shots
    pub fire_cooldown: f32,
    /// Stick deflection magnitude below which input is treated as centered
    pub stick_deadzone: f32,

    // === Projectiles ===
    /// Projectile collision radius
    pub projectile_radius: f32,
    /// Projectile travel per tick
    pub projectile_speed: f32,
    /// Seconds before a projectile expires on its own
    pub projectile_lifetime: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            board_width: 40.0,
            board_height: 40.0,

            player_radius: 0.5,
            forward_speed: 0.1,
            fire_cooldown: 0.1,
            stick_deadzone: 0.2,

            projectile_radius: 0.25,
            projectile_speed: 0.2,
            projectile_lifetime: 1.0,
        }
    }
}

impl Tuning {
    /// Board dimensions as a vector
    #[inline]
    pub fn board(&self) -> Vec2 {
        Vec2::new(self.board_width, self.board_height)
    }

    /// Parse a tuning table from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the tuning table to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
