//! Player-controlled ships

use glam::Vec2;

use crate::input::PadState;
use crate::tuning::Tuning;
use crate::{forward_vector, stick_heading};

/// Lifecycle of a ship. Transitions only move forward; respawning creates a
/// fresh actor in the same owner slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorPhase {
    /// Registered but not yet placed on the board
    Uninitialized,
    /// Simulated, rendered, controllable
    Active,
    /// Still on the board, visually distinct, no longer moving or firing
    Dead,
}

/// Ship state beyond the shared body fields
#[derive(Debug)]
pub struct Actor {
    /// Owner slot (0-based); at most one non-dead actor per slot
    pub slot: u8,
    pub phase: ActorPhase,
    /// Simulation time of the last shot; `None` until the first shot, so
    /// the first is never cooldown-gated
    pub last_fire_time: Option<f32>,
}

impl Actor {
    pub fn new(slot: u8) -> Self {
        Self {
            slot,
            phase: ActorPhase::Uninitialized,
            last_fire_time: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.phase == ActorPhase::Active
    }

    /// Whether a ship participates in simulation and rendering at all.
    #[inline]
    pub fn on_board(&self) -> bool {
        self.phase != ActorPhase::Uninitialized
    }

    pub fn can_fire(&self, now: f32, cooldown: f32) -> bool {
        match self.last_fire_time {
            None => true,
            Some(t) => now - t > cooldown,
        }
    }
}

/// Control intent resolved from one frame's pad snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// Heading to snap to, if the move stick is past the deadzone
    pub heading: Option<f32>,
    /// Forward travel for this tick (stick magnitude times forward speed)
    pub forward: f32,
    /// Unit fire direction, if any was requested
    pub fire_dir: Option<Vec2>,
}

/// Turn a pad snapshot into movement and fire intent.
///
/// The move stick past the deadzone snaps the heading outright (no
/// interpolation) and scales forward speed by deflection. The aim stick
/// past the deadzone takes priority as fire direction; otherwise a held
/// fire button shoots along the post-snap forward vector.
pub fn resolve_controls(pad: &PadState, current_rotation: f32, tuning: &Tuning) -> Controls {
    let move_mag = pad.move_axis.length();
    let (heading, forward) = if move_mag >= tuning.stick_deadzone {
        (
            Some(stick_heading(pad.move_axis)),
            move_mag * tuning.forward_speed,
        )
    } else {
        (None, 0.0)
    };

    let aim_mag = pad.aim_axis.length();
    let fire_dir = if aim_mag >= tuning.stick_deadzone {
        Some(pad.aim_axis / aim_mag)
    } else if pad.fire_held {
        Some(forward_vector(heading.unwrap_or(current_rotation)))
    } else {
        None
    };

    Controls {
        heading,
        forward,
        fire_dir,
    }
}
