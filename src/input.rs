//! Shared control-input snapshot
//!
//! The only mutable state shared between the input-producing thread and the
//! simulation thread. Device mapping (which stick, which button) is the
//! caller's concern; the hub just stores per-slot axis/button state.

use std::sync::{Mutex, PoisonError};

use glam::Vec2;

use crate::consts::MAX_PLAYERS;

/// Control state for one player slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PadState {
    /// Movement stick, components in [-1, 1]
    pub move_axis: Vec2,
    /// Aim stick, components in [-1, 1]
    pub aim_axis: Vec2,
    /// Discrete fire button held down
    pub fire_held: bool,
}

/// Per-slot pad state behind a single critical section.
///
/// Writers (the input thread) take the lock briefly per setter call; the
/// simulation thread takes it once per frame in [`snapshot`](Self::snapshot)
/// to copy all slots as one consistent batch, so no entity in a frame can
/// observe a torn update.
#[derive(Debug, Default)]
pub struct InputHub {
    pads: Mutex<[PadState; MAX_PLAYERS]>,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movement stick for a slot. Out-of-range slots are ignored.
    pub fn set_move_stick(&self, slot: usize, x: f32, y: f32) {
        self.with_pad(slot, |pad| {
            pad.move_axis = clamp_axis(x, y);
        });
    }

    /// Set the aim stick for a slot. Out-of-range slots are ignored.
    pub fn set_aim_stick(&self, slot: usize, x: f32, y: f32) {
        self.with_pad(slot, |pad| {
            pad.aim_axis = clamp_axis(x, y);
        });
    }

    /// Set the fire button for a slot. Out-of-range slots are ignored.
    pub fn set_fire_held(&self, slot: usize, held: bool) {
        self.with_pad(slot, |pad| {
            pad.fire_held = held;
        });
    }

    /// Copy every slot's state under one lock acquisition.
    pub fn snapshot(&self) -> [PadState; MAX_PLAYERS] {
        *self.lock()
    }

    fn with_pad(&self, slot: usize, f: impl FnOnce(&mut PadState)) {
        if slot >= MAX_PLAYERS {
            return;
        }
        f(&mut self.lock()[slot]);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, [PadState; MAX_PLAYERS]> {
        // Pad state is plain data; a panic mid-write can't corrupt it.
        self.pads.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn clamp_axis(x: f32, y: f32) -> Vec2 {
    Vec2::new(x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0))
}
