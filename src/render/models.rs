//! Canonical entity models and palette

use glam::Vec2;

use super::{Model, Primitive};

/// Colors for game elements (RGBA; filled bodies render at 0.75 alpha)
pub mod colors {
    /// Ship color per player slot
    pub const PLAYERS: [[f32; 4]; 4] = [
        [1.0, 1.0, 1.0, 0.75], // white
        [0.0, 0.0, 1.0, 0.75], // blue
        [1.0, 1.0, 0.0, 0.75], // yellow
        [0.0, 1.0, 0.0, 0.75], // green
    ];
    /// Dead ships stay on the board in dark gray
    pub const DEAD: [f32; 4] = [0.27, 0.27, 0.27, 0.75];
    pub const PROJECTILE: [f32; 4] = [1.0, 1.0, 0.0, 0.75];
    pub const WALL: [f32; 4] = [1.0, 1.0, 0.0, 0.75];
}

/// Dart-shaped ship: a 4-corner hull expanded to a 6-vertex triangle list.
pub fn ship() -> Model {
    // Hull corners, nose facing local +y
    const CORNERS: [[f32; 2]; 4] = [
        [-0.5, -0.5], // 0: left tail
        [0.0, -0.2],  // 1: tail notch
        [0.0, 0.1],   // 2: nose
        [0.5, -0.5],  // 3: right tail
    ];
    const INDICES: [usize; 6] = [0, 1, 2, 1, 3, 2];

    let mut vertices = Vec::with_capacity(INDICES.len() * 2);
    for i in INDICES {
        vertices.extend_from_slice(&CORNERS[i]);
    }
    Model::new(Primitive::TriangleList, vertices)
}

/// Small triangle pointing along local +x.
pub fn projectile() -> Model {
    Model::new(
        Primitive::TriangleList,
        vec![0.1, 0.0, -0.05, -0.0866, -0.05, 0.0866],
    )
}

/// Two-point line strip in board coordinates; walls render untransformed.
pub fn wall(a: Vec2, b: Vec2) -> Model {
    Model::new(Primitive::LineStrip, vec![a.x, a.y, b.x, b.y])
}
