//! Abstract render commands
//!
//! The simulation emits one [`RenderCommand`] per visible entity each frame;
//! a platform-owned drawing pass consumes them. No graphics API types appear
//! here, only shapes, transforms and colors.

pub mod models;

use std::sync::Arc;

use glam::Vec2;

/// How a model's vertex buffer is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Every 3 vertices form one filled triangle
    TriangleList,
    /// Consecutive vertices form a connected polyline
    LineStrip,
}

/// Immutable shape descriptor supplied at entity construction
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    pub primitive: Primitive,
    /// Flat `[x0, y0, x1, y1, ..]` buffer in model-local units
    pub vertices: Vec<f32>,
}

impl Model {
    pub fn new(primitive: Primitive, vertices: Vec<f32>) -> Self {
        Self {
            primitive,
            vertices,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 2
    }
}

/// One abstract draw call: shape, transform (translation plus rotation about
/// the z axis, in degrees), and RGBA color
#[derive(Debug, Clone)]
pub struct RenderCommand {
    pub model: Arc<Model>,
    pub translation: Vec2,
    pub rotation: f32,
    pub color: [f32; 4],
}

/// Double-buffered frame list.
///
/// The simulation fills the back buffer during its render phase and swaps;
/// the drawing pass reads the front buffer until the next swap.
#[derive(Debug, Default)]
pub struct FrameQueue {
    front: Vec<RenderCommand>,
    back: Vec<RenderCommand>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the back buffer and hand it out for this frame's commands.
    pub fn begin(&mut self) -> &mut Vec<RenderCommand> {
        self.back.clear();
        &mut self.back
    }

    /// Publish the back buffer as the current frame.
    pub fn present(&mut self) {
        std::mem::swap(&mut self.front, &mut self.back);
    }

    /// The most recently presented frame.
    pub fn frame(&self) -> &[RenderCommand] {
        &self.front
    }
}
