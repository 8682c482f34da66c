//! Renderer that records draw calls instead of drawing

use super::Renderer;
use crate::foundation::math::Mat4;
use crate::geometry::Mesh;
use crate::scene::Appearance;

/// One recorded draw
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Accumulated model transform
    pub transform: Mat4,
    /// Appearance in effect
    pub appearance: Appearance,
    /// Vertex count of the drawn mesh
    pub vertex_count: usize,
    /// Triangle count of the drawn mesh
    pub triangle_count: usize,
}

/// Collects draw calls, grouped by frame
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Vec<DrawCall>,
    frames: usize,
    frame_start: usize,
}

impl RecordingRenderer {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded draws
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Draws recorded since the last `begin_frame`
    pub fn last_frame(&self) -> &[DrawCall] {
        &self.calls[self.frame_start..]
    }

    /// Number of frames started
    pub const fn frames(&self) -> usize {
        self.frames
    }

    /// Forget everything recorded
    pub fn clear(&mut self) {
        self.calls.clear();
        self.frames = 0;
        self.frame_start = 0;
    }
}

impl Renderer for RecordingRenderer {
    fn begin_frame(&mut self) {
        self.frames += 1;
        self.frame_start = self.calls.len();
    }

    fn draw(&mut self, transform: &Mat4, appearance: &Appearance, mesh: &Mesh) {
        self.calls.push(DrawCall {
            transform: *transform,
            appearance: appearance.clone(),
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
        });
    }
}
