//! Backend that logs draws instead of rasterizing them

use yas_scene::foundation::math::Mat4;
use yas_scene::geometry::Mesh;
use yas_scene::render::{Appearance, Renderer};

/// Counts and logs every draw it receives
#[derive(Debug, Default)]
pub struct LoggingRenderer {
    frame: usize,
    draws: usize,
    triangles: usize,
}

impl LoggingRenderer {
    /// Create a renderer with zeroed counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Total draws across all frames
    pub const fn draws(&self) -> usize {
        self.draws
    }

    /// Total triangles across all frames
    pub const fn triangles(&self) -> usize {
        self.triangles
    }
}

impl Renderer for LoggingRenderer {
    fn begin_frame(&mut self) {
        self.frame += 1;
        log::debug!("Frame {} begin", self.frame);
    }

    fn draw(&mut self, transform: &Mat4, appearance: &Appearance, mesh: &Mesh) {
        self.draws += 1;
        self.triangles += mesh.triangle_count();
        log::debug!(
            "draw {} triangles at ({:.2}, {:.2}, {:.2}) material={} texture={} wrap=({}, {})",
            mesh.triangle_count(),
            transform[(0, 3)],
            transform[(1, 3)],
            transform[(2, 3)],
            appearance.material.id,
            appearance.texture_id().unwrap_or("none"),
            appearance.length_s,
            appearance.length_t
        );
    }

    fn end_frame(&mut self) {
        log::debug!("Frame {} end", self.frame);
    }
}
