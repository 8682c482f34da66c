//! Views (cameras)

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Projection-specific view parameters
#[derive(Debug, Clone, PartialEq)]
pub enum ViewKind {
    /// Perspective projection
    Perspective {
        /// Vertical field of view in degrees
        angle: f32,
    },
    /// Orthographic projection
    Orthographic {
        /// Left clipping plane
        left: f32,
        /// Right clipping plane
        right: f32,
        /// Top clipping plane
        top: f32,
        /// Bottom clipping plane
        bottom: f32,
    },
}

/// A named view of the scene
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Unique view id
    pub id: String,
    /// Projection kind and its parameters
    pub kind: ViewKind,
    /// Distance to near clipping plane
    pub near: f32,
    /// Distance to far clipping plane
    pub far: f32,
    /// Eye position
    pub from: Vec3,
    /// Point the view looks at
    pub to: Vec3,
}

impl View {
    /// Projection matrix for a viewport of the given aspect ratio
    ///
    /// Orthographic views ignore the aspect ratio; their extents are explicit.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        match self.kind {
            ViewKind::Perspective { angle } => {
                Mat4::perspective(utils::deg_to_rad(angle), aspect, self.near, self.far)
            }
            ViewKind::Orthographic { left, right, top, bottom } => {
                Mat4::orthographic(left, right, bottom, top, self.near, self.far)
            }
        }
    }

    /// World-to-view matrix, Y up
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.from, self.to, Vec3::new(0.0, 1.0, 0.0))
    }

    /// Whether this is a perspective view
    pub const fn is_perspective(&self) -> bool {
        matches!(self.kind, ViewKind::Perspective { .. })
    }
}
