//! Light sources

use super::Rgba;
use crate::foundation::math::{Vec3, Vec4};

/// Light types
#[derive(Debug, Clone, PartialEq)]
pub enum LightKind {
    /// Omnidirectional light
    Omni,
    /// Spot light
    Spot {
        /// Point the spot is aimed at
        target: Vec3,
        /// Cone angle in degrees
        angle: f32,
        /// Falloff exponent
        exponent: f32,
    },
}

/// Light source
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Unique light id
    pub id: String,
    /// Light type
    pub kind: LightKind,
    /// Whether the light starts switched on
    pub enabled: bool,
    /// Homogeneous location; `w = 0` means a directional light
    pub location: Vec4,
    /// Ambient colour
    pub ambient: Rgba,
    /// Diffuse colour
    pub diffuse: Rgba,
    /// Specular colour
    pub specular: Rgba,
}

impl Light {
    /// Whether this light is a spot light
    pub const fn is_spot(&self) -> bool {
        matches!(self.kind, LightKind::Spot { .. })
    }

    /// Normalized spot direction, `None` for omni lights
    pub fn spot_direction(&self) -> Option<Vec3> {
        match &self.kind {
            LightKind::Omni => None,
            LightKind::Spot { target, .. } => {
                let direction = target - self.location.xyz();
                (direction.norm() > f32::EPSILON).then(|| direction.normalize())
            }
        }
    }
}

/// Scene-wide ambient light and background colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Illumination {
    /// Global ambient light
    pub ambient: Rgba,
    /// Clear colour
    pub background: Rgba,
}

impl Default for Illumination {
    fn default() -> Self {
        Self {
            ambient: Rgba::BLACK,
            background: Rgba::BLACK,
        }
    }
}
