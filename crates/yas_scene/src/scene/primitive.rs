//! Primitive records

use crate::foundation::math::Vec3;
use crate::geometry::Mesh;

/// Shape of a primitive, with its declared parameters
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveShape {
    /// Axis-aligned rectangle in the XY plane between two corners
    Rectangle {
        /// First corner X
        x1: f32,
        /// First corner Y
        y1: f32,
        /// Opposite corner X
        x2: f32,
        /// Opposite corner Y
        y2: f32,
    },
    /// Single triangle; vertex order defines the front face
    Triangle {
        /// Three vertices
        vertices: [Vec3; 3],
    },
    /// Capless cylinder (or cone) along +Z
    Cylinder {
        /// Radius at z = 0
        base: f32,
        /// Radius at z = height
        top: f32,
        /// Height
        height: f32,
        /// Divisions around the axis
        slices: i64,
        /// Divisions along the axis
        stacks: i64,
    },
    /// Sphere centred at the origin
    Sphere {
        /// Radius
        radius: f32,
        /// Divisions around the Z axis
        slices: i64,
        /// Divisions from pole to pole
        stacks: i64,
    },
    /// Torus in the XY plane
    Torus {
        /// Tube radius
        inner: f32,
        /// Distance from centre to tube centre
        outer: f32,
        /// Divisions around the tube
        slices: i64,
        /// Divisions around the ring
        loops: i64,
    },
}

impl PrimitiveShape {
    /// Tag name used in scene documents
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle",
            Self::Triangle { .. } => "triangle",
            Self::Cylinder { .. } => "cylinder",
            Self::Sphere { .. } => "sphere",
            Self::Torus { .. } => "torus",
        }
    }
}

/// A loaded primitive: declaration plus generated geometry
#[derive(Debug, Clone)]
pub struct Primitive {
    /// Primitive id
    pub id: String,
    /// Declared shape
    pub shape: PrimitiveShape,
    /// Geometry built from the shape at load time
    pub mesh: Mesh,
}
