//! Primitive geometry
//!
//! Turns primitive declarations into vertex/index buffers. Meshes are plain
//! data with no backend dependencies; the vertex layout is `#[repr(C)]` and
//! `Pod` so a backend can upload it as-is.
//!
//! Slice, stack and loop counts must be positive; anything else is a fatal
//! construction error rather than being clamped.

mod shapes;

use thiserror::Error;

use crate::scene::PrimitiveShape;

/// Errors produced while building geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Slice/stack/loop count that is zero, negative or too large
    #[error("{shape}: tessellation parameter '{parameter}' must be positive (got {value})")]
    InvalidTessellation {
        /// Shape tag
        shape: &'static str,
        /// Parameter name
        parameter: &'static str,
        /// Declared value
        value: i64,
    },
}

/// Vertex with position, normal and texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in object space
    pub position: [f32; 3],
    /// Unit normal
    pub normal: [f32; 3],
    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

// Only f32 arrays, no padding
#[allow(unsafe_code)]
unsafe impl bytemuck::Pod for Vertex {}
#[allow(unsafe_code)]
unsafe impl bytemuck::Zeroable for Vertex {}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Triangle mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Every index refers to an existing vertex and indices form whole triangles
    pub fn is_index_consistent(&self) -> bool {
        self.indices.len() % 3 == 0
            && self
                .indices
                .iter()
                .all(|&index| (index as usize) < self.vertices.len())
    }

    /// Raw vertex bytes for buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw index bytes for buffer upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Builds meshes from primitive declarations
pub struct PrimitiveFactory;

impl PrimitiveFactory {
    /// Build the mesh for a shape
    pub fn build(shape: &PrimitiveShape) -> Result<Mesh, GeometryError> {
        let tag = shape.tag();
        match *shape {
            PrimitiveShape::Rectangle { x1, y1, x2, y2 } => Ok(shapes::rectangle(x1, y1, x2, y2)),
            PrimitiveShape::Triangle { vertices } => Ok(shapes::triangle(vertices)),
            PrimitiveShape::Cylinder { base, top, height, slices, stacks } => Ok(shapes::cylinder(
                base,
                top,
                height,
                positive(tag, "slices", slices)?,
                positive(tag, "stacks", stacks)?,
            )),
            PrimitiveShape::Sphere { radius, slices, stacks } => Ok(shapes::sphere(
                radius,
                positive(tag, "slices", slices)?,
                positive(tag, "stacks", stacks)?,
            )),
            PrimitiveShape::Torus { inner, outer, slices, loops } => Ok(shapes::torus(
                inner,
                outer,
                positive(tag, "slices", slices)?,
                positive(tag, "loops", loops)?,
            )),
        }
    }
}

/// Upper bound keeping vertex counts addressable by `u32` indices
const MAX_DIVISIONS: i64 = 4096;

fn positive(
    shape: &'static str,
    parameter: &'static str,
    value: i64,
) -> Result<u32, GeometryError> {
    if (1..=MAX_DIVISIONS).contains(&value) {
        Ok(value as u32)
    } else {
        Err(GeometryError::InvalidTessellation {
            shape,
            parameter,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;

    #[test]
    fn test_zero_slices_rejected() {
        let shape = PrimitiveShape::Sphere { radius: 1.0, slices: 0, stacks: 4 };
        let err = PrimitiveFactory::build(&shape).unwrap_err();
        assert_eq!(
            err,
            GeometryError::InvalidTessellation { shape: "sphere", parameter: "slices", value: 0 }
        );
    }

    #[test]
    fn test_negative_loops_rejected() {
        let shape = PrimitiveShape::Torus { inner: 0.2, outer: 1.0, slices: 8, loops: -3 };
        assert!(matches!(
            PrimitiveFactory::build(&shape),
            Err(GeometryError::InvalidTessellation { parameter: "loops", value: -3, .. })
        ));
    }

    #[test]
    fn test_cylinder_zero_stacks_rejected() {
        let shape =
            PrimitiveShape::Cylinder { base: 1.0, top: 1.0, height: 2.0, slices: 6, stacks: 0 };
        assert!(PrimitiveFactory::build(&shape).is_err());
    }

    #[test]
    fn test_small_sphere_is_index_consistent() {
        let shape = PrimitiveShape::Sphere { radius: 1.0, slices: 3, stacks: 2 };
        let mesh = PrimitiveFactory::build(&shape).unwrap();
        assert!(mesh.vertex_count() > 0, "Sphere should have vertices");
        assert!(mesh.triangle_count() > 0, "Sphere should have triangles");
        for &idx in &mesh.indices {
            assert!(idx < mesh.vertices.len() as u32, "Index {} is out of bounds", idx);
        }
    }

    #[test]
    fn test_every_shape_builds_consistent_mesh() {
        let shapes = [
            PrimitiveShape::Rectangle { x1: 0.0, y1: 0.0, x2: 2.0, y2: 1.0 },
            PrimitiveShape::Triangle {
                vertices: [
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(1.0, 0.0, 0.0),
                    Vec3::new(0.0, 1.0, 0.0),
                ],
            },
            PrimitiveShape::Cylinder { base: 1.0, top: 0.5, height: 2.0, slices: 8, stacks: 3 },
            PrimitiveShape::Sphere { radius: 2.0, slices: 12, stacks: 6 },
            PrimitiveShape::Torus { inner: 0.25, outer: 1.0, slices: 6, loops: 10 },
        ];
        for shape in &shapes {
            let mesh = PrimitiveFactory::build(shape).unwrap();
            assert!(mesh.is_index_consistent(), "{} mesh has invalid indices", shape.tag());
            assert!(mesh.triangle_count() > 0, "{} mesh is empty", shape.tag());
        }
    }

    #[test]
    fn test_vertex_bytes_match_layout() {
        let shape = PrimitiveShape::Rectangle { x1: 0.0, y1: 0.0, x2: 1.0, y2: 1.0 };
        let mesh = PrimitiveFactory::build(&shape).unwrap();
        assert_eq!(mesh.vertex_bytes().len(), mesh.vertex_count() * std::mem::size_of::<Vertex>());
        assert_eq!(mesh.index_bytes().len(), mesh.indices.len() * 4);
    }
}
