//! Tessellation of the five primitive shapes
//!
//! Conventions: right-handed, counter-clockwise front faces, texture V grows
//! downwards (rectangle corner `(x1, y2)` maps to UV `(0, 0)`).

use super::{Mesh, Vertex};
use crate::foundation::math::{constants::TAU, Vec3};

/// Rectangle in the XY plane, facing +Z
pub fn rectangle(x1: f32, y1: f32, x2: f32, y2: f32) -> Mesh {
    let normal = [0.0, 0.0, 1.0];
    let vertices = vec![
        Vertex::new([x1, y1, 0.0], normal, [0.0, 1.0]),
        Vertex::new([x2, y1, 0.0], normal, [1.0, 1.0]),
        Vertex::new([x1, y2, 0.0], normal, [0.0, 0.0]),
        Vertex::new([x2, y2, 0.0], normal, [1.0, 0.0]),
    ];
    let indices = vec![0, 1, 2, 3, 2, 1];
    Mesh::new(vertices, indices)
}

/// Single triangle; the face normal follows the vertex order
pub fn triangle(points: [Vec3; 3]) -> Mesh {
    let [a, b, c] = points;
    let cross = (b - a).cross(&(c - a));
    let normal = if cross.norm() > f32::EPSILON {
        cross.normalize()
    } else {
        Vec3::z()
    };
    let normal = [normal.x, normal.y, normal.z];

    // Texture coordinates from edge lengths so the texture is not sheared
    let ab = (b - a).norm();
    let ac = (c - a).norm();
    let (u_c, v_c) = if ab > f32::EPSILON {
        let along = (c - a).dot(&(b - a)) / ab;
        let height = (ac * ac - along * along).max(0.0).sqrt();
        (along / ab, 1.0 - height / ab)
    } else {
        (0.5, 0.0)
    };

    let vertices = vec![
        Vertex::new([a.x, a.y, a.z], normal, [0.0, 1.0]),
        Vertex::new([b.x, b.y, b.z], normal, [1.0, 1.0]),
        Vertex::new([c.x, c.y, c.z], normal, [u_c, v_c]),
    ];
    Mesh::new(vertices, vec![0, 1, 2])
}

/// Open cylinder (cone when radii differ) from z = 0 to z = height
pub fn cylinder(base: f32, top: f32, height: f32, slices: u32, stacks: u32) -> Mesh {
    let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
    // Slope of the side: radius shrinks by (base - top) over height
    let slope = if height.abs() > f32::EPSILON { (base - top) / height } else { 0.0 };

    for stack in 0..=stacks {
        let t = stack as f32 / stacks as f32;
        let z = t * height;
        let radius = base + (top - base) * t;
        for slice in 0..=slices {
            let s = slice as f32 / slices as f32;
            let (sin, cos) = (s * TAU).sin_cos();
            let normal = Vec3::new(cos, sin, slope).normalize();
            vertices.push(Vertex::new(
                [radius * cos, radius * sin, z],
                [normal.x, normal.y, normal.z],
                [s, 1.0 - t],
            ));
        }
    }

    Mesh::new(vertices, grid_indices(slices, stacks))
}

/// Sphere centred at the origin, poles on the Z axis
pub fn sphere(radius: f32, slices: u32, stacks: u32) -> Mesh {
    let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);

    for stack in 0..=stacks {
        let t = stack as f32 / stacks as f32;
        // From the south pole (-PI/2) to the north pole (+PI/2)
        let latitude = (t - 0.5) * std::f32::consts::PI;
        let (sin_lat, cos_lat) = latitude.sin_cos();
        for slice in 0..=slices {
            let s = slice as f32 / slices as f32;
            let (sin_lon, cos_lon) = (s * TAU).sin_cos();
            let normal = [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat];
            vertices.push(Vertex::new(
                [radius * normal[0], radius * normal[1], radius * normal[2]],
                normal,
                [s, 1.0 - t],
            ));
        }
    }

    Mesh::new(vertices, grid_indices(slices, stacks))
}

/// Torus around the Z axis
pub fn torus(inner: f32, outer: f32, slices: u32, loops: u32) -> Mesh {
    let mut vertices = Vec::with_capacity(((slices + 1) * (loops + 1)) as usize);

    for ring in 0..=loops {
        let t = ring as f32 / loops as f32;
        let (sin_ring, cos_ring) = (t * TAU).sin_cos();
        for side in 0..=slices {
            let s = side as f32 / slices as f32;
            let (sin_tube, cos_tube) = (s * TAU).sin_cos();
            let distance = outer + inner * cos_tube;
            let normal = [cos_tube * cos_ring, cos_tube * sin_ring, sin_tube];
            vertices.push(Vertex::new(
                [distance * cos_ring, distance * sin_ring, inner * sin_tube],
                normal,
                [t, s],
            ));
        }
    }

    Mesh::new(vertices, grid_indices(slices, loops))
}

/// Two CCW triangles per cell of a `(columns + 1) x (rows + 1)` vertex grid
fn grid_indices(columns: u32, rows: u32) -> Vec<u32> {
    let stride = columns + 1;
    let mut indices = Vec::with_capacity((columns * rows * 6) as usize);
    for row in 0..rows {
        for column in 0..columns {
            let current = row * stride + column;
            let above = current + stride;

            indices.push(current);
            indices.push(current + 1);
            indices.push(above);

            indices.push(above);
            indices.push(current + 1);
            indices.push(above + 1);
        }
    }
    indices
}
