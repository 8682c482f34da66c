//! Transformation operations

use crate::foundation::math::{utils, Mat4, Mat4Ext, Vec3};

/// Rotation axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// X axis
    X,
    /// Y axis
    Y,
    /// Z axis
    Z,
}

impl Axis {
    /// Decode an axis name (`x`, `y` or `z`)
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "x" | "X" => Some(Self::X),
            "y" | "Y" => Some(Self::Y),
            "z" | "Z" => Some(Self::Z),
            _ => None,
        }
    }
}

/// One affine operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformOp {
    /// Translation
    Translate(Vec3),
    /// Rotation about a principal axis, angle in degrees
    Rotate {
        /// Axis of rotation
        axis: Axis,
        /// Angle in degrees
        angle: f32,
    },
    /// Non-uniform scale
    Scale(Vec3),
}

impl TransformOp {
    /// 4x4 matrix of this operation
    pub fn to_matrix(self) -> Mat4 {
        match self {
            Self::Translate(offset) => Mat4::translation(offset),
            Self::Rotate { axis, angle } => {
                let radians = utils::deg_to_rad(angle);
                match axis {
                    Axis::X => Mat4::rotation_x(radians),
                    Axis::Y => Mat4::rotation_y(radians),
                    Axis::Z => Mat4::rotation_z(radians),
                }
            }
            Self::Scale(factors) => Mat4::scaling(factors),
        }
    }
}

/// Concatenate operations in declaration order
///
/// Each operation post-multiplies the accumulated matrix, so the last
/// declared operation is the first applied to geometry.
pub fn compose(ops: &[TransformOp]) -> Mat4 {
    ops.iter()
        .fold(Mat4::identity(), |acc, op| acc * op.to_matrix())
}

/// Reusable, named sequence of operations
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTransform {
    /// Transformation id
    pub id: String,
    /// Operations in declaration order
    pub ops: Vec<TransformOp>,
}

impl NamedTransform {
    /// Composite matrix
    pub fn matrix(&self) -> Mat4 {
        compose(&self.ops)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_parse() {
        assert_eq!(Axis::parse("x"), Some(Axis::X));
        assert_eq!(Axis::parse("Z"), Some(Axis::Z));
        assert_eq!(Axis::parse("w"), None);
    }

    #[test]
    fn test_compose_uses_declaration_order() {
        // translate then rotate: the point is rotated first, then moved
        let ops = [
            TransformOp::Translate(Vec3::new(10.0, 0.0, 0.0)),
            TransformOp::Rotate { axis: Axis::Z, angle: 90.0 },
        ];
        let p = compose(&ops).transform_point(&Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Point3::new(10.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_empty_sequence_is_identity() {
        assert_eq!(compose(&[]), Mat4::identity());
    }

    #[test]
    fn test_named_transform_matrix() {
        let named = NamedTransform {
            id: "grow".into(),
            ops: vec![TransformOp::Scale(Vec3::new(2.0, 3.0, 4.0))],
        };
        let p = named.matrix().transform_point(&Point3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(p, Point3::new(2.0, 3.0, 4.0));
    }
}
