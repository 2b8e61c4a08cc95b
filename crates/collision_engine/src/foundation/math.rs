//! Math utilities and types
//!
//! Provides fundamental math types for 3D collision geometry.

pub use nalgebra::{
    Matrix3, Matrix4,
    Quaternion,
    Unit,
    Vector3,
};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Apply an affine transform to a position (translation included)
pub fn transform_point(matrix: &Mat4, point: Vec3) -> Vec3 {
    matrix.transform_point(&Point3::from(point)).coords
}

/// Apply only the linear part of an affine transform to a direction
///
/// Translation must not affect a direction, so this goes through
/// `transform_vector` rather than `transform_point`.
pub fn transform_direction(matrix: &Mat4, direction: Vec3) -> Vec3 {
    matrix.transform_vector(&direction)
}

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Convert to a transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::new_translation(&self.position)
            * self.rotation.to_homogeneous()
            * Mat4::new_nonuniform_scaling(&self.scale)
    }

    /// Matrix mapping world space back into this transform's local space
    ///
    /// Computed as S⁻¹·R⁻¹·T⁻¹ rather than through a general matrix
    /// inversion, so it stays exact for anisotropic scale.
    pub fn inverse_matrix(&self) -> Mat4 {
        let inv_scale = Vec3::new(1.0 / self.scale.x, 1.0 / self.scale.y, 1.0 / self.scale.z);
        Mat4::new_nonuniform_scaling(&inv_scale)
            * self.rotation.inverse().to_homogeneous()
            * Mat4::new_translation(&(-self.position))
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * point.component_mul(&self.scale)
    }

    /// Apply this transform to a vector (translation ignored)
    pub fn transform_vector(&self, vector: Vec3) -> Vec3 {
        self.rotation * vector.component_mul(&self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_transform_identity() {
        let transform = Transform::identity();

        assert_eq!(transform.position, Vec3::zeros());
        assert_relative_eq!(transform.rotation, Quat::identity(), epsilon = EPSILON);
        assert_eq!(transform.scale, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_transform_point_matches_matrix() {
        let transform = Transform {
            position: Vec3::new(1.0, -2.0, 3.0),
            rotation: Quat::from_axis_angle(&Vec3::y_axis(), 0.7),
            scale: Vec3::new(2.0, 1.0, 0.5),
        };
        let point = Vec3::new(0.3, -1.2, 4.0);

        let via_struct = transform.transform_point(point);
        let via_matrix = transform_point(&transform.to_matrix(), point);

        assert_relative_eq!(via_struct, via_matrix, epsilon = 1e-5);
    }

    #[test]
    fn test_inverse_matrix_round_trip() {
        let transform = Transform {
            position: Vec3::new(5.0, 1.0, -2.0),
            rotation: Quat::from_axis_angle(&Vec3::z_axis(), 1.1),
            scale: Vec3::new(2.0, 0.5, 3.0),
        };
        let point = Vec3::new(-0.5, 2.0, 0.25);

        let world = transform.transform_point(point);
        let back = transform_point(&transform.inverse_matrix(), world);

        assert_relative_eq!(back, point, epsilon = 1e-5);
    }

    #[test]
    fn test_direction_ignores_translation() {
        let matrix = Mat4::new_translation(&Vec3::new(100.0, -50.0, 7.0));
        let direction = Vec3::new(0.0, 1.0, 0.0);

        assert_relative_eq!(
            transform_direction(&matrix, direction),
            direction,
            epsilon = EPSILON
        );
    }
}
