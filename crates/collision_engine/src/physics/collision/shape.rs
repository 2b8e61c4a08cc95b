//! Geometric bodies tested by the narrow phase
//!
//! Shapes store local geometry plus a transform and derive world-space data
//! on demand during collision tests. Bodies are owned and integrated by the
//! simulation layer; the narrow phase only borrows them for the duration of
//! one detection call.

use crate::foundation::math::{Mat4, Transform, Vec3};

use super::Contact;

/// A sphere collision body
///
/// Isotropic, so it carries no orientation: a world-space center and a
/// radius describe it completely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center position in world space
    pub center: Vec3,
    /// Sphere radius (must be positive)
    pub radius: f32,
}

impl Sphere {
    /// Create a sphere from a world-space center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "sphere radius must be positive: {radius}");
        Self { center, radius }
    }
}

/// An oriented box collision body
///
/// Geometry is stored in model space as half-extents along the local axes;
/// the transform (rotation, translation, optionally anisotropic scale) maps
/// local space to world space.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedBox {
    half_size: Vec3,
    transform: Transform,
}

impl OrientedBox {
    /// Create a box from local half-extents and a local-to-world transform
    pub fn new(half_size: Vec3, transform: Transform) -> Self {
        debug_assert!(
            half_size.x > 0.0 && half_size.y > 0.0 && half_size.z > 0.0,
            "box half extents must be positive: {half_size:?}"
        );
        Self {
            half_size,
            transform,
        }
    }

    /// Axis-aligned box centered at a world position, no rotation
    pub fn axis_aligned(center: Vec3, half_size: Vec3) -> Self {
        Self::new(half_size, Transform::from_position(center))
    }

    /// Half-extents along the local axes
    pub fn half_size(&self) -> Vec3 {
        self.half_size
    }

    /// World-space center position
    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    /// Local-to-world affine transform
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// World-to-local affine transform
    pub fn inv_model_matrix(&self) -> Mat4 {
        self.transform.inverse_matrix()
    }

    /// The box's local x/y/z axes carried into world space
    ///
    /// Scale is included, so each vector's length is the world-space length
    /// of one local unit along that axis. Callers needing unit directions
    /// must normalize.
    pub fn world_axes(&self) -> [Vec3; 3] {
        [
            self.transform.transform_vector(Vec3::x()),
            self.transform.transform_vector(Vec3::y()),
            self.transform.transform_vector(Vec3::z()),
        ]
    }

    /// The eight corners of the box in world space
    pub fn world_corners(&self) -> [Vec3; 8] {
        let h = self.half_size;
        let mut corners = [Vec3::zeros(); 8];
        let mut index = 0;
        for &sx in &[-1.0f32, 1.0] {
            for &sy in &[-1.0f32, 1.0] {
                for &sz in &[-1.0f32, 1.0] {
                    let local = Vec3::new(sx * h.x, sy * h.y, sz * h.z);
                    corners[index] = self.transform.transform_point(local);
                    index += 1;
                }
            }
        }
        corners
    }
}

/// Delegated collision capability for externally constrained bodies
///
/// The narrow phase does not interpret a constraint's geometry. The body
/// reports its own collision state with the same output semantics as the
/// native routines: a unit normal, one world-space contact point per body,
/// and a finite non-negative depth.
///
/// `Send + Sync` so bodies can be shared immutably across worker threads
/// while independent pairs are evaluated in parallel.
pub trait ConstraintBody: std::fmt::Debug + Send + Sync {
    /// World-space position of the constrained body
    fn position(&self) -> Vec3;

    /// Report the body's current collision state, if it is colliding
    fn collision(&self) -> Option<Contact>;
}

/// A collision body tested by the narrow phase
///
/// Closed set of shape kinds dispatched once by the pair classifier; the
/// detection routines never downcast.
#[derive(Debug)]
pub enum Object {
    /// Sphere body
    Sphere(Sphere),
    /// Oriented box body
    Box(OrientedBox),
    /// Externally constrained body that reports its own collision state
    Constraint(Box<dyn ConstraintBody>),
}

impl Object {
    /// World-space position of the body
    pub fn position(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::Box(boxed) => boxed.position(),
            Self::Constraint(constraint) => constraint.position(),
        }
    }

    /// Whether this body is a sphere (used for canonical pair ordering)
    pub fn is_sphere(&self) -> bool {
        matches!(self, Self::Sphere(_))
    }

    /// Whether this body delegates its own collision reporting
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}
