//! Narrow-phase collision detection
//!
//! Given two bodies a broad phase already flagged as close, decide whether
//! they actually intersect and produce the contact geometry consumed by the
//! constraint/impulse solver: a unit separating normal, one contact point
//! per body, and a scalar interpenetration depth.
//!
//! # Architecture
//!
//! - **Model Space Storage**: shapes store local geometry plus a transform;
//!   world-space data is derived on demand during tests
//! - **One-shot evaluation**: a [`Collision`] is built per candidate pair,
//!   evaluated once, and handed to the solver; nothing persists across steps
//!
//! # Module Organization
//!
//! - [`shape`] - Geometric bodies ([`Object`], [`Sphere`], [`OrientedBox`])
//!   and the delegated [`ConstraintBody`] capability
//! - [`primitives`] - Closest-point and projection helpers used by the
//!   detection routines
//! - [`narrow_phase`] - Pair classification and the per-pair detection
//!   routines

pub mod narrow_phase;
pub mod primitives;
pub mod shape;

// Re-export commonly used types
pub use narrow_phase::{
    first_object, second_object, separating_axis_sweep, Collision, CollisionKind, SatOutcome,
};
pub use primitives::{AaBox, BoxProjection};
pub use shape::{ConstraintBody, Object, OrientedBox, Sphere};

use crate::foundation::math::Vec3;

/// Contact information produced by a successful detection
///
/// `normal` points from the first body toward the second and has unit
/// length; `point1`/`point2` are world-space surface points, one per body;
/// `depth` is the minimal translation along `normal` needed to separate
/// the bodies (non-negative and finite).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit separating normal in world space (first body toward second)
    pub normal: Vec3,
    /// World-space contact point on the first body's surface
    pub point1: Vec3,
    /// World-space contact point on the second body's surface
    pub point2: Vec3,
    /// Interpenetration depth along the normal
    pub depth: f32,
}

impl Contact {
    /// Create a new contact record
    pub fn new(normal: Vec3, point1: Vec3, point2: Vec3, depth: f32) -> Self {
        Self {
            normal,
            point1,
            point2,
            depth,
        }
    }
}
