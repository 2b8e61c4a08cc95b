//! Physics module housing the narrow-phase collision detector
//!
//! Broad-phase pruning, body integration, and constraint solving are
//! external collaborators; this module only answers "do these two bodies
//! intersect, and if so with what contact geometry".

pub mod collision;

pub use collision::{
    first_object, second_object, AaBox, BoxProjection, Collision, CollisionKind, ConstraintBody,
    Contact, Object, OrientedBox, Sphere,
};
