//! # Collision Engine
//!
//! Narrow-phase collision detection for a rigid-body physics simulation.
//! Given two bodies a broad phase already flagged as close, the detector
//! decides whether they intersect and produces solver-ready contact
//! geometry: a unit separating normal, one contact point per body, and a
//! scalar interpenetration depth.
//!
//! ## Features
//!
//! - **Sphere and oriented-box bodies**: model-space geometry plus a
//!   transform, world-space data derived on demand
//! - **Separating-axis box-box test**: face axes, edge-pair cross
//!   products, early exit on the first separating axis
//! - **Delegated constraint bodies**: externally constrained bodies report
//!   their own contacts through a narrow trait
//! - **Tunable tolerance**: one epsilon threads through every numeric
//!   comparison, loadable from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use collision_engine::prelude::*;
//!
//! let sphere1 = Object::Sphere(Sphere::new(Vec3::new(0.0, 0.0, 0.0), 1.0));
//! let sphere2 = Object::Sphere(Sphere::new(Vec3::new(1.5, 0.0, 0.0), 1.0));
//!
//! let mut collision = Collision::new(&sphere1, &sphere2);
//! if collision.detect(&CollisionConfig::default()) {
//!     println!(
//!         "contact normal {:?}, depth {}",
//!         collision.normal(),
//!         collision.depth()
//!     );
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod physics;

pub use config::{CollisionConfig, Config, ConfigError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{CollisionConfig, Config, ConfigError},
        foundation::math::{Mat4, Quat, Transform, Vec3},
        physics::collision::{
            first_object, second_object, Collision, CollisionKind, ConstraintBody, Contact,
            Object, OrientedBox, Sphere,
        },
    };
}
