//! Pair classification and the per-pair detection routines
//!
//! A caller builds one [`Collision`] per candidate pair, calls
//! [`Collision::detect`], and on `true` reads the contact geometry. The
//! routine is selected once from the pair's shape kinds; the routines
//! themselves never re-inspect kinds beyond an unreachable guard.
//!
//! There are no recoverable errors here: "no collision" is the `false`
//! return, mismatched shape kinds inside a routine are programming errors
//! (the classifier makes them impossible when respected), and numeric
//! instability is caught by debug-only invariant checks that downgrade to
//! logged warnings in release builds.

use crate::config::CollisionConfig;
use crate::foundation::math::{transform_direction, transform_point, Vec3};

use super::primitives::{AaBox, BoxProjection};
use super::shape::{Object, OrientedBox, Sphere};
use super::Contact;

/// Which detection routine applies to a pair of bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// Two spheres
    SphereSphere,
    /// A sphere and an oriented box (sphere canonically first)
    SphereBox,
    /// Two oriented boxes (separating-axis test)
    BoxBox,
    /// At least one body delegates its own collision reporting
    Constraint,
}

impl CollisionKind {
    /// Classify a pair of bodies by their runtime shape kinds
    ///
    /// Total over the closed [`Object`] set; a constraint on either side
    /// takes precedence since the pair's contact comes from the delegate.
    pub fn classify(object1: &Object, object2: &Object) -> Self {
        if object1.is_constraint() || object2.is_constraint() {
            return Self::Constraint;
        }
        match (object1.is_sphere(), object2.is_sphere()) {
            (true, true) => Self::SphereSphere,
            (false, false) => Self::BoxBox,
            _ => Self::SphereBox,
        }
    }
}

/// Canonical first operand: the sphere, whenever exactly one body is one
///
/// Sphere-first ordering lets each routine assume a fixed operand order
/// instead of handling both. Same-kind pairs keep their input order.
pub fn first_object<'a>(object1: &'a Object, object2: &'a Object) -> &'a Object {
    if !object1.is_sphere() && object2.is_sphere() {
        object2
    } else {
        object1
    }
}

/// Canonical second operand, complementing [`first_object`]
pub fn second_object<'a>(object1: &'a Object, object2: &'a Object) -> &'a Object {
    if !object1.is_sphere() && object2.is_sphere() {
        object1
    } else {
        object2
    }
}

/// Outcome of the separating-axis sweep over the fifteen candidate axes
///
/// Exposed separately from [`Collision`] so the early-exit contract is
/// observable: a separated pair reports which axis ended the sweep and how
/// many candidates were examined before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SatOutcome {
    /// A separating axis was found and the sweep stopped there
    Separated {
        /// Unit axis along which the projections do not overlap
        axis: Vec3,
        /// Candidate axes examined before the early exit (face axes first)
        axes_tested: usize,
    },
    /// No separating axis exists: the boxes overlap
    Overlap {
        /// Unit axis of minimum overlap
        axis: Vec3,
        /// Overlap distance along that axis
        overlap: f32,
        /// Whether the axis came from an edge-pair cross product
        from_edge_pair: bool,
    },
}

/// Separating-axis sweep over two oriented boxes
///
/// Tests box 1's three face axes, then box 2's, then the nine cross
/// products of the face-axis pairs, tracking the minimum overlap seen.
/// Exits as soon as any axis shows overlap below `epsilon` - the boxes are
/// separated along it and the remaining axes are wasted work. Near-parallel
/// axis pairs produce cross products of negligible magnitude and are
/// skipped rather than normalized into an unstable direction.
pub fn separating_axis_sweep(box1: &OrientedBox, box2: &OrientedBox, epsilon: f32) -> SatOutcome {
    let axes1 = box1.world_axes();
    let axes2 = box2.world_axes();
    let projection = BoxProjection::from_boxes(box1, box2);

    let mut min_overlap = f32::MAX;
    let mut min_axis = Vec3::x();
    let mut from_edge_pair = false;
    let mut axes_tested = 0;

    for axis in axes1.iter().chain(axes2.iter()) {
        let unit = axis.normalize();
        axes_tested += 1;
        let overlap = projection.overlap_on_axis(unit);
        if overlap < epsilon {
            return SatOutcome::Separated {
                axis: unit,
                axes_tested,
            };
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            min_axis = unit;
        }
    }

    for axis1 in &axes1 {
        for axis2 in &axes2 {
            let cross = axis1.cross(axis2);
            let length = cross.norm();
            axes_tested += 1;
            if length < epsilon {
                // near-parallel pair: no information on this axis
                continue;
            }
            let unit = cross / length;
            let overlap = projection.overlap_on_axis(unit);
            if overlap < epsilon {
                return SatOutcome::Separated {
                    axis: unit,
                    axes_tested,
                };
            }
            if overlap < min_overlap {
                min_overlap = overlap;
                min_axis = unit;
                from_edge_pair = true;
            }
        }
    }

    SatOutcome::Overlap {
        axis: min_axis,
        overlap: min_overlap,
        from_edge_pair,
    }
}

/// The mutable record accumulating the outcome of one detection call
///
/// Borrows the two bodies for the duration of the call and owns nothing
/// else, so many `Collision` instances for different pairs can be
/// evaluated concurrently as long as nothing mutates the bodies meanwhile.
/// Built fresh per candidate pair each step; never cached across steps.
#[derive(Debug)]
pub struct Collision<'a> {
    kind: CollisionKind,
    object1: &'a Object,
    object2: &'a Object,
    contact: Contact,
}

impl<'a> Collision<'a> {
    /// Build a result holder for a pair, canonicalizing operand order
    pub fn new(object1: &'a Object, object2: &'a Object) -> Self {
        Self::with_kind(object1, object2, CollisionKind::classify(object1, object2))
    }

    /// Build a result holder for a pair whose kind the caller already knows
    ///
    /// Useful for pair managers that classify once and construct many
    /// times. The kind must match what [`CollisionKind::classify`] would
    /// return for the pair.
    pub fn with_kind(object1: &'a Object, object2: &'a Object, kind: CollisionKind) -> Self {
        debug_assert!(
            kind == CollisionKind::classify(object1, object2),
            "collision kind does not match the pair's shapes"
        );
        Self {
            kind,
            object1: first_object(object1, object2),
            object2: second_object(object1, object2),
            contact: Contact::new(Vec3::zeros(), Vec3::zeros(), Vec3::zeros(), 0.0),
        }
    }

    /// The routine selected for this pair
    pub fn kind(&self) -> CollisionKind {
        self.kind
    }

    /// First body in canonical order (the sphere, for mixed pairs)
    pub fn object1(&self) -> &Object {
        self.object1
    }

    /// Second body in canonical order
    pub fn object2(&self) -> &Object {
        self.object2
    }

    /// Run the appropriate detection routine
    ///
    /// Returns whether the bodies collide. On `true` the contact accessors
    /// hold the result until the next `detect` call; on `false` their
    /// contents are unspecified and must not be read.
    pub fn detect(&mut self, config: &CollisionConfig) -> bool {
        let found = match self.kind {
            CollisionKind::SphereSphere => self.detect_sphere_sphere(config),
            CollisionKind::SphereBox => self.detect_sphere_box(config),
            CollisionKind::BoxBox => self.detect_box_box(config),
            CollisionKind::Constraint => self.detect_constraint(),
        };

        if found {
            self.check_contact(config);
        }
        found
    }

    /// Unit separating normal, pointing from the first body to the second
    pub fn normal(&self) -> Vec3 {
        self.contact.normal
    }

    /// World-space contact point on the first body
    pub fn point1(&self) -> Vec3 {
        self.contact.point1
    }

    /// World-space contact point on the second body
    pub fn point2(&self) -> Vec3 {
        self.contact.point2
    }

    /// Interpenetration depth along the normal
    pub fn depth(&self) -> f32 {
        self.contact.depth
    }

    /// The full contact record
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    fn detect_sphere_sphere(&mut self, config: &CollisionConfig) -> bool {
        let (Object::Sphere(sphere1), Object::Sphere(sphere2)) = (self.object1, self.object2)
        else {
            unreachable!("classifier guarantees two sphere operands");
        };

        let touch_distance = sphere1.radius + sphere2.radius;
        let offset = sphere2.center - sphere1.center;
        let distance = offset.norm();
        if distance >= touch_distance {
            return false;
        }

        let normal = if distance > config.epsilon {
            offset / distance
        } else {
            // Concentric centers leave the separating direction undefined;
            // any axis works equally, so fix one instead of emitting NaN.
            log::warn!("concentric spheres, falling back to +x separating normal");
            Vec3::x()
        };

        self.contact = Contact::new(
            normal,
            sphere1.center + normal * sphere1.radius,
            sphere2.center - normal * sphere2.radius,
            touch_distance - distance,
        );
        true
    }

    fn detect_sphere_box(&mut self, config: &CollisionConfig) -> bool {
        let (Object::Sphere(sphere), Object::Box(boxed)) = (self.object1, self.object2) else {
            unreachable!("canonical order puts the sphere first for mixed pairs");
        };

        let model = boxed.model_matrix();
        let local_center = transform_point(&boxed.inv_model_matrix(), sphere.center);
        let local_surface = AaBox::from_box(boxed).closest_point_on_surface(local_center);

        // Normal runs from the sphere center toward the box surface; only
        // the linear part of the model matrix applies to a direction.
        let world_offset = transform_direction(&model, local_surface - local_center);
        let distance = world_offset.norm();
        if distance >= sphere.radius {
            return false;
        }

        let normal = if distance > config.epsilon {
            world_offset / distance
        } else {
            // Center sitting exactly on the surface: take the outward
            // normal of the nearest face instead of a zero-length normal.
            nearest_face_normal(boxed, local_center)
        };

        self.contact = Contact::new(
            normal,
            transform_point(&model, local_center) + normal * sphere.radius,
            transform_point(&model, local_surface),
            sphere.radius - distance,
        );
        self.check_sphere_box_invariants(sphere, boxed, config);
        true
    }

    fn detect_box_box(&mut self, config: &CollisionConfig) -> bool {
        let (Object::Box(box1), Object::Box(box2)) = (self.object1, self.object2) else {
            unreachable!("classifier guarantees two box operands");
        };

        let SatOutcome::Overlap { axis, overlap, .. } =
            separating_axis_sweep(box1, box2, config.epsilon)
        else {
            return false;
        };

        let center_offset = box2.position() - box1.position();
        let normal = if axis.dot(&center_offset) < 0.0 {
            -axis
        } else {
            axis
        };

        // Supporting-plane contact approximation: each point sits on its
        // box's supporting plane perpendicular to the normal. Face/edge
        // clipping for exact per-body contact points is a separate,
        // follow-on concern and does not change the axis selection above.
        let projection = BoxProjection::from_boxes(box1, box2);
        self.contact = Contact::new(
            normal,
            box1.position() + normal * projection.first_half_extent(normal),
            box2.position() - normal * projection.second_half_extent(normal),
            overlap,
        );
        true
    }

    fn detect_constraint(&mut self) -> bool {
        let constraint = match (self.object1, self.object2) {
            (Object::Constraint(constraint), _) | (_, Object::Constraint(constraint)) => {
                constraint
            }
            _ => unreachable!("classifier guarantees a constraint operand"),
        };

        match constraint.collision() {
            Some(contact) => {
                self.contact = contact;
                true
            }
            None => false,
        }
    }

    /// Invariants every successful detection must satisfy
    ///
    /// Violations signal a bug in the detection math, not a runtime
    /// condition: fatal in debug builds, a logged warning in release.
    fn check_contact(&self, config: &CollisionConfig) {
        let normal_error = (self.contact.normal.norm() - 1.0).abs();
        if !self.contact.depth.is_finite() || self.contact.depth < 0.0 {
            log::warn!(
                "collision reported with invalid interpenetration depth {}",
                self.contact.depth
            );
        }
        debug_assert!(
            self.contact.depth.is_finite() && self.contact.depth >= 0.0,
            "interpenetration depth must be finite and non-negative: {}",
            self.contact.depth
        );
        debug_assert!(
            normal_error < config.epsilon,
            "collision normal must be unit length, off by {normal_error}"
        );
    }

    /// Face-selection sanity checks for the sphere-box routine
    #[cfg(debug_assertions)]
    fn check_sphere_box_invariants(
        &self,
        sphere: &Sphere,
        boxed: &OrientedBox,
        config: &CollisionConfig,
    ) {
        // The plane through point1 along the normal supports the sphere
        let to_center = sphere.center - self.contact.point1;
        let support_distance = self.contact.normal.dot(&to_center).abs();
        debug_assert!(
            support_distance >= sphere.radius - config.epsilon,
            "sphere center is closer to the contact plane than its radius"
        );

        // All eight box corners lie on one side of the contact plane
        let mut above = 0;
        let mut below = 0;
        for corner in boxed.world_corners() {
            let side = (corner - self.contact.point2).dot(&self.contact.normal);
            if side >= -config.epsilon {
                above += 1;
            }
            if side < config.epsilon {
                below += 1;
            }
        }
        debug_assert!(
            above == 8 || below == 8,
            "box corners straddle the contact plane ({above} above, {below} below)"
        );
    }

    #[cfg(not(debug_assertions))]
    fn check_sphere_box_invariants(
        &self,
        _sphere: &Sphere,
        _boxed: &OrientedBox,
        _config: &CollisionConfig,
    ) {
    }
}

/// Outward normal of the box face nearest to a local-frame point
fn nearest_face_normal(boxed: &OrientedBox, local_point: Vec3) -> Vec3 {
    let h = boxed.half_size();
    let dx = h.x - local_point.x.abs();
    let dy = h.y - local_point.y.abs();
    let dz = h.z - local_point.z.abs();

    let local_normal = if dx <= dy && dx <= dz {
        Vec3::new(local_point.x.signum(), 0.0, 0.0)
    } else if dy <= dz {
        Vec3::new(0.0, local_point.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, local_point.z.signum())
    };

    transform_direction(&boxed.model_matrix(), local_normal).normalize()
}
