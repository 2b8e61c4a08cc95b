//! Closest-point and projection helpers for the detection routines
//!
//! Both helpers are transient: built for one detection call, queried, and
//! dropped. They carry no identity beyond the geometry captured at
//! construction.

use crate::foundation::math::Vec3;

use super::shape::OrientedBox;

/// An axis-aligned box given by its half-extents, centered at the origin
///
/// Used as the local-frame view of an [`OrientedBox`]: queries against the
/// oriented box are transformed into this frame, answered here, and
/// transformed back.
#[derive(Debug, Clone, Copy)]
pub struct AaBox {
    half_size: Vec3,
}

impl AaBox {
    /// Create an axis-aligned box from half-extents
    pub fn new(half_size: Vec3) -> Self {
        Self { half_size }
    }

    /// The local-frame view of an oriented box
    pub fn from_box(boxed: &OrientedBox) -> Self {
        Self::new(boxed.half_size())
    }

    /// Whether a local-frame point lies strictly inside the box
    pub fn contains(&self, point: Vec3) -> bool {
        point.x.abs() < self.half_size.x
            && point.y.abs() < self.half_size.y
            && point.z.abs() < self.half_size.z
    }

    /// Closest point on the box *surface* to a local-frame point
    ///
    /// For an exterior point this is the usual component-wise clamp (see
    /// Ericson, Real-Time Collision Detection, 5.1.3). An interior point
    /// must still land on the surface, so it snaps to the nearest face
    /// along the axis of least penetration.
    pub fn closest_point_on_surface(&self, point: Vec3) -> Vec3 {
        let h = self.half_size;

        if !self.contains(point) {
            return Vec3::new(
                point.x.clamp(-h.x, h.x),
                point.y.clamp(-h.y, h.y),
                point.z.clamp(-h.z, h.z),
            );
        }

        // Interior: distance to each face pair, snap along the smallest
        let dx = h.x - point.x.abs();
        let dy = h.y - point.y.abs();
        let dz = h.z - point.z.abs();

        let mut closest = point;
        if dx <= dy && dx <= dz {
            closest.x = h.x * point.x.signum();
        } else if dy <= dz {
            closest.y = h.y * point.y.signum();
        } else {
            closest.z = h.z * point.z.signum();
        }
        closest
    }
}

/// Projection state for a separating-axis test between two oriented boxes
///
/// Captures both boxes' world-space axis triples, their half-extents, and
/// the center-to-center offset once, then answers "how much do the boxes
/// overlap along this axis" for each of the fifteen candidate axes.
///
/// The stored axes are the model-matrix images of the local unit axes, so
/// they carry any scale; the half-extents stay in local units and the
/// product gives correct world-space projections. Query axes must be unit
/// length for the returned overlap to be a world-space distance.
#[derive(Debug, Clone, Copy)]
pub struct BoxProjection {
    axes1: [Vec3; 3],
    half1: Vec3,
    axes2: [Vec3; 3],
    half2: Vec3,
    center_offset: Vec3,
}

impl BoxProjection {
    /// Capture the projection state for one box pair
    pub fn new(
        axes1: [Vec3; 3],
        half1: Vec3,
        axes2: [Vec3; 3],
        half2: Vec3,
        center_offset: Vec3,
    ) -> Self {
        Self {
            axes1,
            half1,
            axes2,
            half2,
            center_offset,
        }
    }

    /// Capture the projection state directly from a box pair
    pub fn from_boxes(box1: &OrientedBox, box2: &OrientedBox) -> Self {
        Self::new(
            box1.world_axes(),
            box1.half_size(),
            box2.world_axes(),
            box2.half_size(),
            box2.position() - box1.position(),
        )
    }

    /// Signed overlap of the two boxes projected onto a unit axis
    ///
    /// Positive means the projected intervals overlap by that distance;
    /// zero or negative means the axis separates the boxes.
    pub fn overlap_on_axis(&self, axis: Vec3) -> f32 {
        let r1 = projected_half_extent(&self.axes1, self.half1, axis);
        let r2 = projected_half_extent(&self.axes2, self.half2, axis);
        r1 + r2 - self.center_offset.dot(&axis).abs()
    }

    /// Half-length of the first box's projection onto a unit axis
    pub fn first_half_extent(&self, axis: Vec3) -> f32 {
        projected_half_extent(&self.axes1, self.half1, axis)
    }

    /// Half-length of the second box's projection onto a unit axis
    pub fn second_half_extent(&self, axis: Vec3) -> f32 {
        projected_half_extent(&self.axes2, self.half2, axis)
    }
}

/// Half-length of a box's projection onto an axis
fn projected_half_extent(axes: &[Vec3; 3], half: Vec3, axis: Vec3) -> f32 {
    axis.dot(&axes[0]).abs() * half.x
        + axis.dot(&axes[1]).abs() * half.y
        + axis.dot(&axes[2]).abs() * half.z
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    fn unit_axes() -> [Vec3; 3] {
        [Vec3::x(), Vec3::y(), Vec3::z()]
    }

    #[test]
    fn test_exterior_point_clamps_to_surface() {
        let aabox = AaBox::new(Vec3::new(1.0, 2.0, 3.0));

        let closest = aabox.closest_point_on_surface(Vec3::new(5.0, 0.5, -4.0));
        assert_relative_eq!(closest, Vec3::new(1.0, 0.5, -3.0), epsilon = EPSILON);
    }

    #[test]
    fn test_surface_point_is_fixed() {
        let aabox = AaBox::new(Vec3::new(1.0, 1.0, 1.0));

        let on_face = Vec3::new(1.0, 0.2, -0.3);
        assert_relative_eq!(
            aabox.closest_point_on_surface(on_face),
            on_face,
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_interior_point_snaps_to_nearest_face() {
        let aabox = AaBox::new(Vec3::new(1.0, 1.0, 1.0));

        // Closest face is +x (0.2 away); y and z faces are farther
        let closest = aabox.closest_point_on_surface(Vec3::new(0.8, 0.1, -0.4));
        assert_relative_eq!(closest, Vec3::new(1.0, 0.1, -0.4), epsilon = EPSILON);
    }

    #[test]
    fn test_center_snaps_to_smallest_half_extent() {
        let aabox = AaBox::new(Vec3::new(3.0, 1.0, 2.0));

        // From the exact center the y faces are nearest
        let closest = aabox.closest_point_on_surface(Vec3::zeros());
        assert_relative_eq!(closest.y.abs(), 1.0, epsilon = EPSILON);
        assert_relative_eq!(closest.x, 0.0, epsilon = EPSILON);
        assert_relative_eq!(closest.z, 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_separated_boxes_have_negative_overlap() {
        let projection = BoxProjection::new(
            unit_axes(),
            Vec3::new(1.0, 1.0, 1.0),
            unit_axes(),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(3.0, 0.0, 0.0),
        );

        assert_relative_eq!(projection.overlap_on_axis(Vec3::x()), -1.0, epsilon = EPSILON);
        // The boxes are not separated along y
        assert_relative_eq!(projection.overlap_on_axis(Vec3::y()), 2.0, epsilon = EPSILON);
    }

    #[test]
    fn test_overlapping_boxes_have_positive_overlap() {
        let projection = BoxProjection::new(
            unit_axes(),
            Vec3::new(1.0, 1.0, 1.0),
            unit_axes(),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        );

        assert_relative_eq!(projection.overlap_on_axis(Vec3::x()), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_touching_boxes_have_zero_overlap() {
        let projection = BoxProjection::new(
            unit_axes(),
            Vec3::new(1.0, 1.0, 1.0),
            unit_axes(),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(2.0, 0.0, 0.0),
        );

        assert_relative_eq!(projection.overlap_on_axis(Vec3::x()), 0.0, epsilon = EPSILON);
    }

    #[test]
    fn test_scaled_axes_extend_projection() {
        // Box 1 twice as long along x: world axis carries the scale
        let projection = BoxProjection::new(
            [Vec3::new(2.0, 0.0, 0.0), Vec3::y(), Vec3::z()],
            Vec3::new(1.0, 1.0, 1.0),
            unit_axes(),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(3.0, 0.0, 0.0),
        );

        // Projected half-extents 2 + 1 against center distance 3: touching
        assert_relative_eq!(projection.overlap_on_axis(Vec3::x()), 0.0, epsilon = EPSILON);
    }
}
