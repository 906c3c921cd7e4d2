//! Overlap tests between the ship, projectiles and asteroids.
//!
//! Asteroids and projectiles are circles.  The ship is an ellipse that rotates
//! with the hull; [`ellipse_circle_overlap`] uses a cheap approximation rather
//! than an exact Minkowski-sum test: the circle radius inflates the unit
//! ellipse boundary by `radius / max(a, b)`.  Gameplay has been tuned against
//! that approximation, so it is kept as-is.

use bevy::math::Vec2;

/// `true` when two circles overlap (strictly: touching is not a hit).
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// `true` when a circle touches a rotated ellipse.
///
/// * `center`, `rotation`: ellipse pose; `rotation` in radians.
/// * `semi_axes`: `(a, b)` half-lengths along the ellipse's local x and y.
///
/// The circle centre is rotated into the ellipse frame and the normalised
/// value `(x/a)² + (y/b)²` is compared against `(1 + r / max(a, b))²`.
pub fn ellipse_circle_overlap(
    center: Vec2,
    rotation: f32,
    semi_axes: Vec2,
    circle_center: Vec2,
    circle_radius: f32,
) -> bool {
    // Inverse rotation: rotate by -rotation.
    let local = Vec2::from_angle(-rotation).rotate(circle_center - center);
    let normalized = (local.x / semi_axes.x).powi(2) + (local.y / semi_axes.y).powi(2);
    let contribution = circle_radius / semi_axes.x.max(semi_axes.y);
    normalized <= (1.0 + contribution).powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn circles_overlap_when_closer_than_radii() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(20.0, 0.0), 5.0));
    }

    #[test]
    fn ellipse_contains_centre_point() {
        assert!(ellipse_circle_overlap(
            Vec2::new(50.0, 50.0),
            1.0,
            Vec2::new(20.0, 10.0),
            Vec2::new(50.0, 50.0),
            1.0,
        ));
    }

    #[test]
    fn ellipse_long_axis_reaches_further_than_short_axis() {
        let axes = Vec2::new(20.0, 10.0);
        // A point 15 px out along the long axis is inside; along the short axis it is not.
        assert!(ellipse_circle_overlap(Vec2::ZERO, 0.0, axes, Vec2::new(15.0, 0.0), 0.0));
        assert!(!ellipse_circle_overlap(Vec2::ZERO, 0.0, axes, Vec2::new(0.0, 15.0), 0.0));
    }

    #[test]
    fn ellipse_rotation_swaps_axes() {
        let axes = Vec2::new(20.0, 10.0);
        // Rotated a quarter turn, the long axis points along y.
        assert!(ellipse_circle_overlap(Vec2::ZERO, FRAC_PI_2, axes, Vec2::new(0.0, 15.0), 0.0));
        assert!(!ellipse_circle_overlap(Vec2::ZERO, FRAC_PI_2, axes, Vec2::new(15.0, 0.0), 0.0));
    }

    #[test]
    fn circle_radius_inflates_boundary() {
        let axes = Vec2::new(20.0, 10.0);
        let point = Vec2::new(25.0, 0.0);
        assert!(!ellipse_circle_overlap(Vec2::ZERO, 0.0, axes, point, 0.0));
        // 25/20 = 1.25 ≤ 1 + 6/20 = 1.3
        assert!(ellipse_circle_overlap(Vec2::ZERO, 0.0, axes, point, 6.0));
    }
}
