//! Small 2D vector helpers used by the melee resolver.

use glam::DVec2;

/// Unsigned angle between two vectors in degrees, `0..=180`.
///
/// Returns 0 when either vector is (near) zero, so a point sitting exactly
/// on the swing center counts as dead ahead.
pub fn angle_between_deg(a: DVec2, b: DVec2) -> f64 {
    let denom = (a.length_squared() * b.length_squared()).sqrt();
    if denom < 1e-15 {
        return 0.0;
    }
    (a.dot(b) / denom).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Rotate `v` counter-clockwise by `degrees`.
pub fn rotate_deg(v: DVec2, degrees: f64) -> DVec2 {
    DVec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Snap to whichever cardinal axis dominates. Ties go to the x axis and a
/// zero component snaps to the positive direction.
pub fn snap_to_cardinal(v: DVec2) -> DVec2 {
    if v.x.abs() >= v.y.abs() {
        DVec2::new(sign(v.x), 0.0)
    } else {
        DVec2::new(0.0, sign(v.y))
    }
}

/// `v` rotated by +90°.
pub fn perpendicular(v: DVec2) -> DVec2 {
    DVec2::new(-v.y, v.x)
}

fn sign(x: f64) -> f64 {
    if x >= 0.0 {
        1.0
    } else {
        -1.0
    }
}
