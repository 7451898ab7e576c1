//! 2D vector helpers for particle placement and steering.
//!
//! All functions are pure; randomness comes in through an explicit
//! [`Xorshift64`] so callers control determinism.

use glam::DVec2;

use crate::prng::Xorshift64;

/// Uniform random point inside the rectangle inset by `(inset_x, inset_y)`
/// from each edge of a `width` × `height` area.
pub fn random_point(
    rng: &mut Xorshift64,
    width: f64,
    height: f64,
    inset_x: f64,
    inset_y: f64,
) -> DVec2 {
    DVec2::new(
        rng.next_range(inset_x, width - inset_x),
        rng.next_range(inset_y, height - inset_y),
    )
}

/// Unit vector pointing in a uniformly random direction.
pub fn random_direction(rng: &mut Xorshift64) -> DVec2 {
    DVec2::from_angle(rng.next_angle())
}

/// Exclusive containment test: true when `p` lies strictly inside the
/// `width` × `height` rectangle anchored at the origin.
///
/// Points exactly on an edge count as outside, matching the boundary
/// policies which treat an edge hit as a crossing.
pub fn in_area(p: DVec2, width: f64, height: f64) -> bool {
    p.x > 0.0 && p.x < width && p.y > 0.0 && p.y < height
}

/// Clamps `value` to `[min, max]`, substituting `fallback` for NaN and
/// infinities before clamping.
pub fn clamp_finite(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    let v = if value.is_finite() { value } else { fallback };
    v.clamp(min, max)
}

/// Signed angle in radians that rotates `a` onto `b`, wrapped to [-π, π).
pub fn signed_angle(a: DVec2, b: DVec2) -> f64 {
    use std::f64::consts::{PI, TAU};
    let delta = b.y.atan2(b.x) - a.y.atan2(a.x);
    (delta + PI).rem_euclid(TAU) - PI
}

/// Rotates `v` counterclockwise by `radians`.
pub fn rotate(v: DVec2, radians: f64) -> DVec2 {
    let (sin, cos) = radians.sin_cos();
    DVec2::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    #[test]
    fn random_point_respects_inset() {
        let mut rng = Xorshift64::new(3);
        for _ in 0..1000 {
            let p = random_point(&mut rng, 300.0, 200.0, 30.0, 20.0);
            assert!(p.x >= 30.0 && p.x < 270.0, "x out of inset: {}", p.x);
            assert!(p.y >= 20.0 && p.y < 180.0, "y out of inset: {}", p.y);
        }
    }

    #[test]
    fn random_direction_is_unit_length() {
        let mut rng = Xorshift64::new(11);
        for _ in 0..100 {
            let d = random_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn in_area_interior_and_edges() {
        assert!(in_area(DVec2::new(1.0, 1.0), 10.0, 10.0));
        assert!(!in_area(DVec2::new(0.0, 5.0), 10.0, 10.0));
        assert!(!in_area(DVec2::new(10.0, 5.0), 10.0, 10.0));
        assert!(!in_area(DVec2::new(5.0, -0.1), 10.0, 10.0));
        assert!(!in_area(DVec2::new(5.0, 10.1), 10.0, 10.0));
    }

    #[test]
    fn clamp_finite_clamps_and_substitutes() {
        assert_eq!(clamp_finite(5.0, 0.0, 10.0, 1.0), 5.0);
        assert_eq!(clamp_finite(-5.0, 0.0, 10.0, 1.0), 0.0);
        assert_eq!(clamp_finite(50.0, 0.0, 10.0, 1.0), 10.0);
        assert_eq!(clamp_finite(f64::NAN, 0.0, 10.0, 1.0), 1.0);
        assert_eq!(clamp_finite(f64::INFINITY, 0.0, 10.0, 1.0), 1.0);
    }

    #[test]
    fn signed_angle_quarter_turn() {
        let a = DVec2::X;
        let b = DVec2::Y;
        assert!((signed_angle(a, b) - FRAC_PI_2).abs() < EPS);
        assert!((signed_angle(b, a) + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn signed_angle_wraps_past_half_turn() {
        let a = DVec2::from_angle(0.9 * PI);
        let b = DVec2::from_angle(-0.9 * PI);
        // Short way round is +0.2π, not -1.8π.
        assert!((signed_angle(a, b) - 0.2 * PI).abs() < 1e-9);
    }

    #[test]
    fn rotate_quarter_turn_maps_x_to_y() {
        let r = rotate(DVec2::X, FRAC_PI_2);
        assert!((r.x).abs() < EPS);
        assert!((r.y - 1.0).abs() < EPS);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rotate_preserves_length(
                x in -1e3_f64..1e3,
                y in -1e3_f64..1e3,
                r in -10.0_f64..10.0,
            ) {
                let v = DVec2::new(x, y);
                let rotated = rotate(v, r);
                prop_assert!((rotated.length() - v.length()).abs() < 1e-6);
            }

            #[test]
            fn signed_angle_always_in_half_open_turn(
                ax in -1e3_f64..1e3, ay in -1e3_f64..1e3,
                bx in -1e3_f64..1e3, by in -1e3_f64..1e3,
            ) {
                let a = DVec2::new(ax, ay);
                let b = DVec2::new(bx, by);
                prop_assume!(a.length() > 1e-6 && b.length() > 1e-6);
                let r = signed_angle(a, b);
                prop_assert!((-std::f64::consts::PI..std::f64::consts::PI).contains(&r));
            }

            #[test]
            fn rotating_by_signed_angle_aligns_directions(
                ax in -100.0_f64..100.0, ay in -100.0_f64..100.0,
                bx in -100.0_f64..100.0, by in -100.0_f64..100.0,
            ) {
                let a = DVec2::new(ax, ay);
                let b = DVec2::new(bx, by);
                prop_assume!(a.length() > 1e-3 && b.length() > 1e-3);
                let aligned = rotate(a, signed_angle(a, b));
                let cross = aligned.perp_dot(b).abs();
                prop_assert!(cross / (aligned.length() * b.length()) < 1e-6);
            }
        }
    }
}
