//! Angle utilities for undirected (π-periodic) ridge orientations.
//!
//! Ridge flow has no head/tail, so every orientation lives in `[0, π)` and
//! all averaging happens on doubled angles.

use std::f32::consts::{FRAC_PI_2, PI};

/// Normalizes an angle into the range [0, π).
#[inline]
pub fn normalize_half_pi(angle: f32) -> f32 {
    let mut norm = angle.rem_euclid(PI);
    if norm >= PI {
        norm -= PI;
    }
    if norm >= PI - 1e-6 {
        0.0
    } else {
        norm
    }
}

/// Smallest unsigned difference between two orientations, treating
/// antipodal directions as equal. Result in [0, π/2].
#[inline]
pub fn angular_difference(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs().rem_euclid(PI);
    if diff > FRAC_PI_2 {
        PI - diff
    } else {
        diff
    }
}

/// Signed orientation step from `from` to `to`, folded into (−π/2, π/2].
///
/// This is the increment summed by the Poincaré index.
#[inline]
pub fn signed_orientation_step(from: f32, to: f32) -> f32 {
    let mut d = (to - from).rem_euclid(PI);
    if d > FRAC_PI_2 {
        d -= PI;
    }
    d
}

/// Doubled-angle unit vector `(cos 2θ, sin 2θ)` of an orientation.
#[inline]
pub fn doubled(theta: f32) -> [f32; 2] {
    let (s, c) = (2.0 * theta).sin_cos();
    [c, s]
}

/// Orientation in [0, π) of a doubled-angle vector.
#[inline]
pub fn from_doubled(v: [f32; 2]) -> f32 {
    normalize_half_pi(0.5 * v[1].atan2(v[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn normalize_half_pi_basic() {
        assert!(approx_eq(normalize_half_pi(0.5), 0.5));
        assert!(approx_eq(normalize_half_pi(-FRAC_PI_4), 3.0 * FRAC_PI_4));
        assert!(approx_eq(normalize_half_pi(PI), 0.0));
        assert!(approx_eq(normalize_half_pi(3.0 * PI), 0.0));
    }

    #[test]
    fn angular_difference_handles_wrap() {
        assert!(approx_eq(angular_difference(0.0, PI), 0.0));
        assert!(approx_eq(angular_difference(0.05, PI - 0.05), 0.1));
        assert!(approx_eq(angular_difference(0.0, FRAC_PI_2), FRAC_PI_2));
        assert!(approx_eq(
            angular_difference(0.25, 1.7),
            angular_difference(1.7, 0.25)
        ));
    }

    #[test]
    fn signed_step_folds_into_half_open_range() {
        assert!(approx_eq(signed_orientation_step(0.1, 0.3), 0.2));
        assert!(approx_eq(signed_orientation_step(0.3, 0.1), -0.2));
        // Crossing the 0/π seam takes the short way round.
        assert!(approx_eq(signed_orientation_step(PI - 0.1, 0.1), 0.2));
        assert!(approx_eq(signed_orientation_step(0.1, PI - 0.1), -0.2));
        assert!(approx_eq(signed_orientation_step(0.0, FRAC_PI_2), FRAC_PI_2));
    }

    #[test]
    fn doubled_round_trip_stays_in_range() {
        for k in 0..32 {
            let theta = k as f32 * PI / 32.0;
            let back = from_doubled(doubled(theta));
            assert!(back >= 0.0 && back < PI);
            assert!(angular_difference(back, theta) < 1e-4);
        }
    }
}
