//! Discrete Poincaré index over rings of orientation blocks.
//!
//! The ring is visited in order of increasing `atan2(dy, dx)` (clockwise on
//! screen since y points down). Each step between consecutive orientations
//! is folded into `(−π/2, π/2]`, so the closed sum is a multiple of `π`:
//! `+π` core, `−π` delta, `+2π` whorl centre, `0` regular flow.

use crate::angle::signed_orientation_step;
use crate::orientation::OrientationField;
use crate::types::{Point, SingularKind, SingularPoint};
use std::f32::consts::PI;

/// Block offsets at Chebyshev distance `radius`, sorted by angle.
pub fn ring_offsets(radius: usize) -> Vec<(isize, isize)> {
    let r = radius.max(1) as isize;
    let mut ring: Vec<(isize, isize)> = Vec::with_capacity(8 * r as usize);
    for dy in -r..=r {
        for dx in -r..=r {
            if dx.abs().max(dy.abs()) == r {
                ring.push((dx, dy));
            }
        }
    }
    ring.sort_by(|a, b| {
        let ta = (a.1 as f32).atan2(a.0 as f32);
        let tb = (b.1 as f32).atan2(b.0 as f32);
        ta.total_cmp(&tb)
    });
    ring
}

/// Winding of the orientation along the ring centred on block `(bx, by)`.
///
/// `None` when the ring leaves the grid or touches an `Invalid` block.
pub fn poincare_index(
    field: &OrientationField,
    bx: usize,
    by: usize,
    ring: &[(isize, isize)],
) -> Option<f32> {
    let mut angles = Vec::with_capacity(ring.len());
    for &(dx, dy) in ring {
        let x = bx as isize + dx;
        let y = by as isize + dy;
        if x < 0 || y < 0 || x >= field.blocks_x as isize || y >= field.blocks_y as isize {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if !field.block_state(x, y).is_usable() {
            return None;
        }
        angles.push(field.angle(x, y));
    }
    if angles.is_empty() {
        return None;
    }
    let n = angles.len();
    let total = (0..n)
        .map(|i| signed_orientation_step(angles[i], angles[(i + 1) % n]))
        .sum();
    Some(total)
}

/// Map a winding onto a singularity kind within `tolerance`.
pub fn classify_winding(winding: f32, tolerance: f32) -> Option<SingularKind> {
    if (winding - PI).abs() <= tolerance || (winding - 2.0 * PI).abs() <= tolerance {
        Some(SingularKind::Core)
    } else if (winding + PI).abs() <= tolerance {
        Some(SingularKind::Delta)
    } else {
        None
    }
}

/// Raw detections at every block centre whose ring winds.
pub fn scan_field(
    field: &OrientationField,
    ring_radius: usize,
    tolerance: f32,
) -> Vec<SingularPoint> {
    let ring = ring_offsets(ring_radius);
    let mut out = Vec::new();
    let mut ignored = 0usize;
    for by in 0..field.blocks_y {
        for bx in 0..field.blocks_x {
            let Some(winding) = poincare_index(field, bx, by, &ring) else {
                continue;
            };
            match classify_winding(winding, tolerance) {
                Some(kind) => {
                    let [x, y] = field.block_center(bx, by);
                    // Snap to the ideal value; fold noise stays out of ranking.
                    let ideal = (winding / PI).round() * PI;
                    out.push(SingularPoint {
                        point: Point::new(x, y),
                        kind,
                        winding: ideal,
                    });
                }
                None if winding.abs() > 0.5 * PI => ignored += 1,
                None => {}
            }
        }
    }
    if ignored > 0 {
        log::debug!("poincare: {} rings with unclassified winding", ignored);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn ring_has_eight_r_blocks_in_angle_order() {
        let ring = ring_offsets(1);
        assert_eq!(
            ring,
            vec![(-1, -1), (0, -1), (1, -1), (1, 0), (1, 1), (0, 1), (-1, 1), (-1, 0)]
        );
        assert_eq!(ring_offsets(2).len(), 16);
    }

    fn field_from(f: impl Fn(f32, f32) -> f32, n: usize) -> OrientationField {
        let block = 16usize;
        let mut angles = Vec::with_capacity(n * n);
        for by in 0..n {
            for bx in 0..n {
                let x = (bx * block) as f32 + 8.0;
                let y = (by * block) as f32 + 8.0;
                angles.push(f(x, y));
            }
        }
        OrientationField::from_angles(n, n, block, angles)
    }

    #[test]
    fn windings_of_elementary_singularities() {
        let ring = ring_offsets(1);
        let c = (40.0f32, 40.0f32);
        let core = field_from(|x, y| 0.5 * (y - c.1).atan2(x - c.0) + FRAC_PI_2, 5);
        let delta = field_from(|x, y| -0.5 * (y - c.1).atan2(x - c.0), 5);
        let whorl = field_from(|x, y| (y - c.1).atan2(x - c.0) + FRAC_PI_2, 5);
        let parallel = field_from(|_, _| 0.7, 5);

        let w = |f: &OrientationField| poincare_index(f, 2, 2, &ring).unwrap();
        assert!((w(&core) - PI).abs() < 1e-3);
        assert!((w(&delta) + PI).abs() < 1e-3);
        assert!((w(&whorl) - 2.0 * PI).abs() < 1e-3);
        assert!(w(&parallel).abs() < 1e-3);
        assert!(poincare_index(&core, 0, 2, &ring).is_none());
    }

    #[test]
    fn invalid_block_skips_ring() {
        let ring = ring_offsets(1);
        let mut field = field_from(|_, _| 0.2, 3);
        field.state[0] = crate::orientation::BlockState::Invalid;
        assert!(poincare_index(&field, 1, 1, &ring).is_none());
    }

    #[test]
    fn winding_classification_bands() {
        let tol = PI / 8.0;
        assert_eq!(classify_winding(PI - 0.1, tol), Some(SingularKind::Core));
        assert_eq!(classify_winding(-PI + 0.1, tol), Some(SingularKind::Delta));
        assert_eq!(classify_winding(2.0 * PI, tol), Some(SingularKind::Core));
        assert_eq!(classify_winding(0.0, tol), None);
        assert_eq!(classify_winding(PI * 0.5, tol), None);
    }
}
