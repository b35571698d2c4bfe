//! Core and delta detection on the block orientation field.
//!
//! Raw Poincaré detections are merged per kind by single linkage, then the
//! strongest `max_per_kind` of each kind are reported. The pre-cap counts are
//! kept because pattern classification looks at every singularity found.

pub mod cluster;
pub mod options;
pub mod poincare;
pub mod select;

pub use options::SingularOptions;

use crate::orientation::OrientationField;
use crate::types::{SingularKind, SingularPoint};
use serde::Serialize;
use std::time::Instant;

/// Reported singular points plus the counts seen before capping.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SingularDetection {
    pub cores: Vec<SingularPoint>,
    pub deltas: Vec<SingularPoint>,
    /// Clustered cores before the cap, whorl-type cores counted twice.
    pub raw_core_count: usize,
    /// Clustered deltas before the cap.
    pub raw_delta_count: usize,
    /// Ring detections before clustering.
    pub candidates: usize,
    pub elapsed_ms: f64,
}

/// Core weight used by the classifier: a whorl-type core stands for two.
pub fn core_weight(points: &[SingularPoint]) -> usize {
    points.iter().map(SingularPoint::core_weight).sum()
}

/// Locate cores and deltas. A field without confident blocks yields an
/// empty detection.
pub fn detect_singular_points(
    field: &OrientationField,
    options: &SingularOptions,
) -> SingularDetection {
    let start = Instant::now();
    if !field.has_confident_blocks() {
        return SingularDetection::default();
    }

    let raw = poincare::scan_field(field, options.ring_radius, options.tolerance);
    let candidates = raw.len();
    let (raw_cores, raw_deltas): (Vec<SingularPoint>, Vec<SingularPoint>) =
        raw.into_iter().partition(|p| p.kind == SingularKind::Core);

    let cores = cluster::cluster_points(&raw_cores, options.cluster_distance_px);
    let deltas = cluster::cluster_points(&raw_deltas, options.cluster_distance_px);
    let raw_core_count = core_weight(&cores);
    let raw_delta_count = deltas.len();

    if cores.len() > options.max_per_kind || deltas.len() > options.max_per_kind {
        log::debug!(
            "singular: capping {} cores / {} deltas to {} per kind",
            cores.len(),
            deltas.len(),
            options.max_per_kind
        );
    }
    let cores = select::cap_strongest(cores, options.max_per_kind);
    let deltas = select::cap_strongest(deltas, options.max_per_kind);
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    log::debug!(
        "singular: {} candidates -> {} cores, {} deltas (raw weight {}/{}) in {:.3} ms",
        candidates,
        cores.len(),
        deltas.len(),
        raw_core_count,
        raw_delta_count,
        elapsed_ms
    );

    SingularDetection {
        cores,
        deltas,
        raw_core_count,
        raw_delta_count,
        candidates,
        elapsed_ms,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::BlockState;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    /// Loop-like field: a core and a delta on block corners, so four rings
    /// enclose each singularity and the cluster centroid is exact.
    fn loop_field(core: (f32, f32), delta: (f32, f32)) -> OrientationField {
        let (n, block) = (16usize, 16usize);
        let mut angles = Vec::with_capacity(n * n);
        for by in 0..n {
            for bx in 0..n {
                let x = (bx * block) as f32 + 8.0;
                let y = (by * block) as f32 + 8.0;
                let a = (y - core.1).atan2(x - core.0);
                let b = (y - delta.1).atan2(x - delta.0);
                angles.push(0.5 * (a - b) + FRAC_PI_2);
            }
        }
        OrientationField::from_angles(n, n, block, angles)
    }

    #[test]
    fn analytic_loop_gives_one_core_and_one_delta() {
        let field = loop_field((128.0, 96.0), (80.0, 176.0));
        let det = detect_singular_points(&field, &SingularOptions::default());
        assert_eq!(det.cores.len(), 1, "{:?}", det.cores);
        assert_eq!(det.deltas.len(), 1, "{:?}", det.deltas);
        assert!(det.cores[0].point.distance(&crate::types::Point::new(128.0, 96.0)) < 1.0);
        assert!(det.deltas[0].point.distance(&crate::types::Point::new(80.0, 176.0)) < 1.0);
        assert_abs_diff_eq!(det.cores[0].winding, PI, epsilon = 1e-4);
        assert_abs_diff_eq!(det.deltas[0].winding, -PI, epsilon = 1e-4);
        assert_eq!((det.raw_core_count, det.raw_delta_count), (1, 1));
    }

    #[test]
    fn parallel_field_has_no_singularity() {
        let field = OrientationField::from_angles(6, 6, 16, vec![0.4; 36]);
        let det = detect_singular_points(&field, &SingularOptions::default());
        assert!(det.cores.is_empty() && det.deltas.is_empty());
        assert_eq!(det.candidates, 0);
    }

    #[test]
    fn no_confident_block_is_empty() {
        let mut field = loop_field((128.0, 96.0), (80.0, 176.0));
        field.state.iter_mut().for_each(|s| *s = BlockState::Invalid);
        let det = detect_singular_points(&field, &SingularOptions::default());
        assert!(det.cores.is_empty() && det.deltas.is_empty());
    }

    #[test]
    fn cap_keeps_raw_counts() {
        // Three isolated cores far apart.
        let (n, block) = (30usize, 16usize);
        let centres = [(64.0f32, 64.0f32), (256.0, 64.0), (416.0, 352.0)];
        let mut angles = Vec::with_capacity(n * n);
        for by in 0..n {
            for bx in 0..n {
                let x = (bx * block) as f32 + 8.0;
                let y = (by * block) as f32 + 8.0;
                let s: f32 = centres.iter().map(|c| (y - c.1).atan2(x - c.0)).sum();
                angles.push(0.5 * s);
            }
        }
        let field = OrientationField::from_angles(n, n, block, angles);
        let det = detect_singular_points(&field, &SingularOptions::default());
        assert_eq!(det.raw_core_count, 3);
        assert_eq!(det.cores.len(), 2);
    }
}
