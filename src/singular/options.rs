use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_8;

/// Parameters of the Poincaré-index singular point detector.
///
/// - `ring_radius`: Chebyshev radius of the block ring; the ring holds
///   `8 · ring_radius` blocks.
/// - `tolerance`: accepted deviation (radians) from the ideal windings
///   `+π`, `−π` and `+2π`.
/// - `cluster_distance_px`: single-linkage merge distance between raw
///   detections of the same kind.
/// - `max_per_kind`: cap on reported cores and deltas.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SingularOptions {
    pub ring_radius: usize,
    pub tolerance: f32,
    pub cluster_distance_px: f32,
    pub max_per_kind: usize,
}

impl Default for SingularOptions {
    fn default() -> Self {
        Self {
            ring_radius: 1,
            tolerance: FRAC_PI_8,
            cluster_distance_px: 32.0,
            max_per_kind: 2,
        }
    }
}
