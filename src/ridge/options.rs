use serde::{Deserialize, Serialize};

/// Raster sampled along the core–delta segment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RidgeSource {
    /// 1-pixel ridge lines, matched within `skeleton_tolerance_px`.
    #[default]
    Skeleton,
    /// Full-width binary ridge mask.
    Binary,
}

/// How per-pair counts combine into the reported total.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairAggregation {
    #[default]
    Sum,
    Max,
}

/// Ridge counting knobs.
///
/// - `sample_step_px`: distance between consecutive samples on the segment.
/// - `min_run_samples`: shortest run of ridge samples counted as a crossing.
/// - `count_endpoint_ridges`: also count the ridges the core and delta sit on.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RidgeCountOptions {
    pub sample_step_px: f32,
    pub source: RidgeSource,
    pub skeleton_tolerance_px: usize,
    pub min_run_samples: usize,
    pub count_endpoint_ridges: bool,
    pub aggregation: PairAggregation,
}

impl Default for RidgeCountOptions {
    fn default() -> Self {
        Self {
            sample_step_px: 0.5,
            source: RidgeSource::Skeleton,
            skeleton_tolerance_px: 1,
            min_run_samples: 2,
            count_endpoint_ridges: false,
            aggregation: PairAggregation::Sum,
        }
    }
}
