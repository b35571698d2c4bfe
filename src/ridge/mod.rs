//! Ridge counting between cores and deltas.
//!
//! Each delta is paired with a core, the straight segment between them is
//! sampled on the skeleton (or binary mask), and runs of ridge samples are
//! counted as crossings. Per-pair counts are aggregated into one total.

pub mod counter;
pub mod options;
pub mod sampling;

pub use counter::{RidgeCounter, SegmentCount};
pub use options::{PairAggregation, RidgeCountOptions, RidgeSource};

use crate::error::AnalysisError;
use crate::types::Point;
use serde::Serialize;

/// Count for one (core, delta) pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PairCount {
    pub core: Point,
    pub delta: Point,
    pub count: u32,
}

/// Per-pair counts and their aggregate.
#[derive(Clone, Debug, Default, Serialize)]
pub struct RidgeCountSummary {
    pub total_count: u32,
    pub pairs: Vec<PairCount>,
}

/// Match every delta to its nearest still-unused core.
///
/// Deltas are visited left to right (then top to bottom); distance ties go to
/// the earlier core. Surplus deltas or cores stay unpaired.
pub fn pair_points(cores: &[Point], deltas: &[Point]) -> Vec<(Point, Point)> {
    pair_points_with_capacity(cores, &vec![1; cores.len()], deltas)
}

/// As [`pair_points`], but core `i` may serve up to `capacity[i]` deltas.
/// Cores without a capacity entry serve one.
pub fn pair_points_with_capacity(
    cores: &[Point],
    capacity: &[usize],
    deltas: &[Point],
) -> Vec<(Point, Point)> {
    let mut order: Vec<usize> = (0..deltas.len()).collect();
    order.sort_by(|&i, &j| {
        deltas[i]
            .x
            .total_cmp(&deltas[j].x)
            .then(deltas[i].y.total_cmp(&deltas[j].y))
    });
    let mut free: Vec<usize> = (0..cores.len())
        .map(|ci| capacity.get(ci).copied().unwrap_or(1))
        .collect();
    let mut pairs = Vec::with_capacity(deltas.len());
    for di in order {
        let delta = deltas[di];
        let best = cores
            .iter()
            .enumerate()
            .filter(|(ci, _)| free[*ci] > 0)
            .min_by(|(ia, a), (ib, b)| {
                a.distance(&delta)
                    .total_cmp(&b.distance(&delta))
                    .then(ia.cmp(ib))
            })
            .map(|(ci, _)| ci);
        if let Some(ci) = best {
            free[ci] -= 1;
            pairs.push((cores[ci], delta));
        }
    }
    pairs
}

pub fn aggregate(counts: impl IntoIterator<Item = u32>, aggregation: PairAggregation) -> u32 {
    let counts = counts.into_iter();
    match aggregation {
        PairAggregation::Sum => counts.sum(),
        PairAggregation::Max => counts.max().unwrap_or(0),
    }
}

/// Count every pair and aggregate. The first failing pair aborts.
pub fn count_pairs(
    counter: &RidgeCounter<'_>,
    pairs: &[(Point, Point)],
    aggregation: PairAggregation,
) -> Result<RidgeCountSummary, AnalysisError> {
    let pairs = pairs
        .iter()
        .map(|&(core, delta)| {
            Ok(PairCount {
                core,
                delta,
                count: counter.count(core, delta)?,
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;
    let total_count = aggregate(pairs.iter().map(|p| p.count), aggregation);
    Ok(RidgeCountSummary { total_count, pairs })
}
