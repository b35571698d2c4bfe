//! Ridge crossings along the straight line between two points.

use super::options::{RidgeCountOptions, RidgeSource};
use super::sampling::{sample_segment, true_runs};
use crate::error::AnalysisError;
use crate::image::{BinaryImage, ImageView};
use crate::types::Point;
use nalgebra::Point2;
use serde::Serialize;

/// Count detail for one segment.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SegmentCount {
    pub count: u32,
    pub samples: usize,
    /// Runs dropped because they touch an endpoint.
    pub endpoint_runs: usize,
    /// Runs dropped as shorter than `min_run_samples`.
    pub short_runs: usize,
}

/// Counts ridges crossed by segments over one preprocessed image.
pub struct RidgeCounter<'a> {
    binary: &'a BinaryImage,
    skeleton: &'a BinaryImage,
    options: &'a RidgeCountOptions,
}

impl<'a> RidgeCounter<'a> {
    pub fn new(
        binary: &'a BinaryImage,
        skeleton: &'a BinaryImage,
        options: &'a RidgeCountOptions,
    ) -> Self {
        Self {
            binary,
            skeleton,
            options,
        }
    }

    fn check_point(&self, p: &Point) -> Result<(), AnalysisError> {
        if self.binary.contains(p.x, p.y) {
            Ok(())
        } else {
            Err(AnalysisError::PointOutOfBounds {
                x: p.x,
                y: p.y,
                width: self.binary.w,
                height: self.binary.h,
            })
        }
    }

    fn is_ridge(&self, p: &Point2<f32>) -> bool {
        let x = (p.x.floor().max(0.0) as usize).min(self.binary.w.saturating_sub(1));
        let y = (p.y.floor().max(0.0) as usize).min(self.binary.h.saturating_sub(1));
        match self.options.source {
            RidgeSource::Skeleton => {
                self.skeleton
                    .any_within(x, y, self.options.skeleton_tolerance_px)
            }
            RidgeSource::Binary => self.binary.get(x, y),
        }
    }

    /// Ridges crossed between `a` and `b`. Symmetric in its arguments.
    pub fn count(&self, a: Point, b: Point) -> Result<u32, AnalysisError> {
        Ok(self.count_detailed(a, b)?.count)
    }

    pub fn count_detailed(&self, a: Point, b: Point) -> Result<SegmentCount, AnalysisError> {
        self.check_point(&a)?;
        self.check_point(&b)?;
        if a == b {
            return Ok(SegmentCount::default());
        }
        // Fixed endpoint order makes the sample positions, and hence the
        // count, independent of argument order.
        let (first, second) = if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) };
        let samples = sample_segment(
            Point2::new(first.x, first.y),
            Point2::new(second.x, second.y),
            self.options.sample_step_px,
        );
        let flags: Vec<bool> = samples.iter().map(|p| self.is_ridge(p)).collect();
        let last = flags.len();

        let mut out = SegmentCount {
            samples: last,
            ..SegmentCount::default()
        };
        for run in true_runs(&flags) {
            let touches_endpoint = run.start == 0 || run.end == last;
            if touches_endpoint && !self.options.count_endpoint_ridges {
                out.endpoint_runs += 1;
            } else if run.len() < self.options.min_run_samples.max(1) {
                out.short_runs += 1;
            } else {
                out.count += 1;
            }
        }
        Ok(out)
    }
}
