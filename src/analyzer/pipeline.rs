//! Analysis pipeline: preprocess → orientation → singular points → pattern,
//! plus the ridge counting flow sharing the same preprocessing.
//!
//! ```no_run
//! use dermatoglyph::{AnalysisInput, AnalyzerParams, FingerprintAnalyzer};
//! use dermatoglyph::image::ImageU8;
//!
//! # fn example(gray: ImageU8) {
//! let analyzer = FingerprintAnalyzer::new(AnalyzerParams::default());
//! match analyzer.analyze(gray, AnalysisInput::default()) {
//!     Ok(result) => println!("pattern: {}", result.pattern_type),
//!     Err(err) => eprintln!("{}: {err}", err.kind()),
//! }
//! # }
//! ```

use super::params::AnalyzerParams;
use crate::classify::{classify_detection, Classification};
use crate::diagnostics::{
    AnalysisReport, InputDescriptor, OrientationStage, PipelineTrace, SingularStage,
    TimingBreakdown,
};
use crate::error::AnalysisError;
use crate::image::ImageU8;
use crate::orientation::{estimate_orientation, OrientationField};
use crate::preprocess::{preprocess, ImageVariant, Preprocessed};
use crate::ridge::{count_pairs, pair_points_with_capacity, RidgeCountSummary, RidgeCounter};
use crate::singular::{detect_singular_points, SingularDetection};
use crate::types::{AnalysisResult, Hand, Point, SingularPoint};
use std::time::Instant;

/// Per-request inputs of a detect run.
#[derive(Clone, Copy, Debug)]
pub struct AnalysisInput {
    pub variant: ImageVariant,
    pub hand: Option<Hand>,
    /// Also count ridges between the detected cores and deltas.
    pub count_ridges: bool,
}

impl Default for AnalysisInput {
    fn default() -> Self {
        Self {
            variant: ImageVariant::default(),
            hand: None,
            count_ridges: true,
        }
    }
}

/// Stateless fingerprint analyzer.
///
/// Holds only immutable parameters; every call owns its buffers, so one
/// analyzer can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct FingerprintAnalyzer {
    params: AnalyzerParams,
}

/// Everything computed before ridge counting.
struct Detection {
    prepared: Preprocessed,
    field: OrientationField,
    singular: SingularDetection,
    classification: Classification,
}

impl FingerprintAnalyzer {
    pub fn new(params: AnalyzerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    /// Run preprocessing alone, for callers that want the rasters.
    pub fn prepare(
        &self,
        gray: ImageU8<'_>,
        variant: ImageVariant,
    ) -> Result<Preprocessed, AnalysisError> {
        preprocess(
            gray,
            variant,
            &self.params.preprocess,
            self.params.min_image_side(),
        )
    }

    /// Detect singular points, classify the pattern and optionally count ridges.
    pub fn analyze(
        &self,
        gray: ImageU8<'_>,
        input: AnalysisInput,
    ) -> Result<AnalysisResult, AnalysisError> {
        Ok(self.analyze_with_diagnostics(gray, input)?.result)
    }

    /// As [`analyze`](Self::analyze), returning the stage trace as well.
    pub fn analyze_with_diagnostics(
        &self,
        gray: ImageU8<'_>,
        input: AnalysisInput,
    ) -> Result<AnalysisReport, AnalysisError> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let det = self.detect(gray, input, &mut timings)?;

        let ridge_count = if input.count_ridges {
            let start = Instant::now();
            let summary = self.count_detected(&det.prepared, &det.singular)?;
            timings.push("ridge_count", start.elapsed().as_secs_f64() * 1000.0);
            Some(summary)
        } else {
            None
        };

        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        let result = AnalysisResult {
            cores: det.singular.cores.clone(),
            deltas: det.singular.deltas.clone(),
            pattern_type: det.classification.pattern_type,
            number_deltas: det.singular.deltas.len(),
            ridge_count: ridge_count.as_ref().map(|s| s.total_count),
            fallback: det.classification.fallback,
            latency_ms: timings.total_ms,
        };
        log::debug!(
            "analyze {}x{}: {} cores, {} deltas -> {} in {:.3} ms",
            gray.w,
            gray.h,
            result.cores.len(),
            result.deltas.len(),
            result.pattern_type,
            timings.total_ms
        );

        let trace = PipelineTrace {
            input: InputDescriptor {
                width: gray.w,
                height: gray.h,
                variant: input.variant,
                block_size: det.field.block_size,
            },
            timings,
            orientation: OrientationStage::from_field(&det.field),
            singular: SingularStage::from(&det.singular),
            classification: det.classification,
            ridge_count,
        };
        Ok(AnalysisReport { result, trace })
    }

    /// Count ridges between caller-supplied cores and deltas.
    pub fn count_ridges(
        &self,
        gray: ImageU8<'_>,
        variant: ImageVariant,
        cores: &[Point],
        deltas: &[Point],
    ) -> Result<RidgeCountSummary, AnalysisError> {
        let prepared = self.prepare(gray, variant)?;
        self.count_prepared(&prepared, cores, deltas)
    }

    /// Count on already preprocessed rasters.
    pub fn count_prepared(
        &self,
        prepared: &Preprocessed,
        cores: &[Point],
        deltas: &[Point],
    ) -> Result<RidgeCountSummary, AnalysisError> {
        self.count_with_capacity(prepared, cores, &vec![1; cores.len()], deltas)
    }

    /// Count between detected points. A whorl centre is paired with up to two
    /// deltas, one per side of the whorl.
    pub fn count_detected(
        &self,
        prepared: &Preprocessed,
        detection: &SingularDetection,
    ) -> Result<RidgeCountSummary, AnalysisError> {
        let cores: Vec<Point> = detection.cores.iter().map(|p| p.point).collect();
        let capacity: Vec<usize> = detection
            .cores
            .iter()
            .map(SingularPoint::core_weight)
            .collect();
        let deltas: Vec<Point> = detection.deltas.iter().map(|p| p.point).collect();
        self.count_with_capacity(prepared, &cores, &capacity, &deltas)
    }

    fn count_with_capacity(
        &self,
        prepared: &Preprocessed,
        cores: &[Point],
        capacity: &[usize],
        deltas: &[Point],
    ) -> Result<RidgeCountSummary, AnalysisError> {
        let counter = RidgeCounter::new(&prepared.binary, &prepared.skeleton, &self.params.ridge);
        // Unpaired points must still lie on the image.
        for p in cores.iter().chain(deltas.iter()) {
            counter.count(*p, *p)?;
        }
        let pairs = pair_points_with_capacity(cores, capacity, deltas);
        count_pairs(&counter, &pairs, self.params.ridge.aggregation)
    }

    fn detect(
        &self,
        gray: ImageU8<'_>,
        input: AnalysisInput,
        timings: &mut TimingBreakdown,
    ) -> Result<Detection, AnalysisError> {
        let prepared = self.prepare(gray, input.variant)?;
        timings.push("preprocess", prepared.elapsed_ms);

        let field = timings.measure("orientation", || {
            estimate_orientation(&prepared.normalized, &self.params.orientation)
        });
        let singular = detect_singular_points(&field, &self.params.singular);
        timings.push("singular", singular.elapsed_ms);
        let classification = timings.measure("classify", || {
            classify_detection(&singular, input.hand, &self.params.classifier)
        });

        Ok(Detection {
            prepared,
            field,
            singular,
            classification,
        })
    }
}
