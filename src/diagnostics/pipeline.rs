use crate::classify::Classification;
use crate::diagnostics::TimingBreakdown;
use crate::orientation::{BlockState, OrientationField};
use crate::preprocess::ImageVariant;
use crate::ridge::RidgeCountSummary;
use crate::singular::SingularDetection;
use crate::types::AnalysisResult;
use serde::Serialize;

/// Result produced by
/// [`FingerprintAnalyzer::analyze_with_diagnostics`](crate::FingerprintAnalyzer).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub trace: PipelineTrace,
}

/// Stage-by-stage record of one analysis run.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineTrace {
    pub input: InputDescriptor,
    pub timings: TimingBreakdown,
    pub orientation: OrientationStage,
    pub singular: SingularStage,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ridge_count: Option<RidgeCountSummary>,
}

impl PipelineTrace {
    /// Short human-readable summary used by the command-line tools.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!(
                "input {}x{} ({:?}), block {}",
                self.input.width,
                self.input.height,
                self.input.variant,
                self.input.block_size
            ),
            format!(
                "orientation {}x{} blocks: {} confident, {} filled, {} invalid, mean coherence {:.3}",
                self.orientation.blocks_x,
                self.orientation.blocks_y,
                self.orientation.confident,
                self.orientation.filled,
                self.orientation.invalid,
                self.orientation.mean_coherence
            ),
            format!(
                "singular: {} candidates, raw cores {} / deltas {}",
                self.singular.candidates,
                self.singular.raw_core_count,
                self.singular.raw_delta_count
            ),
            format!(
                "pattern {} via {:?}{}",
                self.classification.pattern_type,
                self.classification.rule,
                if self.classification.fallback {
                    " (fallback)"
                } else {
                    ""
                }
            ),
        ];
        if let Some(rc) = &self.ridge_count {
            lines.push(format!(
                "ridge count {} over {} pair(s)",
                rc.total_count,
                rc.pairs.len()
            ));
        }
        for stage in &self.timings.stages {
            lines.push(format!("  {:<12} {:>8.3} ms", stage.label, stage.elapsed_ms));
        }
        lines.push(format!("  {:<12} {:>8.3} ms", "total", self.timings.total_ms));
        lines
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub variant: ImageVariant,
    pub block_size: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationStage {
    pub blocks_x: usize,
    pub blocks_y: usize,
    pub confident: usize,
    pub filled: usize,
    pub invalid: usize,
    /// Mean coherence over usable blocks.
    pub mean_coherence: f32,
}

impl OrientationStage {
    pub fn from_field(field: &OrientationField) -> Self {
        let (sum, n) = field
            .coherence
            .iter()
            .zip(field.state.iter())
            .filter(|(_, s)| s.is_usable())
            .fold((0.0f32, 0usize), |(sum, n), (c, _)| (sum + c, n + 1));
        Self {
            blocks_x: field.blocks_x,
            blocks_y: field.blocks_y,
            confident: field.count_state(BlockState::Confident),
            filled: field.count_state(BlockState::Filled),
            invalid: field.count_state(BlockState::Invalid),
            mean_coherence: if n == 0 { 0.0 } else { sum / n as f32 },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingularStage {
    pub candidates: usize,
    pub raw_core_count: usize,
    pub raw_delta_count: usize,
    pub reported_cores: usize,
    pub reported_deltas: usize,
}

impl From<&SingularDetection> for SingularStage {
    fn from(det: &SingularDetection) -> Self {
        Self {
            candidates: det.candidates,
            raw_core_count: det.raw_core_count,
            raw_delta_count: det.raw_delta_count,
            reported_cores: det.cores.len(),
            reported_deltas: det.deltas.len(),
        }
    }
}
