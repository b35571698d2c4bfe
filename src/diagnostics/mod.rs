//! Diagnostics returned alongside an analysis result.
//!
//! `AnalysisReport` pairs the regular [`crate::types::AnalysisResult`] with a
//! `PipelineTrace` holding per-stage counts and timings.

pub mod pipeline;
pub mod timing;

pub use pipeline::{AnalysisReport, InputDescriptor, OrientationStage, PipelineTrace, SingularStage};
pub use timing::{StageTiming, TimingBreakdown};
