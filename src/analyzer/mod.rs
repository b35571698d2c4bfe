//! Orchestration of the analysis stages.
//!
//! Modules
//! - [`params`]: the [`AnalyzerParams`] bundle, loadable from JSON.
//! - `pipeline`: the [`FingerprintAnalyzer`] running detect and count flows.

pub mod params;
mod pipeline;

pub use params::AnalyzerParams;
pub use pipeline::{AnalysisInput, FingerprintAnalyzer};
