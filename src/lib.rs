#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analyzer;
pub mod api;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod profile;
pub mod types;

// Stage modules – public for tools and tests, tuned through `AnalyzerParams`.
pub mod angle;
pub mod classify;
pub mod config;
pub mod orientation;
pub mod preprocess;
pub mod ridge;
pub mod singular;

// --- High-level re-exports -------------------------------------------------

pub use crate::analyzer::{AnalysisInput, AnalyzerParams, FingerprintAnalyzer};
pub use crate::error::{AnalysisError, ErrorResponse};
pub use crate::preprocess::ImageVariant;
pub use crate::types::{
    AnalysisResult, Finger, Hand, PatternType, Point, SingularKind, SingularPoint,
};

pub use crate::diagnostics::{AnalysisReport, PipelineTrace};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use dermatoglyph::prelude::*;
///
/// # fn main() {
/// let (w, h) = (256usize, 256usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let analyzer = FingerprintAnalyzer::new(AnalyzerParams::default());
/// match analyzer.analyze(img, AnalysisInput::default()) {
///     Ok(r) => println!("pattern={} deltas={}", r.pattern_type, r.number_deltas),
///     Err(e) => eprintln!("{}", e.kind()),
/// }
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{
        AnalysisInput, AnalysisResult, AnalyzerParams, FingerprintAnalyzer, ImageVariant,
        PatternType, Point,
    };
}
