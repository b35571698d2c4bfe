//! Parameter bundle configuring every analysis stage.
//!
//! All groups deserialize with per-field defaults, so a JSON file only needs
//! the knobs it changes:
//!
//! ```json
//! { "orientation": { "block_size": 12 }, "ridge": { "aggregation": "max" } }
//! ```

use crate::classify::ClassifierOptions;
use crate::orientation::OrientationOptions;
use crate::preprocess::PreprocessOptions;
use crate::ridge::RidgeCountOptions;
use crate::singular::SingularOptions;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    pub preprocess: PreprocessOptions,
    pub orientation: OrientationOptions,
    pub singular: SingularOptions,
    pub classifier: ClassifierOptions,
    pub ridge: RidgeCountOptions,
}

impl AnalyzerParams {
    /// Smallest image side the pipeline accepts: one orientation block.
    pub fn min_image_side(&self) -> usize {
        self.orientation.block_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::LoopGranularity;
    use crate::ridge::PairAggregation;

    #[test]
    fn partial_json_keeps_defaults() {
        let json = r#"{
            "orientation": { "block_size": 12 },
            "classifier": { "loop_granularity": "fine" },
            "ridge": { "aggregation": "max" }
        }"#;
        let params: AnalyzerParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.orientation.block_size, 12);
        assert_eq!(params.orientation.min_support, 2);
        assert_eq!(params.classifier.loop_granularity, LoopGranularity::Fine);
        assert_eq!(params.ridge.aggregation, PairAggregation::Max);
        assert_eq!(params.singular.max_per_kind, 2);
        assert_eq!(params.min_image_side(), 12);
    }
}
