use crate::ridge::{PairCount, RidgeCountSummary};
use crate::types::{AnalysisResult, PatternType, Point};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectResponse {
    pub cores: Vec<Point>,
    pub deltas: Vec<Point>,
    pub pattern_type: PatternType,
    pub number_deltas: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ridge_count: Option<u32>,
}

impl From<AnalysisResult> for DetectResponse {
    fn from(result: AnalysisResult) -> Self {
        Self {
            cores: result.cores.iter().map(|p| p.point).collect(),
            deltas: result.deltas.iter().map(|p| p.point).collect(),
            pattern_type: result.pattern_type,
            number_deltas: result.number_deltas,
            ridge_count: result.ridge_count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CountRidgesResponse {
    pub total_count: u32,
    pub pairs: Vec<PairCount>,
}

impl From<RidgeCountSummary> for CountRidgesResponse {
    fn from(summary: RidgeCountSummary) -> Self {
        Self {
            total_count: summary.total_count,
            pairs: summary.pairs,
        }
    }
}
