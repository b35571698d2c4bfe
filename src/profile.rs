//! Per-person aggregation of finger analyses.
//!
//! Dermatoglyphic summaries report the total ridge count (TRC) and the total
//! number of deltas over all analysed fingers, plus how often each pattern
//! occurs.

use crate::error::AnalysisError;
use crate::types::{Finger, Hand, PatternType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Analysis outcome of one finger of one person.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FingerRecord {
    pub hand: Hand,
    pub finger: Finger,
    pub pattern_type: PatternType,
    pub number_deltas: usize,
    #[serde(default)]
    pub ridge_count: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DermatoglyphicProfile {
    /// Records sorted by hand, then finger.
    pub fingers: Vec<FingerRecord>,
    pub total_ridge_count: u32,
    pub total_deltas: usize,
    pub pattern_counts: BTreeMap<String, usize>,
}

/// Aggregate finger records. Each (hand, finger) may appear once.
pub fn summarize(records: &[FingerRecord]) -> Result<DermatoglyphicProfile, AnalysisError> {
    let mut fingers = records.to_vec();
    fingers.sort_by_key(|r| (r.hand, r.finger));
    if let Some(dup) = fingers
        .windows(2)
        .find(|w| (w[0].hand, w[0].finger) == (w[1].hand, w[1].finger))
    {
        return Err(AnalysisError::invalid_request(format!(
            "duplicate record for {:?} {:?}",
            dup[0].hand, dup[0].finger
        )));
    }

    let total_ridge_count = fingers.iter().filter_map(|r| r.ridge_count).sum();
    let total_deltas = fingers.iter().map(|r| r.number_deltas).sum();
    let mut pattern_counts = BTreeMap::new();
    for r in &fingers {
        *pattern_counts
            .entry(r.pattern_type.as_str().to_string())
            .or_insert(0) += 1;
    }
    Ok(DermatoglyphicProfile {
        fingers,
        total_ridge_count,
        total_deltas,
        pattern_counts,
    })
}
