//! Pattern classification from core/delta counts.
//!
//! A deterministic rule table; every configuration maps to a pattern, so the
//! classifier never fails. Configurations matching no rule fall back to
//! `arch` and are flagged. A lone whorl-type core (winding near a full
//! turn) is a whorl centre by itself, whatever its delta count up to two.

use crate::singular::{core_weight, SingularDetection};
use crate::types::{Hand, PatternType, SingularPoint};
use serde::{Deserialize, Serialize};

/// How far loops are sub-classified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopGranularity {
    /// Every loop is reported as `loop`.
    #[default]
    Coarse,
    /// Loops become `radial_loop` or `ulnar_loop` when the hand is known.
    Fine,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierOptions {
    pub loop_granularity: LoopGranularity,
}

/// Which table entry produced the pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassRule {
    ExcessSingularities,
    NoSingularities,
    WhorlCentre,
    SingleLoop,
    TwoCoresTwoDeltas,
    TwoCoresOneDelta,
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub pattern_type: PatternType,
    pub rule: ClassRule,
    pub fallback: bool,
}

impl Classification {
    fn by(rule: ClassRule, pattern_type: PatternType) -> Self {
        Self {
            pattern_type,
            rule,
            fallback: rule == ClassRule::Fallback,
        }
    }
}

/// Classify from capped points and the raw (pre-cap) counts.
///
/// Core counts are weighted: a whorl-type core counts as two.
pub fn classify(
    cores: &[SingularPoint],
    deltas: &[SingularPoint],
    raw_cores: usize,
    raw_deltas: usize,
    hand: Option<Hand>,
    options: &ClassifierOptions,
) -> Classification {
    if raw_cores > 2 || raw_deltas > 2 {
        return Classification::by(ClassRule::ExcessSingularities, PatternType::DoubleWhorl);
    }
    if let [core] = cores {
        if core.is_whorl_core() && deltas.len() <= 2 {
            return Classification::by(ClassRule::WhorlCentre, PatternType::Whorl);
        }
    }
    match (core_weight(cores), deltas.len()) {
        (0, 0) => Classification::by(ClassRule::NoSingularities, PatternType::Arch),
        (1, 1) => Classification::by(
            ClassRule::SingleLoop,
            loop_pattern(&cores[0], &deltas[0], hand, options.loop_granularity),
        ),
        (2, 2) => Classification::by(ClassRule::TwoCoresTwoDeltas, PatternType::Whorl),
        (2, 1) => Classification::by(ClassRule::TwoCoresOneDelta, PatternType::DoubleWhorl),
        _ => Classification::by(ClassRule::Fallback, PatternType::Arch),
    }
}

/// Convenience wrapper over a detector result.
pub fn classify_detection(
    detection: &SingularDetection,
    hand: Option<Hand>,
    options: &ClassifierOptions,
) -> Classification {
    classify(
        &detection.cores,
        &detection.deltas,
        detection.raw_core_count,
        detection.raw_delta_count,
        hand,
        options,
    )
}

/// Ulnar loops open towards the little finger. On a right hand viewed as a
/// print that is the delta lying left of the core; the left hand mirrors it.
fn loop_pattern(
    core: &SingularPoint,
    delta: &SingularPoint,
    hand: Option<Hand>,
    granularity: LoopGranularity,
) -> PatternType {
    let Some(hand) = hand else {
        return PatternType::Loop;
    };
    if granularity == LoopGranularity::Coarse {
        return PatternType::Loop;
    }
    let delta_left = delta.point.x < core.point.x;
    match (hand, delta_left) {
        (Hand::Right, true) | (Hand::Left, false) => PatternType::UlnarLoop,
        (Hand::Right, false) | (Hand::Left, true) => PatternType::RadialLoop,
    }
}
