use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel coordinates, origin top-left, x right, y down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn distance(&self, other: &Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingularKind {
    Core,
    Delta,
}

/// A detected core or delta with the measured Poincaré winding (radians).
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SingularPoint {
    pub point: Point,
    pub kind: SingularKind,
    pub winding: f32,
}

impl SingularPoint {
    /// Cores whose winding is close to a full turn mark a whorl centre.
    pub fn is_whorl_core(&self) -> bool {
        self.kind == SingularKind::Core && self.winding > 1.5 * std::f32::consts::PI
    }

    /// Number of loop cores this point stands for: a whorl centre counts twice,
    /// deltas count zero.
    pub fn core_weight(&self) -> usize {
        match self.kind {
            SingularKind::Delta => 0,
            SingularKind::Core if self.is_whorl_core() => 2,
            SingularKind::Core => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Arch,
    Loop,
    RadialLoop,
    UlnarLoop,
    Whorl,
    DoubleWhorl,
}

impl PatternType {
    pub const ALL: [PatternType; 6] = [
        PatternType::Arch,
        PatternType::Loop,
        PatternType::RadialLoop,
        PatternType::UlnarLoop,
        PatternType::Whorl,
        PatternType::DoubleWhorl,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatternType::Arch => "arch",
            PatternType::Loop => "loop",
            PatternType::RadialLoop => "radial_loop",
            PatternType::UlnarLoop => "ulnar_loop",
            PatternType::Whorl => "whorl",
            PatternType::DoubleWhorl => "double_whorl",
        }
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hand {
    Left,
    Right,
}

impl std::str::FromStr for Hand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Hand::Left),
            "right" => Ok(Hand::Right),
            other => Err(format!("unknown hand '{other}'")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl std::str::FromStr for Finger {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "thumb" => Ok(Finger::Thumb),
            "index" => Ok(Finger::Index),
            "middle" => Ok(Finger::Middle),
            "ring" => Ok(Finger::Ring),
            "pinky" | "little" => Ok(Finger::Pinky),
            other => Err(format!("unknown finger '{other}'")),
        }
    }
}

/// Outcome of one finger analysis.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisResult {
    pub cores: Vec<SingularPoint>,
    pub deltas: Vec<SingularPoint>,
    pub pattern_type: PatternType,
    pub number_deltas: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ridge_count: Option<u32>,
    /// True when the pattern came from the low-complexity fallback rule.
    pub fallback: bool,
    pub latency_ms: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_names_are_snake_case() {
        for p in PatternType::ALL {
            let json = serde_json::to_string(&p).unwrap();
            assert_eq!(json, format!("\"{}\"", p.as_str()));
        }
    }

    #[test]
    fn hand_and_finger_parse_loosely() {
        assert_eq!(" Right ".parse::<Hand>().unwrap(), Hand::Right);
        assert_eq!("little".parse::<Finger>().unwrap(), Finger::Pinky);
        assert!("palm".parse::<Finger>().is_err());
    }
}
