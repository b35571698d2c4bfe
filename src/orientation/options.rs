use serde::{Deserialize, Serialize};

/// Parameters of the block orientation estimator.
///
/// A block is confident when its mean squared gradient per pixel exceeds
/// `max(min_energy, energy_ratio · mean block energy)` and its coherence is at
/// least `min_coherence`.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationOptions {
    /// Block side `B` in pixels.
    pub block_size: usize,
    pub min_energy: f32,
    pub energy_ratio: f32,
    pub min_coherence: f32,
    /// Confident 8-neighbours needed to fill a weak block.
    pub min_support: usize,
    /// Box radius (in blocks) of the final doubled-angle smoothing; `0` off.
    pub smoothing_radius: usize,
}

impl Default for OrientationOptions {
    fn default() -> Self {
        Self {
            block_size: 16,
            min_energy: 1e-3,
            energy_ratio: 0.1,
            min_coherence: 0.15,
            min_support: 2,
            smoothing_radius: 1,
        }
    }
}
