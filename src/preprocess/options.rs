use serde::{Deserialize, Serialize};

/// Which stored rendition of the finger the caller submitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageVariant {
    /// Scanner/camera output; runs the full contrast normalization.
    Raw,
    /// Already enhanced upstream; only stretched before binarization.
    #[default]
    Filtered,
}

impl std::str::FromStr for ImageVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(ImageVariant::Raw),
            "filtered" => Ok(ImageVariant::Filtered),
            other => Err(format!("unknown image variant '{other}'")),
        }
    }
}

/// Intensity of ridges relative to valleys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RidgePolarity {
    /// Inked / optical prints: ridges darker than valleys.
    #[default]
    Dark,
    Bright,
}

/// Threshold strategy used to split ridges from valleys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "method")]
pub enum BinarizeMethod {
    /// Single global threshold maximizing between-class variance.
    #[default]
    Otsu,
    /// Pixel compared against the mean of a `window × window` neighbourhood
    /// shifted by `offset` (in `[0, 1]` intensity units).
    LocalMean { window: usize, offset: f32 },
}

/// Knobs of the preprocessing stage.
///
/// - `clahe_tile`: tile side in pixels for contrast-limited equalization.
/// - `clahe_clip_limit`: clip limit as a multiple of the uniform bin count;
///   `0` disables clipping.
/// - `denoise`: apply the 5-tap Gaussian before binarization.
/// - `thin`: produce the 1-pixel skeleton used by the ridge counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    pub clahe_tile: usize,
    pub clahe_clip_limit: f32,
    pub denoise: bool,
    pub polarity: RidgePolarity,
    pub binarize: BinarizeMethod,
    pub thin: bool,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            clahe_tile: 32,
            clahe_clip_limit: 2.0,
            denoise: true,
            polarity: RidgePolarity::Dark,
            binarize: BinarizeMethod::Otsu,
            thin: true,
        }
    }
}
