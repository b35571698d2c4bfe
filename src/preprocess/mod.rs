//! Ridge image preprocessing.
//!
//! Turns a decoded grayscale print into the three rasters the rest of the
//! pipeline consumes:
//!
//! - `normalized`: contrast-normalized floats in `[0, 1]`, input to the
//!   orientation estimator;
//! - `binary`: ridge/valley mask;
//! - `skeleton`: the mask thinned to 1-pixel ridge lines, sampled by the
//!   ridge counter.
//!
//! All three share the input's width and height.

pub mod binarize;
pub mod filters;
pub mod normalize;
pub mod options;
pub mod thinning;

pub use options::{BinarizeMethod, ImageVariant, PreprocessOptions, RidgePolarity};

use crate::error::AnalysisError;
use crate::image::{BinaryImage, ImageF32, ImageU8};
use filters::{convolve_separable, GAUSSIAN_5TAP};
use std::time::Instant;

/// Rasters produced by [`preprocess`].
#[derive(Clone, Debug)]
pub struct Preprocessed {
    pub normalized: ImageF32,
    pub binary: BinaryImage,
    pub skeleton: BinaryImage,
    pub elapsed_ms: f64,
}

impl Preprocessed {
    pub fn width(&self) -> usize {
        self.normalized.w
    }

    pub fn height(&self) -> usize {
        self.normalized.h
    }
}

/// Reject images too small to hold one `min_side × min_side` block.
pub fn check_dimensions(gray: &ImageU8<'_>, min_side: usize) -> Result<(), AnalysisError> {
    if gray.w < min_side || gray.h < min_side {
        return Err(AnalysisError::Dimension {
            width: gray.w,
            height: gray.h,
            min_side,
        });
    }
    Ok(())
}

/// Normalize, binarize and (optionally) thin a grayscale ridge image.
pub fn preprocess(
    gray: ImageU8<'_>,
    variant: ImageVariant,
    options: &PreprocessOptions,
    min_side: usize,
) -> Result<Preprocessed, AnalysisError> {
    check_dimensions(&gray, min_side)?;
    let start = Instant::now();

    let mut normalized = match variant {
        ImageVariant::Raw => {
            normalize::equalize_clahe(&gray, options.clahe_tile, options.clahe_clip_limit)
        }
        ImageVariant::Filtered => normalize::stretch_min_max(&gray),
    };
    if options.denoise && variant == ImageVariant::Raw {
        normalized = convolve_separable(&normalized, &GAUSSIAN_5TAP);
    }

    let binary = binarize::binarize(&normalized, options.binarize, options.polarity);
    let skeleton = if options.thin {
        thinning::thin_zhang_suen(&binary)
    } else {
        binary.clone()
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    log::debug!(
        "preprocess {:?} {}x{} ridge_px={} skeleton_px={} in {:.3} ms",
        variant,
        gray.w,
        gray.h,
        binary.foreground_count(),
        skeleton.foreground_count(),
        elapsed_ms
    );

    Ok(Preprocessed {
        normalized,
        binary,
        skeleton,
        elapsed_ms,
    })
}
