//! Block orientation field estimation.
//!
//! Pipeline: Sobel gradients → per-block squared-gradient tensor → confidence
//! test → gap filling from confident neighbours → optional doubled-angle box
//! smoothing. Angles are undirected ridge-flow directions in `[0, π)`.

pub mod estimate;
pub mod field;
pub mod grad;
pub mod options;
pub mod smoothing;

pub use field::{BlockState, OrientationField};
pub use options::OrientationOptions;

use crate::image::ImageF32;
use std::time::Instant;

/// Estimate the orientation field of a normalized ridge image.
///
/// Never fails: an image without usable texture yields a field whose blocks
/// are all `Invalid`.
pub fn estimate_orientation(img: &ImageF32, options: &OrientationOptions) -> OrientationField {
    let start = Instant::now();
    let grad = grad::sobel_gradients(img);
    let (blocks_x, blocks_y, tensors) = estimate::block_tensors(&grad, options.block_size);
    let mut field = estimate::raw_field(&tensors, blocks_x, blocks_y, img.w, img.h, options);
    let confident = field.count_state(BlockState::Confident);
    let filled = smoothing::fill_weak_blocks(&mut field, options.min_support);
    smoothing::smooth_doubled(&mut field, options.smoothing_radius);

    if confident == 0 {
        log::warn!(
            "orientation: no confident block in {}x{} image",
            img.w,
            img.h
        );
    }
    log::debug!(
        "orientation {}x{} blocks (B={}): confident={} filled={} invalid={} in {:.3} ms",
        blocks_x,
        blocks_y,
        field.block_size,
        confident,
        filled,
        field.count_state(BlockState::Invalid),
        start.elapsed().as_secs_f64() * 1000.0
    );
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::angular_difference;
    use std::f32::consts::PI;

    fn stripes(w: usize, h: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let v = 0.5 + 0.4 * (2.0 * PI * y as f32 / 10.0).sin();
                img.set(x, y, v);
            }
        }
        img
    }

    #[test]
    fn grid_covers_partial_blocks() {
        let field = estimate_orientation(&stripes(70, 33), &OrientationOptions::default());
        assert_eq!((field.blocks_x, field.blocks_y), (5, 3));
        assert_eq!(field.angles.len(), 15);
    }

    #[test]
    fn horizontal_stripes_give_horizontal_flow() {
        let field = estimate_orientation(&stripes(64, 64), &OrientationOptions::default());
        assert!(field.has_confident_blocks());
        for &a in &field.angles {
            assert!((0.0..PI).contains(&a));
            assert!(angular_difference(a, 0.0) < 0.05, "angle {a}");
        }
    }

    #[test]
    fn flat_image_has_no_confident_block() {
        let field = estimate_orientation(&ImageF32::new(48, 48), &OrientationOptions::default());
        assert!(!field.has_confident_blocks());
        assert_eq!(field.count_state(BlockState::Invalid), 9);
    }

    #[test]
    fn half_turn_rotation_mirrors_the_field() {
        // Diagonal rings around an off-centre point exercise every angle.
        let (w, h) = (96usize, 80usize);
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                let r = ((x as f32 - 30.0).powi(2) + (y as f32 - 20.0).powi(2)).sqrt();
                img.set(x, y, 0.5 + 0.4 * (2.0 * PI * r / 9.0).cos());
            }
        }
        let mut rotated = ImageF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                rotated.set(w - 1 - x, h - 1 - y, img.get(x, y));
            }
        }
        let opts = OrientationOptions::default();
        let a = estimate_orientation(&img, &opts);
        let b = estimate_orientation(&rotated, &opts);
        for by in 0..a.blocks_y {
            for bx in 0..a.blocks_x {
                let mx = a.blocks_x - 1 - bx;
                let my = a.blocks_y - 1 - by;
                assert_eq!(a.block_state(bx, by), b.block_state(mx, my));
                if a.block_state(bx, by) == BlockState::Invalid {
                    continue;
                }
                let d = angular_difference(a.angle(bx, by), b.angle(mx, my));
                assert!(d < 1e-2, "block ({bx},{by}) differs by {d}");
            }
        }
    }
}
