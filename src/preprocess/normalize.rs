//! Local contrast normalization.
//!
//! Uneven inking and finger pressure leave some regions washed out and others
//! saturated. CLAHE equalizes each tile with a clipped histogram and blends
//! neighbouring tile LUTs bilinearly so tile seams do not create artificial
//! ridge edges. Tiles holding a single intensity keep an identity mapping.

use crate::image::{ImageF32, ImageU8};

/// Contrast-limited adaptive histogram equalization into `[0, 1]` floats.
pub fn equalize_clahe(gray: &ImageU8<'_>, tile_size: usize, clip_limit: f32) -> ImageF32 {
    let (w, h) = (gray.w, gray.h);
    let mut out = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }
    let tile = tile_size.max(2);
    let cols = w.div_ceil(tile);
    let rows = h.div_ceil(tile);

    let mut luts = vec![[0u8; 256]; cols * rows];
    for ty in 0..rows {
        for tx in 0..cols {
            let x0 = tx * tile;
            let y0 = ty * tile;
            let x1 = (x0 + tile).min(w);
            let y1 = (y0 + tile).min(h);
            let pixels = (x1 - x0) * (y1 - y0);

            let mut hist = [0u32; 256];
            for y in y0..y1 {
                for x in x0..x1 {
                    hist[gray.get(x, y) as usize] += 1;
                }
            }
            if hist.iter().filter(|&&c| c > 0).count() <= 1 {
                luts[ty * cols + tx] = identity_lut();
                continue;
            }
            if clip_limit > 0.0 {
                clip_histogram(&mut hist, pixels, clip_limit);
            }
            luts[ty * cols + tx] = build_lut(&hist, pixels);
        }
    }

    let tile_f = tile as f32;
    for y in 0..h {
        let fy = (y as f32 + 0.5) / tile_f - 0.5;
        let ty0 = (fy.floor().max(0.0) as usize).min(rows - 1);
        let ty1 = (ty0 + 1).min(rows - 1);
        let ay = if ty0 == ty1 {
            0.0
        } else {
            (fy - ty0 as f32).clamp(0.0, 1.0)
        };
        for x in 0..w {
            let fx = (x as f32 + 0.5) / tile_f - 0.5;
            let tx0 = (fx.floor().max(0.0) as usize).min(cols - 1);
            let tx1 = (tx0 + 1).min(cols - 1);
            let ax = if tx0 == tx1 {
                0.0
            } else {
                (fx - tx0 as f32).clamp(0.0, 1.0)
            };

            let v = gray.get(x, y) as usize;
            let v00 = luts[ty0 * cols + tx0][v] as f32;
            let v10 = luts[ty0 * cols + tx1][v] as f32;
            let v01 = luts[ty1 * cols + tx0][v] as f32;
            let v11 = luts[ty1 * cols + tx1][v] as f32;
            let top = v00 + ax * (v10 - v00);
            let bottom = v01 + ax * (v11 - v01);
            out.set(x, y, (top + ay * (bottom - top)) / 255.0);
        }
    }
    out
}

/// Linear stretch of an already enhanced image to the full `[0, 1]` range.
pub fn stretch_min_max(gray: &ImageU8<'_>) -> ImageF32 {
    let mut out = ImageF32::from_u8(gray);
    let (lo, hi) = out.min_max();
    let span = hi - lo;
    if span <= f32::EPSILON {
        return out;
    }
    for v in out.data.iter_mut() {
        *v = (*v - lo) / span;
    }
    out
}

/// 256-entry LUT from a (possibly clipped) histogram.
fn build_lut(hist: &[u32; 256], total: usize) -> [u8; 256] {
    let mut cdf = [0u32; 256];
    let mut acc = 0u32;
    for (dst, &count) in cdf.iter_mut().zip(hist.iter()) {
        acc += count;
        *dst = acc;
    }
    let cdf_min = cdf.iter().copied().find(|&c| c > 0).unwrap_or(0);
    let cdf_max = cdf[255].max(total as u32);
    let denom = cdf_max as f32 - cdf_min as f32;
    if denom <= 0.0 {
        return identity_lut();
    }
    let mut lut = [0u8; 256];
    for (dst, &c) in lut.iter_mut().zip(cdf.iter()) {
        let val = (c as f32 - cdf_min as f32) / denom * 255.0;
        *dst = val.round().clamp(0.0, 255.0) as u8;
    }
    lut
}

fn identity_lut() -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, dst) in lut.iter_mut().enumerate() {
        *dst = i as u8;
    }
    lut
}

/// Clip bins above `clip_limit × uniform` and spread the excess evenly.
fn clip_histogram(hist: &mut [u32; 256], total: usize, clip_limit: f32) {
    let limit = ((clip_limit * total as f32 / 256.0).ceil() as u32).max(1);
    let mut excess = 0u32;
    for bin in hist.iter_mut() {
        if *bin > limit {
            excess += *bin - limit;
            *bin = limit;
        }
    }
    let share = excess / 256;
    let remainder = (excess % 256) as usize;
    for (i, bin) in hist.iter_mut().enumerate() {
        *bin += share + u32::from(i < remainder);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_tile_keeps_identity() {
        let data = vec![200u8; 64 * 64];
        let gray = ImageU8 {
            w: 64,
            h: 64,
            stride: 64,
            data: &data,
        };
        let eq = equalize_clahe(&gray, 32, 2.0);
        for &v in &eq.data {
            assert!((v - 200.0 / 255.0).abs() < 1e-3, "value {v}");
        }
    }

    #[test]
    fn equalization_preserves_ridge_valley_order() {
        let (w, h) = (64usize, 64usize);
        let data: Vec<u8> = (0..w * h)
            .map(|i| if (i / w) % 8 < 3 { 90 } else { 140 })
            .collect();
        let gray = ImageU8 {
            w,
            h,
            stride: w,
            data: &data,
        };
        let eq = equalize_clahe(&gray, 16, 2.0);
        for y in 0..h {
            for x in 0..w {
                let dark = (y % 8) < 3;
                let v = eq.get(x, y);
                if dark {
                    assert!(v < 0.5, "ridge pixel ({x},{y}) = {v}");
                } else {
                    assert!(v > 0.5, "valley pixel ({x},{y}) = {v}");
                }
            }
        }
    }

    #[test]
    fn stretch_spans_unit_range() {
        let data: Vec<u8> = (0..100).map(|i| 100 + (i % 50) as u8).collect();
        let gray = ImageU8 {
            w: 10,
            h: 10,
            stride: 10,
            data: &data,
        };
        let out = stretch_min_max(&gray);
        let (lo, hi) = out.min_max();
        assert!(lo.abs() < 1e-6);
        assert!((hi - 1.0).abs() < 1e-6);
    }
}
