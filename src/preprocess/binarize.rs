//! Ridge/valley separation on the normalized image.

use super::options::{BinarizeMethod, RidgePolarity};
use crate::image::{BinaryImage, ImageF32};

const OTSU_BINS: usize = 256;

/// Split `img` into ridge (1) and valley (0) pixels.
pub fn binarize(img: &ImageF32, method: BinarizeMethod, polarity: RidgePolarity) -> BinaryImage {
    match method {
        BinarizeMethod::Otsu => {
            let threshold = otsu_threshold(img);
            log::debug!("otsu threshold={:.4}", threshold);
            threshold_with(img, polarity, |_, _| threshold)
        }
        BinarizeMethod::LocalMean { window, offset } => {
            let means = local_means(img, window.max(1));
            threshold_with(img, polarity, |x, y| {
                let m = means[y * img.w + x];
                match polarity {
                    RidgePolarity::Dark => m - offset,
                    RidgePolarity::Bright => m + offset,
                }
            })
        }
    }
}

fn threshold_with<F>(img: &ImageF32, polarity: RidgePolarity, threshold_at: F) -> BinaryImage
where
    F: Fn(usize, usize) -> f32,
{
    let mut out = BinaryImage::new(img.w, img.h);
    for y in 0..img.h {
        for x in 0..img.w {
            let v = img.get(x, y);
            let t = threshold_at(x, y);
            let ridge = match polarity {
                RidgePolarity::Dark => v < t,
                RidgePolarity::Bright => v > t,
            };
            out.set(x, y, ridge);
        }
    }
    out
}

/// Otsu threshold over `[0, 1]` samples, returned in the same units.
///
/// The threshold sits midway between the last bin of the lower class and the
/// next bin, so samples exactly at a class boundary fall on the right side.
pub fn otsu_threshold(img: &ImageF32) -> f32 {
    let mut hist = [0u64; OTSU_BINS];
    for &v in &img.data {
        let bin = (v.clamp(0.0, 1.0) * (OTSU_BINS - 1) as f32).round() as usize;
        hist[bin] += 1;
    }
    let total: u64 = hist.iter().sum();
    if total == 0 {
        return 0.5;
    }
    let sum_all: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut best_bin = 0usize;
    let mut best_var = -1.0f64;
    let mut weight_bg = 0u64;
    let mut sum_bg = 0.0f64;
    for (i, &count) in hist.iter().enumerate() {
        weight_bg += count;
        if weight_bg == 0 {
            continue;
        }
        let weight_fg = total - weight_bg;
        if weight_fg == 0 {
            break;
        }
        sum_bg += i as f64 * count as f64;
        let mean_bg = sum_bg / weight_bg as f64;
        let mean_fg = (sum_all - sum_bg) / weight_fg as f64;
        let between = weight_bg as f64 * weight_fg as f64 * (mean_bg - mean_fg).powi(2);
        if between > best_var {
            best_var = between;
            best_bin = i;
        }
    }
    (best_bin as f32 + 0.5) / (OTSU_BINS - 1) as f32
}

/// Box mean over a `window × window` neighbourhood (clipped at borders)
/// using a summed-area table.
fn local_means(img: &ImageF32, window: usize) -> Vec<f32> {
    let (w, h) = (img.w, img.h);
    let stride = w + 1;
    let mut integral = vec![0.0f64; stride * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0.0f64;
        for x in 0..w {
            row_sum += img.get(x, y) as f64;
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }
    let half = window / 2;
    let mut means = vec![0.0f32; w * h];
    for y in 0..h {
        let y0 = y.saturating_sub(half);
        let y1 = (y + half + 1).min(h);
        for x in 0..w {
            let x0 = x.saturating_sub(half);
            let x1 = (x + half + 1).min(w);
            let area = ((x1 - x0) * (y1 - y0)) as f64;
            let sum = integral[y1 * stride + x1] - integral[y0 * stride + x1]
                - integral[y1 * stride + x0]
                + integral[y0 * stride + x0];
            means[y * w + x] = (sum / area) as f32;
        }
    }
    means
}
