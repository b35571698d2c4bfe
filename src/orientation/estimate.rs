//! Block-wise least-squares orientation from the squared-gradient tensor.
//!
//! Per block: `Gxx = Σ(gx²−gy²)`, `Gxy = Σ2·gx·gy`, `E = Σ(gx²+gy²)`. The
//! dominant gradient direction is `½·atan2(Gxy, Gxx)`; ridges run
//! perpendicular to it. Block rows are independent and run on the rayon pool.

use super::field::{BlockState, OrientationField};
use super::grad::Grad;
use super::options::OrientationOptions;
use crate::angle::normalize_half_pi;
use crate::image::ImageView;
use rayon::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Accumulated gradient tensor of one block.
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockTensor {
    pub gxx: f32,
    pub gxy: f32,
    pub energy: f32,
    pub pixels: usize,
}

impl BlockTensor {
    /// Ridge orientation in `[0, π)`.
    pub fn ridge_angle(&self) -> f32 {
        normalize_half_pi(0.5 * self.gxy.atan2(self.gxx) + FRAC_PI_2)
    }

    /// Anisotropy in `[0, 1]`; `0` for flat or isotropic blocks.
    pub fn coherence(&self) -> f32 {
        if self.energy <= f32::EPSILON {
            return 0.0;
        }
        (self.gxx.hypot(self.gxy) / self.energy).clamp(0.0, 1.0)
    }

    pub fn energy_per_pixel(&self) -> f32 {
        if self.pixels == 0 {
            0.0
        } else {
            self.energy / self.pixels as f32
        }
    }
}

/// Number of blocks needed to cover `len` pixels.
#[inline]
pub fn blocks_for(len: usize, block_size: usize) -> usize {
    len.div_ceil(block_size.max(1))
}

/// Accumulate one tensor per block, block rows in parallel.
pub fn block_tensors(grad: &Grad, block_size: usize) -> (usize, usize, Vec<BlockTensor>) {
    let b = block_size.max(1);
    let (w, h) = (grad.gx.w, grad.gx.h);
    let blocks_x = blocks_for(w, b);
    let blocks_y = blocks_for(h, b);

    let tensors: Vec<BlockTensor> = (0..blocks_y)
        .into_par_iter()
        .flat_map_iter(|by| {
            let mut row = vec![BlockTensor::default(); blocks_x];
            let y0 = by * b;
            let y1 = (y0 + b).min(h);
            for y in y0..y1 {
                let gx_row = grad.gx.row(y);
                let gy_row = grad.gy.row(y);
                for (x, (&gx, &gy)) in gx_row.iter().zip(gy_row.iter()).enumerate() {
                    let t = &mut row[x / b];
                    t.gxx += gx * gx - gy * gy;
                    t.gxy += 2.0 * gx * gy;
                    t.energy += gx * gx + gy * gy;
                    t.pixels += 1;
                }
            }
            row
        })
        .collect();

    (blocks_x, blocks_y, tensors)
}

/// Raw field: angles and coherence from the tensors, states `Confident` or
/// `Invalid` according to the confidence rule.
pub fn raw_field(
    tensors: &[BlockTensor],
    blocks_x: usize,
    blocks_y: usize,
    image_width: usize,
    image_height: usize,
    options: &OrientationOptions,
) -> OrientationField {
    let mean_energy = if tensors.is_empty() {
        0.0
    } else {
        tensors.iter().map(|t| t.energy_per_pixel()).sum::<f32>() / tensors.len() as f32
    };
    let energy_floor = options.min_energy.max(options.energy_ratio * mean_energy);

    let mut angles = Vec::with_capacity(tensors.len());
    let mut coherence = Vec::with_capacity(tensors.len());
    let mut state = Vec::with_capacity(tensors.len());
    for t in tensors {
        let c = t.coherence();
        angles.push(t.ridge_angle());
        coherence.push(c);
        let confident = t.energy_per_pixel() > energy_floor && c >= options.min_coherence;
        state.push(if confident {
            BlockState::Confident
        } else {
            BlockState::Invalid
        });
    }
    log::debug!(
        "orientation raw field {}x{} blocks: mean energy {:.4}, floor {:.4}",
        blocks_x,
        blocks_y,
        mean_energy,
        energy_floor
    );

    OrientationField {
        blocks_x,
        blocks_y,
        block_size: options.block_size.max(1),
        image_width,
        image_height,
        angles,
        coherence,
        state,
    }
}
