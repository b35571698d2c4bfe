//! Sobel image gradients feeding the block orientation estimate.
//!
//! Border pixels are replicated. Only the derivative planes are kept:
//! orientation is estimated per block from the squared-gradient tensor, so
//! per-pixel magnitude and direction are never needed. Rows are independent
//! and computed on the rayon pool.
use crate::image::{ImageF32, ImageView};
use rayon::prelude::*;

/// Per-pixel derivative planes.
#[derive(Clone, Debug)]
pub struct Grad {
    /// d/dx, positive towards increasing x
    pub gx: ImageF32,
    /// d/dy, positive towards increasing y (down)
    pub gy: ImageF32,
}

/// Compute Sobel gradients on a single-channel float image.
pub fn sobel_gradients(img: &ImageF32) -> Grad {
    let (w, h) = (img.w, img.h);
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    if w == 0 || h == 0 {
        return Grad { gx, gy };
    }

    gx.data
        .par_chunks_mut(w)
        .zip(gy.data.par_chunks_mut(w))
        .enumerate()
        .for_each(|(y, (row_x, row_y))| {
            let up = img.row(y.saturating_sub(1));
            let mid = img.row(y);
            let down = img.row((y + 1).min(h - 1));
            for x in 0..w {
                let l = x.saturating_sub(1);
                let r = (x + 1).min(w - 1);
                // [1 2 1] smoothing across the derivative direction.
                row_x[x] = (up[r] - up[l]) + 2.0 * (mid[r] - mid[l]) + (down[r] - down[l]);
                row_y[x] = (down[l] - up[l]) + 2.0 * (down[x] - up[x]) + (down[r] - up[r]);
            }
        });

    Grad { gx, gy }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_step_has_horizontal_gradient() {
        let mut img = ImageF32::new(8, 6);
        for y in 0..6 {
            for x in 4..8 {
                img.set(x, y, 1.0);
            }
        }
        let g = sobel_gradients(&img);
        assert!((g.gx.get(4, 3) - 4.0).abs() < 1e-6);
        assert!(g.gy.get(4, 3).abs() < 1e-6);
        assert!(g.gx.get(1, 3).abs() < 1e-6);
    }

    #[test]
    fn horizontal_step_points_down() {
        let mut img = ImageF32::new(5, 7);
        for y in 3..7 {
            for x in 0..5 {
                img.set(x, y, 1.0);
            }
        }
        let g = sobel_gradients(&img);
        assert!((g.gy.get(2, 3) - 4.0).abs() < 1e-6);
        assert!((g.gy.get(0, 2) - 4.0).abs() < 1e-6);
        assert!(g.gx.get(2, 3).abs() < 1e-6);
    }
}
