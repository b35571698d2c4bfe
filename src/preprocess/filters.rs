use crate::image::{ImageF32, ImageView, ImageViewMut};

/// Trait implemented by separable 1D filters applied row- then column-wise.
pub trait SeparableFilter {
    /// Return the 1D taps (in left-to-right order). The kernel is assumed to be
    /// symmetric around its centre and to sum to one.
    fn taps(&self) -> &[f32];
}

/// Simple wrapper around a static filter kernel.
#[derive(Clone, Copy, Debug)]
pub struct StaticSeparableFilter {
    taps: &'static [f32],
}

impl Default for StaticSeparableFilter {
    fn default() -> Self {
        GAUSSIAN_5TAP
    }
}

impl StaticSeparableFilter {
    pub const fn new(taps: &'static [f32]) -> Self {
        Self { taps }
    }
}

impl SeparableFilter for StaticSeparableFilter {
    #[inline]
    fn taps(&self) -> &[f32] {
        self.taps
    }
}

/// Normalised 5-tap Gaussian filter `[1, 4, 6, 4, 1] / 16`.
pub const GAUSSIAN_5TAP: StaticSeparableFilter =
    StaticSeparableFilter::new(&[0.0625, 0.25, 0.375, 0.25, 0.0625]);

/// Convolve `src` with a separable kernel, replicating border pixels.
pub fn convolve_separable<F: SeparableFilter>(src: &ImageF32, filter: &F) -> ImageF32 {
    let taps = filter.taps();
    let (w, h) = (src.w, src.h);
    if w == 0 || h == 0 || taps.is_empty() {
        return src.clone();
    }
    let radius = (taps.len() / 2) as isize;

    let mut horiz = ImageF32::new(w, h);
    for y in 0..h {
        let row = src.row(y);
        let out = horiz.row_mut(y);
        for (x, dst) in out.iter_mut().enumerate() {
            let mut acc = 0.0;
            for (k, &t) in taps.iter().enumerate() {
                let xx = (x as isize + k as isize - radius).clamp(0, w as isize - 1) as usize;
                acc += t * row[xx];
            }
            *dst = acc;
        }
    }

    let mut out = ImageF32::new(w, h);
    for y in 0..h {
        let dst_row = out.row_mut(y);
        for (k, &t) in taps.iter().enumerate() {
            let yy = (y as isize + k as isize - radius).clamp(0, h as isize - 1) as usize;
            let src_row = horiz.row(yy);
            for (dst, &v) in dst_row.iter_mut().zip(src_row.iter()) {
                *dst += t * v;
            }
        }
    }
    out
}
