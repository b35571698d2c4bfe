//! Owned ridge/valley mask. `1` marks ridge (foreground), `0` valley.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryImage {
    pub w: usize,
    pub h: usize,
    pub data: Vec<u8>,
}

impl BinaryImage {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    /// Signed lookup treating everything outside the image as valley.
    #[inline]
    pub fn get_or_valley(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x as usize >= self.w || y as usize >= self.h {
            return false;
        }
        self.get(x as usize, y as usize)
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, ridge: bool) {
        self.data[y * self.w + x] = ridge as u8;
    }

    /// True when any pixel within Chebyshev distance `radius` of `(x, y)` is ridge.
    pub fn any_within(&self, x: usize, y: usize, radius: usize) -> bool {
        if radius == 0 {
            return self.get(x, y);
        }
        let x0 = x.saturating_sub(radius);
        let y0 = y.saturating_sub(radius);
        let x1 = (x + radius).min(self.w.saturating_sub(1));
        let y1 = (y + radius).min(self.h.saturating_sub(1));
        (y0..=y1).any(|yy| (x0..=x1).any(|xx| self.get(xx, yy)))
    }

    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// 8-bit rendering with ridges black on white, for debug dumps.
    pub fn to_gray_u8(&self) -> Vec<u8> {
        self.data
            .iter()
            .map(|&v| if v != 0 { 0 } else { 255 })
            .collect()
    }
}

impl crate::image::traits::ImageView for BinaryImage {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn stride(&self) -> usize {
        self.w
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_pixels_read_as_valley() {
        let mut img = BinaryImage::new(4, 3);
        img.set(0, 0, true);
        assert!(img.get_or_valley(0, 0));
        assert!(!img.get_or_valley(-1, 0));
        assert!(!img.get_or_valley(4, 2));
    }

    #[test]
    fn neighbourhood_lookup_respects_radius() {
        let mut img = BinaryImage::new(5, 5);
        img.set(2, 2, true);
        assert!(img.any_within(3, 3, 1));
        assert!(!img.any_within(4, 4, 1));
        assert!(img.any_within(4, 4, 2));
        assert_eq!(img.foreground_count(), 1);
    }
}
