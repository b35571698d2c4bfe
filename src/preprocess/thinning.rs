//! Zhang–Suen thinning of the ridge mask down to 1-pixel-wide ridge lines.
//!
//! Neighbour labelling around `P1`:
//!
//! ```text
//! P9 P2 P3
//! P8 P1 P4
//! P7 P6 P5
//! ```

use crate::image::BinaryImage;

const OFFSETS: [(isize, isize); 8] = [
    (0, -1),  // P2
    (1, -1),  // P3
    (1, 0),   // P4
    (1, 1),   // P5
    (0, 1),   // P6
    (-1, 1),  // P7
    (-1, 0),  // P8
    (-1, -1), // P9
];

/// Thin `mask` until no pixel can be removed. Pixels outside the image count
/// as valley.
pub fn thin_zhang_suen(mask: &BinaryImage) -> BinaryImage {
    let mut img = mask.clone();
    let mut to_clear: Vec<usize> = Vec::new();
    let mut iterations = 0usize;
    loop {
        let mut changed = false;
        for pass in 0..2 {
            to_clear.clear();
            for y in 0..img.h {
                for x in 0..img.w {
                    if img.get(x, y) && removable(&img, x, y, pass) {
                        to_clear.push(y * img.w + x);
                    }
                }
            }
            if !to_clear.is_empty() {
                changed = true;
                for &idx in &to_clear {
                    img.data[idx] = 0;
                }
            }
        }
        iterations += 1;
        if !changed {
            break;
        }
    }
    log::debug!(
        "thinning converged after {} iterations ({} -> {} ridge px)",
        iterations,
        mask.foreground_count(),
        img.foreground_count()
    );
    img
}

fn removable(img: &BinaryImage, x: usize, y: usize, pass: usize) -> bool {
    let mut p = [false; 8];
    for (slot, (dx, dy)) in p.iter_mut().zip(OFFSETS.iter()) {
        *slot = img.get_or_valley(x as isize + dx, y as isize + dy);
    }
    let neighbours = p.iter().filter(|&&v| v).count();
    if !(2..=6).contains(&neighbours) {
        return false;
    }
    let transitions = (0..8).filter(|&i| !p[i] && p[(i + 1) % 8]).count();
    if transitions != 1 {
        return false;
    }
    let [p2, _, p4, _, p6, _, p8, _] = p;
    if pass == 0 {
        !(p2 && p4 && p6) && !(p4 && p6 && p8)
    } else {
        !(p2 && p4 && p8) && !(p2 && p6 && p8)
    }
}
