//! Gap filling and doubled-angle smoothing of the block field.

use super::field::{BlockState, OrientationField};
use crate::angle::{doubled, from_doubled};

const NEIGHBOURS_8: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn neighbour(field: &OrientationField, bx: usize, by: usize, d: (isize, isize)) -> Option<usize> {
    let nx = bx as isize + d.0;
    let ny = by as isize + d.1;
    if nx < 0 || ny < 0 || nx >= field.blocks_x as isize || ny >= field.blocks_y as isize {
        return None;
    }
    Some(field.index(nx as usize, ny as usize))
}

/// Replace each non-confident block by the coherence-weighted doubled-angle
/// mean of its confident 8-neighbours. Blocks with fewer than `min_support`
/// such neighbours become `Invalid`.
///
/// Only originally confident blocks vote, so the result does not depend on
/// scan order. Returns the number of filled blocks.
pub fn fill_weak_blocks(field: &mut OrientationField, min_support: usize) -> usize {
    let source_angles = field.angles.clone();
    let source_coherence = field.coherence.clone();
    let source_state = field.state.clone();
    let mut filled = 0usize;

    for by in 0..field.blocks_y {
        for bx in 0..field.blocks_x {
            let idx = field.index(bx, by);
            if source_state[idx] == BlockState::Confident {
                continue;
            }
            let mut acc = [0.0f32; 2];
            let mut weight = 0.0f32;
            let mut support = 0usize;
            for &d in &NEIGHBOURS_8 {
                let Some(n) = neighbour(field, bx, by, d) else {
                    continue;
                };
                if source_state[n] != BlockState::Confident {
                    continue;
                }
                let v = doubled(source_angles[n]);
                let c = source_coherence[n];
                acc[0] += c * v[0];
                acc[1] += c * v[1];
                weight += c;
                support += 1;
            }
            if support >= min_support.max(1) && weight > f32::EPSILON {
                field.angles[idx] = from_doubled(acc);
                field.coherence[idx] = (acc[0].hypot(acc[1]) / weight).clamp(0.0, 1.0);
                field.state[idx] = BlockState::Filled;
                filled += 1;
            } else {
                field.state[idx] = BlockState::Invalid;
            }
        }
    }
    filled
}

/// Box average of doubled-angle vectors over usable blocks within `radius`,
/// weighted by coherence. `Invalid` blocks neither vote nor change.
pub fn smooth_doubled(field: &mut OrientationField, radius: usize) {
    if radius == 0 {
        return;
    }
    let source = field.angles.clone();
    let r = radius as isize;
    for by in 0..field.blocks_y {
        for bx in 0..field.blocks_x {
            let idx = field.index(bx, by);
            if !field.state[idx].is_usable() {
                continue;
            }
            let mut acc = [0.0f32; 2];
            for dy in -r..=r {
                for dx in -r..=r {
                    let Some(n) = neighbour(field, bx, by, (dx, dy)) else {
                        continue;
                    };
                    if !field.state[n].is_usable() {
                        continue;
                    }
                    let v = doubled(source[n]);
                    let w = field.coherence[n].max(f32::EPSILON);
                    acc[0] += w * v[0];
                    acc[1] += w * v[1];
                }
            }
            if acc[0].hypot(acc[1]) > f32::EPSILON {
                field.angles[idx] = from_doubled(acc);
            }
        }
    }
}
