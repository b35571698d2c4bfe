use dermatoglyph::image::GrayImageU8;
use dermatoglyph::orientation::OrientationField;
use std::f32::consts::{FRAC_PI_2, PI};

pub const RIDGE: u8 = 30;
pub const VALLEY: u8 = 220;

/// Dark horizontal ridges `thickness` rows tall, centred at
/// `first_center + k·spacing` for `k < count`.
pub fn horizontal_ridges(
    width: usize,
    height: usize,
    count: usize,
    first_center: usize,
    spacing: usize,
    thickness: usize,
) -> GrayImageU8 {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut data = vec![VALLEY; width * height];
    for k in 0..count {
        let c = first_center + k * spacing;
        let y0 = c.saturating_sub(thickness / 2);
        let y1 = (y0 + thickness).min(height);
        for y in y0..y1 {
            data[y * width..(y + 1) * width].fill(RIDGE);
        }
    }
    GrayImageU8::new(width, height, data)
}

/// Concentric sinusoidal rings around `(cx, cy)`: dark where
/// `cos(2π·r/period) < 0`, bright at the centre.
pub fn concentric_whorl(
    width: usize,
    height: usize,
    cx: f32,
    cy: f32,
    period: f32,
) -> GrayImageU8 {
    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let r = (x as f32 - cx).hypot(y as f32 - cy);
            let v = 125.0 + 95.0 * (2.0 * PI * r / period).cos();
            data[y * width + x] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    GrayImageU8::new(width, height, data)
}

fn segment_distance(p: (f32, f32), a: (f32, f32), b: (f32, f32)) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / (dx * dx + dy * dy)).clamp(0.0, 1.0);
    (p.0 - a.0 - t * dx).hypot(p.1 - a.1 - t * dy)
}

/// Loop-shaped print: sinusoidal ridges `period` px apart following the
/// distance to a Y-shaped skeleton. One arm runs `delta → bend → core` and
/// ends freely at `core` (the recurving hairpin); the other two leave `delta`
/// at ±120° from the `delta → bend` direction and run off the image, so the
/// junction is a triradius.
///
/// The bend's inner side forms a pocket with the neighbouring junction arm;
/// keep that side facing the nearer image border.
pub fn loop_print(
    width: usize,
    height: usize,
    core: (f32, f32),
    bend: (f32, f32),
    delta: (f32, f32),
    period: f32,
) -> GrayImageU8 {
    let (ux, uy) = (bend.0 - delta.0, bend.1 - delta.1);
    let len = ux.hypot(uy);
    let (ux, uy) = (ux / len, uy / len);
    let arm_end = |turn: f32| {
        let (s, c) = turn.sin_cos();
        (
            delta.0 + 1000.0 * (ux * c - uy * s),
            delta.1 + 1000.0 * (ux * s + uy * c),
        )
    };
    let skeleton = [
        (core, bend),
        (bend, delta),
        (delta, arm_end(2.0 * PI / 3.0)),
        (delta, arm_end(-2.0 * PI / 3.0)),
    ];

    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let p = (x as f32, y as f32);
            let d = skeleton
                .iter()
                .map(|&(a, b)| segment_distance(p, a, b))
                .fold(f32::INFINITY, f32::min);
            let v = 125.0 + 95.0 * (2.0 * PI * d / period).cos();
            data[y * width + x] = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    GrayImageU8::new(width, height, data)
}

/// Orientation field of a single loop: `½(arg(z−core) − arg(z−delta)) + π/2`,
/// sampled at block centres.
pub fn loop_orientation_field(
    blocks_x: usize,
    blocks_y: usize,
    block: usize,
    core: (f32, f32),
    delta: (f32, f32),
) -> OrientationField {
    let mut angles = Vec::with_capacity(blocks_x * blocks_y);
    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let x = (bx * block) as f32 + 0.5 * block as f32;
            let y = (by * block) as f32 + 0.5 * block as f32;
            let a = (y - core.1).atan2(x - core.0);
            let b = (y - delta.1).atan2(x - delta.0);
            angles.push(0.5 * (a - b) + FRAC_PI_2);
        }
    }
    OrientationField::from_angles(blocks_x, blocks_y, block, angles)
}

/// Orientation field of a whorl centre flanked by two deltas:
/// `½(2·arg(z−centre) − arg(z−d₀) − arg(z−d₁)) + π/2`, sampled at block centres.
pub fn whorl_orientation_field(
    blocks_x: usize,
    blocks_y: usize,
    block: usize,
    centre: (f32, f32),
    deltas: [(f32, f32); 2],
) -> OrientationField {
    let mut angles = Vec::with_capacity(blocks_x * blocks_y);
    for by in 0..blocks_y {
        for bx in 0..blocks_x {
            let x = (bx * block) as f32 + 0.5 * block as f32;
            let y = (by * block) as f32 + 0.5 * block as f32;
            let c = (y - centre.1).atan2(x - centre.0);
            let d: f32 = deltas.iter().map(|d| (y - d.1).atan2(x - d.0)).sum();
            angles.push(0.5 * (2.0 * c - d) + FRAC_PI_2);
        }
    }
    OrientationField::from_angles(blocks_x, blocks_y, block, angles)
}

/// Uniform gray image.
pub fn uniform(width: usize, height: usize, value: u8) -> GrayImageU8 {
    GrayImageU8::new(width, height, vec![value; width * height])
}
