//! Parametric sampling of a straight segment.

use nalgebra::{Point2, Vector2};

/// Evenly spaced samples from `a` to `b` inclusive, at most `step` apart.
///
/// Coincident endpoints yield the single point `a`.
pub fn sample_segment(a: Point2<f32>, b: Point2<f32>, step: f32) -> Vec<Point2<f32>> {
    let d: Vector2<f32> = b - a;
    let len = d.norm();
    let step = if step.is_finite() && step > 0.0 { step } else { 0.5 };
    if len <= f32::EPSILON {
        return vec![a];
    }
    let n = (len / step).ceil().max(1.0) as usize;
    (0..=n)
        .map(|i| {
            let t = i as f32 / n as f32;
            a + d * t
        })
        .collect()
}

/// Maximal runs of `true` as half-open index ranges.
pub fn true_runs(flags: &[bool]) -> Vec<std::ops::Range<usize>> {
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for (i, &f) in flags.iter().enumerate() {
        match (f, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..flags.len());
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_include_both_endpoints() {
        let s = sample_segment(Point2::new(0.0, 0.0), Point2::new(0.0, 3.0), 0.5);
        assert_eq!(s.len(), 7);
        assert_eq!(s[0], Point2::new(0.0, 0.0));
        assert_eq!(s[6], Point2::new(0.0, 3.0));
    }

    #[test]
    fn coincident_points_give_one_sample() {
        let p = Point2::new(4.0, 5.0);
        assert_eq!(sample_segment(p, p, 0.5), vec![p]);
    }

    #[test]
    fn runs_are_maximal() {
        let flags = [true, true, false, false, true, false, true, true, true];
        assert_eq!(true_runs(&flags), vec![0..2, 4..5, 6..9]);
        assert!(true_runs(&[false, false]).is_empty());
    }
}
