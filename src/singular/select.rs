use crate::types::SingularPoint;
use std::cmp::Ordering;

/// Keep at most `max` points: strongest `|winding|` first, then leftmost,
/// then topmost.
pub fn cap_strongest(mut points: Vec<SingularPoint>, max: usize) -> Vec<SingularPoint> {
    points.sort_by(rank);
    points.truncate(max);
    points
}

fn rank(a: &SingularPoint, b: &SingularPoint) -> Ordering {
    b.winding
        .abs()
        .total_cmp(&a.winding.abs())
        .then(a.point.x.total_cmp(&b.point.x))
        .then(a.point.y.total_cmp(&b.point.y))
}
