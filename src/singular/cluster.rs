//! Single-linkage merging of raw detections.

use crate::types::{Point, SingularPoint};

/// Merge detections closer than `max_distance` (transitively) into one point
/// at the centroid weighted by |winding|, so full-turn rings pull a whorl
/// centre towards themselves. Each cluster keeps the winding of largest
/// magnitude. Callers pass detections of a single kind.
///
/// Output order follows the first member of each cluster in input order.
pub fn cluster_points(points: &[SingularPoint], max_distance: f32) -> Vec<SingularPoint> {
    let n = points.len();
    let mut parent: Vec<usize> = (0..n).collect();

    fn find(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if points[i].point.distance(&points[j].point) <= max_distance {
                let ri = find(&mut parent, i);
                let rj = find(&mut parent, j);
                if ri != rj {
                    parent[rj.max(ri)] = ri.min(rj);
                }
            }
        }
    }

    let mut roots: Vec<usize> = Vec::new();
    let mut members: Vec<Vec<usize>> = Vec::new();
    for i in 0..n {
        let r = find(&mut parent, i);
        match roots.iter().position(|&x| x == r) {
            Some(k) => members[k].push(i),
            None => {
                roots.push(r);
                members.push(vec![i]);
            }
        }
    }

    members
        .into_iter()
        .map(|group| {
            let (sw, sx, sy) = group
                .iter()
                .fold((0.0f32, 0.0f32, 0.0f32), |(sw, sx, sy), &i| {
                    let w = points[i].winding.abs().max(f32::EPSILON);
                    (sw + w, sx + w * points[i].point.x, sy + w * points[i].point.y)
                });
            let strongest = group
                .iter()
                .map(|&i| points[i])
                .fold(points[group[0]], |best, p| {
                    if p.winding.abs() > best.winding.abs() {
                        p
                    } else {
                        best
                    }
                });
            SingularPoint {
                point: Point::new(sx / sw, sy / sw),
                kind: strongest.kind,
                winding: strongest.winding,
            }
        })
        .collect()
}
