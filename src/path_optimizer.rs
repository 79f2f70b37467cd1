//! Endpoint merging, smoothing, RDP simplification, and closure detection.

use crate::path::{OptimizedPath, PathKind, Point};

/// Endpoint-merge distance used for centerline chains. Exposed as a named
/// constant rather than inlined so the threshold can be tuned per input.
/// Gap-heavy inputs (coarse skeletons with wide junction breaks) may
/// prefer [`CENTERLINE_MERGE_DISTANCE_WIDE`] instead.
pub const CENTERLINE_MERGE_DISTANCE: f64 = 4.0;

/// Wider alternative for gap-heavy inputs; not used by the default
/// pipeline but documented alongside the tighter default.
pub const CENTERLINE_MERGE_DISTANCE_WIDE: f64 = 14.0;

/// Ramer–Douglas–Peucker tolerance in pixels.
pub const RDP_EPSILON: f64 = 0.8;

const OUTLINE_CLOSE_DIST: f64 = 20.0;
const CENTERLINE_CLOSE_DIST: f64 = 5.0;

/// A polyline with ≤3 points before optimization is discarded as noise;
/// everything past that goes through smoothing, simplification, and
/// closure detection.
pub fn optimize_path(points: Vec<Point>, kind: PathKind) -> Option<OptimizedPath> {
    if points.len() <= 3 {
        return None;
    }
    let smoothed = moving_average_smooth(&points);
    let mut simplified = rdp_simplify(&smoothed, RDP_EPSILON);
    if simplified.len() < 2 {
        return None;
    }
    let is_closed = detect_closure(&mut simplified, kind);
    Some(OptimizedPath {
        points: simplified,
        kind,
        is_closed,
    })
}

/// Window-3 moving average; endpoints truncate the window rather than
/// wrapping, since most polylines here are open chains, not loops.
fn moving_average_smooth(points: &[Point]) -> Vec<Point> {
    let n = points.len();
    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = if i == 0 { points[i] } else { points[i - 1] };
        let cur = points[i];
        let next = if i + 1 == n { points[i] } else { points[i + 1] };
        out.push(Point::new(
            (prev.x + cur.x + next.x) / 3.0,
            (prev.y + cur.y + next.y) / 3.0,
        ));
    }
    out
}

/// Classical recursive RDP: keep endpoints, split at the point of
/// maximum perpendicular distance, drop the interval once it collapses
/// within `epsilon`. Uses `>=` rather than `>` at the split threshold so
/// that `epsilon = 0` is exactly the identity (every point survives),
/// matching the spec's round-trip law.
fn rdp_simplify(points: &[Point], epsilon: f64) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let first = points[0];
    let last = points[points.len() - 1];

    let mut max_dist = -1.0f64;
    let mut max_idx = 1;
    for (i, p) in points.iter().enumerate().take(points.len() - 1).skip(1) {
        let d = perpendicular_distance(p, &first, &last);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }

    if max_dist >= epsilon {
        let mut left = rdp_simplify(&points[..=max_idx], epsilon);
        let right = rdp_simplify(&points[max_idx..], epsilon);
        left.pop();
        left.extend(right);
        left
    } else {
        vec![first, last]
    }
}

fn perpendicular_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq < 1e-12 {
        return p.dist(a);
    }
    (dy * p.x - dx * p.y + b.x * a.y - b.y * a.x).abs() / len_sq.sqrt()
}

/// If the endpoints land within the kind's threshold, snap the last
/// point exactly onto the first and report the path as closed.
fn detect_closure(points: &mut [Point], kind: PathKind) -> bool {
    let start = points[0];
    let end = *points.last().unwrap();
    let threshold = match kind {
        PathKind::Outline => OUTLINE_CLOSE_DIST,
        PathKind::Centerline => CENTERLINE_CLOSE_DIST,
    };
    if start.dist(&end) < threshold {
        let last = points.len() - 1;
        points[last] = start;
        true
    } else {
        false
    }
}

/// Merge any pair of chains whose endpoints fall within `threshold`,
/// reversing one side as needed, until no pair qualifies. Bridges
/// one-pixel gaps the skeleton tracer leaves at junctions.
pub fn merge_chains(mut chains: Vec<Vec<Point>>, threshold: f64) -> Vec<Vec<Point>> {
    loop {
        let mut merged_pair = None;
        'search: for i in 0..chains.len() {
            for j in (i + 1)..chains.len() {
                if let Some(merged) = try_merge(&chains[i], &chains[j], threshold) {
                    merged_pair = Some((i, j, merged));
                    break 'search;
                }
            }
        }
        match merged_pair {
            Some((i, j, merged)) => {
                chains[i] = merged;
                chains.remove(j);
            }
            None => break,
        }
    }
    chains
}

fn try_merge(a: &[Point], b: &[Point], threshold: f64) -> Option<Vec<Point>> {
    let a_start = a[0];
    let a_end = *a.last().unwrap();
    let b_start = b[0];
    let b_end = *b.last().unwrap();

    if a_end.dist(&b_start) < threshold {
        return Some(concat(a, b));
    }
    if a_end.dist(&b_end) < threshold {
        return Some(concat(a, &reversed(b)));
    }
    if a_start.dist(&b_end) < threshold {
        return Some(concat(b, a));
    }
    if a_start.dist(&b_start) < threshold {
        return Some(concat(&reversed(a), b));
    }
    None
}

fn concat(a: &[Point], b: &[Point]) -> Vec<Point> {
    let mut v = a.to_vec();
    v.extend_from_slice(b);
    v
}

fn reversed(a: &[Point]) -> Vec<Point> {
    let mut v = a.to_vec();
    v.reverse();
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Point> {
        (0..n).map(|i| Point::new(i as f64, 0.0)).collect()
    }

    #[test]
    fn short_polyline_is_discarded_as_noise() {
        assert!(optimize_path(line(3), PathKind::Outline).is_none());
    }

    #[test]
    fn rdp_with_zero_epsilon_is_identity() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 3.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 5.0),
            Point::new(4.0, 0.0),
        ];
        let simplified = rdp_simplify(&pts, 0.0);
        assert_eq!(simplified.len(), pts.len());
        for (a, b) in simplified.iter().zip(pts.iter()) {
            assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9);
        }
    }

    #[test]
    fn rdp_with_zero_epsilon_is_identity_on_a_straight_line() {
        let pts = line(10);
        let simplified = rdp_simplify(&pts, 0.0);
        assert_eq!(simplified.len(), pts.len());
    }

    #[test]
    fn rdp_collapses_straight_line_to_two_points() {
        let simplified = rdp_simplify(&line(20), RDP_EPSILON);
        assert_eq!(simplified.len(), 2);
    }

    #[test]
    fn closure_detection_snaps_near_endpoints_for_centerline() {
        let mut pts = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(1.0, 1.0),
        ];
        let closed = detect_closure(&mut pts, PathKind::Centerline);
        assert!(closed);
        assert_eq!(pts[0], *pts.last().unwrap());
    }

    #[test]
    fn closure_detection_leaves_far_endpoints_open() {
        let mut pts = vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            Point::new(50.0, 50.0),
        ];
        let closed = detect_closure(&mut pts, PathKind::Centerline);
        assert!(!closed);
        assert_ne!(pts[0], *pts.last().unwrap());
    }

    #[test]
    fn merge_chains_bridges_a_small_gap() {
        let a = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
        let b = vec![Point::new(4.0, 0.0), Point::new(5.0, 0.0), Point::new(6.0, 0.0)];
        let merged = merge_chains(vec![a, b], CENTERLINE_MERGE_DISTANCE);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].len(), 6);
    }

    #[test]
    fn merge_chains_leaves_distant_chains_separate() {
        let a = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)];
        let b = vec![Point::new(50.0, 0.0), Point::new(51.0, 0.0)];
        let merged = merge_chains(vec![a, b], CENTERLINE_MERGE_DISTANCE);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn optimize_path_is_idempotent_up_to_float_noise() {
        // A gentle arc, dense enough that smoothing barely perturbs
        // already-kept vertices, so a second full pass settles on the
        // same vertex count as the first.
        let n = 40;
        let pts: Vec<Point> = (0..n)
            .map(|i| {
                let t = i as f64 * std::f64::consts::PI * 0.5 / (n - 1) as f64;
                Point::new(30.0 * t.cos(), 30.0 * t.sin())
            })
            .collect();
        let once = optimize_path(pts, PathKind::Outline).unwrap();
        assert!(once.points.len() > 3);
        let twice = optimize_path(once.points.clone(), PathKind::Outline).unwrap();
        assert_eq!(once.points.len(), twice.points.len());
    }
}
