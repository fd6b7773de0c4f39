//! Crossings between a line segment and a ring boundary.
//!
//! Each ring vertex gets the sign of its orientation determinant against
//! the segment's supporting line. An edge whose endpoints differ in sign
//! is crossed by that line; the crossing only counts if it also falls
//! within the bounded segment.

use crate::clip::{Intersection, line_segment_intersection};
use crate::geometry::{Point, open_len};
use crate::order::insertion_sort_by;

/// A point where a line segment meets a ring boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub point: Point,
    /// Ring edge the point lies on: edge `i` runs from `ring[i - 1]` to `ring[i]`.
    pub edge: usize,
    /// Distance from the segment start, used for ordering.
    pub distance: f64,
}

/// Determinant of `|v.x v.y 1; a.x a.y 1; b.x b.y 1|`.
///
/// Positive when `v` is left of the directed line `a -> b`, negative when
/// right, zero when on it.
#[inline]
pub fn orientation_determinant(v: Point, a: Point, b: Point) -> f64 {
    v.x * (a.y - b.y) - v.y * (a.x - b.x) + (a.x * b.y - b.x * a.y)
}

#[inline]
fn determinant_sign(det: f64, tol: f64) -> i8 {
    if det.abs() < tol {
        0
    } else if det > 0.0 {
        1
    } else {
        -1
    }
}

/// Edge that ends at closed-ring vertex `k`.
#[inline]
fn edge_ending_at(k: usize, ring_len: usize) -> usize {
    if k == 0 { ring_len - 1 } else { k }
}

/// Find where segment `a`-`b` meets the boundary of `ring` (closed).
///
/// Crossings at a ring vertex are attributed to the edge ending there.
/// Coincident hits (a vertex reached from both adjacent edges) are
/// reported once. The result is sorted by distance from `a`, ties in
/// discovery order.
pub fn find_crossings(a: Point, b: Point, ring: &[Point], tol: f64) -> Vec<Crossing> {
    let n = ring.len();
    if open_len(ring) < 3 || a.approx_eq(b, tol) {
        return Vec::new();
    }

    let signs: Vec<i8> = ring
        .iter()
        .map(|&v| determinant_sign(orientation_determinant(v, a, b), tol))
        .collect();

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    let slack = tol / len_sq.sqrt();

    let mut found: Vec<Crossing> = Vec::new();

    for e in 1..n {
        let (s0, s1) = (signs[e - 1], signs[e]);
        if s0 == s1 {
            // Same side, or the edge lies along the line
            continue;
        }

        let (v0, v1) = (ring[e - 1], ring[e]);
        let (point, edge) = if s1 == 0 {
            (v1, e)
        } else if s0 == 0 {
            (v0, edge_ending_at(e - 1, n))
        } else {
            match line_segment_intersection(a.x, a.y, b.x, b.y, v0.x, v0.y, v1.x, v1.y) {
                Intersection::Point { x, y, .. } => (Point::new(x, y), e),
                Intersection::None => {
                    // The infinite line crosses the edge; recover the point
                    // and let the bounded check below decide.
                    let d0 = orientation_determinant(v0, a, b);
                    let d1 = orientation_determinant(v1, a, b);
                    let s = d0 / (d0 - d1);
                    (Point::new(v0.x + s * (v1.x - v0.x), v0.y + s * (v1.y - v0.y)), e)
                }
            }
        };

        let t = ((point.x - a.x) * dx + (point.y - a.y) * dy) / len_sq;
        if t < -slack || t > 1.0 + slack {
            continue;
        }

        if found.iter().any(|c| c.point.approx_eq(point, tol)) {
            continue;
        }

        found.push(Crossing {
            point,
            edge,
            distance: a.distance(point),
        });
    }

    insertion_sort_by(&mut found, |c| c.distance);
    found
}

/// Crossings for every 2-point segment of a polyline, one entry per segment.
pub fn find_line_crossings(line: &[Point], ring: &[Point], tol: f64) -> Vec<Vec<Crossing>> {
    line.windows(2)
        .map(|seg| find_crossings(seg[0], seg[1], ring, tol))
        .collect()
}
