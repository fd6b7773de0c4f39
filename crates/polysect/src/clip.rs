//! Point classification against polygon rings.
//!
//! Every line vertex is classified once, before any segment work, so
//! these run a lot. They stay allocation-free.

use crate::geometry::{Point, distance_to_segment};

// ============================================================================
// POINT IN POLYGON (Ray Casting Algorithm)
// ============================================================================
//
// ## Rust Lesson #8: References & Slices
//
// `&[Point]` is a "slice" - a borrowed view into a contiguous sequence.
// It works with Vec<Point>, arrays, or any contiguous memory.

/// Test if a point is inside a ring using ray casting.
///
/// Casts a ray to the right and counts edge crossings.
/// Odd crossings = inside, even = outside. Points exactly on the
/// boundary may go either way; use [`covers`] or [`strictly_inside`]
/// when that matters.
#[inline]
pub fn point_in_polygon(px: f64, py: f64, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = (polygon[i].x, polygon[i].y);
        let (xj, yj) = (polygon[j].x, polygon[j].y);

        if ((yi > py) != (yj > py)) && (px < (xj - xi) * (py - yi) / (yj - yi) + xi) {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Distance from `p` to the nearest edge of `ring`.
pub fn distance_to_ring(p: Point, ring: &[Point]) -> f64 {
    ring.windows(2)
        .map(|edge| distance_to_segment(p, edge[0], edge[1]))
        .fold(f64::INFINITY, f64::min)
}

/// True when `p` lies on the ring boundary within `tol`.
#[inline]
pub fn point_on_ring(p: Point, ring: &[Point], tol: f64) -> bool {
    distance_to_ring(p, ring) <= tol
}

/// Find the edge `p` lies on, if any.
///
/// Edge `i` runs from `ring[i - 1]` to `ring[i]`, so the result is in
/// `1..ring.len()`. The closest edge wins when several are within `tol`.
pub fn locate_on_ring(p: Point, ring: &[Point], tol: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for i in 1..ring.len() {
        let d = distance_to_segment(p, ring[i - 1], ring[i]);
        if d <= tol && best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Covers test: inside the ring or on its boundary.
#[inline]
pub fn covers(ring: &[Point], p: Point, tol: f64) -> bool {
    point_on_ring(p, ring, tol) || point_in_polygon(p.x, p.y, ring)
}

/// Inside the ring and not on its boundary.
#[inline]
pub fn strictly_inside(ring: &[Point], p: Point, tol: f64) -> bool {
    point_in_polygon(p.x, p.y, ring) && !point_on_ring(p, ring, tol)
}

/// Classify every line vertex: `true` iff the ring covers it.
pub fn classify_line(ring: &[Point], line: &[Point], tol: f64) -> Vec<bool> {
    line.iter().map(|&p| covers(ring, p, tol)).collect()
}

// ============================================================================
// LINE-LINE INTERSECTION
// ============================================================================

/// Result of a segment-segment intersection test.
///
/// ## Rust Lesson #10: Enums (Sum Types)
///
/// Rust enums can carry data, so "no hit" and "hit at (x, y)" are one
/// type and `match` forces both cases to be handled.
#[derive(Debug, Clone, Copy)]
pub enum Intersection {
    None,
    Point { x: f64, y: f64, t: f64 },
}

/// Find intersection point between two line segments.
///
/// Returns the intersection point and `t` parameter (0..1 means on first segment).
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn line_segment_intersection(
    x1: f64, y1: f64, x2: f64, y2: f64,
    x3: f64, y3: f64, x4: f64, y4: f64,
) -> Intersection {
    let denom = (y4 - y3) * (x2 - x1) - (x4 - x3) * (y2 - y1);

    // Parallel or coincident lines
    if denom.abs() < 1e-10 {
        return Intersection::None;
    }

    let ua = ((x4 - x3) * (y1 - y3) - (y4 - y3) * (x1 - x3)) / denom;
    let ub = ((x2 - x1) * (y1 - y3) - (y2 - y1) * (x1 - x3)) / denom;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        let ix = x1 + ua * (x2 - x1);
        let iy = y1 + ua * (y2 - y1);
        Intersection::Point { x: ix, y: iy, t: ua }
    } else {
        Intersection::None
    }
}

// ============================================================================
// TESTS
// ============================================================================
