//! Splitting one ring along a chord.
//!
//! A chord starts at a boundary point P, may pass through interior line
//! vertices, and ends at a boundary point Q. Walking the ring forward from
//! P to Q and coming back along the chord gives one piece; walking forward
//! from Q to P and following the chord gives the other.

use tracing::debug;

use crate::geometry::{Point, clean_ring, open_len, signed_area_of_points};

/// A run of the cut line with both ends on a ring boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    /// First point is P, last is Q; anything between is strictly inside.
    pub path: Vec<Point>,
    /// Ring edge holding P (edge `i` runs from `ring[i - 1]` to `ring[i]`).
    pub begin_edge: usize,
    /// Ring edge holding Q.
    pub end_edge: usize,
}

impl Chord {
    /// A single straight segment from `p` to `q`.
    pub fn straight(p: Point, begin_edge: usize, q: Point, end_edge: usize) -> Self {
        Self { path: vec![p, q], begin_edge, end_edge }
    }

    /// P, or `None` for an empty path.
    pub fn start(&self) -> Option<Point> {
        self.path.first().copied()
    }

    /// Q, or `None` for an empty path.
    pub fn end(&self) -> Option<Point> {
        self.path.last().copied()
    }

    /// Line vertices strictly between P and Q. Empty for paths shorter
    /// than three points.
    pub fn interior(&self) -> &[Point] {
        self.path.get(1..self.path.len().saturating_sub(1)).unwrap_or(&[])
    }

    /// Total length along the path.
    pub fn length(&self) -> f64 {
        self.path.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Ring vertices met walking forward from a point on edge `from` to a
/// point on edge `to`.
///
/// `from_leads` says, for the shared-edge case, whether the starting
/// point comes before the end point along that edge.
fn walk(ring: &[Point], n: usize, from: usize, to: usize, from_leads: bool) -> impl Iterator<Item = Point> + '_ {
    let count = if to > from {
        to - from
    } else if to < from {
        to + n - from
    } else if from_leads {
        0
    } else {
        n
    };
    (0..count).map(move |k| ring[(from + k) % n])
}

/// Split `ring` (closed) along `chord`.
///
/// Returns the two closed pieces, both wound like `ring`, or `None` when
/// the split is degenerate: bad edge indices, a zero-length chord, or a
/// piece with fewer than 3 distinct vertices or area below `tol`.
pub fn section_ring(ring: &[Point], chord: &Chord, tol: f64) -> Option<(Vec<Point>, Vec<Point>)> {
    let n = open_len(ring);
    if n < 3 || chord.path.len() < 2 {
        return None;
    }

    let (i, j) = (chord.begin_edge, chord.end_edge);
    if !(1..=n).contains(&i) || !(1..=n).contains(&j) {
        debug!(begin = i, end = j, ring_edges = n, "chord edge out of range");
        return None;
    }

    let (p, q) = (chord.start()?, chord.end()?);
    let interior = chord.interior();
    if interior.is_empty() && p.approx_eq(q, tol) {
        return None;
    }

    // Same edge: whichever point is nearer the edge's start comes first.
    let p_leads = i != j || ring[i - 1].distance(p) <= ring[i - 1].distance(q);

    let mut first = Vec::with_capacity(n + interior.len() + 3);
    first.push(p);
    first.extend(walk(ring, n, i, j, p_leads));
    first.push(q);
    first.extend(interior.iter().rev().copied());

    let mut second = Vec::with_capacity(n + interior.len() + 3);
    second.push(q);
    second.extend(walk(ring, n, j, i, !p_leads));
    second.push(p);
    second.extend(interior.iter().copied());

    let first = clean_ring(first, tol);
    let second = clean_ring(second, tol);

    if is_sliver(&first, tol) || is_sliver(&second, tol) {
        debug!(
            first_area = signed_area_of_points(&first).abs(),
            second_area = signed_area_of_points(&second).abs(),
            "discarding degenerate section"
        );
        return None;
    }

    Some((first, second))
}

/// Fewer than 3 distinct vertices or an area below `tol`.
pub fn is_sliver(ring: &[Point], tol: f64) -> bool {
    open_len(ring) < 3 || signed_area_of_points(ring).abs() < tol
}
