//! Core geometry types for polysect.
//!
//! Rings are stored **closed**: the first point is repeated at the end.
//! Everything that builds a ring goes through [`close_ring`] so the
//! invariant holds for both inputs and outputs.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = duplicate the value (Copy for small stack values only)
//! - `PartialEq` = compare with `==`
//! - `Serialize` / `Deserialize` = serde can read and write it (JSON, YAML)

use serde::{Deserialize, Serialize};

/// A 2D point with x,y coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Axis-aligned bounding box as (min_x, min_y, max_x, max_y).
pub type BBox = (f64, f64, f64, f64);

/// Rotational direction of a ring's vertex ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winding {
    Clockwise,
    CounterClockwise,
}

impl Winding {
    pub fn reversed(self) -> Self {
        match self {
            Winding::Clockwise => Winding::CounterClockwise,
            Winding::CounterClockwise => Winding::Clockwise,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Winding::Clockwise => "cw",
            Winding::CounterClockwise => "ccw",
        }
    }
}

/// A polygon with an outer boundary and optional holes.
///
/// All rings are closed. Holes are expected to wind opposite to `outer`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Outer boundary vertices
    pub outer: Vec<Point>,
    /// Interior holes
    pub holes: Vec<Vec<Point>>,
    /// Optional ID from the SVG element
    pub id: Option<String>,
}

// ============================================================================
// IMPLEMENTATIONS (methods)
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when both coordinates are within `tol` of `other`.
    #[inline]
    pub fn approx_eq(&self, other: Point, tol: f64) -> bool {
        (self.x - other.x).abs() <= tol && (self.y - other.y).abs() <= tol
    }

    #[inline]
    pub fn midpoint(&self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl Polygon {
    /// Create a simple polygon with no holes. The ring is closed if needed.
    pub fn new(outer: Vec<Point>) -> Self {
        Self {
            outer: close_ring(outer),
            holes: Vec::new(),
            id: None,
        }
    }

    /// Create a polygon with holes.
    pub fn with_holes(outer: Vec<Point>, holes: Vec<Vec<Point>>) -> Self {
        Self {
            outer: close_ring(outer),
            holes: holes.into_iter().map(close_ring).collect(),
            id: None,
        }
    }

    /// Create a polygon with an ID.
    pub fn with_id(outer: Vec<Point>, id: Option<String>) -> Self {
        Self {
            outer: close_ring(outer),
            holes: Vec::new(),
            id,
        }
    }

    /// Get the bounding box of the outer ring.
    ///
    /// ## Rust Lesson #6: Option<T>
    ///
    /// No `null` here: an empty ring has no box, so we return `None`
    /// and the compiler makes every caller deal with that case.
    pub fn bounding_box(&self) -> Option<BBox> {
        bounding_box_of(&self.outer)
    }

    /// Signed area of the outer ring (shoelace formula).
    ///
    /// Positive for counter-clockwise winding, negative for clockwise.
    #[inline]
    pub fn signed_area(&self) -> f64 {
        signed_area_of_points(&self.outer)
    }

    /// Check if the outer boundary has clockwise winding.
    #[inline]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Area covered by the polygon: outer ring minus its holes.
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|h| signed_area_of_points(h).abs()).sum();
        (self.signed_area().abs() - holes).max(0.0)
    }

    /// Number of distinct vertices in the outer ring.
    pub fn vertex_count(&self) -> usize {
        open_len(&self.outer)
    }
}

// ============================================================================
// RING HELPERS
// ============================================================================

/// Close a ring by re-appending its first point when it isn't already closed.
pub fn close_ring(mut points: Vec<Point>) -> Vec<Point> {
    if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
        if points.len() > 1 && first != last {
            points.push(first);
        }
    }
    points
}

/// Length of a ring without its closing point.
#[inline]
pub fn open_len(ring: &[Point]) -> usize {
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 1 && first == last => ring.len() - 1,
        _ => ring.len(),
    }
}

/// Collapse consecutive points closer than `tol` and close the ring.
///
/// The closing point is considered too, so a ring whose last vertex
/// duplicates the first doesn't end up with a zero-length closing edge.
pub fn clean_ring(points: Vec<Point>, tol: f64) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(points.len() + 1);
    for p in points {
        if out.last().is_none_or(|last| !last.approx_eq(p, tol)) {
            out.push(p);
        }
    }
    while out.len() > 1 && out[out.len() - 1].approx_eq(out[0], tol) {
        out.pop();
    }
    close_ring(out)
}

/// Calculate signed area of a point sequence using the shoelace formula.
///
/// Returns:
/// - Positive value for counter-clockwise winding
/// - Negative value for clockwise winding
///
/// Works on open and closed rings alike (the closing edge of a closed
/// ring contributes nothing).
pub fn signed_area_of_points(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }
    area / 2.0
}

/// Winding of a ring, or `None` when it has no area.
pub fn winding_of(points: &[Point]) -> Option<Winding> {
    let area = signed_area_of_points(points);
    if area > 0.0 {
        Some(Winding::CounterClockwise)
    } else if area < 0.0 {
        Some(Winding::Clockwise)
    } else {
        None
    }
}

/// Return the ring with the requested winding, reversing it if needed.
pub fn oriented(mut ring: Vec<Point>, winding: Winding) -> Vec<Point> {
    if winding_of(&ring).is_some_and(|w| w != winding) {
        ring.reverse();
    }
    ring
}

/// Bounding box of a point sequence.
pub fn bounding_box_of(points: &[Point]) -> Option<BBox> {
    if points.is_empty() {
        return None;
    }

    let min_x = points.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let max_x = points.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

    Some((min_x, min_y, max_x, max_y))
}

/// True when `inner` lies within `outer` (edges may touch).
#[inline]
pub fn bbox_contains(outer: BBox, inner: BBox) -> bool {
    inner.0 >= outer.0 && inner.1 >= outer.1 && inner.2 <= outer.2 && inner.3 <= outer.3
}

/// True when two boxes overlap or touch.
#[inline]
pub fn bbox_intersects(a: BBox, b: BBox) -> bool {
    !(a.2 < b.0 || b.2 < a.0 || a.3 < b.1 || b.3 < a.1)
}

/// Shortest distance from `p` to the segment `a`-`b`.
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0); // 3-4-5 triangle
    }

    #[test]
    fn new_polygon_is_closed() {
        let poly = unit_square();
        assert_eq!(poly.outer.len(), 5);
        assert_eq!(poly.outer.first(), poly.outer.last());
        assert_eq!(poly.vertex_count(), 4);
    }

    #[test]
    fn closing_an_already_closed_ring_is_a_no_op() {
        let ring = close_ring(unit_square().outer);
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn polygon_bbox() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 5.0),
            Point::new(0.0, 5.0),
        ]);
        assert_eq!(poly.bounding_box(), Some((0.0, 0.0, 10.0, 5.0)));
    }

    #[test]
    fn empty_polygon_bbox() {
        let poly = Polygon::new(vec![]);
        assert_eq!(poly.bounding_box(), None);
    }

    #[test]
    fn signed_area_ccw_positive() {
        let poly = unit_square();
        let area = poly.signed_area();
        assert!(area > 0.0, "CCW polygon should have positive signed area, got {}", area);
        assert!((area - 1.0).abs() < 1e-12);
        assert!(!poly.is_clockwise());
    }

    #[test]
    fn signed_area_cw_negative() {
        let poly = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 0.0),
        ]);
        let area = poly.signed_area();
        assert!((area + 100.0).abs() < 1e-10, "10x10 square should have area -100, got {}", area);
        assert!(poly.is_clockwise());
    }

    #[test]
    fn area_subtracts_holes() {
        let poly = Polygon::with_holes(
            vec![
                Point::new(0.0, 0.0),
                Point::new(4.0, 0.0),
                Point::new(4.0, 4.0),
                Point::new(0.0, 4.0),
            ],
            vec![vec![
                Point::new(1.0, 1.0),
                Point::new(1.0, 2.0),
                Point::new(2.0, 2.0),
                Point::new(2.0, 1.0),
            ]],
        );
        assert!((poly.area() - 15.0).abs() < 1e-12);
    }

    #[test]
    fn clean_ring_drops_near_duplicates() {
        let ring = clean_ring(
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(1.0, 1.0 + 1e-14),
                Point::new(0.0, 0.0),
            ],
            1e-10,
        );
        assert_eq!(ring.len(), 4);
        assert_eq!(open_len(&ring), 3);
    }

    #[test]
    fn oriented_reverses_only_when_needed() {
        let ccw = unit_square().outer;
        assert_eq!(oriented(ccw.clone(), Winding::CounterClockwise), ccw);

        let cw = oriented(ccw.clone(), Winding::Clockwise);
        assert_eq!(winding_of(&cw), Some(Winding::Clockwise));
    }

    #[test]
    fn segment_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(distance_to_segment(Point::new(5.0, 3.0), a, b), 3.0);
        assert_eq!(distance_to_segment(Point::new(-4.0, 3.0), a, b), 5.0);
    }

    #[test]
    fn bbox_relations() {
        assert!(bbox_contains((0.0, 0.0, 10.0, 10.0), (1.0, 1.0, 2.0, 2.0)));
        assert!(!bbox_contains((1.0, 1.0, 2.0, 2.0), (0.0, 0.0, 10.0, 10.0)));
        assert!(bbox_intersects((0.0, 0.0, 1.0, 1.0), (1.0, 1.0, 2.0, 2.0)));
        assert!(!bbox_intersects((0.0, 0.0, 1.0, 1.0), (2.0, 2.0, 3.0, 3.0)));
    }
}
