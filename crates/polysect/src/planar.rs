//! Planar set operations, delegated to the `geo` crate.
//!
//! The clip engine does its own crossing and sectioning work; only the
//! polygon boolean operations (hole subtraction, duplicate detection)
//! go through here.

use geo::{Area, BooleanOps, Coord, LineString, MultiPolygon};

use crate::geometry::{Point, Polygon, clean_ring};

type GeoPolygon = geo::Polygon<f64>;

fn ring_to_linestring(ring: &[Point]) -> LineString<f64> {
    LineString::new(ring.iter().map(|p| Coord { x: p.x, y: p.y }).collect())
}

fn linestring_to_ring(ls: &LineString<f64>) -> Vec<Point> {
    ls.coords().map(|c| Point::new(c.x, c.y)).collect()
}

/// Convert a polygon (outer plus holes) to a `geo` polygon.
pub fn to_geo(polygon: &Polygon) -> GeoPolygon {
    GeoPolygon::new(
        ring_to_linestring(&polygon.outer),
        polygon.holes.iter().map(|h| ring_to_linestring(h)).collect(),
    )
}

/// Convert a simple ring to a `geo` polygon.
pub fn ring_to_geo(ring: &[Point]) -> GeoPolygon {
    GeoPolygon::new(ring_to_linestring(ring), Vec::new())
}

/// Convert a `geo` polygon back, cleaning near-duplicate vertices.
pub fn from_geo(polygon: &GeoPolygon, tol: f64) -> Polygon {
    Polygon::with_holes(
        clean_ring(linestring_to_ring(polygon.exterior()), tol),
        polygon
            .interiors()
            .iter()
            .map(|h| clean_ring(linestring_to_ring(h), tol))
            .collect(),
    )
}

fn collect_pieces(result: MultiPolygon<f64>, tol: f64) -> Vec<Polygon> {
    result
        .0
        .iter()
        .filter(|p| p.unsigned_area() >= tol)
        .map(|p| from_geo(p, tol))
        .collect()
}

/// `subject` minus every ring in `holes`. Pieces under `tol` are dropped.
pub fn difference(subject: &Polygon, holes: &[Vec<Point>], tol: f64) -> Vec<Polygon> {
    if holes.is_empty() {
        return vec![subject.clone()];
    }
    let cutters = MultiPolygon::new(holes.iter().map(|h| ring_to_geo(h)).collect());
    let subject = MultiPolygon::new(vec![to_geo(subject)]);
    collect_pieces(subject.difference(&cutters), tol)
}

/// Area of the overlap of two polygons.
pub fn intersection_area(a: &Polygon, b: &Polygon) -> f64 {
    to_geo(a).intersection(&to_geo(b)).unsigned_area()
}

/// Area of the symmetric difference of two polygons.
pub fn symmetric_difference_area(a: &Polygon, b: &Polygon) -> f64 {
    to_geo(a).xor(&to_geo(b)).unsigned_area()
}

/// Union of a set of polygons.
pub fn union_all(polygons: &[Polygon], tol: f64) -> Vec<Polygon> {
    let merged = polygons
        .iter()
        .fold(MultiPolygon::<f64>::new(Vec::new()), |acc, p| {
            acc.union(&MultiPolygon::new(vec![to_geo(p)]))
        });
    collect_pieces(merged, tol)
}
