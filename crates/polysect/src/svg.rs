//! SVG input - polygons and cut lines from SVG files.
//!
//! Uses usvg for complete SVG resolution (CSS, transforms, etc.)
//! then walks the tree to pull out path data:
//!
//! - every closed subpath is a ring, and all rings of one path element
//!   make one [`Feature`] (holes and islands are sorted out when clipping),
//! - every open subpath is a cut line,
//! - elements marked `data-role="cut"` are cut lines whatever their shape.
//!
//! ## Curve Flattening
//!
//! SVG paths contain Bézier curves (cubic and quadratic). These must be
//! "flattened" into line segments for polygon operations. We use lyon_geom
//! for accurate curve approximation with a fixed tolerance.

use std::collections::HashSet;

use lyon_geom::{CubicBezierSegment, QuadraticBezierSegment, point};
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use thiserror::Error;
use usvg::tiny_skia_path::PathSegment;

use crate::geometry::Point;
use crate::multipart::Feature;

/// Error type for SVG input.
///
/// ## Rust Lesson #20: Error Handling
///
/// Rust uses `Result<T, E>` instead of exceptions:
/// - `Ok(value)` = success
/// - `Err(error)` = failure
///
/// `thiserror` writes the `Display` and `Error` impls from the
/// `#[error(...)]` attributes.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("SVG parse error: {0}")]
    ParseError(String),
    #[error("no polygons found in SVG")]
    NoPolygons,
    #[error("no cut line found in SVG")]
    NoCutLine,
}

/// Everything pulled out of one SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgShapes {
    /// One feature per path element with at least one closed subpath.
    pub features: Vec<Feature>,
    /// Open polylines, in document order.
    pub cut_lines: Vec<Vec<Point>>,
}

impl SvgShapes {
    /// The first cut line, for callers that need one.
    pub fn first_cut_line(&self) -> Result<&[Point], SvgError> {
        self.cut_lines
            .first()
            .map(Vec::as_slice)
            .ok_or(SvgError::NoCutLine)
    }

    pub fn ring_count(&self) -> usize {
        self.features.iter().map(|f| f.rings.len()).sum()
    }
}

/// Extract polygons and cut lines from an SVG document.
///
/// ## Rust Lesson #21: The ? Operator
///
/// `expression?` is sugar for:
/// ```text
/// match expression {
///     Ok(v) => v,
///     Err(e) => return Err(e.into()),
/// }
/// ```
/// It "bubbles up" errors automatically!
pub fn extract_shapes_from_svg(svg_content: &str) -> Result<SvgShapes, SvgError> {
    // usvg drops data-* attributes, so find the marked ids first
    let cut_ids = scan_cut_ids(svg_content)?;

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options)
        .map_err(|e| SvgError::ParseError(e.to_string()))?;

    let mut shapes = SvgShapes::default();

    // Walk the tree and collect paths (root is a Group in usvg 0.45)
    extract_from_group(tree.root(), &cut_ids, &mut shapes);

    tracing::debug!(
        features = shapes.features.len(),
        rings = shapes.ring_count(),
        cut_lines = shapes.cut_lines.len(),
        "read SVG"
    );

    if shapes.features.is_empty() {
        Err(SvgError::NoPolygons)
    } else {
        Ok(shapes)
    }
}

/// Ids of elements carrying `data-role="cut"`.
fn scan_cut_ids(content: &str) -> Result<HashSet<String>, SvgError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut ids = HashSet::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let mut id: Option<String> = None;
                let mut is_cut = false;

                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"id" => {
                            id = Some(String::from_utf8_lossy(&attr.value).into_owned());
                        }
                        b"data-role" => {
                            is_cut = attr.value.as_ref() == b"cut";
                        }
                        _ => {}
                    }
                }

                if let (true, Some(id)) = (is_cut, id) {
                    ids.insert(id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SvgError::ParseError(format!(
                    "XML error at position {}: {}",
                    reader.error_position(),
                    e
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(ids)
}

/// Recursively extract shapes from a usvg Group.
fn extract_from_group(group: &usvg::Group, cut_ids: &HashSet<String>, shapes: &mut SvgShapes) {
    for child in group.children() {
        extract_from_node(child, cut_ids, shapes);
    }
}

fn extract_from_node(node: &usvg::Node, cut_ids: &HashSet<String>, shapes: &mut SvgShapes) {
    // ## Rust Lesson #22: Pattern Matching on Enums with Data
    //
    // usvg::Node is an enum with variants that carry different data.
    // We match on the variant and destructure to get the inner data.

    match node {
        usvg::Node::Group(group) => extract_from_group(group, cut_ids, shapes),
        usvg::Node::Path(path) => add_path(path, cut_ids, shapes),
        // Ignore text, images, etc.
        _ => {}
    }
}

fn add_path(path: &usvg::Path, cut_ids: &HashSet<String>, shapes: &mut SvgShapes) {
    let id = path.id();
    let marked_cut = !id.is_empty() && cut_ids.contains(id);

    let mut rings = Vec::new();
    for subpath in flatten_subpaths(path) {
        if subpath.closed && !marked_cut {
            // Closed rings repeat their first point
            if subpath.points.len() >= 4 {
                rings.push(subpath.points);
            }
        } else if subpath.points.len() >= 2 {
            shapes.cut_lines.push(subpath.points);
        }
    }

    if !rings.is_empty() {
        // Preserve the element's ID if it has one
        let feature_id = if id.is_empty() { None } else { Some(id.to_string()) };
        shapes.features.push(Feature::new(feature_id, rings));
    }
}

/// Tolerance for curve flattening.
/// Lower = more points, smoother curves, slower.
/// 0.1 is good for plotters (sub-pixel accuracy at typical scales).
const CURVE_TOLERANCE: f32 = 0.1;

/// Consecutive points closer than this are merged.
const DEDUP_TOLERANCE: f64 = 1e-6;

/// One flattened subpath.
#[derive(Debug, Clone, Default)]
struct Subpath {
    points: Vec<Point>,
    closed: bool,
}

impl Subpath {
    fn push(&mut self, x: f32, y: f32) {
        let p = Point::new(x as f64, y as f64);
        if self.points.last().is_none_or(|last| !last.approx_eq(p, DEDUP_TOLERANCE)) {
            self.points.push(p);
        }
    }

    fn close(&mut self) {
        self.closed = true;
        if let (Some(&first), Some(&last)) = (self.points.first(), self.points.last()) {
            if self.points.len() > 1 && first.approx_eq(last, DEDUP_TOLERANCE) {
                self.points.pop();
            }
            self.points.push(first);
        }
    }
}

/// Split a usvg path into flattened subpaths, in absolute coordinates.
///
/// ## Rust Lesson #23: Iterator Adapters
///
/// usvg already gives us absolute coordinates (no relative commands!),
/// only the element transform remains to be applied.
fn flatten_subpaths(path: &usvg::Path) -> Vec<Subpath> {
    let data = path
        .data()
        .clone()
        .transform(path.abs_transform())
        .unwrap_or_else(|| path.data().clone());

    let mut subpaths: Vec<Subpath> = Vec::new();
    let mut current = Subpath::default();
    let mut last_point: Option<(f32, f32)> = None;
    let mut start_point: Option<(f32, f32)> = None;

    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                if !current.points.is_empty() {
                    subpaths.push(std::mem::take(&mut current));
                }
                current.push(p.x, p.y);
                last_point = Some((p.x, p.y));
                start_point = last_point;
            }
            PathSegment::LineTo(p) => {
                current.push(p.x, p.y);
                last_point = Some((p.x, p.y));
            }
            PathSegment::QuadTo(ctrl, p) => {
                if let Some((lx, ly)) = last_point {
                    let curve = QuadraticBezierSegment {
                        from: point(lx, ly),
                        ctrl: point(ctrl.x, ctrl.y),
                        to: point(p.x, p.y),
                    };
                    // Callback receives LineSegment, we take the endpoint of each segment
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                        current.push(segment.to.x, segment.to.y);
                    });
                } else {
                    current.push(p.x, p.y);
                }
                last_point = Some((p.x, p.y));
            }
            PathSegment::CubicTo(ctrl1, ctrl2, p) => {
                if let Some((lx, ly)) = last_point {
                    let curve = CubicBezierSegment {
                        from: point(lx, ly),
                        ctrl1: point(ctrl1.x, ctrl1.y),
                        ctrl2: point(ctrl2.x, ctrl2.y),
                        to: point(p.x, p.y),
                    };
                    curve.for_each_flattened(CURVE_TOLERANCE, &mut |segment| {
                        current.push(segment.to.x, segment.to.y);
                    });
                } else {
                    current.push(p.x, p.y);
                }
                last_point = Some((p.x, p.y));
            }
            PathSegment::Close => {
                current.close();
                subpaths.push(std::mem::take(&mut current));
                // A segment after Z without a MoveTo starts at the subpath start
                last_point = start_point;
                if let Some((x, y)) = start_point {
                    current.push(x, y);
                }
            }
        }
    }

    // A lone point left behind by a trailing Z isn't a subpath
    if current.points.len() > 1 {
        subpaths.push(current);
    }

    subpaths
}

// ============================================================================
// TESTS
// ============================================================================
