//! Splitting a simple ring with a polyline.
//!
//! This is the HOT PATH of the crate. The flow for one ring:
//!
//! 1. Validate and clean the inputs.
//! 2. Classify every line vertex (covers test) and decide the
//!    [`LineClass`]: all inside, all outside, or mixed.
//! 3. Gather the crossings of each 2-point segment. The class decides how
//!    many crossings a chord needs, and the fast variant bails out on
//!    mixed lines with a multiply-crossed segment.
//! 4. Cut: pieces are taken from the result set one at a time, the line's
//!    chords relative to that piece are found, and the first chord that
//!    gives a clean section replaces the piece with its two halves.
//! 5. Drop duplicate pieces (symmetric difference below tolerance).

use tracing::{debug, warn};

use crate::clip::{classify_line, locate_on_ring, point_on_ring, strictly_inside};
use crate::config::{ClipConfig, ClipVariant};
use crate::error::{ClipError, Result};
use crate::geometry::{Point, Polygon, bbox_intersects, bounding_box_of, clean_ring, open_len};
use crate::intersect::{find_crossings, find_line_crossings};
use crate::planar;
use crate::section::{Chord, section_ring};

/// Where the line's vertices sit relative to the polygon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Every vertex is covered by the polygon.
    AllInside,
    /// No vertex is covered by the polygon.
    AllOutside,
    /// Some of each.
    Mixed,
}

impl LineClass {
    /// Decide the class from a per-vertex covers classification.
    pub fn from_classification(inside: &[bool]) -> Self {
        let any_inside = inside.iter().any(|&b| b);
        let all_inside = inside.iter().all(|&b| b);
        match (any_inside, all_inside) {
            (true, true) => LineClass::AllInside,
            (false, _) => LineClass::AllOutside,
            (true, false) => LineClass::Mixed,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LineClass::AllInside => "all-inside",
            LineClass::AllOutside => "all-outside",
            LineClass::Mixed => "mixed",
        }
    }
}

/// What a clip produced.
///
/// ## Rust Lesson #13: Enums instead of out-parameters
///
/// "Did it split, and into what?" is one value. A caller can't read the
/// pieces without first finding out that there are pieces.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitOutcome {
    /// The line never cuts the polygon in two. Not an error.
    Unsplit,
    /// Two or more pieces, in the order they were produced.
    Split(Vec<Polygon>),
}

impl SplitOutcome {
    pub fn is_split(&self) -> bool {
        matches!(self, SplitOutcome::Split(_))
    }

    /// The pieces, empty when unsplit.
    pub fn pieces(&self) -> &[Polygon] {
        match self {
            SplitOutcome::Unsplit => &[],
            SplitOutcome::Split(pieces) => pieces,
        }
    }

    pub fn into_pieces(self) -> Vec<Polygon> {
        match self {
            SplitOutcome::Unsplit => Vec::new(),
            SplitOutcome::Split(pieces) => pieces,
        }
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().len()
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Close and clean a ring, rejecting empty, non-finite or too-small input.
pub(crate) fn prepare_ring(ring: &[Point], tol: f64) -> Result<Vec<Point>> {
    if ring.is_empty() {
        return Err(ClipError::EmptyPolygon);
    }
    if !ring.iter().all(Point::is_finite) {
        return Err(ClipError::NonFinite { what: "polygon ring" });
    }
    let ring = clean_ring(ring.to_vec(), tol);
    let got = open_len(&ring);
    if got < 3 {
        return Err(ClipError::TooFewPoints { what: "polygon ring", got, need: 3 });
    }
    Ok(ring)
}

/// Drop consecutive duplicate vertices, rejecting lines with fewer than 2.
pub(crate) fn prepare_line(line: &[Point], tol: f64) -> Result<Vec<Point>> {
    if !line.iter().all(Point::is_finite) {
        return Err(ClipError::NonFinite { what: "line" });
    }
    let mut cleaned: Vec<Point> = Vec::with_capacity(line.len());
    for &p in line {
        if cleaned.last().is_none_or(|last| !last.approx_eq(p, tol)) {
            cleaned.push(p);
        }
    }
    if cleaned.len() < 2 {
        return Err(ClipError::TooFewPoints { what: "line", got: cleaned.len(), need: 2 });
    }
    Ok(cleaned)
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Split a simple ring with a polyline.
///
/// The ring may be open or closed; pieces come back closed and wound like
/// the input. Holes are not considered here, see
/// [`clip_polygon`](crate::multipart::clip_polygon).
pub fn clip_ring(ring: &[Point], line: &[Point], config: &ClipConfig) -> Result<SplitOutcome> {
    let tol = config.tolerance;
    let ring = prepare_ring(ring, tol)?;
    let line = prepare_line(line, tol)?;

    // Fast bounding box rejection
    if let (Some(ring_box), Some(line_box)) = (bounding_box_of(&ring), bounding_box_of(&line)) {
        if !bbox_intersects(ring_box, line_box) {
            return Ok(SplitOutcome::Unsplit);
        }
    }

    let inside = classify_line(&ring, &line, tol);
    let class = LineClass::from_classification(&inside);
    let per_segment = find_line_crossings(&line, &ring, tol);
    let total: usize = per_segment.iter().map(Vec::len).sum();

    debug!(class = class.name(), crossings = total, segments = per_segment.len(), "classified cut line");

    let touches_boundary = || line.iter().any(|&p| point_on_ring(p, &ring, tol));

    // ## Rust Lesson #15: Match Expressions
    //
    // Each class has its own "can this possibly split?" rule.
    let hopeless = match class {
        // The line must leave and come back before a chord can start, then
        // leave and come back again to end inside: four crossings, unless
        // a vertex sits right on the boundary.
        LineClass::AllInside => total < 4 && (total < 2 || !touches_boundary()),
        LineClass::AllOutside => total < 2,
        LineClass::Mixed => {
            if config.variant == ClipVariant::Fast {
                if let Some((segment, crossings)) =
                    per_segment.iter().enumerate().find(|(_, c)| c.len() > 1)
                {
                    return Err(ClipError::MultipleCrossings { segment, count: crossings.len() });
                }
            }
            total < 2
        }
    };

    if hopeless {
        return Ok(SplitOutcome::Unsplit);
    }

    let pieces = cut(ring, &line, config);
    let pieces = dedupe_pieces(pieces, tol);

    if pieces.len() < 2 {
        debug!(class = class.name(), "no usable chord");
        return Ok(SplitOutcome::Unsplit);
    }

    debug!(class = class.name(), pieces = pieces.len(), "ring split");
    Ok(SplitOutcome::Split(pieces.into_iter().map(Polygon::new).collect()))
}

// ============================================================================
// CHORDS
// ============================================================================

/// A point along the cut line: one of its vertices or a boundary crossing.
#[derive(Debug, Clone, Copy)]
struct Station {
    point: Point,
    /// Ring edge the station lies on, if it's on the boundary.
    edge: Option<usize>,
}

fn push_station(stations: &mut Vec<Station>, station: Station, tol: f64) {
    if let Some(last) = stations.last_mut() {
        if last.point.approx_eq(station.point, tol) {
            if last.edge.is_none() {
                last.edge = station.edge;
            }
            return;
        }
    }
    stations.push(station);
}

/// Line vertices and boundary crossings, in order along the line.
///
/// Vertices that lie on the boundary are snapped to their edge.
fn stations_along(ring: &[Point], line: &[Point], tol: f64) -> Vec<Station> {
    let mut stations = Vec::with_capacity(line.len() * 2);
    let Some(&first) = line.first() else {
        return stations;
    };
    let vertex = |p: Point| Station { point: p, edge: locate_on_ring(p, ring, tol) };

    push_station(&mut stations, vertex(first), tol);
    for seg in line.windows(2) {
        for crossing in find_crossings(seg[0], seg[1], ring, tol) {
            push_station(&mut stations, Station { point: crossing.point, edge: Some(crossing.edge) }, tol);
        }
        push_station(&mut stations, vertex(seg[1]), tol);
    }
    stations
}

/// Every run of the line that is strictly inside `ring` and starts and
/// ends on its boundary.
///
/// Walking the stations in order, each interval between neighbours is
/// inside or outside (midpoint test):
/// - inside → inside through a line vertex extends the current chord,
/// - outside → inside at a boundary station opens a chord,
/// - inside → boundary station closes it (and may open the next one),
/// - outside → outside does nothing.
///
/// A run that starts or ends at a line vertex off the boundary dangles and
/// is not a chord.
pub fn extract_chords(ring: &[Point], line: &[Point], tol: f64) -> Vec<Chord> {
    let stations = stations_along(ring, line, tol);
    let mut chords = Vec::new();

    // (station index, edge) where the open chord began
    let mut open: Option<(usize, usize)> = None;
    let mut in_run = false;

    for k in 0..stations.len().saturating_sub(1) {
        let (here, next) = (stations[k], stations[k + 1]);
        let inside = strictly_inside(ring, here.point.midpoint(next.point), tol);

        if !inside {
            in_run = false;
            open = None;
            continue;
        }

        if !in_run {
            in_run = true;
            open = here.edge.map(|edge| (k, edge));
        }

        if let Some(end_edge) = next.edge {
            if let Some((start, begin_edge)) = open {
                chords.push(Chord {
                    path: stations[start..=k + 1].iter().map(|s| s.point).collect(),
                    begin_edge,
                    end_edge,
                });
            }
            // The next inside interval starts a fresh chord here.
            in_run = false;
            open = None;
        }
    }

    chords
}

// ============================================================================
// CUTTING
// ============================================================================

/// First chord of `line` that sections `piece` cleanly.
fn first_section(piece: &[Point], line: &[Point], tol: f64) -> Option<(Vec<Point>, Vec<Point>)> {
    extract_chords(piece, line, tol).iter().find_map(|chord| {
        let halves = section_ring(piece, chord, tol);
        if halves.is_none() {
            debug!(length = chord.length(), "degenerate section skipped");
        }
        halves
    })
}

/// Cut `ring` into pieces with every chord of `line`.
///
/// Chords are always taken relative to the current piece, never the
/// original ring, so a chord crossing an earlier cut is handled piecewise.
fn cut(ring: Vec<Point>, line: &[Point], config: &ClipConfig) -> Vec<Vec<Point>> {
    let tol = config.tolerance;
    let mut pending = vec![ring];
    let mut done = Vec::new();
    let mut splits = 0usize;

    while let Some(piece) = pending.pop() {
        if splits >= config.max_splits {
            warn!(max_splits = config.max_splits, "split limit reached, keeping remaining pieces as they are");
            done.push(piece);
            done.append(&mut pending);
            break;
        }

        match first_section(&piece, line, tol) {
            Some((first, second)) => {
                splits += 1;
                pending.push(second);
                pending.push(first);
            }
            None => done.push(piece),
        }
    }

    done
}

/// Remove pieces that duplicate an earlier one.
///
/// Two pieces are duplicates when their symmetric difference has an area
/// below `tol`.
pub fn dedupe_pieces(pieces: Vec<Vec<Point>>, tol: f64) -> Vec<Vec<Point>> {
    let mut kept: Vec<Polygon> = Vec::with_capacity(pieces.len());
    for ring in pieces {
        let candidate = Polygon::new(ring);
        let duplicate = kept
            .iter()
            .any(|k| planar::symmetric_difference_area(k, &candidate) < tol);
        if duplicate {
            debug!("dropping duplicate piece");
        } else {
            kept.push(candidate);
        }
    }
    kept.into_iter().map(|p| p.outer).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Winding, signed_area_of_points, winding_of};
    use approx::assert_relative_eq;

    fn config() -> ClipConfig {
        ClipConfig::default()
    }

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&p| p.into()).collect()
    }

    fn unit_square() -> Vec<Point> {
        pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)])
    }

    /// A "U": 3 wide, 3 tall, with a 1-wide notch from the top down to y=1.
    fn u_shape() -> Vec<Point> {
        pts(&[
            (0.0, 0.0), (3.0, 0.0), (3.0, 3.0), (2.0, 3.0),
            (2.0, 1.0), (1.0, 1.0), (1.0, 3.0), (0.0, 3.0), (0.0, 0.0),
        ])
    }

    fn total_area(outcome: &SplitOutcome) -> f64 {
        outcome.pieces().iter().map(Polygon::area).sum()
    }

    #[test]
    fn class_from_classification() {
        assert_eq!(LineClass::from_classification(&[true, true]), LineClass::AllInside);
        assert_eq!(LineClass::from_classification(&[false, false]), LineClass::AllOutside);
        assert_eq!(LineClass::from_classification(&[false, true]), LineClass::Mixed);
    }

    #[test]
    fn vertical_line_halves_unit_square() {
        let line = pts(&[(0.5, -1.0), (0.5, 2.0)]);
        let outcome = clip_ring(&unit_square(), &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 2);
        for piece in outcome.pieces() {
            assert_relative_eq!(piece.area(), 0.5, epsilon = 1e-12);
            assert_eq!(piece.outer.first(), piece.outer.last());
        }
    }

    #[test]
    fn line_far_away_does_not_split() {
        let line = pts(&[(2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(clip_ring(&unit_square(), &line, &config()).unwrap(), SplitOutcome::Unsplit);
    }

    #[test]
    fn line_ending_inside_does_not_split() {
        let line = pts(&[(-1.0, 0.5), (0.5, 0.5)]);
        assert_eq!(clip_ring(&unit_square(), &line, &config()).unwrap(), SplitOutcome::Unsplit);
    }

    #[test]
    fn line_touching_a_corner_does_not_split() {
        let line = pts(&[(-1.0, 1.0), (1.0, -1.0)]);
        // Passes through (0,0) only
        assert_eq!(clip_ring(&unit_square(), &line, &config()).unwrap(), SplitOutcome::Unsplit);
    }

    #[test]
    fn line_along_an_edge_does_not_split() {
        let line = pts(&[(-1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(clip_ring(&unit_square(), &line, &config()).unwrap(), SplitOutcome::Unsplit);
    }

    #[test]
    fn chord_between_boundary_vertices_splits() {
        // Both line vertices lie on the boundary: all-inside with two crossings
        let line = pts(&[(0.5, 0.0), (0.5, 1.0)]);
        let outcome = clip_ring(&unit_square(), &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 2);
    }

    #[test]
    fn diagonal_through_corners_gives_triangles() {
        let line = pts(&[(-1.0, -1.0), (2.0, 2.0)]);
        let outcome = clip_ring(&unit_square(), &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 2);
        for piece in outcome.pieces() {
            assert_eq!(piece.vertex_count(), 3);
            assert_relative_eq!(piece.area(), 0.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn bent_line_with_inside_vertex() {
        let line = pts(&[(-1.0, 0.5), (0.5, 0.75), (2.0, 0.5)]);
        let outcome = clip_ring(&unit_square(), &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 2);
        assert_relative_eq!(total_area(&outcome), 1.0, epsilon = 1e-12);
        assert!(outcome.pieces().iter().all(|p| p.outer.contains(&Point::new(0.5, 0.75))));
    }

    #[test]
    fn two_parallel_lines_as_one_polyline() {
        // Crosses the square at x=0.25, loops around outside, crosses at x=0.75
        let line = pts(&[(0.25, -1.0), (0.25, 2.0), (0.75, 2.0), (0.75, -1.0)]);
        let outcome = clip_ring(&unit_square(), &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 3);
        let mut areas: Vec<f64> = outcome.pieces().iter().map(Polygon::area).collect();
        areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_relative_eq!(areas[0], 0.25, epsilon = 1e-12);
        assert_relative_eq!(areas[1], 0.25, epsilon = 1e-12);
        assert_relative_eq!(areas[2], 0.5, epsilon = 1e-12);
    }

    #[test]
    fn crossing_lines_give_quarters() {
        // A plus sign drawn as one polyline: the second stroke crosses the first cut
        let line = pts(&[(0.5, -1.0), (0.5, 2.0), (2.0, 2.0), (2.0, 0.5), (-1.0, 0.5)]);
        let outcome = clip_ring(&unit_square(), &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 4);
        for piece in outcome.pieces() {
            assert_relative_eq!(piece.area(), 0.25, epsilon = 1e-12);
        }
    }

    #[test]
    fn u_shape_cut_across_both_arms() {
        // Horizontal line at y=2 crosses the outer edges and both notch walls
        let line = pts(&[(-1.0, 2.0), (4.0, 2.0)]);
        let outcome = clip_ring(&u_shape(), &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 3);
        assert_relative_eq!(total_area(&outcome), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn all_inside_line_over_the_notch() {
        // Both ends inside the arms, the middle passes over the notch. The
        // inside runs dangle, so nothing is cut.
        let line = pts(&[(0.5, 2.0), (2.5, 2.0)]);
        assert_eq!(clip_ring(&u_shape(), &line, &config()).unwrap(), SplitOutcome::Unsplit);

        // Ends on the outer walls
        let line = pts(&[(0.0, 2.0), (3.0, 2.0)]);
        let outcome = clip_ring(&u_shape(), &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 3);
    }

    #[test]
    fn all_inside_with_four_crossings_cuts_the_middle_tooth() {
        // A comb with two notches from the top
        let ring = pts(&[
            (0.0, 0.0), (5.0, 0.0), (5.0, 3.0), (4.0, 3.0), (4.0, 1.0), (3.0, 1.0),
            (3.0, 3.0), (2.0, 3.0), (2.0, 1.0), (1.0, 1.0), (1.0, 3.0), (0.0, 3.0), (0.0, 0.0),
        ]);
        let line = pts(&[(0.5, 2.0), (4.5, 2.0)]);
        let outcome = clip_ring(&ring, &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 2);
        let mut areas: Vec<f64> = outcome.pieces().iter().map(Polygon::area).collect();
        areas.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_relative_eq!(areas[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(areas[1], 10.0, epsilon = 1e-12);
    }

    #[test]
    fn mixed_line_with_dangling_ends() {
        // An "H": notches from the top and the bottom
        let ring = pts(&[
            (0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (2.0, 1.0), (2.0, 0.0), (3.0, 0.0),
            (3.0, 3.0), (2.0, 3.0), (2.0, 2.0), (1.0, 2.0), (1.0, 3.0), (0.0, 3.0), (0.0, 0.0),
        ]);
        // Starts in the left post, drops through the bridge, ends in the right post
        let line = pts(&[(0.5, 2.5), (1.5, 2.5), (1.5, 0.5), (2.5, 0.5)]);
        let outcome = clip_ring(&ring, &line, &config()).unwrap();
        // Only the run across the bridge is a chord
        assert_eq!(outcome.piece_count(), 2);
        assert_relative_eq!(total_area(&outcome), signed_area_of_points(&ring).abs(), epsilon = 1e-12);
    }

    #[test]
    fn fast_variant_rejects_multiple_crossings_in_mixed_lines() {
        let fast = config().with_variant(ClipVariant::Fast);
        // First vertex inside the left arm, second beyond the right wall:
        // the segment crosses the notch walls and the outer wall.
        let line = pts(&[(0.5, 2.0), (4.0, 2.0)]);
        let err = clip_ring(&u_shape(), &line, &fast).unwrap_err();
        assert_eq!(err, ClipError::MultipleCrossings { segment: 0, count: 3 });

        // The accurate variant handles it
        let outcome = clip_ring(&u_shape(), &line, &config()).unwrap();
        assert_eq!(outcome.piece_count(), 2);
    }

    #[test]
    fn fast_variant_allows_all_outside_lines() {
        let fast = config().with_variant(ClipVariant::Fast);
        let line = pts(&[(-1.0, 2.0), (4.0, 2.0)]);
        let outcome = clip_ring(&u_shape(), &line, &fast).unwrap();
        assert_eq!(outcome.piece_count(), 3);
    }

    #[test]
    fn pieces_keep_input_winding() {
        let mut cw = unit_square();
        cw.reverse();
        let line = pts(&[(0.5, -1.0), (0.5, 2.0)]);
        let outcome = clip_ring(&cw, &line, &config()).unwrap();
        for piece in outcome.pieces() {
            assert_eq!(winding_of(&piece.outer), Some(Winding::Clockwise));
        }
    }

    #[test]
    fn open_ring_input_is_accepted() {
        let open = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        let line = pts(&[(0.5, -1.0), (0.5, 2.0)]);
        assert_eq!(clip_ring(&open, &line, &config()).unwrap().piece_count(), 2);
    }

    #[test]
    fn degenerate_inputs_are_errors() {
        let line = pts(&[(0.5, -1.0), (0.5, 2.0)]);
        assert_eq!(clip_ring(&[], &line, &config()), Err(ClipError::EmptyPolygon));
        assert_eq!(
            clip_ring(&pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]), &line, &config()),
            Err(ClipError::TooFewPoints { what: "polygon ring", got: 2, need: 3 })
        );
        assert_eq!(
            clip_ring(&unit_square(), &pts(&[(0.5, 0.5)]), &config()),
            Err(ClipError::TooFewPoints { what: "line", got: 1, need: 2 })
        );
        assert_eq!(
            clip_ring(&unit_square(), &pts(&[(0.5, 0.5), (0.5, 0.5)]), &config()),
            Err(ClipError::TooFewPoints { what: "line", got: 1, need: 2 })
        );
        assert_eq!(
            clip_ring(&unit_square(), &pts(&[(f64::NAN, 0.5), (0.5, 0.5)]), &config()),
            Err(ClipError::NonFinite { what: "line" })
        );
    }

    #[test]
    fn near_tangent_cut_leaves_no_sliver() {
        // Clips a corner off with an area far below a coarse tolerance
        let coarse = config().with_tolerance(1e-6);
        let line = pts(&[(-0.1, 0.101), (0.101, -0.1)]);
        let outcome = clip_ring(&unit_square(), &line, &coarse).unwrap();
        assert_eq!(outcome, SplitOutcome::Unsplit);
    }

    #[test]
    fn split_cap_is_respected() {
        let capped = config().with_max_splits(1);
        let line = pts(&[(0.25, -1.0), (0.25, 2.0), (0.75, 2.0), (0.75, -1.0)]);
        let outcome = clip_ring(&unit_square(), &line, &capped).unwrap();
        assert_eq!(outcome.piece_count(), 2);
        assert_relative_eq!(total_area(&outcome), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn chords_of_straight_crossing() {
        let chords = extract_chords(&unit_square(), &pts(&[(0.5, -1.0), (0.5, 2.0)]), 1e-10);
        assert_eq!(chords.len(), 1);
        assert_eq!(chords[0].path.len(), 2);
        assert!(chords[0].start().unwrap().approx_eq(Point::new(0.5, 0.0), 1e-12));
        assert!(chords[0].end().unwrap().approx_eq(Point::new(0.5, 1.0), 1e-12));
        assert_eq!(chords[0].begin_edge, 1);
        assert_eq!(chords[0].end_edge, 3);
    }

    #[test]
    fn short_lines_have_no_chords() {
        assert!(extract_chords(&unit_square(), &[], 1e-10).is_empty());
        assert!(extract_chords(&unit_square(), &pts(&[(0.5, 0.5)]), 1e-10).is_empty());
    }

    #[test]
    fn dangling_runs_are_not_chords() {
        let chords = extract_chords(&unit_square(), &pts(&[(0.5, 0.5), (0.5, 2.0)]), 1e-10);
        assert!(chords.is_empty());
    }

    #[test]
    fn duplicates_are_removed() {
        let a = unit_square();
        let mut b = unit_square();
        b.reverse();
        let kept = dedupe_pieces(vec![a, b], 1e-10);
        assert_eq!(kept.len(), 1);
    }
}
