//! Multi-part polygons: islands and holes.
//!
//! A feature is a bag of rings. Rings are sorted into parts (one shell
//! plus the holes directly inside it) by nesting depth, each shell is
//! clipped on its own, and the part's holes are subtracted from the
//! resulting pieces.

use tracing::{debug, warn};

use crate::clip::{point_in_polygon, point_on_ring};
use crate::config::ClipConfig;
use crate::dispatch::{SplitOutcome, clip_ring, prepare_ring};
use crate::error::{ClipError, Result};
use crate::geometry::{
    BBox, Point, Polygon, Winding, bbox_contains, bounding_box_of, oriented, winding_of,
};
use crate::planar;

/// A polygon feature as read from a source: an id and its raw rings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    pub id: Option<String>,
    pub rings: Vec<Vec<Point>>,
}

impl Feature {
    pub fn new(id: Option<String>, rings: Vec<Vec<Point>>) -> Self {
        Self { id, rings }
    }

    /// Split this feature with `line`. Pieces inherit the feature id.
    pub fn clip(&self, line: &[Point], config: &ClipConfig) -> Result<SplitOutcome> {
        let outcome = clip_multipart(&self.rings, line, config)?;
        Ok(tag_pieces(outcome, &self.id))
    }
}

impl From<Polygon> for Feature {
    fn from(polygon: Polygon) -> Self {
        let mut rings = Vec::with_capacity(1 + polygon.holes.len());
        rings.push(polygon.outer);
        rings.extend(polygon.holes);
        Self { id: polygon.id, rings }
    }
}

/// One shell and the holes directly inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub shell: Vec<Point>,
    pub holes: Vec<Vec<Point>>,
    pub shell_winding: Winding,
    /// Index of the shell in the source ring list.
    pub source: usize,
    /// Source indices of rings wound against their role.
    pub misoriented: Vec<usize>,
}

impl Part {
    /// A part from a polygon whose roles are already known.
    ///
    /// Ring indices count the outer ring as 0 and holes from 1.
    pub fn from_polygon(polygon: &Polygon, tol: f64) -> Result<Self> {
        let shell = prepare_ring(&polygon.outer, tol)?;
        let shell_winding = winding_of(&shell).unwrap_or(Winding::CounterClockwise);
        let mut holes = Vec::with_capacity(polygon.holes.len());
        let mut misoriented = Vec::new();
        for (k, hole) in polygon.holes.iter().enumerate() {
            let hole = prepare_ring(hole, tol)?;
            if winding_of(&hole) == Some(shell_winding) {
                misoriented.push(k + 1);
            }
            holes.push(hole);
        }
        Ok(Self { shell, holes, shell_winding, source: 0, misoriented })
    }

    /// The part as an unsplit polygon, outer wound like the shell.
    pub fn to_polygon(&self) -> Polygon {
        normalise(Polygon::with_holes(self.shell.clone(), self.holes.clone()), self.shell_winding)
    }

    /// Area of the shell minus its holes.
    pub fn area(&self) -> f64 {
        self.to_polygon().area()
    }
}

// ============================================================================
// DECOMPOSITION
// ============================================================================

/// A vertex of `inner` that isn't on `outer`'s boundary, if there is one.
fn representative(inner: &[Point], outer: &[Point], tol: f64) -> Option<Point> {
    inner.iter().copied().find(|&p| !point_on_ring(p, outer, tol))
}

fn contains_ring(outer: &[Point], outer_box: BBox, inner: &[Point], inner_box: BBox, tol: f64) -> bool {
    bbox_contains(outer_box, inner_box)
        && representative(inner, outer, tol).is_some_and(|p| point_in_polygon(p.x, p.y, outer))
}

/// Sort rings into shells and holes.
///
/// A ring nested inside an even number of other rings is a shell, an odd
/// number makes it a hole of its innermost container. Windings are
/// recorded but never changed here; rings wound against their role end up
/// in [`Part::misoriented`].
pub fn decompose_parts(rings: &[Vec<Point>], tol: f64) -> Result<Vec<Part>> {
    if rings.is_empty() {
        return Err(ClipError::EmptyPolygon);
    }

    let rings: Vec<Vec<Point>> = rings
        .iter()
        .map(|r| prepare_ring(r, tol))
        .collect::<Result<_>>()?;
    let boxes: Vec<BBox> = rings
        .iter()
        .map(|r| bounding_box_of(r).ok_or(ClipError::EmptyPolygon))
        .collect::<Result<_>>()?;

    // containers[i]: every ring that holds ring i
    let containers: Vec<Vec<usize>> = (0..rings.len())
        .map(|i| {
            (0..rings.len())
                .filter(|&j| j != i && contains_ring(&rings[j], boxes[j], &rings[i], boxes[i], tol))
                .collect()
        })
        .collect();
    let depth: Vec<usize> = containers.iter().map(Vec::len).collect();

    let mut parts: Vec<Part> = Vec::new();
    let mut part_of_shell: Vec<Option<usize>> = vec![None; rings.len()];

    for i in (0..rings.len()).filter(|&i| depth[i] % 2 == 0) {
        let shell_winding = winding_of(&rings[i]).unwrap_or(Winding::CounterClockwise);
        part_of_shell[i] = Some(parts.len());
        parts.push(Part {
            shell: rings[i].clone(),
            holes: Vec::new(),
            shell_winding,
            source: i,
            misoriented: Vec::new(),
        });
    }

    // Shells are expected to agree with the first one
    let expected = parts.first().map(|p| p.shell_winding);
    for part in &mut parts {
        if Some(part.shell_winding) != expected {
            part.misoriented.push(part.source);
        }
    }

    for i in (0..rings.len()).filter(|&i| depth[i] % 2 == 1) {
        let parent = containers[i]
            .iter()
            .copied()
            .max_by_key(|&j| depth[j])
            .and_then(|j| part_of_shell[j]);
        let Some(parent) = parent else {
            continue;
        };
        let part = &mut parts[parent];
        if winding_of(&rings[i]) == Some(part.shell_winding) {
            part.misoriented.push(i);
        }
        part.holes.push(rings[i].clone());
    }

    for part in &parts {
        if !part.misoriented.is_empty() {
            warn!(
                shell = part.source,
                rings = ?part.misoriented,
                "rings wound against their role, keeping source winding"
            );
        }
    }

    debug!(rings = rings.len(), parts = parts.len(), "decomposed rings");
    Ok(parts)
}

// ============================================================================
// CLIPPING
// ============================================================================

/// Outer ring wound as `shell`, holes the other way.
fn normalise(polygon: Polygon, shell: Winding) -> Polygon {
    Polygon {
        outer: oriented(polygon.outer, shell),
        holes: polygon
            .holes
            .into_iter()
            .map(|h| oriented(h, shell.reversed()))
            .collect(),
        id: polygon.id,
    }
}

fn tag_pieces(outcome: SplitOutcome, id: &Option<String>) -> SplitOutcome {
    match outcome {
        SplitOutcome::Split(pieces) => SplitOutcome::Split(
            pieces
                .into_iter()
                .map(|p| Polygon { id: id.clone(), ..p })
                .collect(),
        ),
        unsplit => unsplit,
    }
}

/// Clip one part. Returns whether it split, and its pieces (the whole
/// part when it didn't).
pub fn clip_part(part: &Part, line: &[Point], config: &ClipConfig) -> Result<(bool, Vec<Polygon>)> {
    let tol = config.tolerance;
    let pieces = match clip_ring(&part.shell, line, config)? {
        SplitOutcome::Unsplit => return Ok((false, vec![part.to_polygon()])),
        SplitOutcome::Split(pieces) => pieces,
    };

    let pieces: Vec<Polygon> = pieces
        .iter()
        .flat_map(|piece| planar::difference(piece, &part.holes, tol))
        .map(|piece| normalise(piece, part.shell_winding))
        .collect();

    debug!(shell = part.source, holes = part.holes.len(), pieces = pieces.len(), "part clipped");
    Ok((pieces.len() > 1, pieces))
}

/// Split a multi-part polygon given as raw rings.
pub fn clip_multipart(rings: &[Vec<Point>], line: &[Point], config: &ClipConfig) -> Result<SplitOutcome> {
    let parts = decompose_parts(rings, config.tolerance)?;
    clip_parts(&parts, line, config)
}

/// Split a polygon with explicit holes. Pieces inherit its id.
pub fn clip_polygon(polygon: &Polygon, line: &[Point], config: &ClipConfig) -> Result<SplitOutcome> {
    let part = Part::from_polygon(polygon, config.tolerance)?;
    let outcome = clip_parts(std::slice::from_ref(&part), line, config)?;
    Ok(tag_pieces(outcome, &polygon.id))
}

fn clip_parts(parts: &[Part], line: &[Point], config: &ClipConfig) -> Result<SplitOutcome> {
    let mut any_split = false;
    let mut pieces = Vec::new();
    for part in parts {
        let (split, part_pieces) = clip_part(part, line, config)?;
        any_split |= split;
        pieces.extend(part_pieces);
    }

    if any_split {
        Ok(SplitOutcome::Split(pieces))
    } else {
        Ok(SplitOutcome::Unsplit)
    }
}
