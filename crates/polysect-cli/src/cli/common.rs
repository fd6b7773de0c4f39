//! Common utilities shared across CLI commands.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use polysect::geometry::bounding_box_of;
use polysect::{Point, Polygon};

/// Output format for clip results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Svg,
    Json,
}

/// Fill colours cycled over the pieces.
const PALETTE: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f",
    "#edc948", "#b07aa1", "#ff9da7", "#9c755f", "#bab0ac",
];

/// Read an SVG from a file, or from stdin when the path is `-`.
pub fn read_svg(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        tracing::info!("reading SVG from stdin");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read SVG from stdin")?;
        Ok(buffer)
    } else {
        tracing::info!("loading {}", path.display());
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Write to a file, or to stdout without a path.
pub fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!("wrote {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

/// Parse an `x,y` pair.
pub fn parse_point(s: &str) -> std::result::Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("bad x coordinate in '{s}'"))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("bad y coordinate in '{s}'"))?;
    Ok(Point::new(x, y))
}

/// SVG path data for a polygon: outer ring and holes as subpaths.
pub fn polygon_path_data(polygon: &Polygon) -> String {
    std::iter::once(&polygon.outer)
        .chain(polygon.holes.iter())
        .map(|ring| ring_path_data(ring))
        .collect::<Vec<_>>()
        .join(" ")
}

fn ring_path_data(ring: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in ring.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        d.push_str(&format!("{}{:.4},{:.4} ", cmd, p.x, p.y));
    }
    d.push('Z');
    d
}

/// Render clipped pieces and the cut line as an SVG document.
pub fn pieces_to_svg(pieces: &[Polygon], line: &[Point], original_svg: &str) -> String {
    let viewbox = extract_viewbox(original_svg)
        .or_else(|| fitted_viewbox(pieces))
        .unwrap_or_else(|| "0 0 1000 1000".to_string());

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="{}">
<g id="pieces" stroke="black" stroke-width="0.5" fill-rule="evenodd">
"#,
        viewbox
    ));

    for (i, piece) in pieces.iter().enumerate() {
        let id = match &piece.id {
            Some(id) => format!("{}-{}", id, i),
            None => format!("piece-{}", i),
        };
        svg.push_str(&format!(
            "  <path id=\"{}\" fill=\"{}\" fill-opacity=\"0.6\" d=\"{}\"/>\n",
            id,
            PALETTE[i % PALETTE.len()],
            polygon_path_data(piece)
        ));
    }
    svg.push_str("</g>\n");

    if line.len() >= 2 {
        let points: String = line
            .iter()
            .map(|p| format!("{:.4},{:.4}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            "<polyline id=\"cut-line\" data-role=\"cut\" points=\"{}\" fill=\"none\" stroke=\"red\" stroke-width=\"0.5\" stroke-dasharray=\"2 1\"/>\n",
            points
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// A viewBox around the pieces with a small margin.
fn fitted_viewbox(pieces: &[Polygon]) -> Option<String> {
    let all: Vec<Point> = pieces.iter().flat_map(|p| p.outer.iter().copied()).collect();
    let (min_x, min_y, max_x, max_y) = bounding_box_of(&all)?;
    let pad = 0.05 * (max_x - min_x).max(max_y - min_y);
    Some(format!(
        "{} {} {} {}",
        min_x - pad,
        min_y - pad,
        max_x - min_x + 2.0 * pad,
        max_y - min_y + 2.0 * pad
    ))
}

/// Extract viewBox from SVG content.
pub fn extract_viewbox(svg: &str) -> Option<String> {
    ["viewBox=\"", "viewbox=\""].iter().find_map(|key| {
        let start = svg.find(key)? + key.len();
        let rest = &svg[start..];
        rest.find('"').map(|end| rest[..end].to_string())
    })
}
