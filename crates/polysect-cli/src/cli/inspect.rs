//! Inspect command: show what a clip would see in an SVG.

use std::path::Path;

use anyhow::{Context, Result};

use polysect::clip::classify_line;
use polysect::{LineClass, Part, decompose_parts, extract_shapes_from_svg};
use polysect::config::DEFAULT_TOLERANCE;

use super::common::read_svg;

/// One line per part: ring roles, winding and area.
fn describe_part(part: &Part) -> String {
    let mut line = format!(
        "shell #{} {} area {:.3}",
        part.source,
        part.shell_winding.name(),
        part.area()
    );
    if !part.holes.is_empty() {
        line.push_str(&format!(", {} hole(s)", part.holes.len()));
    }
    if !part.misoriented.is_empty() {
        line.push_str(&format!(", misoriented rings {:?}", part.misoriented));
    }
    line
}

/// Execute the inspect command.
pub fn cmd_inspect(input: &Path) -> Result<()> {
    let svg_content = read_svg(input)?;
    let shapes = extract_shapes_from_svg(&svg_content)
        .with_context(|| format!("failed to read shapes from {}", input.display()))?;

    println!("{} polygon(s), {} ring(s)", shapes.features.len(), shapes.ring_count());

    let mut all_parts = Vec::new();
    for (i, feature) in shapes.features.iter().enumerate() {
        let parts = decompose_parts(&feature.rings, DEFAULT_TOLERANCE)
            .with_context(|| format!("polygon {} is not usable", i))?;
        println!(
            "[{}] {} - {} ring(s), {} part(s)",
            i,
            feature.id.as_deref().unwrap_or("(no id)"),
            feature.rings.len(),
            parts.len()
        );
        for part in &parts {
            println!("    {}", describe_part(part));
        }
        all_parts.extend(parts);
    }

    if shapes.cut_lines.is_empty() {
        println!("no cut lines");
        return Ok(());
    }

    for (i, line) in shapes.cut_lines.iter().enumerate() {
        let counts = [LineClass::AllInside, LineClass::AllOutside, LineClass::Mixed].map(|class| {
            all_parts
                .iter()
                .filter(|part| {
                    LineClass::from_classification(&classify_line(&part.shell, line, DEFAULT_TOLERANCE)) == class
                })
                .count()
        });
        println!(
            "cut line {}: {} point(s); parts {} {}, {} {}, {} {}",
            i,
            line.len(),
            counts[0],
            LineClass::AllInside.name(),
            counts[1],
            LineClass::AllOutside.name(),
            counts[2],
            LineClass::Mixed.name()
        );
    }

    Ok(())
}
