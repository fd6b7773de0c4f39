//! Clip command implementation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use resvg::usvg;
use serde::Serialize;
use tiny_skia::Pixmap;
use tracing::info;

use polysect::{
    ClipConfig, ClipVariant, Feature, FeatureSplit, Point, Polygon, Progress, SplitOutcome,
    clip_features, decompose_parts, extract_shapes_from_svg,
};

use super::common::{OutputFormat, parse_point, pieces_to_svg, read_svg, write_output};
use super::recipe::ClipJob;

/// A cut line given on the command line as `"x,y x,y ..."`.
#[derive(Debug, Clone, PartialEq)]
pub struct CutLine(pub Vec<Point>);

fn parse_line(s: &str) -> std::result::Result<CutLine, String> {
    let points = s
        .split(|c: char| c.is_whitespace() || c == ';')
        .filter(|t| !t.is_empty())
        .map(parse_point)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    if points.len() < 2 {
        return Err(format!("a cut line needs at least 2 points, got {}", points.len()));
    }
    Ok(CutLine(points))
}

fn parse_variant(s: &str) -> std::result::Result<ClipVariant, String> {
    ClipVariant::from_name(s).ok_or_else(|| {
        let names: Vec<&str> = ClipVariant::all().iter().map(ClipVariant::name).collect();
        format!("unknown variant '{s}', expected one of: {}", names.join(", "))
    })
}

#[derive(Debug, Clone, Default, Args)]
pub struct ClipArgs {
    /// Input SVG file ('-' for stdin)
    pub input: Option<PathBuf>,

    /// Cut line vertices, e.g. "50,-10 50,110"
    #[arg(short, long, value_parser = parse_line, allow_hyphen_values = true)]
    pub line: Option<CutLine>,

    /// Boundary and sliver tolerance
    #[arg(short, long)]
    pub tolerance: Option<f64>,

    /// Clip variant: fast or accurate
    #[arg(long, value_parser = parse_variant)]
    pub variant: Option<ClipVariant>,

    /// Maximum number of sections per polygon
    #[arg(long)]
    pub max_splits: Option<usize>,

    /// YAML job file with defaults for everything above
    #[arg(long)]
    pub recipe: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also render the SVG result to a PNG preview
    #[arg(long)]
    pub png: Option<PathBuf>,
}

// ============================================================================
// JSON OUTPUT
// ============================================================================

/// JSON report of one clip run.
#[derive(Serialize)]
struct JsonReport {
    line: Vec<Point>,
    variant: &'static str,
    tolerance: f64,
    features: Vec<JsonFeature>,
}

#[derive(Serialize)]
struct JsonFeature {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    split: bool,
    variant_used: &'static str,
    area: f64,
    pieces: Vec<JsonPiece>,
}

#[derive(Serialize)]
struct JsonPiece {
    outer: Vec<Point>,
    holes: Vec<Vec<Point>>,
    area: f64,
}

impl From<&Polygon> for JsonPiece {
    fn from(polygon: &Polygon) -> Self {
        Self {
            outer: polygon.outer.clone(),
            holes: polygon.holes.clone(),
            area: polygon.area(),
        }
    }
}

// ============================================================================
// PROGRESS
// ============================================================================

/// Feeds batch progress into an indicatif bar on stderr.
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new(len: u64) -> Self {
        let bar = ProgressBar::new(len);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar }
    }
}

impl Progress for BarProgress {
    fn report(&mut self, _percent: u8, message: &str) {
        self.bar.inc(1);
        self.bar.set_message(message.to_string());
    }
}

// ============================================================================
// COMMAND
// ============================================================================

/// A feature's own parts, for features the line left alone.
fn unsplit_pieces(feature: &Feature, tol: f64) -> Result<Vec<Polygon>> {
    Ok(decompose_parts(&feature.rings, tol)?
        .iter()
        .map(|part| Polygon { id: feature.id.clone(), ..part.to_polygon() })
        .collect())
}

/// Pieces to show for one feature: the split pieces, or the feature itself.
fn result_pieces(feature: &Feature, result: &FeatureSplit, tol: f64) -> Result<Vec<Polygon>> {
    match &result.outcome {
        SplitOutcome::Split(pieces) => Ok(pieces.clone()),
        SplitOutcome::Unsplit => unsplit_pieces(feature, tol),
    }
}

/// Settings from the job file, overridden by flags.
fn resolve_config(args: &ClipArgs, job: &ClipJob) -> ClipConfig {
    let mut config = job.clip;
    if let Some(tolerance) = args.tolerance {
        config = config.with_tolerance(tolerance);
    }
    if let Some(variant) = args.variant {
        config = config.with_variant(variant);
    }
    if let Some(max_splits) = args.max_splits {
        config = config.with_max_splits(max_splits);
    }
    config
}

/// Execute the clip command.
pub fn run_clip(args: &ClipArgs) -> Result<()> {
    let job = match &args.recipe {
        Some(path) => ClipJob::load(path)?,
        None => ClipJob::default(),
    };
    if let Some(name) = &job.name {
        info!("job: {}", name);
    }

    let input = args
        .input
        .clone()
        .or_else(|| job.input.clone())
        .context("no input SVG given")?;
    let svg_content = read_svg(&input)?;
    let shapes = extract_shapes_from_svg(&svg_content)
        .with_context(|| format!("failed to read shapes from {}", input.display()))?;

    let line: Vec<Point> = match (&args.line, job.line_points()) {
        (Some(line), _) => line.0.clone(),
        (None, Some(line)) => line,
        (None, None) => shapes
            .first_cut_line()
            .context("no cut line: pass --line or mark one in the SVG")?
            .to_vec(),
    };

    let config = resolve_config(args, &job);
    info!(
        "clipping {} polygons ({} rings) with a {}-point line, {} variant",
        shapes.features.len(),
        shapes.ring_count(),
        line.len(),
        config.variant.name()
    );

    let start = Instant::now();
    let mut progress = BarProgress::new(shapes.features.len() as u64);
    let results = clip_features(&shapes.features, &line, &config, &mut progress);
    progress.bar.finish_and_clear();
    let results = results.context("clip failed")?;

    let split_count = results.iter().filter(|r| r.outcome.is_split()).count();
    let piece_count: usize = results.iter().map(|r| r.outcome.piece_count()).sum();
    info!(
        "{} of {} polygons split into {} pieces in {:?}",
        split_count,
        results.len(),
        piece_count,
        start.elapsed()
    );

    let format = args.format.or(job.output.format).unwrap_or_default();
    let output_path = args.output.as_deref().or(job.output.path.as_deref());
    let png_path = args.png.as_deref().or(job.output.png.as_deref());

    let mut all_pieces = Vec::new();
    let mut features = Vec::with_capacity(results.len());
    for (feature, result) in shapes.features.iter().zip(&results) {
        let pieces = result_pieces(feature, result, config.tolerance)?;
        features.push(JsonFeature {
            index: result.index,
            id: result.id.clone(),
            split: result.outcome.is_split(),
            variant_used: result.variant_used.name(),
            area: pieces.iter().map(Polygon::area).sum(),
            pieces: pieces.iter().map(JsonPiece::from).collect(),
        });
        all_pieces.extend(pieces);
    }

    let svg = pieces_to_svg(&all_pieces, &line, &svg_content);

    let output = match format {
        OutputFormat::Svg => svg.clone(),
        OutputFormat::Json => {
            let report = JsonReport {
                line: line.clone(),
                variant: config.variant.name(),
                tolerance: config.tolerance,
                features,
            };
            let mut json = serde_json::to_string_pretty(&report).context("failed to serialize JSON")?;
            json.push('\n');
            json
        }
    };
    write_output(output_path, &output)?;

    if let Some(png_path) = png_path {
        render_png(&svg, png_path)?;
    }

    Ok(())
}

/// Width of the PNG preview in pixels.
const PREVIEW_WIDTH: u32 = 800;

/// Render an SVG document to a PNG file using resvg.
fn render_png(svg_content: &str, png_path: &Path) -> Result<()> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_content, &options).context("failed to parse preview SVG")?;

    let size = tree.size();
    let scale = PREVIEW_WIDTH as f32 / size.width();
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = Pixmap::new(PREVIEW_WIDTH, height).context("could not create pixmap")?;
    pixmap.fill(tiny_skia::Color::WHITE);

    let transform = tiny_skia::Transform::from_scale(scale, scale);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .save_png(png_path)
        .with_context(|| format!("failed to write {}", png_path.display()))?;
    info!("wrote {} ({}x{})", png_path.display(), PREVIEW_WIDTH, height);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cut_lines_parse() {
        let line = parse_line("0.5,-1 0.5,2;1,3").unwrap();
        assert_eq!(line.0, vec![Point::new(0.5, -1.0), Point::new(0.5, 2.0), Point::new(1.0, 3.0)]);
        assert!(parse_line("1,1").is_err());
        assert!(parse_line("1,1 oops").is_err());
    }

    #[test]
    fn variants_parse() {
        assert_eq!(parse_variant("FAST").unwrap(), ClipVariant::Fast);
        assert!(parse_variant("slow").is_err());
    }

    #[test]
    fn flags_override_the_job() {
        let job: ClipJob = serde_yaml::from_str("clip:\n  tolerance: 0.01\n  variant: fast\n").unwrap();
        let args = ClipArgs { variant: Some(ClipVariant::Accurate), ..ClipArgs::default() };
        let config = resolve_config(&args, &job);
        assert_eq!(config.tolerance, 0.01);
        assert_eq!(config.variant, ClipVariant::Accurate);
    }
}
