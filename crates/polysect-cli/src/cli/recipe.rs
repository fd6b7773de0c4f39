//! Clip jobs described in YAML.
//!
//! A job names the input, the cut line, the clip settings and where the
//! results go. Everything is optional; command-line flags fill the gaps
//! and take precedence.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use polysect::{ClipConfig, Point};

use super::clip::{ClipArgs, run_clip};
use super::common::OutputFormat;

/// A complete clip job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipJob {
    /// Job name, for logging
    pub name: Option<String>,

    /// Input SVG, relative to the job file
    pub input: Option<PathBuf>,

    /// Cut line as `[x, y]` pairs; the SVG's own cut line is used without one
    pub line: Option<Vec<[f64; 2]>>,

    /// Clip settings
    pub clip: ClipConfig,

    /// Where the results go
    pub output: JobOutput,
}

/// Output section of a job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobOutput {
    pub format: Option<OutputFormat>,
    pub path: Option<PathBuf>,
    pub png: Option<PathBuf>,
}

impl ClipJob {
    /// Load a job from a YAML file.
    ///
    /// Relative paths inside the job are resolved against the file's
    /// directory.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read job file {}", path.display()))?;
        let mut job: ClipJob = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse job YAML {}", path.display()))?;

        if let Some(base) = path.parent() {
            job.resolve_paths(base);
        }
        Ok(job)
    }

    fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut Option<PathBuf>| {
            if let Some(path) = p.take() {
                let relative = path.is_relative() && path.as_os_str() != "-";
                *p = Some(if relative { base.join(path) } else { path });
            }
        };
        resolve(&mut self.input);
        resolve(&mut self.output.path);
        resolve(&mut self.output.png);
    }

    /// The cut line as points.
    pub fn line_points(&self) -> Option<Vec<Point>> {
        self.line
            .as_ref()
            .map(|pairs| pairs.iter().map(|&[x, y]| Point::new(x, y)).collect())
    }
}

/// Execute the recipe command: run a job file, or print an example.
pub fn cmd_recipe(job: Option<&Path>, example: bool) -> Result<()> {
    if example {
        print_example();
        return Ok(());
    }

    let Some(job) = job else {
        anyhow::bail!("no job file given (use --example for a template)");
    };

    let args = ClipArgs {
        recipe: Some(job.to_path_buf()),
        ..ClipArgs::default()
    };
    run_clip(&args)
}

fn print_example() {
    println!(r##"# Example polysect clip job
name: "Split the field"

# Input SVG (relative to this file). Polygons are read from closed paths.
input: field.svg

# Cut line as x,y pairs. Leave it out to use an open path from the SVG
# or an element marked data-role="cut".
line:
  - [50, -10]
  - [50, 40]
  - [60, 110]

clip:
  tolerance: 1.0e-10
  variant: accurate   # or: fast
  max_splits: 256

output:
  format: svg         # or: json
  path: field_split.svg
  png: field_split.png
"##);
}
