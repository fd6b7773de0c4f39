//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `clip` - Split the polygons of an SVG along a cut line
//! - `inspect` - Show rings, parts and cut lines as the clipper sees them
//! - `recipe` - Run a clip job from a YAML file

pub mod clip;
pub mod common;
pub mod inspect;
pub mod recipe;

pub use clip::{ClipArgs, run_clip};
pub use inspect::cmd_inspect;
pub use recipe::cmd_recipe;
