//! # polysect
//!
//! Split polygons along polylines.
//!
//! Given a polygon (with holes, or several islands) and a cut line, find
//! where the line crosses the boundary, pick out the runs of the line that
//! cross the interior from boundary to boundary, and section the polygon
//! along each of them.
//!
//! ```text
//! clip        covers / strictly-inside tests
//! intersect   segment vs ring crossings
//! order       stable sort of crossings along a segment
//! section     split one ring along one chord
//! dispatch    line classes, chord extraction, the cut loop
//! multipart   shells and holes, per-part clipping
//! progress    batches with progress and cancellation
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! Rust modules are like ES6 modules but more explicit:
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level
//!
//! Unlike Node.js, you must explicitly declare every module.

pub mod clip;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod intersect;
pub mod multipart;
pub mod order;
pub mod planar;
pub mod progress;
pub mod section;
pub mod svg;

// Re-export common types at crate root for convenience.
pub use clip::{covers, point_in_polygon, strictly_inside};
pub use config::{ClipConfig, ClipVariant};
pub use dispatch::{LineClass, SplitOutcome, clip_ring};
pub use error::{ClipError, Result};
pub use geometry::{Point, Polygon, Winding};
pub use intersect::{Crossing, find_crossings};
pub use multipart::{Feature, Part, clip_multipart, clip_polygon, decompose_parts};
pub use progress::{FeatureSplit, Progress, Silent, clip_features};
pub use section::{Chord, section_ring};
pub use svg::{SvgError, SvgShapes, extract_shapes_from_svg};
