//! Error types for polygon splitting.

use thiserror::Error;

/// Errors a clip can fail with.
///
/// Tolerance cases (a vertex a hair off the line, a sliver piece) are not
/// errors; they are resolved quietly and never show up here.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    /// No rings to clip.
    #[error("polygon is empty")]
    EmptyPolygon,

    /// A ring or the cut line has too few distinct points.
    #[error("{what} has {got} distinct points, need at least {need}")]
    TooFewPoints {
        what: &'static str,
        got: usize,
        need: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("{what} contains a non-finite coordinate")]
    NonFinite { what: &'static str },

    /// The fast variant met a segment crossing the boundary more than once.
    ///
    /// Retry with [`ClipVariant::Accurate`](crate::ClipVariant::Accurate).
    #[error("line segment {segment} crosses the polygon boundary {count} times; use the accurate variant")]
    MultipleCrossings { segment: usize, count: usize },

    /// The caller cancelled a batch through its progress handle.
    #[error("cancelled after {completed} of {total} features")]
    Cancelled { completed: usize, total: usize },
}

/// Result type for clip operations.
pub type Result<T> = std::result::Result<T, ClipError>;
