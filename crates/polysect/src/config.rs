//! Clip configuration.
//!
//! The tolerance used to live in process-wide state; here it travels with
//! every call inside a [`ClipConfig`].

use serde::{Deserialize, Serialize};

/// Default tolerance for "on the boundary" and sliver decisions.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default cap on the number of sections one clip may perform.
pub const DEFAULT_MAX_SPLITS: usize = 256;

/// Which clip algorithm to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipVariant {
    /// Rejects lines whose segments cross the boundary more than once
    /// while entering or leaving the polygon.
    Fast,
    /// Handles any number of crossings per segment.
    #[default]
    Accurate,
}

impl ClipVariant {
    pub fn name(&self) -> &'static str {
        match self {
            ClipVariant::Fast => "fast",
            ClipVariant::Accurate => "accurate",
        }
    }

    /// Parse a variant from its name.
    pub fn from_name(name: &str) -> Option<ClipVariant> {
        match name.to_lowercase().as_str() {
            "fast" => Some(ClipVariant::Fast),
            "accurate" | "exact" => Some(ClipVariant::Accurate),
            _ => None,
        }
    }

    pub fn all() -> &'static [ClipVariant] {
        &[ClipVariant::Fast, ClipVariant::Accurate]
    }
}

/// Settings threaded through every clip call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipConfig {
    /// Distance under which a point counts as on the boundary, determinant
    /// magnitude under which a vertex counts as on the line, and area under
    /// which a piece is a sliver.
    pub tolerance: f64,
    pub variant: ClipVariant,
    /// Upper bound on sections per clip.
    pub max_splits: usize,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            variant: ClipVariant::default(),
            max_splits: DEFAULT_MAX_SPLITS,
        }
    }
}

impl ClipConfig {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_variant(mut self, variant: ClipVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_max_splits(mut self, max_splits: usize) -> Self {
        self.max_splits = max_splits;
        self
    }
}
