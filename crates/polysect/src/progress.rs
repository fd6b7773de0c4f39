//! Batch clipping with progress reporting and cancellation.

use tracing::debug;

use crate::config::{ClipConfig, ClipVariant};
use crate::dispatch::SplitOutcome;
use crate::error::{ClipError, Result};
use crate::geometry::Point;
use crate::multipart::Feature;

/// Receives progress from a batch and may ask it to stop.
///
/// ## Rust Lesson #14: Traits with default methods
///
/// Implementors only have to write `report`. `is_cancelled` comes for
/// free and says "keep going" unless overridden.
pub trait Progress {
    /// Called after each feature with the overall percentage done.
    fn report(&mut self, percent: u8, message: &str);

    /// Polled before each feature.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Progress that goes nowhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Progress for Silent {
    fn report(&mut self, _percent: u8, _message: &str) {}
}

/// The result of clipping one feature of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSplit {
    /// Position of the feature in the batch.
    pub index: usize,
    pub id: Option<String>,
    pub outcome: SplitOutcome,
    /// The variant that produced `outcome`; differs from the configured one
    /// when the fast variant had to fall back.
    pub variant_used: ClipVariant,
}

/// Clip one feature, retrying with the accurate variant when the fast one
/// can't handle the line.
pub fn clip_feature(feature: &Feature, line: &[Point], config: &ClipConfig) -> Result<(SplitOutcome, ClipVariant)> {
    match feature.clip(line, config) {
        Err(ClipError::MultipleCrossings { segment, count }) if config.variant == ClipVariant::Fast => {
            debug!(
                id = feature.id.as_deref().unwrap_or("-"),
                segment, count, "fast clip gave up, retrying accurate"
            );
            let accurate = config.with_variant(ClipVariant::Accurate);
            Ok((feature.clip(line, &accurate)?, ClipVariant::Accurate))
        }
        other => other.map(|outcome| (outcome, config.variant)),
    }
}

/// Clip every feature with the same line.
///
/// Cancellation is checked before each feature; a cancelled batch returns
/// [`ClipError::Cancelled`] and nothing else. Any other error aborts the
/// batch the same way.
pub fn clip_features(
    features: &[Feature],
    line: &[Point],
    config: &ClipConfig,
    progress: &mut dyn Progress,
) -> Result<Vec<FeatureSplit>> {
    let total = features.len();
    let mut results = Vec::with_capacity(total);

    for (index, feature) in features.iter().enumerate() {
        if progress.is_cancelled() {
            return Err(ClipError::Cancelled { completed: index, total });
        }

        let (outcome, variant_used) = clip_feature(feature, line, config)?;
        let message = match &outcome {
            SplitOutcome::Unsplit => format!("feature {} unsplit", index + 1),
            SplitOutcome::Split(pieces) => format!("feature {} split into {}", index + 1, pieces.len()),
        };

        results.push(FeatureSplit {
            index,
            id: feature.id.clone(),
            outcome,
            variant_used,
        });

        let percent = ((index + 1) * 100 / total) as u8;
        progress.report(percent, &message);
    }

    Ok(results)
}
