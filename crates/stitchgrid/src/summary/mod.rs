//! Per-group registration summaries.
//!
//! For every group of views collapsed into one display row, the engine
//! derives the values a review table shows:
//!
//! 1. **Location** ([`resolve_location`]): do the present views of the
//!    group share one registration, and if so where is it.
//! 2. **Quality** ([`aggregate_quality`]): average link correlation, link
//!    count, and error distribution over the group's pairwise links.
//! 3. **Record** ([`SummaryEngine::build_row`]): both results formatted as
//!    four display strings.
//!
//! Every call is stateless and idempotent over read-only snapshots of the
//! inputs; nothing is cached between calls.

mod format;
mod location;
mod quality;

pub use location::{resolve_location, LocationResult, COEFF_TOLERANCE};
pub use quality::{aggregate_quality, ErrorStats, QualitySummary};

use serde::{Deserialize, Serialize};

use crate::links::QualityIndex;
use crate::registration::{MissingViews, TransformSource};
use crate::view::ViewId;

use format::round3;

// ── Error type ─────────────────────────────────────────────────────────────

/// Caller contract violations surfaced by the summary engine.
///
/// Violations surface as structured failures before any display string is
/// produced; they are never rendered into a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryError {
    /// The group holds no views at all.
    EmptyGroup,
    /// A view not declared missing has no registration entry.
    MissingTransform { view: ViewId },
}

impl std::fmt::Display for SummaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyGroup => write!(f, "group holds no views"),
            Self::MissingTransform { view } => {
                write!(f, "no registration for {view} (not declared missing)")
            }
        }
    }
}

impl std::error::Error for SummaryError {}

// ── Record ─────────────────────────────────────────────────────────────────

/// One display row: four derived strings, recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRecord {
    /// Consistent translation, or a missing/multiple-locations marker.
    pub location: String,
    /// Average link correlation, 3-decimal rounded.
    pub avg_correlation: String,
    /// Number of pairwise links inside the group.
    pub link_count: String,
    /// `"mean, min, max"` of link errors, or `"-"` without links.
    pub error_stats: String,
}

impl SummaryRecord {
    /// The four cell values in display-column order.
    pub fn columns(&self) -> [&str; 4] {
        [
            &self.location,
            &self.avg_correlation,
            &self.link_count,
            &self.error_stats,
        ]
    }
}

/// Render a location result into its fixed textual shape.
pub fn format_location(result: &LocationResult) -> String {
    match *result {
        LocationResult::AllMissing { total } => {
            format!("{total} of {total} views missing")
        }
        LocationResult::Inconsistent { present, total } => {
            format!("multiple locations ({present} of {total} views present)")
        }
        LocationResult::Consistent {
            translation: [x, y, z],
        } => {
            format!("{}, {}, {}", round3(x), round3(y), round3(z))
        }
    }
}

fn format_error_stats(stats: Option<ErrorStats>) -> String {
    match stats {
        None => "-".to_string(),
        Some(s) => format!("{}, {}, {}", round3(s.mean), round3(s.min), round3(s.max)),
    }
}

// ── Engine ─────────────────────────────────────────────────────────────────

/// Computes summary records over read-only snapshots of the metadata store.
///
/// All three dependencies are supplied at construction; the engine can
/// never be observed in a partially-wired state. Callers needing one
/// consistent table refresh snapshot their inputs before a batch.
pub struct SummaryEngine<'a> {
    missing: &'a MissingViews,
    transforms: &'a dyn TransformSource,
    quality: &'a dyn QualityIndex,
}

impl<'a> SummaryEngine<'a> {
    pub fn new(
        missing: &'a MissingViews,
        transforms: &'a dyn TransformSource,
        quality: &'a dyn QualityIndex,
    ) -> Self {
        Self {
            missing,
            transforms,
            quality,
        }
    }

    /// Build the summary record of one group.
    ///
    /// Location resolution and quality aggregation run independently; a
    /// consistency failure cannot block aggregation and vice versa.
    pub fn build_row(&self, group: &[ViewId]) -> Result<SummaryRecord, SummaryError> {
        if group.is_empty() {
            return Err(SummaryError::EmptyGroup);
        }

        let quality = aggregate_quality(group, self.quality);
        let location = resolve_location(group, self.missing, self.transforms)?;

        Ok(SummaryRecord {
            location: format_location(&location),
            avg_correlation: round3(quality.avg_correlation),
            link_count: quality.link_count.to_string(),
            error_stats: format_error_stats(quality.error_stats),
        })
    }

    /// Build one record per group, in group order.
    pub fn build_rows(&self, groups: &[Vec<ViewId>]) -> Result<Vec<SummaryRecord>, SummaryError> {
        let rows = groups
            .iter()
            .map(|group| self.build_row(group))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!("built {} summary rows", rows.len());
        Ok(rows)
    }
}
