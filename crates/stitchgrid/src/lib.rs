//! stitchgrid — grouped registration-quality summaries for multi-view
//! stitching datasets.
//!
//! Tiled microscopy acquisitions collapse many views (channels,
//! illuminations, angles sharing a tile position) into one display row.
//! For each such group this crate derives the values a review table shows:
//!
//! 1. **Location** - whether the present views of the group agree on a
//!    single registration (coefficient-wise, under a fixed absolute
//!    tolerance), and if so where it places them.
//! 2. **Quality** - average pairwise correlation, link count, and the
//!    error distribution over the group's pairwise links.
//! 3. **Composition** - the derived values appended as read-only text
//!    columns after an existing table model's own columns.
//!
//! The crate never computes registrations or correlations itself; it reads
//! precomputed per-view transforms and pairwise quality records and derives
//! display values from them. All computation is pure and synchronous:
//! rows are independent and may be computed in parallel over read-only
//! snapshots of the inputs.
//!
//! # Public API
//! - [`SummaryEngine`] and [`SummaryRecord`] as primary entry points
//! - [`SummaryTableModel`] for appending derived columns to any
//!   [`ViewTableModel`]
//! - [`StitchingDataset`] for the on-disk bundle, [`TileLayout`] for
//!   synthetic demo grids

mod dataset;
mod layout;
mod links;
mod registration;
mod summary;
mod table;
mod transform;
mod view;

pub use dataset::{DatasetParts, RegistrationEntry, StitchingDataset};
pub use layout::TileLayout;
pub use links::{LinkIndex, PairwiseLink, QualityIndex};
pub use registration::{MissingViews, TransformSource, ViewRegistrations};
pub use summary::{
    aggregate_quality, format_location, resolve_location, ErrorStats, LocationResult,
    QualitySummary, SummaryEngine, SummaryError, SummaryRecord, COEFF_TOLERANCE,
};
pub use table::{GroupListModel, SummaryTableModel, ViewTableModel, SUMMARY_COLUMN_NAMES};
pub use transform::RowPackedAffine;
pub use view::ViewId;
