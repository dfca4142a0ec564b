//! Table-model composition: appending derived summary columns.
//!
//! [`SummaryTableModel`] wraps any [`ViewTableModel`] by explicit
//! composition, forwarding every operation of the wrapped model verbatim
//! and appending the four derived summary columns after the wrapped
//! model's own. Derived cells are recomputed on every query against the
//! engine's snapshot; nothing is cached.

use crate::summary::{SummaryEngine, SummaryError};
use crate::view::ViewId;

/// Headers of the appended summary columns, in display order.
pub const SUMMARY_COLUMN_NAMES: [&str; 4] =
    ["Location", "Avg. r", "# of links", "Errors (mean/min/max)"];

/// Row/column view over grouped acquisition views.
///
/// Each row is backed by one group of [`ViewId`]; all cell values are text
/// for display purposes regardless of their underlying numeric nature.
pub trait ViewTableModel {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;

    /// Header of `column`.
    ///
    /// Panics if `column` is out of range.
    fn column_name(&self, column: usize) -> String;

    fn is_editable(&self, row: usize, column: usize) -> bool;

    /// Cell value, recomputed per call.
    ///
    /// Fails only on caller contract violations ([`SummaryError`]); panics
    /// if `row` or `column` is out of range.
    fn value_at(&self, row: usize, column: usize) -> Result<String, SummaryError>;

    /// The view groups backing each row, in row order.
    fn groups(&self) -> &[Vec<ViewId>];

    /// Re-sort rows by `column`; models ignore columns they cannot sort.
    fn sort_by_column(&mut self, column: usize);
}

// ── Base model ─────────────────────────────────────────────────────────────

/// Minimal concrete model: one row per group, listing the group's
/// timepoints and setups.
#[derive(Debug, Clone, Default)]
pub struct GroupListModel {
    groups: Vec<Vec<ViewId>>,
}

impl GroupListModel {
    pub fn new(groups: Vec<Vec<ViewId>>) -> Self {
        Self { groups }
    }
}

fn joined_unique(values: impl Iterator<Item = u32>) -> String {
    let mut seen: Vec<u32> = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ViewTableModel for GroupListModel {
    fn row_count(&self) -> usize {
        self.groups.len()
    }

    fn column_count(&self) -> usize {
        2
    }

    fn column_name(&self, column: usize) -> String {
        match column {
            0 => "Timepoints".to_string(),
            1 => "Setups".to_string(),
            _ => panic!("column {column} out of range"),
        }
    }

    fn is_editable(&self, _row: usize, _column: usize) -> bool {
        false
    }

    fn value_at(&self, row: usize, column: usize) -> Result<String, SummaryError> {
        let group = &self.groups[row];
        let text = match column {
            0 => joined_unique(group.iter().map(|v| v.timepoint)),
            1 => joined_unique(group.iter().map(|v| v.setup)),
            _ => panic!("column {column} out of range"),
        };
        Ok(text)
    }

    fn groups(&self) -> &[Vec<ViewId>] {
        &self.groups
    }

    fn sort_by_column(&mut self, column: usize) {
        match column {
            0 => self
                .groups
                .sort_by_key(|g| g.iter().map(|v| v.timepoint).min().unwrap_or(0)),
            1 => self
                .groups
                .sort_by_key(|g| g.iter().map(|v| v.setup).min().unwrap_or(0)),
            _ => {}
        }
    }
}

// ── Decorating model ───────────────────────────────────────────────────────

/// Wraps a model and appends the four derived summary columns.
///
/// The wrapped model is held by composition, never extended; every
/// non-derived operation forwards to it unchanged. Derived columns are
/// read-only and sorting by one is a no-op.
pub struct SummaryTableModel<'a, M: ViewTableModel> {
    inner: M,
    engine: SummaryEngine<'a>,
}

impl<'a, M: ViewTableModel> SummaryTableModel<'a, M> {
    pub fn new(inner: M, engine: SummaryEngine<'a>) -> Self {
        Self { inner, engine }
    }

    /// The wrapped model.
    pub fn inner(&self) -> &M {
        &self.inner
    }
}

impl<M: ViewTableModel> ViewTableModel for SummaryTableModel<'_, M> {
    fn row_count(&self) -> usize {
        self.inner.row_count()
    }

    fn column_count(&self) -> usize {
        self.inner.column_count() + SUMMARY_COLUMN_NAMES.len()
    }

    fn column_name(&self, column: usize) -> String {
        let base = self.inner.column_count();
        if column < base {
            self.inner.column_name(column)
        } else {
            SUMMARY_COLUMN_NAMES[column - base].to_string()
        }
    }

    fn is_editable(&self, row: usize, column: usize) -> bool {
        let base = self.inner.column_count();
        if column < base {
            self.inner.is_editable(row, column)
        } else {
            false
        }
    }

    fn value_at(&self, row: usize, column: usize) -> Result<String, SummaryError> {
        let base = self.inner.column_count();
        if column < base {
            return self.inner.value_at(row, column);
        }
        let record = self.engine.build_row(&self.inner.groups()[row])?;
        Ok(record.columns()[column - base].to_string())
    }

    fn groups(&self) -> &[Vec<ViewId>] {
        self.inner.groups()
    }

    fn sort_by_column(&mut self, column: usize) {
        if column < self.inner.column_count() {
            self.inner.sort_by_column(column);
        }
    }
}
