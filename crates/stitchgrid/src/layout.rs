//! Synthetic overlapping tile-grid layouts for demos and tests.
//!
//! Real datasets come from the acquisition metadata; this module generates
//! the layout side of a dataset procedurally, the way tiled acquisitions
//! place their stage positions: tile `(x, y)` of a grid with fractional
//! `overlap` is translated by `x * (1 - overlap) * width` (and likewise in
//! y), truncated to whole pixels.

use serde::{Deserialize, Serialize};

use crate::dataset::{RegistrationEntry, StitchingDataset};
use crate::links::PairwiseLink;
use crate::transform::RowPackedAffine;
use crate::view::ViewId;

const DEFAULT_TILES: usize = 3;
const DEFAULT_TILE_DIM: [f64; 2] = [100.0, 100.0];
const DEFAULT_OVERLAP: f64 = 0.2;

/// A regular grid of overlapping tiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileLayout {
    /// Number of tiles along x.
    pub tiles_x: usize,
    /// Number of tiles along y.
    pub tiles_y: usize,
    /// Tile extent in pixels, `[width, height]`.
    pub tile_dim: [f64; 2],
    /// Linear overlap fraction between neighboring tiles, in `[0, 1)`.
    pub overlap: f64,
}

impl Default for TileLayout {
    fn default() -> Self {
        Self {
            tiles_x: DEFAULT_TILES,
            tiles_y: DEFAULT_TILES,
            tile_dim: DEFAULT_TILE_DIM,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl TileLayout {
    pub fn validate(&self) -> Result<(), String> {
        if self.tiles_x == 0 || self.tiles_y == 0 {
            return Err("tile counts must be >= 1".to_string());
        }
        if !self.tile_dim.iter().all(|d| d.is_finite() && *d > 0.0) {
            return Err("tile dimensions must be finite and > 0".to_string());
        }
        if !self.overlap.is_finite() || !(0.0..1.0).contains(&self.overlap) {
            return Err("overlap must lie in [0, 1)".to_string());
        }
        Ok(())
    }

    pub fn tile_count(&self) -> usize {
        self.tiles_x * self.tiles_y
    }

    /// Stage translation of each tile, x-major.
    pub fn tile_translations(&self) -> Vec<[f64; 3]> {
        let step_x = (1.0 - self.overlap) * self.tile_dim[0];
        let step_y = (1.0 - self.overlap) * self.tile_dim[1];
        let mut translations = Vec::with_capacity(self.tile_count());
        for x in 0..self.tiles_x {
            for y in 0..self.tiles_y {
                translations.push([(x as f64 * step_x).trunc(), (y as f64 * step_y).trunc(), 0.0]);
            }
        }
        translations
    }

    /// Generate a deterministic demo dataset over this layout.
    ///
    /// Each tile becomes one group of `views_per_tile` views (timepoint 0,
    /// consecutive setup ids) sharing the tile's translation, with pairwise
    /// links between the views of a tile. Correlations and errors follow
    /// fixed formulas so repeated runs produce identical tables.
    pub fn demo_dataset(&self, views_per_tile: usize) -> Result<StitchingDataset, String> {
        self.validate()?;
        if views_per_tile == 0 {
            return Err("views_per_tile must be >= 1".to_string());
        }

        let mut groups = Vec::with_capacity(self.tile_count());
        let mut registrations = Vec::new();
        let mut links = Vec::new();

        for (tile, translation) in self.tile_translations().into_iter().enumerate() {
            let transform =
                RowPackedAffine::from_translation(translation[0], translation[1], translation[2]);
            let group: Vec<ViewId> = (0..views_per_tile)
                .map(|k| ViewId::new(0, (tile * views_per_tile + k) as u32))
                .collect();

            for &view in &group {
                registrations.push(RegistrationEntry { view, transform });
            }
            for a in 0..group.len() {
                for b in (a + 1)..group.len() {
                    links.push(PairwiseLink {
                        pair: (group[a], group[b]),
                        correlation: 0.95 - 0.01 * tile as f64 - 0.005 * (a + b) as f64,
                        error: 0.02 * (tile % 5) as f64 + 0.01 * (b - a) as f64,
                    });
                }
            }
            groups.push(group);
        }

        Ok(StitchingDataset::new(
            format!("demo {}x{} grid", self.tiles_x, self.tiles_y),
            groups,
            Vec::new(),
            registrations,
            links,
        ))
    }
}
