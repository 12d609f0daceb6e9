//! Derived per-cell activity: a cell is active iff any of its tiles is set.
//!
//! Membership lives in a `BTreeSet` keyed by [`CellCoord`] so iteration order
//! is deterministic. The tracker is refreshed once per distinct touched cell
//! after every grid mutation; it never goes stale across a render.

use std::collections::BTreeSet;

use crate::config::EditorConfig;
use crate::coords::{CellCoord, tile_rect_from_cell};
use crate::grid::TileGrid;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CellActivityTracker {
    active: BTreeSet<CellCoord>,
}

impl CellActivityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescans one cell's tile rectangle and updates membership.
    /// Returns the cell's new activity.
    pub fn refresh(&mut self, cell: CellCoord, grid: &TileGrid, config: &EditorConfig) -> bool {
        let active = config.is_valid_cell(cell)
            && grid.any_set_in_rect(tile_rect_from_cell(cell, config));
        if active {
            self.active.insert(cell);
        } else {
            self.active.remove(&cell);
        }
        active
    }

    /// Full rebuild from grid contents. Used after import, where the
    /// serialized set is advisory and never trusted.
    pub fn refresh_all(&mut self, grid: &TileGrid, config: &EditorConfig) {
        self.active.clear();
        for cy in 0..config.grid_rows as i32 {
            for cx in 0..config.grid_cols as i32 {
                self.refresh(CellCoord::new(cx, cy), grid, config);
            }
        }
    }

    pub fn is_active(&self, cell: CellCoord) -> bool {
        self.active.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.active.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}
