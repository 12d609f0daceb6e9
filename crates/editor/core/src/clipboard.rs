//! Copy/paste of multi-cell patterns.

use crate::config::EditorConfig;
use crate::coords::CellCoord;
use crate::grid::TileGrid;
use crate::mover::CellPatch;

/// Immutable snapshot of the selection's bounding box, captured cell by cell.
///
/// The snapshot is independent of the grid it came from; painting or clearing
/// after a copy does not affect later pastes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopiedPattern {
    cols: u32,
    rows: u32,
    cells: Vec<CellPatch>,
}

impl CopiedPattern {
    /// Captures the bounding box of `selected`. Cells inside the box but not
    /// in the selection are captured too (the pattern is rectangular).
    /// Returns `None` for an empty selection.
    pub fn capture(
        grid: &TileGrid,
        config: &EditorConfig,
        selected: &[CellCoord],
    ) -> Option<Self> {
        let min_x = selected.iter().map(|c| c.x).min()?;
        let max_x = selected.iter().map(|c| c.x).max()?;
        let min_y = selected.iter().map(|c| c.y).min()?;
        let max_y = selected.iter().map(|c| c.y).max()?;

        let cols = (max_x - min_x + 1) as u32;
        let rows = (max_y - min_y + 1) as u32;
        let mut cells = Vec::with_capacity((cols * rows) as usize);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                cells.push(CellPatch::extract(grid, CellCoord::new(x, y), config));
            }
        }
        Some(Self { cols, rows, cells })
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Pastes the pattern with its top-left cell at `anchor`. Cells landing
    /// outside the grid are skipped; in-bounds cells are overwritten whole.
    /// Returns the cells actually written, for activity refresh.
    pub fn paste(
        &self,
        grid: &mut TileGrid,
        config: &EditorConfig,
        anchor: CellCoord,
    ) -> Vec<CellCoord> {
        let mut touched = Vec::new();
        for row in 0..self.rows as i32 {
            for col in 0..self.cols as i32 {
                let dst = anchor.offset(col, row);
                if !config.is_valid_cell(dst) {
                    continue;
                }
                self.cells[(row * self.cols as i32 + col) as usize].place(grid, dst, config);
                touched.push(dst);
            }
        }
        touched
    }
}
