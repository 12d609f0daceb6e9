//! Level-document import/export.
//!
//! The persisted shape is fixed by the historical JSON exports: grid and cell
//! dimensions, the full tile grid as row-major arrays of raw values, and the
//! active-cell set as `"x,y"` strings. The string keys exist only at this
//! boundary; inside the core everything is structured coordinates. On import
//! the active-cell list is advisory: activity is a derived invariant, so the
//! tracker is rebuilt from tile contents and the serialized set is ignored.

use crate::activity::CellActivityTracker;
use crate::config::EditorConfig;
use crate::error::ImportError;
use crate::grid::{TileGrid, TileValue};

/// The exact persisted document shape.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LevelDocument {
    pub grid_cols: u32,
    pub grid_rows: u32,
    pub cell_width: u32,
    pub cell_height: u32,
    /// Row-major raw tile values, `height_tiles` rows of `width_tiles` each.
    pub tile_data: Vec<Vec<i8>>,
    /// Active cells as `"x,y"` strings. Written for readers that want it;
    /// never trusted on import.
    pub active_cells: Vec<String>,
}

/// Serializes the grid into the persisted document shape.
pub fn export(
    grid: &TileGrid,
    config: &EditorConfig,
    tracker: &CellActivityTracker,
) -> LevelDocument {
    let mut tile_data = Vec::with_capacity(grid.height() as usize);
    for y in 0..grid.height() as i32 {
        let mut row = Vec::with_capacity(grid.width() as usize);
        for x in 0..grid.width() as i32 {
            row.push(grid.get(x, y).as_raw());
        }
        tile_data.push(row);
    }

    LevelDocument {
        grid_cols: config.grid_cols,
        grid_rows: config.grid_rows,
        cell_width: config.cell_width,
        cell_height: config.cell_height,
        tile_data,
        active_cells: tracker.iter().map(|cell| cell.to_string()).collect(),
    }
}

/// Validates and materializes a document into a fresh grid and config.
///
/// Nothing is constructed until the whole document checks out, so a caller
/// holding an existing grid keeps it intact on failure. The returned tracker
/// is recomputed from tile contents, not read from `active_cells`.
pub fn import(
    doc: &LevelDocument,
) -> Result<(TileGrid, EditorConfig, CellActivityTracker), ImportError> {
    let config = EditorConfig::with_dimensions(
        doc.grid_cols,
        doc.grid_rows,
        doc.cell_width,
        doc.cell_height,
    );
    let width = config.width_tiles();
    let height = config.height_tiles();
    if width == 0 || height == 0 {
        return Err(ImportError::EmptyGrid {
            grid_cols: doc.grid_cols,
            grid_rows: doc.grid_rows,
            cell_width: doc.cell_width,
            cell_height: doc.cell_height,
        });
    }

    if doc.tile_data.len() != height as usize {
        return Err(ImportError::RowCountMismatch {
            expected: height,
            found: doc.tile_data.len(),
        });
    }
    for (y, row) in doc.tile_data.iter().enumerate() {
        if row.len() != width as usize {
            return Err(ImportError::RowLengthMismatch {
                row: y,
                expected: width,
                found: row.len(),
            });
        }
        for (x, &raw) in row.iter().enumerate() {
            if TileValue::from_raw(raw).is_none() {
                return Err(ImportError::InvalidTileValue { x, y, value: raw });
            }
        }
    }

    // Fully validated; build the grid in one pass.
    let mut grid = TileGrid::new(width, height);
    for (y, row) in doc.tile_data.iter().enumerate() {
        for (x, &raw) in row.iter().enumerate() {
            // Validated above, cannot fail.
            if let Some(value) = TileValue::from_raw(raw) {
                grid.set(x as i32, y as i32, value);
            }
        }
    }

    let mut tracker = CellActivityTracker::new();
    tracker.refresh_all(&grid, &config);
    Ok((grid, config, tracker))
}
