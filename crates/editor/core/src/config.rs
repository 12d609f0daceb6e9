use crate::coords::{CellCoord, TileCoord};

/// Editor configuration constants and tunable grid geometry.
///
/// Dimensions are split across two granularities: the coarse cell grid
/// (`grid_cols` × `grid_rows` cells) and the fine tile grid inside each cell
/// (`cell_width` × `cell_height` tiles). The total tile extent is derived,
/// never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EditorConfig {
    /// Tiles per cell, horizontally.
    pub cell_width: u32,
    /// Tiles per cell, vertically.
    pub cell_height: u32,
    /// Cell columns in the grid.
    pub grid_cols: u32,
    /// Cell rows in the grid.
    pub grid_rows: u32,
    /// World pixels per tile edge at zoom 1.0.
    pub tile_size: f32,
    /// How far (in screen pixels) the visible area may extend past the grid.
    pub view_margin: f32,
}

impl EditorConfig {
    // ===== fixed bounds =====
    pub const MIN_ZOOM: f32 = 0.1;
    pub const MAX_ZOOM: f32 = 5.0;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CELL_WIDTH: u32 = 5;
    pub const DEFAULT_CELL_HEIGHT: u32 = 5;
    pub const DEFAULT_GRID_COLS: u32 = 10;
    pub const DEFAULT_GRID_ROWS: u32 = 10;
    pub const DEFAULT_TILE_SIZE: f32 = 16.0;
    pub const DEFAULT_VIEW_MARGIN: f32 = 64.0;

    pub fn new() -> Self {
        Self {
            cell_width: Self::DEFAULT_CELL_WIDTH,
            cell_height: Self::DEFAULT_CELL_HEIGHT,
            grid_cols: Self::DEFAULT_GRID_COLS,
            grid_rows: Self::DEFAULT_GRID_ROWS,
            tile_size: Self::DEFAULT_TILE_SIZE,
            view_margin: Self::DEFAULT_VIEW_MARGIN,
        }
    }

    pub fn with_dimensions(
        grid_cols: u32,
        grid_rows: u32,
        cell_width: u32,
        cell_height: u32,
    ) -> Self {
        Self {
            cell_width,
            cell_height,
            grid_cols,
            grid_rows,
            ..Self::new()
        }
    }

    /// Total grid width in tiles.
    pub fn width_tiles(&self) -> u32 {
        self.grid_cols * self.cell_width
    }

    /// Total grid height in tiles.
    pub fn height_tiles(&self) -> u32 {
        self.grid_rows * self.cell_height
    }

    pub fn is_valid_tile(&self, tile: TileCoord) -> bool {
        tile.x >= 0
            && tile.y >= 0
            && tile.x < self.width_tiles() as i32
            && tile.y < self.height_tiles() as i32
    }

    pub fn is_valid_cell(&self, cell: CellCoord) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && cell.x < self.grid_cols as i32
            && cell.y < self.grid_rows as i32
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}
