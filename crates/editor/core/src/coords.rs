//! Coordinate spaces and the conversions between them.
//!
//! Four spaces exist: screen pixels (post pan/zoom), world pixels, tile
//! coordinates, and cell coordinates. Conversions here are pure functions of
//! an [`EditorConfig`] and a [`Viewport`]; nothing in this module mutates
//! state or panics on out-of-range input.
//!
//! [`Viewport`]: crate::viewport::Viewport

use std::fmt;

use crate::config::EditorConfig;
use crate::viewport::Viewport;

/// Discrete coordinate in tile space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Discrete coordinate in cell space (one cell covers a rectangle of tiles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell shifted by a delta in cell space.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// End-exclusive rectangle in tile space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TileRect {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
}

impl TileRect {
    pub fn contains(&self, tile: TileCoord) -> bool {
        tile.x >= self.start_x && tile.x < self.end_x && tile.y >= self.start_y && tile.y < self.end_y
    }

    pub fn width(&self) -> i32 {
        self.end_x - self.start_x
    }

    pub fn height(&self) -> i32 {
        self.end_y - self.start_y
    }
}

/// A point in screen space, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Inverts the pan/zoom/tile-size transform to find the tile under a screen
/// point. Returns `None` when the point falls outside the grid.
pub fn tile_from_screen(
    screen: ScreenPoint,
    viewport: &Viewport,
    config: &EditorConfig,
) -> Option<TileCoord> {
    let world_x = (screen.x - viewport.pan_x) / viewport.zoom;
    let world_y = (screen.y - viewport.pan_y) / viewport.zoom;
    let tile = TileCoord::new(
        (world_x / config.tile_size).floor() as i32,
        (world_y / config.tile_size).floor() as i32,
    );
    config.is_valid_tile(tile).then_some(tile)
}

/// Cell containing a tile. Total for any integer input, including tiles
/// outside the grid; validate the result with [`EditorConfig::is_valid_cell`].
pub fn cell_from_tile(tile: TileCoord, config: &EditorConfig) -> CellCoord {
    CellCoord::new(
        tile.x.div_euclid(config.cell_width as i32),
        tile.y.div_euclid(config.cell_height as i32),
    )
}

/// Tile rectangle covered by a cell, end-exclusive.
pub fn tile_rect_from_cell(cell: CellCoord, config: &EditorConfig) -> TileRect {
    let w = config.cell_width as i32;
    let h = config.cell_height as i32;
    TileRect {
        start_x: cell.x * w,
        start_y: cell.y * h,
        end_x: (cell.x + 1) * w,
        end_y: (cell.y + 1) * h,
    }
}
