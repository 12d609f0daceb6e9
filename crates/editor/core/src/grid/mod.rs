//! Tile storage and batch mutation: values, brush shapes, and the grid.

mod brush;
mod tile;
mod tile_grid;

pub use brush::BrushSize;
pub use tile::TileValue;
pub use tile_grid::TileGrid;
