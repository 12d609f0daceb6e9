//! Auto-outline derivation.
//!
//! Two historical behaviors exist and both are kept as separately named
//! operations: [`recompute_outline_overlay`] derives a render-only set and
//! leaves the grid alone; [`bake_outline`] permanently converts the same
//! tiles to [`TileValue::Filled`]. Call sites choose; the editor session
//! treats the overlay as primary.

use std::collections::BTreeSet;

use crate::coords::TileCoord;
use crate::grid::{TileGrid, TileValue};

const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

fn qualifies(grid: &TileGrid, tile: TileCoord) -> bool {
    NEIGHBORS
        .iter()
        .any(|&(dx, dy)| grid.get(tile.x + dx, tile.y + dy) == TileValue::Open)
}

/// Full-grid scan for transparent tiles 4-adjacent to an open tile.
/// Idempotent and order-independent; depends only on current grid contents.
pub fn recompute_outline_overlay(grid: &TileGrid) -> BTreeSet<TileCoord> {
    grid.iter()
        .filter(|&(tile, value)| value == TileValue::Transparent && qualifies(grid, tile))
        .map(|(tile, _)| tile)
        .collect()
}

/// Destructive variant: writes [`TileValue::Filled`] into every qualifying
/// tile. The qualifying set is computed up front, so freshly baked tiles
/// cannot cascade into further qualification within the same pass.
/// Returns the number of tiles converted.
pub fn bake_outline(grid: &mut TileGrid) -> usize {
    let outline = recompute_outline_overlay(grid);
    for tile in &outline {
        grid.set(tile.x, tile.y, TileValue::Filled);
    }
    outline.len()
}
