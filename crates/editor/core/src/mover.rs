//! Region movement: extract, clear, then recombine per-cell rectangles
//! under one of five merge policies.
//!
//! The pipeline is strictly snapshot → clear → place. Every source and every
//! valid destination rectangle is deep-copied before anything is cleared, so
//! overlapping source/destination rows can never read their own clobber.
//! Partial validity is per-cell: selected cells whose destination leaves the
//! grid stay where they are while the rest move.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::EditorConfig;
use crate::coords::{CellCoord, tile_rect_from_cell};
use crate::grid::{TileGrid, TileValue};

/// How moved content combines with content already at the destination.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum MergePolicy {
    /// Exchange source and destination contents.
    #[default]
    Swap,
    /// Source replaces destination; the vacated source stays empty.
    Overwrite,
    /// Source is copied to the destination and kept in place.
    Duplicate,
    /// Per-tile union of source and destination, placed at the destination.
    Add,
    /// Per-tile carve-out of source from destination, placed at the destination.
    Subtract,
}

impl MergePolicy {
    /// Maps the legacy boolean drop flag onto the policy enum.
    pub const fn from_swap_mode(swap_mode: bool) -> Self {
        if swap_mode { Self::Swap } else { Self::Overwrite }
    }
}

/// Owned deep copy of one cell's tile rectangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellPatch {
    width: u32,
    height: u32,
    tiles: Vec<TileValue>,
}

impl CellPatch {
    /// Snapshots a cell. Independent of the grid afterwards; clearing the
    /// source rectangle does not touch the patch.
    pub fn extract(grid: &TileGrid, cell: CellCoord, config: &EditorConfig) -> Self {
        let rect = tile_rect_from_cell(cell, config);
        let mut tiles = Vec::with_capacity((config.cell_width * config.cell_height) as usize);
        for y in rect.start_y..rect.end_y {
            for x in rect.start_x..rect.end_x {
                tiles.push(grid.get(x, y));
            }
        }
        Self {
            width: config.cell_width,
            height: config.cell_height,
            tiles,
        }
    }

    pub fn get(&self, x: u32, y: u32) -> TileValue {
        if x < self.width && y < self.height {
            self.tiles[(y * self.width + x) as usize]
        } else {
            TileValue::Transparent
        }
    }

    /// Blits the patch into the cell's rectangle; tiles outside the grid are
    /// dropped by `TileGrid::set`.
    pub fn place(&self, grid: &mut TileGrid, cell: CellCoord, config: &EditorConfig) {
        let rect = tile_rect_from_cell(cell, config);
        for dy in 0..self.height as i32 {
            for dx in 0..self.width as i32 {
                grid.set(
                    rect.start_x + dx,
                    rect.start_y + dy,
                    self.get(dx as u32, dy as u32),
                );
            }
        }
    }

    /// Per-tile union. Filled wins over open; everything else is transparent.
    fn add(&self, other: &Self) -> Self {
        self.combine(other, |a, b| {
            if a == TileValue::Filled || b == TileValue::Filled {
                TileValue::Filled
            } else if a == TileValue::Open || b == TileValue::Open {
                TileValue::Open
            } else {
                TileValue::Transparent
            }
        })
    }

    /// Per-tile carve-out of `self` from `other` (the destination).
    /// Filled-on-filled opens the tile; open-on-filled erases it; every other
    /// combination keeps the destination's original value.
    fn subtract_from(&self, other: &Self) -> Self {
        self.combine(other, |src, dst| match (src, dst) {
            (TileValue::Filled, TileValue::Filled) => TileValue::Open,
            (TileValue::Open, TileValue::Filled) => TileValue::Transparent,
            (_, dst) => dst,
        })
    }

    fn combine(&self, other: &Self, merge: impl Fn(TileValue, TileValue) -> TileValue) -> Self {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        Self {
            width: self.width,
            height: self.height,
            tiles: self
                .tiles
                .iter()
                .zip(&other.tiles)
                .map(|(&a, &b)| merge(a, b))
                .collect(),
        }
    }
}

/// What a move did, for selection remapping and derived-state refresh.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Cells that moved, as (from, to) pairs in selection order.
    pub moved: Vec<(CellCoord, CellCoord)>,
    /// Selected cells whose destination left the grid; they stayed put.
    pub held: Vec<CellCoord>,
    /// Every cell whose rectangle was written; drives activity refresh.
    pub touched: Vec<CellCoord>,
}

impl MoveOutcome {
    pub fn is_noop(&self) -> bool {
        self.touched.is_empty()
    }
}

/// Moves the selected cells by `delta` (in cells) under the given policy.
///
/// A move with zero valid destinations leaves the grid untouched and returns
/// a no-op outcome. The caller remaps its selection from `moved`/`held` and
/// refreshes activity for `touched`.
pub fn move_cells(
    grid: &mut TileGrid,
    config: &EditorConfig,
    selected: &[CellCoord],
    delta: (i32, i32),
    policy: MergePolicy,
) -> MoveOutcome {
    let (dx, dy) = delta;

    // Pair each source with its destination, keeping per-cell validity.
    let plan: Vec<(CellCoord, Option<CellCoord>)> = selected
        .iter()
        .map(|&src| {
            let dst = src.offset(dx, dy);
            (src, config.is_valid_cell(dst).then_some(dst))
        })
        .collect();

    if !plan.iter().any(|(_, dst)| dst.is_some()) {
        return MoveOutcome::default();
    }

    // Extract: deep-copy every rectangle that will be read later.
    let mut snapshots: BTreeMap<CellCoord, CellPatch> = BTreeMap::new();
    for &(src, dst) in &plan {
        snapshots
            .entry(src)
            .or_insert_with(|| CellPatch::extract(grid, src, config));
        if let Some(dst) = dst {
            snapshots
                .entry(dst)
                .or_insert_with(|| CellPatch::extract(grid, dst, config));
        }
    }

    // Clear every involved rectangle before any placement.
    for &cell in snapshots.keys() {
        grid.fill_rect(tile_rect_from_cell(cell, config), TileValue::Transparent);
    }

    let mut outcome = MoveOutcome {
        touched: snapshots.keys().copied().collect(),
        ..MoveOutcome::default()
    };

    // Duplicate restores every source first so destination copies win when a
    // destination coincides with another selected cell's home rectangle.
    if policy == MergePolicy::Duplicate {
        for &(src, _) in &plan {
            snapshots[&src].place(grid, src, config);
        }
    }

    // Held cells go back first. A held rectangle can also be a valid cell's
    // destination; placements below must win that overlap.
    for &(src, dst) in &plan {
        if dst.is_none() {
            snapshots[&src].place(grid, src, config);
            outcome.held.push(src);
        }
    }

    // Sources whose destination stayed on the grid. Swap resolution below
    // needs set membership, not just the per-pair view: selected cells can
    // chain (one cell's destination is another selected cell), and each
    // chain rotates as a whole.
    let moving: BTreeSet<CellCoord> = plan
        .iter()
        .filter_map(|&(src, dst)| dst.map(|_| src))
        .collect();

    for &(src, dst) in &plan {
        let Some(dst) = dst else { continue };

        match policy {
            // Sources go to their destinations; displaced destination
            // content is rotated back separately below.
            MergePolicy::Swap => {
                snapshots[&src].place(grid, dst, config);
            }
            MergePolicy::Overwrite => {
                snapshots[&src].place(grid, dst, config);
            }
            MergePolicy::Duplicate => {
                snapshots[&src].place(grid, dst, config);
            }
            MergePolicy::Add => {
                snapshots[&src].add(&snapshots[&dst]).place(grid, dst, config);
            }
            MergePolicy::Subtract => {
                snapshots[&src]
                    .subtract_from(&snapshots[&dst])
                    .place(grid, dst, config);
            }
        }
        outcome.moved.push((src, dst));
    }

    // Swap: every destination that is not itself a moving source got its
    // content displaced. That snapshot rotates into the vacated rectangle at
    // the start of the chain of moving sources ending at this destination,
    // so no snapshot is ever dropped and the inverse move restores the grid.
    if policy == MergePolicy::Swap {
        for &(_, dst) in &plan {
            let Some(dst) = dst else { continue };
            if moving.contains(&dst) {
                continue;
            }
            let mut hole = dst.offset(-dx, -dy);
            while moving.contains(&hole.offset(-dx, -dy)) {
                hole = hole.offset(-dx, -dy);
            }
            snapshots[&dst].place(grid, hole, config);
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::TileCoord;
    use crate::grid::BrushSize;

    fn fixture() -> (EditorConfig, TileGrid) {
        let config = EditorConfig::with_dimensions(10, 10, 5, 5);
        let grid = TileGrid::new(config.width_tiles(), config.height_tiles());
        (config, grid)
    }

    fn cell_tiles(grid: &TileGrid, cell: CellCoord, config: &EditorConfig) -> Vec<TileValue> {
        let rect = tile_rect_from_cell(cell, config);
        let mut out = Vec::new();
        for y in rect.start_y..rect.end_y {
            for x in rect.start_x..rect.end_x {
                out.push(grid.get(x, y));
            }
        }
        out
    }

    #[test]
    fn legacy_swap_mode_maps_to_policies() {
        assert_eq!(MergePolicy::from_swap_mode(true), MergePolicy::Swap);
        assert_eq!(MergePolicy::from_swap_mode(false), MergePolicy::Overwrite);
    }

    #[test]
    fn policy_names_round_trip_through_strum() {
        use std::str::FromStr;
        for policy in [
            MergePolicy::Swap,
            MergePolicy::Overwrite,
            MergePolicy::Duplicate,
            MergePolicy::Add,
            MergePolicy::Subtract,
        ] {
            assert_eq!(MergePolicy::from_str(policy.as_ref()).unwrap(), policy);
        }
    }

    #[test]
    fn overwrite_vacates_source_and_fills_destination() {
        let (config, mut grid) = fixture();
        grid.apply_brush(TileCoord::new(25, 25), BrushSize::S3, TileValue::Open);
        let before = cell_tiles(&grid, CellCoord::new(5, 5), &config);

        let outcome = move_cells(
            &mut grid,
            &config,
            &[CellCoord::new(5, 5)],
            (1, 0),
            MergePolicy::Overwrite,
        );

        assert_eq!(outcome.moved, vec![(CellCoord::new(5, 5), CellCoord::new(6, 5))]);
        assert!(cell_tiles(&grid, CellCoord::new(5, 5), &config)
            .iter()
            .all(|&v| v == TileValue::Transparent));
        assert_eq!(cell_tiles(&grid, CellCoord::new(6, 5), &config), before);
    }

    #[test]
    fn swap_exchanges_contents_and_round_trips() {
        let (config, mut grid) = fixture();
        grid.fill_rect(tile_rect_from_cell(CellCoord::new(2, 2), &config), TileValue::Filled);
        grid.set(16, 11, TileValue::Open); // inside cell (3, 2)

        let a_before = cell_tiles(&grid, CellCoord::new(2, 2), &config);
        let b_before = cell_tiles(&grid, CellCoord::new(3, 2), &config);

        move_cells(&mut grid, &config, &[CellCoord::new(2, 2)], (1, 0), MergePolicy::Swap);
        assert_eq!(cell_tiles(&grid, CellCoord::new(3, 2), &config), a_before);
        assert_eq!(cell_tiles(&grid, CellCoord::new(2, 2), &config), b_before);

        // Swapping back restores the original grid exactly.
        move_cells(&mut grid, &config, &[CellCoord::new(3, 2)], (-1, 0), MergePolicy::Swap);
        assert_eq!(cell_tiles(&grid, CellCoord::new(2, 2), &config), a_before);
        assert_eq!(cell_tiles(&grid, CellCoord::new(3, 2), &config), b_before);
    }

    #[test]
    fn swap_chain_of_adjacent_cells_round_trips() {
        let (config, mut grid) = fixture();
        // Three distinguishable cells in a row; (3,0) is both a moving
        // source and (2,0)'s destination.
        grid.fill_rect(tile_rect_from_cell(CellCoord::new(2, 0), &config), TileValue::Filled);
        grid.set(15, 0, TileValue::Open); // cell (3, 0)
        grid.set(20, 0, TileValue::Connection); // cell (4, 0)
        let before = grid.clone();

        let outcome = move_cells(
            &mut grid,
            &config,
            &[CellCoord::new(2, 0), CellCoord::new(3, 0)],
            (1, 0),
            MergePolicy::Swap,
        );
        assert_eq!(
            outcome.moved,
            vec![
                (CellCoord::new(2, 0), CellCoord::new(3, 0)),
                (CellCoord::new(3, 0), CellCoord::new(4, 0)),
            ]
        );
        // The chain rotates: (2,0)->(3,0), (3,0)->(4,0), and the displaced
        // (4,0) content lands in the vacated (2,0). Nothing is dropped.
        assert!(cell_tiles(&grid, CellCoord::new(3, 0), &config)
            .iter()
            .all(|&v| v == TileValue::Filled));
        assert_eq!(grid.get(20, 0), TileValue::Open);
        assert_eq!(grid.get(10, 0), TileValue::Connection);

        // The inverse swap restores the original grid exactly.
        move_cells(
            &mut grid,
            &config,
            &[CellCoord::new(3, 0), CellCoord::new(4, 0)],
            (-1, 0),
            MergePolicy::Swap,
        );
        assert_eq!(grid, before);
    }

    #[test]
    fn duplicate_keeps_source_and_copies() {
        let (config, mut grid) = fixture();
        grid.set(10, 10, TileValue::Filled); // cell (2, 2)
        let pattern = cell_tiles(&grid, CellCoord::new(2, 2), &config);

        move_cells(&mut grid, &config, &[CellCoord::new(2, 2)], (0, 2), MergePolicy::Duplicate);
        assert_eq!(cell_tiles(&grid, CellCoord::new(2, 2), &config), pattern);
        assert_eq!(cell_tiles(&grid, CellCoord::new(2, 4), &config), pattern);
    }

    #[test]
    fn add_is_per_tile_union() {
        let (config, mut grid) = fixture();
        // Source cell (0, 0): filled column x=0, open column x=1.
        grid.fill_rect(crate::coords::TileRect { start_x: 0, start_y: 0, end_x: 1, end_y: 5 }, TileValue::Filled);
        grid.fill_rect(crate::coords::TileRect { start_x: 1, start_y: 0, end_x: 2, end_y: 5 }, TileValue::Open);
        // Destination cell (1, 0): open row y=0.
        grid.fill_rect(crate::coords::TileRect { start_x: 5, start_y: 0, end_x: 10, end_y: 1 }, TileValue::Open);

        move_cells(&mut grid, &config, &[CellCoord::new(0, 0)], (1, 0), MergePolicy::Add);

        // Filled beats open beats transparent.
        assert_eq!(grid.get(5, 0), TileValue::Filled); // filled over open
        assert_eq!(grid.get(5, 1), TileValue::Filled); // filled over transparent
        assert_eq!(grid.get(6, 0), TileValue::Open); // open over open
        assert_eq!(grid.get(6, 1), TileValue::Open); // open over transparent
        assert_eq!(grid.get(7, 0), TileValue::Open); // transparent over open
        assert_eq!(grid.get(7, 1), TileValue::Transparent);
        // The vacated source is empty.
        assert!(cell_tiles(&grid, CellCoord::new(0, 0), &config)
            .iter()
            .all(|&v| v == TileValue::Transparent));
    }

    #[test]
    fn subtract_carves_and_erases() {
        let (config, mut grid) = fixture();
        // Destination cell (1, 0): all filled.
        grid.fill_rect(tile_rect_from_cell(CellCoord::new(1, 0), &config), TileValue::Filled);
        // Source cell (0, 0): filled at (0,0), open at (1,0), transparent elsewhere.
        grid.set(0, 0, TileValue::Filled);
        grid.set(1, 0, TileValue::Open);

        move_cells(&mut grid, &config, &[CellCoord::new(0, 0)], (1, 0), MergePolicy::Subtract);

        assert_eq!(grid.get(5, 0), TileValue::Open); // filled on filled carves
        assert_eq!(grid.get(6, 0), TileValue::Transparent); // open on filled erases
        assert_eq!(grid.get(7, 0), TileValue::Filled); // untouched destination survives
    }

    #[test]
    fn add_then_subtract_with_full_source_opens_destination() {
        let (config, mut grid) = fixture();
        // Destination cell (1, 0): a concrete mixed pattern.
        let rect = tile_rect_from_cell(CellCoord::new(1, 0), &config);
        for y in rect.start_y..rect.end_y {
            for x in rect.start_x..rect.end_x {
                let v = match (x + y) % 3 {
                    0 => TileValue::Filled,
                    1 => TileValue::Open,
                    _ => TileValue::Transparent,
                };
                grid.set(x, y, v);
            }
        }
        let original = cell_tiles(&grid, CellCoord::new(1, 0), &config);

        // Source cell (0, 0): all filled.
        grid.fill_rect(tile_rect_from_cell(CellCoord::new(0, 0), &config), TileValue::Filled);

        move_cells(&mut grid, &config, &[CellCoord::new(0, 0)], (1, 0), MergePolicy::Add);
        // Re-arm the all-filled source and subtract it back out.
        grid.fill_rect(tile_rect_from_cell(CellCoord::new(0, 0), &config), TileValue::Filled);
        move_cells(&mut grid, &config, &[CellCoord::new(0, 0)], (1, 0), MergePolicy::Subtract);

        // Add under an all-filled source promotes every destination tile to
        // filled; subtracting the same source then carves each one open.
        let after = cell_tiles(&grid, CellCoord::new(1, 0), &config);
        assert_eq!(original.len(), after.len());
        assert!(after.iter().all(|&v| v == TileValue::Open));
    }

    #[test]
    fn out_of_bounds_move_is_noop() {
        let (config, mut grid) = fixture();
        grid.set(49, 0, TileValue::Filled); // cell (9, 0), last column
        let before = grid.clone();

        let outcome = move_cells(
            &mut grid,
            &config,
            &[CellCoord::new(9, 0)],
            (1, 0),
            MergePolicy::Swap,
        );

        assert!(outcome.is_noop());
        assert_eq!(grid, before);
    }

    #[test]
    fn partial_validity_moves_only_in_bounds_cells() {
        let (config, mut grid) = fixture();
        grid.set(44, 0, TileValue::Filled); // cell (8, 0)
        grid.set(49, 0, TileValue::Open); // cell (9, 0)

        let outcome = move_cells(
            &mut grid,
            &config,
            &[CellCoord::new(8, 0), CellCoord::new(9, 0)],
            (1, 0),
            MergePolicy::Swap,
        );

        assert_eq!(outcome.moved, vec![(CellCoord::new(8, 0), CellCoord::new(9, 0))]);
        assert_eq!(outcome.held, vec![CellCoord::new(9, 0)]);
        // Cell (9, 0) is both a held source and cell (8, 0)'s destination;
        // the swap placement wins over the held restore.
        assert_eq!(grid.get(49, 0), TileValue::Filled);
        assert_eq!(grid.get(44, 0), TileValue::Open);
    }
}
