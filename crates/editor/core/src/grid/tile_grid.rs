//! The mutable tile grid.
//!
//! `TileGrid` is a tolerant grid: out-of-bounds reads return the
//! [`TileValue::Transparent`] sentinel and out-of-bounds writes are silent
//! no-ops. Callers (brush strokes clipped at the border, moves near the
//! edge) rely on that, so it must never turn into a panic. Derived state
//! (cell activity, outline overlay) is refreshed by the caller, never here.

use crate::coords::{TileCoord, TileRect};

use super::{BrushSize, TileValue};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    width: u32,
    height: u32,
    tiles: Vec<TileValue>,
}

impl TileGrid {
    /// Creates a grid with every tile transparent.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileValue::Transparent; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            None
        } else {
            Some(y as usize * self.width as usize + x as usize)
        }
    }

    /// Reads a tile; out of bounds yields the transparent sentinel.
    pub fn get(&self, x: i32, y: i32) -> TileValue {
        self.try_get(x, y).unwrap_or(TileValue::Transparent)
    }

    /// Bounds-honest read for callers that must distinguish "outside".
    pub fn try_get(&self, x: i32, y: i32) -> Option<TileValue> {
        self.index(x, y).map(|i| self.tiles[i])
    }

    /// Writes a tile; out of bounds is a silent no-op.
    pub fn set(&mut self, x: i32, y: i32, value: TileValue) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = value;
        }
    }

    /// Writes an end-exclusive rectangle, clipped to the grid.
    pub fn fill_rect(&mut self, rect: TileRect, value: TileValue) {
        let x0 = rect.start_x.max(0);
        let y0 = rect.start_y.max(0);
        let x1 = rect.end_x.min(self.width as i32);
        let y1 = rect.end_y.min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                let i = y as usize * self.width as usize + x as usize;
                self.tiles[i] = value;
            }
        }
    }

    /// Stamps a brush shape around `center`. Offsets falling outside the grid
    /// are dropped. Returns how many tiles were written.
    pub fn apply_brush(&mut self, center: TileCoord, brush: BrushSize, value: TileValue) -> usize {
        let mut written = 0;
        for &(dx, dy) in brush.offsets() {
            if let Some(i) = self.index(center.x + dx, center.y + dy) {
                self.tiles[i] = value;
                written += 1;
            }
        }
        written
    }

    /// Resets every tile to transparent.
    pub fn clear(&mut self) {
        self.tiles.fill(TileValue::Transparent);
    }

    /// Row-major iteration over all tiles with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (TileCoord, TileValue)> + '_ {
        self.tiles.iter().enumerate().map(|(i, &value)| {
            let x = (i % self.width as usize) as i32;
            let y = (i / self.width as usize) as i32;
            (TileCoord::new(x, y), value)
        })
    }

    /// True if any tile in the end-exclusive rectangle is set. The rectangle
    /// is clipped first, so ranges hanging off the edge are fine.
    pub fn any_set_in_rect(&self, rect: TileRect) -> bool {
        let x0 = rect.start_x.max(0);
        let y0 = rect.start_y.max(0);
        let x1 = rect.end_x.min(self.width as i32);
        let y1 = rect.end_y.min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                if self.tiles[y as usize * self.width as usize + x as usize].is_set() {
                    return true;
                }
            }
        }
        false
    }
}
