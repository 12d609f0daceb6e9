//! The editor session: the single funnel every mutation flows through.
//!
//! `Editor` owns the grid plus all derived and interaction state. Each
//! command refreshes cell activity for the distinct cells it touched before
//! returning, so activity is never stale across a render. The outline
//! overlay is cheaper to let lag: it is re-derived when a paint or move
//! session ends, not on every stroke event.
//!
//! Pointer input arrives here as plain screen coordinates; DOM and canvas
//! translation live entirely outside the core.

use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::activity::CellActivityTracker;
use crate::clipboard::CopiedPattern;
use crate::config::EditorConfig;
use crate::coords::{self, CellCoord, ScreenPoint, TileCoord, tile_rect_from_cell};
use crate::grid::{BrushSize, TileGrid, TileValue};
use crate::mover::{self, MergePolicy, MoveOutcome};
use crate::outline;
use crate::selection::{DragState, Selection};
use crate::viewport::Viewport;

/// Top-level interaction mode, chosen by the toolbar.
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
pub enum EditorMode {
    #[default]
    Paint,
    Select,
    Pan,
}

pub struct Editor {
    config: EditorConfig,
    grid: TileGrid,
    tracker: CellActivityTracker,
    outline_overlay: BTreeSet<TileCoord>,
    selection: Selection,
    viewport: Viewport,
    clipboard: Option<CopiedPattern>,

    mode: EditorMode,
    brush_size: BrushSize,
    paint_value: TileValue,
    drop_policy: MergePolicy,

    // Pointer-session state, scoped to one press/release interaction and
    // reset on release or pointer-leave.
    last_painted: Option<TileCoord>,
    last_pointer: Option<ScreenPoint>,
    painting: bool,
}

impl Editor {
    pub fn new(config: EditorConfig, view_width: f32, view_height: f32) -> Self {
        Self {
            grid: TileGrid::new(config.width_tiles(), config.height_tiles()),
            tracker: CellActivityTracker::new(),
            outline_overlay: BTreeSet::new(),
            selection: Selection::new(),
            viewport: Viewport::new(view_width, view_height),
            clipboard: None,
            mode: EditorMode::default(),
            brush_size: BrushSize::default(),
            paint_value: TileValue::Open,
            drop_policy: MergePolicy::default(),
            last_painted: None,
            last_pointer: None,
            painting: false,
            config,
        }
    }

    // ===== queries =====

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn active_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.tracker.iter()
    }

    pub fn is_cell_active(&self, cell: CellCoord) -> bool {
        self.tracker.is_active(cell)
    }

    pub fn outline_overlay(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.outline_overlay.iter().copied()
    }

    pub fn selected_cells(&self) -> &[CellCoord] {
        self.selection.cells()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn brush_size(&self) -> BrushSize {
        self.brush_size
    }

    pub fn drop_policy(&self) -> MergePolicy {
        self.drop_policy
    }

    /// Screen-to-tile helper for the input layer.
    pub fn screen_to_tile(&self, screen: ScreenPoint) -> Option<TileCoord> {
        coords::tile_from_screen(screen, &self.viewport, &self.config)
    }

    /// Tile-to-cell helper for the input layer.
    pub fn tile_to_cell(&self, tile: TileCoord) -> CellCoord {
        coords::cell_from_tile(tile, &self.config)
    }

    // ===== configuration commands =====

    pub fn set_mode(&mut self, mode: EditorMode) {
        debug!(%mode, "mode change");
        // Switching tools mid-interaction counts as releasing the pointer.
        self.pointer_leave();
        self.mode = mode;
    }

    pub fn set_brush_size(&mut self, brush_size: BrushSize) {
        self.brush_size = brush_size;
    }

    pub fn set_paint_value(&mut self, value: TileValue) {
        self.paint_value = value;
    }

    pub fn set_drop_policy(&mut self, policy: MergePolicy) {
        debug!(%policy, "drop policy change");
        self.drop_policy = policy;
    }

    // ===== mutation commands =====

    /// Stamps the current brush at `center` and refreshes activity once per
    /// distinct touched cell.
    pub fn apply_brush(&mut self, center: TileCoord, value: TileValue) {
        let written = self.grid.apply_brush(center, self.brush_size, value);
        if written == 0 {
            return;
        }
        trace!(%center, brush = %self.brush_size, %value, written, "brush stroke");

        let mut cells = BTreeSet::new();
        for &(dx, dy) in self.brush_size.offsets() {
            let tile = TileCoord::new(center.x + dx, center.y + dy);
            if self.config.is_valid_tile(tile) {
                cells.insert(coords::cell_from_tile(tile, &self.config));
            }
        }
        for cell in cells {
            self.tracker.refresh(cell, &self.grid, &self.config);
        }
    }

    /// Moves the current selection by `delta` cells under `policy`, remapping
    /// the selection to follow the cells that moved.
    pub fn move_selection(&mut self, delta: (i32, i32), policy: MergePolicy) -> MoveOutcome {
        let outcome = mover::move_cells(
            &mut self.grid,
            &self.config,
            self.selection.cells(),
            delta,
            policy,
        );
        if outcome.is_noop() {
            return outcome;
        }
        debug!(
            ?delta,
            %policy,
            moved = outcome.moved.len(),
            held = outcome.held.len(),
            "selection moved"
        );

        for &cell in &outcome.touched {
            self.tracker.refresh(cell, &self.grid, &self.config);
        }
        self.selection.remap_after_move(&outcome.moved);
        self.refresh_outline();
        outcome
    }

    /// Clears every selected cell's tiles to transparent.
    pub fn clear_selected_cells(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        debug!(cells = self.selection.len(), "clear selected cells");
        let cells: Vec<CellCoord> = self.selection.cells().to_vec();
        for cell in cells {
            self.grid
                .fill_rect(tile_rect_from_cell(cell, &self.config), TileValue::Transparent);
            self.tracker.refresh(cell, &self.grid, &self.config);
        }
        self.refresh_outline();
    }

    /// Resets the whole grid and all derived state. The selection survives;
    /// only tile contents are dropped.
    pub fn clear_grid(&mut self) {
        debug!("clear grid");
        self.grid.clear();
        self.tracker.clear();
        self.outline_overlay.clear();
    }

    /// Re-derives the render-only outline overlay from current contents.
    pub fn refresh_outline(&mut self) {
        self.outline_overlay = outline::recompute_outline_overlay(&self.grid);
    }

    /// Destructive outline: converts qualifying tiles to filled. Distinct
    /// from the overlay on purpose; returns how many tiles were baked.
    pub fn bake_outline(&mut self) -> usize {
        let baked = outline::bake_outline(&mut self.grid);
        debug!(baked, "outline baked");
        if baked > 0 {
            // Baking writes tiles, so activity may have changed anywhere.
            self.tracker.refresh_all(&self.grid, &self.config);
            self.refresh_outline();
        }
        baked
    }

    // ===== selection commands =====

    pub fn select_single(&mut self, cell: CellCoord) {
        self.selection.select_single(cell, &self.config);
    }

    /// Shift-click accumulation.
    pub fn extend_selection(&mut self, cell: CellCoord) {
        self.selection.extend(cell, &self.config);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    // ===== clipboard =====

    /// Snapshots the selection's bounding box. No-op on empty selection.
    pub fn copy_selection(&mut self) {
        self.clipboard = CopiedPattern::capture(&self.grid, &self.config, self.selection.cells());
        if let Some(pattern) = &self.clipboard {
            debug!(cols = pattern.cols(), rows = pattern.rows(), "pattern copied");
        }
    }

    /// Pastes the copied pattern with its top-left cell at `anchor`.
    pub fn paste(&mut self, anchor: CellCoord) {
        let Some(pattern) = self.clipboard.clone() else {
            return;
        };
        let touched = pattern.paste(&mut self.grid, &self.config, anchor);
        debug!(%anchor, cells = touched.len(), "pattern pasted");
        for cell in touched {
            self.tracker.refresh(cell, &self.grid, &self.config);
        }
        self.refresh_outline();
    }

    // ===== import/export =====

    #[cfg(feature = "serde")]
    pub fn export(&self) -> crate::io::LevelDocument {
        crate::io::export(&self.grid, &self.config, &self.tracker)
    }

    /// Replaces grid, config, and derived state from a document. Existing
    /// state is untouched if validation fails.
    #[cfg(feature = "serde")]
    pub fn import(&mut self, doc: &crate::io::LevelDocument) -> Result<(), crate::ImportError> {
        let (grid, config, tracker) = crate::io::import(doc)?;
        debug!(
            grid_cols = config.grid_cols,
            grid_rows = config.grid_rows,
            "document imported"
        );
        self.grid = grid;
        self.config = config;
        self.tracker = tracker;
        self.selection.clear();
        self.clipboard = None;
        // The grid extent changed; a pan valid for the old grid can violate
        // the margin constraint against the new one.
        self.viewport.clamp_pan(&self.config);
        self.refresh_outline();
        Ok(())
    }

    // ===== pointer session =====

    /// Press. Interpretation depends on the mode; in select mode, pressing a
    /// selected cell starts a drag and pressing anywhere else starts a
    /// rectangle.
    pub fn pointer_down(&mut self, screen: ScreenPoint) {
        self.last_pointer = Some(screen);
        match self.mode {
            EditorMode::Paint => {
                if let Some(tile) = self.screen_to_tile(screen) {
                    self.painting = true;
                    self.last_painted = Some(tile);
                    self.apply_brush(tile, self.paint_value);
                }
            }
            EditorMode::Select => {
                let Some(tile) = self.screen_to_tile(screen) else {
                    return;
                };
                let cell = self.tile_to_cell(tile);
                if self.selection.contains(cell) {
                    self.selection.start_drag(cell);
                } else {
                    self.selection.start_rectangle(cell);
                }
            }
            EditorMode::Pan => {}
        }
    }

    /// Move with the button held.
    pub fn pointer_move(&mut self, screen: ScreenPoint) {
        match self.mode {
            EditorMode::Paint => {
                if !self.painting {
                    return;
                }
                let Some(tile) = self.screen_to_tile(screen) else {
                    return;
                };
                // Dedupe: mouse events repeat within one tile.
                if self.last_painted == Some(tile) {
                    return;
                }
                self.last_painted = Some(tile);
                self.apply_brush(tile, self.paint_value);
            }
            EditorMode::Select => {
                if let Some(tile) = self.screen_to_tile(screen) {
                    self.selection.update_drag(self.tile_to_cell(tile));
                }
            }
            EditorMode::Pan => {
                if let Some(last) = self.last_pointer {
                    self.viewport.pan_by(screen.x - last.x, screen.y - last.y);
                    self.viewport.clamp_pan(&self.config);
                }
            }
        }
        if self.last_pointer.is_some() {
            self.last_pointer = Some(screen);
        }
    }

    /// Release. Commits whatever interaction was in progress.
    pub fn pointer_up(&mut self) {
        match self.selection.drag() {
            DragState::Selecting { .. } => self.selection.commit_rectangle(&self.config),
            DragState::Dragging { .. } => {
                if let Some(delta) = self.selection.finish_drag()
                    && delta != (0, 0)
                {
                    self.move_selection(delta, self.drop_policy);
                }
            }
            DragState::Idle => {}
        }
        if self.painting {
            // End of a paint session: derive the overlay once.
            self.refresh_outline();
        }
        self.painting = false;
        self.last_painted = None;
        self.last_pointer = None;
    }

    /// The pointer left the canvas mid-interaction. Treated as an implicit
    /// release so no drawing or dragging state gets stuck.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor() -> Editor {
        // 10×10 cells of 5×5 tiles at 16 px: tile (x, y) is at screen
        // (16x, 16y) with the default identity viewport.
        Editor::new(EditorConfig::with_dimensions(10, 10, 5, 5), 800.0, 800.0)
    }

    fn screen_at_tile(x: i32, y: i32) -> ScreenPoint {
        ScreenPoint::new(x as f32 * 16.0 + 8.0, y as f32 * 16.0 + 8.0)
    }

    #[test]
    fn paint_move_scenario() {
        // The end-to-end scenario: paint a 3×3 block, then overwrite-move
        // its cell one column right.
        let mut editor = editor();
        editor.set_brush_size(BrushSize::S3);
        editor.apply_brush(TileCoord::new(25, 25), TileValue::Open);

        for y in 24..=26 {
            for x in 24..=26 {
                assert_eq!(editor.grid().get(x, y), TileValue::Open);
            }
        }
        assert!(editor.is_cell_active(CellCoord::new(5, 5)));
        assert!(editor.is_cell_active(CellCoord::new(4, 4)));

        editor.select_single(CellCoord::new(5, 5));
        editor.move_selection((1, 0), MergePolicy::Overwrite);

        // Cell (5, 5) is fully vacated...
        let rect = tile_rect_from_cell(CellCoord::new(5, 5), editor.config());
        for y in rect.start_y..rect.end_y {
            for x in rect.start_x..rect.end_x {
                assert_eq!(editor.grid().get(x, y), TileValue::Transparent);
            }
        }
        assert!(!editor.is_cell_active(CellCoord::new(5, 5)));
        // ...and its 2×2 corner of the pattern landed in cell (6, 5).
        assert!(editor.is_cell_active(CellCoord::new(6, 5)));
        assert_eq!(editor.grid().get(30, 25), TileValue::Open);
        assert_eq!(editor.grid().get(31, 26), TileValue::Open);
        // Selection followed the move.
        assert_eq!(editor.selected_cells(), &[CellCoord::new(6, 5)]);
    }

    #[test]
    fn brush_stroke_refreshes_every_spanned_cell() {
        let mut editor = editor();
        editor.set_brush_size(BrushSize::S5);
        // Centered on a cell corner, the 5×5 brush spans four cells.
        editor.apply_brush(TileCoord::new(25, 25), TileValue::Filled);
        for cell in [
            CellCoord::new(4, 4),
            CellCoord::new(5, 4),
            CellCoord::new(4, 5),
            CellCoord::new(5, 5),
        ] {
            assert!(editor.is_cell_active(cell));
        }
        assert_eq!(editor.active_cells().count(), 4);
    }

    #[test]
    fn out_of_bounds_move_leaves_everything_unchanged() {
        let mut editor = editor();
        editor.apply_brush(TileCoord::new(49, 0), TileValue::Filled);
        editor.select_single(CellCoord::new(9, 0));
        let before = editor.grid().clone();

        let outcome = editor.move_selection((1, 0), MergePolicy::Swap);
        assert!(outcome.is_noop());
        assert_eq!(editor.grid(), &before);
        assert_eq!(editor.selected_cells(), &[CellCoord::new(9, 0)]);
    }

    #[test]
    fn paint_session_via_pointer_dedupes_and_derives_outline_on_release() {
        let mut editor = editor();
        editor.set_paint_value(TileValue::Open);
        editor.pointer_down(screen_at_tile(10, 10));
        // Moves within the same tile are deduped, so no extra writes happen.
        editor.pointer_move(ScreenPoint::new(10.0 * 16.0 + 2.0, 10.0 * 16.0 + 2.0));
        editor.pointer_move(screen_at_tile(11, 10));
        assert_eq!(editor.grid().get(10, 10), TileValue::Open);
        assert_eq!(editor.grid().get(11, 10), TileValue::Open);

        // Overlay lags until the session ends.
        assert_eq!(editor.outline_overlay().count(), 0);
        editor.pointer_up();
        assert!(editor.outline_overlay().count() > 0);
    }

    #[test]
    fn select_then_drag_moves_via_drop_policy() {
        let mut editor = editor();
        editor.apply_brush(TileCoord::new(12, 12), TileValue::Filled); // cell (2, 2)
        editor.set_mode(EditorMode::Select);

        // Rectangle-select cell (2, 2).
        editor.pointer_down(screen_at_tile(12, 12));
        editor.pointer_up();
        assert_eq!(editor.selected_cells(), &[CellCoord::new(2, 2)]);

        // Press on the selected cell and drag one cell right: swap by default.
        editor.pointer_down(screen_at_tile(12, 12));
        editor.pointer_move(screen_at_tile(17, 12));
        editor.pointer_up();

        assert_eq!(editor.grid().get(12, 12), TileValue::Transparent);
        assert_eq!(editor.grid().get(17, 12), TileValue::Filled);
        assert_eq!(editor.selected_cells(), &[CellCoord::new(3, 2)]);
    }

    #[test]
    fn pointer_leave_is_an_implicit_release() {
        let mut editor = editor();
        editor.pointer_down(screen_at_tile(5, 5));
        editor.pointer_leave();
        // The session ended: further moves paint nothing.
        editor.pointer_move(screen_at_tile(20, 20));
        assert_eq!(editor.grid().get(20, 20), TileValue::Transparent);
    }

    #[test]
    fn clear_selected_cells_empties_their_rectangles() {
        let mut editor = editor();
        editor.set_brush_size(BrushSize::S5);
        editor.apply_brush(TileCoord::new(25, 25), TileValue::Filled);
        editor.select_single(CellCoord::new(5, 5));
        editor.extend_selection(CellCoord::new(4, 4));

        editor.clear_selected_cells();
        assert!(!editor.is_cell_active(CellCoord::new(5, 5)));
        assert!(!editor.is_cell_active(CellCoord::new(4, 4)));
        // Unselected spill cells keep their tiles.
        assert!(editor.is_cell_active(CellCoord::new(5, 4)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn editor_round_trips_through_a_document() {
        let mut editor = editor();
        editor.set_brush_size(BrushSize::S3);
        editor.apply_brush(TileCoord::new(25, 25), TileValue::Open);
        let doc = editor.export();

        let mut restored = Editor::new(EditorConfig::new(), 800.0, 800.0);
        restored.import(&doc).unwrap();
        assert_eq!(restored.grid(), editor.grid());
        assert!(restored.is_cell_active(CellCoord::new(5, 5)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn import_reclamps_the_viewport_to_the_new_grid() {
        let mut editor = editor();
        // Valid pan for the 800 px grid, far past the margin for a small one.
        editor.viewport_mut().pan_x = -64.0;

        let doc = crate::io::LevelDocument {
            grid_cols: 2,
            grid_rows: 2,
            cell_width: 5,
            cell_height: 5,
            tile_data: vec![vec![-1; 10]; 10],
            active_cells: vec![],
        };
        editor.import(&doc).unwrap();

        // The imported grid is 160 px wide; the old pan would leave it
        // hanging outside the margin until the next pan event.
        assert!(editor.viewport().pan_x >= editor.config().view_margin);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn failed_import_keeps_current_state() {
        let mut editor = editor();
        editor.apply_brush(TileCoord::new(3, 3), TileValue::Filled);
        let before = editor.grid().clone();

        let mut doc = editor.export();
        doc.tile_data[0][0] = 42;
        assert!(editor.import(&doc).is_err());
        assert_eq!(editor.grid(), &before);
        assert!(editor.is_cell_active(CellCoord::new(0, 0)));
    }
}
