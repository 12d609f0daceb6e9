//! Cell selection: an ordered, duplicate-free list plus the drag state
//! machine that feeds it.
//!
//! Two drag interpretations exist and are mutually exclusive: pressing on an
//! unselected cell starts a rectangle selection, pressing on an
//! already-selected cell starts a region drag. The disambiguation happens
//! once, at press time.

use crate::config::EditorConfig;
use crate::coords::CellCoord;

/// Ongoing drag interaction, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Rectangle selection in progress.
    Selecting { anchor: CellCoord, current: CellCoord },
    /// Moving the current selection; `grab` is the cell the drag started on.
    Dragging { grab: CellCoord, current: CellCoord },
}

/// Ordered set of selected cells. Members are unique and in grid bounds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    cells: Vec<CellCoord>,
    drag: DragState,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cells(&self) -> &[CellCoord] {
        &self.cells
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        self.cells.contains(&cell)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.drag = DragState::Idle;
    }

    /// Replaces the selection with a single cell.
    pub fn select_single(&mut self, cell: CellCoord, config: &EditorConfig) {
        self.cells.clear();
        self.extend(cell, config);
    }

    /// Shift-click accumulation: strictly additive, appends iff absent.
    pub fn extend(&mut self, cell: CellCoord, config: &EditorConfig) {
        if config.is_valid_cell(cell) && !self.contains(cell) {
            self.cells.push(cell);
        }
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Begins a rectangle selection anchored at `anchor`.
    pub fn start_rectangle(&mut self, anchor: CellCoord) {
        self.drag = DragState::Selecting {
            anchor,
            current: anchor,
        };
    }

    /// Begins a selection drag grabbing the already-selected `grab` cell.
    pub fn start_drag(&mut self, grab: CellCoord) {
        self.drag = DragState::Dragging {
            grab,
            current: grab,
        };
    }

    /// Updates whichever drag is in progress. No-op when idle.
    pub fn update_drag(&mut self, cell: CellCoord) {
        match &mut self.drag {
            DragState::Idle => {}
            DragState::Selecting { current, .. } | DragState::Dragging { current, .. } => {
                *current = cell;
            }
        }
    }

    /// Commits a rectangle drag: the selection becomes every in-bounds cell
    /// in the inclusive bounding box of anchor and current, row-major.
    /// Returns to idle. No-op if no rectangle drag was in progress.
    pub fn commit_rectangle(&mut self, config: &EditorConfig) {
        let DragState::Selecting { anchor, current } = self.drag else {
            return;
        };
        self.drag = DragState::Idle;
        self.cells.clear();

        let x0 = anchor.x.min(current.x).max(0);
        let x1 = anchor.x.max(current.x).min(config.grid_cols as i32 - 1);
        let y0 = anchor.y.min(current.y).max(0);
        let y1 = anchor.y.max(current.y).min(config.grid_rows as i32 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.cells.push(CellCoord::new(x, y));
            }
        }
    }

    /// Finishes a selection drag, returning the cell delta between grab and
    /// release points. Returns to idle; `None` if no drag was in progress.
    pub fn finish_drag(&mut self) -> Option<(i32, i32)> {
        let DragState::Dragging { grab, current } = self.drag else {
            return None;
        };
        self.drag = DragState::Idle;
        Some((current.x - grab.x, current.y - grab.y))
    }

    /// Aborts any drag without committing. Used for pointer-leave.
    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Remaps selection coordinates after a region move: moved cells take
    /// their destination coordinate, held cells keep their own. Order is
    /// preserved.
    pub fn remap_after_move(&mut self, moved: &[(CellCoord, CellCoord)]) {
        for cell in &mut self.cells {
            if let Some(&(_, to)) = moved.iter().find(|(from, _)| from == cell) {
                *cell = to;
            }
        }
    }
}
