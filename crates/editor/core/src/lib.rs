//! Tile-grid level editor core.
//!
//! `editor-core` defines the grid data model (tiles grouped into fixed-size
//! cells), its mutation and query operations (brush painting, region moves
//! under five merge policies, selection, copy/paste), the derived state that
//! must stay consistent after every mutation (cell activity, the outline
//! overlay), and the coordinate conversions between screen, world, tile, and
//! cell space. All state mutation flows through [`editor::Editor`]; the
//! rendering and DOM layers consume the query surface re-exported here.

pub mod activity;
pub mod clipboard;
pub mod config;
pub mod coords;
pub mod editor;
pub mod error;
pub mod grid;
#[cfg(feature = "serde")]
pub mod io;
pub mod mover;
pub mod outline;
pub mod selection;
pub mod viewport;

pub use activity::CellActivityTracker;
pub use clipboard::CopiedPattern;
pub use config::EditorConfig;
pub use coords::{
    CellCoord, ScreenPoint, TileCoord, TileRect, cell_from_tile, tile_from_screen,
    tile_rect_from_cell,
};
pub use editor::{Editor, EditorMode};
pub use error::ImportError;
pub use grid::{BrushSize, TileGrid, TileValue};
#[cfg(feature = "serde")]
pub use io::LevelDocument;
pub use mover::{CellPatch, MergePolicy, MoveOutcome, move_cells};
pub use outline::{bake_outline, recompute_outline_overlay};
pub use selection::{DragState, Selection};
pub use viewport::Viewport;
