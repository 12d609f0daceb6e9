//! Error types for the level-document boundary.
//!
//! Out-of-bounds coordinates are deliberately *not* represented here: the
//! grid API absorbs them with sentinels and no-ops. The only recoverable
//! failure in the core is a malformed imported document, and import must
//! leave existing state untouched when it fails.

/// Reasons an imported level document was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ImportError {
    #[error("document declares an empty grid ({grid_cols}x{grid_rows} cells of {cell_width}x{cell_height} tiles)")]
    EmptyGrid {
        grid_cols: u32,
        grid_rows: u32,
        cell_width: u32,
        cell_height: u32,
    },

    #[error("tile data has {found} rows, expected {expected}")]
    RowCountMismatch { expected: u32, found: usize },

    #[error("tile row {row} has {found} columns, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: u32,
        found: usize,
    },

    #[error("unknown tile value {value} at ({x}, {y})")]
    InvalidTileValue { x: usize, y: usize, value: i8 },
}
