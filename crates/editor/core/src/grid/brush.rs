//! Fixed brush shapes.
//!
//! Each brush size maps to a literal offset table around the stroke center.
//! The shapes are a deliberate design constraint carried over from the
//! original editor, not an approximation of a circular brush; do not replace
//! them with a generated disc.

/// Brush sizes 1 through 5.
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
pub enum BrushSize {
    /// Single tile.
    #[default]
    S1,
    /// Plus / cross, 5 tiles.
    S2,
    /// 3×3 square, 9 tiles.
    S3,
    /// 3×3 square plus four far-axis extensions, 13 tiles.
    S4,
    /// 5×5 square, 25 tiles.
    S5,
}

const OFFSETS_1: [(i32, i32); 1] = [(0, 0)];

const OFFSETS_2: [(i32, i32); 5] = [(0, 0), (-1, 0), (1, 0), (0, -1), (0, 1)];

#[rustfmt::skip]
const OFFSETS_3: [(i32, i32); 9] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0), (0,  0), (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

#[rustfmt::skip]
const OFFSETS_4: [(i32, i32); 13] = [
              (0, -2),
    (-1, -1), (0, -1), (1, -1),
    (-2,  0), (-1, 0), (0, 0), (1, 0), (2, 0),
    (-1,  1), (0,  1), (1,  1),
              (0,  2),
];

#[rustfmt::skip]
const OFFSETS_5: [(i32, i32); 25] = [
    (-2, -2), (-1, -2), (0, -2), (1, -2), (2, -2),
    (-2, -1), (-1, -1), (0, -1), (1, -1), (2, -1),
    (-2,  0), (-1,  0), (0,  0), (1,  0), (2,  0),
    (-2,  1), (-1,  1), (0,  1), (1,  1), (2,  1),
    (-2,  2), (-1,  2), (0,  2), (1,  2), (2,  2),
];

impl BrushSize {
    /// Parses the 1-based size the UI exposes.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::S1),
            2 => Some(Self::S2),
            3 => Some(Self::S3),
            4 => Some(Self::S4),
            5 => Some(Self::S5),
            _ => None,
        }
    }

    pub const fn index(self) -> u8 {
        match self {
            Self::S1 => 1,
            Self::S2 => 2,
            Self::S3 => 3,
            Self::S4 => 4,
            Self::S5 => 5,
        }
    }

    /// Tile offsets written by a stroke, relative to the center tile.
    pub const fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::S1 => &OFFSETS_1,
            Self::S2 => &OFFSETS_2,
            Self::S3 => &OFFSETS_3,
            Self::S4 => &OFFSETS_4,
            Self::S5 => &OFFSETS_5,
        }
    }
}
