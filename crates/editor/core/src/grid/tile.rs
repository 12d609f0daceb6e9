/// Canonical tile states.
///
/// Values are opaque to the core; the view layer decides what they look like.
/// The raw `i8` forms are fixed by the persisted level-document shape.
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
pub enum TileValue {
    /// Unset tile (-1). The default everywhere; also the out-of-bounds sentinel.
    #[default]
    Transparent,
    /// Open / empty interior (0).
    Open,
    /// Filled / solid (1).
    Filled,
    /// Special connection marker (2). Rare, kept for legacy documents.
    Connection,
}

impl TileValue {
    /// Parses the raw document value. Unknown values are rejected, not mapped.
    pub const fn from_raw(raw: i8) -> Option<Self> {
        match raw {
            -1 => Some(Self::Transparent),
            0 => Some(Self::Open),
            1 => Some(Self::Filled),
            2 => Some(Self::Connection),
            _ => None,
        }
    }

    pub const fn as_raw(self) -> i8 {
        match self {
            Self::Transparent => -1,
            Self::Open => 0,
            Self::Filled => 1,
            Self::Connection => 2,
        }
    }

    /// True for any tile that marks its cell active.
    #[inline]
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::Transparent)
    }
}
