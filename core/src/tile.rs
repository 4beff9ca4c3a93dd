use serde::{Deserialize, Serialize};

/// Player-visible state of a single board cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Hidden,
    Flagged,
    /// Revealed with no adjacent mines.
    Blank,
    /// Revealed with `1..=8` adjacent mines.
    Count(u8),
}

impl Cell {
    /// Revealed state for a cell with `adjacent_mines` mines around it.
    pub const fn revealed(adjacent_mines: u8) -> Self {
        match adjacent_mines {
            0 => Self::Blank,
            count => Self::Count(count),
        }
    }

    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    pub const fn is_revealed(self) -> bool {
        !self.is_unrevealed()
    }

    /// Adjacent mine count of a revealed cell.
    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Blank => Some(0),
            Self::Count(count) => Some(count),
            Self::Hidden | Self::Flagged => None,
        }
    }
}
