use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Too many flags")]
    FlagLimitExceeded,
    #[error("That position is flagged")]
    PositionFlagged,
    #[error("Mines have not been placed yet")]
    NotGenerated,
}

pub type Result<T> = core::result::Result<T, GameError>;
