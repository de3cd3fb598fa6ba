use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    InvalidSize,
    #[error("Too many mines")]
    TooManyMines,
    #[error("Mine placed twice on the same cell")]
    DuplicateMine,
}

pub type Result<T> = core::result::Result<T, GameError>;
