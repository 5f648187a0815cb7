use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid slot index")]
    InvalidSlot,
    #[error("Slot is already occupied")]
    SlotOccupied,
    #[error("Tile is not in the available pool")]
    TileNotFound,
    #[error("Slot is already empty")]
    EmptySlotRemoval,
    #[error("No round in progress, no moves are accepted")]
    RoundNotActive,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Expected 6 hex digits, got {0} characters")]
    InvalidLength(usize),
    #[error("Invalid hex digit")]
    InvalidDigit,
}
