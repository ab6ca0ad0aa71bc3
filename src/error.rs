use thiserror::Error;

use crate::types::Side;

/// Errors raised while parsing or restoring a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("expected 8 rows, got {0}")]
    RowCount(usize),

    #[error("row {row} has {len} cells, expected 8")]
    RowLength { row: usize, len: usize },

    #[error("unexpected character {ch:?} at row {row}, col {col}")]
    InvalidCell { row: usize, col: usize, ch: char },

    #[error("expected 64 cells, got {0}")]
    CellCount(usize),

    #[error(
        "counter mismatch: stored {stored_black}/{stored_white}, grid has {black}/{white}"
    )]
    CounterMismatch {
        stored_black: u8,
        stored_white: u8,
        black: u8,
        white: u8,
    },
}

/// Errors raised by the game driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no game is in progress")]
    NoActiveGame,

    #[error("game is already over")]
    GameOver,

    #[error("it is not a human turn ({0} is computer-controlled)")]
    NotHumanTurn(Side),

    #[error("it is not a computer turn ({0} is human-controlled)")]
    NotComputerTurn(Side),

    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },

    #[error("illegal move for {side} at ({row}, {col})")]
    IllegalMove { row: u8, col: u8, side: Side },

    #[error("{0} has no legal moves")]
    NoLegalMove(Side),

    #[error("{0} cannot pass while a legal move exists")]
    PassNotAllowed(Side),

    #[error("computer could not select a move")]
    SelectorFailed,

    #[error("invalid game configuration: {0}")]
    Config(String),
}
