use std::fmt;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// One of the two competing sides.
///
/// The discriminants are the algebraic pair `+1 / -1`, so the opponent of a
/// side is its negation and sign-weighted scoring falls out of [`Side::sign`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i8)]
pub enum Side {
    Black = 1,
    White = -1,
}

impl Side {
    pub const fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    pub const fn sign(self) -> i32 {
        self as i8 as i32
    }
}

impl Neg for Side {
    type Output = Side;

    fn neg(self) -> Self::Output {
        self.opponent()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Black => f.write_str("Black"),
            Self::White => f.write_str("White"),
        }
    }
}

/// Content of a single board cell. Shares the `+1 / -1` encoding of [`Side`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Black = 1,
    White = -1,
}

impl Cell {
    pub const fn value(self) -> i32 {
        self as i8 as i32
    }

    pub const fn side(self) -> Option<Side> {
        match self {
            Self::Empty => None,
            Self::Black => Some(Side::Black),
            Self::White => Some(Side::White),
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Black => Self::Black,
            Side::White => Self::White,
        }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Inverse of the row-major square index `row * 8 + col`.
    pub const fn from_index(index: usize) -> Self {
        Self {
            row: (index / BOARD_SIZE) as u8,
            col: (index % BOARD_SIZE) as u8,
        }
    }
}

/// Classification of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    InProgress,
    Win(Side),
    Draw,
}

impl Outcome {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: Side,
    pub black_count: u8,
    pub white_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped positions (0..=63).
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
    pub last_move: Option<Position>,
}

/// Final result after game over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    /// `None` on a draw.
    pub winner: Option<Side>,
    pub black_count: u8,
    pub white_count: u8,
}
