use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::types::{BOARD_SIZE, Cell, NUM_SQUARES, Outcome, Position, Side};

/// Compass offsets as `(d_col, d_row)`.
const DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns true iff both coordinates are in `0..8`.
pub fn in_range(col: usize, row: usize) -> bool {
    col < BOARD_SIZE && row < BOARD_SIZE
}

/// Reversi board: an 8x8 grid plus peg counters kept in step with every
/// mutation.
///
/// Cells are stored row-major and addressed as `(col, row)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardRecord", into = "BoardRecord")]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    black_count: u8,
    white_count: u8,
}

/// Saved copy of a [`Board`], restored with [`Board::restore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot(Board);

impl Board {
    /// Creates the initial board:
    /// d4=white, e4=black, d5=black, e5=white.
    pub fn new() -> Self {
        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        cells[3][3] = Cell::White;
        cells[3][4] = Cell::Black;
        cells[4][3] = Cell::Black;
        cells[4][4] = Cell::White;
        Self {
            cells,
            black_count: 2,
            white_count: 2,
        }
    }

    /// Builds a board from a row-major grid, deriving the counters by scan.
    pub fn from_cells(cells: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        let mut board = Self {
            cells,
            black_count: 0,
            white_count: 0,
        };
        (board.black_count, board.white_count) = board.recount();
        board
    }

    pub fn cell(&self, col: usize, row: usize) -> Cell {
        self.cells[row][col]
    }

    /// Returns `(black_count, white_count)`.
    pub fn counts(&self) -> (u8, u8) {
        (self.black_count, self.white_count)
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.black_count - self.white_count
    }

    /// Counts pegs by scanning the grid, ignoring the stored counters.
    pub fn recount(&self) -> (u8, u8) {
        self.cells
            .iter()
            .flatten()
            .fold((0, 0), |(black, white), cell| match cell {
                Cell::Black => (black + 1, white),
                Cell::White => (black, white + 1),
                Cell::Empty => (black, white),
            })
    }

    /// A move is legal when the cell is empty and at least one direction
    /// holds an unbroken run of opponent pegs capped by one of `side`'s.
    ///
    /// Takes `(col, row)`; the driver's [`Position`] is `(row, col)`.
    pub fn is_legal(&self, col: usize, row: usize, side: Side) -> bool {
        if !in_range(col, row) || !self.cells[row][col].is_empty() {
            return false;
        }
        DIRECTIONS
            .iter()
            .any(|&dir| self.flip_run(col, row, dir, side) > 0)
    }

    /// Returns whether `side` can place anywhere.
    pub fn has_legal_move(&self, side: Side) -> bool {
        // A side without pegs can never bracket, and a full board has no
        // empty cell.
        if self.black_count == 0
            || self.white_count == 0
            || self.empty_count() == 0
        {
            return false;
        }
        (0..BOARD_SIZE).any(|row| (0..BOARD_SIZE).any(|col| self.is_legal(col, row, side)))
    }

    /// Legal cells for `side` in row-major order.
    pub fn legal_moves(&self, side: Side) -> Vec<Position> {
        let mut moves = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if self.is_legal(col, row, side) {
                    moves.push(Position::new(row as u8, col as u8));
                }
            }
        }
        moves
    }

    /// Places one peg and flips every bracketed run.
    /// Returns the flipped cells as a bit mask (bit `row * 8 + col`).
    ///
    /// The move must be legal.
    pub fn apply_move(&mut self, col: usize, row: usize, side: Side) -> u64 {
        debug_assert!(
            self.is_legal(col, row, side),
            "apply_move({col}, {row}, {side}) on an illegal cell"
        );

        self.cells[row][col] = Cell::from(side);
        *self.counter_mut(side) += 1;

        let mut flipped = 0u64;
        for dir in DIRECTIONS {
            let run = self.flip_run(col, row, dir, side);
            let (mut c, mut r) = (col, row);
            for _ in 0..run {
                let Some(next) = step(c, r, dir) else {
                    break;
                };
                (c, r) = next;
                self.cells[r][c] = Cell::from(side);
                flipped |= 1u64 << (r * BOARD_SIZE + c);
            }

            let run = run as u8;
            *self.counter_mut(side) += run;
            *self.counter_mut(side.opponent()) -= run;
        }

        flipped
    }

    /// Terminal when neither side can move; the larger peg count wins.
    pub fn classify(&self) -> Outcome {
        if self.has_legal_move(Side::Black) || self.has_legal_move(Side::White) {
            return Outcome::InProgress;
        }
        match self.black_count.cmp(&self.white_count) {
            Ordering::Greater => Outcome::Win(Side::Black),
            Ordering::Less => Outcome::Win(Side::White),
            Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot(*self)
    }

    pub fn restore(&mut self, snapshot: &Snapshot) {
        *self = snapshot.0;
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=black, 2=white.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            let Position { row, col } = Position::from_index(pos);
            *cell = match self.cells[row as usize][col as usize] {
                Cell::Empty => 0,
                Cell::Black => 1,
                Cell::White => 2,
            };
        }
        board
    }

    /// Number of opponent pegs `side` would flip walking from `(col, row)`
    /// along `dir`. Zero unless the run ends on a `side` peg.
    fn flip_run(&self, col: usize, row: usize, dir: (isize, isize), side: Side) -> usize {
        let mut run = 0;
        let (mut c, mut r) = (col, row);
        while let Some((nc, nr)) = step(c, r, dir) {
            match self.cells[nr][nc].side() {
                None => return 0,
                Some(owner) if owner == side => return run,
                Some(_) => run += 1,
            }
            (c, r) = (nc, nr);
        }
        0
    }

    fn counter_mut(&mut self, side: Side) -> &mut u8 {
        match side {
            Side::Black => &mut self.black_count,
            Side::White => &mut self.white_count,
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.cells.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Black => 'B',
                    Cell::White => 'W',
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Parses 8 lines of `.`, `B`/`X` (black) and `W`/`O` (white).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if lines.len() != BOARD_SIZE {
            return Err(BoardError::RowCount(lines.len()));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
            if chars.len() != BOARD_SIZE {
                return Err(BoardError::RowLength {
                    row,
                    len: chars.len(),
                });
            }
            for (col, &ch) in chars.iter().enumerate() {
                cells[row][col] = match ch {
                    '.' => Cell::Empty,
                    'B' | 'X' => Cell::Black,
                    'W' | 'O' => Cell::White,
                    _ => return Err(BoardError::InvalidCell { row, col, ch }),
                };
            }
        }

        Ok(Self::from_cells(cells))
    }
}

/// Persisted form: 64 row-major cells plus both counters.
#[derive(Serialize, Deserialize)]
struct BoardRecord {
    cells: Vec<Cell>,
    black_count: u8,
    white_count: u8,
}

impl From<Board> for BoardRecord {
    fn from(board: Board) -> Self {
        Self {
            cells: board.cells.iter().flatten().copied().collect(),
            black_count: board.black_count,
            white_count: board.white_count,
        }
    }
}

impl TryFrom<BoardRecord> for Board {
    type Error = BoardError;

    fn try_from(record: BoardRecord) -> Result<Self, Self::Error> {
        if record.cells.len() != NUM_SQUARES {
            return Err(BoardError::CellCount(record.cells.len()));
        }

        let mut cells = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (idx, cell) in record.cells.into_iter().enumerate() {
            cells[idx / BOARD_SIZE][idx % BOARD_SIZE] = cell;
        }

        let board = Self::from_cells(cells);
        if board.counts() != (record.black_count, record.white_count) {
            return Err(BoardError::CounterMismatch {
                stored_black: record.black_count,
                stored_white: record.white_count,
                black: board.black_count,
                white: board.white_count,
            });
        }
        Ok(board)
    }
}

fn step(col: usize, row: usize, (d_col, d_row): (isize, isize)) -> Option<(usize, usize)> {
    let col = col.checked_add_signed(d_col)?;
    let row = row.checked_add_signed(d_row)?;
    in_range(col, row).then_some((col, row))
}
