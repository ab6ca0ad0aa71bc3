use log::{info, warn};
use serde::Serialize;

use crate::ai::{PositionalEvaluator, Searcher};
use crate::board::{Board, in_range};
use crate::config::{GameConfig, PlayerKind};
use crate::error::GameError;
use crate::types::{GameResult, GameState, Outcome, Position, Side};

pub trait MoveSelector: Send + Sync {
    fn select_move(&self, board: &Board, side: Side, depth: u8) -> Option<Position>;
}

/// Alpha-beta search over the positional evaluator.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphaBetaSelector;

impl MoveSelector for AlphaBetaSelector {
    fn select_move(&self, board: &Board, side: Side, depth: u8) -> Option<Position> {
        let mut scratch = *board;
        Searcher::new(&PositionalEvaluator)
            .best_move(&mut scratch, side, depth)
            .best
    }
}

/// What a single [`GameInstance::advance`] step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Turn {
    Finished { outcome: Outcome },
    Passed { side: Side },
    Moved { side: Side, position: Position },
    AwaitingHuman { side: Side },
}

pub struct GameInstance {
    board: Board,
    pub current_player: Side,
    pub config: GameConfig,
    pub is_game_over: bool,
    pub is_pass: bool,
    pub flipped: Vec<u8>,
    pub last_move: Option<Position>,
    selector: Box<dyn MoveSelector>,
}

impl GameInstance {
    pub fn new(config: GameConfig, selector: Box<dyn MoveSelector>) -> Self {
        Self {
            board: Board::new(),
            current_player: Side::Black,
            config,
            is_game_over: false,
            is_pass: false,
            flipped: Vec::new(),
            last_move: None,
            selector,
        }
    }

    pub fn new_with_default_selector(config: GameConfig) -> Self {
        Self::new(config, Box::new(AlphaBetaSelector))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.board.classify()
    }

    /// Whether the side to move may play at `pos`.
    pub fn is_legal(&self, pos: Position) -> bool {
        self.board
            .is_legal(pos.col as usize, pos.row as usize, self.current_player)
    }

    /// Human move for the side to move.
    pub fn place(&mut self, row: u8, col: u8) -> Result<(), GameError> {
        self.ensure_running()?;
        let side = self.current_player;
        if self.config.player(side) != PlayerKind::Human {
            return Err(GameError::NotHumanTurn(side));
        }

        let pos = checked_position(row, col)?;
        if !self.is_legal(pos) {
            warn!("({row}, {col}) is not a valid move for {side}");
            return Err(GameError::IllegalMove { row, col, side });
        }

        self.apply_move(pos);
        Ok(())
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        self.board.has_legal_move(self.current_player)
    }

    /// Skips the turn of a side that has no legal move.
    pub fn pass(&mut self) -> Result<(), GameError> {
        self.ensure_running()?;
        let side = self.current_player;
        if self.board.has_legal_move(side) {
            return Err(GameError::PassNotAllowed(side));
        }

        info!("{side} has no valid moves, {} to play", side.opponent());
        self.is_pass = true;
        self.flipped.clear();
        self.last_move = None;
        self.current_player = side.opponent();
        self.refresh_outcome();
        Ok(())
    }

    pub fn do_ai_move(&mut self) -> Result<Position, GameError> {
        self.ensure_running()?;
        let side = self.current_player;
        if self.config.player(side) != PlayerKind::Computer {
            return Err(GameError::NotComputerTurn(side));
        }
        if !self.board.has_legal_move(side) {
            return Err(GameError::NoLegalMove(side));
        }

        let selected = self
            .selector
            .select_move(&self.board, side, self.config.thinking_depth())
            .ok_or(GameError::SelectorFailed)?;

        let Position { row, col } = checked_position(selected.row, selected.col)?;
        if !self.is_legal(selected) {
            return Err(GameError::IllegalMove { row, col, side });
        }

        self.apply_move(selected);
        Ok(selected)
    }

    /// Runs one step of the turn loop: reports a finished game, passes a
    /// blocked side, or plays for the computer. Human turns are left to
    /// [`place`](Self::place).
    pub fn advance(&mut self) -> Result<Turn, GameError> {
        let side = self.current_player;
        if self.is_game_over {
            return Ok(Turn::Finished {
                outcome: self.outcome(),
            });
        }
        if !self.board.has_legal_move(side) {
            self.pass()?;
            return Ok(Turn::Passed { side });
        }

        match self.config.player(side) {
            PlayerKind::Computer => {
                let position = self.do_ai_move()?;
                Ok(Turn::Moved { side, position })
            }
            PlayerKind::Human => Ok(Turn::AwaitingHuman { side }),
        }
    }

    pub fn get_legal_moves(&self) -> Vec<Position> {
        self.board.legal_moves(self.current_player)
    }

    pub fn to_game_state(&self) -> GameState {
        let (black_count, white_count) = self.board.counts();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            black_count,
            white_count,
            is_game_over: self.is_game_over,
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
            last_move: self.last_move,
        }
    }

    /// `winner` is only set once the board is terminal.
    pub fn to_game_result(&self) -> GameResult {
        let (black_count, white_count) = self.board.counts();
        GameResult {
            winner: match self.outcome() {
                Outcome::Win(side) => Some(side),
                Outcome::Draw | Outcome::InProgress => None,
            },
            black_count,
            white_count,
        }
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.is_game_over {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn apply_move(&mut self, pos: Position) {
        let side = self.current_player;
        let flips = self
            .board
            .apply_move(pos.col as usize, pos.row as usize, side);

        info!(
            "{side} plays ({}, {}), flipping {}",
            pos.row,
            pos.col,
            flips.count_ones()
        );
        self.is_pass = false;
        self.flipped = bitmask_to_indices(flips);
        self.last_move = Some(pos);
        self.current_player = side.opponent();
        self.refresh_outcome();
    }

    fn refresh_outcome(&mut self) {
        let outcome = self.board.classify();
        if outcome.is_terminal() {
            let (black, white) = self.board.counts();
            info!("game over: {outcome:?} ({black}-{white})");
            self.is_game_over = true;
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Side) {
        self.board = board;
        self.current_player = current_player;
        self.is_game_over = false;
        self.is_pass = false;
        self.flipped.clear();
        self.last_move = None;
    }
}

fn checked_position(row: u8, col: u8) -> Result<Position, GameError> {
    if !in_range(col as usize, row as usize) {
        return Err(GameError::OutOfRange { row, col });
    }
    Ok(Position::new(row, col))
}

fn bitmask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::with_capacity(mask.count_ones() as usize);

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        out.push(idx);
        bits &= bits - 1;
    }

    out
}
