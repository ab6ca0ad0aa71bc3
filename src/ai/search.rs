use log::debug;
use serde::Serialize;
use web_time::Instant;

use crate::ai::eval::Evaluator;
use crate::board::Board;
use crate::types::{BOARD_SIZE, Outcome, Position, Side};

/// Score of a won (or lost, negated) position. Larger than any evaluation.
pub const INF: i32 = 2_000_000_000;

/// Outcome of a search: the chosen move, if any, and its value from the
/// perspective the search was run for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub best: Option<Position>,
    pub value: i32,
}

impl SearchResult {
    fn leaf(value: i32) -> Self {
        Self { best: None, value }
    }
}

/// Counters collected during one top-level search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Interior nodes expanded.
    pub nodes: u64,
    pub cutoffs: u64,
}

/// Depth-limited alpha-beta minimax.
///
/// The searcher works on the caller's board in place: every speculative move
/// is undone before control returns, so the board handed back is identical to
/// the one passed in.
pub struct Searcher<'a, E: Evaluator> {
    evaluator: &'a E,
    stats: SearchStats,
}

impl<'a, E: Evaluator> Searcher<'a, E> {
    pub fn new(evaluator: &'a E) -> Self {
        Self {
            evaluator,
            stats: SearchStats::default(),
        }
    }

    /// Searches the best move for `side` looking `depth` plies ahead.
    pub fn best_move(&mut self, board: &mut Board, side: Side, depth: u8) -> SearchResult {
        self.stats = SearchStats::default();
        let start = Instant::now();

        let result = self.search(board, side, depth, -INF, INF, side);

        debug!(
            "{side} depth {depth}: {:?} value {} ({} states, {} cutoffs, {:?})",
            result.best,
            result.value,
            self.stats.nodes,
            self.stats.cutoffs,
            start.elapsed()
        );
        result
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// One node of the search tree.
    ///
    /// `perspective` is fixed for the whole tree: nodes where it is to move
    /// raise `alpha`, the others lower `beta`. Moves are scanned row-major and
    /// the first legal one is the default choice, so ties go to the earliest
    /// cell.
    pub fn search(
        &mut self,
        board: &mut Board,
        side_to_move: Side,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        perspective: Side,
    ) -> SearchResult {
        match board.classify() {
            Outcome::InProgress => {}
            Outcome::Draw => return SearchResult::leaf(0),
            Outcome::Win(winner) if winner == perspective => return SearchResult::leaf(INF),
            Outcome::Win(_) => return SearchResult::leaf(-INF),
        }

        if depth == 0 {
            return SearchResult::leaf(self.evaluator.evaluate(board, perspective));
        }

        self.stats.nodes += 1;
        let maximizing = side_to_move == perspective;
        let mut best = None;
        let mut moved = false;

        'scan: for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if !board.is_legal(col, row, side_to_move) {
                    continue;
                }
                let pos = Position::new(row as u8, col as u8);
                moved = true;
                if best.is_none() {
                    best = Some(pos);
                }

                let snapshot = board.snapshot();
                board.apply_move(col, row, side_to_move);
                let child = self.search(
                    board,
                    side_to_move.opponent(),
                    depth - 1,
                    alpha,
                    beta,
                    perspective,
                );
                board.restore(&snapshot);

                if maximizing {
                    if child.value > alpha {
                        alpha = child.value;
                        best = Some(pos);
                    }
                } else if child.value < beta {
                    beta = child.value;
                }

                if beta <= alpha {
                    self.stats.cutoffs += 1;
                    break 'scan;
                }
            }
        }

        if !moved {
            // Forced pass: the opponent moves next, and the pass is never
            // reported as the chosen move.
            let child = self.search(
                board,
                side_to_move.opponent(),
                depth - 1,
                alpha,
                beta,
                perspective,
            );
            if maximizing {
                alpha = alpha.max(child.value);
            } else {
                beta = beta.min(child.value);
            }
        }

        SearchResult {
            best,
            value: if maximizing { alpha } else { beta },
        }
    }
}
