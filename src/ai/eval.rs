use crate::board::Board;
use crate::types::{BOARD_SIZE, Cell, Side};

/// Static evaluation used at the search horizon.
pub trait Evaluator {
    /// Score of `board` from `side`'s viewpoint. Only compared relatively.
    fn evaluate(&self, board: &Board, side: Side) -> i32;
}

const BASE_WEIGHTS: [[i32; BOARD_SIZE]; BOARD_SIZE] = [
    [5, 2, 2, 2, 2, 2, 2, 5],
    [2, -1, -1, -1, -1, -1, -1, 2],
    [2, -1, 1, 1, 1, 1, -1, 2],
    [2, -1, 1, 1, 1, 1, -1, 2],
    [2, -1, 1, 1, 1, 1, -1, 2],
    [2, -1, 1, 1, 1, 1, -1, 2],
    [2, -1, -1, -1, -1, -1, -1, 2],
    [5, 2, 2, 2, 2, 2, 2, 5],
];

/// Each corner with the three cells touching it, as `(col, row)`.
const CORNER_ZONES: [((usize, usize), [(usize, usize); 3]); 4] = [
    ((0, 0), [(1, 1), (1, 0), (0, 1)]),
    ((7, 0), [(6, 1), (7, 1), (6, 0)]),
    ((0, 7), [(1, 6), (0, 6), (1, 7)]),
    ((7, 7), [(6, 6), (7, 6), (6, 7)]),
];

/// Weight of a corner-adjacent cell once its corner is held.
const ANCHORED_WEIGHT: i32 = 2;
/// Weight of a corner-adjacent cell while its corner is not held.
const EXPOSED_WEIGHT: i32 = -1;

/// Positional heuristic: corners and edges are worth more than the centre,
/// and cells next to a corner are a liability until that corner is taken.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalEvaluator;

impl PositionalEvaluator {
    fn weights_for(board: &Board, side: Side) -> [[i32; BOARD_SIZE]; BOARD_SIZE] {
        let mut weights = BASE_WEIGHTS;
        for ((corner_col, corner_row), touching) in CORNER_ZONES {
            let weight = if board.cell(corner_col, corner_row) == Cell::from(side) {
                ANCHORED_WEIGHT
            } else {
                EXPOSED_WEIGHT
            };
            for (col, row) in touching {
                weights[row][col] = weight;
            }
        }
        weights
    }
}

impl Evaluator for PositionalEvaluator {
    fn evaluate(&self, board: &Board, side: Side) -> i32 {
        let weights = Self::weights_for(board, side);
        let mut score = 0;
        for (row, row_weights) in weights.iter().enumerate() {
            for (col, weight) in row_weights.iter().enumerate() {
                // +1 for own pegs, -1 for the opponent's, 0 when empty.
                score += board.cell(col, row).value() * side.sign() * weight;
            }
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(diagram: &str) -> Board {
        diagram.parse().expect("test diagram must parse")
    }

    #[test]
    fn initial_position_is_balanced() {
        let board = Board::new();

        assert_eq!(PositionalEvaluator.evaluate(&board, Side::Black), 0);
        assert_eq!(PositionalEvaluator.evaluate(&board, Side::White), 0);
    }

    #[test]
    fn corners_and_edges_outweigh_centre() {
        let board = board(
            "
            B..W....
            ........
            ........
            ...WW...
            ........
            ........
            ........
            ........
            ",
        );

        // 5 for the corner against 2 (edge) + 1 + 1 (centre).
        assert_eq!(PositionalEvaluator.evaluate(&board, Side::Black), 1);
        assert_eq!(PositionalEvaluator.evaluate(&board, Side::White), -1);
    }

    #[test]
    fn corner_neighbours_are_reweighted_by_corner_owner() {
        let board = board(
            "
            BB......
            ........
            ........
            ........
            ........
            ........
            ........
            .......W
            ",
        );

        // Black holds (0,0), so (1,0) is anchored: 5 + 2 - 5.
        assert_eq!(PositionalEvaluator.evaluate(&board, Side::Black), 2);
        // White does not hold (0,0), so (1,0) stays exposed: 5 - 5 - (-1).
        assert_eq!(PositionalEvaluator.evaluate(&board, Side::White), 1);
    }

    #[test]
    fn unanchored_corner_neighbour_is_a_liability() {
        let board = board(
            "
            ........
            .B......
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );

        assert_eq!(PositionalEvaluator.evaluate(&board, Side::Black), -1);
        assert_eq!(PositionalEvaluator.evaluate(&board, Side::White), 1);
    }
}
