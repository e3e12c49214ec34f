//! Static position evaluation.
//!
//! Scores are white-relative pawn advantages: positive favors white,
//! negative favors black. Search code converts to the mover's perspective
//! with [`perspective`] and converts back only when reporting.

use cozy_chess::{Board, Color, Piece};

use crate::pst::PST;

/// Sentinel magnitude for checkmate, in pawn units. Large but finite so
/// it survives arithmetic that true infinity would poison.
pub const CHECKMATE_SCORE: f64 = 1_000_000.0;

/// Material value of a pawn in centipawns; also the divisor that converts
/// centipawn totals to pawn units.
pub const PAWN_VALUE: i32 = 100;

/// Returns the material value of a piece in centipawns.
#[inline]
pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => PAWN_VALUE,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 0,
    }
}

/// Sign that converts a white-relative score to the given mover's
/// perspective (and back).
#[inline]
pub fn perspective(color: Color) -> f64 {
    match color {
        Color::White => 1.0,
        Color::Black => -1.0,
    }
}

/// Evaluates the position in white-relative pawn units.
///
/// Checkmate returns the mate sentinel signed against the side to move;
/// stalemate returns exactly 0 regardless of material. Otherwise the score
/// is material plus piece-square bonuses. Fifty-move and repetition rules
/// are not considered here.
pub fn evaluate(board: &Board) -> f64 {
    let mut any_moves = false;
    board.generate_moves(|_| {
        any_moves = true;
        true
    });
    if !any_moves {
        if !board.checkers().is_empty() {
            // The side to move is mated; the other side won.
            return match board.side_to_move() {
                Color::Black => CHECKMATE_SCORE,
                Color::White => -CHECKMATE_SCORE,
            };
        }
        return 0.0;
    }

    f64::from(material_score(board) + piece_position_score(board)) / f64::from(PAWN_VALUE)
}

/// Material balance in centipawns, white minus black.
pub fn material_score(board: &Board) -> i32 {
    let mut score = 0i32;
    for piece in Piece::ALL {
        let value = piece_value(piece);
        score += value * board.colored_pieces(Color::White, piece).len() as i32;
        score -= value * board.colored_pieces(Color::Black, piece).len() as i32;
    }
    score
}

/// Piece-square bonuses in centipawns. Black entries are pre-negated in
/// the tables, so plain summation yields a white-relative total.
fn piece_position_score(board: &Board) -> i32 {
    let mut score = 0i32;
    for color in Color::ALL {
        for piece in Piece::ALL {
            for sq in board.colored_pieces(color, piece) {
                score += PST.read(color, piece, sq);
            }
        }
    }
    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
