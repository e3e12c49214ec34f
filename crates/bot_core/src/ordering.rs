//! Heuristic move ordering.
//!
//! Scores moves before search so that likely-best moves are tried first,
//! which is what makes alpha-beta cutoffs bite. Scores are heuristic
//! ranking values in pawn units; they are not evaluations.

use std::cmp::Ordering;

use cozy_chess::{get_pawn_attacks, Color, File, Move, Piece, Rank, Square};

use crate::board::HashBoard;
use crate::eval::{perspective, piece_value, CHECKMATE_SCORE, PAWN_VALUE};
use crate::pst::PST;

/// Score a single move for ordering purposes.
///
/// Precedence: a mate-in-one move short-circuits with an overriding maximal
/// score. Otherwise the score combines the piece-square delta of the moving
/// piece (full weight for pawns, 0.2 otherwise), an MVV-LVA capture bonus,
/// a promotion bonus, and a penalty for landing on a square defended by an
/// enemy pawn. En-passant captures miss the capture bonus; that gap is
/// accepted.
pub fn score_move(board: &mut HashBoard, mv: Move) -> f64 {
    if mates_in_one(board, mv) {
        return 2.0 * CHECKMATE_SCORE;
    }

    let us = board.side_to_move();
    let moved = match board.board().piece_on(mv.from) {
        Some(piece) => piece,
        None => return 0.0,
    };

    // Castling is encoded as king-takes-own-rook; score the king's real
    // destination and ignore the phantom "capture".
    let castling = board.board().colors(us).has(mv.to);
    let dest = if castling {
        let back = match us {
            Color::White => Rank::First,
            Color::Black => Rank::Eighth,
        };
        let file = if mv.to.file() > mv.from.file() {
            File::G
        } else {
            File::C
        };
        Square::new(file, back)
    } else {
        mv.to
    };

    let mut score = 0.0f64;

    let scale = if moved == Piece::Pawn { 1.0 } else { 0.2 };
    score += perspective(us)
        * scale
        * f64::from(PST.read(us, moved, dest) - PST.read(us, moved, mv.from));

    if !castling {
        if let Some(victim) = board.board().piece_on(mv.to) {
            score += f64::from(10 * piece_value(victim) - piece_value(moved));
        }
    }

    if let Some(promotion) = mv.promotion {
        score += f64::from(piece_value(promotion));
    }

    if pawn_attacked(board, us, dest) {
        score -= f64::from(piece_value(moved) - PAWN_VALUE);
    }

    score / f64::from(PAWN_VALUE)
}

/// Legal moves scored and sorted best-first. The sort is stable, so moves
/// with equal scores keep the rules engine's enumeration order. An empty
/// legal-move list yields an empty ordering.
pub fn ordered_moves(board: &mut HashBoard) -> Vec<(Move, f64)> {
    let mut scored: Vec<(Move, f64)> = board
        .legal_moves()
        .into_iter()
        .map(|mv| (mv, 0.0))
        .collect();
    for entry in &mut scored {
        entry.1 = score_move(board, entry.0);
    }
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    scored
}

fn mates_in_one(board: &mut HashBoard, mv: Move) -> bool {
    let scope = board.scoped(mv);
    scope.is_checkmate()
}

/// Whether `sq` is attacked by an enemy pawn. A friendly pawn on `sq`
/// would attack exactly the squares enemy pawns attack it from.
fn pawn_attacked(board: &HashBoard, us: Color, sq: Square) -> bool {
    let enemy_pawns = board.board().colored_pieces(!us, Piece::Pawn);
    !(get_pawn_attacks(sq, us) & enemy_pawns).is_empty()
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
