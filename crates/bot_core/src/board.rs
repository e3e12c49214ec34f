//! Position wrapper with an incrementally maintained Zobrist key.
//!
//! `cozy_chess::Board` owns the rules (move generation, check detection,
//! castling and en-passant bookkeeping); `HashBoard` layers the search
//! contract on top: push/pop with exact undo, a Zobrist key kept in sync
//! with O(1) work per move, and a ply counter. The search strategies mutate
//! exactly one `HashBoard` in place; `MoveScope` guarantees that every push
//! is popped on every exit path, including early returns and `?`.

use std::ops::{Deref, DerefMut};

use cozy_chess::{Board, Color, Move, Piece, Rank, Square};

use crate::zobrist::ZOBRIST;

/// Terminal result of a position, from the rules engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    /// Stalemate or fifty-move draw.
    Draw,
}

/// Castling rights packed into a 4-bit mask.
/// Bit 0 = white short, bit 1 = white long, bit 2 = black short,
/// bit 3 = black long.
pub fn castle_mask(board: &Board) -> usize {
    let white = board.castle_rights(Color::White);
    let black = board.castle_rights(Color::Black);
    let mut mask = 0;
    if white.short.is_some() {
        mask |= 1;
    }
    if white.long.is_some() {
        mask |= 1 << 1;
    }
    if black.short.is_some() {
        mask |= 1 << 2;
    }
    if black.long.is_some() {
        mask |= 1 << 3;
    }
    mask
}

/// The en-passant target square, but only if the side to move has a legal
/// en-passant capture onto it.
///
/// The board tracks the file after any double push; hashing it
/// unconditionally would split transpositions that are rules-equivalent.
/// Only diagonal pawn moves can reach the target square (the square in
/// front of it is blocked by the double-pushed pawn), so any pawn move onto
/// it is an en-passant capture.
pub fn legal_en_passant_square(board: &Board) -> Option<Square> {
    let file = board.en_passant()?;
    let rank = match board.side_to_move() {
        Color::White => Rank::Sixth,
        Color::Black => Rank::Third,
    };
    let target = Square::new(file, rank);
    let mut reachable = false;
    board.generate_moves(|moves| {
        if moves.piece == Piece::Pawn && moves.to.has(target) {
            reachable = true;
        }
        reachable
    });
    reachable.then_some(target)
}

/// A board plus its Zobrist key and an undo stack.
#[derive(Debug, Clone)]
pub struct HashBoard {
    board: Board,
    key: u64,
    ply: u32,
    undo: Vec<(Board, u64)>,
}

impl HashBoard {
    pub fn new(board: Board) -> Self {
        let key = ZOBRIST.compute(&board);
        let ply = 2 * (u32::from(board.fullmove_number()) - 1)
            + u32::from(board.side_to_move() == Color::Black);
        Self {
            board,
            key,
            ply,
            undo: Vec::with_capacity(64),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current Zobrist key, maintained incrementally across push/pop.
    #[inline]
    pub fn key(&self) -> u64 {
        self.key
    }

    /// Half-moves played since the start of the game.
    #[inline]
    pub fn ply(&self) -> u32 {
        self.ply
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    /// Legal moves in the rules engine's enumeration order.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.board.generate_moves(|piece_moves| {
            moves.extend(piece_moves);
            false
        });
        moves
    }

    /// Terminal outcome, if any. Checkmate takes precedence over the
    /// fifty-move rule on the same move.
    pub fn outcome(&self) -> Option<Outcome> {
        let mut any_moves = false;
        self.board.generate_moves(|_| {
            any_moves = true;
            true
        });
        if !any_moves {
            if !self.board.checkers().is_empty() {
                return Some(Outcome::Checkmate {
                    winner: !self.board.side_to_move(),
                });
            }
            return Some(Outcome::Draw);
        }
        if self.board.halfmove_clock() >= 100 {
            return Some(Outcome::Draw);
        }
        None
    }

    pub fn is_checkmate(&self) -> bool {
        matches!(self.outcome(), Some(Outcome::Checkmate { .. }))
    }

    /// Play a legal move, updating the Zobrist key incrementally.
    pub fn push(&mut self, mv: Move) {
        self.undo.push((self.board.clone(), self.key));

        let us = self.board.side_to_move();
        let them = !us;

        // XOR out the state-dependent contributions of the old position.
        self.key ^= ZOBRIST.turn_key();
        self.key ^= ZOBRIST.castling_key(castle_mask(&self.board));
        if let Some(sq) = legal_en_passant_square(&self.board) {
            self.key ^= ZOBRIST.ep_key(sq.file());
        }

        if let Some(moved) = self.board.piece_on(mv.from) {
            if self.board.colors(us).has(mv.to) {
                // Castling: the rules engine encodes it as the king moving
                // onto its own rook's square.
                let back = match us {
                    Color::White => Rank::First,
                    Color::Black => Rank::Eighth,
                };
                let (king_file, rook_file) = if mv.to.file() > mv.from.file() {
                    (cozy_chess::File::G, cozy_chess::File::F)
                } else {
                    (cozy_chess::File::C, cozy_chess::File::D)
                };
                self.key ^= ZOBRIST.piece_key(us, Piece::King, mv.from);
                self.key ^= ZOBRIST.piece_key(us, Piece::Rook, mv.to);
                self.key ^= ZOBRIST.piece_key(us, Piece::King, Square::new(king_file, back));
                self.key ^= ZOBRIST.piece_key(us, Piece::Rook, Square::new(rook_file, back));
            } else if moved == Piece::Pawn
                && mv.from.file() != mv.to.file()
                && self.board.piece_on(mv.to).is_none()
            {
                // En passant: the captured pawn sits beside the destination.
                self.key ^= ZOBRIST.piece_key(us, Piece::Pawn, mv.from);
                self.key ^= ZOBRIST.piece_key(us, Piece::Pawn, mv.to);
                self.key ^=
                    ZOBRIST.piece_key(them, Piece::Pawn, Square::new(mv.to.file(), mv.from.rank()));
            } else {
                self.key ^= ZOBRIST.piece_key(us, moved, mv.from);
                if let Some(victim) = self.board.piece_on(mv.to) {
                    self.key ^= ZOBRIST.piece_key(them, victim, mv.to);
                }
                self.key ^= ZOBRIST.piece_key(us, mv.promotion.unwrap_or(moved), mv.to);
            }
        }

        self.board.play_unchecked(mv);
        self.ply += 1;

        // XOR in the state-dependent contributions of the new position.
        self.key ^= ZOBRIST.castling_key(castle_mask(&self.board));
        if let Some(sq) = legal_en_passant_square(&self.board) {
            self.key ^= ZOBRIST.ep_key(sq.file());
        }
    }

    /// Undo the most recent push.
    ///
    /// # Panics
    /// Panics if no push is outstanding; push/pop pairing is a caller bug,
    /// not a runtime condition.
    pub fn pop(&mut self) {
        let (board, key) = self.undo.pop().expect("pop without a matching push");
        self.board = board;
        self.key = key;
        self.ply -= 1;
    }

    /// Play a move for the lifetime of the returned guard; the guard pops
    /// on drop, so early returns and `?` cannot unbalance the board.
    pub fn scoped(&mut self, mv: Move) -> MoveScope<'_> {
        self.push(mv);
        MoveScope { inner: self }
    }
}

/// RAII guard for a pushed move. Dereferences to the underlying
/// [`HashBoard`] and pops when dropped.
pub struct MoveScope<'a> {
    inner: &'a mut HashBoard,
}

impl Deref for MoveScope<'_> {
    type Target = HashBoard;

    fn deref(&self) -> &HashBoard {
        self.inner
    }
}

impl DerefMut for MoveScope<'_> {
    fn deref_mut(&mut self) -> &mut HashBoard {
        self.inner
    }
}

impl Drop for MoveScope<'_> {
    fn drop(&mut self) {
        self.inner.pop();
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
