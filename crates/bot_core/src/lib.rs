//! Shared search and evaluation core for the chess bots.
//!
//! The rules of chess live in `cozy-chess`; this crate adds everything the
//! bots share on top of it: Zobrist position identity, a push/pop board
//! wrapper, static evaluation with piece-square tables, heuristic move
//! ordering, the transposition table, time control, and the [`Engine`]
//! trait the individual search strategies implement.

pub mod board;
pub mod error;
pub mod eval;
pub mod ordering;
pub mod pst;
pub mod time_control;
pub mod tt;
pub mod zobrist;

pub use board::{HashBoard, MoveScope, Outcome};
pub use error::EngineError;
pub use eval::{evaluate, perspective, piece_value, CHECKMATE_SCORE};
pub use time_control::{SearchLimits, TimeControl};
pub use tt::{Bound, TranspositionTable, TtEntry};
pub use zobrist::ZOBRIST;

// Re-export the rules-engine types that appear in this crate's API.
pub use cozy_chess::{Board, Color, Move, Piece, Square};

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None only when the position has no legal moves)
    pub best_move: Option<Move>,
    /// White-relative evaluation in pawn units
    pub score: f64,
    /// Number of positions visited
    pub nodes: u64,
}

/// Trait implemented by every search strategy.
///
/// Engines own their budgets (depth, simulation count, optional deadline)
/// and any cross-search state such as the transposition table or the Monte
/// Carlo node map.
pub trait Engine: Send {
    /// Pick a move for the given position.
    ///
    /// The score in the result is white-relative, in pawn units. Errors
    /// are broken internal invariants or out-of-order use; they are never
    /// swallowed.
    fn choose_move(&mut self, board: &Board) -> Result<SearchResult, EngineError>;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game (clear hash tables, trees, etc.)
    fn new_game(&mut self) {}
}
