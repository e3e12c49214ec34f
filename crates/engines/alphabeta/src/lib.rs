//! Alpha-beta chess engine.
//!
//! Fixed-depth negamax with alpha-beta pruning, heuristic move ordering,
//! and a transposition table kept across searches within a game.

mod search;

use bot_core::board::HashBoard;
use bot_core::eval::{evaluate, perspective};
use bot_core::time_control::SearchLimits;
use bot_core::tt::TranspositionTable;
use bot_core::{Board, Engine, EngineError, SearchResult};

/// Engine wrapper around the negamax search.
#[derive(Debug)]
pub struct AlphaBetaEngine {
    limits: SearchLimits,
    tt: TranspositionTable,
    nodes: u64,
}

impl AlphaBetaEngine {
    /// Depth-only budget, no deadline.
    pub fn new(depth: u8) -> Self {
        Self::with_limits(SearchLimits::depth(depth))
    }

    pub fn with_limits(limits: SearchLimits) -> Self {
        Self {
            limits,
            tt: TranspositionTable::new(),
            nodes: 0,
        }
    }
}

impl Default for AlphaBetaEngine {
    fn default() -> Self {
        Self::with_limits(SearchLimits::default())
    }
}

impl Engine for AlphaBetaEngine {
    fn choose_move(&mut self, board: &Board) -> Result<SearchResult, EngineError> {
        self.nodes = 0;
        self.limits.start();

        let mut hash_board = HashBoard::new(board.clone());
        let outcome = search::pick_best_move(
            &mut hash_board,
            self.limits.depth,
            &mut self.tt,
            &self.limits,
            &mut self.nodes,
        )?;

        let result = match outcome.best {
            Some((mv, score)) => SearchResult {
                best_move: Some(mv),
                score: perspective(board.side_to_move()) * score,
                nodes: self.nodes,
            },
            // No legal moves: report the static evaluation of the
            // terminal position.
            None => SearchResult {
                best_move: None,
                score: evaluate(board),
                nodes: self.nodes,
            },
        };

        log::debug!(
            "alphabeta depth {}: {} nodes, best {:?}, score {:+.2}{}",
            self.limits.depth,
            self.nodes,
            result.best_move,
            result.score,
            if outcome.stopped { " (stopped)" } else { "" }
        );

        Ok(result)
    }

    fn name(&self) -> &str {
        "AlphaBeta v1.0"
    }

    fn new_game(&mut self) {
        self.tt.clear();
        self.nodes = 0;
    }
}

pub use search::{pick_best_move, SearchOutcome};
