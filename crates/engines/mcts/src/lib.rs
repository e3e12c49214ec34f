//! Monte Carlo chess engine.
//!
//! A Bayesian take on MCTS: instead of visit counts and UCB, every node
//! keeps a Beta distribution over the mover's win probability, moves are
//! chosen by Thompson sampling, and forced results propagate up the tree
//! as determined outcomes. The node graph is addressed by Zobrist key and
//! persists across moves, so transpositions and the opponent's reply both
//! land in an already-grown tree.

mod search;
pub mod tree;

use std::time::Duration;

use bot_core::board::HashBoard;
use bot_core::eval::evaluate;
use bot_core::time_control::TimeControl;
use bot_core::{Board, Engine, EngineError, SearchResult};
use rand::rngs::StdRng;
use rand::SeedableRng;

use tree::HashTree;

/// Engine wrapper around the simulation loop.
pub struct MonteCarloEngine {
    simulations: u32,
    time_control: TimeControl,
    tree: HashTree,
    rng: StdRng,
    nodes: u64,
}

impl MonteCarloEngine {
    /// Fixed simulation budget per move, no deadline.
    pub fn new(simulations: u32) -> Self {
        Self {
            simulations,
            time_control: TimeControl::new(None),
            tree: HashTree::new(),
            rng: StdRng::from_entropy(),
            nodes: 0,
        }
    }

    /// Deterministic variant for tests and reproducible games.
    pub fn with_seed(simulations: u32, seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            ..Self::new(simulations)
        }
    }

    /// Add a wall-clock deadline checked during the simulation loop.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_control = TimeControl::new(Some(limit));
        self
    }

    /// Number of nodes currently held in the search tree.
    pub fn tree_size(&self) -> usize {
        self.tree.len()
    }
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Engine for MonteCarloEngine {
    fn choose_move(&mut self, board: &Board) -> Result<SearchResult, EngineError> {
        self.nodes = 0;
        let mut hash_board = HashBoard::new(board.clone());

        // A terminal root has nothing to simulate.
        if hash_board.outcome().is_some() {
            return Ok(SearchResult {
                best_move: None,
                score: evaluate(board),
                nodes: 0,
            });
        }

        self.time_control.start();
        for simulation in 0..self.simulations {
            if self.time_control.should_check_time(u64::from(simulation))
                && self.time_control.check_time()
            {
                break;
            }
            search::simulate(&mut self.tree, &mut hash_board, &mut self.rng, &mut self.nodes)?;
        }

        let (best_move, score) =
            search::best_move_and_eval(&self.tree, &hash_board, &mut self.rng)?;

        log::debug!(
            "mcts: {} new positions, tree size {}, best {best_move}, score {score:+.2}",
            self.nodes,
            self.tree.len(),
        );

        Ok(SearchResult {
            best_move: Some(best_move),
            score,
            nodes: self.nodes,
        })
    }

    fn name(&self) -> &str {
        "MonteCarlo v1.0"
    }

    fn new_game(&mut self) {
        self.tree.clear();
        self.nodes = 0;
    }
}
