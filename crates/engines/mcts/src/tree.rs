//! Hash-addressed Monte Carlo search tree.
//!
//! Nodes carry a Beta-Bernoulli belief over the mover's win probability:
//! parameters (a, b) start at the uniform prior (1, 1) and accumulate
//! fractional win/loss mass with every backed-up estimate. Addressing
//! nodes by Zobrist key instead of pointers merges transpositions for free
//! and keeps the graph free of ownership cycles.

use std::collections::HashMap;

use bot_core::eval::CHECKMATE_SCORE;
use cozy_chess::Move;
use rand::Rng;
use rand_distr::{Beta, Distribution};

/// One belief node, keyed by the Zobrist hash of its position.
#[derive(Debug, Clone)]
pub struct TreeNode {
    pub key: u64,
    /// Beta parameters (a, b); never drop below the (1, 1) prior.
    param: (f64, f64),
    /// Explored moves and the keys of the positions they lead to.
    pub children: HashMap<Move, u64>,
    /// Game ply of the position, for staleness decisions by the caller.
    pub ply: u32,
    /// Set once the node's result is known for certain: 0 lost, 0.5 drawn,
    /// 1 won, always from the side to move's point of view.
    outcome_score: Option<f64>,
}

impl TreeNode {
    pub fn new(key: u64, ply: u32) -> Self {
        Self {
            key,
            param: (1.0, 1.0),
            children: HashMap::new(),
            ply,
            outcome_score: None,
        }
    }

    /// Terminal node where the side to move is checkmated. The degenerate
    /// parameters pin the belief to certain loss.
    pub fn terminal_loss(key: u64, ply: u32) -> Self {
        Self {
            key,
            param: (1.0, 2.0 * CHECKMATE_SCORE),
            children: HashMap::new(),
            ply,
            outcome_score: Some(0.0),
        }
    }

    /// Terminal drawn node; symmetric overwhelming parameters.
    pub fn terminal_draw(key: u64, ply: u32) -> Self {
        Self {
            key,
            param: (2.0 * CHECKMATE_SCORE, 2.0 * CHECKMATE_SCORE),
            children: HashMap::new(),
            ply,
            outcome_score: Some(0.5),
        }
    }

    pub fn param(&self) -> (f64, f64) {
        self.param
    }

    pub fn outcome_score(&self) -> Option<f64> {
        self.outcome_score
    }

    pub fn is_determined(&self) -> bool {
        self.outcome_score.is_some()
    }

    /// Record a certain result. Once set, the outcome never changes.
    pub fn set_outcome_score(&mut self, score: f64) {
        if self.outcome_score.is_none() {
            self.outcome_score = Some(score);
        }
    }

    /// Map a mover-relative pawn advantage to a win probability via the
    /// logistic curve `1 / (1 + 10^(-advantage/4))`, clamped beyond
    /// ±10 pawns.
    pub fn win_rate_from_score(pawn_advantage: f64) -> f64 {
        if pawn_advantage >= 10.0 {
            return 0.9999;
        }
        if pawn_advantage <= -10.0 {
            return 0.0001;
        }
        1.0 / (1.0 + 10f64.powf(-pawn_advantage / 4.0))
    }

    /// Fold a static evaluation into the belief.
    pub fn update_from_score(&mut self, pawn_advantage: f64) {
        self.update_from_win_rate(Self::win_rate_from_score(pawn_advantage));
    }

    /// Add `win_rate` of win mass and the complement of loss mass.
    pub fn update_from_win_rate(&mut self, win_rate: f64) {
        self.param.0 += win_rate;
        self.param.1 += 1.0 - win_rate;
    }

    /// Mean of the accumulated win mass, excluding the prior; 0.5 before
    /// the first update.
    pub fn win_rate_from_params(&self) -> f64 {
        let visits = self.param.0 + self.param.1 - 2.0;
        if visits <= 0.0 {
            0.5
        } else {
            (self.param.0 - 1.0) / visits
        }
    }

    /// Expected win probability: the certain outcome if determined,
    /// otherwise the Beta mean.
    pub fn expectation(&self) -> f64 {
        match self.outcome_score {
            Some(score) => score,
            None => self.param.0 / (self.param.0 + self.param.1),
        }
    }

    /// Inverse of the logistic transform, back to pawn units, with mate
    /// sentinels at the probability extremes.
    pub fn pawn_advantage(&self) -> f64 {
        let win_rate = self.expectation();
        if win_rate >= 1.0 {
            CHECKMATE_SCORE
        } else if win_rate <= 0.0 {
            -CHECKMATE_SCORE
        } else {
            4.0 * (win_rate / (1.0 - win_rate)).log10()
        }
    }

    /// Thompson sample from Beta(a+1, b+1); the +1 smoothing keeps the
    /// distribution proper even at the prior.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        Beta::new(self.param.0 + 1.0, self.param.1 + 1.0)
            .map(|beta| beta.sample(rng))
            .unwrap_or(0.5)
    }
}

/// Node storage addressed by Zobrist key. `add` replaces unconditionally,
/// mirroring the transposition table's collision policy.
#[derive(Debug, Default)]
pub struct HashTree {
    nodes: HashMap<u64, TreeNode>,
}

impl HashTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, node: TreeNode) {
        self.nodes.insert(node.key, node);
    }

    pub fn get(&self, key: u64) -> Option<&TreeNode> {
        self.nodes.get(&key)
    }

    pub fn get_mut(&mut self, key: u64) -> Option<&mut TreeNode> {
        self.nodes.get_mut(&key)
    }

    pub fn contains(&self, key: u64) -> bool {
        self.nodes.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
