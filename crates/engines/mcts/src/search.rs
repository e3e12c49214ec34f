//! Simulation and root selection for the Monte Carlo engine.
//!
//! Each simulation walks a single depth-first path from the root: Thompson
//! selection over the legal moves, recursion into the chosen child, then a
//! backpropagation step on the way out. All win probabilities are relative
//! to the side to move at their node; the zero-sum complement `1 - p`
//! crosses a ply.

use bot_core::board::{HashBoard, Outcome};
use bot_core::error::EngineError;
use bot_core::eval::{evaluate, perspective};
use cozy_chess::Move;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::tree::{HashTree, TreeNode};

fn missing_node(key: u64) -> EngineError {
    EngineError::InvariantViolation(format!("node {key:016x} missing from the search tree"))
}

/// Run one simulation from the current position, growing the tree by at
/// most one node per position on the path. `nodes` counts newly created
/// nodes, i.e. positions visited for the first time.
pub(crate) fn simulate<R: Rng>(
    tree: &mut HashTree,
    board: &mut HashBoard,
    rng: &mut R,
    nodes: &mut u64,
) -> Result<(), EngineError> {
    let key = board.key();

    // First visit: create the node, seed its belief, and stop the path.
    if !tree.contains(key) {
        let node = match board.outcome() {
            Some(Outcome::Checkmate { .. }) => TreeNode::terminal_loss(key, board.ply()),
            Some(Outcome::Draw) => TreeNode::terminal_draw(key, board.ply()),
            None => {
                let mut node = TreeNode::new(key, board.ply());
                let advantage = perspective(board.side_to_move()) * evaluate(board.board());
                node.update_from_score(advantage);
                node
            }
        };
        tree.add(node);
        *nodes += 1;
        return Ok(());
    }

    // Revisiting a terminal position: nothing to expand below it.
    if board.outcome().is_some() {
        return Ok(());
    }

    let legal = board.legal_moves();
    if legal.is_empty() {
        return Err(EngineError::InvariantViolation(format!(
            "no legal moves in non-terminal position {}",
            board.board()
        )));
    }

    // Thompson selection: unseen children draw from this node's own
    // belief, seen undetermined children from their complement, and
    // determined children are skipped outright.
    let mut chosen: Option<(Move, u64)> = None;
    let mut best_sample = f64::NEG_INFINITY;
    {
        let node = tree.get(key).ok_or_else(|| missing_node(key))?;
        for &m in &legal {
            let child_key = board.scoped(m).key();
            let sample = match tree.get(child_key) {
                None => node.sample(rng),
                Some(child) if !child.is_determined() => 1.0 - child.sample(rng),
                Some(_) => continue,
            };
            if sample > best_sample {
                best_sample = sample;
                chosen = Some((m, child_key));
            }
        }
    }

    // When every move leads to a determined child, explore uniformly at
    // random; such a child is deliberately not recorded in the children
    // map, matching the reference selection rule.
    let (mv, resulting_key) = match chosen {
        Some((m, child_key)) => (m, Some(child_key)),
        None => (legal[rng.gen_range(0..legal.len())], None),
    };

    {
        let mut scope = board.scoped(mv);
        simulate(tree, &mut scope, rng, nodes)?;
    }

    if let Some(child_key) = resulting_key {
        let node = tree.get_mut(key).ok_or_else(|| missing_node(key))?;
        node.children.insert(mv, child_key);
    }

    // Backpropagation: the best win rate known at this node is the max of
    // its own belief and the complement of every recorded child's.
    let best = {
        let node = tree.get(key).ok_or_else(|| missing_node(key))?;
        let mut best = node.win_rate_from_params();
        for &child_key in node.children.values() {
            let child = tree.get(child_key).ok_or_else(|| missing_node(child_key))?;
            best = best.max(1.0 - child.win_rate_from_params());
        }
        best
    };

    let node = tree.get_mut(key).ok_or_else(|| missing_node(key))?;
    if best >= 1.0 {
        // Some child is a certain loss for the opponent: forced win here.
        node.set_outcome_score(1.0);
    } else if best <= 0.0 {
        node.set_outcome_score(0.0);
    } else if !node.is_determined() {
        node.update_from_win_rate(best);
    }

    Ok(())
}

/// Pick the best root move by expectation after the simulation budget is
/// spent. The legal moves are shuffled first so ties break randomly.
pub(crate) fn best_move_and_eval<R: Rng>(
    tree: &HashTree,
    board: &HashBoard,
    rng: &mut R,
) -> Result<(Move, f64), EngineError> {
    let node = tree.get(board.key()).ok_or_else(|| {
        EngineError::UsageError("no simulations have been run for this position".to_string())
    })?;

    let mut legal = board.legal_moves();
    legal.shuffle(rng);

    let mut best: Option<(Move, f64)> = None;
    let mut best_expectation = f64::NEG_INFINITY;
    for m in legal {
        let (expectation, advantage) = match node.children.get(&m) {
            Some(&child_key) => {
                let child = tree.get(child_key).ok_or_else(|| missing_node(child_key))?;
                (1.0 - child.expectation(), -child.pawn_advantage())
            }
            // Unexplored move: fall back to this node's own belief.
            None => (node.expectation(), node.pawn_advantage()),
        };
        if expectation > best_expectation {
            best_expectation = expectation;
            best = Some((m, advantage));
        }
    }

    let (best_move, advantage) = best.ok_or_else(|| {
        EngineError::InvariantViolation(format!(
            "no legal moves in non-terminal position {}",
            board.board()
        ))
    })?;

    Ok((best_move, perspective(board.side_to_move()) * advantage))
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
