//! Fail-hard negamax search with alpha-beta pruning.
//!
//! Scores inside the search are relative to the side to move; only the
//! engine boundary converts back to white-relative. Window bounds use true
//! ±infinity; mate scores stay at the finite sentinel so arithmetic on
//! them remains meaningful.

use bot_core::board::HashBoard;
use bot_core::error::EngineError;
use bot_core::eval::{evaluate, perspective};
use bot_core::ordering::ordered_moves;
use bot_core::time_control::SearchLimits;
use bot_core::tt::{Bound, TranspositionTable, TtEntry};
use cozy_chess::Move;

/// Result of the root search. `best` is None only when the root has no
/// legal moves; `stopped` reports a deadline abort with a partial result.
#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    pub best: Option<(Move, f64)>,
    pub stopped: bool,
}

/// Search every root move with a full window and keep the first move
/// achieving the strict maximum.
pub fn pick_best_move(
    board: &mut HashBoard,
    depth: u8,
    tt: &mut TranspositionTable,
    limits: &SearchLimits,
    nodes: &mut u64,
) -> Result<SearchOutcome, EngineError> {
    let moves = ordered_moves(board);
    if moves.is_empty() {
        return Ok(SearchOutcome {
            best: None,
            stopped: false,
        });
    }

    let mut best_move = moves[0].0;
    let mut best_score = f64::NEG_INFINITY;
    let mut stopped = false;

    for (mv, _) in moves {
        let mut scope = board.scoped(mv);
        let (value, interrupted) = negamax(
            &mut scope,
            depth.saturating_sub(1),
            f64::NEG_INFINITY,
            f64::INFINITY,
            tt,
            limits,
            nodes,
        )?;
        drop(scope);

        if interrupted {
            stopped = true;
            break;
        }
        let value = -value;
        if value > best_score {
            best_score = value;
            best_move = mv;
        }
    }

    // Deadline expired before the first root move finished: no subtree
    // produced a usable score, so fall back to the static evaluation.
    if best_score == f64::NEG_INFINITY {
        best_score = perspective(board.side_to_move()) * evaluate(board.board());
    }

    Ok(SearchOutcome {
        best: Some((best_move, best_score)),
        stopped,
    })
}

/// Fail-hard negamax. Returns the node value (within [alpha, beta]) and a
/// flag set when the deadline interrupted the subtree; interrupted values
/// are partial and must not be trusted or cached.
fn negamax(
    board: &mut HashBoard,
    depth: u8,
    mut alpha: f64,
    beta: f64,
    tt: &mut TranspositionTable,
    limits: &SearchLimits,
    nodes: &mut u64,
) -> Result<(f64, bool), EngineError> {
    *nodes += 1;
    if limits.time_control.should_check_time(*nodes) && limits.time_control.check_time() {
        return Ok((alpha, true));
    }

    if depth == 0 || board.outcome().is_some() {
        let value = perspective(board.side_to_move()) * evaluate(board.board());
        return Ok((value, false));
    }

    let key = board.key();
    if let Some(entry) = tt.get(key) {
        // Only same-depth entries are reused: a hit then returns exactly
        // what the fail-hard search below would have computed, so the
        // table never changes the search result.
        if entry.depth == depth {
            match entry.bound {
                Bound::Exact => return Ok((entry.score.clamp(alpha, beta), false)),
                Bound::LowerBound if entry.score >= beta => return Ok((beta, false)),
                Bound::UpperBound if entry.score <= alpha => return Ok((alpha, false)),
                _ => {}
            }
        }
    }

    let moves = ordered_moves(board);
    if moves.is_empty() {
        return Err(EngineError::InvariantViolation(format!(
            "no legal moves in non-terminal position {}",
            board.board()
        )));
    }

    let original_alpha = alpha;
    let mut cutoff = false;

    for (mv, _) in moves {
        let mut scope = board.scoped(mv);
        let (value, interrupted) = negamax(&mut scope, depth - 1, -beta, -alpha, tt, limits, nodes)?;
        drop(scope);

        if interrupted {
            return Ok((alpha, true));
        }
        let value = -value;
        if value >= beta {
            cutoff = true;
            break;
        }
        if value > alpha {
            alpha = value;
        }
    }

    let result = if cutoff { beta } else { alpha };
    let bound = if cutoff {
        Bound::LowerBound
    } else if result <= original_alpha {
        Bound::UpperBound
    } else {
        Bound::Exact
    };
    tt.add(TtEntry {
        key,
        score: result,
        bound,
        depth,
        age: board.ply(),
    });

    Ok((result, false))
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
