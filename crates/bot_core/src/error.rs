//! Error type shared by the search strategies.

use thiserror::Error;

/// Fatal search failures. These always propagate to the caller; the core
/// never retries internally.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Internal state the search relies on was broken: a non-terminal node
    /// produced no legal moves, or a recorded child key is missing from the
    /// node map.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// The caller used the API out of order, e.g. asked the Monte Carlo
    /// tree for a best move before running any simulation.
    #[error("usage error: {0}")]
    UsageError(String),
}
