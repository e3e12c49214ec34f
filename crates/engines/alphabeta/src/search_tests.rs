use super::*;
use bot_core::eval::CHECKMATE_SCORE;
use cozy_chess::Board;
use std::time::Duration;

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

fn hash_board(fen: &str) -> HashBoard {
    HashBoard::new(Board::from_fen(fen, false).unwrap())
}

/// Unpruned negamax over the same ordered move lists, as a reference for
/// the pruning-equivalence property. No window, no table, no deadline.
fn full_width(board: &mut HashBoard, depth: u8) -> f64 {
    if depth == 0 || board.outcome().is_some() {
        return perspective(board.side_to_move()) * evaluate(board.board());
    }
    let mut best = f64::NEG_INFINITY;
    for (m, _) in ordered_moves(board) {
        let mut scope = board.scoped(m);
        let value = -full_width(&mut scope, depth - 1);
        drop(scope);
        if value > best {
            best = value;
        }
    }
    best
}

fn full_width_root(board: &mut HashBoard, depth: u8) -> (Move, f64) {
    let moves = ordered_moves(board);
    let mut best_move = moves[0].0;
    let mut best_score = f64::NEG_INFINITY;
    for (m, _) in moves {
        let mut scope = board.scoped(m);
        let value = -full_width(&mut scope, depth.saturating_sub(1));
        drop(scope);
        if value > best_score {
            best_score = value;
            best_move = m;
        }
    }
    (best_move, best_score)
}

fn search(board: &mut HashBoard, depth: u8) -> SearchOutcome {
    let mut tt = TranspositionTable::new();
    let limits = SearchLimits::depth(depth);
    limits.start();
    let mut nodes = 0;
    pick_best_move(board, depth, &mut tt, &limits, &mut nodes).unwrap()
}

#[test]
fn test_negamax_depth_zero_matches_evaluation() {
    let fens = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
        "8/5pk1/6p1/8/3N4/8/5PPP/6K1 w - - 0 40",
        "4Q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1",
    ];
    for fen in fens {
        let mut board = hash_board(fen);
        let mut tt = TranspositionTable::new();
        let limits = SearchLimits::depth(0);
        limits.start();
        let mut nodes = 0;
        let (value, interrupted) = negamax(
            &mut board,
            0,
            f64::NEG_INFINITY,
            f64::INFINITY,
            &mut tt,
            &limits,
            &mut nodes,
        )
        .unwrap();
        assert!(!interrupted);
        assert_eq!(
            value,
            perspective(board.side_to_move()) * evaluate(board.board()),
            "depth-0 disagreement for {fen}"
        );
    }
}

#[test]
fn test_pruning_matches_full_width_search() {
    // (fen, max depth); deeper entries are sparse so the unpruned
    // reference stays cheap.
    let corpus = [
        ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 3),
        (
            "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
            2,
        ),
        ("8/5pk1/6p1/8/3N4/8/5PPP/6K1 w - - 0 40", 4),
        ("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1", 2),
    ];
    for (fen, max_depth) in corpus {
        for depth in 1..=max_depth {
            let mut board = hash_board(fen);
            let outcome = search(&mut board, depth);
            let (best_move, best_score) = outcome.best.unwrap();
            let (reference_move, reference_score) = full_width_root(&mut board, depth);
            assert_eq!(
                best_move, reference_move,
                "move mismatch for {fen} at depth {depth}"
            );
            assert_eq!(
                best_score, reference_score,
                "score mismatch for {fen} at depth {depth}"
            );
        }
    }
}

#[test]
fn test_finds_mate_in_one() {
    for depth in 1..=3 {
        let mut board = hash_board("6k1/5ppp/8/8/8/8/5PPP/4Q1K1 w - - 0 1");
        let (best_move, best_score) = search(&mut board, depth).best.unwrap();
        assert_eq!(best_move, mv("e1e8"), "wrong move at depth {depth}");
        assert_eq!(best_score, CHECKMATE_SCORE, "wrong score at depth {depth}");
    }
}

#[test]
fn test_board_restored_after_search() {
    let mut board = hash_board("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3");
    let key = board.key();
    let fen = format!("{}", board.board());
    let _ = search(&mut board, 3);
    assert_eq!(board.key(), key);
    assert_eq!(format!("{}", board.board()), fen);
}

#[test]
fn test_no_legal_moves_returns_none() {
    let mut board = hash_board("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    let outcome = search(&mut board, 4);
    assert!(outcome.best.is_none());
    assert!(!outcome.stopped);
}

#[test]
fn test_deadline_aborts_search() {
    let mut board = HashBoard::new(Board::default());
    let mut tt = TranspositionTable::new();
    let limits = SearchLimits::depth_and_time(6, Duration::ZERO);
    limits.start();
    let mut nodes = 0;
    let outcome = pick_best_move(&mut board, 6, &mut tt, &limits, &mut nodes).unwrap();
    assert!(outcome.stopped);
    // A partial result is still a legal move.
    let (best_move, _) = outcome.best.unwrap();
    assert!(board.legal_moves().contains(&best_move));
    // The abort happened at a clock check, not after the full tree.
    assert!(nodes < 100_000);
}

#[test]
fn test_deadline_on_first_root_move_reports_static_evaluation() {
    // An immediate deadline stops the search inside the first root
    // subtree, before any move has a finished score. The result must be
    // the static evaluation, not an infinite bound.
    let mut board = hash_board("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3");
    let mut tt = TranspositionTable::new();
    let limits = SearchLimits::depth_and_time(6, Duration::ZERO);
    limits.start();
    let mut nodes = 0;
    let outcome = pick_best_move(&mut board, 6, &mut tt, &limits, &mut nodes).unwrap();
    assert!(outcome.stopped);
    let (_, score) = outcome.best.unwrap();
    assert!(score.is_finite());
    assert_eq!(
        score,
        perspective(board.side_to_move()) * evaluate(board.board())
    );
}
