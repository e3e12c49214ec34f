use super::*;
use crate::zobrist::ZOBRIST;
use cozy_chess::Board;

fn mv(s: &str) -> Move {
    s.parse().unwrap()
}

fn hash_board(fen: &str) -> HashBoard {
    HashBoard::new(Board::from_fen(fen, false).unwrap())
}

/// Play a scripted line, checking after every push that the incremental
/// key matches a from-scratch recomputation, then unwind and check the
/// original position is restored byte-for-byte.
fn play_and_unwind(start: &Board, line: &[&str]) {
    let mut board = HashBoard::new(start.clone());
    let initial_key = board.key();
    let initial_fen = format!("{}", board.board());

    for s in line {
        let m = mv(s);
        assert!(
            board.legal_moves().contains(&m),
            "scripted move {s} is not legal in {}",
            board.board()
        );
        board.push(m);
        assert_eq!(
            board.key(),
            ZOBRIST.compute(board.board()),
            "incremental key diverged after {s}"
        );
    }

    for _ in line {
        board.pop();
    }
    assert_eq!(board.key(), initial_key);
    assert_eq!(format!("{}", board.board()), initial_fen);
}

#[test]
fn test_push_pop_round_trip_with_en_passant_and_castling() {
    // Covers a double push, a real en-passant capture, both-side
    // development, and white castling short (king-takes-rook encoding).
    play_and_unwind(
        &Board::default(),
        &[
            "e2e4", "a7a6", "e4e5", "d7d5", "e5d6", "c7d6", "g1f3", "g8f6", "f1e2", "e7e6",
            "e1h1", "f8e7", "d2d4", "e8h8",
        ],
    );
}

#[test]
fn test_push_pop_round_trip_with_promotion() {
    play_and_unwind(
        &Board::from_fen("8/P6k/8/8/8/8/7K/8 w - - 0 1", false).unwrap(),
        &["a7a8q", "h7g6"],
    );
}

#[test]
fn test_promotion_to_knight_updates_key() {
    let mut board = hash_board("8/P6k/8/8/8/8/7K/8 w - - 0 1");
    board.push(mv("a7a8n"));
    assert_eq!(board.key(), ZOBRIST.compute(board.board()));
    board.pop();
}

#[test]
fn test_transpositions_hash_identically() {
    // Two move orders reaching the same position. The second order ends
    // with the double push, leaving an en-passant square that no black
    // pawn can use; the keys must still agree.
    let mut first = HashBoard::new(Board::default());
    for s in ["e2e4", "g8f6", "g1f3"] {
        first.push(mv(s));
    }
    let mut second = HashBoard::new(Board::default());
    for s in ["g1f3", "g8f6", "e2e4"] {
        second.push(mv(s));
    }
    assert_eq!(first.key(), second.key());
}

#[test]
fn test_scope_guard_restores_on_drop() {
    let mut board = HashBoard::new(Board::default());
    let key = board.key();
    let fen = format!("{}", board.board());
    {
        let mut scope = board.scoped(mv("e2e4"));
        assert_ne!(scope.key(), key);
        // Nested scopes unwind in order.
        let inner = scope.scoped(mv("e7e5"));
        assert_eq!(inner.key(), ZOBRIST.compute(inner.board()));
    }
    assert_eq!(board.key(), key);
    assert_eq!(format!("{}", board.board()), fen);
}

#[test]
fn test_ply_counter() {
    let mut board = HashBoard::new(Board::default());
    assert_eq!(board.ply(), 0);
    board.push(mv("e2e4"));
    assert_eq!(board.ply(), 1);
    board.push(mv("e7e5"));
    assert_eq!(board.ply(), 2);
    board.pop();
    assert_eq!(board.ply(), 1);

    let later = hash_board("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2");
    assert_eq!(later.ply(), 2);
}

#[test]
fn test_outcome_checkmate_and_stalemate() {
    let mated = hash_board("4Q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1");
    assert_eq!(
        mated.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
    assert!(mated.is_checkmate());

    let stalemate = hash_board("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert_eq!(stalemate.outcome(), Some(Outcome::Draw));

    let ongoing = HashBoard::new(Board::default());
    assert_eq!(ongoing.outcome(), None);
}

#[test]
fn test_outcome_fifty_move_draw() {
    let mut board = hash_board("4k3/8/8/8/8/8/3R4/4K3 w - - 99 80");
    assert_eq!(board.outcome(), None);
    // A quiet rook move pushes the halfmove clock to 100.
    board.push(mv("d2c2"));
    assert_eq!(board.outcome(), Some(Outcome::Draw));
}

#[test]
fn test_castle_mask() {
    assert_eq!(castle_mask(&Board::default()), 0b1111);
    let none = Board::from_fen(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
        false,
    )
    .unwrap();
    assert_eq!(castle_mask(&none), 0);
    let white_only = Board::from_fen(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 0 1",
        false,
    )
    .unwrap();
    assert_eq!(castle_mask(&white_only), 0b0011);
}
