//! Zobrist hashing for chess positions.
//!
//! Zobrist hashing enables incremental hash updates during push/pop,
//! reducing hash maintenance from O(64) to O(1) per move. The key is the
//! position identity used by both the transposition table and the Monte
//! Carlo node map, so two rules-equivalent positions must hash identically
//! regardless of the move order that reached them.
//!
//! The hash is computed by XOR-ing together random values for:
//! - Each piece of each color on each square (768 values)
//! - The castling-rights bitmask (16 values, one per subset of the 4 rights)
//! - The en-passant file, but only while a legal en-passant capture exists
//! - Black to move (1 value)

use cozy_chess::{Board, Color, File, Piece};

use crate::board::{castle_mask, legal_en_passant_square};

/// Pre-computed random values for Zobrist hashing.
/// Generated using a fixed seed for reproducibility.
pub struct ZobristKeys {
    /// Random values for each piece on each square.
    /// Indexed by [color][piece][square]
    pub pieces: [[[u64; 64]; 6]; 2],
    /// Random values for each castling-rights bitmask.
    /// Bit 0 = white short, bit 1 = white long, bit 2 = black short,
    /// bit 3 = black long.
    pub castling: [u64; 16],
    /// Random values for en passant file (0-7)
    pub en_passant: [u64; 8],
    /// Random value for black to move (XOR when black's turn)
    pub black_to_move: u64,
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristKeys {
    /// Generate Zobrist keys using a simple PRNG with fixed seed.
    /// Uses xorshift64 for fast, reproducible random numbers.
    pub const fn new() -> Self {
        // Simple xorshift64 PRNG
        const fn xorshift64(mut state: u64) -> u64 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        }

        let mut state = 0x123456789ABCDEF0u64; // Fixed seed

        // Generate piece keys
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut piece = 0;
            while piece < 6 {
                let mut sq = 0;
                while sq < 64 {
                    state = xorshift64(state);
                    pieces[color][piece][sq] = state;
                    sq += 1;
                }
                piece += 1;
            }
            color += 1;
        }

        // One key per subset of the four castling rights, so an entire
        // rights mask is hashed in and out with a single XOR.
        let mut castling = [0u64; 16];
        let mut i = 0;
        while i < 16 {
            state = xorshift64(state);
            castling[i] = state;
            i += 1;
        }

        // Generate en passant keys
        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            state = xorshift64(state);
            en_passant[i] = state;
            i += 1;
        }

        state = xorshift64(state);
        let black_to_move = state;

        ZobristKeys {
            pieces,
            castling,
            en_passant,
            black_to_move,
        }
    }

    /// Get the Zobrist key for a piece of a color on a square.
    #[inline(always)]
    pub fn piece_key(&self, color: Color, piece: Piece, sq: cozy_chess::Square) -> u64 {
        self.pieces[color as usize][piece as usize][sq as usize]
    }

    /// Get the Zobrist key for a castling-rights bitmask (0-15).
    #[inline(always)]
    pub fn castling_key(&self, mask: usize) -> u64 {
        self.castling[mask]
    }

    /// Get the Zobrist key for en passant on a file.
    #[inline(always)]
    pub fn ep_key(&self, file: File) -> u64 {
        self.en_passant[file as usize]
    }

    /// Get the Zobrist key toggled when black is to move.
    #[inline(always)]
    pub fn turn_key(&self) -> u64 {
        self.black_to_move
    }

    /// Compute the full hash of a position from scratch.
    ///
    /// The en-passant file contributes only while an en-passant capture is
    /// actually legal, so positions that differ solely by an unusable
    /// en-passant square still transpose to the same key.
    pub fn compute(&self, board: &Board) -> u64 {
        let mut key = 0u64;

        for color in Color::ALL {
            for piece in Piece::ALL {
                for sq in board.colored_pieces(color, piece) {
                    key ^= self.piece_key(color, piece, sq);
                }
            }
        }

        key ^= self.castling_key(castle_mask(board));

        if let Some(sq) = legal_en_passant_square(board) {
            key ^= self.ep_key(sq.file());
        }

        if board.side_to_move() == Color::Black {
            key ^= self.turn_key();
        }

        key
    }
}

/// Global static Zobrist keys, computed at compile time.
pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
