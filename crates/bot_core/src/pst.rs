//! Piece-square tables.
//!
//! Positional bonuses per piece type and square, from the
//! chessprogramming.org Simplified Evaluation Function. The white tables
//! below are written from white's perspective with rank 8 on the first row;
//! black tables are the vertically mirrored negation, so summing entries
//! over the whole board always favors the piece's owner.
//!
//! Built once at compile time into an immutable static.

use cozy_chess::{Color, Piece, Square};

const PAWN: [i32; 64] = [
    0, 0, 0, 0, 0, 0, 0, 0, //
    50, 50, 50, 50, 50, 50, 50, 50, //
    10, 10, 20, 30, 30, 20, 10, 10, //
    5, 5, 10, 25, 25, 10, 5, 5, //
    0, 0, 0, 20, 20, 0, 0, 0, //
    5, -5, -10, 0, 0, -10, -5, 5, //
    5, 10, 10, -10, -10, 10, 10, 5, //
    0, 0, 0, 0, 0, 0, 0, 0,
];

const KNIGHT: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50, //
    -40, -20, 0, 0, 0, 0, -20, -40, //
    -30, 0, 10, 15, 15, 10, 0, -30, //
    -30, 5, 15, 20, 20, 15, 5, -30, //
    -30, 0, 15, 20, 20, 15, 0, -30, //
    -30, 5, 10, 15, 15, 10, 5, -30, //
    -40, -20, 0, 5, 5, 0, -20, -40, //
    -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20, //
    -10, 0, 0, 0, 0, 0, 0, -10, //
    -10, 0, 5, 10, 10, 5, 0, -10, //
    -10, 5, 5, 10, 10, 5, 5, -10, //
    -10, 0, 10, 10, 10, 10, 0, -10, //
    -10, 10, 10, 10, 10, 10, 10, -10, //
    -10, 5, 0, 0, 0, 0, 5, -10, //
    -20, -10, -10, -10, -10, -10, -10, -20,
];

const ROOK: [i32; 64] = [
    0, 0, 0, 0, 0, 0, 0, 0, //
    5, 10, 10, 10, 10, 10, 10, 5, //
    -5, 0, 0, 0, 0, 0, 0, -5, //
    -5, 0, 0, 0, 0, 0, 0, -5, //
    -5, 0, 0, 0, 0, 0, 0, -5, //
    -5, 0, 0, 0, 0, 0, 0, -5, //
    -5, 0, 0, 0, 0, 0, 0, -5, //
    0, 0, 0, 5, 5, 0, 0, 0,
];

const QUEEN: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20, //
    -10, 0, 0, 0, 0, 0, 0, -10, //
    -10, 0, 5, 5, 5, 5, 0, -10, //
    -5, 0, 5, 5, 5, 5, 0, -5, //
    0, 0, 5, 5, 5, 5, 0, -5, //
    -10, 5, 5, 5, 5, 5, 0, -10, //
    -10, 0, 5, 0, 0, 0, 0, -10, //
    -20, -10, -10, -5, -5, -10, -10, -20,
];

const KING: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30, //
    -30, -40, -40, -50, -50, -40, -40, -30, //
    -30, -40, -40, -50, -50, -40, -40, -30, //
    -30, -40, -40, -50, -50, -40, -40, -30, //
    -20, -30, -30, -40, -40, -30, -30, -20, //
    -10, -20, -20, -20, -20, -20, -20, -10, //
    20, 20, 0, 0, 0, 0, 20, 20, //
    20, 30, 10, 0, 0, 10, 30, 20,
];

/// All twelve tables, indexed by [color][piece][table index].
pub struct PieceSquareTables {
    tables: [[[i32; 64]; 6]; 2],
}

impl PieceSquareTables {
    pub const fn new() -> Self {
        let white = [PAWN, KNIGHT, BISHOP, ROOK, QUEEN, KING];

        let mut tables = [[[0i32; 64]; 6]; 2];
        let mut piece = 0;
        while piece < 6 {
            tables[Color::White as usize][piece] = white[piece];
            tables[Color::Black as usize][piece] = mirror_negate(white[piece]);
            piece += 1;
        }

        PieceSquareTables { tables }
    }

    /// Look up the entry for a piece of a color standing on a square.
    #[inline(always)]
    pub fn read(&self, color: Color, piece: Piece, sq: Square) -> i32 {
        // Tables are written rank 8 first; squares count from a1.
        let index = (7 - sq.rank() as usize) * 8 + sq.file() as usize;
        self.tables[color as usize][piece as usize][index]
    }
}

impl Default for PieceSquareTables {
    fn default() -> Self {
        Self::new()
    }
}

/// Flip a white table vertically and negate it for black.
const fn mirror_negate(table: [i32; 64]) -> [i32; 64] {
    let mut out = [0i32; 64];
    let mut row = 0;
    while row < 8 {
        let mut col = 0;
        while col < 8 {
            out[(7 - row) * 8 + col] = -table[row * 8 + col];
            col += 1;
        }
        row += 1;
    }
    out
}

/// Global static tables, computed at compile time.
pub static PST: PieceSquareTables = PieceSquareTables::new();

#[cfg(test)]
#[path = "pst_tests.rs"]
mod pst_tests;
