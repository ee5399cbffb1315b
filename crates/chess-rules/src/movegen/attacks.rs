//! Precomputed target tables for the non-sliding pieces.

use crate::SquareSet;
use chess_core::{Side, Square};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const WHITE_PAWN_CAPTURES: [(i8, i8); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_CAPTURES: [(i8, i8); 2] = [(-1, -1), (1, -1)];

const KNIGHT_TARGETS: [SquareSet; 64] = leaper_table(&KNIGHT_OFFSETS);
const KING_TARGETS: [SquareSet; 64] = leaper_table(&KING_OFFSETS);

/// Indexed by [`Side::index`], then square.
const PAWN_CAPTURE_TARGETS: [[SquareSet; 64]; 2] = [
    leaper_table(&WHITE_PAWN_CAPTURES),
    leaper_table(&BLACK_PAWN_CAPTURES),
];

/// Squares a knight on `sq` could jump to on an empty board.
#[inline]
pub fn knight_targets(sq: Square) -> SquareSet {
    KNIGHT_TARGETS[sq.index() as usize]
}

/// Squares one king step away from `sq`.
#[inline]
pub fn king_targets(sq: Square) -> SquareSet {
    KING_TARGETS[sq.index() as usize]
}

/// The forward diagonals a pawn of `side` on `sq` captures on. Edge files
/// only get one.
#[inline]
pub fn pawn_capture_targets(sq: Square, side: Side) -> SquareSet {
    PAWN_CAPTURE_TARGETS[side.index()][sq.index() as usize]
}

/// Builds a table of in-bounds `(file, rank)` offsets for every square.
const fn leaper_table(offsets: &[(i8, i8)]) -> [SquareSet; 64] {
    let mut table = [SquareSet::EMPTY; 64];
    let mut idx = 0u8;
    while idx < 64 {
        let sq = Square::from_index_masked(idx);
        let mut bits = 0u64;
        let mut i = 0;
        while i < offsets.len() {
            let (df, dr) = offsets[i];
            if let Some(target) = sq.offset(df, dr) {
                bits |= 1u64 << target.index();
            }
            i += 1;
        }
        table[idx as usize] = SquareSet(bits);
        idx += 1;
    }
    table
}
