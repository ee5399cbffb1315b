//! Move generation.
//!
//! Generation runs in three stages, each in its own module:
//! - this module: pseudo-legal destinations per piece kind, which respect
//!   geometry and blocking but ignore the mover's own King
//! - [`special`]: castling, en passant and promotion, which depend on move
//!   history
//! - [`legal`]: the self-check filter, which simulates each candidate on a
//!   scratch copy of the board

mod attacks;
pub mod legal;
pub mod perft;
pub mod special;

use crate::board::Occupancy;
use crate::SquareSet;
use chess_core::{Move, PieceKind, Side, Square};

pub use attacks::{king_targets, knight_targets, pawn_capture_targets};

const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// A list of moves with a fixed maximum capacity.
///
/// One side never has more than 218 legal moves, so a fixed-size array
/// avoids heap allocations during generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Upper bound on the number of moves in any position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }

    /// Returns the move from this list that lands on `to`.
    ///
    /// Lists built for a single piece hold at most one move per destination.
    pub fn find_destination(&self, to: Square) -> Option<Move> {
        self.as_slice().iter().copied().find(|m| m.to() == to)
    }

    /// Returns every destination square in the list.
    pub fn destinations(&self) -> SquareSet {
        self.as_slice().iter().map(|m| m.to()).collect()
    }

    /// Appends every move of `other`.
    pub fn extend_from(&mut self, other: &MoveList) {
        for m in other {
            self.push(*m);
        }
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Returns the pseudo-legal destinations of a `kind` piece of `side` on `from`.
///
/// Every destination is on the board and either empty or held by the other
/// side. Castling and en passant are not included; see [`special`].
pub fn generate_pseudo_legal<O: Occupancy + ?Sized>(
    kind: PieceKind,
    side: Side,
    from: Square,
    occ: &O,
) -> SquareSet {
    match kind {
        PieceKind::Pawn => pawn_targets(side, from, occ),
        PieceKind::Knight => leaper_targets(knight_targets(from), side, occ),
        PieceKind::King => leaper_targets(king_targets(from), side, occ),
        PieceKind::Bishop => ray_targets(&BISHOP_DIRECTIONS, side, from, occ),
        PieceKind::Rook => ray_targets(&ROOK_DIRECTIONS, side, from, occ),
        PieceKind::Queen => {
            ray_targets(&BISHOP_DIRECTIONS, side, from, occ)
                | ray_targets(&ROOK_DIRECTIONS, side, from, occ)
        }
    }
}

fn pawn_targets<O: Occupancy + ?Sized>(side: Side, from: Square, occ: &O) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    let dir = side.forward();

    if let Some(one) = from.offset(0, dir) {
        if occ.is_vacant(one) {
            targets.insert(one);
            if from.rank_index() == side.pawn_rank() {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if occ.is_vacant(two) {
                        targets.insert(two);
                    }
                }
            }
        }
    }

    for to in pawn_capture_targets(from, side) {
        if occ.side_at(to) == Some(side.opposite()) {
            targets.insert(to);
        }
    }

    targets
}

fn leaper_targets<O: Occupancy + ?Sized>(candidates: SquareSet, side: Side, occ: &O) -> SquareSet {
    candidates
        .into_iter()
        .filter(|&to| occ.side_at(to) != Some(side))
        .collect()
}

fn ray_targets<O: Occupancy + ?Sized>(
    directions: &[(i8, i8)],
    side: Side,
    from: Square,
    occ: &O,
) -> SquareSet {
    let mut targets = SquareSet::EMPTY;
    for &(df, dr) in directions {
        let mut cursor = from.offset(df, dr);
        while let Some(to) = cursor {
            match occ.side_at(to) {
                None => targets.insert(to),
                Some(owner) => {
                    if owner != side {
                        targets.insert(to);
                    }
                    break;
                }
            }
            cursor = to.offset(df, dr);
        }
    }
    targets
}
