//! Board state: live pieces and the 8×8 occupancy grid.

use chess_core::{PieceKind, Side, Square};
use serde::Serialize;
use std::fmt;

use crate::error::Invariant;

/// Stable identity of a piece for the whole game.
///
/// Ids are handed out in spawn order and never reused, so a promoted
/// pawn's Queen gets a fresh id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PieceId(u16);

impl PieceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A piece on (or taken from) the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub side: Side,
    /// Mirrors the board slot holding this piece. For captured pieces this
    /// is the square they were taken on.
    pub position: Square,
}

/// Read-only view of which kind and side stands on each square.
///
/// Move generation only ever needs this much, so it runs unchanged over
/// the real [`Board`] and over the legality filter's scratch copies.
pub trait Occupancy {
    fn occupant(&self, sq: Square) -> Option<(PieceKind, Side)>;

    #[inline]
    fn is_vacant(&self, sq: Square) -> bool {
        self.occupant(sq).is_none()
    }

    #[inline]
    fn side_at(&self, sq: Square) -> Option<Side> {
        self.occupant(sq).map(|(_, side)| side)
    }
}

/// The single source of truth for piece placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    slots: [Option<PieceId>; 64],
    /// Indexed by [`PieceId`]; `None` once a piece leaves the board.
    pieces: Vec<Option<Piece>>,
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty() -> Self {
        Board {
            slots: [None; 64],
            pieces: Vec::with_capacity(32),
        }
    }

    /// Creates the standard starting layout.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for side in Side::ALL {
            for (file, kind) in PieceKind::BACK_RANK.into_iter().enumerate() {
                if let Some(sq) = Square::from_coords(file as u8, side.home_rank()) {
                    board.push_piece(kind, side, sq);
                }
            }
            for file in 0..8 {
                if let Some(sq) = Square::from_coords(file, side.pawn_rank()) {
                    board.push_piece(PieceKind::Pawn, side, sq);
                }
            }
        }
        board
    }

    /// Places a new piece on an empty square.
    pub fn spawn(&mut self, kind: PieceKind, side: Side, sq: Square) -> Result<PieceId, Invariant> {
        if self.slots[sq.index() as usize].is_some() {
            return Err(Invariant::DuplicateOccupancy(sq));
        }
        Ok(self.push_piece(kind, side, sq))
    }

    // Callers guarantee `sq` is empty.
    fn push_piece(&mut self, kind: PieceKind, side: Side, sq: Square) -> PieceId {
        let id = PieceId(self.pieces.len() as u16);
        self.pieces.push(Some(Piece {
            id,
            kind,
            side,
            position: sq,
        }));
        self.slots[sq.index() as usize] = Some(id);
        id
    }

    /// Returns the piece standing on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<&Piece> {
        self.slots[sq.index() as usize].and_then(|id| self.piece(id))
    }

    /// Returns the live piece with the given id.
    #[inline]
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index()).and_then(Option::as_ref)
    }

    /// Returns the id occupying `sq`, if any.
    #[inline]
    pub fn id_at(&self, sq: Square) -> Option<PieceId> {
        self.slots[sq.index() as usize]
    }

    /// Iterates over every live piece in square order.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.slots
            .iter()
            .filter_map(move |slot| slot.and_then(|id| self.piece(id)))
    }

    /// Iterates over the live pieces of one side in square order.
    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces().filter(move |p| p.side == side)
    }

    /// Returns the number of pieces on the board.
    pub fn piece_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Returns the square of `side`'s King.
    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces_of(side)
            .find(|p| p.kind == PieceKind::King)
            .map(|p| p.position)
    }

    pub(crate) fn slots(&self) -> &[Option<PieceId>; 64] {
        &self.slots
    }

    /// Moves the piece on `from` to the empty square `to`.
    pub(crate) fn relocate(&mut self, from: Square, to: Square) -> Result<(), Invariant> {
        if self.slots[to.index() as usize].is_some() {
            return Err(Invariant::DuplicateOccupancy(to));
        }
        let Some(id) = self.slots[from.index() as usize].take() else {
            return Err(Invariant::EmptyOrigin(from));
        };
        self.slots[to.index() as usize] = Some(id);
        if let Some(Some(piece)) = self.pieces.get_mut(id.index()) {
            piece.position = to;
        }
        Ok(())
    }

    /// Takes the piece on `sq` off the board.
    pub(crate) fn remove(&mut self, sq: Square) -> Option<Piece> {
        let id = self.slots[sq.index() as usize].take()?;
        self.pieces.get_mut(id.index()).and_then(Option::take)
    }

    /// Checks that every slot agrees with its piece and each side has one King.
    pub fn validate(&self) -> Result<(), Invariant> {
        for (idx, slot) in self.slots.iter().enumerate() {
            let Some(id) = slot else { continue };
            let slot_sq = Square::from_index_masked(idx as u8);
            match self.piece(*id) {
                Some(piece) if piece.position == slot_sq => {}
                Some(piece) => {
                    return Err(Invariant::PositionMismatch {
                        slot: slot_sq,
                        recorded: piece.position,
                    })
                }
                None => {
                    return Err(Invariant::PositionMismatch {
                        slot: slot_sq,
                        recorded: slot_sq,
                    })
                }
            }
        }
        for side in Side::ALL {
            let count = self
                .pieces_of(side)
                .filter(|p| p.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(Invariant::KingCount { side, count });
            }
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Occupancy for Board {
    #[inline]
    fn occupant(&self, sq: Square) -> Option<(PieceKind, Side)> {
        self.piece_at(sq).map(|p| (p.kind, p.side))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let symbol = Square::from_coords(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map(|p| p.kind.symbol(p.side))
                    .unwrap_or('.');
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
