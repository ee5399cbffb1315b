//! Piece kinds.

use crate::Side;
use serde::Serialize;

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// The back-rank layout from file a to file h.
    pub const BACK_RANK: [PieceKind; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];

    /// Returns a one-letter symbol, uppercase for White and lowercase for Black.
    pub const fn symbol(self, side: Side) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols() {
        assert_eq!(PieceKind::Pawn.symbol(Side::White), 'P');
        assert_eq!(PieceKind::Pawn.symbol(Side::Black), 'p');
        assert_eq!(PieceKind::King.symbol(Side::White), 'K');
        assert_eq!(PieceKind::Knight.symbol(Side::Black), 'n');
    }

    #[test]
    fn back_rank_has_one_king_and_queen() {
        let kings = PieceKind::BACK_RANK
            .iter()
            .filter(|k| **k == PieceKind::King)
            .count();
        let queens = PieceKind::BACK_RANK
            .iter()
            .filter(|k| **k == PieceKind::Queen)
            .count();
        assert_eq!(kings, 1);
        assert_eq!(queens, 1);
        assert_eq!(PieceKind::BACK_RANK[4], PieceKind::King);
    }
}
