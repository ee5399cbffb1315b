//! Move representation.

use crate::Square;
use serde::{Serialize, Serializer};
use std::fmt;

/// Classification of a move's side effects.
///
/// A move carries at most one special kind; the executor uses it to decide
/// which extra board changes follow the plain relocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum MoveKind {
    /// Plain relocation, possibly capturing on the destination.
    Normal = 0,
    /// King steps two squares toward an unmoved Rook; the Rook jumps beside it.
    Castling = 1,
    /// Pawn captures a pawn that just advanced two squares past it.
    EnPassant = 2,
    /// Pawn reaches its final rank and becomes a Queen.
    Promotion = 3,
}

impl MoveKind {
    /// Returns true for castling, en passant and promotion.
    #[inline]
    pub const fn is_special(self) -> bool {
        !matches!(self, MoveKind::Normal)
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveKind::Normal => "normal",
            MoveKind::Castling => "castling",
            MoveKind::EnPassant => "en passant",
            MoveKind::Promotion => "promotion",
        };
        write!(f, "{}", name)
    }
}

/// A move from one square to another, tagged with its [`MoveKind`].
///
/// Encoded compactly: 6 bits from, 6 bits to, 2 bits kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    /// Creates a new move.
    #[inline]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        let encoded = (from.index() as u16) | ((to.index() as u16) << 6) | ((kind as u16) << 12);
        Move(encoded)
    }

    /// Creates a normal move.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveKind::Normal)
    }

    /// Returns the origin square.
    #[inline]
    pub const fn from(self) -> Square {
        Square::from_index_masked((self.0 & 0x3F) as u8)
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        Square::from_index_masked(((self.0 >> 6) & 0x3F) as u8)
    }

    /// Returns the move kind.
    #[inline]
    pub const fn kind(self) -> MoveKind {
        match (self.0 >> 12) & 0x3 {
            1 => MoveKind::Castling,
            2 => MoveKind::EnPassant,
            3 => MoveKind::Promotion,
            _ => MoveKind::Normal,
        }
    }

    /// Placeholder used to fill fixed-size move buffers.
    pub const NULL: Move = Move(0);
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            MoveKind::Normal => write!(f, "Move({}{})", self.from(), self.to()),
            kind => write!(f, "Move({}{} {})", self.from(), self.to(), kind),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())
    }
}

impl Serialize for Move {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Move", 3)?;
        state.serialize_field("from", &self.from())?;
        state.serialize_field("to", &self.to())?;
        state.serialize_field("kind", &self.kind())?;
        state.end()
    }
}
