//! Append-only record of executed moves.

use chess_core::Square;
use serde::Serialize;

/// One executed move, as origin and destination only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordedMove {
    pub from: Square,
    pub to: Square,
}

impl RecordedMove {
    /// Number of ranks covered by the move, ignoring direction.
    #[inline]
    pub fn rank_distance(self) -> u8 {
        self.from.rank_index().abs_diff(self.to.rank_index())
    }
}

/// Every move played since the last reset, oldest first.
///
/// Castling rights come from scanning the whole record for a home square
/// used as an origin; en passant rights only look at the last entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MoveHistory {
    moves: Vec<RecordedMove>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, from: Square, to: Square) {
        self.moves.push(RecordedMove { from, to });
    }

    pub(crate) fn clear(&mut self) {
        self.moves.clear();
    }

    /// The most recent move, if any.
    #[inline]
    pub fn last(&self) -> Option<RecordedMove> {
        self.moves.last().copied()
    }

    /// Returns true if any recorded move started on `sq`.
    pub fn has_moved_from(&self, sq: Square) -> bool {
        self.moves.iter().any(|m| m.from == sq)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[RecordedMove] {
        &self.moves
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn records_in_order() {
        let mut history = MoveHistory::new();
        assert!(history.is_empty());
        assert_eq!(history.last(), None);

        history.push(sq("e2"), sq("e4"));
        history.push(sq("e7"), sq("e5"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|m| m.from), Some(sq("e7")));
        assert_eq!(history.as_slice()[0].to, sq("e4"));
    }

    #[test]
    fn origin_lookup() {
        let mut history = MoveHistory::new();
        history.push(Square::E1, Square::F1);
        history.push(Square::F1, Square::E1);
        assert!(history.has_moved_from(Square::E1));
        assert!(!history.has_moved_from(Square::H1));
    }

    #[test]
    fn rank_distance() {
        let double = RecordedMove {
            from: sq("d7"),
            to: sq("d5"),
        };
        assert_eq!(double.rank_distance(), 2);
        let sideways = RecordedMove {
            from: Square::A1,
            to: Square::D1,
        };
        assert_eq!(sideways.rank_distance(), 0);
    }
}
