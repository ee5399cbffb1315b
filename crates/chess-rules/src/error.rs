//! Error taxonomy for move requests and board bookkeeping.

use chess_core::{Side, Square};
use thiserror::Error;

/// A broken board invariant.
///
/// These only arise from a bug in the legality filter or from a caller
/// assembling an impossible custom position; the engine logs them at error
/// level and leaves the board unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Invariant {
    #[error("a move would capture the {side} King on {square}")]
    KingCaptured { side: Side, square: Square },

    #[error("square {0} is already occupied")]
    DuplicateOccupancy(Square),

    #[error("no piece to move on {0}")]
    EmptyOrigin(Square),

    #[error("piece on {slot} believes it stands on {recorded}")]
    PositionMismatch { slot: Square, recorded: Square },

    #[error("{side} has {count} Kings, expected exactly one")]
    KingCount { side: Side, count: usize },

    #[error("the {side} King is in check with {side} not on move")]
    OpponentInCheck { side: Side },
}

/// Errors returned by [`Game`](crate::Game) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no piece on {0}")]
    NoPieceAtSquare(Square),

    #[error("the {side} piece on {square} cannot move: it is not {side}'s turn")]
    WrongSideToMove { square: Square, side: Side },

    #[error("illegal move: {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("game has already ended")]
    GameAlreadyOver,

    #[error("invariant violated: {0}")]
    InvariantViolation(#[from] Invariant),
}
