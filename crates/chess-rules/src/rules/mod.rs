//! Game outcomes and the rule options that decide them.
//!
//! Two points of the rules are configurable: whether castling may pass
//! through attacked squares, and whether stalemate ends the game. The
//! defaults reproduce the classic behaviour of this engine for castling
//! and treat stalemate as a draw.

mod config;

pub use config::{ConfigError, RuleConfig};

use chess_core::Side;
use serde::{Deserialize, Serialize};

/// State of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "winner")]
pub enum Outcome {
    /// The game continues.
    InProgress,
    /// The side checkmated its opponent.
    Win(Side),
    /// The side to move has no legal move and is not in check.
    Stalemate,
}

impl Outcome {
    /// Returns true once no more moves may be played.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner, if any.
    #[inline]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::Win(side) => Some(side),
            _ => None,
        }
    }
}

/// Conditions under which castling is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastlingRule {
    /// King and Rook unmoved, squares between them empty. The King may
    /// castle out of or through check; it may never land in check.
    #[default]
    SquaresEmpty,
    /// As above, and the King may not start on or cross an attacked square.
    SafePassage,
}

/// What happens when the side to move has no legal move and is not in check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalemateRule {
    /// The game ends as [`Outcome::Stalemate`].
    #[default]
    Draw,
    /// The game stays [`Outcome::InProgress`] with no moves available.
    Unresolved,
}
