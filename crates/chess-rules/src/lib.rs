//! Two-player chess rules engine.
//!
//! This crate provides:
//! - [`Board`] - piece arena plus 8×8 occupancy, with stable [`PieceId`]s
//! - [`Game`] - turn order, move execution, check and checkmate detection
//! - [`generate_pseudo_legal`] - per-kind move geometry over any [`Occupancy`]
//! - [`movegen::special`] - castling, en passant and promotion from [`MoveHistory`]
//! - [`movegen::legal`] - the self-check filter
//! - [`RuleConfig`] - castling and stalemate options, loadable from TOML
//!
//! # Architecture
//!
//! Move generation is a pure function of a piece and a read-only occupancy
//! view. Legality is decided by replaying each candidate on a scratch copy
//! of the occupancy and asking whether any enemy piece could then reach the
//! mover's King. Only [`Game::apply_move`] mutates the board.
//!
//! # Example
//!
//! ```
//! use chess_rules::{Game, Outcome, Square};
//!
//! let sq = |name: &str| Square::from_algebraic(name).unwrap();
//!
//! let mut game = Game::new();
//! assert_eq!(game.legal_moves(sq("g1")).len(), 2);
//!
//! for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     game.apply_move(sq(from), sq(to)).unwrap();
//! }
//! assert_eq!(game.outcome(), Outcome::Win(chess_rules::Side::Black));
//! ```

mod board;
mod error;
mod game;
mod history;
pub mod movegen;
pub mod rules;
mod square_set;

pub use board::{Board, Occupancy, Piece, PieceId};
pub use chess_core::{File, Move, MoveKind, PieceKind, Rank, Side, Square};
pub use error::{EngineError, Invariant};
pub use game::{Game, GameSnapshot, MoveOutcome, OccupiedSquare};
pub use history::{MoveHistory, RecordedMove};
pub use movegen::perft::{perft, perft_divide};
pub use movegen::{generate_pseudo_legal, MoveList};
pub use rules::{CastlingRule, ConfigError, Outcome, RuleConfig, StalemateRule};
pub use square_set::SquareSet;
