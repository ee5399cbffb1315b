//! Core value types for the chess rules engine.
//!
//! This crate provides the plain data shared by the engine and its callers:
//! - [`PieceKind`] and [`Side`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Move`] and [`MoveKind`] for moves and their special classification

mod mov;
mod piece;
mod side;
mod square;

pub use mov::{Move, MoveKind};
pub use piece::PieceKind;
pub use side::Side;
pub use square::{File, Rank, Square};
