//! Castling, en passant and promotion detection.
//!
//! These moves depend on more than the current occupancy: castling needs
//! the King and Rook never to have moved, and en passant needs the previous
//! move to have been a two-square pawn advance. Both are answered from the
//! [`MoveHistory`] alone.

use super::{generate_pseudo_legal, MoveList};
use crate::board::{Board, Occupancy, Piece};
use crate::MoveHistory;
use chess_core::{Move, MoveKind, PieceKind, Side, Square};

const KING_HOME_FILE: u8 = 4;
const QUEENSIDE_ROOK_FILE: u8 = 0;
const KINGSIDE_ROOK_FILE: u8 = 7;

/// Returns the pseudo-legal moves of `piece` plus any special moves it may
/// make, each tagged with its [`MoveKind`].
///
/// Nothing here checks whether the mover's King ends up attacked.
pub fn candidate_moves(board: &Board, history: &MoveHistory, piece: &Piece) -> MoveList {
    let mut moves = MoveList::new();
    let from = piece.position;

    let kind = if promotion_pending(piece) {
        MoveKind::Promotion
    } else {
        MoveKind::Normal
    };
    for to in generate_pseudo_legal(piece.kind, piece.side, from, board) {
        moves.push(Move::new(from, to, kind));
    }

    if let Some(to) = en_passant_target(board, history, piece) {
        moves.push(Move::new(from, to, MoveKind::EnPassant));
    }

    for to in castling_targets(board, history, piece).into_iter().flatten() {
        moves.push(Move::new(from, to, MoveKind::Castling));
    }

    moves
}

/// Returns true if `piece` is a pawn one step from its final rank, so its
/// next move promotes.
pub fn promotion_pending(piece: &Piece) -> bool {
    piece.kind == PieceKind::Pawn
        && piece
            .position
            .offset(0, piece.side.forward())
            .is_some_and(|next| next.rank_index() == piece.side.promotion_rank())
}

/// Returns the en passant destination for `piece`, if the last move was an
/// enemy pawn's two-square advance that landed right beside it.
pub fn en_passant_target(board: &Board, history: &MoveHistory, piece: &Piece) -> Option<Square> {
    if piece.kind != PieceKind::Pawn {
        return None;
    }
    let last = history.last()?;
    if board.occupant(last.to) != Some((PieceKind::Pawn, piece.side.opposite())) {
        return None;
    }
    if last.rank_distance() != 2 || last.from.file_index() != last.to.file_index() {
        return None;
    }
    let here = piece.position;
    if last.to.rank_index() != here.rank_index()
        || last.to.file_index().abs_diff(here.file_index()) != 1
    {
        return None;
    }
    last.to
        .offset(0, piece.side.forward())
        .filter(|&target| board.is_vacant(target))
}

/// Returns the King destinations for castling toward the queenside and
/// kingside Rooks, in that order.
///
/// Requires the King and the Rook to stand on their home squares, neither
/// home square to appear as an origin in `history`, and every square
/// strictly between them to be empty. Attacks on the King's path are not
/// considered here.
pub fn castling_targets(
    board: &Board,
    history: &MoveHistory,
    piece: &Piece,
) -> [Option<Square>; 2] {
    let mut targets = [None, None];
    if piece.kind != PieceKind::King {
        return targets;
    }
    let side = piece.side;
    let Some(king_home) = king_home(side) else {
        return targets;
    };
    if piece.position != king_home || history.has_moved_from(king_home) {
        return targets;
    }

    for (slot, rook_file) in [QUEENSIDE_ROOK_FILE, KINGSIDE_ROOK_FILE].into_iter().enumerate() {
        let Some(rook_home) = Square::from_coords(rook_file, side.home_rank()) else {
            continue;
        };
        if board.occupant(rook_home) != Some((PieceKind::Rook, side))
            || history.has_moved_from(rook_home)
        {
            continue;
        }
        let (low, high) = if rook_file < KING_HOME_FILE {
            (rook_file + 1, KING_HOME_FILE)
        } else {
            (KING_HOME_FILE + 1, rook_file)
        };
        let path_clear = (low..high)
            .filter_map(|file| Square::from_coords(file, side.home_rank()))
            .all(|sq| board.is_vacant(sq));
        if path_clear {
            let step = if rook_file < KING_HOME_FILE { -2 } else { 2 };
            targets[slot] = king_home.offset(step, 0);
        }
    }
    targets
}

/// Returns where the Rook starts and lands when the King castles to `king_to`.
pub fn castling_rook_squares(side: Side, king_to: Square) -> Option<(Square, Square)> {
    let rank = side.home_rank();
    let (rook_file, landing_file) = match king_to.file_index() {
        6 => (KINGSIDE_ROOK_FILE, 5),
        2 => (QUEENSIDE_ROOK_FILE, 3),
        _ => return None,
    };
    if king_to.rank_index() != rank {
        return None;
    }
    Some((
        Square::from_coords(rook_file, rank)?,
        Square::from_coords(landing_file, rank)?,
    ))
}

/// Returns the square holding the pawn captured by an en passant move of
/// `side` landing on `to`.
pub fn en_passant_victim(side: Side, to: Square) -> Option<Square> {
    to.offset(0, -side.forward())
}

fn king_home(side: Side) -> Option<Square> {
    Square::from_coords(KING_HOME_FILE, side.home_rank())
}
