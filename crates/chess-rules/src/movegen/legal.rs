//! Self-check filtering.
//!
//! Each candidate move is played on a scratch copy of the occupancy grid
//! (piece ids only, the real [`Board`] is never touched) and dropped if any
//! enemy piece could then reach the mover's King with a pseudo-legal move.

use super::special::{candidate_moves, castling_rook_squares, en_passant_victim};
use super::{generate_pseudo_legal, MoveList};
use crate::board::{Board, Occupancy, Piece, PieceId};
use crate::rules::{CastlingRule, RuleConfig};
use crate::MoveHistory;
use chess_core::{Move, MoveKind, PieceKind, Side, Square};

/// Occupancy of a hypothetical position, borrowed piece data from the real board.
struct Scratch<'a> {
    board: &'a Board,
    slots: [Option<PieceId>; 64],
}

impl<'a> Scratch<'a> {
    fn new(board: &'a Board) -> Self {
        Scratch {
            board,
            slots: *board.slots(),
        }
    }

    /// Plays `m` for `side`, including the Rook hop of castling and the
    /// pawn removal of en passant. A piece on the destination simply vanishes.
    fn play(&mut self, m: Move, side: Side) {
        let mover = self.slots[m.from().index() as usize].take();
        match m.kind() {
            MoveKind::EnPassant => {
                if let Some(victim) = en_passant_victim(side, m.to()) {
                    self.slots[victim.index() as usize] = None;
                }
            }
            MoveKind::Castling => {
                if let Some((rook_from, rook_to)) = castling_rook_squares(side, m.to()) {
                    let rook = self.slots[rook_from.index() as usize].take();
                    self.slots[rook_to.index() as usize] = rook;
                }
            }
            MoveKind::Normal | MoveKind::Promotion => {}
        }
        self.slots[m.to().index() as usize] = mover;
    }
}

impl Occupancy for Scratch<'_> {
    #[inline]
    fn occupant(&self, sq: Square) -> Option<(PieceKind, Side)> {
        self.slots[sq.index() as usize]
            .and_then(|id| self.board.piece(id))
            .map(|p| (p.kind, p.side))
    }
}

/// Returns true if some piece of `attacker` has a pseudo-legal move onto `target`.
///
/// Pawns only reach diagonals holding an enemy, so an empty `target` is
/// never reported as attacked by a pawn.
pub fn is_square_attacked<O: Occupancy + ?Sized>(occ: &O, target: Square, attacker: Side) -> bool {
    (0..64u8).map(Square::from_index_masked).any(|from| {
        matches!(occ.occupant(from), Some((kind, side)) if side == attacker
            && generate_pseudo_legal(kind, side, from, occ).contains(target))
    })
}

/// Returns true if `side`'s King is attacked on the real board.
///
/// A board without a King for `side` is never in check.
pub fn is_in_check(board: &Board, side: Side) -> bool {
    board
        .king_square(side)
        .is_some_and(|king| is_square_attacked(board, king, side.opposite()))
}

/// Returns true if playing `m` with `piece` leaves `piece.side`'s King unattacked.
pub fn leaves_king_safe(board: &Board, piece: &Piece, m: Move) -> bool {
    let king = if piece.kind == PieceKind::King {
        m.to()
    } else {
        match board.king_square(piece.side) {
            Some(sq) => sq,
            None => return true,
        }
    };
    let mut scratch = Scratch::new(board);
    scratch.play(m, piece.side);
    !is_square_attacked(&scratch, king, piece.side.opposite())
}

/// Returns true if the King neither starts on nor crosses an attacked square.
fn castling_path_safe(board: &Board, king: &Piece, m: Move) -> bool {
    if is_in_check(board, king.side) {
        return false;
    }
    let step = if m.to().file_index() > m.from().file_index() { 1 } else { -1 };
    let Some(transit) = m.from().offset(step, 0) else {
        return false;
    };
    leaves_king_safe(board, king, Move::normal(m.from(), transit))
}

/// Returns the legal moves of `piece`, special moves included.
pub fn legal_moves_for(
    board: &Board,
    history: &MoveHistory,
    piece: &Piece,
    rules: &RuleConfig,
) -> MoveList {
    let mut moves = candidate_moves(board, history, piece);
    moves.retain(|&m| {
        if m.kind() == MoveKind::Castling
            && rules.castling == CastlingRule::SafePassage
            && !castling_path_safe(board, piece, m)
        {
            return false;
        }
        leaves_king_safe(board, piece, m)
    });
    moves
}

/// Returns the legal moves of every piece of `side`.
pub fn legal_moves_for_side(
    board: &Board,
    history: &MoveHistory,
    side: Side,
    rules: &RuleConfig,
) -> MoveList {
    let mut all = MoveList::new();
    for piece in board.pieces_of(side) {
        all.extend_from(&legal_moves_for(board, history, piece, rules));
    }
    all
}

/// Returns true if `side` has at least one legal move.
pub fn has_legal_move(
    board: &Board,
    history: &MoveHistory,
    side: Side,
    rules: &RuleConfig,
) -> bool {
    board
        .pieces_of(side)
        .any(|piece| !legal_moves_for(board, history, piece, rules).is_empty())
}
