//! Game management: turn order, move execution and terminal states.
//!
//! [`Game`] is the single owner of the board, the move history and the
//! captured pieces. Callers ask it which moves a square offers and submit
//! moves by origin and destination; everything else is read-only.

use crate::board::{Board, Occupancy, Piece, PieceId};
use crate::error::{EngineError, Invariant};
use crate::movegen::legal::{has_legal_move, is_in_check, legal_moves_for, legal_moves_for_side};
use crate::movegen::special::{castling_rook_squares, en_passant_victim};
use crate::movegen::MoveList;
use crate::rules::{Outcome, RuleConfig, StalemateRule};
use crate::MoveHistory;
use chess_core::{Move, MoveKind, PieceKind, Side, Square};
use serde::Serialize;

/// What happened when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The move as executed, with its special classification.
    pub mov: Move,
    /// The piece taken off the board, if any.
    pub captured: Option<Piece>,
    /// The special move applied, or `None` for a plain move or capture.
    pub special: Option<MoveKind>,
    /// State of the game after the move.
    pub outcome: Outcome,
    /// True if the side now to move is in check.
    pub gives_check: bool,
}

/// One occupied square in a [`GameSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OccupiedSquare {
    pub square: Square,
    pub kind: PieceKind,
    pub side: Side,
    pub id: PieceId,
}

/// Read-only copy of the game state for presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Occupied squares in square order.
    pub squares: Vec<OccupiedSquare>,
    pub side_to_move: Side,
    pub outcome: Outcome,
    pub in_check: bool,
    /// White pieces taken by Black, in capture order.
    pub captured_white: Vec<Piece>,
    /// Black pieces taken by White, in capture order.
    pub captured_black: Vec<Piece>,
    /// Number of moves played.
    pub ply: usize,
}

/// A chess game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Side,
    history: MoveHistory,
    /// Indexed by the side that owned the captured piece.
    captured: [Vec<Piece>; 2],
    outcome: Outcome,
    rules: RuleConfig,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a game from the standard starting position with default rules.
    pub fn new() -> Self {
        Self::with_rules(RuleConfig::default())
    }

    /// Creates a game from the standard starting position.
    pub fn with_rules(rules: RuleConfig) -> Self {
        Game {
            board: Board::standard(),
            side_to_move: Side::White,
            history: MoveHistory::new(),
            captured: [Vec::new(), Vec::new()],
            outcome: Outcome::InProgress,
            rules,
        }
    }

    /// Creates a game from a custom position.
    ///
    /// The history starts empty, so Kings and Rooks on their home squares
    /// may castle. The position may already be terminal.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvariantViolation`] if the board fails
    /// [`Board::validate`], or if the side not on move is in check, since its
    /// King could then be captured.
    pub fn from_board(
        board: Board,
        side_to_move: Side,
        rules: RuleConfig,
    ) -> Result<Self, EngineError> {
        let waiting = side_to_move.opposite();
        let checked = board.validate().and_then(|()| {
            if is_in_check(&board, waiting) {
                Err(Invariant::OpponentInCheck { side: waiting })
            } else {
                Ok(())
            }
        });
        if let Err(violation) = checked {
            tracing::error!("Rejected custom position: {}", violation);
            return Err(violation.into());
        }
        let mut game = Game {
            board,
            side_to_move,
            history: MoveHistory::new(),
            captured: [Vec::new(), Vec::new()],
            outcome: Outcome::InProgress,
            rules,
        };
        game.outcome = game.evaluate_outcome();
        Ok(game)
    }

    /// Restores the standard starting position, keeping the rule options.
    pub fn reset(&mut self) {
        self.board = Board::standard();
        self.side_to_move = Side::White;
        self.history.clear();
        for pieces in &mut self.captured {
            pieces.clear();
        }
        self.outcome = Outcome::InProgress;
        tracing::info!("Game reset to the starting position");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn rules(&self) -> &RuleConfig {
        &self.rules
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Pieces of `side` that have been captured, in capture order.
    pub fn captured(&self, side: Side) -> &[Piece] {
        &self.captured[side.index()]
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        is_in_check(&self.board, self.side_to_move)
    }

    /// Returns the legal moves of the piece on `square`.
    ///
    /// # Errors
    ///
    /// Fails if the game is over, the square is empty, or the piece belongs
    /// to the side not on move.
    pub fn select(&self, square: Square) -> Result<MoveList, EngineError> {
        let piece = self.movable_piece(square)?;
        Ok(legal_moves_for(&self.board, &self.history, piece, &self.rules))
    }

    /// Returns the legal moves of the piece on `square`, or an empty list
    /// when [`select`](Self::select) would fail.
    pub fn legal_moves(&self, square: Square) -> MoveList {
        self.select(square).unwrap_or_default()
    }

    /// Returns every legal move of the side to move.
    pub fn all_legal_moves(&self) -> MoveList {
        if self.outcome.is_over() {
            return MoveList::new();
        }
        legal_moves_for_side(&self.board, &self.history, self.side_to_move, &self.rules)
    }

    /// Plays the move of the piece on `from` to `to`.
    ///
    /// The move must be one of those [`select`](Self::select) offers for
    /// `from`; its special classification is looked up from that list.
    /// On error the game is unchanged.
    pub fn apply_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, EngineError> {
        let piece = match self.movable_piece(from) {
            Ok(piece) => *piece,
            Err(e) => {
                tracing::warn!("Rejected move {}{}: {}", from, to, e);
                return Err(e);
            }
        };

        let legal = legal_moves_for(&self.board, &self.history, &piece, &self.rules);
        let Some(mov) = legal.find_destination(to) else {
            let e = EngineError::IllegalMove { from, to };
            tracing::warn!("Rejected move: {}", e);
            return Err(e);
        };

        let captured = match self.execute(&piece, mov) {
            Ok(captured) => captured,
            Err(violation) => {
                tracing::error!("Move {:?} aborted: {}", mov, violation);
                return Err(violation.into());
            }
        };

        self.side_to_move = self.side_to_move.opposite();
        self.outcome = self.evaluate_outcome();
        let gives_check = self.is_check();

        match self.outcome {
            Outcome::Win(winner) => tracing::info!("Checkmate: {} wins after {}", winner, mov),
            Outcome::Stalemate => tracing::info!("Stalemate after {}", mov),
            Outcome::InProgress => {}
        }

        Ok(MoveOutcome {
            mov,
            captured,
            special: Some(mov.kind()).filter(|kind| kind.is_special()),
            outcome: self.outcome,
            gives_check,
        })
    }

    /// Returns a serializable copy of the current state.
    pub fn game_state(&self) -> GameSnapshot {
        GameSnapshot {
            squares: self
                .board
                .pieces()
                .map(|p| OccupiedSquare {
                    square: p.position,
                    kind: p.kind,
                    side: p.side,
                    id: p.id,
                })
                .collect(),
            side_to_move: self.side_to_move,
            outcome: self.outcome,
            in_check: self.is_check(),
            captured_white: self.captured(Side::White).to_vec(),
            captured_black: self.captured(Side::Black).to_vec(),
            ply: self.history.len(),
        }
    }

    fn movable_piece(&self, square: Square) -> Result<&Piece, EngineError> {
        if self.outcome.is_over() {
            return Err(EngineError::GameAlreadyOver);
        }
        let piece = self
            .board
            .piece_at(square)
            .ok_or(EngineError::NoPieceAtSquare(square))?;
        if piece.side != self.side_to_move {
            return Err(EngineError::WrongSideToMove {
                square,
                side: piece.side,
            });
        }
        Ok(piece)
    }

    /// Commits `mov` to the board and history. Returns the captured piece.
    ///
    /// Every invariant is checked before the first mutation.
    fn execute(&mut self, piece: &Piece, mov: Move) -> Result<Option<Piece>, Invariant> {
        let side = piece.side;
        let (from, to) = (mov.from(), mov.to());

        let capture_square = match mov.kind() {
            MoveKind::EnPassant => en_passant_victim(side, to),
            _ => Some(to),
        };
        if let Some(sq) = capture_square {
            if let Some((PieceKind::King, victim_side)) = self.board.occupant(sq) {
                return Err(Invariant::KingCaptured {
                    side: victim_side,
                    square: sq,
                });
            }
        }
        let rook_hop = match mov.kind() {
            MoveKind::Castling => castling_rook_squares(side, to),
            _ => None,
        };
        if let Some((_, rook_to)) = rook_hop {
            if !self.board.is_vacant(rook_to) {
                return Err(Invariant::DuplicateOccupancy(rook_to));
            }
        }

        let captured = capture_square.and_then(|sq| self.board.remove(sq));
        if let Some(victim) = captured {
            tracing::debug!("{} {} captured on {}", victim.side, victim.kind, victim.position);
            self.captured[victim.side.index()].push(victim);
        }

        self.board.relocate(from, to)?;
        tracing::debug!("{} {} {}", side, piece.kind, mov);

        if let Some((rook_from, rook_to)) = rook_hop {
            self.board.relocate(rook_from, rook_to)?;
            tracing::debug!("Castling Rook {}{}", rook_from, rook_to);
        }

        if mov.kind() == MoveKind::Promotion && to.rank_index() == side.promotion_rank() {
            self.board.remove(to);
            let id = self.board.spawn(PieceKind::Queen, side, to)?;
            tracing::debug!("Pawn promoted to Queen {:?} on {}", id, to);
        }

        self.history.push(from, to);
        Ok(captured)
    }

    /// Decides the state of the game for the side now to move.
    fn evaluate_outcome(&self) -> Outcome {
        let side = self.side_to_move;
        if has_legal_move(&self.board, &self.history, side, &self.rules) {
            return Outcome::InProgress;
        }
        if is_in_check(&self.board, side) {
            Outcome::Win(side.opposite())
        } else {
            match self.rules.stalemate {
                StalemateRule::Draw => Outcome::Stalemate,
                StalemateRule::Unresolved => Outcome::InProgress,
            }
        }
    }
}
