//! End-to-end game scenarios: special moves, terminal states, errors.

use chess_rules::{
    Board, CastlingRule, EngineError, Game, Invariant, MoveKind, Outcome, PieceKind, RuleConfig,
    Side, Square, StalemateRule,
};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play(game: &mut Game, moves: &[(&str, &str)]) {
    for (from, to) in moves {
        game.apply_move(sq(from), sq(to))
            .unwrap_or_else(|e| panic!("{from}{to} rejected: {e}"));
    }
}

fn board_with(pieces: &[(PieceKind, Side, &str)]) -> Board {
    let mut board = Board::empty();
    for &(kind, side, name) in pieces {
        board.spawn(kind, side, sq(name)).unwrap();
    }
    board
}

fn safe_passage() -> RuleConfig {
    RuleConfig {
        castling: CastlingRule::SafePassage,
        ..RuleConfig::default()
    }
}

#[test]
fn starting_position_has_twenty_moves() {
    let game = Game::new();
    assert_eq!(game.side_to_move(), Side::White);

    let moves = game.all_legal_moves();
    assert_eq!(moves.len(), 20);
    let pawn_moves = moves
        .as_slice()
        .iter()
        .filter(|m| game.board().piece_at(m.from()).map(|p| p.kind) == Some(PieceKind::Pawn))
        .count();
    assert_eq!(pawn_moves, 16);
}

#[test]
fn en_passant_right_after_double_step() {
    let mut game = Game::new();
    play(&mut game, &[("a2", "a3"), ("e7", "e5"), ("a3", "a4"), ("e5", "e4"), ("d2", "d4")]);

    let moves = game.legal_moves(sq("e4"));
    let ep = moves.find_destination(sq("d3")).unwrap();
    assert_eq!(ep.kind(), MoveKind::EnPassant);

    let outcome = game.apply_move(sq("e4"), sq("d3")).unwrap();
    assert_eq!(outcome.special, Some(MoveKind::EnPassant));
    let victim = outcome.captured.unwrap();
    assert_eq!(
        (victim.kind, victim.side, victim.position),
        (PieceKind::Pawn, Side::White, sq("d4"))
    );

    assert!(game.board().piece_at(sq("d4")).is_none());
    assert_eq!(game.board().piece_at(sq("d3")).map(|p| p.side), Some(Side::Black));
    assert_eq!(game.captured(Side::White), &[victim]);
}

#[test]
fn white_captures_en_passant() {
    let mut game = Game::new();
    play(&mut game, &[("e2", "e4"), ("a7", "a6"), ("e4", "e5"), ("d7", "d5")]);

    let outcome = game.apply_move(sq("e5"), sq("d6")).unwrap();
    assert_eq!(outcome.special, Some(MoveKind::EnPassant));
    let victim = outcome.captured.unwrap();
    assert_eq!(
        (victim.kind, victim.side, victim.position),
        (PieceKind::Pawn, Side::Black, sq("d5"))
    );

    assert!(game.board().piece_at(sq("d5")).is_none());
    assert_eq!(game.board().piece_at(sq("d6")).map(|p| p.side), Some(Side::White));
    assert_eq!(game.captured(Side::Black), &[victim]);
    game.board().validate().unwrap();
}

#[test]
fn en_passant_expires_after_intervening_move() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            ("a2", "a3"),
            ("e7", "e5"),
            ("a3", "a4"),
            ("e5", "e4"),
            ("d2", "d4"),
            ("h7", "h6"),
            ("h2", "h3"),
        ],
    );

    assert!(game.legal_moves(sq("e4")).find_destination(sq("d3")).is_none());
    assert_eq!(
        game.apply_move(sq("e4"), sq("d3")).unwrap_err(),
        EngineError::IllegalMove {
            from: sq("e4"),
            to: sq("d3")
        }
    );
}

fn castling_position() -> Board {
    board_with(&[
        (PieceKind::King, Side::White, "e1"),
        (PieceKind::Rook, Side::White, "a1"),
        (PieceKind::Rook, Side::White, "h1"),
        (PieceKind::King, Side::Black, "e8"),
        (PieceKind::Rook, Side::Black, "a8"),
        (PieceKind::Rook, Side::Black, "h8"),
    ])
}

#[test]
fn castling_kingside_moves_the_rook() {
    let mut game =
        Game::from_board(castling_position(), Side::White, RuleConfig::default()).unwrap();

    let moves = game.legal_moves(Square::E1);
    assert_eq!(moves.find_destination(Square::G1).map(|m| m.kind()), Some(MoveKind::Castling));
    assert_eq!(moves.find_destination(Square::C1).map(|m| m.kind()), Some(MoveKind::Castling));

    let rook_id = game.board().id_at(Square::H1);
    let outcome = game.apply_move(Square::E1, Square::G1).unwrap();
    assert_eq!(outcome.special, Some(MoveKind::Castling));
    assert_eq!(game.board().piece_at(Square::G1).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(game.board().id_at(Square::F1), rook_id);
    assert!(game.board().piece_at(Square::H1).is_none());
    game.board().validate().unwrap();
}

#[test]
fn castling_queenside_moves_the_rook() {
    let mut game =
        Game::from_board(castling_position(), Side::Black, RuleConfig::default()).unwrap();

    game.apply_move(Square::E8, Square::C8).unwrap();
    assert_eq!(game.board().piece_at(Square::C8).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(game.board().piece_at(Square::D8).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(game.board().piece_at(Square::A8).is_none());
}

#[test]
fn castling_rights_lost_after_king_returns() {
    let mut game =
        Game::from_board(castling_position(), Side::White, RuleConfig::default()).unwrap();
    play(&mut game, &[("e1", "e2"), ("a8", "b8"), ("e2", "e1"), ("b8", "a8")]);

    let moves = game.legal_moves(Square::E1);
    assert!(moves.as_slice().iter().all(|m| m.kind() != MoveKind::Castling));
}

#[test]
fn castling_through_attack_depends_on_rules() {
    let mut board = castling_position();
    board.spawn(PieceKind::Rook, Side::Black, sq("f5")).unwrap();

    let lenient = Game::from_board(board.clone(), Side::White, RuleConfig::default()).unwrap();
    assert!(lenient.legal_moves(Square::E1).find_destination(Square::G1).is_some());

    let strict = Game::from_board(board, Side::White, safe_passage()).unwrap();
    assert!(strict.legal_moves(Square::E1).find_destination(Square::G1).is_none());
    assert!(strict.legal_moves(Square::E1).find_destination(Square::C1).is_some());
}

#[test]
fn castling_out_of_check_depends_on_rules() {
    let mut board = castling_position();
    board.spawn(PieceKind::Rook, Side::Black, sq("e5")).unwrap();

    let lenient = Game::from_board(board.clone(), Side::White, RuleConfig::default()).unwrap();
    assert!(lenient.is_check());
    assert!(lenient.legal_moves(Square::E1).find_destination(Square::G1).is_some());

    let strict = Game::from_board(board, Side::White, safe_passage()).unwrap();
    let moves = strict.legal_moves(Square::E1);
    assert!(moves.as_slice().iter().all(|m| m.kind() != MoveKind::Castling));
}

#[test]
fn promotion_replaces_pawn_with_new_queen() {
    let board = board_with(&[
        (PieceKind::King, Side::White, "h1"),
        (PieceKind::King, Side::Black, "h6"),
        (PieceKind::Pawn, Side::White, "b7"),
    ]);
    let mut game = Game::from_board(board, Side::White, RuleConfig::default()).unwrap();
    let pawn_id = game.board().id_at(sq("b7")).unwrap();

    let outcome = game.apply_move(sq("b7"), sq("b8")).unwrap();
    assert_eq!(outcome.special, Some(MoveKind::Promotion));

    let queen = *game.board().piece_at(sq("b8")).unwrap();
    assert_eq!((queen.kind, queen.side), (PieceKind::Queen, Side::White));
    assert_ne!(queen.id, pawn_id);
    assert!(game.board().piece(pawn_id).is_none());
    assert!(game.board().pieces().all(|p| p.kind != PieceKind::Pawn));
    assert_eq!(game.board().piece_count(), 3);
}

#[test]
fn promotion_by_capture() {
    let board = board_with(&[
        (PieceKind::King, Side::White, "e1"),
        (PieceKind::King, Side::Black, "h5"),
        (PieceKind::Pawn, Side::Black, "g2"),
        (PieceKind::Knight, Side::White, "f1"),
    ]);
    let mut game = Game::from_board(board, Side::Black, RuleConfig::default()).unwrap();

    let outcome = game.apply_move(sq("g2"), sq("f1")).unwrap();
    assert_eq!(outcome.captured.map(|p| p.kind), Some(PieceKind::Knight));
    assert_eq!(
        game.board().piece_at(sq("f1")).map(|p| (p.kind, p.side)),
        Some((PieceKind::Queen, Side::Black))
    );
    assert!(outcome.gives_check);
}

#[test]
fn fools_mate() {
    let mut game = Game::new();
    play(&mut game, &[("f2", "f3"), ("e7", "e5"), ("g2", "g4")]);
    let outcome = game.apply_move(sq("d8"), sq("h4")).unwrap();

    assert_eq!(outcome.outcome, Outcome::Win(Side::Black));
    assert_eq!(game.game_state().outcome, Outcome::Win(Side::Black));
    assert!(game.is_check());
    for piece in game.board().pieces_of(Side::White) {
        assert!(game.legal_moves(piece.position).is_empty());
    }
}

fn stalemate_setup() -> Board {
    board_with(&[
        (PieceKind::King, Side::Black, "h8"),
        (PieceKind::King, Side::White, "g6"),
        (PieceKind::Queen, Side::White, "e7"),
    ])
}

#[test]
fn stalemate_is_a_draw_by_default() {
    let mut game = Game::from_board(stalemate_setup(), Side::White, RuleConfig::default()).unwrap();
    let outcome = game.apply_move(sq("e7"), sq("f7")).unwrap();

    assert_eq!(outcome.outcome, Outcome::Stalemate);
    assert!(!outcome.gives_check);
    assert_eq!(
        game.apply_move(sq("h8"), sq("g8")).unwrap_err(),
        EngineError::GameAlreadyOver
    );
}

#[test]
fn stalemate_can_stay_unresolved() {
    let rules = RuleConfig {
        stalemate: StalemateRule::Unresolved,
        ..RuleConfig::default()
    };
    let mut game = Game::from_board(stalemate_setup(), Side::White, rules).unwrap();
    game.apply_move(sq("e7"), sq("f7")).unwrap();

    assert_eq!(game.outcome(), Outcome::InProgress);
    assert_eq!(game.side_to_move(), Side::Black);
    assert!(game.all_legal_moves().is_empty());
    assert!(game.apply_move(sq("h8"), sq("g8")).is_err());
}

#[test]
fn terminal_custom_position() {
    let board = board_with(&[
        (PieceKind::King, Side::Black, "h8"),
        (PieceKind::King, Side::White, "g6"),
        (PieceKind::Queen, Side::White, "f7"),
    ]);
    let game = Game::from_board(board, Side::Black, RuleConfig::default()).unwrap();
    assert_eq!(game.outcome(), Outcome::Stalemate);
}

#[test]
fn error_taxonomy() {
    let mut game = Game::new();

    assert_eq!(
        game.apply_move(sq("e4"), sq("e5")).unwrap_err(),
        EngineError::NoPieceAtSquare(sq("e4"))
    );
    assert_eq!(
        game.apply_move(sq("e7"), sq("e5")).unwrap_err(),
        EngineError::WrongSideToMove {
            square: sq("e7"),
            side: Side::Black
        }
    );
    assert_eq!(
        game.apply_move(sq("e2"), sq("e5")).unwrap_err(),
        EngineError::IllegalMove {
            from: sq("e2"),
            to: sq("e5")
        }
    );
    assert_eq!(
        game.apply_move(Square::A1, sq("a3")).unwrap_err().to_string(),
        "illegal move: a1a3"
    );
    assert!(game.history().is_empty());
    assert_eq!(game.board(), &Board::standard());
}

#[test]
fn position_with_capturable_king_is_rejected() {
    let board = board_with(&[
        (PieceKind::King, Side::White, "e1"),
        (PieceKind::King, Side::Black, "e8"),
        (PieceKind::Rook, Side::White, "e4"),
    ]);
    assert_eq!(
        Game::from_board(board, Side::White, RuleConfig::default()).unwrap_err(),
        EngineError::InvariantViolation(Invariant::OpponentInCheck { side: Side::Black })
    );
}

#[test]
fn snapshot_serializes_to_json() {
    let mut game = Game::new();
    play(&mut game, &[("e2", "e4"), ("d7", "d5"), ("e4", "d5")]);

    let json = serde_json::to_value(game.game_state()).unwrap();
    assert_eq!(json["side_to_move"], "Black");
    assert_eq!(json["ply"], 3);
    assert_eq!(json["in_check"], false);
    assert_eq!(json["outcome"]["state"], "InProgress");
    assert_eq!(json["squares"].as_array().unwrap().len(), 31);
    assert_eq!(json["captured_black"][0]["kind"], "Pawn");
    assert_eq!(json["captured_black"][0]["position"], "d5");
    assert!(json["captured_white"].as_array().unwrap().is_empty());
}

#[test]
fn rules_from_toml() {
    let rules = RuleConfig::from_toml_str("castling = \"safe_passage\"").unwrap();
    let game = Game::with_rules(rules);
    assert_eq!(game.rules().castling, CastlingRule::SafePassage);
    assert_eq!(game.rules().stalemate, StalemateRule::Draw);
}
