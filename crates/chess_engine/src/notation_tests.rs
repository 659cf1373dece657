use super::*;

fn sq(text: &str) -> Square {
    Square::from_algebraic(text).unwrap()
}

#[test]
fn test_move_display() {
    let mut game = Game::new();
    let mv = game.find_move(sq("a2"), sq("a4"), None).unwrap();
    assert_eq!(mv.to_string(), "a2a4");

    let mut promo = Game::from_fen("8/P7/8/8/8/8/8/k1K5 w - - 0 1").unwrap();
    let mv = promo
        .find_move(sq("a7"), sq("a8"), Some(PieceKind::Knight))
        .unwrap();
    assert_eq!(mv.to_string(), "a7a8n");
}

#[test]
fn test_parse_requests() {
    let plain: MoveRequest = "e2e4".parse().unwrap();
    assert_eq!(plain, MoveRequest::new(sq("e2"), sq("e4")));

    let promo: MoveRequest = "e7e8q".parse().unwrap();
    assert_eq!(promo.promotion, Some(PieceKind::Queen));
    assert_eq!(promo.to_string(), "e7e8q");

    let upper: MoveRequest = "b2b1N".parse().unwrap();
    assert_eq!(
        upper,
        MoveRequest::new(sq("b2"), sq("b1")).with_promotion(PieceKind::Knight)
    );
}

#[test]
fn test_rejects_malformed_text() {
    for text in ["", "e2", "e2e", "e2e9", "z2e4", "e7e8k", "e7e8x", "e2e4qq", "é2e4"] {
        match text.parse::<MoveRequest>() {
            Err(ChessError::InvalidMoveText(echo)) => assert_eq!(echo, text),
            other => panic!("{text:?} should be rejected, got {other:?}"),
        }
    }
}

#[test]
fn test_parse_move_against_position() {
    let mut game = Game::new();
    let mv = parse_move(&mut game, "g1f3").unwrap().unwrap();
    assert_eq!(mv.piece.kind, PieceKind::Knight);
    assert_eq!(parse_move(&mut game, "g1g3").unwrap(), None);
    assert!(parse_move(&mut game, "nonsense").is_err());
}

#[test]
fn test_request_from_move() {
    let mut game = Game::new();
    let mv = game.find_move(sq("e2"), sq("e4"), None).unwrap();
    let request = MoveRequest::from(mv);
    assert_eq!(request.to_string(), "e2e4");
    assert!(game.play(request).is_some());
}
