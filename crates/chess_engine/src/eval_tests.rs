use super::*;
use crate::config::GameConfig;

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

fn sq(text: &str) -> Square {
    Square::from_algebraic(text).unwrap()
}

#[test]
fn test_startpos_is_balanced() {
    let mut start = Game::new();
    let (white, black) = start.evaluation();
    assert!(white > 0);
    assert_eq!(white, -black);
    assert_eq!(start.evaluate(), 0);
}

#[test]
fn test_tables_mirror_for_black() {
    let white_pawn = Piece::new(PieceKind::Pawn, Color::White);
    let black_pawn = Piece::new(PieceKind::Pawn, Color::Black);
    assert_eq!(piece_square_value(white_pawn, sq("e4")), 20);
    assert_eq!(piece_square_value(black_pawn, sq("e5")), 20);
    assert_eq!(piece_square_value(white_pawn, sq("d7")), 50);
    assert_eq!(piece_square_value(black_pawn, sq("d2")), 50);

    let knight = Piece::new(PieceKind::Knight, Color::White);
    assert_eq!(piece_square_value(knight, sq("b1")), -40);
    assert_eq!(piece_square_value(knight, sq("e4")), 20);
}

#[test]
fn test_material_and_placement() {
    let mut g = game("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
    assert_eq!(g.evaluation(), (900 - 5, 0));
    assert_eq!(g.evaluate(), 895);

    let mut mirrored = game("3qk3/8/8/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(mirrored.evaluate(), -895);
}

#[test]
fn test_mate_scores_are_extreme() {
    let mut white_mated = game("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    assert_eq!(white_mated.evaluate(), i32::MIN);

    let mut black_mated = game("4Q1k1/5ppp/8/8/8/8/5PPP/6K1 b - - 1 1");
    assert_eq!(black_mated.evaluate(), i32::MAX);
}

#[test]
fn test_draws_score_zero() {
    let mut stalemate = game("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert_eq!(stalemate.evaluate(), 0);

    let mut fifty = game("4k3/8/8/8/8/8/8/3QK3 w - - 100 80");
    assert_eq!(fifty.evaluate(), 895, "fifty-move rule is off by default");
    fifty.set_config(GameConfig {
        fifty_move_rule: true,
    });
    assert_eq!(fifty.evaluate(), 0);
}
