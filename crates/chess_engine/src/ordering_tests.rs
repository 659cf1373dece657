use super::*;
use crate::board::Game;
use crate::types::Color;

fn moves_of(fen: &str) -> Vec<Move> {
    let mut game = Game::from_fen(fen).unwrap();
    let color = game.side_to_move();
    game.generate_moves(color)
}

#[test]
fn test_mvv_lva_prefers_cheap_attacker_on_big_victim() {
    // Pawn and queen can both take the rook on d5; the knight can take a pawn.
    let mut moves = moves_of("4k3/8/8/3r4/4P3/5p2/3Q3N/4K3 w - - 0 1");
    order_moves(&mut moves);
    let first = moves[0];
    assert_eq!(first.to_string(), "e4d5");
    assert_eq!(first.score, 10 * 500 - 100 + CENTER_BONUS);

    let queen_takes = moves.iter().position(|mv| mv.to_string() == "d2d5").unwrap();
    let knight_takes = moves.iter().position(|mv| mv.to_string() == "h2f3").unwrap();
    assert!(queen_takes < knight_takes);
    assert_eq!(moves[queen_takes].score, 10 * 500 - 900 + CENTER_BONUS);
    assert_eq!(moves[knight_takes].score, 10 * 100 - 300);
}

#[test]
fn test_bonuses() {
    let mut moves = moves_of("4k3/P7/8/8/8/8/8/R3K2R w KQ - 0 1");
    order_moves(&mut moves);
    assert_eq!(moves[0].score, PROMOTION_BONUS);
    let castle = moves.iter().find(|mv| mv.is_castle()).unwrap();
    assert_eq!(castle.score, CASTLE_BONUS);
    let quiet = moves.iter().find(|mv| mv.to_string() == "a1a2").unwrap();
    assert_eq!(quiet.score, 0);
}

#[test]
fn test_sort_is_stable_and_descending() {
    let mut moves = moves_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let original = moves.clone();
    order_moves(&mut moves);
    assert!(moves.windows(2).all(|w| w[0].score >= w[1].score));

    // d2d4 and e2e4 are the only centre moves; everything else keeps its order.
    assert_eq!(moves[0].to_string(), "d2d4");
    assert_eq!(moves[1].to_string(), "e2e4");
    let rest: Vec<Move> = original
        .into_iter()
        .filter(|mv| score_move(mv) == 0)
        .collect();
    assert_eq!(&moves[2..], &rest[..]);
    assert!(moves.iter().all(|mv| mv.piece.color == Color::White));
}
