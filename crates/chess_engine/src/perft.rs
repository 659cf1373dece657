use crate::board::Game;
use crate::moves::Move;

/// Pure perft node count for the side to move.
/// Counts all legal positions from the current one down to `depth`.
pub fn perft(game: &mut Game, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(game: &mut Game, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        let (buf, rest) = layers
            .split_first_mut()
            .expect("perft requires one buffer per remaining ply");

        let color = game.side_to_move();
        game.generate_moves_into(color, buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for &mv in buf.iter() {
            let mut child = game.simulate(mv);
            nodes += inner(&mut child, depth - 1, rest);
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(game, depth, &mut layers[..])
}

/// Perft split by root move, in generation order.
pub fn divide(game: &mut Game, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = game.legal_moves();
    moves
        .into_iter()
        .map(|mv| {
            let mut child = game.simulate(mv);
            (mv, perft(&mut child, depth - 1))
        })
        .collect()
}
