//! Exhaustive leaf counting (perft) over the generator, the legality filter,
//! and the executor. The counts for well-known positions are the reference
//! check that generation and make / undo agree with the rules.

use chess_core::{Move, Position};
use log::trace;
use rayon::prelude::*;

pub struct PerftCase {
    pub name: &'static str,
    pub fen: &'static str,
    /// Expected leaf counts for depth 1, 2, 3, ...
    pub counts: &'static [u64],
}

pub const PERFT_SUITE: &[PerftCase] = &[
    PerftCase {
        name: "Initial position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        counts: &[20, 400, 8902, 197_281, 4_865_609],
    },
    PerftCase {
        name: "Kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        counts: &[48, 2039, 97_862, 4_085_603],
    },
    PerftCase {
        name: "Position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        counts: &[14, 191, 2812, 43_238, 674_624],
    },
    PerftCase {
        name: "Position 4",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        counts: &[6, 264, 9467, 422_333],
    },
    PerftCase {
        name: "Position 5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        counts: &[44, 1486, 62_379, 2_103_487],
    },
];

/// Counts the leaf nodes `depth` plies below `position`.
pub fn perft(position: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut nodes = 0;
    for mv in position.generate_moves() {
        if !position.is_legal(mv) {
            continue;
        }
        position.make_move(mv);
        nodes += perft(position, depth - 1);
        position.undo_move();
    }
    nodes
}

/// Per-root-move leaf counts, in generation order.
pub fn divide(position: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let mut result = Vec::new();
    for mv in position.legal_moves() {
        position.make_move(mv);
        let nodes = perft(position, depth - 1);
        position.undo_move();
        trace!("{mv} {nodes}");
        result.push((mv, nodes));
    }
    result
}

/// Same count as `perft`, with the root moves split across the rayon pool.
/// Each worker walks its own clone of the position.
pub fn perft_parallel(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let mut root = position.clone();
    let moves = root.legal_moves();
    moves
        .par_iter()
        .map(|&mv| {
            let mut child = root.clone();
            child.make_move(mv);
            perft(&mut child, depth - 1)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_shallow_counts() {
        let mut pos = Position::new();
        assert_eq!(perft(&mut pos, 0), 1);
        assert_eq!(perft(&mut pos, 1), 20);
        assert_eq!(perft(&mut pos, 2), 400);
        assert_eq!(perft(&mut pos, 3), 8902);
        assert_eq!(pos, Position::new());
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut pos = Position::new();
        let lines = divide(&mut pos, 2);
        assert_eq!(lines.len(), 20);
        assert!(lines.iter().all(|&(_, n)| n == 20));
        assert_eq!(lines.iter().map(|&(_, n)| n).sum::<u64>(), 400);
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut pos = Position::from_fen(PERFT_SUITE[1].fen).unwrap();
        assert_eq!(perft_parallel(&pos, 2), perft(&mut pos, 2));
    }
}
