use chess_core::{Move, Position};
use chess_engine::{alpha_beta, negamax, search_best_move, SearchAlgorithm, SearchConfig, MATE_SCORE};
use chess_engine::evaluation::evaluate_position;
use proptest::prelude::*;

fn both(fen: &str, depth: u8) -> (Move, Move) {
    let mut position = Position::from_fen(fen).unwrap();
    let a = negamax(&mut position, depth);
    let b = alpha_beta(&mut position, depth);
    assert_eq!(position.to_fen(), Position::from_fen(fen).unwrap().to_fen());
    (a, b)
}

#[test]
fn only_escape_from_check_is_chosen() {
    // Rook on a1 checks h1; g1 is covered, g2 is blocked, so only Kh2 remains
    let fen = "4k3/8/8/8/8/8/6P1/r6K w - - 0 1";
    let mut position = Position::from_fen(fen).unwrap();
    assert_eq!(position.legal_moves().len(), 1);
    for depth in 1..=3 {
        let (a, b) = both(fen, depth);
        assert_eq!(a.to_string(), "h1h2");
        assert_eq!(b.to_string(), "h1h2");
    }
}

#[test]
fn finds_mate_in_one() {
    let (a, b) = both("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1", 1);
    assert_eq!(a.to_string(), "a1a8");
    assert_eq!(b.to_string(), "a1a8");
}

#[test]
fn captures_hanging_queen() {
    let (a, b) = both("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 1);
    assert_eq!(a.to_string(), "d1d5");
    assert_eq!(b.to_string(), "d1d5");
}

#[test]
fn avoids_back_rank_mate() {
    // Black threatens Rd1#; whatever white plays must not allow it
    let fen = "6k1/5ppp/8/8/8/2R5/3r1PPP/6K1 w - - 0 1";
    for algorithm in [SearchAlgorithm::Negamax, SearchAlgorithm::AlphaBeta] {
        let mut position = Position::from_fen(fen).unwrap();
        let mv = search_best_move(&mut position, SearchConfig { depth: 2, algorithm });
        assert!(!mv.is_null());
        position.make_move(mv);
        for reply in position.legal_moves() {
            position.make_move(reply);
            let mated = position.legal_moves().is_empty() && position.is_check(position.side_to_move());
            assert!(!mated, "{algorithm}: {mv} allows {reply} mate");
            position.undo_move();
        }
    }
}

#[test]
fn algorithms_agree() {
    let fens = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ];
    for fen in fens {
        let (a, b) = both(fen, 2);
        assert_eq!(a, b, "{fen}");
    }
}

#[test]
fn no_legal_move_returns_null() {
    let (a, b) = both("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1", 3);
    assert!(a.is_null());
    assert_eq!(b, Move::NULL);
    assert_eq!(evaluate_position(&Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap()), -MATE_SCORE);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_search_returns_a_legal_move_and_restores_the_position(picks in proptest::collection::vec(any::<usize>(), 0..12)) {
        let mut position = Position::new();
        for pick in picks {
            let moves = position.legal_moves();
            if moves.is_empty() {
                break;
            }
            position.make_move(moves[pick % moves.len()]);
        }

        let before = position.clone();
        let mv = alpha_beta(&mut position, 2);
        prop_assert_eq!(&position, &before);
        let legal = position.legal_moves();
        if legal.is_empty() {
            prop_assert!(mv.is_null());
        } else {
            prop_assert!(legal.contains(&mv));
        }
    }
}
