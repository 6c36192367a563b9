// Fixed-depth negamax and alpha-beta over one shared, mutated-and-restored position
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use chess_core::{Move, Position};
use log::{debug, info, warn};

use crate::error::EngineError;
use crate::evaluation::{evaluate_position, MATE_SCORE};

// Core search algorithm parameters
pub const ROOT_WINDOW: i32 = 32_000;       // Root alpha-beta bound, wider than any mate score
const NEG_INFINITY: i32 = -10_000_000;     // Sentinel below every reachable score
const DRAW_SCORE: i32 = 0;                 // Stalemate inside the tree
const DEFAULT_DEPTH: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchAlgorithm {
    Negamax,
    #[default]
    AlphaBeta,
}

impl FromStr for SearchAlgorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "negamax" => Ok(SearchAlgorithm::Negamax),
            "alphabeta" | "alpha-beta" => Ok(SearchAlgorithm::AlphaBeta),
            _ => Err(EngineError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchAlgorithm::Negamax => f.write_str("negamax"),
            SearchAlgorithm::AlphaBeta => f.write_str("alphabeta"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    pub algorithm: SearchAlgorithm,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            algorithm: SearchAlgorithm::default(),
        }
    }
}

/// Finds the best move with the configured algorithm and depth.
///
/// Returns `Move::NULL` when the side to move has no legal move; the caller
/// decides whether that is checkmate or stalemate.
pub fn search_best_move(position: &mut Position, config: SearchConfig) -> Move {
    match config.algorithm {
        SearchAlgorithm::Negamax => negamax(position, config.depth),
        SearchAlgorithm::AlphaBeta => alpha_beta(position, config.depth),
    }
}

/// Plain negamax to `depth` plies. Ties keep the first move generated.
pub fn negamax(position: &mut Position, depth: u8) -> Move {
    search_root(position, depth, SearchAlgorithm::Negamax)
}

/// Negamax with alpha-beta pruning to `depth` plies. Picks the same move as
/// `negamax` since each root move is searched with the full root window.
pub fn alpha_beta(position: &mut Position, depth: u8) -> Move {
    search_root(position, depth, SearchAlgorithm::AlphaBeta)
}

fn search_root(position: &mut Position, depth: u8, algorithm: SearchAlgorithm) -> Move {
    let start_time = Instant::now();
    let child_depth = depth.saturating_sub(1);
    let moves = position.generate_moves();
    let mut nodes = 0u64;
    let mut best_move = None;
    let mut best_score = NEG_INFINITY;

    for &mv in &moves {
        if !position.is_legal(mv) {
            continue;
        }

        position.make_move(mv);
        let score = match algorithm {
            SearchAlgorithm::Negamax => -negamax_node(position, child_depth, &mut nodes),
            SearchAlgorithm::AlphaBeta => {
                -alpha_beta_node(position, -ROOT_WINDOW, ROOT_WINDOW, child_depth, &mut nodes)
            }
        };
        position.undo_move();
        debug!("currmove {mv} score {score}");

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
    }

    // Every searched score beats NEG_INFINITY, so this only fires if a legal move
    // was never marked best; it then still guarantees some legal move
    if best_move.is_none() {
        if let Some((mv, score)) = best_by_static_eval(position, &moves) {
            warn!("Search produced no best move, fell back to static evaluation");
            best_move = Some(mv);
            best_score = score;
        }
    }

    match best_move {
        Some(mv) => {
            info!(
                "{algorithm} depth {depth}: best move {mv}, score {best_score}, {nodes} nodes in {:?}",
                start_time.elapsed()
            );
            mv
        }
        None => {
            warn!("No legal move available");
            Move::NULL
        }
    }
}

// Depth-0 pick over the legal moves in `moves`, scored from the mover's side
fn best_by_static_eval(position: &mut Position, moves: &[Move]) -> Option<(Move, i32)> {
    let mut best: Option<(Move, i32)> = None;
    for &mv in moves {
        if !position.is_legal(mv) {
            continue;
        }
        position.make_move(mv);
        let score = -evaluate_position(position);
        position.undo_move();
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }
    best
}

// Score for a node whose mover has no legal move
fn no_moves_score(position: &Position) -> i32 {
    if position.is_check(position.side_to_move()) {
        -MATE_SCORE
    } else {
        DRAW_SCORE
    }
}

fn negamax_node(position: &mut Position, depth: u8, nodes: &mut u64) -> i32 {
    *nodes += 1;
    if depth == 0 {
        return evaluate_position(position);
    }

    let mut max = NEG_INFINITY;
    let mut has_legal_moves = false;
    for mv in position.generate_moves() {
        if !position.is_legal(mv) {
            continue;
        }
        has_legal_moves = true;

        position.make_move(mv);
        let score = -negamax_node(position, depth - 1, nodes);
        position.undo_move();

        max = max.max(score);
    }

    if has_legal_moves {
        max
    } else {
        no_moves_score(position)
    }
}

fn alpha_beta_node(position: &mut Position, mut alpha: i32, beta: i32, depth: u8, nodes: &mut u64) -> i32 {
    *nodes += 1;
    if depth == 0 {
        return evaluate_position(position);
    }

    let mut has_legal_moves = false;
    for mv in position.generate_moves() {
        if !position.is_legal(mv) {
            continue;
        }
        has_legal_moves = true;

        position.make_move(mv);
        let score = -alpha_beta_node(position, -beta, -alpha, depth - 1, nodes);
        position.undo_move();

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    if has_legal_moves {
        alpha
    } else {
        no_moves_score(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_names_parse() {
        assert_eq!("negamax".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::Negamax));
        assert_eq!("AlphaBeta".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::AlphaBeta));
        assert_eq!(
            "minimax".parse::<SearchAlgorithm>(),
            Err(EngineError::UnknownAlgorithm("minimax".to_string()))
        );
        assert_eq!(SearchAlgorithm::AlphaBeta.to_string().parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::AlphaBeta));
    }

    #[test]
    fn default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.depth, 4);
        assert_eq!(config.algorithm, SearchAlgorithm::AlphaBeta);
    }

    #[test]
    fn no_moves_scores() {
        let mated = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert_eq!(no_moves_score(&mated), -MATE_SCORE);
        let stalemate = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(no_moves_score(&stalemate), DRAW_SCORE);
    }

    #[test]
    fn static_fallback_picks_a_legal_move() {
        // Queen capture is the best static outcome
        let mut pos = Position::from_fen("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1").unwrap();
        let before = pos.clone();
        let moves = pos.generate_moves();
        let (mv, score) = best_by_static_eval(&mut pos, &moves).unwrap();
        assert_eq!(mv.to_string(), "d1d5");
        assert!(score > 0);
        assert_eq!(pos, before);

        let mut mated = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let moves = mated.generate_moves();
        assert_eq!(best_by_static_eval(&mut mated, &moves), None);
    }

    #[test]
    fn search_restores_the_position() {
        let mut pos = Position::new();
        let before = pos.clone();
        alpha_beta(&mut pos, 2);
        negamax(&mut pos, 2);
        assert_eq!(pos, before);
    }
}
