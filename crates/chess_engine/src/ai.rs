use chess_core::{Move, Position};
use log::info;

use crate::search::{search_best_move, SearchConfig};

const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 8;

/// Why the side to move has no legal move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Checkmate,
    Stalemate,
}

/// Front-end facing wrapper around the search: clamps the depth and turns the
/// null-move sentinel into `None`.
#[derive(Debug, Clone)]
pub struct ChessAI {
    config: SearchConfig,
}

impl ChessAI {
    pub fn new(config: SearchConfig) -> Self {
        ChessAI {
            config: SearchConfig {
                depth: config.depth.clamp(MIN_DEPTH, MAX_DEPTH),
                ..config
            },
        }
    }

    pub fn config(&self) -> SearchConfig {
        self.config
    }

    pub fn set_depth(&mut self, depth: u8) {
        self.config.depth = depth.clamp(MIN_DEPTH, MAX_DEPTH);
    }

    /// Best move for the side to move, or `None` if the game is over.
    pub fn get_move(&self, position: &mut Position) -> Option<Move> {
        let mv = search_best_move(position, self.config);
        if mv.is_null() {
            if let Some(outcome) = game_outcome(position) {
                info!("No move to play: {outcome:?}");
            }
            return None;
        }
        Some(mv)
    }
}

impl Default for ChessAI {
    fn default() -> Self {
        ChessAI::new(SearchConfig::default())
    }
}

/// Checkmate or stalemate if the side to move has no legal move, else `None`.
pub fn game_outcome(position: &mut Position) -> Option<GameOutcome> {
    if !position.legal_moves().is_empty() {
        return None;
    }
    if position.is_check(position.side_to_move()) {
        Some(GameOutcome::Checkmate)
    } else {
        Some(GameOutcome::Stalemate)
    }
}
