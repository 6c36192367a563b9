pub mod ai;
pub mod error;
pub mod evaluation;
pub mod perft;
pub mod search;

pub use ai::{game_outcome, ChessAI, GameOutcome};
pub use error::EngineError;
pub use evaluation::{evaluate_position, MATE_SCORE};
pub use perft::{divide, perft, perft_parallel, PERFT_SUITE};
pub use search::{alpha_beta, negamax, search_best_move, SearchAlgorithm, SearchConfig};
