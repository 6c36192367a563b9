// Board state, move generation, move execution, attack queries, and hashing
mod attacks;
pub mod error;
mod fen;
mod make_unmake;
mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod square;
pub mod zobrist;

// Re-export main types for convenience
pub use error::{FenError, MoveParseError, SquareError};
pub use fen::START_FEN;
pub use moves::Move;
pub use piece::{Color, Piece, PieceType};
pub use position::{CastlingRights, Position, MAX_PLY};
pub use square::Square;
pub use zobrist::{Hasher, ZobristKeys, ZOBRIST_SEED};
