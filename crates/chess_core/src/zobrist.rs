//! Position fingerprints.
//!
//! `ZobristKeys` is an immutable table of random constants drawn once from a
//! fixed seed. A `Hasher` borrows a table and folds a position's pieces, side
//! to move, castling rights, and en-passant file into a 64-bit key. Keys are
//! computed on demand, not maintained across `make_move` / `undo_move`.

use once_cell::sync::Lazy;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{piece::Color, position::CastlingRights, Position, Square};

pub const ZOBRIST_SEED: u64 = 27_092_014;

static STANDARD_KEYS: Lazy<ZobristKeys> = Lazy::new(|| ZobristKeys::from_seed(ZOBRIST_SEED));

#[derive(Clone)]
pub struct ZobristKeys {
    // Indexed by piece code, then 0x88 square; off-board entries and code 0 stay zero
    piece_square: Box<[[u64; 128]; 16]>,
    white_to_move: u64,
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

impl ZobristKeys {
    pub fn from_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut piece_square = Box::new([[0u64; 128]; 16]);
        for code in 1..=6usize {
            for square in Square::all() {
                piece_square[code | 8][square.index()] = rng.gen();
                piece_square[code][square.index()] = rng.gen();
            }
        }
        Self {
            piece_square,
            white_to_move: rng.gen(),
            castling: rng.gen(),
            en_passant_file: rng.gen(),
        }
    }

    /// The process-wide table built from `ZOBRIST_SEED`, created on first use.
    pub fn standard() -> &'static ZobristKeys {
        &STANDARD_KEYS
    }
}

#[derive(Clone, Copy)]
pub struct Hasher<'a> {
    keys: &'a ZobristKeys,
}

impl<'a> Hasher<'a> {
    pub fn new(keys: &'a ZobristKeys) -> Self {
        Self { keys }
    }

    pub fn hash(&self, position: &Position) -> u64 {
        let mut key = 0;
        for (square, piece) in position.pieces() {
            key ^= self.keys.piece_square[piece.code() as usize][square.index()];
        }
        if position.side_to_move() == Color::White {
            key ^= self.keys.white_to_move;
        }
        let rights = position.castling_rights();
        for (i, (right, _)) in CastlingRights::EACH.iter().enumerate() {
            if rights.contains(*right) {
                key ^= self.keys.castling[i];
            }
        }
        if let Some(square) = position.en_passant() {
            key ^= self.keys.en_passant_file[square.file() as usize];
        }
        key
    }
}

impl Default for Hasher<'static> {
    fn default() -> Self {
        Self::new(ZobristKeys::standard())
    }
}
