use std::fmt;
use std::str::FromStr;

use crate::error::SquareError;

// Direction offsets on the 16-wide board
pub const NORTH: i8 = 16;
pub const SOUTH: i8 = -16;
pub const EAST: i8 = 1;
pub const WEST: i8 = -1;
pub const NORTH_EAST: i8 = NORTH + EAST;
pub const NORTH_WEST: i8 = NORTH + WEST;
pub const SOUTH_EAST: i8 = SOUTH + EAST;
pub const SOUTH_WEST: i8 = SOUTH + WEST;

pub const DIAGONALS: [i8; 4] = [NORTH_EAST, SOUTH_EAST, SOUTH_WEST, NORTH_WEST];
pub const LINES: [i8; 4] = [NORTH, SOUTH, EAST, WEST];
pub const KING_OFFSETS: [i8; 8] = [
    NORTH_EAST, SOUTH_EAST, SOUTH_WEST, NORTH_WEST,
    NORTH, SOUTH, EAST, WEST,
];
pub const KNIGHT_OFFSETS: [i8; 8] = [
    NORTH + NORTH_EAST,
    EAST + NORTH_EAST,
    EAST + SOUTH_EAST,
    SOUTH + SOUTH_EAST,
    SOUTH + SOUTH_WEST,
    WEST + SOUTH_WEST,
    WEST + NORTH_WEST,
    NORTH + NORTH_WEST,
];

// Bit that marks an index as off the 8x8 board
const OFF_BOARD: u8 = 0x88;

/// A square in 0x88 layout: rank in the high nibble, file in the low nibble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const A1: Square = Square(0x00);
    pub const B1: Square = Square(0x01);
    pub const C1: Square = Square(0x02);
    pub const D1: Square = Square(0x03);
    pub const E1: Square = Square(0x04);
    pub const F1: Square = Square(0x05);
    pub const G1: Square = Square(0x06);
    pub const H1: Square = Square(0x07);
    pub const A8: Square = Square(0x70);
    pub const B8: Square = Square(0x71);
    pub const C8: Square = Square(0x72);
    pub const D8: Square = Square(0x73);
    pub const E8: Square = Square(0x74);
    pub const F8: Square = Square(0x75);
    pub const G8: Square = Square(0x76);
    pub const H8: Square = Square(0x77);

    /// Builds a square from zero-based file and rank.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Square(rank << 4 | file))
        } else {
            None
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        if index & OFF_BOARD == 0 {
            Some(Square(index))
        } else {
            None
        }
    }

    pub fn from_notation(notation: &str) -> Result<Self, SquareError> {
        let bytes = notation.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError::InvalidNotation(notation.to_string()));
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(SquareError::InvalidNotation(notation.to_string()));
        }
        Ok(Square((rank - b'1') << 4 | (file - b'a')))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn file(self) -> u8 {
        self.0 & 0x0F
    }

    pub fn rank(self) -> u8 {
        self.0 >> 4
    }

    /// Steps by a direction offset, or `None` if that leaves the board.
    pub fn offset(self, delta: i8) -> Option<Square> {
        let target = self.0 as i16 + delta as i16;
        if (0..128).contains(&target) && (target as u8) & OFF_BOARD == 0 {
            Some(Square(target as u8))
        } else {
            None
        }
    }

    /// Same rank as `self`, on the given file (0-7).
    pub fn with_file(self, file: u8) -> Square {
        Square(self.0 & 0xF0 | file & 0x07)
    }

    /// Signed index distance `to - self`.
    pub fn delta(self, to: Square) -> i16 {
        to.0 as i16 - self.0 as i16
    }

    /// All 64 on-board squares, a1 first and h8 last.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square(rank << 4 | file)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, (b'1' + self.rank()) as char)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_notation(s)
    }
}
