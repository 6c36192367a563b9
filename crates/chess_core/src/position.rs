use std::fmt;

use crate::{
    piece::{Color, Piece, PieceType},
    Square,
};

// Deepest line a search is expected to walk; the undo stack is pre-sized to this
pub const MAX_PLY: usize = 64;

/// Castling rights as four independent bits in `KQkq` order (K = 8 down to q = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: Self = Self(8);
    pub const WHITE_QUEENSIDE: Self = Self(4);
    pub const BLACK_KINGSIDE: Self = Self(2);
    pub const BLACK_QUEENSIDE: Self = Self(1);
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(15);

    /// The four single rights in canonical `KQkq` order.
    pub const EACH: [(Self, char); 4] = [
        (Self::WHITE_KINGSIDE, 'K'),
        (Self::WHITE_QUEENSIDE, 'Q'),
        (Self::BLACK_KINGSIDE, 'k'),
        (Self::BLACK_QUEENSIDE, 'q'),
    ];

    pub fn kingside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(color: Color) -> Self {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    pub fn both(color: Color) -> Self {
        Self(Self::kingside(color).0 | Self::queenside(color).0)
    }

    /// The right tied to a rook's home corner for `color`, or `NONE`.
    pub fn for_corner(square: Square, color: Color) -> Self {
        match (color, square) {
            (Color::White, Square::H1) => Self::WHITE_KINGSIDE,
            (Color::White, Square::A1) => Self::WHITE_QUEENSIDE,
            (Color::Black, Square::H8) => Self::BLACK_KINGSIDE,
            (Color::Black, Square::A8) => Self::BLACK_QUEENSIDE,
            _ => Self::NONE,
        }
    }

    /// True if every bit of `other` is set (and `other` is not empty).
    pub fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        for (right, symbol) in Self::EACH {
            if self.contains(right) {
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}

// Everything make_move overwrites that cannot be recomputed from the board afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UndoRecord {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    pub prior_en_passant: Option<Square>,
    pub prior_halfmove_clock: u32,
    pub prior_castling: CastlingRights,
    pub is_promotion: bool,
}

/// Full game state on a 0x88 board.
///
/// A `Position` is mutated in place by paired `make_move` / `undo_move` calls;
/// the undo stack is private so callers cannot unbalance it except by calling
/// `undo_move` more often than `make_move`, which panics.
#[derive(Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) squares: [Option<Piece>; 128],
    pub(crate) side_to_move: Color,
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) king_squares: [Square; 2],
    pub(crate) history: Vec<UndoRecord>,
}

impl Position {
    /// The standard initial position.
    pub fn new() -> Self {
        let mut position = Self::empty();
        position.setup_initial_position();
        position
    }

    // Board with no pieces; callers must place both kings before handing it out
    pub(crate) fn empty() -> Self {
        Self {
            squares: [None; 128],
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [Square::E1, Square::E8],
            history: Vec::with_capacity(MAX_PLY),
        }
    }

    fn setup_initial_position(&mut self) {
        let piece_order = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, &piece_type) in (0..8u8).zip(piece_order.iter()) {
            for (color, back, pawns) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let (Some(back_sq), Some(pawn_sq)) = (Square::new(file, back), Square::new(file, pawns)) {
                    self.put(back_sq, Piece::new(piece_type, color));
                    self.put(pawn_sq, Piece::new(PieceType::Pawn, color));
                }
            }
        }
        self.castling = CastlingRights::ALL;
    }

    // Places a piece, keeping the king cache in step
    pub(crate) fn put(&mut self, square: Square, piece: Piece) {
        if piece.piece_type == PieceType::King {
            self.king_squares[piece.color.index()] = square;
        }
        self.squares[square.index()] = Some(piece);
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Every occupied square with its piece, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Number of moves made and not yet undone.
    pub fn ply(&self) -> usize {
        self.history.len()
    }
}

// Clones get a fresh `MAX_PLY` of undo headroom; a derived clone would only
// allocate `len` slots
impl Clone for Position {
    fn clone(&self) -> Self {
        let mut history = Vec::with_capacity(self.history.len() + MAX_PLY);
        history.extend_from_slice(&self.history);
        Self {
            squares: self.squares,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            king_squares: self.king_squares,
            history,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "+-".repeat(8) + "+";
        for rank in (0..8u8).rev() {
            writeln!(f, "{separator}")?;
            f.write_str("|")?;
            for file in 0..8u8 {
                let symbol = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or(' ', Piece::to_char);
                write!(f, "{symbol}|")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{separator}")?;
        writeln!(f, "Side to move: {}", self.side_to_move)?;
        writeln!(f, "Castling: {}", self.castling)?;
        match self.en_passant {
            Some(sq) => writeln!(f, "En passant: {sq}")?,
            None => writeln!(f, "En passant: -")?,
        }
        write!(f, "Halfmove clock: {}", self.halfmove_clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_layout() {
        let pos = Position::new();
        assert_eq!(pos.pieces().count(), 32);
        assert_eq!(pos.king_square(Color::White), Square::E1);
        assert_eq!(pos.king_square(Color::Black), Square::E8);
        assert_eq!(pos.piece_at(Square::D1), Some(Piece::new(PieceType::Queen, Color::White)));
        assert_eq!(pos.piece_at(Square::H8), Some(Piece::new(PieceType::Rook, Color::Black)));
        assert_eq!(pos.castling_rights(), CastlingRights::ALL);
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.ply(), 0);
    }

    #[test]
    fn castling_rights_bits() {
        let mut rights = CastlingRights::ALL;
        rights.remove(CastlingRights::both(Color::White));
        assert!(!rights.contains(CastlingRights::WHITE_KINGSIDE));
        assert!(rights.contains(CastlingRights::BLACK_QUEENSIDE));
        assert_eq!(rights.to_string(), "kq");
        assert_eq!(CastlingRights::NONE.to_string(), "-");
        assert!(!CastlingRights::ALL.contains(CastlingRights::NONE));
        assert_eq!(CastlingRights::for_corner(Square::A8, Color::Black), CastlingRights::BLACK_QUEENSIDE);
        assert_eq!(CastlingRights::for_corner(Square::A8, Color::White), CastlingRights::NONE);
    }

    #[test]
    fn clones_keep_undo_headroom() {
        let mut pos = Position::new();
        let mv = pos.parse_move("e2e4").unwrap();
        pos.make_move(mv);
        let copy = pos.clone();
        assert_eq!(copy, pos);
        assert_eq!(copy.ply(), 1);
        assert!(copy.history.capacity() >= 1 + MAX_PLY);
        assert!(Position::new().clone().history.capacity() >= MAX_PLY);
    }

    #[test]
    fn display_draws_the_board() {
        let text = Position::new().to_string();
        assert!(text.starts_with("+-+-+-+-+-+-+-+-+\n|r|n|b|q|k|b|n|r|"));
        assert!(text.contains("Castling: KQkq"));
    }
}
