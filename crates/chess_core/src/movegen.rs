//! Pseudo-legal move generation and the make / check / undo legality filter.

use crate::{
    error::MoveParseError,
    piece::{Color, PieceType},
    position::Position,
    square::{DIAGONALS, EAST, KING_OFFSETS, KNIGHT_OFFSETS, LINES, NORTH, NORTH_EAST, NORTH_WEST, SOUTH, SOUTH_EAST, SOUTH_WEST, WEST},
    Move, Square,
};

impl Position {
    /// Pseudo-legal moves for the side to move.
    ///
    /// Moves may leave the mover's own king in check; filter each one through
    /// `is_legal` before playing it. Castling is the exception and is only
    /// generated when fully legal.
    pub fn generate_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (square, piece) in self.pieces() {
            if piece.color == self.side_to_move {
                self.push_piece_moves(square, &mut moves);
            }
        }
        moves
    }

    /// Pseudo-legal moves for the piece on `from`; empty if the square is empty.
    pub fn generate_piece_moves(&self, from: Square) -> Vec<Move> {
        let mut moves = Vec::new();
        self.push_piece_moves(from, &mut moves);
        moves
    }

    /// Plays `mv`, tests whether the mover is left in check, and takes it back.
    pub fn is_legal(&mut self, mv: Move) -> bool {
        let mover = self.side_to_move;
        self.make_move(mv);
        let in_check = self.is_check(mover);
        self.undo_move();
        !in_check
    }

    /// Generated moves that pass the legality filter.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let mut moves = self.generate_moves();
        moves.retain(|&mv| self.is_legal(mv));
        moves
    }

    /// Resolves long algebraic text against the legal moves of this position.
    pub fn parse_move(&mut self, text: &str) -> Result<Move, MoveParseError> {
        let wanted = Move::from_uci(text)?;
        self.legal_moves()
            .into_iter()
            .find(|&mv| mv == wanted)
            .ok_or_else(|| MoveParseError::IllegalMove(text.to_string()))
    }

    fn push_piece_moves(&self, from: Square, moves: &mut Vec<Move>) {
        let Some(piece) = self.piece_at(from) else {
            return;
        };
        match piece.piece_type {
            PieceType::Pawn => self.push_pawn_moves(from, piece.color, moves),
            PieceType::Knight => self.push_single_steps(from, &KNIGHT_OFFSETS, moves),
            PieceType::Bishop => self.push_slides(from, &DIAGONALS, moves),
            PieceType::Rook => self.push_slides(from, &LINES, moves),
            PieceType::Queen => {
                self.push_slides(from, &DIAGONALS, moves);
                self.push_slides(from, &LINES, moves);
            }
            PieceType::King => {
                self.push_single_steps(from, &KING_OFFSETS, moves);
                for direction in [EAST, WEST] {
                    if self.castling_legal(from, direction) {
                        if let Some(to) = from.offset(2 * direction) {
                            moves.push(Move::new(from, to));
                        }
                    }
                }
            }
        }
    }

    fn is_enemy_or_empty(&self, square: Square, color: Color) -> bool {
        self.piece_at(square).map_or(true, |p| p.color != color)
    }

    fn push_single_steps(&self, from: Square, offsets: &[i8], moves: &mut Vec<Move>) {
        let Some(piece) = self.piece_at(from) else {
            return;
        };
        for &offset in offsets {
            if let Some(to) = from.offset(offset) {
                if self.is_enemy_or_empty(to, piece.color) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }

    fn push_slides(&self, from: Square, directions: &[i8], moves: &mut Vec<Move>) {
        let Some(piece) = self.piece_at(from) else {
            return;
        };
        for &direction in directions {
            let mut current = from.offset(direction);
            while let Some(to) = current {
                match self.piece_at(to) {
                    None => moves.push(Move::new(from, to)),
                    Some(target) => {
                        if target.color != piece.color {
                            moves.push(Move::new(from, to));
                        }
                        break;
                    }
                }
                current = to.offset(direction);
            }
        }
    }

    fn push_pawn_moves(&self, from: Square, color: Color, moves: &mut Vec<Move>) {
        let (forward, captures, home_rank, last_rank) = match color {
            Color::White => (NORTH, [NORTH_EAST, NORTH_WEST], 1, 7),
            Color::Black => (SOUTH, [SOUTH_EAST, SOUTH_WEST], 6, 0),
        };
        let mut plain = Vec::with_capacity(4);

        if let Some(one) = from.offset(forward).filter(|&sq| self.piece_at(sq).is_none()) {
            plain.push(Move::new(from, one));
            if from.rank() == home_rank {
                if let Some(two) = one.offset(forward).filter(|&sq| self.piece_at(sq).is_none()) {
                    plain.push(Move::new(from, two));
                }
            }
        }

        for offset in captures {
            let Some(to) = from.offset(offset) else {
                continue;
            };
            if self.en_passant == Some(to) {
                plain.push(Move::new(from, to));
                continue;
            }
            if self.piece_at(to).is_some_and(|p| p.color != color) {
                plain.push(Move::new(from, to));
            }
        }

        // Moves onto the last rank become four promotions each, queens first
        if from.offset(forward).is_some_and(|sq| sq.rank() == last_rank) {
            for promotion in PieceType::PROMOTIONS {
                moves.extend(plain.iter().map(|mv| Move::with_promotion(mv.from, mv.to, promotion)));
            }
        } else {
            moves.extend(plain);
        }
    }
}
