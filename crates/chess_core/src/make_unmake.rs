//! In-place move execution and its exact inverse.

use crate::{
    piece::{Color, Piece, PieceType},
    position::{CastlingRights, Position, UndoRecord},
    square::{EAST, WEST},
    Move, Square,
};

impl Position {
    /// Plays `mv` on the board, pushing one undo record.
    ///
    /// The move must come from this position's generator; playing a move from
    /// an empty square is a caller bug and panics.
    pub fn make_move(&mut self, mv: Move) {
        let Some(piece) = self.piece_at(mv.from) else {
            panic!("make_move {mv}: no piece on {}", mv.from);
        };
        let color = piece.color;

        let mut record = UndoRecord {
            from: mv.from,
            to: mv.to,
            captured: self.piece_at(mv.to),
            prior_en_passant: self.en_passant,
            prior_halfmove_clock: self.halfmove_clock,
            prior_castling: self.castling,
            is_promotion: mv.promotion.is_some(),
        };
        let mut next_en_passant = None;
        let delta = mv.from.delta(mv.to);

        // A rook taken on its home corner loses that corner's right
        if let Some(captured) = record.captured {
            if captured.piece_type == PieceType::Rook {
                self.castling.remove(CastlingRights::for_corner(mv.to, captured.color));
            }
        }

        match piece.piece_type {
            PieceType::Pawn => {
                if Some(mv.to) == self.en_passant && mv.from.file() != mv.to.file() {
                    // The captured pawn sits beside the mover, not on the target
                    let victim = mv.from.with_file(mv.to.file());
                    record.captured = self.squares[victim.index()].take();
                } else if delta.abs() == 32 {
                    next_en_passant = mv.from.offset((delta / 2) as i8);
                }
            }
            PieceType::King => {
                self.king_squares[color.index()] = mv.to;
                self.castling.remove(CastlingRights::both(color));
                match delta {
                    2 => self.shift(mv.to.offset(EAST), mv.from.offset(EAST)),
                    -2 => self.shift(mv.to.offset(2 * WEST), mv.from.offset(WEST)),
                    _ => {}
                }
            }
            PieceType::Rook => {
                self.castling.remove(CastlingRights::for_corner(mv.from, color));
            }
            _ => {}
        }

        if piece.piece_type == PieceType::Pawn || record.captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if color == Color::Black {
            self.fullmove_number += 1;
        }

        let landed = match mv.promotion {
            Some(promotion) => Piece::new(promotion, color),
            None => piece,
        };
        self.squares[mv.to.index()] = Some(landed);
        self.squares[mv.from.index()] = None;
        self.en_passant = next_en_passant;
        self.side_to_move = color.opponent();
        self.history.push(record);
    }

    /// Takes back the most recent `make_move`.
    ///
    /// # Panics
    /// If there is no move to take back.
    pub fn undo_move(&mut self) {
        let Some(record) = self.history.pop() else {
            panic!("undo_move called with an empty move history");
        };
        let color = self.side_to_move.opponent();
        self.side_to_move = color;

        let Some(landed) = self.piece_at(record.to) else {
            panic!("undo_move: destination {} is empty", record.to);
        };
        let moved = if record.is_promotion {
            Piece::new(PieceType::Pawn, color)
        } else {
            landed
        };
        self.squares[record.from.index()] = Some(moved);
        self.squares[record.to.index()] = record.captured;

        self.en_passant = record.prior_en_passant;
        self.halfmove_clock = record.prior_halfmove_clock;
        self.castling = record.prior_castling;
        if color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_sub(1);
        }

        match moved.piece_type {
            PieceType::Pawn
                if Some(record.to) == record.prior_en_passant && record.from.file() != record.to.file() =>
            {
                let victim = record.from.with_file(record.to.file());
                self.squares[record.to.index()] = None;
                self.squares[victim.index()] = record.captured;
            }
            PieceType::King => {
                self.king_squares[color.index()] = record.from;
                match record.from.delta(record.to) {
                    2 => self.shift(record.from.offset(EAST), record.to.offset(EAST)),
                    -2 => self.shift(record.from.offset(WEST), record.to.offset(2 * WEST)),
                    _ => {}
                }
            }
            _ => {}
        }
    }

    // Moves whatever stands on `from` to `to` (castling rook relocation)
    fn shift(&mut self, from: Option<Square>, to: Option<Square>) {
        if let (Some(from), Some(to)) = (from, to) {
            self.squares[to.index()] = self.squares[from.index()].take();
        }
    }
}
