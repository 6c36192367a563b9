//! Six-field position text (FEN) in both directions.

use std::str::FromStr;

use log::debug;

use crate::{
    error::FenError,
    piece::{Color, Piece, PieceType},
    position::{CastlingRights, Position},
    square::{NORTH, SOUTH},
    Square,
};

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// Parses position text.
    ///
    /// Parsing is permissive: unknown piece letters leave their square empty,
    /// anything other than `w` means black to move, an unreadable en-passant
    /// field means none, and a missing or garbled halfmove / fullmove field
    /// becomes 0 / 1. Only a missing mandatory field or a board without exactly
    /// one king per side is rejected.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::MissingField { field: "piece placement" })?;
        let side = fields.next().ok_or(FenError::MissingField { field: "side to move" })?;
        let castling = fields.next().ok_or(FenError::MissingField { field: "castling" })?;
        let en_passant = fields.next().ok_or(FenError::MissingField { field: "en passant" })?;

        let mut position = Position::empty();
        let mut king_counts = [0usize; 2];

        for (row, line) in placement.split('/').take(8).enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0u8;
            for c in line.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file = file.saturating_add(skip as u8);
                    continue;
                }
                match (Piece::from_char(c), Square::new(file, rank)) {
                    (Some(piece), Some(square)) => {
                        if piece.piece_type == PieceType::King {
                            king_counts[piece.color.index()] += 1;
                        }
                        position.put(square, piece);
                    }
                    (None, _) => debug!("Unrecognized piece letter '{c}' treated as empty"),
                    (Some(_), None) => debug!("Piece '{c}' beyond the h-file ignored"),
                }
                file = file.saturating_add(1);
            }
        }

        for color in [Color::White, Color::Black] {
            match king_counts[color.index()] {
                0 => return Err(FenError::MissingKing { color }),
                1 => {}
                _ => return Err(FenError::TooManyKings { color }),
            }
        }

        position.side_to_move = if side == "w" { Color::White } else { Color::Black };

        for (right, symbol) in CastlingRights::EACH {
            if castling.contains(symbol) {
                position.castling.insert(right);
            }
        }

        position.en_passant = match en_passant {
            "-" => None,
            text => Square::from_notation(text)
                .map_err(|err| debug!("{err}; en passant cleared"))
                .ok()
                .filter(|&target| {
                    let usable = position.en_passant_target_usable(target);
                    if !usable {
                        debug!("En passant target {target} has no double-pushed pawn behind it; cleared");
                    }
                    usable
                }),
        };

        position.halfmove_clock = fields.next().and_then(|f| f.parse().ok()).unwrap_or(0);
        position.fullmove_number = fields.next().and_then(|f| f.parse().ok()).unwrap_or(1);

        Ok(position)
    }

    // The target must sit on the mover's sixth rank, be empty, and have the
    // opponent's pawn directly behind it
    fn en_passant_target_usable(&self, target: Square) -> bool {
        let (rank, behind) = match self.side_to_move {
            Color::White => (5, SOUTH),
            Color::Black => (2, NORTH),
        };
        let pusher = self.side_to_move.opponent();
        target.rank() == rank
            && self.piece_at(target).is_none()
            && target
                .offset(behind)
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(|p| p.is(PieceType::Pawn, pusher))
    }

    /// Renders the position as six-field text with empty runs compressed per rank.
    pub fn to_fen(&self) -> String {
        let mut result = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empties = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    None => empties += 1,
                    Some(piece) => {
                        if empties > 0 {
                            result.push_str(&empties.to_string());
                            empties = 0;
                        }
                        result.push(piece.to_char());
                    }
                }
            }
            if empties > 0 {
                result.push_str(&empties.to_string());
            }
            if rank > 0 {
                result.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = self.en_passant.map_or_else(|| "-".to_string(), |sq| sq.to_string());
        result.push_str(&format!(
            " {side} {} {en_passant} {} {}",
            self.castling, self.halfmove_clock, self.fullmove_number
        ));
        result
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}
