use crate::{
    piece::{Color, PieceType},
    position::{CastlingRights, Position},
    square::{DIAGONALS, EAST, KING_OFFSETS, KNIGHT_OFFSETS, LINES, NORTH_EAST, NORTH_WEST, SOUTH_EAST, SOUTH_WEST, WEST},
    Square,
};

impl Position {
    /// Is `square` attacked by any piece of color `by`?
    pub fn is_attacked(&self, square: Square, by: Color) -> bool {
        self.attacked(square, by, None)
    }

    /// Like `is_attacked`, but sliding attacks see through `transparent` as if
    /// it were empty. Used to test a king's escape squares with the king lifted.
    pub fn is_attacked_through(&self, square: Square, by: Color, transparent: Square) -> bool {
        self.attacked(square, by, Some(transparent))
    }

    pub fn is_check(&self, color: Color) -> bool {
        self.is_attacked(self.king_square(color), color.opponent())
    }

    fn attacked(&self, square: Square, by: Color, transparent: Option<Square>) -> bool {
        // Knights
        for offset in KNIGHT_OFFSETS {
            if let Some(from) = square.offset(-offset) {
                if self.piece_at(from).is_some_and(|p| p.is(PieceType::Knight, by)) {
                    return true;
                }
            }
        }

        // Rays stop at the first occupied square
        if self.ray_hits(square, by, &DIAGONALS, PieceType::Bishop, transparent)
            || self.ray_hits(square, by, &LINES, PieceType::Rook, transparent)
        {
            return true;
        }

        // Pawns sit one step behind the square along their capture diagonals
        let pawn_sources = match by {
            Color::White => [SOUTH_WEST, SOUTH_EAST],
            Color::Black => [NORTH_WEST, NORTH_EAST],
        };
        for offset in pawn_sources {
            if let Some(from) = square.offset(offset) {
                if self.piece_at(from).is_some_and(|p| p.is(PieceType::Pawn, by)) {
                    return true;
                }
            }
        }

        // Enemy king adjacency, read from the king cache
        let king = self.king_square(by);
        KING_OFFSETS.iter().any(|&offset| square.offset(offset) == Some(king))
    }

    fn ray_hits(
        &self,
        square: Square,
        by: Color,
        directions: &[i8],
        slider: PieceType,
        transparent: Option<Square>,
    ) -> bool {
        for &direction in directions {
            let mut current = square.offset(direction);
            while let Some(sq) = current {
                if Some(sq) != transparent {
                    if let Some(piece) = self.piece_at(sq) {
                        if piece.color == by && (piece.piece_type == slider || piece.piece_type == PieceType::Queen) {
                            return true;
                        }
                        break;
                    }
                }
                current = sq.offset(direction);
            }
        }
        false
    }

    /// Castling precheck for the king on `king` toward `direction` (EAST or WEST):
    /// rights bit set, own rook in its corner, the squares between king and rook
    /// empty, and neither the king's square nor the two it crosses attacked.
    pub(crate) fn castling_legal(&self, king: Square, direction: i8) -> bool {
        let Some(piece) = self.piece_at(king) else {
            return false;
        };
        let color = piece.color;
        let (right, rook_offset) = match direction {
            EAST => (CastlingRights::kingside(color), 3),
            WEST => (CastlingRights::queenside(color), -4),
            _ => return false,
        };
        if !self.castling.contains(right) {
            return false;
        }
        let Some(rook_square) = king.offset(rook_offset) else {
            return false;
        };
        if !self.piece_at(rook_square).is_some_and(|p| p.is(PieceType::Rook, color)) {
            return false;
        }

        let mut current = king.offset(direction);
        while let Some(sq) = current {
            if sq == rook_square {
                break;
            }
            if self.piece_at(sq).is_some() {
                return false;
            }
            current = sq.offset(direction);
        }

        let opponent = color.opponent();
        if self.is_attacked(king, opponent) {
            return false;
        }
        let Some(passed) = king.offset(direction) else {
            return false;
        };
        let Some(landing) = passed.offset(direction) else {
            return false;
        };
        !self.is_attacked(passed, opponent) && !self.is_attacked(landing, opponent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        Square::from_notation(name).unwrap()
    }

    #[test]
    fn rook_on_open_file_gives_check() {
        let pos = Position::from_fen("4r1k1/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert!(pos.is_check(Color::White));
        assert!(!pos.is_check(Color::Black));
    }

    #[test]
    fn interposed_pawn_blocks_bishop() {
        let pos = Position::from_fen("6k1/8/8/8/1b6/8/3P4/4K3 w - - 0 1").unwrap();
        assert!(!pos.is_check(Color::White));
        let open = Position::from_fen("6k1/8/8/8/1b6/8/8/4K3 w - - 0 1").unwrap();
        assert!(open.is_check(Color::White));
    }

    #[test]
    fn pawn_attacks_depend_on_color() {
        let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert!(pos.is_attacked(sq("c4"), Color::Black));
        assert!(pos.is_attacked(sq("e4"), Color::Black));
        assert!(!pos.is_attacked(sq("d4"), Color::Black));
        assert!(pos.is_attacked(sq("d5"), Color::White));
        assert!(pos.is_attacked(sq("f5"), Color::White));
        assert!(!pos.is_attacked(sq("e5"), Color::White));
    }

    #[test]
    fn knight_and_king_attacks() {
        let pos = Position::from_fen("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1").unwrap();
        for target in ["b3", "b5", "c2", "c6", "e2", "e6", "f3", "f5"] {
            assert!(pos.is_attacked(sq(target), Color::White), "{target}");
        }
        assert!(pos.is_attacked(sq("d7"), Color::Black));
        assert!(!pos.is_attacked(sq("d6"), Color::Black));
        assert!(pos.is_attacked(sq("f2"), Color::White));
    }

    #[test]
    fn transparent_square_extends_rays() {
        // Rook on a8 checks the g8 king; h8 is only covered through the king
        let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(!pos.is_attacked(Square::H8, Color::White));
        assert!(pos.is_attacked_through(Square::H8, Color::White, Square::G8));
    }

    #[test]
    fn castling_precheck() {
        let open = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(open.castling_legal(Square::E1, EAST));
        assert!(open.castling_legal(Square::E1, WEST));

        let blocked = Position::from_fen("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1").unwrap();
        assert!(!blocked.castling_legal(Square::E1, WEST));

        // Bishop on a6 covers f1 only
        let through_check = Position::from_fen("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        assert!(!through_check.castling_legal(Square::E1, EAST));
        assert!(through_check.castling_legal(Square::E1, WEST));

        let in_check = Position::from_fen("4k3/8/8/8/8/2b5/8/R3K2R w KQ - 0 1").unwrap();
        assert!(!in_check.castling_legal(Square::E1, EAST));
        assert!(!in_check.castling_legal(Square::E1, WEST));

        let no_rights = Position::from_fen("4k3/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
        assert!(!no_rights.castling_legal(Square::E1, EAST));
    }
}
