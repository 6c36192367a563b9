use std::fmt;

use crate::{error::MoveParseError, piece::PieceType, Square};

/// A move as a plain value: origin, destination, and an optional promotion piece.
///
/// Castling is a king move of two files and en passant is a pawn move onto the
/// en-passant target; neither needs its own flag since the executor recognizes
/// both from the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    /// All-zero sentinel (a1a1) returned by the search when no legal move exists.
    pub const NULL: Move = Move {
        from: Square::A1,
        to: Square::A1,
        promotion: None,
    };

    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    pub fn with_promotion(from: Square, to: Square, promotion: PieceType) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    pub fn is_null(&self) -> bool {
        self.from == self.to
    }

    /// Parses long algebraic notation such as `e2e4` or `e7e8q`.
    ///
    /// Only the syntax is checked here; see `Position::parse_move` for a
    /// lookup that also checks legality.
    pub fn from_uci(text: &str) -> Result<Self, MoveParseError> {
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(MoveParseError::InvalidLength { len: text.chars().count() });
        }
        let from = Square::from_notation(&text[0..2])?;
        let to = Square::from_notation(&text[2..4])?;
        match text[4..].chars().next() {
            None => Ok(Move::new(from, to)),
            Some(c) => match PieceType::from_char(c) {
                Some(piece @ (PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight)) => {
                    Ok(Move::with_promotion(from, to, piece))
                }
                _ => Err(MoveParseError::InvalidPromotion(c)),
            },
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_promotion_moves() {
        let mv = Move::from_uci("e2e4").unwrap();
        assert_eq!(mv.from.to_string(), "e2");
        assert_eq!(mv.to.to_string(), "e4");
        assert_eq!(mv.promotion, None);

        let promo = Move::from_uci("a7a8n").unwrap();
        assert_eq!(promo.promotion, Some(PieceType::Knight));
        assert_eq!(promo.to_string(), "a7a8n");
    }

    #[test]
    fn rejects_bad_text() {
        assert_eq!(Move::from_uci("e2"), Err(MoveParseError::InvalidLength { len: 2 }));
        assert!(matches!(Move::from_uci("z2e4"), Err(MoveParseError::InvalidSquare(_))));
        assert_eq!(Move::from_uci("e7e8k"), Err(MoveParseError::InvalidPromotion('k')));
    }

    #[test]
    fn null_move_renders_as_a1a1() {
        assert!(Move::NULL.is_null());
        assert_eq!(Move::NULL.to_string(), "a1a1");
    }
}
