//! Error types for parsing position text, squares, and moves.
//!
//! Parsing is permissive wherever a sensible default exists; these errors only
//! cover input that cannot produce a usable position or move at all.

use thiserror::Error;

use crate::piece::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    #[error("Invalid square notation '{0}' (expected a file a-h followed by a rank 1-8)")]
    InvalidNotation(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// One of the four mandatory fields is absent
    #[error("Position text is missing the {field} field")]
    MissingField { field: &'static str },

    #[error("Position has no {color} king")]
    MissingKing { color: Color },

    #[error("Position has more than one {color} king")]
    TooManyKings { color: Color },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("Move must be 4 or 5 characters, found {len}")]
    InvalidLength { len: usize },

    #[error(transparent)]
    InvalidSquare(#[from] SquareError),

    #[error("Invalid promotion piece '{0}'")]
    InvalidPromotion(char),

    #[error("Illegal move '{0}' in this position")]
    IllegalMove(String),
}
