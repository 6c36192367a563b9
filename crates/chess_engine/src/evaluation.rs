use chess_core::{square::KING_OFFSETS, Color, PieceType, Position, Square};

// Returned when the side to move looks checkmated
pub const MATE_SCORE: i32 = 30_000;

// Standard piece values used in chess engines, measured in centipawns (100 = 1 pawn)
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;

// Piece-square tables from White's perspective, 8th rank first (flipped for Black)

// Pawn position table:
// - Encourages pawns to advance (higher values in ranks 4,5)
// - Rewards central pawns (higher values in d,e files)
const PAWN_TABLE: [[i32; 8]; 8] = [
    [0,  0,  0,  0,  0,  0,  0,  0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5,  5, 10, 25, 25, 10,  5,  5],
    [0,  0,  0, 20, 20,  0,  0,  0],
    [5, -5,-10,  0,  0,-10, -5,  5],
    [5, 10, 10,-20,-20, 10, 10,  5],
    [0,  0,  0,  0,  0,  0,  0,  0]
];

// Knight position table: center good, rim bad
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50,-40,-30,-30,-30,-30,-40,-50],
    [-40,-20,  0,  0,  0,  0,-20,-40],
    [-30,  0, 10, 15, 15, 10,  0,-30],
    [-30,  5, 15, 20, 20, 15,  5,-30],
    [-30,  0, 15, 20, 20, 15,  0,-30],
    [-30,  5, 10, 15, 15, 10,  5,-30],
    [-40,-20,  0,  5,  5,  0,-20,-40],
    [-50,-40,-30,-30,-30,-30,-40,-50]
];

// Bishop position table: long diagonals and center
const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20,-10,-10,-10,-10,-10,-10,-20],
    [-10,  0,  0,  0,  0,  0,  0,-10],
    [-10,  0,  5, 10, 10,  5,  0,-10],
    [-10,  5,  5, 10, 10,  5,  5,-10],
    [-10,  0, 10, 10, 10, 10,  0,-10],
    [-10, 10, 10, 10, 10, 10, 10,-10],
    [-10,  5,  0,  0,  0,  0,  5,-10],
    [-20,-10,-10,-10,-10,-10,-10,-20]
];

// Queen position table: mild center preference, corners penalized
const QUEEN_TABLE: [[i32; 8]; 8] = [
    [-20,-10,-10, -5, -5,-10,-10,-20],
    [-10,  0,  0,  0,  0,  0,  0,-10],
    [-10,  0,  5,  5,  5,  5,  0,-10],
    [-5,  0,  5,  5,  5,  5,  0, -5],
    [0,  0,  5,  5,  5,  5,  0, -5],
    [-10,  5,  5,  5,  5,  5,  0,-10],
    [-10,  0,  5,  0,  0,  0,  0,-10],
    [-20,-10,-10, -5, -5,-10,-10,-20]
];

/// Evaluates a position from the side to move's perspective.
/// Positive scores favor the mover.
pub fn evaluate_position(position: &Position) -> i32 {
    let mover = position.side_to_move();
    if looks_mated(position, mover) {
        return -MATE_SCORE;
    }

    let mut score = 0;
    for (square, piece) in position.pieces() {
        let value = get_piece_value(piece.piece_type) + get_position_bonus(piece.piece_type, square, piece.color);
        if piece.color == Color::White {
            score += value;
        } else {
            score -= value;
        }
    }

    if mover == Color::White {
        score
    } else {
        -score
    }
}

/// Approximate mate test: `color` is in check and no king step reaches a safe square.
///
/// Blocking the check or capturing the checker is not considered, so this can
/// report mate when an interposition or capture would save the king.
pub fn looks_mated(position: &Position, color: Color) -> bool {
    if !position.is_check(color) {
        return false;
    }
    let king = position.king_square(color);
    let opponent = color.opponent();
    !KING_OFFSETS
        .iter()
        .filter_map(|&offset| king.offset(offset))
        .filter(|&sq| position.piece_at(sq).map_or(true, |p| p.color != color))
        .any(|sq| !position.is_attacked_through(sq, opponent, king))
}

/// Returns the base material value of a piece; the king counts for nothing.
fn get_piece_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Pawn => PAWN_VALUE,
        PieceType::Knight => KNIGHT_VALUE,
        PieceType::Bishop => BISHOP_VALUE,
        PieceType::Rook => ROOK_VALUE,
        PieceType::Queen => QUEEN_VALUE,
        PieceType::King => 0,
    }
}

/// Returns the position bonus/penalty for a piece at a given square.
/// For Black pieces the table is flipped vertically and horizontally.
fn get_position_bonus(piece_type: PieceType, square: Square, color: Color) -> i32 {
    let (rank, file) = (square.rank() as usize, square.file() as usize);
    let (row, col) = if color == Color::White {
        (7 - rank, file)
    } else {
        (rank, 7 - file)
    };

    match piece_type {
        PieceType::Pawn => PAWN_TABLE[row][col],
        PieceType::Knight => KNIGHT_TABLE[row][col],
        PieceType::Bishop => BISHOP_TABLE[row][col],
        PieceType::Queen => QUEEN_TABLE[row][col],
        PieceType::Rook | PieceType::King => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(fen: &str) -> i32 {
        evaluate_position(&Position::from_fen(fen).unwrap())
    }

    #[test]
    fn initial_position_is_balanced() {
        assert_eq!(evaluate_position(&Position::new()), 0);
    }

    #[test]
    fn score_is_relative_to_the_mover() {
        let white = eval("4k3/8/8/8/8/8/8/3QK3 w - - 0 1");
        let black = eval("4k3/8/8/8/8/8/8/3QK3 b - - 0 1");
        assert!(white > 800);
        assert_eq!(white, -black);
    }

    #[test]
    fn positional_bonus_prefers_central_knight() {
        let rim = eval("4k3/8/8/8/8/8/8/N3K3 w - - 0 1");
        let center = eval("4k3/8/8/8/3N4/8/8/4K3 w - - 0 1");
        assert!(center > rim);
    }

    #[test]
    fn back_rank_mate_is_detected() {
        assert_eq!(eval("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1"), -MATE_SCORE);
    }

    #[test]
    fn check_with_an_escape_is_not_mate() {
        // h7 is free, so the king can step out of the rook's line
        let score = eval("R5k1/5pp1/8/8/8/8/8/6K1 b - - 0 1");
        assert!(score > -MATE_SCORE);
    }

    #[test]
    fn mate_detector_ignores_blocks() {
        // A black rook on d1 could interpose on d8, but the detector only tries king steps
        let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/3r2K1 b - - 0 1").unwrap();
        assert!(looks_mated(&pos, Color::Black));
    }
}
