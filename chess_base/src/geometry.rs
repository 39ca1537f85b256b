//! Orientation of the board relative to each side
//!
//! Every rule that depends on the direction a side plays in asks this module. White plays from
//! rank 1 towards rank 8, Black plays from rank 8 towards rank 1.

use crate::types::{Color, Rank};

/// Rank with king, queen, rooks, knights and bishops in the initial position
pub const fn home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

/// Rank with pawns in the initial position
pub const fn pawn_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Rank where the pawn is located after the double move
pub const fn double_move_dst_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R4,
        Color::Black => Rank::R5,
    }
}

/// Rank delta of one pawn move forward
pub const fn pawn_forward(c: Color) -> isize {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}
