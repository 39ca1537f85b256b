use crate::board::Board;
use crate::castling::{self, CastlingSide};
use crate::movegen;
use crate::piece::Piece;
use crate::types::{Color, Coord, PieceKind};

use std::fmt;

use thiserror::Error;

/// Move kind
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MoveKind {
    /// Non-pawn move or capture (except castling)
    #[default]
    Simple = 0,
    /// Kingside castling
    CastlingKingside = 1,
    /// Queenside castling
    CastlingQueenside = 2,
    /// Single pawn move (either non-capture or capture)
    PawnSimple = 3,
    /// Double pawn move
    PawnDouble = 4,
    /// Enpassant
    Enpassant = 5,
}

impl From<CastlingSide> for MoveKind {
    #[inline]
    fn from(side: CastlingSide) -> Self {
        match side {
            CastlingSide::King => Self::CastlingKingside,
            CastlingSide::Queen => Self::CastlingQueenside,
        }
    }
}

impl TryFrom<MoveKind> for CastlingSide {
    type Error = ();

    #[inline]
    fn try_from(kind: MoveKind) -> Result<Self, Self::Error> {
        match kind {
            MoveKind::CastlingKingside => Ok(Self::King),
            MoveKind::CastlingQueenside => Ok(Self::Queen),
            _ => Err(()),
        }
    }
}

impl MoveKind {
    #[inline]
    pub fn castling_side(self) -> Option<CastlingSide> {
        self.try_into().ok()
    }
}

/// Error indicating that the move cannot be made on the given board
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// There is no piece on the source tile
    #[error("no piece on the source tile")]
    EmptySource,
    /// The piece on the source tile doesn't belong to the side to move
    #[error("piece doesn't belong to the side to move")]
    WrongSide,
    /// The destination is not among the destinations of the piece
    #[error("destination is not reachable")]
    NotPseudoLegal,
}

/// Chess move
///
/// A move remembers the tiles and the side which makes it, together with its kind. The move
/// is only meaningful for the board it was created on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    kind: MoveKind,
    src: Coord,
    dst: Coord,
    side: Color,
}

/// Returns the kind of the move of piece `p` to `dst`, assuming `dst` is one of its destinations
pub(crate) fn classify(b: &Board, p: &Piece, dst: Coord) -> MoveKind {
    match p.kind {
        PieceKind::Pawn => {
            if p.pos.file() != dst.file() && b.is_free(dst) {
                MoveKind::Enpassant
            } else if p.pos.rank().index().abs_diff(dst.rank().index()) == 2 {
                MoveKind::PawnDouble
            } else {
                MoveKind::PawnSimple
            }
        }
        PieceKind::King if p.pos.file().index().abs_diff(dst.file().index()) == 2 => {
            match castling::side_by_dst(p.color, dst) {
                Some(side) => side.into(),
                None => MoveKind::Simple,
            }
        }
        _ => MoveKind::Simple,
    }
}

impl Move {
    /// Creates a move from the tile `src` to the tile `dst` on the board `b`
    ///
    /// The piece on `src` must belong to the side to move, and `dst` must be one of the
    /// [destinations](movegen::destinations) of this piece.
    pub fn new(b: &Board, src: Coord, dst: Coord) -> Result<Move, ValidateError> {
        let p = b.get(src).ok_or(ValidateError::EmptySource)?;
        if p.color != b.side() {
            return Err(ValidateError::WrongSide);
        }
        if !movegen::destinations(b, src).has(dst) {
            return Err(ValidateError::NotPseudoLegal);
        }
        Ok(Move {
            kind: classify(b, &p, dst),
            src,
            dst,
            side: p.color,
        })
    }

    /// Creates a move from its parts without any checks
    ///
    /// The resulting move can be rejected later by [`make_move()`](super::make_move).
    #[inline]
    pub const fn from_parts(kind: MoveKind, src: Coord, dst: Coord, side: Color) -> Move {
        Move {
            kind,
            src,
            dst,
            side,
        }
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }

    #[inline]
    pub const fn side(&self) -> Color {
        self.side
    }

    /// Returns the tile of the pawn captured by this move if it's an en passant
    #[inline]
    pub fn enpassant_victim(&self) -> Option<Coord> {
        match self.kind {
            MoveKind::Enpassant => Some(Coord::from_parts(self.dst.file(), self.src.rank())),
            _ => None,
        }
    }

    /// Checks that the move can be made on the board `b`
    ///
    /// Returns the piece which is going to move.
    pub fn validate(&self, b: &Board) -> Result<Piece, ValidateError> {
        let p = b.get(self.src).ok_or(ValidateError::EmptySource)?;
        if self.side != b.side() {
            return Err(ValidateError::WrongSide);
        }
        if Move::new(b, self.src, self.dst)? != *self {
            return Err(ValidateError::NotPseudoLegal);
        }
        Ok(p)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}
