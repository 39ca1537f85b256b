//! Pieces standing on the board

use crate::types::{Color, Coord, PieceKind};

use std::fmt;

/// A piece standing on the board
///
/// The piece knows its own tile, but it has no identity beyond that: moving a piece means
/// taking it from the old tile and putting an updated copy onto the new one. Only the board
/// rewrites `pos` and `has_moved`, and only when a move is committed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    /// Tile on which the piece stands
    pub pos: Coord,
    /// Kind of the piece
    pub kind: PieceKind,
    /// Color of the piece
    pub color: Color,
    /// `true` if the piece has made at least one move
    ///
    /// Once set, it is never reset, even if the piece returns to its original tile.
    pub has_moved: bool,
}

impl Piece {
    /// Creates a piece which has not moved yet
    #[inline]
    pub const fn new(pos: Coord, kind: PieceKind, color: Color) -> Piece {
        Piece {
            pos,
            kind,
            color,
            has_moved: false,
        }
    }

    #[inline]
    pub fn is(&self, color: Color, kind: PieceKind) -> bool {
        self.color == color && self.kind == kind
    }

    /// Returns the piece relocated to `pos` and marked as moved
    #[inline]
    pub(crate) fn moved_to(self, pos: Coord) -> Piece {
        Piece {
            pos,
            has_moved: true,
            ..self
        }
    }

    /// Returns the Latin letter for the piece, uppercase for White and lowercase for Black
    pub fn as_char(&self) -> char {
        let c = self.kind.as_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Returns the Unicode chess symbol for the piece
    pub fn as_utf8_char(&self) -> char {
        const WHITE: [char; 6] = ['♙', '♖', '♘', '♗', '♕', '♔'];
        const BLACK: [char; 6] = ['♟', '♜', '♞', '♝', '♛', '♚'];
        match self.color {
            Color::White => WHITE[self.kind as usize],
            Color::Black => BLACK[self.kind as usize],
        }
    }

    /// Parses a piece kind and color from a Latin letter in the style of [`Piece::as_char()`]
    pub fn parts_from_char(c: char) -> Option<(Color, PieceKind)> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some((color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{File, Rank};

    #[test]
    fn test_chars() {
        let e2 = Coord::from_parts(File::E, Rank::R2);
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::iter() {
                let piece = Piece::new(e2, kind, color);
                assert_eq!(Piece::parts_from_char(piece.as_char()), Some((color, kind)));
            }
        }
        assert_eq!(Piece::new(e2, PieceKind::Knight, Color::White).to_string(), "N");
        assert_eq!(Piece::new(e2, PieceKind::Knight, Color::Black).to_string(), "n");
        assert_eq!(
            Piece::new(e2, PieceKind::King, Color::White).as_utf8_char(),
            '♔'
        );
        assert_eq!(Piece::parts_from_char('x'), None);
    }

    #[test]
    fn test_moved_to() {
        let e2 = Coord::from_parts(File::E, Rank::R2);
        let e4 = Coord::from_parts(File::E, Rank::R4);
        let pawn = Piece::new(e2, PieceKind::Pawn, Color::White);
        let moved = pawn.moved_to(e4);
        assert_eq!(moved.pos, e4);
        assert!(moved.has_moved);
        assert!(moved.is(pawn.color, pawn.kind));
        assert_ne!(moved, pawn);
    }
}
