//! Destination tiles for pieces
//!
//! There is exactly one rule set here. The same [`destinations()`] answer is used both to
//! highlight the tiles for a selected piece and to decide whether a move can be committed, so
//! the two can never disagree.
//!
//! Destinations do not depend on whose turn it is, and the generated moves are only
//! pseudo-legal: a move may leave the own king attacked.

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::moves::{self, Move};
use crate::piece::Piece;
use crate::types::{Color, Coord, PieceKind};
use crate::{attack, castling, geometry};

use arrayvec::ArrayVec;
use log::trace;

use std::ops::{Deref, DerefMut};
use std::slice;

/// Upper bound on the number of destinations of all the pieces of one side
///
/// Sixteen pieces reach at most 323 tiles: nine queens (27 each), two rooks (14), two
/// bishops (13), two knights (8) and a king with both castlings (10).
pub const MAX_MOVES: usize = 324;

/// List of generated moves
#[derive(Debug, Clone, Default)]
pub struct MoveList(ArrayVec<Move, MAX_MOVES>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, MAX_MOVES>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_MOVES>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

fn pawn_destinations(b: &Board, p: &Piece, occupied: Bitboard) -> Bitboard {
    let forward = geometry::pawn_forward(p.color);
    let mut res = Bitboard::EMPTY;
    if let Some(one) = p.pos.shift(0, forward) {
        if !occupied.has(one) {
            res.set(one);
            if !p.has_moved {
                if let Some(two) = one.shift(0, forward) {
                    if !occupied.has(two) {
                        res.set(two);
                    }
                }
            }
        }
    }
    res | (attack::pawn(p.color, p.pos) & b.color(p.color.inv()))
}

/// Returns the regular destinations of the piece `p`, without en passant and castling
///
/// A tile is included either if it's empty or if it holds an enemy piece. Tiles with friendly
/// pieces are never included.
pub fn piece_destinations(b: &Board, p: &Piece) -> Bitboard {
    let own = b.color(p.color);
    let occupied = b.occupied();
    let reach = match p.kind {
        PieceKind::Pawn => return pawn_destinations(b, p, occupied),
        PieceKind::Rook => attack::rook(p.pos, occupied),
        PieceKind::Knight => attack::knight(p.pos),
        PieceKind::Bishop => attack::bishop(p.pos, occupied),
        PieceKind::Queen => attack::queen(p.pos, occupied),
        PieceKind::King => attack::king(p.pos),
    };
    reach & !own
}

/// Returns the en passant destination of the pawn `p`, if any
///
/// The opponent must have just advanced a pawn by two tiles, and that pawn must stand right
/// next to `p` on the same rank.
pub fn enpassant_destination(b: &Board, p: &Piece) -> Option<Coord> {
    if p.kind != PieceKind::Pawn {
        return None;
    }
    let enemy = p.color.inv();
    let victim = b.double_step(enemy)?;
    if victim.rank() != p.pos.rank()
        || victim.file().index().abs_diff(p.pos.file().index()) != 1
    {
        return None;
    }
    if !b.get(victim).is_some_and(|v| v.is(enemy, PieceKind::Pawn)) {
        return None;
    }
    let dst = victim.shift(0, geometry::pawn_forward(p.color))?;
    b.is_free(dst).then_some(dst)
}

/// Returns the castling destinations of the king `p`
///
/// Castling needs an unmoved king on its initial tile, an unmoved rook of the same color in
/// the corner and empty tiles between them. Attacked tiles are not considered.
pub fn castling_destinations(b: &Board, p: &Piece) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    if p.kind != PieceKind::King || p.has_moved || p.pos != castling::king_src(p.color) {
        return res;
    }
    let occupied = b.occupied();
    for s in castling::CastlingSide::ALL {
        let rook_ready = b
            .get(castling::rook_src(p.color, s))
            .is_some_and(|r| r.is(p.color, PieceKind::Rook) && !r.has_moved);
        if rook_ready && (occupied & castling::pass(p.color, s)).is_empty() {
            res.set(castling::king_dst(p.color, s));
        }
    }
    res
}

/// Returns all the destinations of the piece standing on `tile`
///
/// The result is empty if the tile is empty.
pub fn destinations(b: &Board, tile: Coord) -> Bitboard {
    let Some(p) = b.get(tile) else {
        return Bitboard::EMPTY;
    };
    let mut res = piece_destinations(b, &p) | castling_destinations(b, &p);
    if let Some(dst) = enpassant_destination(b, &p) {
        res.set(dst);
    }
    trace!("destinations of {} on {}: {}", p, tile, res);
    res
}

/// Generates all the pseudo-legal moves for the pieces of color `c`
///
/// `c` doesn't need to be the side to move.
pub fn gen_all(b: &Board, c: Color) -> MoveList {
    let mut res = MoveList::new();
    for p in b.pieces().filter(|p| p.color == c) {
        for dst in destinations(b, p.pos) {
            res.push(Move::from_parts(moves::classify(b, p, dst), p.pos, dst, c));
        }
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::MoveKind;

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn set(tiles: &[&str]) -> Bitboard {
        tiles.iter().map(|s| c(s)).collect()
    }

    fn dsts(b: &Board, tile: &str) -> Bitboard {
        destinations(b, c(tile))
    }

    #[test]
    fn test_initial() {
        let b = Board::initial();
        assert_eq!(dsts(&b, "e2"), set(&["e3", "e4"]));
        assert_eq!(dsts(&b, "d7"), set(&["d6", "d5"]));
        assert_eq!(dsts(&b, "g1"), set(&["f3", "h3"]));
        assert_eq!(dsts(&b, "b8"), set(&["a6", "c6"]));
        for tile in ["a1", "c1", "d1", "e1", "h1", "a8", "e8"] {
            assert_eq!(dsts(&b, tile), Bitboard::EMPTY, "tile {}", tile);
        }
        assert_eq!(dsts(&b, "e4"), Bitboard::EMPTY);
        assert_eq!(gen_all(&b, Color::White).len(), 20);
        assert_eq!(gen_all(&b, Color::Black).len(), 20);
    }

    #[test]
    fn test_pawns() {
        let b = Board::from_layout("8/8/8/8/8/4p3/4P3/8").unwrap();
        assert_eq!(dsts(&b, "e2"), Bitboard::EMPTY);
        assert_eq!(dsts(&b, "e3"), Bitboard::EMPTY);

        let b = Board::from_layout("8/8/8/8/4p3/8/4P3/8").unwrap();
        assert_eq!(dsts(&b, "e2"), set(&["e3"]));

        let b = Board::from_layout("8/8/8/8/8/3p1N2/4P3/8").unwrap();
        assert_eq!(dsts(&b, "e2"), set(&["e3", "e4", "d3"]));

        // Not on its initial tile, so it has moved
        let b = Board::from_layout("8/8/8/8/8/4P3/8/8").unwrap();
        assert_eq!(dsts(&b, "e3"), set(&["e4"]));

        // Pawns on the last rank stay there
        let b = Board::from_layout("4P3/8/8/8/8/8/8/4p3").unwrap();
        assert_eq!(dsts(&b, "e8"), Bitboard::EMPTY);
        assert_eq!(dsts(&b, "e1"), Bitboard::EMPTY);
    }

    #[test]
    fn test_sliders() {
        let b = Board::from_layout("8/8/3p4/8/1N1R1p2/8/8/8").unwrap();
        assert_eq!(
            dsts(&b, "d4"),
            set(&["d5", "d6", "e4", "f4", "d3", "d2", "d1", "c4"])
        );

        let b = Board::from_layout("8/8/8/8/8/2P5/8/Q7").unwrap();
        assert_eq!(
            dsts(&b, "a1"),
            set(&[
                "a2", "a3", "a4", "a5", "a6", "a7", "a8", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
                "b2"
            ])
        );

        let b = Board::from_layout("7k/8/8/8/8/8/6p1/7B").unwrap();
        assert_eq!(dsts(&b, "h1"), set(&["g2"]));
    }

    #[test]
    fn test_near_shapes() {
        for (lone, crowded, tile) in [
            // Knight on d4, pieces of both colors on tiles a knight never reaches
            ("8/8/8/8/3N4/8/8/8", "8/8/3p4/2pPp3/2PNP3/3n4/8/8", "d4"),
            // King on d4 with a ring of pieces two tiles away
            ("8/8/8/8/3K4/8/8/8", "8/8/1pN1Rp2/8/1b1K1P2/8/1q1n1B2/8", "d4"),
            // King on e1 without rooks, so no castling either
            ("8/8/8/8/8/8/8/4K3", "r3k2r/pppppppp/8/8/8/2N3n1/8/4K3", "e1"),
        ] {
            let lone = Board::from_layout(lone).unwrap();
            let crowded = Board::from_layout(crowded).unwrap();
            assert_eq!(dsts(&lone, tile), dsts(&crowded, tile), "tile {}", tile);
        }

        // Same for a king which can castle: only the castling hops depend on far pieces
        let lone = Board::from_layout("8/8/8/8/8/8/8/R3K2R").unwrap();
        let crowded = Board::from_layout("rn2k1nr/pp4pp/8/3q4/8/2b2p2/8/R3K2R").unwrap();
        assert_eq!(dsts(&lone, "e1"), dsts(&crowded, "e1"));
        let king = crowded.get(c("e1")).unwrap();
        assert_eq!(castling_destinations(&crowded, &king), set(&["c1", "g1"]));
        assert_eq!(
            piece_destinations(&crowded, &king),
            set(&["d1", "d2", "e2", "f2", "f1"])
        );
    }

    #[test]
    fn test_enpassant() {
        let mut b = Board::from_layout("8/8/8/3Pp3/8/8/8/8").unwrap();
        assert_eq!(dsts(&b, "d5"), set(&["d6"]));
        b.set_double_step(Color::Black, Some(c("e5")));
        assert_eq!(dsts(&b, "d5"), set(&["d6", "e6"]));
        let pawn = b.get(c("d5")).unwrap();
        assert_eq!(enpassant_destination(&b, &pawn), Some(c("e6")));

        // The destination must be empty
        b.put(Piece::new(c("e6"), PieceKind::Knight, Color::Black));
        assert_eq!(enpassant_destination(&b, &pawn), None);
        b.take(c("e6"));

        // The record must point to an adjacent pawn
        b.set_double_step(Color::Black, Some(c("g5")));
        assert_eq!(enpassant_destination(&b, &pawn), None);
        b.set_double_step(Color::Black, Some(c("e5")));
        b.take(c("e5"));
        b.put(Piece::new(c("e5"), PieceKind::Rook, Color::Black));
        assert_eq!(enpassant_destination(&b, &pawn), None);

        // Only pawns capture this way
        let mut b = Board::from_layout("8/8/8/3Np3/8/8/8/8").unwrap();
        b.set_double_step(Color::Black, Some(c("e5")));
        assert!(!dsts(&b, "d5").has(c("e6")));
    }

    #[test]
    fn test_enpassant_black() {
        let mut b = Board::from_layout("8/8/8/8/5Pp1/8/8/8").unwrap();
        b.set_double_step(Color::White, Some(c("f4")));
        assert_eq!(dsts(&b, "g4"), set(&["g3", "f3"]));
        // A stale record of the mover itself gives nothing
        b.set_double_step(Color::White, None);
        b.set_double_step(Color::Black, Some(c("f4")));
        assert_eq!(dsts(&b, "g4"), set(&["g3"]));
    }

    #[test]
    fn test_castling() {
        let b = Board::from_layout("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        assert_eq!(
            dsts(&b, "e1"),
            set(&["d1", "d2", "e2", "f2", "f1", "c1", "g1"])
        );
        assert_eq!(
            castling_destinations(&b, &b.get(c("e8")).unwrap()),
            set(&["c8", "g8"])
        );

        // Blocked on the queenside by a knight on b1
        let b = Board::from_layout("8/8/8/8/8/8/8/RN2K2R").unwrap();
        assert_eq!(
            castling_destinations(&b, &b.get(c("e1")).unwrap()),
            set(&["g1"])
        );

        // Moved rook
        let mut b = Board::from_layout("8/8/8/8/8/8/8/R3K2R").unwrap();
        let rook = b.take(c("h1")).unwrap();
        b.put(rook.moved_to(c("h1")));
        assert_eq!(
            castling_destinations(&b, &b.get(c("e1")).unwrap()),
            set(&["c1"])
        );

        // Moved king
        let king = b.take(c("e1")).unwrap();
        b.put(king.moved_to(c("e1")));
        assert_eq!(
            castling_destinations(&b, &b.get(c("e1")).unwrap()),
            Bitboard::EMPTY
        );

        // Enemy rook in the corner
        let b = Board::from_layout("8/8/8/8/8/8/8/r3K2r").unwrap();
        assert_eq!(
            castling_destinations(&b, &b.get(c("e1")).unwrap()),
            Bitboard::EMPTY
        );
    }

    #[test]
    fn test_turn_independent() {
        let b = Board::initial();
        let black = b.clone().with_side(Color::Black);
        for tile in Coord::iter() {
            assert_eq!(destinations(&b, tile), destinations(&black, tile));
        }
    }

    #[test]
    fn test_gen_all_kinds() {
        let mut b = Board::from_layout("8/8/8/3Pp3/8/8/4P3/R3K3").unwrap();
        b.set_double_step(Color::Black, Some(c("e5")));
        let moves = gen_all(&b, Color::White);
        let kind_of = |src: &str, dst: &str| {
            moves
                .iter()
                .find(|m| m.src() == c(src) && m.dst() == c(dst))
                .map(|m| m.kind())
        };
        assert_eq!(kind_of("d5", "e6"), Some(MoveKind::Enpassant));
        assert_eq!(kind_of("d5", "d6"), Some(MoveKind::PawnSimple));
        assert_eq!(kind_of("e2", "e4"), Some(MoveKind::PawnDouble));
        assert_eq!(kind_of("e1", "c1"), Some(MoveKind::CastlingQueenside));
        assert_eq!(kind_of("e1", "g1"), None);
        assert_eq!(kind_of("a1", "a8"), Some(MoveKind::Simple));
        for m in &moves {
            assert_eq!(m.side(), Color::White);
            assert!(destinations(&b, m.src()).has(m.dst()));
        }
    }
}
