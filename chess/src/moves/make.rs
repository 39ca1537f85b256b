use super::base::{Move, MoveKind, ValidateError};
use crate::board::Board;
use crate::castling;
use crate::piece::Piece;

use log::debug;

fn do_make_move(b: &mut Board, mv: Move, piece: Piece) -> Option<Piece> {
    let side = mv.side();
    b.take(mv.src());
    let captured = match mv.enpassant_victim() {
        Some(victim) => {
            let taken = b.take(victim);
            debug!("en passant removes the pawn on {}", victim);
            taken
        }
        None => b.take(mv.dst()),
    };
    b.put(piece.moved_to(mv.dst()));

    if let Some(s) = mv.kind().castling_side() {
        let (rook_src, rook_dst) = (castling::rook_src(side, s), castling::rook_dst(side, s));
        if let Some(rook) = b.take(rook_src) {
            b.put(rook.moved_to(rook_dst));
            debug!("castling moves the rook from {} to {}", rook_src, rook_dst);
        }
    }

    b.set_double_step(side.inv(), None);
    if mv.kind() == MoveKind::PawnDouble {
        b.set_double_step(side, Some(mv.dst()));
    }
    b.set_side(side.inv());
    captured
}

/// Commits the move `mv` on the board `b`
///
/// The move is validated first, so the board remains intact if an error is returned. On
/// success, returns the captured piece, if any.
pub fn make_move(b: &mut Board, mv: Move) -> Result<Option<Piece>, ValidateError> {
    let piece = mv.validate(b)?;
    let captured = do_make_move(b, mv, piece);
    debug!(
        "{} makes {} ({:?}), captured {:?}",
        mv.side().name(),
        mv,
        mv.kind(),
        captured.map(|p| p.as_char())
    );
    Ok(captured)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Coord, PieceKind};

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn play(b: &mut Board, src: &str, dst: &str) -> Option<Piece> {
        let mv = Move::new(b, c(src), c(dst)).unwrap();
        make_move(b, mv).unwrap()
    }

    #[test]
    fn test_simple() {
        let mut b = Board::initial();
        for (src, dst, layout) in [
            ("e2", "e4", "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"),
            ("b8", "c6", "r1bqkbnr/pppppppp/2n5/8/4P3/8/PPPP1PPP/RNBQKBNR"),
            ("g1", "f3", "r1bqkbnr/pppppppp/2n5/8/4P3/5N2/PPPP1PPP/RNBQKB1R"),
            ("e7", "e5", "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R"),
            ("f1", "b5", "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R"),
            ("g8", "f6", "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R"),
            ("e1", "g1", "r1bqkb1r/pppp1ppp/2n2n2/1B2p3/4P3/5N2/PPPP1PPP/RNBQ1RK1"),
            ("f6", "e4", "r1bqkb1r/pppp1ppp/2n5/1B2p3/4n3/5N2/PPPP1PPP/RNBQ1RK1"),
        ] {
            play(&mut b, src, dst);
            assert_eq!(b.as_layout(), layout);
            assert_eq!(b.validate(), Ok(()));
        }
        assert_eq!(b.side(), Color::White);
        assert_eq!(b.material(Color::White), 68);
        assert_eq!(b.material(Color::Black), 69);
    }

    #[test]
    fn test_flags() {
        let mut b = Board::initial();
        play(&mut b, "g1", "f3");
        let knight = b.get(c("f3")).unwrap();
        assert!(knight.has_moved);
        assert_eq!(knight.pos, c("f3"));
        assert!(b.is_free(c("g1")));
        assert_eq!(b.side(), Color::Black);

        play(&mut b, "g8", "f6");
        play(&mut b, "f3", "g1");
        let knight = b.get(c("g1")).unwrap();
        assert!(knight.has_moved);
    }

    #[test]
    fn test_pawns() {
        let mut b = Board::from_layout("8/3p4/8/3PpP2/8/5p2/6P1/8").unwrap();
        b.set_double_step(Color::Black, Some(c("e5")));
        let b_copy = b.clone();

        for (src, dst, layout, captured) in [
            ("g2", "g3", "8/3p4/8/3PpP2/8/5pP1/8/8", None),
            ("g2", "g4", "8/3p4/8/3PpP2/6P1/5p2/8/8", None),
            ("g2", "f3", "8/3p4/8/3PpP2/8/5P2/8/8", Some(PieceKind::Pawn)),
            ("d5", "e6", "8/3p4/4P3/5P2/8/5p2/6P1/8", Some(PieceKind::Pawn)),
            ("f5", "e6", "8/3p4/4P3/3P4/8/5p2/6P1/8", Some(PieceKind::Pawn)),
        ] {
            let mut b = b_copy.clone();
            assert_eq!(play(&mut b, src, dst).map(|p| p.kind), captured);
            assert_eq!(b.as_layout(), layout);
            assert_eq!(b.double_step(Color::Black), None);
        }

        play(&mut b, "g2", "g4");
        assert_eq!(b.double_step(Color::White), Some(c("g4")));
        play(&mut b, "d7", "d6");
        assert_eq!(b.double_step(Color::White), None);
        assert_eq!(b.double_step(Color::Black), None);
    }

    #[test]
    fn test_castling() {
        for (src, dst, side, layout) in [
            ("e1", "g1", Color::White, "r3k2r/8/8/8/8/8/8/R4RK1"),
            ("e1", "c1", Color::White, "r3k2r/8/8/8/8/8/8/2KR3R"),
            ("e8", "g8", Color::Black, "r4rk1/8/8/8/8/8/8/R3K2R"),
            ("e8", "c8", Color::Black, "2kr3r/8/8/8/8/8/8/R3K2R"),
        ] {
            let mut b = Board::from_layout("r3k2r/8/8/8/8/8/8/R3K2R")
                .unwrap()
                .with_side(side);
            assert_eq!(play(&mut b, src, dst), None);
            assert_eq!(b.as_layout(), layout);
            let s = castling::side_by_dst(side, c(dst)).unwrap();
            let rook = b.get(castling::rook_dst(side, s));
            assert!(rook.is_some_and(|r| r.has_moved && r.kind == PieceKind::Rook));
        }
    }

    #[test]
    fn test_rejected() {
        let mut b = Board::initial();
        let b_copy = b.clone();
        let mv = Move::new(&b, c("e2"), c("e4")).unwrap();
        make_move(&mut b, mv).unwrap();
        assert_eq!(make_move(&mut b, mv), Err(ValidateError::EmptySource));

        let mut b = b_copy.clone();
        let mv = Move::from_parts(MoveKind::Simple, c("e7"), c("e5"), Color::Black);
        assert_eq!(make_move(&mut b, mv), Err(ValidateError::WrongSide));
        assert_eq!(b, b_copy);
    }
}
