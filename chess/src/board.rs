//! Board and related things

use crate::bitboard::Bitboard;
use crate::piece::Piece;
use crate::types::{Color, Coord, File, PieceKind, Rank};
use crate::geometry;

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Board validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Piece is stored under a tile other than its own position
    #[error("piece on {key} claims to stand on {pos}")]
    PositionMismatch { key: Coord, pos: Coord },
    /// Two pieces share the same tile
    #[error("more than one piece on {0}")]
    DuplicateTile(Coord),
    /// Double move record points to a rank where no double move can end
    #[error("invalid double move of color {0:?} to {1}")]
    InvalidDoubleStep(Color, Coord),
}

/// Error parsing a layout (i.e. the piece placement part of FEN)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum LayoutParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Chess board
///
/// Contains the position map (at most one piece per tile), the side to move, and the double move
/// records used by enpassant.
///
/// Each double move record holds the destination of the last two-tile pawn advance made by
/// that side. It is valid only until the opponent makes their next move: any move of the
/// opponent clears it.
///
/// The board can be edited freely via [`Board::put()`] and [`Board::take()`], but moves are
/// committed only via [`moves::make_move()`](crate::moves::make_move), which keeps all the
/// records consistent.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "BoardSnapshot", try_from = "BoardSnapshot")
)]
pub struct Board {
    cells: [Option<Piece>; 64],
    side: Color,
    white_double_step: Option<Coord>,
    black_double_step: Option<Coord>,
}

/// Returns `true` if a piece of kind `kind` and color `color` occupies `c` in the initial position
pub fn is_initial_tile(color: Color, kind: PieceKind, c: Coord) -> bool {
    if kind == PieceKind::Pawn {
        return c.rank() == geometry::pawn_rank(color);
    }
    if c.rank() != geometry::home_rank(color) {
        return false;
    }
    matches!(
        (kind, c.file()),
        (PieceKind::Rook, File::A | File::H)
            | (PieceKind::Knight, File::B | File::G)
            | (PieceKind::Bishop, File::C | File::F)
            | (PieceKind::Queen, File::D)
            | (PieceKind::King, File::E)
    )
}

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    /// Returns an empty board with White to move
    ///
    /// Does the same as [`Board::default()`], except that this function is `const`.
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [None; 64],
            side: Color::White,
            white_double_step: None,
            black_double_step: None,
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for color in [Color::White, Color::Black] {
            for (file, kind) in File::iter().zip(BACK_RANK) {
                let pos = Coord::from_parts(file, geometry::home_rank(color));
                res.put(Piece::new(pos, kind, color));
            }
            for file in File::iter() {
                let pos = Coord::from_parts(file, geometry::pawn_rank(color));
                res.put(Piece::new(pos, PieceKind::Pawn, color));
            }
        }
        res
    }

    /// Parses a board from the piece placement part of FEN
    ///
    /// Ranks go from 8 to 1 and are separated by `/`. Digits denote runs of empty tiles,
    /// uppercase letters denote White pieces and lowercase letters denote Black pieces.
    ///
    /// Pieces standing on their initial tiles are considered unmoved, all other pieces are
    /// marked as moved. White is to move; use [`Board::with_side()`] to change that.
    ///
    /// # Example
    ///
    /// ```
    /// # use tilechess::{Board, Coord, Color, File, PieceKind, Rank};
    /// #
    /// let b = Board::from_layout("4k3/8/8/8/8/8/4P3/4K2R").unwrap();
    /// let rook = b.get2(File::H, Rank::R1).unwrap();
    /// assert!(rook.is(Color::White, PieceKind::Rook));
    /// assert!(!rook.has_moved);
    /// assert_eq!(b.get2(File::A, Rank::R1), None);
    /// ```
    #[inline]
    pub fn from_layout(layout: &str) -> Result<Board, LayoutParseError> {
        Board::from_str(layout)
    }

    /// Returns the same board with side to move set to `side`
    #[inline]
    pub fn with_side(mut self, side: Color) -> Board {
        self.side = side;
        self
    }

    /// Returns the piece on the tile `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Option<Piece> {
        self.cells[c.index()]
    }

    /// Returns the piece on the tile with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Option<Piece> {
        self.get(Coord::from_parts(file, rank))
    }

    /// Returns `true` if the tile `c` holds no piece
    #[inline]
    pub fn is_free(&self, c: Coord) -> bool {
        self.cells[c.index()].is_none()
    }

    /// Puts `piece` onto the tile [`Piece::pos`], returning the piece which stood there before
    #[inline]
    pub fn put(&mut self, piece: Piece) -> Option<Piece> {
        self.cells[piece.pos.index()].replace(piece)
    }

    /// Removes the piece from the tile `c` and returns it
    #[inline]
    pub fn take(&mut self, c: Coord) -> Option<Piece> {
        self.cells[c.index()].take()
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub(crate) fn set_side(&mut self, side: Color) {
        self.side = side;
    }

    /// Returns the destination of the last double pawn move made by `c`, if it is still on record
    #[inline]
    pub fn double_step(&self, c: Color) -> Option<Coord> {
        match c {
            Color::White => self.white_double_step,
            Color::Black => self.black_double_step,
        }
    }

    #[inline]
    pub(crate) fn set_double_step(&mut self, c: Color, coord: Option<Coord>) {
        match c {
            Color::White => self.white_double_step = coord,
            Color::Black => self.black_double_step = coord,
        }
    }

    /// Iterates over all the pieces on the board, in the order of increasing tile index
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.cells.iter().flatten()
    }

    /// Returns the set of tiles occupied by pieces of color `c`
    pub fn color(&self, c: Color) -> Bitboard {
        self.pieces()
            .filter(|p| p.color == c)
            .map(|p| p.pos)
            .collect()
    }

    /// Returns the set of occupied tiles
    pub fn occupied(&self) -> Bitboard {
        self.pieces().map(|p| p.pos).collect()
    }

    /// Returns the total material value of the pieces of color `c`
    ///
    /// See [`PieceKind::value()`] for the values of individual pieces.
    pub fn material(&self, c: Color) -> u32 {
        self.pieces()
            .filter(|p| p.color == c)
            .map(|p| p.kind.value())
            .sum()
    }

    /// Checks the invariants of the board
    ///
    /// Boards built via [`Board::put()`] always satisfy the position invariant. This function
    /// is mostly useful for snapshots received from elsewhere.
    pub fn validate(&self) -> Result<(), ValidateError> {
        for (idx, cell) in self.cells.iter().enumerate() {
            if let Some(p) = cell {
                let key = Coord::from_index(idx);
                if p.pos != key {
                    return Err(ValidateError::PositionMismatch { key, pos: p.pos });
                }
            }
        }
        for color in [Color::White, Color::Black] {
            if let Some(c) = self.double_step(color) {
                if c.rank() != geometry::double_move_dst_rank(color) {
                    return Err(ValidateError::InvalidDoubleStep(color, c));
                }
            }
        }
        Ok(())
    }

    /// Wraps the board to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use tilechess::{Board, board::PrettyStyle};
    /// #
    /// let b = Board::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(b.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { board: self, style }
    }

    /// Converts the piece placement into a layout string accepted by [`Board::from_layout()`]
    pub fn as_layout(&self) -> String {
        let mut res = String::new();
        for rank in Rank::iter().rev() {
            if rank != Rank::R8 {
                res.push('/');
            }
            let mut empty = 0_u8;
            for file in File::iter() {
                match self.get2(file, rank) {
                    Some(p) => {
                        if empty != 0 {
                            res.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        res.push(p.as_char());
                    }
                    None => empty += 1,
                }
            }
            if empty != 0 {
                res.push((b'0' + empty) as char);
            }
        }
        res
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

impl FromStr for Board {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        type Error = LayoutParseError;

        // Ranks come from 8 down to 1, so `row` counts ranks from the top.
        let mut file = 0_usize;
        let mut row = 0_usize;
        let mut res = Board::empty();
        let rank_of = |row: usize| Rank::from_index(7 - row);
        for ch in s.chars() {
            match ch {
                '1'..='8' => {
                    let add = (ch as u8 - b'0') as usize;
                    if file + add > 8 {
                        return Err(Error::RankOverflow(rank_of(row)));
                    }
                    file += add;
                }
                '/' => {
                    if file < 8 {
                        return Err(Error::RankUnderflow(rank_of(row)));
                    }
                    row += 1;
                    file = 0;
                    if row >= 8 {
                        return Err(Error::Overflow);
                    }
                }
                _ => {
                    let (color, kind) =
                        Piece::parts_from_char(ch).ok_or(Error::UnexpectedChar(ch))?;
                    if file >= 8 {
                        return Err(Error::RankOverflow(rank_of(row)));
                    }
                    let pos = Coord::from_parts(File::from_index(file), rank_of(row));
                    let mut piece = Piece::new(pos, kind, color);
                    piece.has_moved = !is_initial_tile(color, kind, pos);
                    res.put(piece);
                    file += 1;
                }
            }
        }

        if file < 8 {
            return Err(Error::RankUnderflow(rank_of(row)));
        }
        if row < 7 {
            return Err(Error::Underflow);
        }

        Ok(res)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.as_layout(), self.side)
    }
}

/// Serialized form of [`Board`]
///
/// Holds the list of pieces instead of the full tile array; every piece carries its own tile.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BoardSnapshot {
    pub pieces: Vec<Piece>,
    pub side: Color,
    pub white_double_step: Option<Coord>,
    pub black_double_step: Option<Coord>,
}

#[cfg(feature = "serde")]
impl From<Board> for BoardSnapshot {
    fn from(b: Board) -> BoardSnapshot {
        BoardSnapshot {
            pieces: b.pieces().copied().collect(),
            side: b.side,
            white_double_step: b.white_double_step,
            black_double_step: b.black_double_step,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<BoardSnapshot> for Board {
    type Error = ValidateError;

    fn try_from(s: BoardSnapshot) -> Result<Board, ValidateError> {
        let mut res = Board::empty();
        for piece in s.pieces {
            if res.put(piece).is_some() {
                return Err(ValidateError::DuplicateTile(piece.pos));
            }
        }
        res.side = s.side;
        res.white_double_step = s.white_double_step;
        res.black_double_step = s.black_double_step;
        res.validate()?;
        Ok(res)
    }
}

/// Style for [`Board::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the board
///
/// See docs for [`Board::pretty()`] for more details.
pub struct Pretty<'a> {
    board: &'a Board,
    style: PrettyStyle,
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;
    const EMPTY: char = '.';

    fn piece(p: &Piece) -> char;

    fn indicator(c: Color) -> char {
        match c {
            Color::White => Self::WHITE_INDICATOR,
            Color::Black => Self::BLACK_INDICATOR,
        }
    }

    fn fmt(b: &Board, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter().rev() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                let ch = match b.get2(file, rank) {
                    Some(p) => Self::piece(&p),
                    None => Self::EMPTY,
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(b.side), Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';

    fn piece(p: &Piece) -> char {
        p.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';

    fn piece(p: &Piece) -> char {
        p.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.board, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.board, f),
        }
    }
}
