//! Selection and commit protocol driven by tile clicks

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::movegen;
use crate::moves::{self, Move};
use crate::piece::Piece;
use crate::types::{Color, Coord};

use log::debug;

/// Outcome of a single click
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Transition {
    /// The selected piece was moved, and the selection was cleared
    Moved(Move),
    /// Nothing was selected, and now the piece on this tile is
    Selected(Coord),
    /// Selection moved from another piece to the piece on this tile
    Reselected(Coord),
    /// Selection was cleared by clicking an empty tile
    Deselected,
    /// Nothing happened
    Ignored,
}

/// State of the game between clicks
///
/// The state is either idle (no selection) or has exactly one selected tile. Each click is
/// handled by [`GameState::select_or_move()`], which is the only way to change the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    board: Board,
    selection: Option<Coord>,
    last_move: Option<Move>,
}

impl GameState {
    /// Starts a new game from the initial position, White to move
    pub fn new() -> GameState {
        GameState::from_board(Board::initial())
    }

    /// Starts a game from the given board
    pub fn from_board(board: Board) -> GameState {
        GameState {
            board,
            selection: None,
            last_move: None,
        }
    }

    /// Throws the current game away and starts a new one
    pub fn reset(&mut self) {
        *self = GameState::new();
        debug!("new game started");
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side(&self) -> Color {
        self.board.side()
    }

    #[inline]
    pub fn piece_at(&self, tile: Coord) -> Option<Piece> {
        self.board.get(tile)
    }

    #[inline]
    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    #[inline]
    pub fn is_selected(&self, tile: Coord) -> bool {
        self.selection == Some(tile)
    }

    /// Returns the selected piece, if any
    #[inline]
    pub fn selected_piece(&self) -> Option<Piece> {
        self.selection.and_then(|c| self.board.get(c))
    }

    /// Returns the last committed move
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Returns the tiles to highlight for the piece on `tile`
    ///
    /// This is exactly the set of tiles to which the piece can be moved once it's its turn.
    #[inline]
    pub fn legal_destinations(&self, tile: Coord) -> Bitboard {
        movegen::destinations(&self.board, tile)
    }

    /// Selects the piece on `tile`
    ///
    /// Pieces of either color can be selected, regardless of whose turn it is. Clicking an
    /// empty tile does nothing.
    pub fn select(&mut self, tile: Coord) -> Transition {
        if self.board.is_free(tile) {
            return Transition::Ignored;
        }
        let res = match self.selection.replace(tile) {
            Some(_) => Transition::Reselected(tile),
            None => Transition::Selected(tile),
        };
        debug!("{:?}", res);
        res
    }

    fn try_commit(&mut self, src: Coord, dst: Coord) -> Option<Move> {
        let mv = Move::new(&self.board, src, dst).ok()?;
        moves::make_move(&mut self.board, mv).ok()?;
        self.selection = None;
        self.last_move = Some(mv);
        Some(mv)
    }

    /// Handles a click on `tile`
    ///
    /// If a piece of the side to move is selected and `tile` is one of its destinations, the
    /// move is committed. Otherwise, clicking a piece selects it, and clicking an empty tile
    /// clears the selection.
    pub fn select_or_move(&mut self, tile: Coord) -> Transition {
        match self.selection {
            Some(src) => {
                if let Some(mv) = self.try_commit(src, tile) {
                    return Transition::Moved(mv);
                }
                if self.board.is_free(tile) {
                    self.selection = None;
                    debug!("{:?}", Transition::Deselected);
                    Transition::Deselected
                } else {
                    self.select(tile)
                }
            }
            None => self.select(tile),
        }
    }

    /// Same as [`GameState::select_or_move()`], but takes a 1-based (file, rank) pair
    ///
    /// Pairs outside the board are ignored.
    pub fn click(&mut self, file: i32, rank: i32) -> Transition {
        match Coord::from_pair(file, rank) {
            Some(tile) => self.select_or_move(tile),
            None => {
                debug!("click outside the board at ({}, {})", file, rank);
                Transition::Ignored
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
