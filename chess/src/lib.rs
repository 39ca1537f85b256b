//! # Click-driven chess engine
//!
//! This crate computes the destination tiles of chess pieces and keeps the state of a game
//! played by clicking tiles: a click either selects a piece or moves the selected one.
//!
//! Moves are pseudo-legal. Check, checkmate and promotion are not tracked.
//!
//! # Example
//!
//! ```
//! # use tilechess::{Coord, Color, GameState, Transition};
//! #
//! let mut game = GameState::new();
//! let e2: Coord = "e2".parse().unwrap();
//! let e4: Coord = "e4".parse().unwrap();
//!
//! assert_eq!(game.select_or_move(e2), Transition::Selected(e2));
//! assert!(game.legal_destinations(e2).has(e4));
//! assert!(matches!(game.select_or_move(e4), Transition::Moved(_)));
//! assert_eq!(game.side(), Color::Black);
//! ```

pub mod attack;
pub mod board;
pub mod castling;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod piece;

pub use tilechess_base::{bitboard, geometry, types};

pub use bitboard::Bitboard;
pub use board::Board;
pub use castling::CastlingSide;
pub use game::{GameState, Transition};
pub use moves::{Move, MoveKind};
pub use piece::Piece;
pub use types::{Color, Coord, File, PieceKind, Rank};
