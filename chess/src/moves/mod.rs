//! Moves and committing them to the board

mod base;
mod make;

pub(crate) use base::classify;
pub use base::{Move, MoveKind, ValidateError};
pub use make::make_move;
