//! # Base types for tilechess
//!
//! This is an auxiliary crate for `tilechess`, which contains some core stuff: coordinates,
//! colors, piece kinds and tile sets.
//!
//! Normally you don't want to use this crate directly. Use `tilechess` instead, it re-exports
//! everything from here.

pub mod bitboard;
pub mod geometry;
pub mod types;
