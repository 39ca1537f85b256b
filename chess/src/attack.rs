//! Tiles reachable by each piece shape, ignoring colors
//!
//! Functions here only know about geometry and occupancy. Filtering out friendly pieces and
//! special moves is done in [`movegen`](crate::movegen).

use crate::bitboard::Bitboard;
use crate::geometry;
use crate::types::{Color, Coord};

pub const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_DELTAS: [(isize, isize); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ROOK_DIRS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const BISHOP_DIRS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

const fn gen_near(deltas: &[(isize, isize); 8]) -> [Bitboard; 64] {
    let mut res = [Bitboard::EMPTY; 64];
    let mut idx = 0;
    while idx < 64 {
        let file = (idx & 7) as isize;
        let rank = (idx >> 3) as isize;
        let mut bb = Bitboard::EMPTY;
        let mut i = 0;
        while i < deltas.len() {
            let (delta_file, delta_rank) = deltas[i];
            let new_file = file + delta_file;
            let new_rank = rank + delta_rank;
            if new_file >= 0 && new_file < 8 && new_rank >= 0 && new_rank < 8 {
                bb = bb.with(Coord::from_index((new_rank * 8 + new_file) as usize));
            }
            i += 1;
        }
        res[idx] = bb;
        idx += 1;
    }
    res
}

const KNIGHT_ATTACKS: [Bitboard; 64] = gen_near(&KNIGHT_DELTAS);
const KING_ATTACKS: [Bitboard; 64] = gen_near(&KING_DELTAS);

#[inline]
pub fn king(coord: Coord) -> Bitboard {
    KING_ATTACKS[coord.index()]
}

#[inline]
pub fn knight(coord: Coord) -> Bitboard {
    KNIGHT_ATTACKS[coord.index()]
}

/// Returns the two tiles diagonally in front of a pawn of color `color` (or less near the edges)
pub fn pawn(color: Color, coord: Coord) -> Bitboard {
    let forward = geometry::pawn_forward(color);
    [-1, 1]
        .into_iter()
        .filter_map(|delta_file| coord.shift(delta_file, forward))
        .collect()
}

/// Walks from `coord` in direction `(delta_file, delta_rank)`
///
/// All the empty tiles on the way are included. The walk stops on the first occupied tile,
/// which is included as well, whatever piece stands on it.
pub fn ray(coord: Coord, delta_file: isize, delta_rank: isize, occupied: Bitboard) -> Bitboard {
    let mut res = Bitboard::EMPTY;
    let mut cur = coord;
    while let Some(next) = cur.shift(delta_file, delta_rank) {
        res.set(next);
        if occupied.has(next) {
            break;
        }
        cur = next;
    }
    res
}

fn rays(coord: Coord, dirs: &[(isize, isize)], occupied: Bitboard) -> Bitboard {
    dirs.iter().fold(Bitboard::EMPTY, |acc, &(delta_file, delta_rank)| {
        acc | ray(coord, delta_file, delta_rank, occupied)
    })
}

#[inline]
pub fn rook(coord: Coord, occupied: Bitboard) -> Bitboard {
    rays(coord, &ROOK_DIRS, occupied)
}

#[inline]
pub fn bishop(coord: Coord, occupied: Bitboard) -> Bitboard {
    rays(coord, &BISHOP_DIRS, occupied)
}

#[inline]
pub fn queen(coord: Coord, occupied: Bitboard) -> Bitboard {
    rook(coord, occupied) | bishop(coord, occupied)
}
