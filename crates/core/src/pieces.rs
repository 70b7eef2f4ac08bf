//! Pieces module - tetromino shape tables and kick-based rotation
//!
//! Shapes are minimal bounding-box bitmaps expressed as mino offsets from
//! the box's top-left corner. Kinds carry different rotation counts: O has
//! one state, I/S/Z have two, T/J/L have four. Rotation tries a fixed list
//! of horizontal kick offsets and commits the first that fits.

use crate::types::{PieceKind, BOARD_WIDTH};

/// Offset of a single mino relative to the piece origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// Horizontal kick offsets tried in priority order when a rotation collides
pub const KICKS: [i8; 5] = [0, -1, 1, -2, 2];

/// Spawn row: the bounding box starts one row above the visible board
pub const SPAWN_Y: i8 = -1;

// Row 1 of a 4x4 box, then column 2.
const I_SHAPES: [PieceShape; 2] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
];

// 2x2 box, a single state.
const O_SHAPES: [PieceShape; 1] = [[(0, 0), (1, 0), (0, 1), (1, 1)]];

const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [PieceShape; 2] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
];

const Z_SHAPES: [PieceShape; 2] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// Number of distinct rotation states for a kind
pub fn rotation_count(kind: PieceKind) -> u8 {
    match kind {
        PieceKind::I => 2,
        PieceKind::O => 1,
        PieceKind::T => 4,
        PieceKind::S => 2,
        PieceKind::Z => 2,
        PieceKind::J => 4,
        PieceKind::L => 4,
    }
}

/// Width of a kind's bounding box (used to center the spawn column)
pub fn bounding_width(kind: PieceKind) -> i8 {
    match kind {
        PieceKind::I => 4,
        PieceKind::O => 2,
        _ => 3,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation index.
/// The index wraps modulo the kind's rotation count.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let rot = (rotation % rotation_count(kind)) as usize;
    match kind {
        PieceKind::I => I_SHAPES[rot],
        PieceKind::O => O_SHAPES[rot],
        PieceKind::T => T_SHAPES[rot],
        PieceKind::S => S_SHAPES[rot],
        PieceKind::Z => Z_SHAPES[rot],
        PieceKind::J => J_SHAPES[rot],
        PieceKind::L => L_SHAPES[rot],
    }
}

/// Spawn column for a kind: bounding box horizontally centered
pub fn spawn_x(kind: PieceKind) -> i8 {
    (BOARD_WIDTH as i8 - bounding_width(kind)) / 2
}

/// Try to rotate a piece one step in `direction` (+1 = clockwise).
///
/// Kick offsets are tried in [`KICKS`] order against the `fits` predicate.
/// Returns the new shape, rotation index, and the kick that was applied, or
/// None if every kick collides (the caller leaves the piece untouched).
pub fn try_rotate(
    kind: PieceKind,
    rotation: u8,
    x: i8,
    y: i8,
    direction: i8,
    fits: impl Fn(i8, i8) -> bool,
) -> Option<(PieceShape, u8, i8)> {
    let count = rotation_count(kind) as i16;
    let next = (rotation as i16 + direction as i16).rem_euclid(count) as u8;
    let new_shape = get_shape(kind, next);

    for &kick in KICKS.iter() {
        let new_x = x + kick;
        let valid = new_shape.iter().all(|&(mx, my)| fits(new_x + mx, y + my));
        if valid {
            return Some((new_shape, next, kick));
        }
    }

    None
}
