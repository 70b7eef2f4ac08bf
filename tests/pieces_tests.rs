//! Shape table and rotation tests

use blockfall::core::{get_shape, try_rotate, Board};
use blockfall::types::{PieceKind, BOARD_WIDTH};

#[test]
fn test_all_kinds_have_four_minos() {
    for kind in PieceKind::ALL {
        for rot in 0..4 {
            assert_eq!(get_shape(kind, rot).len(), 4);
        }
    }
}

#[test]
fn test_shapes_have_no_duplicate_minos() {
    for kind in PieceKind::ALL {
        for rot in 0..4 {
            let shape = get_shape(kind, rot);
            for i in 0..4 {
                for j in i + 1..4 {
                    assert_ne!(shape[i], shape[j], "{:?} rot {}", kind, rot);
                }
            }
        }
    }
}

#[test]
fn test_o_piece_single_state() {
    let base = get_shape(PieceKind::O, 0);
    for rot in 1..8 {
        assert_eq!(get_shape(PieceKind::O, rot), base);
    }
}

#[test]
fn test_i_and_skews_alternate_two_states() {
    for kind in [PieceKind::I, PieceKind::S, PieceKind::Z] {
        assert_eq!(get_shape(kind, 0), get_shape(kind, 2));
        assert_eq!(get_shape(kind, 1), get_shape(kind, 3));
        assert_ne!(get_shape(kind, 0), get_shape(kind, 1));
    }
}

#[test]
fn test_t_j_l_cycle_four_states() {
    for kind in [PieceKind::T, PieceKind::J, PieceKind::L] {
        assert_eq!(get_shape(kind, 0), get_shape(kind, 4));
        let states: Vec<_> = (0..4).map(|r| get_shape(kind, r)).collect();
        for i in 0..4 {
            for j in i + 1..4 {
                assert_ne!(states[i], states[j], "{:?} states {} and {}", kind, i, j);
            }
        }
    }
}

#[test]
fn test_rotate_open_field_no_kick() {
    let board = Board::new();
    let fits = |x, y| board.fits(x, y);

    let (shape, rotation, kick) = try_rotate(PieceKind::J, 0, 4, 5, 1, fits).unwrap();
    assert_eq!(rotation, 1);
    assert_eq!(kick, 0);
    assert_eq!(shape, get_shape(PieceKind::J, 1));
}

#[test]
fn test_rotate_kicks_vertical_i_off_right_wall() {
    let board = Board::new();
    let fits = |x, y| board.fits(x, y);

    // Vertical I with its column 2 on the last board column. The horizontal
    // bar spans the box's columns 0..4, so kick offsets walk it back inside.
    let x = BOARD_WIDTH as i8 - 3;
    let (_, rotation, kick) = try_rotate(PieceKind::I, 1, x, 5, 1, fits).unwrap();
    assert_eq!(rotation, 0);
    assert_eq!(x + kick + 3, BOARD_WIDTH as i8 - 1);
}

#[test]
fn test_rotate_blocked_everywhere_fails() {
    let mut board = Board::new();
    for y in 0..board.height() as i8 {
        for x in 0..board.width() as i8 {
            board.set(x, y, Some(PieceKind::I));
        }
    }
    let fits = |x, y| board.fits(x, y);

    assert!(try_rotate(PieceKind::T, 0, 4, 5, 1, fits).is_none());
}

#[test]
fn test_rotate_then_counter_rotate_restores_state() {
    let board = Board::new();
    let fits = |x, y| board.fits(x, y);

    for kind in PieceKind::ALL {
        let (_, rotation, kick) = try_rotate(kind, 0, 4, 5, 1, fits).unwrap();
        let (_, back, back_kick) = try_rotate(kind, rotation, 4 + kick, 5, -1, fits).unwrap();
        assert_eq!(back, 0, "{:?} did not return to state 0", kind);
        assert_eq!(kick + back_kick, 0, "{:?} drifted horizontally", kind);
    }
}
