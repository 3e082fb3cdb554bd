//! Playfield rules: collision, locking and line clearing.

use macroquad::prelude::{Color, RED};

use retro_tetris::board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use retro_tetris::tetromino::TetrominoType;

const GRAY: Color = Color::new(0.5, 0.5, 0.5, 1.0);

fn fill_row_except(board: &mut Board, y: i32, gaps: &[i32]) {
    for x in 0..BOARD_WIDTH as i32 {
        if !gaps.contains(&x) {
            board.set(x, y, Some(GRAY));
        }
    }
}

#[test]
fn new_board_is_empty() {
    let board = Board::new();
    assert_eq!(board.width(), 10);
    assert_eq!(board.height(), 20);
    assert_eq!(board.filled_cells(), 0);
    for y in 0..BOARD_HEIGHT as i32 {
        for x in 0..BOARD_WIDTH as i32 {
            assert_eq!(board.get(x, y), Some(None));
        }
    }
}

#[test]
fn get_and_set_reject_out_of_bounds() {
    let mut board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
    assert!(!board.set(-1, 5, Some(RED)));
    assert!(!board.set(3, BOARD_HEIGHT as i32, Some(RED)));
    assert!(board.set(3, 7, Some(RED)));
    assert_eq!(board.get(3, 7), Some(Some(RED)));
}

#[test]
fn valid_positions_only_touch_free_cells() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[0, 5]);
    fill_row_except(&mut board, 18, &[0, 1, 2, 5, 6]);
    board.set(7, 10, Some(GRAY));
    board.set(2, 3, Some(GRAY));

    let mut valid_count = 0;
    for t_type in TetrominoType::ALL {
        for rotation in 0..t_type.rotation_count() {
            for y in -4..BOARD_HEIGHT as i32 + 4 {
                for x in -4..BOARD_WIDTH as i32 + 4 {
                    if !board.is_valid_position(t_type, rotation, x, y) {
                        continue;
                    }
                    valid_count += 1;
                    for &[dx, dy] in t_type.shape(rotation) {
                        let (cx, cy) = (x + dx, y + dy);
                        assert!((0..BOARD_WIDTH as i32).contains(&cx));
                        assert!(cy < BOARD_HEIGHT as i32);
                        if cy >= 0 {
                            assert_eq!(board.get(cx, cy), Some(None));
                        }
                    }
                }
            }
        }
    }
    assert!(valid_count > 0);
}

#[test]
fn rows_above_the_board_are_allowed() {
    let board = Board::new();
    // Vertical I reaches two rows above its pivot.
    assert!(board.is_valid_position(TetrominoType::I, 0, 0, 0));
    assert!(board.is_valid_position(TetrominoType::I, 0, 0, -1));
    assert!(!board.is_valid_position(TetrominoType::I, 0, -1, 0));
    assert!(!board.is_valid_position(TetrominoType::I, 0, BOARD_WIDTH as i32, 0));
}

#[test]
fn floor_is_solid() {
    let board = Board::new();
    assert!(board.is_valid_position(TetrominoType::I, 0, 4, 18));
    assert!(!board.is_valid_position(TetrominoType::I, 0, 4, 19));
    assert!(board.is_valid_position(TetrominoType::O, 0, 4, 18));
    assert!(!board.is_valid_position(TetrominoType::O, 0, 4, 19));
}

#[test]
fn occupied_cells_block_placement() {
    let mut board = Board::new();
    board.set(4, 10, Some(GRAY));
    assert!(!board.is_valid_position(TetrominoType::O, 0, 4, 10));
    assert!(!board.is_valid_position(TetrominoType::O, 0, 3, 9));
    assert!(board.is_valid_position(TetrominoType::O, 0, 5, 10));
}

#[test]
fn lock_drops_cells_above_the_top() {
    let mut board = Board::new();
    board.lock_piece(TetrominoType::I, 0, 0, 0, RED);
    assert_eq!(board.filled_cells(), 2);
    assert_eq!(board.get(0, 0), Some(Some(RED)));
    assert_eq!(board.get(0, 1), Some(Some(RED)));
}

#[test]
fn lock_writes_every_visible_cell() {
    let mut board = Board::new();
    board.lock_piece(TetrominoType::T, 2, 4, 10, RED);
    for (x, y) in [(4, 10), (3, 10), (5, 10), (4, 11)] {
        assert_eq!(board.get(x, y), Some(Some(RED)));
    }
    assert_eq!(board.filled_cells(), 4);
}

#[test]
fn clearing_without_full_rows_changes_nothing() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[9]);
    fill_row_except(&mut board, 12, &[0, 1]);
    let before = board.clone();
    assert_eq!(board.clear_full_lines(), 0);
    assert_eq!(board, before);
    assert_eq!(board.clear_full_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn locking_the_last_gap_clears_that_row() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[3, 4, 5, 6]);
    fill_row_except(&mut board, 18, &[0, 4]);
    board.set(8, 15, Some(RED));

    // Horizontal I covers columns 3..=6.
    board.lock_piece(TetrominoType::I, 1, 4, 19, RED);
    assert!(board.is_row_full(19));
    let row_18 = board.rows()[18];
    let filled = board.filled_cells();

    assert_eq!(board.clear_full_lines(), 1);
    assert_eq!(board.filled_cells(), filled - BOARD_WIDTH);
    assert_eq!(board.rows()[19], row_18);
    assert_eq!(board.get(8, 16), Some(Some(RED)));
    assert_eq!(board.get(8, 15), Some(None));
    assert!(board.rows()[0].iter().all(|cell| cell.is_none()));
}

#[test]
fn separated_full_rows_keep_remaining_order() {
    let mut board = Board::new();
    fill_row_except(&mut board, 19, &[]);
    fill_row_except(&mut board, 18, &[1]);
    fill_row_except(&mut board, 17, &[]);
    fill_row_except(&mut board, 16, &[2]);
    board.set(5, 15, Some(RED));
    let (row_18, row_16, row_15) = (board.rows()[18], board.rows()[16], board.rows()[15]);

    assert_eq!(board.clear_full_lines(), 2);
    assert_eq!(board.rows()[19], row_18);
    assert_eq!(board.rows()[18], row_16);
    assert_eq!(board.rows()[17], row_15);
    assert!(board.rows()[..17].iter().flatten().all(|cell| cell.is_none()));
}

#[test]
fn four_full_rows_clear_at_once() {
    let mut board = Board::new();
    for y in 16..20 {
        fill_row_except(&mut board, y, &[]);
    }
    assert_eq!(board.clear_full_lines(), 4);
    assert_eq!(board, Board::new());
}
