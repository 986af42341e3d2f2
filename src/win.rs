//! Alignment counting around a freshly played cell

use crate::{
    board::{Board, Cell},
    CONNECT, HEIGHT, WIDTH,
};

/// The four lines that pass through a cell
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// top-left to bottom-right
    Diagonal,
    /// bottom-left to top-right
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// One step along the axis as (row, column) offsets, the opposite
    /// direction is the negated step
    fn step(&self) -> (i32, i32) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (-1, 1),
        }
    }
}

/// Number of contiguous cells matching the one at (`row`, `column`) along
/// `axis`, the cell itself included. An empty cell has a run of 0.
///
/// # Panics
/// If `row >= HEIGHT` or `column >= WIDTH`, as do the functions below
pub fn run_length(board: &Board, row: usize, column: usize, axis: Axis) -> usize {
    let piece = board.get(row, column);
    if piece.is_empty() {
        return 0;
    }

    let (dy, dx) = axis.step();
    let mut run = 1;
    for direction in [-1i32, 1].iter() {
        let mut y = row as i32 + dy * direction;
        let mut x = column as i32 + dx * direction;
        loop {
            if y < 0
                || y >= HEIGHT as i32
                || x < 0
                || x >= WIDTH as i32
                || board.get(y as usize, x as usize) != piece
            {
                break;
            }
            y += dy * direction;
            x += dx * direction;
            run += 1;
        }
    }
    run
}

/// The longest run through (`row`, `column`) over all four axes
pub fn longest_run(board: &Board, row: usize, column: usize) -> usize {
    Axis::ALL
        .iter()
        .map(|&axis| run_length(board, row, column, axis))
        .max()
        .unwrap_or(0)
}

/// Whether the piece at (`row`, `column`) completes a line of at least
/// [`CONNECT`] tiles
///
/// Only lines through that cell are examined, so this has to be asked right
/// after the piece is dropped.
pub fn is_winning_cell(board: &Board, row: usize, column: usize) -> bool {
    Axis::ALL
        .iter()
        .any(|&axis| run_length(board, row, column, axis) >= CONNECT)
}

/// The owner of any line of [`CONNECT`] tiles on the board
///
/// Checks every cell, so it is only meant for positions loaded from elsewhere.
/// During play use [`is_winning_cell`] on the piece just dropped.
pub fn find_winner(board: &Board) -> Option<Cell> {
    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            if is_winning_cell(board, row, column) {
                return Some(board.get(row, column));
            }
        }
    }
    None
}
