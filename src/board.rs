use anyhow::{anyhow, Result};
use thiserror::Error;

use std::fmt;

use crate::{win::is_winning_cell, HEIGHT, WIDTH};

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// The piece of the other player, `Empty` stays `Empty`
    pub fn opponent(&self) -> Cell {
        match self {
            Cell::PlayerOne => Cell::PlayerTwo,
            Cell::PlayerTwo => Cell::PlayerOne,
            Cell::Empty => Cell::Empty,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
        }
    }

    fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::PlayerOne),
            'O' | 'o' => Some(Cell::PlayerTwo),
            _ => None,
        }
    }
}

/// Reasons a move can be refused
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum MoveError {
    #[error("invalid move, column {0} out of range, columns must be between 0 and {max}", max = WIDTH - 1)]
    OutOfRange(usize),
    #[error("invalid move, column {0} full")]
    ColumnFull(usize),
    #[error("the game is over, reset to play again")]
    GameOver,
    #[error("the opponent found no legal column to play")]
    OpponentStalled,
}

/// A 7x6 Connect 4 grid
///
/// Row 0 is the top of the board and row `HEIGHT - 1` the bottom. Pieces only
/// ever enter through [`Board::drop`] and leave through [`Board::undo_last`], so
/// no occupied cell ever has an empty cell below it.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Builds a position from a string of 1-indexed columns, players alternating
    /// and PlayerOne moving first
    ///
    /// Fails if any of the moves wins the game.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut piece = Cell::PlayerOne;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    let row = board.drop(column - 1, piece)?;
                    // abort if the position is won at any point
                    if is_winning_cell(&board, row, column - 1) {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    piece = piece.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// Builds a position from its text grid, top row first, using `.` for
    /// empty cells, `X` for PlayerOne and `O` for PlayerTwo
    pub fn from_rows(rows: [&str; HEIGHT]) -> Result<Self> {
        let mut board = Self::new();

        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if symbols.len() != WIDTH {
                return Err(anyhow!(
                    "row {} has {} cells, expected {}",
                    row,
                    symbols.len(),
                    WIDTH
                ));
            }
            for (column, &symbol) in symbols.iter().enumerate() {
                board.cells[row][column] = Cell::from_symbol(symbol)
                    .ok_or_else(|| anyhow!("could not parse '{}' as a cell", symbol))?;
            }
        }

        // reject floating pieces
        for row in 1..HEIGHT {
            for column in 0..WIDTH {
                if !board.cells[row - 1][column].is_empty() && board.cells[row][column].is_empty() {
                    return Err(anyhow!(
                        "invalid position, piece at row {} column {} is floating",
                        row - 1,
                        column
                    ));
                }
            }
        }
        Ok(board)
    }

    /// # Panics
    /// If `row >= HEIGHT` or `column >= WIDTH`
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    pub fn is_column_legal(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_empty()
    }

    pub fn legal_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..WIDTH).filter(move |&column| self.is_column_legal(column))
    }

    /// Places `piece` in the lowest empty cell of `column` and returns its row
    pub fn drop(&mut self, column: usize, piece: Cell) -> Result<usize, MoveError> {
        if column >= WIDTH {
            return Err(MoveError::OutOfRange(column));
        }
        match (0..HEIGHT).rev().find(|&row| self.cells[row][column].is_empty()) {
            Some(row) => {
                self.cells[row][column] = piece;
                Ok(row)
            }
            None => Err(MoveError::ColumnFull(column)),
        }
    }

    /// Removes the most recently dropped piece of `column`, doing nothing if the
    /// column is empty
    pub fn undo_last(&mut self, column: usize) -> Option<Cell> {
        if column >= WIDTH {
            return None;
        }
        let row = (0..HEIGHT).find(|&row| !self.cells[row][column].is_empty())?;
        let piece = self.cells[row][column];
        self.cells[row][column] = Cell::Empty;
        Some(piece)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    pub fn move_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| !cell.is_empty()).count()
    }

    /// Number of cells holding `piece`
    pub fn count(&self, piece: Cell) -> usize {
        self.cells.iter().flatten().filter(|&&cell| cell == piece).count()
    }

    pub fn clear(&mut self) {
        self.cells = [[Cell::Empty; WIDTH]; HEIGHT];
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for cell in cells.iter() {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}
