//! Rules and computer opponents for the board game 'Connect 4'
//!
//! A human (always [`Cell::PlayerOne`]) plays against an automated opponent
//! (always [`Cell::PlayerTwo`]). The [`GameController`] owns the real board and
//! hands every human move to the active [`Strategy`], which keeps its own
//! shadow copy of the game.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_versus::*;
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! struct Quiet;
//! impl GameDisplay for Quiet {
//!     fn update_board(&mut self, _board: &Board) {}
//!     fn game_over(&mut self, _winner: Cell) {}
//!     fn prompt_for_opponent_difficulty(&mut self, _max_level: u32) -> u32 { 2 }
//! }
//!
//! let mut controller = GameController::new(Quiet, GameConfig::strong());
//! let outcome = controller.add_piece(3)?;
//!
//! // the heuristic opponent answers the opening move right next to it
//! assert_eq!(outcome, Outcome::Ongoing);
//! assert_eq!(controller.board().get(HEIGHT - 1, 2), Cell::PlayerTwo);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod win;

pub mod strategy;

pub mod controller;

mod test;

pub use board::{Board, Cell, MoveError};
pub use controller::{
    ControllerState, GameConfig, GameController, GameDisplay, Outcome, PositionError,
};
pub use strategy::{Difficulty, HeuristicStrategy, Opponent, RandomStrategy, Strategy};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const CONNECT: usize = 4;

// a line of CONNECT tiles has to fit along every axis
const_assert!(CONNECT <= WIDTH && CONNECT <= HEIGHT);
