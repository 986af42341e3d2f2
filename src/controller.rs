//! Turn order between the human and the computer opponent

use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    board::{Board, Cell, MoveError},
    strategy::{Difficulty, Opponent, Strategy},
    win::{find_winner, is_winning_cell},
    WIDTH,
};

/// Everything the controller needs from the user interface
pub trait GameDisplay {
    /// Called with the current board after every completed turn
    fn update_board(&mut self, board: &Board);

    /// Called once per game with the winner, `Cell::Empty` for a draw
    fn game_over(&mut self, winner: Cell);

    /// Asks for an opponent level between 1 and `max_level`
    fn prompt_for_opponent_difficulty(&mut self, max_level: u32) -> u32;
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    PlayerOneWins,
    PlayerTwoWins,
    Draw,
    Ongoing,
}

impl Outcome {
    fn winner(&self) -> Cell {
        match self {
            Outcome::PlayerOneWins => Cell::PlayerOne,
            Outcome::PlayerTwoWins => Cell::PlayerTwo,
            Outcome::Draw | Outcome::Ongoing => Cell::Empty,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ControllerState {
    AwaitingHumanMove,
    GameOver(Outcome),
}

/// Reasons a position cannot be played on from
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum PositionError {
    #[error("invalid position, the board is full")]
    Full,
    #[error("invalid position, {0:?} has already won")]
    AlreadyWon(Cell),
    #[error("invalid position, it is not PlayerOne's turn ({player_one} against {player_two} pieces)")]
    OutOfTurn { player_one: usize, player_two: usize },
}

/// Settings for a series of games
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct GameConfig {
    /// Opponent used before the first reset
    pub difficulty: Difficulty,
    /// Seed for the random opponents, taken from the OS when absent
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn weak() -> Self {
        Self {
            difficulty: Difficulty::Weak,
            seed: None,
        }
    }

    pub fn strong() -> Self {
        Self {
            difficulty: Difficulty::Strong,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Owns the real board and referees a human against an [`Opponent`]
///
/// The opponent never sees this board: it is only told the human's columns and
/// keeps its own copy in step.
pub struct GameController<D: GameDisplay> {
    board: Board,
    display: D,
    opponent: Opponent,
    state: ControllerState,
    // seeds every random opponent handed out by this controller
    rng: StdRng,
}

impl<D: GameDisplay> GameController<D> {
    pub fn new(display: D, config: GameConfig) -> Self {
        Self::start(display, Board::new(), config)
    }

    /// Starts from `board` instead of an empty grid, against the configured
    /// opponent
    ///
    /// The position must be unfinished with the human to move, so both players
    /// have the same number of pieces.
    pub fn from_position(
        display: D,
        board: Board,
        config: GameConfig,
    ) -> Result<Self, PositionError> {
        if let Some(winner) = find_winner(&board) {
            return Err(PositionError::AlreadyWon(winner));
        }
        if board.is_full() {
            return Err(PositionError::Full);
        }
        let player_one = board.count(Cell::PlayerOne);
        let player_two = board.count(Cell::PlayerTwo);
        if player_one != player_two {
            return Err(PositionError::OutOfTurn {
                player_one,
                player_two,
            });
        }
        Ok(Self::start(display, board, config))
    }

    fn start(display: D, board: Board, config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let opponent = config
            .difficulty
            .opponent(board, StdRng::from_rng(&mut rng));

        Self {
            board,
            display,
            opponent,
            state: ControllerState::AwaitingHumanMove,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn opponent(&self) -> &Opponent {
        &self.opponent
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Plays the human's piece in `column` and, unless that settles the game,
    /// the opponent's reply
    ///
    /// A refused move changes nothing and the game carries on.
    pub fn add_piece(&mut self, column: usize) -> Result<Outcome, MoveError> {
        if let ControllerState::GameOver(_) = self.state {
            return Err(MoveError::GameOver);
        }
        if !self.board.is_column_legal(column) {
            let err = if column < WIDTH {
                MoveError::ColumnFull(column)
            } else {
                MoveError::OutOfRange(column)
            };
            warn!(column, %err, "move refused");
            return Err(err);
        }

        let row = self.board.drop(column, Cell::PlayerOne)?;
        if is_winning_cell(&self.board, row, column) {
            return Ok(self.finish(Outcome::PlayerOneWins));
        }
        if self.board.is_full() {
            return Ok(self.finish(Outcome::Draw));
        }

        let reply = match self.opponent.choose_move(column) {
            Some(reply) => reply,
            None => return Err(self.take_back(column, MoveError::OpponentStalled)),
        };
        let row = match self.board.drop(reply, Cell::PlayerTwo) {
            Ok(row) => row,
            Err(err) => return Err(self.take_back(column, err)),
        };
        if is_winning_cell(&self.board, row, reply) {
            return Ok(self.finish(Outcome::PlayerTwoWins));
        }
        if self.board.is_full() {
            return Ok(self.finish(Outcome::Draw));
        }

        self.display.update_board(&self.board);
        Ok(Outcome::Ongoing)
    }

    /// Undoes the human's piece in `column` after the opponent failed to
    /// answer it, and replaces the opponent with one rebuilt from the real board
    fn take_back(&mut self, column: usize, err: MoveError) -> MoveError {
        warn!(column, %err, opponent = self.opponent.name(), "opponent failed to reply");
        self.board.undo_last(column);
        let difficulty = self.opponent.difficulty();
        self.opponent = difficulty.opponent(self.board, StdRng::from_rng(&mut self.rng));
        err
    }

    fn finish(&mut self, outcome: Outcome) -> Outcome {
        info!(?outcome, moves = self.board.move_count(), "game over");
        self.display.update_board(&self.board);
        self.display.game_over(outcome.winner());
        self.state = ControllerState::GameOver(outcome);
        outcome
    }

    /// Starts a new game against an opponent picked through the display
    pub fn reset(&mut self) {
        let level = self
            .display
            .prompt_for_opponent_difficulty(Difficulty::MAX_LEVEL);
        let difficulty = Difficulty::from_level(level);

        self.board.clear();
        self.opponent = difficulty.opponent(self.board, StdRng::from_rng(&mut self.rng));
        self.state = ControllerState::AwaitingHumanMove;
        info!(level, opponent = self.opponent.name(), "new game");
    }
}
