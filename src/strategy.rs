//! Computer opponents
//!
//! Every strategy keeps a private shadow [`Board`] that mirrors the game. It is
//! told the human's column once per turn, records that move, picks a reply and
//! records the reply too, so the shadow board always matches the real one
//! between calls.

use rand::{rngs::StdRng, Rng};
use tracing::{debug, warn};

use crate::{
    board::{Board, Cell},
    win::longest_run,
    WIDTH,
};

/// Something that answers the human's moves
pub trait Strategy {
    /// Records the human's move in `last_human_column` and returns the column
    /// of the reply, which is recorded as well
    ///
    /// `None` means the shadow board has no legal column left.
    fn choose_move(&mut self, last_human_column: usize) -> Option<usize>;

    fn name(&self) -> &str;

    /// The strategy's own view of the game
    fn board(&self) -> &Board;
}

fn record(board: &mut Board, column: usize, piece: Cell) {
    if let Err(err) = board.drop(column, piece) {
        warn!(column, ?piece, %err, "shadow board out of sync");
    }
}

/// Plays a uniformly random legal column
pub struct RandomStrategy<R: Rng = StdRng> {
    board: Board,
    rng: R,
}

impl<R: Rng> RandomStrategy<R> {
    pub fn new(rng: R) -> Self {
        Self::with_board(Board::new(), rng)
    }

    pub fn with_board(board: Board, rng: R) -> Self {
        Self { board, rng }
    }

    /// Draws columns until a legal one comes up, without touching the board
    pub fn sample_legal_column(&mut self) -> Option<usize> {
        if self.board.legal_columns().next().is_none() {
            return None;
        }
        loop {
            let column = self.rng.random_range(0..WIDTH);
            if self.board.is_column_legal(column) {
                return Some(column);
            }
        }
    }
}

impl<R: Rng> Strategy for RandomStrategy<R> {
    fn choose_move(&mut self, last_human_column: usize) -> Option<usize> {
        record(&mut self.board, last_human_column, Cell::PlayerOne);

        let column = self.sample_legal_column()?;
        debug!(column, "random reply");

        record(&mut self.board, column, Cell::PlayerTwo);
        Some(column)
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn board(&self) -> &Board {
        &self.board
    }
}

/// A column together with the longest line it would produce
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct ColumnScore {
    pub column: usize,
    pub run: usize,
}

/// Greedy one-move lookahead
///
/// Every legal column is tried once for each side. The opponent plays its own
/// best column unless the human's best column would give a longer line, in
/// which case it takes that column away from the human. Lines are compared by
/// length only, so an immediate human win elsewhere can be missed.
pub struct HeuristicStrategy {
    board: Board,
}

impl HeuristicStrategy {
    pub fn new() -> Self {
        Self::with_board(Board::new())
    }

    pub fn with_board(board: Board) -> Self {
        Self { board }
    }

    /// The first column, in ascending order, giving the longest line for
    /// `piece` if it were played there next
    ///
    /// Each candidate is dropped and undone again, the board is left as it was.
    pub fn best_column(&mut self, piece: Cell) -> Option<ColumnScore> {
        let mut best: Option<ColumnScore> = None;
        for column in 0..WIDTH {
            // full columns are refused by the drop
            let row = match self.board.drop(column, piece) {
                Ok(row) => row,
                Err(_) => continue,
            };
            let run = longest_run(&self.board, row, column);
            self.board.undo_last(column);

            if best.map_or(true, |best| run > best.run) {
                best = Some(ColumnScore { column, run });
            }
        }
        best
    }
}

impl Default for HeuristicStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for HeuristicStrategy {
    fn choose_move(&mut self, last_human_column: usize) -> Option<usize> {
        record(&mut self.board, last_human_column, Cell::PlayerOne);

        let threat = self.best_column(Cell::PlayerOne)?;
        let own = self.best_column(Cell::PlayerTwo)?;

        let column = if own.run >= threat.run {
            own.column
        } else {
            threat.column
        };
        debug!(
            own_column = own.column,
            own_run = own.run,
            threat_column = threat.column,
            threat_run = threat.run,
            column,
            "heuristic reply"
        );

        record(&mut self.board, column, Cell::PlayerTwo);
        Some(column)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }

    fn board(&self) -> &Board {
        &self.board
    }
}

/// Opponent strength as chosen by the player
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub enum Difficulty {
    #[default]
    Weak,
    Strong,
}

impl Difficulty {
    /// The highest level offered to the player
    pub const MAX_LEVEL: u32 = 2;

    /// Level 1 is the weak opponent, anything else the strong one
    pub fn from_level(level: u32) -> Self {
        match level {
            1 => Difficulty::Weak,
            _ => Difficulty::Strong,
        }
    }

    pub fn level(&self) -> u32 {
        match self {
            Difficulty::Weak => 1,
            Difficulty::Strong => 2,
        }
    }

    /// A fresh opponent of this strength whose shadow board starts at `board`
    pub fn opponent(&self, board: Board, rng: StdRng) -> Opponent {
        match self {
            Difficulty::Weak => Opponent::Random(RandomStrategy::with_board(board, rng)),
            Difficulty::Strong => Opponent::Heuristic(HeuristicStrategy::with_board(board)),
        }
    }
}

/// The opponents a game can be played against
pub enum Opponent {
    Random(RandomStrategy<StdRng>),
    Heuristic(HeuristicStrategy),
}

impl Opponent {
    pub fn difficulty(&self) -> Difficulty {
        match self {
            Opponent::Random(_) => Difficulty::Weak,
            Opponent::Heuristic(_) => Difficulty::Strong,
        }
    }
}

impl Strategy for Opponent {
    fn choose_move(&mut self, last_human_column: usize) -> Option<usize> {
        match self {
            Opponent::Random(strategy) => strategy.choose_move(last_human_column),
            Opponent::Heuristic(strategy) => strategy.choose_move(last_human_column),
        }
    }

    fn name(&self) -> &str {
        match self {
            Opponent::Random(strategy) => strategy.name(),
            Opponent::Heuristic(strategy) => strategy.name(),
        }
    }

    fn board(&self) -> &Board {
        match self {
            Opponent::Random(strategy) => strategy.board(),
            Opponent::Heuristic(strategy) => strategy.board(),
        }
    }
}
