#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use rand::{rngs::StdRng, SeedableRng};

    use std::collections::VecDeque;

    use crate::{
        Board, Cell, ControllerState, Difficulty, GameConfig, GameController, GameDisplay,
        HeuristicStrategy, MoveError, Outcome, PositionError, RandomStrategy, Strategy, HEIGHT,
    };

    /// Records everything the controller publishes and answers difficulty
    /// prompts from a script
    #[derive(Default)]
    struct RecordingDisplay {
        boards: Vec<Board>,
        winners: Vec<Cell>,
        answers: VecDeque<u32>,
        prompts: Vec<u32>,
    }

    impl RecordingDisplay {
        fn answering(answers: &[u32]) -> Self {
            Self {
                answers: answers.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl GameDisplay for RecordingDisplay {
        fn update_board(&mut self, board: &Board) {
            self.boards.push(*board);
        }

        fn game_over(&mut self, winner: Cell) {
            self.winners.push(winner);
        }

        fn prompt_for_opponent_difficulty(&mut self, max_level: u32) -> u32 {
            self.prompts.push(max_level);
            self.answers.pop_front().unwrap_or(1)
        }
    }

    // a full board without any alignment of four
    const DRAWN: [&str; HEIGHT] = [
        "XXOOXXO", "XXOOXXO", "OOXXOOX", "XXOOXXO", "OOXXOOX", "OOXXOOX",
    ];

    fn drawn_except(holes: &[usize]) -> Result<Board> {
        let mut board = Board::from_rows(DRAWN)?;
        for &column in holes {
            board
                .undo_last(column)
                .ok_or_else(|| anyhow!("column {} already empty", column))?;
        }
        Ok(board)
    }

    #[test]
    pub fn drawn_layout_has_no_winner() -> Result<()> {
        let board = Board::from_rows(DRAWN)?;
        assert!(board.is_full());
        for row in 0..HEIGHT {
            for column in 0..crate::WIDTH {
                assert!(!crate::win::is_winning_cell(&board, row, column));
            }
        }
        Ok(())
    }

    #[test]
    pub fn horizontal_win_ends_the_game() -> Result<()> {
        let board = Board::from_rows([
            ".......", ".......", ".......", ".......", "OO.....", "XXX...O",
        ])?;
        let mut controller =
            GameController::from_position(RecordingDisplay::default(), board, GameConfig::strong())?;

        assert_eq!(controller.add_piece(3), Ok(Outcome::PlayerOneWins));
        assert_eq!(
            controller.state(),
            ControllerState::GameOver(Outcome::PlayerOneWins)
        );
        assert_eq!(controller.board().get(HEIGHT - 1, 3), Cell::PlayerOne);
        assert_eq!(controller.display().winners, vec![Cell::PlayerOne]);
        assert_eq!(controller.display().boards, vec![*controller.board()]);

        // the opponent was never asked to move
        assert_eq!(controller.opponent().board(), &board);

        // nothing more can be played until a reset
        let finished = *controller.board();
        assert_eq!(controller.add_piece(4), Err(MoveError::GameOver));
        assert_eq!(controller.board(), &finished);
        assert_eq!(controller.display().winners.len(), 1);
        Ok(())
    }

    #[test]
    pub fn opponent_completes_its_own_line() -> Result<()> {
        let board = Board::from_rows([
            ".......", ".......", ".......", ".......", ".......", "OOO.XXX",
        ])?;
        let mut controller =
            GameController::from_position(RecordingDisplay::default(), board, GameConfig::strong())?;

        // both sides would make four in column 3, the opponent prefers its own
        assert_eq!(controller.add_piece(0), Ok(Outcome::PlayerTwoWins));
        assert_eq!(controller.board().get(HEIGHT - 1, 3), Cell::PlayerTwo);
        assert_eq!(controller.display().winners, vec![Cell::PlayerTwo]);
        Ok(())
    }

    #[test]
    pub fn filling_the_board_is_a_draw() -> Result<()> {
        for &difficulty in [Difficulty::Weak, Difficulty::Strong].iter() {
            let board = drawn_except(&[0, 2])?;
            let config = GameConfig {
                difficulty,
                seed: Some(3),
            };
            let mut controller =
                GameController::from_position(RecordingDisplay::default(), board, config)?;

            assert_eq!(controller.add_piece(0), Ok(Outcome::Draw));
            assert_eq!(controller.board(), &Board::from_rows(DRAWN)?);
            assert_eq!(controller.state(), ControllerState::GameOver(Outcome::Draw));
            assert_eq!(controller.display().winners, vec![Cell::Empty]);
        }
        Ok(())
    }

    #[test]
    pub fn finished_or_out_of_turn_positions_are_refused() -> Result<()> {
        let start = |board| {
            GameController::from_position(RecordingDisplay::default(), board, GameConfig::strong())
                .map(|_| ())
        };

        assert_eq!(start(Board::from_rows(DRAWN)?), Err(PositionError::Full));
        let won = Board::from_rows([
            ".......", ".......", "X......", "XO.....", "XO.....", "XO.....",
        ])?;
        assert_eq!(start(won), Err(PositionError::AlreadyWon(Cell::PlayerOne)));

        // the computer would be the one to move
        assert_eq!(
            start(Board::from_moves("444")?),
            Err(PositionError::OutOfTurn {
                player_one: 2,
                player_two: 1
            })
        );
        // the human moved twice in a row
        assert_eq!(
            start(drawn_except(&[0])?),
            Err(PositionError::OutOfTurn {
                player_one: 20,
                player_two: 21
            })
        );

        assert_eq!(start(Board::from_moves("4455")?), Ok(()));
        Ok(())
    }

    #[test]
    pub fn refused_moves_change_nothing() -> Result<()> {
        let board = Board::from_moves("111111")?;
        let mut controller = GameController::from_position(
            RecordingDisplay::default(),
            board,
            GameConfig::weak().with_seed(11),
        )?;

        assert_eq!(controller.add_piece(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(controller.add_piece(7), Err(MoveError::OutOfRange(7)));
        assert_eq!(controller.add_piece(usize::MAX), Err(MoveError::OutOfRange(usize::MAX)));

        assert_eq!(controller.board(), &board);
        assert_eq!(controller.opponent().board(), &board);
        assert_eq!(controller.state(), ControllerState::AwaitingHumanMove);
        assert!(controller.display().boards.is_empty());

        // the game carries on normally afterwards
        assert_eq!(controller.add_piece(1), Ok(Outcome::Ongoing));
        assert_eq!(controller.board().move_count(), board.move_count() + 2);
        Ok(())
    }

    #[test]
    pub fn error_messages() {
        assert_eq!(MoveError::ColumnFull(3).to_string(), "invalid move, column 3 full");
        assert_eq!(
            MoveError::OutOfRange(9).to_string(),
            "invalid move, column 9 out of range, columns must be between 0 and 6"
        );
    }

    #[test]
    pub fn heuristic_blocks_an_open_three() -> Result<()> {
        let board = Board::from_rows([
            ".......", ".......", ".......", ".......", "......O", "XX....O",
        ])?;
        let mut strategy = HeuristicStrategy::with_board(board);

        // the human's third piece in column 2 threatens column 3
        assert_eq!(strategy.choose_move(2), Some(3));

        let mut expected = board;
        expected.drop(2, Cell::PlayerOne)?;
        expected.drop(3, Cell::PlayerTwo)?;
        assert_eq!(strategy.board(), &expected);
        Ok(())
    }

    #[test]
    pub fn heuristic_answers_the_opening_move_next_to_it() {
        let mut strategy = HeuristicStrategy::new();

        // the human's best follow-up is column 2, which beats any single piece
        assert_eq!(strategy.choose_move(3), Some(2));
        assert_eq!(strategy.board().get(HEIGHT - 1, 2), Cell::PlayerTwo);
        assert_eq!(strategy.board().get(HEIGHT - 1, 3), Cell::PlayerOne);
    }

    #[test]
    pub fn heuristic_only_commits_two_pieces() -> Result<()> {
        for moves in ["", "44", "4455", "334455", "1212124"].iter() {
            let board = Board::from_moves(moves)?;
            for human in board.legal_columns() {
                let mut strategy = HeuristicStrategy::with_board(board);
                let reply = strategy
                    .choose_move(human)
                    .ok_or_else(|| anyhow!("no reply after {}{}", moves, human + 1))?;

                let mut expected = board;
                expected.drop(human, Cell::PlayerOne)?;
                expected.drop(reply, Cell::PlayerTwo)?;
                assert_eq!(strategy.board(), &expected);
            }
        }
        Ok(())
    }

    #[test]
    pub fn random_always_finds_the_single_legal_column() -> Result<()> {
        let board = drawn_except(&[4])?;
        let mut strategy = RandomStrategy::with_board(board, StdRng::seed_from_u64(7));

        for _ in 0..1000 {
            assert_eq!(strategy.sample_legal_column(), Some(4));
        }
        assert_eq!(strategy.board(), &board);
        Ok(())
    }

    #[test]
    pub fn random_reply_is_the_remaining_column() -> Result<()> {
        let board = drawn_except(&[0, 2])?;
        for seed in 0..1000 {
            let mut strategy = RandomStrategy::with_board(board, StdRng::seed_from_u64(seed));
            assert_eq!(strategy.choose_move(0), Some(2));
        }
        Ok(())
    }

    #[test]
    pub fn random_gives_up_on_a_full_board() -> Result<()> {
        let mut strategy =
            RandomStrategy::with_board(Board::from_rows(DRAWN)?, StdRng::seed_from_u64(0));
        assert_eq!(strategy.sample_legal_column(), None);
        Ok(())
    }

    #[test]
    pub fn random_replies_are_legal() {
        let mut strategy = RandomStrategy::new(StdRng::seed_from_u64(42));
        let mut board = Board::new();

        for human in [3, 3, 3, 2, 4, 1, 5, 0, 6].iter().copied() {
            if !board.is_column_legal(human) {
                continue;
            }
            board.drop(human, Cell::PlayerOne).unwrap();
            let reply = strategy.choose_move(human).unwrap();
            assert!(board.is_column_legal(reply));
            board.drop(reply, Cell::PlayerTwo).unwrap();
            assert_eq!(strategy.board(), &board);
        }
    }

    #[test]
    pub fn shadow_board_follows_whole_games() {
        for &difficulty in [Difficulty::Weak, Difficulty::Strong].iter() {
            for seed in 0..50 {
                let config = GameConfig {
                    difficulty,
                    seed: Some(seed),
                };
                let mut controller = GameController::new(RecordingDisplay::default(), config);

                // at most one human move per two cells
                for _ in 0..(crate::WIDTH * HEIGHT) / 2 {
                    let column = controller.board().legal_columns().last().unwrap();
                    match controller.add_piece(column).unwrap() {
                        Outcome::Ongoing => {
                            assert_eq!(controller.opponent().board(), controller.board())
                        }
                        _ => break,
                    }
                }

                assert!(matches!(controller.state(), ControllerState::GameOver(_)));
                assert_eq!(controller.display().winners.len(), 1);
            }
        }
    }

    #[test]
    pub fn seeded_games_repeat() {
        let play = |seed| {
            let mut controller =
                GameController::new(RecordingDisplay::default(), GameConfig::weak().with_seed(seed));
            for &column in [3, 3, 2, 4].iter() {
                if controller.add_piece(column).is_err() {
                    break;
                }
            }
            *controller.board()
        };

        assert_eq!(play(5), play(5));
    }

    #[test]
    pub fn reset_swaps_the_opponent() -> Result<()> {
        let display = RecordingDisplay::answering(&[2, 1]);
        let mut controller = GameController::new(display, GameConfig::weak().with_seed(1));
        assert_eq!(controller.opponent().difficulty(), Difficulty::Weak);

        controller.add_piece(3)?;
        controller.reset();
        assert_eq!(controller.opponent().difficulty(), Difficulty::Strong);
        assert_eq!(controller.board(), &Board::new());
        assert_eq!(controller.opponent().board(), &Board::new());
        assert_eq!(controller.state(), ControllerState::AwaitingHumanMove);

        controller.reset();
        assert_eq!(controller.opponent().difficulty(), Difficulty::Weak);
        assert_eq!(controller.display().prompts, vec![2, 2]);
        Ok(())
    }

    #[test]
    pub fn reset_after_game_over_allows_play() -> Result<()> {
        let board = Board::from_rows([
            ".......", ".......", ".......", ".......", "OO.....", "XXX...O",
        ])?;
        let mut controller = GameController::from_position(
            RecordingDisplay::answering(&[2]),
            board,
            GameConfig::weak(),
        )?;
        controller.add_piece(3)?;
        assert_eq!(controller.add_piece(3), Err(MoveError::GameOver));

        controller.reset();
        assert_eq!(controller.add_piece(3), Ok(Outcome::Ongoing));
        assert_eq!(controller.board().get(HEIGHT - 1, 2), Cell::PlayerTwo);
        Ok(())
    }
}
