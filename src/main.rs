use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use connect4_versus::*;

mod terminal;
use terminal::*;

/// Play Connect 4 against the computer
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Opponent level for the first game, 1 (random) or 2 (heuristic)
    #[arg(short, long, default_value_t = 1)]
    difficulty: u32,

    /// Seed for the random opponent, for repeatable games
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start from a position given as 1-indexed columns, e.g. "4453"
    #[arg(short, long)]
    moves: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = GameConfig {
        difficulty: Difficulty::from_level(args.difficulty),
        seed: args.seed,
    };
    let board = match &args.moves {
        Some(moves) => Board::from_moves(moves)?,
        None => Board::new(),
    };

    println!("Welcome to Connect 4\n");

    let mut controller = GameController::from_position(TerminalDisplay, board, config)?;
    println!("Playing against the {} opponent", controller.opponent().name());
    controller.display_mut().update_board(&board);

    // game loop
    loop {
        match controller.state() {
            ControllerState::AwaitingHumanMove => {
                let input = match read_line("Move input (q to quit) > ")? {
                    Some(input) => input,
                    None => break,
                };
                if input == "q" {
                    break;
                }

                let column = match input.parse::<usize>() {
                    Ok(column @ 1..=WIDTH) => column - 1,
                    Ok(column) => {
                        println!("Invalid move, column {} out of range. Columns must be between 1 and {}", column, WIDTH);
                        continue;
                    }
                    Err(_) => {
                        println!("Invalid number: {}", input);
                        continue;
                    }
                };

                // columns are shown 1-indexed
                match controller.add_piece(column) {
                    Err(MoveError::ColumnFull(column)) => {
                        println!("Invalid move, column {} full", column + 1)
                    }
                    Err(err) => println!("{}", err),
                    Ok(_) => {}
                }
            }

            // end states
            ControllerState::GameOver(_) => {
                if !confirm("Play again?")? {
                    break;
                }
                controller.reset();
                println!("Playing against the {} opponent", controller.opponent().name());
                controller.display_mut().update_board(&Board::new());
            }
        }
    }
    Ok(())
}
