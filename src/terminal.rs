use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use tracing::error;

use std::io::{stdin, stdout, Write};

use connect4_versus::{Board, Cell, GameDisplay, HEIGHT, WIDTH};

/// Reads one trimmed line from stdin, `None` once stdin is closed
pub fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{}", prompt);
    stdout().flush()?;

    let mut buffer = String::new();
    if stdin().read_line(&mut buffer)? == 0 {
        return Ok(None);
    }
    Ok(Some(buffer.trim().to_string()))
}

/// Asks a yes/no question until it gets an answer, closed stdin counts as no
pub fn confirm(question: &str) -> Result<bool> {
    loop {
        let answer = match read_line(&format!("{} y/n: ", question))? {
            Some(answer) => answer,
            None => return Ok(false),
        };
        match answer.to_lowercase().chars().next() {
            Some('y') => return Ok(true),
            Some('n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

/// Draws the game on the terminal with crossterm
pub struct TerminalDisplay;

impl TerminalDisplay {
    fn draw(&self, board: &Board) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;

        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                stdout.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match board.get(row, column) {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;
        Ok(())
    }
}

impl GameDisplay for TerminalDisplay {
    fn update_board(&mut self, board: &Board) {
        if let Err(err) = self.draw(board) {
            error!(%err, "failed to draw board");
        }
    }

    fn game_over(&mut self, winner: Cell) {
        match winner {
            Cell::PlayerOne => println!("You win!"),
            Cell::PlayerTwo => println!("The computer wins!"),
            Cell::Empty => println!("Draw!"),
        }
    }

    fn prompt_for_opponent_difficulty(&mut self, max_level: u32) -> u32 {
        loop {
            let prompt = format!("Choose the opponent level, 1 (weak) to {} (strong): ", max_level);
            let answer = match read_line(&prompt) {
                Ok(Some(answer)) => answer,
                Ok(None) => return 1,
                Err(err) => {
                    error!(%err, "failed to read difficulty");
                    return 1;
                }
            };
            match answer.parse::<u32>() {
                Ok(level) if (1..=max_level).contains(&level) => return level,
                _ => println!("Invalid level: {}", answer),
            }
        }
    }
}
