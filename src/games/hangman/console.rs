//! Line-based Hangman for plain terminals and pipes.

use std::io::{BufRead, Write};

use log::debug;

use crate::error::{GameError, Result};
use crate::games::hangman::drawings::DrawingSource;
use crate::games::hangman::round::{Guess, Round, RoundState};

/// Plays `round` to the end, reading one guess per line from `input`.
/// End of input before the round is decided is an error.
pub fn play<R, W>(round: &mut Round, drawings: &dyn DrawingSource, input: &mut R, out: &mut W) -> Result<RoundState>
where
    R: BufRead,
    W: Write,
{
    while round.state() == RoundState::InProgress {
        print_state(round, drawings, out)?;
        let line = read_guess(input, out)?;
        match round.guess(&line) {
            Guess::Invalid => {
                writeln!(out, "Invalid input. Please enter a single letter.").map_err(GameError::Terminal)?;
            }
            guess => debug!("hangman: {:?}", guess),
        }
    }

    print_state(round, drawings, out)?;
    let state = round.state();
    let verdict = if state == RoundState::Won { "You Win!" } else { "You Lose..." };
    writeln!(out, "Game Over... ").map_err(GameError::Terminal)?;
    writeln!(out, "{}", verdict).map_err(GameError::Terminal)?;
    Ok(state)
}

fn print_state<W: Write>(round: &Round, drawings: &dyn DrawingSource, out: &mut W) -> Result<()> {
    writeln!(out, "{}", round.progress()).map_err(GameError::Terminal)?;
    writeln!(out).map_err(GameError::Terminal)?;
    writeln!(out, "{}", drawings.drawing(round.wrong_guesses())).map_err(GameError::Terminal)?;
    Ok(())
}

fn read_guess<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<String> {
    write!(out, "> ").map_err(GameError::Terminal)?;
    out.flush().map_err(GameError::Terminal)?;
    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(GameError::Input)?;
    if read == 0 {
        return Err(GameError::InputClosed);
    }
    Ok(line.trim().to_string())
}
