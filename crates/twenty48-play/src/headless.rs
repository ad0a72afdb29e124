//! Line-oriented front-end: one command per input line, board printed after
//! every command that changes what is on screen.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use twenty48_engine::game::{Command, Game};

use crate::notice;

/// Drive `game` from `input` until EOF or `quit`, writing to `out`.
pub fn run<R: BufRead, W: Write>(game: &mut Game, input: R, mut out: W) -> Result<()> {
    render(&mut out, game)?;
    for line in input.lines() {
        let line = line.context("failed to read command")?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if matches!(text.to_ascii_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        let command = match text.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                log::warn!("{e}");
                writeln!(out, "error: {e}")?;
                continue;
            }
        };
        let result = game.apply(command);
        if let Some(message) = notice::describe(&result, game) {
            writeln!(out, "{message}")?;
        }
        if command.needs_redraw() {
            render(&mut out, game)?;
        }
    }
    out.flush().context("failed to flush output")?;
    Ok(())
}

fn render<W: Write>(out: &mut W, game: &Game) -> Result<()> {
    write!(out, "{}", game.grid())?;
    writeln!(out, "Score: {}", game.score())?;
    writeln!(out, "Highest Score: {}", game.high_score())?;
    Ok(())
}
