//! User-facing messages for command results, shared by both front-ends.

use twenty48_engine::GameError;
use twenty48_engine::game::{Game, Outcome, Status};

/// The message to show after a command, if any. Plain moves and resets are
/// silent; a changed move that ends in a win or loss is not.
pub fn describe(result: &Result<Outcome, GameError>, game: &Game) -> Option<String> {
    match result {
        Ok(Outcome::Saved) => Some("Game Saved!".to_string()),
        Ok(Outcome::Loaded) => Some("Game Loaded!".to_string()),
        Ok(Outcome::Reset) => None,
        Ok(Outcome::Moved(m)) if m.changed => match m.status {
            Status::Won => Some(format!("Congratulations! You've reached {}!", game.win_tile())),
            Status::Lost => Some(format!("Game Over! Your score: {}", game.score())),
            Status::Playing => None,
        },
        Ok(Outcome::Moved(_)) => None,
        Err(GameError::EmptySnapshot) => Some("No saved game found!".to_string()),
        Err(e) => Some(format!("error: {e}")),
    }
}
