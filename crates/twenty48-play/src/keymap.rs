//! Key bindings for the terminal UI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use twenty48_engine::engine::Move;
use twenty48_engine::game::Command;

/// What a key press asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Game(Command),
}

/// Map a key press to an action. Unbound keys yield `None`.
///
/// Arrows move, `r` resets, `s` saves, `l` loads, `q`/Esc/Ctrl-C quit.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Action::Quit);
        }
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Left => Command::Move(Move::Left),
        KeyCode::Right => Command::Move(Move::Right),
        KeyCode::Up => Command::Move(Move::Up),
        KeyCode::Down => Command::Move(Move::Down),
        KeyCode::Char('r' | 'R') => Command::Reset,
        KeyCode::Char('s' | 'S') => Command::Save,
        KeyCode::Char('l' | 'L') => Command::Load,
        _ => return None,
    };
    Some(Action::Game(command))
}

/// One-line summary of the bindings for the footer.
pub const HELP: &str = "arrows: move   r: new game   s: save   l: load   q: quit";

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn it_maps_arrows_to_moves() {
        assert_eq!(action_for(key(KeyCode::Left)), Some(Action::Game(Command::Move(Move::Left))));
        assert_eq!(action_for(key(KeyCode::Right)), Some(Action::Game(Command::Move(Move::Right))));
        assert_eq!(action_for(key(KeyCode::Up)), Some(Action::Game(Command::Move(Move::Up))));
        assert_eq!(action_for(key(KeyCode::Down)), Some(Action::Game(Command::Move(Move::Down))));
    }

    #[test]
    fn it_maps_letters() {
        assert_eq!(action_for(key(KeyCode::Char('r'))), Some(Action::Game(Command::Reset)));
        assert_eq!(action_for(key(KeyCode::Char('S'))), Some(Action::Game(Command::Save)));
        assert_eq!(action_for(key(KeyCode::Char('l'))), Some(Action::Game(Command::Load)));
        assert_eq!(action_for(key(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for(key(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
        assert_eq!(action_for(key(KeyCode::Char('x'))), None);
        assert_eq!(action_for(key(KeyCode::Char('c'))), None);
    }
}
