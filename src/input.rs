use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::navigation::Direction;

/// What a key press asks the game loop to do.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum InputCommand {
    Move(Direction),
    ToggleSolution,
    NewMaze,
    Quit,
}

/// Map a terminal key event to a command, ignoring key releases and unbound keys.
pub fn command_for_key(key: KeyEvent) -> Option<InputCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(InputCommand::Quit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(InputCommand::Move(Direction::Up)),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            Some(InputCommand::Move(Direction::Right))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => {
            Some(InputCommand::Move(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => {
            Some(InputCommand::Move(Direction::Left))
        }
        KeyCode::Char('p') => Some(InputCommand::ToggleSolution),
        KeyCode::Char('n') => Some(InputCommand::NewMaze),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputCommand::Quit),
        _ => None,
    }
}
