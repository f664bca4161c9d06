use blockfall_engine::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Game(Command),
    Quit,
}

/// Translates a key event into an action.
///
/// With `key_releases`, the down arrow holds soft drop until it is released;
/// without, each press (including auto-repeat) is one soft-drop step.
pub(crate) fn map_key(key: &KeyEvent, key_releases: bool) -> Option<Action> {
    if key.code == KeyCode::Down {
        return soft_drop(key.kind, key_releases).map(Action::Game);
    }
    let is_repeat = key.kind == KeyEventKind::Repeat;
    if key.kind == KeyEventKind::Release {
        return None;
    }

    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Left => Action::Game(Command::MoveLeft),
        KeyCode::Right => Action::Game(Command::MoveRight),
        // everything below acts once per physical key press
        _ if is_repeat => return None,
        KeyCode::Char('z') => Action::Game(Command::RotateForward),
        KeyCode::Char('x') => Action::Game(Command::RotateBackward),
        KeyCode::Up => Action::Game(Command::Hold),
        KeyCode::Char(' ') => Action::Game(Command::HardDrop),
        KeyCode::Esc => Action::Game(Command::Reset),
        _ => return None,
    };
    Some(action)
}

fn soft_drop(kind: KeyEventKind, key_releases: bool) -> Option<Command> {
    match (kind, key_releases) {
        (KeyEventKind::Press, true) => Some(Command::SoftDropPressed),
        (KeyEventKind::Release, true) => Some(Command::SoftDropReleased),
        (KeyEventKind::Repeat, true) | (KeyEventKind::Release, false) => None,
        (KeyEventKind::Press | KeyEventKind::Repeat, false) => Some(Command::SoftDropStep),
    }
}
