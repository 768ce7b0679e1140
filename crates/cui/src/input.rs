use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    Quit,
    ToggleHelp,
    Dismiss,
    MoveUp,
    MoveDown,
    Draw,
    Stand,
    UseSpecial,
    StartOrNext,
    Reset,
    Confirm,
}

pub fn map_key(key: KeyEvent) -> InputAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => InputAction::Quit,
            _ => InputAction::None,
        };
    }
    match key.code {
        KeyCode::Esc => InputAction::Dismiss,
        KeyCode::Up => InputAction::MoveUp,
        KeyCode::Down => InputAction::MoveDown,
        KeyCode::Enter => InputAction::UseSpecial,
        KeyCode::Char('q') => InputAction::Quit,
        KeyCode::Char('?') => InputAction::ToggleHelp,
        KeyCode::Char('k') => InputAction::MoveUp,
        KeyCode::Char('j') => InputAction::MoveDown,
        KeyCode::Char('d') | KeyCode::Char('h') => InputAction::Draw,
        KeyCode::Char('s') => InputAction::Stand,
        KeyCode::Char('u') => InputAction::UseSpecial,
        KeyCode::Char('n') => InputAction::StartOrNext,
        KeyCode::Char('R') => InputAction::Reset,
        KeyCode::Char('y') => InputAction::Confirm,
        _ => InputAction::None,
    }
}
