use crate::app::App;
use crate::input::InputAction;
use ratatui::backend::Backend;
use sp21_core::Engine;

pub fn dispatch<E: Engine, B: Backend>(app: &mut App<E, B>, action: InputAction) {
    if app.ui().alert.is_some() {
        match action {
            InputAction::Quit => app.should_quit = true,
            InputAction::None => {}
            _ => app.dismiss(),
        }
        return;
    }
    // While the reset prompt is open only y / n / esc / q mean anything.
    if app.ui().confirm_reset {
        match action {
            InputAction::Confirm => app.confirm_reset(),
            InputAction::StartOrNext | InputAction::Dismiss => app.cancel_reset(),
            InputAction::Quit => app.should_quit = true,
            _ => {}
        }
        return;
    }
    match action {
        InputAction::None | InputAction::Confirm => {}
        InputAction::Quit => app.should_quit = true,
        InputAction::ToggleHelp => app.toggle_help(),
        InputAction::Dismiss => app.dismiss(),
        InputAction::MoveUp => app.move_cursor(false),
        InputAction::MoveDown => app.move_cursor(true),
        InputAction::Draw => app.draw_card(),
        InputAction::Stand => app.stand(),
        InputAction::UseSpecial => app.use_selected(),
        InputAction::StartOrNext => app.start_or_next(),
        InputAction::Reset => app.request_reset(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{app, start_body, StubEngine};
    use sp21_core::Command;

    #[test]
    fn n_inside_reset_prompt_cancels_instead_of_starting() {
        let mut app = app(StubEngine::default().reply(start_body()));
        dispatch(&mut app, InputAction::StartOrNext);
        dispatch(&mut app, InputAction::Reset);
        dispatch(&mut app, InputAction::StartOrNext);
        assert!(!app.ui().confirm_reset);
        assert_eq!(app.table.engine().calls, vec![Command::StartRound]);
    }

    #[test]
    fn keys_are_swallowed_while_an_alert_is_open() {
        let mut app = app(StubEngine::default().reply(start_body()));
        app.table.shell_mut().ui.alert = Some("engine down".to_string());
        dispatch(&mut app, InputAction::StartOrNext);
        assert!(app.ui().alert.is_none());
        assert!(app.table.engine().calls.is_empty());
    }

    #[test]
    fn quit_sets_flag() {
        let mut app = app(StubEngine::default());
        dispatch(&mut app, InputAction::Quit);
        assert!(app.should_quit);
    }
}
