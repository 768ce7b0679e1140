use crate::surface::{Surface, UiState};
use ratatui::backend::Backend;
use sp21_core::{Catalog, CommandError, Controller, Engine};
use sp21_data::normalize_locale;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLocale {
    EnUs,
    JaJp,
}

impl UiLocale {
    pub fn from_opt(value: Option<&str>) -> Self {
        let normalized = normalize_locale(value);
        if normalized == "ja_JP" {
            Self::JaJp
        } else {
            Self::EnUs
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::JaJp => "ja_JP",
        }
    }

    pub fn text<'a>(self, en: &'a str, ja: &'a str) -> &'a str {
        if matches!(self, Self::JaJp) {
            ja
        } else {
            en
        }
    }
}

pub struct App<E: Engine, B: Backend> {
    pub table: Controller<E, Surface<B>>,
    pub should_quit: bool,
}

impl<E: Engine, B: Backend> App<E, B> {
    pub fn new(engine: E, catalog: Catalog, surface: Surface<B>) -> Self {
        Self {
            table: Controller::new(engine, catalog, surface),
            should_quit: false,
        }
    }

    pub fn ui(&self) -> &UiState {
        &self.table.shell().ui
    }

    fn ui_mut(&mut self) -> &mut UiState {
        &mut self.table.shell_mut().ui
    }

    pub fn redraw(&mut self) {
        self.table.shell_mut().redraw();
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.ui_mut().status_line = value.into();
    }

    /// Start the first round from the title screen, or the next one after a round ends.
    pub fn start_or_next(&mut self) {
        let result = self.table.start_round();
        self.report(result);
    }

    pub fn draw_card(&mut self) {
        let result = self.table.draw();
        self.report(result);
    }

    pub fn stand(&mut self) {
        let result = self.table.stand();
        self.report(result);
    }

    pub fn use_selected(&mut self) {
        let Some(id) = self.ui().selected_special().map(|row| row.id.clone()) else {
            let locale = self.ui().locale;
            self.push_status(locale.text("no special card selected", "SPカードが選択されていません"));
            return;
        };
        let result = self.table.use_special(&id);
        self.report(result);
    }

    pub fn request_reset(&mut self) {
        if !self.table.can_reset() {
            let locale = self.ui().locale;
            self.push_status(locale.text("reset is not available now", "今はリセットできません"));
            return;
        }
        self.ui_mut().confirm_reset = true;
    }

    pub fn confirm_reset(&mut self) {
        self.ui_mut().confirm_reset = false;
        let result = self.table.reset_session();
        self.report(result);
    }

    pub fn cancel_reset(&mut self) {
        self.ui_mut().confirm_reset = false;
        let locale = self.ui().locale;
        self.push_status(locale.text("reset cancelled", "リセットを取り消しました"));
    }

    pub fn move_cursor(&mut self, down: bool) {
        self.ui_mut().move_cursor(down);
    }

    pub fn toggle_help(&mut self) {
        let ui = self.ui_mut();
        ui.show_help = !ui.show_help;
    }

    /// Esc: close whatever overlay is open, innermost first.
    pub fn dismiss(&mut self) {
        if self.ui_mut().alert.take().is_some() {
            return;
        }
        if self.ui().confirm_reset {
            self.cancel_reset();
            return;
        }
        self.ui_mut().show_help = false;
    }

    fn report(&mut self, result: Result<(), CommandError>) {
        let locale = self.ui().locale;
        let status = match result {
            Ok(()) => String::new(),
            Err(err) if err.is_not_permitted() => {
                debug!(command = %err.command(), "key ignored");
                format!(
                    "{}: {}",
                    err.command(),
                    locale.text("not available now", "今は実行できません")
                )
            }
            Err(err) => format!("{}: {err}", locale.text("error", "エラー")),
        };
        self.push_status(status);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use serde_json::{json, Value};
    use sp21_core::{Command, RoundPayload, Screen, TransportError, MINUS_THREE_ID};
    use std::collections::VecDeque;

    #[derive(Default)]
    pub(crate) struct StubEngine {
        pub replies: VecDeque<Result<RoundPayload, TransportError>>,
        pub calls: Vec<Command>,
    }

    impl StubEngine {
        pub fn reply(mut self, body: Value) -> Self {
            self.replies
                .push_back(Ok(serde_json::from_value(body).expect("payload")));
            self
        }
    }

    impl Engine for StubEngine {
        fn call(&mut self, command: &Command) -> Result<RoundPayload, TransportError> {
            self.calls.push(command.clone());
            self.replies
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Unreachable("no reply".to_string())))
        }
    }

    pub(crate) fn start_body() -> Value {
        json!({
            "player_hand": [2, 8],
            "ai_hand": [0, 5],
            "player_points": 10,
            "ai_points": 10,
            "player_sp_cards": {"sp_minus_3": 1},
            "ai_sp_cards": {"sp_minus_3": 1},
            "declared_sp_card": null,
            "ai_declared_sp_card": null,
            "game_over": false,
            "message": "Round start! Your turn."
        })
    }

    pub(crate) fn app(engine: StubEngine) -> App<StubEngine, TestBackend> {
        let terminal = Terminal::new(TestBackend::new(100, 36)).expect("terminal");
        let surface = Surface::new(terminal, UiState::new(UiLocale::EnUs, "http://engine"));
        App::new(engine, Catalog::builtin(), surface)
    }

    #[test]
    fn locale_follows_normalized_code() {
        assert_eq!(UiLocale::from_opt(Some("ja-jp")), UiLocale::JaJp);
        assert_eq!(UiLocale::from_opt(Some("fr")), UiLocale::EnUs);
        assert_eq!(UiLocale::from_opt(None).code(), "en_US");
        assert_eq!(UiLocale::JaJp.text("Draw", "ヒット"), "ヒット");
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut app = app(
            StubEngine::default()
                .reply(start_body())
                .reply(json!({"message": "Session cleared."})),
        );
        app.start_or_next();
        app.request_reset();
        assert!(app.ui().confirm_reset);
        app.cancel_reset();
        assert_eq!(app.table.engine().calls, vec![Command::StartRound]);

        app.request_reset();
        app.confirm_reset();
        assert!(!app.ui().confirm_reset);
        assert_eq!(app.table.screen(), Screen::Title);
        assert_eq!(app.table.engine().calls.last(), Some(&Command::ResetSession));
    }

    #[test]
    fn reset_prompt_opens_from_the_title_without_engine_traffic() {
        let mut app = app(StubEngine::default());
        app.request_reset();
        assert!(app.ui().confirm_reset);
        assert!(app.ui().status_line.is_empty());
        assert!(app.table.engine().calls.is_empty());
    }

    #[test]
    fn use_selected_sends_the_highlighted_card() {
        let mut declared = start_body();
        declared["declared_sp_card"] = json!(MINUS_THREE_ID);
        declared["player_sp_cards"] = json!({"sp_minus_3": 0});
        let mut app = app(StubEngine::default().reply(start_body()).reply(declared));
        app.start_or_next();
        assert_eq!(
            app.ui().selected_special().map(|row| row.id.as_str()),
            Some(MINUS_THREE_ID)
        );
        app.use_selected();
        assert_eq!(
            app.table.engine().calls.last(),
            Some(&Command::UseSpecial(MINUS_THREE_ID.to_string()))
        );
        assert!(app.ui().selected_special().is_none());
        assert!(app.ui().status_line.is_empty());
    }

    #[test]
    fn refused_key_explains_itself_without_calling_the_engine() {
        let mut app = app(StubEngine::default());
        app.draw_card();
        assert!(app.table.engine().calls.is_empty());
        assert_eq!(app.ui().status_line, "draw: not available now");
    }

    #[test]
    fn failed_start_surfaces_error_in_status() {
        let mut app = app(StubEngine::default());
        app.start_or_next();
        assert!(app.ui().status_line.starts_with("error: start round failed"));
        assert_eq!(app.table.screen(), Screen::Title);
    }

    #[test]
    fn escape_closes_alert_before_anything_else() {
        let mut app = app(StubEngine::default());
        app.toggle_help();
        app.table.shell_mut().ui.alert = Some("boom".to_string());
        app.dismiss();
        assert!(app.ui().alert.is_none());
        assert!(app.ui().show_help);
        app.dismiss();
        assert!(!app.ui().show_help);
    }
}
