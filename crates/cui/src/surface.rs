use crate::app::UiLocale;
use crate::view;
use ratatui::backend::Backend;
use ratatui::Terminal;
use sp21_core::{Shell, SpecialRow, TableView};
use tracing::warn;

/// Everything the terminal draws, apart from the terminal itself.
#[derive(Debug, Clone)]
pub struct UiState {
    pub locale: UiLocale,
    pub engine_url: String,
    pub view: Option<TableView>,
    pub cursor: usize,
    pub show_help: bool,
    pub confirm_reset: bool,
    pub alert: Option<String>,
    pub status_line: String,
}

impl UiState {
    pub fn new(locale: UiLocale, engine_url: impl Into<String>) -> Self {
        Self {
            locale,
            engine_url: engine_url.into(),
            view: None,
            cursor: 0,
            show_help: false,
            confirm_reset: false,
            alert: None,
            status_line: String::new(),
        }
    }

    pub fn special_len(&self) -> usize {
        self.view
            .as_ref()
            .map(TableView::special_count)
            .unwrap_or(0)
    }

    pub fn selected_special(&self) -> Option<&SpecialRow> {
        self.view
            .as_ref()
            .and_then(|view| view.special_rows().nth(self.cursor))
    }

    pub fn move_cursor(&mut self, down: bool) {
        let len = self.special_len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = if down {
            (self.cursor + 1) % len
        } else if self.cursor == 0 {
            len - 1
        } else {
            self.cursor - 1
        };
    }

    fn clamp_cursor(&mut self) {
        let len = self.special_len();
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }
}

/// Terminal-backed [`Shell`]. Every view the controller hands over is
/// drawn immediately, so locked controls show up while a request is in flight.
pub struct Surface<B: Backend> {
    terminal: Terminal<B>,
    pub ui: UiState,
}

impl<B: Backend> Surface<B> {
    pub fn new(terminal: Terminal<B>, ui: UiState) -> Self {
        Self { terminal, ui }
    }

    pub fn redraw(&mut self) {
        let ui = &self.ui;
        if let Err(err) = self.terminal.draw(|frame| view::draw(frame, ui)) {
            warn!(error = %err, "terminal draw failed");
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl<B: Backend> Shell for Surface<B> {
    fn present(&mut self, view: &TableView) {
        self.ui.view = Some(view.clone());
        self.ui.clamp_cursor();
        self.redraw();
    }

    fn leave_table(&mut self) {
        self.ui.cursor = 0;
        self.ui.confirm_reset = false;
    }

    fn alert(&mut self, message: &str) {
        self.ui.alert = Some(message.to_string());
        self.redraw();
    }
}
