use crate::surface::UiState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Span, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use sp21_core::{CardSlot, LogKind, Screen, TableView};

pub fn draw(frame: &mut Frame, ui: &UiState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(10),
        ])
        .split(frame.area());

    draw_header(frame, root[0], ui);
    match ui.view.as_ref() {
        Some(view) if view.screen == Screen::Table => draw_table(frame, root[1], ui, view),
        _ => draw_title(frame, root[1], ui),
    }
    draw_log(frame, root[2], ui);

    if ui.show_help {
        draw_help_popup(frame, ui);
    }
    if ui.confirm_reset {
        draw_confirm_popup(frame, ui);
    }
    if let Some(message) = ui.alert.as_deref() {
        draw_alert_popup(frame, ui, message);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, ui: &UiState) {
    let title = format!(
        "{} | {}: {} | {} {}",
        ui.locale.text("SP21 Table", "SP21 テーブル"),
        ui.locale.text("Engine", "エンジン"),
        ui.engine_url,
        ui.locale.text("Lang", "言語"),
        ui.locale.code()
    );
    let lines = vec![
        Line::from(title.bold()),
        Line::from(format!(
            "{}: {}",
            ui.locale.text("Status", "状態"),
            phase_label(ui)
        )),
    ];
    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn phase_label(ui: &UiState) -> String {
    let locale = ui.locale;
    let Some(view) = ui.view.as_ref() else {
        return String::new();
    };
    let phase = if view.busy {
        locale.text("waiting for the engine...", "エンジン応答待ち...")
    } else if view.session_over {
        locale.text("game over", "ゲーム終了")
    } else if view.round_over {
        locale.text("round over", "ラウンド終了")
    } else if view.controls.draw {
        locale.text("your turn", "あなたの番")
    } else if view.screen == Screen::Title {
        locale.text("press n to start", "n で開始")
    } else {
        locale.text("opponent's turn", "相手の番")
    };
    if ui.status_line.is_empty() {
        phase.to_string()
    } else {
        format!("{phase} | {}", ui.status_line)
    }
}

fn draw_title(frame: &mut Frame, area: Rect, ui: &UiState) {
    let lines = vec![
        Line::from(""),
        Line::from("SP21".bold()),
        Line::from(""),
        Line::from(ui.locale.text(
            "n start | ? help | q quit",
            "n 開始 | ? ヘルプ | q 終了",
        )),
    ];
    let block = Block::default().borders(Borders::ALL);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn draw_table(frame: &mut Frame, area: Rect, ui: &UiState, view: &TableView) {
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(middle[0]);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(middle[1]);

    draw_opponent(frame, left[0], ui, view);
    draw_player(frame, left[1], ui, view);
    draw_specials(frame, right[0], ui, view);
    draw_controls(frame, right[1], ui, view);
}

fn hand_line(hand: &[CardSlot]) -> Line<'static> {
    if hand.is_empty() {
        return Line::from("-");
    }
    let spans: Vec<Span<'static>> = hand
        .iter()
        .map(|slot| {
            let text = format!("[{:>2}] ", slot.label());
            if slot.is_hidden() {
                Span::styled(text, Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(text)
            }
        })
        .collect();
    Line::from(spans)
}

fn draw_opponent(frame: &mut Frame, area: Rect, ui: &UiState, view: &TableView) {
    let summary = if view.opponent_specials.is_empty() {
        "-".to_string()
    } else {
        view.opponent_specials
            .iter()
            .map(|row| format!("{} x{}", row.label, row.count))
            .collect::<Vec<_>>()
            .join(", ")
    };
    let lines = vec![
        hand_line(&view.opponent_hand),
        Line::from(format!(
            "{}: {}",
            ui.locale.text("Points", "ポイント"),
            view.opponent_points
        )),
        Line::from(format!(
            "{}: {}",
            ui.locale.text("Declared", "宣言中"),
            view.opponent_declared
        )),
        Line::from(format!(
            "{}: {}",
            ui.locale.text("Special cards", "SPカード"),
            summary
        )),
    ];
    let block = pane_block(ui.locale.text("Opponent", "相手"), false);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_player(frame: &mut Frame, area: Rect, ui: &UiState, view: &TableView) {
    let lines = vec![
        hand_line(&view.player_hand),
        Line::from(format!(
            "{}: {}",
            ui.locale.text("Points", "ポイント"),
            view.player_points
        )),
        Line::from(format!(
            "{}: {}",
            ui.locale.text("Declared", "宣言中"),
            view.player_declared
        )),
    ];
    let block = pane_block(ui.locale.text("You", "あなた"), view.controls.draw);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_specials(frame: &mut Frame, area: Rect, ui: &UiState, view: &TableView) {
    let split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(5)])
        .split(area);
    let mut items: Vec<ListItem<'_>> = view
        .special_rows()
        .map(|row| {
            let style = if row.enabled {
                Style::default()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(format!("{} x{}", row.name, row.count)).style(style)
        })
        .collect();
    for row in &view.unrecognized {
        items.push(
            ListItem::new(format!(
                "{} x{} ({})",
                row.label,
                row.count,
                ui.locale.text("unknown", "不明")
            ))
            .style(Style::default().fg(Color::Red)),
        );
    }
    if items.is_empty() {
        items.push(ListItem::new(ui.locale.text("none", "なし")));
    }
    let block = pane_block(ui.locale.text("Special cards", "SPカード"), false);
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol(">> ");
    let mut state = ListState::default();
    let selectable = view.special_count();
    if selectable > 0 {
        state.select(Some(ui.cursor.min(selectable - 1)));
    }
    frame.render_stateful_widget(list, split[0], &mut state);

    let about = ui
        .selected_special()
        .map(|row| row.narration.as_str())
        .filter(|text| !text.is_empty())
        .unwrap_or("-");
    let block = pane_block(ui.locale.text("About", "説明"), false);
    frame.render_widget(
        Paragraph::new(about).block(block).wrap(Wrap { trim: true }),
        split[1],
    );
}

fn draw_controls(frame: &mut Frame, area: Rect, ui: &UiState, view: &TableView) {
    let controls = view.controls;
    let use_enabled = ui.selected_special().map(|row| row.enabled).unwrap_or(false);
    let entries = [
        ("n", ui.locale.text("next round", "次のラウンド"), controls.next_round),
        ("d", ui.locale.text("draw", "ヒット"), controls.draw),
        ("s", ui.locale.text("stand", "スタンド"), controls.stand),
        ("u", ui.locale.text("use card", "カード使用"), use_enabled),
        ("R", ui.locale.text("reset", "リセット"), controls.reset),
    ];
    let lines: Vec<Line<'_>> = entries
        .iter()
        .map(|(key, label, enabled)| {
            let style = if *enabled {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!("[{key}] {label}"), style))
        })
        .collect();
    let block = pane_block(ui.locale.text("Actions", "操作"), false);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_log(frame: &mut Frame, area: Rect, ui: &UiState) {
    let capacity = area.height.saturating_sub(2) as usize;
    let log = ui.view.as_ref().map(|view| view.log.as_slice()).unwrap_or(&[]);
    let start = log.len().saturating_sub(capacity);
    let lines: Vec<Line<'_>> = log[start..]
        .iter()
        .map(|line| match line.kind {
            LogKind::Narration => Line::from(line.text.as_str()),
            LogKind::Notice => Line::from(Span::styled(
                line.text.as_str(),
                Style::default().fg(Color::Cyan),
            )),
            LogKind::Error => Line::from(Span::styled(
                line.text.as_str(),
                Style::default().fg(Color::Red),
            )),
        })
        .collect();
    let block = pane_block(ui.locale.text("Messages", "メッセージ"), false);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help_popup(frame: &mut Frame, ui: &UiState) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(ui.locale.text(
            "q quit | ? help | esc close",
            "q 終了 | ? ヘルプ | esc 閉じる",
        )),
        Line::from(ui.locale.text(
            "n start / next round",
            "n 開始 / 次のラウンド",
        )),
        Line::from(ui.locale.text("d or h draw | s stand", "d / h ヒット | s スタンド")),
        Line::from(ui.locale.text(
            "arrows/jk select special card | u or enter use it",
            "方向キー/jk SPカード選択 | u / enter 使用",
        )),
        Line::from(ui.locale.text(
            "R reset the whole session (asks first)",
            "R セッション全体をリセット (確認あり)",
        )),
    ];
    let block = Block::default()
        .title(ui.locale.text("Help", "ヘルプ"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_confirm_popup(frame: &mut Frame, ui: &UiState) {
    let area = centered_rect(60, 24, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(ui.locale.text(
            "Reset the whole session? Points and cards are lost.",
            "セッション全体をリセットしますか？ポイントとカードは失われます。",
        )),
        Line::from(""),
        Line::from(ui.locale.text("y confirm | n cancel", "y 実行 | n 取消")),
    ];
    let block = Block::default()
        .title(ui.locale.text("Reset", "リセット"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_alert_popup(frame: &mut Frame, ui: &UiState, message: &str) {
    let area = centered_rect(60, 24, frame.area());
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(ui.locale.text("esc to close", "esc で閉じる")),
    ];
    let block = Block::default()
        .title(ui.locale.text("Error", "エラー"))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    block
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
