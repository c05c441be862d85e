pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};

use crate::app::{AppState, Focus, Screen};

use components::hints::{self, KeyHint};
use theme::Theme;

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};

pub fn render(frame: &mut Frame<'_>, state: &AppState) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Query | Screen::Route(_) => render_shell(frame, area, state),
    }
    components::toast::render(frame, area, state.toasts.current());
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.surface)),
        area,
    );

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);

    match state.screen {
        Screen::Route(route) => screens::placeholder::render(frame, layout[1], route),
        _ => {
            screens::entries::render(frame, layout[1], state);
            components::dialog::render_confirm(frame, layout[1], &state.query.dialog);
        }
    }

    render_bottom_bar(frame, layout[2], state, &theme);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = state.user_name.as_deref().unwrap_or("-");
    let searched = state
        .query
        .last_search
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());

    let line = Line::from(vec![
        Span::styled("Usuário", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Servidor", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.base_url)),
        Span::styled("Última busca", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {searched}")),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = hints::hints_to_spans(&context_hints(state), theme);
    parts.push(hints::hint_separator(theme));
    parts.extend(hints::hints_to_spans(&hints::common::global(), theme));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}

fn context_hints(state: &AppState) -> Vec<KeyHint> {
    match state.screen {
        Screen::Login => hints::common::login(),
        Screen::Route(_) => hints::common::route(),
        Screen::Query if state.query.dialog.is_open() => hints::common::dialog(),
        Screen::Query => match state.query.focus {
            Focus::Form(_) => hints::common::form(),
            Focus::Table => hints::common::table(),
        },
    }
}
