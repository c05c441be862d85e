use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, LoginField},
    ui::{
        components::{dialog::centered_box, hints},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let card_area = centered_box(44, 7, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Login ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Email
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Senha
        ])
        .margin(1)
        .split(inner);

    let login = &state.login;

    render_input(
        frame,
        rows[0],
        "Email",
        &login.email,
        false,
        login.focus == LoginField::Email,
        &theme,
    );
    render_input(
        frame,
        rows[2],
        "Senha",
        &login.password,
        true,
        login.focus == LoginField::Password,
        &theme,
    );

    let below = |offset: u16| Rect {
        x: card_area.x,
        y: card_area.y.saturating_add(card_area.height + offset),
        width: card_area.width,
        height: 1,
    }
    .intersection(area);

    if let Some(message) = &login.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            below(1),
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(hints::hints_to_spans(
            &hints::common::login(),
            &theme,
        )))
        .alignment(Alignment::Center),
        below(3),
    );
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };
    let shown = if is_password {
        mask_password(value)
    } else {
        value.to_string()
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let line = Line::from(vec![
        Span::styled(format!("{label:<7}"), Style::default().fg(theme.dim)),
        Span::styled(format!("{shown}{cursor}"), style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// One bullet per character.
fn mask_password(password: &str) -> String {
    "•".repeat(password.chars().count())
}
