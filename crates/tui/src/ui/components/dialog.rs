use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    app::ConfirmDialog,
    ui::{components::hints, theme::Theme},
};

/// Rect of `width` x `height` centered in `area`, clipped to it.
pub fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height.min(area.height)),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width.min(area.width)),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}

/// Modal delete confirmation. Renders nothing while the dialog is closed.
pub fn render_confirm(frame: &mut Frame<'_>, area: Rect, dialog: &ConfirmDialog) {
    let ConfirmDialog::Open(entry) = dialog else {
        return;
    };
    let theme = Theme::default();
    let rect = centered_box(56, 8, area);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .title(Span::styled(
            " Confirmação ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border_focused))
        .style(Style::default().bg(theme.surface_bright));

    let lines = vec![
        Line::from("Confirma a exclusão deste Lançamento?"),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} ({})", entry.description, entry.amount),
            Style::default().fg(theme.text_muted),
        )),
        Line::from(""),
        Line::from(hints::hints_to_spans(&hints::common::dialog(), &theme)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rect,
    );
}
