use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    navigation::Route,
    ui::{components::card::Card, theme::Theme},
};

/// Stand-in for the registration screen, which lives outside this client.
pub fn render(frame: &mut Frame<'_>, area: Rect, route: Route) {
    let theme = Theme::default();
    let card = Card::new(route.title(), &theme).focused(true);
    let inner = card.render_frame(frame, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            route.path(),
            Style::default().fg(theme.accent),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Tela de cadastro indisponível neste cliente.",
            Style::default().fg(theme.text_muted),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
