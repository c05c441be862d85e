use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

const LABEL_WIDTH: u16 = 22;

/// One labelled form row: `label` on the left, the control on the right.
pub struct FormGroup<'a> {
    label: &'a str,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> FormGroup<'a> {
    pub fn new(label: &'a str, focused: bool, theme: &'a Theme) -> Self {
        Self {
            label,
            focused,
            theme,
        }
    }

    fn split(&self, frame: &mut Frame<'_>, area: Rect) -> Rect {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(LABEL_WIDTH), Constraint::Min(0)])
            .split(area);
        frame.render_widget(
            Paragraph::new(Span::styled(
                self.label,
                Style::default().fg(self.theme.text_muted),
            )),
            columns[0],
        );
        columns[1]
    }

    fn value_style(&self) -> Style {
        if self.focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.text)
        }
    }

    /// Free-text input; shows `placeholder` while empty.
    pub fn render_input(&self, frame: &mut Frame<'_>, area: Rect, value: &str, placeholder: &str) {
        let control = self.split(frame, area);
        let cursor = if self.focused { "│" } else { "" };
        let line = if value.is_empty() && !self.focused {
            Line::from(Span::styled(
                placeholder.to_string(),
                Style::default().fg(self.theme.dim),
            ))
        } else {
            Line::from(Span::styled(format!("{value}{cursor}"), self.value_style()))
        };
        frame.render_widget(Paragraph::new(line), control);
    }

    /// Selector showing the current option between arrows.
    pub fn render_select(&self, frame: &mut Frame<'_>, area: Rect, label: &str) {
        let control = self.split(frame, area);
        let arrow_style = if self.focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(self.theme.dim)
        };
        let line = Line::from(vec![
            Span::styled("‹ ", arrow_style),
            Span::styled(label.to_string(), self.value_style()),
            Span::styled(" ›", arrow_style),
        ]);
        frame.render_widget(Paragraph::new(line), control);
    }
}
