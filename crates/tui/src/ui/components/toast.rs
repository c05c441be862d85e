use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{
    notify::{ToastLevel, ToastState},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, toast: Option<&ToastState>) {
    let Some(toast) = toast else {
        return;
    };
    let theme = Theme::default();
    let rect = toast_rect(area, &toast.message);

    let (style, title) = match toast.level {
        ToastLevel::Success => (Style::default().fg(theme.positive), " Sucesso "),
        ToastLevel::Warning => (Style::default().fg(theme.warning), " Alerta "),
        ToastLevel::Error => (Style::default().fg(theme.error), " Erro "),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style);
    let content = Paragraph::new(Line::from(toast.message.as_str()))
        .style(style)
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, rect);
    frame.render_widget(content.block(block), rect);
}

/// Bottom-right box sized to the wrapped message, clipped to `area`.
fn toast_rect(area: Rect, message: &str) -> Rect {
    let text_width = message.chars().count() + 4;
    let width = text_width.min(area.width as usize) as u16;
    let lines = wrapped_line_count(message, width.saturating_sub(2));
    let height = lines.saturating_add(2).min(area.height);
    let x = area.x + area.width.saturating_sub(width);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height + 1));
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Lines taken by `text` when word-wrapped at `width` columns. Words wider
/// than a line are split across lines.
fn wrapped_line_count(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let mut lines = 1usize;
    let mut used = 0usize;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        let needed = if used == 0 { len } else { used + 1 + len };
        if needed <= width {
            used = needed;
            continue;
        }
        if used > 0 {
            lines += 1;
        }
        lines += (len - 1) / width;
        used = len % width;
        if used == 0 {
            used = width;
        }
    }

    u16::try_from(lines).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_message_fits_one_line() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = toast_rect(area, "Lançamento deletado com sucesso.");
        assert_eq!(rect.height, 3);
        assert_eq!(rect.width, 36);
    }

    #[test]
    fn long_message_grows_instead_of_clipping() {
        let area = Rect::new(0, 0, 80, 24);
        let message = "servidor inacessível: error sending request for url \
            (http://127.0.0.1:8080/api/lancamentos?ano=2023&mes=3&tipo=DESPESA&usuario=9)";
        let rect = toast_rect(area, message);

        assert_eq!(rect.width, 80);
        assert!(rect.height >= 4);
        assert!(rect.bottom() <= area.bottom());
    }

    #[test]
    fn wrap_count_splits_words_and_long_tokens() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abc def", 7), 1);
        assert_eq!(wrapped_line_count("abc def", 6), 2);
        assert_eq!(wrapped_line_count("abcdefghijkl", 5), 3);
        assert_eq!(wrapped_line_count("ab abcdefghij", 5), 3);
    }

    #[test]
    fn toast_never_exceeds_area() {
        let area = Rect::new(0, 0, 20, 4);
        let rect = toast_rect(area, &"x ".repeat(200));
        assert!(rect.height <= area.height);
        assert!(rect.width <= area.width);
    }
}
