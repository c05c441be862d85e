use ratatui::{style::Style, text::Span};

use crate::ui::theme::Theme;

/// A keyboard hint consisting of a key and its action.
#[derive(Debug, Clone)]
pub struct KeyHint {
    pub key: &'static str,
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

pub fn hints_to_spans(hints: &[KeyHint], theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    for (i, hint) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(hint.key, Style::default().fg(theme.accent)));
        spans.push(Span::styled(
            format!(" {}", hint.action),
            Style::default().fg(theme.dim),
        ));
    }

    spans
}

pub fn hint_separator(theme: &Theme) -> Span<'static> {
    Span::styled("  │  ", Style::default().fg(theme.border))
}

pub mod common {
    use super::KeyHint;

    pub fn login() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "campo"),
            KeyHint::new("Enter", "entrar"),
            KeyHint::new("Esc", "sair"),
        ]
    }

    pub fn form() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Tab", "campo"),
            KeyHint::new("←→", "opção"),
            KeyHint::new("Enter", "buscar"),
            KeyHint::new("Ctrl+N", "cadastrar"),
        ]
    }

    pub fn table() -> Vec<KeyHint> {
        vec![
            KeyHint::new("↑↓", "linha"),
            KeyHint::new("f", "efetivar"),
            KeyHint::new("c", "cancelar"),
            KeyHint::new("e", "editar"),
            KeyHint::new("d", "deletar"),
            KeyHint::new("Esc", "filtros"),
        ]
    }

    pub fn dialog() -> Vec<KeyHint> {
        vec![
            KeyHint::new("Enter/s", "confirmar"),
            KeyHint::new("Esc/n", "cancelar"),
        ]
    }

    pub fn route() -> Vec<KeyHint> {
        vec![KeyHint::new("Esc", "voltar")]
    }

    pub fn global() -> Vec<KeyHint> {
        vec![KeyHint::new("Ctrl+L", "sair da conta"), KeyHint::new("Ctrl+C", "fechar")]
    }
}
