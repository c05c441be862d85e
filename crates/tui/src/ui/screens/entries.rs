use api_types::entry::{Entry, EntryKind, EntryStatus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table, TableState},
};

use crate::{
    app::{AppState, Focus, FormField, QueryPanel},
    ui::{
        components::{card::Card, form::FormGroup},
        theme::Theme,
    },
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let query = &state.query;

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let form_focused = matches!(query.focus, Focus::Form(_));
    let form_card = Card::new("Consulta lançamentos", &theme).focused(form_focused);
    let inner = form_card.render_frame(frame, layout[0]);
    render_form(frame, inner, query, &theme);

    let table_card = Card::new("Lançamentos", &theme).focused(query.focus == Focus::Table);
    let inner = table_card.render_frame(frame, layout[1]);
    render_table(frame, inner, query, &theme);
}

fn render_form(frame: &mut Frame<'_>, area: Rect, query: &QueryPanel, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Ano
            Constraint::Length(1), // Mês
            Constraint::Length(1), // Descrição
            Constraint::Length(1), // Tipo
            Constraint::Length(1),
            Constraint::Length(1), // Buttons
        ])
        .split(area);

    let focused = |field: FormField| query.focus == Focus::Form(field);

    FormGroup::new("Ano: *", focused(FormField::Year), theme).render_input(
        frame,
        rows[0],
        &query.year,
        "Digite o Ano",
    );
    FormGroup::new("Mês:", focused(FormField::Month), theme).render_select(
        frame,
        rows[1],
        query.month_label(),
    );
    FormGroup::new("Descrição:", focused(FormField::Description), theme).render_input(
        frame,
        rows[2],
        &query.description,
        "Digite a descrição",
    );
    FormGroup::new("Tipo de lançamento:", focused(FormField::Kind), theme).render_select(
        frame,
        rows[3],
        query.kind_label(),
    );

    let buttons = Line::from(vec![
        Span::styled(
            " Enter Buscar ",
            Style::default()
                .fg(theme.surface)
                .bg(theme.positive)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            " Ctrl+N Cadastrar ",
            Style::default()
                .fg(theme.surface)
                .bg(theme.negative)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(buttons), rows[5]);
}

fn render_table(frame: &mut Frame<'_>, area: Rect, query: &QueryPanel, theme: &Theme) {
    if query.entries.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Nenhum lançamento para exibir.",
                Style::default().fg(theme.dim),
            )))
            .alignment(Alignment::Center),
            area,
        );
        return;
    }

    let header = Row::new(["Descrição", "Valor", "Tipo", "Mês", "Situação", "Ações"])
        .style(
            Style::default()
                .fg(theme.text_muted)
                .add_modifier(Modifier::BOLD),
        );

    let rows = query
        .entries
        .iter()
        .map(|entry| entry_row(entry, theme))
        .collect::<Vec<_>>();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(16),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    let mut table_state = TableState::default();
    if query.focus == Focus::Table {
        table_state.select(Some(query.selected));
    }
    frame.render_stateful_widget(table, area, &mut table_state);
}

fn entry_row<'a>(entry: &'a Entry, theme: &Theme) -> Row<'a> {
    let amount_style = match entry.kind {
        EntryKind::Income => Style::default().fg(theme.positive),
        EntryKind::Expense => Style::default().fg(theme.negative),
    };
    let month = api_types::month_label(entry.month)
        .map(str::to_string)
        .unwrap_or_else(|| entry.month.to_string());
    let actions = if entry.status == EntryStatus::Pending {
        "f c e d"
    } else {
        "e d"
    };

    Row::new(vec![
        Cell::from(entry.description.as_str()),
        Cell::from(Span::styled(entry.amount.to_string(), amount_style)),
        Cell::from(entry.kind.label()),
        Cell::from(month),
        Cell::from(Span::styled(entry.status.label(), status_style(entry.status, theme))),
        Cell::from(Span::styled(actions, Style::default().fg(theme.dim))),
    ])
}

fn status_style(status: EntryStatus, theme: &Theme) -> Style {
    match status {
        EntryStatus::Pending => Style::default().fg(theme.warning),
        EntryStatus::Settled => Style::default().fg(theme.positive),
        EntryStatus::Cancelled => Style::default().fg(theme.dim),
    }
}
