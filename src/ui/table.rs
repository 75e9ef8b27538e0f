use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::model::entities::{EntityKind, SectionTable};
use crate::utils::clip_to_width;

/// One-line summary of the section's filter values
pub fn filter_summary(kind: EntityKind, value_of: impl Fn(&str) -> String) -> Line<'static> {
    let mut spans = Vec::new();
    for spec in kind.filters() {
        let value = value_of(spec.key);
        let shown = if value.is_empty() {
            "all".to_string()
        } else {
            value
        };
        spans.push(Span::styled(
            format!("{}: ", spec.label),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(shown, Style::default().fg(Color::White)));
        spans.push(Span::raw("   "));
    }
    Line::from(spans)
}

/// Render a paginated list section
pub fn render_list_section(
    f: &mut Frame,
    area: Rect,
    kind: EntityKind,
    table: &SectionTable,
    filters: Line<'static>,
    searching: bool,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(3)])
        .split(area);

    let mut filter_line = filters;
    if searching {
        filter_line
            .spans
            .push(Span::styled("▏typing", Style::default().fg(Color::Yellow)));
    }
    f.render_widget(Paragraph::new(filter_line), chunks[0]);

    let title = if table.loading {
        format!(" {}s (loading...) ", kind.title())
    } else {
        format!(" {}s ", kind.title())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(Color::Cyan));

    if !table.loaded {
        let text = if table.loading { "Loading..." } else { "" };
        f.render_widget(Paragraph::new(text).block(block), chunks[1]);
        return;
    }

    if table.is_empty_state() {
        let empty = Paragraph::new(Line::from(Span::styled(
            kind.empty_message(),
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let columns = kind.columns();
    let column_width = (chunks[1].width.saturating_sub(2) as usize / columns.len().max(1))
        .saturating_sub(1);

    let header = Row::new(
        columns
            .iter()
            .map(|c| Cell::from(clip_to_width(c, column_width))),
    )
    .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows = table.rows.iter().map(|row| {
        Row::new(
            row.cells
                .iter()
                .map(|cell| Cell::from(clip_to_width(cell, column_width))),
        )
    });

    let widths = vec![Constraint::Fill(1); columns.len()];
    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("► ");

    let mut state = TableState::default().with_selected(table.selected);
    f.render_stateful_widget(widget, chunks[1], &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_filter_summary_shows_all_for_empty_values() {
        let line = filter_summary(EntityKind::Alert, |key| {
            if key == "status" {
                "active".to_string()
            } else {
                String::new()
            }
        });
        let text = text(&line);
        assert!(text.contains("Status: active"));
        assert!(text.contains("Priority: all"));
    }
}
