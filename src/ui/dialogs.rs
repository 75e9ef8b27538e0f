use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::layout::centered;
use crate::model::forms::{FieldKind, RecordForm};
use crate::model::ui::{ConfirmDelete, DetailPopup};

/// Render the delete confirmation dialog
pub fn render_delete_confirmation(f: &mut Frame, confirm: &ConfirmDelete) {
    let prompt_text = format!(
        "Delete this {}?\n\n{}\n\nThis action cannot be undone.\n\nContinue? (y/n)",
        confirm.kind.noun(),
        confirm.label
    );

    let prompt_area = centered(f.area(), 50, 10);
    let prompt = Paragraph::new(prompt_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Confirm Delete")
                .border_style(Style::default().fg(Color::Red)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, prompt_area);
    f.render_widget(prompt, prompt_area);
}

/// Render the create/edit form of a record
pub fn render_form(f: &mut Frame, form: &RecordForm) {
    let height = (form.fields.len() as u16 + 4).max(5);
    let area = centered(f.area(), 70, height);

    let lines: Vec<Line> = if form.loading {
        vec![Line::from("Loading record...")]
    } else {
        form.fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let focused = idx == form.focus;
                let value_style = if focused {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default().fg(Color::White)
                };
                let value = match field.spec.kind {
                    FieldKind::Choice(_) => format!("‹ {} ›", field.buffer),
                    _ if focused => format!("{}▏", field.buffer),
                    _ => field.buffer.clone(),
                };
                Line::from(vec![
                    Span::raw(if focused { "► " } else { "  " }),
                    Span::styled(
                        format!("{:<18}", field.spec.label),
                        Style::default().fg(Color::Gray),
                    ),
                    Span::styled(value, value_style),
                ])
            })
            .collect()
    };

    let form_widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", form.title()))
                .title_bottom(" Enter: save  Esc: cancel ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(form_widget, area);
}

/// Render the record detail popup (calendar events)
pub fn render_detail(f: &mut Frame, detail: &DetailPopup) {
    let height = detail.lines.len() as u16 + 4;
    let area = centered(f.area(), 64, height);

    let mut lines: Vec<Line> = detail.lines.iter().map(|l| Line::from(l.clone())).collect();
    if detail.process_id.is_some() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "v: view process   Esc: close",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let popup = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", detail.title))
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().bg(Color::Black))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}

/// Render the modal busy overlay
pub fn render_busy(f: &mut Frame) {
    let area = centered(f.area(), 30, 3);
    let overlay = Paragraph::new(Line::from(Span::styled(
        "Working...",
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    )))
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .style(Style::default().bg(Color::Black));

    f.render_widget(Clear, area);
    f.render_widget(overlay, area);
}
