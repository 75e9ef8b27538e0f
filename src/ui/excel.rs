use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};

use crate::model::excel::{table_type_label, ExcelField, ExcelModel, PREVIEW_EMPTY, PREVIEW_IDLE};
use crate::utils::clip_to_width;

fn control(label: &'static str, value: String, focused: bool, editing: bool) -> Line<'static> {
    let style = if editing {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::raw(if focused { "► " } else { "  " }),
        Span::styled(format!("{:<14}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, style),
    ])
}

/// Render the Excel section: type selectors, upload path and data preview
pub fn render_excel(f: &mut Frame, area: Rect, model: &ExcelModel, editing_path: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let type_text = |t: Option<&'static str>| {
        t.map(|t| table_type_label(t).to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };
    let path = if model.upload_path.buffer.is_empty() && !editing_path {
        "(press Enter to type a path)".to_string()
    } else {
        model.upload_path.buffer.clone()
    };

    let controls = vec![
        control(
            "Data type",
            type_text(model.data_type),
            model.focus == ExcelField::DataType,
            false,
        ),
        control(
            "Upload as",
            type_text(model.upload_type),
            model.focus == ExcelField::UploadType,
            false,
        ),
        control(
            "Workbook",
            path,
            model.focus == ExcelField::UploadPath,
            editing_path,
        ),
    ];
    f.render_widget(
        Paragraph::new(controls).block(Block::default().borders(Borders::ALL).title(" Excel ")),
        rows[0],
    );

    let title = if model.preview_loading {
        " Preview (loading...) ".to_string()
    } else {
        " Preview ".to_string()
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let message = |text: String, color: Color| {
        Paragraph::new(Span::styled(text, Style::default().fg(color))).block(block.clone())
    };

    match &model.preview {
        None => f.render_widget(message(PREVIEW_IDLE.to_string(), Color::DarkGray), rows[1]),
        Some(Err(error)) => f.render_widget(message(error.clone(), Color::Red), rows[1]),
        Some(Ok(preview)) if preview.is_empty() => {
            f.render_widget(message(PREVIEW_EMPTY.to_string(), Color::DarkGray), rows[1])
        }
        Some(Ok(preview)) => {
            let block = match preview.truncation_note() {
                Some(note) => block.title_bottom(Line::from(note)),
                None => block,
            };
            let column_width = (rows[1].width.saturating_sub(2) as usize
                / preview.columns.len().max(1))
            .saturating_sub(1);
            let header = Row::new(
                preview
                    .columns
                    .iter()
                    .map(|c| clip_to_width(c, column_width)),
            )
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let body = preview.rows.iter().map(|row| {
                Row::new(row.iter().map(|cell| clip_to_width(cell, column_width)))
            });
            let table = Table::new(body, vec![Constraint::Fill(1); preview.columns.len()])
                .header(header)
                .block(block);
            f.render_widget(table, rows[1]);
        }
    }
}
