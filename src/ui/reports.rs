use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::charts::render_chart;
use crate::model::charts::{Canvas, ChartBoard};
use crate::model::reports::{analysis_lines, ReportsModel, ANALYSIS_IDLE};

/// Render the reports section: process picker, trends chart and analysis
pub fn render_reports(f: &mut Frame, area: Rect, model: &ReportsModel, charts: &ChartBoard) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(area);

    let items: Vec<ListItem> = model
        .processes
        .iter()
        .map(|p| ListItem::new(p.label()))
        .collect();
    let picker = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Processes "))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("► ");
    let mut state = ListState::default();
    state.select(model.picker);
    f.render_stateful_widget(picker, columns[0], &mut state);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    match &model.trends_error {
        Some(error) => f.render_widget(
            Paragraph::new(Span::styled(error.clone(), Style::default().fg(Color::Red))).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", Canvas::ReportTrends.title())),
            ),
            right[0],
        ),
        None => render_chart(
            f,
            right[0],
            Canvas::ReportTrends,
            charts.dataset(Canvas::ReportTrends),
        ),
    }

    let lines: Vec<Line> = match &model.analysis {
        None => vec![Line::from(Span::styled(
            ANALYSIS_IDLE,
            Style::default().fg(Color::DarkGray),
        ))],
        Some(Ok(analysis)) => analysis_lines(analysis).into_iter().map(Line::from).collect(),
        Some(Err(message)) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
    };
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Analysis ")),
        right[1],
    );
}
