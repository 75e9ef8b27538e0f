use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::charts::render_chart;
use crate::logic::formatting::format_currency;
use crate::model::charts::{Canvas, ChartBoard};
use crate::model::dashboard::{Counters, DashboardModel};

/// Counter tiles as (label, value)
pub fn counter_tiles(counters: &Counters) -> [(&'static str, String); 5] {
    [
        ("Processes", counters.total_processes.to_string()),
        ("Suppliers", counters.total_suppliers.to_string()),
        ("Bids", counters.total_bids.to_string()),
        ("Active alerts", counters.active_alerts.to_string()),
        ("Savings", format_currency(counters.total_savings)),
    ]
}

fn render_counters(f: &mut Frame, area: Rect, counters: Option<&Counters>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    let default = Counters::default();
    let tiles = counter_tiles(counters.unwrap_or(&default));
    for (idx, (label, value)) in tiles.iter().enumerate() {
        let shown = if counters.is_some() { value.as_str() } else { "-" };
        let tile = Paragraph::new(Line::from(Span::styled(
            shown.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )))
        .alignment(ratatui::layout::Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(*label));
        f.render_widget(tile, chunks[idx]);
    }
}

fn render_side_lists(f: &mut Frame, area: Rect, model: &DashboardModel) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let recent: Vec<Line> = match &model.recent_processes {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|p| {
                Line::from(vec![
                    Span::styled(format!("{} ", p.process_number), Style::default().fg(Color::Cyan)),
                    Span::raw(p.title.clone()),
                    Span::styled(format!("  [{}]", p.status), Style::default().fg(Color::DarkGray)),
                ])
            })
            .collect(),
        Some(_) => vec![Line::from("No recent processes")],
        None => Vec::new(),
    };
    f.render_widget(
        Paragraph::new(recent).block(Block::default().borders(Borders::ALL).title(" Recent processes ")),
        chunks[0],
    );

    let priorities: Vec<Line> = match &model.alert_priorities {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|p| Line::from(format!("{:<10} {}", p.priority, p.count)))
            .collect(),
        Some(_) => vec![Line::from("No active alerts")],
        None => Vec::new(),
    };
    f.render_widget(
        Paragraph::new(priorities)
            .block(Block::default().borders(Borders::ALL).title(" Alerts by priority ")),
        chunks[1],
    );
}

/// Render the dashboard: counters, four charts and two side lists
pub fn render_dashboard(f: &mut Frame, area: Rect, model: &DashboardModel, charts: &ChartBoard) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(8)])
        .split(area);

    render_counters(f, rows[0], model.counters.as_ref());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(rows[1]);

    let grid_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    let canvases = [
        [Canvas::ProcessStatus, Canvas::Savings],
        [Canvas::TopSuppliers, Canvas::MonthlyTrends],
    ];
    for (row_area, row) in grid_rows.iter().zip(canvases.iter()) {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row_area);
        for (cell, canvas) in cells.iter().zip(row.iter()) {
            render_chart(f, *cell, *canvas, charts.dataset(*canvas));
        }
    }

    render_side_lists(f, columns[1], model);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_tiles_keep_zero() {
        let counters = Counters {
            total_processes: 5,
            ..Counters::default()
        };
        let tiles = counter_tiles(&counters);
        assert_eq!(tiles[0].1, "5");
        assert_eq!(tiles[1].1, "0");
    }
}
