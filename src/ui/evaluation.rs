use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table},
    Frame,
};

use crate::api::ProcessOption;
use crate::logic::formatting::{format_number, format_optional_currency, format_optional_number, or_dash};
use crate::model::evaluation::{
    criteria_type_label, recommendation_label, weight_is_complete, EvaluationModel, EvaluationPane,
    BIDS_EMPTY, BIDS_IDLE, CRITERIA_EMPTY, CRITERIA_IDLE, RANKING_EMPTY, RANKING_IDLE,
};
use crate::model::Pane;

/// Total-weight line under the criteria table; red unless it is exactly 100
pub fn weight_line(total: f64) -> Line<'static> {
    let color = if weight_is_complete(total) {
        Color::Green
    } else {
        Color::Red
    };
    Line::from(vec![
        Span::raw("Total weight: "),
        Span::styled(
            format!("{}%", format_number(total)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ])
}

/// Placeholder text for a pane that has no rows to show
fn pane_message<T>(pane: &Pane<T>, idle: &'static str, empty: &'static str) -> Option<(String, Color)> {
    match pane {
        Pane::Idle => Some((idle.to_string(), Color::DarkGray)),
        Pane::Loading => Some(("Loading...".to_string(), Color::DarkGray)),
        Pane::Failed(message) => Some((message.clone(), Color::Red)),
        Pane::Ready(items) if items.is_empty() => Some((empty.to_string(), Color::DarkGray)),
        Pane::Ready(_) => None,
    }
}

fn pane_block(title: &'static str, focused: bool) -> Block<'static> {
    let color = if focused { Color::Yellow } else { Color::Cyan };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(color))
}

fn render_placeholder(f: &mut Frame, area: Rect, block: Block, text: String, color: Color) {
    f.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(color))).block(block),
        area,
    );
}

fn header(cells: &[&'static str]) -> Row<'static> {
    Row::new(cells.to_vec())
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
}

fn render_picker(f: &mut Frame, area: Rect, model: &EvaluationModel) {
    let current = model.current_process();
    let items: Vec<ListItem> = model
        .processes
        .iter()
        .map(|p: &ProcessOption| {
            let style = if Some(p.id) == current {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Span::styled(p.label(), style))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Processes "))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("► ");

    let mut state = ListState::default();
    state.select(model.picker);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_criteria(f: &mut Frame, area: Rect, model: &EvaluationModel) {
    let block = pane_block(" Criteria ", model.focus == EvaluationPane::Criteria);
    if let Some((text, color)) = pane_message(&model.criteria, CRITERIA_IDLE, CRITERIA_EMPTY) {
        render_placeholder(f, area, block, text, color);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let rows = model.criteria.items().iter().map(|c| {
        Row::new(vec![
            Cell::from(c.name.clone()),
            Cell::from(criteria_type_label(&c.criteria_type).to_string()),
            Cell::from(format!("{}%", format_number(c.weight))),
            Cell::from(format_optional_number(c.max_score)),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(9),
        ],
    )
    .header(header(&["Name", "Type", "Weight", "Max"]));
    f.render_widget(table, chunks[0]);

    if let Some(total) = model.total_weight() {
        f.render_widget(Paragraph::new(weight_line(total)), chunks[1]);
    }
}

fn render_bids(f: &mut Frame, area: Rect, model: &EvaluationModel) {
    let block = pane_block(" Bids ", model.focus == EvaluationPane::Bids);
    if let Some((text, color)) = pane_message(&model.bids, BIDS_IDLE, BIDS_EMPTY) {
        render_placeholder(f, area, block, text, color);
        return;
    }

    let rows = model.bids.items().iter().map(|b| {
        Row::new(vec![
            Cell::from(or_dash(b.supplier_name.as_deref())),
            Cell::from(format_optional_currency(b.bid_amount)),
            Cell::from(format_optional_number(b.technical_score)),
            Cell::from(format_optional_number(b.commercial_score)),
            Cell::from(format_optional_number(b.total_score)),
            Cell::from(b.status.clone()),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(9),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Length(10),
        ],
    )
    .header(header(&["Supplier", "Amount", "Technical", "Commercial", "Total", "Status"]))
    .block(block);
    f.render_widget(table, area);
}

fn render_ranking(f: &mut Frame, area: Rect, model: &EvaluationModel) {
    let block = pane_block(" Ranking ", model.focus == EvaluationPane::Ranking);
    if let Some((text, color)) = pane_message(&model.ranking, RANKING_IDLE, RANKING_EMPTY) {
        render_placeholder(f, area, block, text, color);
        return;
    }

    let rows = model.ranking.items().iter().map(|r| {
        let recommendation = r.recommendation.as_deref().unwrap_or("");
        let color = match recommendation {
            "award" => Color::Green,
            "reject" => Color::Red,
            _ => Color::Yellow,
        };
        Row::new(vec![
            Cell::from(format!("#{}", r.ranking_position)),
            Cell::from(or_dash(r.supplier_name.as_deref())),
            Cell::from(format_optional_currency(r.bid_amount)),
            Cell::from(format_optional_number(r.weighted_total_score)),
            Cell::from(Span::styled(
                recommendation_label(recommendation).to_string(),
                Style::default().fg(color),
            )),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(header(&["#", "Supplier", "Amount", "Score", "Recommend"]))
    .block(block);
    f.render_widget(table, area);
}

/// Render the evaluation section: process picker plus three panes
pub fn render_evaluation(f: &mut Frame, area: Rect, model: &EvaluationModel) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(28), Constraint::Percentage(72)])
        .split(area);

    render_picker(f, columns[0], model);

    let panes = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(columns[1]);

    render_criteria(f, panes[0], model);
    render_bids(f, panes[1], model);
    render_ranking(f, panes[2], model);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color_of(line: &Line) -> Option<Color> {
        line.spans[1].style.fg
    }

    #[test]
    fn test_weight_line_flags_incomplete_total() {
        assert_eq!(color_of(&weight_line(90.0)), Some(Color::Red));
        assert_eq!(color_of(&weight_line(110.0)), Some(Color::Red));
        assert_eq!(color_of(&weight_line(100.0)), Some(Color::Green));
    }

    #[test]
    fn test_pane_message_per_state() {
        let idle: Pane<u32> = Pane::Idle;
        assert_eq!(pane_message(&idle, "idle", "empty").unwrap().0, "idle");
        let empty: Pane<u32> = Pane::Ready(Vec::new());
        assert_eq!(pane_message(&empty, "idle", "empty").unwrap().0, "empty");
        let ready = Pane::Ready(vec![1]);
        assert!(pane_message(&ready, "idle", "empty").is_none());
    }
}
