use chrono::{Datelike, Duration, NaiveDate};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table},
    Frame,
};

use crate::api::Milestone;
use crate::logic::formatting::{format_date, or_dash};
use crate::model::calendar::{
    milestone_type_label, CalendarFilterField, CalendarModel, CalendarWidget, WidgetStatus,
    OVERDUE_EMPTY, UPCOMING_EMPTY,
};
use crate::model::Pane;

/// Day-of-month cells of the visible grid, one row per week
pub fn grid_weeks(widget: &CalendarWidget) -> Vec<Vec<NaiveDate>> {
    let range = widget.visible_range();
    (0..6)
        .map(|week| {
            (0..7)
                .map(|day| range.start + Duration::days(week * 7 + day))
                .collect()
        })
        .collect()
}

fn render_month(f: &mut Frame, area: Rect, widget: &CalendarWidget, today: NaiveDate) {
    let month = widget.month();
    let status = match widget.status() {
        WidgetStatus::Fetching => " (loading...)".to_string(),
        WidgetStatus::Failed(reason) => format!(" (failed: {})", reason),
        WidgetStatus::Idle | WidgetStatus::Ready => String::new(),
    };
    let title = format!(" {}{} ", month.format("%B %Y"), status);

    let selected_day = widget
        .selected_event()
        .and_then(|e| e.start.as_deref())
        .and_then(|s| s.get(..10))
        .map(str::to_string);

    let rows = grid_weeks(widget).into_iter().map(|week| {
        Row::new(week.into_iter().map(|day| {
            let count = widget.events_on(day).len();
            let mut style = Style::default();
            if day.month() != month.month() {
                style = style.fg(Color::DarkGray);
            }
            if day == today {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if selected_day.as_deref() == Some(day.format("%Y-%m-%d").to_string().as_str()) {
                style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
            }
            let text = if count > 0 {
                format!("{:>2} •{}", day.day(), count)
            } else {
                format!("{:>2}", day.day())
            };
            Cell::from(text).style(style)
        }))
    });

    let header = Row::new(["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"])
        .style(Style::default().fg(Color::Yellow));

    let table = Table::new(rows, [Constraint::Ratio(1, 7); 7])
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

fn render_events(f: &mut Frame, area: Rect, widget: &CalendarWidget) {
    let items: Vec<ListItem> = widget
        .events()
        .iter()
        .map(|e| {
            let color = if e.props.is_overdue { Color::Red } else { Color::White };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", format_date(e.start.as_deref())),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(e.title.clone(), Style::default().fg(color)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Events "))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("► ");
    let mut state = ListState::default();
    state.select(widget.selected);
    f.render_stateful_widget(list, area, &mut state);
}

/// Filter bar; the focused control is highlighted
pub fn filter_line(model: &CalendarModel) -> Line<'static> {
    let process = model
        .draft
        .process_id
        .map(|id| model.process_label(id))
        .unwrap_or_else(|| "all".to_string());
    let milestone = model
        .draft
        .milestone_type
        .as_deref()
        .map(|t| milestone_type_label(t).to_string())
        .unwrap_or_else(|| "all".to_string());
    let status = model.draft.status.clone().unwrap_or_else(|| "all".to_string());

    let field = |label: &'static str, value: String, focused: bool| {
        let style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        vec![
            Span::styled(format!("{}: ", label), Style::default().fg(Color::DarkGray)),
            Span::styled(value, style),
            Span::raw("   "),
        ]
    };

    let focus = model.filter_focus;
    let mut spans = field("Process", process, focus == CalendarFilterField::Process);
    spans.extend(field("Type", milestone, focus == CalendarFilterField::MilestoneType));
    spans.extend(field("Status", status, focus == CalendarFilterField::Status));
    Line::from(spans)
}

fn milestone_items(pane: &Pane<Milestone>, empty: &'static str) -> Vec<ListItem<'static>> {
    match pane {
        Pane::Idle => Vec::new(),
        Pane::Loading => vec![ListItem::new("Loading...")],
        Pane::Failed(message) => vec![ListItem::new(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        Pane::Ready(items) if items.is_empty() => vec![ListItem::new(Span::styled(
            empty,
            Style::default().fg(Color::DarkGray),
        ))],
        Pane::Ready(items) => items
            .iter()
            .map(|m| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{} ", format_date(m.date.as_deref())),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(format!(
                        "{} {}",
                        or_dash(m.process_number.as_deref()),
                        milestone_type_label(&m.milestone_type)
                    )),
                ]))
            })
            .collect(),
    }
}

/// Render the calendar section
pub fn render_calendar(
    f: &mut Frame,
    area: Rect,
    model: &CalendarModel,
    widget: &CalendarWidget,
    today: NaiveDate,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(8)])
        .split(area);

    f.render_widget(Paragraph::new(filter_line(model)), rows[0]);

    let stats = match &model.stats {
        Some(s) => format!(
            "Upcoming: {}   Overdue: {}   Total milestones: {}",
            s.upcoming_count, s.overdue_count, s.total_milestones
        ),
        None => String::new(),
    };
    f.render_widget(
        Paragraph::new(Span::styled(stats, Style::default().fg(Color::Gray))),
        rows[1],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[2]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(columns[0]);
    render_month(f, left[0], widget, today);
    render_events(f, left[1], widget);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);
    f.render_widget(
        List::new(milestone_items(&model.upcoming, UPCOMING_EMPTY))
            .block(Block::default().borders(Borders::ALL).title(" Upcoming deadlines ")),
        right[0],
    );
    f.render_widget(
        List::new(milestone_items(&model.overdue, OVERDUE_EMPTY)).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Overdue ")
                .border_style(Style::default().fg(Color::Red)),
        ),
        right[1],
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_starts_on_monday_and_covers_six_weeks() {
        let widget = CalendarWidget::new(NaiveDate::from_ymd_opt(2025, 5, 14).unwrap());
        let weeks = grid_weeks(&widget);
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][0], NaiveDate::from_ymd_opt(2025, 4, 28).unwrap());
        assert_eq!(weeks[0][3], NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
    }

    #[test]
    fn test_filter_line_shows_all_for_unset_filters() {
        let model = CalendarModel::new();
        let text: String = filter_line(&model)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert!(text.contains("Process: all"));
        assert!(text.contains("Status: all"));
    }
}
