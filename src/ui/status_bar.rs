use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::logic::errors::error_type_label;
use crate::logic::pagination::Pager;
use crate::model::ConnectionState;

/// Connection indicator spans
fn connection_spans(state: &ConnectionState) -> Vec<Span<'static>> {
    match state {
        ConnectionState::Unknown => vec![Span::styled(
            "● Connecting...",
            Style::default().fg(Color::Yellow),
        )],
        ConnectionState::Connected => {
            vec![Span::styled("● Connected", Style::default().fg(Color::Green))]
        }
        ConnectionState::Disconnected { error_type, .. } => {
            let reason = error_type_label(error_type);
            vec![Span::styled(
                format!("● Disconnected ({})", reason),
                Style::default().fg(Color::Red),
            )]
        }
    }
}

/// Pager text, e.g. `« 3 4 [5] 6 7 »  page 5/10`
pub fn pager_text(pager: &Pager) -> String {
    let pages: Vec<String> = pager
        .pages
        .iter()
        .map(|p| {
            if *p == pager.current {
                format!("[{}]", p)
            } else {
                p.to_string()
            }
        })
        .collect();

    format!(
        "{}{}{}  page {}/{}",
        if pager.has_previous { "« " } else { "" },
        pages.join(" "),
        if pager.has_next { " »" } else { "" },
        pager.current,
        pager.total
    )
}

/// Render the bottom status bar
pub fn render_status_bar(
    f: &mut Frame,
    area: Rect,
    connection: &ConnectionState,
    pager: Option<&Pager>,
    total: Option<u64>,
) {
    let mut spans = connection_spans(connection);

    if let Some(total) = total {
        spans.push(Span::raw(" │ "));
        spans.push(Span::raw(format!("{} records", total)));
    }

    if let Some(pager) = pager {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(pager_text(pager), Style::default().fg(Color::Cyan)));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::errors::ErrorType;
    use crate::logic::pagination::build_pager;

    #[test]
    fn test_disconnected_shows_error_label() {
        let spans = connection_spans(&ConnectionState::Disconnected {
            error_type: ErrorType::Timeout,
            message: "operation timed out".to_string(),
        });
        assert_eq!(spans[0].content, "● Disconnected (timed out)");
    }

    #[test]
    fn test_pager_text_marks_current_page() {
        let pager = build_pager(5, 10).unwrap();
        assert_eq!(pager_text(&pager), "« 3 4 [5] 6 7 »  page 5/10");
    }

    #[test]
    fn test_pager_text_first_page_has_no_previous() {
        let pager = build_pager(1, 2).unwrap();
        assert_eq!(pager_text(&pager), "[1] 2 »  page 1/2");
    }
}
