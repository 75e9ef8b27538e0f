use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::model::Section;

/// Tab titles; the Alerts tab carries the active-alert badge when non-zero
pub fn tab_titles(badge: Option<&str>) -> Vec<Line<'static>> {
    Section::ALL
        .iter()
        .enumerate()
        .map(|(idx, section)| {
            let key = (idx + 1) % 10;
            let mut spans = vec![
                Span::styled(format!("{} ", key), Style::default().fg(Color::DarkGray)),
                Span::raw(section.title()),
            ];
            if *section == Section::Alerts {
                if let Some(count) = badge {
                    spans.push(Span::styled(
                        format!(" ({})", count),
                        Style::default()
                            .fg(Color::White)
                            .bg(Color::Red)
                            .add_modifier(Modifier::BOLD),
                    ));
                }
            }
            Line::from(spans)
        })
        .collect()
}

/// Render the section tabs at the top of the screen
pub fn render_nav_bar(f: &mut Frame, area: Rect, active: Section, badge: Option<&str>) {
    let tabs = Tabs::new(tab_titles(badge))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tenderdesk ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(active.index())
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│");

    f.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_badge_hidden_without_count() {
        let titles = tab_titles(None);
        assert_eq!(text(&titles[Section::Alerts.index()]), "7 Alerts");
    }

    #[test]
    fn test_badge_on_alerts_tab_only() {
        let titles = tab_titles(Some("3"));
        assert_eq!(text(&titles[Section::Alerts.index()]), "7 Alerts (3)");
        assert_eq!(text(&titles[Section::Reports.index()]), "0 Reports");
    }
}
