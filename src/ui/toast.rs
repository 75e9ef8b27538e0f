use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::notifications::Notice;
use crate::model::Severity;

fn severity_style(severity: Severity) -> (&'static str, Color) {
    match severity {
        Severity::Info => ("ℹ ", Color::Cyan),
        Severity::Success => ("✓ ", Color::Green),
        Severity::Warning => ("! ", Color::Yellow),
        Severity::Danger => ("✗ ", Color::Red),
    }
}

/// Render the active section's notices, newest first, one per line
pub fn render_notices<'a>(f: &mut Frame, area: Rect, notices: impl Iterator<Item = &'a Notice>) {
    if area.height == 0 {
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let lines: Vec<Line> = notices
        .take(area.height as usize)
        .map(|notice| {
            let (icon, color) = severity_style(notice.severity);
            Line::from(vec![
                Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::styled(
                    crate::utils::clip_to_width(&notice.message, width),
                    Style::default().fg(color),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), area);
}
