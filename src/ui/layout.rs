use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Layout information for rendering
pub struct LayoutInfo {
    /// Section tabs at the top
    pub nav_area: Rect,
    /// Stacked notices of the active section (zero height when none)
    pub notice_area: Rect,
    /// Active section content
    pub body_area: Rect,
    /// Hotkey legend
    pub legend_area: Rect,
    /// Bottom status bar
    pub status_area: Rect,
}

/// At most this many notices are stacked above the section body
pub const MAX_NOTICES: usize = 3;

/// Calculate the screen layout for all UI components
pub fn calculate_layout(terminal_size: Rect, notice_count: usize, legend_height: u16) -> LayoutInfo {
    let notice_height = notice_count.min(MAX_NOTICES) as u16;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Tabs (top border, text, bottom border)
            Constraint::Length(notice_height), // One line per notice
            Constraint::Min(5),                // Section body
            Constraint::Length(legend_height), // Legend (dynamic height)
            Constraint::Length(1),             // Status bar
        ])
        .split(terminal_size);

    LayoutInfo {
        nav_area: chunks[0],
        notice_area: chunks[1],
        body_area: chunks[2],
        legend_area: chunks[3],
        status_area: chunks[4],
    }
}

/// Centered rectangle of at most `width` x `height` inside `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_take_one_line_each_up_to_three() {
        let size = Rect::new(0, 0, 100, 40);
        assert_eq!(calculate_layout(size, 0, 3).notice_area.height, 0);
        assert_eq!(calculate_layout(size, 2, 3).notice_area.height, 2);
        assert_eq!(calculate_layout(size, 9, 3).notice_area.height, 3);
    }

    #[test]
    fn test_centered_is_clamped_to_area() {
        let area = Rect::new(0, 0, 40, 10);
        let rect = centered(area, 60, 4);
        assert_eq!(rect.width, 40);
        assert_eq!(rect.y, 3);
    }
}
