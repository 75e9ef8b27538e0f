use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::ui::{InputMode, UiModel};
use crate::model::Section;

/// Which layer currently receives keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendMode {
    Normal,
    Search,
    UploadPath,
    Form,
    ConfirmDelete,
    Detail,
}

impl LegendMode {
    pub fn from_ui(ui: &UiModel) -> Self {
        if ui.confirm_delete.is_some() {
            LegendMode::ConfirmDelete
        } else if ui.form.is_some() {
            LegendMode::Form
        } else if ui.detail.is_some() {
            LegendMode::Detail
        } else {
            match ui.input_mode {
                InputMode::Normal => LegendMode::Normal,
                InputMode::Search => LegendMode::Search,
                InputMode::UploadPath => LegendMode::UploadPath,
            }
        }
    }
}

fn key(spans: &mut Vec<Span<'static>>, key: &'static str, action: &'static str) {
    spans.push(Span::styled(key, Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(format!(":{}  ", action)));
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(section: Section, vim_mode: bool, mode: LegendMode) -> Vec<Span<'static>> {
    let mut spans = vec![];

    match mode {
        LegendMode::ConfirmDelete => {
            key(&mut spans, "y", "Delete");
            key(&mut spans, "n/Esc", "Cancel");
            return spans;
        }
        LegendMode::Form => {
            key(&mut spans, "Tab/↑↓", "Field");
            key(&mut spans, "←→/Space", "Choice");
            key(&mut spans, "Enter", "Save");
            key(&mut spans, "Esc", "Cancel");
            return spans;
        }
        LegendMode::Detail => {
            key(&mut spans, "v", "View process");
            key(&mut spans, "Esc", "Close");
            return spans;
        }
        LegendMode::Search => {
            key(&mut spans, "Enter", "Search now");
            key(&mut spans, "Esc", "Exit Search");
            return spans;
        }
        LegendMode::UploadPath => {
            key(&mut spans, "Enter/Esc", "Done");
            return spans;
        }
        LegendMode::Normal => {}
    }

    key(&mut spans, "Tab/1-0", "Section");

    let entity = section.entity();
    if entity.is_some() || matches!(section, Section::Evaluation | Section::Reports | Section::Calendar)
    {
        if vim_mode {
            key(&mut spans, "jk", "Nav");
            key(&mut spans, "gg/G", "First/Last");
        } else {
            key(&mut spans, "↑/↓", "Nav");
        }
    }

    match section {
        Section::Dashboard => {}
        Section::Evaluation => {
            key(&mut spans, "Enter", "Select process");
            key(&mut spans, "Bksp", "Clear");
            key(&mut spans, "p", "Pane");
            key(&mut spans, "R", "Generate ranking");
        }
        Section::Calendar => {
            key(&mut spans, if vim_mode { "hl" } else { "←/→" }, "Month");
            key(&mut spans, "t", "Today");
            key(&mut spans, "Enter", "Details");
            key(&mut spans, "F", "Filter field");
            key(&mut spans, "f", "Filter value");
            key(&mut spans, "a", "Apply filters");
        }
        Section::Excel => {
            key(&mut spans, "↑/↓", "Field");
            key(&mut spans, "Enter", "Change");
            key(&mut spans, "t", "Template");
            key(&mut spans, "u", "Upload");
        }
        Section::Reports => {
            key(&mut spans, "Enter", "Analyse");
        }
        _ => {}
    }

    if let Some(kind) = entity {
        key(&mut spans, if vim_mode { "hl" } else { "←/→" }, "Page");
        if kind.has_search() {
            key(&mut spans, "/", "Search");
        }
        key(&mut spans, "f/F", "Filter");
        key(&mut spans, "c", "Clear filters");
        if kind.can_create() {
            key(&mut spans, "n", "New");
        }
        if kind.can_edit() {
            key(&mut spans, "e", "Edit");
        }
        if kind.can_delete() {
            key(&mut spans, "D", "Delete");
        }
        match section {
            Section::Processes => {
                key(&mut spans, "x", "Export");
                key(&mut spans, "P/X", "PDF/Excel report");
            }
            Section::Suppliers => key(&mut spans, "x", "Export"),
            Section::Documents => key(&mut spans, "d", "Download"),
            Section::Alerts => {
                key(&mut spans, "d", "Dismiss");
                key(&mut spans, "R", "Resolve");
                key(&mut spans, "C", "Check deadlines");
            }
            _ => {}
        }
    }

    key(&mut spans, "r", "Reload");
    spans.push(Span::styled("q", Style::default().fg(Color::Yellow)));
    spans.push(Span::raw(":Quit"));

    spans
}

/// Render the hotkey legend for the active section
pub fn render_legend(f: &mut Frame, area: Rect, section: Section, vim_mode: bool, mode: LegendMode) {
    let line = Line::from(build_hotkey_spans(section, vim_mode, mode));
    let legend = Paragraph::new(vec![line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false });
    f.render_widget(legend, area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(
    terminal_width: u16,
    section: Section,
    vim_mode: bool,
    mode: LegendMode,
) -> u16 {
    // line_count() ignores an attached block, so count without one
    let line = Line::from(build_hotkey_spans(section, vim_mode, mode));
    let paragraph = Paragraph::new(vec![line]).wrap(ratatui::widgets::Wrap { trim: false });
    let line_count = paragraph.line_count(terminal_width.saturating_sub(2));
    (line_count as u16).saturating_add(2).max(3)
}
