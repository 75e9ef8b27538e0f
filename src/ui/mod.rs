// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (tabs, notices, body, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - nav_bar: Section tabs with the active-alert badge
// - toast: Notices of the active section
// - table: Paginated list sections (filters, rows, empty state)
// - charts: Draws chart instances (segments, bars, lines)
// - dashboard, evaluation, calendar, reports, excel: composite sections
// - legend: Renders hotkey legend
// - status_bar: Connection indicator and pager
// - dialogs: Delete confirmation, record form, detail popup, busy overlay

pub mod calendar;
pub mod charts;
pub mod dashboard;
pub mod dialogs;
pub mod evaluation;
pub mod excel;
pub mod layout;
pub mod legend;
pub mod nav_bar;
pub mod render;
pub mod reports;
pub mod status_bar;
pub mod table;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
