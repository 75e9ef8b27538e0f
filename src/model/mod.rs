//! Pure Application Model
//!
//! Cloneable state of the console, organized into focused sub-models:
//!
//! - **ViewState**: active section, per-section page and filters
//! - **SectionTable**: last rendered page of each list section
//! - **BusyState / NotificationQueue / AlertBadge**: shared surfaces
//! - one sub-model per composite section (dashboard, evaluation, ...)
//!
//! Widgets that are not plain data (chart instances, the calendar widget)
//! live in `App` beside the model.

pub mod badge;
pub mod busy;
pub mod calendar;
pub mod charts;
pub mod dashboard;
pub mod entities;
pub mod evaluation;
pub mod excel;
pub mod forms;
pub mod notifications;
pub mod reports;
pub mod sections;
pub mod types;
pub mod ui;

use std::collections::HashMap;
use std::time::Instant;

pub use badge::AlertBadge;
pub use busy::BusyState;
pub use calendar::CalendarModel;
pub use dashboard::DashboardModel;
pub use entities::{EntityKind, SectionTable};
pub use evaluation::EvaluationModel;
pub use excel::ExcelModel;
pub use notifications::{NotificationQueue, Severity};
pub use reports::ReportsModel;
pub use sections::{Section, ViewState};
pub use types::*;
pub use ui::UiModel;

/// Root application model composed of focused sub-models
#[derive(Clone, Debug)]
pub struct Model {
    pub view: ViewState,

    /// One table per list section
    pub tables: HashMap<Section, SectionTable>,

    pub busy: BusyState,
    pub notices: NotificationQueue,
    pub badge: AlertBadge,

    pub dashboard: DashboardModel,
    pub evaluation: EvaluationModel,
    pub calendar: CalendarModel,
    pub reports: ReportsModel,
    pub excel: ExcelModel,

    pub ui: UiModel,

    pub connection: ConnectionState,
}

impl Model {
    pub fn new(vim_mode: bool) -> Self {
        let tables = Section::ALL
            .iter()
            .filter(|s| s.entity().is_some())
            .map(|s| (*s, SectionTable::default()))
            .collect();

        Self {
            view: ViewState::new(),
            tables,
            busy: BusyState::new(),
            notices: NotificationQueue::new(),
            badge: AlertBadge::new(),
            dashboard: DashboardModel::default(),
            evaluation: EvaluationModel::new(),
            calendar: CalendarModel::new(),
            reports: ReportsModel::new(),
            excel: ExcelModel::new(),
            ui: UiModel::new(vim_mode),
            connection: ConnectionState::Unknown,
        }
    }

    pub fn active_section(&self) -> Section {
        self.view.active()
    }

    pub fn table(&self, section: Section) -> Option<&SectionTable> {
        self.tables.get(&section)
    }

    pub fn table_mut(&mut self, section: Section) -> Option<&mut SectionTable> {
        self.tables.get_mut(&section)
    }

    /// Show a notice at the top of the active section
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity, now: Instant) -> u64 {
        let section = self.view.active();
        self.notices.push(message, severity, section, now)
    }

    pub fn has_modal(&self) -> bool {
        self.ui.has_modal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_creation() {
        let model = Model::new(false);
        assert_eq!(model.active_section(), Section::Dashboard);
        assert_eq!(model.tables.len(), 5);
        assert!(model.table(Section::Calendar).is_none());
        assert!(!model.busy.is_visible());
        assert_eq!(model.connection, ConnectionState::Unknown);
    }

    #[test]
    fn test_model_is_cloneable() {
        let model = Model::new(false);
        let _cloned = model.clone();
    }

    #[test]
    fn test_notify_targets_active_section() {
        let mut model = Model::new(false);
        model.view.activate(Section::Suppliers);
        model.notify("Supplier saved", Severity::Success, Instant::now());
        assert_eq!(model.notices.visible(Section::Suppliers).count(), 1);
        assert_eq!(model.notices.visible(Section::Processes).count(), 0);
    }
}
