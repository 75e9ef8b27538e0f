//! Section router and timers
//!
//! Every section has exactly one loader, picked by an explicit match. A
//! section is loaded once per activation.

use std::time::Instant;

use crate::log_debug;
use crate::model::busy::BusyTick;
use crate::model::Section;
use crate::services::api::ApiRequest;
use crate::App;

impl App {
    /// Start the badge poller and show the first section
    ///
    /// Unknown `initial` names are logged and the dashboard stays active.
    pub fn start(&mut self, initial: Option<&str>, now: Instant) {
        self.model.badge.start(now);
        self.refresh_badge();

        let section = match initial {
            Some(name) => Section::from_name(name).unwrap_or_else(|| {
                log_debug(&format!("DEBUG [Router]: unknown section '{}'", name));
                Section::Dashboard
            }),
            None => Section::Dashboard,
        };
        self.activate(section);
    }

    /// Make `section` the only visible section and run its loader once
    pub fn activate(&mut self, section: Section) {
        self.model.ui.close_all_modals();
        self.model.view.activate(section);
        log_debug(&format!("DEBUG [Router]: activate {}", section.name()));
        self.load_section_view(section);
    }

    /// Activate by name; unknown names do nothing
    pub fn activate_by_name(&mut self, name: &str) -> bool {
        match Section::from_name(name) {
            Some(section) => {
                self.activate(section);
                true
            }
            None => {
                log_debug(&format!("DEBUG [Router]: ignoring unknown section '{}'", name));
                false
            }
        }
    }

    pub fn next_section(&mut self) {
        let next = self.model.active_section().next();
        self.activate(next);
    }

    pub fn previous_section(&mut self) {
        let previous = self.model.active_section().previous();
        self.activate(previous);
    }

    /// Reload the active section without changing page or filters
    pub fn reload_active(&mut self) {
        let section = self.model.active_section();
        self.load_section_view(section);
    }

    fn load_section_view(&mut self, section: Section) {
        match section {
            Section::Dashboard => self.refresh_dashboard(),
            Section::Processes
            | Section::Suppliers
            | Section::Bids
            | Section::Documents
            | Section::Alerts => {
                let page = self.model.view.page(section);
                self.load_list(section, page);
            }
            Section::Evaluation => self.load_evaluation(),
            Section::Calendar => self.load_calendar(),
            Section::Excel => self.load_excel(),
            Section::Reports => self.load_reports(),
        }
    }

    /// Fire every timer that is due
    pub fn tick(&mut self, now: Instant) {
        let expired = self.model.notices.expire(now);
        if expired > 0 {
            log_debug(&format!("DEBUG [Notices]: {} expired", expired));
        }

        if self.model.busy.tick(now) == BusyTick::SafetyFired {
            log_debug("DEBUG [Busy]: safety timeout fired, overlay cleared");
        }

        if self.model.badge.poll_due(now) {
            let _ = self.send_request(ApiRequest::AlertStats);
        }

        if let Some(section) = self.model.ui.take_due_search(now) {
            if self.model.view.is_active(section) {
                self.load_list(section, 1);
            }
        }

        self.calendar_widget.poll();
    }
}
