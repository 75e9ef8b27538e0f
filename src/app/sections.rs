//! List section loading
//!
//! One generic loader serves every paginated entity. It reads the section's
//! stored page and filters, and a response is rendered only while its
//! section is active and its ticket is the latest one issued.

use std::time::Instant;

use serde_json::Value;

use crate::api::ApiError;
use crate::log_debug;
use crate::logic::pagination::clamp_page;
use crate::logic::query::list_query;
use crate::logic::ui::{cycle_option, move_selection};
use crate::model::ui::InputMode;
use crate::model::Section;
use crate::services::api::ApiRequest;
use crate::App;

impl App {
    /// Fetch `page` of a list section
    pub fn load_list(&mut self, section: Section, page: u32) {
        if section.entity().is_none() {
            return;
        }

        let page = page.max(1);
        self.model.view.set_page(section, page);
        let ticket = self.model.view.next_ticket(section);
        let query = list_query(page, &self.model.view.filters(section));

        if let Some(table) = self.model.table_mut(section) {
            table.loading = true;
        }

        let _ = self.send_request(ApiRequest::ListSection {
            section,
            ticket,
            query,
        });
    }

    /// Reload the page a list section currently shows
    pub fn reload_list(&mut self, section: Section) {
        let page = self.model.view.page(section);
        self.load_list(section, page);
    }

    pub(crate) fn apply_list_page(
        &mut self,
        section: Section,
        ticket: u64,
        result: Result<Value, ApiError>,
    ) {
        if !self.model.view.is_current(section, ticket) {
            log_debug(&format!(
                "DEBUG [Sections]: suppressed stale {} page (ticket {})",
                section.name(),
                ticket
            ));
            return;
        }

        let Some(kind) = section.entity() else {
            return;
        };

        let failed = format!("Error loading {}", section.name());
        let doing = format!("loading {}", section.name());

        let decoded = result.and_then(|body| {
            kind.decode_page(&body)
                .map_err(|e| ApiError::Transport(format!("malformed response: {}", e)))
        });

        match decoded {
            Ok(page) => {
                self.model.view.set_page(section, page.current_page);
                if let Some(table) = self.model.table_mut(section) {
                    table.apply_page(page);
                }
            }
            Err(e) => {
                // Previous rows stay on screen, and so does their page
                let mut rendered = None;
                if let Some(table) = self.model.table_mut(section) {
                    table.loading = false;
                    rendered = table.loaded.then_some(table.current_page);
                }
                if let Some(page) = rendered {
                    self.model.view.set_page(section, page);
                }
                self.notify_failure(&failed, &doing, &e);
            }
        }
    }

    /// Jump `delta` pages from the rendered page
    pub fn change_page(&mut self, delta: i32) {
        let section = self.model.active_section();
        let Some(table) = self.model.table(section) else {
            return;
        };
        if table.pages <= 1 {
            return;
        }

        let requested = (table.current_page as i64 + delta as i64).max(1) as u32;
        let target = clamp_page(requested, table.pages);
        if target != table.current_page {
            self.load_list(section, target);
        }
    }

    pub fn move_row_selection(&mut self, delta: isize) {
        let section = self.model.active_section();
        if let Some(table) = self.model.table_mut(section) {
            table.selected = move_selection(table.selected, table.rows.len(), delta);
        }
    }

    /// Step the `index`-th option filter of the active section and reload page 1
    pub fn cycle_list_filter(&mut self, index: usize) {
        let section = self.model.active_section();
        let Some(kind) = section.entity() else {
            return;
        };
        let Some(spec) = kind.filters().iter().filter(|f| !f.is_text()).nth(index) else {
            return;
        };

        let current = self.model.view.filter(section, spec.key).to_string();
        let current = (!current.is_empty()).then_some(current.as_str());
        let next = cycle_option(spec.options, current).unwrap_or("");

        self.model.view.set_filter(section, spec.key, next);
        self.load_list(section, 1);
    }

    /// Reset every filter of the active section
    pub fn clear_list_filters(&mut self) {
        let section = self.model.active_section();
        let Some(kind) = section.entity() else {
            return;
        };
        for spec in kind.filters() {
            self.model.view.set_filter(section, spec.key, "");
        }
        self.model.ui.pending_search = None;
        self.load_list(section, 1);
    }

    pub fn start_search(&mut self) {
        let section = self.model.active_section();
        if section.entity().is_some_and(|kind| kind.has_search()) {
            self.model.ui.input_mode = InputMode::Search;
        }
    }

    /// Apply a search edit; the reload waits out the debounce
    pub fn edit_search(&mut self, edit: impl FnOnce(&mut String)) {
        let section = self.model.active_section();
        let mut text = self.model.view.filter(section, "search").to_string();
        edit(&mut text);
        self.model.view.set_filter(section, "search", &text);
        self.model.ui.schedule_search(section, Instant::now());
    }

    /// Leave search mode, reloading right away when `submit` is set
    pub fn finish_search(&mut self, submit: bool) {
        self.model.ui.input_mode = InputMode::Normal;
        if submit {
            let section = self.model.active_section();
            self.model.ui.pending_search = None;
            self.load_list(section, 1);
        }
    }
}
