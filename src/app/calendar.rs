//! Calendar coordinator
//!
//! `CalendarFeed` is the event source handed to the calendar widget. Every
//! fetch merges the applied filters into the range query, and every callback
//! is completed exactly once: from the matching response, or right away when
//! the request cannot be sent.

use std::collections::HashMap;

use tokio::sync::mpsc;

use crate::api::{ApiError, CalendarEvent, CalendarStats, Milestone};
use crate::log_debug;
use crate::logic::formatting::format_date;
use crate::logic::query::range_query;
use crate::logic::ui::move_selection;
use crate::model::calendar::{
    milestone_type_label, CalendarFilters, CalendarWidget, EventCallback, EventSource, VisibleRange,
};
use crate::model::ui::DetailPopup;
use crate::model::{Pane, Section, Severity};
use crate::services::api::{ApiRequest, OptionsPurpose};
use crate::App;

pub struct CalendarFeed {
    /// Filters applied to every fetch
    pub filters: CalendarFilters,
    api_tx: mpsc::UnboundedSender<ApiRequest>,
    next_ticket: u64,
    pending: HashMap<u64, EventCallback>,
}

impl CalendarFeed {
    pub fn new(api_tx: mpsc::UnboundedSender<ApiRequest>) -> Self {
        Self {
            filters: CalendarFilters::default(),
            api_tx,
            next_ticket: 0,
            pending: HashMap::new(),
        }
    }

    /// Complete the callback waiting for `ticket`
    pub fn resolve(&mut self, ticket: u64, result: Result<Vec<CalendarEvent>, ApiError>) {
        let Some(callback) = self.pending.remove(&ticket) else {
            log_debug(&format!("DEBUG [Calendar]: no callback for ticket {}", ticket));
            return;
        };

        match result {
            Ok(events) => callback.success(events),
            Err(ApiError::Application { message, .. }) => callback.failure(message),
            Err(e) => callback.failure(e.to_string()),
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl EventSource for CalendarFeed {
    fn fetch(&mut self, range: VisibleRange, callback: EventCallback) {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let query = range_query(&range.start_str(), &range.end_str(), &self.filters.to_map());

        match self.api_tx.send(ApiRequest::CalendarEvents { ticket, query }) {
            Ok(()) => {
                self.pending.insert(ticket, callback);
            }
            Err(_) => callback.failure("Background worker stopped"),
        }
    }
}

fn event_detail(event: &CalendarEvent) -> DetailPopup {
    let props = &event.props;
    let state = if props.is_overdue { "Overdue" } else { "Active" };
    let mut lines = vec![
        format!("Process:   {}", props.process_number.as_deref().unwrap_or("-")),
        format!(
            "Milestone: {}",
            milestone_type_label(props.milestone_type.as_deref().unwrap_or(""))
        ),
        format!("Date:      {}", format_date(event.start.as_deref())),
        format!("State:     {}", state),
    ];
    if let Some(description) = props.description.as_deref().filter(|d| !d.is_empty()) {
        lines.push(String::new());
        lines.push(description.to_string());
    }

    DetailPopup {
        title: event.title.clone(),
        lines,
        process_id: props.process_id,
    }
}

impl App {
    /// Restart the widget at the current month and load the side panels
    pub fn load_calendar(&mut self) {
        let _ = self.send_request(ApiRequest::ProcessOptions {
            purpose: OptionsPurpose::Calendar,
        });

        self.calendar_widget = CalendarWidget::new(crate::app::today());
        self.calendar_widget.refetch(&mut self.calendar_feed);

        self.load_milestone_lists();
        let _ = self.send_request(ApiRequest::CalendarStats);
    }

    fn load_milestone_lists(&mut self) {
        self.model.calendar.upcoming = Pane::Loading;
        self.model.calendar.overdue = Pane::Loading;
        let _ = self.send_request(ApiRequest::UpcomingMilestones);
        let _ = self.send_request(ApiRequest::OverdueMilestones);
    }

    /// Apply the drafted filters and refetch the visible range
    pub fn apply_calendar_filters(&mut self) {
        self.calendar_feed.filters = self.model.calendar.draft.clone();
        self.calendar_widget.refetch(&mut self.calendar_feed);
        self.load_milestone_lists();
    }

    pub fn refresh_calendar(&mut self) {
        self.calendar_widget.refetch(&mut self.calendar_feed);
        self.load_milestone_lists();
        let _ = self.send_request(ApiRequest::CalendarStats);
        self.notify("Calendar refreshed", Severity::Success);
    }

    pub fn calendar_next_month(&mut self) {
        self.calendar_widget.next_month(&mut self.calendar_feed);
    }

    pub fn calendar_previous_month(&mut self) {
        self.calendar_widget.previous_month(&mut self.calendar_feed);
    }

    pub fn calendar_today(&mut self) {
        self.calendar_widget
            .go_to(crate::app::today(), &mut self.calendar_feed);
    }

    pub fn move_calendar_selection(&mut self, delta: isize) {
        let widget = &mut self.calendar_widget;
        widget.selected = move_selection(widget.selected, widget.events().len(), delta);
    }

    /// Side panels only render while the calendar is shown
    fn calendar_visible(&self, what: &str) -> bool {
        let visible = self.model.view.is_active(Section::Calendar);
        if !visible {
            log_debug(&format!("DEBUG [Calendar]: suppressed {} for a hidden section", what));
        }
        visible
    }

    pub(crate) fn apply_calendar_events(
        &mut self,
        ticket: u64,
        result: Result<Vec<CalendarEvent>, ApiError>,
    ) {
        if let Err(e) = &result {
            log_debug(&format!("DEBUG [Calendar]: events failed: {}", e));
        }
        self.calendar_feed.resolve(ticket, result);
        self.calendar_widget.poll();
    }

    pub(crate) fn apply_milestones(
        &mut self,
        overdue: bool,
        result: Result<Vec<Milestone>, ApiError>,
    ) {
        if !self.calendar_visible("milestones") {
            return;
        }
        let pane = match result {
            Ok(items) => Pane::Ready(items),
            Err(e) => {
                log_debug(&format!("DEBUG [Calendar]: milestones failed: {}", e));
                Pane::Failed(e.to_string())
            }
        };
        if overdue {
            self.model.calendar.overdue = pane;
        } else {
            self.model.calendar.upcoming = pane;
        }
    }

    pub(crate) fn apply_calendar_stats(&mut self, result: Result<CalendarStats, ApiError>) {
        if !self.calendar_visible("stats") {
            return;
        }
        match result {
            Ok(stats) => self.model.calendar.stats = Some(stats),
            Err(e) => log_debug(&format!("DEBUG [Calendar]: stats failed: {}", e)),
        }
    }

    /// Show the selected event; read-only
    pub fn open_event_detail(&mut self) {
        if let Some(event) = self.calendar_widget.selected_event() {
            self.model.ui.detail = Some(event_detail(event));
        }
    }

    /// Jump from the event popup to the processes list
    pub fn view_detail_process(&mut self) {
        let Some(process_id) = self.model.ui.detail.as_ref().and_then(|d| d.process_id) else {
            return;
        };
        self.activate(Section::Processes);
        self.notify(format!("Showing process ID: {}", process_id), Severity::Info);
    }
}
