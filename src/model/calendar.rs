//! Calendar section state
//!
//! The month widget pulls its events lazily. For every visible-range change
//! it hands an `EventSource` the range and a single-use `EventCallback`;
//! the callback is consumed by `success` or `failure`, so exactly one of them
//! can ever run. A callback dropped unused reaches the widget as a failure.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;
use tokio::sync::oneshot;

use super::types::Pane;
use crate::api::{CalendarEvent, CalendarStats, Milestone, ProcessOption};

pub const MILESTONE_TYPES: &[&str] = &["start", "end", "award", "delivery", "evaluation", "other"];
pub const MILESTONE_STATUSES: &[&str] = &["upcoming", "overdue", "completed"];

pub const UPCOMING_EMPTY: &str = "No upcoming deadlines";
pub const OVERDUE_EMPTY: &str = "No overdue milestones";

pub fn milestone_type_label(milestone_type: &str) -> &'static str {
    match milestone_type {
        "start" => "Start",
        "end" => "End",
        "award" => "Award",
        "delivery" => "Delivery",
        "evaluation" => "Evaluation",
        "other" => "Other",
        _ => "Milestone",
    }
}

/// Filters merged into every event fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarFilters {
    pub process_id: Option<u64>,
    pub milestone_type: Option<String>,
    pub status: Option<String>,
}

impl CalendarFilters {
    /// All three keys, unset ones as empty strings
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(
            "process_id".to_string(),
            self.process_id.map(|id| id.to_string()).unwrap_or_default(),
        );
        map.insert(
            "milestone_type".to_string(),
            self.milestone_type.clone().unwrap_or_default(),
        );
        map.insert("status".to_string(), self.status.clone().unwrap_or_default());
        map
    }
}

/// Date range shown by the month grid, end exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl VisibleRange {
    /// Six Monday-first weeks covering the month of `month_start`
    pub fn month_grid(month_start: NaiveDate) -> Self {
        let offset = month_start.weekday().num_days_from_monday() as i64;
        let start = month_start - Duration::days(offset);
        Self {
            start,
            end: start + Duration::days(42),
        }
    }

    pub fn start_str(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format("%Y-%m-%d").to_string()
    }
}

pub type FetchOutcome = Result<Vec<CalendarEvent>, String>;

/// Completion handle for one event fetch
#[derive(Debug)]
pub struct EventCallback {
    tx: oneshot::Sender<FetchOutcome>,
}

impl EventCallback {
    pub fn new() -> (Self, oneshot::Receiver<FetchOutcome>) {
        let (tx, rx) = oneshot::channel();
        (Self { tx }, rx)
    }

    pub fn success(self, events: Vec<CalendarEvent>) {
        let _ = self.tx.send(Ok(events));
    }

    pub fn failure(self, reason: impl Into<String>) {
        let _ = self.tx.send(Err(reason.into()));
    }
}

/// Supplier of events for a visible range
pub trait EventSource {
    fn fetch(&mut self, range: VisibleRange, callback: EventCallback);
}

#[derive(Debug, Clone, PartialEq)]
pub enum WidgetStatus {
    Idle,
    Fetching,
    Ready,
    Failed(String),
}

/// Month view with lazily fetched events
#[derive(Debug)]
pub struct CalendarWidget {
    month: NaiveDate,
    events: Vec<CalendarEvent>,
    status: WidgetStatus,
    pending: Option<oneshot::Receiver<FetchOutcome>>,
    pub selected: Option<usize>,
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl CalendarWidget {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            month: first_of_month(today),
            events: Vec::new(),
            status: WidgetStatus::Idle,
            pending: None,
            selected: None,
        }
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn visible_range(&self) -> VisibleRange {
        VisibleRange::month_grid(self.month)
    }

    pub fn status(&self) -> &WidgetStatus {
        &self.status
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    /// Ask `source` for the events of the visible range
    pub fn refetch(&mut self, source: &mut dyn EventSource) {
        let (callback, rx) = EventCallback::new();
        self.pending = Some(rx);
        self.status = WidgetStatus::Fetching;
        source.fetch(self.visible_range(), callback);
    }

    pub fn go_to(&mut self, date: NaiveDate, source: &mut dyn EventSource) {
        self.month = first_of_month(date);
        self.selected = None;
        self.refetch(source);
    }

    pub fn next_month(&mut self, source: &mut dyn EventSource) {
        let next = self
            .month
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(self.month);
        self.go_to(next, source);
    }

    pub fn previous_month(&mut self, source: &mut dyn EventSource) {
        let previous = self
            .month
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(self.month);
        self.go_to(previous, source);
    }

    /// Pick up a finished fetch; returns true when the widget changed
    pub fn poll(&mut self) -> bool {
        let Some(rx) = self.pending.as_mut() else {
            return false;
        };

        match rx.try_recv() {
            Ok(Ok(mut events)) => {
                events.sort_by(|a, b| a.start.cmp(&b.start));
                self.events = events;
                self.status = WidgetStatus::Ready;
                self.selected = if self.events.is_empty() { None } else { Some(0) };
            }
            Ok(Err(reason)) => {
                self.status = WidgetStatus::Failed(reason);
            }
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.status = WidgetStatus::Failed("event request was abandoned".to_string());
            }
        }

        self.pending = None;
        true
    }

    pub fn selected_event(&self) -> Option<&CalendarEvent> {
        self.selected.and_then(|idx| self.events.get(idx))
    }

    /// Events starting on `day`
    pub fn events_on(&self, day: NaiveDate) -> Vec<&CalendarEvent> {
        let key = day.format("%Y-%m-%d").to_string();
        self.events
            .iter()
            .filter(|e| e.start.as_deref().is_some_and(|s| s.starts_with(&key)))
            .collect()
    }
}

/// Everything around the widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalendarModel {
    pub processes: Vec<ProcessOption>,
    /// Filters being edited; applied to the event source on demand
    pub draft: CalendarFilters,
    pub upcoming: Pane<Milestone>,
    pub overdue: Pane<Milestone>,
    pub stats: Option<CalendarStats>,
    pub filter_focus: CalendarFilterField,
}

/// Filter control with keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarFilterField {
    #[default]
    Process,
    MilestoneType,
    Status,
}

impl CalendarFilterField {
    pub fn next(&self) -> Self {
        match self {
            CalendarFilterField::Process => CalendarFilterField::MilestoneType,
            CalendarFilterField::MilestoneType => CalendarFilterField::Status,
            CalendarFilterField::Status => CalendarFilterField::Process,
        }
    }
}

impl CalendarModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_label(&self, process_id: u64) -> String {
        self.processes
            .iter()
            .find(|p| p.id == process_id)
            .map(ProcessOption::label)
            .unwrap_or_else(|| format!("Process {}", process_id))
    }

    /// Step the focused draft filter; "all" sits before the first option
    pub fn cycle_filter(&mut self) {
        use crate::logic::ui::cycle_option;

        match self.filter_focus {
            CalendarFilterField::Process => {
                let next = match self.draft.process_id {
                    None => 0,
                    Some(id) => match self.processes.iter().position(|p| p.id == id) {
                        Some(idx) => idx + 1,
                        None => 0,
                    },
                };
                self.draft.process_id = self.processes.get(next).map(|p| p.id);
            }
            CalendarFilterField::MilestoneType => {
                self.draft.milestone_type =
                    cycle_option(MILESTONE_TYPES, self.draft.milestone_type.as_deref())
                        .map(str::to_string);
            }
            CalendarFilterField::Status => {
                self.draft.status = cycle_option(MILESTONE_STATUSES, self.draft.status.as_deref())
                    .map(str::to_string);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::EventProps;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(id: &str, start: &str) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            title: id.to_string(),
            start: Some(start.to_string()),
            props: EventProps::default(),
        }
    }

    /// Records callbacks so tests can complete them by hand
    #[derive(Default)]
    struct ManualSource {
        requests: Vec<(VisibleRange, EventCallback)>,
    }

    impl EventSource for ManualSource {
        fn fetch(&mut self, range: VisibleRange, callback: EventCallback) {
            self.requests.push((range, callback));
        }
    }

    #[test]
    fn test_month_grid_starts_on_monday() {
        // 2025-03-01 is a Saturday
        let range = VisibleRange::month_grid(date(2025, 3, 1));
        assert_eq!(range.start, date(2025, 2, 24));
        assert_eq!(range.end, date(2025, 4, 7));
    }

    #[test]
    fn test_filters_map_keeps_empty_keys() {
        let filters = CalendarFilters {
            process_id: Some(3),
            ..Default::default()
        };
        let map = filters.to_map();
        assert_eq!(map["process_id"], "3");
        assert_eq!(map["status"], "");
    }

    #[test]
    fn test_success_reaches_widget() {
        let mut source = ManualSource::default();
        let mut widget = CalendarWidget::new(date(2025, 3, 14));
        widget.refetch(&mut source);
        assert_eq!(widget.status(), &WidgetStatus::Fetching);
        assert!(!widget.poll());

        let (_, callback) = source.requests.pop().unwrap();
        callback.success(vec![event("b", "2025-03-20"), event("a", "2025-03-02")]);

        assert!(widget.poll());
        assert_eq!(widget.status(), &WidgetStatus::Ready);
        assert_eq!(widget.events()[0].id, "a");
        assert_eq!(widget.events_on(date(2025, 3, 20)).len(), 1);
        assert!(!widget.poll());
    }

    #[test]
    fn test_failure_reaches_widget() {
        let mut source = ManualSource::default();
        let mut widget = CalendarWidget::new(date(2025, 3, 14));
        widget.refetch(&mut source);

        let (_, callback) = source.requests.pop().unwrap();
        callback.failure("Error loading events");
        assert!(widget.poll());
        assert_eq!(
            widget.status(),
            &WidgetStatus::Failed("Error loading events".to_string())
        );
    }

    #[test]
    fn test_dropped_callback_is_a_failure() {
        let mut source = ManualSource::default();
        let mut widget = CalendarWidget::new(date(2025, 3, 14));
        widget.refetch(&mut source);
        source.requests.clear();

        assert!(widget.poll());
        assert!(matches!(widget.status(), WidgetStatus::Failed(_)));
    }

    #[test]
    fn test_navigation_changes_range_and_refetches() {
        let mut source = ManualSource::default();
        let mut widget = CalendarWidget::new(date(2025, 1, 31));
        widget.next_month(&mut source);
        assert_eq!(widget.month(), date(2025, 2, 1));
        widget.previous_month(&mut source);
        widget.previous_month(&mut source);
        assert_eq!(widget.month(), date(2024, 12, 1));

        assert_eq!(source.requests.len(), 3);
        assert_eq!(source.requests[2].0, VisibleRange::month_grid(date(2024, 12, 1)));
    }

    #[test]
    fn test_superseded_fetch_is_ignored() {
        let mut source = ManualSource::default();
        let mut widget = CalendarWidget::new(date(2025, 3, 1));
        widget.refetch(&mut source);
        widget.refetch(&mut source);

        let (_, second) = source.requests.pop().unwrap();
        let (_, first) = source.requests.pop().unwrap();
        first.success(vec![event("old", "2025-03-01")]);
        assert!(!widget.poll());

        second.success(vec![]);
        assert!(widget.poll());
        assert!(widget.events().is_empty());
    }

    #[test]
    fn test_cycle_filter_walks_processes_then_all() {
        let mut model = CalendarModel::new();
        model.processes = vec![
            ProcessOption { id: 4, process_number: "P-4".into(), title: "A".into() },
            ProcessOption { id: 9, process_number: "P-9".into(), title: "B".into() },
        ];
        model.cycle_filter();
        assert_eq!(model.draft.process_id, Some(4));
        model.cycle_filter();
        assert_eq!(model.draft.process_id, Some(9));
        model.cycle_filter();
        assert_eq!(model.draft.process_id, None);

        model.filter_focus = model.filter_focus.next().next();
        model.cycle_filter();
        assert_eq!(model.draft.status.as_deref(), Some("upcoming"));
    }
}
