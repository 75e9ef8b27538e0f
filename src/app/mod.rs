//! App Orchestration
//!
//! `App` owns the pure `Model` plus the pieces of runtime state that are not
//! plain data (chart instances, the calendar widget and its event feed, the
//! request channel). Methods are kept as `impl App` but organized by
//! functional domain:
//!
//! - navigation: section router and timers
//! - sections: paginated list loading, filters, search
//! - records: create/edit forms and delete confirmation
//! - alerts, dashboard, evaluation, calendar, reports, excel: per-section coordinators
//! - files: writing downloads to disk

pub mod alerts;
pub mod calendar;
pub mod dashboard;
pub mod evaluation;
pub mod excel;
pub mod files;
pub mod navigation;
pub mod records;
pub mod reports;
pub mod sections;

use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use tokio::sync::mpsc;

use crate::api::ApiError;
use crate::log_debug;
use crate::logic::errors::{classify_error, failure_notice};
use crate::model::calendar::CalendarWidget;
use crate::model::charts::{ChartBackend, ChartBoard, TerminalCharts};
use crate::model::{ConnectionState, Model, Severity};
use crate::services::api::ApiRequest;

pub use calendar::CalendarFeed;

pub struct App {
    pub model: Model,

    /// Live chart instances, one per canvas
    pub charts: ChartBoard,

    pub calendar_widget: CalendarWidget,
    pub calendar_feed: CalendarFeed,

    api_tx: mpsc::UnboundedSender<ApiRequest>,

    pub download_dir: PathBuf,
}

impl App {
    pub fn new(
        vim_mode: bool,
        download_dir: PathBuf,
        api_tx: mpsc::UnboundedSender<ApiRequest>,
    ) -> Self {
        Self::with_chart_backend(vim_mode, download_dir, api_tx, Box::new(TerminalCharts::new()))
    }

    pub fn with_chart_backend(
        vim_mode: bool,
        download_dir: PathBuf,
        api_tx: mpsc::UnboundedSender<ApiRequest>,
        backend: Box<dyn ChartBackend>,
    ) -> Self {
        Self {
            model: Model::new(vim_mode),
            charts: ChartBoard::new(backend),
            calendar_widget: CalendarWidget::new(today()),
            calendar_feed: CalendarFeed::new(api_tx.clone()),
            api_tx,
            download_dir,
        }
    }

    /// Hand a request to the worker
    ///
    /// Busy-holding requests raise the overlay here; the worker releases it
    /// once the request has finished. Returns false when the worker is gone.
    pub(crate) fn send_request(&mut self, request: ApiRequest) -> bool {
        let holds_busy = request.holds_busy();
        if holds_busy {
            self.model.busy.begin(Instant::now());
        }

        if let Err(e) = self.api_tx.send(request) {
            log_debug(&format!("DEBUG [App]: request dropped, worker gone: {:?}", e.0));
            if holds_busy {
                self.model.busy.end(Instant::now());
            }
            self.notify("Background worker stopped, restart tenderdesk", Severity::Danger);
            return false;
        }

        true
    }

    pub(crate) fn notify(&mut self, message: impl Into<String>, severity: Severity) {
        self.model.notify(message, severity, Instant::now());
    }

    /// Turn a failed call into its one notice
    pub(crate) fn notify_failure(&mut self, failed: &str, doing: &str, error: &ApiError) {
        let message = failure_notice(failed, doing, error);
        self.notify(message, Severity::Danger);
    }

    /// Update the connection indicator from a call outcome
    pub(crate) fn record_outcome<T>(&mut self, result: &Result<T, ApiError>) {
        self.model.connection = match result {
            Ok(_) => ConnectionState::Connected,
            Err(ApiError::Application { status, .. }) if *status != 401 => {
                ConnectionState::Connected
            }
            Err(e) => {
                log_debug(&format!("DEBUG [App]: call failed: {}", e));
                ConnectionState::Disconnected {
                    error_type: classify_error(e),
                    message: e.to_string(),
                }
            }
        };
    }
}

/// Local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
