//! Dashboard coordinator
//!
//! One composite payload fans out to independent renderers. A renderer
//! whose sub-object is missing is skipped, and one that cannot decode its
//! part is logged without touching the others.

use serde_json::Value;

use crate::api::ApiError;
use crate::log_debug;
use crate::model::charts::{Canvas, Dataset};
use crate::model::dashboard;
use crate::model::Section;
use crate::services::api::ApiRequest;
use crate::App;

type ChartDecoder = fn(&Value) -> Option<Result<Dataset, String>>;

const DASHBOARD_CHARTS: [(Canvas, ChartDecoder); 4] = [
    (Canvas::ProcessStatus, dashboard::status_chart),
    (Canvas::Savings, dashboard::savings_chart),
    (Canvas::TopSuppliers, dashboard::suppliers_chart),
    (Canvas::MonthlyTrends, dashboard::trends_chart),
];

/// Unwrap one renderer's input, logging decode failures
fn part<T>(name: &str, decoded: Option<Result<T, String>>) -> Option<T> {
    match decoded? {
        Ok(value) => Some(value),
        Err(e) => {
            log_debug(&format!("DEBUG [Dashboard]: {} not rendered: {}", name, e));
            None
        }
    }
}

impl App {
    pub fn refresh_dashboard(&mut self) {
        let ticket = self.model.view.next_ticket(Section::Dashboard);
        self.model.dashboard.loading = true;
        let _ = self.send_request(ApiRequest::Dashboard { ticket });
    }

    pub(crate) fn apply_dashboard(&mut self, ticket: u64, result: Result<Value, ApiError>) {
        if !self.model.view.is_current(Section::Dashboard, ticket) {
            log_debug(&format!("DEBUG [Dashboard]: suppressed stale payload (ticket {})", ticket));
            return;
        }
        self.model.dashboard.loading = false;

        let body = match result {
            Ok(body) => body,
            Err(e) => {
                self.notify_failure("Error loading dashboard", "loading dashboard", &e);
                return;
            }
        };

        if let Some(counters) = part("counters", dashboard::counters(&body)) {
            self.model.dashboard.counters = Some(counters);
        }

        for (canvas, decode) in DASHBOARD_CHARTS {
            if let Some(dataset) = part(canvas.title(), decode(&body)) {
                self.charts.render(canvas, dataset);
            }
        }

        if let Some(recent) = part("recent processes", dashboard::recent_processes(&body)) {
            self.model.dashboard.recent_processes = Some(recent);
        }

        if let Some(priorities) = part("alert priorities", dashboard::alert_priorities(&body)) {
            self.model.dashboard.alert_priorities = Some(priorities);
        }

        self.refresh_badge();
    }
}
