//! Reports coordinator

use crate::api::{ApiError, MonthCount, ProcessAnalysis};
use crate::log_debug;
use crate::logic::errors::failure_notice;
use crate::logic::ui::move_selection;
use crate::model::charts::Canvas;
use crate::model::reports::trends_dataset;
use crate::model::{Section, Severity};
use crate::services::api::{ApiRequest, OptionsPurpose};
use crate::App;

impl App {
    pub fn load_reports(&mut self) {
        let _ = self.send_request(ApiRequest::ProcessTrends);
        let _ = self.send_request(ApiRequest::ProcessOptions {
            purpose: OptionsPurpose::Reports,
        });
    }

    pub(crate) fn apply_process_trends(&mut self, result: Result<Vec<MonthCount>, ApiError>) {
        if !self.model.view.is_active(Section::Reports) {
            log_debug("DEBUG [Reports]: suppressed trends for a hidden section");
            return;
        }
        match result {
            Ok(points) => {
                self.model.reports.trends_error = None;
                self.charts.render(Canvas::ReportTrends, trends_dataset(points));
            }
            Err(e) => {
                log_debug(&format!("DEBUG [Reports]: trends failed: {}", e));
                self.model.reports.trends_error =
                    Some(failure_notice("Error loading trends", "loading trends", &e));
            }
        }
    }

    pub fn move_reports_picker(&mut self, delta: isize) {
        let reports = &mut self.model.reports;
        reports.picker = move_selection(reports.picker, reports.processes.len(), delta);
    }

    pub fn generate_analysis(&mut self) {
        match self.model.reports.picked_process().map(|p| p.id) {
            Some(process_id) => {
                self.model.reports.analysis_for = Some(process_id);
                let _ = self.send_request(ApiRequest::ProcessAnalysis { process_id });
            }
            None => self.notify("Select a process to analyse", Severity::Warning),
        }
    }

    pub(crate) fn apply_analysis(
        &mut self,
        process_id: u64,
        result: Result<ProcessAnalysis, ApiError>,
    ) {
        if !self.model.view.is_active(Section::Reports)
            || self.model.reports.analysis_for != Some(process_id)
        {
            log_debug(&format!("DEBUG [Reports]: discarded analysis of process {}", process_id));
            return;
        }
        self.model.reports.analysis = Some(result.map_err(|e| match e {
            ApiError::Application { message, .. } => format!("Error: {}", message),
            ApiError::Transport(_) => "Connection error".to_string(),
        }));
    }
}
