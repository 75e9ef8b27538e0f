//! Evaluation coordinator
//!
//! Selecting a process issues three independent fetches. Each pane settles
//! on its own response; a response for any other process is discarded.

use serde_json::Value;

use crate::api::{ApiError, ProcessOption};
use crate::log_debug;
use crate::logic::errors::failure_notice;
use crate::logic::ui::move_selection;
use crate::model::evaluation::EvaluationPane;
use crate::model::{Pane, Section, Severity};
use crate::services::api::{ApiRequest, OptionsPurpose};
use crate::App;

impl App {
    pub fn load_evaluation(&mut self) {
        let _ = self.send_request(ApiRequest::ProcessOptions {
            purpose: OptionsPurpose::Evaluation,
        });
        if let Some(process_id) = self.model.evaluation.current_process() {
            self.select_evaluation_process(process_id);
        }
    }

    /// Track `process_id` and fetch its criteria, bids and ranking
    pub fn select_evaluation_process(&mut self, process_id: u64) {
        self.model.evaluation.select(process_id);
        let _ = self.send_request(ApiRequest::EvaluationCriteria { process_id });
        let _ = self.send_request(ApiRequest::EvaluationBids { process_id });
        let _ = self.send_request(ApiRequest::EvaluationRanking { process_id });
    }

    /// Select the process under the picker cursor
    pub fn select_picked_process(&mut self) {
        if let Some(process_id) = self.model.evaluation.picked_process().map(|p| p.id) {
            self.select_evaluation_process(process_id);
        }
    }

    pub fn deselect_evaluation_process(&mut self) {
        self.model.evaluation.deselect();
    }

    pub fn move_evaluation_picker(&mut self, delta: isize) {
        let evaluation = &mut self.model.evaluation;
        evaluation.picker = move_selection(evaluation.picker, evaluation.processes.len(), delta);
    }

    pub fn cycle_evaluation_focus(&mut self) {
        self.model.evaluation.focus = self.model.evaluation.focus.next();
    }

    pub fn generate_ranking(&mut self) {
        match self.model.evaluation.current_process() {
            Some(process_id) => {
                let _ = self.send_request(ApiRequest::GenerateRanking { process_id });
            }
            None => self.notify("Select a process first", Severity::Warning),
        }
    }

    /// Whether a pane response for `process_id` may render
    fn evaluation_accepts(&self, process_id: u64, pane: EvaluationPane) -> bool {
        let accepted = self.model.view.is_active(Section::Evaluation)
            && self.model.evaluation.accepts(process_id);
        if !accepted {
            log_debug(&format!(
                "DEBUG [Evaluation]: discarded {:?} for process {}",
                pane, process_id
            ));
        }
        accepted
    }

    pub(crate) fn apply_evaluation_pane<T>(
        &mut self,
        pane: EvaluationPane,
        process_id: u64,
        result: Result<Vec<T>, ApiError>,
    ) -> Option<Pane<T>> {
        if !self.evaluation_accepts(process_id, pane) {
            return None;
        }

        Some(match result {
            Ok(items) => Pane::Ready(items),
            Err(e) => {
                log_debug(&format!("DEBUG [Evaluation]: {:?} failed: {}", pane, e));
                let doing = format!("loading {:?}", pane).to_lowercase();
                Pane::Failed(failure_notice("Error", &doing, &e))
            }
        })
    }

    pub(crate) fn apply_ranking_generated(&mut self, process_id: u64, result: Result<Value, ApiError>) {
        match result {
            Ok(_) => {
                self.notify("Ranking generated", Severity::Success);
                if self.model.evaluation.accepts(process_id) {
                    self.model.evaluation.ranking = Pane::Loading;
                    let _ = self.send_request(ApiRequest::EvaluationRanking { process_id });
                }
            }
            Err(e) => self.notify_failure("Error generating ranking", "generating ranking", &e),
        }
    }

    pub(crate) fn apply_process_options(
        &mut self,
        purpose: OptionsPurpose,
        result: Result<Vec<ProcessOption>, ApiError>,
    ) {
        let processes = match result {
            Ok(processes) => processes,
            Err(e) => {
                log_debug(&format!("DEBUG [Options]: {:?} options failed: {}", purpose, e));
                return;
            }
        };

        match purpose {
            OptionsPurpose::Evaluation => self.model.evaluation.set_processes(processes),
            OptionsPurpose::Calendar => self.model.calendar.processes = processes,
            OptionsPurpose::Reports => self.model.reports.set_processes(processes),
        }
    }
}
