//! Evaluation section state
//!
//! A selected process drives three independent panes. Each pane settles on
//! its own, so one failing fetch never blanks the other two.

use super::types::Pane;
use crate::api::{Bid, BidRanking, EvaluationCriterion, ProcessOption};

pub const CRITERIA_IDLE: &str = "Select a process to view its criteria";
pub const BIDS_IDLE: &str = "Select a process to evaluate its bids";
pub const RANKING_IDLE: &str = "Select a process to view its ranking";

pub const CRITERIA_EMPTY: &str = "No criteria defined for this process";
pub const BIDS_EMPTY: &str = "No bids to evaluate for this process";
pub const RANKING_EMPTY: &str = "No ranking generated for this process";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationPane {
    #[default]
    Criteria,
    Bids,
    Ranking,
}

impl EvaluationPane {
    pub fn next(&self) -> Self {
        match self {
            EvaluationPane::Criteria => EvaluationPane::Bids,
            EvaluationPane::Bids => EvaluationPane::Ranking,
            EvaluationPane::Ranking => EvaluationPane::Criteria,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationModel {
    pub processes: Vec<ProcessOption>,
    /// Cursor in the process picker
    pub picker: Option<usize>,
    current_process: Option<u64>,
    pub criteria: Pane<EvaluationCriterion>,
    pub bids: Pane<Bid>,
    pub ranking: Pane<BidRanking>,
    pub focus: EvaluationPane,
}

impl EvaluationModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_process(&self) -> Option<u64> {
        self.current_process
    }

    /// Track `process_id` and mark all three panes as loading
    pub fn select(&mut self, process_id: u64) {
        self.current_process = Some(process_id);
        self.criteria = Pane::Loading;
        self.bids = Pane::Loading;
        self.ranking = Pane::Loading;
    }

    /// Forget the process and reset the panes to their idle message
    pub fn deselect(&mut self) {
        self.current_process = None;
        self.criteria = Pane::Idle;
        self.bids = Pane::Idle;
        self.ranking = Pane::Idle;
    }

    /// Whether a response for `process_id` still belongs on screen
    pub fn accepts(&self, process_id: u64) -> bool {
        self.current_process == Some(process_id)
    }

    /// All three panes have settled, successfully or not
    pub fn is_loaded(&self) -> bool {
        self.current_process.is_some()
            && !self.criteria.is_loading()
            && !self.bids.is_loading()
            && !self.ranking.is_loading()
    }

    /// Sum of criteria weights once criteria are loaded and non-empty
    pub fn total_weight(&self) -> Option<f64> {
        match &self.criteria {
            Pane::Ready(criteria) if !criteria.is_empty() => {
                Some(criteria.iter().map(|c| c.weight).sum())
            }
            _ => None,
        }
    }

    /// Set the processes offered by the picker, keeping the cursor on the tracked one
    pub fn set_processes(&mut self, processes: Vec<ProcessOption>) {
        self.picker = self
            .current_process
            .and_then(|pid| processes.iter().position(|p| p.id == pid))
            .or(if processes.is_empty() { None } else { Some(0) });
        self.processes = processes;
    }

    pub fn picked_process(&self) -> Option<&ProcessOption> {
        self.picker.and_then(|idx| self.processes.get(idx))
    }

    pub fn current_label(&self) -> Option<String> {
        let pid = self.current_process?;
        Some(
            self.processes
                .iter()
                .find(|p| p.id == pid)
                .map(ProcessOption::label)
                .unwrap_or_else(|| format!("Process {}", pid)),
        )
    }
}

/// Criteria weights must add up to exactly 100
pub fn weight_is_complete(total: f64) -> bool {
    (total - 100.0).abs() < 1e-9
}

pub fn criteria_type_label(criteria_type: &str) -> &str {
    match criteria_type {
        "technical" => "Technical",
        "commercial" => "Commercial",
        "financial" => "Financial",
        other => other,
    }
}

pub fn recommendation_label(recommendation: &str) -> &str {
    match recommendation {
        "award" => "Award",
        "conditional" => "Conditional",
        "reject" => "Reject",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criterion(id: u64, weight: f64) -> EvaluationCriterion {
        EvaluationCriterion {
            id,
            name: format!("c{}", id),
            description: None,
            weight,
            criteria_type: "technical".to_string(),
            max_score: Some(10.0),
        }
    }

    #[test]
    fn test_select_and_deselect() {
        let mut model = EvaluationModel::new();
        model.select(7);
        assert!(model.accepts(7));
        assert!(!model.accepts(8));
        assert!(!model.is_loaded());

        model.deselect();
        assert_eq!(model.current_process(), None);
        assert_eq!(model.criteria, Pane::Idle);
        assert_eq!(model.ranking, Pane::Idle);
    }

    #[test]
    fn test_loaded_once_each_branch_settles() {
        let mut model = EvaluationModel::new();
        model.select(1);
        model.criteria = Pane::Ready(vec![]);
        model.bids = Pane::Failed("boom".to_string());
        assert!(!model.is_loaded());
        model.ranking = Pane::Ready(vec![]);
        assert!(model.is_loaded());
    }

    #[test]
    fn test_total_weight_flagging() {
        let mut model = EvaluationModel::new();
        model.select(1);
        model.criteria = Pane::Ready(vec![criterion(1, 30.0), criterion(2, 30.0), criterion(3, 30.0)]);
        let total = model.total_weight().unwrap();
        assert_eq!(total, 90.0);
        assert!(!weight_is_complete(total));

        model.criteria = Pane::Ready(vec![criterion(1, 60.0), criterion(2, 40.0)]);
        assert!(weight_is_complete(model.total_weight().unwrap()));
    }

    #[test]
    fn test_no_weight_without_criteria() {
        let mut model = EvaluationModel::new();
        model.select(1);
        model.criteria = Pane::Ready(vec![]);
        assert_eq!(model.total_weight(), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(criteria_type_label("financial"), "Financial");
        assert_eq!(criteria_type_label("quality"), "quality");
        assert_eq!(recommendation_label("conditional"), "Conditional");
    }

    #[test]
    fn test_picker_follows_tracked_process() {
        let mut model = EvaluationModel::new();
        model.select(9);
        model.set_processes(vec![
            ProcessOption { id: 4, process_number: "P-4".into(), title: "A".into() },
            ProcessOption { id: 9, process_number: "P-9".into(), title: "B".into() },
        ]);
        assert_eq!(model.picker, Some(1));
        assert_eq!(model.current_label().as_deref(), Some("P-9 - B"));
    }
}
