//! Reports section state

use super::charts::{ChartKind, Dataset};
use crate::api::{MonthCount, ProcessAnalysis, ProcessOption};

pub const ANALYSIS_IDLE: &str = "Select a process and press Enter to analyse it";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportsModel {
    pub processes: Vec<ProcessOption>,
    pub picker: Option<usize>,
    pub analysis: Option<Result<ProcessAnalysis, String>>,
    /// Process whose analysis was last requested
    pub analysis_for: Option<u64>,
    pub trends_error: Option<String>,
}

impl ReportsModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_processes(&mut self, processes: Vec<ProcessOption>) {
        let keep = self
            .picked_process()
            .and_then(|current| processes.iter().position(|p| p.id == current.id));
        self.picker = keep.or(if processes.is_empty() { None } else { Some(0) });
        self.processes = processes;
    }

    pub fn picked_process(&self) -> Option<&ProcessOption> {
        self.picker.and_then(|idx| self.processes.get(idx))
    }
}

pub fn trends_dataset(points: Vec<MonthCount>) -> Dataset {
    Dataset::single(
        ChartKind::Line,
        "Processes",
        points
            .into_iter()
            .map(|p| (p.month, p.count as f64))
            .collect(),
    )
}

/// Lines describing an analysis result
///
/// A server `message` replaces the figures entirely.
pub fn analysis_lines(result: &ProcessAnalysis) -> Vec<String> {
    use crate::logic::formatting::{format_number, format_optional_currency};

    let analysis = &result.analysis;
    let mut lines = vec![result.process.label()];

    if let Some(message) = &analysis.message {
        lines.push(message.clone());
        return lines;
    }

    lines.push(format!("Total bids: {}", analysis.total_bids.unwrap_or(0)));

    if let Some(financial) = &analysis.financial_analysis {
        lines.push(String::new());
        lines.push("Financial".to_string());
        lines.push(format!("  Average:  {}", format_optional_currency(financial.average_amount)));
        lines.push(format!("  Lowest:   {}", format_optional_currency(financial.lowest_bid)));
        lines.push(format!("  Highest:  {}", format_optional_currency(financial.highest_bid)));
        lines.push(format!(
            "  Savings:  {} ({}%)",
            format_optional_currency(financial.savings_vs_budget),
            format_number(financial.savings_percentage.unwrap_or(0.0))
        ));
    }

    if let Some(technical) = &analysis.technical_analysis {
        let score = |v: Option<f64>| format_number(v.unwrap_or(0.0));
        lines.push(String::new());
        lines.push("Technical".to_string());
        lines.push(format!("  Average:  {}", score(technical.average_score)));
        lines.push(format!("  Highest:  {}", score(technical.highest_score)));
        lines.push(format!("  Lowest:   {}", score(technical.lowest_score)));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn option(id: u64) -> ProcessOption {
        ProcessOption {
            id,
            process_number: format!("P-{}", id),
            title: "T".to_string(),
        }
    }

    #[test]
    fn test_trends_dataset() {
        let data = trends_dataset(vec![
            MonthCount { month: "2025-01".into(), count: 2 },
            MonthCount { month: "2025-02".into(), count: 5 },
        ]);
        assert_eq!(data.kind, ChartKind::Line);
        assert_eq!(data.segments(), vec![("2025-01".to_string(), 2.0), ("2025-02".to_string(), 5.0)]);
    }

    #[test]
    fn test_picker_keeps_selection() {
        let mut model = ReportsModel::new();
        model.set_processes(vec![option(1), option(2)]);
        model.picker = Some(1);
        model.set_processes(vec![option(3), option(2)]);
        assert_eq!(model.picked_process().map(|p| p.id), Some(2));
    }

    #[test]
    fn test_analysis_message_replaces_figures() {
        let result: ProcessAnalysis = serde_json::from_value(json!({
            "process": {"id": 1, "process_number": "P-1", "title": "Paper"},
            "analysis": {"message": "No bids for this process", "total_bids": 0}
        }))
        .unwrap();
        assert_eq!(analysis_lines(&result), vec!["P-1 - Paper", "No bids for this process"]);
    }

    #[test]
    fn test_analysis_figures() {
        let result: ProcessAnalysis = serde_json::from_value(json!({
            "process": {"id": 1, "process_number": "P-1", "title": "Paper"},
            "analysis": {
                "total_bids": 3,
                "financial_analysis": {
                    "average_amount": 1000, "lowest_bid": 800, "highest_bid": 1200,
                    "savings_vs_budget": 200, "savings_percentage": 16.67
                },
                "technical_analysis": {"average_score": 7.5, "highest_score": 9, "lowest_score": 6}
            }
        }))
        .unwrap();
        let lines = analysis_lines(&result);
        assert!(lines.contains(&"Total bids: 3".to_string()));
        assert!(lines.contains(&"  Savings:  $200 (16.67%)".to_string()));
        assert!(lines.contains(&"  Average:  7.5".to_string()));
    }
}
