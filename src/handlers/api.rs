//! API Response Handler
//!
//! Routes each response from the background worker to the coordinator that
//! asked for it, after updating the connection indicator.

use std::time::Instant;

use crate::model::evaluation::EvaluationPane;
use crate::services::api::ApiResponse;
use crate::App;

/// Handle API response from background service
pub fn handle_api_response(app: &mut App, response: ApiResponse) {
    match response {
        ApiResponse::SectionPage {
            section,
            ticket,
            result,
        } => {
            app.record_outcome(&result);
            app.apply_list_page(section, ticket, result);
        }

        ApiResponse::Record { kind, id, result } => {
            app.record_outcome(&result);
            app.apply_record(kind, id, result);
        }

        ApiResponse::Saved { kind, id, result } => {
            app.record_outcome(&result);
            app.apply_saved(kind, id, result);
        }

        ApiResponse::Deleted { kind, result, .. } => {
            app.record_outcome(&result);
            app.apply_deleted(kind, result);
        }

        ApiResponse::AlertStatusUpdated { status, result, .. } => {
            app.record_outcome(&result);
            app.apply_alert_status(&status, result);
        }

        ApiResponse::DeadlinesChecked { result } => {
            app.record_outcome(&result);
            app.apply_deadlines_checked(result);
        }

        ApiResponse::AlertStats { result } => {
            app.record_outcome(&result);
            app.apply_alert_stats(result);
        }

        ApiResponse::Dashboard { ticket, result } => {
            app.record_outcome(&result);
            app.apply_dashboard(ticket, result);
        }

        ApiResponse::ProcessOptions { purpose, result } => {
            app.record_outcome(&result);
            app.apply_process_options(purpose, result);
        }

        ApiResponse::EvaluationCriteria { process_id, result } => {
            app.record_outcome(&result);
            if let Some(pane) = app.apply_evaluation_pane(EvaluationPane::Criteria, process_id, result) {
                app.model.evaluation.criteria = pane;
            }
        }

        ApiResponse::EvaluationBids { process_id, result } => {
            app.record_outcome(&result);
            if let Some(pane) = app.apply_evaluation_pane(EvaluationPane::Bids, process_id, result) {
                app.model.evaluation.bids = pane;
            }
        }

        ApiResponse::EvaluationRanking { process_id, result } => {
            app.record_outcome(&result);
            if let Some(pane) = app.apply_evaluation_pane(EvaluationPane::Ranking, process_id, result) {
                app.model.evaluation.ranking = pane;
            }
        }

        ApiResponse::RankingGenerated { process_id, result } => {
            app.record_outcome(&result);
            app.apply_ranking_generated(process_id, result);
        }

        ApiResponse::CalendarEvents { ticket, result } => {
            app.record_outcome(&result);
            app.apply_calendar_events(ticket, result);
        }

        ApiResponse::UpcomingMilestones { result } => {
            app.record_outcome(&result);
            app.apply_milestones(false, result);
        }

        ApiResponse::OverdueMilestones { result } => {
            app.record_outcome(&result);
            app.apply_milestones(true, result);
        }

        ApiResponse::CalendarStats { result } => {
            app.record_outcome(&result);
            app.apply_calendar_stats(result);
        }

        ApiResponse::ProcessTrends { result } => {
            app.record_outcome(&result);
            app.apply_process_trends(result);
        }

        ApiResponse::ProcessAnalysis { process_id, result } => {
            app.record_outcome(&result);
            app.apply_analysis(process_id, result);
        }

        ApiResponse::Downloaded { target, result } => {
            app.record_outcome(&result);
            app.apply_download(target, result);
        }

        ApiResponse::ExcelUploaded { result } => {
            app.record_outcome(&result);
            app.apply_excel_upload(result);
        }

        ApiResponse::ExcelData { table_type, result } => {
            app.record_outcome(&result);
            app.apply_excel_data(&table_type, result);
        }

        ApiResponse::BusyReleased => {
            app.model.busy.end(Instant::now());
        }
    }
}
