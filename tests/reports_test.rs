//! Reports responses render only for the visible section and requested process

mod common;

use common::Harness;
use tenderdesk::api::{Analysis, MonthCount, ProcessAnalysis, ProcessOption};
use tenderdesk::handlers::handle_api_response;
use tenderdesk::model::charts::Canvas;
use tenderdesk::model::Section;
use tenderdesk::services::api::{ApiRequest, ApiResponse, OptionsPurpose};

fn option(id: u64) -> ProcessOption {
    ProcessOption {
        id,
        process_number: format!("LIC-2025-{:03}", id),
        title: format!("Process {}", id),
    }
}

fn analysis(id: u64, total_bids: u64) -> ProcessAnalysis {
    ProcessAnalysis {
        process: option(id),
        analysis: Analysis {
            total_bids: Some(total_bids),
            ..Analysis::default()
        },
    }
}

fn on_reports() -> Harness {
    let mut h = Harness::new();
    h.app.activate(Section::Reports);
    h.drain();
    handle_api_response(
        &mut h.app,
        ApiResponse::ProcessOptions {
            purpose: OptionsPurpose::Reports,
            result: Ok(vec![option(3), option(4)]),
        },
    );
    h
}

#[test]
fn test_analysis_for_picked_process_renders() {
    let mut h = on_reports();
    h.app.generate_analysis();
    assert_eq!(h.drain(), vec![ApiRequest::ProcessAnalysis { process_id: 3 }]);

    handle_api_response(
        &mut h.app,
        ApiResponse::ProcessAnalysis {
            process_id: 3,
            result: Ok(analysis(3, 5)),
        },
    );
    assert_eq!(h.app.model.reports.analysis, Some(Ok(analysis(3, 5))));
}

#[test]
fn test_superseded_analysis_is_discarded() {
    let mut h = on_reports();
    h.app.generate_analysis();
    h.app.move_reports_picker(1);
    h.app.generate_analysis();
    h.drain();

    handle_api_response(
        &mut h.app,
        ApiResponse::ProcessAnalysis {
            process_id: 3,
            result: Ok(analysis(3, 5)),
        },
    );
    assert_eq!(h.app.model.reports.analysis, None);

    handle_api_response(
        &mut h.app,
        ApiResponse::ProcessAnalysis {
            process_id: 4,
            result: Ok(analysis(4, 1)),
        },
    );
    assert_eq!(h.app.model.reports.analysis, Some(Ok(analysis(4, 1))));
}

#[test]
fn test_late_reports_responses_skip_hidden_section() {
    let mut h = on_reports();
    h.app.generate_analysis();
    h.app.activate(Section::Suppliers);

    handle_api_response(
        &mut h.app,
        ApiResponse::ProcessAnalysis {
            process_id: 3,
            result: Ok(analysis(3, 5)),
        },
    );
    handle_api_response(
        &mut h.app,
        ApiResponse::ProcessTrends {
            result: Ok(vec![MonthCount {
                month: "2025-01".to_string(),
                count: 2,
            }]),
        },
    );

    assert_eq!(h.app.model.reports.analysis, None);
    assert!(h.app.charts.dataset(Canvas::ReportTrends).is_none());
}
