//! Dashboard fan-out and chart instance lifecycle

mod common;

use std::sync::atomic::Ordering;

use common::{application_error, Harness};
use serde_json::{json, Value};
use tenderdesk::handlers::handle_api_response;
use tenderdesk::model::charts::{Canvas, TerminalCharts};
use tenderdesk::model::Section;
use tenderdesk::services::api::{ApiRequest, ApiResponse};
use tenderdesk::App;
use tokio::sync::mpsc;

fn dashboard_ticket(sent: &[ApiRequest]) -> u64 {
    sent.iter()
        .find_map(|r| match r {
            ApiRequest::Dashboard { ticket } => Some(*ticket),
            _ => None,
        })
        .expect("dashboard request")
}

fn payload() -> Value {
    json!({
        "counters": {
            "total_processes": 5,
            "total_suppliers": 0,
            "total_bids": 12,
            "active_alerts": 2,
            "total_savings": 125000.5
        },
        "process_status_distribution": [
            {"status": "active", "count": 3},
            {"status": "draft", "count": 2}
        ],
        "top_suppliers": "not a list",
        "monthly_trends": [
            {"month": "2025-01", "count": 1},
            {"month": "2025-02", "count": 4}
        ],
        "recent_processes": [
            {"process_number": "LIC-2025-005", "title": "Cleaning", "status": "active"}
        ],
        "alert_priority_distribution": null
    })
}

#[test]
fn test_counters_and_charts_render_independently() {
    let mut h = Harness::new();
    h.app.activate(Section::Dashboard);
    let ticket = dashboard_ticket(&h.drain());

    handle_api_response(&mut h.app, ApiResponse::Dashboard { ticket, result: Ok(payload()) });

    let dashboard = &h.app.model.dashboard;
    let counters = dashboard.counters.as_ref().unwrap();
    assert_eq!(counters.total_processes, 5);
    assert_eq!(counters.total_suppliers, 0);
    assert!(!dashboard.loading);

    let status = h.app.charts.dataset(Canvas::ProcessStatus).unwrap();
    assert_eq!(
        status.segments(),
        vec![("active".to_string(), 3.0), ("draft".to_string(), 2.0)]
    );
    assert_eq!(h.app.charts.dataset(Canvas::MonthlyTrends).unwrap().labels.len(), 2);

    // Malformed supplier data and absent savings leave their canvases empty
    assert!(h.app.charts.dataset(Canvas::TopSuppliers).is_none());
    assert!(h.app.charts.dataset(Canvas::Savings).is_none());

    assert_eq!(dashboard.recent_processes.as_ref().unwrap().len(), 1);
    assert_eq!(dashboard.alert_priorities, Some(Vec::new()));

    assert!(h.drain().contains(&ApiRequest::AlertStats));
}

#[test]
fn test_reactivation_disposes_previous_charts() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let backend = TerminalCharts::new();
    let live = backend.live_counter();
    let mut app = App::with_chart_backend(false, std::env::temp_dir(), tx, Box::new(backend));

    for _ in 0..3 {
        app.activate(Section::Processes);
        app.activate(Section::Dashboard);
        let mut sent = Vec::new();
        while let Ok(request) = rx.try_recv() {
            sent.push(request);
        }
        let ticket = dashboard_ticket(&sent);
        handle_api_response(&mut app, ApiResponse::Dashboard { ticket, result: Ok(payload()) });

        // Status and trends only
        assert_eq!(live.load(Ordering::SeqCst), 2);
    }
}

#[test]
fn test_stale_dashboard_payload_is_ignored() {
    let mut h = Harness::new();
    h.app.activate(Section::Dashboard);
    let old = dashboard_ticket(&h.drain());
    h.app.refresh_dashboard();
    let _new = dashboard_ticket(&h.drain());

    handle_api_response(&mut h.app, ApiResponse::Dashboard { ticket: old, result: Ok(payload()) });
    assert!(h.app.model.dashboard.counters.is_none());
    assert!(h.app.charts.is_empty());
}

#[test]
fn test_failed_dashboard_posts_one_notice() {
    let mut h = Harness::new();
    h.app.activate(Section::Dashboard);
    let ticket = dashboard_ticket(&h.drain());

    handle_api_response(
        &mut h.app,
        ApiResponse::Dashboard {
            ticket,
            result: Err(application_error(500, "stats unavailable")),
        },
    );
    let notices: Vec<_> = h.app.model.notices.visible(Section::Dashboard).collect();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Error loading dashboard: stats unavailable");
}
