//! Alert actions and the alert badge

mod common;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use common::Harness;
use serde_json::{json, Value};
use tenderdesk::api::AlertStats;
use tenderdesk::handlers::handle_api_response;
use tenderdesk::model::badge::POLL_INTERVAL;
use tenderdesk::model::Section;
use tenderdesk::services::api::{ApiRequest, ApiResponse};

fn stats(active: u64) -> AlertStats {
    AlertStats {
        by_status: HashMap::from([("active".to_string(), active), ("resolved".to_string(), 9)]),
    }
}

fn alert_json(id: u64) -> Value {
    json!({
        "id": id,
        "title": format!("Deadline approaching for LIC-{}", id),
        "alert_type": "deadline",
        "priority": "high",
        "status": "active",
        "process_title": "Office supplies",
        "created_date": "2025-03-02T08:00:00"
    })
}

fn show_alerts(h: &mut Harness, ids: &[u64]) {
    h.app.activate(Section::Alerts);
    let ticket = Harness::list_ticket(&h.drain());
    let items: Vec<Value> = ids.iter().map(|id| alert_json(*id)).collect();
    handle_api_response(
        &mut h.app,
        ApiResponse::SectionPage {
            section: Section::Alerts,
            ticket,
            result: Ok(json!({"alerts": items, "current_page": 1, "pages": 1, "total": ids.len()})),
        },
    );
}

#[test]
fn test_dismiss_refreshes_badge_and_list() {
    let mut h = Harness::new();
    show_alerts(&mut h, &[7, 8, 9]);
    handle_api_response(&mut h.app, ApiResponse::AlertStats { result: Ok(stats(3)) });
    assert_eq!(h.app.model.badge.label().as_deref(), Some("3"));

    h.app.dismiss_selected_alert();
    assert_eq!(
        h.drain(),
        vec![ApiRequest::UpdateAlertStatus {
            id: 7,
            status: "dismissed".to_string()
        }]
    );

    handle_api_response(
        &mut h.app,
        ApiResponse::AlertStatusUpdated {
            id: 7,
            status: "dismissed".to_string(),
            result: Ok(json!({"message": "ok"})),
        },
    );
    let sent = h.drain();
    assert_eq!(
        sent.iter()
            .filter(|r| matches!(r, ApiRequest::ListSection { section: Section::Alerts, .. }))
            .count(),
        1
    );
    assert!(sent.contains(&ApiRequest::AlertStats));

    handle_api_response(&mut h.app, ApiResponse::AlertStats { result: Ok(stats(2)) });
    assert_eq!(h.app.model.badge.count(), 2);
    assert_eq!(
        h.app.model.notices.visible(Section::Alerts).next().unwrap().message,
        "Alert dismissed"
    );
}

#[test]
fn test_badge_hides_at_zero_and_survives_failures() {
    let mut h = Harness::new();
    handle_api_response(&mut h.app, ApiResponse::AlertStats { result: Ok(stats(1)) });
    handle_api_response(
        &mut h.app,
        ApiResponse::AlertStats {
            result: Err(common::application_error(500, "boom")),
        },
    );
    assert_eq!(h.app.model.badge.count(), 1);

    handle_api_response(&mut h.app, ApiResponse::AlertStats { result: Ok(stats(0)) });
    assert_eq!(h.app.model.badge.label(), None);
}

#[test]
fn test_badge_polls_on_a_fixed_period() {
    let mut h = Harness::new();
    let now = Instant::now();
    h.app.start(None, now);
    h.drain();

    h.app.tick(now + Duration::from_secs(10));
    assert!(!h.drain().contains(&ApiRequest::AlertStats));

    h.app.tick(now + POLL_INTERVAL);
    assert_eq!(
        h.drain().iter().filter(|r| **r == ApiRequest::AlertStats).count(),
        1
    );

    // The poll keeps running whatever section is active
    h.app.activate(Section::Excel);
    h.drain();
    h.app.tick(now + POLL_INTERVAL * 2);
    assert!(h.drain().contains(&ApiRequest::AlertStats));
}

#[test]
fn test_check_deadlines_shows_server_message() {
    let mut h = Harness::new();
    show_alerts(&mut h, &[1]);
    h.app.check_deadlines();
    assert_eq!(h.drain(), vec![ApiRequest::CheckDeadlines]);
    assert!(h.app.model.busy.is_visible());

    handle_api_response(
        &mut h.app,
        ApiResponse::DeadlinesChecked {
            result: Ok(json!({"message": "Created 2 alerts"})),
        },
    );
    handle_api_response(&mut h.app, ApiResponse::BusyReleased);

    assert!(!h.app.model.busy.is_visible());
    assert_eq!(
        h.app.model.notices.visible(Section::Alerts).next().unwrap().message,
        "Created 2 alerts"
    );
    let sent = h.drain();
    assert!(sent.contains(&ApiRequest::AlertStats));
}
