//! Busy overlay driven by mutations and worker releases

mod common;

use std::time::{Duration, Instant};

use common::{processes_page, Harness};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde_json::json;
use tenderdesk::handlers::{handle_api_response, handle_key};
use tenderdesk::model::busy::{SAFETY_TIMEOUT, SETTLE_DELAY};
use tenderdesk::model::{EntityKind, Section};
use tenderdesk::services::api::ApiResponse;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn harness_on_processes() -> Harness {
    let mut h = Harness::new();
    h.app.activate(Section::Processes);
    let ticket = Harness::list_ticket(&h.drain());
    handle_api_response(
        &mut h.app,
        ApiResponse::SectionPage {
            section: Section::Processes,
            ticket,
            result: Ok(processes_page(&[1, 2], 1, 1, 2)),
        },
    );
    h
}

#[test]
fn test_release_hides_overlay_and_settles() {
    let mut h = harness_on_processes();
    h.app.request_delete();
    h.app.answer_delete(true);
    assert!(h.app.model.busy.is_visible());

    handle_api_response(
        &mut h.app,
        ApiResponse::Deleted {
            kind: EntityKind::Process,
            id: 1,
            result: Ok(json!({})),
        },
    );
    handle_api_response(&mut h.app, ApiResponse::BusyReleased);
    assert!(!h.app.model.busy.is_visible());
    assert!(h.app.model.busy.overlay_mounted());

    h.app.tick(Instant::now() + SETTLE_DELAY + Duration::from_millis(10));
    assert!(!h.app.model.busy.overlay_mounted());
}

#[test]
fn test_nested_mutations_share_one_overlay() {
    let mut h = harness_on_processes();
    h.app.request_delete();
    h.app.answer_delete(true);
    h.app.export_selected_process(tenderdesk::logic::files::ReportFormat::Pdf);
    assert_eq!(h.app.model.busy.depth(), 2);
    assert_eq!(h.app.model.busy.mounts(), 1);

    handle_api_response(&mut h.app, ApiResponse::BusyReleased);
    assert!(h.app.model.busy.is_visible());
    handle_api_response(&mut h.app, ApiResponse::BusyReleased);
    assert!(!h.app.model.busy.is_visible());

    // A stray release is harmless
    handle_api_response(&mut h.app, ApiResponse::BusyReleased);
    assert_eq!(h.app.model.busy.depth(), 0);
}

#[test]
fn test_safety_timeout_clears_a_forgotten_overlay() {
    let mut h = harness_on_processes();
    h.app.request_delete();
    h.app.answer_delete(true);

    h.app.tick(Instant::now() + Duration::from_secs(5));
    assert!(h.app.model.busy.is_visible());

    h.app.tick(Instant::now() + SAFETY_TIMEOUT + Duration::from_secs(1));
    assert!(!h.app.model.busy.is_visible());
    assert!(!h.app.model.busy.overlay_mounted());
}

#[test]
fn test_overlay_blocks_keys_except_ctrl_c() {
    let mut h = harness_on_processes();
    h.app.request_delete();
    h.app.answer_delete(true);
    h.drain();

    handle_key(&mut h.app, key(KeyCode::Char('q')));
    handle_key(&mut h.app, key(KeyCode::Char('r')));
    assert!(!h.app.model.ui.should_quit);
    assert!(h.drain().is_empty());

    handle_key(
        &mut h.app,
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
    );
    assert!(h.app.model.ui.should_quit);
}
