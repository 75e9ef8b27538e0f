//! Shared harness for integration tests
//!
//! The coordinator gets an in-process channel instead of the network worker:
//! tests read the requests it sends and answer with `ApiResponse`s.

#![allow(dead_code)]

use serde_json::{json, Value};
use tenderdesk::api::ApiError;
use tenderdesk::services::api::ApiRequest;
use tenderdesk::App;
use tokio::sync::mpsc;

pub struct Harness {
    pub app: App,
    pub requests: mpsc::UnboundedReceiver<ApiRequest>,
}

impl Harness {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(false, std::env::temp_dir(), tx);
        Self { app, requests: rx }
    }

    /// Everything sent since the last drain
    pub fn drain(&mut self) -> Vec<ApiRequest> {
        let mut sent = Vec::new();
        while let Ok(request) = self.requests.try_recv() {
            sent.push(request);
        }
        sent
    }

    /// Ticket of the single list request in `sent`
    pub fn list_ticket(sent: &[ApiRequest]) -> u64 {
        let tickets: Vec<u64> = sent
            .iter()
            .filter_map(|r| match r {
                ApiRequest::ListSection { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .collect();
        assert_eq!(tickets.len(), 1, "expected one list request, got {:?}", sent);
        tickets[0]
    }
}

pub fn application_error(status: u16, message: &str) -> ApiError {
    ApiError::Application {
        status,
        message: message.to_string(),
        details: Vec::new(),
    }
}

pub fn process_json(id: u64) -> Value {
    json!({
        "id": id,
        "process_number": format!("LIC-2025-{:03}", id),
        "title": format!("Process {}", id),
        "description": "Office supplies",
        "process_type": "simple_purchase",
        "status": "active",
        "budget": 1500000,
        "start_date": "2025-03-01T09:00:00",
        "end_date": null,
        "created_date": "2025-02-20T10:15:00",
        "notes": ""
    })
}

pub fn processes_page(ids: &[u64], current_page: u32, pages: u32, total: u64) -> Value {
    let items: Vec<Value> = ids.iter().map(|id| process_json(*id)).collect();
    json!({
        "processes": items,
        "current_page": current_page,
        "pages": pages,
        "total": total
    })
}
