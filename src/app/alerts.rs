//! Alert actions and the alert badge

use serde_json::Value;

use crate::api::{AlertStats, ApiError};
use crate::log_debug;
use crate::model::{EntityKind, Section, Severity};
use crate::services::api::ApiRequest;
use crate::App;

impl App {
    /// Fetch alert stats for the badge, outside the poll schedule
    pub fn refresh_badge(&mut self) {
        let _ = self.send_request(ApiRequest::AlertStats);
    }

    pub(crate) fn apply_alert_stats(&mut self, result: Result<AlertStats, ApiError>) {
        match result {
            Ok(stats) => self.model.badge.set_count(stats.active()),
            // Badge keeps its last count
            Err(e) => log_debug(&format!("DEBUG [Badge]: stats failed: {}", e)),
        }
    }

    fn selected_alert(&self) -> Option<u64> {
        if !self.model.view.is_active(Section::Alerts) {
            return None;
        }
        self.model
            .table(Section::Alerts)
            .and_then(|t| t.selected_row())
            .map(|row| row.id)
    }

    pub fn dismiss_selected_alert(&mut self) {
        self.update_selected_alert("dismissed");
    }

    pub fn resolve_selected_alert(&mut self) {
        self.update_selected_alert("resolved");
    }

    fn update_selected_alert(&mut self, status: &str) {
        if let Some(id) = self.selected_alert() {
            let _ = self.send_request(ApiRequest::UpdateAlertStatus {
                id,
                status: status.to_string(),
            });
        }
    }

    pub(crate) fn apply_alert_status(&mut self, status: &str, result: Result<Value, ApiError>) {
        let (done, failed, doing) = match status {
            "resolved" => ("Alert resolved", "Error resolving alert", "resolving alert"),
            _ => ("Alert dismissed", "Error dismissing alert", "dismissing alert"),
        };

        match result {
            Ok(_) => {
                self.notify(done, Severity::Success);
                self.reload_list(EntityKind::Alert.section());
                self.refresh_badge();
            }
            Err(e) => self.notify_failure(failed, doing, &e),
        }
    }

    pub fn check_deadlines(&mut self) {
        let _ = self.send_request(ApiRequest::CheckDeadlines);
    }

    pub(crate) fn apply_deadlines_checked(&mut self, result: Result<Value, ApiError>) {
        match result {
            Ok(body) => {
                let message = body
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("Deadline check completed")
                    .to_string();
                self.notify(message, Severity::Success);
                self.reload_list(EntityKind::Alert.section());
                self.refresh_badge();
            }
            Err(e) => self.notify_failure("Error checking deadlines", "checking deadlines", &e),
        }
    }
}
