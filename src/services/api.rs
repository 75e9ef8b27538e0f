use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;

use reqwest::Method;
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::api::{
    AlertStats, ApiError, Bid, BidRanking, CalendarEvent, CalendarStats, DownloadedFile,
    EvaluationCriterion, ImportReport, Milestone, MonthCount, ProcessAnalysis, ProcessOption,
    ProcurementClient,
};
use crate::log_debug;
use crate::logic::files::DownloadTarget;
use crate::model::{EntityKind, Section};

/// Priority level for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    High,   // User-initiated mutations and downloads
    Medium, // Section content
    Low,    // Badge polling
}

/// Section that asked for the process picker options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionsPurpose {
    Evaluation,
    Calendar,
    Reports,
}

/// API request types
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    /// One page of a list section
    ListSection {
        section: Section,
        ticket: u64,
        query: Vec<(String, String)>,
    },

    /// Single record for the edit form
    FetchRecord { kind: EntityKind, id: u64 },

    /// POST (no id) or PUT (with id)
    SaveRecord {
        kind: EntityKind,
        id: Option<u64>,
        payload: Value,
    },

    DeleteRecord { kind: EntityKind, id: u64 },

    /// Dismiss or resolve an alert
    UpdateAlertStatus { id: u64, status: String },

    CheckDeadlines,

    AlertStats,

    Dashboard { ticket: u64 },

    ProcessOptions { purpose: OptionsPurpose },

    EvaluationCriteria { process_id: u64 },
    EvaluationBids { process_id: u64 },
    EvaluationRanking { process_id: u64 },
    GenerateRanking { process_id: u64 },

    CalendarEvents {
        ticket: u64,
        query: Vec<(String, String)>,
    },
    UpcomingMilestones,
    OverdueMilestones,
    CalendarStats,

    ProcessTrends,
    ProcessAnalysis { process_id: u64 },

    Download { target: DownloadTarget },

    ExcelUpload { path: PathBuf, table_type: String },
    ExcelData { table_type: String },
}

impl ApiRequest {
    /// Extract priority from request
    fn priority(&self) -> Priority {
        match self {
            ApiRequest::AlertStats => Priority::Low,
            ApiRequest::ListSection { .. }
            | ApiRequest::Dashboard { .. }
            | ApiRequest::ProcessOptions { .. }
            | ApiRequest::EvaluationCriteria { .. }
            | ApiRequest::EvaluationBids { .. }
            | ApiRequest::EvaluationRanking { .. }
            | ApiRequest::CalendarEvents { .. }
            | ApiRequest::UpcomingMilestones
            | ApiRequest::OverdueMilestones
            | ApiRequest::CalendarStats
            | ApiRequest::ProcessTrends
            | ApiRequest::ExcelData { .. } => Priority::Medium,
            _ => Priority::High,
        }
    }

    /// Whether the busy overlay stays up until this request has completed
    pub fn holds_busy(&self) -> bool {
        match self {
            ApiRequest::SaveRecord { .. }
            | ApiRequest::DeleteRecord { .. }
            | ApiRequest::CheckDeadlines
            | ApiRequest::GenerateRanking { .. }
            | ApiRequest::ProcessAnalysis { .. }
            | ApiRequest::ExcelUpload { .. } => true,
            ApiRequest::Download { target } => target.holds_busy(),
            _ => false,
        }
    }
}

/// API response types
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    SectionPage {
        section: Section,
        ticket: u64,
        result: Result<Value, ApiError>,
    },

    Record {
        kind: EntityKind,
        id: u64,
        result: Result<Value, ApiError>,
    },

    Saved {
        kind: EntityKind,
        id: Option<u64>,
        result: Result<Value, ApiError>,
    },

    Deleted {
        kind: EntityKind,
        id: u64,
        result: Result<Value, ApiError>,
    },

    AlertStatusUpdated {
        id: u64,
        status: String,
        result: Result<Value, ApiError>,
    },

    DeadlinesChecked {
        result: Result<Value, ApiError>,
    },

    AlertStats {
        result: Result<AlertStats, ApiError>,
    },

    Dashboard {
        ticket: u64,
        result: Result<Value, ApiError>,
    },

    ProcessOptions {
        purpose: OptionsPurpose,
        result: Result<Vec<ProcessOption>, ApiError>,
    },

    EvaluationCriteria {
        process_id: u64,
        result: Result<Vec<EvaluationCriterion>, ApiError>,
    },

    EvaluationBids {
        process_id: u64,
        result: Result<Vec<Bid>, ApiError>,
    },

    EvaluationRanking {
        process_id: u64,
        result: Result<Vec<BidRanking>, ApiError>,
    },

    RankingGenerated {
        process_id: u64,
        result: Result<Value, ApiError>,
    },

    CalendarEvents {
        ticket: u64,
        result: Result<Vec<CalendarEvent>, ApiError>,
    },

    UpcomingMilestones {
        result: Result<Vec<Milestone>, ApiError>,
    },

    OverdueMilestones {
        result: Result<Vec<Milestone>, ApiError>,
    },

    CalendarStats {
        result: Result<CalendarStats, ApiError>,
    },

    ProcessTrends {
        result: Result<Vec<MonthCount>, ApiError>,
    },

    ProcessAnalysis {
        process_id: u64,
        result: Result<ProcessAnalysis, ApiError>,
    },

    Downloaded {
        target: DownloadTarget,
        result: Result<DownloadedFile, ApiError>,
    },

    ExcelUploaded {
        result: Result<ImportReport, ApiError>,
    },

    ExcelData {
        table_type: String,
        result: Result<Value, ApiError>,
    },

    /// A busy-holding request finished, on every exit path
    BusyReleased,
}

/// Releases the busy overlay when dropped
///
/// Created inside the request task, so the release is sent after the
/// response even if the task unwinds.
pub struct BusyLease {
    tx: mpsc::UnboundedSender<ApiResponse>,
}

impl BusyLease {
    pub fn new(tx: mpsc::UnboundedSender<ApiResponse>) -> Self {
        Self { tx }
    }
}

impl Drop for BusyLease {
    fn drop(&mut self) {
        let _ = self.tx.send(ApiResponse::BusyReleased);
    }
}

/// Internal message for tracking completed requests
pub(crate) enum InternalMessage {
    Completed(u64),
}

/// API service worker that processes requests in the background
pub struct ApiService {
    client: ProcurementClient,
    request_queue: VecDeque<(ApiRequest, Priority)>,
    in_flight: HashSet<u64>,
    next_id: u64,
    response_tx: mpsc::UnboundedSender<ApiResponse>,
    completion_tx: mpsc::UnboundedSender<InternalMessage>,
    max_concurrent: usize,
}

impl ApiService {
    pub(crate) fn new(
        client: ProcurementClient,
        response_tx: mpsc::UnboundedSender<ApiResponse>,
        completion_tx: mpsc::UnboundedSender<InternalMessage>,
    ) -> Self {
        Self {
            client,
            request_queue: VecDeque::new(),
            in_flight: HashSet::new(),
            next_id: 0,
            response_tx,
            completion_tx,
            max_concurrent: 6,
        }
    }

    /// Add a request to the queue, high priority first
    fn enqueue(&mut self, request: ApiRequest) {
        let priority = request.priority();

        let insert_pos = self
            .request_queue
            .iter()
            .position(|(_, p)| *p > priority)
            .unwrap_or(self.request_queue.len());

        self.request_queue.insert(insert_pos, (request, priority));
    }

    /// Process the next request from the queue
    fn process_next(&mut self) {
        if self.in_flight.len() >= self.max_concurrent {
            return;
        }

        let Some((request, _)) = self.request_queue.pop_front() else {
            return;
        };

        self.next_id += 1;
        let id = self.next_id;
        self.in_flight.insert(id);

        let client = self.client.clone();
        let response_tx = self.response_tx.clone();
        let completion_tx = self.completion_tx.clone();

        // No per-request retries: retrying is a user action
        tokio::spawn(async move {
            let _lease = request
                .holds_busy()
                .then(|| BusyLease::new(response_tx.clone()));

            let response = execute_request(&client, request).await;
            let _ = response_tx.send(response);

            let _ = completion_tx.send(InternalMessage::Completed(id));
        });
    }
}

fn log_failure<T>(what: &str, result: &Result<T, ApiError>) {
    if let Err(e) = result {
        log_debug(&format!("DEBUG [API Service]: {} failed: {}", what, e));
    }
}

/// Execute an API request and return the response
pub async fn execute_request(client: &ProcurementClient, request: ApiRequest) -> ApiResponse {
    match request {
        ApiRequest::ListSection {
            section,
            ticket,
            query,
        } => {
            let path = section.entity().map(|kind| kind.path()).unwrap_or("/");
            let result = client.get::<Value>(path, &query).await;
            log_failure(path, &result);
            ApiResponse::SectionPage {
                section,
                ticket,
                result,
            }
        }

        ApiRequest::FetchRecord { kind, id } => {
            let result = client.get::<Value>(&kind.record_path(id), &[]).await;
            ApiResponse::Record { kind, id, result }
        }

        ApiRequest::SaveRecord { kind, id, payload } => {
            let result = match id {
                Some(id) => {
                    client
                        .send(Method::PUT, &kind.record_path(id), Some(&payload))
                        .await
                }
                None => client.send(Method::POST, kind.path(), Some(&payload)).await,
            };
            log_failure("save", &result);
            ApiResponse::Saved { kind, id, result }
        }

        ApiRequest::DeleteRecord { kind, id } => {
            let result = client.send(Method::DELETE, &kind.record_path(id), None).await;
            log_failure("delete", &result);
            ApiResponse::Deleted { kind, id, result }
        }

        ApiRequest::UpdateAlertStatus { id, status } => {
            let body = serde_json::json!({ "status": status });
            let result = client
                .send(Method::PUT, &EntityKind::Alert.record_path(id), Some(&body))
                .await;
            ApiResponse::AlertStatusUpdated { id, status, result }
        }

        ApiRequest::CheckDeadlines => {
            let result = client
                .send(Method::POST, "/alerts/check-deadlines", None)
                .await;
            ApiResponse::DeadlinesChecked { result }
        }

        ApiRequest::AlertStats => ApiResponse::AlertStats {
            result: client.alert_stats().await,
        },

        ApiRequest::Dashboard { ticket } => {
            let result = client.get::<Value>("/reports/dashboard", &[]).await;
            log_failure("dashboard", &result);
            ApiResponse::Dashboard { ticket, result }
        }

        ApiRequest::ProcessOptions { purpose } => ApiResponse::ProcessOptions {
            purpose,
            result: client.process_options().await,
        },

        ApiRequest::EvaluationCriteria { process_id } => {
            let path = format!("/evaluation/criteria/{}", process_id);
            let result = client.get(&path, &[]).await;
            log_failure(&path, &result);
            ApiResponse::EvaluationCriteria { process_id, result }
        }

        ApiRequest::EvaluationBids { process_id } => {
            let result = client.process_bids(process_id).await;
            log_failure("process bids", &result);
            ApiResponse::EvaluationBids { process_id, result }
        }

        ApiRequest::EvaluationRanking { process_id } => {
            let path = format!("/evaluation/ranking/{}", process_id);
            let result = client.get(&path, &[]).await;
            log_failure(&path, &result);
            ApiResponse::EvaluationRanking { process_id, result }
        }

        ApiRequest::GenerateRanking { process_id } => {
            let path = format!("/evaluation/ranking/{}/generate", process_id);
            let result = client.send(Method::POST, &path, None).await;
            ApiResponse::RankingGenerated { process_id, result }
        }

        ApiRequest::CalendarEvents { ticket, query } => {
            let result = client.get("/calendar/events", &query).await;
            log_failure("calendar events", &result);
            ApiResponse::CalendarEvents { ticket, result }
        }

        ApiRequest::UpcomingMilestones => ApiResponse::UpcomingMilestones {
            result: client.get("/calendar/upcoming", &[]).await,
        },

        ApiRequest::OverdueMilestones => ApiResponse::OverdueMilestones {
            result: client.get("/calendar/overdue", &[]).await,
        },

        ApiRequest::CalendarStats => ApiResponse::CalendarStats {
            result: client.get("/calendar/stats", &[]).await,
        },

        ApiRequest::ProcessTrends => ApiResponse::ProcessTrends {
            result: client.process_trends().await,
        },

        ApiRequest::ProcessAnalysis { process_id } => {
            let path = format!("/reports/process/{}/analysis", process_id);
            ApiResponse::ProcessAnalysis {
                process_id,
                result: client.get(&path, &[]).await,
            }
        }

        ApiRequest::Download { target } => {
            let result = client.download(&target.path()).await;
            log_failure(&target.path(), &result);
            ApiResponse::Downloaded { target, result }
        }

        ApiRequest::ExcelUpload { path, table_type } => {
            let result = client.upload_workbook(&path, &table_type).await;
            log_failure("excel upload", &result);
            ApiResponse::ExcelUploaded { result }
        }

        ApiRequest::ExcelData { table_type } => {
            let path = format!("/excel/data/{}", urlencoding::encode(&table_type));
            ApiResponse::ExcelData {
                result: client.get(&path, &[]).await,
                table_type,
            }
        }
    }
}

/// Spawn the API service worker
pub fn spawn_api_service(
    client: ProcurementClient,
) -> (
    mpsc::UnboundedSender<ApiRequest>,
    mpsc::UnboundedReceiver<ApiResponse>,
) {
    let (request_tx, mut request_rx) = mpsc::unbounded_channel::<ApiRequest>();
    let (response_tx, response_rx) = mpsc::unbounded_channel::<ApiResponse>();
    let (completion_tx, mut completion_rx) = mpsc::unbounded_channel::<InternalMessage>();

    tokio::spawn(async move {
        let mut service = ApiService::new(client, response_tx, completion_tx);

        // Ticker for processing queue
        let mut tick = interval(Duration::from_millis(10));

        loop {
            tokio::select! {
                request = request_rx.recv() => {
                    match request {
                        Some(request) => service.enqueue(request),
                        // UI loop is gone
                        None => break,
                    }
                }

                Some(InternalMessage::Completed(id)) = completion_rx.recv() => {
                    service.in_flight.remove(&id);
                }

                _ = tick.tick() => {
                    for _ in 0..5 {
                        if service.request_queue.is_empty() {
                            break;
                        }
                        service.process_next();
                    }
                }
            }
        }

        log_debug("DEBUG [API Service]: request channel closed, stopping");
    });

    (request_tx, response_rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> (ApiService, mpsc::UnboundedReceiver<ApiResponse>) {
        let client = ProcurementClient::new("http://localhost:5000/api".to_string()).unwrap();
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let (completion_tx, _completion_rx) = mpsc::unbounded_channel();
        (ApiService::new(client, response_tx, completion_tx), response_rx)
    }

    #[test]
    fn test_priority_ordering() {
        let (mut service, _rx) = service();
        service.enqueue(ApiRequest::AlertStats);
        service.enqueue(ApiRequest::Dashboard { ticket: 1 });
        service.enqueue(ApiRequest::DeleteRecord {
            kind: EntityKind::Process,
            id: 3,
        });
        service.enqueue(ApiRequest::ProcessTrends);

        let order: Vec<Priority> = service.request_queue.iter().map(|(_, p)| *p).collect();
        assert_eq!(
            order,
            vec![Priority::High, Priority::Medium, Priority::Medium, Priority::Low]
        );
        assert_eq!(service.request_queue[1].0, ApiRequest::Dashboard { ticket: 1 });
    }

    #[test]
    fn test_busy_holding_requests() {
        assert!(ApiRequest::CheckDeadlines.holds_busy());
        assert!(ApiRequest::Download {
            target: DownloadTarget::ProcessesExport
        }
        .holds_busy());
        assert!(!ApiRequest::Download {
            target: DownloadTarget::Document { document_id: 1 }
        }
        .holds_busy());
        assert!(!ApiRequest::UpdateAlertStatus {
            id: 1,
            status: "dismissed".to_string()
        }
        .holds_busy());
        assert!(!ApiRequest::AlertStats.holds_busy());
    }

    #[test]
    fn test_busy_lease_releases_on_drop() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        {
            let _lease = BusyLease::new(tx);
        }
        assert_eq!(rx.try_recv().ok(), Some(ApiResponse::BusyReleased));
    }

    #[tokio::test]
    async fn test_busy_lease_released_when_task_panics() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let _lease = BusyLease::new(tx);
            panic!("request failed hard");
        });
        assert!(handle.await.is_err());
        assert_eq!(rx.recv().await, Some(ApiResponse::BusyReleased));
    }
}
